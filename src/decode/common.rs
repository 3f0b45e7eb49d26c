// decode/common.rs -- Common decoding operations
// Copyright (C) 2015 Alex Iadicicco

use log::debug;

use crate::decode::ByteSource;
use crate::instruction::*;

/// Longest RX instruction, in bytes.
pub const MAX_BYTES: usize = 8;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    #[cfg(not(feature = "big-endian"))]
    pub const NATIVE: ByteOrder = ByteOrder::Little;
    #[cfg(feature = "big-endian")]
    pub const NATIVE: ByteOrder = ByteOrder::Big;
}

// Size fields, indexed by their 2-bit encodings. The fourth entries of BWL and
// SBWL have no meaning; callers rule them out before indexing.
pub const BWL: [Size; 3] = [Size::Byte, Size::Word, Size::Long];
pub const SBWL: [Size; 3] = [Size::SByte, Size::SWord, Size::Long];
pub const UBW: [Size; 2] = [Size::UByte, Size::UWord];
pub const MEMEX: [Size; 4] = [Size::SByte, Size::SWord, Size::Long, Size::UWord];

#[inline]
pub fn bit(b: u8, n: u8) -> u8 { (b >> n) & 0b1 }

#[inline]
pub fn pair(b: u8, n: u8) -> u8 { (b >> n) & 0b11 }

#[inline]
pub fn triple(b: u8, n: u8) -> u8 { (b >> n) & 0b111 }

#[inline]
pub fn hi(b: u8) -> u8 { b >> 4 }

#[inline]
pub fn lo(b: u8) -> u8 { b & 0xf }

/// Working state for one decode. Holds the bytes consumed so far so that
/// earlier fields stay addressable while later bytes are fetched.
pub struct Cursor<'a> {
    src: &'a mut dyn ByteSource,
    buf: [u8; MAX_BYTES],
    len: usize,
    order: ByteOrder,
    trace: bool,
}

impl<'a> Cursor<'a> {
    pub fn new(src: &'a mut dyn ByteSource, order: ByteOrder, trace: bool) -> Cursor<'a> {
        Cursor {
            src: src,
            buf: [0; MAX_BYTES],
            len: 0,
            order: order,
            trace: trace,
        }
    }

    /// Pulls one byte from the source and keeps it.
    pub fn fetch(&mut self) -> u8 {
        debug_assert!(self.len < MAX_BYTES, "instruction longer than {} bytes", MAX_BYTES);
        let b = self.src.next_byte();
        if self.len < MAX_BYTES {
            self.buf[self.len] = b;
        }
        self.len += 1;
        b
    }

    pub fn len(&self) -> usize { self.len }

    pub fn bytes(&self) -> &[u8] { &self.buf[..self.len.min(MAX_BYTES)] }

    pub fn order(&self) -> ByteOrder { self.order }

    pub fn trace(&self, what: &str) {
        if self.trace {
            debug!("{:02x?} {}", self.bytes(), what);
        }
    }

    /// Reads an immediate. The selector is the two-bit `li` field: 0 means
    /// four bytes, otherwise the byte count.
    pub fn immediate(&mut self, sel: u8, sign_extend: bool) -> i32 {
        let n = match sel & 0b11 {
            0 => 4,
            n => n as u32,
        };
        let mut v: u32 = 0;
        match self.order {
            ByteOrder::Little => {
                for i in 0..n {
                    v |= (self.fetch() as u32) << (8 * i);
                }
            },
            ByteOrder::Big => {
                for _ in 0..n {
                    v = (v << 8) | self.fetch() as u32;
                }
            },
        }
        if sign_extend && n < 4 {
            let shift = 32 - 8 * n;
            ((v << shift) as i32) >> shift
        } else {
            v as i32
        }
    }

    fn disp16(&mut self) -> i32 {
        let a = self.fetch() as i32;
        let b = self.fetch() as i32;
        match self.order {
            ByteOrder::Little => a + b * 256,
            ByteOrder::Big => a * 256 + b,
        }
    }

    /// Resolves the two-bit `ld` field into `op`. Mode 3 is register direct,
    /// 0 is indirect with no displacement, 1 and 2 fetch an 8- or 16-bit
    /// displacement and scale it by the element size.
    pub fn displacement(&mut self, op: &mut Operand, mode: u8, reg: u8, size: Size) {
        match mode {
            3 => op.set_register(reg),
            0 => op.set_zero_indirect(reg),
            1 => {
                let d = self.fetch() as i32;
                op.set_indirect(reg, d * size.scale());
            },
            2 => {
                let d = self.disp16();
                op.set_indirect(reg, d * size.scale());
            },
            _ => {
                debug_assert!(false, "addressing mode {} out of range", mode);
                unreachable!()
            },
        }
    }
}

#[test]
fn test_fields() {
    assert_eq!(bit(0b1000_0000, 7), 1);
    assert_eq!(pair(0b0011_0000, 4), 3);
    assert_eq!(triple(0b0101_1100, 2), 0b111);
    assert_eq!(hi(0xa5), 0xa);
    assert_eq!(lo(0xa5), 0x5);
}

#[test]
fn test_immediate_sign_extension() {
    let bytes = [0x80];
    let mut src = crate::decode::SliceSource::new(&bytes);
    let mut c = Cursor::new(&mut src, ByteOrder::Little, false);
    assert_eq!(c.immediate(1, true), -128);

    let mut src = crate::decode::SliceSource::new(&bytes);
    let mut c = Cursor::new(&mut src, ByteOrder::Little, false);
    assert_eq!(c.immediate(1, false), 128);
    assert_eq!(c.len(), 1);
}

#[test]
fn test_immediate_widths() {
    let bytes = [0x12, 0x34, 0x56, 0x78];

    let mut src = crate::decode::SliceSource::new(&bytes);
    let mut c = Cursor::new(&mut src, ByteOrder::Little, false);
    assert_eq!(c.immediate(0, false), 0x78563412);
    assert_eq!(c.len(), 4);

    let mut src = crate::decode::SliceSource::new(&bytes);
    let mut c = Cursor::new(&mut src, ByteOrder::Little, false);
    assert_eq!(c.immediate(2, true), 0x3412);
    assert_eq!(c.len(), 2);

    let mut src = crate::decode::SliceSource::new(&bytes);
    let mut c = Cursor::new(&mut src, ByteOrder::Little, false);
    assert_eq!(c.immediate(3, true), 0x563412);
    assert_eq!(c.len(), 3);

    let neg = [0xfe, 0xff, 0xff];
    let mut src = crate::decode::SliceSource::new(&neg);
    let mut c = Cursor::new(&mut src, ByteOrder::Little, false);
    assert_eq!(c.immediate(3, true), -2);
}

#[test]
fn test_immediate_big_endian() {
    let bytes = [0x12, 0x34, 0x56, 0x78];

    let mut src = crate::decode::SliceSource::new(&bytes);
    let mut c = Cursor::new(&mut src, ByteOrder::Big, false);
    assert_eq!(c.immediate(0, false), 0x12345678);

    let mut src = crate::decode::SliceSource::new(&bytes);
    let mut c = Cursor::new(&mut src, ByteOrder::Big, false);
    assert_eq!(c.immediate(2, false), 0x1234);

    let one = [0x80];
    let mut src = crate::decode::SliceSource::new(&one);
    let mut c = Cursor::new(&mut src, ByteOrder::Big, false);
    assert_eq!(c.immediate(1, true), -128);
}

#[test]
fn test_displacement_modes() {
    let bytes = [0x10, 0x02, 0x01];
    let mut src = crate::decode::SliceSource::new(&bytes);
    let mut c = Cursor::new(&mut src, ByteOrder::Little, false);
    let mut op = Operand::default();

    c.displacement(&mut op, 3, 5, Size::Long);
    assert_eq!(op.kind, OperandKind::Register);
    assert_eq!(c.len(), 0);

    c.displacement(&mut op, 0, 6, Size::Long);
    assert_eq!(op.kind, OperandKind::ZeroIndirect);
    assert_eq!((op.reg, op.addend), (6, 0));
    assert_eq!(c.len(), 0);

    c.displacement(&mut op, 1, 7, Size::Word);
    assert_eq!(op.kind, OperandKind::Indirect);
    assert_eq!((op.reg, op.addend), (7, 0x20));
    assert_eq!(c.len(), 1);

    c.displacement(&mut op, 2, 1, Size::Long);
    assert_eq!((op.reg, op.addend), (1, 0x0102 * 4));
    assert_eq!(c.len(), 3);
}

#[test]
fn test_displacement_big_endian() {
    let bytes = [0x01, 0x02];
    let mut src = crate::decode::SliceSource::new(&bytes);
    let mut c = Cursor::new(&mut src, ByteOrder::Big, false);
    let mut op = Operand::default();
    c.displacement(&mut op, 2, 1, Size::UByte);
    assert_eq!(op.addend, 0x0102);
}

#[test]
#[should_panic]
fn test_displacement_bad_mode() {
    let bytes = [0u8; 4];
    let mut src = crate::decode::SliceSource::new(&bytes);
    let mut c = Cursor::new(&mut src, ByteOrder::Little, false);
    let mut op = Operand::default();
    c.displacement(&mut op, 4, 0, Size::Long);
}
