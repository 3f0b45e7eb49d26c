// decode/mod.rs -- Instruction decoder interface
// Copyright (C) 2015 Alex Iadicicco

use crate::instruction::Instruction;

pub mod common;
pub mod prefix;

pub use self::common::ByteOrder;
pub use self::prefix::PrefixDecoder;

/// Where instruction bytes come from. The decoder calls `next_byte` once per
/// byte it needs and never asks for more than one instruction's worth. Running
/// off the end of the stream is the source's problem: it has to hand back
/// something every time.
pub trait ByteSource {
    fn next_byte(&mut self) -> u8;
}

impl<F: FnMut() -> u8> ByteSource for F {
    fn next_byte(&mut self) -> u8 { self() }
}

/// Reads bytes from a slice. Past the end it returns `fill`, and still counts
/// the read.
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    pos: usize,
    fill: u8,
}

impl<'a> SliceSource<'a> {
    pub fn new(bytes: &'a [u8]) -> SliceSource<'a> {
        SliceSource { bytes: bytes, pos: 0, fill: 0 }
    }

    pub fn with_fill(bytes: &'a [u8], fill: u8) -> SliceSource<'a> {
        SliceSource { bytes: bytes, pos: 0, fill: fill }
    }

    /// Number of bytes handed out so far.
    pub fn consumed(&self) -> usize { self.pos }
}

impl<'a> ByteSource for SliceSource<'a> {
    fn next_byte(&mut self) -> u8 {
        let b = self.bytes.get(self.pos).copied().unwrap_or(self.fill);
        self.pos += 1;
        b
    }
}

pub trait Decoder {
    /// Overwrites `out` with the instruction at `pc` and returns the number of
    /// bytes consumed from `src`. Never fails; encodings it does not recognise
    /// come back as `Opcode::Unknown`.
    fn decode<S: ByteSource>(&self, pc: u32, out: &mut Instruction, src: &mut S)
        -> usize;
}

/// Decodes one instruction with the default decoder: native byte order and no
/// tracing.
pub fn decode<S: ByteSource>(pc: u32, out: &mut Instruction, src: &mut S) -> usize {
    PrefixDecoder::new().decode(pc, out, src)
}

#[test]
fn test_closure_source() {
    let bytes = [0x02u8];
    let mut calls = 0;
    let mut i = Instruction::default();
    let n = decode(0, &mut i, &mut || { calls += 1; bytes[0] });
    assert_eq!(n, 1);
    assert_eq!(calls, 1);
    assert_eq!(i.opcode, crate::instruction::Rts);
}

#[test]
fn test_slice_source_fill() {
    let mut src = SliceSource::with_fill(&[0x01], 0xaa);
    assert_eq!(src.next_byte(), 0x01);
    assert_eq!(src.next_byte(), 0xaa);
    assert_eq!(src.consumed(), 2);
}
