// tests/properties.rs -- Decoder properties over generated encodings
// Copyright (C) 2015 Alex Iadicicco

use proptest::prelude::*;

use rxdecode::decode::common::SBWL;
use rxdecode::decode::{ByteOrder, Decoder, PrefixDecoder, SliceSource};
use rxdecode::instruction::*;

fn decode_with(order: ByteOrder, bytes: &[u8]) -> (usize, Instruction) {
    let mut i = Instruction::default();
    let n = PrefixDecoder::with_order(order, false)
        .decode(0x1000, &mut i, &mut SliceSource::with_fill(bytes, 0xa5));
    (n, i)
}

fn decode_le(bytes: &[u8]) -> (usize, Instruction) {
    decode_with(ByteOrder::Little, bytes)
}

fn size_index(sz: Size) -> u8 {
    SBWL.iter().position(|&s| s == sz).unwrap() as u8
}

/// Mode field and displacement bytes that address `op`, picking the short
/// displacement whenever it fits.
fn encode_operand(op: &Operand, sz: Size) -> (u8, Vec<u8>) {
    match op.kind {
        OperandKind::Register => (3, vec![]),
        OperandKind::ZeroIndirect => (0, vec![]),
        OperandKind::Indirect => {
            let d = (op.addend / sz.scale()) as u32;
            if d < 256 {
                (1, vec![d as u8])
            } else {
                (2, (d as u16).to_le_bytes().to_vec())
            }
        },
        k => panic!("no general mov mode for {:?}", k),
    }
}

fn encode_dsp5_mov(i: &Instruction) -> Vec<u8> {
    let (mem, reg, dir) = if i.ops[0].kind == OperandKind::Indirect {
        (&i.ops[0], &i.ops[1], 0)
    } else {
        (&i.ops[1], &i.ops[0], 1)
    };
    let d = (mem.addend / i.size.scale()) as u8;
    vec![
        0x80 | size_index(i.size) << 4 | dir << 3 | (d >> 2),
        ((d >> 1) & 1) << 7 | mem.reg << 4 | (d & 1) << 3 | reg.reg,
    ]
}

fn encode_general_mov(i: &Instruction) -> Vec<u8> {
    let (ss, src) = encode_operand(&i.ops[1], i.size);
    let (sd, dst) = encode_operand(&i.ops[0], i.size);
    let mut out = vec![
        0xc0 + size_index(i.size) * 0x10 + (sd << 2) + ss,
        i.ops[1].reg << 4 | i.ops[0].reg,
    ];
    out.extend(src);
    out.extend(dst);
    out
}

fn encode_add_imm(i: &Instruction) -> Vec<u8> {
    let width = i.n_bytes - 2;
    let mut out = vec![0x70 | (width & 3) as u8, i.ops[2].reg << 4 | i.ops[0].reg];
    out.extend_from_slice(&i.ops[1].addend.to_le_bytes()[..width]);
    out
}

fn encode_three_reg(i: &Instruction) -> Vec<u8> {
    let opc = match i.opcode {
        Sub => 0,
        Add => 2,
        Mul => 3,
        And => 4,
        Or => 5,
        op => panic!("{:?} has no three-register form", op),
    };
    vec![0xff, opc << 4 | i.ops[0].reg, i.ops[2].reg << 4 | i.ops[1].reg]
}

fn mode_bytes(mode: u8, d8: u8, d16: u16) -> Vec<u8> {
    match mode {
        1 => vec![d8],
        2 => d16.to_le_bytes().to_vec(),
        _ => vec![],
    }
}

#[test]
fn test_single_byte_opcodes() {
    for &(b, op) in &[(0x00, Brk), (0x01, Dbt), (0x02, Rts), (0x03, Nop)] {
        let (n, i) = decode_le(&[b]);
        assert_eq!(n, 1);
        assert_eq!(i.opcode, op);
        assert!(i.ops.iter().all(|o| o.kind == OperandKind::None));
    }
}

#[test]
fn test_long_branch_example() {
    let (n, i) = decode_le(&[0x04, 0x12, 0x34, 0x56]);
    assert_eq!(n, 4);
    assert_eq!(i.opcode, Branch);
    assert_eq!(i.ops[0].kind, OperandKind::Immediate);
    assert_eq!(i.ops[0].addend, 0x1000 + 0x563412);
}

#[test]
fn test_immediate_sign_extension() {
    // add #imm8, rs, rd sign-extends, mov #uimm8, rd does not
    let (_, i) = decode_le(&[0x71, 0x12, 0x80]);
    assert_eq!(i.ops[1].addend, -128);
    let (_, i) = decode_le(&[0x75, 0x42, 0x80]);
    assert_eq!(i.ops[1].addend, 128);
}

#[test]
fn test_every_two_byte_prefix() {
    for b0 in 0..=0xffu8 {
        for b1 in 0..=0xffu8 {
            for &fill in &[0x00, 0x5a, 0xff] {
                let mut i = Instruction::default();
                let bytes = [b0, b1];
                let mut src = SliceSource::with_fill(&bytes, fill);
                let n = PrefixDecoder::with_order(ByteOrder::Little, false)
                    .decode(0, &mut i, &mut src);
                assert!(n >= 1 && n <= 8, "{:02x} {:02x} fill {:02x}: {} bytes", b0, b1, fill, n);
                assert_eq!(src.consumed(), n);
                assert_eq!(i.n_bytes, n);
            }
        }
    }
}

#[test]
fn test_unknown_first_bytes() {
    let unknown: Vec<u8> = (0..=0xffu8)
        .filter(|&b0| decode_le(&[b0, 0, 0, 0, 0, 0, 0, 0]).1.opcode == Unknown)
        .collect();

    let mut want = vec![0x07, 0x2f];
    want.extend(0x30..=0x37);
    want.push(0xfc);
    assert_eq!(unknown, want);
}

proptest! {
    #[test]
    fn any_bytes_decode(bytes in any::<[u8; 8]>()) {
        let (n, i) = decode_le(&bytes);
        prop_assert!(n >= 1 && n <= 8);
        prop_assert_eq!(i.n_bytes, n);
        if i.opcode == Unknown {
            prop_assert_eq!(i.syntax, "*unknown*");
        }
        let text = format!("{}", i);
        prop_assert!(!text.is_empty(), "empty text for {:02x?}", bytes);
    }

    #[test]
    fn sentinel_never_fetched(bytes in any::<[u8; 8]>()) {
        let (n, whole) = decode_le(&bytes);

        let mut i = Instruction::default();
        let mut src = SliceSource::with_fill(&bytes[..n], 0xa5);
        PrefixDecoder::with_order(ByteOrder::Little, false).decode(0x1000, &mut i, &mut src);

        prop_assert_eq!(src.consumed(), n);
        prop_assert_eq!(i, whole);
    }

    #[test]
    fn dsp5_mov_round_trip(sz in 0u8..3, dir in 0u8..2, d in 0u8..32, rd in 0u8..8, rs in 0u8..8) {
        let bytes = [
            0x80 | sz << 4 | dir << 3 | (d >> 2),
            ((d >> 1) & 1) << 7 | rd << 4 | (d & 1) << 3 | rs,
        ];
        let (n, i) = decode_le(&bytes);
        prop_assert_eq!(n, 2);
        prop_assert_eq!(i.opcode, Mov);

        let again = encode_dsp5_mov(&i);
        prop_assert_eq!(&again[..], &bytes[..]);
        prop_assert_eq!(decode_le(&again).1, i);
    }

    #[test]
    fn general_mov_round_trip(
        sz in 0u8..3, ss in 0u8..3, sd in 0u8..4,
        rs in 0u8..16, rd in 0u8..16,
        s8 in any::<u8>(), s16 in 256u16..=u16::MAX,
        d8 in any::<u8>(), d16 in 256u16..=u16::MAX,
    ) {
        let mut bytes = vec![0xc0 + sz * 0x10 + (sd << 2) + ss, rs << 4 | rd];
        bytes.extend(mode_bytes(ss, s8, s16));
        bytes.extend(mode_bytes(sd, d8, d16));

        let (n, i) = decode_le(&bytes);
        prop_assert_eq!(n, bytes.len());
        prop_assert_eq!(i.opcode, Mov);

        let again = encode_general_mov(&i);
        prop_assert_eq!(&again, &bytes);
        prop_assert_eq!(decode_le(&again).1, i);
    }

    #[test]
    fn add_imm_round_trip(li in 0u8..4, rs in 0u8..16, rd in 0u8..16, raw in any::<i32>()) {
        let width = if li == 0 { 4 } else { li as usize };
        let mut bytes = vec![0x70 | li, rs << 4 | rd];
        bytes.extend_from_slice(&raw.to_le_bytes()[..width]);

        let (n, i) = decode_le(&bytes);
        prop_assert_eq!(n, 2 + width);
        prop_assert_eq!(i.opcode, Add);
        let shift = 32 - 8 * width as u32;
        prop_assert_eq!(i.ops[1].addend, raw.wrapping_shl(shift).wrapping_shr(shift));

        let again = encode_add_imm(&i);
        prop_assert_eq!(&again, &bytes);
        prop_assert_eq!(decode_le(&again).1, i);
    }

    #[test]
    fn three_reg_round_trip(
        opc in prop::sample::select(vec![0u8, 2, 3, 4, 5]),
        rd in 0u8..16, rs in 0u8..16, rs2 in 0u8..16,
    ) {
        let bytes = [0xff, opc << 4 | rd, rs << 4 | rs2];
        let (n, i) = decode_le(&bytes);
        prop_assert_eq!(n, 3);

        let again = encode_three_reg(&i);
        prop_assert_eq!(&again[..], &bytes[..]);
        prop_assert_eq!(decode_le(&again).1, i);
    }

    #[test]
    fn big_endian_immediates(rd in 0u8..16, v in any::<i32>()) {
        let mut le = vec![0x74, 0x20 | rd];
        le.extend_from_slice(&v.to_le_bytes());
        let mut be = vec![0x74, 0x20 | rd];
        be.extend_from_slice(&v.to_be_bytes());

        let (_, a) = decode_with(ByteOrder::Little, &le);
        let (_, b) = decode_with(ByteOrder::Big, &be);
        prop_assert_eq!(a.opcode, And);
        prop_assert_eq!(a.ops[1].addend, v);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn big_endian_displacements(d in any::<u16>()) {
        let mut le = vec![0x06, 0xca, 0x12];
        le.extend_from_slice(&d.to_le_bytes());
        let mut be = vec![0x06, 0xca, 0x12];
        be.extend_from_slice(&d.to_be_bytes());

        let (_, a) = decode_with(ByteOrder::Little, &le);
        let (_, b) = decode_with(ByteOrder::Big, &be);
        prop_assert_eq!(a.ops[1].addend, d as i32 * 2);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn single_bytes_ignore_order(rd in 0u8..16, v in any::<u8>()) {
        let bytes = [0x75, 0x50 | rd, v];
        let (_, a) = decode_with(ByteOrder::Little, &bytes);
        let (_, b) = decode_with(ByteOrder::Big, &bytes);
        prop_assert_eq!(a.ops[2].addend, v as i32);
        prop_assert_eq!(a, b);
    }
}
