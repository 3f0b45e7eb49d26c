// decode/prefix.rs -- Prefix-based instruction decoder
// Copyright (C) 2015 Alex Iadicicco

//! RX instructions are variable length, from one to eight bytes, and the first
//! byte alone narrows things down a great deal. The decoder matches on it and
//! hands off to a group function, which fetches and matches further bytes as
//! it needs them. Groups that reach the same kind of instruction by different
//! routes (the short, memory and immediate forms of `add`, say) share a
//! terminal helper that fills in the opcode, syntax and flag effects.

use log::{debug, trace};

use crate::decode::common::*;
use crate::decode::{ByteSource, Decoder};
use crate::instruction::*;

const UNKNOWN: &str = "*unknown*";

const OSZC: u8 = FLAG_O | FLAG_S | FLAG_Z | FLAG_C;
const OSZ: u8 = FLAG_O | FLAG_S | FLAG_Z;
const OS: u8 = FLAG_O | FLAG_S;
const SZC: u8 = FLAG_S | FLAG_Z | FLAG_C;
const SZ: u8 = FLAG_S | FLAG_Z;
const ZC: u8 = FLAG_Z | FLAG_C;
const O: u8 = FLAG_O;

/// Branch distances selected by the 3-bit field of the short branches.
const DSP3: [u32; 8] = [8, 9, 10, 3, 4, 5, 6, 7];

pub struct PrefixDecoder {
    order: ByteOrder,
    trace: bool,
}

impl PrefixDecoder {
    pub fn new() -> PrefixDecoder {
        PrefixDecoder { order: ByteOrder::NATIVE, trace: false }
    }

    pub fn with_trace(trace: bool) -> PrefixDecoder {
        PrefixDecoder { order: ByteOrder::NATIVE, trace: trace }
    }

    pub fn with_order(order: ByteOrder, trace: bool) -> PrefixDecoder {
        PrefixDecoder { order: order, trace: trace }
    }
}

impl Default for PrefixDecoder {
    fn default() -> PrefixDecoder { PrefixDecoder::new() }
}

impl Decoder for PrefixDecoder {
    fn decode<S: ByteSource>(&self, pc: u32, out: &mut Instruction, src: &mut S) -> usize {
        *out = Instruction::default();

        let mut c = Cursor::new(src, self.order, self.trace);
        let b0 = c.fetch();
        dispatch(&mut c, out, pc, b0);

        if out.opcode == Unknown {
            out.syntax = UNKNOWN;
            trace!("unknown encoding {:02x?} at {:08x}", c.bytes(), pc);
        }
        out.n_bytes = c.len();

        if self.trace {
            debug!("{:08x}: {:02x?} -> {:?} \"{}\"", pc, c.bytes(), out.opcode, out.syntax);
        }

        out.n_bytes
    }
}

fn set(i: &mut Instruction, opcode: Opcode, syntax: &'static str) {
    i.opcode = opcode;
    i.syntax = syntax;
}

fn unknown(i: &mut Instruction) {
    i.opcode = Unknown;
    i.syntax = UNKNOWN;
}

fn pc_relative(pc: u32, disp: i32) -> i32 {
    pc.wrapping_add(disp as u32) as i32
}

/// Name of the dispatch group a first byte selects, for trace output.
fn group(b0: u8) -> &'static str {
    match b0 {
    0x00..=0x03 => "single",
    0x04 | 0x05 | 0x08..=0x2e | 0x38..=0x3b => "branch",
    0x06 => "memex",
    0x3c..=0x3f => "dsp5 immediate",
    0x40..=0x57 => "ub memory",
    0x58..=0x5f => "movu",
    0x60..=0x67 => "short immediate",
    0x68..=0x6f => "shift/pushm",
    0x70..=0x77 => "sized immediate",
    0x78..=0x7d => "bit immediate",
    0x7e => "7e",
    0x7f => "7f",
    0x80..=0xbf => "dsp5 mov",
    0xc0..=0xef => "general mov",
    0xf0..=0xf7 => "bit memory/push",
    0xf8..=0xfb => "mov immediate",
    0xfc => "fc",
    0xfd => "fd",
    0xfe => "fe",
    0xff => "ff",
    _ => "unassigned",
    }
}

fn dispatch(c: &mut Cursor, i: &mut Instruction, pc: u32, b0: u8) {
    c.trace(group(b0));

    match b0 {
    0x00 => set(i, Brk, "brk"),
    0x01 => set(i, Dbt, "dbt"),
    0x02 => set(i, Rts, "rts"),
    0x03 => set(i, Nop, "nop"),
    0x04 => {
        set(i, Branch, "bra.a\t%a0");
        let d = c.immediate(3, true);
        i.ops[0].set_immediate(pc_relative(pc, d));
    },
    0x05 => {
        set(i, Jsr, "bsr.a\t%a0");
        let d = c.immediate(3, true);
        i.ops[0].set_immediate(pc_relative(pc, d));
    },
    0x06 => memex(c, i),
    0x08..=0x0f => {
        set(i, Branch, "bra.s\t%a0");
        i.ops[0].set_immediate(pc.wrapping_add(DSP3[(b0 & 7) as usize]) as i32);
    },
    0x10..=0x1f => {
        set(i, Branch, "b%c1.s\t%a0");
        i.ops[1].set_condition(Cond::from_bits(bit(b0, 3)));
        i.ops[0].set_immediate(pc.wrapping_add(DSP3[(b0 & 7) as usize]) as i32);
    },
    0x20..=0x2d => {
        set(i, Branch, "b%c1.b\t%a0");
        i.ops[1].set_condition(Cond::from_bits(lo(b0)));
        let d = c.immediate(1, true);
        i.ops[0].set_immediate(pc_relative(pc, d));
    },
    0x2e => {
        set(i, Branch, "bra.b\t%a0");
        let d = c.immediate(1, true);
        i.ops[0].set_immediate(pc_relative(pc, d));
    },
    0x38 => {
        set(i, Branch, "bra.w\t%a0");
        let d = c.immediate(2, true);
        i.ops[0].set_immediate(pc_relative(pc, d));
    },
    0x39 => {
        set(i, Jsr, "bsr.w\t%a0");
        let d = c.immediate(2, true);
        i.ops[0].set_immediate(pc_relative(pc, d));
    },
    0x3a | 0x3b => {
        set(i, Branch, "b%c1.w\t%a0");
        i.ops[1].set_condition(Cond::from_bits(b0 & 1));
        let d = c.immediate(2, true);
        i.ops[0].set_immediate(pc_relative(pc, d));
    },
    0x3c..=0x3e => mov_imm_dsp5(c, i, b0 & 3),
    0x3f => {
        let b1 = c.fetch();
        set(i, Rtsd, "rtsd\t%1, %2-%0");
        let imm = c.immediate(1, false);
        i.ops[1].set_immediate(imm * 4);
        i.ops[2].set_register(hi(b1));
        i.ops[0].set_register(lo(b1));
    },
    0x40..=0x57 => {
        let b1 = c.fetch();
        match basic_form(triple(b0, 2)) {
            Some(f) => {
                let n = apply(i, f, lo(b1));
                ub_source(c, &mut i.ops[n], pair(b0, 0), hi(b1));
            },
            None => unknown(i),
        }
    },
    0x58..=0x5f => {
        let b1 = c.fetch();
        let sz = UBW[bit(b0, 2) as usize];
        set(i, Mov, "movu%s\t%1, %0");
        i.set_size(sz);
        c.displacement(&mut i.ops[1], pair(b0, 0), hi(b1), sz);
        i.ops[0].set_register(lo(b1));
    },
    0x60..=0x65 => {
        let b1 = c.fetch();
        match basic_form(b0 & 7) {
            Some(f) => {
                let n = apply(i, f, lo(b1));
                i.ops[n].set_immediate(hi(b1) as i32);
            },
            None => unknown(i),
        }
    },
    0x66 => {
        let b1 = c.fetch();
        set(i, Mov, "mov%s\t%1, %0");
        i.ops[1].set_immediate(hi(b1) as i32);
        i.ops[0].set_register(lo(b1));
    },
    0x67 => {
        set(i, Rtsd, "rtsd\t%1");
        let imm = c.immediate(1, false);
        i.ops[1].set_immediate(imm * 4);
    },
    0x68..=0x6d => {
        let b1 = c.fetch();
        shift(i, pair(b0, 1), lo(b1));
        i.ops[2].set_immediate((bit(b0, 0) * 16 + hi(b1)) as i32);
    },
    0x6e | 0x6f => {
        let b1 = c.fetch();
        if b0 == 0x6e { set(i, Pushm, "pushm\t%1"); }
        else          { set(i, Popm, "popm\t%1"); }
        i.ops[1].set_range(hi(b1), lo(b1));
    },
    0x70..=0x73 => {
        let b1 = c.fetch();
        set(i, Add, "add\t%1, %2, %0");
        i.set_flags(0, 0, OSZC);
        let imm = c.immediate(b0 & 3, true);
        i.ops[1].set_immediate(imm);
        i.ops[2].set_register(hi(b1));
        i.ops[0].set_register(lo(b1));
    },
    0x74..=0x77 => imm_op(c, i, b0 & 3),
    0x78..=0x7d => {
        let b1 = c.fetch();
        let imm = (bit(b0, 0) * 16 + hi(b1)) as i32;
        let rd = lo(b1);
        match pair(b0, 1) {
            0 => {
                set(i, Bset, "bset\t%1, %0");
                i.ops[1].set_immediate(imm);
                i.ops[0].set_register(rd);
            },
            1 => {
                set(i, Bclr, "bclr\t%1, %0");
                i.ops[1].set_immediate(imm);
                i.ops[0].set_register(rd);
            },
            _ => {
                set(i, Btst, "btst\t%2, %1");
                i.set_flags(0, 0, ZC);
                i.ops[2].set_immediate(imm);
                i.ops[1].set_register(rd);
            },
        }
    },
    0x7e => group_7e(c, i),
    0x7f => group_7f(c, i),
    0x80..=0xaf => {
        let b1 = c.fetch();
        let sz = SBWL[pair(b0, 4) as usize];
        let disp = (triple(b0, 0) * 4 + bit(b1, 7) * 2 + bit(b1, 3)) as i32;
        set(i, Mov, "mov%s\t%1, %0");
        i.set_size(sz);
        if bit(b0, 3) == 0 {
            i.ops[0].set_indirect(triple(b1, 4), disp * sz.scale());
            i.ops[1].set_register(triple(b1, 0));
        } else {
            i.ops[1].set_indirect(triple(b1, 4), disp * sz.scale());
            i.ops[0].set_register(triple(b1, 0));
        }
    },
    0xb0..=0xbf => {
        let b1 = c.fetch();
        let sz = UBW[bit(b0, 3) as usize];
        let disp = (triple(b0, 0) * 4 + bit(b1, 7) * 2 + bit(b1, 3)) as i32;
        set(i, Mov, "movu%s\t%1, %0");
        i.set_size(sz);
        i.ops[1].set_indirect(triple(b1, 4), disp * sz.scale());
        i.ops[0].set_register(triple(b1, 0));
    },
    0xc0..=0xef => mov_general(c, i, b0),
    0xf0..=0xf3 => {
        let b1 = c.fetch();
        if bit(b1, 3) == 0 { set(i, Bset, "bset\t%1, %0%S0"); }
        else               { set(i, Bclr, "bclr\t%1, %0%S0"); }
        i.set_size(Size::Byte);
        i.ops[1].set_immediate(triple(b1, 0) as i32);
        c.displacement(&mut i.ops[0], pair(b0, 0), hi(b1), Size::Byte);
    },
    0xf4..=0xf7 => {
        let b1 = c.fetch();
        if bit(b1, 3) == 0 {
            set(i, Btst, "btst\t%2, %1%S1");
            i.set_size(Size::Byte);
            i.set_flags(0, 0, ZC);
            i.ops[2].set_immediate(triple(b1, 0) as i32);
            c.displacement(&mut i.ops[1], pair(b0, 0), hi(b1), Size::Byte);
        } else if bit(b1, 2) == 0 && pair(b1, 0) != 3 {
            let sz = SBWL[pair(b1, 0) as usize];
            set(i, Push, "push%s\t%1");
            i.set_size(sz);
            i.ops[0].set_predec(0);
            c.displacement(&mut i.ops[1], pair(b0, 0), hi(b1), sz);
        } else {
            unknown(i);
        }
    },
    0xf8..=0xfb => {
        let b1 = c.fetch();
        if pair(b1, 0) == 3 {
            return unknown(i);
        }
        let sz = BWL[pair(b1, 0) as usize];
        set(i, Mov, "mov%s\t%1, %0");
        i.set_size(sz);
        c.displacement(&mut i.ops[0], pair(b0, 0), hi(b1), sz);
        let imm = c.immediate(pair(b1, 2), true);
        i.ops[1].set_immediate(imm);
    },
    0xfc => group_fc(c, i),
    0xfd => group_fd(c, i),
    0xfe => group_fe(c, i),
    0xff => group_ff(c, i),
    _ => unknown(i),
    }
}

/// Opcode, syntax and flag effects of a two-operand form whose operands are
/// filled in separately.
#[derive(Copy, Clone)]
struct Form {
    opcode: Opcode,
    syntax: &'static str,
    cleared: u8,
    updated: u8,
}

const fn form(opcode: Opcode, syntax: &'static str, cleared: u8, updated: u8) -> Form {
    Form { opcode: opcode, syntax: syntax, cleared: cleared, updated: updated }
}

/// The sub/cmp/add/mul/and/or family, numbered as in the short register and
/// memex encodings.
fn basic_form(opc: u8) -> Option<Form> {
    match opc {
        0 => Some(form(Sub, "sub\t%1%S1, %0", 0, OSZC)),
        1 => Some(form(Cmp, "cmp\t%2%S2, %1", 0, OSZC)),
        2 => Some(form(Add, "add\t%1%S1, %0", 0, OSZC)),
        3 => Some(form(Mul, "mul\t%1%S1, %0", 0, 0)),
        4 => Some(form(And, "and\t%1%S1, %0", 0, SZ)),
        5 => Some(form(Or,  "or\t%1%S1, %0",  0, SZ)),
        _ => None,
    }
}

/// The family shared by the memex extended (06 xx 20+), unsigned-byte (FC)
/// and immediate (FD 7x) forms, numbered by the FC opcode field.
fn ext_form(opc: u8) -> Option<Form> {
    match opc {
        0x00 => Some(form(Sbb,   "sbb\t%1%S1, %0",   0, OSZC)),
        0x02 => Some(form(Adc,   "adc\t%1%S1, %0",   0, OSZC)),
        0x04 => Some(form(Max,   "max\t%1%S1, %0",   0, 0)),
        0x05 => Some(form(Min,   "min\t%1%S1, %0",   0, 0)),
        0x06 => Some(form(Emul,  "emul\t%1%S1, %0",  0, 0)),
        0x07 => Some(form(Emulu, "emulu\t%1%S1, %0", 0, 0)),
        0x08 => Some(form(Div,   "div\t%1%S1, %0",   0, O)),
        0x09 => Some(form(Divu,  "divu\t%1%S1, %0",  0, O)),
        0x0c => Some(form(Tst,   "tst\t%2%S2, %1",   0, SZ)),
        0x0d => Some(form(Xor,   "xor\t%1%S1, %0",   0, SZ)),
        0x10 => Some(form(Xchg,  "xchg\t%1%S1, %0",  0, 0)),
        0x11 => Some(form(Itof,  "itof\t%1%S1, %0",  0, SZ)),
        _ => None,
    }
}

/// Floating point forms of the FC and FD 72 groups.
fn float_form(opc: u8) -> Option<Form> {
    match opc {
        0 => Some(form(Fsub,  "fsub\t%1%S1, %0",  0, SZ)),
        1 => Some(form(Fcmp,  "fcmp\t%2%S2, %1",  0, OSZ)),
        2 => Some(form(Fadd,  "fadd\t%1%S1, %0",  0, SZ)),
        3 => Some(form(Fmul,  "fmul\t%1%S1, %0",  0, SZ)),
        4 => Some(form(Fdiv,  "fdiv\t%1%S1, %0",  0, SZ)),
        5 => Some(form(Ftoi,  "ftoi\t%1%S1, %0",  0, SZ)),
        6 => Some(form(Round, "round\t%1%S1, %0", 0, SZ)),
        _ => None,
    }
}

/// Fills in `f` with `rd` as its register operand and returns the slot the
/// other operand goes in. Comparisons have no destination, so their register
/// sits in slot 1.
fn apply(i: &mut Instruction, f: Form, rd: u8) -> usize {
    set(i, f.opcode, f.syntax);
    i.set_flags(f.cleared, 0, f.updated);
    match f.opcode {
        Cmp | Tst | Fcmp => {
            i.ops[1].set_register(rd);
            2
        },
        _ => {
            i.ops[0].set_register(rd);
            1
        },
    }
}

/// Source operand of the unsigned-byte memory forms: memory is read as a
/// zero-extended byte, registers as a whole.
fn ub_source(c: &mut Cursor, op: &mut Operand, ld: u8, reg: u8) {
    let sz = if ld == 3 { Size::Long } else { Size::UByte };
    c.displacement(op, ld, reg, sz);
    op.size = sz;
}

fn memex_source(c: &mut Cursor, op: &mut Operand, ld: u8, reg: u8, mi: u8) {
    let sz = MEMEX[mi as usize];
    c.displacement(op, ld, reg, sz);
    op.size = sz;
}

/// Shift by immediate or register. The shifted register is both operand 0 and
/// operand 1; the caller supplies the count in operand 2.
fn shift(i: &mut Instruction, kind: u8, rd: u8) {
    match kind {
        0 => {
            set(i, Shlr, "shlr\t%2, %0");
            i.set_flags(0, 0, SZC);
        },
        1 => {
            set(i, Shar, "shar\t%2, %0");
            i.set_flags(O, 0, SZC);
        },
        _ => {
            set(i, Shll, "shll\t%2, %0");
            i.set_flags(0, 0, OSZC);
        },
    }
    i.ops[0].set_register(rd);
    i.ops[1].set_register(rd);
}

fn mov_imm_dsp5(c: &mut Cursor, i: &mut Instruction, sz: u8) {
    let b1 = c.fetch();
    let sz = SBWL[sz as usize];
    let disp = (bit(b1, 7) * 16 + lo(b1)) as i32;
    set(i, Mov, "mov%s\t%1, %0");
    i.set_size(sz);
    i.ops[0].set_indirect(triple(b1, 4), disp * sz.scale());
    let imm = c.immediate(1, false);
    i.ops[1].set_immediate(imm);
}

fn imm_op(c: &mut Cursor, i: &mut Instruction, li: u8) {
    let b1 = c.fetch();
    let rd = lo(b1);

    if li == 1 {
        match hi(b1) {
            4 => {
                set(i, Mov, "mov%s\t%1, %0");
                let imm = c.immediate(1, false);
                i.ops[1].set_immediate(imm);
                i.ops[0].set_register(rd);
                return;
            },
            5 => {
                set(i, Cmp, "cmp\t%2, %1");
                i.set_flags(0, 0, OSZC);
                let imm = c.immediate(1, false);
                i.ops[2].set_immediate(imm);
                i.ops[1].set_register(rd);
                return;
            },
            6 if rd == 0 => {
                set(i, Int, "int\t%1");
                let imm = c.immediate(1, false);
                i.ops[1].set_immediate(imm);
                return;
            },
            7 if rd == 0 => {
                let b2 = c.fetch();
                if hi(b2) == 0 {
                    set(i, Mvtipl, "mvtipl\t%1");
                    i.ops[1].set_immediate(lo(b2) as i32);
                } else {
                    unknown(i);
                }
                return;
            },
            _ => { },
        }
    }

    let opc = match hi(b1) {
        0 => 1,
        1 => 3,
        2 => 4,
        3 => 5,
        _ => return unknown(i),
    };
    if let Some(f) = basic_form(opc) {
        let n = apply(i, f, rd);
        let imm = c.immediate(li, true);
        i.ops[n].set_immediate(imm);
    }
}

fn mov_general(c: &mut Cursor, i: &mut Instruction, b0: u8) {
    let b1 = c.fetch();
    let sd = pair(b0, 2);
    let ss = pair(b0, 0);

    if b0 == 0xef && b1 == 0x00 {
        return set(i, Nop, "nop");
    }

    let sz = SBWL[pair(b0, 4) as usize];
    set(i, Mov, "mov%s\t%1, %0");
    i.set_size(sz);
    if ss == 3 && sd != 3 {
        c.displacement(&mut i.ops[1], ss, lo(b1), sz);
        c.displacement(&mut i.ops[0], sd, hi(b1), sz);
    } else {
        c.displacement(&mut i.ops[1], ss, hi(b1), sz);
        c.displacement(&mut i.ops[0], sd, lo(b1), sz);
    }
}

fn memex(c: &mut Cursor, i: &mut Instruction) {
    let b1 = c.fetch();
    let mi = pair(b1, 6);
    let ld = pair(b1, 0);

    if bit(b1, 5) == 0 {
        c.trace("memex");
        let f = match basic_form(triple(b1, 2)) {
            Some(f) => f,
            None => return unknown(i),
        };
        let b2 = c.fetch();
        let n = apply(i, f, lo(b2));
        memex_source(c, &mut i.ops[n], ld, hi(b2), mi);
    } else if triple(b1, 2) == 0 {
        c.trace("memex extended");
        let b2 = c.fetch();
        let f = match ext_form(b2) {
            // sbb and adc only take a long memory operand
            Some(f) if (f.opcode == Sbb || f.opcode == Adc) && mi != 2 => return unknown(i),
            Some(f) => f,
            None => return unknown(i),
        };
        let b3 = c.fetch();
        let n = apply(i, f, lo(b3));
        memex_source(c, &mut i.ops[n], ld, hi(b3), mi);
    } else {
        unknown(i);
    }
}

fn group_7e(c: &mut Cursor, i: &mut Instruction) {
    let b1 = c.fetch();
    let r = lo(b1);

    match hi(b1) {
    0x0 => { set(i, Not, "not\t%0"); i.set_flags(0, 0, SZ); },
    0x1 => { set(i, Neg, "neg\t%0"); i.set_flags(0, 0, OSZC); },
    0x2 => { set(i, Abs, "abs\t%0"); i.set_flags(0, 0, OSZ); },
    0x3 => { set(i, Sat, "sat\t%0"); },
    0x4 => { set(i, Rorc, "rorc\t%0"); i.set_flags(0, 0, SZC); },
    0x5 => { set(i, Rolc, "rolc\t%0"); i.set_flags(0, 0, SZC); },
    0x8 | 0x9 | 0xa => {
        set(i, Push, "push%s\t%1");
        i.set_size(BWL[(hi(b1) - 8) as usize]);
        i.ops[0].set_predec(0);
        i.ops[1].set_register(r);
        return;
    },
    0xb => {
        set(i, Pop, "pop\t%0");
        i.ops[1].set_postinc(0);
        i.ops[0].set_register(r);
        return;
    },
    0xc => {
        if control_register_name(r).is_none() {
            return unknown(i);
        }
        set(i, Pushc, "pushc\t%1");
        i.ops[0].set_predec(0);
        i.ops[1].set_register(CR_BASE + r);
        return;
    },
    0xe => {
        if r == 1 || control_register_name(r).is_none() {
            return unknown(i);
        }
        set(i, Popc, "popc\t%0");
        i.ops[1].set_postinc(0);
        i.ops[0].set_register(CR_BASE + r);
        return;
    },
    _ => return unknown(i),
    }

    i.ops[0].set_register(r);
    i.ops[1].set_register(r);
}

fn group_7f(c: &mut Cursor, i: &mut Instruction) {
    let b1 = c.fetch();
    let r = lo(b1);

    match hi(b1) {
    0x0 => { set(i, Branch, "jmp\t%0"); i.ops[0].set_register(r); },
    0x1 => { set(i, Jsr, "jsr\t%0"); i.ops[0].set_register(r); },
    0x4 => { set(i, BranchRel, "bra.l\t%0"); i.ops[0].set_register(r); },
    0x5 => { set(i, JsrRel, "bsr.l\t%0"); i.ops[0].set_register(r); },
    0x8 => string_op(i, r),
    0x9 => match r {
        0x3 => set(i, Satr, "satr"),
        0x4 => set(i, Rtfi, "rtfi"),
        0x5 => set(i, Rte, "rte"),
        0x6 => set(i, Wait, "wait"),
        _ => unknown(i),
    },
    0xa | 0xb => match Flag::from_bits(r) {
        Some(f) => {
            if hi(b1) == 0xa {
                set(i, Setpsw, "setpsw\t%0");
                i.set_flags(0, f.mask(), 0);
            } else {
                set(i, Clrpsw, "clrpsw\t%0");
                i.set_flags(f.mask(), 0, 0);
            }
            i.ops[0].set_flag(f);
        },
        None => unknown(i),
    },
    _ => unknown(i),
    }
}

/// 7F 8x: the string instructions. Sized ones use the low two bits, with the
/// unsized operations filling the slots where size would be 3.
fn string_op(i: &mut Instruction, r: u8) {
    let sz = pair(r, 0);
    match (pair(r, 2), sz) {
        (0, 3) => { set(i, Scmpu, "scmpu"); i.set_flags(0, 0, ZC); },
        (0, _) => { set(i, Suntil, "suntil%s"); i.set_flags(0, 0, ZC); },
        (1, 3) => set(i, Smovu, "smovu"),
        (1, _) => { set(i, Swhile, "swhile%s"); i.set_flags(0, 0, ZC); },
        (2, 3) => set(i, Smovb, "smovb"),
        (2, _) => set(i, Sstr, "sstr%s"),
        (_, 3) => set(i, Smovf, "smovf"),
        (_, _) => { set(i, Rmpa, "rmpa%s"); i.set_flags(0, 0, OS); },
    }
    if sz != 3 {
        i.set_size(BWL[sz as usize]);
    }
}

fn group_fc(c: &mut Cursor, i: &mut Instruction) {
    let b1 = c.fetch();
    let opc = b1 >> 2;
    let ld = pair(b1, 0);

    match opc {
    // Register-only forms
    0x00 | 0x01 | 0x02 | 0x03 | 0x0e if ld == 3 => {
        let b2 = c.fetch();
        match opc {
            0x00 => { set(i, Sbb, "sbb\t%1, %0"); i.set_flags(0, 0, OSZC); },
            0x01 => { set(i, Neg, "neg\t%1, %0"); i.set_flags(0, 0, OSZC); },
            0x02 => { set(i, Adc, "adc\t%1, %0"); i.set_flags(0, 0, OSZC); },
            0x03 => { set(i, Abs, "abs\t%1, %0"); i.set_flags(0, 0, OSZ); },
            _    => { set(i, Not, "not\t%1, %0"); i.set_flags(0, 0, SZ); },
        }
        i.ops[0].set_register(lo(b2));
        i.ops[1].set_register(hi(b2));
    },
    0x00 | 0x01 | 0x02 | 0x03 | 0x0e => unknown(i),
    0x04..=0x11 => match ext_form(opc) {
        Some(f) => {
            let b2 = c.fetch();
            let n = apply(i, f, lo(b2));
            ub_source(c, &mut i.ops[n], ld, hi(b2));
        },
        None => unknown(i),
    },
    0x18..=0x1b => {
        let b2 = c.fetch();
        let (rd, rs) = (hi(b2), lo(b2));
        i.set_size(if ld == 3 { Size::Long } else { Size::Byte });
        match opc {
            0x18 => set(i, Bset, "bset\t%1, %0%S0"),
            0x19 => set(i, Bclr, "bclr\t%1, %0%S0"),
            0x1a => {
                set(i, Btst, "btst\t%2, %1%S1");
                i.set_flags(0, 0, ZC);
                i.ops[2].set_register(rs);
                c.displacement(&mut i.ops[1], ld, rd, Size::Byte);
                return;
            },
            _ => set(i, Bnot, "bnot\t%1, %0%S0"),
        }
        i.ops[1].set_register(rs);
        c.displacement(&mut i.ops[0], ld, rd, Size::Byte);
    },
    0x20..=0x26 => match float_form(opc - 0x20) {
        Some(f) => {
            let b2 = c.fetch();
            let n = apply(i, f, lo(b2));
            c.displacement(&mut i.ops[n], ld, hi(b2), Size::Long);
        },
        None => unknown(i),
    },
    0x34..=0x37 => {
        let sz = pair(b1, 2);
        if sz == 3 {
            return unknown(i);
        }
        let b2 = c.fetch();
        let cond = lo(b2);
        if cond >= 14 {
            return unknown(i);
        }
        let sz = BWL[sz as usize];
        set(i, Sccnd, "sc%c1%s\t%0");
        i.set_size(sz);
        i.ops[1].set_condition(Cond::from_bits(cond));
        c.displacement(&mut i.ops[0], ld, hi(b2), sz);
    },
    0x38..=0x3f => {
        let b2 = c.fetch();
        let cond = lo(b2);
        if cond == 14 {
            return unknown(i);
        }
        if cond == 15 {
            set(i, Bnot, "bnot\t%1, %0%S0");
        } else {
            set(i, Bmcc, "bm%c2\t%1, %0%S0");
            i.ops[2].set_condition(Cond::from_bits(cond));
        }
        i.set_size(if ld == 3 { Size::Long } else { Size::Byte });
        i.ops[1].set_immediate(triple(b1, 2) as i32);
        c.displacement(&mut i.ops[0], ld, hi(b2), Size::Byte);
    },
    _ => unknown(i),
    }
}

fn group_fd(c: &mut Cursor, i: &mut Instruction) {
    let b1 = c.fetch();

    match b1 {
    0x00 | 0x01 | 0x04 | 0x05 => {
        let b2 = c.fetch();
        match b1 {
            0x00 => set(i, Mulhi, "mulhi\t%1, %2"),
            0x01 => set(i, Mullo, "mullo\t%1, %2"),
            0x04 => set(i, Machi, "machi\t%1, %2"),
            _    => set(i, Maclo, "maclo\t%1, %2"),
        }
        i.ops[1].set_register(hi(b2));
        i.ops[2].set_register(lo(b2));
    },
    0x17 => {
        let b2 = c.fetch();
        match hi(b2) {
            0 => set(i, Mvtachi, "mvtachi\t%1"),
            1 => set(i, Mvtaclo, "mvtaclo\t%1"),
            _ => return unknown(i),
        }
        i.ops[1].set_register(lo(b2));
    },
    0x18 => {
        let b2 = c.fetch();
        if b2 & 0xef != 0 {
            return unknown(i);
        }
        set(i, Racw, "racw\t%1");
        i.ops[1].set_immediate(bit(b2, 4) as i32 + 1);
    },
    0x1f => {
        let b2 = c.fetch();
        match hi(b2) {
            0 => set(i, Mvfachi, "mvfachi\t%0"),
            1 => set(i, Mvfaclo, "mvfaclo\t%0"),
            2 => set(i, Mvfacmi, "mvfacmi\t%0"),
            _ => return unknown(i),
        }
        i.ops[0].set_register(lo(b2));
    },
    0x20..=0x2f | 0x38..=0x3f => {
        let b2 = c.fetch();
        let sz = pair(b1, 0);
        let predec = bit(b1, 2) == 1;
        match pair(b1, 3) {
            0b00 | 0b01 if sz == 3 => return unknown(i),
            0b00 => {
                set(i, Mov, "mov%s\t%1, %0");
                i.set_size(SBWL[sz as usize]);
                if predec { i.ops[0].set_predec(hi(b2)); }
                else      { i.ops[0].set_postinc(hi(b2)); }
                i.ops[1].set_register(lo(b2));
            },
            0b01 => {
                set(i, Mov, "mov%s\t%1, %0");
                i.set_size(SBWL[sz as usize]);
                if predec { i.ops[1].set_predec(hi(b2)); }
                else      { i.ops[1].set_postinc(hi(b2)); }
                i.ops[0].set_register(lo(b2));
            },
            _ => {
                if sz >= 2 {
                    return unknown(i);
                }
                set(i, Mov, "movu%s\t%1, %0");
                i.set_size(UBW[sz as usize]);
                if predec { i.ops[1].set_predec(hi(b2)); }
                else      { i.ops[1].set_postinc(hi(b2)); }
                i.ops[0].set_register(lo(b2));
            },
        }
    },
    0x60..=0x62 => {
        let b2 = c.fetch();
        shift(i, b1 & 3, lo(b2));
        i.ops[2].set_register(hi(b2));
    },
    0x64..=0x67 => {
        let b2 = c.fetch();
        match b1 {
            0x64 => { set(i, Rotr, "rotr\t%1, %0"); i.set_flags(0, 0, SZC); },
            0x65 => set(i, Revw, "revw\t%1, %0"),
            0x66 => { set(i, Rotl, "rotl\t%1, %0"); i.set_flags(0, 0, SZC); },
            _    => set(i, Revl, "revl\t%1, %0"),
        }
        i.ops[1].set_register(hi(b2));
        i.ops[0].set_register(lo(b2));
    },
    0x68 | 0x69 => {
        let b2 = c.fetch();
        let cr = bit(b1, 0) * 16 + lo(b2);
        if cr == 1 || control_register_name(cr).is_none() {
            return unknown(i);
        }
        set(i, Mvtc, "mvtc\t%1, %0");
        i.ops[1].set_register(hi(b2));
        i.ops[0].set_register(CR_BASE + cr);
    },
    0x6a | 0x6b => {
        let b2 = c.fetch();
        let cr = bit(b1, 0) * 16 + hi(b2);
        if control_register_name(cr).is_none() {
            return unknown(i);
        }
        set(i, Mvfc, "mvfc\t%1, %0");
        i.ops[1].set_register(CR_BASE + cr);
        i.ops[0].set_register(lo(b2));
    },
    0x6c..=0x6f => {
        let b2 = c.fetch();
        if bit(b1, 1) == 0 { set(i, Rotr, "rotr\t%1, %0"); }
        else               { set(i, Rotl, "rotl\t%1, %0"); }
        i.set_flags(0, 0, SZC);
        i.ops[1].set_immediate((bit(b1, 0) * 16 + hi(b2)) as i32);
        i.ops[0].set_register(lo(b2));
    },
    0x72 => {
        let b2 = c.fetch();
        match float_form(hi(b2)) {
            Some(f) if hi(b2) <= 4 => {
                let n = apply(i, f, lo(b2));
                let imm = c.immediate(0, false);
                i.ops[n].set_immediate(imm);
            },
            _ => unknown(i),
        }
    },
    0x70..=0x7f if pair(b1, 0) == 0 => {
        let b2 = c.fetch();
        let rd = lo(b2);
        let li = pair(b1, 2);
        match hi(b2) {
            0xe | 0xf => {
                if hi(b2) == 0xe { set(i, Stz, "stz\t%1, %0"); }
                else             { set(i, Stnz, "stnz\t%1, %0"); }
                let imm = c.immediate(li, true);
                i.ops[1].set_immediate(imm);
                i.ops[0].set_register(rd);
            },
            // sbb has no immediate form
            0x0 => unknown(i),
            op => match ext_form(op) {
                Some(f) => {
                    let n = apply(i, f, rd);
                    let imm = c.immediate(li, true);
                    i.ops[n].set_immediate(imm);
                },
                None => unknown(i),
            },
        }
    },
    0x70..=0x7f if pair(b1, 0) == 3 => {
        let b2 = c.fetch();
        let cr = bit(b2, 4) * 16 + lo(b2);
        if hi(b2) > 1 || cr == 1 || control_register_name(cr).is_none() {
            return unknown(i);
        }
        set(i, Mvtc, "mvtc\t%1, %0");
        let imm = c.immediate(pair(b1, 2), true);
        i.ops[1].set_immediate(imm);
        i.ops[0].set_register(CR_BASE + cr);
    },
    0x80..=0xdf => {
        let b2 = c.fetch();
        shift(i, pair(b1, 5), lo(b2));
        i.syntax = match i.opcode {
            Shlr => "shlr\t%2, %1, %0",
            Shar => "shar\t%2, %1, %0",
            _    => "shll\t%2, %1, %0",
        };
        i.ops[1].set_register(hi(b2));
        i.ops[2].set_immediate((b1 & 0x1f) as i32);
    },
    0xe0..=0xff => {
        let b2 = c.fetch();
        let cond = hi(b2);
        if cond == 14 {
            return unknown(i);
        }
        if cond == 15 {
            set(i, Bnot, "bnot\t%1, %0");
        } else {
            set(i, Bmcc, "bm%c2\t%1, %0");
            i.ops[2].set_condition(Cond::from_bits(cond));
        }
        i.ops[1].set_immediate((b1 & 0x1f) as i32);
        i.ops[0].set_register(lo(b2));
    },
    _ => unknown(i),
    }
}

fn group_fe(c: &mut Cursor, i: &mut Instruction) {
    let b1 = c.fetch();
    let sz = pair(b1, 4);

    match pair(b1, 6) {
        0 | 1 if sz == 3 => return unknown(i),
        0 => {
            set(i, Movbir, "mov%s\t%0, [%1, %2]");
            i.set_size(SBWL[sz as usize]);
        },
        1 => {
            set(i, Movbi, "mov%s\t[%1, %2], %0");
            i.set_size(SBWL[sz as usize]);
        },
        3 if sz < 2 => {
            set(i, Movbi, "movu%s\t[%1, %2], %0");
            i.set_size(UBW[sz as usize]);
        },
        _ => return unknown(i),
    }
    let b2 = c.fetch();
    i.ops[0].set_register(lo(b2));
    i.ops[1].set_register(lo(b1));
    i.ops[2].set_register(hi(b2));
}

fn group_ff(c: &mut Cursor, i: &mut Instruction) {
    let b1 = c.fetch();

    let (opcode, syntax, flags) = match hi(b1) {
        0 => (Sub, "sub\t%2, %1, %0", OSZC),
        2 => (Add, "add\t%2, %1, %0", OSZC),
        3 => (Mul, "mul\t%2, %1, %0", 0),
        4 => (And, "and\t%2, %1, %0", SZ),
        5 => (Or,  "or\t%2, %1, %0",  SZ),
        _ => return unknown(i),
    };
    let b2 = c.fetch();
    set(i, opcode, syntax);
    i.set_flags(0, 0, flags);
    i.ops[0].set_register(lo(b1));
    i.ops[1].set_register(lo(b2));
    i.ops[2].set_register(hi(b2));
}

#[cfg(test)]
use crate::decode::SliceSource;

#[cfg(test)]
fn check_decode(pc: u32, bytes: &[u8], opcode: Opcode) -> Instruction {
    // Expected values below are little-endian whatever the build default
    let d = PrefixDecoder::with_order(ByteOrder::Little, false);
    let mut i = Instruction::default();
    // Sentinel after the instruction must never be reached
    let mut src = SliceSource::with_fill(bytes, 0xa5);
    let n = d.decode(pc, &mut i, &mut src);
    println!("{:02x?} -> {:?} should be {:?}", bytes, i, opcode);
    assert_eq!(i.opcode, opcode);
    assert_eq!(n, bytes.len());
    assert_eq!(i.n_bytes, bytes.len());
    assert_eq!(src.consumed(), bytes.len());
    i
}

#[test]
fn test_single_byte() {
    check_decode(0, &[0x00], Brk);
    check_decode(0, &[0x01], Dbt);
    check_decode(0, &[0x03], Nop);

    let i = check_decode(0, &[0x02], Rts);
    assert_eq!(i.syntax, "rts");
    for op in i.ops.iter() {
        assert_eq!(op.kind, OperandKind::None);
    }
}

#[test]
fn test_branches() {
    let i = check_decode(0x1000, &[0x04, 0x12, 0x34, 0x56], Branch);
    assert_eq!(i.ops[0].kind, OperandKind::Immediate);
    assert_eq!(i.ops[0].addend, 0x1000 + 0x563412);

    let i = check_decode(0x1000, &[0x04, 0xfc, 0xff, 0xff], Branch);
    assert_eq!(i.ops[0].addend, 0x1000 - 4);

    let i = check_decode(0x100, &[0x08], Branch);
    assert_eq!(i.ops[0].addend, 0x108);
    let i = check_decode(0x100, &[0x0b], Branch);
    assert_eq!(i.ops[0].addend, 0x103);

    let i = check_decode(0x100, &[0x19], Branch);
    assert_eq!(i.ops[1].condition(), Some(Cond::Ne));
    assert_eq!(i.ops[0].addend, 0x109);

    let i = check_decode(0x100, &[0x25, 0xf0], Branch);
    assert_eq!(i.ops[1].condition(), Some(Cond::Leu));
    assert_eq!(i.ops[0].addend, 0x100 - 16);

    let i = check_decode(0x100, &[0x3a, 0x00, 0x01], Branch);
    assert_eq!(i.ops[1].condition(), Some(Cond::Eq));
    assert_eq!(i.ops[0].addend, 0x200);

    check_decode(0, &[0x39, 0x10, 0x00], Jsr);
    check_decode(0, &[0x05, 0x10, 0x00, 0x00], Jsr);
    check_decode(0, &[0x7f, 0x03], Branch);
    check_decode(0, &[0x7f, 0x13], Jsr);
    check_decode(0, &[0x7f, 0x43], BranchRel);
    check_decode(0, &[0x7f, 0x53], JsrRel);
}

#[test]
fn test_arith_forms() {
    // add r1, r2
    let i = check_decode(0, &[0x4b, 0x12], Add);
    assert_eq!(i.ops[0].kind, OperandKind::Register);
    assert_eq!(i.ops[0].reg, 2);
    assert_eq!(i.ops[1].kind, OperandKind::Register);
    assert_eq!(i.ops[1].reg, 1);
    assert_eq!(i.flags_s, OSZC);

    // add 4[r1].ub, r2
    let i = check_decode(0, &[0x49, 0x12, 0x04], Add);
    assert_eq!(i.ops[1].kind, OperandKind::Indirect);
    assert_eq!(i.ops[1].addend, 4);
    assert_eq!(i.ops[1].size, Size::UByte);

    // cmp [r3].ub, r4: register in slot 1, source in slot 2
    let i = check_decode(0, &[0x44, 0x34], Cmp);
    assert_eq!(i.ops[0].kind, OperandKind::None);
    assert_eq!(i.ops[1].reg, 4);
    assert_eq!(i.ops[2].kind, OperandKind::ZeroIndirect);
    assert_eq!(i.ops[2].reg, 3);

    // sub #15, r7
    let i = check_decode(0, &[0x60, 0xf7], Sub);
    assert_eq!(i.ops[1].addend, 15);
    assert_eq!(i.ops[0].reg, 7);

    // add #-2, r1, r2
    let i = check_decode(0, &[0x71, 0x12, 0xfe], Add);
    assert_eq!(i.ops[1].addend, -2);
    assert_eq!(i.ops[2].reg, 1);
    assert_eq!(i.ops[0].reg, 2);

    // and #0x12345678, r3
    let i = check_decode(0, &[0x74, 0x23, 0x78, 0x56, 0x34, 0x12], And);
    assert_eq!(i.ops[1].addend, 0x12345678);

    // cmp #200, r5 takes its byte unsigned
    let i = check_decode(0, &[0x75, 0x55, 0xc8], Cmp);
    assert_eq!(i.ops[2].addend, 200);

    check_decode(0, &[0xff, 0x21, 0x23], Add);
    check_decode(0, &[0xff, 0x51, 0x23], Or);
}

#[test]
fn test_memex() {
    // sub 2[r1].w, r2
    let i = check_decode(0, &[0x06, 0x41, 0x12, 0x01], Sub);
    assert_eq!(i.ops[1].size, Size::SWord);
    assert_eq!(i.ops[1].addend, 2);

    // add 0x100[r1].uw, r2
    let i = check_decode(0, &[0x06, 0xca, 0x12, 0x80, 0x00], Add);
    assert_eq!(i.ops[1].size, Size::UWord);
    assert_eq!(i.ops[1].addend, 0x100);

    // adc [r1].l, r2
    check_decode(0, &[0x06, 0xa0, 0x02, 0x12], Adc);
    // adc only takes longs
    check_decode(0, &[0x06, 0x20, 0x02], Unknown);

    // tst [r1].b, r2
    let i = check_decode(0, &[0x06, 0x20, 0x0c, 0x12], Tst);
    assert_eq!(i.ops[1].reg, 2);
    assert_eq!(i.ops[2].kind, OperandKind::ZeroIndirect);

    check_decode(0, &[0x06, 0x18], Unknown);
}

#[test]
fn test_moves() {
    // mov.l r1, 8[r2]
    let i = check_decode(0, &[0xa0, 0xa1], Mov);
    assert_eq!(i.size, Size::Long);
    assert_eq!(i.ops[0].kind, OperandKind::Indirect);
    assert_eq!(i.ops[0].reg, 2);
    assert_eq!(i.ops[0].addend, 8);
    assert_eq!(i.ops[1].reg, 1);

    // mov.w 6[r3], r4
    let i = check_decode(0, &[0x98, 0xbc], Mov);
    assert_eq!(i.size, Size::SWord);
    assert_eq!(i.ops[1].addend, 6);
    assert_eq!(i.ops[1].reg, 3);
    assert_eq!(i.ops[0].reg, 4);

    // mov.l r1, [r2]
    let i = check_decode(0, &[0xe3, 0x21], Mov);
    assert_eq!(i.ops[0].kind, OperandKind::ZeroIndirect);
    assert_eq!(i.ops[0].reg, 2);
    assert_eq!(i.ops[1].reg, 1);

    // mov.b 0x1234[r1], 2[r2]
    let i = check_decode(0, &[0xc6, 0x12, 0x34, 0x12, 0x02], Mov);
    assert_eq!(i.ops[1].addend, 0x1234);
    assert_eq!(i.ops[0].addend, 2);

    check_decode(0, &[0xef, 0x00], Nop);

    // mov.l #-1, 4[r3]
    let i = check_decode(0, &[0xf9, 0x36, 0x01, 0xff], Mov);
    assert_eq!(i.ops[0].addend, 4);
    assert_eq!(i.ops[1].addend, -1);

    // mov.b #0x80, 3[r1]
    let i = check_decode(0, &[0x3c, 0x13, 0x80], Mov);
    assert_eq!(i.ops[0].addend, 3);
    assert_eq!(i.ops[1].addend, 0x80);

    // mov.l [r1+], r2 and mov.b r3, [-r4]
    let i = check_decode(0, &[0xfd, 0x2a, 0x12], Mov);
    assert_eq!(i.ops[1].kind, OperandKind::PostInc);
    let i = check_decode(0, &[0xfd, 0x24, 0x43], Mov);
    assert_eq!(i.ops[0].kind, OperandKind::PreDec);
    assert_eq!(i.ops[0].reg, 4);

    // mov.w r5, [r1, r2]
    let i = check_decode(0, &[0xfe, 0x11, 0x25], Movbir);
    assert_eq!(i.ops[0].reg, 5);
    assert_eq!((i.ops[1].reg, i.ops[2].reg), (1, 2));

    // Rejected on the second byte, so the register byte is never read
    check_decode(0, &[0xfe, 0xe1], Unknown);
}

#[test]
fn test_stack() {
    let i = check_decode(0, &[0x7e, 0xa3], Push);
    assert_eq!(i.size, Size::Long);
    assert_eq!(i.ops[0].kind, OperandKind::PreDec);
    let i = check_decode(0, &[0x6e, 0x1f], Pushm);
    assert_eq!(i.ops[1].kind, OperandKind::TwoReg);
    assert_eq!((i.ops[1].reg, i.ops[1].addend), (1, 15));

    let i = check_decode(0, &[0x3f, 0x6e, 0x05], Rtsd);
    assert_eq!(i.ops[1].addend, 20);
    assert_eq!((i.ops[2].reg, i.ops[0].reg), (6, 14));

    let i = check_decode(0, &[0x7e, 0xc0], Pushc);
    assert_eq!(i.ops[1].reg, CR_BASE);
    check_decode(0, &[0x7e, 0xe1], Unknown);
}

#[test]
fn test_flag_effects() {
    let i = check_decode(0, &[0x6a, 0x12], Shar);
    assert_eq!(i.flags_0, O);
    assert_eq!(i.flags_s, SZC);
    assert_eq!(i.ops[2].addend, 1);

    let i = check_decode(0, &[0x7f, 0xa8], Setpsw);
    assert_eq!(i.ops[0].kind, OperandKind::Flag);
    assert_eq!(i.ops[0].reg, Flag::I as u8);
    assert_eq!((i.flags_0, i.flags_1), (0, 0));
    check_decode(0, &[0x7f, 0xa5], Unknown);

    let i = check_decode(0, &[0x7f, 0xa0], Setpsw);
    assert_eq!(i.flags_1, FLAG_C);
    assert_eq!(i.flags_0, 0);
    let i = check_decode(0, &[0x7f, 0xb3], Clrpsw);
    assert_eq!(i.flags_0, FLAG_O);
    assert_eq!(i.flags_1, 0);
}

#[test]
fn test_bits() {
    let i = check_decode(0, &[0xf1, 0x1c, 0x10], Bclr);
    assert_eq!(i.ops[1].addend, 4);
    assert_eq!(i.ops[0].addend, 0x10);
    assert_eq!(i.size, Size::Byte);

    let i = check_decode(0, &[0xfc, 0xe1, 0x32, 0x04], Bmcc);
    assert_eq!(i.ops[2].condition(), Some(Cond::Geu));
    check_decode(0, &[0xfc, 0xe1, 0x3f, 0x04], Bnot);

    let i = check_decode(0, &[0xfd, 0xe3, 0x15], Bmcc);
    assert_eq!(i.ops[1].addend, 3);
    assert_eq!(i.ops[0].reg, 5);
}

#[test]
fn test_system() {
    check_decode(0, &[0x75, 0x60, 0x08], Int);
    check_decode(0, &[0x75, 0x70, 0x03], Mvtipl);
    check_decode(0, &[0x7f, 0x95], Rte);
    check_decode(0, &[0x7f, 0x96], Wait);
    check_decode(0, &[0x7f, 0x8b], Smovb);
    let i = check_decode(0, &[0x7f, 0x85], Swhile);
    assert_eq!(i.size, Size::Word);

    let i = check_decode(0, &[0xfd, 0x6a, 0x01], Mvfc);
    assert_eq!(i.ops[1].reg, CR_BASE);
    check_decode(0, &[0xfd, 0x68, 0x21], Unknown);
    let i = check_decode(0, &[0xfd, 0x7b, 0x0c, 0x00, 0x10], Mvtc);
    assert_eq!(i.ops[0].reg, CR_BASE + 12);
    assert_eq!(i.ops[1].addend, 0x1000);
}

#[test]
fn test_unknown() {
    let i = check_decode(0, &[0x07], Unknown);
    assert_eq!(i.syntax, "*unknown*");
    check_decode(0, &[0x2f], Unknown);
    check_decode(0, &[0x30], Unknown);
    check_decode(0, &[0x7e, 0x70], Unknown);
    check_decode(0, &[0xfc, 0x50], Unknown);
    check_decode(0, &[0xfd, 0x02], Unknown);
    check_decode(0, &[0xff, 0x10], Unknown);
}

#[test]
fn test_group_names() {
    assert_eq!(group(0x02), "single");
    assert_eq!(group(0x2e), "branch");
    assert_eq!(group(0x06), "memex");
    assert_eq!(group(0x4b), "ub memory");
    assert_eq!(group(0xa0), "dsp5 mov");
    assert_eq!(group(0xef), "general mov");
    assert_eq!(group(0xfd), "fd");
    for b0 in [0x07, 0x2f, 0x30, 0x37] {
        assert_eq!(group(b0), "unassigned");
    }
}
