// disasm.rs -- Disassembly text from decoded instructions
// Copyright (C) 2015 Alex Iadicicco

//! Every decoded instruction carries a syntax template. `%0`, `%1` and `%2`
//! print an operand; `%a` prints one as a branch target, `%c` as a condition
//! name and `%S` as the size suffix of a memory operand. `%s` prints the size
//! suffix of the whole instruction.

use std::fmt;

use crate::instruction::*;

fn register(f: &mut fmt::Formatter, reg: u8) -> fmt::Result {
    if reg < CR_BASE {
        return write!(f, "r{}", reg);
    }
    match control_register_name(reg - CR_BASE) {
        Some(name) => write!(f, "{}", name),
        None => write!(f, "cr{}", reg - CR_BASE),
    }
}

fn immediate(f: &mut fmt::Formatter, v: i32) -> fmt::Result {
    if -256 < v && v < 256 {
        write!(f, "#{}", v)
    } else if v < 0 {
        write!(f, "#-0x{:x}", (v as i64).abs())
    } else {
        write!(f, "#0x{:x}", v)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            OperandKind::None => Ok(()),
            OperandKind::Immediate => immediate(f, self.addend),
            OperandKind::Register => register(f, self.reg),
            OperandKind::Indirect if self.addend != 0 => {
                write!(f, "{}[", self.addend)?;
                register(f, self.reg)?;
                write!(f, "]")
            },
            OperandKind::Indirect | OperandKind::ZeroIndirect => {
                write!(f, "[")?;
                register(f, self.reg)?;
                write!(f, "]")
            },
            OperandKind::PostInc => {
                write!(f, "[")?;
                register(f, self.reg)?;
                write!(f, "+]")
            },
            OperandKind::PreDec => {
                write!(f, "[-")?;
                register(f, self.reg)?;
                write!(f, "]")
            },
            OperandKind::Condition => write!(f, "{}", Cond::from_bits(self.reg).name()),
            OperandKind::Flag => match Flag::from_bits(self.reg) {
                Some(flag) => write!(f, "{}", flag.name()),
                None => write!(f, "?{}", self.reg),
            },
            OperandKind::TwoReg => {
                register(f, self.reg)?;
                write!(f, "-")?;
                register(f, self.addend as u8)
            },
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut chars = self.syntax.chars();

        while let Some(ch) = chars.next() {
            if ch != '%' {
                write!(f, "{}", ch)?;
                continue;
            }

            let code = match chars.next() {
                Some(code) => code,
                None => return write!(f, "%"),
            };

            if code == 's' {
                write!(f, "{}", self.size.suffix())?;
                continue;
            }

            let n = match code {
                '0' | '1' | '2' => code,
                _ => match chars.next() {
                    Some(n @ '0'..='2') => n,
                    _ => return write!(f, "%{}", code),
                },
            };
            let op = &self.ops[(n as u8 - b'0') as usize];

            match code {
                'a' => match op.kind {
                    OperandKind::Immediate => write!(f, "0x{:x}", op.addend as u32)?,
                    _ => write!(f, "{}", op)?,
                },
                'c' => if let Some(cond) = op.condition() {
                    write!(f, "{}", cond.name())?;
                },
                'S' => if op.is_memory() {
                    write!(f, "{}", op.size.memex_suffix())?;
                },
                _ => write!(f, "{}", op)?,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
use crate::decode::{ByteOrder, Decoder, PrefixDecoder};

#[cfg(test)]
fn text(bytes: &[u8]) -> String {
    let mut i = Instruction::default();
    let mut src = crate::decode::SliceSource::new(bytes);
    PrefixDecoder::with_order(ByteOrder::Little, false).decode(0x1000, &mut i, &mut src);
    format!("{}", i)
}

#[test]
fn test_plain() {
    assert_eq!(text(&[0x02]), "rts");
    assert_eq!(text(&[0x07]), "*unknown*");
    assert_eq!(text(&[0x4b, 0x12]), "add\tr1, r2");
    assert_eq!(text(&[0x62, 0x52]), "add\t#5, r2");
    assert_eq!(text(&[0x75, 0x43, 0xff]), "mov.l\t#255, r3");
}

#[test]
fn test_memory_suffixes() {
    assert_eq!(text(&[0x49, 0x12, 0x04]), "add\t4[r1].ub, r2");
    assert_eq!(text(&[0x06, 0x41, 0x12, 0x01]), "sub\t2[r1].w, r2");
    assert_eq!(text(&[0x06, 0xc0, 0x12]), "sub\t[r1].uw, r2");
    assert_eq!(text(&[0x44, 0x34]), "cmp\t[r3].ub, r4");
    assert_eq!(text(&[0xf1, 0x1c, 0x10]), "bclr\t#4, 16[r1].b");
}

#[test]
fn test_branch_targets() {
    assert_eq!(text(&[0x08]), "bra.s\t0x1008");
    assert_eq!(text(&[0x20, 0x10]), "beq.b\t0x1010");
    assert_eq!(text(&[0x2d, 0xfe]), "bno.b\t0xffe");
    assert_eq!(text(&[0x7f, 0x02]), "jmp\tr2");
}

#[test]
fn test_other_operands() {
    assert_eq!(text(&[0x6e, 0x6b]), "pushm\tr6-r11");
    assert_eq!(text(&[0x7f, 0xb3]), "clrpsw\to");
    assert_eq!(text(&[0xfd, 0x2a, 0x12]), "mov.l\t[r1+], r2");
    assert_eq!(text(&[0xfd, 0x24, 0x43]), "mov.b\tr3, [-r4]");
    assert_eq!(text(&[0xfe, 0x41, 0x25]), "mov.b\t[r1, r2], r5");
    assert_eq!(text(&[0xfd, 0x6a, 0x03]), "mvfc\tpsw, r3");
    assert_eq!(text(&[0xfc, 0xdb, 0x31]), "scne.l\tr3");
    assert_eq!(text(&[0xfb, 0x12, 0x00, 0x00, 0x01, 0x00]), "mov.l\t#0x10000, r1");
}
