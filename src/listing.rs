// listing.rs -- Sequential disassembly of a memory image
// Copyright (C) 2015 Alex Iadicicco

use std::fmt;

use crate::decode::common::MAX_BYTES;
use crate::decode::{Decoder, PrefixDecoder};
use crate::instruction::Instruction;
use crate::memory::Memory;

/// One decoded instruction with the bytes it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    pub addr: u32,
    pub bytes: Vec<u8>,
    pub insn: Instruction,
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let hex: Vec<String> = self.bytes.iter().map(|b| format!("{:02x}", b)).collect();
        write!(f, "{:08x}: {:<24}{}", self.addr, hex.join(" "), self.insn)
    }
}

/// Walks memory from a start address, one instruction after another. Stops
/// once the next instruction would start outside memory. An instruction that
/// runs off the end reads zeros for the missing bytes.
pub struct Listing<M> {
    mem: M,
    pc: u32,

    decoder: PrefixDecoder,
}

impl<M> Listing<M> {
    pub fn new(mem: M, start: u32, trace: bool) -> Listing<M> {
        Listing {
            mem: mem,
            pc: start,

            decoder: PrefixDecoder::with_trace(trace),
        }
    }

    pub fn pc(&self) -> u32 { self.pc }

    pub fn memory(&self) -> &M { &self.mem }
}

impl<M: Memory> Iterator for Listing<M> {
    type Item = Line;

    fn next(&mut self) -> Option<Line> {
        if !self.mem.contains(self.pc) {
            return None;
        }

        let start = self.pc;
        let mem = &self.mem;
        let mut bytes = Vec::with_capacity(MAX_BYTES);
        let mut addr = start;
        let mut insn = Instruction::default();

        let n = {
            let mut src = || {
                let b = mem.read8(addr).unwrap_or(0);
                addr = addr.wrapping_add(1);
                bytes.push(b);
                b
            };
            self.decoder.decode(start, &mut insn, &mut src)
        };

        self.pc = start.wrapping_add(n as u32);
        Some(Line { addr: start, bytes: bytes, insn: insn })
    }
}

#[cfg(test)]
use crate::instruction::*;
#[cfg(test)]
use crate::memory::Image;

#[test]
fn test_listing_walks_image() {
    let img = Image::new(0x1000, vec![
        0x66, 0x21,             // mov.l #2, r1
        0x4b, 0x11,             // add r1, r1
        0x2e, 0xfc,             // bra.b -4
    ]);
    let lines: Vec<Line> = Listing::new(img, 0x1000, false).collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0].insn.opcode, Mov);
    assert_eq!(lines[1].addr, 0x1002);
    assert_eq!(lines[1].bytes, vec![0x4b, 0x11]);
    assert_eq!(lines[2].insn.opcode, Branch);
    assert_eq!(lines[2].insn.ops[0].addend, 0x1000);
}

#[test]
fn test_listing_partial_tail() {
    let rom: &[u8] = &[0x03, 0xfb];
    let mut l = Listing::new(rom, 0, false);

    assert_eq!(l.next().map(|line| line.insn.opcode), Some(Nop));
    let tail = l.next().unwrap();
    assert_eq!(tail.addr, 1);
    assert!(tail.bytes.len() > 1);
    assert_eq!(tail.bytes[1..].iter().filter(|&&b| b != 0).count(), 0);
    assert!(l.next().is_none());
}

#[test]
fn test_line_display() {
    let rom: &[u8] = &[0x62, 0x52];
    let line = Listing::new(rom, 0, false).next().unwrap();
    assert_eq!(format!("{}", line), format!("00000000: {:<24}add\t#5, r2", "62 52"));
}
