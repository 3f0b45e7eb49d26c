// lib.rs -- Renesas RX instruction decoder
// Copyright (C) 2015 Alex Iadicicco

//! Decodes Renesas RX machine code into a fixed-shape instruction record and
//! prints it as assembler text. Start with `decode::decode`, or walk a whole
//! memory image with `listing::Listing`.

pub mod decode;
pub mod disasm;
pub mod instruction;
pub mod listing;
pub mod memory;

pub use crate::decode::decode;
pub use crate::instruction::Instruction;
