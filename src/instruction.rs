// instruction.rs -- Decoded RX instruction record
// Copyright (C) 2015 Alex Iadicicco

pub use self::Opcode::*;

#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Opcode {
    #[default]
    Unknown,

    Abs,
    Adc,
    Add,
    And,
    Bclr,
    Bmcc,
    Bnot,
    Branch,
    BranchRel,
    Brk,
    Bset,
    Btst,
    Clrpsw,
    Cmp,
    Dbt,
    Div,
    Divu,
    Emul,
    Emulu,
    Fadd,
    Fcmp,
    Fdiv,
    Fmul,
    Fsub,
    Ftoi,
    Int,
    Itof,
    Jsr,
    JsrRel,
    Machi,
    Maclo,
    Max,
    Min,
    Mov,
    Movbi,
    Movbir,
    Mul,
    Mulhi,
    Mullo,
    Mvfachi,
    Mvfaclo,
    Mvfacmi,
    Mvfc,
    Mvtachi,
    Mvtaclo,
    Mvtc,
    Mvtipl,
    Neg,
    Nop,
    Not,
    Or,
    Pop,
    Popc,
    Popm,
    Push,
    Pushc,
    Pushm,
    Racw,
    Revl,
    Revw,
    Rmpa,
    Rolc,
    Rorc,
    Rotl,
    Rotr,
    Round,
    Rte,
    Rtfi,
    Rts,
    Rtsd,
    Sat,
    Satr,
    Sbb,
    Sccnd,
    Scmpu,
    Setpsw,
    Shar,
    Shll,
    Shlr,
    Smovb,
    Smovf,
    Smovu,
    Sstr,
    Stnz,
    Stz,
    Sub,
    Suntil,
    Swhile,
    Tst,
    Wait,
    Xchg,
    Xor,
}

/// Operand and instruction size classes. The order matters: the displacement
/// scale table below is indexed by it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Size {
    AnySize,
    Byte,
    UByte,
    SByte,
    Word,
    UWord,
    SWord,
    Tri,
    Long,
}

impl Default for Size {
    fn default() -> Size { Size::Long }
}

impl Size {
    /// Multiplier applied to an encoded displacement for an element of this
    /// size.
    pub fn scale(self) -> i32 {
        match self {
            Size::AnySize => 4,
            Size::Byte | Size::UByte | Size::SByte => 1,
            Size::Word | Size::UWord | Size::SWord => 2,
            Size::Tri => 3,
            Size::Long => 4,
        }
    }

    /// Suffix printed after a mnemonic.
    pub fn suffix(self) -> &'static str {
        match self {
            Size::AnySize => "",
            Size::Byte | Size::UByte | Size::SByte => ".b",
            Size::Word | Size::UWord | Size::SWord => ".w",
            Size::Tri => ".a",
            Size::Long => ".l",
        }
    }

    /// Suffix printed after a memory operand. Unsigned extensions are spelled
    /// out.
    pub fn memex_suffix(self) -> &'static str {
        match self {
            Size::UByte => ".ub",
            Size::UWord => ".uw",
            _ => self.suffix(),
        }
    }
}

/// Condition field values, as they appear in bcnd, sccnd and bmcnd.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cond {
    Eq,
    Ne,
    Geu,
    Ltu,
    Gtu,
    Leu,
    Pz,
    N,
    Ge,
    Lt,
    Gt,
    Le,
    O,
    No,
    Always,
    Never,
}

impl Cond {
    pub fn from_bits(bits: u8) -> Cond {
        match bits & 0xf {
            0x0 => Cond::Eq,
            0x1 => Cond::Ne,
            0x2 => Cond::Geu,
            0x3 => Cond::Ltu,
            0x4 => Cond::Gtu,
            0x5 => Cond::Leu,
            0x6 => Cond::Pz,
            0x7 => Cond::N,
            0x8 => Cond::Ge,
            0x9 => Cond::Lt,
            0xa => Cond::Gt,
            0xb => Cond::Le,
            0xc => Cond::O,
            0xd => Cond::No,
            0xe => Cond::Always,
            _ => Cond::Never,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Cond::Eq => "eq",
            Cond::Ne => "ne",
            Cond::Geu => "geu",
            Cond::Ltu => "ltu",
            Cond::Gtu => "gtu",
            Cond::Leu => "leu",
            Cond::Pz => "pz",
            Cond::N => "n",
            Cond::Ge => "ge",
            Cond::Lt => "lt",
            Cond::Gt => "gt",
            Cond::Le => "le",
            Cond::O => "o",
            Cond::No => "no",
            Cond::Always => "always",
            Cond::Never => "never",
        }
    }
}

/// PSW bits addressable by setpsw/clrpsw. The discriminant is the bit number.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flag {
    C = 0,
    Z = 1,
    S = 2,
    O = 3,
    I = 8,
    U = 9,
}

impl Flag {
    pub fn from_bits(bits: u8) -> Option<Flag> {
        match bits {
            0 => Some(Flag::C),
            1 => Some(Flag::Z),
            2 => Some(Flag::S),
            3 => Some(Flag::O),
            8 => Some(Flag::I),
            9 => Some(Flag::U),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Flag::C => "c",
            Flag::Z => "z",
            Flag::S => "s",
            Flag::O => "o",
            Flag::I => "i",
            Flag::U => "u",
        }
    }

    /// Bit in the flags_0/flags_1/flags_s masks. I and U live outside the
    /// condition flags and have none.
    pub fn mask(self) -> u8 {
        match self {
            Flag::C => FLAG_C,
            Flag::Z => FLAG_Z,
            Flag::S => FLAG_S,
            Flag::O => FLAG_O,
            Flag::I | Flag::U => 0,
        }
    }
}

// Condition flag masks for flags_0/flags_1/flags_s
pub const FLAG_O: u8 = 0b1000;
pub const FLAG_S: u8 = 0b0100;
pub const FLAG_Z: u8 = 0b0010;
pub const FLAG_C: u8 = 0b0001;

/// Offset added to a control register number so it shares the register field
/// with the general registers.
pub const CR_BASE: u8 = 16;

pub fn control_register_name(cr: u8) -> Option<&'static str> {
    match cr {
        0 => Some("psw"),
        1 => Some("pc"),
        2 => Some("usp"),
        3 => Some("fpsw"),
        8 => Some("bpsw"),
        9 => Some("bpc"),
        10 => Some("isp"),
        11 => Some("fintv"),
        12 => Some("intb"),
        _ => None,
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum OperandKind {
    #[default]
    None,
    Immediate,
    Register,
    Indirect,
    ZeroIndirect,
    PostInc,
    PreDec,
    Condition,
    Flag,
    TwoReg,
}

/// One operand slot. Which fields mean anything depends on `kind`: registers
/// and indirections use `reg`, immediates and displacements use `addend`,
/// conditions and flags keep their number in `reg`, and a register range keeps
/// its last register in `addend`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct Operand {
    pub kind: OperandKind,
    pub reg: u8,
    pub addend: i32,
    pub size: Size,
}

impl Operand {
    pub fn set_register(&mut self, reg: u8) {
        self.kind = OperandKind::Register;
        self.reg = reg;
        self.addend = 0;
    }

    pub fn set_indirect(&mut self, reg: u8, addend: i32) {
        self.kind = OperandKind::Indirect;
        self.reg = reg;
        self.addend = addend;
    }

    pub fn set_zero_indirect(&mut self, reg: u8) {
        self.kind = OperandKind::ZeroIndirect;
        self.reg = reg;
        self.addend = 0;
    }

    pub fn set_postinc(&mut self, reg: u8) {
        self.kind = OperandKind::PostInc;
        self.reg = reg;
        self.addend = 0;
    }

    pub fn set_predec(&mut self, reg: u8) {
        self.kind = OperandKind::PreDec;
        self.reg = reg;
        self.addend = 0;
    }

    pub fn set_immediate(&mut self, value: i32) {
        self.kind = OperandKind::Immediate;
        self.reg = 0;
        self.addend = value;
    }

    pub fn set_condition(&mut self, cond: Cond) {
        self.kind = OperandKind::Condition;
        self.reg = cond as u8;
        self.addend = 0;
    }

    pub fn set_flag(&mut self, flag: Flag) {
        self.kind = OperandKind::Flag;
        self.reg = flag as u8;
        self.addend = 0;
    }

    pub fn set_range(&mut self, first: u8, last: u8) {
        self.kind = OperandKind::TwoReg;
        self.reg = first;
        self.addend = last as i32;
    }

    pub fn is_memory(&self) -> bool {
        match self.kind {
            OperandKind::Indirect | OperandKind::ZeroIndirect |
            OperandKind::PostInc | OperandKind::PreDec => true,
            _ => false,
        }
    }

    pub fn condition(&self) -> Option<Cond> {
        match self.kind {
            OperandKind::Condition => Some(Cond::from_bits(self.reg)),
            _ => None,
        }
    }
}

/// A fully decoded instruction. Operand 0 is the destination, 1 the source and
/// 2 the second source. Compares and tests have no destination and keep their
/// register in slot 1.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct Instruction {
    pub opcode: Opcode,
    pub size: Size,
    #[doc="Flags cleared to 0"]         pub flags_0: u8,
    #[doc="Flags set to 1"]             pub flags_1: u8,
    #[doc="Flags set from the result"]  pub flags_s: u8,
    pub syntax: &'static str,
    pub n_bytes: usize,
    pub ops: [Operand; 3],
}

impl Instruction {
    /// Sets the overall size and the size of every operand slot.
    pub fn set_size(&mut self, sz: Size) {
        self.size = sz;
        for op in self.ops.iter_mut() {
            op.size = sz;
        }
    }

    /// Records flag effects: `cleared` flags become 0, `set` flags become 1,
    /// `updated` flags follow the result.
    pub fn set_flags(&mut self, cleared: u8, set: u8, updated: u8) {
        self.flags_0 = cleared;
        self.flags_1 = set;
        self.flags_s = updated;
    }

    pub fn is_unknown(&self) -> bool { self.opcode == Opcode::Unknown }

    pub fn dst(&self) -> &Operand { &self.ops[0] }
    pub fn src(&self) -> &Operand { &self.ops[1] }
    pub fn src2(&self) -> &Operand { &self.ops[2] }
}

#[test]
fn test_default_is_long() {
    let i = Instruction::default();
    assert_eq!(i.opcode, Unknown);
    assert_eq!(i.size, Size::Long);
    for op in i.ops.iter() {
        assert_eq!(op.kind, OperandKind::None);
        assert_eq!(op.size, Size::Long);
    }
}

#[test]
fn test_scales() {
    assert_eq!(Size::AnySize.scale(), 4);
    assert_eq!(Size::UByte.scale(), 1);
    assert_eq!(Size::SWord.scale(), 2);
    assert_eq!(Size::Tri.scale(), 3);
    assert_eq!(Size::Long.scale(), 4);
}

#[test]
fn test_operand_builders_touch_one_slot() {
    let mut i = Instruction::default();
    i.ops[1].set_indirect(3, 12);
    assert_eq!(i.ops[0].kind, OperandKind::None);
    assert_eq!(i.ops[2].kind, OperandKind::None);
    assert_eq!(i.ops[1].kind, OperandKind::Indirect);
    assert_eq!(i.ops[1].reg, 3);
    assert_eq!(i.ops[1].addend, 12);
    assert!(i.ops[1].is_memory());

    i.ops[1].set_register(4);
    assert_eq!(i.ops[1].addend, 0);
    assert!(!i.ops[1].is_memory());
}

#[test]
fn test_flags_from_bits() {
    assert_eq!(Flag::from_bits(3), Some(Flag::O));
    assert_eq!(Flag::from_bits(9), Some(Flag::U));
    assert_eq!(Flag::from_bits(5), None);
    assert_eq!(Flag::Z.mask(), FLAG_Z);
    assert_eq!(Flag::I.mask(), 0);
}

#[test]
fn test_set_flags() {
    let mut i = Instruction::default();
    i.set_flags(FLAG_O, FLAG_C, FLAG_S | FLAG_Z);
    assert_eq!((i.flags_0, i.flags_1, i.flags_s), (FLAG_O, FLAG_C, FLAG_S | FLAG_Z));
}
