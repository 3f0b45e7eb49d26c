use log::LevelFilter;

use rxdecode::decode::{ByteOrder, Decoder, PrefixDecoder, SliceSource};
use rxdecode::instruction::Instruction;

fn disassemble(code: &[u8], trace: bool) -> (usize, String) {
    let d = PrefixDecoder::with_order(ByteOrder::Little, trace);
    let mut insn = Instruction::default();
    let n = d.decode(0x1000, &mut insn, &mut SliceSource::new(code));
    (n, format!("{}", insn))
}

fn run_test(name: &'static str, code: &[u8], expect: &str) {
    println!("Testing {}...", name);

    let (n, text) = disassemble(code, false);

    if n != code.len() || text != expect {
        println!("Failed! Re-running with trace");
        let (n, text) = disassemble(code, true);
        println!("  {} bytes: {:?}", n, text);
        println!("  wanted {} bytes: {:?}", code.len(), expect);
        panic!("test failure");
    }
}

macro_rules! test {
    ($name:expr, $prog:expr, $text:expr) => (
        run_test($name, &$prog[..], $text)
    )
}

pub fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::Debug)
        .init();

test!("brk",[0x00],"brk");
test!("rts",[0x02],"rts");
test!("nop",[0x03],"nop");
test!("rte",[0x7f,0x95],"rte");
test!("unknown first byte",[0x07],"*unknown*");

test!("add register",[0x4b,0x12],"add\tr1, r2");
test!("add short immediate",[0x62,0x52],"add\t#5, r2");
test!("add memex byte",[0x49,0x12,0x04],"add\t4[r1].ub, r2");
test!("sub memex word",[0x06,0x41,0x12,0x01],"sub\t2[r1].w, r2");
test!("sub memex uword",[0x06,0xc0,0x12],"sub\t[r1].uw, r2");
test!("cmp memex",[0x44,0x34],"cmp\t[r3].ub, r4");

test!("bclr on memory",[0xf1,0x1c,0x10],"bclr\t#4, 16[r1].b");
test!("scne",[0xfc,0xdb,0x31],"scne.l\tr3");

test!("bra.s",[0x08],"bra.s\t0x1008");
test!("beq.b",[0x20,0x10],"beq.b\t0x1010");
test!("bno.b backwards",[0x2d,0xfe],"bno.b\t0xffe");
test!("jmp",[0x7f,0x02],"jmp\tr2");

test!("pushm",[0x6e,0x6b],"pushm\tr6-r11");
test!("clrpsw",[0x7f,0xb3],"clrpsw\to");
test!("mvfc",[0xfd,0x6a,0x03],"mvfc\tpsw, r3");

test!("mov immediate",[0x75,0x43,0xff],"mov.l\t#255, r3");
test!("mov long immediate",[0xfb,0x12,0x00,0x00,0x01,0x00],"mov.l\t#0x10000, r1");
test!("mov postincrement",[0xfd,0x2a,0x12],"mov.l\t[r1+], r2");
test!("mov predecrement",[0xfd,0x24,0x43],"mov.b\tr3, [-r4]");
test!("mov indexed",[0xfe,0x41,0x25],"mov.b\t[r1, r2], r5");
}
