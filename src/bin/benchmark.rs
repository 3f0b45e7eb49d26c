use rxdecode::decode::{Decoder, PrefixDecoder, SliceSource};
use rxdecode::instruction::Instruction;

fn timed<F: FnMut()>(name: &'static str, mut target: F) {
    let start = time::now();
    target();
    let duration = time::now() - start;
    println!("{} finished in {}ms", name, duration.num_milliseconds());
}

pub fn main() {
    let rom = [
        0x4b, 0x12,                         // add r1, r2
        0x62, 0x52,                         // add #5, r2
        0x06, 0x41, 0x12, 0x01,             // sub 2[r1].w, r2
        0xfb, 0x12, 0x00, 0x00, 0x01, 0x00, // mov.l #0x10000, r1
        0xfd, 0x2a, 0x12,                   // mov.l [r1+], r2
        0xfc, 0xdb, 0x31,                   // scne.l r3
        0x6e, 0x6b,                         // pushm r6-r11
        0x2e, 0xea,                         // bra.b -22
    ];

    let d = PrefixDecoder::new();
    let mut insn = Instruction::default();
    let mut total = 0usize;

    timed("100,000 passes (800,000 instructions)", || {
        for _ in 0..100_000 {
            let mut src = SliceSource::new(&rom[..]);
            let mut pc = 0u32;
            while src.consumed() < rom.len() {
                let n = d.decode(pc, &mut insn, &mut src);
                pc += n as u32;
                total += n;
            }
        }
    });

    println!("{} bytes decoded, last: {}", total, insn);
}
