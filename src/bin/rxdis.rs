use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::LevelFilter;

use rxdecode::listing::Listing;
use rxdecode::memory::Image;

#[derive(Parser, Debug)]
#[command(name = "rxdis", about = "Disassemble Renesas RX machine code.")]
struct Args {
    /// Instruction bytes in hex, e.g. `fb 12 00 00 01 00`.
    bytes: Vec<String>,

    /// Raw binary file to disassemble instead of hex bytes.
    #[arg(long, value_name = "PATH", conflicts_with = "bytes")]
    file: Option<PathBuf>,

    /// Address of the first byte (hex with 0x, or decimal).
    #[arg(long, default_value = "0", value_parser = parse_addr)]
    pc: u32,

    /// Stop after this many instructions.
    #[arg(long)]
    count: Option<usize>,

    /// Log every decode step.
    #[arg(long)]
    trace: bool,
}

fn parse_addr(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse::<u32>(),
    };
    parsed.map_err(|e| format!("bad address {:?}: {}", s, e))
}

fn load(args: &Args) -> Result<Image> {
    if let Some(path) = &args.file {
        let bytes = fs::read(path)
            .with_context(|| format!("reading {}", path.display()))?;
        if bytes.is_empty() {
            bail!("{} is empty", path.display());
        }
        return Ok(Image::new(args.pc, bytes));
    }

    Image::from_hex(args.pc, &args.bytes.join(" "))
        .context("parsing instruction bytes")
}

pub fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.trace { LevelFilter::Debug } else { LevelFilter::Warn };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let image = load(&args)?;
    let lines = Listing::new(image, args.pc, args.trace);

    for line in lines.take(args.count.unwrap_or(usize::MAX)) {
        println!("{}", line);
    }

    Ok(())
}
