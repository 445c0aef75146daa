use std::path::PathBuf;

use clap::Parser;

use crate::run::{parse_address, run, Settings};

mod keymap;
mod run;

#[doc(hidden)]
#[derive(Parser, Debug)]
#[command(version, about = "Headless Chip-8 stepper", long_about = None)]
struct Args {
    #[arg(help = "Path to the ROM file to run (.ch8, .c8 or .rom)")]
    rom: PathBuf,

    #[arg(short, long, default_value_t = 1000, help = "Number of cycles to execute")]
    steps: usize,

    #[arg(long, help = "Load and start the ROM at 0x600 (ETI 660)")]
    eti: bool,

    #[arg(long, value_parser = parse_address, help = "Hex address to load the ROM at, e.g. 0x300; defaults to the program start")]
    offset: Option<u16>,

    #[arg(long, help = "Seed for the random number instruction")]
    seed: Option<u64>,

    #[arg(long, default_value_t = chip8_core::constants::MAX_STACK_DEPTH, help = "Maximum subroutine nesting")]
    max_stack_depth: usize,

    #[arg(long, default_value = "", help = "Keys held for the whole run, e.g. \"qe\" (1234 QWER ASDF ZXCV)")]
    hold: String,

    #[arg(long, help = "Cycles per second; unpaced when omitted")]
    hz: Option<f64>,

    #[arg(short, long, help = "Log every instruction at trace level")]
    trace: bool,

    #[arg(short, long, help = "List the ROM instead of running it")]
    disasm: bool,

    #[arg(long, default_value_t = 0, help = "Rows of memory to dump from the program start")]
    dump_memory: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let level = if args.trace { "trace" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let settings = Settings {
        rom: args.rom,
        steps: args.steps,
        eti: args.eti,
        offset: args.offset,
        seed: args.seed,
        max_stack_depth: args.max_stack_depth,
        hold: args.hold,
        hz: args.hz,
        trace: args.trace,
        disasm: args.disasm,
        dump_memory: args.dump_memory,
    };
    print!("{}", run(&settings)?);
    Ok(())
}
