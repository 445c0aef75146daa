use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use log::info;

use chip8_core::constants::{ETI_PROGRAM_START, MAX_STACK_DEPTH, PROGRAM_START};
use chip8_core::{listing, Chip8, Config, LogSink, RomImage};

use crate::keymap::keymap;

/// Everything `run` needs to know, gathered from the command line
pub struct Settings {
    pub rom: PathBuf,
    pub steps: usize,
    pub eti: bool,
    pub offset: Option<u16>,
    pub seed: Option<u64>,
    pub max_stack_depth: usize,
    pub hold: String,
    pub hz: Option<f64>,
    pub trace: bool,
    pub disasm: bool,
    pub dump_memory: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            rom: PathBuf::new(),
            steps: 1000,
            eti: false,
            offset: None,
            seed: None,
            max_stack_depth: MAX_STACK_DEPTH,
            hold: String::new(),
            hz: None,
            trace: false,
            disasm: false,
            dump_memory: 0,
        }
    }
}

/// Parses a load address written in hex, with or without a leading `0x`
pub fn parse_address(text: &str) -> Result<u16, String> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    u16::from_str_radix(digits, 16).map_err(|e| format!("{:?} is not a hex address: {}", text, e))
}

/// Loads the ROM, holds the requested keys and steps the machine, returning
/// what should be printed: the final frame and register dump, or a listing.
pub fn run(settings: &Settings) -> anyhow::Result<String> {
    let rom = RomImage::from_path(&settings.rom)
        .with_context(|| format!("unable to load {}", settings.rom.display()))?;
    let program_start = if settings.eti {
        ETI_PROGRAM_START
    } else {
        PROGRAM_START
    };
    let load_address = settings.offset.unwrap_or(program_start);

    if settings.disasm {
        return Ok(listing(rom.bytes(), load_address).join("\n") + "\n");
    }

    let mut config = Config {
        program_start,
        ..Config::default()
    }
    .with_max_stack_depth(settings.max_stack_depth);
    if let Some(seed) = settings.seed {
        config = config.with_seed(seed);
    }
    let mut chip8 = Chip8::with_config(config)?;
    chip8.load_rom_at(&rom, load_address)?;
    info!("successfully loaded {}", settings.rom.display());

    if settings.trace {
        chip8.set_trace_sink(LogSink);
    }
    for key in settings.hold.chars() {
        match keymap(key) {
            Some(code) => chip8.key_press(code),
            None => bail!("{:?} is not on the keypad (use 1234 QWER ASDF ZXCV)", key),
        }
    }

    let cycle_time = match settings.hz {
        Some(hz) if !(hz.is_finite() && hz > 0.0) => bail!("--hz must be a positive number, got {}", hz),
        Some(hz) => match Duration::try_from_secs_f64(1.0 / hz) {
            Ok(cycle_time) => Some(cycle_time),
            Err(_) => bail!("--hz {} is too slow to pace", hz),
        },
        None => None,
    };
    let mut last_cycle = Instant::now();
    for step in 0..settings.steps {
        chip8
            .step()
            .with_context(|| format!("step {} failed at {:#06X}", step, chip8.snapshot().pc))?;

        // Handle timing
        if let Some(cycle_time) = cycle_time {
            let elapsed_cycle_time = last_cycle.elapsed();
            if cycle_time > elapsed_cycle_time {
                thread::sleep(cycle_time - elapsed_cycle_time);
            }
            last_cycle = Instant::now();
        }
    }

    let mut out = chip8.display().render_text('#', '.');
    out.push('\n');
    out.push_str(&chip8.snapshot().to_string());
    out.push('\n');
    if settings.dump_memory > 0 {
        out.push('\n');
        out.push_str(&chip8.bus().dump(load_address as usize, settings.dump_memory, 16));
    }
    Ok(out)
}
