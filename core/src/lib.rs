pub use audio::Buzzer;
pub use bus::Bus;
pub use chip8::Chip8;
pub use config::Config;
pub use disasm::{disassemble, listing};
pub use display::{Display, FrameBuffer};
pub use error::{Chip8Error, Result};
pub use opcode::Opcode;
pub use rom::{RomImage, ROM_EXTENSIONS};
pub use shared::SharedChip8;
pub use snapshot::Snapshot;
pub use trace::{LogSink, TraceEvent, TraceSink};

mod audio;
mod bus;
mod chip8;
mod config;
pub mod constants;
mod disasm;
mod display;
mod error;
mod instruction;
mod keypad;
mod opcode;
mod operations;
mod registers;
mod rom;
mod shared;
mod snapshot;
mod trace;
