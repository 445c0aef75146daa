use crate::constants::{FONT_END, MAX_MEMORY_SIZE, MAX_STACK_DEPTH, MEMORY_SIZE, PROGRAM_START};
use crate::error::{Chip8Error, Result};

/// # Config
/// Construction-time parameters of a Chip-8 machine.
///
/// - `memory_size` bytes on the bus, at most 65536
/// - `program_start` where `reset` points the program counter and where ROMs go by default
/// - `max_stack_depth` nesting allowed before `CALL` fails with a stack overflow
/// - `seed` makes `RND` deterministic when set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub memory_size: usize,
    pub program_start: u16,
    pub max_stack_depth: usize,
    pub seed: Option<u64>,
}

impl Config {
    pub fn with_seed(self, seed: u64) -> Self {
        Config {
            seed: Some(seed),
            ..self
        }
    }

    pub fn with_memory_size(self, memory_size: usize) -> Self {
        Config {
            memory_size,
            ..self
        }
    }

    pub fn with_max_stack_depth(self, max_stack_depth: usize) -> Self {
        Config {
            max_stack_depth,
            ..self
        }
    }

    /// Checks that the bus can hold the sprite sheet and the program start
    pub fn validate(&self) -> Result<()> {
        if self.memory_size > MAX_MEMORY_SIZE {
            return Err(Chip8Error::InvalidConfig {
                reason: format!(
                    "memory size {} exceeds the {} byte address space",
                    self.memory_size, MAX_MEMORY_SIZE
                ),
            });
        }
        if (self.program_start as usize) < FONT_END {
            return Err(Chip8Error::InvalidConfig {
                reason: format!(
                    "program start {:#06X} overlaps the sprite sheet",
                    self.program_start
                ),
            });
        }
        if self.memory_size < self.program_start as usize + 2 {
            return Err(Chip8Error::InvalidConfig {
                reason: format!(
                    "memory size {} leaves no room for a program at {:#06X}",
                    self.memory_size, self.program_start
                ),
            });
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            memory_size: MEMORY_SIZE,
            program_start: PROGRAM_START,
            max_stack_depth: MAX_STACK_DEPTH,
            seed: None,
        }
    }
}
