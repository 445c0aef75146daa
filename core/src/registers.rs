use crate::constants::REGISTER_COUNT;
use crate::error::{Chip8Error, Result};

/// # Register File
///
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry, borrow and collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter, always the address of the next instruction to fetch
///
/// Pointer
/// - (sp) a 16-bit stack pointer; kept for inspection only, the call stack is a list
///
/// Timers
/// - 2 8-bit timers (delay & sound) that count down once per cycle
///
/// Stack
/// - return addresses, bounded by `max_depth`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registers {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub sp: u16,
    pub pc: u16,
    pub delay_timer: u8,
    pub sound_timer: u8,
    stack: Vec<u16>,
    max_depth: usize,
    entry: u16,
}

/// What a timer tick did to the sound timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEdge {
    Unchanged,
    Stopped,
}

impl Registers {
    pub fn new(entry: u16, max_depth: usize) -> Self {
        Registers {
            v: [0; REGISTER_COUNT],
            i: 0,
            sp: 0,
            pc: entry,
            delay_timer: 0,
            sound_timer: 0,
            stack: Vec::with_capacity(max_depth),
            max_depth,
            entry,
        }
    }

    /// Zeroes everything and points the program counter back at the entry address
    pub fn reset(&mut self) {
        self.v = [0; REGISTER_COUNT];
        self.i = 0;
        self.sp = 0;
        self.pc = self.entry;
        self.delay_timer = 0;
        self.sound_timer = 0;
        self.stack.clear();
    }

    pub fn push(&mut self, address: u16) -> Result<()> {
        if self.stack.len() >= self.max_depth {
            return Err(Chip8Error::StackOverflow {
                depth: self.max_depth,
            });
        }
        self.stack.push(address);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16> {
        self.stack.pop().ok_or(Chip8Error::StackUnderflow)
    }

    pub fn stack(&self) -> &[u16] {
        &self.stack
    }

    /// Decrements both timers if nonzero.
    /// Reports `Stopped` only on the tick that brings the sound timer to zero.
    pub fn tick_timers(&mut self) -> SoundEdge {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        if self.sound_timer > 0 {
            self.sound_timer -= 1;
            if self.sound_timer == 0 {
                return SoundEdge::Stopped;
            }
        }
        SoundEdge::Unchanged
    }
}
