use std::fmt;

use crate::constants::REGISTER_COUNT;

/// A read-only copy of everything a debugger would want to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub sp: u16,
    pub pc: u16,
    pub delay_timer: u8,
    pub sound_timer: u8,
    /// The raw opcode most recently fetched
    pub opcode: u16,
    pub stack_depth: usize,
    /// Bit n is set while key n is held
    pub keys: u16,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "PC {:#06X}  OP {:#06X}  I {:#06X}  SP {:#06X}",
            self.pc, self.opcode, self.i, self.sp
        )?;
        for (row, regs) in self.v.chunks(8).enumerate() {
            for (col, value) in regs.iter().enumerate() {
                write!(f, "V{:X} {:#04X}  ", row * 8 + col, value)?;
            }
            writeln!(f)?;
        }
        write!(
            f,
            "DT {:#04X}  ST {:#04X}  STACK {}  KEYS {:016b}",
            self.delay_timer, self.sound_timer, self.stack_depth, self.keys
        )
    }
}
