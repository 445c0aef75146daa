use crate::chip8::Chip8;
use crate::error::{Chip8Error, Result};
use crate::opcode::{Fetched, Opcode};
use crate::operations::*;

/// An instruction handler; runs after the program counter has moved past the opcode
pub type Instruction = fn(op: &Fetched, chip8: &mut Chip8) -> Result<()>;

/// How a group of opcodes selects its handler
enum Group {
    /// The top nibble alone identifies the instruction
    Single(Instruction),
    /// A secondary table indexed by some other field of the opcode
    Table(fn(u16) -> usize, &'static [Option<Instruction>]),
}

fn by_addr(op: u16) -> usize {
    op.addr() as usize
}

fn by_byte(op: u16) -> usize {
    op.byte() as usize
}

fn by_nibble(op: u16) -> usize {
    op.n() as usize
}

/// Spreads `(index, handler)` pairs over a table of `N` slots
const fn table<const N: usize, const M: usize>(
    entries: [(usize, Instruction); M],
) -> [Option<Instruction>; N] {
    let mut table = [None; N];
    let mut i = 0;
    while i < M {
        table[entries[i].0] = Some(entries[i].1);
        i += 1;
    }
    table
}

/// Covers addresses 0x000..=0x0FF; anything higher in group 0x0 is SYS
static SYSTEM: [Option<Instruction>; 0x100] = table([(0x0E0, clr), (0x0EE, rts)]);

static LOGICAL: [Option<Instruction>; 0x10] = table([
    (0x0, mv),
    (0x1, or),
    (0x2, and),
    (0x3, xor),
    (0x4, addr),
    (0x5, sub),
    (0x6, shr),
    (0x7, subn),
    (0xE, shl),
]);

static KEYBOARD: [Option<Instruction>; 0x100] = table([(0x9E, skpr), (0xA1, skup)]);

static OTHER: [Option<Instruction>; 0x100] = table([
    (0x07, moved),
    (0x0A, keyd),
    (0x15, loads),
    (0x18, ld),
    (0x1E, addi),
    (0x29, ldspr),
    (0x33, bcd),
    (0x55, stor),
    (0x65, read),
]);

/// Indexed by the opcode's top nibble
static GROUPS: [Group; 16] = [
    Group::Table(by_addr, &SYSTEM),
    Group::Single(jump),
    Group::Single(call),
    Group::Single(ske),
    Group::Single(skne),
    Group::Single(skre),
    Group::Single(load),
    Group::Single(add),
    Group::Table(by_nibble, &LOGICAL),
    Group::Single(skrne),
    Group::Single(loadi),
    Group::Single(jumpi),
    Group::Single(rand),
    Group::Single(draw),
    Group::Table(by_byte, &KEYBOARD),
    Group::Table(by_byte, &OTHER),
];

/// Selects the correct Instruction for a given Opcode
pub fn from_op(op: u16) -> Result<Instruction> {
    let instruction = match &GROUPS[op.group() as usize] {
        Group::Single(instruction) => Some(*instruction),
        Group::Table(index, table) => table.get(index(op)).copied().flatten(),
    };
    instruction.ok_or(Chip8Error::UnknownOpcode { opcode: op })
}
