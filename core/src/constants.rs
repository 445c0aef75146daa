/// Bytes of addressable memory on a stock Chip-8
pub const MEMORY_SIZE: usize = 4096;

/// Largest bus a 16-bit address register can reach
pub const MAX_MEMORY_SIZE: usize = 0x1_0000;

/// Where most ROMs are loaded and where the program counter starts
pub const PROGRAM_START: u16 = 0x200;

/// Where ETI 660 ROMs are loaded
pub const ETI_PROGRAM_START: u16 = 0x600;

/// Subroutine nesting allowed before a call fails
pub const MAX_STACK_DEPTH: usize = 16;

pub const REGISTER_COUNT: usize = 16;
pub const KEY_COUNT: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Address of the first glyph in the sprite sheet
pub const FONT_START: u16 = 0x000;

/// Bytes per glyph in the sprite sheet
pub const GLYPH_SIZE: u16 = 5;

/// # Sprite Sheet
/// The hexadecimal digits 0..F, each 4 pixels wide and 5 rows tall.
/// It occupies 0x000..0x050 and ROMs are never loaded over it.
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// First address past the sprite sheet
pub const FONT_END: usize = FONT_START as usize + SPRITE_SHEET.len();
