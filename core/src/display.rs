use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// The FrameBuffer is indexed as [y][x]; every cell is either 0 or 1
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// # Display Buffer
/// The Chip-8 display is composed of 64x32 black/white pixels.
///
/// It only changes through `clear` and `draw_sprite`; either one raises the
/// dirty flag, which a renderer consumes with `take_dirty`.
pub struct Display {
    frame_buffer: FrameBuffer,
    dirty: bool,
}

impl Display {
    pub fn new() -> Self {
        Display {
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            dirty: false,
        }
    }

    pub fn clear(&mut self) {
        self.frame_buffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        self.dirty = true;
    }

    /// XORs `rows` onto the frame buffer with its top left corner at `x`, `y`.
    /// Pixels falling off the right or bottom edge are dropped rather than wrapped.
    /// Returns whether any lit pixel was switched off.
    pub fn draw_sprite(&mut self, x: usize, y: usize, rows: &[u8]) -> bool {
        let mut collision = false;
        for (offset, row) in rows.iter().enumerate() {
            let py = y + offset;
            if py >= DISPLAY_HEIGHT {
                continue;
            }
            for bit in 0..8 {
                let px = x + bit;
                if px >= DISPLAY_WIDTH {
                    continue;
                }
                let pixel = (row >> (7 - bit)) & 0x1;
                if pixel == 0 {
                    continue;
                }
                let cell = &mut self.frame_buffer[py][px];
                if *cell == 0x1 {
                    collision = true;
                }
                *cell ^= pixel;
            }
        }
        self.dirty = true;
        collision
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Checks and clears the dirty flag
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    /// Renders the frame buffer as text, one line per row
    pub fn render_text(&self, on: char, off: char) -> String {
        let mut out = String::with_capacity((DISPLAY_WIDTH + 1) * DISPLAY_HEIGHT);
        for row in self.frame_buffer.iter() {
            out.extend(row.iter().map(|&cell| if cell == 1 { on } else { off }));
            out.push('\n');
        }
        out
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}
