use std::fmt::Write;

use crate::constants::{FONT_START, SPRITE_SHEET};
use crate::error::{Chip8Error, Result};

/// # Bus
/// A fixed-size byte-addressable memory.
///
/// Every access is checked against the configured size; nothing wraps.
/// The sprite sheet lives at the bottom of memory and is restored by `clear`.
pub struct Bus {
    memory: Vec<u8>,
}

impl Bus {
    /// Creates a bus holding only the sprite sheet
    ///
    /// # Arguments
    /// * `size` the number of addressable bytes; callers validate it against the address space
    pub fn new(size: usize) -> Self {
        let mut bus = Bus {
            memory: vec![0; size],
        };
        bus.clear();
        bus
    }

    pub fn size(&self) -> usize {
        self.memory.len()
    }

    /// Zeroes memory and reloads the sprite sheet
    pub fn clear(&mut self) {
        self.memory.iter_mut().for_each(|byte| *byte = 0);
        let start = FONT_START as usize;
        let end = (start + SPRITE_SHEET.len()).min(self.memory.len());
        self.memory[start..end].copy_from_slice(&SPRITE_SHEET[..end - start]);
    }

    pub fn read(&self, address: usize) -> Result<u8> {
        self.memory
            .get(address)
            .copied()
            .ok_or_else(|| self.out_of_range(address))
    }

    pub fn write(&mut self, address: usize, value: u8) -> Result<()> {
        let size = self.size();
        match self.memory.get_mut(address) {
            Some(byte) => {
                *byte = value;
                Ok(())
            }
            None => Err(Chip8Error::AddressOutOfRange { address, size }),
        }
    }

    /// Borrows `len` bytes starting at `address`, failing on the first address past the end
    pub fn slice(&self, address: usize, len: usize) -> Result<&[u8]> {
        self.check_range(address, len)?;
        Ok(&self.memory[address..address + len])
    }

    /// Writes `data` starting at `address`; nothing is written if any byte would fall off the bus
    pub fn write_all(&mut self, address: usize, data: &[u8]) -> Result<()> {
        self.check_range(address, data.len())?;
        self.memory[address..address + data.len()].copy_from_slice(data);
        Ok(())
    }

    /// Reads the big-endian word at `address`
    pub fn read_word(&self, address: usize) -> Result<u16> {
        let hi = u16::from(self.read(address)?);
        let lo = u16::from(self.read(address + 1)?);
        Ok(hi << 8 | lo)
    }

    fn check_range(&self, address: usize, len: usize) -> Result<()> {
        if len == 0 {
            return Ok(());
        }
        let last = address + len - 1;
        if last >= self.size() {
            let first_bad = address.max(self.size());
            return Err(self.out_of_range(first_bad));
        }
        Ok(())
    }

    fn out_of_range(&self, address: usize) -> Chip8Error {
        Chip8Error::AddressOutOfRange {
            address,
            size: self.size(),
        }
    }

    /// Renders `rows` rows of `width` bytes starting at `start` as a hex table.
    /// Rows stop at the end of the bus.
    pub fn dump(&self, start: usize, rows: usize, width: usize) -> String {
        let mut out = String::new();
        let width = width.max(1);
        for row in 0..rows {
            let address = start + row * width;
            if address >= self.size() {
                break;
            }
            let end = (address + width).min(self.size());
            let _ = write!(out, "{:#06X} |", address);
            for byte in &self.memory[address..end] {
                let _ = write!(out, " {:02X}", byte);
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod test_bus {
    use super::*;
    use crate::constants::{FONT_END, MEMORY_SIZE};

    #[test]
    fn test_write_then_read() {
        let mut bus = Bus::new(MEMORY_SIZE);
        for address in [0x000, 0x200, 0x7FF, MEMORY_SIZE - 1] {
            bus.write(address, 0xA5).unwrap();
            assert_eq!(bus.read(address), Ok(0xA5));
        }
    }

    #[test]
    fn test_rejects_addresses_past_the_end() {
        let mut bus = Bus::new(64);
        for address in [64, 65, 0xFFFF, 0x1_0000] {
            let err = Chip8Error::AddressOutOfRange { address, size: 64 };
            assert_eq!(bus.read(address), Err(err.clone()));
            assert_eq!(bus.write(address, 0x1), Err(err));
        }
    }

    #[test]
    fn test_last_address_is_valid() {
        let mut bus = Bus::new(0x1_0000);
        bus.write(0xFFFF, 0x42).unwrap();
        assert_eq!(bus.read(0xFFFF), Ok(0x42));
    }

    #[test]
    fn test_starts_with_sprite_sheet() {
        let bus = Bus::new(MEMORY_SIZE);
        assert_eq!(bus.slice(0, FONT_END), Ok(&SPRITE_SHEET[..]));
        assert_eq!(bus.read(FONT_END), Ok(0x0));
    }

    #[test]
    fn test_clear_keeps_only_sprite_sheet() {
        let mut bus = Bus::new(MEMORY_SIZE);
        bus.write(0x0, 0x00).unwrap();
        bus.write(0x300, 0xFF).unwrap();
        bus.clear();
        assert_eq!(bus.read(0x0), Ok(SPRITE_SHEET[0]));
        assert_eq!(bus.read(0x300), Ok(0x0));
    }

    #[test]
    fn test_write_all_is_all_or_nothing() {
        let mut bus = Bus::new(0x210);
        assert_eq!(
            bus.write_all(0x20E, &[1, 2, 3]),
            Err(Chip8Error::AddressOutOfRange {
                address: 0x210,
                size: 0x210
            })
        );
        assert_eq!(bus.read(0x20E), Ok(0x0));
        assert_eq!(bus.read(0x20F), Ok(0x0));
    }

    #[test]
    fn test_reads_big_endian_words() {
        let mut bus = Bus::new(MEMORY_SIZE);
        bus.write_all(0x200, &[0xAA, 0xBB]).unwrap();
        assert_eq!(bus.read_word(0x200), Ok(0xAABB));
    }

    #[test]
    fn test_word_straddling_the_end_fails() {
        let bus = Bus::new(MEMORY_SIZE);
        assert!(bus.read_word(MEMORY_SIZE - 1).is_err());
    }

    #[test]
    fn test_dump_formats_rows() {
        let mut bus = Bus::new(MEMORY_SIZE);
        bus.write_all(0x200, &[0x60, 0x05, 0x70, 0x03]).unwrap();
        assert_eq!(bus.dump(0x200, 1, 4), "0x0200 | 60 05 70 03\n");
    }

    #[test]
    fn test_dump_stops_at_the_end() {
        let bus = Bus::new(0x100);
        assert_eq!(bus.dump(0xF8, 4, 8).lines().count(), 1);
    }
}
