use crate::constants::KEY_COUNT;

/// Bit held by each key in the latch
const KEY_MASKS: [u16; KEY_COUNT] = [
    0x0001, 0x0002, 0x0004, 0x0008, 0x0010, 0x0020, 0x0040, 0x0080, 0x0100, 0x0200, 0x0400,
    0x0800, 0x1000, 0x2000, 0x4000, 0x8000,
];

/// # Keypad
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// The latch holds one bit per key 0x0..=0xF. Pressing and releasing are
/// idempotent, and keys outside the pad are ignored and read as released.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Keypad {
    pressed: u16,
}

impl Keypad {
    pub fn new() -> Self {
        Keypad { pressed: 0 }
    }

    pub fn press(&mut self, key: u8) {
        if let Some(mask) = mask(key) {
            self.pressed |= mask;
        }
    }

    pub fn release(&mut self, key: u8) {
        if let Some(mask) = mask(key) {
            self.pressed &= !mask;
        }
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        mask(key).map_or(false, |mask| self.pressed & mask != 0)
    }

    /// The lowest-numbered key currently held, if any
    pub fn first_pressed(&self) -> Option<u8> {
        (0..KEY_COUNT as u8).find(|&key| self.is_pressed(key))
    }

    /// The raw latch, bit n set while key n is held
    pub fn bits(&self) -> u16 {
        self.pressed
    }
}

fn mask(key: u8) -> Option<u16> {
    KEY_MASKS.get(key as usize).copied()
}

#[cfg(test)]
mod test_keypad {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut keypad = Keypad::new();
        keypad.press(0xA);
        assert!(keypad.is_pressed(0xA));
        assert_eq!(keypad.bits(), 0x0400);
        keypad.release(0xA);
        assert!(!keypad.is_pressed(0xA));
        assert_eq!(keypad.bits(), 0x0);
    }

    #[test]
    fn test_press_is_idempotent() {
        let mut keypad = Keypad::new();
        keypad.press(0x3);
        keypad.press(0x3);
        assert_eq!(keypad.bits(), 0x0008);
        keypad.release(0x3);
        keypad.release(0x3);
        assert_eq!(keypad.bits(), 0x0);
    }

    #[test]
    fn test_keys_are_independent() {
        let mut keypad = Keypad::new();
        keypad.press(0x0);
        keypad.press(0xF);
        keypad.release(0x0);
        assert!(keypad.is_pressed(0xF));
        assert_eq!(keypad.bits(), 0x8000);
    }

    #[test]
    fn test_out_of_range_keys_are_ignored() {
        let mut keypad = Keypad::new();
        keypad.press(0x10);
        keypad.press(0xFF);
        assert_eq!(keypad.bits(), 0x0);
        assert!(!keypad.is_pressed(0x10));
        keypad.release(0x10);
    }

    #[test]
    fn test_first_pressed_is_lowest() {
        let mut keypad = Keypad::new();
        assert_eq!(keypad.first_pressed(), None);
        keypad.press(0xC);
        keypad.press(0x5);
        assert_eq!(keypad.first_pressed(), Some(0x5));
    }
}
