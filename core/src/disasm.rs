//! Chip-8 disassembler.
//!
//! Turns raw opcodes into assembly text for trace events and program listings.
//! Words the machine would reject come out as `DW` data directives.

use crate::opcode::Opcode;

/// Format a single opcode as an assembly string (e.g. `ADD V1, V2`)
pub fn disassemble(op: u16) -> String {
    let (x, y) = (op.x(), op.y());
    let (kk, addr) = (op.byte(), op.addr());
    match op.nibbles() {
        (0x0, 0x0, 0xE, 0x0) => "CLS".into(),
        (0x0, 0x0, 0xE, 0xE) => "RET".into(),
        (0x1, ..) => format!("JP {:#05X}", addr),
        (0x2, ..) => format!("CALL {:#05X}", addr),
        (0x3, ..) => format!("SE V{:X}, {:#04X}", x, kk),
        (0x4, ..) => format!("SNE V{:X}, {:#04X}", x, kk),
        (0x5, ..) => format!("SE V{:X}, V{:X}", x, y),
        (0x6, ..) => format!("LD V{:X}, {:#04X}", x, kk),
        (0x7, ..) => format!("ADD V{:X}, {:#04X}", x, kk),
        (0x8, .., 0x0) => format!("LD V{:X}, V{:X}", x, y),
        (0x8, .., 0x1) => format!("OR V{:X}, V{:X}", x, y),
        (0x8, .., 0x2) => format!("AND V{:X}, V{:X}", x, y),
        (0x8, .., 0x3) => format!("XOR V{:X}, V{:X}", x, y),
        (0x8, .., 0x4) => format!("ADD V{:X}, V{:X}", x, y),
        (0x8, .., 0x5) => format!("SUB V{:X}, V{:X}", x, y),
        (0x8, .., 0x6) => format!("SHR V{:X}", x),
        (0x8, .., 0x7) => format!("SUBN V{:X}, V{:X}", x, y),
        (0x8, .., 0xE) => format!("SHL V{:X}", x),
        (0x9, ..) => format!("SNE V{:X}, V{:X}", x, y),
        (0xA, ..) => format!("LD I, {:#05X}", addr),
        (0xB, ..) => format!("JP V0, {:#05X}", addr),
        (0xC, ..) => format!("RND V{:X}, {:#04X}", x, kk),
        (0xD, .., n) => format!("DRW V{:X}, V{:X}, {}", x, y, n),
        (0xE, _, 0x9, 0xE) => format!("SKP V{:X}", x),
        (0xE, _, 0xA, 0x1) => format!("SKNP V{:X}", x),
        (0xF, _, 0x0, 0x7) => format!("LD V{:X}, DT", x),
        (0xF, _, 0x0, 0xA) => format!("LD V{:X}, K", x),
        (0xF, _, 0x1, 0x5) => format!("LD DT, V{:X}", x),
        (0xF, _, 0x1, 0x8) => format!("LD ST, V{:X}", x),
        (0xF, _, 0x1, 0xE) => format!("ADD I, V{:X}", x),
        (0xF, _, 0x2, 0x9) => format!("LD F, V{:X}", x),
        (0xF, _, 0x3, 0x3) => format!("LD B, V{:X}", x),
        (0xF, _, 0x5, 0x5) => format!("LD [I], V{:X}", x),
        (0xF, _, 0x6, 0x5) => format!("LD V{:X}, [I]", x),
        _ => format!("DW {:#06X}", op),
    }
}

/// Lists `program` as if it were loaded at `origin`, one instruction per line.
/// A trailing odd byte is listed as a `DB` directive.
pub fn listing(program: &[u8], origin: u16) -> Vec<String> {
    program
        .chunks(2)
        .enumerate()
        .map(|(index, word)| {
            let address = origin as usize + index * 2;
            match *word {
                [hi, lo] => {
                    let op = u16::from(hi) << 8 | u16::from(lo);
                    format!("{:#06X}: {:04X}  {}", address, op, disassemble(op))
                }
                [byte] => format!("{:#06X}: {:02X}    DB {:#04X}", address, byte, byte),
                _ => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod test_disasm {
    use super::*;

    #[test]
    fn test_system_instructions() {
        assert_eq!(disassemble(0x00E0), "CLS");
        assert_eq!(disassemble(0x00EE), "RET");
        assert_eq!(disassemble(0x0123), "DW 0x0123");
    }

    #[test]
    fn test_addresses_and_bytes() {
        assert_eq!(disassemble(0x1ABC), "JP 0xABC");
        assert_eq!(disassemble(0x2208), "CALL 0x208");
        assert_eq!(disassemble(0x6005), "LD V0, 0x05");
        assert_eq!(disassemble(0x7A03), "ADD VA, 0x03");
        assert_eq!(disassemble(0xB200), "JP V0, 0x200");
    }

    #[test]
    fn test_logical_family() {
        assert_eq!(disassemble(0x8124), "ADD V1, V2");
        assert_eq!(disassemble(0x8126), "SHR V1");
        assert_eq!(disassemble(0x812E), "SHL V1");
        assert_eq!(disassemble(0x8128), "DW 0x8128");
    }

    #[test]
    fn test_draw_and_keys() {
        assert_eq!(disassemble(0xD01F), "DRW V0, V1, 15");
        assert_eq!(disassemble(0xE39E), "SKP V3");
        assert_eq!(disassemble(0xE3A1), "SKNP V3");
        assert_eq!(disassemble(0xE3FF), "DW 0xE3FF");
        assert_eq!(disassemble(0xF50A), "LD V5, K");
    }

    #[test]
    fn test_listing() {
        let lines = listing(&[0x60, 0x05, 0x70, 0x03, 0xFF], 0x200);
        assert_eq!(
            lines,
            vec![
                "0x0200: 6005  LD V0, 0x05",
                "0x0202: 7003  ADD V0, 0x03",
                "0x0204: FF    DB 0xFF",
            ]
        );
    }
}
