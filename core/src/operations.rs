use rand::Rng;

use crate::chip8::Chip8;
use crate::constants::{FONT_START, GLYPH_SIZE};
use crate::error::Result;
use crate::opcode::{Fetched, Opcode};

// Every handler runs with pc already pointing past its own opcode.

fn skip_if(chip8: &mut Chip8, condition: bool) {
    if condition {
        chip8.registers.pc = chip8.registers.pc.wrapping_add(0x2);
    }
}

fn set_vx(op: &Fetched, chip8: &mut Chip8, value: u8) {
    chip8.registers.v[op.op.x() as usize] = value;
}

/// Sets VF before the result so that the result wins when x is 0xF
fn set_vx_with_flag(op: &Fetched, chip8: &mut Chip8, value: u8, flag: bool) {
    chip8.registers.v[0xF] = flag as u8;
    set_vx(op, chip8, value);
}

/// clear
pub fn clr(_op: &Fetched, chip8: &mut Chip8) -> Result<()> {
    chip8.display.clear();
    Ok(())
}

/// PC = STACK.pop()
pub fn rts(_op: &Fetched, chip8: &mut Chip8) -> Result<()> {
    chip8.registers.pc = chip8.registers.pop()?;
    Ok(())
}

/// PC = addr
pub fn jump(op: &Fetched, chip8: &mut Chip8) -> Result<()> {
    chip8.registers.pc = op.op.addr();
    Ok(())
}

/// STACK.push(PC); PC = addr
pub fn call(op: &Fetched, chip8: &mut Chip8) -> Result<()> {
    let pc = chip8.registers.pc;
    chip8.registers.push(pc)?;
    chip8.registers.pc = op.op.addr();
    Ok(())
}

/// if Vx == kk then pc += 2
pub fn ske(op: &Fetched, chip8: &mut Chip8) -> Result<()> {
    skip_if(chip8, op.vx == op.op.byte());
    Ok(())
}

/// if Vx != kk then pc += 2
pub fn skne(op: &Fetched, chip8: &mut Chip8) -> Result<()> {
    skip_if(chip8, op.vx != op.op.byte());
    Ok(())
}

/// if Vx == Vy then pc += 2
pub fn skre(op: &Fetched, chip8: &mut Chip8) -> Result<()> {
    skip_if(chip8, op.vx == op.vy);
    Ok(())
}

/// Vx = kk
pub fn load(op: &Fetched, chip8: &mut Chip8) -> Result<()> {
    set_vx(op, chip8, op.op.byte());
    Ok(())
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(op: &Fetched, chip8: &mut Chip8) -> Result<()> {
    set_vx(op, chip8, op.vx.wrapping_add(op.op.byte()));
    Ok(())
}

/// Vx = Vy
pub fn mv(op: &Fetched, chip8: &mut Chip8) -> Result<()> {
    set_vx(op, chip8, op.vy);
    Ok(())
}

/// Vx |= Vy
pub fn or(op: &Fetched, chip8: &mut Chip8) -> Result<()> {
    set_vx(op, chip8, op.vx | op.vy);
    Ok(())
}

/// Vx &= Vy
pub fn and(op: &Fetched, chip8: &mut Chip8) -> Result<()> {
    set_vx(op, chip8, op.vx & op.vy);
    Ok(())
}

/// Vx ^= Vy
pub fn xor(op: &Fetched, chip8: &mut Chip8) -> Result<()> {
    set_vx(op, chip8, op.vx ^ op.vy);
    Ok(())
}

/// Vx += Vy; VF = overflow
pub fn addr(op: &Fetched, chip8: &mut Chip8) -> Result<()> {
    let (res, over) = op.vx.overflowing_add(op.vy);
    set_vx_with_flag(op, chip8, res, over);
    Ok(())
}

/// Vx -= Vy; VF = !underflow
pub fn sub(op: &Fetched, chip8: &mut Chip8) -> Result<()> {
    let (res, under) = op.vx.overflowing_sub(op.vy);
    set_vx_with_flag(op, chip8, res, !under);
    Ok(())
}

/// Vx /= 2; VF = underflow
/// Shifts the value Vx held at fetch; Vy is ignored
pub fn shr(op: &Fetched, chip8: &mut Chip8) -> Result<()> {
    set_vx_with_flag(op, chip8, op.vx >> 1, op.vx & 0x1 == 0x1);
    Ok(())
}

/// Vx = Vy - Vx; VF = !underflow
pub fn subn(op: &Fetched, chip8: &mut Chip8) -> Result<()> {
    let (res, under) = op.vy.overflowing_sub(op.vx);
    set_vx_with_flag(op, chip8, res, !under);
    Ok(())
}

/// Vx *= 2; VF = overflow
/// Shifts the value Vx held at fetch; Vy is ignored
pub fn shl(op: &Fetched, chip8: &mut Chip8) -> Result<()> {
    set_vx_with_flag(op, chip8, op.vx << 1, op.vx & 0x80 == 0x80);
    Ok(())
}

/// if Vx != Vy then pc += 2
pub fn skrne(op: &Fetched, chip8: &mut Chip8) -> Result<()> {
    skip_if(chip8, op.vx != op.vy);
    Ok(())
}

/// I = addr
pub fn loadi(op: &Fetched, chip8: &mut Chip8) -> Result<()> {
    chip8.registers.i = op.op.addr();
    Ok(())
}

/// PC = V0 + addr
pub fn jumpi(op: &Fetched, chip8: &mut Chip8) -> Result<()> {
    chip8.registers.pc = u16::from(chip8.registers.v[0x0]) + op.op.addr();
    Ok(())
}

/// Vx = rand_byte & kk
pub fn rand(op: &Fetched, chip8: &mut Chip8) -> Result<()> {
    let rand_byte: u8 = chip8.rng.gen();
    set_vx(op, chip8, rand_byte & op.op.byte());
    Ok(())
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position x, y on the FrameBuffer without wrapping.
/// Sets VF if any pixels were erased
pub fn draw(op: &Fetched, chip8: &mut Chip8) -> Result<()> {
    let rows = chip8
        .bus
        .slice(chip8.registers.i as usize, op.op.n() as usize)?;
    let collision = chip8
        .display
        .draw_sprite(op.vx as usize, op.vy as usize, rows);
    chip8.registers.v[0xF] = collision as u8;
    Ok(())
}

/// if Vx.pressed then pc += 2
pub fn skpr(op: &Fetched, chip8: &mut Chip8) -> Result<()> {
    let pressed = chip8.keypad.is_pressed(op.vx);
    skip_if(chip8, pressed);
    Ok(())
}

/// if !Vx.pressed then pc += 2
pub fn skup(op: &Fetched, chip8: &mut Chip8) -> Result<()> {
    let pressed = chip8.keypad.is_pressed(op.vx);
    skip_if(chip8, !pressed);
    Ok(())
}

/// Vx = DT
pub fn moved(op: &Fetched, chip8: &mut Chip8) -> Result<()> {
    let delay = chip8.registers.delay_timer;
    set_vx(op, chip8, delay);
    Ok(())
}

/// await keypress for Vx
/// With nothing held the pc is wound back so this opcode runs again next cycle
pub fn keyd(op: &Fetched, chip8: &mut Chip8) -> Result<()> {
    match chip8.keypad.first_pressed() {
        Some(key) => set_vx(op, chip8, key),
        None => chip8.registers.pc = chip8.registers.pc.wrapping_sub(0x2),
    }
    Ok(())
}

/// DT = Vx
pub fn loads(op: &Fetched, chip8: &mut Chip8) -> Result<()> {
    chip8.registers.delay_timer = op.vx;
    Ok(())
}

/// ST = Vx
pub fn ld(op: &Fetched, chip8: &mut Chip8) -> Result<()> {
    let was_sounding = chip8.registers.sound_timer > 0;
    chip8.registers.sound_timer = op.vx;
    match (was_sounding, op.vx > 0) {
        (false, true) => chip8.start_tone(),
        (true, false) => chip8.stop_tone(),
        _ => {}
    }
    Ok(())
}

/// I += Vx
pub fn addi(op: &Fetched, chip8: &mut Chip8) -> Result<()> {
    chip8.registers.i = chip8.registers.i.wrapping_add(u16::from(op.vx));
    Ok(())
}

/// I = Vx * 5
/// Set I to the memory address of the sprite for the low nibble of Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(op: &Fetched, chip8: &mut Chip8) -> Result<()> {
    chip8.registers.i = FONT_START + u16::from(op.vx & 0xF) * GLYPH_SIZE;
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(op: &Fetched, chip8: &mut Chip8) -> Result<()> {
    let bcd = [op.vx / 100 % 10, op.vx / 10 % 10, op.vx % 10];
    chip8.bus.write_all(chip8.registers.i as usize, &bcd)
}

/// mem[I..=I+x] = V0..=Vx
/// I is not advanced
pub fn stor(op: &Fetched, chip8: &mut Chip8) -> Result<()> {
    let x = op.op.x() as usize;
    chip8
        .bus
        .write_all(chip8.registers.i as usize, &chip8.registers.v[..=x])
}

/// V0..=Vx = mem[I..=I+x]
/// I is not advanced
pub fn read(op: &Fetched, chip8: &mut Chip8) -> Result<()> {
    let x = op.op.x() as usize;
    let data = chip8.bus.slice(chip8.registers.i as usize, x + 1)?;
    chip8.registers.v[..=x].copy_from_slice(data);
    Ok(())
}
