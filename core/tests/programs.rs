use chip8_core::constants::{DISPLAY_WIDTH, PROGRAM_START};
use chip8_core::{Chip8, Chip8Error, Config, RomImage};

fn boot(program: &[u8]) -> Chip8 {
    let mut chip8 = Chip8::with_config(Config::default().with_seed(42)).unwrap();
    chip8
        .load_rom(&RomImage::from_bytes(program.to_vec()).unwrap())
        .unwrap();
    chip8
}

fn run(chip8: &mut Chip8, steps: usize) {
    for _ in 0..steps {
        chip8.step().unwrap();
    }
}

#[test]
fn test_load_and_add() {
    let mut chip8 = boot(&[0x60, 0x05, 0x70, 0x03]);
    run(&mut chip8, 2);
    let snapshot = chip8.snapshot();
    assert_eq!(snapshot.v[0x0], 0x08);
    assert_eq!(snapshot.pc, 0x204);
}

#[test]
fn test_add_with_carry() {
    // LD V1, 0xFF; LD V2, 0x02; ADD V1, V2
    let mut chip8 = boot(&[0x61, 0xFF, 0x62, 0x02, 0x81, 0x24]);
    run(&mut chip8, 3);
    let snapshot = chip8.snapshot();
    assert_eq!(snapshot.v[0x1], 0x01);
    assert_eq!(snapshot.v[0xF], 0x1);
}

#[test]
fn test_sub_with_borrow() {
    // LD V1, 0x02; LD V2, 0x05; SUB V1, V2
    let mut chip8 = boot(&[0x61, 0x02, 0x62, 0x05, 0x81, 0x25]);
    run(&mut chip8, 3);
    let snapshot = chip8.snapshot();
    assert_eq!(snapshot.v[0x1], 0xFD);
    assert_eq!(snapshot.v[0xF], 0x0);
}

#[test]
fn test_counting_loop() {
    // 0x200 LD V0, 0x00
    // 0x202 ADD V0, 0x01
    // 0x204 SE V0, 0x0A
    // 0x206 JP 0x202
    // 0x208 JP 0x208
    let mut chip8 = boot(&[0x60, 0x00, 0x70, 0x01, 0x30, 0x0A, 0x12, 0x02, 0x12, 0x08]);
    run(&mut chip8, 1 + 10 * 3);
    let snapshot = chip8.snapshot();
    assert_eq!(snapshot.v[0x0], 0x0A);
    assert_eq!(snapshot.pc, 0x208);
}

#[test]
fn test_subroutine_round_trip() {
    // 0x200 CALL 0x206
    // 0x202 LD V1, 0x01
    // 0x204 JP 0x204
    // 0x206 LD V0, 0x07
    // 0x208 RET
    let mut chip8 = boot(&[0x22, 0x06, 0x61, 0x01, 0x12, 0x04, 0x60, 0x07, 0x00, 0xEE]);
    run(&mut chip8, 2);
    assert_eq!(chip8.snapshot().stack_depth, 1);
    run(&mut chip8, 2);
    let snapshot = chip8.snapshot();
    assert_eq!(snapshot.v[0x0], 0x07);
    assert_eq!(snapshot.v[0x1], 0x01);
    assert_eq!(snapshot.stack_depth, 0);
    assert_eq!(snapshot.pc, 0x204);
}

#[test]
fn test_runaway_recursion_overflows() {
    // 0x200 CALL 0x200
    let mut chip8 = boot(&[0x22, 0x00]);
    run(&mut chip8, 16);
    assert_eq!(chip8.step(), Err(Chip8Error::StackOverflow { depth: 16 }));
    assert_eq!(chip8.snapshot().stack_depth, 16);
}

#[test]
fn test_return_without_call_underflows() {
    let mut chip8 = boot(&[0x00, 0xEE]);
    assert_eq!(chip8.step(), Err(Chip8Error::StackUnderflow));
    assert_eq!(chip8.snapshot().pc, PROGRAM_START);
}

#[test]
fn test_draw_twice_erases_and_collides() {
    // LD I, 0x208; DRW V0, V1, 2; DRW V0, V1, 2; JP 0x206; sprite
    let mut chip8 = boot(&[0xA2, 0x08, 0xD0, 0x12, 0xD0, 0x12, 0x12, 0x06, 0xFF, 0x81]);
    run(&mut chip8, 2);
    let frame = chip8.take_frame().unwrap();
    assert_eq!(frame[0][0..8], [1; 8]);
    assert_eq!(frame[1][0..8], [1, 0, 0, 0, 0, 0, 0, 1]);
    assert_eq!(chip8.snapshot().v[0xF], 0x0);

    run(&mut chip8, 1);
    let frame = chip8.take_frame().unwrap();
    assert!(frame.iter().flatten().all(|&p| p == 0));
    assert_eq!(chip8.snapshot().v[0xF], 0x1);
}

#[test]
fn test_bcd_digits_drawn_from_font() {
    // 0x200 LD V3, 0x7B (123)
    // 0x202 LD I, 0x300
    // 0x204 LD B, V3
    // 0x206 LD V2, [I]
    // 0x208 LD F, V0
    // 0x20A DRW V4, V5, 5
    let mut chip8 = boot(&[
        0x63, 0x7B, 0xA3, 0x00, 0xF3, 0x33, 0xF2, 0x65, 0xF0, 0x29, 0xD4, 0x55,
    ]);
    run(&mut chip8, 6);
    let snapshot = chip8.snapshot();
    assert_eq!(snapshot.v[0x0..3], [1, 2, 3]);
    assert_eq!(snapshot.i, 0x5);
    // glyph for 1 is 0x20 0x60 0x20 0x20 0x70
    let frame = chip8.take_frame().unwrap();
    assert_eq!(frame[0][0..4], [0, 0, 1, 0]);
    assert_eq!(frame[1][0..4], [0, 1, 1, 0]);
    assert_eq!(frame[4][0..4], [0, 1, 1, 1]);
    assert_eq!(frame[0][DISPLAY_WIDTH - 1], 0);
}

#[test]
fn test_wait_for_key_then_continue() {
    // LD V5, K; SKP V5; JP 0x200; JP 0x206
    let mut chip8 = boot(&[0xF5, 0x0A, 0xE5, 0x9E, 0x12, 0x00, 0x12, 0x06]);
    for _ in 0..5 {
        chip8.step().unwrap();
        assert_eq!(chip8.snapshot().pc, 0x200);
    }
    chip8.key_press(0x9);
    run(&mut chip8, 3);
    let snapshot = chip8.snapshot();
    assert_eq!(snapshot.v[0x5], 0x9);
    assert_eq!(snapshot.pc, 0x206);
    assert_eq!(snapshot.keys, 0x0200);
}

#[test]
fn test_soft_reset_restarts_program() {
    let mut chip8 = boot(&[0x60, 0x05, 0x70, 0x03]);
    run(&mut chip8, 2);
    chip8.reset();
    let snapshot = chip8.snapshot();
    assert_eq!(snapshot.pc, PROGRAM_START);
    assert_eq!(snapshot.v[0x0], 0x00);
    run(&mut chip8, 2);
    assert_eq!(chip8.snapshot().v[0x0], 0x08);
}

#[test]
fn test_bad_opcode_is_reported_and_recoverable() {
    // LD V0, 0x01; DW 0xF0FF
    let mut chip8 = boot(&[0x60, 0x01, 0xF0, 0xFF]);
    run(&mut chip8, 1);
    assert_eq!(
        chip8.step(),
        Err(Chip8Error::UnknownOpcode { opcode: 0xF0FF })
    );
    assert_eq!(chip8.snapshot().pc, 0x202);
    chip8.reset();
    assert_eq!(chip8.step(), Ok(()));
}
