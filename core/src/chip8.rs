use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::audio::Buzzer;
use crate::bus::Bus;
use crate::config::Config;
use crate::constants::FONT_END;
use crate::disasm::disassemble;
use crate::display::{Display, FrameBuffer};
use crate::error::{Chip8Error, Result};
use crate::instruction::from_op;
use crate::keypad::Keypad;
use crate::opcode::Fetched;
use crate::registers::{Registers, SoundEdge};
use crate::rom::RomImage;
use crate::snapshot::Snapshot;
use crate::trace::{TraceEvent, TraceSink};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Owns:
///  - the memory `bus`, holding the sprite sheet and the loaded program
///  - the `registers`, call stack and timers
///  - the `display` buffer and the `keypad` latch
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - stepping the CPU one cycle at a time and resetting it
/// - inspecting its state and frame buffer for rendering by some display
pub struct Chip8 {
    pub(crate) bus: Bus,
    pub(crate) registers: Registers,
    pub(crate) display: Display,
    pub(crate) keypad: Keypad,
    pub(crate) rng: StdRng,
    buzzer: Option<Box<dyn Buzzer + Send>>,
    tracer: Option<Box<dyn TraceSink + Send>>,
    opcode: u16,
    image: Option<(u16, RomImage)>,
    config: Config,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::build(Config::default())
    }

    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Chip8 {
            bus: Bus::new(config.memory_size),
            registers: Registers::new(config.program_start, config.max_stack_depth),
            display: Display::new(),
            keypad: Keypad::new(),
            rng,
            buzzer: None,
            tracer: None,
            opcode: 0,
            image: None,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Installs a sink that sees every instruction before it executes
    pub fn set_trace_sink(&mut self, sink: impl TraceSink + Send + 'static) {
        self.tracer = Some(Box::new(sink));
    }

    pub fn clear_trace_sink(&mut self) {
        self.tracer = None;
    }

    pub fn set_buzzer(&mut self, buzzer: impl Buzzer + Send + 'static) {
        self.buzzer = Some(Box::new(buzzer));
    }

    /// Load a rom at the configured program start
    pub fn load_rom(&mut self, rom: &RomImage) -> Result<()> {
        self.load_rom_at(rom, self.config.program_start)
    }

    /// Load a rom at `offset`
    ///
    /// The rom is remembered and written back by every `reset`.
    /// The program counter is not moved.
    ///
    /// # Arguments
    /// * `rom` the program image
    /// * `offset` the address of its first byte; must lie above the sprite sheet
    pub fn load_rom_at(&mut self, rom: &RomImage, offset: u16) -> Result<()> {
        let start = offset as usize;
        if start < FONT_END {
            return Err(Chip8Error::invalid_image(format!(
                "offset {:#06X} would overwrite the sprite sheet",
                offset
            )));
        }
        if start + rom.len() > self.bus.size() {
            return Err(Chip8Error::invalid_image(format!(
                "{} bytes at {:#06X} do not fit in a {} byte bus",
                rom.len(),
                offset,
                self.bus.size()
            )));
        }
        self.bus.write_all(start, rom.bytes())?;
        info!("loaded {} byte ROM at {:#06X}", rom.len(), offset);
        self.image = Some((offset, rom.clone()));
        Ok(())
    }

    /// Reinitialises the machine as if it had just been powered on with the current rom.
    ///
    /// Registers, timers and the stack are zeroed, the display is cleared and
    /// memory is restored to the sprite sheet plus the loaded rom.
    /// Held keys stay held.
    pub fn reset(&mut self) {
        let was_sounding = self.buzzer_active();
        self.registers.reset();
        self.display.clear();
        self.bus.clear();
        if let Some((offset, rom)) = &self.image {
            let restored = self.bus.write_all(*offset as usize, rom.bytes());
            debug_assert!(restored.is_ok(), "image was range-checked on load");
        }
        self.opcode = 0;
        if was_sounding {
            self.stop_tone();
        }
        debug!("reset to {:#06X}", self.registers.pc);
    }

    /// Advances the CPU by a single cycle
    /// - fetches the opcode at pc and moves pc past it
    /// - decodes and executes it
    /// - ticks both timers
    ///
    /// On error the cycle is abandoned, the timers do not tick and pc is left
    /// on the offending instruction.
    pub fn step(&mut self) -> Result<()> {
        let pc = self.registers.pc;
        self.cycle(pc).map_err(|e| {
            warn!("{} at {:#06X}", e, pc);
            self.registers.pc = pc;
            e
        })
    }

    fn cycle(&mut self, pc: u16) -> Result<()> {
        let op = self.bus.read_word(pc as usize)?;
        self.opcode = op;
        self.registers.pc = pc.wrapping_add(0x2);

        let fetched = Fetched::new(op, &self.registers.v);
        let instruction = from_op(op)?;
        if let Some(tracer) = self.tracer.as_mut() {
            tracer.record(&TraceEvent {
                pc,
                opcode: op,
                mnemonic: disassemble(op),
            });
        }
        instruction(&fetched, self)?;

        if self.registers.tick_timers() == SoundEdge::Stopped {
            self.stop_tone();
        }
        Ok(())
    }

    pub(crate) fn start_tone(&mut self) {
        if let Some(buzzer) = self.buzzer.as_mut() {
            buzzer.start_tone();
        }
    }

    pub(crate) fn stop_tone(&mut self) {
        if let Some(buzzer) = self.buzzer.as_mut() {
            buzzer.stop_tone();
        }
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed; anything above 0xF is ignored
    pub fn key_press(&mut self, key: u8) {
        self.keypad.press(key);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.keypad.release(key);
    }

    pub fn is_key_pressed(&self, key: u8) -> bool {
        self.keypad.is_pressed(key)
    }

    /// Bit n is set while key n is held
    pub fn keys(&self) -> u16 {
        self.keypad.bits()
    }

    /// Returns the FrameBuffer if the display should be redrawn, clearing the draw flag
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.display.take_dirty() {
            Some(*self.display.frame_buffer())
        } else {
            None
        }
    }

    /// Whether the display changed since the last `take_frame`
    pub fn is_drawing(&self) -> bool {
        self.display.is_dirty()
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// The raw opcode most recently fetched
    pub fn opcode(&self) -> u16 {
        self.opcode
    }

    pub fn buzzer_active(&self) -> bool {
        self.registers.sound_timer > 0
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            v: self.registers.v,
            i: self.registers.i,
            sp: self.registers.sp,
            pc: self.registers.pc,
            delay_timer: self.registers.delay_timer,
            sound_timer: self.registers.sound_timer,
            opcode: self.opcode,
            stack_depth: self.registers.stack().len(),
            keys: self.keypad.bits(),
        }
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
