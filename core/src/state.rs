use std::ops::Range;

use log::warn;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{Config, PcOverflowPolicy};
use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, KEY_COUNT, MEMORY_SIZE, REGISTER_COUNT, ROM_START,
    SPRITE_SHEET, STACK_SIZE,
};
use crate::error::Chip8Error;
use crate::rom::Rom;

/// The FrameBuffer is indexed as [y][x]; every cell is either 0 (off) or 1 (on).
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// Whether opcodes are currently being executed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyWait {
    Running,
    /// An `FX0A` is waiting for a key release to store in the given register.
    Waiting(u8),
}

/// # Keypad
/// The pressed status of the 16 hexadecimal keys.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; KEY_COUNT],
}

impl Keypad {
    /// Marks `key` as held down. Keys outside 0x0..=0xF are ignored.
    pub fn press(&mut self, key: u8) {
        self.set(key, true);
    }

    /// Marks `key` as released. Keys outside 0x0..=0xF are ignored.
    pub fn release(&mut self, key: u8) {
        self.set(key, false);
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }

    /// The keys that are currently held down, in ascending order.
    pub fn pressed(&self) -> impl Iterator<Item = u8> + '_ {
        (0..KEY_COUNT as u8).filter(move |&k| self.is_pressed(k))
    }

    fn set(&mut self, key: u8, pressed: bool) {
        match self.keys.get_mut(key as usize) {
            Some(slot) => *slot = pressed,
            None => warn!("ignoring out of range key {:#04X}", key),
        }
    }
}

/// A snapshot of the Chip-8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry, borrow and collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Pointer
/// - (sp) the number of return addresses currently on the stack
///
/// Timers
/// - 2 8-bit timers (delay & sound), decremented once per frame
/// - A tone plays while the sound timer is non-zero
///
/// ## Memory
/// - 16 entry stack of return addresses
/// - 4096 bytes of addressable memory
///     - 0x000..0x200 is reserved; the sprite sheet lives at `font_base`
///     - ROMs are loaded at 0x200
/// - 64x32 frame buffer
///
/// ## Input
/// - the pressed status of keys 0..F
/// - opcode execution halts while `key_wait` is `Waiting`
#[derive(Clone, Debug)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_SIZE],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub keypad: Keypad,
    pub key_wait: KeyWait,
    pub font_base: u16,
    pub pc_policy: PcOverflowPolicy,
    rng: StdRng,
}

impl State {
    /// A fresh state using the default config and an entropy-seeded random source.
    pub fn new() -> Self {
        State::from_config(&Config::default())
    }

    pub fn from_config(config: &Config) -> Self {
        State::with_rng(config, StdRng::from_entropy())
    }

    /// A state whose `CXNN` results are reproducible.
    pub fn with_seed(config: &Config, seed: u64) -> Self {
        State::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &Config, rng: StdRng) -> Self {
        let font_base = config.font_base();
        let mut memory = [0; MEMORY_SIZE];
        let start = font_base as usize;
        memory[start..start + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: ROM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_SIZE],
            memory,
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            keypad: Keypad::default(),
            key_wait: KeyWait::Running,
            font_base,
            pc_policy: config.pc_policy(),
            rng,
        }
    }

    /// Copies a program into memory at `ROM_START`.
    pub fn load_rom(&mut self, rom: &Rom) {
        let start = ROM_START as usize;
        self.memory[start..start + rom.len()].copy_from_slice(rom.bytes());
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    ///
    /// A pc without room for a whole opcode is handled according to `pc_policy`.
    pub fn fetch(&mut self) -> Result<u16, Chip8Error> {
        if self.pc as usize + 1 >= MEMORY_SIZE {
            match self.pc_policy {
                PcOverflowPolicy::Reset => {
                    warn!(
                        "pc {:#06X} ran past the end of memory, resetting to {:#06X}",
                        self.pc, ROM_START
                    );
                    self.pc = ROM_START;
                }
                PcOverflowPolicy::Fault => return Err(Chip8Error::PcOutOfBounds { pc: self.pc }),
            }
        }
        let high = u16::from(self.memory[self.pc as usize]);
        let low = u16::from(self.memory[self.pc as usize + 1]);
        Ok(high << 8 | low)
    }

    /// Pushes a return address.
    pub fn push(&mut self, address: u16) -> Result<(), Chip8Error> {
        let slot = self
            .stack
            .get_mut(self.sp as usize)
            .ok_or(Chip8Error::StackOverflow { pc: self.pc })?;
        *slot = address;
        self.sp += 1;
        Ok(())
    }

    /// Pops the most recent return address.
    pub fn pop(&mut self) -> Result<u16, Chip8Error> {
        if self.sp == 0 {
            return Err(Chip8Error::StackUnderflow { pc: self.pc });
        }
        self.sp -= 1;
        Ok(self.stack[self.sp as usize])
    }

    /// Bounds checks a `len` byte access starting at `start`.
    pub fn memory_range(&self, start: u16, len: usize) -> Result<Range<usize>, Chip8Error> {
        let start_index = start as usize;
        let end = start_index + len;
        if end > MEMORY_SIZE {
            return Err(Chip8Error::MemoryOutOfBounds {
                address: start,
                len,
            });
        }
        Ok(start_index..end)
    }

    pub fn random_byte(&mut self) -> u8 {
        self.rng.gen()
    }

    /// Decrements both timers towards zero.
    pub fn decrement_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
