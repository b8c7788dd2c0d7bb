use std::collections::VecDeque;

use log::{debug, trace};

use crate::config::Config;
use crate::constants::{KEY_COUNT, MAX_SAVED_FRAMES};
use crate::error::Chip8Error;
use crate::instruction::decode;
use crate::rom::Rom;
use crate::state::{FrameBuffer, KeyWait, State};

/// Receives the frame buffer once per frame.
pub trait Renderer {
    fn render(&mut self, frame: &FrameBuffer);
}

/// Receives whether a tone should be playing once per frame.
pub trait Tone {
    fn set_tone(&mut self, on: bool);
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - `previous_states` for rewinding, one per frame
///  - the validated `config` it was built with
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU by one cycle or a whole frame
/// - rewinding whole frames
/// - inspecting its frame buffer and tone for some display and speaker
pub struct Chip8 {
    state: State,
    previous_states: VecDeque<State>,
    config: Config,
}

impl Chip8 {
    pub fn new(config: Config) -> Self {
        Chip8::from_state(State::from_config(&config), config)
    }

    /// A machine whose random numbers are reproducible.
    pub fn with_seed(config: Config, seed: u64) -> Self {
        Chip8::from_state(State::with_seed(&config, seed), config)
    }

    fn from_state(state: State, config: Config) -> Self {
        Chip8 {
            state,
            previous_states: VecDeque::with_capacity(MAX_SAVED_FRAMES),
            config,
        }
    }

    /// Copies a validated ROM into memory at 0x200.
    pub fn load_rom(&mut self, rom: &Rom) {
        self.state.load_rom(rom);
        debug!("loaded {} byte ROM", rom.len());
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the hexadecimal keypad value, 0x0..=0xF
    pub fn key_down(&mut self, key: u8) {
        self.state.keypad.press(key);
    }

    /// Unset the pressed status of key
    ///
    /// A release while waiting on `FX0A` stores the key in the waiting register and resumes
    /// execution at the following opcode.
    ///
    /// # Arguments
    /// * `key` the hexadecimal keypad value, 0x0..=0xF
    pub fn key_up(&mut self, key: u8) {
        self.state.keypad.release(key);
        if let KeyWait::Waiting(register) = self.state.key_wait {
            if key as usize >= KEY_COUNT {
                return;
            }
            debug!("key {:X} released, storing it in v{:X}", key, register);
            self.state.v[register as usize] = key;
            self.state.key_wait = KeyWait::Running;
            self.state.pc = self.state.pc.wrapping_add(2);
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.state.key_wait != KeyWait::Running
    }

    /// Advances the CPU by a single cycle
    /// - does nothing while awaiting a key release
    /// - gets and executes the next opcode
    pub fn cycle(&mut self) -> Result<(), Chip8Error> {
        if self.is_waiting() {
            return Ok(());
        }
        let op = self.state.fetch()?;
        let instruction = decode(op);
        trace!(
            "{:#06X} {:04X} {:<6} v{:02X?} i{:#06X}",
            self.state.pc,
            op,
            instruction.mnemonic,
            self.state.v,
            self.state.i
        );
        instruction.execute(op, &mut self.state)
    }

    /// Decrements both timers once.
    pub fn advance_timers(&mut self) {
        self.state.decrement_timers();
    }

    /// Runs one display frame
    /// - saves the current state for rewinding
    /// - runs `instructions_per_frame` cycles
    /// - decrements the timers once
    /// - hands the frame buffer to `renderer` and the tone status to `tone`
    pub fn run_frame<R, T>(&mut self, renderer: &mut R, tone: &mut T) -> Result<(), Chip8Error>
    where
        R: Renderer + ?Sized,
        T: Tone + ?Sized,
    {
        self.save_state();
        for _ in 0..self.config.instructions_per_frame() {
            self.cycle()?;
        }
        self.advance_timers();
        renderer.render(&self.state.frame_buffer);
        tone.set_tone(self.tone());
        Ok(())
    }

    /// Restores the state from the start of the previous frame, if there is one.
    ///
    /// The keypad is left as it is now so held keys aren't replayed.
    pub fn rewind_frame(&mut self) -> bool {
        match self.previous_states.pop_front() {
            Some(mut state) => {
                state.keypad = self.state.keypad;
                self.state = state;
                true
            }
            None => {
                debug!("no earlier frames to rewind to");
                false
            }
        }
    }

    /// Puts the current state in previous_states
    /// - if there are already MAX_SAVED_FRAMES saved then the oldest is dropped
    fn save_state(&mut self) {
        if self.previous_states.len() == MAX_SAVED_FRAMES {
            self.previous_states.pop_back();
        }
        self.previous_states.push_front(self.state.clone());
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Whether the sound timer is running.
    pub fn tone(&self) -> bool {
        self.state.sound_timer > 0
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
