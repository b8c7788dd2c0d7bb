use crate::constants::{
    DEFAULT_FONT_BASE, DEFAULT_INSTRUCTIONS_PER_FRAME, MAX_FONT_BASE, MAX_INSTRUCTIONS_PER_FRAME,
    MIN_INSTRUCTIONS_PER_FRAME,
};
use crate::error::ConfigError;

/// What to do when the program counter runs off the end of memory.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PcOverflowPolicy {
    /// Log a warning and restart execution at the ROM load address.
    Reset,
    /// Treat it as a fatal machine error.
    Fault,
}

impl Default for PcOverflowPolicy {
    fn default() -> Self {
        PcOverflowPolicy::Reset
    }
}

/// # Config
/// Validated settings for a single emulation session.
///
/// A `Config` can only be built through `Config::new` (or `Default`), so holding one means every
/// value is already in range.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    instructions_per_frame: u8,
    font_base: u16,
    pc_policy: PcOverflowPolicy,
}

impl Config {
    /// Validates raw settings.
    ///
    /// # Arguments
    /// * `instructions_per_frame` cpu cycles run between timer decrements, 1..=20
    /// * `font_base` address of the first glyph; the 80 byte sheet must end below 0x200
    /// * `pc_policy` handling of a program counter that runs past the end of memory
    pub fn new(
        instructions_per_frame: u32,
        font_base: u16,
        pc_policy: PcOverflowPolicy,
    ) -> Result<Self, ConfigError> {
        let ipf_range = u32::from(MIN_INSTRUCTIONS_PER_FRAME)..=u32::from(MAX_INSTRUCTIONS_PER_FRAME);
        if !ipf_range.contains(&instructions_per_frame) {
            return Err(ConfigError::InstructionsPerFrame {
                value: instructions_per_frame,
                min: MIN_INSTRUCTIONS_PER_FRAME,
                max: MAX_INSTRUCTIONS_PER_FRAME,
            });
        }
        if font_base >= MAX_FONT_BASE {
            return Err(ConfigError::FontBase {
                value: font_base,
                max: MAX_FONT_BASE,
            });
        }
        Ok(Config {
            instructions_per_frame: instructions_per_frame as u8,
            font_base,
            pc_policy,
        })
    }

    pub fn instructions_per_frame(&self) -> u8 {
        self.instructions_per_frame
    }

    pub fn font_base(&self) -> u16 {
        self.font_base
    }

    pub fn pc_policy(&self) -> PcOverflowPolicy {
        self.pc_policy
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            instructions_per_frame: DEFAULT_INSTRUCTIONS_PER_FRAME,
            font_base: DEFAULT_FONT_BASE,
            pc_policy: PcOverflowPolicy::Reset,
        }
    }
}

/// Parses a font base address written in hex, with or without a `0x` prefix (e.g. `050`).
///
/// Only the syntax is checked here; `Config::new` checks the range.
pub fn parse_font_base(input: &str) -> Result<u16, ConfigError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    u16::from_str_radix(digits, 16).map_err(|_| ConfigError::FontBaseSyntax {
        input: input.to_string(),
    })
}
