use std::io;

use thiserror::Error;

/// Fatal machine errors. Any of these ends the emulation session.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("stack overflow: call at {pc:#06X} exceeds 16 nested subroutines")]
    StackOverflow { pc: u16 },

    #[error("stack underflow: return at {pc:#06X} with an empty call stack")]
    StackUnderflow { pc: u16 },

    #[error("memory access out of bounds: {len} byte(s) at {address:#06X}")]
    MemoryOutOfBounds { address: u16, len: usize },

    #[error("program counter {pc:#06X} ran past the end of memory")]
    PcOutOfBounds { pc: u16 },

    #[error(transparent)]
    Rom(#[from] RomError),
}

/// Reasons a ROM image is rejected before it reaches memory.
#[derive(Debug, Error)]
pub enum RomError {
    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    TooLarge { size: usize, max: usize },

    #[error("unable to read ROM: {0}")]
    Io(#[from] io::Error),
}

/// Invalid settings, caught before the machine is constructed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("instructions per frame must be between {min} and {max}, got {value}")]
    InstructionsPerFrame { value: u32, min: u8, max: u8 },

    #[error("font base address {value:#05X} must be below {max:#05X}")]
    FontBase { value: u16, max: u16 },

    #[error("font base address '{input}' is not a hexadecimal number")]
    FontBaseSyntax { input: String },
}
