pub use chip8::{Chip8, Renderer, Tone};
pub use clock::FrameClock;
pub use config::{parse_font_base, Config, PcOverflowPolicy};
pub use constants::FRAME_RATE;
pub use error::{Chip8Error, ConfigError, RomError};
pub use rom::Rom;

mod chip8;
mod clock;
mod config;
pub mod constants;
mod error;
mod instruction;
mod opcode;
mod operations;
mod rom;
pub mod state;
