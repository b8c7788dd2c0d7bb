/// Bytes of addressable memory.
pub const MEMORY_SIZE: usize = 4096;

/// ROMs are copied into memory starting here; everything below is reserved.
pub const ROM_START: u16 = 0x200;

/// The largest ROM that fits between `ROM_START` and the end of memory.
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - ROM_START as usize;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

pub const REGISTER_COUNT: usize = 16;
pub const STACK_SIZE: usize = 16;
pub const KEY_COUNT: usize = 16;

/// VF doubles as the carry, borrow and collision flag.
pub const FLAG: usize = 0xF;

/// Display refresh and timer frequency in Hz.
pub const FRAME_RATE: u32 = 60;

pub const DEFAULT_INSTRUCTIONS_PER_FRAME: u8 = 10;
pub const MIN_INSTRUCTIONS_PER_FRAME: u8 = 1;
pub const MAX_INSTRUCTIONS_PER_FRAME: u8 = 20;

/// Number of whole-machine snapshots kept for rewinding (ten seconds of frames).
pub const MAX_SAVED_FRAMES: usize = 600;

/// Each glyph in the sprite sheet is 5 rows tall.
pub const FONT_SPRITE_SIZE: u16 = 5;

pub const DEFAULT_FONT_BASE: u16 = 0x050;

/// Exclusive upper bound on the font base; keeps all 80 glyph bytes below `ROM_START`.
pub const MAX_FONT_BASE: u16 = 0x1B0;

/// # Sprite Sheet
/// Sprites for the hexadecimal digits 0..F, each 8 pixels wide and 5 tall.
///
/// Only the high nibble of each row is used, e.g. `0`:
/// ```text
/// 0xF0  ****
/// 0x90  *  *
/// 0x90  *  *
/// 0x90  *  *
/// 0xF0  ****
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
