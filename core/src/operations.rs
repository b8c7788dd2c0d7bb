use log::debug;

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FLAG, FONT_SPRITE_SIZE};
use crate::error::Chip8Error;
use crate::instruction::ProgramCounter;
use crate::opcode::Opcode;
use crate::state::{KeyWait, State};

type Outcome = Result<ProgramCounter, Chip8Error>;

fn skip_if(condition: bool) -> Outcome {
    Ok(if condition {
        ProgramCounter::Skip
    } else {
        ProgramCounter::Next
    })
}

/// clear
pub fn cls(_op: u16, state: &mut State) -> Outcome {
    state.frame_buffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    Ok(ProgramCounter::Next)
}

/// PC = STACK.pop()
pub fn ret(_op: u16, state: &mut State) -> Outcome {
    Ok(ProgramCounter::Jump(state.pop()?))
}

/// PC = addr
pub fn jump(op: u16, _state: &mut State) -> Outcome {
    Ok(ProgramCounter::Jump(op.nnn()))
}

/// STACK.push(PC + 2); PC = addr
pub fn call(op: u16, state: &mut State) -> Outcome {
    state.push(state.pc.wrapping_add(2))?;
    Ok(ProgramCounter::Jump(op.nnn()))
}

/// if Vx == nn then skip
pub fn skip_eq_byte(op: u16, state: &mut State) -> Outcome {
    skip_if(state.v[op.x() as usize] == op.nn())
}

/// if Vx != nn then skip
pub fn skip_ne_byte(op: u16, state: &mut State) -> Outcome {
    skip_if(state.v[op.x() as usize] != op.nn())
}

/// if Vx == Vy then skip
pub fn skip_eq_reg(op: u16, state: &mut State) -> Outcome {
    skip_if(state.v[op.x() as usize] == state.v[op.y() as usize])
}

/// Vx = nn
pub fn load_byte(op: u16, state: &mut State) -> Outcome {
    state.v[op.x() as usize] = op.nn();
    Ok(ProgramCounter::Next)
}

/// Vx += nn
/// Overflow wraps and leaves VF untouched
pub fn add_byte(op: u16, state: &mut State) -> Outcome {
    let x = op.x() as usize;
    state.v[x] = state.v[x].wrapping_add(op.nn());
    Ok(ProgramCounter::Next)
}

/// Vx = Vy
pub fn load_reg(op: u16, state: &mut State) -> Outcome {
    state.v[op.x() as usize] = state.v[op.y() as usize];
    Ok(ProgramCounter::Next)
}

/// Vx |= Vy
pub fn or(op: u16, state: &mut State) -> Outcome {
    state.v[op.x() as usize] |= state.v[op.y() as usize];
    Ok(ProgramCounter::Next)
}

/// Vx &= Vy
pub fn and(op: u16, state: &mut State) -> Outcome {
    state.v[op.x() as usize] &= state.v[op.y() as usize];
    Ok(ProgramCounter::Next)
}

/// Vx ^= Vy
pub fn xor(op: u16, state: &mut State) -> Outcome {
    state.v[op.x() as usize] ^= state.v[op.y() as usize];
    Ok(ProgramCounter::Next)
}

/// Vx += Vy; VF = carry
pub fn add_reg(op: u16, state: &mut State) -> Outcome {
    let (res, over) = state.v[op.x() as usize].overflowing_add(state.v[op.y() as usize]);
    state.v[op.x() as usize] = res;
    state.v[FLAG] = over as u8;
    Ok(ProgramCounter::Next)
}

/// Vx -= Vy; VF = Vx > Vy
pub fn sub(op: u16, state: &mut State) -> Outcome {
    let (vx, vy) = (state.v[op.x() as usize], state.v[op.y() as usize]);
    state.v[op.x() as usize] = vx.wrapping_sub(vy);
    state.v[FLAG] = (vx > vy) as u8;
    Ok(ProgramCounter::Next)
}

/// Vx >>= 1; VF = the bit shifted out
pub fn shr(op: u16, state: &mut State) -> Outcome {
    let vx = state.v[op.x() as usize];
    state.v[op.x() as usize] = vx >> 1;
    state.v[FLAG] = vx & 0x1;
    Ok(ProgramCounter::Next)
}

/// Vx = Vy - Vx; VF = Vy > Vx
pub fn subn(op: u16, state: &mut State) -> Outcome {
    let (vx, vy) = (state.v[op.x() as usize], state.v[op.y() as usize]);
    state.v[op.x() as usize] = vy.wrapping_sub(vx);
    state.v[FLAG] = (vy > vx) as u8;
    Ok(ProgramCounter::Next)
}

/// Vx <<= 1; VF = the bit shifted out
pub fn shl(op: u16, state: &mut State) -> Outcome {
    let vx = state.v[op.x() as usize];
    state.v[op.x() as usize] = vx << 1;
    state.v[FLAG] = vx >> 7;
    Ok(ProgramCounter::Next)
}

/// if Vx != Vy then skip
pub fn skip_ne_reg(op: u16, state: &mut State) -> Outcome {
    skip_if(state.v[op.x() as usize] != state.v[op.y() as usize])
}

/// I = addr
pub fn load_i(op: u16, state: &mut State) -> Outcome {
    state.i = op.nnn();
    Ok(ProgramCounter::Next)
}

/// PC = V0 + addr
pub fn jump_v0(op: u16, state: &mut State) -> Outcome {
    Ok(ProgramCounter::Jump(op.nnn() + u16::from(state.v[0x0])))
}

/// Vx = rand_byte & nn
pub fn random(op: u16, state: &mut State) -> Outcome {
    state.v[op.x() as usize] = state.random_byte() & op.nn();
    Ok(ProgramCounter::Next)
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position x, y on the FrameBuffer with wrapping.
/// Sets VF if any pixels are erased; a zero row sprite reads no memory and clears VF
pub fn draw(op: u16, state: &mut State) -> Outcome {
    if op.n() == 0 {
        state.v[FLAG] = 0;
        return Ok(ProgramCounter::Next);
    }
    let rows = state.memory_range(state.i, op.n() as usize)?;
    let origin_x = state.v[op.x() as usize] as usize;
    let origin_y = state.v[op.y() as usize] as usize;

    let mut collision = 0;
    for (row, address) in rows.enumerate() {
        let sprite_byte = state.memory[address];
        let y = (origin_y + row) % DISPLAY_HEIGHT;
        for bit in 0..8 {
            let x = (origin_x + bit) % DISPLAY_WIDTH;
            let pixel = (sprite_byte >> (7 - bit)) & 1;
            collision |= pixel & state.frame_buffer[y][x];
            state.frame_buffer[y][x] ^= pixel;
        }
    }

    state.v[FLAG] = collision;
    Ok(ProgramCounter::Next)
}

/// if Vx.pressed then skip
/// Only the low nibble of Vx names the key, so 0x1E tests key E
pub fn skip_pressed(op: u16, state: &mut State) -> Outcome {
    let key = state.v[op.x() as usize] & 0xF;
    skip_if(state.keypad.is_pressed(key))
}

/// if !Vx.pressed then skip
/// Only the low nibble of Vx names the key
pub fn skip_not_pressed(op: u16, state: &mut State) -> Outcome {
    let key = state.v[op.x() as usize] & 0xF;
    skip_if(!state.keypad.is_pressed(key))
}

/// Vx = DT
pub fn load_delay(op: u16, state: &mut State) -> Outcome {
    state.v[op.x() as usize] = state.delay_timer;
    Ok(ProgramCounter::Next)
}

/// await key release for Vx
/// The pc stays on this opcode until the gate is reopened by a key release.
pub fn wait_key(op: u16, state: &mut State) -> Outcome {
    debug!("waiting for a key release to store in v{:X}", op.x());
    state.key_wait = KeyWait::Waiting(op.x());
    Ok(ProgramCounter::Hold)
}

/// DT = Vx
pub fn set_delay(op: u16, state: &mut State) -> Outcome {
    state.delay_timer = state.v[op.x() as usize];
    Ok(ProgramCounter::Next)
}

/// ST = Vx
pub fn set_sound(op: u16, state: &mut State) -> Outcome {
    state.sound_timer = state.v[op.x() as usize];
    Ok(ProgramCounter::Next)
}

/// I += Vx
pub fn add_i(op: u16, state: &mut State) -> Outcome {
    state.i = state.i.wrapping_add(u16::from(state.v[op.x() as usize]));
    Ok(ProgramCounter::Next)
}

/// I = font_base + Vx * 5
/// Set I to the memory address of the glyph for the digit in Vx
pub fn font(op: u16, state: &mut State) -> Outcome {
    let digit = u16::from(state.v[op.x() as usize] & 0xF);
    state.i = state.font_base + digit * FONT_SPRITE_SIZE;
    Ok(ProgramCounter::Next)
}

/// mem[I..I+3] = bcd(Vx)
/// Store the decimal digits of Vx in memory starting at address i
pub fn bcd(op: u16, state: &mut State) -> Outcome {
    let vx = state.v[op.x() as usize];
    let digits = [vx / 100, vx / 10 % 10, vx % 10];
    let range = state.memory_range(state.i, digits.len())?;
    state.memory[range].copy_from_slice(&digits);
    Ok(ProgramCounter::Next)
}

/// mem[I..=I+x] = V0..=Vx
pub fn store(op: u16, state: &mut State) -> Outcome {
    let count = op.x() as usize + 1;
    let range = state.memory_range(state.i, count)?;
    state.memory[range].copy_from_slice(&state.v[..count]);
    Ok(ProgramCounter::Next)
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(op: u16, state: &mut State) -> Outcome {
    let count = op.x() as usize + 1;
    let range = state.memory_range(state.i, count)?;
    state.v[..count].copy_from_slice(&state.memory[range]);
    Ok(ProgramCounter::Next)
}
