use log::warn;

use crate::error::Chip8Error;
use crate::opcode::Opcode;
use crate::operations::*;
use crate::state::State;

/// How the program counter moves once an instruction has executed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProgramCounter {
    /// Step to the following instruction.
    Next,
    /// Step over the following instruction.
    Skip,
    /// Continue from the given address.
    Jump(u16),
    /// Stay on the current instruction.
    Hold,
}

impl ProgramCounter {
    pub fn apply(self, pc: u16) -> u16 {
        match self {
            ProgramCounter::Next => pc.wrapping_add(2),
            ProgramCounter::Skip => pc.wrapping_add(4),
            ProgramCounter::Jump(address) => address,
            ProgramCounter::Hold => pc,
        }
    }
}

pub type Handler = fn(op: u16, state: &mut State) -> Result<ProgramCounter, Chip8Error>;

/// A decoded opcode: the routine that implements it and a name for tracing.
#[derive(Copy, Clone)]
pub struct Instruction {
    pub mnemonic: &'static str,
    pub handler: Handler,
}

impl Instruction {
    /// Runs the instruction against `state` and moves its program counter.
    pub fn execute(&self, op: u16, state: &mut State) -> Result<(), Chip8Error> {
        let outcome = (self.handler)(op, state)?;
        state.pc = outcome.apply(state.pc);
        Ok(())
    }
}

fn instruction(mnemonic: &'static str, handler: Handler) -> Instruction {
    Instruction { mnemonic, handler }
}

const UNKNOWN: Instruction = Instruction {
    mnemonic: "???",
    handler: unknown,
};

/// Selects the correct Instruction for a given Opcode.
///
/// The family nibble picks the instruction directly except for families 0x0, 0x8, 0xE and 0xF.
/// Families 0x0, 0x8 and 0xE are decoded a second time on their last nibble, 0xF on its low byte.
/// Encodings with no instruction decode to a logged no-op.
pub fn decode(op: u16) -> Instruction {
    let (family, _, _, variant) = op.nibbles();
    match family {
        0x0 => family_0(variant),
        0x1 => instruction("JP", jump),
        0x2 => instruction("CALL", call),
        0x3 => instruction("SE", skip_eq_byte),
        0x4 => instruction("SNE", skip_ne_byte),
        0x5 => instruction("SE", skip_eq_reg),
        0x6 => instruction("LD", load_byte),
        0x7 => instruction("ADD", add_byte),
        0x8 => family_8(variant),
        0x9 => instruction("SNE", skip_ne_reg),
        0xA => instruction("LD I", load_i),
        0xB => instruction("JP V0", jump_v0),
        0xC => instruction("RND", random),
        0xD => instruction("DRW", draw),
        0xE => family_e(variant),
        0xF => family_f(op),
        _ => UNKNOWN,
    }
}

fn family_0(variant: u8) -> Instruction {
    match variant {
        0x0 => instruction("CLS", cls),
        0xE => instruction("RET", ret),
        _ => UNKNOWN,
    }
}

fn family_8(variant: u8) -> Instruction {
    match variant {
        0x0 => instruction("LD", load_reg),
        0x1 => instruction("OR", or),
        0x2 => instruction("AND", and),
        0x3 => instruction("XOR", xor),
        0x4 => instruction("ADD", add_reg),
        0x5 => instruction("SUB", sub),
        0x6 => instruction("SHR", shr),
        0x7 => instruction("SUBN", subn),
        0xE => instruction("SHL", shl),
        _ => UNKNOWN,
    }
}

fn family_e(variant: u8) -> Instruction {
    match variant {
        0xE => instruction("SKP", skip_pressed),
        0x1 => instruction("SKNP", skip_not_pressed),
        _ => UNKNOWN,
    }
}

fn family_f(op: u16) -> Instruction {
    match op.nn() {
        0x07 => instruction("LD DT", load_delay),
        0x0A => instruction("LD K", wait_key),
        0x15 => instruction("LD DT", set_delay),
        0x18 => instruction("LD ST", set_sound),
        0x1E => instruction("ADD I", add_i),
        0x29 => instruction("LD F", font),
        0x33 => instruction("LD B", bcd),
        0x55 => instruction("LD [I]", store),
        0x65 => instruction("LD Vx", read),
        _ => UNKNOWN,
    }
}

/// no instruction; carries on with the next opcode
fn unknown(op: u16, state: &mut State) -> Result<ProgramCounter, Chip8Error> {
    warn!(
        "no instruction for opcode {:04X} at {:#06X}, skipping it",
        op, state.pc
    );
    Ok(ProgramCounter::Next)
}
