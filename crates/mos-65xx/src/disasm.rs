//! Stateless 65xx disassembly.
//!
//! Rendering is table-driven and format-stable: `"MNEMONIC OPERAND"`
//! with the operand grammar fixed per addressing mode (uppercase hex,
//! `#` for immediates, `$` for addresses). Debugger output and tests
//! both rely on the exact text.

use emu65_core::Bus;

use crate::table::{decode, AddrMode};

/// Render the instruction at `addr`.
///
/// Operand bytes are read back through the bus, so addresses covered by
/// read hooks render what the CPU would fetch.
pub fn disassemble<B: Bus>(bus: &mut B, addr: u16) -> String {
    let instr = decode(bus.read(addr));
    let operand = match instr.mode {
        AddrMode::Implied => String::new(),
        AddrMode::Immediate => format!(" #{:02X}", bus.read(addr.wrapping_add(1))),
        AddrMode::ZeroPage => format!(" ${:02X}", bus.read(addr.wrapping_add(1))),
        AddrMode::ZeroPageX => format!(" ${:02X},X", bus.read(addr.wrapping_add(1))),
        AddrMode::ZeroPageY => format!(" ${:02X},Y", bus.read(addr.wrapping_add(1))),
        AddrMode::Relative => format!(" ${:02X}", bus.read(addr.wrapping_add(1))),
        AddrMode::Absolute => format!(" ${:04X}", operand_word(bus, addr)),
        AddrMode::AbsoluteX => format!(" ${:04X},X", operand_word(bus, addr)),
        AddrMode::AbsoluteY => format!(" ${:04X},Y", operand_word(bus, addr)),
        AddrMode::Indirect => format!(" (${:04X})", operand_word(bus, addr)),
        AddrMode::IndirectX => format!(" (${:02X},X)", bus.read(addr.wrapping_add(1))),
        AddrMode::IndirectY => format!(" (${:02X}),Y", bus.read(addr.wrapping_add(1))),
    };

    if operand.is_empty() {
        instr.mnemonic.name().to_string()
    } else {
        format!("{} {}", instr.mnemonic.name(), operand)
    }
}

/// Render `count` lines starting at `addr`.
///
/// The byte following an Immediate-mode instruction is emitted as a
/// literal `DATA` line before decoding resumes; every other instruction
/// just advances by its byte length. Both instruction and `DATA` lines
/// count toward `count`.
pub fn disassemble_range<B: Bus>(bus: &mut B, addr: u16, count: usize) -> Vec<String> {
    let mut lines = Vec::with_capacity(count);
    let mut at = addr;
    while lines.len() < count {
        let instr = decode(bus.read(at));
        lines.push(disassemble(bus, at));
        at = at.wrapping_add(u16::from(instr.bytes));
        if instr.mode == AddrMode::Immediate && lines.len() < count {
            lines.push("DATA".to_string());
            at = at.wrapping_add(1);
        }
    }
    lines
}

fn operand_word<B: Bus>(bus: &mut B, addr: u16) -> u16 {
    let lo = bus.read(addr.wrapping_add(1));
    let hi = bus.read(addr.wrapping_add(2));
    u16::from_le_bytes([lo, hi])
}
