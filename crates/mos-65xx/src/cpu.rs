//! 65xx CPU: clock driver, interrupt sequences, host control surface.
//!
//! The engine is instruction-cycle accurate: all of an instruction's
//! work happens on its first cycle (fetch, decode, address resolution,
//! execution), and the remaining cycles of its budget burn down one per
//! `tick()`. Cycle totals per instruction therefore match the published
//! reference; intra-instruction bus timing is not modeled.

use emu65_core::{Bus, Cpu};

use crate::flags;
use crate::registers::Registers;
use crate::table::{decode, Instruction};

/// Which member of the 6502 family is being emulated.
///
/// The variants differ in ROR behavior (early NMOS parts carry the
/// documented shift-left bug) and in whether the decimal flag has any
/// effect (the NES 2A03 ignores it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Original NMOS 6502.
    #[default]
    Nmos,
    /// CMOS 65C02.
    Cmos,
    /// Ricoh 2A03 (NES): no decimal mode.
    Nes,
}

/// Execution state, exposed for observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecState {
    /// Powered on but not yet reset; `tick()` does nothing.
    Stopped,
    /// Fetching an opcode byte.
    Fetching,
    /// Executing instruction cycles.
    Executing,
    /// Servicing an IRQ/NMI/RESET sequence.
    Interrupt,
    /// The last fetched opcode was undocumented (executed as a no-op).
    IllegalOpcode,
}

/// How the page-cross extra cycle from the addressing mode combines
/// with the instruction's own extra-cycle flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PenaltyRule {
    /// Charge the extra cycle only when both the mode and the
    /// instruction report one. This matches the reference cycle
    /// counts: modes report a crossing, instructions report
    /// eligibility.
    #[default]
    Both,
    /// Charge it when either side reports one. Compatibility knob for
    /// hosts that need the looser accounting.
    Either,
}

/// The MOS 6502/65C02/2A03 CPU.
///
/// All mutable machine state lives in this value and the bus passed to
/// each call, so multiple CPUs can coexist and tests stay independent.
#[derive(Debug)]
pub struct Mos65xx {
    /// CPU registers.
    pub regs: Registers,

    variant: Variant,
    penalty: PenaltyRule,
    pub(crate) state: ExecState,

    /// Current opcode being executed.
    pub(crate) opcode: u8,
    /// Operand byte latched by the resolver or `fetch_operand`.
    pub(crate) fetched: u8,
    /// Effective address of the current instruction.
    pub(crate) addr_abs: u16,
    /// Sign-extended branch offset.
    pub(crate) addr_rel: u16,
    /// Cycles left in the current instruction.
    pub(crate) cycles: u8,
    /// Descriptor of the instruction being executed.
    pub(crate) current: Option<&'static Instruction>,
    /// Address the current instruction was fetched from.
    pub(crate) instr_pc: u16,

    /// Total cycles executed since reset.
    total_cycles: u64,
}

impl Default for Mos65xx {
    fn default() -> Self {
        Self::new()
    }
}

impl Mos65xx {
    /// Create a new CPU. It stays in [`ExecState::Stopped`] until
    /// `reset()` runs.
    #[must_use]
    pub fn new() -> Self {
        Self {
            regs: Registers::new(),
            variant: Variant::default(),
            penalty: PenaltyRule::default(),
            state: ExecState::Stopped,
            opcode: 0,
            fetched: 0,
            addr_abs: 0,
            addr_rel: 0,
            cycles: 0,
            current: None,
            instr_pc: 0,
            total_cycles: 0,
        }
    }

    /// Create a new CPU emulating the given variant.
    #[must_use]
    pub fn with_variant(variant: Variant) -> Self {
        let mut cpu = Self::new();
        cpu.variant = variant;
        cpu
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Select the emulated variant. Only well-defined at instruction
    /// boundaries.
    pub fn set_variant(&mut self, variant: Variant) {
        self.variant = variant;
    }

    #[must_use]
    pub fn penalty_rule(&self) -> PenaltyRule {
        self.penalty
    }

    pub fn set_penalty_rule(&mut self, rule: PenaltyRule) {
        self.penalty = rule;
    }

    #[must_use]
    pub fn state(&self) -> ExecState {
        self.state
    }

    /// Total cycles executed since reset.
    #[must_use]
    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    /// True when the current instruction has burned all its cycles and
    /// the next `tick()` will fetch.
    #[must_use]
    pub fn is_instruction_complete(&self) -> bool {
        self.cycles == 0
    }

    /// Descriptor of the most recently fetched instruction.
    #[must_use]
    pub fn current_instruction(&self) -> Option<&'static Instruction> {
        self.current
    }

    /// Disassemble the most recently fetched instruction.
    ///
    /// This renders from the instruction's address, so it reads the
    /// opcode and operand bytes back through the bus.
    pub fn disassemble_current<B: Bus>(&self, bus: &mut B) -> Option<String> {
        self.current
            .map(|_| crate::disasm::disassemble(bus, self.instr_pc))
    }

    /// Whether ADC/SBC run their BCD correction.
    pub(crate) fn decimal_enabled(&self) -> bool {
        self.regs.p.get(flags::D) && self.variant != Variant::Nes
    }

    /// Push a byte onto the page-1 stack.
    pub fn push_byte(&mut self, bus: &mut impl Bus, value: u8) {
        let addr = self.regs.push();
        bus.write(addr, value);
    }

    /// Pop a byte from the page-1 stack.
    pub fn pop_byte(&mut self, bus: &mut impl Bus) -> u8 {
        let addr = self.regs.pop();
        bus.read(addr)
    }

    /// Push a 16-bit word, high byte first.
    pub fn push_word(&mut self, bus: &mut impl Bus, value: u16) {
        self.push_byte(bus, (value >> 8) as u8);
        self.push_byte(bus, value as u8);
    }

    /// Pop a 16-bit word, low byte first.
    pub fn pop_word(&mut self, bus: &mut impl Bus) -> u16 {
        let lo = self.pop_byte(bus);
        let hi = self.pop_byte(bus);
        u16::from_le_bytes([lo, hi])
    }

    /// Shared IRQ/NMI entry: frame the interrupted PC and status, mask
    /// further IRQs, vector, and charge the sequence's cycles on top of
    /// whatever remains of the current instruction.
    fn service_interrupt(&mut self, bus: &mut impl Bus, vector: u16, sequence_cycles: u8) {
        self.state = ExecState::Interrupt;
        self.push_word(bus, self.regs.pc);
        let p = self.regs.p.for_push(false);
        self.push_byte(bus, p);
        self.regs.p.set(flags::I);
        self.regs.pc = Self::read_word(bus, vector);
        self.cycles += sequence_cycles;
    }
}

impl<B: Bus> Cpu<B> for Mos65xx {
    fn tick(&mut self, bus: &mut B) {
        if self.state == ExecState::Stopped {
            return;
        }

        if self.cycles == 0 {
            self.state = ExecState::Fetching;
            self.instr_pc = self.regs.pc;
            self.opcode = bus.read(self.regs.pc);
            self.regs.pc = self.regs.pc.wrapping_add(1);
            self.regs.p.set(flags::U);

            let instr = decode(self.opcode);
            self.current = Some(instr);
            self.cycles = instr.cycles;
            self.state = ExecState::Executing;

            if log::log_enabled!(log::Level::Trace) {
                log::trace!(
                    "{:04X}  {}",
                    self.instr_pc,
                    crate::disasm::disassemble(bus, self.instr_pc)
                );
            }

            let mode_extra = self.resolve(bus, instr.mode);
            let instr_extra = self.execute(bus, instr.mnemonic);
            let penalty = match self.penalty {
                PenaltyRule::Both => mode_extra && instr_extra,
                PenaltyRule::Either => mode_extra || instr_extra,
            };
            if penalty {
                self.cycles += 1;
            }
            self.regs.p.set(flags::U);
        }

        self.cycles -= 1;
        self.total_cycles += 1;
    }

    fn reset(&mut self, bus: &mut B) {
        self.regs = Registers::new();
        self.regs.pc = Self::read_word(bus, 0xFFFC);
        self.opcode = 0;
        self.fetched = 0;
        self.addr_abs = 0;
        self.addr_rel = 0;
        self.current = None;
        self.cycles = 8;
        self.total_cycles = 0;
        self.state = ExecState::Interrupt;
        log::debug!("reset: pc=${:04X}", self.regs.pc);
    }

    fn irq(&mut self, bus: &mut B) {
        if self.state == ExecState::Stopped || self.regs.p.get(flags::I) {
            return;
        }
        log::debug!("irq taken at pc=${:04X}", self.regs.pc);
        self.service_interrupt(bus, 0xFFFE, 7);
    }

    fn nmi(&mut self, bus: &mut B) {
        if self.state == ExecState::Stopped {
            return;
        }
        log::debug!("nmi taken at pc=${:04X}", self.regs.pc);
        self.service_interrupt(bus, 0xFFFA, 8);
    }

    fn pc(&self) -> u16 {
        self.regs.pc
    }
}
