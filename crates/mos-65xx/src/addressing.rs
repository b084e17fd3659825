//! Addressing-mode resolution.
//!
//! Each mode computes the current instruction's effective address into
//! the CPU scratch (`addr_abs`, or `addr_rel` for branches) and reports
//! whether indexing crossed a page. The accumulator/implied form
//! instead latches A into `fetched` so register-form instructions need
//! no memory read.

use emu65_core::Bus;

use crate::cpu::Mos65xx;
use crate::table::AddrMode;

impl Mos65xx {
    /// Fetch the next byte at PC and advance.
    fn fetch_pc(&mut self, bus: &mut impl Bus) -> u8 {
        let value = bus.read(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    /// Fetch a 16-bit word (little-endian) at PC.
    fn fetch_pc_word(&mut self, bus: &mut impl Bus) -> u16 {
        let lo = self.fetch_pc(bus);
        let hi = self.fetch_pc(bus);
        u16::from_le_bytes([lo, hi])
    }

    /// Read a 16-bit word from memory (little-endian).
    pub(crate) fn read_word(bus: &mut impl Bus, addr: u16) -> u16 {
        let lo = bus.read(addr);
        let hi = bus.read(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    /// Read a 16-bit word with the NMOS page-boundary bug: when `addr`
    /// is $xxFF the high byte comes from $xx00 rather than the next
    /// page.
    fn read_word_page_bug(bus: &mut impl Bus, addr: u16) -> u16 {
        let lo = bus.read(addr);
        let hi_addr = (addr & 0xFF00) | (addr.wrapping_add(1) & 0x00FF);
        let hi = bus.read(hi_addr);
        u16::from_le_bytes([lo, hi])
    }

    /// Resolve the effective address for `mode`.
    ///
    /// Returns true when indexing crossed a page boundary, which for
    /// eligible instructions costs one extra cycle.
    pub(crate) fn resolve(&mut self, bus: &mut impl Bus, mode: AddrMode) -> bool {
        match mode {
            AddrMode::Implied => {
                self.fetched = self.regs.a;
                false
            }
            AddrMode::Immediate => {
                self.addr_abs = self.regs.pc;
                self.regs.pc = self.regs.pc.wrapping_add(1);
                false
            }
            AddrMode::ZeroPage => {
                self.addr_abs = u16::from(self.fetch_pc(bus));
                false
            }
            AddrMode::ZeroPageX => {
                let base = self.fetch_pc(bus);
                self.addr_abs = u16::from(base.wrapping_add(self.regs.x));
                false
            }
            AddrMode::ZeroPageY => {
                let base = self.fetch_pc(bus);
                self.addr_abs = u16::from(base.wrapping_add(self.regs.y));
                false
            }
            AddrMode::Relative => {
                let offset = self.fetch_pc(bus);
                // Sign-extend the 8-bit offset.
                self.addr_rel = i16::from(offset as i8) as u16;
                false
            }
            AddrMode::Absolute => {
                self.addr_abs = self.fetch_pc_word(bus);
                false
            }
            AddrMode::AbsoluteX => {
                let base = self.fetch_pc_word(bus);
                self.addr_abs = base.wrapping_add(u16::from(self.regs.x));
                (self.addr_abs & 0xFF00) != (base & 0xFF00)
            }
            AddrMode::AbsoluteY => {
                let base = self.fetch_pc_word(bus);
                self.addr_abs = base.wrapping_add(u16::from(self.regs.y));
                (self.addr_abs & 0xFF00) != (base & 0xFF00)
            }
            AddrMode::Indirect => {
                // JMP (ind): the pointer read models the NMOS wrap bug
                // on every variant.
                let ptr = self.fetch_pc_word(bus);
                self.addr_abs = Self::read_word_page_bug(bus, ptr);
                false
            }
            AddrMode::IndirectX => {
                let base = self.fetch_pc(bus).wrapping_add(self.regs.x);
                let lo = bus.read(u16::from(base));
                let hi = bus.read(u16::from(base.wrapping_add(1)));
                self.addr_abs = u16::from_le_bytes([lo, hi]);
                false
            }
            AddrMode::IndirectY => {
                let ptr = self.fetch_pc(bus);
                let lo = bus.read(u16::from(ptr));
                let hi = bus.read(u16::from(ptr.wrapping_add(1)));
                let base = u16::from_le_bytes([lo, hi]);
                self.addr_abs = base.wrapping_add(u16::from(self.regs.y));
                (self.addr_abs & 0xFF00) != (base & 0xFF00)
            }
        }
    }

    /// Latch the operand byte for the current instruction.
    ///
    /// Reads from the effective address for every mode except Implied,
    /// where the resolver already left A in `fetched`.
    ///
    /// # Panics
    ///
    /// Panics if called before any instruction has been decoded; that
    /// is a programmer error in the driving code, not a runtime
    /// condition.
    pub(crate) fn fetch_operand(&mut self, bus: &mut impl Bus) -> u8 {
        let instr = self
            .current
            .expect("operand fetch before any instruction was decoded");
        if instr.mode != AddrMode::Implied {
            self.fetched = bus.read(self.addr_abs);
        }
        self.fetched
    }
}
