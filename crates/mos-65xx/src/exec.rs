//! Instruction semantics.
//!
//! `execute` dispatches on the mnemonic tag and returns the
//! instruction's extra-cycle flag: true for instructions that pay the
//! page-crossing penalty when their addressing mode crossed. Branches
//! charge their taken/page-cross cycles directly and report false.

use emu65_core::Bus;

use crate::cpu::{ExecState, Mos65xx, Variant};
use crate::flags::{Status, C, D, I, N, V, Z};
use crate::table::Mnemonic;

impl Mos65xx {
    pub(crate) fn execute(&mut self, bus: &mut impl Bus, mnemonic: Mnemonic) -> bool {
        match mnemonic {
            // Arithmetic
            Mnemonic::Adc => self.op_adc(bus),
            Mnemonic::Sbc => self.op_sbc(bus),

            // Logical
            Mnemonic::And => {
                let m = self.fetch_operand(bus);
                self.regs.a &= m;
                self.regs.p.update_nz(self.regs.a);
                true
            }
            Mnemonic::Eor => {
                let m = self.fetch_operand(bus);
                self.regs.a ^= m;
                self.regs.p.update_nz(self.regs.a);
                true
            }
            Mnemonic::Ora => {
                let m = self.fetch_operand(bus);
                self.regs.a |= m;
                self.regs.p.update_nz(self.regs.a);
                true
            }
            Mnemonic::Bit => {
                let m = self.fetch_operand(bus);
                self.regs.p.assign(Z, self.regs.a & m == 0);
                self.regs.p.assign(N, m & 0x80 != 0);
                self.regs.p.assign(V, m & 0x40 != 0);
                false
            }

            // Shifts and rotates
            Mnemonic::Asl => {
                let m = self.fetch_operand(bus);
                let r = self.asl_value(m);
                bus.write(self.addr_abs, r);
                false
            }
            Mnemonic::AslA => {
                self.regs.a = self.asl_value(self.fetched);
                false
            }
            Mnemonic::Lsr => {
                let m = self.fetch_operand(bus);
                let r = self.lsr_value(m);
                bus.write(self.addr_abs, r);
                false
            }
            Mnemonic::LsrA => {
                self.regs.a = self.lsr_value(self.fetched);
                false
            }
            Mnemonic::Rol => {
                let m = self.fetch_operand(bus);
                let r = self.rol_value(m);
                bus.write(self.addr_abs, r);
                false
            }
            Mnemonic::RolA => {
                self.regs.a = self.rol_value(self.fetched);
                false
            }
            Mnemonic::Ror => {
                let m = self.fetch_operand(bus);
                let r = self.ror_value(m);
                bus.write(self.addr_abs, r);
                false
            }
            Mnemonic::RorA => {
                self.regs.a = self.ror_value(self.fetched);
                false
            }

            // Loads and stores
            Mnemonic::Lda => {
                let m = self.fetch_operand(bus);
                self.regs.a = m;
                self.regs.p.update_nz(m);
                true
            }
            Mnemonic::Ldx => {
                let m = self.fetch_operand(bus);
                self.regs.x = m;
                self.regs.p.update_nz(m);
                true
            }
            Mnemonic::Ldy => {
                let m = self.fetch_operand(bus);
                self.regs.y = m;
                self.regs.p.update_nz(m);
                true
            }
            Mnemonic::Sta => {
                bus.write(self.addr_abs, self.regs.a);
                false
            }
            Mnemonic::Stx => {
                bus.write(self.addr_abs, self.regs.x);
                false
            }
            Mnemonic::Sty => {
                bus.write(self.addr_abs, self.regs.y);
                false
            }

            // Register transfers
            Mnemonic::Tax => {
                self.regs.x = self.regs.a;
                self.regs.p.update_nz(self.regs.x);
                false
            }
            Mnemonic::Tay => {
                self.regs.y = self.regs.a;
                self.regs.p.update_nz(self.regs.y);
                false
            }
            Mnemonic::Tsx => {
                self.regs.x = self.regs.s;
                self.regs.p.update_nz(self.regs.x);
                false
            }
            Mnemonic::Txa => {
                self.regs.a = self.regs.x;
                self.regs.p.update_nz(self.regs.a);
                false
            }
            Mnemonic::Tya => {
                self.regs.a = self.regs.y;
                self.regs.p.update_nz(self.regs.a);
                false
            }
            // TXS is the one transfer that sets no flags.
            Mnemonic::Txs => {
                self.regs.s = self.regs.x;
                false
            }

            // Increments and decrements
            Mnemonic::Inc => {
                let m = self.fetch_operand(bus);
                let r = m.wrapping_add(1);
                bus.write(self.addr_abs, r);
                self.regs.p.update_nz(r);
                false
            }
            Mnemonic::Dec => {
                let m = self.fetch_operand(bus);
                let r = m.wrapping_sub(1);
                bus.write(self.addr_abs, r);
                self.regs.p.update_nz(r);
                false
            }
            Mnemonic::Inx => {
                self.regs.x = self.regs.x.wrapping_add(1);
                self.regs.p.update_nz(self.regs.x);
                false
            }
            Mnemonic::Iny => {
                self.regs.y = self.regs.y.wrapping_add(1);
                self.regs.p.update_nz(self.regs.y);
                false
            }
            Mnemonic::Dex => {
                self.regs.x = self.regs.x.wrapping_sub(1);
                self.regs.p.update_nz(self.regs.x);
                false
            }
            Mnemonic::Dey => {
                self.regs.y = self.regs.y.wrapping_sub(1);
                self.regs.p.update_nz(self.regs.y);
                false
            }

            // Compares
            Mnemonic::Cmp => {
                let a = self.regs.a;
                self.compare(bus, a);
                true
            }
            Mnemonic::Cpx => {
                let x = self.regs.x;
                self.compare(bus, x);
                false
            }
            Mnemonic::Cpy => {
                let y = self.regs.y;
                self.compare(bus, y);
                false
            }

            // Control flow
            Mnemonic::Jmp => {
                self.regs.pc = self.addr_abs;
                false
            }
            Mnemonic::Jsr => {
                let ret = self.regs.pc.wrapping_sub(1);
                self.push_word(bus, ret);
                self.regs.pc = self.addr_abs;
                false
            }
            Mnemonic::Rts => {
                self.regs.pc = self.pop_word(bus).wrapping_add(1);
                false
            }
            Mnemonic::Rti => {
                let p = self.pop_byte(bus);
                self.regs.p = Status::from_pull(p);
                self.regs.pc = self.pop_word(bus);
                false
            }
            Mnemonic::Brk => self.op_brk(bus),

            // Branches
            Mnemonic::Bcc => {
                let taken = !self.regs.p.get(C);
                self.op_branch(taken)
            }
            Mnemonic::Bcs => {
                let taken = self.regs.p.get(C);
                self.op_branch(taken)
            }
            Mnemonic::Beq => {
                let taken = self.regs.p.get(Z);
                self.op_branch(taken)
            }
            Mnemonic::Bne => {
                let taken = !self.regs.p.get(Z);
                self.op_branch(taken)
            }
            Mnemonic::Bmi => {
                let taken = self.regs.p.get(N);
                self.op_branch(taken)
            }
            Mnemonic::Bpl => {
                let taken = !self.regs.p.get(N);
                self.op_branch(taken)
            }
            Mnemonic::Bvs => {
                let taken = self.regs.p.get(V);
                self.op_branch(taken)
            }
            Mnemonic::Bvc => {
                let taken = !self.regs.p.get(V);
                self.op_branch(taken)
            }

            // Stack
            Mnemonic::Pha => {
                let a = self.regs.a;
                self.push_byte(bus, a);
                false
            }
            Mnemonic::Php => {
                let p = self.regs.p.for_push(true);
                self.push_byte(bus, p);
                false
            }
            Mnemonic::Pla => {
                let a = self.pop_byte(bus);
                self.regs.a = a;
                self.regs.p.update_nz(a);
                false
            }
            Mnemonic::Plp => {
                let p = self.pop_byte(bus);
                self.regs.p = Status::from_pull(p);
                false
            }

            // Flag manipulation
            Mnemonic::Clc => {
                self.regs.p.clear(C);
                false
            }
            Mnemonic::Cld => {
                self.regs.p.clear(D);
                false
            }
            Mnemonic::Cli => {
                self.regs.p.clear(I);
                false
            }
            Mnemonic::Clv => {
                self.regs.p.clear(V);
                false
            }
            Mnemonic::Sec => {
                self.regs.p.set(C);
                false
            }
            Mnemonic::Sed => {
                self.regs.p.set(D);
                false
            }
            Mnemonic::Sei => {
                self.regs.p.set(I);
                false
            }

            Mnemonic::Nop => false,

            Mnemonic::Xxx => {
                self.state = ExecState::IllegalOpcode;
                log::warn!(
                    "undocumented opcode ${:02X} at ${:04X}",
                    self.opcode,
                    self.instr_pc
                );
                false
            }
        }
    }

    /// ADC - add memory and carry to the accumulator.
    ///
    /// Z is always computed from the binary sum; the BCD correction
    /// (skipped on the 2A03) adjusts the nibbles afterwards.
    fn op_adc(&mut self, bus: &mut impl Bus) -> bool {
        let m = self.fetch_operand(bus);
        let a = self.regs.a;
        let carry = u16::from(self.regs.p.get(C));
        let mut temp = u16::from(a) + u16::from(m) + carry;
        self.regs.p.assign(Z, temp & 0x00FF == 0);
        if self.decimal_enabled() {
            if u16::from(a & 0x0F) + u16::from(m & 0x0F) + carry > 9 {
                temp += 6;
            }
            self.regs.p.assign(N, temp & 0x0080 != 0);
            self.regs
                .p
                .assign(V, (u16::from(a) ^ temp) & (u16::from(m) ^ temp) & 0x0080 != 0);
            if temp > 0x99 {
                temp += 96;
            }
            self.regs.p.assign(C, temp > 0x99);
        } else {
            self.regs.p.assign(N, temp & 0x0080 != 0);
            self.regs
                .p
                .assign(V, (u16::from(a) ^ temp) & (u16::from(m) ^ temp) & 0x0080 != 0);
            self.regs.p.assign(C, temp > 0x00FF);
        }
        self.regs.a = (temp & 0x00FF) as u8;
        true
    }

    /// SBC - subtract memory and borrow from the accumulator.
    fn op_sbc(&mut self, bus: &mut impl Bus) -> bool {
        let m = self.fetch_operand(bus);
        let a = self.regs.a;
        let borrow = 1 - u16::from(self.regs.p.get(C));
        let mut temp = u16::from(a).wrapping_sub(u16::from(m)).wrapping_sub(borrow);
        self.regs.p.assign(Z, temp & 0x00FF == 0);
        if self.decimal_enabled() {
            let low = i16::from(a & 0x0F) - i16::from(m & 0x0F) - borrow as i16;
            if low < 0 {
                temp = temp.wrapping_sub(6);
            }
            self.regs.p.assign(N, temp & 0x0080 != 0);
            self.regs
                .p
                .assign(V, (u16::from(a) ^ temp) & (!u16::from(m) ^ temp) & 0x0080 != 0);
            if temp > 0x99 {
                temp = temp.wrapping_sub(96);
            }
            self.regs.p.assign(C, temp <= 0x99);
        } else {
            self.regs.p.assign(N, temp & 0x0080 != 0);
            self.regs
                .p
                .assign(V, (u16::from(a) ^ temp) & (!u16::from(m) ^ temp) & 0x0080 != 0);
            self.regs.p.assign(C, temp <= 0x00FF);
        }
        self.regs.a = (temp & 0x00FF) as u8;
        true
    }

    /// BRK - software interrupt through the $FFFE vector.
    fn op_brk(&mut self, bus: &mut impl Bus) -> bool {
        // The byte after BRK is padding; the pushed return address
        // skips it.
        self.regs.pc = self.regs.pc.wrapping_add(1);
        self.regs.p.set(I);
        self.push_word(bus, self.regs.pc);
        let p = self.regs.p.for_push(true);
        self.push_byte(bus, p);
        self.regs.pc = Self::read_word(bus, 0xFFFE);
        false
    }

    /// Conditional branch. A taken branch costs one extra cycle, plus
    /// another when the target is on a different page; those are
    /// charged here, not through the page-cross flag.
    fn op_branch(&mut self, taken: bool) -> bool {
        if taken {
            self.cycles += 1;
            let target = self.regs.pc.wrapping_add(self.addr_rel);
            if (target & 0xFF00) != (self.regs.pc & 0xFF00) {
                self.cycles += 1;
            }
            self.regs.pc = target;
        }
        false
    }

    fn compare(&mut self, bus: &mut impl Bus, reg: u8) {
        let m = self.fetch_operand(bus);
        let result = reg.wrapping_sub(m);
        self.regs.p.assign(C, reg >= m);
        self.regs.p.update_nz(result);
    }

    fn asl_value(&mut self, value: u8) -> u8 {
        self.regs.p.assign(C, value & 0x80 != 0);
        let result = value << 1;
        self.regs.p.update_nz(result);
        result
    }

    fn lsr_value(&mut self, value: u8) -> u8 {
        self.regs.p.assign(C, value & 0x01 != 0);
        let result = value >> 1;
        self.regs.p.update_nz(result);
        result
    }

    fn rol_value(&mut self, value: u8) -> u8 {
        let carry_in = u8::from(self.regs.p.get(C));
        self.regs.p.assign(C, value & 0x80 != 0);
        let result = (value << 1) | carry_in;
        self.regs.p.update_nz(result);
        result
    }

    /// ROR, dispatched on variant: early NMOS parts shift left with
    /// bit 7 dropped and carry untouched; 65C02 and 2A03 rotate right
    /// through carry.
    fn ror_value(&mut self, value: u8) -> u8 {
        match self.variant() {
            Variant::Nmos => {
                let result = (value & 0x7F) << 1;
                self.regs.p.update_nz(result);
                result
            }
            Variant::Cmos | Variant::Nes => {
                let wide = (u16::from(self.regs.p.get(C)) << 8) | u16::from(value);
                self.regs.p.assign(C, wide & 0x0001 != 0);
                let result = (wide >> 1) as u8;
                self.regs.p.update_nz(result);
                result
            }
        }
    }
}
