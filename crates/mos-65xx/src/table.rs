//! Opcode descriptor table.
//!
//! One dense 256-entry table maps every opcode byte to its descriptor:
//! mnemonic tag, addressing-mode tag, instruction length, and base cycle
//! count per the published 6502 reference. Undocumented opcodes hold a
//! one-byte, one-cycle sentinel ([`Mnemonic::Xxx`]) carrying their own
//! opcode byte, so `decode(op).opcode == op` holds for the whole table.

/// Addressing mode of an instruction.
///
/// Accumulator-form shifts and rotates use `Implied`; the resolver
/// latches A into the operand scratch so they need no memory read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrMode {
    Implied,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Relative,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
}

/// Instruction mnemonic tag.
///
/// Accumulator forms of the shifts/rotates are distinct tags (`AslA`,
/// `LsrA`, `RolA`, `RorA`) because they write back to A instead of
/// memory; they render under the same 3-letter name. `Xxx` is the
/// undocumented-opcode sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    Adc,
    And,
    Asl,
    AslA,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    LsrA,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    RolA,
    Ror,
    RorA,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    Xxx,
}

impl Mnemonic {
    /// Canonical assembler name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Adc => "ADC",
            Self::And => "AND",
            Self::Asl | Self::AslA => "ASL",
            Self::Bcc => "BCC",
            Self::Bcs => "BCS",
            Self::Beq => "BEQ",
            Self::Bit => "BIT",
            Self::Bmi => "BMI",
            Self::Bne => "BNE",
            Self::Bpl => "BPL",
            Self::Brk => "BRK",
            Self::Bvc => "BVC",
            Self::Bvs => "BVS",
            Self::Clc => "CLC",
            Self::Cld => "CLD",
            Self::Cli => "CLI",
            Self::Clv => "CLV",
            Self::Cmp => "CMP",
            Self::Cpx => "CPX",
            Self::Cpy => "CPY",
            Self::Dec => "DEC",
            Self::Dex => "DEX",
            Self::Dey => "DEY",
            Self::Eor => "EOR",
            Self::Inc => "INC",
            Self::Inx => "INX",
            Self::Iny => "INY",
            Self::Jmp => "JMP",
            Self::Jsr => "JSR",
            Self::Lda => "LDA",
            Self::Ldx => "LDX",
            Self::Ldy => "LDY",
            Self::Lsr | Self::LsrA => "LSR",
            Self::Nop => "NOP",
            Self::Ora => "ORA",
            Self::Pha => "PHA",
            Self::Php => "PHP",
            Self::Pla => "PLA",
            Self::Plp => "PLP",
            Self::Rol | Self::RolA => "ROL",
            Self::Ror | Self::RorA => "ROR",
            Self::Rti => "RTI",
            Self::Rts => "RTS",
            Self::Sbc => "SBC",
            Self::Sec => "SEC",
            Self::Sed => "SED",
            Self::Sei => "SEI",
            Self::Sta => "STA",
            Self::Stx => "STX",
            Self::Sty => "STY",
            Self::Tax => "TAX",
            Self::Tay => "TAY",
            Self::Tsx => "TSX",
            Self::Txa => "TXA",
            Self::Txs => "TXS",
            Self::Tya => "TYA",
            Self::Xxx => "XXX",
        }
    }
}

/// Static instruction descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// The opcode byte this descriptor belongs to.
    pub opcode: u8,
    pub mnemonic: Mnemonic,
    pub mode: AddrMode,
    /// Total instruction length in bytes, opcode included.
    pub bytes: u8,
    /// Base cycle count before page-cross and branch penalties.
    pub cycles: u8,
}

impl Instruction {
    const fn new(opcode: u8, mnemonic: Mnemonic, mode: AddrMode, bytes: u8, cycles: u8) -> Self {
        Self {
            opcode,
            mnemonic,
            mode,
            bytes,
            cycles,
        }
    }

    const fn undocumented(opcode: u8) -> Self {
        Self::new(opcode, Mnemonic::Xxx, AddrMode::Implied, 1, 1)
    }

    /// Whether this is a documented opcode (not the XXX sentinel).
    #[must_use]
    pub const fn is_documented(&self) -> bool {
        !matches!(self.mnemonic, Mnemonic::Xxx)
    }
}

/// Look up the descriptor for an opcode byte.
#[must_use]
pub fn decode(opcode: u8) -> &'static Instruction {
    &TABLE[opcode as usize]
}

static TABLE: [Instruction; 256] = {
    use AddrMode::*;
    use Mnemonic::*;

    let mut t = [Instruction::undocumented(0); 256];
    let mut i = 0;
    while i < 256 {
        t[i] = Instruction::undocumented(i as u8);
        i += 1;
    }

    // ADC
    t[0x69] = Instruction::new(0x69, Adc, Immediate, 2, 2);
    t[0x65] = Instruction::new(0x65, Adc, ZeroPage, 2, 3);
    t[0x75] = Instruction::new(0x75, Adc, ZeroPageX, 2, 4);
    t[0x6D] = Instruction::new(0x6D, Adc, Absolute, 3, 4);
    t[0x7D] = Instruction::new(0x7D, Adc, AbsoluteX, 3, 4);
    t[0x79] = Instruction::new(0x79, Adc, AbsoluteY, 3, 4);
    t[0x61] = Instruction::new(0x61, Adc, IndirectX, 2, 6);
    t[0x71] = Instruction::new(0x71, Adc, IndirectY, 2, 5);

    // AND
    t[0x29] = Instruction::new(0x29, And, Immediate, 2, 2);
    t[0x25] = Instruction::new(0x25, And, ZeroPage, 2, 3);
    t[0x35] = Instruction::new(0x35, And, ZeroPageX, 2, 4);
    t[0x2D] = Instruction::new(0x2D, And, Absolute, 3, 4);
    t[0x3D] = Instruction::new(0x3D, And, AbsoluteX, 3, 4);
    t[0x39] = Instruction::new(0x39, And, AbsoluteY, 3, 4);
    t[0x21] = Instruction::new(0x21, And, IndirectX, 2, 6);
    t[0x31] = Instruction::new(0x31, And, IndirectY, 2, 5);

    // ASL
    t[0x0A] = Instruction::new(0x0A, AslA, Implied, 1, 2);
    t[0x06] = Instruction::new(0x06, Asl, ZeroPage, 2, 5);
    t[0x16] = Instruction::new(0x16, Asl, ZeroPageX, 2, 6);
    t[0x0E] = Instruction::new(0x0E, Asl, Absolute, 3, 6);
    t[0x1E] = Instruction::new(0x1E, Asl, AbsoluteX, 3, 7);

    // Branches
    t[0x90] = Instruction::new(0x90, Bcc, Relative, 2, 2);
    t[0xB0] = Instruction::new(0xB0, Bcs, Relative, 2, 2);
    t[0xF0] = Instruction::new(0xF0, Beq, Relative, 2, 2);
    t[0x30] = Instruction::new(0x30, Bmi, Relative, 2, 2);
    t[0xD0] = Instruction::new(0xD0, Bne, Relative, 2, 2);
    t[0x10] = Instruction::new(0x10, Bpl, Relative, 2, 2);
    t[0x50] = Instruction::new(0x50, Bvc, Relative, 2, 2);
    t[0x70] = Instruction::new(0x70, Bvs, Relative, 2, 2);

    // BIT
    t[0x24] = Instruction::new(0x24, Bit, ZeroPage, 2, 3);
    t[0x2C] = Instruction::new(0x2C, Bit, Absolute, 3, 4);

    // BRK
    t[0x00] = Instruction::new(0x00, Brk, Implied, 1, 7);

    // Flag clears/sets
    t[0x18] = Instruction::new(0x18, Clc, Implied, 1, 2);
    t[0xD8] = Instruction::new(0xD8, Cld, Implied, 1, 2);
    t[0x58] = Instruction::new(0x58, Cli, Implied, 1, 2);
    t[0xB8] = Instruction::new(0xB8, Clv, Implied, 1, 2);
    t[0x38] = Instruction::new(0x38, Sec, Implied, 1, 2);
    t[0xF8] = Instruction::new(0xF8, Sed, Implied, 1, 2);
    t[0x78] = Instruction::new(0x78, Sei, Implied, 1, 2);

    // CMP
    t[0xC9] = Instruction::new(0xC9, Cmp, Immediate, 2, 2);
    t[0xC5] = Instruction::new(0xC5, Cmp, ZeroPage, 2, 3);
    t[0xD5] = Instruction::new(0xD5, Cmp, ZeroPageX, 2, 4);
    t[0xCD] = Instruction::new(0xCD, Cmp, Absolute, 3, 4);
    t[0xDD] = Instruction::new(0xDD, Cmp, AbsoluteX, 3, 4);
    t[0xD9] = Instruction::new(0xD9, Cmp, AbsoluteY, 3, 4);
    t[0xC1] = Instruction::new(0xC1, Cmp, IndirectX, 2, 6);
    t[0xD1] = Instruction::new(0xD1, Cmp, IndirectY, 2, 5);

    // CPX / CPY
    t[0xE0] = Instruction::new(0xE0, Cpx, Immediate, 2, 2);
    t[0xE4] = Instruction::new(0xE4, Cpx, ZeroPage, 2, 3);
    t[0xEC] = Instruction::new(0xEC, Cpx, Absolute, 3, 4);
    t[0xC0] = Instruction::new(0xC0, Cpy, Immediate, 2, 2);
    t[0xC4] = Instruction::new(0xC4, Cpy, ZeroPage, 2, 3);
    t[0xCC] = Instruction::new(0xCC, Cpy, Absolute, 3, 4);

    // DEC / DEX / DEY
    t[0xC6] = Instruction::new(0xC6, Dec, ZeroPage, 2, 5);
    t[0xD6] = Instruction::new(0xD6, Dec, ZeroPageX, 2, 6);
    t[0xCE] = Instruction::new(0xCE, Dec, Absolute, 3, 6);
    t[0xDE] = Instruction::new(0xDE, Dec, AbsoluteX, 3, 7);
    t[0xCA] = Instruction::new(0xCA, Dex, Implied, 1, 2);
    t[0x88] = Instruction::new(0x88, Dey, Implied, 1, 2);

    // EOR
    t[0x49] = Instruction::new(0x49, Eor, Immediate, 2, 2);
    t[0x45] = Instruction::new(0x45, Eor, ZeroPage, 2, 3);
    t[0x55] = Instruction::new(0x55, Eor, ZeroPageX, 2, 4);
    t[0x4D] = Instruction::new(0x4D, Eor, Absolute, 3, 4);
    t[0x5D] = Instruction::new(0x5D, Eor, AbsoluteX, 3, 4);
    t[0x59] = Instruction::new(0x59, Eor, AbsoluteY, 3, 4);
    t[0x41] = Instruction::new(0x41, Eor, IndirectX, 2, 6);
    t[0x51] = Instruction::new(0x51, Eor, IndirectY, 2, 5);

    // INC / INX / INY
    t[0xE6] = Instruction::new(0xE6, Inc, ZeroPage, 2, 5);
    t[0xF6] = Instruction::new(0xF6, Inc, ZeroPageX, 2, 6);
    t[0xEE] = Instruction::new(0xEE, Inc, Absolute, 3, 6);
    t[0xFE] = Instruction::new(0xFE, Inc, AbsoluteX, 3, 7);
    t[0xE8] = Instruction::new(0xE8, Inx, Implied, 1, 2);
    t[0xC8] = Instruction::new(0xC8, Iny, Implied, 1, 2);

    // JMP / JSR
    t[0x4C] = Instruction::new(0x4C, Jmp, Absolute, 3, 3);
    t[0x6C] = Instruction::new(0x6C, Jmp, Indirect, 3, 5);
    t[0x20] = Instruction::new(0x20, Jsr, Absolute, 3, 6);

    // LDA
    t[0xA9] = Instruction::new(0xA9, Lda, Immediate, 2, 2);
    t[0xA5] = Instruction::new(0xA5, Lda, ZeroPage, 2, 3);
    t[0xB5] = Instruction::new(0xB5, Lda, ZeroPageX, 2, 4);
    t[0xAD] = Instruction::new(0xAD, Lda, Absolute, 3, 4);
    t[0xBD] = Instruction::new(0xBD, Lda, AbsoluteX, 3, 4);
    t[0xB9] = Instruction::new(0xB9, Lda, AbsoluteY, 3, 4);
    t[0xA1] = Instruction::new(0xA1, Lda, IndirectX, 2, 6);
    t[0xB1] = Instruction::new(0xB1, Lda, IndirectY, 2, 5);

    // LDX
    t[0xA2] = Instruction::new(0xA2, Ldx, Immediate, 2, 2);
    t[0xA6] = Instruction::new(0xA6, Ldx, ZeroPage, 2, 3);
    t[0xB6] = Instruction::new(0xB6, Ldx, ZeroPageY, 2, 4);
    t[0xAE] = Instruction::new(0xAE, Ldx, Absolute, 3, 4);
    t[0xBE] = Instruction::new(0xBE, Ldx, AbsoluteY, 3, 4);

    // LDY
    t[0xA0] = Instruction::new(0xA0, Ldy, Immediate, 2, 2);
    t[0xA4] = Instruction::new(0xA4, Ldy, ZeroPage, 2, 3);
    t[0xB4] = Instruction::new(0xB4, Ldy, ZeroPageX, 2, 4);
    t[0xAC] = Instruction::new(0xAC, Ldy, Absolute, 3, 4);
    t[0xBC] = Instruction::new(0xBC, Ldy, AbsoluteX, 3, 4);

    // LSR
    t[0x4A] = Instruction::new(0x4A, LsrA, Implied, 1, 2);
    t[0x46] = Instruction::new(0x46, Lsr, ZeroPage, 2, 5);
    t[0x56] = Instruction::new(0x56, Lsr, ZeroPageX, 2, 6);
    t[0x4E] = Instruction::new(0x4E, Lsr, Absolute, 3, 6);
    t[0x5E] = Instruction::new(0x5E, Lsr, AbsoluteX, 3, 7);

    // NOP
    t[0xEA] = Instruction::new(0xEA, Nop, Implied, 1, 2);

    // ORA
    t[0x09] = Instruction::new(0x09, Ora, Immediate, 2, 2);
    t[0x05] = Instruction::new(0x05, Ora, ZeroPage, 2, 3);
    t[0x15] = Instruction::new(0x15, Ora, ZeroPageX, 2, 4);
    t[0x0D] = Instruction::new(0x0D, Ora, Absolute, 3, 4);
    t[0x1D] = Instruction::new(0x1D, Ora, AbsoluteX, 3, 4);
    t[0x19] = Instruction::new(0x19, Ora, AbsoluteY, 3, 4);
    t[0x01] = Instruction::new(0x01, Ora, IndirectX, 2, 6);
    t[0x11] = Instruction::new(0x11, Ora, IndirectY, 2, 5);

    // Stack
    t[0x48] = Instruction::new(0x48, Pha, Implied, 1, 3);
    t[0x08] = Instruction::new(0x08, Php, Implied, 1, 3);
    t[0x68] = Instruction::new(0x68, Pla, Implied, 1, 4);
    t[0x28] = Instruction::new(0x28, Plp, Implied, 1, 4);

    // ROL
    t[0x2A] = Instruction::new(0x2A, RolA, Implied, 1, 2);
    t[0x26] = Instruction::new(0x26, Rol, ZeroPage, 2, 5);
    t[0x36] = Instruction::new(0x36, Rol, ZeroPageX, 2, 6);
    t[0x2E] = Instruction::new(0x2E, Rol, Absolute, 3, 6);
    t[0x3E] = Instruction::new(0x3E, Rol, AbsoluteX, 3, 7);

    // ROR
    t[0x6A] = Instruction::new(0x6A, RorA, Implied, 1, 2);
    t[0x66] = Instruction::new(0x66, Ror, ZeroPage, 2, 5);
    t[0x76] = Instruction::new(0x76, Ror, ZeroPageX, 2, 6);
    t[0x6E] = Instruction::new(0x6E, Ror, Absolute, 3, 6);
    t[0x7E] = Instruction::new(0x7E, Ror, AbsoluteX, 3, 7);

    // RTI / RTS
    t[0x40] = Instruction::new(0x40, Rti, Implied, 1, 6);
    t[0x60] = Instruction::new(0x60, Rts, Implied, 1, 6);

    // SBC
    t[0xE9] = Instruction::new(0xE9, Sbc, Immediate, 2, 2);
    t[0xE5] = Instruction::new(0xE5, Sbc, ZeroPage, 2, 3);
    t[0xF5] = Instruction::new(0xF5, Sbc, ZeroPageX, 2, 4);
    t[0xED] = Instruction::new(0xED, Sbc, Absolute, 3, 4);
    t[0xFD] = Instruction::new(0xFD, Sbc, AbsoluteX, 3, 4);
    t[0xF9] = Instruction::new(0xF9, Sbc, AbsoluteY, 3, 4);
    t[0xE1] = Instruction::new(0xE1, Sbc, IndirectX, 2, 6);
    t[0xF1] = Instruction::new(0xF1, Sbc, IndirectY, 2, 5);

    // STA
    t[0x85] = Instruction::new(0x85, Sta, ZeroPage, 2, 3);
    t[0x95] = Instruction::new(0x95, Sta, ZeroPageX, 2, 4);
    t[0x8D] = Instruction::new(0x8D, Sta, Absolute, 3, 4);
    t[0x9D] = Instruction::new(0x9D, Sta, AbsoluteX, 3, 5);
    t[0x99] = Instruction::new(0x99, Sta, AbsoluteY, 3, 5);
    t[0x81] = Instruction::new(0x81, Sta, IndirectX, 2, 6);
    t[0x91] = Instruction::new(0x91, Sta, IndirectY, 2, 6);

    // STX / STY
    t[0x86] = Instruction::new(0x86, Stx, ZeroPage, 2, 3);
    t[0x96] = Instruction::new(0x96, Stx, ZeroPageY, 2, 4);
    t[0x8E] = Instruction::new(0x8E, Stx, Absolute, 3, 4);
    t[0x84] = Instruction::new(0x84, Sty, ZeroPage, 2, 3);
    t[0x94] = Instruction::new(0x94, Sty, ZeroPageX, 2, 4);
    t[0x8C] = Instruction::new(0x8C, Sty, Absolute, 3, 4);

    // Transfers
    t[0xAA] = Instruction::new(0xAA, Tax, Implied, 1, 2);
    t[0xA8] = Instruction::new(0xA8, Tay, Implied, 1, 2);
    t[0xBA] = Instruction::new(0xBA, Tsx, Implied, 1, 2);
    t[0x8A] = Instruction::new(0x8A, Txa, Implied, 1, 2);
    t[0x9A] = Instruction::new(0x9A, Txs, Implied, 1, 2);
    t[0x98] = Instruction::new(0x98, Tya, Implied, 1, 2);

    t
};
