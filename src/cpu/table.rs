/*!
table.rs - Data-driven opcode table (256 entries).

Purpose
=======
Maps every opcode byte to an [`Opcode`]: the instruction it encodes, its
addressing mode, its base cycle count, and which dynamic cycle penalty
applies. Dispatch is a single index into [`OPCODES`] followed by an
exhaustive `match` over [`Instruction`]; adding or removing an instruction
variant is caught by the compiler at every match site.

Coverage
========
- The 151 documented NMOS encodings with their documented timings.
- Every other byte maps to [`UNOFFICIAL`]: an implicit-mode NOP costing two
  cycles, flagged `official == false`, so dispatch is total.

Penalties
=========
- `Penalty::PageCross`: read instructions using abs,X / abs,Y / (zp),Y pay
  +1 when indexing crosses a page. Stores and RMW forms already include
  the fix-up cycle in their base count and carry no penalty.
- `Penalty::Branch`: +1 when taken, +1 more when the target is on another
  page.
*/

use std::fmt;

use crate::cpu::addressing::AddressingMode;
use crate::cpu::addressing::AddressingMode::{
    Absolute, AbsoluteX, AbsoluteY, Immediate, Implicit, IndexedIndirect, Indirect,
    IndirectIndexed, Relative, ZeroPage, ZeroPageX, ZeroPageY,
};

/// The 56 documented 6502 instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    Adc,
    And,
    Asl,
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
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
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
}

impl Instruction {
    /// Upper-case assembler mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Instruction::Adc => "ADC",
            Instruction::And => "AND",
            Instruction::Asl => "ASL",
            Instruction::Bcc => "BCC",
            Instruction::Bcs => "BCS",
            Instruction::Beq => "BEQ",
            Instruction::Bit => "BIT",
            Instruction::Bmi => "BMI",
            Instruction::Bne => "BNE",
            Instruction::Bpl => "BPL",
            Instruction::Brk => "BRK",
            Instruction::Bvc => "BVC",
            Instruction::Bvs => "BVS",
            Instruction::Clc => "CLC",
            Instruction::Cld => "CLD",
            Instruction::Cli => "CLI",
            Instruction::Clv => "CLV",
            Instruction::Cmp => "CMP",
            Instruction::Cpx => "CPX",
            Instruction::Cpy => "CPY",
            Instruction::Dec => "DEC",
            Instruction::Dex => "DEX",
            Instruction::Dey => "DEY",
            Instruction::Eor => "EOR",
            Instruction::Inc => "INC",
            Instruction::Inx => "INX",
            Instruction::Iny => "INY",
            Instruction::Jmp => "JMP",
            Instruction::Jsr => "JSR",
            Instruction::Lda => "LDA",
            Instruction::Ldx => "LDX",
            Instruction::Ldy => "LDY",
            Instruction::Lsr => "LSR",
            Instruction::Nop => "NOP",
            Instruction::Ora => "ORA",
            Instruction::Pha => "PHA",
            Instruction::Php => "PHP",
            Instruction::Pla => "PLA",
            Instruction::Plp => "PLP",
            Instruction::Rol => "ROL",
            Instruction::Ror => "ROR",
            Instruction::Rti => "RTI",
            Instruction::Rts => "RTS",
            Instruction::Sbc => "SBC",
            Instruction::Sec => "SEC",
            Instruction::Sed => "SED",
            Instruction::Sei => "SEI",
            Instruction::Sta => "STA",
            Instruction::Stx => "STX",
            Instruction::Sty => "STY",
            Instruction::Tax => "TAX",
            Instruction::Tay => "TAY",
            Instruction::Tsx => "TSX",
            Instruction::Txa => "TXA",
            Instruction::Txs => "TXS",
            Instruction::Tya => "TYA",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.mnemonic())
    }
}

/// Dynamic cycle penalty attached to an opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Penalty {
    None,
    PageCross,
    Branch,
}

/// Decoded instruction: one table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub instruction: Instruction,
    pub mode: AddressingMode,
    pub cycles: u8,
    pub penalty: Penalty,
    pub official: bool,
}

/// Entry used for every undocumented opcode byte.
pub const UNOFFICIAL: Opcode = Opcode {
    instruction: Instruction::Nop,
    mode: Implicit,
    cycles: 2,
    penalty: Penalty::None,
    official: false,
};

const fn op(instruction: Instruction, mode: AddressingMode, cycles: u8) -> Opcode {
    Opcode {
        instruction,
        mode,
        cycles,
        penalty: Penalty::None,
        official: true,
    }
}

/// Read through an indexed mode: +1 on page cross.
const fn rd(instruction: Instruction, mode: AddressingMode, cycles: u8) -> Opcode {
    Opcode {
        penalty: Penalty::PageCross,
        ..op(instruction, mode, cycles)
    }
}

const fn branch(instruction: Instruction) -> Opcode {
    Opcode {
        penalty: Penalty::Branch,
        ..op(instruction, Relative, 2)
    }
}

/// Look up the table entry for `opcode`. Total over all 256 values.
#[inline]
pub fn decode(opcode: u8) -> Opcode {
    OPCODES[opcode as usize]
}

/// The opcode table, indexed by opcode byte.
pub static OPCODES: [Opcode; 256] = {
    use Instruction::*;

    let mut t = [UNOFFICIAL; 256];

    // Loads
    t[0xA9] = op(Lda, Immediate, 2);
    t[0xA5] = op(Lda, ZeroPage, 3);
    t[0xB5] = op(Lda, ZeroPageX, 4);
    t[0xAD] = op(Lda, Absolute, 4);
    t[0xBD] = rd(Lda, AbsoluteX, 4);
    t[0xB9] = rd(Lda, AbsoluteY, 4);
    t[0xA1] = op(Lda, IndexedIndirect, 6);
    t[0xB1] = rd(Lda, IndirectIndexed, 5);
    t[0xA2] = op(Ldx, Immediate, 2);
    t[0xA6] = op(Ldx, ZeroPage, 3);
    t[0xB6] = op(Ldx, ZeroPageY, 4);
    t[0xAE] = op(Ldx, Absolute, 4);
    t[0xBE] = rd(Ldx, AbsoluteY, 4);
    t[0xA0] = op(Ldy, Immediate, 2);
    t[0xA4] = op(Ldy, ZeroPage, 3);
    t[0xB4] = op(Ldy, ZeroPageX, 4);
    t[0xAC] = op(Ldy, Absolute, 4);
    t[0xBC] = rd(Ldy, AbsoluteX, 4);

    // Stores
    t[0x85] = op(Sta, ZeroPage, 3);
    t[0x95] = op(Sta, ZeroPageX, 4);
    t[0x8D] = op(Sta, Absolute, 4);
    t[0x9D] = op(Sta, AbsoluteX, 5);
    t[0x99] = op(Sta, AbsoluteY, 5);
    t[0x81] = op(Sta, IndexedIndirect, 6);
    t[0x91] = op(Sta, IndirectIndexed, 6);
    t[0x86] = op(Stx, ZeroPage, 3);
    t[0x96] = op(Stx, ZeroPageY, 4);
    t[0x8E] = op(Stx, Absolute, 4);
    t[0x84] = op(Sty, ZeroPage, 3);
    t[0x94] = op(Sty, ZeroPageX, 4);
    t[0x8C] = op(Sty, Absolute, 4);

    // Transfers
    t[0xAA] = op(Tax, Implicit, 2);
    t[0xA8] = op(Tay, Implicit, 2);
    t[0x8A] = op(Txa, Implicit, 2);
    t[0x98] = op(Tya, Implicit, 2);
    t[0xBA] = op(Tsx, Implicit, 2);
    t[0x9A] = op(Txs, Implicit, 2);

    // Stack
    t[0x48] = op(Pha, Implicit, 3);
    t[0x68] = op(Pla, Implicit, 4);
    t[0x08] = op(Php, Implicit, 3);
    t[0x28] = op(Plp, Implicit, 4);

    // Increment / Decrement (register)
    t[0xE8] = op(Inx, Implicit, 2);
    t[0xC8] = op(Iny, Implicit, 2);
    t[0xCA] = op(Dex, Implicit, 2);
    t[0x88] = op(Dey, Implicit, 2);

    // Increment / Decrement (memory)
    t[0xE6] = op(Inc, ZeroPage, 5);
    t[0xF6] = op(Inc, ZeroPageX, 6);
    t[0xEE] = op(Inc, Absolute, 6);
    t[0xFE] = op(Inc, AbsoluteX, 7);
    t[0xC6] = op(Dec, ZeroPage, 5);
    t[0xD6] = op(Dec, ZeroPageX, 6);
    t[0xCE] = op(Dec, Absolute, 6);
    t[0xDE] = op(Dec, AbsoluteX, 7);

    // Logical
    t[0x29] = op(And, Immediate, 2);
    t[0x25] = op(And, ZeroPage, 3);
    t[0x35] = op(And, ZeroPageX, 4);
    t[0x2D] = op(And, Absolute, 4);
    t[0x3D] = rd(And, AbsoluteX, 4);
    t[0x39] = rd(And, AbsoluteY, 4);
    t[0x21] = op(And, IndexedIndirect, 6);
    t[0x31] = rd(And, IndirectIndexed, 5);
    t[0x09] = op(Ora, Immediate, 2);
    t[0x05] = op(Ora, ZeroPage, 3);
    t[0x15] = op(Ora, ZeroPageX, 4);
    t[0x0D] = op(Ora, Absolute, 4);
    t[0x1D] = rd(Ora, AbsoluteX, 4);
    t[0x19] = rd(Ora, AbsoluteY, 4);
    t[0x01] = op(Ora, IndexedIndirect, 6);
    t[0x11] = rd(Ora, IndirectIndexed, 5);
    t[0x49] = op(Eor, Immediate, 2);
    t[0x45] = op(Eor, ZeroPage, 3);
    t[0x55] = op(Eor, ZeroPageX, 4);
    t[0x4D] = op(Eor, Absolute, 4);
    t[0x5D] = rd(Eor, AbsoluteX, 4);
    t[0x59] = rd(Eor, AbsoluteY, 4);
    t[0x41] = op(Eor, IndexedIndirect, 6);
    t[0x51] = rd(Eor, IndirectIndexed, 5);
    t[0x24] = op(Bit, ZeroPage, 3);
    t[0x2C] = op(Bit, Absolute, 4);

    // Shifts / Rotates (accumulator forms use Implicit mode)
    t[0x0A] = op(Asl, Implicit, 2);
    t[0x06] = op(Asl, ZeroPage, 5);
    t[0x16] = op(Asl, ZeroPageX, 6);
    t[0x0E] = op(Asl, Absolute, 6);
    t[0x1E] = op(Asl, AbsoluteX, 7);
    t[0x4A] = op(Lsr, Implicit, 2);
    t[0x46] = op(Lsr, ZeroPage, 5);
    t[0x56] = op(Lsr, ZeroPageX, 6);
    t[0x4E] = op(Lsr, Absolute, 6);
    t[0x5E] = op(Lsr, AbsoluteX, 7);
    t[0x2A] = op(Rol, Implicit, 2);
    t[0x26] = op(Rol, ZeroPage, 5);
    t[0x36] = op(Rol, ZeroPageX, 6);
    t[0x2E] = op(Rol, Absolute, 6);
    t[0x3E] = op(Rol, AbsoluteX, 7);
    t[0x6A] = op(Ror, Implicit, 2);
    t[0x66] = op(Ror, ZeroPage, 5);
    t[0x76] = op(Ror, ZeroPageX, 6);
    t[0x6E] = op(Ror, Absolute, 6);
    t[0x7E] = op(Ror, AbsoluteX, 7);

    // Flags
    t[0x18] = op(Clc, Implicit, 2);
    t[0x38] = op(Sec, Implicit, 2);
    t[0x58] = op(Cli, Implicit, 2);
    t[0x78] = op(Sei, Implicit, 2);
    t[0xD8] = op(Cld, Implicit, 2);
    t[0xF8] = op(Sed, Implicit, 2);
    t[0xB8] = op(Clv, Implicit, 2);

    // Compare
    t[0xC9] = op(Cmp, Immediate, 2);
    t[0xC5] = op(Cmp, ZeroPage, 3);
    t[0xD5] = op(Cmp, ZeroPageX, 4);
    t[0xCD] = op(Cmp, Absolute, 4);
    t[0xDD] = rd(Cmp, AbsoluteX, 4);
    t[0xD9] = rd(Cmp, AbsoluteY, 4);
    t[0xC1] = op(Cmp, IndexedIndirect, 6);
    t[0xD1] = rd(Cmp, IndirectIndexed, 5);
    t[0xE0] = op(Cpx, Immediate, 2);
    t[0xE4] = op(Cpx, ZeroPage, 3);
    t[0xEC] = op(Cpx, Absolute, 4);
    t[0xC0] = op(Cpy, Immediate, 2);
    t[0xC4] = op(Cpy, ZeroPage, 3);
    t[0xCC] = op(Cpy, Absolute, 4);

    // Branches
    t[0x10] = branch(Bpl);
    t[0x30] = branch(Bmi);
    t[0x50] = branch(Bvc);
    t[0x70] = branch(Bvs);
    t[0x90] = branch(Bcc);
    t[0xB0] = branch(Bcs);
    t[0xD0] = branch(Bne);
    t[0xF0] = branch(Beq);

    // Jumps / Subroutines / Returns
    t[0x4C] = op(Jmp, Absolute, 3);
    t[0x6C] = op(Jmp, Indirect, 5);
    t[0x20] = op(Jsr, Absolute, 6);
    t[0x60] = op(Rts, Implicit, 6);

    // Arithmetic
    t[0x69] = op(Adc, Immediate, 2);
    t[0x65] = op(Adc, ZeroPage, 3);
    t[0x75] = op(Adc, ZeroPageX, 4);
    t[0x6D] = op(Adc, Absolute, 4);
    t[0x7D] = rd(Adc, AbsoluteX, 4);
    t[0x79] = rd(Adc, AbsoluteY, 4);
    t[0x61] = op(Adc, IndexedIndirect, 6);
    t[0x71] = rd(Adc, IndirectIndexed, 5);
    t[0xE9] = op(Sbc, Immediate, 2);
    t[0xE5] = op(Sbc, ZeroPage, 3);
    t[0xF5] = op(Sbc, ZeroPageX, 4);
    t[0xED] = op(Sbc, Absolute, 4);
    t[0xFD] = rd(Sbc, AbsoluteX, 4);
    t[0xF9] = rd(Sbc, AbsoluteY, 4);
    t[0xE1] = op(Sbc, IndexedIndirect, 6);
    t[0xF1] = rd(Sbc, IndirectIndexed, 5);

    // Interrupts / BRK / RTI / NOP
    t[0x00] = op(Brk, Implicit, 7);
    t[0x40] = op(Rti, Implicit, 6);
    t[0xEA] = op(Nop, Implicit, 2);

    t
};
