/*!
addressing.rs - 6502 addressing modes and operand resolution.

Overview
========
`resolve(mode, cpu, bus)` consumes the operand bytes of the current
instruction (0–2 bytes at PC) and returns a [`Resolved`] operand:

| Mode            | Bytes | Result                                     |
|-----------------|-------|--------------------------------------------|
| Implicit        | 0     | `Accumulator`                              |
| Immediate       | 1     | `Immediate(byte)`                          |
| ZeroPage[,X/Y]  | 1     | `Address((byte + idx) & 0xFF)`             |
| Relative        | 1     | `Relative(displacement)`                   |
| Absolute[,X/Y]  | 2     | `Address(word + idx)` (+ page-cross flag)  |
| Indirect        | 2     | `Address(target)` (JMP page-wrap quirk)    |
| (zp,X)          | 1     | `Address(ptr[zp + X])`                     |
| (zp),Y          | 1     | `Address(ptr[zp] + Y)` (+ page-cross flag) |

Responsibilities
================
- Pure address / operand resolution only. Pointer bytes are read, the
  effective address is never touched here; the instruction decides whether
  it reads, writes, or both.
- Page-cross detection is reported for every indexed mode that can cross;
  whether it costs a cycle is the opcode table's decision.
- The dummy reads the hardware performs while forming an address are
  issued here: the byte after the opcode for implied modes, the unindexed
  zero-page address for zp,X / zp,Y / (zp,X). The fix-up read of the
  16-bit indexed modes depends on the instruction, so the resolver only
  reports its address in [`Resolved::unfixed`].
- PC is left on the byte following the full instruction encoding.
*/

use std::fmt;

use crate::bus::{Bus, BusError};
use crate::cpu::regs::CpuRegs;

/// The twelve 6502 addressing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    Implicit,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Relative,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndexedIndirect,
    IndirectIndexed,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_len(self) -> u16 {
        match self {
            AddressingMode::Implicit => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndexedIndirect
            | AddressingMode::IndirectIndexed => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }
}

impl fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AddressingMode::Implicit => "imp",
            AddressingMode::Immediate => "#imm",
            AddressingMode::ZeroPage => "zp",
            AddressingMode::ZeroPageX => "zp,X",
            AddressingMode::ZeroPageY => "zp,Y",
            AddressingMode::Relative => "rel",
            AddressingMode::Absolute => "abs",
            AddressingMode::AbsoluteX => "abs,X",
            AddressingMode::AbsoluteY => "abs,Y",
            AddressingMode::Indirect => "(ind)",
            AddressingMode::IndexedIndirect => "(zp,X)",
            AddressingMode::IndirectIndexed => "(zp),Y",
        };
        f.pad(s)
    }
}

/// What an instruction operates on once its addressing mode is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// Implicit mode. Instructions with a data operand (shifts, rotates)
    /// operate on the accumulator.
    Accumulator,
    /// Operand byte taken from the instruction stream.
    Immediate(u8),
    /// Effective memory address.
    Address(u16),
    /// Signed branch displacement, applied by the branch itself.
    Relative(i8),
}

/// Output of the resolver: the operand and whether indexing crossed a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub operand: Operand,
    pub page_crossed: bool,
    /// abs,X / abs,Y / (zp),Y only: the address the CPU reads before the
    /// high-byte carry is applied (base page, indexed low byte).
    pub unfixed: Option<u16>,
}

impl Resolved {
    #[inline]
    pub(crate) const fn plain(operand: Operand) -> Self {
        Self {
            operand,
            page_crossed: false,
            unfixed: None,
        }
    }

    #[inline]
    const fn indexed(base: u16, addr: u16) -> Self {
        Self {
            operand: Operand::Address(addr),
            page_crossed: crosses_page(base, addr),
            unfixed: Some((base & 0xFF00) | (addr & 0x00FF)),
        }
    }
}

/// True when `a` and `b` lie on different 256-byte pages.
#[inline]
pub const fn crosses_page(a: u16, b: u16) -> bool {
    (a & 0xFF00) != (b & 0xFF00)
}

/// Fetch next byte from the instruction stream, incrementing PC.
#[inline]
pub(crate) fn fetch_byte<C: CpuRegs, B: Bus + ?Sized>(
    cpu: &mut C,
    bus: &mut B,
) -> Result<u8, BusError> {
    let v = bus.read(cpu.pc())?;
    cpu.advance_pc_one();
    Ok(v)
}

/// Fetch next little-endian word (low, then high), incrementing PC twice.
#[inline]
pub(crate) fn fetch_word<C: CpuRegs, B: Bus + ?Sized>(
    cpu: &mut C,
    bus: &mut B,
) -> Result<u16, BusError> {
    let lo = fetch_byte(cpu, bus)? as u16;
    let hi = fetch_byte(cpu, bus)? as u16;
    Ok((hi << 8) | lo)
}

/// Resolve `mode` for the instruction whose opcode byte has already been
/// consumed (PC points at the first operand byte).
pub fn resolve<C: CpuRegs, B: Bus + ?Sized>(
    mode: AddressingMode,
    cpu: &mut C,
    bus: &mut B,
) -> Result<Resolved, BusError> {
    let resolved = match mode {
        AddressingMode::Implicit => {
            // the byte after the opcode is read and discarded; PC stays put
            bus.read(cpu.pc())?;
            Resolved::plain(Operand::Accumulator)
        }
        AddressingMode::Immediate => Resolved::plain(Operand::Immediate(fetch_byte(cpu, bus)?)),
        AddressingMode::ZeroPage => {
            Resolved::plain(Operand::Address(fetch_byte(cpu, bus)? as u16))
        }
        AddressingMode::ZeroPageX => {
            let zp = fetch_zp_unindexed(cpu, bus)?.wrapping_add(cpu.x());
            Resolved::plain(Operand::Address(zp as u16))
        }
        AddressingMode::ZeroPageY => {
            let zp = fetch_zp_unindexed(cpu, bus)?.wrapping_add(cpu.y());
            Resolved::plain(Operand::Address(zp as u16))
        }
        AddressingMode::Relative => Resolved::plain(Operand::Relative(fetch_byte(cpu, bus)? as i8)),
        AddressingMode::Absolute => Resolved::plain(Operand::Address(fetch_word(cpu, bus)?)),
        AddressingMode::AbsoluteX => {
            let base = fetch_word(cpu, bus)?;
            Resolved::indexed(base, base.wrapping_add(cpu.x() as u16))
        }
        AddressingMode::AbsoluteY => {
            let base = fetch_word(cpu, bus)?;
            Resolved::indexed(base, base.wrapping_add(cpu.y() as u16))
        }
        AddressingMode::Indirect => {
            let ptr = fetch_word(cpu, bus)?;
            Resolved::plain(Operand::Address(read_word_indirect_bug(bus, ptr)?))
        }
        AddressingMode::IndexedIndirect => {
            let zp = fetch_zp_unindexed(cpu, bus)?.wrapping_add(cpu.x());
            Resolved::plain(Operand::Address(read_word_zp(bus, zp)?))
        }
        AddressingMode::IndirectIndexed => {
            let zp = fetch_byte(cpu, bus)?;
            let base = read_word_zp(bus, zp)?;
            Resolved::indexed(base, base.wrapping_add(cpu.y() as u16))
        }
    };
    Ok(resolved)
}

// -------------------------
// Low-level word helpers
// -------------------------

/// Fetch a zero-page operand and read it once unindexed, as the CPU does
/// in the cycle it spends adding the index.
#[inline]
fn fetch_zp_unindexed<C: CpuRegs, B: Bus + ?Sized>(
    cpu: &mut C,
    bus: &mut B,
) -> Result<u8, BusError> {
    let zp = fetch_byte(cpu, bus)?;
    bus.read(zp as u16)?;
    Ok(zp)
}

/// Read a 16-bit little endian pointer from zero page with wraparound
/// on the high byte (standard 6502 zero-page indirect behavior).
#[inline]
pub(crate) fn read_word_zp<B: Bus + ?Sized>(bus: &mut B, base: u8) -> Result<u16, BusError> {
    let lo = bus.read(base as u16)? as u16;
    let hi = bus.read(base.wrapping_add(1) as u16)? as u16;
    Ok((hi << 8) | lo)
}

/// Emulate the original 6502 JMP (indirect) hardware bug: when the
/// low byte of the indirect vector is 0xFF, the high byte does not
/// cross to the next page; it wraps within the same page.
#[inline]
pub(crate) fn read_word_indirect_bug<B: Bus + ?Sized>(
    bus: &mut B,
    addr: u16,
) -> Result<u16, BusError> {
    let lo = bus.read(addr)? as u16;
    let hi_addr = (addr & 0xFF00) | (addr.wrapping_add(1) & 0x00FF);
    let hi = bus.read(hi_addr)? as u16;
    Ok((hi << 8) | lo)
}
