/*!
load_store.rs - LDA/LDX/LDY and STA/STX/STY

Loads read their operand (immediate or memory) and set Z/N. Stores write
the register to the effective address and leave P untouched; their
indexed forms carry no page-cross penalty (the table bakes the fix-up
cycle into the base count).
*/

use crate::bus::{Bus, BusError};
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{address_of, lda, ldx, ldy, load_operand};
use crate::cpu::regs::CpuRegs;

#[inline]
pub(super) fn op_lda<C: CpuRegs, B: Bus + ?Sized>(
    cpu: &mut C,
    bus: &mut B,
    operand: Operand,
) -> Result<(), BusError> {
    let v = load_operand(cpu, bus, operand)?;
    lda(cpu, v);
    Ok(())
}

#[inline]
pub(super) fn op_ldx<C: CpuRegs, B: Bus + ?Sized>(
    cpu: &mut C,
    bus: &mut B,
    operand: Operand,
) -> Result<(), BusError> {
    let v = load_operand(cpu, bus, operand)?;
    ldx(cpu, v);
    Ok(())
}

#[inline]
pub(super) fn op_ldy<C: CpuRegs, B: Bus + ?Sized>(
    cpu: &mut C,
    bus: &mut B,
    operand: Operand,
) -> Result<(), BusError> {
    let v = load_operand(cpu, bus, operand)?;
    ldy(cpu, v);
    Ok(())
}

#[inline]
pub(super) fn op_sta<C: CpuRegs, B: Bus + ?Sized>(
    cpu: &C,
    bus: &mut B,
    operand: Operand,
) -> Result<(), BusError> {
    store(bus, operand, cpu.a())
}

#[inline]
pub(super) fn op_stx<C: CpuRegs, B: Bus + ?Sized>(
    cpu: &C,
    bus: &mut B,
    operand: Operand,
) -> Result<(), BusError> {
    store(bus, operand, cpu.x())
}

#[inline]
pub(super) fn op_sty<C: CpuRegs, B: Bus + ?Sized>(
    cpu: &C,
    bus: &mut B,
    operand: Operand,
) -> Result<(), BusError> {
    store(bus, operand, cpu.y())
}

#[inline]
fn store<B: Bus + ?Sized>(bus: &mut B, operand: Operand, v: u8) -> Result<(), BusError> {
    match address_of(operand) {
        Some(addr) => bus.write(addr, v),
        None => Ok(()),
    }
}
