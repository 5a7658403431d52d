/*!
logical.rs - AND / ORA / EOR / BIT

AND/ORA/EOR combine the operand into A and set Z/N from the result.
BIT leaves A untouched: Z from A & M, N and V copied from M bits 7 and 6.
*/

use crate::bus::{Bus, BusError};
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{and, bit, eor, load_operand, ora};
use crate::cpu::regs::CpuRegs;

/// Which bitwise combination an accumulator op performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Logic {
    And,
    Ora,
    Eor,
}

pub(super) fn op_logic<C: CpuRegs, B: Bus + ?Sized>(
    cpu: &mut C,
    bus: &mut B,
    operand: Operand,
    logic: Logic,
) -> Result<(), BusError> {
    let v = load_operand(cpu, bus, operand)?;
    match logic {
        Logic::And => and(cpu, v),
        Logic::Ora => ora(cpu, v),
        Logic::Eor => eor(cpu, v),
    }
    Ok(())
}

pub(super) fn op_bit<C: CpuRegs, B: Bus + ?Sized>(
    cpu: &mut C,
    bus: &mut B,
    operand: Operand,
) -> Result<(), BusError> {
    let v = load_operand(cpu, bus, operand)?;
    bit(cpu, v);
    Ok(())
}
