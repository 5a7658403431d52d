/*!
compare.rs - CMP / CPX / CPY

Flags from `reg - M`: C = reg >= M, Z = equal, N = bit 7 of the
difference. The register is never written back.
*/

use crate::bus::{Bus, BusError};
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{compare, load_operand};
use crate::cpu::regs::CpuRegs;

/// Register being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Reg {
    A,
    X,
    Y,
}

pub(super) fn op_compare<C: CpuRegs, B: Bus + ?Sized>(
    cpu: &mut C,
    bus: &mut B,
    operand: Operand,
    reg: Reg,
) -> Result<(), BusError> {
    let v = load_operand(cpu, bus, operand)?;
    let r = match reg {
        Reg::A => cpu.a(),
        Reg::X => cpu.x(),
        Reg::Y => cpu.y(),
    };
    compare(cpu, r, v);
    Ok(())
}
