/*!
arithmetic.rs - ADC / SBC

ADC: 0x69, 0x65, 0x75, 0x6D, 0x7D*, 0x79*, 0x61, 0x71*
SBC: 0xE9, 0xE5, 0xF5, 0xED, 0xFD*, 0xF9*, 0xE1, 0xF1*

(*) +1 cycle on page cross, charged by the dispatcher from the table's
penalty kind.

Decimal mode is applied when D is set and the core was configured with a
decimal adjuster (`CpuConfig::decimal_mode`).
*/

use crate::bus::{Bus, BusError};
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{adc, load_operand, sbc};
use crate::cpu::regs::CpuRegs;

pub(super) fn op_adc<C: CpuRegs, B: Bus + ?Sized>(
    cpu: &mut C,
    bus: &mut B,
    operand: Operand,
    decimal_enabled: bool,
) -> Result<(), BusError> {
    let v = load_operand(cpu, bus, operand)?;
    adc(cpu, v, decimal_enabled);
    Ok(())
}

pub(super) fn op_sbc<C: CpuRegs, B: Bus + ?Sized>(
    cpu: &mut C,
    bus: &mut B,
    operand: Operand,
    decimal_enabled: bool,
) -> Result<(), BusError> {
    let v = load_operand(cpu, bus, operand)?;
    sbc(cpu, v, decimal_enabled);
    Ok(())
}
