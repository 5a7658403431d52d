/*!
control_flow.rs - JMP / JSR / RTS / RTI / BRK

Behavior Details
================
- JMP abs / JMP (ind): the resolver has already produced the target
  (indirect includes the $xxFF page-wrap quirk).
- JSR fetches its own operand: low byte, a read of the current stack
  slot, PCH and PCL pushed while PC still points at the high operand
  byte (so the pushed value is return address - 1), then the high byte.
- RTS reads the stack slot, pulls the return address, reads the byte at
  it and resumes one past it.
- RTI reads the stack slot, pulls P (B dropped, bit 5 forced) then PC; no +1.
- BRK: the resolver's implied read already fetched the signature byte.
  BRK steps over it and runs the shared interrupt entry with B set in the
  pushed status, vector $FFFE.
*/

use crate::bus::{Bus, BusError};
use crate::cpu::addressing::{Operand, fetch_byte};
use crate::cpu::execute::{address_of, plp, pop_word, push_word, stack_dummy_read};
use crate::cpu::interrupts::{Interrupt, enter_interrupt};
use crate::cpu::regs::CpuRegs;

#[inline]
pub(super) fn op_jmp<C: CpuRegs>(cpu: &mut C, operand: Operand) {
    if let Some(target) = address_of(operand) {
        cpu.set_pc(target);
    }
}

pub(super) fn op_jsr<C: CpuRegs, B: Bus + ?Sized>(cpu: &mut C, bus: &mut B) -> Result<(), BusError> {
    let lo = fetch_byte(cpu, bus)?;
    stack_dummy_read(cpu, bus)?;
    let ret = cpu.pc();
    push_word(cpu, bus, ret)?;
    let hi = bus.read(cpu.pc())?;
    cpu.set_pc(u16::from_le_bytes([lo, hi]));
    Ok(())
}

#[inline]
pub(super) fn op_rts<C: CpuRegs, B: Bus + ?Sized>(cpu: &mut C, bus: &mut B) -> Result<(), BusError> {
    stack_dummy_read(cpu, bus)?;
    let ret = pop_word(cpu, bus)?;
    bus.read(ret)?;
    cpu.set_pc(ret.wrapping_add(1));
    Ok(())
}

#[inline]
pub(super) fn op_rti<C: CpuRegs, B: Bus + ?Sized>(cpu: &mut C, bus: &mut B) -> Result<(), BusError> {
    stack_dummy_read(cpu, bus)?;
    plp(cpu, bus)?;
    let pc = pop_word(cpu, bus)?;
    cpu.set_pc(pc);
    Ok(())
}

#[inline]
pub(super) fn op_brk<C: CpuRegs, B: Bus + ?Sized>(cpu: &mut C, bus: &mut B) -> Result<(), BusError> {
    enter_interrupt(cpu, bus, Interrupt::Brk)
}
