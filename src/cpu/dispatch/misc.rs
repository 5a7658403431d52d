/*!
misc.rs - Transfers, stack, flag and register inc/dec instructions

Covered
=======
  Transfers : TAX TAY TXA TYA TSX TXS   (TXS leaves P alone)
  Stack     : PHA PHP PLA PLP           (PHP pushes B and bit 5 set;
                                         PLP drops B, forces bit 5)
  Flags     : CLC SEC CLI SEI CLV CLD SED
  Inc/Dec   : INX INY DEX DEY
  NOP

None of these take a memory operand beyond the stack. The implied-mode
read of the following byte happens in the resolver; pulls add a read of
the current stack slot before S moves.
*/

use crate::bus::{Bus, BusError};
use crate::cpu::execute::{
    dex, dey, inx, iny, pha, php, pla, plp, set_flag, stack_dummy_read, tax, tay, tsx, txa,
    txs, tya,
};
use crate::cpu::regs::CpuRegs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Transfer {
    Tax,
    Tay,
    Txa,
    Tya,
    Tsx,
    Txs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Stack {
    Pha,
    Php,
    Pla,
    Plp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Step {
    Inx,
    Iny,
    Dex,
    Dey,
}

pub(super) fn op_transfer<C: CpuRegs>(cpu: &mut C, t: Transfer) {
    match t {
        Transfer::Tax => tax(cpu),
        Transfer::Tay => tay(cpu),
        Transfer::Txa => txa(cpu),
        Transfer::Tya => tya(cpu),
        Transfer::Tsx => tsx(cpu),
        Transfer::Txs => txs(cpu),
    }
}

pub(super) fn op_stack<C: CpuRegs, B: Bus + ?Sized>(
    cpu: &mut C,
    bus: &mut B,
    s: Stack,
) -> Result<(), BusError> {
    match s {
        Stack::Pha => pha(cpu, bus),
        Stack::Php => php(cpu, bus),
        Stack::Pla => {
            stack_dummy_read(cpu, bus)?;
            pla(cpu, bus)
        }
        Stack::Plp => {
            stack_dummy_read(cpu, bus)?;
            plp(cpu, bus)
        }
    }
}

#[inline]
pub(super) fn op_flag<C: CpuRegs>(cpu: &mut C, mask: u8, on: bool) {
    set_flag(cpu, mask, on);
}

pub(super) fn op_step<C: CpuRegs>(cpu: &mut C, s: Step) {
    match s {
        Step::Inx => inx(cpu),
        Step::Iny => iny(cpu),
        Step::Dex => dex(cpu),
        Step::Dey => dey(cpu),
    }
}
