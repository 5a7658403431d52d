/*!
branches.rs - BPL / BMI / BVC / BVS / BCC / BCS / BNE / BEQ

Each branch tests one flag against an expected state. Taken branches add
the displacement to the PC of the following instruction; the dispatcher
charges +1 for a taken branch and +1 more when the target lies on a
different page than that following instruction.
*/

use crate::bus::{Bus, BusError};
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{BranchOutcome, branch, get_flag};
use crate::cpu::regs::CpuRegs;

/// Branch when `flag` reads as `expected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Condition {
    pub flag: u8,
    pub expected: bool,
}

/// A taken branch reads the next opcode and discards it; crossing a page
/// costs one more read at the target offset on the old page.
pub(super) fn op_branch<C: CpuRegs, B: Bus + ?Sized>(
    cpu: &mut C,
    bus: &mut B,
    operand: Operand,
    cond: Condition,
) -> Result<BranchOutcome, BusError> {
    debug_assert!(
        matches!(operand, Operand::Relative(_)),
        "branch resolved to {operand:?}"
    );
    let Operand::Relative(offset) = operand else {
        return Ok(BranchOutcome::default());
    };
    let take = get_flag(cpu, cond.flag) == cond.expected;
    let next = cpu.pc();
    let outcome = branch(cpu, offset, take);
    if outcome.taken {
        bus.read(next)?;
        if outcome.page_crossed {
            bus.read((next & 0xFF00) | (cpu.pc() & 0x00FF))?;
        }
    }
    Ok(outcome)
}
