/*!
cycles.rs - Cycle accounting for the 6502 CPU core.

Purpose
=======
`CycleAccountant` tracks two numbers:
  - `remaining`: cycles still owed by the sequence (instruction, interrupt
    entry or reset) that started on the last boundary.
  - `total`    : monotonic count of every tick since construction.

A sequence's bus traffic happens on its first tick; the remaining cycles
then elapse one per tick. The façade asks `at_boundary()` before fetching
the next sequence.

Dynamic penalties
=================
`instruction_cycles` combines an opcode's base count with the dynamic
penalties reported by execution:
  - page cross on indexed reads (+1),
  - branch taken (+1) and branch target on another page (+1 more).
*/

use crate::cpu::table::{Opcode, Penalty};

/// Cycles charged for NMI / IRQ entry and for the reset sequence.
pub const INTERRUPT_CYCLES: u32 = 7;

/// Dynamic facts about an executed instruction that affect its cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Extra {
    pub page_crossed: bool,
    pub branch_taken: bool,
    pub branch_page_crossed: bool,
}

/// Total cycle cost of an instruction: base + applicable penalties.
pub fn instruction_cycles(opcode: &Opcode, extra: Extra) -> u32 {
    let base = opcode.cycles as u32;
    match opcode.penalty {
        Penalty::None => base,
        Penalty::PageCross => base + extra.page_crossed as u32,
        Penalty::Branch => {
            base + extra.branch_taken as u32 + (extra.branch_taken && extra.branch_page_crossed) as u32
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleAccountant {
    remaining: u32,
    total: u64,
}

impl CycleAccountant {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no cycles are owed, i.e. the next tick starts a new sequence.
    #[inline]
    pub fn at_boundary(&self) -> bool {
        self.remaining == 0
    }

    #[inline]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Load the cost of a sequence that just started.
    #[inline]
    pub fn begin(&mut self, cycles: u32) {
        debug_assert!(self.remaining == 0, "sequence started mid-instruction");
        self.remaining = cycles;
    }

    /// Consume one cycle. Returns true if this cycle completed the sequence.
    #[inline]
    pub fn consume(&mut self) -> bool {
        self.total = self.total.wrapping_add(1);
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }

    /// Drop whatever the current sequence still owes (RESET).
    #[inline]
    pub fn discard(&mut self) {
        self.remaining = 0;
    }
}
