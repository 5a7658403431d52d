/*!
interrupts.rs - RESET / NMI / IRQ signal latching and entry sequences

Overview
========
Signals are latched here by the host and sampled by the core only when no
sequence is in flight (instruction boundary). Priority on a boundary:

```text
    RESET  >  NMI  >  IRQ (only while the line is high and I is clear)
```

Entry sequences
===============
- RESET: two reads at PC, three stack reads with S decremented after
  each (the pushes with writes suppressed), set I, PC from $FFFC.
  A/X/Y untouched.
- NMI / IRQ / BRK share `enter_interrupt`:
    push PCH, push PCL, push P (bit 5 set, B only for BRK), set I,
    PC from the vector.
  NMI and IRQ read PC twice first without advancing it. BRK has already
  read its signature byte and steps PC over it.

All three hardware sequences cost `INTERRUPT_CYCLES`.
*/

use log::debug;

use crate::bus::{Bus, BusError};
use crate::cpu::execute::{push_status_with_break, push_word, set_flag, stack_dummy_read};
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::IRQ_DISABLE;

pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// What the core is doing in the sequence currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Running,
    ServicingReset,
    ServicingNmi,
    ServicingIrq,
}

/// Sources that run the shared push-and-vector entry sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Interrupt {
    Nmi,
    Irq,
    Brk,
}

impl Interrupt {
    const fn vector(self) -> u16 {
        match self {
            Interrupt::Nmi => NMI_VECTOR,
            Interrupt::Irq | Interrupt::Brk => IRQ_VECTOR,
        }
    }

    /// Bytes skipped before PC is pushed (BRK's signature byte).
    const fn pc_increment(self) -> u16 {
        match self {
            Interrupt::Brk => 1,
            Interrupt::Nmi | Interrupt::Irq => 0,
        }
    }

    /// Discarded reads at PC before the pushes. BRK's two happen as its
    /// opcode and signature fetches.
    const fn dummy_reads(self) -> usize {
        match self {
            Interrupt::Brk => 0,
            Interrupt::Nmi | Interrupt::Irq => 2,
        }
    }

    const fn sets_break(self) -> bool {
        matches!(self, Interrupt::Brk)
    }
}

/// Host-driven input lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Signals {
    /// Edge latched by `trigger_reset`, cleared once the sequence starts.
    pub reset_pending: bool,
    /// Edge latched by `trigger_nmi`, cleared when serviced.
    pub nmi_pending: bool,
    /// Level; stays asserted until the host lowers it.
    pub irq_line: bool,
}

impl Signals {
    /// Power-on: a reset is pending.
    pub fn power_on() -> Self {
        Self {
            reset_pending: true,
            ..Self::default()
        }
    }

    /// Highest-priority service due at a boundary, if any.
    pub fn sample(&self, irq_masked: bool) -> Option<Phase> {
        if self.reset_pending {
            Some(Phase::ServicingReset)
        } else if self.nmi_pending {
            Some(Phase::ServicingNmi)
        } else if self.irq_line && !irq_masked {
            Some(Phase::ServicingIrq)
        } else {
            None
        }
    }
}

/// Push PC and P, set I, and jump through the source's vector.
pub(crate) fn enter_interrupt<C: CpuRegs, B: Bus + ?Sized>(
    cpu: &mut C,
    bus: &mut B,
    source: Interrupt,
) -> Result<(), BusError> {
    for _ in 0..source.dummy_reads() {
        bus.read(cpu.pc())?;
    }
    cpu.advance_pc(source.pc_increment());
    let return_pc = cpu.pc();
    push_word(cpu, bus, return_pc)?;
    push_status_with_break(cpu, bus, source.sets_break())?;
    set_flag(cpu, IRQ_DISABLE, true);
    let target = bus.read_word(source.vector())?;
    cpu.set_pc(target);
    debug!("{source:?} entry: return ${return_pc:04X} -> ${target:04X}");
    Ok(())
}

/// Reset sequence: three suppressed stack pushes, I set, PC from $FFFC.
pub(crate) fn run_reset<C: CpuRegs, B: Bus + ?Sized>(
    cpu: &mut C,
    bus: &mut B,
) -> Result<(), BusError> {
    bus.read(cpu.pc())?;
    bus.read(cpu.pc())?;
    for _ in 0..3 {
        stack_dummy_read(cpu, bus)?;
        cpu.set_sp(cpu.sp().wrapping_sub(1));
    }
    let target = bus.read_word(RESET_VECTOR)?;
    set_flag(cpu, IRQ_DISABLE, true);
    cpu.set_pc(target);
    debug!("reset: PC=${target:04X} SP=${:02X}", cpu.sp());
    Ok(())
}
