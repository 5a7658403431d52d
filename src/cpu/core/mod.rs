/*!
core::Cpu - 6502 CPU façade wrapping `CpuState`.

Design
======
- `Cpu` owns the architectural state (`CpuState`), the cycle accountant,
  the latched input signals and the runtime configuration.
- The clock is `tick`: one call = one CPU cycle. On a sequence boundary the
  tick samples RESET > NMI > IRQ, then either runs the selected entry
  sequence or one full instruction (all bus traffic happens on this first
  tick). The remaining cycles of the sequence elapse on later ticks.
- `step` / `run` are conveniences that tick to the next boundary.

Errors
======
Bus faults abort the sequence and surface as `CpuError::Bus` carrying the
PC at which the sequence started. The registers are rolled back to their
values at that boundary and no cycles are charged, so the next tick retries
the same sequence (a latched NMI or RESET stays pending). Bus writes made
before the fault are the host's to undo.
*/

use crate::bus::Bus;
use crate::cpu::config::CpuConfig;
use crate::cpu::cycles::{CycleAccountant, INTERRUPT_CYCLES};
use crate::cpu::dispatch::execute_instruction;
use crate::cpu::interrupts::{Interrupt, Phase, Signals, enter_interrupt, run_reset};
use crate::cpu::state::{CpuState, IRQ_DISABLE, NEGATIVE, ZERO};
use crate::error::CpuError;

#[derive(Debug, Clone)]
pub struct Cpu {
    state: CpuState,
    cycles: CycleAccountant,
    signals: Signals,
    phase: Phase,
    config: CpuConfig,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// Construct a stock NMOS CPU in its power-on state (reset pending).
    pub fn new() -> Self {
        Self::with_config(CpuConfig::default())
    }

    pub fn with_config(config: CpuConfig) -> Self {
        Self {
            state: CpuState::new(),
            cycles: CycleAccountant::new(),
            signals: Signals::power_on(),
            phase: Phase::Running,
            config,
        }
    }

    pub fn config(&self) -> &CpuConfig {
        &self.config
    }

    /// Return immutable reference to internal state (for inspection / testing).
    pub fn state(&self) -> &CpuState {
        &self.state
    }

    /// Return mutable reference to internal state.
    pub fn state_mut(&mut self) -> &mut CpuState {
        &mut self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Cycles elapsed since construction.
    pub fn total_cycles(&self) -> u64 {
        self.cycles.total()
    }

    /// Cycles the current sequence still owes (0 on a boundary).
    pub fn remaining_cycles(&self) -> u32 {
        self.cycles.remaining()
    }

    pub fn at_boundary(&self) -> bool {
        self.cycles.at_boundary()
    }

    // ---------------------------------------------------------------------
    // Input signals
    // ---------------------------------------------------------------------

    /// Assert RESET. Whatever the current sequence still owes is dropped;
    /// the reset sequence starts on the next tick.
    pub fn trigger_reset(&mut self) {
        self.cycles.discard();
        self.signals.reset_pending = true;
    }

    /// Latch an NMI edge. Serviced at the next boundary.
    pub fn trigger_nmi(&mut self) {
        self.signals.nmi_pending = true;
    }

    /// Drive the IRQ line level.
    pub fn set_irq_line(&mut self, asserted: bool) {
        self.signals.irq_line = asserted;
    }

    pub fn signals(&self) -> Signals {
        self.signals
    }

    // ---------------------------------------------------------------------
    // Clock
    // ---------------------------------------------------------------------

    /// Advance one cycle. Returns true when this cycle completed a sequence.
    ///
    /// On a bus fault the registers are restored to the boundary snapshot;
    /// memory already written (stack pushes, stores) is not.
    pub fn tick<B: Bus + ?Sized>(&mut self, bus: &mut B) -> Result<bool, CpuError> {
        if self.cycles.at_boundary() {
            let snapshot = self.state;
            let cost = self.begin_sequence(bus).map_err(|source| {
                self.state = snapshot;
                CpuError::Bus {
                    pc: snapshot.pc,
                    source,
                }
            })?;
            self.cycles.begin(cost);
        }
        let done = self.cycles.consume();
        if done {
            self.phase = Phase::Running;
        }
        Ok(done)
    }

    /// Tick until the next boundary. Returns the cycles consumed.
    pub fn step<B: Bus + ?Sized>(&mut self, bus: &mut B) -> Result<u32, CpuError> {
        let mut cycles = 0;
        loop {
            cycles += 1;
            if self.tick(bus)? {
                return Ok(cycles);
            }
        }
    }

    /// Run up to `sequences` instructions / entry sequences. Returns the
    /// cycles consumed.
    pub fn run<B: Bus + ?Sized>(&mut self, bus: &mut B, sequences: usize) -> Result<u64, CpuError> {
        let mut cycles = 0u64;
        for _ in 0..sequences {
            cycles += self.step(bus)? as u64;
        }
        Ok(cycles)
    }

    /// Assert RESET and run the reset sequence to completion.
    pub fn reset<B: Bus + ?Sized>(&mut self, bus: &mut B) -> Result<u32, CpuError> {
        self.trigger_reset();
        self.step(bus)
    }

    fn begin_sequence<B: Bus + ?Sized>(&mut self, bus: &mut B) -> Result<u32, crate::bus::BusError> {
        let irq_masked = self.state.is_flag_set(IRQ_DISABLE);
        match self.signals.sample(irq_masked) {
            Some(Phase::ServicingReset) => {
                run_reset(&mut self.state, bus)?;
                self.signals.reset_pending = false;
                self.phase = Phase::ServicingReset;
                Ok(INTERRUPT_CYCLES)
            }
            Some(Phase::ServicingNmi) => {
                enter_interrupt(&mut self.state, bus, Interrupt::Nmi)?;
                self.signals.nmi_pending = false;
                self.phase = Phase::ServicingNmi;
                Ok(INTERRUPT_CYCLES)
            }
            Some(Phase::ServicingIrq) => {
                enter_interrupt(&mut self.state, bus, Interrupt::Irq)?;
                self.phase = Phase::ServicingIrq;
                Ok(INTERRUPT_CYCLES)
            }
            Some(Phase::Running) | None => {
                self.phase = Phase::Running;
                execute_instruction(&mut self.state, bus, &self.config)
            }
        }
    }

    // ---------------------------------------------------------------------
    // Register accessors (read)
    // ---------------------------------------------------------------------
    pub fn a(&self) -> u8 {
        self.state.a
    }
    pub fn x(&self) -> u8 {
        self.state.x
    }
    pub fn y(&self) -> u8 {
        self.state.y
    }
    pub fn sp(&self) -> u8 {
        self.state.sp
    }
    pub fn pc(&self) -> u16 {
        self.state.pc
    }
    pub fn status(&self) -> u8 {
        self.state.status()
    }

    // ---------------------------------------------------------------------
    // Register mutators (write)
    // ---------------------------------------------------------------------
    pub fn set_a(&mut self, v: u8) {
        self.state.a = v;
    }
    pub fn set_x(&mut self, v: u8) {
        self.state.x = v;
    }
    pub fn set_y(&mut self, v: u8) {
        self.state.y = v;
    }
    pub fn set_sp(&mut self, v: u8) {
        self.state.sp = v;
    }
    pub fn set_pc(&mut self, v: u16) {
        self.state.pc = v;
    }
    /// Replace P. Bit 5 reads as set and B is never held.
    pub fn set_status(&mut self, v: u8) {
        self.state.set_status(v);
    }

    // ---------------------------------------------------------------------
    // Flag helpers
    // ---------------------------------------------------------------------
    pub fn set_flag(&mut self, mask: u8, on: bool) {
        self.state.assign_flag(mask, on);
    }

    pub fn get_flag(&self, mask: u8) -> bool {
        self.state.is_flag_set(mask)
    }

    pub fn update_zn(&mut self, v: u8) {
        self.set_flag(ZERO, v == 0);
        self.set_flag(NEGATIVE, (v & 0x80) != 0);
    }
}
