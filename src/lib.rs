#![doc = r#"
nmos6502 library crate.

A cycle-counted NMOS 6502 instruction execution core. The host supplies
memory through the `Bus` trait and drives the clock one cycle at a time
(`Cpu::tick`) or one instruction at a time (`Cpu::step`).

Modules:
- bus: `Bus` trait, `BusError`, and a flat 64 KiB `Ram`
- cpu: 6502 core (facade + state + table + dispatch + execute modules)
- error: `CpuError`, bus faults annotated with the faulting PC
- loader: raw image loading and vector setup

In tests, shared fixtures are available under `crate::test_utils`.
"#]

pub mod bus;
pub mod cpu;
pub mod error;
pub mod loader;

// Re-export commonly used types at the crate root for convenience.
pub use bus::{Bus, BusError, Ram};
pub use cpu::{Cpu, CpuConfig};
pub use error::CpuError;
pub use loader::{LoadError, Vectors};

// Shared test utilities (only compiled for tests)
#[cfg(test)]
pub mod test_utils;
