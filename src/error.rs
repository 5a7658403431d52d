//! Crate-level error types.
//!
//! Bus faults are produced by [`Bus`](crate::bus::Bus) implementations as
//! [`BusError`] and surface from the core as [`CpuError`], annotated with
//! the program counter of the sequence that faulted.

use thiserror::Error;

pub use crate::bus::BusError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CpuError {
    /// The bus refused an access made while executing the sequence that
    /// started at `pc`.
    #[error("bus fault in sequence starting at ${pc:04X}")]
    Bus {
        pc: u16,
        #[source]
        source: BusError,
    },
}

impl CpuError {
    /// Program counter at the start of the faulting sequence.
    pub fn pc(&self) -> u16 {
        match self {
            CpuError::Bus { pc, .. } => *pc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn bus_fault_keeps_source() {
        let err = CpuError::Bus {
            pc: 0x8000,
            source: BusError::Unmapped { addr: 0x4020 },
        };
        assert_eq!(err.pc(), 0x8000);
        assert_eq!(err.to_string(), "bus fault in sequence starting at $8000");
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("no device mapped at $4020"));
    }
}
