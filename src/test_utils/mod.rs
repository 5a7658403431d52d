//! Shared test fixtures: flat-RAM machines with a program and vectors.
//!
//! Memory layout used by every fixture:
//! - program bytes at `PROGRAM_START` ($8000), RESET vector pointing there
//! - NMI vector -> `NMI_HANDLER` ($9000)
//! - IRQ/BRK vector -> `IRQ_HANDLER` ($A000)
//!
//! Handlers start out as zeroed memory (BRK); tests poke what they need.

#![allow(dead_code)]

use crate::bus::{Bus, BusError, Ram};
use crate::cpu::{Cpu, CpuConfig};
use crate::loader::{Vectors, load_image, set_vectors};

pub const PROGRAM_START: u16 = 0x8000;
pub const NMI_HANDLER: u16 = 0x9000;
pub const IRQ_HANDLER: u16 = 0xA000;

/// RAM holding `prg` at `PROGRAM_START` with the fixture vectors.
pub fn program_ram(prg: &[u8]) -> Ram {
    let mut ram = Ram::new();
    load_image(&mut ram, PROGRAM_START, prg).expect("program fits");
    set_vectors(
        &mut ram,
        Vectors {
            nmi: NMI_HANDLER,
            reset: PROGRAM_START,
            irq: IRQ_HANDLER,
        },
    )
    .expect("vectors writable");
    ram
}

/// A stock CPU that has completed its power-on reset, plus its memory.
pub fn setup(prg: &[u8]) -> (Cpu, Ram) {
    setup_with_config(prg, CpuConfig::default())
}

pub fn setup_with_config(prg: &[u8], config: CpuConfig) -> (Cpu, Ram) {
    let mut bus = program_ram(prg);
    let mut cpu = Cpu::with_config(config);
    cpu.reset(&mut bus).expect("reset");
    (cpu, bus)
}

/// One observed bus access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read(u16, u8),
    Write(u16, u8),
}

impl Access {
    pub fn addr(&self) -> u16 {
        match *self {
            Access::Read(a, _) | Access::Write(a, _) => a,
        }
    }
}

/// RAM-backed bus that records every access in order.
#[derive(Debug)]
pub struct RecordingBus {
    pub ram: Ram,
    pub accesses: Vec<Access>,
}

impl Bus for RecordingBus {
    fn read(&mut self, addr: u16) -> Result<u8, BusError> {
        let v = self.ram.read(addr)?;
        self.accesses.push(Access::Read(addr, v));
        Ok(v)
    }

    fn write(&mut self, addr: u16, value: u8) -> Result<(), BusError> {
        self.ram.write(addr, value)?;
        self.accesses.push(Access::Write(addr, value));
        Ok(())
    }
}

/// Like [`setup`], over a [`RecordingBus`].
pub fn recording_setup(prg: &[u8]) -> (Cpu, RecordingBus) {
    let mut bus = RecordingBus {
        ram: program_ram(prg),
        accesses: Vec::new(),
    };
    let mut cpu = Cpu::new();
    cpu.reset(&mut bus).expect("reset");
    (cpu, bus)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_vectors_and_program() {
        let ram = program_ram(&[0xA9, 0x01]);
        assert_eq!(ram.peek(PROGRAM_START), 0xA9);
        assert_eq!(&ram.as_slice()[0xFFFA..], &[0x00, 0x90, 0x00, 0x80, 0x00, 0xA0]);
    }

    #[test]
    fn recording_bus_logs_in_order() {
        let (_cpu, bus) = recording_setup(&[]);
        // power-on reset from PC=$0000, S=$00: no writes
        assert_eq!(
            bus.accesses,
            vec![
                Access::Read(0x0000, 0x00),
                Access::Read(0x0000, 0x00),
                Access::Read(0x0100, 0x00),
                Access::Read(0x01FF, 0x00),
                Access::Read(0x01FE, 0x00),
                Access::Read(0xFFFC, 0x00),
                Access::Read(0xFFFD, 0x80),
            ]
        );
    }
}
