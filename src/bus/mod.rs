#![doc = r#"
Bus module: the memory interface the CPU core consumes.

Overview
- `Bus` is the only way the core touches memory. Hosts map RAM, ROM and
  device registers onto the 16-bit address space however they like; the core
  never assumes contiguous storage.
- Every access is treated as observable: the core issues reads and writes in
  hardware order and count, and never retries or coalesces them.
- A host that cannot service an access returns a `BusError`; the core
  propagates it unchanged (wrapped with PC context by `Cpu::tick`).

Modules
- ram: flat 64 KiB backing store implementing `Bus` (default host memory and
  test fixture).
"#]

use thiserror::Error;

pub mod ram;

pub use ram::{ADDRESS_SPACE_SIZE, Ram};

/// Fault reported by a host bus when an access cannot be serviced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BusError {
    /// No device answers at this address.
    #[error("no device mapped at ${addr:04X}")]
    Unmapped { addr: u16 },

    /// The address is backed by storage that rejects writes.
    #[error("write of ${value:02X} to read-only address ${addr:04X}")]
    ReadOnly { addr: u16, value: u8 },

    /// A device failed while servicing the access.
    #[error("device fault at ${addr:04X}: {reason}")]
    Device { addr: u16, reason: String },
}

/// CPU-visible memory interface.
///
/// Implementations must accept the full 16-bit address space. What an
/// unmapped address returns (open bus, 0xFF, last value...) is the host's
/// decision; returning `BusError::Unmapped` stops the CPU with an error.
pub trait Bus {
    /// Read one byte. May have side effects (device registers).
    fn read(&mut self, addr: u16) -> Result<u8, BusError>;

    /// Write one byte.
    fn write(&mut self, addr: u16, value: u8) -> Result<(), BusError>;

    /// Read a little-endian word (`addr` low, `addr + 1` high, wrapping at
    /// the top of the address space).
    fn read_word(&mut self, addr: u16) -> Result<u16, BusError> {
        let lo = self.read(addr)? as u16;
        let hi = self.read(addr.wrapping_add(1))? as u16;
        Ok((hi << 8) | lo)
    }
}

impl<B: Bus + ?Sized> Bus for &mut B {
    #[inline]
    fn read(&mut self, addr: u16) -> Result<u8, BusError> {
        (**self).read(addr)
    }

    #[inline]
    fn write(&mut self, addr: u16, value: u8) -> Result<(), BusError> {
        (**self).write(addr, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_word_is_little_endian_and_wraps() {
        let mut ram = Ram::new();
        ram.write(0x1234, 0xCD).unwrap();
        ram.write(0x1235, 0xAB).unwrap();
        assert_eq!(ram.read_word(0x1234).unwrap(), 0xABCD);

        ram.write(0xFFFF, 0x34).unwrap();
        ram.write(0x0000, 0x12).unwrap();
        assert_eq!(ram.read_word(0xFFFF).unwrap(), 0x1234);
    }

    #[test]
    fn bus_error_messages_carry_address() {
        let e = BusError::ReadOnly {
            addr: 0xFFFC,
            value: 0x42,
        };
        assert_eq!(e.to_string(), "write of $42 to read-only address $FFFC");
        let e = BusError::Unmapped { addr: 0x4020 };
        assert_eq!(e.to_string(), "no device mapped at $4020");
    }
}
