/*!
RAM module: a flat 64 KiB store covering the whole CPU address space.

Address map:
- $0000-$FFFF: one byte per address, no mirroring.

Optionally a single address range can be write-protected to model ROM; a
write into it is reported as `BusError::ReadOnly` rather than silently
dropped, so a runaway program surfaces to the host.
*/

use std::ops::RangeInclusive;

use super::{Bus, BusError};

/// Size of the CPU address space (in bytes).
pub const ADDRESS_SPACE_SIZE: usize = 0x1_0000;

/// Flat 64 KiB memory implementing [`Bus`].
pub struct Ram {
    data: Box<[u8]>,
    read_only: Option<RangeInclusive<u16>>,
}

impl Default for Ram {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Ram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ram")
            .field("len", &self.data.len())
            .field("read_only", &self.read_only)
            .finish()
    }
}

impl Ram {
    /// Create a new RAM instance initialized to 0.
    #[inline]
    pub fn new() -> Self {
        Self {
            data: vec![0; ADDRESS_SPACE_SIZE].into_boxed_slice(),
            read_only: None,
        }
    }

    /// Clear contents to 0. Write protection is kept.
    #[inline]
    pub fn reset(&mut self) {
        self.data.fill(0);
    }

    /// Reject CPU writes inside `range` from now on.
    pub fn protect(&mut self, range: RangeInclusive<u16>) {
        self.read_only = Some(range);
    }

    /// Drop any write protection.
    pub fn unprotect(&mut self) {
        self.read_only = None;
    }

    /// Read a byte without going through the `Bus` trait (no side effects).
    #[inline]
    pub fn peek(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    /// Store a byte ignoring write protection. Intended for loaders and tests.
    #[inline]
    pub fn poke(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }

    /// Expose the internal slice (read-only). Useful for diagnostics or hashing.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    fn is_protected(&self, addr: u16) -> bool {
        self.read_only
            .as_ref()
            .is_some_and(|range| range.contains(&addr))
    }
}

impl Bus for Ram {
    #[inline]
    fn read(&mut self, addr: u16) -> Result<u8, BusError> {
        Ok(self.peek(addr))
    }

    #[inline]
    fn write(&mut self, addr: u16, value: u8) -> Result<(), BusError> {
        if self.is_protected(addr) {
            return Err(BusError::ReadOnly { addr, value });
        }
        self.poke(addr, value);
        Ok(())
    }
}
