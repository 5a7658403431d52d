//! Raw binary image loading and vector setup.
//!
//! Images are flat byte blobs copied into the address space through the
//! [`Bus`], so any device map a host builds sees ordinary CPU-style writes.
//! Load images before write-protecting a region.

use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use crate::bus::{ADDRESS_SPACE_SIZE, Bus, BusError};
use crate::cpu::interrupts::{IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read image {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("image of {len} bytes at ${base:04X} runs past the end of the address space")]
    Overflow { base: u16, len: usize },
    #[error(transparent)]
    Bus(#[from] BusError),
}

/// Targets for the three hardware vectors at $FFFA-$FFFF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vectors {
    pub nmi: u16,
    pub reset: u16,
    pub irq: u16,
}

impl Vectors {
    /// All three vectors pointing at `addr`.
    pub const fn uniform(addr: u16) -> Self {
        Self {
            nmi: addr,
            reset: addr,
            irq: addr,
        }
    }
}

/// Copy `bytes` into the address space starting at `base`.
pub fn load_image<B: Bus + ?Sized>(bus: &mut B, base: u16, bytes: &[u8]) -> Result<(), LoadError> {
    if base as usize + bytes.len() > ADDRESS_SPACE_SIZE {
        return Err(LoadError::Overflow {
            base,
            len: bytes.len(),
        });
    }
    for (addr, &b) in (base..=u16::MAX).zip(bytes) {
        bus.write(addr, b)?;
    }
    Ok(())
}

/// Read a file and load it at `base`. Returns the number of bytes loaded.
pub fn load_file<B: Bus + ?Sized>(
    bus: &mut B,
    base: u16,
    path: impl AsRef<Path>,
) -> Result<usize, LoadError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_image(bus, base, &bytes)?;
    debug!("loaded {} bytes from {} at ${base:04X}", bytes.len(), path.display());
    Ok(bytes.len())
}

/// Write the NMI, RESET and IRQ/BRK vectors (little endian).
pub fn set_vectors<B: Bus + ?Sized>(bus: &mut B, vectors: Vectors) -> Result<(), BusError> {
    for (at, target) in [
        (NMI_VECTOR, vectors.nmi),
        (RESET_VECTOR, vectors.reset),
        (IRQ_VECTOR, vectors.irq),
    ] {
        bus.write(at, (target & 0x00FF) as u8)?;
        bus.write(at.wrapping_add(1), (target >> 8) as u8)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::Ram;

    #[test]
    fn image_lands_at_base() {
        let mut ram = Ram::new();
        load_image(&mut ram, 0x0600, &[0xA9, 0x01, 0x00]).unwrap();
        assert_eq!(&ram.as_slice()[0x0600..0x0603], &[0xA9, 0x01, 0x00]);
    }

    #[test]
    fn image_may_end_at_top_of_memory() {
        let mut ram = Ram::new();
        load_image(&mut ram, 0xFFFE, &[0x12, 0x34]).unwrap();
        assert_eq!(ram.peek(0xFFFF), 0x34);
    }

    #[test]
    fn oversized_image_is_rejected_untouched() {
        let mut ram = Ram::new();
        let err = load_image(&mut ram, 0xFFFE, &[1, 2, 3]).unwrap_err();
        assert!(matches!(err, LoadError::Overflow { base: 0xFFFE, len: 3 }));
        assert_eq!(ram.peek(0xFFFE), 0);
    }

    #[test]
    fn protected_region_surfaces_bus_error() {
        let mut ram = Ram::new();
        ram.protect(0x8000..=0xFFFF);
        let err = load_image(&mut ram, 0x8000, &[0xEA]).unwrap_err();
        assert!(matches!(err, LoadError::Bus(BusError::ReadOnly { addr: 0x8000, .. })));
    }

    #[test]
    fn vectors_are_little_endian() {
        let mut ram = Ram::new();
        set_vectors(
            &mut ram,
            Vectors {
                nmi: 0x8456,
                reset: 0x8123,
                irq: 0x8ABC,
            },
        )
        .unwrap();
        assert_eq!(&ram.as_slice()[0xFFFA..], &[0x56, 0x84, 0x23, 0x81, 0xBC, 0x8A]);
        assert_eq!(Vectors::uniform(0x8000).irq, 0x8000);
    }

    #[test]
    fn load_file_round_trip_and_missing_file() {
        let path = std::env::temp_dir().join(format!("nmos6502-loader-{}.bin", std::process::id()));
        std::fs::write(&path, [0xEA, 0xEA, 0x4C]).unwrap();
        let mut ram = Ram::new();
        assert_eq!(load_file(&mut ram, 0x0200, &path).unwrap(), 3);
        assert_eq!(ram.peek(0x0202), 0x4C);
        std::fs::remove_file(&path).unwrap();

        let err = load_file(&mut ram, 0x0200, &path).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().starts_with("failed to read image"));
    }
}
