//! Runtime configuration for the CPU core.

/// Options fixed at construction time (`Cpu::with_config`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuConfig {
    /// Honour the D flag in ADC/SBC. NMOS parts do; decimal-less
    /// derivatives (e.g. the 2A03) ignore it and always add in binary.
    pub decimal_mode: bool,
}

impl CpuConfig {
    /// Stock NMOS 6502.
    pub const NMOS: Self = Self { decimal_mode: true };

    /// 6502 core without the decimal adjuster.
    pub const NO_DECIMAL: Self = Self {
        decimal_mode: false,
    };
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self::NMOS
    }
}
