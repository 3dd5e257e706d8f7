//! Controller configuration

use crate::regs::IrqFlags;

/// Default number of status polls in the reset handshake
pub const DEFAULT_RESET_RETRIES: u32 = 1000;

/// GPU controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpuConfig {
    /// Status polls before the reset handshake gives up
    pub reset_retries: u32,
    /// Spin-loop hints issued between two status polls
    pub reset_backoff: u32,
    /// Interrupt sources unmasked by initialization
    pub irq_enable: IrqFlags,
}

impl GpuConfig {
    /// Configuration matching the reference bring-up sequence
    pub const fn new() -> Self {
        Self {
            reset_retries: DEFAULT_RESET_RETRIES,
            reset_backoff: 0,
            irq_enable: IrqFlags::PRIMARY,
        }
    }

    /// Set the reset poll budget
    pub const fn with_reset_retries(mut self, retries: u32) -> Self {
        self.reset_retries = retries;
        self
    }

    /// Set the per-poll backoff
    pub const fn with_reset_backoff(mut self, spins: u32) -> Self {
        self.reset_backoff = spins;
        self
    }

    /// Set the interrupt sources unmasked at initialization
    pub const fn with_irq_enable(mut self, irqs: IrqFlags) -> Self {
        self.irq_enable = irqs;
        self
    }

    /// Poll budget actually used; the hardware is always sampled at least once
    pub const fn effective_retries(&self) -> u32 {
        if self.reset_retries == 0 {
            1
        } else {
            self.reset_retries
        }
    }
}

impl Default for GpuConfig {
    fn default() -> Self {
        Self::new()
    }
}
