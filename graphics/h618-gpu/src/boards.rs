//! Platform definitions for boards carrying the H618 GPU

use crate::regs::WINDOW_SIZE;

/// Where a GPU block sits on a given SoC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpuPlatform {
    /// SoC name
    pub soc: &'static str,
    /// Physical base of the GPU register window
    pub gpu_base: usize,
    /// Register window size in bytes
    pub window_size: usize,
    /// GPU interrupt number at the interrupt controller
    pub gpu_irq: u32,
}

/// Allwinner H618 (Orange Pi Zero 3)
pub const H618: GpuPlatform = GpuPlatform {
    soc: "Allwinner H618",
    gpu_base: 0x0180_0000,
    window_size: WINDOW_SIZE,
    gpu_irq: 97,
};
