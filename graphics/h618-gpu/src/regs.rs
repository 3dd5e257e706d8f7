//! H618 GPU register map
//!
//! Only the control block registers touched by bring-up and teardown are
//! typed; the job slot and MMU blocks are listed for layout reference.

use bitflags::bitflags;

use crate::io::RegisterIo;

/// Register byte offsets from the GPU base
pub mod offsets {
    pub const GPU_CTRL: usize = 0x000; // Control (reserved)
    pub const GPU_IRQ_CLEAR: usize = 0x024; // Interrupt clear, write 1 to clear
    pub const GPU_IRQ_MASK: usize = 0x028; // Interrupt mask
    pub const GPU_IRQ_STATUS: usize = 0x02C; // Interrupt status
    pub const GPU_COMMAND: usize = 0x030; // Command
    pub const GPU_STATUS: usize = 0x034; // Status
    pub const GPU_PWR_OVERRIDE: usize = 0x050; // Power override

    pub const JS0_BASE: usize = 0x1800; // Job slot 0
    pub const MMU_BASE: usize = 0x2000; // MMU control
    pub const AS0_BASE: usize = 0x2400; // Address space 0
}

/// Size of the GPU register window in bytes
pub const WINDOW_SIZE: usize = 0x4000;

/// Smallest window that covers every typed control register
pub const CONTROL_SPAN: usize = offsets::GPU_PWR_OVERRIDE + 4;

const _: () = assert!(offsets::AS0_BASE < WINDOW_SIZE);

/// Power override value forcing every domain on
pub const POWER_ON_ALL: u32 = 0xFFFF_FFFF;

/// Power override value releasing every domain
pub const POWER_OFF: u32 = 0;

/// Control block register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reg {
    Control,
    IrqClear,
    IrqMask,
    IrqStatus,
    Command,
    Status,
    PowerOverride,
}

impl Reg {
    /// Byte offset from the GPU base
    pub const fn offset(self) -> usize {
        match self {
            Reg::Control => offsets::GPU_CTRL,
            Reg::IrqClear => offsets::GPU_IRQ_CLEAR,
            Reg::IrqMask => offsets::GPU_IRQ_MASK,
            Reg::IrqStatus => offsets::GPU_IRQ_STATUS,
            Reg::Command => offsets::GPU_COMMAND,
            Reg::Status => offsets::GPU_STATUS,
            Reg::PowerOverride => offsets::GPU_PWR_OVERRIDE,
        }
    }

    /// Register name as used in hardware documentation
    pub const fn name(self) -> &'static str {
        match self {
            Reg::Control => "GPU_CTRL",
            Reg::IrqClear => "GPU_IRQ_CLEAR",
            Reg::IrqMask => "GPU_IRQ_MASK",
            Reg::IrqStatus => "GPU_IRQ_STATUS",
            Reg::Command => "GPU_COMMAND",
            Reg::Status => "GPU_STATUS",
            Reg::PowerOverride => "GPU_PWR_OVERRIDE",
        }
    }
}

bitflags! {
    /// Interrupt sources (mask, clear and status registers share the layout)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct IrqFlags: u32 {
        /// Primary interrupt source
        const PRIMARY = 1 << 0;

        const _ = !0;
    }
}

impl IrqFlags {
    /// Every interrupt source, named or not
    pub const ALL_SOURCES: Self = Self::from_bits_retain(u32::MAX);
}

bitflags! {
    /// GPU_STATUS bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct GpuStatus: u32 {
        /// Reset or other command still in progress
        const BUSY = 1 << 0;

        const _ = !0;
    }
}

bitflags! {
    /// GPU_COMMAND values
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct GpuCommand: u32 {
        /// Request a soft reset
        const SOFT_RESET = 0x01;
    }
}

/// Typed view over a register window
#[derive(Debug)]
pub struct Registers<I> {
    io: I,
}

impl<I: RegisterIo> Registers<I> {
    pub fn new(io: I) -> Self {
        Self { io }
    }

    /// Read a register
    #[inline]
    pub fn read(&self, reg: Reg) -> u32 {
        self.io.read32(reg.offset())
    }

    /// Write a register
    #[inline]
    pub fn write(&mut self, reg: Reg, value: u32) {
        self.io.write32(reg.offset(), value);
    }

    pub fn status(&self) -> GpuStatus {
        GpuStatus::from_bits_retain(self.read(Reg::Status))
    }

    pub fn issue_command(&mut self, command: GpuCommand) {
        log::debug!("{} <- {:#04x}", Reg::Command.name(), command.bits());
        self.write(Reg::Command, command.bits());
    }

    /// Acknowledge pending interrupts
    pub fn clear_irqs(&mut self, irqs: IrqFlags) {
        log::debug!("{} <- {:#010x}", Reg::IrqClear.name(), irqs.bits());
        self.write(Reg::IrqClear, irqs.bits());
    }

    /// Replace the set of unmasked interrupt sources
    pub fn set_irq_mask(&mut self, irqs: IrqFlags) {
        log::debug!("{} <- {:#010x}", Reg::IrqMask.name(), irqs.bits());
        self.write(Reg::IrqMask, irqs.bits());
    }

    pub fn irq_status(&self) -> IrqFlags {
        IrqFlags::from_bits_retain(self.read(Reg::IrqStatus))
    }

    pub fn set_power_override(&mut self, value: u32) {
        log::debug!("{} <- {:#010x}", Reg::PowerOverride.name(), value);
        self.write(Reg::PowerOverride, value);
    }

    /// Underlying window
    pub fn io(&self) -> &I {
        &self.io
    }
}
