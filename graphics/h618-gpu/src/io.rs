//! Register window access
//!
//! [`RegisterIo`] is the seam between the controller and the hardware:
//! [`MmioRegion`] implements it with volatile accesses on a mapped window,
//! tests implement it with a recording double.

use core::ptr::{self, NonNull};

use crate::error::{Error, Result};
use crate::regs::CONTROL_SPAN;

/// 32-bit register access at byte offsets from a window base
pub trait RegisterIo {
    /// Read the register at `offset`
    fn read32(&self, offset: usize) -> u32;

    /// Write `value` to the register at `offset`
    fn write32(&mut self, offset: usize, value: u32);
}

/// Memory-mapped register window
///
/// Owns the mapping for its whole lifetime. Every access is a single
/// volatile 32-bit load or store, so the compiler neither merges, reorders
/// nor drops them.
#[derive(Debug)]
pub struct MmioRegion {
    base: NonNull<u32>,
    size: usize,
}

// The region is the only handle to the mapping; moving it between contexts
// moves that ownership with it.
unsafe impl Send for MmioRegion {}

impl MmioRegion {
    /// Wrap a mapped register window
    ///
    /// Fails with [`Error::InvalidArgument`] if `base` is null or not
    /// 4-byte aligned, or if `size` does not cover the control registers.
    ///
    /// # Safety
    ///
    /// `base` must point to `size` bytes of mapped device memory that stay
    /// valid for the lifetime of the region and are not accessed through
    /// any other handle.
    pub unsafe fn new(base: *mut u8, size: usize) -> Result<Self> {
        let base = NonNull::new(base.cast::<u32>()).ok_or(Error::InvalidArgument)?;
        if base.as_ptr() as usize % core::mem::align_of::<u32>() != 0 {
            return Err(Error::InvalidArgument);
        }
        if size < CONTROL_SPAN {
            log::warn!(
                "register window of {:#x} bytes is shorter than {:#x}",
                size,
                CONTROL_SPAN
            );
            return Err(Error::InvalidArgument);
        }

        Ok(Self { base, size })
    }

    /// Base address of the window
    pub fn base(&self) -> usize {
        self.base.as_ptr() as usize
    }

    /// Window size in bytes
    pub fn size(&self) -> usize {
        self.size
    }

    fn reg_ptr(&self, offset: usize) -> *mut u32 {
        debug_assert!(
            offset % 4 == 0 && offset + 4 <= self.size,
            "register offset {:#x} outside {:#x}-byte window",
            offset,
            self.size
        );
        // Typed offsets stay below CONTROL_SPAN, which the constructor guarantees
        unsafe { self.base.as_ptr().cast::<u8>().add(offset).cast::<u32>() }
    }
}

impl RegisterIo for MmioRegion {
    #[inline]
    fn read32(&self, offset: usize) -> u32 {
        let value = unsafe { ptr::read_volatile(self.reg_ptr(offset)) };
        #[cfg(feature = "debug-logging")]
        log::trace!("mmio read  {:#05x} -> {:#010x}", offset, value);
        value
    }

    #[inline]
    fn write32(&mut self, offset: usize, value: u32) {
        #[cfg(feature = "debug-logging")]
        log::trace!("mmio write {:#05x} <- {:#010x}", offset, value);
        unsafe { ptr::write_volatile(self.reg_ptr(offset), value) }
    }
}
