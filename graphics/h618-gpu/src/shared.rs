//! Lock-protected GPU device
//!
//! [`GpuDevice`] has no internal locking. [`SharedGpu`] puts it behind a
//! spin mutex so every lifecycle operation from any context runs
//! serialized, e.g. from a `static` owned by the platform glue.

use spin::{Mutex, MutexGuard};

use crate::device::{DeviceState, GpuDevice, JobHandle};
use crate::error::Result;
use crate::io::{MmioRegion, RegisterIo};

/// GPU device behind a spin mutex
pub struct SharedGpu<I: RegisterIo = MmioRegion> {
    inner: Mutex<GpuDevice<I>>,
}

impl<I: RegisterIo> SharedGpu<I> {
    pub const fn new(device: GpuDevice<I>) -> Self {
        Self {
            inner: Mutex::new(device),
        }
    }

    /// See [`GpuDevice::initialize`]
    pub fn initialize(&self, io: I, irq: u32) -> Result<()> {
        self.inner.lock().initialize(io, irq)
    }

    /// See [`GpuDevice::reset`]
    pub fn reset(&self) -> Result<()> {
        self.inner.lock().reset()
    }

    /// See [`GpuDevice::submit`]
    pub fn submit(&self, job: JobHandle) -> Result<()> {
        self.inner.lock().submit(job)
    }

    /// See [`GpuDevice::cleanup`]
    pub fn cleanup(&self) {
        self.inner.lock().cleanup()
    }

    pub fn state(&self) -> DeviceState {
        self.inner.lock().state()
    }

    /// Hold the lock across several operations
    pub fn lock(&self) -> MutexGuard<'_, GpuDevice<I>> {
        self.inner.lock()
    }
}
