//! GPU device lifecycle
//!
//! ```text
//!                 initialize
//!  Uninitialized ───────────► Ready ◄──┐ submit
//!        ▲   (reset timeout)    │  └───┘
//!        └──────────────────────┤
//!                               │ cleanup
//!            initialize         ▼
//!  Ready ◄─────────────────  ShutDown
//! ```

use bitflags::bitflags;

use crate::config::GpuConfig;
use crate::error::{Error, Result};
use crate::io::{MmioRegion, RegisterIo};
use crate::regs::{IrqFlags, Registers, POWER_OFF, POWER_ON_ALL, WINDOW_SIZE};
use crate::reset;

/// Lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceState {
    /// No successful initialization yet
    Uninitialized,
    /// Reset, powered, interrupts configured; accepts jobs
    Ready,
    /// Torn down by cleanup; needs a fresh initialization
    ShutDown,
}

bitflags! {
    /// Capability flags supplied by the platform, carried but not interpreted
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Features: u32 {
        const _ = !0;
    }
}

/// Opaque job descriptor handle
///
/// Only the address is carried; the controller never dereferences it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobHandle(usize);

impl JobHandle {
    pub const NULL: JobHandle = JobHandle(0);

    /// Handle from a descriptor address
    pub const fn from_addr(addr: usize) -> Self {
        Self(addr)
    }

    /// Handle from a descriptor pointer
    pub fn from_ptr<T>(ptr: *const T) -> Self {
        Self(ptr as usize)
    }

    pub const fn addr(&self) -> usize {
        self.0
    }

    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }
}

/// Device counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceStats {
    /// Successful initializations
    pub inits: u64,
    /// Jobs accepted by the submission gate
    pub jobs_submitted: u64,
    /// Status polls spent by the most recent reset handshake
    pub last_reset_polls: u32,
}

/// GPU controller
pub struct GpuDevice<I: RegisterIo = MmioRegion> {
    regs: Option<Registers<I>>,
    irq: Option<u32>,
    state: DeviceState,
    features: Features,
    config: GpuConfig,
    stats: DeviceStats,
}

impl<I: RegisterIo> GpuDevice<I> {
    /// Create an uninitialized device
    pub const fn new(config: GpuConfig) -> Self {
        Self {
            regs: None,
            irq: None,
            state: DeviceState::Uninitialized,
            features: Features::empty(),
            config,
            stats: DeviceStats {
                inits: 0,
                jobs_submitted: 0,
                last_reset_polls: 0,
            },
        }
    }

    /// Bring the GPU up on the given register window
    ///
    /// Records the window and interrupt line, runs the reset handshake,
    /// acknowledges every pending interrupt, unmasks the configured
    /// sources and forces power on. A reset timeout leaves the device
    /// `Uninitialized`; nothing is rolled back.
    pub fn initialize(&mut self, io: I, irq: u32) -> Result<()> {
        let regs = self.regs.insert(Registers::new(io));
        self.irq = Some(irq);

        match reset::soft_reset(regs, &self.config) {
            Ok(polls) => self.stats.last_reset_polls = polls,
            Err(err) => {
                self.stats.last_reset_polls = self.config.effective_retries();
                self.state = DeviceState::Uninitialized;
                log::error!("Failed to initialize GPU: {}", err);
                return Err(err);
            }
        }

        regs.clear_irqs(IrqFlags::ALL_SOURCES);
        regs.set_irq_mask(self.config.irq_enable);
        regs.set_power_override(POWER_ON_ALL);

        self.state = DeviceState::Ready;
        self.stats.inits += 1;
        log::info!("GPU ready (irq {})", irq);

        Ok(())
    }

    /// Run the reset handshake without touching the lifecycle state
    ///
    /// The device stays in whatever state it was in; a fresh
    /// [`initialize`](Self::initialize) is needed to reach `Ready`.
    pub fn reset(&mut self) -> Result<()> {
        let Some(regs) = self.regs.as_mut() else {
            log::warn!("GPU reset requested without a register window");
            return Err(Error::InvalidArgument);
        };

        match reset::soft_reset(regs, &self.config) {
            Ok(polls) => {
                self.stats.last_reset_polls = polls;
                Ok(())
            }
            Err(err) => {
                self.stats.last_reset_polls = self.config.effective_retries();
                Err(err)
            }
        }
    }

    /// Gate a job on device readiness
    ///
    /// Descriptor encoding belongs to the command stream layer; this only
    /// checks that the device may accept work and that the handle is
    /// usable.
    pub fn submit(&mut self, job: JobHandle) -> Result<()> {
        if self.state != DeviceState::Ready {
            log::warn!("GPU job rejected, device {:?}", self.state);
            return Err(Error::NotReady);
        }
        if job.is_null() {
            log::warn!("GPU job rejected, null descriptor");
            return Err(Error::InvalidArgument);
        }

        self.stats.jobs_submitted += 1;
        log::trace!("GPU job {:#x} accepted", job.addr());

        Ok(())
    }

    /// Mask interrupts, acknowledge pending ones and power down
    ///
    /// Does nothing unless the device is `Ready`.
    pub fn cleanup(&mut self) {
        if self.state != DeviceState::Ready {
            log::debug!("GPU cleanup skipped, device {:?}", self.state);
            return;
        }
        let Some(regs) = self.regs.as_mut() else {
            return;
        };

        regs.set_irq_mask(IrqFlags::empty());
        regs.clear_irqs(IrqFlags::ALL_SOURCES);
        regs.set_power_override(POWER_OFF);

        self.state = DeviceState::ShutDown;
        log::info!("GPU shut down");
    }

    /// Pending interrupt sources
    pub fn pending_interrupts(&self) -> Result<IrqFlags> {
        match (&self.regs, self.state) {
            (Some(regs), DeviceState::Ready) => Ok(regs.irq_status()),
            _ => Err(Error::NotReady),
        }
    }

    pub fn state(&self) -> DeviceState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == DeviceState::Ready
    }

    /// Interrupt line recorded by the last initialization
    pub fn irq(&self) -> Option<u32> {
        self.irq
    }

    pub fn features(&self) -> Features {
        self.features
    }

    pub fn set_features(&mut self, features: Features) {
        self.features = features;
    }

    pub fn config(&self) -> &GpuConfig {
        &self.config
    }

    pub fn stats(&self) -> DeviceStats {
        self.stats
    }

    /// Register window recorded by the last initialization
    pub fn registers(&self) -> Option<&Registers<I>> {
        self.regs.as_ref()
    }
}

impl GpuDevice<MmioRegion> {
    /// Initialize on a mapped register base
    ///
    /// A null base fails with [`Error::InvalidArgument`] before any register
    /// access, leaving the device as it was.
    ///
    /// # Safety
    ///
    /// `base` must be the mapped GPU register window ([`WINDOW_SIZE`] bytes
    /// of device memory), valid for as long as this device uses it and not
    /// accessed through any other handle.
    pub unsafe fn init_mmio(&mut self, base: *mut u8, irq: u32) -> Result<()> {
        let region = match MmioRegion::new(base, WINDOW_SIZE) {
            Ok(region) => region,
            Err(err) => {
                log::error!("Invalid GPU register base {:p}: {}", base, err);
                return Err(err);
            }
        };
        self.initialize(region, irq)
    }
}

impl<I: RegisterIo> Default for GpuDevice<I> {
    fn default() -> Self {
        Self::new(GpuConfig::default())
    }
}
