//! Allwinner H618 GPU controller
//!
//! Core of the H618 GPU driver: brings the GPU block out of reset, powers
//! it up, configures its interrupt sources and gates job submission on
//! device readiness. Platform discovery, interrupt delivery, MMU
//! programming and job descriptor encoding live in other layers and reach
//! this crate only as opaque handles.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │              Platform glue (DT probe, IRQ wiring)               │
//! └──────────────────────────┬──────────────────────────────────────┘
//!                            │ base, irq, job handles
//! ┌──────────────────────────▼──────────────────────────────────────┐
//! │                      GpuDevice / SharedGpu                      │
//! │  ┌──────────────────────────┐  ┌────────────────────────────┐   │
//! │  │ Lifecycle state machine  │  │ Reset handshake            │   │
//! │  │ initialize/submit/cleanup│  │ bounded GPU_STATUS polling │   │
//! │  └────────────┬─────────────┘  └─────────────┬──────────────┘   │
//! └───────────────┼──────────────────────────────┼──────────────────┘
//!                 │                              │
//! ┌───────────────▼──────────────────────────────▼──────────────────┐
//! │           Registers<I: RegisterIo>  (typed offsets)             │
//! │                 MmioRegion (volatile 32-bit access)             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use h618_gpu::{boards, GpuConfig, GpuDevice, JobHandle};
//!
//! let mut gpu = GpuDevice::new(GpuConfig::default());
//! unsafe { gpu.init_mmio(mapped_base, boards::H618.gpu_irq)? };
//! gpu.submit(JobHandle::from_addr(job_chain_va))?;
//! gpu.cleanup();
//! ```

#![cfg_attr(not(test), no_std)]

pub mod boards;
pub mod config;
pub mod device;
pub mod error;
pub mod io;
pub mod regs;
pub mod reset;
pub mod shared;

#[cfg(test)]
mod mock;

pub use config::GpuConfig;
pub use device::{DeviceState, DeviceStats, Features, GpuDevice, JobHandle};
pub use error::{Error, Result};
pub use io::{MmioRegion, RegisterIo};
pub use regs::{IrqFlags, Reg, Registers};
pub use shared::SharedGpu;
