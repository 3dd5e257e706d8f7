//! End-to-end lifecycle over a RAM-backed register window

use std::ptr;
use std::thread;

use h618_gpu::boards::H618;
use h618_gpu::regs::offsets;
use h618_gpu::{DeviceState, Error, GpuConfig, GpuDevice, JobHandle, MmioRegion, SharedGpu};

/// Zeroed memory standing in for the GPU register block
struct FakeWindow {
    words: Box<[u32]>,
}

impl FakeWindow {
    fn new() -> Self {
        Self {
            words: vec![0u32; H618.window_size / 4].into_boxed_slice(),
        }
    }

    fn base(&mut self) -> *mut u8 {
        self.words.as_mut_ptr().cast()
    }
}

fn peek(base: *mut u8, offset: usize) -> u32 {
    unsafe { ptr::read_volatile(base.add(offset).cast::<u32>()) }
}

fn poke(base: *mut u8, offset: usize, value: u32) {
    unsafe { ptr::write_volatile(base.add(offset).cast::<u32>(), value) }
}

#[test]
fn test_bring_up_submit_teardown() {
    let mut window = FakeWindow::new();
    let base = window.base();
    let mut gpu: GpuDevice = GpuDevice::new(GpuConfig::default());

    unsafe { gpu.init_mmio(base, H618.gpu_irq).unwrap() };
    assert_eq!(gpu.state(), DeviceState::Ready);
    assert_eq!(peek(base, offsets::GPU_COMMAND), 0x01);
    assert_eq!(peek(base, offsets::GPU_IRQ_CLEAR), 0xFFFF_FFFF);
    assert_eq!(peek(base, offsets::GPU_IRQ_MASK), 0x01);
    assert_eq!(peek(base, offsets::GPU_PWR_OVERRIDE), 0xFFFF_FFFF);
    assert_eq!(gpu.stats().last_reset_polls, 1);

    let job = [0u64; 8];
    assert_eq!(gpu.submit(JobHandle::from_ptr(job.as_ptr())), Ok(()));

    gpu.cleanup();
    assert_eq!(gpu.state(), DeviceState::ShutDown);
    assert_eq!(peek(base, offsets::GPU_IRQ_MASK), 0);
    assert_eq!(peek(base, offsets::GPU_PWR_OVERRIDE), 0);
    assert_eq!(
        gpu.submit(JobHandle::from_ptr(job.as_ptr())),
        Err(Error::NotReady)
    );
}

#[test]
fn test_null_base_rejected() {
    let mut gpu: GpuDevice = GpuDevice::default();

    let result = unsafe { gpu.init_mmio(ptr::null_mut(), H618.gpu_irq) };
    assert_eq!(result, Err(Error::InvalidArgument));
    assert_eq!(gpu.state(), DeviceState::Uninitialized);
    assert_eq!(gpu.reset(), Err(Error::InvalidArgument));
}

#[test]
fn test_short_window_never_reaches_device() {
    let mut words = vec![0u32; 16];
    let result = unsafe { MmioRegion::new(words.as_mut_ptr().cast(), 64) };
    assert_eq!(result.unwrap_err(), Error::InvalidArgument);

    let mut gpu: GpuDevice = GpuDevice::default();
    assert_eq!(gpu.state(), DeviceState::Uninitialized);
    assert_eq!(gpu.reset(), Err(Error::InvalidArgument));
}

#[test]
fn test_dead_hardware_times_out() {
    let mut window = FakeWindow::new();
    let base = window.base();
    poke(base, offsets::GPU_STATUS, 0x1);

    let mut gpu: GpuDevice = GpuDevice::new(GpuConfig::new().with_reset_retries(64));
    let result = unsafe { gpu.init_mmio(base, H618.gpu_irq) };

    assert_eq!(result, Err(Error::ResetTimeout));
    assert!(result.unwrap_err().is_retryable());
    assert_eq!(gpu.state(), DeviceState::Uninitialized);
    assert_eq!(peek(base, offsets::GPU_IRQ_MASK), 0);
    assert_eq!(peek(base, offsets::GPU_PWR_OVERRIDE), 0);

    // Hardware recovers, the caller retries
    poke(base, offsets::GPU_STATUS, 0);
    assert_eq!(gpu.reset(), Ok(()));
    assert_eq!(gpu.state(), DeviceState::Uninitialized);
    unsafe { gpu.init_mmio(base, H618.gpu_irq).unwrap() };
    assert!(gpu.is_ready());
}

#[test]
fn test_shared_device_across_threads() {
    let mut window = FakeWindow::new();
    let gpu: SharedGpu = SharedGpu::new(GpuDevice::new(GpuConfig::default()));

    let region = unsafe { MmioRegion::new(window.base(), H618.window_size).unwrap() };
    gpu.initialize(region, H618.gpu_irq).unwrap();

    thread::scope(|s| {
        for t in 0..4usize {
            let gpu = &gpu;
            s.spawn(move || {
                for i in 1..=25usize {
                    gpu.submit(JobHandle::from_addr((t << 16) | (i << 6))).unwrap();
                }
            });
        }
    });

    assert_eq!(gpu.lock().stats().jobs_submitted, 100);
    gpu.cleanup();
    assert_eq!(gpu.state(), DeviceState::ShutDown);
}
