//! Soft reset handshake
//!
//! Request a reset through GPU_COMMAND, then poll GPU_STATUS until the
//! BUSY bit drops. The number of polls is bounded by the configured
//! budget, so dead hardware yields [`Error::ResetTimeout`] instead of a
//! hang.

use crate::config::GpuConfig;
use crate::error::{Error, Result};
use crate::io::RegisterIo;
use crate::regs::{GpuCommand, GpuStatus, Registers};

/// Run the reset handshake
///
/// Returns the number of status polls it took to observe the device idle.
pub fn soft_reset<I: RegisterIo>(regs: &mut Registers<I>, config: &GpuConfig) -> Result<u32> {
    let budget = config.effective_retries();

    log::debug!("Requesting GPU reset ({} polls max)", budget);
    regs.issue_command(GpuCommand::SOFT_RESET);

    for poll in 1..=budget {
        let status = regs.status();
        log::trace!("GPU_STATUS: {:X}", status.bits());
        if !status.contains(GpuStatus::BUSY) {
            log::debug!("GPU reset complete after {} polls", poll);
            return Ok(poll);
        }

        if poll < budget {
            for _ in 0..config.reset_backoff {
                core::hint::spin_loop();
            }
        }
    }

    log::error!("GPU reset timed out after {} polls", budget);
    Err(Error::ResetTimeout)
}
