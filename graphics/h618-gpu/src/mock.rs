//! Recording register window for tests

use std::cell::Cell;
use std::collections::BTreeMap;

use crate::io::RegisterIo;
use crate::regs::{offsets, GpuStatus};

/// Register window double
///
/// Stores written values, logs every write in order, and answers
/// GPU_STATUS reads with BUSY for a scripted number of polls.
pub(crate) struct MockRegisters {
    values: BTreeMap<usize, u32>,
    writes: Vec<(usize, u32)>,
    busy_polls: u32,
    status_reads: Cell<u32>,
}

impl MockRegisters {
    /// Status reports idle from the first poll
    pub(crate) fn new() -> Self {
        Self::busy_for(0)
    }

    /// Status reports BUSY for the first `polls` reads
    pub(crate) fn busy_for(polls: u32) -> Self {
        Self {
            values: BTreeMap::new(),
            writes: Vec::new(),
            busy_polls: polls,
            status_reads: Cell::new(0),
        }
    }

    /// Status never leaves BUSY
    pub(crate) fn stuck_busy() -> Self {
        Self::busy_for(u32::MAX)
    }

    /// Preload a register without logging a write
    pub(crate) fn set(&mut self, offset: usize, value: u32) {
        self.values.insert(offset, value);
    }

    /// Last value written to `offset`
    pub(crate) fn value(&self, offset: usize) -> Option<u32> {
        self.values.get(&offset).copied()
    }

    pub(crate) fn writes(&self) -> &[(usize, u32)] {
        &self.writes
    }

    pub(crate) fn status_reads(&self) -> u32 {
        self.status_reads.get()
    }
}

impl RegisterIo for MockRegisters {
    fn read32(&self, offset: usize) -> u32 {
        if offset == offsets::GPU_STATUS {
            let reads = self.status_reads.get() + 1;
            self.status_reads.set(reads);
            return if reads <= self.busy_polls {
                GpuStatus::BUSY.bits()
            } else {
                0
            };
        }
        self.values.get(&offset).copied().unwrap_or(0)
    }

    fn write32(&mut self, offset: usize, value: u32) {
        self.values.insert(offset, value);
        self.writes.push((offset, value));
    }
}
