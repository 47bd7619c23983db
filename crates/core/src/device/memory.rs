use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use super::{Device, DeviceError, Frame};

/// Number of committed frames a [`Journal`] retains.
pub const HISTORY_LIMIT: usize = 4096;

/// In-memory device that records the most recent committed frames.
///
/// Meant for tests and inspection: only the last [`HISTORY_LIMIT`] frames are
/// kept, older ones are dropped. The [`Journal`] is shared, so a caller can
/// keep a clone and inspect the history after the device itself has been
/// handed to an animation task.
#[derive(Debug, Default)]
pub struct MemoryDevice {
    pending: Frame,
    journal: Journal,
}

impl MemoryDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn journal(&self) -> Journal {
        self.journal.clone()
    }
}

impl Device for MemoryDevice {
    fn set_led(&mut self, led: u8, brightness: u8) {
        self.pending.set(led, brightness);
    }

    fn apply(&mut self) -> Result<(), DeviceError> {
        self.journal.commit(self.pending)
    }
}

/// Shared record of the frames committed to a [`MemoryDevice`].
#[derive(Debug, Clone, Default)]
pub struct Journal {
    shared: Arc<Mutex<JournalState>>,
}

#[derive(Debug, Default)]
struct JournalState {
    frames: VecDeque<Frame>,
    committed: usize,
    attempts: usize,
    failing: bool,
}

impl Journal {
    /// Makes every following apply fail until reset.
    pub fn set_failing(&self, failing: bool) {
        self.lock().failing = failing;
    }

    /// Retained committed frames, oldest first.
    pub fn frames(&self) -> Vec<Frame> {
        self.lock().frames.iter().copied().collect()
    }

    pub fn last_frame(&self) -> Option<Frame> {
        self.lock().frames.back().copied()
    }

    /// Number of successful applies, including frames no longer retained.
    pub fn apply_count(&self) -> usize {
        self.lock().committed
    }

    /// Number of apply calls, including failed ones.
    pub fn attempts(&self) -> usize {
        self.lock().attempts
    }

    fn commit(&self, frame: Frame) -> Result<(), DeviceError> {
        let mut state = self.lock();
        state.attempts += 1;
        if state.failing {
            return Err(DeviceError::Rejected("injected apply failure".to_string()));
        }
        if state.frames.len() == HISTORY_LIMIT {
            state.frames.pop_front();
        }
        state.frames.push_back(frame);
        state.committed += 1;
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, JournalState> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
