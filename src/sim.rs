//! In-memory pins and delays.
//!
//! Lets the panel run on a machine without GPIO. Each handle is cheap to clone and every
//! clone shares state, so a test can keep one copy while the panel owns another.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, ErrorKind, ErrorType, InputPin, OutputPin};

/// Injected pin failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimFault;

impl digital::Error for SimFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

// Consumes one pending fault, if any.
fn take_fault(faults: &AtomicUsize) -> bool {
    faults
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}

#[derive(Clone, Debug, Default)]
pub struct SimInput {
    level: Arc<AtomicBool>,
    faults: Arc<AtomicUsize>,
}

impl SimInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&self) {
        self.level.store(true, Ordering::SeqCst);
    }

    pub fn release(&self) {
        self.level.store(false, Ordering::SeqCst);
    }

    /// Makes the next `reads` reads fail.
    pub fn fail_next(&self, reads: usize) {
        self.faults.store(reads, Ordering::SeqCst);
    }
}

impl ErrorType for SimInput {
    type Error = SimFault;
}

impl InputPin for SimInput {
    fn is_high(&mut self) -> Result<bool, SimFault> {
        if take_fault(&self.faults) {
            return Err(SimFault);
        }
        Ok(self.level.load(Ordering::SeqCst))
    }

    fn is_low(&mut self) -> Result<bool, SimFault> {
        self.is_high().map(|high| !high)
    }
}

#[derive(Debug, Default)]
struct OutputState {
    level: bool,
    history: Vec<bool>,
}

/// Output pin that remembers its level and every successful write.
#[derive(Clone, Debug, Default)]
pub struct SimOutput {
    state: Arc<Mutex<OutputState>>,
    faults: Arc<AtomicUsize>,
}

impl SimOutput {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, OutputState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_set_high(&self) -> bool {
        self.state().level
    }

    pub fn history(&self) -> Vec<bool> {
        self.state().history.clone()
    }

    /// Number of live handles to this pin, including this one.
    pub fn handles(&self) -> usize {
        Arc::strong_count(&self.state)
    }

    pub fn clear_history(&self) {
        self.state().history.clear();
    }

    /// Makes the next `writes` writes fail without changing the level.
    pub fn fail_next(&self, writes: usize) {
        self.faults.store(writes, Ordering::SeqCst);
    }

    fn write(&mut self, level: bool) -> Result<(), SimFault> {
        if take_fault(&self.faults) {
            return Err(SimFault);
        }
        let mut state = self.state();
        state.level = level;
        state.history.push(level);
        Ok(())
    }
}

impl ErrorType for SimOutput {
    type Error = SimFault;
}

impl OutputPin for SimOutput {
    fn set_low(&mut self) -> Result<(), SimFault> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), SimFault> {
        self.write(true)
    }
}

/// Delay that adds up the requested time. A realtime delay also sleeps for it.
#[derive(Clone, Debug, Default)]
pub struct SimDelay {
    elapsed_ns: Arc<AtomicU64>,
    realtime: bool,
}

impl SimDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn realtime() -> Self {
        Self {
            realtime: true,
            ..Self::default()
        }
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_ns.load(Ordering::SeqCst))
    }
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns.fetch_add(u64::from(ns), Ordering::SeqCst);
        if self.realtime {
            thread::sleep(Duration::from_nanos(u64::from(ns)));
        }
    }
}
