//! Cooperative shutdown.
//!
//! The signal handler only flips a shared running flag. The sampler and the buzzer check it
//! every iteration and wind down on their own, so the GPIO handle is released only after
//! nothing is writing to a pin any more.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::info;

use crate::error::Result;

#[derive(Clone, Debug)]
pub struct Shutdown {
    running: Arc<AtomicBool>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Creates a token that fires on SIGINT or SIGTERM. Can only be called once per process.
    pub fn install() -> Result<Self> {
        let shutdown = Self::new();
        let s = shutdown.clone();
        ctrlc::set_handler(move || {
            info!("Termination requested");
            s.trigger();
        })?;
        Ok(shutdown)
    }

    pub fn trigger(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
