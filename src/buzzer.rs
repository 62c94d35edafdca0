//! Buzzer driver.
//!
//! The buzzer line has no hardware PWM, so the driver toggles it by hand: high for one
//! half-period, low for one half-period, for as long as it is told to buzz. Commands come
//! from the sampler through a single latest-intent slot; only the most recent command
//! matters, so an unread command is simply overwritten.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::{debug, warn};

use crate::config::Timing;
use crate::error::{Result, pin_fault};
use crate::shutdown::Shutdown;

const NO_COMMAND: u8 = 0;
const STOP: u8 = 1;
const START: u8 = 2;

/// Creates the command slot shared by the sampler and the buzzer.
pub fn buzz_channel() -> (BuzzSender, BuzzReceiver) {
    let slot = Arc::new(AtomicU8::new(NO_COMMAND));
    (BuzzSender { slot: slot.clone() }, BuzzReceiver { slot })
}

#[derive(Debug)]
pub struct BuzzSender {
    slot: Arc<AtomicU8>,
}

impl BuzzSender {
    /// Replaces any command the buzzer has not picked up yet. Never blocks.
    pub fn send(&self, buzz: bool) {
        let command = if buzz { START } else { STOP };
        self.slot.store(command, Ordering::Release);
    }
}

#[derive(Debug)]
pub struct BuzzReceiver {
    slot: Arc<AtomicU8>,
}

impl BuzzReceiver {
    /// Takes the pending command, if there is one.
    pub fn try_recv(&self) -> Option<bool> {
        match self.slot.swap(NO_COMMAND, Ordering::AcqRel) {
            START => Some(true),
            STOP => Some(false),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BuzzerState {
    #[default]
    Idle,
    Buzzing,
}

pub struct Buzzer<P, D> {
    pin: P,
    delay: D,
    commands: BuzzReceiver,
    state: BuzzerState,
    timing: Timing,
}

impl<P: OutputPin, D: DelayNs> Buzzer<P, D> {
    pub fn new(pin: P, delay: D, commands: BuzzReceiver, timing: Timing) -> Self {
        Self {
            pin,
            delay,
            commands,
            state: BuzzerState::Idle,
            timing,
        }
    }

    pub fn state(&self) -> BuzzerState {
        self.state
    }

    /// One cycle: pick up a pending command, then either emit one pulse or idle once.
    pub fn step(&mut self) -> Result<()> {
        if let Some(buzz) = self.commands.try_recv() {
            let next = if buzz {
                BuzzerState::Buzzing
            } else {
                BuzzerState::Idle
            };
            if next != self.state {
                debug!("Buzzer {:?} -> {:?}", self.state, next);
                self.state = next;
            }
        }

        match self.state {
            BuzzerState::Buzzing => self.pulse(),
            BuzzerState::Idle => {
                self.delay.delay_ms(self.timing.buzz_idle_ms);
                Ok(())
            }
        }
    }

    fn pulse(&mut self) -> Result<()> {
        let half_period = self.timing.buzz_half_period_ms;
        self.pin.set_high().map_err(pin_fault("buzzer"))?;
        self.delay.delay_ms(half_period);
        self.pin.set_low().map_err(pin_fault("buzzer"))?;
        self.delay.delay_ms(half_period);
        Ok(())
    }

    /// Steps until `shutdown` fires, then leaves the buzzer silent and returns its pin.
    pub fn run(mut self, shutdown: &Shutdown) -> P {
        self.silence();
        while shutdown.is_running() {
            if let Err(err) = self.step() {
                warn!("Buzzer: {err}");
                self.silence();
                self.delay.delay_ms(self.timing.buzz_idle_ms);
            }
        }
        self.silence();
        self.pin
    }

    fn silence(&mut self) {
        if let Err(err) = self.pin.set_low().map_err(pin_fault("buzzer")) {
            warn!("Buzzer: {err}");
        }
    }
}
