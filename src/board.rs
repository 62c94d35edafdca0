//! Raspberry Pi GPIO access.

use log::info;
use rppal::gpio::{Gpio, InputPin, OutputPin};

use crate::error::Result;
use crate::led_strip::{LED_COUNT, LedStrip};

/// Owns the GPIO handle for the life of the panel.
pub struct Board {
    gpio: Gpio,
}

impl Board {
    pub fn open() -> Result<Self> {
        let gpio = Gpio::new()?;
        info!("GPIO opened");
        Ok(Self { gpio })
    }

    /// Claims `pin` as an output, driven low.
    pub fn output(&self, pin: u8) -> Result<OutputPin> {
        Ok(self.gpio.get(pin)?.into_output_low())
    }

    pub fn input(&self, pin: u8) -> Result<InputPin> {
        Ok(self.gpio.get(pin)?.into_input())
    }

    /// Claims the strip's pins in order, all LEDs off.
    pub fn led_strip(&self, pins: &[u8; LED_COUNT]) -> Result<LedStrip<OutputPin>> {
        let [a, b, c, d, e, f] = pins.map(|pin| self.output(pin));
        Ok(LedStrip::new([a?, b?, c?, d?, e?, f?]))
    }

    /// Releases the GPIO handle. Pins claimed from it should be dropped first.
    pub fn release(self) {
        drop(self.gpio);
        info!("GPIO released");
    }
}
