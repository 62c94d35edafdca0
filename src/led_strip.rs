//! Six-LED strip with a single lit cursor.

use embedded_hal::digital::OutputPin;

use crate::error::{Error, Result, pin_fault};

pub const LED_COUNT: usize = 6;

/// Index of the lit LED, or `None` before the first press.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor(Option<usize>);

impl Cursor {
    pub const fn new() -> Self {
        Self(None)
    }

    pub fn position(self) -> Option<usize> {
        self.0
    }

    /// Moves one step along the strip, wrapping from the last LED back to the first.
    pub fn advance(&mut self) -> usize {
        let next = match self.0 {
            Some(position) => (position + 1) % LED_COUNT,
            None => 0,
        };
        self.0 = Some(next);
        next
    }
}

pub struct LedStrip<P> {
    leds: [P; LED_COUNT],
}

impl<P: OutputPin> LedStrip<P> {
    pub fn new(leds: [P; LED_COUNT]) -> Self {
        Self { leds }
    }

    /// Drives every LED low. Keeps going past a failed write so a single bad pin does not
    /// leave the rest of the strip lit; the first failure is returned.
    pub fn clear(&mut self) -> Result<()> {
        let mut first_err = None;
        for led in self.leds.iter_mut() {
            if let Err(err) = led.set_low().map_err(pin_fault("LED")) {
                first_err.get_or_insert(err);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    /// Drives the LED at `position` high. Other LEDs are left as they are.
    pub fn set_active(&mut self, position: usize) -> Result<()> {
        let led = self
            .leds
            .get_mut(position)
            .ok_or(Error::PositionOutOfRange {
                position,
                len: LED_COUNT,
            })?;
        led.set_high().map_err(pin_fault("LED"))
    }

    /// Clears the strip, then lights the LED under `cursor`.
    pub fn show(&mut self, cursor: Cursor) -> Result<()> {
        self.clear()?;
        match cursor.position() {
            Some(position) => self.set_active(position),
            None => Ok(()),
        }
    }
}
