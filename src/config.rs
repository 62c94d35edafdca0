//! Jam HAT wiring and loop cadence.
//!
//! Pin numbers use BCM numbering. The wiring is fixed by the HAT, so nothing here is read
//! at runtime.

use crate::led_strip::LED_COUNT;

// Strip order: red1, red2, orange1, orange2, green1, green2.
pub const LED_PINS: [u8; LED_COUNT] = [5, 6, 12, 13, 16, 17];
pub const BLUE_BUTTON_PIN: u8 = 19;
pub const RED_BUTTON_PIN: u8 = 18;
// No hardware PWM on this line, the buzzer is pulsed by hand.
pub const BUZZER_PIN: u8 = 20;

pub const BLUE_BUTTON_NAME: &str = "Blue";
pub const RED_BUTTON_NAME: &str = "Red";

pub const SAMPLE_PERIOD_MS: u32 = 50;
pub const BUZZ_HALF_PERIOD_MS: u32 = 5;
pub const BUZZ_IDLE_MS: u32 = 200;

/// Sleep intervals used by the sampler and the buzzer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    pub sample_period_ms: u32,
    pub buzz_half_period_ms: u32,
    pub buzz_idle_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            sample_period_ms: SAMPLE_PERIOD_MS,
            buzz_half_period_ms: BUZZ_HALF_PERIOD_MS,
            buzz_idle_ms: BUZZ_IDLE_MS,
        }
    }
}
