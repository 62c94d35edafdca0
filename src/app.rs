//! Runs the panel until shutdown.

use std::thread;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::{error, info};

use crate::buzzer::Buzzer;
use crate::config::Timing;
use crate::error::{Error, Result};
use crate::led_strip::LedStrip;
use crate::sampler::Sampler;
use crate::shutdown::Shutdown;

/// Exit status after a signalled shutdown; the panel never stops on its own.
pub const EXIT_SIGNALLED: u8 = 1;
/// Exit status when the panel could not be set up or failed while stopping.
pub const EXIT_FAILURE: u8 = 2;

/// Starts the buzzer thread, samples on the calling thread until `shutdown` fires, then
/// stops the buzzer and clears the strip. The cleared strip is handed back so the caller
/// can drop its pins before releasing GPIO.
pub fn run<I, O, B, BD, D>(
    mut sampler: Sampler<I, O>,
    buzzer: Buzzer<B, BD>,
    delay: &mut D,
    shutdown: &Shutdown,
    timing: Timing,
) -> Result<LedStrip<O>>
where
    I: InputPin,
    O: OutputPin,
    B: OutputPin + Send + 'static,
    BD: DelayNs + Send + 'static,
    D: DelayNs,
{
    let buzzer_shutdown = shutdown.clone();
    let buzzer_thread = thread::Builder::new()
        .name("buzzer".into())
        .spawn(move || buzzer.run(&buzzer_shutdown))?;

    info!("Panel running");
    sampler.run(delay, shutdown, timing.sample_period_ms);

    info!("Stopping panel");
    let buzzer_pin = buzzer_thread.join().map_err(|_| Error::BuzzerPanicked)?;
    drop(buzzer_pin);

    let mut leds = sampler.into_leds();
    leds.clear()?;
    info!("LEDs cleared");
    Ok(leds)
}

/// Drops the strip's pins, then calls `release` to hand back the GPIO handle, and returns
/// the process exit status for `outcome`.
pub fn finish<O>(outcome: Result<LedStrip<O>>, release: impl FnOnce()) -> u8 {
    let status = match outcome {
        Ok(leds) => {
            drop(leds);
            EXIT_SIGNALLED
        }
        Err(err) => {
            error!("{err}");
            EXIT_FAILURE
        }
    };
    release();
    status
}
