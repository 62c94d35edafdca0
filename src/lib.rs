//! Control loop for the Jam HAT: a six-LED strip, two push buttons and a buzzer.
//!
//! The sampler polls both buttons, moves a single lit LED along the strip on each press
//! of the advance button, and tells the buzzer thread to pulse while the buzz button is
//! held. Hardware access goes through the `embedded-hal` pin traits, so everything except
//! [`board`] also runs against the in-memory pins in [`sim`].

pub mod app;
pub mod board;
pub mod buzzer;
pub mod config;
pub mod error;
pub mod led_strip;
pub mod sampler;
pub mod shutdown;
pub mod sim;

pub use buzzer::{BuzzReceiver, BuzzSender, Buzzer, BuzzerState, buzz_channel};
pub use config::Timing;
pub use error::{Error, Result};
pub use led_strip::{Cursor, LED_COUNT, LedStrip};
pub use sampler::{Button, Edge, Sampler};
pub use shutdown::Shutdown;
