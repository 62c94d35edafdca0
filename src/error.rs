use embedded_hal::digital::{self, ErrorKind};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to access GPIO: {0}")]
    Gpio(#[from] rppal::gpio::Error),

    #[error("failed to install signal handler: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("failed to spawn thread: {0}")]
    Thread(#[from] std::io::Error),

    #[error("{role} pin fault: {kind}")]
    Pin { role: &'static str, kind: ErrorKind },

    #[error("LED position {position} is out of range for a strip of {len}")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("buzzer thread panicked")]
    BuzzerPanicked,
}

/// Maps a HAL pin error onto [`Error::Pin`] for the named pin.
pub(crate) fn pin_fault<E: digital::Error>(role: &'static str) -> impl FnOnce(E) -> Error {
    move |err| Error::Pin {
        role,
        kind: err.kind(),
    }
}
