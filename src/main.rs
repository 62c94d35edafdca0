use std::process::ExitCode;

use log::{error, info};
use rppal::gpio::OutputPin;
use rppal::hal::Delay;

use jam_hat::board::Board;
use jam_hat::config::{
    BLUE_BUTTON_NAME, BLUE_BUTTON_PIN, BUZZER_PIN, LED_PINS, RED_BUTTON_NAME, RED_BUTTON_PIN,
};
use jam_hat::{Button, Buzzer, LedStrip, Result, Sampler, Shutdown, Timing, app, buzz_channel};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Program is starting...");

    let board = match Board::open() {
        Ok(board) => board,
        Err(err) => {
            error!("{err}");
            return ExitCode::from(app::EXIT_FAILURE);
        }
    };

    let outcome = run_panel(&board);
    ExitCode::from(app::finish(outcome, || board.release()))
}

fn run_panel(board: &Board) -> Result<LedStrip<OutputPin>> {
    let shutdown = Shutdown::install()?;
    let timing = Timing::default();

    let leds = board.led_strip(&LED_PINS)?;
    let blue = Button::new(BLUE_BUTTON_NAME, board.input(BLUE_BUTTON_PIN)?);
    let red = Button::new(RED_BUTTON_NAME, board.input(RED_BUTTON_PIN)?);
    let (tx, rx) = buzz_channel();
    let buzzer = Buzzer::new(board.output(BUZZER_PIN)?, Delay::new(), rx, timing);
    let sampler = Sampler::new(blue, red, leds, tx);

    app::run(sampler, buzzer, &mut Delay::new(), &shutdown, timing)
}
