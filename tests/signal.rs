// Installs the process-wide signal handler, so this file holds a single test.

use std::cell::Cell;
use std::process::Command;
use std::thread;
use std::time::{Duration, Instant};

use jam_hat::sim::{SimDelay, SimInput, SimOutput};
use jam_hat::{Button, Buzzer, LED_COUNT, LedStrip, Sampler, Shutdown, Timing, app, buzz_channel};

fn lit(leds: &[SimOutput]) -> Vec<usize> {
    leds.iter()
        .enumerate()
        .filter(|(_, led)| led.is_set_high())
        .map(|(i, _)| i)
        .collect()
}

fn wait_until(what: &str, mut done: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !done() {
        assert!(Instant::now() < deadline, "timed out waiting for {what}");
        thread::sleep(Duration::from_millis(1));
    }
}

#[test]
fn sigterm_stops_panel_and_releases_after_clearing() {
    let timing = Timing {
        sample_period_ms: 2,
        buzz_half_period_ms: 1,
        buzz_idle_ms: 5,
    };
    let blue = SimInput::new();
    let red = SimInput::new();
    let leds: [SimOutput; LED_COUNT] = Default::default();
    let buzzer_pin = SimOutput::new();
    let (tx, rx) = buzz_channel();
    let sampler = Sampler::new(
        Button::new("Blue", blue.clone()),
        Button::new("Red", red.clone()),
        LedStrip::new(leds.clone()),
        tx,
    );
    let buzzer = Buzzer::new(buzzer_pin.clone(), SimDelay::realtime(), rx, timing);

    let shutdown = Shutdown::install().unwrap();
    let app_shutdown = shutdown.clone();
    let handle = thread::spawn(move || {
        app::run(sampler, buzzer, &mut SimDelay::realtime(), &app_shutdown, timing)
    });

    blue.press();
    red.press();
    wait_until("LED to light", || lit(&leds) == [0]);
    wait_until("buzzer pulses", || buzzer_pin.history().contains(&true));

    let status = Command::new("sh")
        .arg("-c")
        .arg(format!("kill -TERM {}", std::process::id()))
        .status()
        .unwrap();
    assert!(status.success());
    wait_until("signal to land", || !shutdown.is_running());

    let outcome = handle.join().unwrap();
    let released = Cell::new(false);
    let code = app::finish(outcome, || {
        assert!(lit(&leds).is_empty());
        assert!(!buzzer_pin.is_set_high());
        assert!(leds.iter().all(|led| led.handles() == 1));
        released.set(true);
    });

    assert!(released.get());
    assert_eq!(code, app::EXIT_SIGNALLED);
}
