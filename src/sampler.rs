//! Button sampling loop.
//!
//! Both buttons are polled at a fixed period. A press on the advance button moves the
//! cursor one LED along the strip; the buzz button starts the buzzer on press and stops
//! it on release. Holding a button does nothing beyond its first edge.

use std::fmt;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::{info, warn};

use crate::buzzer::BuzzSender;
use crate::error::{Result, pin_fault};
use crate::led_strip::{Cursor, LedStrip};
use crate::shutdown::Shutdown;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Pressed,
    Released,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::Pressed => f.write_str("Pressed"),
            Edge::Released => f.write_str("Released"),
        }
    }
}

/// Remembers the last sampled level. Starts released.
#[derive(Clone, Copy, Debug, Default)]
pub struct EdgeDetector {
    pressed: bool,
}

impl EdgeDetector {
    pub fn update(&mut self, pressed: bool) -> Option<Edge> {
        if pressed == self.pressed {
            return None;
        }
        self.pressed = pressed;
        Some(if pressed { Edge::Pressed } else { Edge::Released })
    }
}

/// Active-high push button.
pub struct Button<I> {
    name: &'static str,
    pin: I,
    edges: EdgeDetector,
}

impl<I: InputPin> Button<I> {
    pub fn new(name: &'static str, pin: I) -> Self {
        Self {
            name,
            pin,
            edges: EdgeDetector::default(),
        }
    }

    /// Reads the pin and reports an edge if the level changed since the last read.
    pub fn sample(&mut self) -> Result<Option<Edge>> {
        let pressed = self.pin.is_high().map_err(pin_fault(self.name))?;
        let edge = self.edges.update(pressed);
        if let Some(edge) = edge {
            info!("{} - {}", self.name, edge);
        }
        Ok(edge)
    }
}

pub struct Sampler<I, O> {
    advance: Button<I>,
    buzz: Button<I>,
    leds: LedStrip<O>,
    cursor: Cursor,
    // Set when the strip may not match the cursor.
    stale: bool,
    buzzer: BuzzSender,
}

impl<I: InputPin, O: OutputPin> Sampler<I, O> {
    pub fn new(
        advance: Button<I>,
        buzz: Button<I>,
        leds: LedStrip<O>,
        buzzer: BuzzSender,
    ) -> Self {
        Self {
            advance,
            buzz,
            leds,
            cursor: Cursor::new(),
            stale: false,
            buzzer,
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// One sampling pass over both buttons, without sleeping.
    pub fn poll(&mut self) -> Result<()> {
        let advance = self.poll_advance();
        let buzz = self.poll_buzz();
        advance.and(buzz)
    }

    // A strip left stale by a failed write is redrawn on every pass until it succeeds.
    fn poll_advance(&mut self) -> Result<()> {
        let edge = self.advance.sample();
        if let Ok(Some(Edge::Pressed)) = edge {
            self.cursor.advance();
            self.stale = true;
        }
        if self.stale {
            self.leds.show(self.cursor)?;
            self.stale = false;
        }
        edge.map(|_| ())
    }

    fn poll_buzz(&mut self) -> Result<()> {
        match self.buzz.sample()? {
            Some(Edge::Pressed) => self.buzzer.send(true),
            Some(Edge::Released) => self.buzzer.send(false),
            None => {}
        }
        Ok(())
    }

    /// Polls every `period_ms` until `shutdown` fires. A failed pass is logged and the
    /// next one runs as usual.
    pub fn run<D: DelayNs>(&mut self, delay: &mut D, shutdown: &Shutdown, period_ms: u32) {
        while shutdown.is_running() {
            if let Err(err) = self.poll() {
                warn!("Sampling failed: {err}");
            }
            delay.delay_ms(period_ms);
        }
    }

    pub fn into_leds(self) -> LedStrip<O> {
        self.leds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buzzer::{BuzzReceiver, buzz_channel};
    use crate::led_strip::LED_COUNT;
    use crate::sim::{SimInput, SimOutput};

    struct Rig {
        sampler: Sampler<SimInput, SimOutput>,
        blue: SimInput,
        red: SimInput,
        leds: [SimOutput; LED_COUNT],
        commands: BuzzReceiver,
    }

    fn rig() -> Rig {
        let blue = SimInput::new();
        let red = SimInput::new();
        let leds: [SimOutput; LED_COUNT] = Default::default();
        let (tx, commands) = buzz_channel();
        let sampler = Sampler::new(
            Button::new("Blue", blue.clone()),
            Button::new("Red", red.clone()),
            LedStrip::new(leds.clone()),
            tx,
        );
        Rig {
            sampler,
            blue,
            red,
            leds,
            commands,
        }
    }

    #[test]
    fn edge_detector_reports_transitions_only() {
        let mut edges = EdgeDetector::default();
        assert_eq!(edges.update(false), None);
        assert_eq!(edges.update(true), Some(Edge::Pressed));
        assert_eq!(edges.update(true), None);
        assert_eq!(edges.update(false), Some(Edge::Released));
        assert_eq!(edges.update(false), None);
    }

    #[test]
    fn holding_advance_moves_cursor_once() {
        let mut rig = rig();
        rig.blue.press();
        for _ in 0..4 {
            rig.sampler.poll().unwrap();
        }
        assert_eq!(rig.sampler.cursor().position(), Some(0));
        assert!(rig.leds[0].is_set_high());
    }

    #[test]
    fn release_keeps_the_lit_led() {
        let mut rig = rig();
        rig.blue.press();
        rig.sampler.poll().unwrap();
        let writes = rig.leds[0].history().len();
        rig.blue.release();
        rig.sampler.poll().unwrap();
        assert_eq!(rig.sampler.cursor().position(), Some(0));
        assert_eq!(rig.leds[0].history().len(), writes);
        assert!(rig.leds[0].is_set_high());
    }

    #[test]
    fn buzz_button_sends_start_and_stop() {
        let mut rig = rig();
        rig.sampler.poll().unwrap();
        assert_eq!(rig.commands.try_recv(), None);

        rig.red.press();
        rig.sampler.poll().unwrap();
        assert_eq!(rig.commands.try_recv(), Some(true));

        rig.sampler.poll().unwrap();
        assert_eq!(rig.commands.try_recv(), None);

        rig.red.release();
        rig.sampler.poll().unwrap();
        assert_eq!(rig.commands.try_recv(), Some(false));
    }

    #[test]
    fn failed_read_is_retried_next_pass() {
        let mut rig = rig();
        rig.blue.press();
        rig.red.press();
        rig.blue.fail_next(1);

        assert!(rig.sampler.poll().is_err());
        assert_eq!(rig.sampler.cursor().position(), None);
        assert_eq!(rig.commands.try_recv(), Some(true));

        rig.sampler.poll().unwrap();
        assert_eq!(rig.sampler.cursor().position(), Some(0));
    }

    fn lit(leds: &[SimOutput]) -> Vec<usize> {
        leds.iter()
            .enumerate()
            .filter(|(_, led)| led.is_set_high())
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn failed_led_write_is_redrawn_next_pass() {
        let mut rig = rig();
        rig.blue.press();
        rig.sampler.poll().unwrap();
        rig.blue.release();
        rig.sampler.poll().unwrap();
        assert_eq!(lit(&rig.leds), [0]);

        rig.leds[0].fail_next(1);
        rig.blue.press();
        assert!(rig.sampler.poll().is_err());
        assert_eq!(rig.sampler.cursor().position(), Some(1));
        assert_eq!(lit(&rig.leds), [0]);

        rig.sampler.poll().unwrap();
        assert_eq!(lit(&rig.leds), [1]);

        let writes: Vec<usize> = rig.leds.iter().map(|led| led.history().len()).collect();
        for _ in 0..5 {
            rig.sampler.poll().unwrap();
        }
        assert_eq!(lit(&rig.leds), [1]);
        assert_eq!(
            rig.leds.iter().map(|led| led.history().len()).collect::<Vec<_>>(),
            writes
        );
    }

    #[test]
    fn redraw_retries_while_the_fault_persists() {
        let mut rig = rig();
        rig.leds[2].fail_next(3);
        rig.blue.press();
        for _ in 0..3 {
            assert!(rig.sampler.poll().is_err());
        }
        rig.sampler.poll().unwrap();
        assert_eq!(rig.sampler.cursor().position(), Some(0));
        assert_eq!(lit(&rig.leds), [0]);
    }
}
