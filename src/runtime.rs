use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Unified event type consumed by the app runner. Time only ever advances
/// through `Tick`, so one runner means one tick cadence for the program.
#[derive(Clone, Debug)]
pub enum LoopEvent {
    Key(KeyEvent),
    Tick,
}

/// Source of terminal key events
pub trait LoopEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<LoopEvent, RecvTimeoutError>;
}

/// Production event source using crossterm. Non-key terminal events are
/// dropped; the next draw picks up a resize on its own.
pub struct CrosstermEventSource {
    rx: Receiver<LoopEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if tx.send(LoopEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl LoopEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<LoopEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<LoopEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<LoopEvent>) -> Self {
        Self { rx }
    }
}

impl LoopEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<LoopEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time.
///
/// Restarting or resetting a session never spawns a second countdown loop
/// because ticks only ever arrive through this single stepper.
pub struct Runner<E: LoopEventSource> {
    event_source: E,
    tick_every: Duration,
}

impl<E: LoopEventSource> Runner<E> {
    pub fn new(event_source: E, tick_every: Duration) -> Self {
        Self {
            event_source,
            tick_every,
        }
    }

    /// Blocks up to the tick interval and returns the next event, or Tick on timeout
    pub fn step(&self) -> LoopEvent {
        match self.event_source.recv_timeout(self.tick_every) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => LoopEvent::Tick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::sync::mpsc;

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let runner = Runner::new(es, Duration::from_millis(1));

        // With no events available, step should yield Tick
        let ev = runner.step();
        match ev {
            LoopEvent::Tick => {}
            _ => panic!("expected Tick on timeout"),
        }
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(LoopEvent::Key(KeyEvent::new(
            KeyCode::Enter,
            KeyModifiers::NONE,
        )))
        .unwrap();
        let es = TestEventSource::new(rx);
        let runner = Runner::new(es, Duration::from_millis(10));

        match runner.step() {
            LoopEvent::Key(key) => assert_eq!(key.code, KeyCode::Enter),
            _ => panic!("expected Key event"),
        }
    }
}
