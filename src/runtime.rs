use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent, MouseEventKind};

/// Input and timing events consumed by the showcase loop
#[derive(Clone, Debug)]
pub enum DeckEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,
    /// No input arrived within one tick; carousels get polled
    Tick,
}

/// Source of terminal events
pub trait DeckEventSource: Send + 'static {
    /// Wait up to `timeout` for the next event.
    fn recv_timeout(&self, timeout: Duration) -> Result<DeckEvent, RecvTimeoutError>;
}

/// Reads crossterm events on a background thread
pub struct CrosstermEventSource {
    rx: Receiver<DeckEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let forwarded = match event::read() {
                Ok(CtEvent::Key(key)) => Some(DeckEvent::Key(key)),
                Ok(CtEvent::Mouse(mouse)) if is_relevant(&mouse) => Some(DeckEvent::Mouse(mouse)),
                Ok(CtEvent::Resize(_, _)) => Some(DeckEvent::Resize),
                Ok(_) => None,
                Err(_) => break,
            };
            if let Some(ev) = forwarded {
                if tx.send(ev).is_err() {
                    break;
                }
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

impl DeckEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<DeckEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

// Scroll events are dropped; hover tracking only needs moves and clicks.
fn is_relevant(mouse: &MouseEvent) -> bool {
    matches!(
        mouse.kind,
        MouseEventKind::Moved | MouseEventKind::Down(_) | MouseEventKind::Drag(_)
    )
}

pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Channel-fed event source for headless runs and tests
pub struct TestEventSource {
    rx: Receiver<DeckEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<DeckEvent>) -> Self {
        Self { rx }
    }

    /// Convenience constructor returning the sending half too
    pub fn channel() -> (Sender<DeckEvent>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self::new(rx))
    }
}

impl DeckEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<DeckEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Drives the app one event or tick at a time
pub struct Runner<E: DeckEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: DeckEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to one tick interval; a timeout or a closed source yields Tick
    pub fn step(&self) -> DeckEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => DeckEvent::Tick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseButton};

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, es) = TestEventSource::channel();
        let runner = Runner::new(es, FixedTicker::new(Duration::from_millis(1)));

        assert!(matches!(runner.step(), DeckEvent::Tick));
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, es) = TestEventSource::channel();
        tx.send(DeckEvent::Resize).unwrap();
        let runner = Runner::new(es, FixedTicker::new(Duration::from_millis(10)));

        assert!(matches!(runner.step(), DeckEvent::Resize));
    }

    #[test]
    fn closed_source_degrades_to_ticks() {
        let (tx, es) = TestEventSource::channel();
        drop(tx);
        let runner = Runner::new(es, FixedTicker::new(Duration::from_millis(10)));

        assert!(matches!(runner.step(), DeckEvent::Tick));
    }

    #[test]
    fn scroll_events_are_not_relevant() {
        let mouse = |kind| MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        assert!(is_relevant(&mouse(MouseEventKind::Moved)));
        assert!(is_relevant(&mouse(MouseEventKind::Down(MouseButton::Left))));
        assert!(!is_relevant(&mouse(MouseEventKind::ScrollDown)));
    }
}
