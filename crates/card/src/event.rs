//! Last-event label shared with an external observer
//!
//! The applet records what it last did in a single slot; an observer (a UI
//! refresh timer, a log poller) reads it on its own schedule. Only the latest
//! write is guaranteed to become visible, intermediate values may be missed.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Events the applet reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Event {
    /// Nothing has happened yet
    #[default]
    Idle = 0,
    /// The LAYR AID was selected
    Selected = 1,
    /// AUTH_INIT answered with the fixed pattern
    AuthInit = 2,
    /// The reader link went away
    Deactivated = 3,
}

impl Event {
    /// Human readable label, as shown to the observer
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Selected => "SELECT ok",
            Self::AuthInit => "AUTH_INIT -> sent pattern",
            Self::Deactivated => "Deactivated",
        }
    }

    const fn from_repr(value: u8) -> Self {
        match value {
            1 => Self::Selected,
            2 => Self::AuthInit,
            3 => Self::Deactivated,
            _ => Self::Idle,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Single-slot cell holding the most recent [`Event`]
///
/// Safe for one writer (the transport callback thread) and any number of
/// readers. Lock-free; a write never blocks the dispatcher.
#[derive(Debug)]
pub struct LastEvent {
    slot: AtomicU8,
}

impl LastEvent {
    /// A cell starting at [`Event::Idle`]
    pub const fn new() -> Self {
        Self {
            slot: AtomicU8::new(Event::Idle as u8),
        }
    }

    /// Overwrite the slot
    pub fn publish(&self, event: Event) {
        self.slot.store(event as u8, Ordering::Release);
    }

    /// Read the latest event
    pub fn get(&self) -> Event {
        Event::from_repr(self.slot.load(Ordering::Acquire))
    }

    /// Read the latest label
    pub fn label(&self) -> &'static str {
        self.get().label()
    }
}

impl Default for LastEvent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn test_labels_match_display() {
        for event in [
            Event::Idle,
            Event::Selected,
            Event::AuthInit,
            Event::Deactivated,
        ] {
            assert_eq!(event.to_string(), event.label());
            assert_eq!(Event::from_repr(event as u8), event);
        }
    }

    #[test]
    fn test_starts_idle() {
        let cell = LastEvent::default();
        assert_eq!(cell.get(), Event::Idle);
        assert_eq!(cell.label(), "Idle");
    }

    #[test]
    fn test_latest_write_wins() {
        let cell = LastEvent::new();
        cell.publish(Event::Selected);
        cell.publish(Event::AuthInit);
        assert_eq!(cell.get(), Event::AuthInit);
        cell.publish(Event::Deactivated);
        assert_eq!(cell.label(), "Deactivated");
    }

    #[test]
    fn test_visible_across_threads() {
        let cell = Arc::new(LastEvent::new());

        let writer = {
            let cell = Arc::clone(&cell);
            thread::spawn(move || {
                for _ in 0..1_000 {
                    cell.publish(Event::Selected);
                    cell.publish(Event::AuthInit);
                }
                cell.publish(Event::Deactivated);
            })
        };

        // The poller must eventually observe the final write
        let poller = {
            let cell = Arc::clone(&cell);
            thread::spawn(move || {
                while cell.get() != Event::Deactivated {
                    thread::yield_now();
                }
            })
        };

        poller.join().unwrap();
        writer.join().unwrap();
        assert_eq!(cell.get(), Event::Deactivated);
    }
}
