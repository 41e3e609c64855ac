//! Background observer for the applet's last-event label
//!
//! Samples the label on a fixed interval and reports changes, the way a UI
//! refresh timer would. Events that are overwritten between two samples are
//! never seen.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use layr_card::{Event, LastEvent};
use tracing::{debug, trace};

/// Receives label changes seen by the poller
pub(crate) trait LabelHandler {
    fn handle_label(&mut self, event: Event);
}

impl<F> LabelHandler for F
where
    F: FnMut(Event),
{
    fn handle_label(&mut self, event: Event) {
        self(event)
    }
}

#[derive(Debug)]
pub(crate) struct Poller {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Poller {
    /// Start sampling `events` every `interval`
    ///
    /// The handler is called once immediately with the current label, then
    /// again whenever a sample differs from the previous one.
    pub(crate) fn spawn<H>(events: Arc<LastEvent>, interval: Duration, mut handler: H) -> Self
    where
        H: LabelHandler + Send + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));

        let handle = {
            let running = Arc::clone(&running);
            thread::spawn(move || {
                let mut last = events.get();
                handler.handle_label(last);

                while running.load(Ordering::Acquire) {
                    thread::sleep(interval);

                    let current = events.get();
                    trace!(label = current.label(), "Sampled last event");
                    if current != last {
                        handler.handle_label(current);
                        last = current;
                    }
                }
                debug!("Label poller stopped");
            })
        };

        Self {
            running,
            handle: Some(handle),
        }
    }

    /// Stop sampling and wait for the thread to finish
    pub(crate) fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                debug!("Label poller panicked");
            }
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.shutdown();
    }
}
