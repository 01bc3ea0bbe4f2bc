//! Error notification: the [`Reporter`] contract and the [`ErrorBus`].
//!
//! A scan never waits on, or observes the outcome of, a report. Listeners are
//! called in subscription order and their return values are discarded.

use std::fmt;

/// Receives `(line, message)` notifications from the scanner.
pub trait Reporter {
    fn report(&self, line: usize, message: &str);
}

type Listener = Box<dyn Fn(usize, &str) + Send + Sync>;

/// A reporter that fans every notification out to its subscribed listeners.
#[derive(Default)]
pub struct ErrorBus {
    listeners: Vec<Listener>,
}

impl ErrorBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Register a listener. Listeners cannot be removed.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(usize, &str) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Reporter for ErrorBus {
    fn report(&self, line: usize, message: &str) {
        tracing::trace!(line, message, listeners = self.listeners.len(), "error reported");
        for listener in &self.listeners {
            listener(line, message);
        }
    }
}

impl fmt::Debug for ErrorBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
