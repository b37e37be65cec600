//! Authorization popup abstraction and the closed-window watcher.
//!
//! The only completion signal for the provider consent screen is the
//! popup closing. A repeating timer calls [`PopupWatcher::tick`] until it
//! reports [`WatchTick::Closed`]; the watcher is fused so that happens at
//! most once per window.

use crate::error::ConnectorError;
use crate::settings::PopupFeatures;

/// A handle to an opened authorization window.
pub trait PopupWindow {
    /// Returns true once the user has closed the window.
    fn is_closed(&self) -> bool;
}

/// Opens authorization windows.
pub trait PopupOpener {
    type Window: PopupWindow;

    /// Opens `url` in a new window with the given features.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::PopupBlocked`] if the window could not be
    /// opened.
    fn open(&self, url: &str, features: &PopupFeatures) -> Result<Self::Window, ConnectorError>;
}

/// Result of a single watcher tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchTick {
    /// The window is still open.
    Open,
    /// The window was observed closed on this tick.
    Closed,
    /// Closure was already reported; the timer should have been cleared.
    Finished,
}

/// Watches one popup window for closure.
#[derive(Debug)]
pub struct PopupWatcher<W> {
    window: Option<W>,
}

impl<W: PopupWindow> PopupWatcher<W> {
    /// Starts watching a window.
    #[must_use]
    pub fn new(window: W) -> Self {
        Self {
            window: Some(window),
        }
    }

    /// Checks the window once.
    pub fn tick(&mut self) -> WatchTick {
        match &self.window {
            None => WatchTick::Finished,
            Some(window) if window.is_closed() => {
                self.window = None;
                WatchTick::Closed
            }
            Some(_) => WatchTick::Open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct TestWindow {
        closed: Rc<Cell<bool>>,
        checks: Rc<Cell<u32>>,
    }

    impl PopupWindow for TestWindow {
        fn is_closed(&self) -> bool {
            self.checks.set(self.checks.get() + 1);
            self.closed.get()
        }
    }

    #[test]
    fn reports_open_until_closed() {
        let window = TestWindow::default();
        let mut watcher = PopupWatcher::new(window.clone());

        assert_eq!(watcher.tick(), WatchTick::Open);
        assert_eq!(watcher.tick(), WatchTick::Open);

        window.closed.set(true);
        assert_eq!(watcher.tick(), WatchTick::Closed);
        assert_eq!(watcher.tick(), WatchTick::Finished);
    }

    #[test]
    fn closure_is_reported_once() {
        let window = TestWindow::default();
        window.closed.set(true);
        let mut watcher = PopupWatcher::new(window.clone());

        let closed = (0..5)
            .map(|_| watcher.tick())
            .filter(|tick| *tick == WatchTick::Closed)
            .count();
        assert_eq!(closed, 1);
        assert_eq!(watcher.tick(), WatchTick::Finished);
    }

    #[test]
    fn finished_watcher_stops_checking_the_window() {
        let window = TestWindow::default();
        window.closed.set(true);
        let mut watcher = PopupWatcher::new(window.clone());

        watcher.tick();
        watcher.tick();
        watcher.tick();
        assert_eq!(window.checks.get(), 1);
    }
}
