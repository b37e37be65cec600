//! One connect attempt, sequenced for a timer-driven host.
//!
//! The host owns the connector state and the repeating watch timer. It
//! hands every state change to the attempt as an `apply` callback, which
//! returns `None` once the connector is gone. The attempt decides when the
//! timer stops, when credentials are polled and whether the outcome is
//! emitted.

use crate::backend::IntegrationBackend;
use crate::connector::{ConnectFlow, ConnectorEvent};
use crate::credentials::ConnectOutcome;
use crate::popup::{PopupOpener, PopupWatcher, WatchTick};
use connect_hub_core::{Provider, SessionIdentity};
use std::cell::RefCell;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// What the owner of the watch timer should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickAction {
    /// Keep the timer running.
    Continue,
    /// Clear the timer, then call [`ConnectAttempt::poll`].
    StopAndPoll,
    /// Clear the timer.
    Stop,
}

/// Marks an attempt as abandoned.
///
/// Cheap to clone and `Send`, so it can live in a cleanup hook while the
/// attempt itself stays with the tasks driving it.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A single authorize, watch and poll cycle.
pub struct ConnectAttempt<B, O: PopupOpener> {
    flow: ConnectFlow<B, O>,
    identity: SessionIdentity,
    watcher: RefCell<Option<PopupWatcher<O::Window>>>,
    cancel: CancelHandle,
}

impl<B, O> ConnectAttempt<B, O>
where
    B: IntegrationBackend,
    O: PopupOpener,
{
    #[must_use]
    pub fn new(flow: ConnectFlow<B, O>, identity: SessionIdentity) -> Self {
        Self {
            flow,
            identity,
            watcher: RefCell::new(None),
            cancel: CancelHandle::default(),
        }
    }

    #[must_use]
    pub fn provider(&self) -> Provider {
        self.flow.provider()
    }

    /// Period of the watch timer.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        self.flow.settings().poll_interval()
    }

    #[must_use]
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Authorizes and opens the popup.
    ///
    /// Returns true if the host should now start the watch timer. On
    /// failure `Failed` is applied and nothing was opened.
    pub async fn open(&self, apply: impl Fn(ConnectorEvent) -> Option<bool>) -> bool {
        if self.is_cancelled() {
            return false;
        }
        match self.flow.begin(&self.identity).await {
            Ok(watcher) => {
                if self.is_cancelled() {
                    return false;
                }
                *self.watcher.borrow_mut() = Some(watcher);
                true
            }
            Err(e) => {
                tracing::warn!(provider = %self.provider(), error = %e, "Failed to start authorization");
                if !self.is_cancelled() {
                    apply(ConnectorEvent::Failed(e.to_string()));
                }
                false
            }
        }
    }

    /// Records that the watch timer is running.
    ///
    /// Returns false if the connector no longer accepts the event, in which
    /// case the host should clear the timer.
    pub fn watching(&self, apply: impl Fn(ConnectorEvent) -> Option<bool>) -> bool {
        !self.is_cancelled() && apply(ConnectorEvent::PopupOpened) == Some(true)
    }

    /// Records that the watch timer could not be started.
    pub fn watch_failed(&self, reason: &str, apply: impl Fn(ConnectorEvent) -> Option<bool>) {
        tracing::error!(provider = %self.provider(), reason, "Failed to start popup watcher");
        self.watcher.borrow_mut().take();
        apply(ConnectorEvent::Failed(format!(
            "Could not watch the authorization window: {reason}"
        )));
    }

    /// Checks the popup once.
    pub fn on_tick(&self, apply: impl Fn(ConnectorEvent) -> Option<bool>) -> TickAction {
        if self.is_cancelled() {
            return TickAction::Stop;
        }
        let tick = self
            .watcher
            .borrow_mut()
            .as_mut()
            .map_or(WatchTick::Finished, PopupWatcher::tick);
        match tick {
            WatchTick::Open => TickAction::Continue,
            WatchTick::Closed => {
                if apply(ConnectorEvent::PopupClosed) == Some(true) {
                    TickAction::StopAndPoll
                } else {
                    TickAction::Stop
                }
            }
            WatchTick::Finished => TickAction::Stop,
        }
    }

    /// Polls credentials after the popup closed.
    ///
    /// Returns the outcome to hand to the form, which happens only if the
    /// attempt is still live and the connector accepted the result.
    pub async fn poll(
        &self,
        apply: impl Fn(ConnectorEvent) -> Option<bool>,
    ) -> Option<ConnectOutcome> {
        if self.is_cancelled() {
            return None;
        }
        let result = self.flow.poll_credentials(&self.identity).await;
        if self.is_cancelled() {
            return None;
        }
        if let Err(e) = &result {
            tracing::warn!(provider = %self.provider(), error = %e, "Failed to fetch credentials");
        }
        let applied = apply(ConnectorEvent::from_poll(&result));
        match (applied, result) {
            (Some(true), Ok(outcome)) => outcome,
            _ => None,
        }
    }
}
