//! Connector widget for one provider.
//!
//! Owns a [`ConnectorState`] and the interval timer that watches the
//! authorization popup. The sequencing of an attempt lives in
//! [`ConnectAttempt`](connect_hub_integration::ConnectAttempt); this widget
//! only wires its timer and tasks to it. The timer is cleared when the
//! popup closes, when a new attempt starts and when the component is
//! cleaned up.

use connect_hub_core::Provider;
use connect_hub_integration::{CancelHandle, ConnectOutcome, ConnectorSettings, ConnectorState};
use leptos::prelude::*;

/// The attempt currently in flight, as seen by cleanup.
struct ActiveAttempt {
    cancel: CancelHandle,
    interval: Option<IntervalHandle>,
}

type AttemptSlot = StoredValue<Option<ActiveAttempt>>;

/// Label of the connect button.
fn button_label(provider: Provider, is_connected: bool) -> String {
    if is_connected {
        format!("Reconnect to {}", provider.display_name())
    } else {
        format!("Connect to {}", provider.display_name())
    }
}

fn button_disabled(state: &ConnectorState) -> bool {
    state.status().is_loading || !state.can_connect()
}

/// Clears the popup watcher timer, if one is running.
#[cfg(feature = "hydrate")]
fn stop_watching(slot: AttemptSlot) {
    let handle = slot
        .try_update_value(|active| active.as_mut().and_then(|active| active.interval.take()))
        .flatten();
    if let Some(handle) = handle {
        handle.clear();
    }
}

/// Abandons the attempt in flight and clears its timer.
fn stop_attempt(slot: AttemptSlot) {
    if let Some(active) = slot.try_update_value(Option::take).flatten() {
        active.cancel.cancel();
        if let Some(handle) = active.interval {
            handle.clear();
        }
    }
}

/// OAuth connect button with loading and error display.
#[component]
pub fn Connector(
    #[prop(into)] props: Signal<connect_hub_integration::ConnectorProps>,
    settings: ConnectorSettings,
    on_connected: Callback<ConnectOutcome>,
) -> impl IntoView {
    let (provider, starts_connected) =
        props.with_untracked(|props| (props.provider, props.starts_connected));
    let state = RwSignal::new(ConnectorState::initial(starts_connected));
    let status = Memo::new(move |_| state.with(ConnectorState::status));
    let disabled = Memo::new(move |_| state.with(button_disabled));
    let slot: AttemptSlot = StoredValue::new(None);
    let settings = StoredValue::new(settings);

    on_cleanup(move || stop_attempt(slot));

    let on_connect = move |_| {
        if !state.with_untracked(ConnectorState::can_connect) {
            return;
        }
        #[cfg(feature = "hydrate")]
        start_connect(
            props.with_untracked(|props| props.identity.clone()),
            provider,
            settings.get_value(),
            state,
            slot,
            on_connected,
        );
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (settings, on_connected);
            tracing::warn!(provider = %provider, "Connect requested outside the browser");
        }
    };

    view! {
        <div class="connector">
            <div class="connector-header">
                <span class="connector-icon">{provider.icon()}</span>
                <div>
                    <h3>{provider.display_name()}</h3>
                    <p class="connector-description">{provider.description()}</p>
                </div>
            </div>
            {move || status.get().is_loading.then(|| view! {
                <div class="spinner" role="status" aria-label="Loading"></div>
            })}
            {move || {
                let error = status.get().error;
                (!error.is_empty()).then(|| view! { <p class="error-message">{error}</p> })
            }}
            <button
                class="primary-btn"
                disabled=move || disabled.get()
                on:click=on_connect
            >
                {move || button_label(provider, status.get().is_connected)}
            </button>
        </div>
    }
}

/// Runs one connect attempt, wiring its watch timer and poll task.
#[cfg(feature = "hydrate")]
fn start_connect(
    identity: connect_hub_core::SessionIdentity,
    provider: Provider,
    settings: ConnectorSettings,
    state: RwSignal<ConnectorState>,
    slot: AttemptSlot,
    on_connected: Callback<ConnectOutcome>,
) {
    use connect_hub_integration::{ConnectorEvent, TickAction};
    use leptos::task::spawn_local;
    use std::rc::Rc;

    stop_attempt(slot);
    let apply = move |event| state.try_update(|state| state.apply(event));
    if apply(ConnectorEvent::Started) != Some(true) {
        return;
    }

    let attempt = match crate::browser::connect_attempt(provider, identity, settings) {
        Ok(attempt) => Rc::new(attempt),
        Err(e) => {
            apply(ConnectorEvent::Failed(e.to_string()));
            return;
        }
    };
    let cancel = attempt.cancel_handle();
    slot.try_update_value(|active| {
        *active = Some(ActiveAttempt {
            cancel,
            interval: None,
        });
    });

    spawn_local(async move {
        if !attempt.open(apply).await {
            return;
        }

        let ticking = Rc::clone(&attempt);
        let on_tick = move || match ticking.on_tick(apply) {
            TickAction::Continue => {}
            TickAction::Stop => stop_watching(slot),
            TickAction::StopAndPoll => {
                stop_watching(slot);
                let attempt = Rc::clone(&ticking);
                spawn_local(async move {
                    if let Some(outcome) = attempt.poll(apply).await {
                        on_connected.run(outcome);
                    }
                });
            }
        };

        match set_interval_with_handle(on_tick, attempt.poll_interval()) {
            Ok(handle) => {
                let stored = slot
                    .try_update_value(|active| match active {
                        Some(active) if !active.cancel.is_cancelled() => {
                            active.interval = Some(handle);
                            true
                        }
                        _ => false,
                    })
                    .unwrap_or(false);
                if !stored || !attempt.watching(apply) {
                    handle.clear();
                }
            }
            Err(e) => attempt.watch_failed(&format!("{e:?}"), apply),
        }
    });
}
