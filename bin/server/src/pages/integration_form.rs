//! Integration selector page and its server function.

use crate::components::{Connector, DataForm};
use connect_hub_core::Provider;
use connect_hub_integration::{ConnectOutcome, ConnectorSettings, SelectorForm};
use leptos::prelude::*;

/// Server function returning the connector settings from configuration.
#[server(endpoint = "get_connector_settings")]
pub async fn get_connector_settings() -> Result<ConnectorSettings, ServerFnError> {
    use axum::Extension;

    let Extension(settings): Extension<ConnectorSettings> = leptos_axum::extract().await?;
    Ok(settings)
}

/// Integration selector page.
#[component]
pub fn IntegrationFormPage() -> impl IntoView {
    let settings = Resource::new(|| (), |_| get_connector_settings());

    view! {
        <div class="integration-page">
            <h1>"Connect an integration"</h1>
            <Suspense fallback=move || view! { <p>"Loading..."</p> }>
                {move || {
                    settings.get().map(|result| {
                        match result {
                            Ok(settings) => view! {
                                <IntegrationForm settings=settings/>
                            }.into_any(),
                            Err(e) => {
                                tracing::warn!(error = %e, "Failed to load connector settings");
                                view! {
                                    <p class="error-message">
                                        "Failed to load connector settings. Using defaults."
                                    </p>
                                    <IntegrationForm settings=ConnectorSettings::default()/>
                                }.into_any()
                            }
                        }
                    })
                }}
            </Suspense>
        </div>
    }
}

/// Identifier fields, the provider select, the active connector and,
/// once credentials exist, the data form.
#[component]
fn IntegrationForm(settings: ConnectorSettings) -> impl IntoView {
    let form = RwSignal::new(SelectorForm::default());
    let settings = StoredValue::new(settings);

    let selected = Memo::new(move |_| form.with(SelectorForm::selected));
    let data_form = Memo::new(move |_| form.with(SelectorForm::data_form_props));

    let on_connected = Callback::new(move |outcome: ConnectOutcome| {
        form.update(|form| form.apply_outcome(outcome));
    });

    view! {
        <div class="selector-form">
            <div class="form-group">
                <label for="user-id">"User ID"</label>
                <input
                    id="user-id"
                    type="text"
                    prop:value=move || form.with(|form| form.user().to_string())
                    on:input=move |ev| form.update(|form| form.set_user(event_target_value(&ev)))
                />
            </div>
            <div class="form-group">
                <label for="org-id">"Organization ID"</label>
                <input
                    id="org-id"
                    type="text"
                    prop:value=move || form.with(|form| form.org().to_string())
                    on:input=move |ev| form.update(|form| form.set_org(event_target_value(&ev)))
                />
            </div>
            <div class="form-group">
                <label for="integration-type">"Integration"</label>
                <select
                    id="integration-type"
                    on:change=move |ev| {
                        let provider = event_target_value(&ev).parse::<Provider>().ok();
                        form.update(|form| form.select(provider));
                    }
                >
                    <option value="" selected=move || selected.get().is_none()>
                        "Select an integration"
                    </option>
                    {Provider::ALL.into_iter().map(|provider| {
                        view! {
                            <option
                                value=provider.slug()
                                selected=move || selected.get() == Some(provider)
                            >
                                {format!("{} {}", provider.icon(), provider.display_name())}
                            </option>
                        }
                    }).collect_view()}
                </select>
            </div>

            {move || selected.get().map(|provider| {
                let props = Signal::derive(move || form.with(|form| form.connector_props(provider)));
                view! {
                    <Connector
                        props=props
                        settings=settings.get_value()
                        on_connected=on_connected
                    />
                }
            })}

            {move || data_form.get().map(|params| view! {
                <DataForm params=params settings=settings.get_value()/>
            })}
        </div>
    }
}
