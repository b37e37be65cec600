//! Data form shown once an integration is connected.

use super::page_backend;
use connect_hub_core::Provider;
use connect_hub_integration::{
    ConnectorError, ConnectorSettings, Credentials, IntegrationBackend, IntegrationItem,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

async fn load_items(
    provider: Provider,
    credentials: Credentials,
    settings: ConnectorSettings,
) -> Result<Vec<IntegrationItem>, ConnectorError> {
    page_backend(settings)?
        .load_items(provider, &credentials)
        .await
}

/// Loads and lists the connected provider's items.
#[component]
pub fn DataForm(
    params: connect_hub_integration::DataFormProps,
    settings: ConnectorSettings,
) -> impl IntoView {
    let provider = params.load_provider();
    let connect_hub_integration::DataFormProps {
        integration_type,
        credentials,
        ..
    } = params;
    let credentials = StoredValue::new(credentials);
    let settings = StoredValue::new(settings);

    let items = RwSignal::new(Vec::<IntegrationItem>::new());
    let error = RwSignal::new(Option::<String>::None);
    let loading = RwSignal::new(false);

    let on_load = move |_| {
        let provider = match provider.clone() {
            Ok(provider) => provider,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        loading.set(true);
        error.set(None);
        let credentials = credentials.get_value();
        let settings = settings.get_value();
        spawn_local(async move {
            match load_items(provider, credentials, settings).await {
                Ok(loaded) => {
                    tracing::info!(provider = %provider, count = loaded.len(), "Loaded integration items");
                    let _ = items.try_set(loaded);
                }
                Err(e) => {
                    tracing::warn!(provider = %provider, error = %e, "Failed to load integration items");
                    let _ = error.try_set(Some(e.to_string()));
                }
            }
            let _ = loading.try_set(false);
        });
    };

    view! {
        <section class="data-form">
            <h2>{format!("{integration_type} data")}</h2>
            <div class="actions-bar">
                <button
                    class="primary-btn"
                    disabled=move || loading.get()
                    on:click=on_load
                >
                    {move || if loading.get() { "Loading..." } else { "Load Data" }}
                </button>
                <button
                    class="secondary-btn"
                    disabled=move || loading.get()
                    on:click=move |_| {
                        items.set(Vec::new());
                        error.set(None);
                    }
                >"Clear"</button>
            </div>
            {move || error.get().map(|message| view! {
                <p class="error-message">{message}</p>
            })}
            <ul class="item-list">
                {move || items.get().into_iter().map(|item| {
                    let label = item.label().to_string();
                    view! {
                        <li class="item">
                            <span class="item-name">{label}</span>
                            {item.item_type.map(|kind| view! {
                                <span class="item-type">{kind}</span>
                            })}
                            {item.parent_name.map(|parent| view! {
                                <span class="item-parent">{parent}</span>
                            })}
                        </li>
                    }
                }).collect_view()}
            </ul>
        </section>
    }
}
