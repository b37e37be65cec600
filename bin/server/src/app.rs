//! Main Leptos application component and routing.

use crate::pages::IntegrationFormPage;
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};

/// The main application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="connect-hub"/>
        <Router>
            <header class="header">
                <a href="/" class="logo">"connect-hub"</a>
            </header>
            <main class="container">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=path!("/") view=IntegrationFormPage/>
                </Routes>
            </main>
        </Router>
    }
}
