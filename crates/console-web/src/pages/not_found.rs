//! 404 page

use leptos::prelude::*;
use leptos_router::components::A;

/// Shown for unknown client-side routes
#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <div class="not-found">
            <h1>"404"</h1>
            <p>"Page not found"</p>
            <A href="/">"Back to the dashboard"</A>
        </div>
    }
}
