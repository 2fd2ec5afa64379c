//! Loading indicator

use leptos::prelude::*;

/// Loading spinner component
#[component]
pub fn Loading(
    /// Text under the spinner
    #[prop(into, default = "Loading...".to_string())]
    label: String,
) -> impl IntoView {
    view! {
        <div class="loading">
            <div class="spinner"></div>
            <p>{label}</p>
        </div>
    }
}
