//! Inline delete confirmation

use leptos::prelude::*;

/// Delete button that asks for confirmation in place
///
/// The confirmation state is owned by the caller (the page's modal state),
/// so at most one row asks at a time.
#[component]
pub fn DeleteConfirmButton(
    /// Whether this row is the one awaiting confirmation
    #[prop(into)]
    pending: Signal<bool>,
    /// Ask for confirmation
    on_request: Callback<()>,
    /// Delete for real
    on_confirm: Callback<()>,
    /// Back out
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <Show
            when=move || pending.get()
            fallback=move || {
                view! {
                    <button
                        class="delete-btn"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            on_request.run(());
                        }
                    >
                        "Delete"
                    </button>
                }
            }
        >
            <span class="delete-confirm">
                <span class="delete-confirm-text">"Delete?"</span>
                <button
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        on_confirm.run(());
                    }
                >
                    "Yes"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        on_cancel.run(());
                    }
                >
                    "No"
                </button>
            </span>
        </Show>
    }
}
