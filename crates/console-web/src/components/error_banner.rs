//! Error and info banners

use crate::context::Notice;
use leptos::prelude::*;

/// Load error with an optional Retry button
#[component]
pub fn ErrorBanner(
    /// Message, hidden when `None`
    #[prop(into)]
    message: Signal<Option<String>>,
    /// Retry action
    #[prop(optional)]
    on_retry: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <Show when=move || message.with(Option::is_some)>
            <div class="banner banner-error" role="alert">
                <span>{move || message.get().unwrap_or_default()}</span>
                {on_retry.map(|retry| {
                    view! {
                        <button class="retry-btn" on:click=move |_| retry.run(())>
                            "Retry"
                        </button>
                    }
                })}
            </div>
        </Show>
    }
}

/// Dismissible result of the last mutation
#[component]
pub fn NoticeBanner(
    /// Notice slot
    notice: RwSignal<Option<Notice>>,
) -> impl IntoView {
    move || {
        notice.get().map(|current| {
            let (class, text) = match current {
                Notice::Info(text) => ("banner banner-info", text),
                Notice::Error(text) => ("banner banner-error", text),
            };
            view! {
                <div class=class role="status">
                    <span>{text}</span>
                    <button class="dismiss-btn" on:click=move |_| notice.set(None)>
                        "Dismiss"
                    </button>
                </div>
            }
        })
    }
}
