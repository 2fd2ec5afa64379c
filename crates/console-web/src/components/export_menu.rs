//! Export format and row-limit picker

use console_protocol::{ExportFormat, ExportRequest};
use leptos::prelude::*;

/// Format and limit selects plus an Export button
#[component]
pub fn ExportMenu(
    /// Row limits offered
    limits: Vec<usize>,
    /// Preselected limit
    default_limit: usize,
    /// Called with the picked format and limit
    on_export: Callback<ExportRequest>,
    /// Disables the button, e.g. while loading
    #[prop(into, default = Signal::stored(false))]
    disabled: Signal<bool>,
) -> impl IntoView {
    let format = RwSignal::new(ExportFormat::Csv);
    let limit = RwSignal::new(default_limit);

    view! {
        <div class="export-menu">
            <label>
                "Format"
                <select on:change=move |ev| {
                    if let Some(picked) = ExportFormat::from_extension(&event_target_value(&ev)) {
                        format.set(picked);
                    }
                }>
                    {ExportFormat::ALL
                        .into_iter()
                        .map(|choice| {
                            view! {
                                <option
                                    value=choice.extension()
                                    selected=move || format.get() == choice
                                >
                                    {choice.to_string()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </label>
            <label>
                "Rows"
                <select on:change=move |ev| {
                    if let Ok(picked) = event_target_value(&ev).parse::<usize>() {
                        limit.set(picked);
                    }
                }>
                    {limits
                        .into_iter()
                        .map(|choice| {
                            view! {
                                <option value=choice.to_string() selected=choice == default_limit>
                                    {choice}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </label>
            <button
                class="export-btn"
                disabled=move || disabled.get()
                on:click=move |_| on_export.run(ExportRequest::new(format.get(), limit.get()))
            >
                "Export"
            </button>
        </div>
    }
}
