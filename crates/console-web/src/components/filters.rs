//! Search box and facet filter controls

use console_protocol::list::{ALL_CHOICE, ALL_LABEL};
use leptos::prelude::*;

/// Free-text search over a page's searchable fields
#[component]
pub fn SearchBox(
    /// Current search term
    #[prop(into)]
    value: Signal<String>,
    /// Called on every keystroke
    on_search: Callback<String>,
    /// Placeholder text
    #[prop(into, default = "Search...".to_string())]
    placeholder: String,
) -> impl IntoView {
    view! {
        <div class="filter search">
            <label>"Search"</label>
            <input
                type="search"
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_search.run(event_target_value(&ev))
            />
        </div>
    }
}

/// Dropdown over the distinct values of one facet, with an "All" option
#[component]
pub fn FacetSelect(
    /// Control label
    label: &'static str,
    /// Distinct values present in the collection
    #[prop(into)]
    choices: Signal<Vec<String>>,
    /// Selected value, [`ALL_CHOICE`] when unrestricted
    #[prop(into)]
    selected: Signal<String>,
    /// Called with the picked value
    on_select: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="filter">
            <label>{label}</label>
            <select on:change=move |ev| on_select.run(event_target_value(&ev))>
                <option value=ALL_CHOICE selected=move || selected.get() == ALL_CHOICE>
                    {ALL_LABEL}
                </option>
                <For
                    each=move || choices.get()
                    key=Clone::clone
                    children=move |choice: String| {
                        let value = choice.clone();
                        let label = choice.clone();
                        view! {
                            <option
                                value=choice
                                selected=move || selected.get() == value
                            >
                                {label}
                            </option>
                        }
                    }
                />
            </select>
        </div>
    }
}
