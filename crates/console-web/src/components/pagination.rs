//! Pagination component for navigating through a page's rows

use leptos::prelude::*;

/// Previous/next controls with a "Page X of Y" label
///
/// With nothing to show the label reads "Page 1 of 1" and both buttons are
/// disabled.
#[component]
pub fn Pagination(
    /// Current page (1-based)
    #[prop(into)]
    current_page: Signal<usize>,
    /// Total number of pages
    #[prop(into)]
    total_pages: Signal<usize>,
    /// Callback when page changes
    on_page_change: Callback<usize>,
) -> impl IntoView {
    let has_prev = move || current_page.get() > 1;
    let has_next = move || current_page.get() < total_pages.get();

    view! {
        <div class="pagination">
            <button
                class="pagination-btn"
                disabled=move || !has_prev()
                on:click=move |_| {
                    if has_prev() {
                        on_page_change.run(current_page.get() - 1);
                    }
                }
            >
                "Previous"
            </button>

            <span class="pagination-info">
                {move || page_label(current_page.get(), total_pages.get())}
            </span>

            <button
                class="pagination-btn"
                disabled=move || !has_next()
                on:click=move |_| {
                    if has_next() {
                        on_page_change.run(current_page.get() + 1);
                    }
                }
            >
                "Next"
            </button>
        </div>
    }
}

/// Text of the page indicator; an empty result is one empty page
#[must_use]
pub fn page_label(current_page: usize, total_pages: usize) -> String {
    format!("Page {} of {}", current_page.max(1), total_pages.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(1, 0, "Page 1 of 1")]
    #[case(1, 1, "Page 1 of 1")]
    #[case(2, 3, "Page 2 of 3")]
    fn test_page_label(#[case] current: usize, #[case] total: usize, #[case] expected: &str) {
        assert_eq!(page_label(current, total), expected);
    }
}
