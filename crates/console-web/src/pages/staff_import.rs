//! Spreadsheet upload that creates staff members in bulk

use super::resource_view;
use crate::context::{Notice, ResourceHandle};
use crate::download::{describe, picked_file, read_file};
use console_protocol::BulkOutcome;
use console_types::FileUpload;
use console_types::entities::Staff;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use tracing::warn;

/// Accepted spreadsheet extensions
pub const SPREADSHEET_EXTENSIONS: [&str; 3] = [".csv", ".xlsx", ".xls"];

/// Whether a file name looks like a spreadsheet the backend accepts
#[must_use]
pub fn is_spreadsheet(file_name: &str) -> bool {
    let lower = file_name.to_ascii_lowercase();
    SPREADSHEET_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Form fields sent alongside the file
#[must_use]
pub fn import_fields(department: &str) -> Vec<(String, String)> {
    let department = department.trim();
    if department.is_empty() {
        Vec::new()
    } else {
        vec![("department".to_string(), department.to_string())]
    }
}

/// Staff import screen
#[component]
pub fn StaffImportPage() -> impl IntoView {
    resource_view::<Staff>("staff", Vec::new, |handle| {
        view! { <StaffImport handle=handle /> }.into_any()
    })
}

#[component]
fn StaffImport(handle: ResourceHandle<Staff>) -> impl IntoView {
    let file = RwSignal::new(None::<FileUpload>);
    let department = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let outcome = RwSignal::new(None::<BulkOutcome>);
    let error = RwSignal::new(None::<String>);

    let on_pick = move |ev: leptos::ev::Event| {
        outcome.set(None);
        error.set(None);
        let Some(picked) = picked_file(&ev) else {
            file.set(None);
            return;
        };
        if !is_spreadsheet(&picked.name()) {
            file.set(None);
            error.set(Some(format!(
                "Choose a spreadsheet ({})",
                SPREADSHEET_EXTENSIONS.join(", ")
            )));
            return;
        }
        spawn_local(async move {
            match read_file("file", picked).await {
                Ok(upload) => {
                    file.try_set(Some(upload));
                }
                Err(e) => {
                    error.try_set(Some(format!("Could not read the file: {}", describe(&e))));
                }
            }
        });
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(upload) = file.get_untracked() else {
            error.set(Some("Choose a file first".to_string()));
            return;
        };
        let fields = import_fields(&department.get_untracked());
        busy.set(true);
        error.set(None);
        let h = handle.clone();
        spawn_local(async move {
            match h.controller.import(upload, fields).await {
                Ok(result) => {
                    h.notify(Notice::Info(result.summary()));
                    outcome.try_set(Some(result));
                }
                Err(e) => {
                    warn!(error = %e, "Staff import failed");
                    error.try_set(Some(e.to_string()));
                }
            }
            busy.try_set(false);
            h.touch();
        });
    };

    view! {
        <section class="import-page">
            <h1>"Import staff"</h1>
            <form class="panel" on:submit=on_submit>
                <label>
                    "Spreadsheet"
                    <input type="file" accept=SPREADSHEET_EXTENSIONS.join(",") on:change=on_pick />
                </label>
                <label>
                    "Department"
                    <input
                        prop:value=move || department.get()
                        on:input=move |ev| department.set(event_target_value(&ev))
                    />
                </label>
                <button
                    type="submit"
                    class="primary"
                    disabled=move || busy.get() || file.with(Option::is_none)
                >
                    {move || if busy.get() { "Uploading..." } else { "Upload" }}
                </button>
            </form>
            {move || error.get().map(|message| view! { <div class="error-banner">{message}</div> })}
            {move || {
                outcome
                    .get()
                    .map(|result| {
                        let failed = result.has_failures();
                        view! {
                            <div class=if failed { "notice notice-warn" } else { "notice" }>
                                <p>{result.summary()}</p>
                                <ul>
                                    {result
                                        .errors
                                        .into_iter()
                                        .map(|e| view! { <li>{e}</li> })
                                        .collect_view()}
                                </ul>
                            </div>
                        }
                    })
            }}
            <A href="/staff">"Back to staff"</A>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("staff.csv", true)]
    #[case("Roster.XLSX", true)]
    #[case("old.xls", true)]
    #[case("notes.txt", false)]
    #[case("csv", false)]
    fn test_is_spreadsheet(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_spreadsheet(name), expected);
    }

    #[test]
    fn test_import_fields_skip_blank_department() {
        assert!(import_fields("  ").is_empty());
        assert_eq!(
            import_fields(" Science "),
            vec![("department".to_string(), "Science".to_string())]
        );
    }
}
