//! Create/edit form rendered from a record's declared fields

use crate::download::{picked_file, read_file};
use console_protocol::form::read_field;
use console_protocol::{ModalMode, ModalState};
use console_types::{FieldKind, FileUpload, FormField, Record};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::warn;

/// Modal form over the page's [`ModalState`]
///
/// Inputs write straight into the draft; parse failures and schema or
/// backend validation messages are shown under the input they belong to.
#[component]
pub fn MutationModal<T: Record>(
    /// The page's modal state
    modal: RwSignal<ModalState<T>>,
    /// Called when the form is submitted
    on_submit: Callback<()>,
    /// Image picked for a new record, when the entity takes one
    #[prop(default = None)]
    image: Option<RwSignal<Option<FileUpload>>>,
) -> impl IntoView {
    let showing = move || modal.with(|m| m.draft().is_some());
    let submitting = move || modal.with(ModalState::is_submitting);
    let creating = move || modal.with(|m| matches!(m.mode(), Some(ModalMode::Create)));
    let title = move || {
        if creating() {
            format!("Create {}", T::ENTITY)
        } else {
            format!("Edit {}", T::ENTITY)
        }
    };

    view! {
        <Show when=showing>
            <div class="modal-backdrop">
                <form
                    class="modal"
                    on:submit=move |ev| {
                        ev.prevent_default();
                        on_submit.run(());
                    }
                >
                    <h2>{title}</h2>
                    {move || {
                        modal
                            .with(|m| m.error().map(str::to_string))
                            .map(|message| view! { <p class="form-error">{message}</p> })
                    }}
                    {T::form_fields()
                        .iter()
                        .map(|field| view! { <FieldInput field=*field modal=modal /> })
                        .collect_view()}
                    {image
                        .map(|image| {
                            view! {
                                <Show when=creating>
                                    <ImageInput image=image />
                                </Show>
                            }
                        })}
                    <div class="modal-actions">
                        <button
                            type="button"
                            disabled=submitting
                            on:click=move |_| {
                                modal.update(|m| {
                                    m.cancel();
                                });
                            }
                        >
                            "Cancel"
                        </button>
                        <button type="submit" class="primary" disabled=submitting>
                            {move || if submitting() { "Saving..." } else { "Save" }}
                        </button>
                    </div>
                </form>
            </div>
        </Show>
    }
}

#[component]
fn FieldInput<T: Record>(field: FormField, modal: RwSignal<ModalState<T>>) -> impl IntoView {
    let value = move || {
        modal.with(|m| {
            m.draft()
                .map(|draft| read_field(draft, field.key))
                .unwrap_or_default()
        })
    };
    let error = move || modal.with(|m| m.field_error(field.key).map(str::to_string));
    let locked = move || modal.with(ModalState::is_submitting);
    let write = move |raw: String| {
        modal.update(|m| {
            // the message is attached to the field on failure
            let _ = m.edit_field(&field, &raw);
        });
    };

    let input = match field.kind {
        FieldKind::TextArea => view! {
            <textarea
                name=field.key
                required=field.required
                disabled=locked
                prop:value=value
                on:input=move |ev| write(event_target_value(&ev))
            ></textarea>
        }
        .into_any(),
        FieldKind::Select(choices) => view! {
            <select
                name=field.key
                required=field.required
                disabled=locked
                on:change=move |ev| write(event_target_value(&ev))
            >
                <option value="" selected=move || value().is_empty()>
                    "Select..."
                </option>
                {choices
                    .iter()
                    .map(|choice| {
                        view! {
                            <option value=*choice selected=move || value() == *choice>
                                {*choice}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        }
        .into_any(),
        kind => view! {
            <input
                type=input_type(kind)
                name=field.key
                required=field.required
                disabled=locked
                prop:value=value
                on:input=move |ev| write(event_target_value(&ev))
            />
        }
        .into_any(),
    };

    view! {
        <div class="form-field">
            <label>{field.label}</label>
            {input}
            {move || error().map(|message| view! { <span class="field-error">{message}</span> })}
        </div>
    }
}

#[component]
fn ImageInput(image: RwSignal<Option<FileUpload>>) -> impl IntoView {
    view! {
        <div class="form-field">
            <label>"Image"</label>
            <input
                type="file"
                accept="image/*"
                on:change=move |ev| {
                    let Some(file) = picked_file(&ev) else {
                        image.set(None);
                        return;
                    };
                    spawn_local(async move {
                        match read_file("image", file).await {
                            Ok(upload) => {
                                image.try_set(Some(upload));
                            }
                            Err(error) => warn!(?error, "Could not read the picked image"),
                        }
                    });
                }
            />
            {move || {
                image.with(|picked| {
                    picked
                        .as_ref()
                        .map(|upload| format!("{} ({} bytes)", upload.file_name, upload.len()))
                })
            }}
        </div>
    }
}

/// HTML input type for a field kind
const fn input_type(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Number => "number",
        FieldKind::Email => "email",
        FieldKind::Password => "password",
        FieldKind::Date => "date",
        FieldKind::Text | FieldKind::TextArea | FieldKind::Select(_) => "text",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(FieldKind::Number, "number")]
    #[case(FieldKind::Email, "email")]
    #[case(FieldKind::Password, "password")]
    #[case(FieldKind::Date, "date")]
    #[case(FieldKind::Text, "text")]
    fn test_input_type(#[case] kind: FieldKind, #[case] expected: &str) {
        assert_eq!(input_type(kind), expected);
    }
}
