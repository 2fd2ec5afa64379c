//! The list page every entity is rendered with

use super::{
    DeleteConfirmButton, ErrorBanner, ExportMenu, FacetSelect, Loading, MutationModal,
    NoticeBanner, Pagination, SearchBox,
};
use crate::context::{Notice, ResourceHandle, use_console};
use crate::download::{describe, download, today};
use console_client::ResourceController;
use console_protocol::{ExportRequest, FilterValue, ListView, ModalMode, ModalState, VisibleSlice};
use console_types::{FileUpload, Record, RecordId};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{debug, warn};

/// Search, filters, table, pagination, export and the create/edit modal for
/// one entity
///
/// The page loads its collection when mounted. Everything it shows is
/// derived from the handle's list state.
#[component]
pub fn ResourcePage<T: Record>(
    /// Controller and signals of this page
    handle: ResourceHandle<T>,
    /// Extra buttons rendered in each row
    #[prop(optional)]
    row_actions: Option<fn(&T, &ResourceHandle<T>) -> AnyView>,
    /// Offer an image input when creating
    #[prop(optional)]
    with_image: bool,
    /// Hide create, edit and delete
    #[prop(optional)]
    read_only: bool,
    /// Extra toolbar content
    #[prop(optional)]
    children: Option<Children>,
) -> impl IntoView {
    let export_settings = use_console().settings.export;
    let modal = RwSignal::new(ModalState::<T>::Closed);
    let image = RwSignal::new(None::<FileUpload>);

    handle.reload();

    let slice: Signal<VisibleSlice<T>> = {
        let h = handle.clone();
        Signal::derive(move || h.read(ListView::visible_slice))
    };
    let load_error = {
        let h = handle.clone();
        Signal::derive(move || h.read(|v| v.error().map(str::to_string)))
    };
    let loading = {
        let h = handle.clone();
        Signal::derive(move || h.read(ListView::is_loading))
    };
    let no_records = {
        let h = handle.clone();
        Signal::derive(move || h.read(ListView::shows_no_records))
    };
    let search = {
        let h = handle.clone();
        Signal::derive(move || h.read(|v| v.query().search.clone()))
    };

    let on_search = {
        let h = handle.clone();
        Callback::new(move |term: String| h.update(|v| v.apply_search(term)))
    };
    let on_page_change = {
        let h = handle.clone();
        Callback::new(move |page: usize| {
            h.update(|v| v.go_to_page(page));
        })
    };
    let on_retry = {
        let h = handle.clone();
        Callback::new(move |()| h.reload())
    };
    let on_clear = {
        let h = handle.clone();
        move |_| h.update(ListView::clear_filters)
    };
    let on_export = {
        let h = handle.clone();
        Callback::new(move |request: ExportRequest| {
            let request = request.generated_on(today());
            match h.controller.export(&request) {
                Ok(file) => {
                    if let Err(error) = download(&file) {
                        h.notify(Notice::Error(format!("Download failed: {}", describe(&error))));
                    }
                }
                Err(error) => h.notify(Notice::Error(format!("Export failed: {error}"))),
            }
        })
    };
    let on_submit = {
        let h = handle.clone();
        Callback::new(move |()| submit(&h, modal, image))
    };

    let facets = T::facets()
        .iter()
        .map(|facet| {
            let dimension = facet.dimension;
            let choices = {
                let h = handle.clone();
                Signal::derive(move || h.read(|v| v.facet_values(dimension)))
            };
            let selected = {
                let h = handle.clone();
                Signal::derive(move || {
                    h.read(|v| v.query().filter(dimension).as_choice().to_string())
                })
            };
            let on_select = {
                let h = handle.clone();
                Callback::new(move |choice: String| {
                    h.update(|v| v.apply_filter(dimension, FilterValue::from_choice(&choice)));
                })
            };
            view! {
                <FacetSelect
                    label=facet.label
                    choices=choices
                    selected=selected
                    on_select=on_select
                />
            }
        })
        .collect_view();

    let columns = T::columns();
    let column_count = columns.len() + 1;
    let headers = columns
        .iter()
        .map(|column| view! { <th>{column.header}</th> })
        .collect_view();

    let row_handle = handle.clone();
    let render_row = move |record: T| {
        let cells = T::columns()
            .iter()
            .map(|column| view! { <td>{column.cell(&record)}</td> })
            .collect_view();
        let extra = row_actions.map(|actions| actions(&record, &row_handle));
        let controls = (!read_only)
            .then(|| record.id().cloned())
            .flatten()
            .map(|id| row_controls(row_handle.clone(), modal, record.clone(), id));

        view! {
            <tr>
                {cells}
                <td class="row-actions">{extra} {controls}</td>
            </tr>
        }
    };

    let is_demo = handle.is_demo();
    let notice = handle.notice;

    view! {
        <section class="resource-page">
            <div class="page-header">
                <h1>{T::LABEL}</h1>
                <Show when=move || is_demo>
                    <span class="badge badge-demo" title="Placeholder data, not from a backend">
                        "Demo data"
                    </span>
                </Show>
                <span class="count">
                    {move || format!("{} records", slice.with(|s| s.total_filtered))}
                </span>
                <Show when=move || !read_only>
                    <button
                        class="primary"
                        on:click=move |_| {
                            image.set(None);
                            modal.update(ModalState::open_create);
                        }
                    >
                        "Create"
                    </button>
                </Show>
            </div>

            <NoticeBanner notice=notice />
            <ErrorBanner message=load_error on_retry=on_retry />

            <div class="toolbar">
                <SearchBox value=search on_search=on_search />
                {facets}
                <button class="clear-btn" on:click=on_clear>
                    "Clear filters"
                </button>
                <ExportMenu
                    limits=export_settings.limits
                    default_limit=export_settings.default_limit
                    on_export=on_export
                    disabled=loading
                />
                {children.map(|children| children())}
            </div>

            <Show when=move || loading.get()>
                <Loading />
            </Show>

            <table class="records">
                <thead>
                    <tr>
                        {headers}
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    // content is part of the key so edited rows re-render
                    <For
                        each=move || slice.get().rows
                        key=|record: &T| {
                            (
                                record.id().map(ToString::to_string).unwrap_or_default(),
                                serde_json::to_string(record).unwrap_or_default(),
                            )
                        }
                        children=render_row
                    />
                    <Show when=move || no_records.get()>
                        <tr>
                            <td class="empty" colspan=column_count>
                                "No records found"
                            </td>
                        </tr>
                    </Show>
                </tbody>
            </table>

            <Pagination
                current_page=Signal::derive(move || slice.with(|s| s.page))
                total_pages=Signal::derive(move || slice.with(|s| s.total_pages))
                on_page_change=on_page_change
            />

            <MutationModal modal=modal on_submit=on_submit image=with_image.then_some(image) />
        </section>
    }
}

/// Edit and delete controls of one row
fn row_controls<T: Record>(
    handle: ResourceHandle<T>,
    modal: RwSignal<ModalState<T>>,
    record: T,
    id: RecordId,
) -> impl IntoView {
    let pending = {
        let id = id.clone();
        Signal::derive(move || {
            modal.with(|m| matches!(m, ModalState::ConfirmDelete { id: waiting } if *waiting == id))
        })
    };
    let on_request = Callback::new(move |()| modal.update(|m| m.request_delete(id.clone())));
    let on_cancel = Callback::new(move |()| {
        modal.update(|m| {
            m.cancel();
        });
    });
    let on_confirm = {
        let h = handle;
        Callback::new(move |()| {
            let Some(id) = modal.try_update(ModalState::take_delete).flatten() else {
                return;
            };
            let h = h.clone();
            spawn_local(async move {
                match h.controller.delete(&id).await {
                    Ok(()) => h.notify(Notice::Info(format!("Deleted {} {id}", T::ENTITY))),
                    Err(error) => {
                        warn!(entity = T::ENTITY, %id, %error, "Delete failed");
                        h.notify(Notice::Error(format!("Delete failed: {error}")));
                    }
                }
                h.touch();
            });
        })
    };

    view! {
        <button
            class="edit-btn"
            on:click=move |_| {
                modal.update(|m| {
                    if let Err(error) = m.open_edit(&record) {
                        warn!(entity = T::ENTITY, %error, "Cannot edit record");
                    }
                });
            }
        >
            "Edit"
        </button>
        <DeleteConfirmButton
            pending=pending
            on_request=on_request
            on_confirm=on_confirm
            on_cancel=on_cancel
        />
    }
}

/// Validate and send the modal's draft, then settle the modal
fn submit<T: Record>(
    handle: &ResourceHandle<T>,
    modal: RwSignal<ModalState<T>>,
    image: RwSignal<Option<FileUpload>>,
) {
    let submission = match modal.try_update(ModalState::begin_submit) {
        Some(Ok(submission)) => submission,
        Some(Err(error)) => {
            debug!(entity = T::ENTITY, %error, "Submit refused");
            return;
        }
        None => return,
    };
    let picked = match submission.mode {
        ModalMode::Create => image.get_untracked(),
        ModalMode::Edit(_) => None,
    };

    let h = handle.clone();
    spawn_local(async move {
        let result = match picked {
            Some(upload) => h.controller.create_with_image(&submission.draft, upload).await,
            None => h.controller.save(submission).await,
        };
        match modal.try_update(|m| ResourceController::settle(m, result)) {
            Some(Ok(_)) => {
                image.try_set(None);
                h.notify(Notice::Info(format!("Saved {}", T::ENTITY)));
            }
            Some(Err(error)) => debug!(entity = T::ENTITY, %error, "Save failed"),
            None => {}
        }
        h.touch();
    });
}
