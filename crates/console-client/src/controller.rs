//! Generic controller behind every resource page
//!
//! A [`ResourceController`] owns the page's [`ListView`] and talks to one
//! [`DataSource`]. Every network call is a suspension point, so results are
//! always mirrored into the latest view state under the lock, never into a
//! snapshot taken before the call. The lock is never held across an await.
//!
//! Loads are generation-counted: starting a load aborts the previous one,
//! and a load whose generation is no longer current drops its result.
//! Updates are tracked per record id with the same rule, so the last update
//! initiated for a record is the one that lands.

use crate::error::{ClientError, ClientResult};
use crate::source::DataSource;
use console_protocol::export::{self, ExportFile, ExportRequest};
use console_protocol::{
    BulkOutcome, ListView, Listing, LoadStatus, MirrorOutcome, ModalMode, ModalState, Mutation,
    Submission, VisibleSlice,
};
use console_types::{FileUpload, Record, RecordId, SourceKind};
use futures::future::{AbortHandle, Abortable};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, instrument, warn};

/// In-flight update per record id, tagged with the ticket that started it
type UpdateRegistry = HashMap<RecordId, (u64, AbortHandle)>;

/// List state plus the data source of one entity page
pub struct ResourceController<T: Record> {
    view: Arc<Mutex<ListView<T>>>,
    source: Arc<dyn DataSource<T>>,
    generation: Arc<AtomicU64>,
    inflight_load: Arc<Mutex<Option<AbortHandle>>>,
    tickets: Arc<AtomicU64>,
    updates: Arc<Mutex<UpdateRegistry>>,
}

impl<T: Record> Clone for ResourceController<T> {
    fn clone(&self) -> Self {
        Self {
            view: Arc::clone(&self.view),
            source: Arc::clone(&self.source),
            generation: Arc::clone(&self.generation),
            inflight_load: Arc::clone(&self.inflight_load),
            tickets: Arc::clone(&self.tickets),
            updates: Arc::clone(&self.updates),
        }
    }
}

impl<T: Record> fmt::Debug for ResourceController<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.view.lock();
        f.debug_struct("ResourceController")
            .field("entity", &T::ENTITY)
            .field("source", &self.source.kind())
            .field("records", &view.collection().len())
            .field("status", view.status())
            .finish_non_exhaustive()
    }
}

impl<T: Record> ResourceController<T> {
    /// Create a controller with an empty view
    pub fn new(source: Arc<dyn DataSource<T>>, page_size: usize) -> Self {
        Self {
            view: Arc::new(Mutex::new(ListView::new(page_size))),
            source,
            generation: Arc::new(AtomicU64::new(0)),
            inflight_load: Arc::new(Mutex::new(None)),
            tickets: Arc::new(AtomicU64::new(0)),
            updates: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Whether the page shows live or placeholder data
    #[must_use]
    pub fn source_kind(&self) -> SourceKind {
        self.source.kind()
    }

    /// The underlying data source
    #[must_use]
    pub fn source(&self) -> Arc<dyn DataSource<T>> {
        Arc::clone(&self.source)
    }

    /// Current load status
    #[must_use]
    pub fn status(&self) -> LoadStatus {
        self.view.lock().status().clone()
    }

    /// The page of records currently showing
    #[must_use]
    pub fn visible_slice(&self) -> VisibleSlice<T> {
        self.view.lock().visible_slice()
    }

    /// Read the view under the lock
    pub fn with_view<R>(&self, read: impl FnOnce(&ListView<T>) -> R) -> R {
        read(&*self.view.lock())
    }

    /// Modify the view under the lock (search, filters, paging)
    pub fn update_view<R>(&self, update: impl FnOnce(&mut ListView<T>) -> R) -> R {
        update(&mut *self.view.lock())
    }

    /// Fetch the collection, replacing it on success
    ///
    /// Returns the number of records loaded.
    ///
    /// # Errors
    ///
    /// Transport and status errors are recorded on the view, which keeps its
    /// previous collection, and returned. A load superseded by a newer one
    /// returns [`ClientError::Aborted`] and leaves the view alone.
    #[instrument(skip(self), fields(entity = T::ENTITY))]
    pub async fn load(&self) -> ClientResult<usize> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let (handle, registration) = AbortHandle::new_pair();
        if let Some(previous) = self.inflight_load.lock().replace(handle) {
            previous.abort();
        }
        self.view.lock().begin_load();

        let Ok(result) = Abortable::new(self.source.list(), registration).await else {
            debug!(generation, "Load aborted");
            return Err(ClientError::Aborted);
        };

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "Discarding stale load");
            return Err(ClientError::Aborted);
        }
        self.inflight_load.lock().take();

        let mut view = self.view.lock();
        match result {
            Ok(items) => {
                let count = items.len();
                view.replace_collection(items);
                info!(count, "Collection loaded");
                Ok(count)
            }
            Err(error) => {
                warn!(%error, kept = view.collection().len(), "Load failed");
                view.fail_load(error.to_string());
                Err(error)
            }
        }
    }

    fn mirror(&self, mutation: Mutation<T>) -> ClientResult<MirrorOutcome> {
        let outcome = self.view.lock().apply_mutation(mutation)?;
        if outcome == MirrorOutcome::Missing {
            warn!(entity = T::ENTITY, "Mutated record is no longer in the collection");
        }
        Ok(outcome)
    }

    /// Create a record and append the server's copy
    ///
    /// # Errors
    ///
    /// Returns the source error, or [`AppError::MissingId`] wrapped in
    /// [`ClientError::Protocol`] if the server record has no id.
    ///
    /// [`AppError::MissingId`]: console_types::AppError::MissingId
    #[instrument(skip_all, fields(entity = T::ENTITY))]
    pub async fn create(&self, draft: &T) -> ClientResult<T> {
        let saved = self.source.create(draft).await?;
        self.mirror(Mutation::Created(saved.clone()))?;
        info!(id = ?saved.id(), "Record created");
        Ok(saved)
    }

    /// Update a record and replace it in place
    ///
    /// Starting a second update for the same id aborts the first.
    ///
    /// # Errors
    ///
    /// Returns the source error, or [`ClientError::Aborted`] when a newer
    /// update for the same id superseded this one.
    #[instrument(skip(self, draft), fields(entity = T::ENTITY))]
    pub async fn update(&self, id: &RecordId, draft: &T) -> ClientResult<T> {
        let ticket = self.tickets.fetch_add(1, Ordering::SeqCst);
        let (handle, registration) = AbortHandle::new_pair();
        if let Some((_, previous)) = self.updates.lock().insert(id.clone(), (ticket, handle)) {
            debug!("Superseding in-flight update");
            previous.abort();
        }

        let result = Abortable::new(self.source.update(id, draft), registration).await;

        {
            let mut updates = self.updates.lock();
            if updates.get(id).is_some_and(|(current, _)| *current == ticket) {
                updates.remove(id);
            }
        }

        let saved = result.map_err(|_| ClientError::Aborted)??;
        self.mirror(Mutation::Updated(saved.clone()))?;
        info!("Record updated");
        Ok(saved)
    }

    /// Delete a record and remove it from the collection
    ///
    /// # Errors
    ///
    /// Returns the source error; the collection is left untouched.
    #[instrument(skip(self), fields(entity = T::ENTITY))]
    pub async fn delete(&self, id: &RecordId) -> ClientResult<()> {
        self.source.delete(id).await?;
        self.mirror(Mutation::Deleted(id.clone()))?;
        info!("Record deleted");
        Ok(())
    }

    /// Send a validated modal submission
    ///
    /// # Errors
    ///
    /// Same as [`Self::create`] and [`Self::update`].
    pub async fn save(&self, submission: Submission<T>) -> ClientResult<T> {
        match submission.mode {
            ModalMode::Create => self.create(&submission.draft).await,
            ModalMode::Edit(id) => self.update(&id, &submission.draft).await,
        }
    }

    /// Drive the modal from submit to closed or back to open with an error
    ///
    /// # Errors
    ///
    /// Schema failures and refused transitions are returned without a
    /// request; request failures reopen the form with the message inline.
    pub async fn submit(&self, modal: &mut ModalState<T>) -> ClientResult<T> {
        let submission = modal.begin_submit()?;
        let result = self.save(submission).await;
        Self::settle(modal, result)
    }

    /// Move a submitting modal to closed, or back to open with the error
    ///
    /// Field errors from the backend land on their inputs.
    ///
    /// # Errors
    ///
    /// Returns the save error unchanged.
    pub fn settle(modal: &mut ModalState<T>, result: ClientResult<T>) -> ClientResult<T> {
        match result {
            Ok(saved) => {
                modal.submit_succeeded();
                Ok(saved)
            }
            Err(ClientError::Validation(errors)) => {
                modal.submit_rejected(errors.clone());
                Err(ClientError::Validation(errors))
            }
            Err(error) => {
                modal.submit_failed(error.to_string());
                Err(error)
            }
        }
    }

    /// Delete the record a modal asked confirmation for
    ///
    /// Returns `false` when no delete was pending.
    ///
    /// # Errors
    ///
    /// Returns the source error.
    pub async fn confirm_delete(&self, modal: &mut ModalState<T>) -> ClientResult<bool> {
        match modal.take_delete() {
            Some(id) => self.delete(&id).await.map(|()| true),
            None => Ok(false),
        }
    }

    /// Export the filtered collection, pagination ignored
    ///
    /// # Errors
    ///
    /// Returns the writer error.
    pub fn export(&self, request: &ExportRequest) -> ClientResult<ExportFile> {
        let view = self.view.lock();
        let file = export::export(view.filtered(), request)?;
        info!(
            entity = T::ENTITY,
            format = %request.format,
            bytes = file.bytes.len(),
            "Export generated"
        );
        Ok(file)
    }

    /// Create many records, then reload the collection
    ///
    /// # Errors
    ///
    /// Returns the source error. A failed reload is logged only, the bulk
    /// outcome is still returned.
    #[instrument(skip_all, fields(entity = T::ENTITY, count = drafts.len()))]
    pub async fn bulk_create(&self, drafts: &[T]) -> ClientResult<BulkOutcome> {
        let outcome = self.source.bulk_create(drafts).await?;
        info!(summary = %outcome.summary(), "Bulk create finished");
        self.reload_after_bulk().await;
        Ok(outcome)
    }

    /// Forward a spreadsheet to the import endpoint, then reload
    ///
    /// # Errors
    ///
    /// Returns the source error.
    #[instrument(skip_all, fields(entity = T::ENTITY, file = %file.file_name))]
    pub async fn import(
        &self,
        file: FileUpload,
        fields: Vec<(String, String)>,
    ) -> ClientResult<BulkOutcome> {
        let outcome = self.source.upload(file, fields).await?;
        info!(summary = %outcome.summary(), "Import finished");
        self.reload_after_bulk().await;
        Ok(outcome)
    }

    /// Create a record with an attached image
    ///
    /// # Errors
    ///
    /// Same as [`Self::create`].
    #[instrument(skip_all, fields(entity = T::ENTITY, file = %image.file_name))]
    pub async fn create_with_image(&self, draft: &T, image: FileUpload) -> ClientResult<T> {
        let saved = self.source.create_with_image(draft, image).await?;
        self.mirror(Mutation::Created(saved.clone()))?;
        Ok(saved)
    }

    async fn reload_after_bulk(&self) {
        match self.load().await {
            Ok(_) | Err(ClientError::Aborted) => {}
            Err(error) => warn!(%error, "Reload after bulk change failed"),
        }
    }
}

/// Fetch a supporting collection (dropdown options and the like)
///
/// Failures are logged and yield an empty list.
pub async fn load_secondary<T: Record>(source: &dyn DataSource<T>) -> Vec<T> {
    let listing = Listing::from_result(source.list().await);
    if let Some(error) = &listing.error {
        warn!(entity = T::ENTITY, %error, "Secondary fetch failed");
    }
    listing.items
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::demo::DemoDataSource;
    use async_trait::async_trait;
    use console_protocol::FilterValue;
    use console_protocol::export::ExportFormat;
    use console_types::entities::{Category, Coupon};
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn category(name: &str, status: &str) -> Category {
        Category {
            name: name.to_string(),
            status: Some(status.to_string()),
            ..Category::default()
        }
    }

    fn controller(seed: Vec<Category>) -> ResourceController<Category> {
        ResourceController::new(Arc::new(DemoDataSource::new(seed)), 5)
    }

    #[tokio::test]
    async fn test_load_populates_view() {
        let controller = controller(vec![category("Maths", "active"), category("Art", "inactive")]);
        assert_eq!(controller.load().await.unwrap(), 2);
        assert_eq!(controller.status(), LoadStatus::Loaded);
        assert_eq!(controller.visible_slice().rows.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_collection() {
        let live = controller(vec![category("Maths", "active")]);
        live.load().await.unwrap();

        let failing = ResourceController {
            source: Arc::new(DemoDataSource::<Category>::default().with_failure("offline")),
            ..live.clone()
        };
        let error = failing.load().await.unwrap_err();
        assert!(matches!(error, ClientError::Status { code: 503, .. }));
        assert_eq!(live.with_view(|v| v.collection().len()), 1);
        assert!(matches!(live.status(), LoadStatus::Failed(_)));
    }

    #[tokio::test]
    async fn test_mutations_mirror_into_view() {
        let controller = controller(vec![category("Maths", "active")]);
        controller.load().await.unwrap();

        let created = controller.create(&category("Science", "active")).await.unwrap();
        let id = created.id.clone().unwrap();
        assert_eq!(controller.with_view(|v| v.collection().len()), 2);

        let mut draft = created.clone();
        draft.name = "Physics".to_string();
        controller.update(&id, &draft).await.unwrap();
        let names: Vec<String> =
            controller.with_view(|v| v.collection().iter().map(|c| c.name.clone()).collect());
        assert_eq!(names, vec!["Maths", "Physics"]);

        controller.delete(&id).await.unwrap();
        assert_eq!(controller.with_view(|v| v.collection().len()), 1);
    }

    #[tokio::test]
    async fn test_submit_drives_modal() {
        let controller = controller(Vec::new());
        let mut modal = ModalState::default();

        modal.open_create();
        assert!(matches!(
            controller.submit(&mut modal).await,
            Err(ClientError::Validation(_))
        ));
        assert!(modal.is_open());

        modal.edit_draft(|c| c.name = "History".to_string());
        let saved = controller.submit(&mut modal).await.unwrap();
        assert_eq!(saved.name, "History");
        assert!(!modal.is_open());
        assert_eq!(controller.with_view(|v| v.collection().len()), 1);

        modal.request_delete(saved.id.clone().unwrap());
        assert!(controller.confirm_delete(&mut modal).await.unwrap());
        assert!(controller.with_view(|v| v.collection().is_empty()));
    }

    #[tokio::test]
    async fn test_export_uses_filtered_rows() {
        let controller = controller(vec![
            category("Maths", "active"),
            category("Art", "inactive"),
            category("Music", "active"),
        ]);
        controller.load().await.unwrap();
        controller.update_view(|v| v.apply_filter("status", FilterValue::from_choice("active")));

        let file = controller
            .export(&ExportRequest::new(ExportFormat::Csv, 50))
            .unwrap();
        let text = String::from_utf8(file.bytes).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(!text.contains("Art"));
        assert_eq!(file.filename, "category_export.csv");
    }

    #[tokio::test]
    async fn test_bulk_create_reloads() {
        let controller = ResourceController::<Coupon>::new(
            Arc::new(DemoDataSource::default()),
            10,
        );
        let drafts: Vec<Coupon> = ["A1", "B2"]
            .iter()
            .map(|code| Coupon {
                code: (*code).to_string(),
                vendor: "Acme".to_string(),
                ..Coupon::default()
            })
            .collect();
        let outcome = controller.bulk_create(&drafts).await.unwrap();
        assert_eq!(outcome.created, 2);
        assert_eq!(controller.with_view(|v| v.collection().len()), 2);
    }

    /// Source whose list call waits for a configured delay
    struct SlowSource {
        delays: Mutex<Vec<u64>>,
        inner: DemoDataSource<Category>,
    }

    #[async_trait]
    impl DataSource<Category> for SlowSource {
        fn kind(&self) -> SourceKind {
            SourceKind::Live
        }

        async fn list(&self) -> ClientResult<Vec<Category>> {
            let delay = self.delays.lock().pop().unwrap_or(0);
            tokio::time::sleep(Duration::from_millis(delay)).await;
            self.inner.list().await
        }

        async fn get(&self, id: &RecordId) -> ClientResult<Category> {
            self.inner.get(id).await
        }

        async fn create(&self, draft: &Category) -> ClientResult<Category> {
            self.inner.create(draft).await
        }

        async fn update(&self, id: &RecordId, draft: &Category) -> ClientResult<Category> {
            tokio::time::sleep(Duration::from_millis(u64::from(draft.name == "slow") * 200))
                .await;
            self.inner.update(id, draft).await
        }

        async fn delete(&self, id: &RecordId) -> ClientResult<()> {
            self.inner.delete(id).await
        }

        async fn create_with_image(
            &self,
            draft: &Category,
            image: FileUpload,
        ) -> ClientResult<Category> {
            self.inner.create_with_image(draft, image).await
        }
    }

    #[tokio::test]
    async fn test_newer_load_supersedes_older() {
        let source = SlowSource {
            // popped from the end: first load waits 200ms, second 0ms
            delays: Mutex::new(vec![0, 200]),
            inner: DemoDataSource::new(vec![category("Maths", "active")]),
        };
        let controller = ResourceController::new(Arc::new(source), 5);

        let (first, second) = tokio::join!(controller.load(), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            controller.load().await
        });
        assert!(first.unwrap_err().is_aborted());
        assert_eq!(second.unwrap(), 1);
        assert_eq!(controller.status(), LoadStatus::Loaded);
    }

    #[tokio::test]
    async fn test_last_initiated_update_wins() {
        let source = SlowSource {
            delays: Mutex::new(Vec::new()),
            inner: DemoDataSource::new(vec![category("Maths", "active")]),
        };
        let controller = ResourceController::new(Arc::new(source), 5);
        controller.load().await.unwrap();
        let id = RecordId::from("demo-1");
        let slow = category("slow", "active");
        let fast = category("fast", "active");

        let (first, second) = tokio::join!(controller.update(&id, &slow), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            controller.update(&id, &fast).await
        });
        assert!(first.unwrap_err().is_aborted());
        assert_eq!(second.unwrap().name, "fast");
        let names: Vec<String> =
            controller.with_view(|v| v.collection().iter().map(|c| c.name.clone()).collect());
        assert_eq!(names, vec!["fast"]);
    }

    #[tokio::test]
    async fn test_load_secondary_swallows_errors() {
        let failing = DemoDataSource::<Category>::default().with_failure("offline");
        assert!(load_secondary(&failing).await.is_empty());

        let working = DemoDataSource::new(vec![category("Maths", "active")]);
        assert_eq!(load_secondary(&working).await.len(), 1);
    }
}
