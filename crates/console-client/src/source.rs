//! The data source abstraction every resource page talks to

use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use console_protocol::BulkOutcome;
use console_types::{FileUpload, Record, RecordId, SourceKind};

/// Remote collection of one entity
///
/// Futures are `Send` on native targets so sources can be driven from a
/// multi-threaded runtime; in the browser they run on the single-threaded
/// event loop.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait DataSource<T: Record>: Send + Sync {
    /// Whether the data is live or placeholder
    fn kind(&self) -> SourceKind;

    /// Fetch the whole collection
    async fn list(&self) -> ClientResult<Vec<T>>;

    /// Fetch one record
    async fn get(&self, id: &RecordId) -> ClientResult<T>;

    /// Create a record; the result carries the server id
    async fn create(&self, draft: &T) -> ClientResult<T>;

    /// Replace a record
    async fn update(&self, id: &RecordId, draft: &T) -> ClientResult<T>;

    /// Delete a record
    async fn delete(&self, id: &RecordId) -> ClientResult<()>;

    /// Create many records in one request
    async fn bulk_create(&self, drafts: &[T]) -> ClientResult<BulkOutcome> {
        let _ = drafts;
        Err(ClientError::Config(format!(
            "bulk creation is not available for {}",
            T::LABEL
        )))
    }

    /// Forward a file to the import endpoint as multipart form data
    async fn upload(
        &self,
        file: FileUpload,
        fields: Vec<(String, String)>,
    ) -> ClientResult<BulkOutcome> {
        let _ = (file, fields);
        Err(ClientError::Config(format!(
            "file import is not available for {}",
            T::LABEL
        )))
    }

    /// Create a record together with an image, as multipart form data
    async fn create_with_image(&self, draft: &T, image: FileUpload) -> ClientResult<T>;
}
