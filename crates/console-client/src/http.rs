//! REST data source over reqwest

use crate::error::{ClientError, ClientResult};
use crate::source::DataSource;
use async_trait::async_trait;
use console_protocol::envelope::{self, BulkOutcome, Listing};
use console_types::{
    ConsoleSettings, FieldError, FileUpload, Record, RecordId, ResolvedEndpoint, Session,
    SourceKind,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use tracing::{debug, instrument, warn};

/// Header carrying the backend API key
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Data source backed by one REST endpoint
pub struct HttpDataSource<T> {
    client: Client,
    endpoint: ResolvedEndpoint,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for HttpDataSource<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            endpoint: self.endpoint.clone(),
            _record: PhantomData,
        }
    }
}

impl<T> fmt::Debug for HttpDataSource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpDataSource")
            .field("endpoint", &self.endpoint.key)
            .field("url", &self.endpoint.url)
            .finish_non_exhaustive()
    }
}

impl<T: Record> HttpDataSource<T> {
    /// Create a source for a resolved endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(endpoint: ResolvedEndpoint) -> ClientResult<Self> {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(std::time::Duration::from_secs(endpoint.timeout_secs));

        Ok(Self {
            client: builder.build()?,
            endpoint,
            _record: PhantomData,
        })
    }

    /// Resolve an endpoint from the settings and create a source for it
    ///
    /// # Errors
    ///
    /// Fails if the endpoint cannot be resolved for the session.
    pub fn from_settings(
        settings: &ConsoleSettings,
        key: &str,
        session: &Session,
    ) -> ClientResult<Self> {
        Self::new(settings.resolve(key, session)?)
    }

    /// The endpoint this source talks to
    #[must_use]
    pub const fn endpoint(&self) -> &ResolvedEndpoint {
        &self.endpoint
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut request = self
            .client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");

        if let Some(ref api_key) = self.endpoint.api_key {
            request = request.header(API_KEY_HEADER, api_key);
        }

        request
    }

    async fn send(&self, request: RequestBuilder) -> ClientResult<Value> {
        let response = request.send().await?;
        handle_response(response).await
    }

    fn upload_url(&self) -> ClientResult<&str> {
        self.endpoint.upload_url.as_deref().ok_or_else(|| {
            ClientError::Config(format!("no import path configured for '{}'", self.endpoint.key))
        })
    }
}

/// Map a response to its JSON body or a [`ClientError`]
async fn handle_response(response: Response) -> ClientResult<Value> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        let body: Option<Value> = serde_json::from_str(&text).ok();
        let message = body
            .as_ref()
            .and_then(envelope::error_message)
            .unwrap_or_else(|| text.trim().to_string());
        debug!(status = status.as_u16(), %message, "Backend returned an error");

        return Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Unauthorized,
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::Validation(validation_errors(body.as_ref(), message))
            }
            _ => ClientError::Status {
                code: status.as_u16(),
                body: message,
            },
        });
    }

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| ClientError::Protocol(e.into()))
}

/// Field errors reported by a 400/422 body, or the message as a form-level error
fn validation_errors(body: Option<&Value>, message: String) -> Vec<FieldError> {
    let reported: Vec<FieldError> = body
        .and_then(|b| b.get("errors"))
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    let message = item.get("message").and_then(Value::as_str)?;
                    let field = item
                        .get("field")
                        .or_else(|| item.get("path"))
                        .and_then(Value::as_str)
                        .unwrap_or_default();
                    Some(FieldError::new(field, message))
                })
                .collect()
        })
        .unwrap_or_default();

    if reported.is_empty() {
        let message = if message.is_empty() {
            "The request was rejected".to_string()
        } else {
            message
        };
        vec![FieldError::new("", message)]
    } else {
        reported
    }
}

/// Flatten a draft into multipart text fields
fn form_fields<T: Record>(draft: &T) -> ClientResult<Vec<(String, String)>> {
    let value = serde_json::to_value(draft).map_err(|e| ClientError::Protocol(e.into()))?;
    let Value::Object(map) = value else {
        return Ok(Vec::new());
    };

    Ok(map
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(text) => Some((key, text)),
            other => Some((key, other.to_string())),
        })
        .collect())
}

fn multipart(fields: Vec<(String, String)>, file: FileUpload) -> ClientResult<Form> {
    let part = Part::bytes(file.bytes)
        .file_name(file.file_name)
        .mime_str(&file.mime)?;

    Ok(fields
        .into_iter()
        .fold(Form::new(), |form, (key, value)| form.text(key, value))
        .part(file.field, part))
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl<T: Record> DataSource<T> for HttpDataSource<T> {
    fn kind(&self) -> SourceKind {
        self.endpoint.source
    }

    #[instrument(skip(self), fields(endpoint = %self.endpoint.key))]
    async fn list(&self) -> ClientResult<Vec<T>> {
        let body = self
            .send(self.request(Method::GET, &self.endpoint.url))
            .await?;
        let listing = Listing::<T>::adapt(&self.endpoint.envelope, body);
        if let Some(error) = &listing.error {
            warn!(%error, "Collection response rejected");
        }
        let items = listing.into_result()?;
        debug!(count = items.len(), "Fetched collection");
        Ok(items)
    }

    #[instrument(skip(self), fields(endpoint = %self.endpoint.key))]
    async fn get(&self, id: &RecordId) -> ClientResult<T> {
        let body = self
            .send(self.request(Method::GET, &self.endpoint.record_url(id)))
            .await?;
        Ok(envelope::normalize_one(body)?)
    }

    #[instrument(skip_all, fields(endpoint = %self.endpoint.key))]
    async fn create(&self, draft: &T) -> ClientResult<T> {
        let body = self
            .send(self.request(Method::POST, &self.endpoint.url).json(draft))
            .await?;
        Ok(envelope::normalize_one(body)?)
    }

    #[instrument(skip(self, draft), fields(endpoint = %self.endpoint.key))]
    async fn update(&self, id: &RecordId, draft: &T) -> ClientResult<T> {
        let body = self
            .send(
                self.request(Method::PUT, &self.endpoint.record_url(id))
                    .json(draft),
            )
            .await?;

        // Some backends answer an update with a bare acknowledgement
        match envelope::normalize_one::<T>(body) {
            Ok(saved) if saved.id().is_some() => Ok(saved),
            Ok(_) | Err(console_types::AppError::Serialization(_)) => {
                let mut saved = draft.clone();
                saved.set_id(id.clone());
                Ok(saved)
            }
            Err(other) => Err(other.into()),
        }
    }

    #[instrument(skip(self), fields(endpoint = %self.endpoint.key))]
    async fn delete(&self, id: &RecordId) -> ClientResult<()> {
        let body = self
            .send(self.request(Method::DELETE, &self.endpoint.record_url(id)))
            .await?;
        envelope::check_success(&body)?;
        Ok(())
    }

    #[instrument(skip_all, fields(endpoint = %self.endpoint.key, count = drafts.len()))]
    async fn bulk_create(&self, drafts: &[T]) -> ClientResult<BulkOutcome> {
        let url = self.endpoint.bulk_url.as_deref().ok_or_else(|| {
            ClientError::Config(format!("no bulk path configured for '{}'", self.endpoint.key))
        })?;
        let body = self.send(self.request(Method::POST, url).json(drafts)).await?;
        let outcome = BulkOutcome::from_body(&body)?;
        if outcome.has_failures() {
            warn!(
                created = outcome.created,
                failed = outcome.failed,
                "Bulk create partially failed"
            );
        }
        Ok(outcome)
    }

    #[instrument(
        skip_all,
        fields(endpoint = %self.endpoint.key, file = %file.file_name, size = file.len())
    )]
    async fn upload(
        &self,
        file: FileUpload,
        fields: Vec<(String, String)>,
    ) -> ClientResult<BulkOutcome> {
        let url = self.upload_url()?.to_string();
        let form = multipart(fields, file)?;
        let body = self
            .send(self.request(Method::POST, &url).multipart(form))
            .await?;
        Ok(BulkOutcome::from_body(&body)?)
    }

    #[instrument(skip_all, fields(endpoint = %self.endpoint.key, file = %image.file_name))]
    async fn create_with_image(&self, draft: &T, image: FileUpload) -> ClientResult<T> {
        let form = multipart(form_fields(draft)?, image)?;
        let body = self
            .send(self.request(Method::POST, &self.endpoint.url).multipart(form))
            .await?;
        Ok(envelope::normalize_one(body)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use console_types::entities::Coupon;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_validation_errors_prefer_field_list() {
        let body = json!({"errors": [{"field": "code", "message": "Code is taken"}]});
        let errors = validation_errors(Some(&body), "Bad Request".to_string());
        assert_eq!(errors, vec![FieldError::new("code", "Code is taken")]);

        let errors = validation_errors(None, "Discount too large".to_string());
        assert_eq!(errors, vec![FieldError::new("", "Discount too large")]);
    }

    #[test]
    fn test_form_fields_skip_nulls_and_stringify() {
        let coupon = Coupon {
            code: "SAVE5".into(),
            discount: Some(5.0),
            ..Coupon::default()
        };
        let fields = form_fields(&coupon).unwrap();
        assert!(fields.contains(&("code".to_string(), "SAVE5".to_string())));
        assert!(fields.contains(&("discount".to_string(), "5.0".to_string())));
        assert!(!fields.iter().any(|(key, _)| key == "category"));
    }
}
