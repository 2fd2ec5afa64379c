//! Moving files between the browser and the console

use console_protocol::ExportFile;
use console_types::FileUpload;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Hand an export to the browser as a download
///
/// Goes through a `Blob`, an object URL and a temporary anchor; the URL is
/// revoked once the click has been dispatched.
///
/// # Errors
///
/// Returns the DOM error if any browser call fails.
pub fn download(file: &ExportFile) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document.body().ok_or_else(|| JsValue::from_str("no body"))?;

    let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let options = BlobPropertyBag::new();
    options.set_type(file.mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(&file.filename);
    anchor.set_attribute("style", "display: none")?;

    body.append_child(&anchor)?;
    anchor.click();
    body.remove_child(&anchor)?;
    Url::revoke_object_url(&url)?;

    tracing::info!(file = %file.filename, bytes = file.bytes.len(), "Download started");
    Ok(())
}

/// Read a picked file into an upload for the given form field
///
/// # Errors
///
/// Returns the DOM error if the file cannot be read.
pub async fn read_file(field: &str, file: web_sys::File) -> Result<FileUpload, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let mime = match file.type_() {
        mime if mime.is_empty() => "application/octet-stream".to_string(),
        mime => mime,
    };
    Ok(FileUpload::new(field, file.name(), mime, bytes))
}

/// First file picked in the `<input type="file">` an event came from
#[must_use]
pub fn picked_file(event: &web_sys::Event) -> Option<web_sys::File> {
    let input: web_sys::HtmlInputElement = event.target()?.dyn_into().ok()?;
    input.files()?.get(0)
}

/// Describe a DOM error for a notice
#[must_use]
pub fn describe(error: &JsValue) -> String {
    error
        .as_string()
        .or_else(|| {
            error
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| "browser error".to_string())
}

/// Today's date as `YYYY-MM-DD`, for export headers
#[must_use]
pub fn today() -> String {
    String::from(js_sys::Date::new_0().to_iso_string())
        .chars()
        .take(10)
        .collect()
}
