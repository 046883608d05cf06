//! Browser glue for backup export/import and confirmation prompts.
//!
//! SYSTEM CONTEXT
//! ==============
//! Export builds a JSON blob and clicks a temporary download link; import
//! reads the text of a user-selected file. Decoding and validation of the
//! payload happen in `state::todos`, not here.

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum TransferError {
    #[error("browser API failed: {0}")]
    Browser(String),
    #[error("file contents are not text")]
    NotText,
    #[error("file transfer needs a browser")]
    Unsupported,
}

#[cfg(feature = "csr")]
fn js_err(err: wasm_bindgen::JsValue) -> TransferError {
    TransferError::Browser(format!("{err:?}"))
}

/// Offer `contents` to the user as a downloadable JSON file.
pub fn download_json(filename: &str, contents: &str) -> Result<(), TransferError> {
    #[cfg(feature = "csr")]
    {
        use wasm_bindgen::JsCast;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| TransferError::Browser("no document".to_owned()))?;

        let parts = js_sys::Array::of1(&wasm_bindgen::JsValue::from_str(contents));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type("application/json");
        let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_err)?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;

        let anchor = document
            .create_element("a")
            .map_err(js_err)?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| TransferError::Browser("anchor cast failed".to_owned()))?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.click();

        web_sys::Url::revoke_object_url(&url).map_err(js_err)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (filename, contents);
        Err(TransferError::Unsupported)
    }
}

/// Read a selected file as UTF-8 text.
#[cfg(feature = "csr")]
pub async fn read_file_text(file: web_sys::File) -> Result<String, TransferError> {
    let value = wasm_bindgen_futures::JsFuture::from(file.text()).await.map_err(js_err)?;
    value.as_string().ok_or(TransferError::NotText)
}

/// First file chosen in an `<input type="file">` change event.
#[cfg(feature = "csr")]
pub fn selected_file(ev: &leptos::ev::Event) -> Option<web_sys::File> {
    use wasm_bindgen::JsCast;

    let input = ev.target()?.dyn_into::<web_sys::HtmlInputElement>().ok()?;
    input.files()?.get(0)
}

/// Ask the user to confirm a destructive action. Always declines outside a
/// browser.
pub fn confirm(message: &str) -> bool {
    #[cfg(feature = "csr")]
    {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = message;
        false
    }
}

#[cfg(test)]
#[path = "transfer_test.rs"]
mod tests;
