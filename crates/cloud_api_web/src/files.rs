//! File picking, reading and saving through browser APIs.

use cloud_api::{ApiError, FileContent};

/// Opens the browser file picker and reads every selected file.
///
/// The picker resolves once the user confirms a selection.
///
/// # Errors
///
/// Returns [`ApiError::Transport`] when the picker or a file read fails, or off-wasm.
pub async fn pick_files() -> Result<Vec<FileContent>, ApiError> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        Err(ApiError::Transport(
            "file picking is only available when compiled for wasm32".to_string(),
        ))
    }

    #[cfg(target_arch = "wasm32")]
    {
        use std::{cell::RefCell, rc::Rc};

        use futures::channel::oneshot;
        use wasm_bindgen::{closure::Closure, JsCast};

        let window = web_sys::window().ok_or_else(|| unavailable("window"))?;
        let document = window.document().ok_or_else(|| unavailable("document"))?;
        let input = document
            .create_element("input")
            .map_err(js_error)?
            .dyn_into::<web_sys::HtmlInputElement>()
            .map_err(|_| ApiError::Transport("failed to cast file input".to_string()))?;
        input.set_type("file");
        input.set_multiple(true);
        input.set_hidden(true);
        if let Some(body) = document.body() {
            let _ = body.append_child(&input);
        }

        let (tx, rx) = oneshot::channel::<Vec<web_sys::File>>();
        let sender = Rc::new(RefCell::new(Some(tx)));
        let input_for_change = input.clone();
        let on_change = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_| {
            let files = input_for_change
                .files()
                .map(|list| (0..list.length()).filter_map(|i| list.get(i)).collect())
                .unwrap_or_default();
            if let Some(tx) = sender.borrow_mut().take() {
                let _ = tx.send(files);
            }
        }));
        input.set_onchange(Some(on_change.as_ref().unchecked_ref()));
        input.click();

        let picked = rx
            .await
            .map_err(|_| ApiError::Transport("file picker was cancelled".to_string()))?;
        input.remove();
        on_change.forget();

        let mut contents = Vec::with_capacity(picked.len());
        for file in &picked {
            contents.push(read_file(file).await?);
        }
        Ok(contents)
    }
}

/// Reads a picked file into memory.
///
/// # Errors
///
/// Returns [`ApiError::Transport`] when the read fails.
#[cfg(target_arch = "wasm32")]
pub async fn read_file(file: &web_sys::File) -> Result<FileContent, ApiError> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(js_error)?;
    let content_type = file.type_();
    Ok(FileContent {
        file_name: file.name(),
        content_type: (!content_type.is_empty()).then_some(content_type),
        bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
    })
}

/// Hands downloaded bytes to the browser as a file save.
///
/// # Errors
///
/// Returns [`ApiError::Transport`] when the object URL or link cannot be created, or off-wasm.
pub fn save_download(content: &FileContent) -> Result<(), ApiError> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        Err(ApiError::Transport(format!(
            "saving `{}` is only available when compiled for wasm32",
            content.file_name
        )))
    }

    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;

        let blob = bytes_to_blob(&content.bytes, content.content_type.as_deref())?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_error)?;
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| unavailable("document"))?;
        let anchor = document
            .create_element("a")
            .map_err(js_error)?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| ApiError::Transport("failed to cast download link".to_string()))?;
        anchor.set_href(&url);
        anchor.set_download(&content.file_name);
        anchor.set_hidden(true);
        if let Some(body) = document.body() {
            let _ = body.append_child(&anchor);
        }
        anchor.click();
        anchor.remove();
        web_sys::Url::revoke_object_url(&url).map_err(js_error)?;
        Ok(())
    }
}

/// Wraps bytes in a `Blob`, used for downloads and multipart file parts.
#[cfg(target_arch = "wasm32")]
pub(crate) fn bytes_to_blob(
    bytes: &[u8],
    content_type: Option<&str>,
) -> Result<web_sys::Blob, ApiError> {
    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    if let Some(content_type) = content_type {
        options.set_type(content_type);
    }
    web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_error)
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn js_error(err: wasm_bindgen::JsValue) -> ApiError {
    if let Some(text) = err.as_string() {
        return ApiError::Transport(text);
    }
    if let Ok(message) = js_sys::Reflect::get(&err, &wasm_bindgen::JsValue::from_str("message")) {
        if let Some(text) = message.as_string() {
            return ApiError::Transport(text);
        }
    }
    ApiError::Transport(format!("{err:?}"))
}

#[cfg(target_arch = "wasm32")]
fn unavailable(what: &str) -> ApiError {
    ApiError::Transport(format!("{what} unavailable"))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn native_builds_cannot_pick_or_save_files() {
        assert!(matches!(
            block_on(pick_files()),
            Err(ApiError::Transport(_))
        ));
        let err = save_download(&FileContent::new("a.txt", b"a".to_vec())).expect_err("native");
        assert!(matches!(err, ApiError::Transport(message) if message.contains("a.txt")));
    }
}
