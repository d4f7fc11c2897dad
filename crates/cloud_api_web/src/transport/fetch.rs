//! `window.fetch` transport for [`cloud_api::ApiClient`].

use cloud_api::{ApiError, HttpRequest, HttpResponse, HttpTransport, TransportFuture};
#[cfg(target_arch = "wasm32")]
use cloud_api::{RequestBody, ResponseKind};

#[cfg(target_arch = "wasm32")]
use crate::files::{bytes_to_blob, js_error};

#[derive(Debug, Clone, Copy, Default)]
/// Browser transport backed by the Fetch API.
///
/// Any HTTP status resolves successfully; only network/CORS failures become
/// [`ApiError::Transport`].
pub struct FetchTransport;

impl HttpTransport for FetchTransport {
    fn send<'a>(
        &'a self,
        url: String,
        request: HttpRequest,
    ) -> TransportFuture<'a, Result<HttpResponse, ApiError>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                fetch(url, request).await
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = request;
                Err(ApiError::Transport(format!(
                    "fetch is only available when compiled for wasm32 (url: {url})"
                )))
            }
        })
    }
}

#[cfg(target_arch = "wasm32")]
async fn fetch(url: String, request: HttpRequest) -> Result<HttpResponse, ApiError> {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;

    let headers = web_sys::Headers::new().map_err(js_error)?;
    for (name, value) in &request.headers {
        headers.set(name, value).map_err(js_error)?;
    }

    let init = web_sys::RequestInit::new();
    init.set_method(request.method.as_str());
    init.set_mode(web_sys::RequestMode::Cors);
    init.set_headers(&headers);
    match &request.body {
        Some(RequestBody::Json(body)) => init.set_body(&JsValue::from_str(body)),
        Some(RequestBody::Multipart(form)) => {
            let data = web_sys::FormData::new().map_err(js_error)?;
            for (name, value) in &form.fields {
                data.append_with_str(name, value).map_err(js_error)?;
            }
            for (name, file) in &form.files {
                let blob = bytes_to_blob(&file.bytes, file.content_type.as_deref())?;
                data.append_with_blob_and_filename(name, &blob, &file.file_name)
                    .map_err(js_error)?;
            }
            init.set_body(&data);
        }
        None => {}
    }

    let js_request = web_sys::Request::new_with_str_and_init(&url, &init).map_err(js_error)?;
    let window =
        web_sys::window().ok_or_else(|| ApiError::Transport("window unavailable".to_string()))?;
    let value = JsFuture::from(window.fetch_with_request(&js_request))
        .await
        .map_err(js_error)?;
    let response: web_sys::Response = value
        .dyn_into()
        .map_err(|_| ApiError::Transport("fetch resolved to a non-Response value".to_string()))?;

    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .map_err(js_error)?;
    let decoded = if request.response_kind == ResponseKind::Binary && response.ok() {
        let buffer = JsFuture::from(response.array_buffer().map_err(js_error)?)
            .await
            .map_err(js_error)?;
        HttpResponse::binary(status, js_sys::Uint8Array::new(&buffer).to_vec())
    } else {
        let text = JsFuture::from(response.text().map_err(js_error)?)
            .await
            .map_err(js_error)?;
        HttpResponse::new(status, text.as_string().unwrap_or_default())
    };
    Ok(match content_type {
        Some(content_type) => decoded.with_content_type(content_type),
        None => decoded,
    })
}
