//! HTTP transport for webhook requests.
//!
//! Client-side (csr): real `fetch` calls via `gloo-net`, with multipart
//! bodies built as a `web_sys::FormData`.
//! Native builds: [`BrowserTransport`] reports a network error, since the
//! endpoint is only reachable from the browser bundle.

#![allow(clippy::unused_async)]

use async_trait::async_trait;

use super::types::{DispatchError, MultipartForm, WebhookResponse};

/// Performs a single POST and returns status plus raw body.
///
/// Implementations never interpret the body; reply parsing belongs to the
/// dispatcher.
#[async_trait(?Send)]
pub trait WebhookTransport {
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<WebhookResponse, DispatchError>;

    async fn post_multipart(&self, url: &str, form: &MultipartForm) -> Result<WebhookResponse, DispatchError>;
}

/// `fetch`-backed transport used by the app.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

#[async_trait(?Send)]
impl WebhookTransport for BrowserTransport {
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<WebhookResponse, DispatchError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::post(url)
                .json(body)
                .map_err(|e| DispatchError::Network(e.to_string()))?
                .send()
                .await
                .map_err(|e| DispatchError::Network(e.to_string()))?;
            read_response(resp).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (url, body);
            Err(unavailable())
        }
    }

    async fn post_multipart(&self, url: &str, form: &MultipartForm) -> Result<WebhookResponse, DispatchError> {
        #[cfg(feature = "csr")]
        {
            let form_data = to_form_data(form)?;
            let resp = gloo_net::http::Request::post(url)
                .body(form_data)
                .map_err(|e| DispatchError::Network(e.to_string()))?
                .send()
                .await
                .map_err(|e| DispatchError::Network(e.to_string()))?;
            read_response(resp).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (url, form);
            Err(unavailable())
        }
    }
}

#[cfg(not(feature = "csr"))]
fn unavailable() -> DispatchError {
    DispatchError::Network("not available outside the browser".to_owned())
}

#[cfg(feature = "csr")]
async fn read_response(resp: gloo_net::http::Response) -> Result<WebhookResponse, DispatchError> {
    let status = resp.status();
    let body = resp.text().await.map_err(|e| DispatchError::Network(e.to_string()))?;
    Ok(WebhookResponse { status, body })
}

#[cfg(feature = "csr")]
fn to_form_data(form: &MultipartForm) -> Result<web_sys::FormData, DispatchError> {
    use super::types::FormValue;

    let js_err = |e: wasm_bindgen::JsValue| DispatchError::Network(format!("{e:?}"));

    let form_data = web_sys::FormData::new().map_err(js_err)?;
    for part in &form.parts {
        match &part.value {
            FormValue::Text(value) => form_data.append_with_str(&part.name, value).map_err(js_err)?,
            FormValue::File(attachment) => {
                let bytes = js_sys::Uint8Array::from(attachment.bytes.as_slice());
                let chunks = js_sys::Array::of1(&bytes);
                let options = web_sys::BlobPropertyBag::new();
                if let Some(mime) = &attachment.mime {
                    options.set_type(mime);
                }
                let blob =
                    web_sys::Blob::new_with_u8_array_sequence_and_options(&chunks, &options).map_err(js_err)?;
                form_data
                    .append_with_blob_and_filename(&part.name, &blob, &attachment.name)
                    .map_err(js_err)?;
            }
        }
    }
    Ok(form_data)
}
