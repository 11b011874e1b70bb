//! Browser transport for the CRM API.
//!
//! Implements the shared `ApiClient` seam on top of `gloo-net`. Every path is
//! sent to the console server under `/api`, which relays it upstream.
//! Multipart bodies are rebuilt as a `web_sys::FormData`, keeping part order.

use async_trait::async_trait;
use crm_common::auth::Session;
use crm_common::client::{server_message, ApiClient, ClientError, API_PREFIX};
use crm_common::model::file::FileHandle;
use crm_common::model::multipart::{MultipartForm, Part};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde_json::Value;
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

#[derive(Clone, Default)]
pub struct GlooClient {
    authorization: Option<String>,
}

impl GlooClient {
    /// Client for calls made before login.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn for_session(session: &Session) -> Self {
        Self {
            authorization: Some(session.bearer()),
        }
    }

    fn post(&self, path: &str) -> RequestBuilder {
        let builder = Request::post(&format!("{API_PREFIX}{path}"));
        match &self.authorization {
            Some(value) => builder.header("Authorization", value),
            None => builder,
        }
    }
}

fn transport(err: impl std::fmt::Display) -> ClientError {
    ClientError::Transport(err.to_string())
}

fn js_error(err: JsValue) -> ClientError {
    ClientError::Transport(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

fn blob(file: &FileHandle) -> Result<Blob, ClientError> {
    let bytes = js_sys::Uint8Array::from(file.bytes());
    let parts = js_sys::Array::of1(&bytes);
    let options = BlobPropertyBag::new();
    options.set_type(file.content_type());
    Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_error)
}

fn form_data(form: &MultipartForm) -> Result<FormData, ClientError> {
    let data = FormData::new().map_err(js_error)?;
    for part in form.parts() {
        let appended = match part {
            Part::Text { name, value } => data.append_with_str(name, value),
            Part::File { name, file } => {
                data.append_with_blob_and_filename(name, &blob(file)?, file.name())
            }
        };
        appended.map_err(js_error)?;
    }
    Ok(data)
}

async fn read(response: Response) -> Result<Value, ClientError> {
    let status = response.status();
    let text = response.text().await.map_err(transport)?;
    if !response.ok() {
        gloo_console::warn!(format!("{} answered {}", response.url(), status));
        return Err(ClientError::Status {
            status,
            message: server_message(&text),
        });
    }
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl ApiClient for GlooClient {
    async fn post_json(&self, path: &str, body: Value) -> Result<Value, ClientError> {
        let response = self
            .post(path)
            .json(&body)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        read(response).await
    }

    async fn post_multipart(&self, path: &str, form: MultipartForm) -> Result<Value, ClientError> {
        let response = self
            .post(path)
            .body(form_data(&form)?)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        read(response).await
    }
}
