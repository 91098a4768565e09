use std::time::Duration;

use bytes::Bytes;
use futures_util::StreamExt;
use ownlib_logging::{ownlib_debug, ownlib_error};
use reqwest::multipart::{Form, Part};

use crate::{ApiError, FormPayload, FormValue, HttpMethod, HttpRequest, HttpResponse, RequestBody};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_body_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            max_body_bytes: 16 * 1024 * 1024,
        }
    }
}

impl ClientSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Executes one HTTP exchange. Non-2xx statuses are returned as responses;
/// only the absence of a response is an error.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    max_body_bytes: u64,
}

impl ReqwestTransport {
    pub fn new(settings: &ClientSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::transport(err.to_string()))?;
        Ok(Self {
            client,
            max_body_bytes: settings.max_body_bytes,
        })
    }

    fn build(&self, request: HttpRequest) -> Result<reqwest::RequestBuilder, ApiError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(text) => builder.body(text),
            RequestBody::Multipart(form) => builder.multipart(multipart_form(form)?),
        };
        Ok(builder)
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = request.url.clone();
        ownlib_debug!("{} {}", request.method, url);
        let response = self
            .build(request)?
            .send()
            .await
            .map_err(|err| map_reqwest_error(&url, err))?;

        let status = response.status();
        if let Some(content_len) = response.content_length() {
            if content_len > self.max_body_bytes {
                return Err(ApiError::transport(format!(
                    "response too large ({content_len} bytes, max {})",
                    self.max_body_bytes
                )));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|err| map_reqwest_error(&url, err))?;
            if body.len() as u64 + chunk.len() as u64 > self.max_body_bytes {
                return Err(ApiError::transport(format!(
                    "response too large (max {})",
                    self.max_body_bytes
                )));
            }
            body.extend_from_slice(&chunk);
        }

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
            body: Bytes::from(body),
        })
    }
}

fn multipart_form(payload: FormPayload) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for (name, value) in payload.fields() {
        form = match value {
            FormValue::Text(text) => form.text(name.clone(), text.clone()),
            FormValue::File(file) => {
                let mut part = Part::bytes(file.data.to_vec()).file_name(file.file_name.clone());
                if let Some(content_type) = &file.content_type {
                    part = part
                        .mime_str(content_type)
                        .map_err(|err| ApiError::validation(err.to_string()))?;
                }
                form.part(name.clone(), part)
            }
        };
    }
    Ok(form)
}

fn map_reqwest_error(url: &str, err: reqwest::Error) -> ApiError {
    ownlib_error!("Request to {} failed: {}", url, err);
    if err.is_timeout() {
        return ApiError::transport(format!("request timed out: {err}"));
    }
    ApiError::transport(err.to_string())
}
