use std::sync::{Arc, RwLock};

use ownlib_logging::{ownlib_debug, ownlib_error, ownlib_info, ownlib_warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::credential::CredentialStore;
use crate::registry::InFlightRegistry;
use crate::transport::{ClientSettings, ReqwestTransport, Transport};
use crate::{
    ApiError, FormPayload, HttpMethod, HttpRequest, HttpResponse, RequestBody, RequestKey,
    TokenResponse,
};

/// Reads that share a single in-flight request per key.
const DEDUPLICATED_READS: &[&str] = &["/users/me"];

pub const UPLOAD_BUSY_MESSAGE: &str = "The upload is already in progress. Please wait a moment.";
pub const LANGUAGE_CODE_MESSAGE: &str =
    "The language code must consist of two lowercase Latin letters (for example: en, uk, pl, ru)";

/// Method, extra headers and JSON body of a call made through [`SessionClient::request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new(HttpMethod::Get)
    }
}

impl RequestOptions {
    pub fn new(method: HttpMethod) -> Self {
        Self {
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let text = serde_json::to_string(body)
            .map_err(|err| ApiError::validation(format!("cannot encode request body: {err}")))?;
        self.body = Some(text);
        Ok(self)
    }
}

/// Query parameter value. Falsy values (empty text, zero, `false`) are left
/// out of the query string, as are omitted ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Number(i64),
    Flag(bool),
}

impl ParamValue {
    fn is_falsy(&self) -> bool {
        match self {
            ParamValue::Text(text) => text.is_empty(),
            ParamValue::Number(n) => *n == 0,
            ParamValue::Flag(flag) => !flag,
        }
    }

    fn render(&self) -> String {
        match self {
            ParamValue::Text(text) => text.clone(),
            ParamValue::Number(n) => n.to_string(),
            ParamValue::Flag(flag) => flag.to_string(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Number(i64::from(value))
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Flag(value)
    }
}

pub type Params<'a> = [(&'a str, Option<ParamValue>)];

struct ClientInner {
    base_url: String,
    transport: Arc<dyn Transport>,
    store: Arc<dyn CredentialStore>,
    credential: RwLock<Option<String>>,
    registry: InFlightRegistry,
}

/// Access layer for the library service: owns the bearer credential, builds
/// requests, shares in-flight profile reads and rejects duplicate uploads.
///
/// Cloning is cheap and every clone observes the same session.
#[derive(Clone)]
pub struct SessionClient {
    inner: Arc<ClientInner>,
}

impl SessionClient {
    /// Creates a client and recovers any credential left in `store`.
    pub fn new(
        base_url: impl Into<String>,
        transport: Arc<dyn Transport>,
        store: Arc<dyn CredentialStore>,
    ) -> Self {
        let credential = store.load();
        if credential.is_some() {
            ownlib_debug!("Recovered stored credential");
        }
        Self {
            inner: Arc::new(ClientInner {
                base_url: base_url.into().trim_end_matches('/').to_string(),
                transport,
                store,
                credential: RwLock::new(credential),
                registry: InFlightRegistry::new(),
            }),
        }
    }

    /// Creates a client backed by [`ReqwestTransport`].
    pub fn with_settings(
        settings: &ClientSettings,
        store: Arc<dyn CredentialStore>,
    ) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(settings)?;
        Ok(Self::new(settings.base_url.clone(), Arc::new(transport), store))
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn has_credential(&self) -> bool {
        self.credential().is_some()
    }

    pub fn set_credential(&self, token: impl Into<String>) {
        let token = token.into();
        if let Err(err) = self.inner.store.save(&token) {
            ownlib_warn!("Failed to persist credential: {}", err);
        }
        *self
            .inner
            .credential
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token);
    }

    pub fn clear_credential(&self) {
        if let Err(err) = self.inner.store.remove() {
            ownlib_warn!("Failed to remove stored credential: {}", err);
        }
        *self
            .inner
            .credential
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }

    /// Performs a JSON request. A GET of a deduplicated endpoint joins the
    /// pending request with the same key instead of issuing a new one.
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let url = self.url(endpoint);
        let key = RequestKey::new(options.method, url.clone());
        let request = HttpRequest {
            method: options.method,
            headers: self.json_headers(options.headers),
            body: options.body.map_or(RequestBody::Empty, RequestBody::Json),
            url,
        };
        let operation = execute(self.inner.transport.clone(), request);

        if options.method.is_read() && DEDUPLICATED_READS.contains(&endpoint) {
            return self
                .inner
                .registry
                .share_or_start(key, operation)
                .into_outcome()
                .await;
        }
        operation.await
    }

    pub async fn get(&self, endpoint: &str, params: &Params<'_>) -> Result<Value, ApiError> {
        let query = query_string(params);
        let target = if query.is_empty() {
            endpoint.to_string()
        } else {
            format!("{endpoint}?{query}")
        };
        self.request(&target, RequestOptions::new(HttpMethod::Get))
            .await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<Value, ApiError> {
        self.request(endpoint, RequestOptions::new(HttpMethod::Post).json(body)?)
            .await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<Value, ApiError> {
        self.request(endpoint, RequestOptions::new(HttpMethod::Put).json(body)?)
            .await
    }

    pub async fn delete(&self, endpoint: &str) -> Result<Value, ApiError> {
        self.request(endpoint, RequestOptions::new(HttpMethod::Delete))
            .await
    }

    /// Submits a multipart form. While an upload with the same endpoint and
    /// field names is pending, further attempts fail at once with a `Busy`
    /// error and issue no request.
    pub async fn upload_file(&self, endpoint: &str, form: FormPayload) -> Result<Value, ApiError> {
        let url = self.url(endpoint);
        // Only field names take part in the key, so two different files sent
        // through the same form shape collide.
        let key = RequestKey::upload(url.clone(), &form);
        let request = HttpRequest {
            method: HttpMethod::Post,
            headers: self.auth_header().into_iter().collect(),
            body: RequestBody::Multipart(form),
            url,
        };
        let transport = self.inner.transport.clone();
        let label = endpoint.to_string();
        let outcome = self
            .inner
            .registry
            .start_exclusive(key, async move {
                let result = execute(transport, request).await;
                ownlib_info!("Upload completed: {}", label);
                result
            })
            .ok_or_else(|| {
                ownlib_info!("Upload already in progress for {}", endpoint);
                ApiError::busy(UPLOAD_BUSY_MESSAGE)
            })?;
        outcome.await
    }

    /// Authenticates with form fields and stores the returned credential.
    pub async fn login(&self, identifier: &str, secret: &str) -> Result<TokenResponse, ApiError> {
        ownlib_info!("Attempting login for {}", identifier);
        let request = HttpRequest {
            method: HttpMethod::Post,
            url: self.url("/auth/login"),
            headers: Vec::new(),
            body: RequestBody::Multipart(
                FormPayload::new()
                    .text("username", identifier)
                    .text("password", secret),
            ),
        };
        let payload = execute(self.inner.transport.clone(), request)
            .await
            .inspect_err(|err| ownlib_warn!("Login failed: {}", err))?;
        let token: TokenResponse = decode_payload(payload)?;
        self.set_credential(token.access_token.clone());
        ownlib_info!("Login successful");
        Ok(token)
    }

    /// Normalises a two-letter language code. `None` and `""` mean "no
    /// language"; anything else must be two Latin letters after trimming.
    pub fn validate_language_code(code: Option<&str>) -> Result<Option<String>, ApiError> {
        let Some(code) = code.filter(|code| !code.is_empty()) else {
            return Ok(None);
        };
        let normalized = code.trim().to_lowercase();
        if normalized.len() == 2 && normalized.chars().all(|c| c.is_ascii_lowercase()) {
            Ok(Some(normalized))
        } else {
            Err(ApiError::validation(LANGUAGE_CODE_MESSAGE))
        }
    }

    /// Forgets all in-flight bookkeeping; running requests still complete.
    pub fn clear_active_requests(&self) {
        self.inner.registry.clear();
        ownlib_info!("Cleared all active requests");
    }

    pub fn active_requests(&self) -> usize {
        self.inner.registry.len()
    }

    fn credential(&self) -> Option<String> {
        self.inner
            .credential
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.inner.base_url, endpoint)
    }

    fn auth_header(&self) -> Option<(String, String)> {
        self.credential()
            .map(|token| ("Authorization".to_string(), format!("Bearer {token}")))
    }

    fn json_headers(&self, extra: Vec<(String, String)>) -> Vec<(String, String)> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        for (name, value) in extra.into_iter().chain(self.auth_header()) {
            match headers
                .iter_mut()
                .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
            {
                Some(slot) => slot.1 = value,
                None => headers.push((name, value)),
            }
        }
        headers
    }
}

pub(crate) fn decode_payload<T: DeserializeOwned>(payload: Value) -> Result<T, ApiError> {
    serde_json::from_value(payload).map_err(|err| ApiError::decode(err.to_string()))
}

fn query_string(params: &Params<'_>) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (name, value) in params {
        if let Some(value) = value.as_ref().filter(|value| !value.is_falsy()) {
            serializer.append_pair(name, &value.render());
        }
    }
    serializer.finish()
}

async fn execute(transport: Arc<dyn Transport>, request: HttpRequest) -> Result<Value, ApiError> {
    let url = request.url.clone();
    ownlib_debug!("Making request to {}", url);
    let response = transport.send(request).await.inspect_err(|err| {
        ownlib_error!("API request error for {}: {}", url, err);
    })?;
    interpret_response(&url, response)
}

/// Maps a raw response onto the uniform result shape.
pub(crate) fn interpret_response(url: &str, response: HttpResponse) -> Result<Value, ApiError> {
    if !response.is_success() {
        let body = response.text();
        ownlib_error!(
            "API error response: status={} reason={} url={} body={}",
            response.status,
            response.reason,
            url,
            body
        );
        return Err(http_failure(response.status, &response.reason, &body));
    }
    if response.status == 204 {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(&response.body)
        .map_err(|err| ApiError::decode(format!("invalid JSON from {url}: {err}")))
}

fn http_failure(status: u16, reason: &str, body: &str) -> ApiError {
    let detail = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(fields)) => fields.get("detail").and_then(detail_text),
        Ok(_) => None,
        Err(_) => Some(body.to_string()),
    };
    let message = detail
        .filter(|detail| !detail.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP {status}: {reason}"));
    ApiError::http(status, message)
}

fn detail_text(detail: &Value) -> Option<String> {
    match detail {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        // Field validation errors arrive as a list of `{loc, msg, type}`.
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                Some(detail.to_string())
            } else {
                Some(messages.join("; "))
            }
        }
        other => Some(other.to_string()),
    }
}
