//! Request construction, response classification and typed decode helpers
//!
//! Every endpoint in this crate goes through the same three steps:
//!
//! 1. A [`CallBuilder`] is assembled from an [`Endpoint`] plus an ordered list
//!    of [`CallArg`] options (headers, JSON body, query parameters, ...).
//! 2. The transport sends it and wraps the reply in an [`HttpCallResponse`],
//!    whose HTTP status is folded into one [`CallStatus`].
//! 3. The endpoint branches on that status, usually through one of the
//!    `completed_*_or_error` combinators.

use crate::{MoovError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use http::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use http::{Method, StatusCode};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use url::Url;
use uuid::Uuid;

/// Header asking the API to hold the response until the given state is reached
pub const X_WAIT_FOR: &str = "x-wait-for";

/// Header carrying the client-generated idempotency key
pub const X_IDEMPOTENCY_KEY: &str = "x-idempotency-key";

/// Characters escaped when an identifier is placed in a path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Semantic outcome of a call, independent of the raw HTTP status code.
///
/// Several HTTP codes can fold into the same status, so retry decisions must
/// use [`CallStatus::is_retryable`] rather than the code itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallStatus {
    /// Completed fully, the body holds the final result
    Completed,
    /// Accepted and running asynchronously, either by request or after timing out
    Started,
    /// Malformed request, body or headers
    BadRequest,
    /// Violates a stateful constraint
    StateConflict,
    /// Well-formed request that failed validation
    FailedValidation,
    /// The requested item does not exist
    NotFound,
    /// Credentials are missing or expired
    Unauthenticated,
    /// Not allowed to access this resource, method or URL
    Unauthorized,
    /// Rate limited, can be retried after a short wait
    RateLimited,
    /// Unknown server-side failure
    ServerError,
}

impl CallStatus {
    /// Every defined status
    pub const ALL: [CallStatus; 10] = [
        CallStatus::Completed,
        CallStatus::Started,
        CallStatus::BadRequest,
        CallStatus::StateConflict,
        CallStatus::FailedValidation,
        CallStatus::NotFound,
        CallStatus::Unauthenticated,
        CallStatus::Unauthorized,
        CallStatus::RateLimited,
        CallStatus::ServerError,
    ];

    /// Stable snake_case name of the status
    pub const fn name(&self) -> &'static str {
        match self {
            CallStatus::Completed => "completed",
            CallStatus::Started => "started",
            CallStatus::BadRequest => "bad_request",
            CallStatus::StateConflict => "state_conflict",
            CallStatus::FailedValidation => "failed_validation",
            CallStatus::NotFound => "not_found",
            CallStatus::Unauthenticated => "unauthenticated",
            CallStatus::Unauthorized => "unauthorized",
            CallStatus::RateLimited => "rate_limited",
            CallStatus::ServerError => "server_error",
        }
    }

    /// Whether repeating the same call may produce a different outcome
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            CallStatus::Started | CallStatus::RateLimited | CallStatus::ServerError
        )
    }

    /// Whether the call was accepted, synchronously or not
    pub const fn is_success(&self) -> bool {
        matches!(self, CallStatus::Completed | CallStatus::Started)
    }

    /// Classify a transport-level status code
    pub fn from_http_status(status: StatusCode) -> Self {
        match status {
            StatusCode::ACCEPTED => CallStatus::Started,
            s if s.is_success() => CallStatus::Completed,
            StatusCode::BAD_REQUEST => CallStatus::BadRequest,
            StatusCode::UNAUTHORIZED => CallStatus::Unauthenticated,
            StatusCode::FORBIDDEN | StatusCode::METHOD_NOT_ALLOWED => CallStatus::Unauthorized,
            StatusCode::NOT_FOUND => CallStatus::NotFound,
            StatusCode::CONFLICT => CallStatus::StateConflict,
            StatusCode::UNPROCESSABLE_ENTITY => CallStatus::FailedValidation,
            StatusCode::TOO_MANY_REQUESTS => CallStatus::RateLimited,
            s if s.is_client_error() => CallStatus::BadRequest,
            _ => CallStatus::ServerError,
        }
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// HTTP verb and path of a single API operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    method: Method,
    path: String,
}

impl Endpoint {
    /// Create an endpoint. The path is used as-is; escape identifiers with
    /// [`path_segment`] before formatting them in.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }

    /// HTTP method
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path relative to the API base URL
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Percent-encode a caller-supplied identifier for use as one path segment
pub fn path_segment(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}

type ApplyFn<'a> = Box<dyn FnOnce(&mut CallBuilder) -> Result<()> + Send + 'a>;

/// One option applied to a [`CallBuilder`]
pub struct CallArg<'a> {
    apply: ApplyFn<'a>,
}

impl<'a> CallArg<'a> {
    /// Wrap a function over the in-progress call
    pub fn new<F>(apply: F) -> Self
    where
        F: FnOnce(&mut CallBuilder) -> Result<()> + Send + 'a,
    {
        Self {
            apply: Box::new(apply),
        }
    }

    fn apply(self, call: &mut CallBuilder) -> Result<()> {
        (self.apply)(call)
    }
}

impl fmt::Debug for CallArg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallArg")
            .field("apply", &"<function>")
            .finish()
    }
}

impl From<Endpoint> for CallArg<'_> {
    fn from(endpoint: Endpoint) -> Self {
        CallArg::new(move |call| {
            call.method = endpoint.method;
            call.path = endpoint.path;
            Ok(())
        })
    }
}

/// Request in progress, assembled from an endpoint and a list of options
#[derive(Debug, Clone, Default)]
pub struct CallBuilder {
    method: Method,
    path: String,
    params: BTreeMap<String, String>,
    headers: HeaderMap,
    token: Option<String>,
    body: Option<Vec<u8>>,
}

impl CallBuilder {
    /// Apply the endpoint and then every option, in order.
    ///
    /// Stops at the first option that fails and returns its error.
    pub fn new<'a, I>(endpoint: Endpoint, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = CallArg<'a>>,
    {
        let mut call = CallBuilder::default();
        for arg in std::iter::once(CallArg::from(endpoint)).chain(args) {
            arg.apply(&mut call)?;
        }
        Ok(call)
    }

    /// HTTP method
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path relative to the API base URL
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters, sorted by key
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// Request headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Bearer token overriding the client credentials
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Serialized request body
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Set or replace a header
    pub fn set_header(&mut self, name: HeaderName, value: &str) -> Result<()> {
        let value = HeaderValue::from_str(value)
            .map_err(|e| MoovError::invalid_header(format!("{name}: {e}")))?;
        self.headers.insert(name, value);
        Ok(())
    }

    /// Set or replace a query parameter
    pub fn set_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Set or replace the request body
    pub fn set_body(&mut self, body: Vec<u8>) {
        self.body = Some(body);
    }

    /// Set or replace the bearer token
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Full request URL for the given API base URL
    pub fn url(&self, base_url: &str) -> Result<Url> {
        let base = base_url.trim_end_matches('/');
        let path = self.path.trim_start_matches('/');
        let mut url = Url::parse(&format!("{}/{}", base, path))?;
        if !self.params.is_empty() {
            url.query_pairs_mut().extend_pairs(self.params.iter());
        }
        Ok(url)
    }
}

/// Ask for a JSON response
pub fn accept_json() -> CallArg<'static> {
    CallArg::new(|call| call.set_header(ACCEPT, "application/json"))
}

/// Serialize `body` as the JSON request body
pub fn json_body<'a, T>(body: &'a T) -> CallArg<'a>
where
    T: Serialize + Sync + ?Sized,
{
    CallArg::new(move |call| {
        let payload = serde_json::to_vec(body)?;
        call.set_header(CONTENT_TYPE, "application/json")?;
        call.set_body(payload);
        Ok(())
    })
}

/// State the API should reach before answering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitFor {
    /// Block until the payment rail has responded
    RailResponse,
}

impl WaitFor {
    /// Header value for this state
    pub fn as_str(&self) -> &'static str {
        match self {
            WaitFor::RailResponse => "rail-response",
        }
    }
}

/// Request a synchronous answer, see [`WaitFor`]
pub fn wait_for(state: WaitFor) -> CallArg<'static> {
    CallArg::new(move |call| call.set_header(HeaderName::from_static(X_WAIT_FOR), state.as_str()))
}

/// Attach an idempotency key
pub fn idempotency_key(key: Uuid) -> CallArg<'static> {
    CallArg::new(move |call| {
        call.set_header(
            HeaderName::from_static(X_IDEMPOTENCY_KEY),
            &key.hyphenated().to_string(),
        )
    })
}

/// Attach a freshly generated v4 idempotency key
pub fn new_idempotency_key() -> CallArg<'static> {
    idempotency_key(Uuid::new_v4())
}

/// Set an arbitrary header
pub fn header(name: impl Into<String>, value: impl Into<String>) -> CallArg<'static> {
    let name = name.into();
    let value = value.into();
    CallArg::new(move |call| {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| MoovError::invalid_header(format!("{name}: {e}")))?;
        call.set_header(name, &value)
    })
}

/// Set one query parameter
pub fn query(key: impl Into<String>, value: impl Into<String>) -> CallArg<'static> {
    let key = key.into();
    let value = value.into();
    CallArg::new(move |call| {
        call.set_param(key, value);
        Ok(())
    })
}

/// Set several query parameters
pub fn query_pairs<I, K, V>(pairs: I) -> CallArg<'static>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let pairs: Vec<(String, String)> = pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();
    CallArg::new(move |call| {
        for (key, value) in pairs {
            call.set_param(key, value);
        }
        Ok(())
    })
}

/// Authenticate this call with a bearer token instead of the client keys
pub fn bearer_token(token: impl Into<String>) -> CallArg<'static> {
    let token = token.into();
    CallArg::new(move |call| {
        call.set_token(token);
        Ok(())
    })
}

/// Collects list-filter query parameters, dropping zero values
#[derive(Debug, Default)]
pub(crate) struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    pub(crate) fn string(mut self, key: &'static str, value: &str) -> Self {
        if !value.is_empty() {
            self.pairs.push((key, value.to_string()));
        }
        self
    }

    pub(crate) fn count(mut self, key: &'static str, value: u32) -> Self {
        if value > 0 {
            self.pairs.push((key, value.to_string()));
        }
        self
    }

    pub(crate) fn time(mut self, key: &'static str, value: Option<&DateTime<Utc>>) -> Self {
        if let Some(value) = value {
            self.pairs.push((key, format_time(value)));
        }
        self
    }

    pub(crate) fn flag(mut self, key: &'static str, value: bool) -> Self {
        if value {
            self.pairs.push((key, "true".to_string()));
        }
        self
    }

    pub(crate) fn list(mut self, key: &'static str, values: &[String]) -> Self {
        if !values.is_empty() {
            self.pairs.push((key, values.join(",")));
        }
        self
    }

    pub(crate) fn build(self) -> Vec<(&'static str, String)> {
        self.pairs
    }
}

/// RFC 3339 with whole seconds and a `Z` suffix
pub(crate) fn format_time(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// A classified response
pub trait CallResponse {
    /// Semantic status of the response
    fn status(&self) -> CallStatus;

    /// Deserialize the body into `T`
    fn unmarshal<T: DeserializeOwned>(&self) -> Result<T>;

    /// Convert the response into an error
    fn error(&self) -> MoovError;
}

/// Response read from the HTTP transport
#[derive(Debug, Clone)]
pub struct HttpCallResponse {
    status: CallStatus,
    http_status: StatusCode,
    body: Vec<u8>,
}

impl HttpCallResponse {
    /// Classify a status code and keep the body for decoding
    pub fn new(http_status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: CallStatus::from_http_status(http_status),
            http_status,
            body: body.into(),
        }
    }

    /// Raw HTTP status code
    pub fn http_status(&self) -> StatusCode {
        self.http_status
    }

    /// Raw body bytes
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

impl CallResponse for HttpCallResponse {
    fn status(&self) -> CallStatus {
        self.status
    }

    fn unmarshal<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    fn error(&self) -> MoovError {
        MoovError::api(
            self.status,
            self.http_status.as_u16(),
            error_message(self.status, &self.body),
        )
    }
}

/// Error envelope returned by the API
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<String>,
    #[serde(flatten)]
    fields: BTreeMap<String, Value>,
}

fn error_message(status: CallStatus, body: &[u8]) -> String {
    if let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(body) {
        if let Some(message) = envelope.error.filter(|m| !m.is_empty()) {
            return message;
        }
        // validation failures come back as {"field": "reason", ...}
        let fields: Vec<String> = envelope
            .fields
            .iter()
            .map(|(field, reason)| match reason {
                Value::String(reason) => format!("{field}: {reason}"),
                other => format!("{field}: {other}"),
            })
            .collect();
        if !fields.is_empty() {
            return fields.join(", ");
        }
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        status.name().to_string()
    } else {
        text.to_string()
    }
}

/// Decode the body as a single object
pub fn unmarshal_object<A: DeserializeOwned>(resp: &impl CallResponse) -> Result<A> {
    resp.unmarshal()
}

/// Decode the body as a list of objects
pub fn unmarshal_list<A: DeserializeOwned>(resp: &impl CallResponse) -> Result<Vec<A>> {
    resp.unmarshal()
}

/// For calls without a response body: `Ok(())` when completed, otherwise the error
pub fn completed_nil_or_error(resp: &impl CallResponse) -> Result<()> {
    match resp.status() {
        CallStatus::Completed => Ok(()),
        _ => Err(resp.error()),
    }
}

/// The decoded object when completed, otherwise the error
pub fn completed_object_or_error<A: DeserializeOwned>(resp: &impl CallResponse) -> Result<A> {
    match resp.status() {
        CallStatus::Completed => unmarshal_object(resp),
        _ => Err(resp.error()),
    }
}

/// The decoded list when completed, otherwise the error
pub fn completed_list_or_error<A: DeserializeOwned>(resp: &impl CallResponse) -> Result<Vec<A>> {
    match resp.status() {
        CallStatus::Completed => unmarshal_list(resp),
        _ => Err(resp.error()),
    }
}
