//
//  artifactory-client
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for the Artifactory API
//!
//! This module provides the core HTTP client shared by every API service.
//! It resolves request paths against the base URL, attaches default headers,
//! executes requests and decodes response bodies.
//!
//! ## Features
//!
//! - Base URL normalisation and confined path resolution
//! - Authentication through a credential-carrying transport
//! - JSON request encoding and response decoding
//! - Single-object-or-array response normalisation
//! - Status-derived errors that keep the response metadata
//! - Injected observability hook, no global logging state
//!
//! ## Request lifecycle
//!
//! ```text
//! service method -> Client::new_request -> Client::execute* -> decoder -> (T, ApiResponse)
//! ```
//!
//! A [`Request`] is built fresh for every call and consumed by the `execute*`
//! method that sends it. The [`Client`] itself is immutable after
//! construction and is shared by the services through an `Arc`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use super::common::{decode_one_or_many, media_types, snippet, ApiError, ApiResponse};
use super::hooks::{RequestEvent, RequestObserver, ResponseEvent, TracingObserver};
use crate::auth::Credential;

/// Body of an outgoing request.
///
/// Bytes and streams are passed to the transport unmodified; JSON values are
/// serialized once, up front, by [`Body::json`].
#[derive(Debug)]
pub struct Body {
    inner: reqwest::Body,
}

impl Body {
    /// A body from raw bytes.
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            inner: reqwest::Body::from(bytes.into()),
        }
    }

    /// A body from text, such as an AQL query.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            inner: reqwest::Body::from(text.into()),
        }
    }

    /// A body serialized from any `Serialize` value.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] when serialization fails.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, ApiError> {
        let bytes = serde_json::to_vec(value).map_err(ApiError::Encode)?;
        Ok(Self::bytes(bytes))
    }

    /// A streaming body, sent without buffering.
    pub fn stream(body: reqwest::Body) -> Self {
        Self { inner: body }
    }

    /// Length of the body when it is held in memory.
    pub fn len(&self) -> Option<usize> {
        self.inner.as_bytes().map(<[u8]>::len)
    }

    /// True when the body is held in memory and has no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }
}

/// A single HTTP request, resolved against a client's base URL.
///
/// Built by [`Client::new_request`] or [`Client::new_json_request`] and
/// consumed by one of the `execute*` methods.
#[derive(Debug)]
pub struct Request {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Body>,
}

impl Request {
    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The fully resolved URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The headers set on this request (default headers included).
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The body, if any.
    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    /// Sets a header, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidHeader`] for names or values that are not
    /// valid HTTP.
    pub fn header(mut self, name: &str, value: &str) -> Result<Self, ApiError> {
        let invalid = || ApiError::InvalidHeader {
            name: name.to_string(),
        };
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let value = HeaderValue::from_str(value).map_err(|_| invalid())?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Sets the `Accept` header.
    pub fn accept(self, media_type: &str) -> Result<Self, ApiError> {
        self.header(ACCEPT.as_str(), media_type)
    }
}

/// Builder for [`Client`].
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use artifactory_client::api::Client;
/// use artifactory_client::auth::Credential;
///
/// let client = Client::builder("https://repo.example.com/artifactory")
///     .credential(Credential::bearer("token"))
///     .timeout(Duration::from_secs(60))
///     .build()?;
/// # Ok::<(), artifactory_client::api::ApiError>(())
/// ```
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: String,
    credential: Option<Credential>,
    http: Option<reqwest::Client>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    default_headers: Vec<(String, String)>,
    observer: Option<Arc<dyn RequestObserver>>,
}

impl ClientBuilder {
    /// Sets the credential used to build the HTTP transport.
    ///
    /// Ignored when a pre-built client is supplied with [`http_client`](Self::http_client).
    pub fn credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Uses an already configured `reqwest` client as the transport.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Sets a whole-request timeout on the internally built transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Overrides the `User-Agent` header. Defaults to [`crate::USER_AGENT`].
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Adds a header sent with every request built by the client.
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Sets the observer notified of every request. Defaults to [`TracingObserver`].
    pub fn observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid, a default header is not
    /// valid HTTP, or the transport fails to initialise.
    pub fn build(self) -> Result<Client, ApiError> {
        let base_url = normalize_base_url(&self.base_url)?;

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| crate::USER_AGENT.to_string());
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&user_agent).map_err(|_| ApiError::InvalidHeader {
                name: USER_AGENT.to_string(),
            })?,
        );
        for (name, value) in &self.default_headers {
            let invalid = || ApiError::InvalidHeader { name: name.clone() };
            default_headers.insert(
                HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?,
                HeaderValue::from_str(value).map_err(|_| invalid())?,
            );
        }

        let http = match self.http {
            Some(http) => http,
            None => {
                let mut builder = match &self.credential {
                    Some(credential) => credential.client_builder()?,
                    None => reqwest::Client::builder(),
                };
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(Client {
            http,
            base_url,
            default_headers,
            observer: self
                .observer
                .unwrap_or_else(|| Arc::new(TracingObserver)),
        })
    }
}

/// The HTTP client shared by all Artifactory API services.
///
/// Owns the base URL (always ending in `/`), a transport that attaches the
/// credential to every request, the default headers and the observer.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use artifactory_client::api::Client;
/// use artifactory_client::auth::Credential;
///
/// let client = Client::builder("https://repo.example.com/artifactory")
///     .credential(Credential::basic("admin", "password"))
///     .build()?;
/// assert_eq!(client.base_url().as_str(), "https://repo.example.com/artifactory/");
/// # Ok::<(), artifactory_client::api::ApiError>(())
/// ```
///
/// # Concurrency
///
/// The client holds no mutable state. Share it behind an `Arc` and call it
/// from as many tasks as needed; each call builds and consumes its own
/// request. Dropping a pending call aborts the in-flight HTTP request.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    default_headers: HeaderMap,
    observer: Arc<dyn RequestObserver>,
}

impl Client {
    /// Starts building a client for the given base URL.
    pub fn builder(base_url: impl Into<String>) -> ClientBuilder {
        ClientBuilder {
            base_url: base_url.into(),
            credential: None,
            http: None,
            timeout: None,
            user_agent: None,
            default_headers: Vec::new(),
            observer: None,
        }
    }

    /// Creates a client from a base URL and a configured HTTP transport.
    ///
    /// Equivalent to `Client::builder(base_url).http_client(http).build()`.
    pub fn new(base_url: &str, http: reqwest::Client) -> Result<Self, ApiError> {
        Self::builder(base_url).http_client(http).build()
    }

    /// The observer notified of this client's requests and transfers.
    pub(crate) fn observer(&self) -> &dyn RequestObserver {
        self.observer.as_ref()
    }

    /// Returns the base URL. Always ends with `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves `path` against the base URL.
    ///
    /// Leading slashes on `path` are ignored, so `"/api/x"` and `"api/x"`
    /// resolve to the same URL with exactly one `/` after the base. The result
    /// must stay beneath the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidPath`] when the path is absolute (has its own
    /// scheme or host) or contains a `..` segment, even one that would stay
    /// beneath the base.
    ///
    /// # Example
    ///
    /// ```rust
    /// use artifactory_client::api::Client;
    ///
    /// let client = Client::builder("http://localhost:8081/artifactory").build()?;
    /// let url = client.resolve("/api/storage/libs/a.jar")?;
    /// assert_eq!(url.as_str(), "http://localhost:8081/artifactory/api/storage/libs/a.jar");
    /// assert!(client.resolve("../admin").is_err());
    /// # Ok::<(), artifactory_client::api::ApiError>(())
    /// ```
    pub fn resolve(&self, path: &str) -> Result<Url, ApiError> {
        let invalid = || ApiError::InvalidPath {
            path: path.to_string(),
            base: self.base_url.to_string(),
        };

        let relative = path.trim_start_matches('/');
        if relative.split(['/', '?', '#']).any(is_dot_dot_segment) {
            return Err(invalid());
        }
        // "./" keeps a first segment such as "a:b" from being read as a scheme.
        let url = self
            .base_url
            .join(&format!("./{}", relative))
            .map_err(|_| invalid())?;

        if url.as_str().starts_with(self.base_url.as_str()) {
            Ok(url)
        } else {
            Err(invalid())
        }
    }

    /// Builds a request for `path` with an optional body.
    ///
    /// The path is resolved with [`resolve`](Self::resolve) and the client's
    /// default headers are attached.
    pub fn new_request(
        &self,
        method: Method,
        path: &str,
        body: Option<Body>,
    ) -> Result<Request, ApiError> {
        let url = self.resolve(path)?;

        Ok(Request {
            method,
            url,
            headers: self.default_headers.clone(),
            body,
        })
    }

    /// Builds a request whose body is `value` encoded as JSON.
    ///
    /// Sets `Content-Type: application/json`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] when `value` cannot be serialized, or any
    /// error from [`new_request`](Self::new_request).
    pub fn new_json_request<T: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        value: &T,
    ) -> Result<Request, ApiError> {
        let body = Body::json(value)?;
        self.new_request(method, path, Some(body))?
            .header(CONTENT_TYPE.as_str(), media_types::JSON)
    }

    /// Sends a request and returns the live response.
    ///
    /// The body of a successful response is left unread so callers can
    /// stream it; they own draining it. A non-success status is turned into
    /// [`ApiError::Status`] after reading the error body.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Transport`] when the request could not be completed
    /// - [`ApiError::Status`] for non-2xx responses
    pub async fn execute(&self, request: Request) -> Result<reqwest::Response, ApiError> {
        let Request {
            method,
            url,
            headers,
            body,
        } = request;

        self.observer.on_request(&RequestEvent {
            method: &method,
            url: &url,
            body_len: body.as_ref().and_then(Body::len),
        });

        let mut builder = self.http.request(method.clone(), url.clone()).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body.inner);
        }

        let started = Instant::now();
        let result = builder.send().await;
        self.observer.on_response(&ResponseEvent {
            method: &method,
            url: &url,
            status: result.as_ref().ok().map(reqwest::Response::status),
            elapsed: started.elapsed(),
        });

        let response = result?;
        if response.status().is_success() {
            return Ok(response);
        }

        let meta = ApiResponse::from_response(&response);
        let text = response.text().await.unwrap_or_default();
        Err(ApiError::from_status(meta, &text))
    }

    /// Sends a request and returns the full response body.
    pub async fn execute_bytes(&self, request: Request) -> Result<(Vec<u8>, ApiResponse), ApiError> {
        let response = self.execute(request).await?;
        let meta = ApiResponse::from_response(&response);
        let bytes = response.bytes().await?;
        Ok((bytes.to_vec(), meta))
    }

    /// Sends a request and returns the body as text.
    pub async fn execute_text(&self, request: Request) -> Result<(String, ApiResponse), ApiError> {
        let response = self.execute(request).await?;
        let meta = ApiResponse::from_response(&response);
        let text = response.text().await?;
        Ok((text, meta))
    }

    /// Sends a request, drains and discards the body.
    pub async fn execute_empty(&self, request: Request) -> Result<ApiResponse, ApiError> {
        let response = self.execute(request).await?;
        let meta = ApiResponse::from_response(&response);
        response.bytes().await?;
        Ok(meta)
    }

    /// Sends a request and decodes the JSON body into `T`.
    ///
    /// # Errors
    ///
    /// Besides the errors of [`execute`](Self::execute), returns
    /// [`ApiError::Decode`] when the body does not decode into `T`. The status
    /// error always wins: a failed response is never decoded.
    pub async fn execute_decode<T: DeserializeOwned>(
        &self,
        request: Request,
    ) -> Result<(T, ApiResponse), ApiError> {
        let (body, meta) = self.execute_bytes(request).await?;

        match serde_json::from_slice(&body) {
            Ok(value) => Ok((value, meta)),
            Err(source) => Err(decode_error(meta, &body, source)),
        }
    }

    /// Sends a request whose JSON body may be a single `T` or an array of `T`.
    ///
    /// Both shapes are returned as a `Vec<T>`; see
    /// [`decode_one_or_many`](super::common::decode_one_or_many).
    pub async fn execute_one_or_many<T: DeserializeOwned>(
        &self,
        request: Request,
    ) -> Result<(Vec<T>, ApiResponse), ApiError> {
        let (body, meta) = self.execute_bytes(request).await?;

        match decode_one_or_many(&body) {
            Ok(values) => Ok((values, meta)),
            Err(source) => Err(decode_error(meta, &body, source)),
        }
    }
}

fn decode_error(response: ApiResponse, body: &[u8], source: serde_json::Error) -> ApiError {
    ApiError::Decode {
        response,
        snippet: snippet(&String::from_utf8_lossy(body)),
        source,
    }
}

/// True for a `..` segment, including its percent-encoded spellings.
fn is_dot_dot_segment(segment: &str) -> bool {
    let segment = segment.split(';').next().unwrap_or(segment);
    matches!(
        segment.to_ascii_lowercase().as_str(),
        ".." | ".%2e" | "%2e." | "%2e%2e"
    )
}

/// Parses a base URL and makes sure its path ends with exactly one `/`.
fn normalize_base_url(raw: &str) -> Result<Url, ApiError> {
    let invalid = |reason: String| ApiError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be a base".to_string()));
    }
    url.set_query(None);
    url.set_fragment(None);

    let path = format!("{}/", url.path().trim_end_matches('/'));
    url.set_path(&path);

    Ok(url)
}
