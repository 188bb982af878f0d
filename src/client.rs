//! vSphere client implementation.
//!
//! This module provides the [`VsphereClient`] struct and the request
//! pipeline shared by every API operation: build the request, attach the
//! session, dispatch it, then branch on the status code to decode either
//! the expected body or the structured [`ApiError`].

use reqwest::header::{HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::{parse_server_url, ClientConfig};
use crate::error::{Result, VsphereError};
use crate::tls::build_http_client;
use crate::types::ApiError;

/// Decoder for a successful response body.
pub(crate) type BodyDecoder<T> = fn(&[u8]) -> Result<T>;

/// Client for the vSphere certificate management API.
///
/// A client is bound to one server and holds one session token. The token
/// is empty until [`authenticate`](Self::authenticate) succeeds and is then
/// sent on every authenticated request.
///
/// # Example
///
/// ```no_run
/// use vsphere_cert_client::VsphereClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut client = VsphereClient::new("https://vcsa.example.com")?;
/// client.authenticate("administrator@vsphere.local", "secret").await?;
///
/// let info = client.get_tls().await?;
/// println!("{} expires {}", info.subject_dn, info.valid_to);
/// # Ok(())
/// # }
/// ```
pub struct VsphereClient {
    config: ClientConfig,
    http: reqwest::Client,
    session_id: String,
}

impl std::fmt::Debug for VsphereClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VsphereClient")
            .field("config", &self.config)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl VsphereClient {
    /// Create a client for `url` with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`VsphereError::Configuration`] if the URL is malformed.
    pub fn new(url: &str) -> Result<Self> {
        let config = ClientConfig::builder()
            .server_url_parsed(parse_server_url(url)?)
            .build()?;
        Self::with_config(config)
    }

    /// Create a client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`VsphereError::Configuration`] if TLS configuration fails.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let http = build_http_client(&config)?;
        Ok(Self::with_http_client(config, http))
    }

    /// Create a client that dispatches through a caller-built transport.
    ///
    /// TLS and timeout settings of `config` are ignored; those of `http` apply.
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Self {
        Self {
            config,
            http,
            session_id: String::new(),
        }
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The current session token, empty when unauthenticated.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Replace the session token, e.g. with one obtained elsewhere.
    pub fn set_session_id(&mut self, session_id: impl Into<String>) {
        self.session_id = session_id.into();
    }

    /// Forget the session token locally. The server-side session stays alive.
    pub fn clear_session(&mut self) {
        self.session_id.clear();
    }

    /// Returns true if a session token is held.
    ///
    /// The token may still have expired on the server.
    pub fn is_authenticated(&self) -> bool {
        !self.session_id.is_empty()
    }

    /// Build a request for `path` without sending it.
    ///
    /// Every request carries `Content-Type: application/json` and the client
    /// User-Agent. With `use_session_id` the session header is attached,
    /// with an empty value if no session is held.
    ///
    /// # Errors
    ///
    /// Returns [`VsphereError::Validation`] if the held token is not a legal
    /// header value.
    pub fn new_request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<Vec<u8>>,
        use_session_id: bool,
    ) -> Result<reqwest::Request> {
        let url = self.config.build_url(path, query);
        let mut request = reqwest::Request::new(method, url);

        let headers = request.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(crate::CONTENT_TYPE_JSON));
        headers.insert(USER_AGENT, HeaderValue::from_static(crate::USER_AGENT));

        if use_session_id {
            let mut value = HeaderValue::from_str(&self.session_id).map_err(|_| {
                VsphereError::validation("session token is not a valid header value")
            })?;
            value.set_sensitive(true);
            headers.insert(crate::SESSION_HEADER, value);
        }

        if let Some(body) = body {
            *request.body_mut() = Some(body.into());
        }

        Ok(request)
    }

    /// Build an authenticated request with an optional JSON body.
    pub(crate) fn new_json_request<B: serde::Serialize>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<reqwest::Request> {
        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| VsphereError::validation(format!("failed to encode request body: {e}")))?;
        self.new_request(method, path, query, body, true)
    }

    /// Dispatch `request` and decode the response.
    ///
    /// A response with status `expected` is handed to `decode`; any other
    /// status is decoded as an [`ApiError`].
    pub(crate) async fn execute<T>(
        &self,
        request: reqwest::Request,
        expected: StatusCode,
        decode: BodyDecoder<T>,
    ) -> Result<T> {
        tracing::debug!("{} {}", request.method(), request.url());

        let response = self.http.execute(request).await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status != expected {
            tracing::debug!("Unexpected status {} (expected {})", status, expected);
            return Err(decode_api_error(status, &body));
        }

        decode(&body)
    }
}

/// Decode a JSON response body.
pub(crate) fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(body)?)
}

/// Accept any body; used for responses without content.
pub(crate) fn discard_body(_body: &[u8]) -> Result<()> {
    Ok(())
}

/// Turn an error response into [`VsphereError::Api`], or a decode error if
/// the body is not an [`ApiError`].
pub(crate) fn decode_api_error(status: StatusCode, body: &[u8]) -> VsphereError {
    match serde_json::from_slice::<ApiError>(body) {
        Ok(error) => VsphereError::api(status, error),
        Err(e) => VsphereError::Decode(e),
    }
}
