// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 U.S. Federal Government (in countries where recognized)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Configuration types for the vSphere client.
//!
//! This module provides configuration structures for setting up a client,
//! including the server URL, TLS trust settings and transport options.

use std::time::Duration;
use url::Url;

use crate::error::{Result, VsphereError};

/// Configuration for a vSphere client.
#[derive(Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "https://vcsa.example.com").
    ///
    /// API paths are joined onto this URL's existing path.
    pub server_url: Url,

    /// Trust anchor configuration for server certificate verification.
    pub trust_anchors: TrustAnchors,

    /// Request timeout. `None` leaves the exchange unbounded.
    pub timeout: Option<Duration>,

    /// Additional HTTP headers to include in requests.
    pub additional_headers: Vec<(String, String)>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("server_url", &self.server_url.as_str())
            .field("trust_anchors", &self.trust_anchors)
            .field("timeout", &self.timeout)
            .field("additional_headers", &self.additional_headers.len())
            .finish()
    }
}

impl ClientConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Build the URL for an API path.
    ///
    /// `path` is joined onto the base URL's path, and `query` replaces any
    /// query the base URL carried.
    pub fn build_url(&self, path: &str, query: &[(&str, &str)]) -> Url {
        let mut url = self.server_url.clone();

        url.set_path(&join_path(self.server_url.path(), path));
        url.set_query(None);
        url.set_fragment(None);

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url
    }
}

/// Parse and check a server base URL.
pub fn parse_server_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url)
        .map_err(|e| VsphereError::configuration(format!("failed to parse URL {url:?}: {e}")))?;
    check_server_url(parsed)
}

fn check_server_url(url: Url) -> Result<Url> {
    if url.cannot_be_a_base() {
        return Err(VsphereError::configuration(format!(
            "URL {:?} cannot be used as a base URL",
            url.as_str()
        )));
    }
    match url.scheme() {
        "https" | "http" => {}
        other => {
            return Err(VsphereError::configuration(format!(
                "unsupported URL scheme {other:?}"
            )))
        }
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(VsphereError::configuration(format!(
            "URL {:?} has no host",
            url.as_str()
        )));
    }
    // Credentials go through `authenticate`; userinfo would end up in logs.
    if !url.username().is_empty() || url.password().is_some() {
        return Err(VsphereError::configuration(
            "server URL must not carry credentials",
        ));
    }
    Ok(url)
}

/// Reject additional headers that would override per-request auth headers.
pub(crate) fn check_additional_header(name: &str) -> Result<()> {
    if name.eq_ignore_ascii_case(crate::SESSION_HEADER)
        || name.eq_ignore_ascii_case("authorization")
    {
        return Err(VsphereError::configuration(format!(
            "header {name:?} is managed by the client and cannot be added"
        )));
    }
    Ok(())
}

/// Join `path` onto `base`, collapsing `//`, dropping `.` and resolving `..`.
///
/// The result is always absolute and never ends with `/` (except the root).
pub fn join_path(base: &str, path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in base.split('/').chain(path.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    format!("/{}", segments.join("/"))
}

/// Builder for [`ClientConfig`].
#[derive(Default)]
pub struct ClientConfigBuilder {
    server_url: Option<Url>,
    trust_anchors: Option<TrustAnchors>,
    timeout: Option<Duration>,
    additional_headers: Vec<(String, String)>,
}

impl ClientConfigBuilder {
    /// Create a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the server URL.
    ///
    /// # Errors
    ///
    /// Returns [`VsphereError::Configuration`] if the URL is not an absolute
    /// `http`/`https` URL.
    pub fn server_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.server_url = Some(parse_server_url(url.as_ref())?);
        Ok(self)
    }

    /// Set the server URL from a pre-parsed URL.
    ///
    /// The URL is checked in [`build`](Self::build).
    pub fn server_url_parsed(mut self, url: Url) -> Self {
        self.server_url = Some(url);
        self
    }

    /// Use the built-in root CA store for server verification.
    pub fn trust_webpki_roots(mut self) -> Self {
        self.trust_anchors = Some(TrustAnchors::WebPki);
        self
    }

    /// Use explicit CA certificates (PEM) for server verification.
    ///
    /// Each entry may hold a bundle of several certificates.
    pub fn trust_explicit(mut self, ca_certs: Vec<Vec<u8>>) -> Self {
        self.trust_anchors = Some(TrustAnchors::Explicit(ca_certs));
        self
    }

    /// Accept any server certificate (insecure, for lab use only).
    pub fn trust_any_insecure(mut self) -> Self {
        self.trust_anchors = Some(TrustAnchors::InsecureAcceptAny);
        self
    }

    /// Disable server certificate verification when `skip` is true.
    pub fn danger_accept_invalid_certs(self, skip: bool) -> Self {
        if skip {
            self.trust_any_insecure()
        } else {
            self
        }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Add an additional HTTP header to all requests.
    pub fn add_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_headers.push((name.into(), value.into()));
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`VsphereError::Configuration`] if the server URL is missing
    /// or unusable, or if an additional header names the session or
    /// `Authorization` header.
    pub fn build(self) -> Result<ClientConfig> {
        let server_url = self
            .server_url
            .ok_or_else(|| VsphereError::configuration("server_url is required"))?;
        for (name, _) in &self.additional_headers {
            check_additional_header(name)?;
        }

        Ok(ClientConfig {
            server_url: check_server_url(server_url)?,
            trust_anchors: self.trust_anchors.unwrap_or(TrustAnchors::WebPki),
            timeout: self.timeout,
            additional_headers: self.additional_headers,
        })
    }
}

/// Trust anchor configuration for server certificate verification.
#[derive(Clone, Default)]
pub enum TrustAnchors {
    /// Use the built-in root CA store.
    #[default]
    WebPki,

    /// Use explicit CA certificates (PEM-encoded), e.g. the VMCA root.
    Explicit(Vec<Vec<u8>>),

    /// Accept any server certificate (insecure, for lab use only).
    ///
    /// **WARNING**: This disables all server certificate verification.
    InsecureAcceptAny,
}

impl TrustAnchors {
    /// Returns true if server certificates are not verified.
    pub fn is_insecure(&self) -> bool {
        matches!(self, Self::InsecureAcceptAny)
    }
}

impl std::fmt::Debug for TrustAnchors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WebPki => write!(f, "WebPki"),
            Self::Explicit(certs) => write!(f, "Explicit({} certs)", certs.len()),
            Self::InsecureAcceptAny => write!(f, "InsecureAcceptAny"),
        }
    }
}
