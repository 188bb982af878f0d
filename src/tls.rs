//! TLS and transport construction for the vSphere client.
//!
//! This module turns a [`ClientConfig`] into a `reqwest::Client`.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::config::{check_additional_header, ClientConfig, TrustAnchors};
use crate::error::{Result, VsphereError};

/// Build a reqwest Client with the appropriate TLS configuration.
pub fn build_http_client(config: &ClientConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().use_rustls_tls();

    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }

    // Configure TLS based on trust anchors
    match &config.trust_anchors {
        TrustAnchors::WebPki => {
            builder = builder.tls_built_in_root_certs(true);
        }
        TrustAnchors::Explicit(ca_certs) => {
            builder = builder.tls_built_in_root_certs(false);
            for ca_pem in ca_certs {
                for cert in parse_pem_certificates(ca_pem)? {
                    builder = builder.add_root_certificate(cert);
                }
            }
        }
        TrustAnchors::InsecureAcceptAny => {
            tracing::warn!(
                "TLS certificate verification disabled for {}",
                config.server_url
            );
            builder = builder
                .tls_built_in_root_certs(false)
                .danger_accept_invalid_certs(true);
        }
    }

    // Enforce minimum TLS version
    builder = builder.min_tls_version(reqwest::tls::Version::TLS_1_2);

    builder = builder.default_headers(build_default_headers(&config.additional_headers)?);

    builder
        .build()
        .map_err(|e| VsphereError::configuration(format!("Failed to build HTTP client: {}", e)))
}

/// Convert configured extra headers into a header map.
fn build_default_headers(headers: &[(String, String)]) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        check_additional_header(name)?;
        let name = HeaderName::try_from(name.as_str())
            .map_err(|e| VsphereError::configuration(format!("Invalid header name {name:?}: {e}")))?;
        let value = HeaderValue::try_from(value.as_str())
            .map_err(|e| VsphereError::configuration(format!("Invalid value for header {name}: {e}")))?;
        map.append(name, value);
    }
    Ok(map)
}

/// Parse every certificate in a PEM buffer.
///
/// # Errors
///
/// Returns [`VsphereError::Configuration`] if the buffer holds no certificate
/// or a certificate cannot be loaded.
pub fn parse_pem_certificates(pem_data: &[u8]) -> Result<Vec<reqwest::Certificate>> {
    let mut reader = std::io::BufReader::new(pem_data);
    let ders = rustls_pemfile::certs(&mut reader)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| VsphereError::configuration(format!("Failed to read PEM data: {}", e)))?;

    if ders.is_empty() {
        return Err(VsphereError::configuration(
            "No certificates found in PEM data",
        ));
    }

    ders.iter()
        .map(|der| {
            reqwest::Certificate::from_der(der.as_ref()).map_err(|e| {
                VsphereError::configuration(format!("Failed to parse CA certificate: {}", e))
            })
        })
        .collect()
}
