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

//! # vsphere-cert-client
//!
//! A thin async client for the vCenter Server REST API covering session
//! authentication and the TLS certificate management endpoints.
//!
//! ## Features
//!
//! - **Session authentication** over HTTP Basic auth (`POST /api/session`)
//! - **Certificate info** for the vCenter machine SSL certificate
//! - **Certificate renewal** with a locally validated validity period
//! - **CSR generation** on the appliance
//! - **Explicit TLS trust** configuration, including an opt-in insecure mode
//!   for lab environments with self-signed certificates
//!
//! ## Quick Start
//!
//! ```no_run
//! use vsphere_cert_client::VsphereClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = VsphereClient::new("https://vcsa.example.com")?;
//!
//!     client
//!         .authenticate("administrator@vsphere.local", "secret")
//!         .await?;
//!
//!     let info = client.get_tls().await?;
//!     println!("Certificate valid until {}", info.valid_to);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Lab Environments
//!
//! ```no_run
//! use vsphere_cert_client::{ClientConfig, VsphereClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::builder()
//!     .server_url("https://vcsa.lab.local")?
//!     .trust_any_insecure() // For testing only!
//!     .build()?;
//!
//! let mut client = VsphereClient::with_config(config)?;
//! client.authenticate("administrator@vsphere.local", "secret").await?;
//! client.renew_tls(730).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Sessions
//!
//! A client holds exactly one session token. [`VsphereClient::authenticate`]
//! takes `&mut self`, so the borrow checker serializes token replacement
//! against in-flight calls on the same client. Callers that need several
//! concurrent sessions use one client per session.
//!
//! ## Cargo Features
//!
//! - `cli` (default): Builds the `vsphere-tls` command-line tool

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod operations;
pub mod tls;
pub mod types;

// Re-export main types at crate root for convenience
pub use client::VsphereClient;
pub use config::{ClientConfig, ClientConfigBuilder, TrustAnchors};
pub use error::{ErrorKind, Result, VsphereError};
pub use types::{ApiError, CertificateInfo, TlsCsr, TlsCsrSpec};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent string for HTTP requests.
pub const USER_AGENT: &str = concat!("vsphere-cert-client/", env!("CARGO_PKG_VERSION"));

/// Header carrying the session token on authenticated requests.
pub const SESSION_HEADER: &str = "vmware-api-session-id";

/// Content-Type stamped on every request.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// REST API paths, relative to the server base URL.
pub mod paths {
    /// Session creation.
    pub const SESSION: &str = "/api/session";

    /// vCenter machine SSL certificate.
    pub const VCENTER_TLS: &str = "/api/vcenter/certificate-management/vcenter/tls";

    /// Certificate signing request generation.
    pub const VCENTER_TLS_CSR: &str = "/api/vcenter/certificate-management/vcenter/tls-csr";
}
