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

//! vCenter TLS Certificate Command-Line Tool
//!
//! Authenticates against a vCenter Server and manages its machine SSL
//! certificate. Results are printed as JSON on standard output.
//!
//! # Usage
//!
//! ```text
//! vsphere-tls [OPTIONS] [COMMAND]
//!
//! Commands:
//!   info   Show the current certificate (default)
//!   renew  Renew the certificate with a VMCA-signed one
//!   csr    Generate a certificate signing request
//!
//! Options:
//!   -H, --host <HOST>          vCenter hostname or URL (prompted if omitted)
//!   -u, --username <USER>      SSO username (prompted if omitted)
//!       --insecure             Skip TLS certificate verification
//!       --ca-cert <PATH>       Trust the CA certificates in this PEM file
//!       --timeout <SECS>       Request timeout in seconds
//!   -v, --verbose              Enable verbose output
//!   -q, --quiet                Suppress non-error output
//!   -h, --help                 Print help
//!   -V, --version              Print version
//! ```
//!
//! The password is always read from the terminal with echo disabled, or
//! from `VSPHERE_PASSWORD` when set.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use serde_json::json;
use vsphere_cert_client::{ClientConfig, TlsCsrSpec, VsphereClient};

/// vCenter TLS Certificate Command-Line Tool
#[derive(Parser)]
#[command(name = "vsphere-tls")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Manage the vCenter Server machine SSL certificate", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// vCenter hostname or URL
    #[arg(short = 'H', long, global = true, value_name = "HOST")]
    host: Option<String>,

    /// SSO username
    #[arg(short, long, global = true, value_name = "USER")]
    username: Option<String>,

    /// Skip TLS certificate verification (lab use only)
    #[arg(long, global = true)]
    insecure: bool,

    /// Trust the CA certificates in this PEM file
    #[arg(long, global = true, value_name = "PATH", conflicts_with = "insecure")]
    ca_cert: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current certificate
    Info,

    /// Renew the certificate with a VMCA-signed one
    Renew {
        /// Validity period in days (1-730)
        #[arg(short, long, default_value = "730", allow_negative_numbers = true)]
        duration: i64,
    },

    /// Generate a certificate signing request
    Csr {
        /// Subject Common Name
        #[arg(long, value_name = "CN")]
        common_name: String,

        /// Two-letter country code
        #[arg(long, default_value = "")]
        country: String,

        /// Contact email address
        #[arg(long, default_value = "")]
        email: String,

        /// RSA key size in bits
        #[arg(long, default_value = "2048")]
        key_size: u32,

        /// Locality (city)
        #[arg(long, default_value = "")]
        locality: String,

        /// Organization
        #[arg(long, default_value = "")]
        organization: String,

        /// Organizational unit
        #[arg(long, default_value = "")]
        organization_unit: String,

        /// State or province
        #[arg(long, default_value = "")]
        state: String,

        /// Subject Alternative Names (repeatable)
        #[arg(long = "san", value_name = "NAME")]
        san: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.quiet {
        tracing::Level::ERROR
    } else if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Create runtime for async operations
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let host = match cli.host.clone() {
        Some(host) => host,
        None => Input::<String>::new().with_prompt("Hostname").interact_text()?,
    };

    let mut builder = ClientConfig::builder()
        .server_url(server_url(&host))?
        .danger_accept_invalid_certs(cli.insecure);
    if let Some(ref path) = cli.ca_cert {
        builder = builder.trust_explicit(vec![std::fs::read(path)?]);
    }
    if let Some(secs) = cli.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let mut client = VsphereClient::with_config(builder.build()?)?;

    let username = match cli.username.clone() {
        Some(username) => username,
        None => Input::<String>::new().with_prompt("Username").interact_text()?,
    };
    let password = match std::env::var("VSPHERE_PASSWORD") {
        Ok(password) => password,
        Err(_) => Password::new().with_prompt("Password").interact()?,
    };

    client.authenticate(&username, &password).await?;

    let output = match cli.command.unwrap_or(Commands::Info) {
        Commands::Info => serde_json::to_value(client.get_tls().await?)?,
        Commands::Renew { duration } => {
            client.renew_tls(duration).await?;
            json!({ "renewed": true, "duration": duration })
        }
        Commands::Csr {
            common_name,
            country,
            email,
            key_size,
            locality,
            organization,
            organization_unit,
            state,
            san,
        } => {
            let mut spec = TlsCsrSpec::new(common_name)
                .country(country)
                .email_address(email)
                .key_size(key_size)
                .locality(locality)
                .organization(organization)
                .organization_unit(organization_unit)
                .state_or_province(state);
            spec.subject_alt_name = san;

            let csr = client.create_tls_csr(&spec).await?;
            json!({ "csr": csr })
        }
    };

    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

/// Hostnames get an `https://` scheme; full URLs are used as given.
fn server_url(host: &str) -> String {
    if host.contains("://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}
