//! vCenter machine SSL certificate operations.
//!
//! - `GET  /api/vcenter/certificate-management/vcenter/tls` (200)
//! - `POST /api/vcenter/certificate-management/vcenter/tls?action=renew` (204)
//! - `POST /api/vcenter/certificate-management/vcenter/tls-csr` (201)
//!
//! All three require a session. Without one the server answers 401, which
//! surfaces as [`VsphereError::Api`].

use reqwest::{Method, StatusCode};

use crate::client::{decode_json, discard_body, VsphereClient};
use crate::error::{Result, VsphereError};
use crate::paths;
use crate::types::{CertificateInfo, RenewSpec, TlsCsr, TlsCsrSpec};

/// Longest validity period, in days, accepted for a renewed certificate.
pub const MAX_RENEW_DURATION_DAYS: i64 = 730;

impl VsphereClient {
    /// Retrieve the current vCenter machine SSL certificate.
    pub async fn get_tls(&self) -> Result<CertificateInfo> {
        let request = self.new_request(Method::GET, paths::VCENTER_TLS, &[], None, true)?;
        self.execute(request, StatusCode::OK, decode_json).await
    }

    /// Renew the machine SSL certificate with a VMCA-signed one.
    ///
    /// `duration` is the validity period in days and must lie in
    /// `1..=730`; other values fail before any request is sent.
    ///
    /// The appliance restarts its services after renewal, which eventually
    /// invalidates existing sessions. Subsequent calls fail until the caller
    /// authenticates again.
    pub async fn renew_tls(&self, duration: i64) -> Result<()> {
        validate_renew_duration(duration)?;

        let request = self.new_json_request(
            Method::POST,
            paths::VCENTER_TLS,
            &[("action", "renew")],
            Some(&RenewSpec { duration }),
        )?;
        self.execute(request, StatusCode::NO_CONTENT, discard_body)
            .await?;

        tracing::info!("Certificate renewal requested for {} days", duration);
        Ok(())
    }

    /// Generate a certificate signing request on the appliance.
    ///
    /// Returns the PEM-encoded CSR. Field contents are validated by the
    /// server.
    pub async fn create_tls_csr(&self, spec: &TlsCsrSpec) -> Result<String> {
        let request =
            self.new_json_request(Method::POST, paths::VCENTER_TLS_CSR, &[], Some(spec))?;
        let csr: TlsCsr = self
            .execute(request, StatusCode::CREATED, decode_json)
            .await?;
        Ok(csr.csr)
    }
}

/// Check a renewal validity period, in days.
///
/// # Errors
///
/// Returns [`VsphereError::Validation`] unless `1 <= duration <= 730`.
pub fn validate_renew_duration(duration: i64) -> Result<()> {
    if duration <= 0 {
        return Err(VsphereError::validation(format!(
            "duration must be greater than 0, got {duration}"
        )));
    }
    if duration > MAX_RENEW_DURATION_DAYS {
        return Err(VsphereError::validation(format!(
            "duration must be at most {MAX_RENEW_DURATION_DAYS} days, got {duration}"
        )));
    }
    Ok(())
}
