//! Certificate management request and response bodies.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Machine SSL certificate of the vCenter Server.
///
/// Returned by `GET /api/vcenter/certificate-management/vcenter/tls`.
/// Every field is required; a body missing one is a decode error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateInfo {
    /// Authority Information Access URIs.
    pub authority_information_access_uri: Vec<String>,

    /// PEM-encoded certificate.
    pub cert: String,

    /// Extended key usage values.
    pub extended_key_usage: Vec<String>,

    /// Whether the certificate is a CA certificate.
    #[serde(rename = "is_CA")]
    pub is_ca: bool,

    /// Issuer distinguished name.
    pub issuer_dn: String,

    /// Key usage values.
    pub key_usage: Vec<String>,

    /// Basic constraints path length, `-1` when unconstrained.
    pub path_length_constraint: i32,

    /// Hex-encoded serial number.
    pub serial_number: String,

    /// Signature algorithm, e.g. `SHA256WITHRSA`.
    pub signature_algorithm: String,

    /// Subject alternative names.
    pub subject_alternative_name: Vec<String>,

    /// Subject distinguished name.
    pub subject_dn: String,

    /// SHA-1 thumbprint.
    pub thumbprint: String,

    /// Start of validity, `YYYY-MM-DDTHH:mm:ss.sssZ`.
    pub valid_from: String,

    /// End of validity, `YYYY-MM-DDTHH:mm:ss.sssZ`.
    pub valid_to: String,

    /// X.509 version.
    pub version: u32,
}

impl CertificateInfo {
    /// Parsed start of the validity window.
    pub fn valid_from_time(&self) -> Result<DateTime<Utc>, chrono::ParseError> {
        parse_timestamp(&self.valid_from)
    }

    /// Parsed end of the validity window.
    pub fn valid_to_time(&self) -> Result<DateTime<Utc>, chrono::ParseError> {
        parse_timestamp(&self.valid_to)
    }

    /// Returns true if `at` lies within the validity window.
    pub fn is_valid_at(&self, at: DateTime<Utc>) -> Result<bool, chrono::ParseError> {
        Ok(self.valid_from_time()? <= at && at <= self.valid_to_time()?)
    }

    /// Returns true if the certificate expires within `window` of `now`.
    pub fn expires_within(
        &self,
        window: Duration,
        now: DateTime<Utc>,
    ) -> Result<bool, chrono::ParseError> {
        Ok(self.valid_to_time()? - now <= window)
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value).map(|t| t.with_timezone(&Utc))
}

/// Parameters for `POST /api/vcenter/certificate-management/vcenter/tls-csr`.
///
/// The server validates field contents (supported key sizes, country codes).
///
/// # Example
///
/// ```
/// use vsphere_cert_client::TlsCsrSpec;
///
/// let spec = TlsCsrSpec::new("vcsa.api.lab")
///     .country("US")
///     .email_address("admin@example.com")
///     .key_size(2048)
///     .locality("Palo Alto")
///     .organization("VMware")
///     .organization_unit("VMware Engineering")
///     .state_or_province("California")
///     .subject_alt_name("vcsa.api.lab")
///     .subject_alt_name("192.168.0.160");
///
/// assert_eq!(spec.subject_alt_name.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsCsrSpec {
    /// Subject common name.
    pub common_name: String,

    /// Two-letter country code.
    pub country: String,

    /// Contact email address.
    pub email_address: String,

    /// RSA key size in bits.
    pub key_size: u32,

    /// Locality (city).
    pub locality: String,

    /// Organization.
    pub organization: String,

    /// Organizational unit.
    pub organization_unit: String,

    /// State or province.
    pub state_or_province: String,

    /// Subject alternative names.
    pub subject_alt_name: Vec<String>,
}

impl TlsCsrSpec {
    /// Default RSA key size.
    pub const DEFAULT_KEY_SIZE: u32 = 2048;

    /// Start a spec for the given common name.
    pub fn new(common_name: impl Into<String>) -> Self {
        Self {
            common_name: common_name.into(),
            country: String::new(),
            email_address: String::new(),
            key_size: Self::DEFAULT_KEY_SIZE,
            locality: String::new(),
            organization: String::new(),
            organization_unit: String::new(),
            state_or_province: String::new(),
            subject_alt_name: Vec::new(),
        }
    }

    /// Set the country code.
    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    /// Set the email address.
    pub fn email_address(mut self, email: impl Into<String>) -> Self {
        self.email_address = email.into();
        self
    }

    /// Set the RSA key size in bits.
    pub fn key_size(mut self, bits: u32) -> Self {
        self.key_size = bits;
        self
    }

    /// Set the locality.
    pub fn locality(mut self, locality: impl Into<String>) -> Self {
        self.locality = locality.into();
        self
    }

    /// Set the organization.
    pub fn organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = organization.into();
        self
    }

    /// Set the organizational unit.
    pub fn organization_unit(mut self, unit: impl Into<String>) -> Self {
        self.organization_unit = unit.into();
        self
    }

    /// Set the state or province.
    pub fn state_or_province(mut self, state: impl Into<String>) -> Self {
        self.state_or_province = state.into();
        self
    }

    /// Append a subject alternative name.
    pub fn subject_alt_name(mut self, name: impl Into<String>) -> Self {
        self.subject_alt_name.push(name.into());
        self
    }
}

/// Response body of the CSR generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsCsr {
    /// PEM-encoded certificate signing request.
    pub csr: String,
}

/// Body of the renew call.
#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct RenewSpec {
    pub duration: i64,
}
