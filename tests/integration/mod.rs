//! Integration test utilities and helpers
//!
//! This module provides the mock vCenter Server used by the integration
//! tests, along with fixtures and request inspection helpers.

#![allow(dead_code)]

use serde_json::{json, Value};
use vsphere_cert_client::{paths, VsphereClient, SESSION_HEADER};
use wiremock::matchers::{basic_auth, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const SSO_USER: &str = "administrator@vsphere.local";
pub const SSO_PASS: &str = "VMware1!";
pub const SESSION_ID: &str = "bc9c22db3ada2cb3c4726effd93e042b";

/// Mock vCenter Server builder for integration tests
pub struct MockVsphereServer {
    server: MockServer,
}

impl MockVsphereServer {
    /// Create a new mock server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Get the base URL of the mock server
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Get a reference to the inner MockServer for custom mocking
    pub fn inner(&self) -> &MockServer {
        &self.server
    }

    /// Create an unauthenticated client bound to this server
    pub fn client(&self) -> VsphereClient {
        VsphereClient::new(&self.url()).expect("Client creation failed")
    }

    /// Create a client already holding `session_id`
    pub fn client_with_session(&self, session_id: &str) -> VsphereClient {
        let mut client = self.client();
        client.set_session_id(session_id);
        client
    }

    /// Mock session creation: 201 with `token` for the given credentials,
    /// 401 for anything else
    pub async fn mock_session(&self, username: &str, password: &str, token: &str) {
        Mock::given(method("POST"))
            .and(path(paths::SESSION))
            .and(basic_auth(username, password))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!(token)))
            .mount(&self.server)
            .await;

        self.mock_unauthenticated("POST", paths::SESSION).await;
    }

    /// Mock certificate info retrieval for `session_id`
    pub async fn mock_get_tls(&self, session_id: &str, body: &Value) {
        Mock::given(method("GET"))
            .and(path(paths::VCENTER_TLS))
            .and(header(SESSION_HEADER, session_id))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;

        self.mock_unauthenticated("GET", paths::VCENTER_TLS).await;
    }

    /// Mock certificate renewal for `session_id`, expecting `calls` requests
    pub async fn mock_renew(&self, session_id: &str, calls: u64) {
        Mock::given(method("POST"))
            .and(path(paths::VCENTER_TLS))
            .and(query_param("action", "renew"))
            .and(header(SESSION_HEADER, session_id))
            .respond_with(ResponseTemplate::new(204))
            .expect(calls)
            .mount(&self.server)
            .await;

        self.mock_unauthenticated("POST", paths::VCENTER_TLS).await;
    }

    /// Mock CSR generation for `session_id`
    pub async fn mock_create_csr(&self, session_id: &str, csr: &str) {
        Mock::given(method("POST"))
            .and(path(paths::VCENTER_TLS_CSR))
            .and(header(SESSION_HEADER, session_id))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "csr": csr })))
            .mount(&self.server)
            .await;

        self.mock_unauthenticated("POST", paths::VCENTER_TLS_CSR).await;
    }

    /// Mock a 401 with the vSphere UNAUTHENTICATED body.
    ///
    /// Mounted after the success mocks so it only catches unmatched requests.
    pub async fn mock_unauthenticated(&self, http_method: &str, api_path: &str) {
        Mock::given(method(http_method))
            .and(path(api_path))
            .respond_with(ResponseTemplate::new(401).set_body_json(fixtures::unauthenticated()))
            .mount(&self.server)
            .await;
    }

    /// Mock an arbitrary status with a raw body
    pub async fn mock_raw(&self, http_method: &str, api_path: &str, status: u16, body: &str) {
        Mock::given(method(http_method))
            .and(path(api_path))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_string(body)
                    .insert_header("Content-Type", "application/json"),
            )
            .mount(&self.server)
            .await;
    }

    /// All requests received so far
    pub async fn requests(&self) -> Vec<Request> {
        self.server
            .received_requests()
            .await
            .expect("Request recording is enabled")
    }
}

/// Test fixture helpers
pub mod fixtures {
    use super::*;

    /// Certificate info as returned by a vCenter Server 7.0 appliance
    pub fn tls_info() -> Value {
        json!({
            "authority_information_access_uri": [
                "URIName: https://vcsa.api.lab/afd/vecs/ca"
            ],
            "cert": "-----BEGIN CERTIFICATE-----\nMIIDxDCCAqygAwIBAgIJAOoCufh9g22QMA0GCSqGSIb3DQEBCwUAMIGTMQswCQYD\nVQQDDAJDQTEXMBUGCgmSJomT8ixkARkWB3ZzcGhlcmUxFTATBgoJkiaJk/IsZAEZ\nmfkQ3qkd4ME=\n-----END CERTIFICATE-----",
            "extended_key_usage": [""],
            "is_CA": false,
            "issuer_dn": "OU=VMware Engineering, O=vcsa.api.lab, ST=California, C=US, DC=local, DC=vsphere, CN=CA",
            "key_usage": ["digitalSignature", "keyEncipherment", "keyAgreement"],
            "path_length_constraint": -1,
            "serial_number": "ea02b9f87d836d90",
            "signature_algorithm": "SHA256WITHRSA",
            "subject_alternative_name": ["vcsa.api.lab"],
            "subject_dn": "C=US, CN=vcsa.api.lab",
            "thumbprint": "87CA0701ACBB2E43F52C25512151A323228AEDD5",
            "valid_from": "2021-09-30T11:22:42.000Z",
            "valid_to": "2023-09-30T11:22:42.000Z",
            "version": 3
        })
    }

    /// Body of a 401 response
    pub fn unauthenticated() -> Value {
        json!({
            "error_type": "UNAUTHENTICATED",
            "messages": [{
                "args": [],
                "default_message": "Authentication required.",
                "id": "com.vmware.vapi.endpoint.method.authentication.required"
            }]
        })
    }

    /// Body of a 400 response for an unsupported key size
    pub fn invalid_argument() -> Value {
        json!({
            "error_type": "INVALID_ARGUMENT",
            "messages": [{
                "args": ["1000"],
                "default_message": "Key size 1000 is not supported.",
                "id": "com.vmware.vcenter.certificate_management.keysize"
            }],
            "data": { "supported": [2048, 3072, 4096] }
        })
    }

    /// A PEM-shaped CSR
    pub const CSR_PEM: &str = "-----BEGIN CERTIFICATE REQUEST-----\nMIIC2DCCAcACAQAwJDEVMBMGA1UEAwwMdmNzYS5hcGkubGFi\n-----END CERTIFICATE REQUEST-----";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_server_starts() {
        let mock_server = MockVsphereServer::start().await;
        assert!(mock_server.url().starts_with("http://"));
    }
}
