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

//! End-to-end workflow tests: authenticate, inspect, renew

use crate::integration::{fixtures, MockVsphereServer, SSO_PASS, SSO_USER};
use vsphere_cert_client::paths;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_authenticate_inspect_renew() {
    let mock = MockVsphereServer::start().await;
    mock.mock_session(SSO_USER, SSO_PASS, "abc123").await;
    mock.mock_get_tls("abc123", &fixtures::tls_info()).await;
    mock.mock_renew("abc123", 1).await;

    let mut client = mock.client();

    client
        .authenticate(SSO_USER, SSO_PASS)
        .await
        .expect("Authentication should succeed");
    assert_eq!(client.session_id(), "abc123");

    let info = client.get_tls().await.expect("Certificate info");
    assert_eq!(info.valid_from, "2021-09-30T11:22:42.000Z");

    client.renew_tls(730).await.expect("Renewal should succeed");

    // Renewal does not rotate the session in-process
    assert_eq!(client.session_id(), "abc123");
    assert_eq!(mock.requests().await.len(), 3);
}

#[tokio::test]
async fn test_reauthenticate_after_services_restart() {
    let mock = MockVsphereServer::start().await;
    mock.mock_session(SSO_USER, SSO_PASS, "fresh-token").await;
    mock.mock_get_tls("fresh-token", &fixtures::tls_info()).await;

    // The session from before the restart is no longer accepted
    let mut client = mock.client_with_session("pre-restart-token");
    let err = client.get_tls().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(client.session_id(), "pre-restart-token");

    client.authenticate(SSO_USER, SSO_PASS).await.unwrap();
    assert!(client.get_tls().await.is_ok());
}

#[tokio::test]
async fn test_one_client_per_session() {
    let mock = MockVsphereServer::start().await;
    Mock::given(method("GET"))
        .and(path(paths::VCENTER_TLS))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::tls_info()))
        .expect(2)
        .mount(mock.inner())
        .await;

    let first = mock.client_with_session("session-a");
    let second = mock.client_with_session("session-b");

    let (a, b) = tokio::join!(first.get_tls(), second.get_tls());
    assert!(a.is_ok() && b.is_ok());

    let mut seen: Vec<String> = mock
        .requests()
        .await
        .iter()
        .filter_map(|r| r.headers.get(vsphere_cert_client::SESSION_HEADER))
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    seen.sort();
    assert_eq!(seen, vec!["session-a", "session-b"]);
}
