//! Session creation (POST /api/session).

use base64::prelude::*;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Method, StatusCode};

use crate::client::{decode_json, VsphereClient};
use crate::error::{Result, VsphereError};
use crate::paths;

impl VsphereClient {
    /// Create a session with HTTP Basic credentials and store its token.
    ///
    /// The server answers `201 Created` with the token as a JSON string. On
    /// success the token replaces any previously held one; on failure the
    /// previous token is kept.
    ///
    /// No retry is performed.
    pub async fn authenticate(&mut self, username: &str, password: &str) -> Result<()> {
        let mut request = self.new_request(Method::POST, paths::SESSION, &[], None, false)?;
        request
            .headers_mut()
            .insert(AUTHORIZATION, basic_auth_value(username, password)?);

        let session_id: String = self
            .execute(request, StatusCode::CREATED, decode_json)
            .await?;

        tracing::debug!("Session established for {}", username);
        self.set_session_id(session_id);

        Ok(())
    }
}

/// Build an HTTP Basic `Authorization` header value.
pub fn basic_auth_value(username: &str, password: &str) -> Result<HeaderValue> {
    let credentials = BASE64_STANDARD.encode(format!("{}:{}", username, password));
    let mut value = HeaderValue::from_str(&format!("Basic {}", credentials))
        .map_err(|e| VsphereError::validation(format!("invalid credentials header: {e}")))?;
    value.set_sensitive(true);
    Ok(value)
}
