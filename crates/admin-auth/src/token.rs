//! Login and token refresh calls
//!
//! Both calls POST JSON to the backend and go straight through `reqwest`,
//! never through the gateway: a 401 from the refresh endpoint must not
//! trigger another refresh.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::constants::{LOGIN_PATH, REFRESH_PATH};
use crate::error::{Error, Result};

/// Join a backend base URL and an absolute path.
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    name: &'a str,
    phone_no: &'a str,
}

/// Successful login body: the initial credential pair plus identity fields.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default, deserialize_with = "stringish")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "stringish")]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Successful refresh body.
///
/// The backend may omit `refreshToken`, in which case the stored refresh
/// token stays in place.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Identity fields come back as strings or numbers depending on the backend
/// build; both are stored as strings.
fn stringish<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Log in as an administrator and obtain the initial credential pair.
///
/// A non-success response is reported with the server's `message` field
/// when it has one, otherwise with a generic "Login failed".
pub async fn login(
    client: &reqwest::Client,
    base_url: &str,
    name: &str,
    phone_no: &str,
    timeout: Duration,
) -> Result<LoginResponse> {
    let response = client
        .post(endpoint_url(base_url, LOGIN_PATH))
        .json(&LoginRequest { name, phone_no })
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| Error::Http(format!("login request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        debug!(%status, "login rejected");
        return Err(Error::Login(server_message(&body)));
    }

    response
        .json::<LoginResponse>()
        .await
        .map_err(|e| Error::Login(format!("invalid login response: {e}")))
}

/// Exchange the refresh token for a new access token.
///
/// 401/403 map to `InvalidCredentials` (revoked or expired refresh token);
/// any other non-success status maps to `Refresh`.
pub async fn refresh_token(
    client: &reqwest::Client,
    base_url: &str,
    refresh: &str,
    timeout: Duration,
) -> Result<RefreshResponse> {
    let response = client
        .post(endpoint_url(base_url, REFRESH_PATH))
        .json(&RefreshRequest {
            refresh_token: refresh,
        })
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| Error::Http(format!("token refresh request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("<no body>"));

        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(Error::InvalidCredentials(format!(
                "refresh token rejected ({status}): {body}"
            )));
        }

        return Err(Error::Refresh(format!(
            "refresh endpoint returned {status}: {body}"
        )));
    }

    response
        .json::<RefreshResponse>()
        .await
        .map_err(|e| Error::Refresh(format!("invalid refresh response: {e}")))
}

fn server_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_owned))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| String::from("Login failed"))
}
