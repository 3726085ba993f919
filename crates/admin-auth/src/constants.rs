//! Backend paths and credential store keys
//!
//! The key names match what the backend's web dashboard keeps in browser
//! storage, so a session file can be inspected side by side with it.

/// Admin login endpoint (relative to the backend base URL)
pub const LOGIN_PATH: &str = "/AdminPrivileges/login-as-admin";

/// Token refresh endpoint (relative to the backend base URL)
pub const REFRESH_PATH: &str = "/auth/refresh";

/// Where the navigator is sent when the session cannot be recovered
pub const LOGIN_ROUTE: &str = "/login";

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const ROLE_KEY: &str = "role";
pub const USER_ID_KEY: &str = "userId";

/// Remembered login name, only written when "remember me" is requested
pub const SAVED_NAME_KEY: &str = "savedName";
/// Remembered login phone number, only written when "remember me" is requested
pub const SAVED_PHONE_KEY: &str = "savedPhoneNo";

/// Keys removed by an explicit logout. The remembered login survives.
pub const SESSION_KEYS: &[&str] = &[ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, ROLE_KEY, USER_ID_KEY];
