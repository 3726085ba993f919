//! Admin session authentication
//!
//! Provides the two token endpoint calls (login and refresh) and the
//! file-backed credential store that holds the session between runs. This
//! crate has no knowledge of the request gateway; the gateway depends on it,
//! not the other way around.
//!
//! Session flow:
//! 1. Console calls `token::login()` with the admin's name and phone number
//! 2. Tokens and identity saved via `CredentialStore::store_login()`
//! 3. Gateway attaches `CredentialStore::access_token()` to every request
//! 4. On a 401 the gateway calls `token::refresh_token()` once
//! 5. Rotated tokens saved via `CredentialStore::store_tokens()`
//! 6. A failed refresh wipes everything via `CredentialStore::clear()`

pub mod constants;
pub mod credentials;
pub mod error;
pub mod token;

pub use constants::*;
pub use credentials::CredentialStore;
pub use error::{Error, Result};
pub use token::{LoginResponse, RefreshResponse, endpoint_url, login, refresh_token};
