//! Session credential storage
//!
//! A flat JSON object of fixed keys (`accessToken`, `refreshToken`, `role`,
//! `userId`, `savedName`, `savedPhoneNo`) persisted to one file. Every write
//! goes to a temp file that is renamed over the target, and a tokio Mutex
//! serializes writers, so a token pair is never observed half-updated.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use common::Secret;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::constants::{
    ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, ROLE_KEY, SAVED_NAME_KEY, SAVED_PHONE_KEY, SESSION_KEYS,
    USER_ID_KEY,
};
use crate::error::{Error, Result};
use crate::token::LoginResponse;

type Entries = BTreeMap<String, String>;

/// Process-wide credential store shared by the gateway and the console.
pub struct CredentialStore {
    path: PathBuf,
    state: Mutex<Entries>,
}

impl CredentialStore {
    /// Load the session file at `path`.
    ///
    /// A missing file is a logged-out session: the store starts empty and an
    /// empty `{}` file is written so later loads take the normal path.
    pub async fn load(path: PathBuf) -> Result<Self> {
        let state = if path.exists() {
            let contents = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| Error::Io(format!("reading session file: {e}")))?;
            let entries: Entries = serde_json::from_str(&contents)
                .map_err(|e| Error::CredentialParse(format!("parsing session file: {e}")))?;
            info!(path = %path.display(), keys = entries.len(), "loaded session");
            entries
        } else {
            info!(path = %path.display(), "session file not found, starting logged out");
            let entries = Entries::new();
            write_atomic(&path, &entries).await?;
            entries
        };

        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    /// Raw value for a key. Empty strings read as absent.
    pub async fn get(&self, key: &str) -> Option<String> {
        let state = self.state.lock().await;
        state.get(key).filter(|v| !v.is_empty()).cloned()
    }

    /// Current access token, if any.
    pub async fn access_token(&self) -> Option<Secret<String>> {
        self.get(ACCESS_TOKEN_KEY).await.map(Secret::new)
    }

    /// Current refresh token, if any.
    pub async fn refresh_token(&self) -> Option<Secret<String>> {
        self.get(REFRESH_TOKEN_KEY).await.map(Secret::new)
    }

    /// Write a refreshed token pair.
    ///
    /// `refresh` only replaces the stored refresh token when it is present
    /// and non-empty.
    pub async fn store_tokens(&self, access: String, refresh: Option<String>) -> Result<()> {
        let mut state = self.state.lock().await;
        state.insert(ACCESS_TOKEN_KEY.into(), access);
        if let Some(refresh) = refresh.filter(|r| !r.is_empty()) {
            state.insert(REFRESH_TOKEN_KEY.into(), refresh);
        }
        debug!("stored refreshed tokens");
        write_atomic(&self.path, &state).await
    }

    /// Write the credential pair and identity returned by a login.
    pub async fn store_login(&self, login: &LoginResponse) -> Result<()> {
        let mut state = self.state.lock().await;
        state.insert(ACCESS_TOKEN_KEY.into(), login.access_token.clone());
        state.insert(REFRESH_TOKEN_KEY.into(), login.refresh_token.clone());
        for (key, value) in [(ROLE_KEY, &login.role), (USER_ID_KEY, &login.user_id)] {
            match value {
                Some(v) => state.insert(key.into(), v.clone()),
                None => state.remove(key),
            };
        }
        debug!("stored login session");
        write_atomic(&self.path, &state).await
    }

    /// Remember the login name and phone number for the next login.
    pub async fn remember_login(&self, name: &str, phone_no: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        state.insert(SAVED_NAME_KEY.into(), name.to_owned());
        state.insert(SAVED_PHONE_KEY.into(), phone_no.to_owned());
        write_atomic(&self.path, &state).await
    }

    /// Forget any remembered login.
    pub async fn forget_login(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        let removed_name = state.remove(SAVED_NAME_KEY).is_some();
        let removed_phone = state.remove(SAVED_PHONE_KEY).is_some();
        if removed_name || removed_phone {
            write_atomic(&self.path, &state).await?;
        }
        Ok(())
    }

    /// Remembered `(name, phone)` pair, only when both are present.
    pub async fn saved_login(&self) -> Option<(String, String)> {
        let name = self.get(SAVED_NAME_KEY).await?;
        let phone = self.get(SAVED_PHONE_KEY).await?;
        Some((name, phone))
    }

    /// Role and user id stored by the last login.
    pub async fn identity(&self) -> (Option<String>, Option<String>) {
        (self.get(ROLE_KEY).await, self.get(USER_ID_KEY).await)
    }

    /// Explicit logout: drop tokens and identity, keep the remembered login.
    pub async fn end_session(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        for key in SESSION_KEYS {
            state.remove(*key);
        }
        info!("session ended");
        write_atomic(&self.path, &state).await
    }

    /// Wipe every stored field. Used when the session cannot be recovered.
    pub async fn clear(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        state.clear();
        info!("credential store cleared");
        write_atomic(&self.path, &state).await
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.state.lock().await.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Persist `data` to `path` via temp file + rename, with 0600 permissions
/// on unix since the file holds bearer tokens.
async fn write_atomic(path: &Path, data: &Entries) -> Result<()> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| Error::CredentialParse(format!("serializing session: {e}")))?;

    let dir = path
        .parent()
        .ok_or_else(|| Error::Io("session path has no parent directory".into()))?;

    let tmp_path = dir.join(format!(".session.tmp.{}", std::process::id()));

    tokio::fs::write(&tmp_path, json.as_bytes())
        .await
        .map_err(|e| Error::Io(format!("writing temp session file: {e}")))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))
            .await
            .map_err(|e| Error::Io(format!("setting session file permissions: {e}")))?;
    }

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| Error::Io(format!("renaming temp session file: {e}")))?;

    debug!(path = %path.display(), "persisted session");
    Ok(())
}
