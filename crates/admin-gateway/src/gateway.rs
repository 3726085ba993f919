//! Request dispatch with bearer attachment and 401 recovery
//!
//! The gateway owns everything the refresh protocol needs: the HTTP client,
//! the shared credential store, the refresh coordinator, the fallback
//! authorization token and the navigator used on terminal failure. Callers
//! only see `execute`; a successful refresh is invisible to them.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use admin_auth::{CredentialStore, LOGIN_ROUTE, endpoint_url};
use common::Secret;
use reqwest::StatusCode;
use tracing::{debug, info, instrument, warn};

use crate::error::{Error, RefreshError, Result};
use crate::metrics;
use crate::navigator::Navigator;
use crate::refresh::{RefreshCoordinator, RefreshOutcome, Turn};
use crate::request::{ApiRequest, ApiResponse};

/// Backend connection settings.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL every request path is appended to
    pub base_url: String,
    /// Per-request timeout for resource calls
    pub timeout: Duration,
    /// Timeout for the refresh call; expiry counts as a failed refresh
    pub refresh_timeout: Duration,
}

/// Authenticated request gateway. Share it as `Arc<Gateway>`.
pub struct Gateway {
    client: reqwest::Client,
    config: GatewayConfig,
    store: Arc<CredentialStore>,
    navigator: Arc<dyn Navigator>,
    coordinator: RefreshCoordinator,
    /// Token from the last successful refresh, used when the store has none
    default_token: RwLock<Option<Secret<String>>>,
}

impl Gateway {
    pub fn new(
        client: reqwest::Client,
        config: GatewayConfig,
        store: Arc<CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        info!(base_url = %config.base_url, "gateway initialized");
        Self {
            client,
            config,
            store,
            navigator,
            coordinator: RefreshCoordinator::new(),
            default_token: RwLock::new(None),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn http_client(&self) -> &reqwest::Client {
        &self.client
    }

    pub fn credential_store(&self) -> &Arc<CredentialStore> {
        &self.store
    }

    pub fn refresh_in_flight(&self) -> bool {
        self.coordinator.in_flight()
    }

    /// Requests parked behind the in-flight refresh.
    pub fn refresh_waiters(&self) -> usize {
        self.coordinator.queued()
    }

    /// Send a request and return its successful response.
    ///
    /// Non-success statuses come back as `Error::Status`. A first 401 runs
    /// the refresh protocol and replays the request once with the new token.
    #[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4(), method = %request.method(), path = %request.path()))]
    pub async fn execute(&self, mut request: ApiRequest) -> Result<ApiResponse> {
        let credential = self.current_token().await;
        let response = self.dispatch(&request, credential.as_ref()).await?;

        if response.status() != StatusCode::UNAUTHORIZED || request.is_retried() {
            return into_result(response);
        }

        request.mark_retried();
        debug!("access token rejected");
        let token = self.recover(credential).await?;

        metrics::record_replay();
        debug!("replaying with refreshed token");
        let response = self.dispatch(&request, Some(&token)).await?;
        into_result(response)
    }

    /// Log out: drop the session from the store and forget the fallback token.
    pub async fn logout(&self) -> admin_auth::Result<()> {
        self.set_default_token(None);
        self.store.end_session().await
    }

    async fn current_token(&self) -> Option<Secret<String>> {
        match self.store.access_token().await {
            Some(token) => Some(token),
            None => self
                .default_token
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
        }
    }

    fn set_default_token(&self, token: Option<Secret<String>>) {
        *self
            .default_token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = token;
    }

    async fn dispatch(
        &self,
        request: &ApiRequest,
        token: Option<&Secret<String>>,
    ) -> Result<ApiResponse> {
        let mut builder = self
            .client
            .request(
                request.method().clone(),
                endpoint_url(&self.config.base_url, request.path()),
            )
            .headers(request.headers().clone())
            .timeout(self.config.timeout);

        if !request.query_pairs().is_empty() {
            builder = builder.query(request.query_pairs());
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token.expose());
        }
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::Http(format!("backend request failed: {e}")))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Http(format!("reading backend response: {e}")))?;

        metrics::record_request(status.as_u16());
        debug!(status = status.as_u16(), authenticated = token.is_some(), "backend responded");
        Ok(ApiResponse::new(status, body))
    }

    /// Obtain a token to replay with: wait on the in-flight refresh, or lead
    /// a new one.
    async fn recover(&self, sent_with: Option<Secret<String>>) -> Result<Secret<String>> {
        let lease = match self.coordinator.join() {
            Turn::Wait(pending) => return pending.outcome().await.map_err(Error::from),
            Turn::Lead(lease) => lease,
        };

        // A refresh may have finished between our dispatch and our 401
        if let Some(current) = self.store.access_token().await {
            let rotated = sent_with
                .as_ref()
                .is_none_or(|sent| sent.expose() != current.expose());
            if rotated {
                debug!("token rotated since dispatch, skipping refresh");
                metrics::record_refresh("skipped");
                lease.settle(&Ok(current.clone()));
                return Ok(current);
            }
        }

        let outcome = self.refresh().await;
        if let Err(e) = &outcome {
            metrics::record_refresh("failure");
            self.teardown(e).await;
        } else {
            metrics::record_refresh("success");
        }

        let released = lease.settle(&outcome);
        info!(released, success = outcome.is_ok(), "refresh settled");
        outcome.map_err(Error::from)
    }

    async fn refresh(&self) -> RefreshOutcome {
        let refresh = self
            .store
            .refresh_token()
            .await
            .ok_or(RefreshError::MissingRefreshToken)?;

        let tokens = admin_auth::refresh_token(
            &self.client,
            &self.config.base_url,
            refresh.expose(),
            self.config.refresh_timeout,
        )
        .await?;

        let access = Secret::new(tokens.access_token.clone());
        let rotated_refresh = tokens.refresh_token.is_some();
        if let Err(e) = self
            .store
            .store_tokens(tokens.access_token, tokens.refresh_token)
            .await
        {
            warn!(error = %e, "failed to persist refreshed tokens");
        }
        self.set_default_token(Some(access.clone()));

        info!(rotated_refresh, "access token refreshed");
        Ok(access)
    }

    /// Unrecoverable session: wipe the store, drop the fallback token and
    /// send the navigator to the login route.
    async fn teardown(&self, reason: &RefreshError) {
        warn!(error = %reason, "token refresh failed, ending session");
        if let Err(e) = self.store.clear().await {
            warn!(error = %e, "failed to clear credential store");
        }
        self.set_default_token(None);
        self.navigator.redirect(LOGIN_ROUTE);
    }
}

fn into_result(response: ApiResponse) -> Result<ApiResponse> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(Error::Status {
            status: response.status(),
            body: response.text(),
        })
    }
}
