//! Authenticated request gateway for the marketplace admin backend
//!
//! Every backend call goes through [`Gateway::execute`], which attaches the
//! current bearer token and recovers from an expired access token with one
//! coordinated refresh no matter how many requests hit the 401 at once.
//!
//! Request lifecycle:
//! 1. Read the access token from the `CredentialStore`, attach `Bearer <token>`
//! 2. Backend answers 401 on a request that was never retried → mark it retried
//! 3. First such request becomes the refresh leader, later ones queue behind it
//! 4. Leader calls `POST /auth/refresh` once and stores the rotated tokens
//! 5. Every queued request is released in order and replays with the new token
//! 6. Refresh failure → store wiped, navigator sent to `/login`, queue rejected
//! 7. A replay that gets 401 again is returned to the caller as is

pub mod error;
pub mod gateway;
pub mod metrics;
pub mod navigator;
pub mod refresh;
pub mod request;

pub use error::{Error, RefreshError, Result};
pub use gateway::{Gateway, GatewayConfig};
pub use navigator::Navigator;
pub use refresh::{PendingResult, RefreshCoordinator, RefreshLease, RefreshOutcome, Turn};
pub use request::{ApiRequest, ApiResponse};
pub use reqwest::header;
