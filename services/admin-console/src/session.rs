//! Console side of session teardown

use std::sync::atomic::{AtomicBool, Ordering};

use admin_gateway::Navigator;
use tracing::warn;

/// Exit status when the session ended and a new login is needed.
pub const SESSION_EXPIRED_EXIT: i32 = 2;

/// Records the gateway's redirect to the login route so `main` can report
/// it once the command returns.
#[derive(Debug, Default)]
pub struct ConsoleNavigator {
    redirected: AtomicBool,
}

impl ConsoleNavigator {
    pub fn session_expired(&self) -> bool {
        self.redirected.load(Ordering::SeqCst)
    }
}

/// Whether the command left the console needing a fresh login, either
/// because the gateway tore the session down or because the error says so.
pub fn session_ended(navigator: &ConsoleNavigator, error: Option<&anyhow::Error>) -> bool {
    navigator.session_expired()
        || error
            .and_then(|e| e.downcast_ref::<admin_api::Error>())
            .is_some_and(admin_api::Error::is_session_expired)
}

impl Navigator for ConsoleNavigator {
    fn redirect(&self, location: &str) {
        if !self.redirected.swap(true, Ordering::SeqCst) {
            warn!(location, "session ended, login required");
        }
    }
}
