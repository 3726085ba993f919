//! Shared types for the marketplace admin console
//!
//! Holds the pieces every crate needs: the redacting [`Secret`] wrapper used
//! for bearer tokens, and the configuration error type.

mod error;
mod secret;

pub use error::{Error, Result};
pub use secret::Secret;
