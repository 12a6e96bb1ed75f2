//! CLI command implementations

pub mod cache;
pub mod config;
pub mod send;
pub mod serve;

pub use cache::execute as cache;
pub use config::execute as config;
pub use send::execute as send;
pub use serve::execute as serve;

use crate::error::{VoxError, VoxResult};

/// Reject a missing or blank bot token
fn require_token(token: Option<String>) -> VoxResult<String> {
    token
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(VoxError::TokenMissing)
}
