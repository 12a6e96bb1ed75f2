//! Vox - voice clip bot with a persistent upload-handle cache
//!
//! Uploads a clip to the Bot API once, remembers the handle the API issued
//! in a small JSON file, and re-sends by handle from then on.

pub mod bot;
pub mod cache;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod remote;

pub use error::{VoxError, VoxResult};
