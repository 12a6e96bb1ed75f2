//! Remote messaging service abstraction
//!
//! The handle cache only needs three things from the service that stores
//! uploaded media: upload-and-send returning a reusable handle, and re-send
//! by that handle. The Bot API client is the production implementation.

pub mod telegram;

pub use telegram::TelegramClient;

use crate::error::VoxResult;
use async_trait::async_trait;

/// Chat identifier on the remote service
pub type ChatId = i64;

/// A resource to upload
#[derive(Debug, Clone)]
pub struct Upload {
    /// File name reported to the service
    pub file_name: String,

    /// Raw file contents
    pub bytes: Vec<u8>,

    /// Caption shown with the media
    pub caption: String,
}

/// Remote service that issues reusable handles for uploaded media
#[async_trait]
pub trait RemoteService: Send + Sync {
    /// Re-deliver previously uploaded media by handle
    ///
    /// Fails if the service no longer accepts the handle.
    async fn send_by_handle(&self, chat: ChatId, handle: &str, caption: &str) -> VoxResult<()>;

    /// Upload media and deliver it in one call, returning the new handle
    async fn send_by_upload(&self, chat: ChatId, upload: &Upload) -> VoxResult<String>;

    /// Human-readable service name for logs
    fn service_name(&self) -> &'static str;
}
