//! Deliver a resource, uploading it only when no handle is cached
//!
//! Per request, a resource key is either resolved straight from the cache,
//! or uploaded and then resolved:
//!
//! ```text
//! UNRESOLVED --hit--> RESOLVED(handle)                      (send by handle)
//! UNRESOLVED --miss--> UPLOADING --ok--> RESOLVED(handle)   (handle persisted)
//!                                \--err--> UNRESOLVED       (error returned)
//! ```
//!
//! The flow as a whole is not serialized. Two concurrent misses for the same
//! key both upload, and whichever save lands last keeps its handle.

use crate::cache::HandleCache;
use crate::error::{VoxError, VoxResult};
use crate::remote::{ChatId, RemoteService, Upload};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info};

/// A local file that can be delivered through the remote service
#[derive(Debug, Clone)]
pub struct Resource {
    /// Cache key
    pub key: String,

    /// Where the bytes live
    pub path: PathBuf,

    /// Caption shown with the media
    pub caption: String,
}

impl Resource {
    /// Build a resource keyed by the file name of `path`
    pub fn from_path(path: impl Into<PathBuf>, caption: impl Into<String>) -> Self {
        let path = path.into();
        let key = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            key,
            path,
            caption: caption.into(),
        }
    }
}

/// How a delivery was satisfied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Re-sent from a cached handle, no upload
    Cached { handle: String },

    /// Uploaded; the new handle was handed to the cache
    Uploaded { handle: String, persisted: bool },
}

/// Cache-first delivery through a remote service
pub struct DispatchFlow<R: RemoteService> {
    cache: Arc<HandleCache>,
    remote: Arc<R>,
    cached_suffix: String,
}

impl<R: RemoteService> DispatchFlow<R> {
    /// Create a flow; `cached_suffix` is appended to captions of cached re-sends
    pub fn new(cache: Arc<HandleCache>, remote: Arc<R>, cached_suffix: impl Into<String>) -> Self {
        Self {
            cache,
            remote,
            cached_suffix: cached_suffix.into(),
        }
    }

    /// Look up the cached handle for a resource key
    pub async fn cached_handle(&self, key: &str) -> Option<String> {
        self.cache.load().await.lookup(key).map(str::to_string)
    }

    /// Deliver `resource` to `chat`
    ///
    /// On a cache hit the handle is re-sent as is; if the service rejects it
    /// the error is returned and nothing is retried. On a miss the file is
    /// uploaded and the returned handle persisted. Upload failures are
    /// returned without touching the cache; cache failures are only logged.
    pub async fn deliver(&self, chat: ChatId, resource: &Resource) -> VoxResult<Delivery> {
        if let Some(handle) = self.cached_handle(&resource.key).await {
            info!("Using cached handle for {}", resource.key);
            let caption = format!("{}{}", resource.caption, self.cached_suffix);
            self.remote.send_by_handle(chat, &handle, &caption).await?;
            return Ok(Delivery::Cached { handle });
        }

        debug!(
            "No cached handle for {}, uploading to {}",
            resource.key,
            self.remote.service_name()
        );

        let upload = Upload {
            file_name: resource.key.clone(),
            bytes: read_resource(resource).await?,
            caption: resource.caption.clone(),
        };
        let handle = self.remote.send_by_upload(chat, &upload).await?;

        // Reload so entries saved by other requests meanwhile are kept
        let mut store = self.cache.load().await;
        store.store(resource.key.clone(), handle.clone());
        let persisted = self.cache.save(&store).await;

        info!("Cached new handle for {}: {}", resource.key, handle);
        Ok(Delivery::Uploaded { handle, persisted })
    }
}

async fn read_resource(resource: &Resource) -> VoxResult<Vec<u8>> {
    fs::read(&resource.path).await.map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            VoxError::ResourceNotFound(resource.path.clone())
        } else {
            VoxError::io(format!("reading {}", resource.path.display()), e)
        }
    })
}
