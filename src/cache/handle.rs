//! Durable handle cache backed by a single JSON file

use crate::cache::store::HandleStore;
use crate::error::{VoxError, VoxResult};
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// File-backed resource-to-handle cache
///
/// There is no long-lived in-memory copy: every operation loads a fresh
/// [`HandleStore`] from disk, mutates it, and saves it back whole. The file
/// is the only state shared between callers.
///
/// Writes are serialized by an internal lock; reads take no lock and may
/// observe the artifact either before or after a concurrent save.
pub struct HandleCache {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl HandleCache {
    /// Create a cache backed by the file at `path`
    ///
    /// The file does not need to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the store, degrading to an empty store on any failure
    ///
    /// A missing file is a cold start. An unreadable or malformed file is
    /// logged and treated the same way: losing cached handles only costs a
    /// re-upload.
    pub async fn load(&self) -> HandleStore {
        match self.read().await {
            Ok(store) => store,
            Err(e) => {
                warn!("{}; starting with an empty handle cache", e);
                HandleStore::new()
            }
        }
    }

    /// Load the store, reporting unreadable or malformed files as errors
    ///
    /// A missing file still yields an empty store.
    pub async fn read(&self) -> VoxResult<HandleStore> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No handle cache at {}, starting cold", self.path.display());
                return Ok(HandleStore::new());
            }
            Err(e) => {
                return Err(VoxError::CacheUnreadable {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        serde_json::from_str(&content).map_err(|e| VoxError::CacheMalformed {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Persist the store, logging instead of failing on error
    ///
    /// Returns whether the write succeeded. A failed save never aborts the
    /// caller; the handle just won't survive a restart.
    pub async fn save(&self, store: &HandleStore) -> bool {
        match self.write(store).await {
            Ok(()) => true,
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }

    /// Persist the store, replacing the file contents in full
    ///
    /// Holds the write lock across serialize, write, flush and rename, so no
    /// two saves interleave. The new contents go to a sibling temp file which
    /// is then renamed over the artifact.
    pub async fn write(&self, store: &HandleStore) -> VoxResult<()> {
        let _guard = self.write_lock.lock().await;

        let content = serde_json::to_string_pretty(store).map_err(|e| self.unwritable(e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| self.unwritable(e))?;
        }

        let tmp_path = self.tmp_path();
        let result = self.replace_with(&tmp_path, content.as_bytes()).await;
        if result.is_err() {
            let _ = fs::remove_file(&tmp_path).await;
        }
        result?;

        debug!(
            entries = store.len(),
            "Saved handle cache to {}",
            self.path.display()
        );
        Ok(())
    }

    /// Remove the backing file
    pub async fn clear(&self) -> VoxResult<()> {
        let _guard = self.write_lock.lock().await;

        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(VoxError::io(
                format!("removing handle cache {}", self.path.display()),
                e,
            )),
        }
    }

    async fn replace_with(&self, tmp_path: &Path, content: &[u8]) -> VoxResult<()> {
        let mut file = fs::File::create(tmp_path)
            .await
            .map_err(|e| self.unwritable(e))?;
        file.write_all(content)
            .await
            .map_err(|e| self.unwritable(e))?;
        file.sync_all().await.map_err(|e| self.unwritable(e))?;
        drop(file);

        fs::rename(tmp_path, &self.path)
            .await
            .map_err(|e| self.unwritable(e))
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("handles.json"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn unwritable(&self, reason: impl ToString) -> VoxError {
        VoxError::CacheUnwritable {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}
