//! Persistent upload-handle cache
//!
//! Maps a local resource name to the opaque handle a remote service issued
//! when the resource was uploaded, so each resource is uploaded at most once
//! across restarts.
//!
//! # Protocol
//!
//! Every logical operation follows "load fresh, mutate, save whole":
//!
//! | Step | Locking | Failure |
//! |------|---------|---------|
//! | `load` | none | logged, empty store |
//! | `lookup` / `store` | none (owned store) | n/a |
//! | `save` | exclusive write lock | logged, handle not persisted |
//!
//! Two concurrent misses on the same key can both upload; the last save wins.

pub mod handle;
pub mod store;

pub use handle::HandleCache;
pub use store::HandleStore;
