// src/index/cache.rs
//! Disk-backed get-or-populate cache for the blog index.
//!
//! Each [`IndexMode`] owns one snapshot slot, a JSON file holding a
//! serialized [`BlogIndex`]. Slot operations are best-effort from the
//! cache's point of view: an unreadable slot is a miss, and a failed write
//! is logged and dropped.
//!
//! A fetch that fails outright is not written to the slot. Only indexes that
//! were actually built get persisted, empty ones included, so an outage
//! never replaces a good snapshot with an empty one.
//!
//! Populating a slot is not serialized. Two callers that miss at the same
//! time both fetch and both write; the last rename wins.

use super::fetcher::IndexFetcher;
use crate::constants::{PREVIEWS_SLOT_SUFFIX, PREVIEW_CLEAR_LIMIT};
use crate::error::AppError;
use crate::model::{BlogIndex, IndexMode};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// One snapshot file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotSlot {
    path: PathBuf,
}

impl SnapshotSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the snapshot. A missing file is `Ok(None)`; an unparsable one
    /// is [`AppError::SnapshotCorrupt`].
    pub async fn load(&self) -> Result<Option<BlogIndex>, AppError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| AppError::SnapshotCorrupt {
                path: self.path.clone(),
                source,
            })
    }

    /// Writes the snapshot through a temporary sibling file and a rename, so
    /// readers see either the old or the new snapshot.
    pub async fn save(&self, index: &BlogIndex) -> Result<(), AppError> {
        let json = serde_json::to_string(index)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let temp = self.temp_path();
        if let Err(e) = tokio::fs::write(&temp, json).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(e.into());
        }
        if let Err(e) = tokio::fs::rename(&temp, &self.path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(e.into());
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(".");
        name.push(self.path.file_name().unwrap_or_else(|| "index".as_ref()));
        name.push(format!(
            ".{}.{}.tmp",
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        self.path.with_file_name(name)
    }
}

/// Snapshot slots for both modes, passed in at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSlots {
    pub normal: SnapshotSlot,
    pub previews: SnapshotSlot,
}

impl CacheSlots {
    /// `<base>` for the full index and `<base>_previews` for previews.
    pub fn from_base(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        let mut previews = base.clone().into_os_string();
        previews.push(PREVIEWS_SLOT_SUFFIX);
        Self {
            normal: SnapshotSlot::new(base),
            previews: SnapshotSlot::new(previews),
        }
    }

    pub fn slot(&self, mode: IndexMode) -> &SnapshotSlot {
        match mode {
            IndexMode::Normal => &self.normal,
            IndexMode::Previews => &self.previews,
        }
    }
}

/// An index together with the snapshot write it triggered, if any.
pub struct Refreshed {
    pub index: BlogIndex,
    /// The detached snapshot write, when one was started.
    pub persist: Option<JoinHandle<()>>,
}

/// Serves the index per mode from its snapshot slot, falling back to the
/// fetcher on a miss.
pub struct IndexCache {
    fetcher: Arc<IndexFetcher>,
    slots: CacheSlots,
    enabled: bool,
}

impl IndexCache {
    pub fn new(fetcher: Arc<IndexFetcher>, slots: CacheSlots, enabled: bool) -> Self {
        Self {
            fetcher,
            slots,
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn slots(&self) -> &CacheSlots {
        &self.slots
    }

    /// Returns the index for `mode`. Never fails: remote failures produce an
    /// empty index.
    pub async fn get_index(&self, mode: IndexMode) -> BlogIndex {
        self.resolve(mode).await.index
    }

    /// Like [`IndexCache::get_index`], but hands back the snapshot write
    /// started on a miss so the caller can wait for it.
    pub async fn resolve(&self, mode: IndexMode) -> Refreshed {
        if self.enabled {
            if let Some(index) = self.read_slot(mode).await {
                return Refreshed {
                    index,
                    persist: None,
                };
            }
        }
        self.refresh(mode).await
    }

    /// Fetches a fresh index for `mode`, bypassing the slot, and starts a
    /// background write of it when caching is enabled.
    ///
    /// A failed fetch returns an empty index and leaves the slot untouched.
    pub async fn refresh(&self, mode: IndexMode) -> Refreshed {
        let mut index = match self.fetcher.try_fetch_index().await {
            Ok(index) => index,
            Err(e) => {
                log::warn!("Failed to load posts for {} index: {}", mode, e);
                return Refreshed {
                    index: BlogIndex::new(),
                    persist: None,
                };
            }
        };

        if mode == IndexMode::Previews {
            let cleared = index.clear_leading_previews(PREVIEW_CLEAR_LIMIT);
            log::debug!("Cleared previews on {} leading posts", cleared);
        }

        let persist = self
            .enabled
            .then(|| spawn_persist(self.slots.slot(mode).clone(), index.clone()));

        Refreshed { index, persist }
    }

    async fn read_slot(&self, mode: IndexMode) -> Option<BlogIndex> {
        let slot = self.slots.slot(mode);
        match slot.load().await {
            Ok(Some(index)) => {
                log::debug!("Cache hit: {} ({} posts)", slot.path().display(), index.len());
                Some(index)
            }
            Ok(None) => {
                log::debug!("Cache miss: {}", slot.path().display());
                None
            }
            Err(e) => {
                log::warn!("Ignoring unreadable index cache: {}", e);
                None
            }
        }
    }
}

fn spawn_persist(slot: SnapshotSlot, index: BlogIndex) -> JoinHandle<()> {
    tokio::spawn(async move {
        match slot.save(&index).await {
            Ok(()) => log::debug!("Wrote index cache {}", slot.path().display()),
            Err(e) => log::warn!(
                "Failed to write index cache {}: {}",
                slot.path().display(),
                e
            ),
        }
    })
}
