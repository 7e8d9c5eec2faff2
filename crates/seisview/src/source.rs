//! Where slices come from.
//!
//! A [`SliceSource`] answers slice requests for the loaded cube. The HTTP
//! service is one such source (its transport lives outside this crate);
//! [`VolumeSource`] serves an in-memory cube through an LRU cache.

use std::sync::Arc;

use moka::sync::Cache;
use serde::Serialize;

use seisview_core::{CubeInfo, Result, SeismicVolume, SliceKind, SliceResponse};

/// Path of the upload endpoint.
pub const UPLOAD_PATH: &str = "/api/upload";

/// A slice fetch issued by the viewer.
///
/// `generation` identifies the dataset and `seq` orders requests per axis;
/// the viewer uses both to drop stale responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FetchRequest {
    pub kind: SliceKind,
    pub index: usize,
    pub seq: u64,
    pub generation: u64,
}

impl FetchRequest {
    /// Path of the slice-fetch endpoint for this request.
    pub fn path(&self) -> String {
        format!("/api/slice/{}/{}", self.kind, self.index)
    }
}

/// Something that can describe a cube and serve its slices.
pub trait SliceSource {
    fn cube_info(&self) -> Result<CubeInfo>;

    fn fetch_slice(&self, kind: SliceKind, index: usize) -> Result<SliceResponse>;

    /// Serves a viewer request.
    fn fulfil(&self, request: &FetchRequest) -> Result<SliceResponse> {
        self.fetch_slice(request.kind, request.index)
    }
}

/// An in-memory cube with an LRU slice cache.
pub struct VolumeSource {
    volume: Arc<SeismicVolume>,
    cache: Cache<(SliceKind, usize), Arc<SliceResponse>>,
}

impl VolumeSource {
    /// Wraps `volume`, keeping at most `capacity` extracted slices.
    pub fn new(volume: SeismicVolume, capacity: u64) -> Self {
        let volume = Arc::new(volume);
        log::info!(
            "serving {:?} cube ({:.1} MB), slice cache capacity {capacity}",
            volume.shape(),
            volume.memory_usage_mb()
        );
        Self {
            volume,
            cache: Cache::builder().max_capacity(capacity).build(),
        }
    }

    pub fn volume(&self) -> &SeismicVolume {
        &self.volume
    }

    /// Whether the slice is currently cached.
    pub fn is_cached(&self, kind: SliceKind, index: usize) -> bool {
        self.cache.contains_key(&(kind, index))
    }

    /// Returns a shared slice, extracting it on a cache miss.
    pub fn slice(&self, kind: SliceKind, index: usize) -> Result<Arc<SliceResponse>> {
        if let Some(hit) = self.cache.get(&(kind, index)) {
            return Ok(hit);
        }
        let slice = Arc::new(self.volume.slice(kind, index)?);
        self.cache.insert((kind, index), Arc::clone(&slice));
        log::debug!("cached {kind} slice {index}");
        Ok(slice)
    }

    /// Drops every cached slice.
    pub fn clear_cache(&self) {
        self.cache.invalidate_all();
    }
}

impl SliceSource for VolumeSource {
    fn cube_info(&self) -> Result<CubeInfo> {
        Ok(self.volume.cube_info())
    }

    fn fetch_slice(&self, kind: SliceKind, index: usize) -> Result<SliceResponse> {
        self.slice(kind, index).map(|slice| (*slice).clone())
    }
}
