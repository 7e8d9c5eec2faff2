//! Immutable viewer snapshots.
//!
//! Every event produces a new [`ViewerState`] from the previous one; nothing
//! is patched in place. The scene is a pure function of a snapshot and the
//! options, rebuilt from scratch whenever it is asked for.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use seisview_core::{
    AmplitudeDisplayRange, AmplitudeRangeController, CubeInfo, Options, RangePreset, Result,
    SeisviewError, SliceIndices, SliceKind, SliceResponse,
};
use seisview_render::{CameraPose, ColorMap, Scene, SceneConfig, Trace};
use seisview_structures::{cube_outline, north_arrow, SliceMeshBuilder};

use crate::compass::{CameraCompassSync, CompassReading};
use crate::scheduler::SliceUpdateScheduler;
use crate::source::FetchRequest;

/// A toggleable part of the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Slice(SliceKind),
    Outline,
    NorthArrow,
}

/// Which layers are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visibility {
    pub slices: [bool; 3],
    pub outline: bool,
    pub north_arrow: bool,
}

impl Default for Visibility {
    fn default() -> Self {
        Self {
            slices: [true; 3],
            outline: true,
            north_arrow: true,
        }
    }
}

impl Visibility {
    pub fn is_visible(&self, layer: Layer) -> bool {
        match layer {
            Layer::Slice(kind) => self.slices[kind.dim()],
            Layer::Outline => self.outline,
            Layer::NorthArrow => self.north_arrow,
        }
    }

    #[must_use]
    pub fn with(mut self, layer: Layer, visible: bool) -> Self {
        match layer {
            Layer::Slice(kind) => self.slices[kind.dim()] = visible,
            Layer::Outline => self.outline = visible,
            Layer::NorthArrow => self.north_arrow = visible,
        }
        self
    }
}

/// A slice payload together with the index it was fetched for.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSlice {
    pub index: usize,
    pub response: Arc<SliceResponse>,
}

/// Everything the viewer knows at one instant.
#[derive(Debug, Clone)]
pub struct ViewerState {
    cube: Option<Arc<CubeInfo>>,
    generation: u64,
    committed: SliceIndices,
    scheduler: SliceUpdateScheduler,
    issued: [u64; 3],
    slices: [Option<LoadedSlice>; 3],
    amplitude: AmplitudeRangeController,
    visibility: Visibility,
    camera: CameraPose,
    compass: CameraCompassSync,
}

impl ViewerState {
    /// An empty viewer with no cube loaded.
    pub fn new(options: &Options) -> Self {
        let camera = CameraPose::from_options(options);
        Self {
            cube: None,
            generation: 0,
            committed: SliceIndices::default(),
            scheduler: SliceUpdateScheduler::new(options.debounce_delay()),
            issued: [0; 3],
            slices: [None, None, None],
            amplitude: AmplitudeRangeController::new(options.quantiles),
            visibility: Visibility::default(),
            camera,
            compass: CameraCompassSync::new(options, &camera),
        }
    }

    pub fn cube(&self) -> Option<&CubeInfo> {
        self.cube.as_deref()
    }

    /// Number of datasets loaded so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Indices of the last commit; these drive fetches.
    pub fn committed(&self) -> SliceIndices {
        self.committed
    }

    /// Indices including values still waiting out the debounce delay.
    pub fn pending(&self) -> SliceIndices {
        self.scheduler.overlay(self.committed)
    }

    pub fn scheduler(&self) -> &SliceUpdateScheduler {
        &self.scheduler
    }

    pub fn slice(&self, kind: SliceKind) -> Option<&LoadedSlice> {
        self.slices[kind.dim()].as_ref()
    }

    /// Sequence number of the latest request issued for `kind`.
    pub fn latest_seq(&self, kind: SliceKind) -> u64 {
        self.issued[kind.dim()]
    }

    pub fn amplitude(&self) -> &AmplitudeRangeController {
        &self.amplitude
    }

    pub fn display_range(&self) -> AmplitudeDisplayRange {
        self.amplitude.range()
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn camera(&self) -> CameraPose {
        self.camera
    }

    pub fn compass(&self) -> CompassReading {
        self.compass.reading()
    }

    pub fn is_polling(&self) -> bool {
        self.compass.is_polling()
    }

    fn issue(&mut self, kind: SliceKind, index: usize) -> FetchRequest {
        let dim = kind.dim();
        self.issued[dim] += 1;
        FetchRequest {
            kind,
            index,
            seq: self.issued[dim],
            generation: self.generation,
        }
    }

    /// Replaces the dataset and requests the three center slices.
    ///
    /// Slices and pending timers from the previous cube are discarded. The
    /// quantile window is kept but the display range starts unclipped again.
    /// The camera returns to its default pose and the compass poll is
    /// restarted for the new scene.
    #[must_use]
    pub fn with_cube(
        &self,
        info: CubeInfo,
        options: &Options,
        now: Instant,
    ) -> (Self, Vec<FetchRequest>) {
        let (base_min, base_max) = options.base_range_mode.base(&info.amplitude_range);
        let committed = info.center_indices();

        let mut next = Self::new(options);
        next.generation = self.generation + 1;
        next.issued = self.issued;
        next.visibility = self.visibility;
        next.committed = committed;
        next.amplitude = self.amplitude.clone();
        next.amplitude.load_dataset(base_min, base_max);
        next.compass.start(now);
        next.cube = Some(Arc::new(info));

        let requests = SliceKind::ALL
            .into_iter()
            .map(|kind| next.issue(kind, committed.get(kind)))
            .collect();
        (next, requests)
    }

    /// Records a slider move; the index is committed after the debounce delay.
    pub fn with_index(&self, kind: SliceKind, index: usize, now: Instant) -> Result<Self> {
        let info = self.cube().ok_or(SeisviewError::NoCubeLoaded)?;
        let index = info.clamp_index(kind, index);

        let mut next = self.clone();
        next.scheduler.push(kind, index, now);
        Ok(next)
    }

    /// Fires due timers: commits settled indices and updates the compass.
    #[must_use]
    pub fn tick(&self, now: Instant) -> (Self, Vec<FetchRequest>) {
        let mut next = self.clone();
        let mut requests = Vec::new();
        for (kind, index) in next.scheduler.poll(now) {
            next.committed = next.committed.with(kind, index);
            requests.push(next.issue(kind, index));
        }
        let camera = next.camera;
        next.compass.tick(now, &camera);
        (next, requests)
    }

    /// Applies the outcome of `request`.
    ///
    /// Responses for an older dataset, or older than the latest request for
    /// the same axis, are dropped. A failed fetch keeps the previous slice.
    #[must_use]
    pub fn with_slice(&self, request: &FetchRequest, result: Result<SliceResponse>) -> Self {
        let kind = request.kind;
        if request.generation != self.generation {
            log::debug!("dropping {kind} slice from dataset {}", request.generation);
            return self.clone();
        }
        if request.seq != self.latest_seq(kind) {
            log::debug!(
                "dropping stale {kind} slice {} (seq {} < {})",
                request.index,
                request.seq,
                self.latest_seq(kind)
            );
            return self.clone();
        }

        let response = match result {
            Ok(response) if response.kind() == kind => response,
            Ok(response) => {
                log::warn!("expected a {kind} slice, got {}", response.kind());
                return self.clone();
            }
            Err(err) => {
                log::warn!("fetching {kind} slice {} failed: {err}", request.index);
                return self.clone();
            }
        };

        let mut next = self.clone();
        next.slices[kind.dim()] = Some(LoadedSlice {
            index: request.index,
            response: Arc::new(response),
        });
        next
    }

    #[must_use]
    pub fn with_quantiles(&self, min_q: f64, max_q: f64) -> Self {
        let mut next = self.clone();
        next.amplitude.set_quantiles(min_q, max_q);
        next
    }

    #[must_use]
    pub fn with_preset(&self, preset: RangePreset) -> Self {
        let mut next = self.clone();
        next.amplitude.apply_preset(preset);
        next
    }

    #[must_use]
    pub fn with_visibility(&self, layer: Layer, visible: bool) -> Self {
        let mut next = self.clone();
        next.visibility = next.visibility.with(layer, visible);
        next
    }

    /// Updates the camera after an engine change event.
    #[must_use]
    pub fn with_camera_event(&self, pose: CameraPose, now: Instant) -> Self {
        let mut next = self.with_camera_pose(pose);
        next.compass.notify_camera_change(now);
        next
    }

    /// Updates the camera without an event; only the poll will notice.
    #[must_use]
    pub fn with_camera_pose(&self, pose: CameraPose) -> Self {
        let mut next = self.clone();
        next.camera = pose;
        next
    }

    /// Tears down timers when the view goes away.
    #[must_use]
    pub fn closed(&self) -> Self {
        let mut next = self.clone();
        next.scheduler.cancel_all();
        next.compass.stop();
        next
    }

    /// Derives the scene: outline, visible slice surfaces and the north arrow.
    ///
    /// Returns `None` before a cube is loaded. Slices that fail to build are
    /// left out. Surfaces carry the stops of `color_map`.
    pub fn scene(&self, options: &Options, color_map: &ColorMap) -> Option<Scene> {
        let info = self.cube()?;
        let mut scene = Scene::new(SceneConfig::for_cube(info, options));

        if self.visibility.outline {
            scene.push(Trace::Lines(cube_outline(info)));
        }

        let builder = SliceMeshBuilder::from_options(info, self.display_range(), options)
            .with_color_map(color_map);
        for kind in SliceKind::ALL {
            if !self.visibility.is_visible(Layer::Slice(kind)) {
                continue;
            }
            if let Some(slice) = self.slice(kind) {
                if let Some(surface) = builder.build(&slice.response, slice.index) {
                    scene.push(Trace::Surface(surface));
                }
            }
        }

        if options.show_north_arrow && self.visibility.north_arrow {
            for trace in north_arrow(info, options) {
                scene.push(trace);
            }
        }

        Some(scene)
    }
}
