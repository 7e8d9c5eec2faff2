//! The viewer: owns the current snapshot and turns events into new ones.

use std::sync::Arc;
use std::time::Instant;

use seisview_core::{
    parse_upload_response, AmplitudeDisplayRange, CubeInfo, Options, RangePreset, Result,
    SliceIndices, SliceKind, SliceResponse,
};
use seisview_render::{CameraPose, ColorMap, ColorMapRegistry, Scene};

use crate::compass::CompassReading;
use crate::source::{FetchRequest, SliceSource};
use crate::state::{Layer, ViewerState};

/// Drives one seismic slice view.
///
/// Callers feed it events (cube loads, slider moves, camera changes, quantile
/// edits) plus the current time, perform the [`FetchRequest`]s it hands back,
/// and report the results through [`Viewer::apply_slice`]. The rendered scene
/// is derived from the latest snapshot on demand.
pub struct Viewer {
    options: Options,
    color_maps: ColorMapRegistry,
    state: Arc<ViewerState>,
}

impl Viewer {
    pub fn new(mut options: Options) -> Self {
        let color_maps = ColorMapRegistry::new();
        let resolved = color_maps.get_or_default(&options.color_map).name.clone();
        options.color_map = resolved;

        let state = Arc::new(ViewerState::new(&options));
        Self {
            options,
            color_maps,
            state,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The current snapshot. It stays valid after later events.
    pub fn snapshot(&self) -> Arc<ViewerState> {
        Arc::clone(&self.state)
    }

    /// The color map the slices are drawn with.
    pub fn color_map(&self) -> &ColorMap {
        self.color_maps.get_or_default(&self.options.color_map)
    }

    pub fn color_maps(&self) -> &ColorMapRegistry {
        &self.color_maps
    }

    fn replace(&mut self, next: ViewerState) {
        self.state = Arc::new(next);
    }

    /// Loads a new cube and returns the fetches for its center slices.
    pub fn load_cube(&mut self, info: CubeInfo, now: Instant) -> Vec<FetchRequest> {
        log::info!(
            "loading cube {:?} ({:.1} MB)",
            info.shape,
            info.memory_usage_mb
        );
        let (next, requests) = self.state.with_cube(info, &self.options, now);
        self.replace(next);
        requests
    }

    /// Loads the cube described by an upload reply.
    ///
    /// A rejected or failed upload leaves the current cube untouched.
    pub fn load_upload_response(
        &mut self,
        success: bool,
        body: &str,
        now: Instant,
    ) -> Result<Vec<FetchRequest>> {
        let info = parse_upload_response(success, body).map_err(|err| {
            log::error!("upload failed: {err}");
            err
        })?;
        Ok(self.load_cube(info, now))
    }

    /// Loads the cube behind `source` and fetches its center slices.
    pub fn load_from_source(&mut self, source: &impl SliceSource, now: Instant) -> Result<()> {
        let info = source.cube_info()?;
        for request in self.load_cube(info, now) {
            self.apply_slice(&request, source.fulfil(&request));
        }
        Ok(())
    }

    /// Moves the slider for `kind`. Fails when no cube is loaded.
    pub fn set_index(&mut self, kind: SliceKind, index: usize, now: Instant) -> Result<()> {
        let next = self.state.with_index(kind, index, now)?;
        self.replace(next);
        Ok(())
    }

    /// Advances timers to `now` and returns the fetches that became due.
    pub fn tick(&mut self, now: Instant) -> Vec<FetchRequest> {
        let (next, requests) = self.state.tick(now);
        self.replace(next);
        for request in &requests {
            log::debug!("committing {} index {}", request.kind, request.index);
        }
        requests
    }

    /// Advances timers and serves due fetches from `source` right away.
    pub fn pump(&mut self, source: &impl SliceSource, now: Instant) -> usize {
        let requests = self.tick(now);
        for request in &requests {
            self.apply_slice(request, source.fulfil(request));
        }
        requests.len()
    }

    /// Reports the outcome of a fetch.
    pub fn apply_slice(&mut self, request: &FetchRequest, result: Result<SliceResponse>) {
        let next = self.state.with_slice(request, result);
        self.replace(next);
    }

    pub fn set_quantiles(&mut self, min_q: f64, max_q: f64) {
        let next = self.state.with_quantiles(min_q, max_q);
        self.replace(next);
    }

    pub fn apply_preset(&mut self, preset: RangePreset) {
        let next = self.state.with_preset(preset);
        self.replace(next);
    }

    pub fn set_visible(&mut self, layer: Layer, visible: bool) {
        let next = self.state.with_visibility(layer, visible);
        self.replace(next);
    }

    pub fn toggle(&mut self, layer: Layer) {
        let visible = self.state.visibility().is_visible(layer);
        self.set_visible(layer, !visible);
    }

    /// The engine reported a camera change.
    pub fn camera_changed(&mut self, pose: CameraPose, now: Instant) {
        let next = self.state.with_camera_event(pose, now);
        self.replace(next);
    }

    /// The camera moved without an event.
    pub fn observe_camera(&mut self, pose: CameraPose) {
        let next = self.state.with_camera_pose(pose);
        self.replace(next);
    }

    /// Stops all timers; call when the view goes away.
    pub fn close(&mut self) {
        let next = self.state.closed();
        self.replace(next);
        log::info!("viewer closed");
    }

    /// Builds the scene for the current snapshot.
    pub fn scene(&self) -> Option<Scene> {
        self.state.scene(&self.options, self.color_map())
    }

    pub fn cube_info(&self) -> Option<&CubeInfo> {
        self.state.cube()
    }

    pub fn compass(&self) -> CompassReading {
        self.state.compass()
    }

    pub fn committed_indices(&self) -> SliceIndices {
        self.state.committed()
    }

    pub fn pending_indices(&self) -> SliceIndices {
        self.state.pending()
    }

    pub fn display_range(&self) -> AmplitudeDisplayRange {
        self.state.display_range()
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(Options::default())
    }
}
