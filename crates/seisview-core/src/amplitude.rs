//! Quantile clipping of the amplitude color scale.

use serde::{Deserialize, Serialize};

use crate::types::AmplitudeStats;

/// Absolute color-scale bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmplitudeDisplayRange {
    pub vmin: f64,
    pub vmax: f64,
}

impl AmplitudeDisplayRange {
    pub fn new(vmin: f64, vmax: f64) -> Self {
        Self { vmin, vmax }
    }
}

impl Default for AmplitudeDisplayRange {
    fn default() -> Self {
        Self::new(-1.0, 1.0)
    }
}

/// Lower/upper quantiles of the base range. `min_q` lives in `[0, 0.5]`,
/// `max_q` in `[0.5, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantileWindow {
    min_q: f64,
    max_q: f64,
}

impl QuantileWindow {
    /// Creates a window, clamping both quantiles into their half.
    pub fn new(min_q: f64, max_q: f64) -> Self {
        Self {
            min_q: min_q.clamp(0.0, 0.5),
            max_q: max_q.clamp(0.5, 1.0),
        }
    }

    pub fn min_q(&self) -> f64 {
        self.min_q
    }

    pub fn max_q(&self) -> f64 {
        self.max_q
    }
}

impl Default for QuantileWindow {
    fn default() -> Self {
        Self::new(0.02, 0.98)
    }
}

/// Named quantile windows offered in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangePreset {
    /// The whole base range.
    Full,
    /// 1% .. 99%.
    Wide,
    /// 5% .. 95%.
    Balanced,
    /// 10% .. 90%.
    Tight,
}

impl RangePreset {
    #[must_use]
    pub fn window(self) -> QuantileWindow {
        match self {
            RangePreset::Full => QuantileWindow::new(0.0, 1.0),
            RangePreset::Wide => QuantileWindow::new(0.01, 0.99),
            RangePreset::Balanced => QuantileWindow::new(0.05, 0.95),
            RangePreset::Tight => QuantileWindow::new(0.1, 0.9),
        }
    }
}

/// Which cube statistics the quantiles are taken relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BaseRangeMode {
    /// The 5th..95th percentile window reported with the cube.
    #[default]
    Percentile,
    /// The actual minimum and maximum amplitude.
    Actual,
}

impl BaseRangeMode {
    /// Picks `(base_min, base_max)` from cube statistics.
    #[must_use]
    pub fn base(self, stats: &AmplitudeStats) -> (f64, f64) {
        match self {
            BaseRangeMode::Percentile => (stats.display_min, stats.display_max),
            BaseRangeMode::Actual => (stats.actual_min, stats.actual_max),
        }
    }
}

/// Maps a quantile window onto a base range.
#[must_use]
pub fn quantile_range(base_min: f64, base_max: f64, window: QuantileWindow) -> AmplitudeDisplayRange {
    let span = base_max - base_min;
    AmplitudeDisplayRange {
        vmin: base_min + span * window.min_q,
        vmax: base_min + span * window.max_q,
    }
}

/// Keeps the display range in sync with the user's quantile choice.
///
/// The first load of a dataset shows the unclipped base range regardless of
/// the current quantiles; only later edits or presets clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmplitudeRangeController {
    base_min: f64,
    base_max: f64,
    window: QuantileWindow,
    range: AmplitudeDisplayRange,
    initialized: bool,
}

impl AmplitudeRangeController {
    pub fn new(window: QuantileWindow) -> Self {
        Self {
            base_min: -1.0,
            base_max: 1.0,
            window,
            range: AmplitudeDisplayRange::default(),
            initialized: false,
        }
    }

    /// Switches to a new dataset and initializes its baseline.
    pub fn load_dataset(&mut self, base_min: f64, base_max: f64) {
        self.reset();
        self.base_min = base_min;
        self.base_max = base_max;
        self.ensure_baseline();
    }

    /// Forgets the baseline so the next dataset starts unclipped.
    pub fn reset(&mut self) {
        self.initialized = false;
    }

    /// Sets the range to the full base range once per dataset.
    ///
    /// Returns whether the baseline was applied by this call.
    pub fn ensure_baseline(&mut self) -> bool {
        if self.initialized {
            return false;
        }
        self.range = AmplitudeDisplayRange::new(self.base_min, self.base_max);
        self.initialized = true;
        log::debug!(
            "amplitude baseline set to [{}, {}]",
            self.range.vmin,
            self.range.vmax
        );
        true
    }

    /// Applies a quantile edit.
    pub fn set_quantiles(&mut self, min_q: f64, max_q: f64) {
        self.window = QuantileWindow::new(min_q, max_q);
        self.recompute();
    }

    /// Applies a named preset.
    pub fn apply_preset(&mut self, preset: RangePreset) {
        self.window = preset.window();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.range = quantile_range(self.base_min, self.base_max, self.window);
        self.initialized = true;
    }

    pub fn range(&self) -> AmplitudeDisplayRange {
        self.range
    }

    pub fn window(&self) -> QuantileWindow {
        self.window
    }

    pub fn base(&self) -> (f64, f64) {
        (self.base_min, self.base_max)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl Default for AmplitudeRangeController {
    fn default() -> Self {
        Self::new(QuantileWindow::default())
    }
}
