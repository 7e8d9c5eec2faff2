//! Compass readout kept in step with a freely orbiting camera.
//!
//! Two triggers update the displayed angle. A camera-change notification
//! recomputes it unconditionally once a short settle delay has passed. A
//! fixed-period poll recomputes the expected angle from the current camera
//! and applies it only when it moved by more than a small threshold, which
//! recovers from missed or suppressed engine events.

use std::time::{Duration, Instant};

use serde::Serialize;

use seisview_core::Options;
use seisview_render::{CameraPose, ViewSide};

use crate::task::PeriodicTask;

/// Wraps an angle in degrees into `[0, 360)`.
pub fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Smallest absolute difference between two angles, in `[0, 180]`.
pub fn angle_delta(a: f64, b: f64) -> f64 {
    let d = wrap_degrees(a - b);
    d.min(360.0 - d)
}

/// Displayed compass angle for a camera azimuth.
pub fn compass_angle(azimuth_deg: f64, offset_deg: f64) -> f64 {
    wrap_degrees(-azimuth_deg + offset_deg)
}

/// Angles derived from one camera pose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompassReading {
    pub azimuth_deg: f64,
    /// Angle the compass needle is drawn at.
    pub displayed_deg: f64,
    pub elevation_deg: f64,
    pub side: ViewSide,
}

impl CompassReading {
    pub fn from_pose(pose: &CameraPose, offset_deg: f64) -> Self {
        let azimuth_deg = pose.azimuth_deg();
        Self {
            azimuth_deg,
            displayed_deg: compass_angle(azimuth_deg, offset_deg),
            elevation_deg: pose.elevation_deg(),
            side: pose.view_side(),
        }
    }
}

/// Compass state plus its two update triggers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraCompassSync {
    offset_deg: f64,
    threshold_deg: f64,
    settle_delay: Duration,
    poll: PeriodicTask,
    settle_deadline: Option<Instant>,
    reading: CompassReading,
}

impl CameraCompassSync {
    /// A stopped sync showing the reading for `pose`.
    pub fn new(options: &Options, pose: &CameraPose) -> Self {
        Self {
            offset_deg: options.compass_offset_deg,
            threshold_deg: options.compass_threshold_deg,
            settle_delay: options.camera_settle_delay(),
            poll: PeriodicTask::new(options.camera_poll_period()),
            settle_deadline: None,
            reading: CompassReading::from_pose(pose, options.compass_offset_deg),
        }
    }

    /// Starts the reconciliation poll. Restarting replaces the previous
    /// schedule, so there is never more than one poll per sync.
    pub fn start(&mut self, now: Instant) {
        self.poll.start(now);
        self.settle_deadline = None;
    }

    /// Stops the poll and drops any pending settle update.
    pub fn stop(&mut self) {
        self.poll.cancel();
        self.settle_deadline = None;
    }

    pub fn is_polling(&self) -> bool {
        self.poll.is_running()
    }

    /// Records a camera-change event; the update runs after the settle delay.
    pub fn notify_camera_change(&mut self, now: Instant) {
        self.settle_deadline = Some(now + self.settle_delay);
    }

    pub fn has_pending_update(&self) -> bool {
        self.settle_deadline.is_some()
    }

    pub fn reading(&self) -> CompassReading {
        self.reading
    }

    /// Runs whichever triggers are due at `now` against the current camera.
    ///
    /// Returns `true` if the displayed reading changed.
    pub fn tick(&mut self, now: Instant, pose: &CameraPose) -> bool {
        let expected = CompassReading::from_pose(pose, self.offset_deg);

        if self.settle_deadline.is_some_and(|due| now >= due) {
            self.settle_deadline = None;
            let changed = expected != self.reading;
            self.reading = expected;
            return changed;
        }

        if self.poll.poll(now) {
            return self.reconcile(expected);
        }
        false
    }

    /// Applies `expected` if its angle moved past the threshold, or if the
    /// view flipped between above and below.
    fn reconcile(&mut self, expected: CompassReading) -> bool {
        let moved = angle_delta(expected.displayed_deg, self.reading.displayed_deg);
        if moved > self.threshold_deg || expected.side != self.reading.side {
            log::trace!(
                "compass reconciled {:.2} -> {:.2}",
                self.reading.displayed_deg,
                expected.displayed_deg
            );
            self.reading = expected;
            true
        } else {
            false
        }
    }
}
