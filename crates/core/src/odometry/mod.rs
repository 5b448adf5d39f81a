//! Differential-drive pose estimation
//!
//! Combines cumulative wheel travel from the two drive sides with the
//! gyroscope heading into a 2D pose, updated once per tick regardless of
//! operating mode. The gyroscope is treated as ground truth for
//! orientation; wheel distances only translate the pose.
//!
//! # Algorithm
//!
//! Encoder readings are cumulative arc lengths since power-on. Each tick
//! the estimator differences them against the previous readings to get
//! per-wheel deltas, then advances the position by the chord approximation:
//! the midpoint of the two deltas, rotated by the current heading. At the
//! 50 Hz tick rate the per-tick arc is short enough that the chord error is
//! negligible for this vehicle.
//!
//! A missing reading contributes a zero delta, so stale sensors freeze the
//! pose rather than corrupting it.

use libm::{cosf, sinf};

/// 2D robot pose: position in meters, heading in degrees.
///
/// Heading follows the mathematical convention (counter-clockwise
/// positive, 0 along +x). The raw gyroscope counts the other way and is
/// negated on the way in.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pose2d {
    /// X position in meters
    pub x: f32,
    /// Y position in meters
    pub y: f32,
    /// Heading in degrees, counter-clockwise positive
    pub heading_deg: f32,
}

impl Pose2d {
    /// Create a pose from components.
    pub fn new(x: f32, y: f32, heading_deg: f32) -> Self {
        Self { x, y, heading_deg }
    }
}

/// Pose estimator for a two-sided differential drive.
///
/// Holds the previous cumulative encoder readings so callers can feed raw
/// odometer values straight from the sensors. The pose is never rewound or
/// reset mid-run.
pub struct DifferentialOdometry {
    pose: Pose2d,
    last_left_m: Option<f32>,
    last_right_m: Option<f32>,
}

impl DifferentialOdometry {
    /// Create an estimator starting from the given pose.
    ///
    /// No encoder baseline is assumed: the first valid reading on each
    /// wheel establishes the baseline and contributes no motion.
    pub fn new(initial: Pose2d) -> Self {
        Self {
            pose: initial,
            last_left_m: None,
            last_right_m: None,
        }
    }

    /// Current pose estimate.
    pub fn pose(&self) -> Pose2d {
        self.pose
    }

    /// Last valid cumulative wheel distances, left then right, in meters.
    ///
    /// Zero for a wheel that has never produced a valid reading. The
    /// autonomous controller uses these to measure distance traveled since
    /// mode entry.
    pub fn wheel_distances(&self) -> (f32, f32) {
        (
            self.last_left_m.unwrap_or(0.0),
            self.last_right_m.unwrap_or(0.0),
        )
    }

    /// Advance the estimate by one tick of sensor readings.
    ///
    /// # Arguments
    ///
    /// * `raw_gyro_deg` - Raw gyroscope heading in degrees (clockwise
    ///   positive; negated here), or `None` to keep the last heading
    /// * `left_m` / `right_m` - Cumulative wheel distances in meters, or
    ///   `None` to freeze that wheel for this tick
    ///
    /// Returns the updated pose. Given the same tracked state and the same
    /// inputs, the update is a pure function: identical inputs produce
    /// identical outputs.
    pub fn update(
        &mut self,
        raw_gyro_deg: Option<f32>,
        left_m: Option<f32>,
        right_m: Option<f32>,
    ) -> Pose2d {
        if let Some(raw) = raw_gyro_deg {
            self.pose.heading_deg = -raw;
        }

        let left_delta = take_delta(&mut self.last_left_m, left_m);
        let right_delta = take_delta(&mut self.last_right_m, right_m);

        let chord = 0.5 * (left_delta + right_delta);
        let heading_rad = self.pose.heading_deg.to_radians();
        self.pose.x += chord * cosf(heading_rad);
        self.pose.y += chord * sinf(heading_rad);

        self.pose
    }
}

/// Difference a cumulative reading against the stored previous value.
///
/// The first valid reading establishes the baseline (zero delta); a
/// missing reading leaves the baseline untouched and contributes nothing.
fn take_delta(last: &mut Option<f32>, reading: Option<f32>) -> f32 {
    match (reading, *last) {
        (Some(current), Some(previous)) => {
            *last = Some(current);
            current - previous
        }
        (Some(current), None) => {
            *last = Some(current);
            0.0
        }
        (None, _) => 0.0,
    }
}
