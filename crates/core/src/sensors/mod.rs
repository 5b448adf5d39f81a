//! Sensor traits consumed by the control core
//!
//! All readings are `Option`s: `None` means no valid sample is available
//! this tick. The consumers define what that means: the pose estimator
//! freezes on a missing reading, the safety interlock fails closed.

/// Single-axis gyroscope reporting accumulated heading.
pub trait Gyro {
    /// Raw heading in degrees. The core negates this value before use
    /// (the sensor counts clockwise positive, the pose frame counts
    /// counter-clockwise positive).
    fn heading_degrees(&self) -> Option<f32>;
}

/// Cumulative wheel travel distance, odometer-style.
///
/// Readings are arc length accumulated since power-on, not per-tick
/// deltas; the pose estimator differences consecutive readings itself.
pub trait DistanceEncoder {
    /// Cumulative distance in meters.
    fn distance_m(&self) -> Option<f32>;
}

/// Forward-facing range sensor.
pub trait RangeFinder {
    /// Distance to the nearest obstacle in millimeters.
    fn range_mm(&self) -> Option<f32>;
}
