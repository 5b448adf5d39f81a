//! Range-threshold safety interlock
//!
//! A single forward range reading gates actuation: anything closer than the
//! configured threshold reads as unsafe. The interlock is stateless and is
//! re-evaluated from the raw reading every tick, so a transient unsafe
//! reading clears itself the moment the sensor does. There is intentionally
//! no debouncing or hysteresis.

/// Result of one interlock evaluation. Valid for the current tick only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafetyState {
    /// True when actuation is permitted this tick.
    pub is_safe: bool,
}

impl SafetyState {
    /// A safe state, for tests and simulation setup.
    pub const SAFE: SafetyState = SafetyState { is_safe: true };
    /// An unsafe state.
    pub const UNSAFE: SafetyState = SafetyState { is_safe: false };
}

/// Stateless range interlock with a fixed distance threshold.
#[derive(Debug, Clone, Copy)]
pub struct RangeInterlock {
    threshold_mm: f32,
}

impl RangeInterlock {
    /// Create an interlock tripping at the given threshold (millimeters).
    pub fn new(threshold_mm: f32) -> Self {
        Self { threshold_mm }
    }

    /// Configured threshold in millimeters.
    pub fn threshold_mm(&self) -> f32 {
        self.threshold_mm
    }

    /// Evaluate one reading.
    ///
    /// `None` (no valid sample this tick) is unsafe: absence of a reading
    /// must never be read as clearance.
    pub fn evaluate(&self, range_mm: Option<f32>) -> SafetyState {
        let is_safe = match range_mm {
            Some(mm) => mm > self.threshold_mm,
            None => false,
        };
        SafetyState { is_safe }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_reading_is_safe() {
        let interlock = RangeInterlock::new(100.0);
        assert!(interlock.evaluate(Some(101.0)).is_safe);
        assert!(interlock.evaluate(Some(2_500.0)).is_safe);
    }

    #[test]
    fn close_reading_is_unsafe() {
        let interlock = RangeInterlock::new(100.0);
        assert!(!interlock.evaluate(Some(99.0)).is_safe);
        assert!(!interlock.evaluate(Some(0.0)).is_safe);
    }

    #[test]
    fn threshold_boundary_is_unsafe() {
        // Strictly-greater comparison: exactly at the threshold is unsafe
        let interlock = RangeInterlock::new(100.0);
        assert!(!interlock.evaluate(Some(100.0)).is_safe);
    }

    #[test]
    fn missing_reading_fails_closed() {
        let interlock = RangeInterlock::new(100.0);
        assert!(!interlock.evaluate(None).is_safe);
    }

    #[test]
    fn evaluation_has_no_memory() {
        // A run of unsafe readings must not stick once the reading clears
        let interlock = RangeInterlock::new(100.0);
        assert!(!interlock.evaluate(Some(50.0)).is_safe);
        assert!(!interlock.evaluate(None).is_safe);
        assert!(interlock.evaluate(Some(150.0)).is_safe);
        assert!(!interlock.evaluate(Some(50.0)).is_safe);
        assert!(interlock.evaluate(Some(150.0)).is_safe);
    }
}
