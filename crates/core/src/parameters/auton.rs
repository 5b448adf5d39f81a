//! Autonomous parameter definitions
//!
//! # Parameters
//!
//! - `AUTO_POLICY` - Stopping policy selector (0=elapsed time, 1=distance)
//! - `AUTO_STOP_TIME` - Stop threshold in seconds (elapsed-time policy)
//! - `AUTO_TARGET_DIST` - Target travel in meters (distance policy)
//!
//! Exactly one policy is active per deployment; the selector picks which
//! threshold applies.

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use crate::auton::StopPolicy;

/// Policy selector value for the elapsed-time policy
pub const POLICY_ELAPSED_TIME: i32 = 0;
/// Policy selector value for the traveled-distance policy
pub const POLICY_DISTANCE: i32 = 1;

/// Default policy selector (traveled distance)
const DEFAULT_POLICY: i32 = POLICY_DISTANCE;

/// Default stop time in seconds
const DEFAULT_STOP_TIME_S: f32 = 4.0;

/// Default target distance in meters
const DEFAULT_TARGET_DIST_M: f32 = 5.0;

/// Stop time bounds in seconds
const MIN_STOP_TIME_S: f32 = 0.1;
const MAX_STOP_TIME_S: f32 = 60.0;

/// Target distance bounds in meters
const MIN_TARGET_DIST_M: f32 = 0.1;
const MAX_TARGET_DIST_M: f32 = 100.0;

/// Autonomous parameters loaded from the parameter store
#[derive(Debug, Clone, Copy)]
pub struct AutoParams {
    /// Stopping policy selector (0=elapsed time, 1=distance)
    pub policy: i32,
    /// Stop threshold in seconds for the elapsed-time policy
    pub stop_time_s: f32,
    /// Target travel in meters for the distance policy
    pub target_dist_m: f32,
}

impl Default for AutoParams {
    fn default() -> Self {
        Self {
            policy: DEFAULT_POLICY,
            stop_time_s: DEFAULT_STOP_TIME_S,
            target_dist_m: DEFAULT_TARGET_DIST_M,
        }
    }
}

impl AutoParams {
    /// Register autonomous parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register(
            "AUTO_POLICY",
            ParamValue::Int(DEFAULT_POLICY),
            ParamFlags::empty(),
        )?;
        store.register(
            "AUTO_STOP_TIME",
            ParamValue::Float(DEFAULT_STOP_TIME_S),
            ParamFlags::empty(),
        )?;
        store.register(
            "AUTO_TARGET_DIST",
            ParamValue::Float(DEFAULT_TARGET_DIST_M),
            ParamFlags::empty(),
        )?;
        Ok(())
    }

    /// Load autonomous parameters from the store, clamping to valid ranges
    pub fn from_store(store: &ParameterStore) -> Self {
        let policy = match store.get("AUTO_POLICY") {
            Some(ParamValue::Int(v)) => (*v).clamp(POLICY_ELAPSED_TIME, POLICY_DISTANCE),
            _ => DEFAULT_POLICY,
        };

        let stop_time_s = match store.get("AUTO_STOP_TIME") {
            Some(ParamValue::Float(v)) => v.clamp(MIN_STOP_TIME_S, MAX_STOP_TIME_S),
            Some(ParamValue::Int(v)) => (*v as f32).clamp(MIN_STOP_TIME_S, MAX_STOP_TIME_S),
            _ => DEFAULT_STOP_TIME_S,
        };

        let target_dist_m = match store.get("AUTO_TARGET_DIST") {
            Some(ParamValue::Float(v)) => v.clamp(MIN_TARGET_DIST_M, MAX_TARGET_DIST_M),
            Some(ParamValue::Int(v)) => (*v as f32).clamp(MIN_TARGET_DIST_M, MAX_TARGET_DIST_M),
            _ => DEFAULT_TARGET_DIST_M,
        };

        Self {
            policy,
            stop_time_s,
            target_dist_m,
        }
    }

    /// The configured stopping policy with its threshold
    pub fn stop_policy(&self) -> StopPolicy {
        if self.policy == POLICY_ELAPSED_TIME {
            StopPolicy::ElapsedTime {
                stop_after_s: self.stop_time_s,
            }
        } else {
            StopPolicy::Distance {
                target_m: self.target_dist_m,
            }
        }
    }

    /// Validate autonomous parameters
    pub fn is_valid(&self) -> bool {
        if !(POLICY_ELAPSED_TIME..=POLICY_DISTANCE).contains(&self.policy) {
            return false;
        }
        if !(MIN_STOP_TIME_S..=MAX_STOP_TIME_S).contains(&self.stop_time_s) {
            return false;
        }
        if !(MIN_TARGET_DIST_M..=MAX_TARGET_DIST_M).contains(&self.target_dist_m) {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_select_distance_policy() {
        let params = AutoParams::default();
        assert!(params.is_valid());
        assert_eq!(
            params.stop_policy(),
            StopPolicy::Distance { target_m: 5.0 }
        );
    }

    #[test]
    fn from_store_elapsed_time_policy() {
        let mut store = ParameterStore::new();
        AutoParams::register_defaults(&mut store).unwrap();

        store
            .set("AUTO_POLICY", ParamValue::Int(POLICY_ELAPSED_TIME))
            .unwrap();
        store
            .set("AUTO_STOP_TIME", ParamValue::Float(4.0))
            .unwrap();

        let params = AutoParams::from_store(&store);
        assert_eq!(
            params.stop_policy(),
            StopPolicy::ElapsedTime { stop_after_s: 4.0 }
        );
    }

    #[test]
    fn from_store_clamps_selector() {
        let mut store = ParameterStore::new();
        AutoParams::register_defaults(&mut store).unwrap();

        store.set("AUTO_POLICY", ParamValue::Int(7)).unwrap();
        let params = AutoParams::from_store(&store);
        assert_eq!(params.policy, POLICY_DISTANCE);
    }

    #[test]
    fn from_store_clamps_thresholds() {
        let mut store = ParameterStore::new();
        AutoParams::register_defaults(&mut store).unwrap();

        store
            .set("AUTO_TARGET_DIST", ParamValue::Float(1000.0))
            .unwrap();
        store
            .set("AUTO_STOP_TIME", ParamValue::Float(0.0))
            .unwrap();

        let params = AutoParams::from_store(&store);
        assert!((params.target_dist_m - MAX_TARGET_DIST_M).abs() < 0.001);
        assert!((params.stop_time_s - MIN_STOP_TIME_S).abs() < 0.001);
    }

    #[test]
    fn validation_rejects_bad_selector() {
        let params = AutoParams {
            policy: 3,
            ..AutoParams::default()
        };
        assert!(!params.is_valid());
    }
}
