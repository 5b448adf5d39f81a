//! Drive parameter definitions
//!
//! # Parameters
//!
//! - `DRV_SQUARE` - Apply input squaring in the drive translation
//! - `DRV_LEFT_SPD` - Autonomous cruise speed, left side
//! - `DRV_RIGHT_SPD` - Autonomous cruise speed, right side
//! - `DRV_MAX_OUT` - Output scaling fraction applied at bring-up
//! - `DRV_EXPIRE_S` - Drive watchdog expiration in seconds

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};

/// Default input-squaring setting
const DEFAULT_SQUARE: bool = true;

/// Default autonomous cruise speed (both sides)
const DEFAULT_CRUISE_SPEED: f32 = 0.8;

/// Default output scaling fraction
const DEFAULT_MAX_OUTPUT: f32 = 0.7;

/// Default watchdog expiration in seconds
const DEFAULT_EXPIRATION_S: f32 = 0.1;

/// Cruise speed bounds
const MIN_SPEED: f32 = -1.0;
const MAX_SPEED: f32 = 1.0;

/// Output fraction bounds
const MIN_MAX_OUTPUT: f32 = 0.05;
const MAX_MAX_OUTPUT: f32 = 1.0;

/// Watchdog expiration bounds in seconds
const MIN_EXPIRATION_S: f32 = 0.02;
const MAX_EXPIRATION_S: f32 = 5.0;

/// Drive parameters loaded from the parameter store
#[derive(Debug, Clone, Copy)]
pub struct DriveParams {
    /// Apply sign-preserving input squaring downstream
    pub square_inputs: bool,
    /// Autonomous cruise speed, left side, in [-1.0, +1.0]
    pub left_speed: f32,
    /// Autonomous cruise speed, right side, in [-1.0, +1.0]
    pub right_speed: f32,
    /// Output scaling fraction in (0.0, 1.0]
    pub max_output: f32,
    /// Drive watchdog expiration in seconds
    pub expiration_s: f32,
}

impl Default for DriveParams {
    fn default() -> Self {
        Self {
            square_inputs: DEFAULT_SQUARE,
            left_speed: DEFAULT_CRUISE_SPEED,
            right_speed: DEFAULT_CRUISE_SPEED,
            max_output: DEFAULT_MAX_OUTPUT,
            expiration_s: DEFAULT_EXPIRATION_S,
        }
    }
}

impl DriveParams {
    /// Register drive parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register(
            "DRV_SQUARE",
            ParamValue::Bool(DEFAULT_SQUARE),
            ParamFlags::empty(),
        )?;
        store.register(
            "DRV_LEFT_SPD",
            ParamValue::Float(DEFAULT_CRUISE_SPEED),
            ParamFlags::empty(),
        )?;
        store.register(
            "DRV_RIGHT_SPD",
            ParamValue::Float(DEFAULT_CRUISE_SPEED),
            ParamFlags::empty(),
        )?;
        store.register(
            "DRV_MAX_OUT",
            ParamValue::Float(DEFAULT_MAX_OUTPUT),
            ParamFlags::empty(),
        )?;
        store.register(
            "DRV_EXPIRE_S",
            ParamValue::Float(DEFAULT_EXPIRATION_S),
            ParamFlags::empty(),
        )?;
        Ok(())
    }

    /// Load drive parameters from the store, clamping to valid ranges
    pub fn from_store(store: &ParameterStore) -> Self {
        let square_inputs = match store.get("DRV_SQUARE") {
            Some(ParamValue::Bool(v)) => *v,
            Some(ParamValue::Int(v)) => *v != 0,
            _ => DEFAULT_SQUARE,
        };

        let left_speed = match store.get("DRV_LEFT_SPD") {
            Some(ParamValue::Float(v)) => v.clamp(MIN_SPEED, MAX_SPEED),
            Some(ParamValue::Int(v)) => (*v as f32).clamp(MIN_SPEED, MAX_SPEED),
            _ => DEFAULT_CRUISE_SPEED,
        };

        let right_speed = match store.get("DRV_RIGHT_SPD") {
            Some(ParamValue::Float(v)) => v.clamp(MIN_SPEED, MAX_SPEED),
            Some(ParamValue::Int(v)) => (*v as f32).clamp(MIN_SPEED, MAX_SPEED),
            _ => DEFAULT_CRUISE_SPEED,
        };

        let max_output = match store.get("DRV_MAX_OUT") {
            Some(ParamValue::Float(v)) => v.clamp(MIN_MAX_OUTPUT, MAX_MAX_OUTPUT),
            _ => DEFAULT_MAX_OUTPUT,
        };

        let expiration_s = match store.get("DRV_EXPIRE_S") {
            Some(ParamValue::Float(v)) => v.clamp(MIN_EXPIRATION_S, MAX_EXPIRATION_S),
            _ => DEFAULT_EXPIRATION_S,
        };

        Self {
            square_inputs,
            left_speed,
            right_speed,
            max_output,
            expiration_s,
        }
    }

    /// Validate drive parameters
    pub fn is_valid(&self) -> bool {
        if !(MIN_SPEED..=MAX_SPEED).contains(&self.left_speed) {
            return false;
        }
        if !(MIN_SPEED..=MAX_SPEED).contains(&self.right_speed) {
            return false;
        }
        if !(MIN_MAX_OUTPUT..=MAX_MAX_OUTPUT).contains(&self.max_output) {
            return false;
        }
        if !(MIN_EXPIRATION_S..=MAX_EXPIRATION_S).contains(&self.expiration_s) {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = DriveParams::default();
        assert!(params.square_inputs);
        assert!((params.left_speed - 0.8).abs() < 0.001);
        assert!((params.right_speed - 0.8).abs() < 0.001);
        assert!((params.max_output - 0.7).abs() < 0.001);
        assert!((params.expiration_s - 0.1).abs() < 0.001);
        assert!(params.is_valid());
    }

    #[test]
    fn from_store_uses_registered_defaults() {
        let mut store = ParameterStore::new();
        DriveParams::register_defaults(&mut store).unwrap();

        let params = DriveParams::from_store(&store);
        assert!((params.left_speed - 0.8).abs() < 0.001);
        assert!(params.square_inputs);
    }

    #[test]
    fn from_store_custom_values() {
        let mut store = ParameterStore::new();
        DriveParams::register_defaults(&mut store).unwrap();

        store.set("DRV_SQUARE", ParamValue::Bool(false)).unwrap();
        store.set("DRV_LEFT_SPD", ParamValue::Float(0.5)).unwrap();
        store.set("DRV_RIGHT_SPD", ParamValue::Float(0.5)).unwrap();
        store.set("DRV_MAX_OUT", ParamValue::Float(1.0)).unwrap();

        let params = DriveParams::from_store(&store);
        assert!(!params.square_inputs);
        assert!((params.left_speed - 0.5).abs() < 0.001);
        assert!((params.max_output - 1.0).abs() < 0.001);
    }

    #[test]
    fn from_store_clamps_speeds() {
        let mut store = ParameterStore::new();
        DriveParams::register_defaults(&mut store).unwrap();

        store.set("DRV_LEFT_SPD", ParamValue::Float(3.0)).unwrap();
        store.set("DRV_RIGHT_SPD", ParamValue::Float(-3.0)).unwrap();

        let params = DriveParams::from_store(&store);
        assert!((params.left_speed - 1.0).abs() < 0.001);
        assert!((params.right_speed + 1.0).abs() < 0.001);
    }

    #[test]
    fn validation_rejects_out_of_range() {
        let params = DriveParams {
            max_output: 1.5,
            ..DriveParams::default()
        };
        assert!(!params.is_valid());

        let params = DriveParams {
            left_speed: -2.0,
            ..DriveParams::default()
        };
        assert!(!params.is_valid());
    }
}
