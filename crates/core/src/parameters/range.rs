//! Range interlock parameter definitions
//!
//! # Parameters
//!
//! - `RNG_THRESH_MM` - Interlock trip threshold in millimeters

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};

/// Default trip threshold in millimeters
const DEFAULT_THRESHOLD_MM: i32 = 100;

/// Threshold bounds in millimeters
const MIN_THRESHOLD_MM: i32 = 10;
const MAX_THRESHOLD_MM: i32 = 10_000;

/// Range interlock parameters loaded from the parameter store
#[derive(Debug, Clone, Copy)]
pub struct RangeParams {
    /// Trip threshold in millimeters; readings at or below are unsafe
    pub threshold_mm: i32,
}

impl Default for RangeParams {
    fn default() -> Self {
        Self {
            threshold_mm: DEFAULT_THRESHOLD_MM,
        }
    }
}

impl RangeParams {
    /// Register range parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register(
            "RNG_THRESH_MM",
            ParamValue::Int(DEFAULT_THRESHOLD_MM),
            ParamFlags::empty(),
        )?;
        Ok(())
    }

    /// Load range parameters from the store, clamping to valid range
    pub fn from_store(store: &ParameterStore) -> Self {
        let threshold_mm = match store.get("RNG_THRESH_MM") {
            Some(ParamValue::Int(v)) => (*v).clamp(MIN_THRESHOLD_MM, MAX_THRESHOLD_MM),
            Some(ParamValue::Float(v)) => (*v as i32).clamp(MIN_THRESHOLD_MM, MAX_THRESHOLD_MM),
            _ => DEFAULT_THRESHOLD_MM,
        };

        Self { threshold_mm }
    }

    /// Validate range parameters
    pub fn is_valid(&self) -> bool {
        (MIN_THRESHOLD_MM..=MAX_THRESHOLD_MM).contains(&self.threshold_mm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = RangeParams::default();
        assert_eq!(params.threshold_mm, 100);
        assert!(params.is_valid());
    }

    #[test]
    fn from_store_custom_value() {
        let mut store = ParameterStore::new();
        RangeParams::register_defaults(&mut store).unwrap();
        store.set("RNG_THRESH_MM", ParamValue::Int(250)).unwrap();

        let params = RangeParams::from_store(&store);
        assert_eq!(params.threshold_mm, 250);
    }

    #[test]
    fn from_store_clamps() {
        let mut store = ParameterStore::new();
        RangeParams::register_defaults(&mut store).unwrap();

        store.set("RNG_THRESH_MM", ParamValue::Int(1)).unwrap();
        assert_eq!(RangeParams::from_store(&store).threshold_mm, MIN_THRESHOLD_MM);

        store
            .set("RNG_THRESH_MM", ParamValue::Int(1_000_000))
            .unwrap();
        assert_eq!(RangeParams::from_store(&store).threshold_mm, MAX_THRESHOLD_MM);
    }
}
