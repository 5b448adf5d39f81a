//! Parameter storage types
//!
//! A small fixed-capacity key-value store for deployment configuration.
//! Parameters are registered with defaults at bring-up and may be
//! overridden before the control loop starts; the per-subsystem blocks in
//! this module's siblings load and validate typed views of the store.

use super::error::ParameterError;
use bitflags::bitflags;
use heapless::index_map::FnvIndexMap;
use heapless::String;

/// Maximum parameter name length
pub const PARAM_NAME_LEN: usize = 16;

/// Maximum number of parameters
pub const MAX_PARAMS: usize = 32;

/// Maximum string parameter length
pub const MAX_STRING_LEN: usize = 31;

bitflags! {
    /// Parameter flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ParamFlags: u8 {
        /// Parameter is hidden from operator-facing listings
        const HIDDEN = 0b0000_0001;
        /// Parameter cannot be modified after registration
        const READ_ONLY = 0b0000_0010;
    }
}

/// Parameter value types
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// String parameter (max 31 chars)
    String(String<MAX_STRING_LEN>),
    /// Boolean parameter
    Bool(bool),
    /// 32-bit signed integer
    Int(i32),
    /// 32-bit floating point
    Float(f32),
}

/// Parameter metadata
#[derive(Debug, Clone)]
pub struct ParamMetadata {
    /// Parameter flags
    pub flags: ParamFlags,
}

/// Parameter store for deployment configuration
///
/// Stores parameters as key-value pairs with metadata. Registration is
/// idempotent so each subsystem block can register its defaults without
/// caring whether bring-up wiring already did.
pub struct ParameterStore {
    parameters: FnvIndexMap<String<PARAM_NAME_LEN>, ParamValue, MAX_PARAMS>,
    metadata: FnvIndexMap<String<PARAM_NAME_LEN>, ParamMetadata, MAX_PARAMS>,
}

impl ParameterStore {
    /// Create a new empty parameter store
    pub fn new() -> Self {
        Self {
            parameters: FnvIndexMap::new(),
            metadata: FnvIndexMap::new(),
        }
    }

    /// Get parameter value
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        let key = Self::key(name).ok()?;
        self.parameters.get(&key)
    }

    /// Set parameter value
    ///
    /// The parameter must already be registered.
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParameterError> {
        let key = Self::key(name)?;

        if !self.parameters.contains_key(&key) {
            return Err(ParameterError::Unknown);
        }

        if let Some(meta) = self.metadata.get(&key) {
            if meta.flags.contains(ParamFlags::READ_ONLY) {
                return Err(ParameterError::ReadOnly);
            }
        }

        self.parameters.insert(key, value).ok();
        Ok(())
    }

    /// Register a new parameter with default value and flags
    ///
    /// If the parameter already exists this is a no-op, keeping any value
    /// an earlier registration or override put there.
    pub fn register(
        &mut self,
        name: &str,
        default_value: ParamValue,
        flags: ParamFlags,
    ) -> Result<(), ParameterError> {
        let key = Self::key(name)?;

        if self.parameters.contains_key(&key) {
            return Ok(());
        }

        self.parameters
            .insert(key.clone(), default_value)
            .map_err(|_| ParameterError::StoreFull)?;
        self.metadata
            .insert(key, ParamMetadata { flags })
            .map_err(|_| ParameterError::StoreFull)?;
        Ok(())
    }

    /// Number of registered parameters
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// True when no parameters are registered
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    fn key(name: &str) -> Result<String<PARAM_NAME_LEN>, ParameterError> {
        let mut key = String::new();
        key.push_str(name).map_err(|_| ParameterError::NameTooLong)?;
        Ok(key)
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_get() {
        let mut store = ParameterStore::new();
        store
            .register("DRV_MAX_OUT", ParamValue::Float(0.7), ParamFlags::empty())
            .unwrap();

        assert_eq!(store.get("DRV_MAX_OUT"), Some(&ParamValue::Float(0.7)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn register_is_idempotent() {
        let mut store = ParameterStore::new();
        store
            .register("DRV_MAX_OUT", ParamValue::Float(0.7), ParamFlags::empty())
            .unwrap();
        store.set("DRV_MAX_OUT", ParamValue::Float(0.5)).unwrap();

        // Re-registration keeps the overridden value
        store
            .register("DRV_MAX_OUT", ParamValue::Float(0.7), ParamFlags::empty())
            .unwrap();
        assert_eq!(store.get("DRV_MAX_OUT"), Some(&ParamValue::Float(0.5)));
    }

    #[test]
    fn set_unknown_fails() {
        let mut store = ParameterStore::new();
        assert_eq!(
            store.set("NOPE", ParamValue::Int(1)),
            Err(ParameterError::Unknown)
        );
    }

    #[test]
    fn set_read_only_fails() {
        let mut store = ParameterStore::new();
        store
            .register("RNG_THRESH_MM", ParamValue::Int(100), ParamFlags::READ_ONLY)
            .unwrap();

        assert_eq!(
            store.set("RNG_THRESH_MM", ParamValue::Int(50)),
            Err(ParameterError::ReadOnly)
        );
        assert_eq!(store.get("RNG_THRESH_MM"), Some(&ParamValue::Int(100)));
    }

    #[test]
    fn name_too_long_rejected() {
        let mut store = ParameterStore::new();
        assert_eq!(
            store.register(
                "A_NAME_WELL_BEYOND_THE_LIMIT",
                ParamValue::Int(0),
                ParamFlags::empty()
            ),
            Err(ParameterError::NameTooLong)
        );
    }

    #[test]
    fn missing_get_returns_none() {
        let store = ParameterStore::new();
        assert!(store.get("ANYTHING").is_none());
        assert!(store.is_empty());
    }
}
