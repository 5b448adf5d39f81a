//! Parameter management types and utilities
//!
//! Deployment configuration for the control core: a fixed-capacity store
//! plus typed per-subsystem parameter blocks. Bring-up wiring registers
//! defaults, optionally overrides them, and the core loads validated
//! snapshots at construction.

pub mod auton;
pub mod drive;
pub mod error;
pub mod range;
pub mod storage;

pub use auton::{AutoParams, POLICY_DISTANCE, POLICY_ELAPSED_TIME};
pub use drive::DriveParams;
pub use error::ParameterError;
pub use range::RangeParams;
pub use storage::{
    ParamFlags, ParamMetadata, ParamValue, ParameterStore, MAX_PARAMS, MAX_STRING_LEN,
    PARAM_NAME_LEN,
};

/// Register every parameter block's defaults in one call.
pub fn register_all_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
    DriveParams::register_defaults(store)?;
    AutoParams::register_defaults(store)?;
    RangeParams::register_defaults(store)?;
    Ok(())
}
