//! Platform abstraction traits
//!
//! The only platform service the control core needs beyond its hardware
//! collaborators is a monotonic clock for the autonomous run timer.

pub mod time;

pub use time::{MockTime, TimeSource};
