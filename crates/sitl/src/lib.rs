//! trailcart_sitl - Software-in-the-loop harness for the trailcart core
//!
//! A lightweight differential-drive simulator with no external transport:
//! the simulated vehicle state sits behind the same collaborator traits the
//! real platform implements, so the unchanged control core drives it tick
//! for tick. Suitable for CI and rapid iteration.
//!
//! # Modules
//!
//! - [`sim`]: Vehicle physics, sensor models, and configuration
//! - [`devices`]: Trait adapters exposing the simulator to the core
//! - [`rig`]: Wiring helper that builds a core `Robot` over a simulator

pub mod devices;
pub mod rig;
pub mod sim;

pub use rig::SimRig;
pub use sim::{SimConfig, SimState};
