//! Actuator traits consumed by the control core
//!
//! Two non-drive outputs exist on this robot: a single digital solenoid and
//! a direct analog channel to the front-left drive unit. Both are injected
//! as traits; the platform wires them to real hardware.

/// Single-acting solenoid actuator.
pub trait Solenoid {
    /// Engage or release the solenoid. Held-state semantics: the caller
    /// re-commands the value every tick.
    fn set_engaged(&mut self, engaged: bool) -> Result<(), &'static str>;
}

/// Direct speed command to one motor.
///
/// Used for the front-left drive unit, which teleop can command
/// individually on top of the group-level drive output (see
/// `teleop::arbitrate`).
pub trait MotorChannel {
    /// Set motor speed in [-1.0, +1.0]. Positive is forward.
    fn set_speed(&mut self, speed: f32) -> Result<(), &'static str>;
}
