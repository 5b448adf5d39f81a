//! Teleoperated command arbitration
//!
//! Maps one tick's operator inputs and safety flag to the full actuation
//! intent: the tank-drive command, the solenoid state, and the optional
//! front-left unit override. Pure decision only; the dispatcher applies
//! the result to the collaborators.

use crate::drive::DriveCommand;
use crate::operator::OperatorState;
use crate::safety::SafetyState;

/// Speed commanded to the front-left unit while the override buttons are
/// held.
pub const FRONT_LEFT_OVERRIDE_SPEED: f32 = 1.0;

/// Everything teleop wants to actuate this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeleopCommand {
    /// Group-level tank-drive command
    pub drive: DriveCommand,
    /// Solenoid held-state for this tick
    pub solenoid_engaged: bool,
    /// Direct speed for the front-left unit, when the override is active
    pub front_left_override: Option<f32>,
}

/// Arbitrate one tick of teleoperated control.
///
/// - Safe: the two throttle axes pass through as a tank-drive command with
///   input squaring enabled per configuration.
/// - Unsafe: the drive command is exactly zero. The operator's stick
///   positions are ignored silently; no error is surfaced from here.
/// - Button 3 held: solenoid engaged, independent of the safety flag.
/// - Buttons 3 and 4 held together: the front-left unit is additionally
///   commanded to full forward, in parallel with the group-level command
///   that already drives that unit. Two commands reach the same hardware
///   in one tick; this overlap is preserved as observed behavior rather
///   than merged (see DESIGN.md).
pub fn arbitrate(state: OperatorState, safety: SafetyState, square_inputs: bool) -> TeleopCommand {
    let drive = if safety.is_safe {
        DriveCommand::new(state.left_axis, state.right_axis, square_inputs)
    } else {
        DriveCommand::stop(square_inputs)
    };

    let solenoid_engaged = state.solenoid_button;

    let front_left_override = if state.solenoid_button && state.override_button {
        Some(FRONT_LEFT_OVERRIDE_SPEED)
    } else {
        None
    };

    TeleopCommand {
        drive,
        solenoid_engaged,
        front_left_override,
    }
}
