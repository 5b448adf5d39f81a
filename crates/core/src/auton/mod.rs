//! Autonomous program policies
//!
//! The pure decision side of autonomous operation: which program is
//! running, when its stopping condition is met, and what drive command
//! falls out. Applying the command to hardware is the dispatcher's job
//! (`robot`), and the per-run latched state lives in `mode::auton`.

use crate::drive::DriveCommand;
use crate::parameters::DriveParams;
use crate::safety::SafetyState;

/// Chooser name of the default program.
pub const DEFAULT_PROGRAM_NAME: &str = "Default";
/// Chooser name of the custom program.
pub const CUSTOM_PROGRAM_NAME: &str = "Custom";

/// Autonomous program, latched once at autonomous-mode entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoProgram {
    /// Drive straight until the stopping condition is met.
    #[default]
    Default,
    /// Reserved extension point. Issues no commands.
    Custom,
}

impl AutoProgram {
    /// Resolve a chooser name. Returns `None` for unrecognized names so the
    /// caller can log the fallback it applies.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            DEFAULT_PROGRAM_NAME => Some(AutoProgram::Default),
            CUSTOM_PROGRAM_NAME => Some(AutoProgram::Custom),
            _ => None,
        }
    }

    /// Program name as the chooser spells it.
    pub fn name(&self) -> &'static str {
        match self {
            AutoProgram::Default => DEFAULT_PROGRAM_NAME,
            AutoProgram::Custom => CUSTOM_PROGRAM_NAME,
        }
    }
}

/// Stopping condition for the Default program.
///
/// Exactly one policy is active per deployment; it is selected by
/// configuration at autonomous entry and never switches mid-run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StopPolicy {
    /// Stop once the run timer exceeds this many seconds.
    ElapsedTime { stop_after_s: f32 },
    /// Stop once the average wheel travel since entry reaches this many
    /// meters.
    Distance { target_m: f32 },
}

impl StopPolicy {
    /// Whether the stopping condition holds for the given progress.
    ///
    /// Both progress measures are monotone within a run, so once met the
    /// condition stays met for the rest of the run.
    pub fn is_met(&self, progress: AutoProgress) -> bool {
        match *self {
            StopPolicy::ElapsedTime { stop_after_s } => progress.elapsed_s > stop_after_s,
            StopPolicy::Distance { target_m } => progress.traveled_m >= target_m,
        }
    }
}

/// Progress of the active run, measured from autonomous entry.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AutoProgress {
    /// Seconds since entry
    pub elapsed_s: f32,
    /// Average of left/right wheel travel since entry, meters
    pub traveled_m: f32,
}

/// Decide this tick's drive command.
///
/// Pure function of the latched program, the configured policy, this
/// tick's progress, and this tick's safety flag. `None` means the program
/// issues no drive call at all (the Custom placeholder), which is distinct
/// from an explicit stop while the drive watchdog is disabled.
///
/// The decision is re-evaluated every tick: an unsafe reading commands a
/// stop but latches nothing, so motion resumes by itself once the reading
/// clears, as long as the stopping condition is still unmet.
pub fn drive_command(
    program: AutoProgram,
    policy: StopPolicy,
    params: &DriveParams,
    progress: AutoProgress,
    safety: SafetyState,
) -> Option<DriveCommand> {
    match program {
        AutoProgram::Custom => None,
        AutoProgram::Default => {
            let cmd = if safety.is_safe && !policy.is_met(progress) {
                DriveCommand::new(params.left_speed, params.right_speed, params.square_inputs)
            } else {
                DriveCommand::stop(params.square_inputs)
            };
            Some(cmd)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> DriveParams {
        DriveParams {
            left_speed: 0.8,
            right_speed: 0.8,
            ..DriveParams::default()
        }
    }

    fn progress(elapsed_s: f32, traveled_m: f32) -> AutoProgress {
        AutoProgress {
            elapsed_s,
            traveled_m,
        }
    }

    // ========== Program Names ==========

    #[test]
    fn program_names_round_trip() {
        assert_eq!(AutoProgram::from_name("Default"), Some(AutoProgram::Default));
        assert_eq!(AutoProgram::from_name("Custom"), Some(AutoProgram::Custom));
        assert_eq!(AutoProgram::from_name("Sideways"), None);
        assert_eq!(AutoProgram::Default.name(), "Default");
        assert_eq!(AutoProgram::Custom.name(), "Custom");
    }

    // ========== Stop Policies ==========

    #[test]
    fn time_policy_stops_after_threshold() {
        let policy = StopPolicy::ElapsedTime { stop_after_s: 4.0 };
        assert!(!policy.is_met(progress(3.9, 0.0)));
        assert!(!policy.is_met(progress(4.0, 0.0)));
        assert!(policy.is_met(progress(4.1, 0.0)));
        assert!(policy.is_met(progress(5.0, 0.0)));
    }

    #[test]
    fn distance_policy_stops_at_target() {
        let policy = StopPolicy::Distance { target_m: 5.0 };
        assert!(!policy.is_met(progress(0.0, 4.9)));
        assert!(policy.is_met(progress(0.0, 5.0)));
        assert!(policy.is_met(progress(0.0, 5.5)));
    }

    // ========== Default Program ==========

    #[test]
    fn default_drives_below_target() {
        // Distance policy, halfway there, safe: keep driving
        let cmd = drive_command(
            AutoProgram::Default,
            StopPolicy::Distance { target_m: 5.0 },
            &params(),
            progress(1.0, 2.5),
            SafetyState::SAFE,
        )
        .unwrap();

        assert_eq!(cmd.left, 0.8);
        assert_eq!(cmd.right, 0.8);
    }

    #[test]
    fn default_stops_at_target() {
        let cmd = drive_command(
            AutoProgram::Default,
            StopPolicy::Distance { target_m: 5.0 },
            &params(),
            progress(2.0, 5.5),
            SafetyState::SAFE,
        )
        .unwrap();

        assert!(cmd.is_stop());
    }

    #[test]
    fn default_stops_after_time() {
        let cmd = drive_command(
            AutoProgram::Default,
            StopPolicy::ElapsedTime { stop_after_s: 4.0 },
            &params(),
            progress(5.0, 0.0),
            SafetyState::SAFE,
        )
        .unwrap();

        assert!(cmd.is_stop());
    }

    #[test]
    fn default_stops_while_unsafe() {
        let cmd = drive_command(
            AutoProgram::Default,
            StopPolicy::Distance { target_m: 5.0 },
            &params(),
            progress(1.0, 1.0),
            SafetyState::UNSAFE,
        )
        .unwrap();

        assert!(cmd.is_stop());
    }

    #[test]
    fn unsafe_stop_is_resumable() {
        // The decision carries no memory: the same progress with the flag
        // restored drives again
        let policy = StopPolicy::Distance { target_m: 5.0 };
        let p = progress(1.0, 1.0);

        let stopped = drive_command(AutoProgram::Default, policy, &params(), p, SafetyState::UNSAFE)
            .unwrap();
        assert!(stopped.is_stop());

        let resumed = drive_command(AutoProgram::Default, policy, &params(), p, SafetyState::SAFE)
            .unwrap();
        assert_eq!(resumed.left, 0.8);
        assert_eq!(resumed.right, 0.8);
    }

    #[test]
    fn met_condition_stays_stopped() {
        // Progress is monotone, so re-evaluating later in the run keeps the
        // stop in place
        let policy = StopPolicy::ElapsedTime { stop_after_s: 4.0 };
        for elapsed in [4.1_f32, 6.0, 30.0] {
            let cmd = drive_command(
                AutoProgram::Default,
                policy,
                &params(),
                progress(elapsed, 0.0),
                SafetyState::SAFE,
            )
            .unwrap();
            assert!(cmd.is_stop(), "still stopped at t={}", elapsed);
        }
    }

    // ========== Custom Program ==========

    #[test]
    fn custom_issues_no_command() {
        let cmd = drive_command(
            AutoProgram::Custom,
            StopPolicy::Distance { target_m: 5.0 },
            &params(),
            progress(0.0, 0.0),
            SafetyState::SAFE,
        );
        assert_eq!(cmd, None);
    }
}
