//! Autonomous run state
//!
//! Everything latched at autonomous-mode entry: the selected program, the
//! stopping policy, and the progress baselines (entry time, entry wheel
//! distances). The state is immutable for the life of the run; a mode
//! change discards it and a re-entry builds a fresh one.

use crate::auton::{self, AutoProgram, AutoProgress, StopPolicy};
use crate::drive::DriveCommand;
use crate::parameters::DriveParams;
use crate::safety::SafetyState;

/// State of one autonomous run.
#[derive(Debug, Clone, Copy)]
pub struct AutonomousMode {
    program: AutoProgram,
    policy: StopPolicy,
    entered_at_us: u64,
    origin_left_m: f32,
    origin_right_m: f32,
}

impl AutonomousMode {
    /// Latch a new run at mode entry.
    ///
    /// # Arguments
    ///
    /// * `selection` - Chooser reading; `None` falls back to the default
    ///   program, unrecognized names fall back with a warning
    /// * `policy` - Configured stopping policy for this deployment
    /// * `now_us` - Entry timestamp, the run timer baseline
    /// * `wheel_origin` - Cumulative wheel distances at entry, left then
    ///   right, the travel baseline
    pub fn enter(
        selection: Option<&str>,
        policy: StopPolicy,
        now_us: u64,
        wheel_origin: (f32, f32),
    ) -> Self {
        let program = match selection {
            Some(name) => AutoProgram::from_name(name).unwrap_or_else(|| {
                crate::log_warn!("Unknown autonomous program, using default");
                AutoProgram::Default
            }),
            None => AutoProgram::Default,
        };
        crate::log_info!("Auto selected: {}", program.name());

        Self {
            program,
            policy,
            entered_at_us: now_us,
            origin_left_m: wheel_origin.0,
            origin_right_m: wheel_origin.1,
        }
    }

    /// The latched program.
    pub fn program(&self) -> AutoProgram {
        self.program
    }

    /// The configured stopping policy.
    pub fn policy(&self) -> StopPolicy {
        self.policy
    }

    /// Measure run progress against the entry baselines.
    ///
    /// # Arguments
    ///
    /// * `now_us` - Current timestamp
    /// * `wheel_m` - Current cumulative wheel distances, left then right
    pub fn progress(&self, now_us: u64, wheel_m: (f32, f32)) -> AutoProgress {
        let elapsed_s = now_us.saturating_sub(self.entered_at_us) as f32 / 1_000_000.0;
        let traveled_m =
            0.5 * ((wheel_m.0 - self.origin_left_m) + (wheel_m.1 - self.origin_right_m));
        AutoProgress {
            elapsed_s,
            traveled_m,
        }
    }

    /// Decide this tick's drive command for the run.
    pub fn update(
        &self,
        progress: AutoProgress,
        safety: SafetyState,
        params: &DriveParams,
    ) -> Option<DriveCommand> {
        auton::drive_command(self.program, self.policy, params, progress, safety)
    }
}
