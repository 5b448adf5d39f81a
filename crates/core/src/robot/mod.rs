//! Per-tick dispatcher
//!
//! [`Robot`] is the piece the external scheduling host talks to. Once per
//! tick the host reports the active mode and the dispatcher:
//!
//! 1. refreshes the pose estimate from the encoders and gyro (every mode)
//! 2. recomputes the safety interlock from the range sensor (every mode)
//! 3. runs the mode's one-time entry actions if the mode just changed
//! 4. runs the mode's periodic behavior exactly once
//!
//! Steps 1 and 2 always come first so command decisions never consume
//! stale-by-one-tick values. Disabled and Test dispatch to nothing.
//!
//! A collaborator failure inside a periodic handler does not propagate to
//! the host: the tick degrades to a best-effort stop command and an error
//! log, and the next tick starts clean.

use crate::actuators::{MotorChannel, Solenoid};
use crate::drive::DriveInterface;
use crate::mode::{AutonomousMode, ProgramChooser, RobotMode};
use crate::odometry::{DifferentialOdometry, Pose2d};
use crate::operator::{OperatorInput, OperatorState};
use crate::parameters::{AutoParams, DriveParams, ParameterStore, RangeParams};
use crate::safety::{RangeInterlock, SafetyState};
use crate::sensors::{DistanceEncoder, Gyro, RangeFinder};
use crate::teleop;
use crate::traits::TimeSource;

/// The injected collaborators.
///
/// The core holds these for its lifetime but never owns the hardware
/// behind them; construction and teardown belong to the platform wiring.
pub struct Devices<'a> {
    /// Differential drive abstraction
    pub drive: &'a mut dyn DriveInterface,
    /// Direct channel to the front-left drive unit
    pub front_left: &'a mut dyn MotorChannel,
    /// Digital solenoid actuator
    pub solenoid: &'a mut dyn Solenoid,
    /// Heading gyroscope
    pub gyro: &'a dyn Gyro,
    /// Left-side wheel encoder
    pub left_encoder: &'a dyn DistanceEncoder,
    /// Right-side wheel encoder
    pub right_encoder: &'a dyn DistanceEncoder,
    /// Forward range sensor
    pub rangefinder: &'a dyn RangeFinder,
    /// Operator input device
    pub operator: &'a dyn OperatorInput,
    /// Autonomous program chooser
    pub chooser: &'a dyn ProgramChooser,
}

/// Tick-driven control core for the trailcart robot.
pub struct Robot<'a> {
    io: Devices<'a>,
    time: &'a dyn TimeSource,

    drive_params: DriveParams,
    auto_params: AutoParams,
    interlock: RangeInterlock,
    odometry: DifferentialOdometry,

    active: Option<RobotMode>,
    auton: Option<AutonomousMode>,
}

impl<'a> Robot<'a> {
    /// Build the core from its collaborators and the deployment
    /// configuration.
    pub fn new(io: Devices<'a>, time: &'a dyn TimeSource, store: &ParameterStore) -> Self {
        let drive_params = DriveParams::from_store(store);
        let auto_params = AutoParams::from_store(store);
        let range_params = RangeParams::from_store(store);

        Self {
            io,
            time,
            drive_params,
            auto_params,
            interlock: RangeInterlock::new(range_params.threshold_mm as f32),
            odometry: DifferentialOdometry::new(Pose2d::default()),
            active: None,
            auton: None,
        }
    }

    /// One-time bring-up, before the first tick.
    ///
    /// Applies the static drive configuration: output scaling and the
    /// watchdog expiration.
    pub fn init(&mut self) -> Result<(), &'static str> {
        self.io.drive.set_max_output(self.drive_params.max_output)?;
        self.io.drive.set_expiration(self.drive_params.expiration_s)?;
        crate::log_info!(
            "Robot up: max output {}, watchdog {} s",
            self.drive_params.max_output,
            self.drive_params.expiration_s
        );
        Ok(())
    }

    /// Run one host tick in the given mode.
    pub fn tick(&mut self, mode: RobotMode) {
        // Pose and safety refresh before any command decision
        let left_m = self.io.left_encoder.distance_m();
        let right_m = self.io.right_encoder.distance_m();
        let heading = self.io.gyro.heading_degrees();
        self.odometry.update(heading, left_m, right_m);

        let safety = self.interlock.evaluate(self.io.rangefinder.range_mm());

        if self.active != Some(mode) {
            self.on_mode_entry(mode);
            self.active = Some(mode);
        }

        let result = match mode {
            RobotMode::Disabled | RobotMode::Test => Ok(()),
            RobotMode::Autonomous => self.autonomous_periodic(safety),
            RobotMode::Teleop => self.teleop_periodic(safety),
        };

        if let Err(e) = result {
            crate::log_error!("{} tick failed: {}", mode.name(), e);
            // Degrade to the last-known-safe command
            let _ = self
                .io
                .drive
                .tank_drive(0.0, 0.0, self.drive_params.square_inputs);
        }
    }

    /// Current pose estimate.
    pub fn pose(&self) -> Pose2d {
        self.odometry.pose()
    }

    /// Mode that ran on the most recent tick.
    pub fn active_mode(&self) -> Option<RobotMode> {
        self.active
    }

    /// The latched autonomous run, while one is active.
    pub fn auton(&self) -> Option<&AutonomousMode> {
        self.auton.as_ref()
    }

    fn on_mode_entry(&mut self, mode: RobotMode) {
        crate::log_info!("Entering {} mode", mode.name());

        // A mode change cancels any latched run
        self.auton = None;

        match mode {
            RobotMode::Autonomous => {
                self.auton = Some(AutonomousMode::enter(
                    self.io.chooser.selected(),
                    self.auto_params.stop_policy(),
                    self.time.now_us(),
                    self.odometry.wheel_distances(),
                ));
                // The core owns the command cadence during autonomous
                if self.io.drive.set_safety_timeout_enabled(false).is_err() {
                    crate::log_warn!("Could not disable drive watchdog");
                }
            }
            RobotMode::Teleop => {
                if self.io.drive.set_safety_timeout_enabled(true).is_err() {
                    crate::log_warn!("Could not enable drive watchdog");
                }
            }
            RobotMode::Disabled | RobotMode::Test => {}
        }
    }

    fn autonomous_periodic(&mut self, safety: SafetyState) -> Result<(), &'static str> {
        let run = self.auton.as_ref().ok_or("autonomous run state missing")?;
        let progress = run.progress(self.time.now_us(), self.odometry.wheel_distances());
        let command = run.update(progress, safety, &self.drive_params);

        match command {
            Some(cmd) => cmd.apply(self.io.drive),
            // The Custom placeholder issues no drive call at all
            None => Ok(()),
        }
    }

    fn teleop_periodic(&mut self, safety: SafetyState) -> Result<(), &'static str> {
        let state = OperatorState::read(self.io.operator);
        let command = teleop::arbitrate(state, safety, self.drive_params.square_inputs);

        command.drive.apply(self.io.drive)?;
        self.io.solenoid.set_engaged(command.solenoid_engaged)?;
        if let Some(speed) = command.front_left_override {
            self.io.front_left.set_speed(speed)?;
        }
        Ok(())
    }
}
