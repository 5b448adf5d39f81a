//! Trait adapters exposing the simulator to the control core
//!
//! Each adapter wraps a shared handle to the [`SimState`] and implements
//! one collaborator trait from `trailcart_core`. The core borrows the
//! adapters exactly the way it borrows real device wrappers on the
//! platform, so nothing in the core knows it is driving a simulation.

use std::cell::RefCell;
use std::rc::Rc;

use trailcart_core::actuators::{MotorChannel, Solenoid};
use trailcart_core::drive::{square_input, DriveInterface};
use trailcart_core::mode::ProgramChooser;
use trailcart_core::operator::OperatorInput;
use trailcart_core::sensors::{DistanceEncoder, Gyro, RangeFinder};
use trailcart_core::traits::TimeSource;

use crate::sim::SimState;

/// Shared handle to the simulated vehicle.
pub type SimHandle = Rc<RefCell<SimState>>;

/// Which wheel side an encoder adapter reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Drive adapter: applies shaping and scaling the way the platform's
/// drive layer would, then stores the outputs for the physics step.
pub struct SimDrive(pub SimHandle);

impl DriveInterface for SimDrive {
    fn tank_drive(
        &mut self,
        left: f32,
        right: f32,
        square_inputs: bool,
    ) -> Result<(), &'static str> {
        let mut sim = self.0.borrow_mut();

        let (mut left, mut right) = if square_inputs {
            (square_input(left), square_input(right))
        } else {
            (left, right)
        };
        left = left.clamp(-1.0, 1.0) * sim.max_output;
        right = right.clamp(-1.0, 1.0) * sim.max_output;

        sim.motor_left = left;
        sim.motor_right = right;
        sim.last_drive_us = sim.sim_time_us;
        Ok(())
    }

    fn set_safety_timeout_enabled(&mut self, enabled: bool) -> Result<(), &'static str> {
        self.0.borrow_mut().safety_timeout_enabled = enabled;
        Ok(())
    }

    fn set_max_output(&mut self, fraction: f32) -> Result<(), &'static str> {
        self.0.borrow_mut().max_output = fraction.clamp(0.0, 1.0);
        Ok(())
    }

    fn set_expiration(&mut self, seconds: f32) -> Result<(), &'static str> {
        self.0.borrow_mut().expiration_s = seconds;
        Ok(())
    }
}

/// Direct front-left unit channel. Recorded for telemetry; the two-side
/// physics model does not split wheels within a side.
pub struct SimFrontLeft(pub SimHandle);

impl MotorChannel for SimFrontLeft {
    fn set_speed(&mut self, speed: f32) -> Result<(), &'static str> {
        self.0.borrow_mut().front_left_cmd = Some(speed);
        Ok(())
    }
}

/// Solenoid adapter.
pub struct SimSolenoid(pub SimHandle);

impl Solenoid for SimSolenoid {
    fn set_engaged(&mut self, engaged: bool) -> Result<(), &'static str> {
        self.0.borrow_mut().solenoid = engaged;
        Ok(())
    }
}

/// Gyro adapter reporting the hardware's clockwise-positive heading.
pub struct SimGyro(pub SimHandle);

impl Gyro for SimGyro {
    fn heading_degrees(&self) -> Option<f32> {
        Some(self.0.borrow_mut().gyro_raw_deg())
    }
}

/// Cumulative wheel odometer for one side.
pub struct SimEncoder {
    pub handle: SimHandle,
    pub side: Side,
}

impl DistanceEncoder for SimEncoder {
    fn distance_m(&self) -> Option<f32> {
        let sim = self.handle.borrow();
        Some(match self.side {
            Side::Left => sim.left_dist_m,
            Side::Right => sim.right_dist_m,
        })
    }
}

/// Forward range sensor adapter.
pub struct SimRange(pub SimHandle);

impl RangeFinder for SimRange {
    fn range_mm(&self) -> Option<f32> {
        Some(self.0.borrow_mut().range_mm())
    }
}

/// Operator input adapter backed by the scripted axes/buttons in the
/// simulator state.
pub struct SimOperator(pub SimHandle);

impl OperatorInput for SimOperator {
    fn axis(&self, axis: usize) -> f32 {
        let sim = self.0.borrow();
        if (1..=sim.axes.len()).contains(&axis) {
            sim.axes[axis - 1]
        } else {
            0.0
        }
    }

    fn button(&self, button: usize) -> bool {
        let sim = self.0.borrow();
        if (1..=sim.buttons.len()).contains(&button) {
            sim.buttons[button - 1]
        } else {
            false
        }
    }
}

/// Program chooser with a fixed selection.
pub struct SimChooser {
    selection: Option<String>,
}

impl SimChooser {
    pub fn new(selection: Option<&str>) -> Self {
        Self {
            selection: selection.map(str::to_owned),
        }
    }
}

impl ProgramChooser for SimChooser {
    fn selected(&self) -> Option<&str> {
        self.selection.as_deref()
    }
}

/// Time source driven by the simulation clock.
pub struct SimTime(pub SimHandle);

impl TimeSource for SimTime {
    fn now_us(&self) -> u64 {
        self.0.borrow().sim_time_us
    }
}
