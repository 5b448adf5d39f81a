//! Wiring helper for simulator-backed runs
//!
//! Builds the full adapter set over one simulated vehicle and lends a
//! wired [`Robot`] to a closure. The adapters only live for the closure,
//! so the shared simulator state stays inspectable before and after.

use std::cell::RefCell;
use std::rc::Rc;

use trailcart_core::parameters::ParameterStore;
use trailcart_core::robot::{Devices, Robot};

use crate::devices::{
    Side, SimChooser, SimDrive, SimEncoder, SimFrontLeft, SimGyro, SimHandle, SimOperator,
    SimRange, SimSolenoid, SimTime,
};
use crate::sim::{SimConfig, SimState};

/// One simulated vehicle plus the configuration the core runs with.
pub struct SimRig {
    state: SimHandle,
    chooser: SimChooser,
    store: ParameterStore,
}

impl SimRig {
    /// Create a rig from simulator config, parameter store, and chooser
    /// selection.
    pub fn new(config: SimConfig, store: ParameterStore, program: Option<&str>) -> Self {
        Self {
            state: Rc::new(RefCell::new(SimState::new(config))),
            chooser: SimChooser::new(program),
            store,
        }
    }

    /// Shared handle to the simulated vehicle.
    pub fn state(&self) -> &SimHandle {
        &self.state
    }

    /// Integrate one tick of vehicle physics.
    pub fn step(&self) {
        self.state.borrow_mut().step();
    }

    /// Script the operator throttle axes.
    pub fn set_axes(&self, left: f32, right: f32) {
        let mut sim = self.state.borrow_mut();
        sim.axes[0] = left; // axis 1
        sim.axes[2] = right; // axis 3
    }

    /// Script the operator buttons (solenoid = button 3, override = 4).
    pub fn set_buttons(&self, solenoid: bool, override_button: bool) {
        let mut sim = self.state.borrow_mut();
        sim.buttons[2] = solenoid;
        sim.buttons[3] = override_button;
    }

    /// Lend a wired robot to the closure.
    pub fn with_robot(&self, f: impl FnOnce(&mut Robot<'_>)) {
        let mut drive = SimDrive(self.state.clone());
        let mut front_left = SimFrontLeft(self.state.clone());
        let mut solenoid = SimSolenoid(self.state.clone());
        let gyro = SimGyro(self.state.clone());
        let left_encoder = SimEncoder {
            handle: self.state.clone(),
            side: Side::Left,
        };
        let right_encoder = SimEncoder {
            handle: self.state.clone(),
            side: Side::Right,
        };
        let rangefinder = SimRange(self.state.clone());
        let operator = SimOperator(self.state.clone());
        let time = SimTime(self.state.clone());

        let io = Devices {
            drive: &mut drive,
            front_left: &mut front_left,
            solenoid: &mut solenoid,
            gyro: &gyro,
            left_encoder: &left_encoder,
            right_encoder: &right_encoder,
            rangefinder: &rangefinder,
            operator: &operator,
            chooser: &self.chooser,
        };
        let mut robot = Robot::new(io, &time, &self.store);
        f(&mut robot);
    }
}
