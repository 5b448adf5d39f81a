//! Lightweight differential-drive simulation
//!
//! Built-in physics with no external dependencies: skid-steer kinematics
//! integrated at the tick rate, cumulative wheel odometers, a gyro with the
//! hardware's clockwise-positive sign convention, and a forward range
//! sensor against an optional wall obstacle. Sensor noise comes from a
//! seedable RNG so runs are reproducible in CI.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Range reported when no obstacle is configured (millimeters).
const MAX_RANGE_MM: f32 = 4_000.0;

/// Configuration for the simulator.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Distance between wheel sides in meters.
    pub wheel_base_m: f32,
    /// Vehicle speed at full motor output in m/s.
    pub max_speed_ms: f32,
    /// Simulation step size in seconds (one host tick).
    pub tick_period_s: f32,
    /// X position of a wall obstacle ahead of the robot, if any.
    pub wall_x_m: Option<f32>,
    /// Uniform range-sensor noise amplitude in millimeters.
    pub range_noise_mm: f32,
    /// Uniform gyro noise amplitude in degrees.
    pub heading_noise_deg: f32,
    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            wheel_base_m: 0.4,
            max_speed_ms: 2.0,
            tick_period_s: 0.02, // 50 Hz
            wall_x_m: None,
            range_noise_mm: 0.0,
            heading_noise_deg: 0.0,
            seed: Some(0),
        }
    }
}

/// Simulated vehicle and sensor state.
///
/// The device adapters in [`crate::devices`] read and write this through a
/// shared handle; [`SimState::step`] integrates one tick of physics after
/// the core has run.
pub struct SimState {
    config: SimConfig,
    rng: StdRng,

    /// X position in meters.
    pub x: f32,
    /// Y position in meters.
    pub y: f32,
    /// Heading in radians, counter-clockwise positive.
    pub heading_rad: f32,

    /// Cumulative left wheel travel in meters.
    pub left_dist_m: f32,
    /// Cumulative right wheel travel in meters.
    pub right_dist_m: f32,

    /// Applied left motor output in [-1.0, +1.0], after shaping.
    pub motor_left: f32,
    /// Applied right motor output in [-1.0, +1.0], after shaping.
    pub motor_right: f32,
    /// Last direct command to the front-left unit, if any.
    pub front_left_cmd: Option<f32>,
    /// Solenoid state.
    pub solenoid: bool,

    /// Drive watchdog enabled flag.
    pub safety_timeout_enabled: bool,
    /// Drive watchdog expiration in seconds.
    pub expiration_s: f32,
    /// Output scaling applied by the drive layer.
    pub max_output: f32,

    /// Operator axes, 1-indexed storage (index 0 = axis 1).
    pub axes: [f32; 4],
    /// Operator buttons, 1-indexed storage.
    pub buttons: [bool; 4],

    /// Simulation time in microseconds.
    pub sim_time_us: u64,
    /// Time of the last drive command, for the watchdog.
    pub last_drive_us: u64,
}

impl SimState {
    /// Create a simulator from the given configuration.
    pub fn new(config: SimConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            rng,
            x: 0.0,
            y: 0.0,
            heading_rad: 0.0,
            left_dist_m: 0.0,
            right_dist_m: 0.0,
            motor_left: 0.0,
            motor_right: 0.0,
            front_left_cmd: None,
            solenoid: false,
            safety_timeout_enabled: true,
            expiration_s: 0.1,
            max_output: 1.0,
            axes: [0.0; 4],
            buttons: [false; 4],
            sim_time_us: 0,
            last_drive_us: 0,
        }
    }

    /// The configuration this simulator runs with.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Integrate one tick of vehicle physics.
    ///
    /// Call after the core has run its tick, so the commands it issued
    /// take effect over the following tick period.
    pub fn step(&mut self) {
        let dt = self.config.tick_period_s;

        // Drive watchdog: outputs decay to neutral when commands stop
        // arriving while the watchdog is enabled
        if self.safety_timeout_enabled {
            let since_cmd_s =
                self.sim_time_us.saturating_sub(self.last_drive_us) as f32 / 1_000_000.0;
            if since_cmd_s > self.expiration_s {
                self.motor_left = 0.0;
                self.motor_right = 0.0;
            }
        }

        let v_left = self.motor_left * self.config.max_speed_ms;
        let v_right = self.motor_right * self.config.max_speed_ms;

        let velocity = 0.5 * (v_left + v_right);
        let omega = (v_right - v_left) / self.config.wheel_base_m;

        self.heading_rad += omega * dt;
        self.x += velocity * self.heading_rad.cos() * dt;
        self.y += velocity * self.heading_rad.sin() * dt;

        self.left_dist_m += v_left * dt;
        self.right_dist_m += v_right * dt;

        self.sim_time_us += (dt * 1_000_000.0) as u64;
    }

    /// Raw gyro reading: clockwise positive, so the negation of the pose
    /// heading, plus configured noise.
    pub fn gyro_raw_deg(&mut self) -> f32 {
        let noise = self.sample_noise(self.config.heading_noise_deg);
        -self.heading_rad.to_degrees() + noise
    }

    /// Range reading toward the wall obstacle, millimeters.
    pub fn range_mm(&mut self) -> f32 {
        let base = match self.config.wall_x_m {
            Some(wall_x) => (wall_x - self.x).max(0.0) * 1_000.0,
            None => MAX_RANGE_MM,
        };
        let noise = self.sample_noise(self.config.range_noise_mm);
        (base + noise).max(0.0)
    }

    /// Move the wall obstacle, or remove it. Used to script scenarios
    /// where an obstruction clears mid-run.
    pub fn set_wall(&mut self, wall_x_m: Option<f32>) {
        self.config.wall_x_m = wall_x_m;
    }

    fn sample_noise(&mut self, amplitude: f32) -> f32 {
        if amplitude > 0.0 {
            self.rng.gen_range(-amplitude..=amplitude)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim() -> SimState {
        SimState::new(SimConfig::default())
    }

    #[test]
    fn symmetric_outputs_drive_straight() {
        let mut sim = sim();
        sim.safety_timeout_enabled = false;
        sim.motor_left = 0.5;
        sim.motor_right = 0.5;

        for _ in 0..50 {
            sim.step();
        }

        // 0.5 output * 2.0 m/s * 1.0 s
        assert!((sim.x - 1.0).abs() < 1e-3);
        assert!(sim.y.abs() < 1e-3);
        assert!((sim.left_dist_m - 1.0).abs() < 1e-3);
    }

    #[test]
    fn asymmetric_outputs_turn() {
        let mut sim = sim();
        sim.safety_timeout_enabled = false;
        sim.motor_left = -0.5;
        sim.motor_right = 0.5;

        for _ in 0..10 {
            sim.step();
        }

        assert!(sim.heading_rad > 0.0, "left-slow spins counter-clockwise");
        assert!(sim.x.abs() < 1e-3, "spin in place does not translate");
    }

    #[test]
    fn watchdog_zeroes_stale_outputs() {
        let mut sim = sim();
        sim.expiration_s = 0.1;
        sim.motor_left = 1.0;
        sim.motor_right = 1.0;
        sim.last_drive_us = 0;

        // 0.2 s without a fresh command
        for _ in 0..10 {
            sim.step();
        }

        assert_eq!(sim.motor_left, 0.0);
        assert_eq!(sim.motor_right, 0.0);
    }

    #[test]
    fn watchdog_disabled_keeps_outputs() {
        let mut sim = sim();
        sim.safety_timeout_enabled = false;
        sim.motor_left = 1.0;
        sim.motor_right = 1.0;

        for _ in 0..10 {
            sim.step();
        }

        assert_eq!(sim.motor_left, 1.0);
    }

    #[test]
    fn gyro_reports_clockwise_positive() {
        let mut sim = sim();
        sim.heading_rad = std::f32::consts::FRAC_PI_2; // facing +y
        assert!((sim.gyro_raw_deg() + 90.0).abs() < 1e-3);
    }

    #[test]
    fn range_tracks_wall_distance() {
        let mut sim = SimState::new(SimConfig {
            wall_x_m: Some(1.5),
            ..SimConfig::default()
        });
        assert!((sim.range_mm() - 1_500.0).abs() < 1e-3);

        sim.x = 1.4;
        assert!((sim.range_mm() - 100.0).abs() < 1e-2);

        sim.x = 2.0; // past the wall
        assert_eq!(sim.range_mm(), 0.0);
    }

    #[test]
    fn open_field_reports_max_range() {
        let mut sim = sim();
        assert_eq!(sim.range_mm(), 4_000.0);
    }

    #[test]
    fn seeded_noise_is_reproducible() {
        let config = SimConfig {
            range_noise_mm: 5.0,
            heading_noise_deg: 0.5,
            seed: Some(7),
            ..SimConfig::default()
        };
        let mut a = SimState::new(config.clone());
        let mut b = SimState::new(config);

        for _ in 0..20 {
            assert_eq!(a.range_mm(), b.range_mm());
            assert_eq!(a.gyro_raw_deg(), b.gyro_raw_deg());
        }
    }
}
