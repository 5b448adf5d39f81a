//! SITL runner
//!
//! Drives the control core against the lightweight simulator at the 20 ms
//! tick rate and logs pose and command telemetry. Useful for eyeballing a
//! deployment configuration before it goes anywhere near hardware.

use clap::{Parser, ValueEnum};
use tracing::info;

use trailcart_core::mode::RobotMode;
use trailcart_core::parameters::{
    register_all_defaults, ParamValue, ParameterStore, POLICY_DISTANCE, POLICY_ELAPSED_TIME,
};
use trailcart_sitl::{SimConfig, SimRig};

/// Autonomous stopping policy selection.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Policy {
    /// Stop after a fixed run time
    Time,
    /// Stop after a target travel distance
    Distance,
}

#[derive(Debug, Parser)]
#[command(name = "trailcart_sitl", about = "Run the trailcart core against the simulator")]
struct Args {
    /// Autonomous ticks to simulate (20 ms each)
    #[arg(long, default_value_t = 400)]
    ticks: u32,

    /// Stopping policy for the Default program
    #[arg(long, value_enum, default_value = "distance")]
    policy: Policy,

    /// Target travel in meters (distance policy)
    #[arg(long, default_value_t = 5.0)]
    target_distance: f32,

    /// Run time budget in seconds (time policy)
    #[arg(long, default_value_t = 4.0)]
    stop_time: f32,

    /// Program name handed to the chooser
    #[arg(long, default_value = "Default")]
    program: String,

    /// Wall obstacle distance in meters ahead of the start pose
    #[arg(long)]
    wall: Option<f32>,

    /// RNG seed for sensor noise (omit for entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Range sensor noise amplitude in millimeters
    #[arg(long, default_value_t = 0.0)]
    range_noise: f32,
}

fn build_store(args: &Args) -> ParameterStore {
    let mut store = ParameterStore::new();
    register_all_defaults(&mut store).expect("parameter defaults fit the store");

    let policy = match args.policy {
        Policy::Time => POLICY_ELAPSED_TIME,
        Policy::Distance => POLICY_DISTANCE,
    };
    store.set("AUTO_POLICY", ParamValue::Int(policy)).unwrap();
    store
        .set("AUTO_TARGET_DIST", ParamValue::Float(args.target_distance))
        .unwrap();
    store
        .set("AUTO_STOP_TIME", ParamValue::Float(args.stop_time))
        .unwrap();
    store
}

fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();
    let store = build_store(&args);

    let config = SimConfig {
        wall_x_m: args.wall,
        range_noise_mm: args.range_noise,
        seed: args.seed,
        ..SimConfig::default()
    };

    info!(
        ticks = args.ticks,
        policy = ?args.policy,
        program = %args.program,
        "starting SITL run"
    );

    let rig = SimRig::new(config, store, Some(&args.program));
    rig.with_robot(|robot| {
        robot.init().expect("simulated drive accepts configuration");

        for tick in 0..args.ticks {
            robot.tick(RobotMode::Autonomous);
            rig.step();

            if tick % 50 == 0 {
                let pose = robot.pose();
                let sim = rig.state().borrow();
                info!(
                    tick,
                    x = pose.x,
                    y = pose.y,
                    heading = pose.heading_deg,
                    left = sim.motor_left,
                    right = sim.motor_right,
                    "telemetry"
                );
            }
        }

        // A few disabled ticks to show the robot goes inert
        for _ in 0..10 {
            robot.tick(RobotMode::Disabled);
            rig.step();
        }

        let pose = robot.pose();
        let sim = rig.state().borrow();
        info!(
            x = pose.x,
            y = pose.y,
            traveled_left = sim.left_dist_m,
            traveled_right = sim.right_dist_m,
            "run complete"
        );
    });
}
