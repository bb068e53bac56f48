use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use youbot_kinematics::kinematic_traits::{Joints, Kinematics, Pose};
use youbot_kinematics::kinematics_impl::DHKinematics;
use youbot_kinematics::parameters::dh_kinematics::Parameters;
use youbot_kinematics::utils::{format_joints, is_valid};

/// Kinematics queries for the youBot arm.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// YAML file with DH parameters and joint limits (built in youBot values if omitted)
    #[arg(long, global = true)]
    parameters: Option<PathBuf>,

    /// Angles on the command line and in the output are degrees rather than radians
    #[arg(long, global = true)]
    degrees: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// TCP pose for 5 standard joint angles
    Forward {
        #[arg(num_args = 5, allow_negative_numbers = true)]
        joints: Vec<f64>,
    },
    /// Standard joint angles for a TCP position (meters), optionally with roll, pitch, yaw
    Inverse {
        #[arg(num_args = 3..=6, allow_negative_numbers = true)]
        pose: Vec<f64>,
    },
    /// Device angles for 5 standard angles
    ToDevice {
        #[arg(num_args = 5, allow_negative_numbers = true)]
        joints: Vec<f64>,
    },
    /// Standard angles for 5 device angles
    ToStandard {
        #[arg(num_args = 5, allow_negative_numbers = true)]
        joints: Vec<f64>,
    },
    /// Print the parameters in use as YAML
    Parameters,
}

fn to_joints(values: &[f64], degrees: bool) -> Result<Joints> {
    let joints: Joints = values
        .try_into()
        .with_context(|| format!("Expected 5 joint values, got {}", values.len()))?;
    if !is_valid(&joints) {
        bail!("Joint values must be finite");
    }
    Ok(if degrees { joints.map(f64::to_radians) } else { joints })
}

fn angle_out(value: f64, degrees: bool) -> f64 {
    if degrees { value.to_degrees() } else { value }
}

fn print_joints(joints: &Joints, degrees: bool) {
    let row = joints
        .iter()
        .map(|q| format!("{:.5}", angle_out(*q, degrees)))
        .collect::<Vec<_>>()
        .join(" ");
    println!("{}", row);
}

fn print_pose(pose: &Pose, degrees: bool) {
    println!(
        "x = {:.5}, y = {:.5}, z = {:.5}, roll = {:.5}, pitch = {:.5}, yaw = {:.5}",
        pose.x,
        pose.y,
        pose.z,
        angle_out(pose.roll, degrees),
        angle_out(pose.pitch, degrees),
        angle_out(pose.yaw, degrees)
    );
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let parameters = match &cli.parameters {
        Some(path) => Parameters::from_yaml_file(path)
            .with_context(|| format!("Failed to read parameters from {}", path.display()))?,
        None => Parameters::youbot(),
    };
    let robot = DHKinematics::new(parameters);

    match cli.command {
        Command::Forward { joints } => {
            let joints = to_joints(&joints, cli.degrees)?;
            if !parameters.standard_limits.compliant(&joints) {
                tracing::warn!("Joints [{}] are outside the standard limits", format_joints(&joints));
            }
            print_pose(&robot.forward(&joints), cli.degrees);
        }
        Command::Inverse { pose } => {
            let mut v = [0.0; 6];
            v[..pose.len()].copy_from_slice(&pose);
            for angle in &mut v[3..] {
                *angle = if cli.degrees { angle.to_radians() } else { *angle };
            }
            let target = Pose::new(v[0], v[1], v[2], v[3], v[4], v[5]);
            let report = robot.inverse_with_report(&target);
            print_joints(&report.joints, cli.degrees);
            println!("distance to target: {:.6} m", report.distance);
            print_pose(&robot.forward(&report.joints), cli.degrees);
        }
        Command::ToDevice { joints } => {
            let standard = to_joints(&joints, cli.degrees)?;
            let device = parameters.joints_to_device(&standard);
            if !parameters.device_limits.compliant(&device) {
                bail!("Device angles [{}] are outside the device limits", format_joints(&device));
            }
            print_joints(&device, cli.degrees);
        }
        Command::ToStandard { joints } => {
            let device = to_joints(&joints, cli.degrees)?;
            print_joints(&parameters.joints_from_device(&device), cli.degrees);
        }
        Command::Parameters => print!("{}", parameters.to_yaml()),
    }
    Ok(())
}
