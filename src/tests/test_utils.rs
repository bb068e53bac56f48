use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_saphyr::Options;

use crate::kinematic_traits::{Joints, Pose};

// ---- Domain types ----

#[derive(Debug, Clone)]
pub struct Case {
    pub id: i32,
    pub(crate) joints: Joints, // degrees in the YAML file
    pub(crate) pose: Pose,
}

impl Case {
    /// Returns joints converted from degrees to radians.
    #[inline]
    pub fn joints_in_radians(&self) -> Joints {
        self.joints.map(f64::to_radians)
    }
}

// ---- YAML I/O ----

#[derive(Debug, Deserialize)]
struct CaseYaml {
    id: i32,
    joints: [f64; 5],
    pose: [f64; 6], // x, y, z, roll, pitch, yaw
}

#[derive(Debug, Deserialize)]
struct TestsRoot {
    cases: Vec<CaseYaml>,
}

/// Load test cases from YAML.
/// - `file_path`: path to a YAML with fields matching `TestsRoot`.
pub(crate) fn load_yaml(file_path: impl AsRef<Path>) -> Result<Vec<Case>> {
    let p = file_path.as_ref();
    let contents = std::fs::read_to_string(p)
        .with_context(|| format!("Failed to read YAML file: {}", p.display()))?;

    let opts = Options {
        angle_conversions: true,
        ..Default::default()
    };

    let root: TestsRoot = serde_saphyr::from_str_with_options(&contents, opts)
        .context("Failed to parse YAML with serde_saphyr")?;

    Ok(root
        .cases
        .into_iter()
        .map(|c| Case {
            id: c.id,
            joints: c.joints,
            pose: Pose::new(c.pose[0], c.pose[1], c.pose[2], c.pose[3], c.pose[4], c.pose[5]),
        })
        .collect())
}

// ---- Pose comparison ----

/// Compare two poses with separate tolerances.
/// - `trans_tol_m`: max allowed Euclidean distance in meters
/// - `rot_tol_rad`: max allowed difference of each of roll, pitch and yaw in radians
pub fn are_poses_close(a: &Pose, b: &Pose, trans_tol_m: f64, rot_tol_rad: f64) -> bool {
    if (a.position() - b.position()).norm() > trans_tol_m {
        return false;
    }
    [(a.roll, b.roll), (a.pitch, b.pitch), (a.yaw, b.yaw)]
        .iter()
        .all(|(x, y)| (x - y).abs() <= rot_tol_rad)
}
