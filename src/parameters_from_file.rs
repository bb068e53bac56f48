//! Supports extracting DH parameters and joint limits from YAML file (optional)

use std::path::Path;
use serde::Deserialize;
use serde_saphyr::Options;

use crate::constraints::Constraints;
use crate::parameter_error::ParameterError;
use crate::parameters::dh_kinematics::Parameters;

#[derive(Deserialize)]
struct DhParameters {
    pub theta: Vec<f64>,
    pub d: Vec<f64>,
    pub alpha: Vec<f64>,
    pub r: Vec<f64>,
}

#[derive(Deserialize)]
struct Limits {
    pub from: Vec<f64>,
    pub to: Vec<f64>,
}

#[derive(Deserialize)]
struct Root {
    pub dh_parameters: DhParameters,
    pub standard_limits: Limits,
    pub device_limits: Limits,
    pub gripper_limits: Vec<f64>,
}

impl Parameters {
    /// Read the robot configuration from YAML file. YAML file like this is supported:
    /// ```yaml
    /// # KUKA youBot arm
    /// dh_parameters:
    ///   theta: [0.0, deg(-90.0), 0.0, deg(90.0), 0.0]
    ///   d: [0.147, 0.0, 0.0, 0.0, 0.171]
    ///   alpha: [deg(-90.0), 0.0, 0.0, deg(90.0), 0.0]
    ///   r: [0.033, 0.155, 0.135, 0.0, 0.0]
    /// standard_limits:
    ///   from: [-2.949606, -1.134464, -2.635447, -1.788962, -2.923426]
    ///   to: [2.949606, 1.570796, 2.548181, 1.788962, 2.923426]
    /// device_limits:
    ///   from: [0.0100692, 0.0100692, -5.02655, 0.0221239, 0.110619]
    ///   to: [5.84014, 2.61799, -0.015708, 3.4292, 5.64159]
    /// gripper_limits: [0.0, 0.023]
    /// ```
    /// All values are radians or meters. YAML extension to parse the deg(angle) function
    /// is supported (serde_saphyr).
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ParameterError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Same as [Parameters::from_yaml_file] but parses the YAML text directly.
    pub fn from_yaml(contents: &str) -> Result<Self, ParameterError> {
        let root: Root = serde_saphyr::from_str_with_options(
            contents,
            Options { angle_conversions: true, ..Default::default() }
        ).map_err(|e| ParameterError::ParseError(format!("{}", e)))?;

        let dh = root.dh_parameters;
        let standard_limits = Constraints::new(
            vec_to_five(root.standard_limits.from, "standard_limits.from")?,
            vec_to_five(root.standard_limits.to, "standard_limits.to")?,
        );
        let device_limits = Constraints::new(
            vec_to_five(root.device_limits.from, "device_limits.from")?,
            vec_to_five(root.device_limits.to, "device_limits.to")?,
        );

        if !standard_limits.is_consistent() {
            return Err(ParameterError::InconsistentLimits(
                "standard lower limit must be below the upper limit for every joint".into()
            ));
        }
        if !device_limits.is_consistent() {
            return Err(ParameterError::InconsistentLimits(
                "device lower limit must be below the upper limit for every joint".into()
            ));
        }

        let gripper = &root.gripper_limits;
        if gripper.len() != 2 {
            return Err(ParameterError::InvalidLength {
                field: "gripper_limits".into(), expected: 2, found: gripper.len()
            });
        }
        if !(gripper[0].is_finite() && gripper[1].is_finite()) || gripper[0] > gripper[1] {
            return Err(ParameterError::InconsistentLimits(format!(
                "gripper limits [{}, {}] are not an interval", gripper[0], gripper[1]
            )));
        }

        Ok(Parameters {
            theta: vec_to_five(dh.theta, "dh_parameters.theta")?,
            d: vec_to_five(dh.d, "dh_parameters.d")?,
            alpha: vec_to_five(dh.alpha, "dh_parameters.alpha")?,
            r: vec_to_five(dh.r, "dh_parameters.r")?,
            standard_limits,
            device_limits,
            gripper_limits: [gripper[0], gripper[1]],
        })
    }
}

/// Convert a vector to a 5-element array of finite values, with the field label for context.
fn vec_to_five(v: Vec<f64>, label: &str) -> Result<[f64; 5], ParameterError> {
    let out: [f64; 5] = v.as_slice().try_into().map_err(|_| ParameterError::InvalidLength {
        field: label.to_string(), expected: 5, found: v.len()
    })?;
    if let Some(i) = out.iter().position(|x| !x.is_finite()) {
        return Err(ParameterError::NotFinite(format!("{}[{}]", label, i)));
    }
    Ok(out)
}
