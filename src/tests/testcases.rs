#[cfg(test)]
mod tests {
    use crate::kinematic_traits::Kinematics;
    use crate::kinematics_impl::{distance, DHKinematics};
    use crate::parameters::dh_kinematics::Parameters;
    use crate::tests::test_utils;

    const CASES: &str = "src/tests/data/cases.yaml";

    #[test]
    fn test_load_yaml() {
        let result = test_utils::load_yaml(CASES);

        if let Err(e) = &result {
            println!("Error loading or parsing YAML file: {}", e);
        }

        assert!(result.is_ok(), "Failed to load or parse the YAML file");

        let cases = result.expect("Expected a valid Cases struct after parsing");
        assert!(!cases.is_empty(), "No cases were loaded from the YAML file");
    }

    #[test]
    fn test_forward() {
        let cases = test_utils::load_yaml(CASES).expect("Failed to load test cases");
        let kinematics = DHKinematics::new(Parameters::youbot());
        println!("Forward: {} test cases", cases.len());

        for case in cases.iter() {
            let pose = kinematics.forward(&case.joints_in_radians());
            if !test_utils::are_poses_close(&pose, &case.pose, 1E-9, 1E-9) {
                println!("Case {}, joints: {:?}", case.id, &case.joints);
                println!("computed: {:?}", &pose);
                println!("expected: {:?}", &case.pose);
                panic!("Forward kinematics of case {} seems not equal", case.id);
            }
        }
    }

    #[test]
    fn test_inverse_gets_close() {
        let cases = test_utils::load_yaml(CASES).expect("Failed to load test cases");
        let kinematics = DHKinematics::new(Parameters::youbot());

        for case in cases.iter() {
            let joints = case.joints_in_radians();
            // Case 7 has joint 2 exactly at its upper limit
            if !kinematics.parameters().standard_limits.compliant(&joints) {
                continue;
            }
            let report = kinematics.inverse_with_report(&case.pose);
            let reached = kinematics.forward(&report.joints);
            assert!((distance(&reached, &case.pose) - report.distance).abs() < 1E-12);
            assert!(report.reached(0.002), "Case {} ended {} m away", case.id, report.distance);
        }
    }
}
