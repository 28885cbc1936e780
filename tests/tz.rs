#[cfg(test)]
mod tests {
    use std::process::Command;

    fn tz(directory: &str, args: &[&str]) -> (bool, String, String) {
        let output = Command::new(env!("CARGO_BIN_EXE_tz")).current_dir(directory)
                                                           .args(args)
                                                           .output()
                                                           .unwrap();
        (output.status.success(),
         String::from_utf8(output.stdout).unwrap(),
         String::from_utf8(output.stderr).unwrap())
    }

    #[test]
    fn tz_cube_report() {
        let (success, stdout, _) = tz("tests/cube", &["-J", "2"]);
        assert!(success);
        let expected = "  1 Co   Tz =  5.00000e-01 μB
  2 Pd   Tz = -3.20000e+00 μB

Cell-total Tz  = -2.70000e+00 μB
Cell-total 7 Tz = -1.89000e+01 μB
";
        assert_eq!(stdout, expected);
    }

    #[test]
    fn tz_cube_explicit_files() {
        let (success, stdout, _) = tz(".",
                                      &["tests/cube/Mx.cube",
                                        "tests/cube/My.cube",
                                        "tests/cube/Mz.cube",
                                        "--poscar",
                                        "tests/cube/POSCAR",
                                        "-m",
                                        "2"]);
        assert!(success);
        assert!(stdout.ends_with("Cell-total 2 Tz = -5.40000e+00 μB\n"));
    }

    #[test]
    fn tz_periodic_verbose() {
        let (success, stdout, _) = tz("tests/cube", &["--periodic", "-v"]);
        assert!(success);
        let lines = stdout.lines().collect::<Vec<&str>>();
        assert_eq!(lines[0],
                   "  1 Co   Tz =  5.00000e-01 μB   (r = 2.100 Å, 33 voxels)");
        assert!(lines[1].starts_with("  2 Pd   Tz =  5.00000e-01 μB"));
        assert!(lines[1].ends_with("81 voxels)"));
        assert_eq!(lines[4], "Cell-total 7 Tz =  7.00000e+00 μB");
    }

    #[test]
    fn tz_radius_override() {
        // a radius below the voxel spacing only sees the coincident voxel
        let (success, stdout, _) = tz("tests/cube", &["-r", "Pd=0.5", "-r", "Co=0.5"]);
        assert!(success);
        assert!(stdout.starts_with("  1 Co   Tz =  5.00000e-01 μB\n  2 Pd   Tz =  5.00000e-01 μB\n"));
    }

    #[test]
    fn tz_chgcar() {
        let (success, stdout, _) = tz("tests/vasp", &["--chgcar", "CHGCAR", "-p", "POSCAR"]);
        assert!(success);
        assert!(stdout.contains("Cell-total Tz  = -2.70000e+00 μB\n"));
    }

    #[test]
    fn tz_chgcar_structure() {
        let (success, stdout, _) = tz("tests/vasp", &["-c", "CHGCAR"]);
        assert!(success);
        assert!(stdout.contains("  2 Pd   Tz = -3.20000e+00 μB\n"));
    }

    #[test]
    fn tz_mismatched_components() {
        let (success, stdout, stderr) = tz("tests/cube", &["Mx.cube", "coarse.cube", "Mz.cube"]);
        assert!(!success);
        assert!(stdout.is_empty());
        assert!(stderr.contains("cannot be combined"));
    }

    #[test]
    fn tz_missing_poscar() {
        let (success, _, stderr) = tz("tests/vasp", &["../cube/Mx.cube",
                                                     "../cube/My.cube",
                                                     "../cube/Mz.cube",
                                                     "-p",
                                                     "CONTCAR"]);
        assert!(!success);
        assert!(stderr.contains("CONTCAR"));
    }
}
