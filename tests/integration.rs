use phasefold::data::{DispersionRecord, ObservationSet};
use std::{
    env, fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

fn prepare_dir(name: &str, config_contents: &str) -> PathBuf {
    let test_dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name);

    fs::remove_dir_all(&test_dir).ok();
    fs::create_dir(&test_dir).expect("failed to create test directory");

    fs::write(test_dir.join("config.toml"), config_contents).expect("failed to write config file");

    test_dir
}

fn run_bin(test_dir: &Path, command: &str) -> Output {
    let bin = PathBuf::from(env!("CARGO_BIN_EXE_phasefold"));
    let test_dir_str = test_dir
        .to_str()
        .expect("failed to convert test directory to string");

    Command::new(bin)
        .args(["--run-dir", test_dir_str, command])
        .output()
        .expect("failed to execute command")
}

fn assert_success(output: &Output) {
    let stdout_str =
        std::str::from_utf8(&output.stdout).expect("failed to convert stdout to string");
    let stderr_str =
        std::str::from_utf8(&output.stderr).expect("failed to convert stderr to string");

    assert!(
        output.status.success(),
        "failed to run binary\nstdout:\n{stdout_str}\nstderr:\n{stderr_str}\n"
    );
}

#[test]
fn basic_workflow() {
    let config_contents = String::new()
        + "[periods]\n"
        + "start = 1.0\n"
        + "stop = 6.0\n"
        + "step = 0.1\n"
        + "\n"
        + "[signal]\n"
        + "n_obs = 400\n"
        + "period = 2.5\n"
        + "amplitude = 1.0\n"
        + "std_dev_noise = 0.05\n"
        + "time_span = 80.0\n"
        + "seed = 7\n";
    let test_dir = prepare_dir("basic_workflow", &config_contents);

    assert_success(&run_bin(&test_dir, "generate"));
    let obs_set = ObservationSet::load(test_dir.join("observations.msgpack"))
        .expect("failed to load observations");
    assert_eq!(obs_set.len(), 400);

    assert_success(&run_bin(&test_dir, "fold"));
    let disp_file = test_dir.join("dispersion.msgpack");
    let record = DispersionRecord::load(&disp_file).expect("failed to load dispersion");
    assert_eq!(record.periods.len(), 50);
    assert_eq!(record.dispersion.len(), record.periods.len());
    assert!(record.dispersion.iter().all(|val| val.is_finite()));

    let i_true = record
        .periods
        .iter()
        .position(|&period| (period - 2.5).abs() < 1e-9)
        .expect("true period missing from grid");
    let i_off = record
        .periods
        .iter()
        .position(|&period| (period - 1.7).abs() < 1e-9)
        .expect("off period missing from grid");
    assert!(record.dispersion[i_true] < record.dispersion[i_off]);

    assert_success(&run_bin(&test_dir, "clean"));
    assert!(!disp_file.exists());
    assert!(test_dir.join("observations.msgpack").exists());

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn explicit_periods_keep_degenerate_values() {
    let config_contents = "[periods]\nvalues = [ 2.0, 0.0, 10.0,]\n";
    let test_dir = prepare_dir("explicit_periods", config_contents);

    let obs_set = ObservationSet {
        time: vec![0.0, 1.0, 2.0, 3.0],
        flux: vec![1.0, 2.0, 3.0, 4.0],
    };
    obs_set
        .save(test_dir.join("observations.msgpack"))
        .expect("failed to save observations");

    assert_success(&run_bin(&test_dir, "fold"));
    let record = DispersionRecord::load(test_dir.join("dispersion.msgpack"))
        .expect("failed to load dispersion");
    assert_eq!(record.periods, vec![2.0, 0.0, 10.0]);
    assert_eq!(record.dispersion[0], 5.0);
    assert!(record.dispersion[1].is_nan());
    assert_eq!(record.dispersion[2], 3.0);

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn mismatched_observations_fail() {
    let config_contents = "[periods]\nvalues = [ 2.0,]\n";
    let test_dir = prepare_dir("mismatched_observations", config_contents);

    let obs_set = ObservationSet {
        time: vec![0.0, 1.0, 2.0],
        flux: vec![1.0, 2.0],
    };
    obs_set
        .save(test_dir.join("observations.msgpack"))
        .expect("failed to save observations");

    let output = run_bin(&test_dir, "fold");
    assert!(!output.status.success());
    assert!(!test_dir.join("dispersion.msgpack").exists());

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn generate_requires_signal() {
    let config_contents = "[periods]\nvalues = [ 2.0,]\n";
    let test_dir = prepare_dir("generate_requires_signal", config_contents);

    let output = run_bin(&test_dir, "generate");
    assert!(!output.status.success());

    fs::remove_dir_all(&test_dir).ok();
}
