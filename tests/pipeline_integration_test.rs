// tests/pipeline_integration_test.rs

use std::fs;

use blackbox_pid_tuner::axis_names::Axis;
use blackbox_pid_tuner::config::AnalyzerConfig;
use blackbox_pid_tuner::data_analysis::pipeline::{analyze_flight_log, NullObserver};
use blackbox_pid_tuner::data_input::log_parser::{parse_log, parse_log_bytes, parse_log_file};
use blackbox_pid_tuner::error::TunerError;
use blackbox_pid_tuner::report::{render_text, TuningReport};

const HEADER: &str = "\"loopIteration\",\"time\",\"axisP[0]\",\"axisP[1]\",\"axisP[2]\",\"axisI[0]\",\"axisI[1]\",\"axisI[2]\",\"axisD[0]\",\"axisD[1]\",\"axisF[0]\",\"axisF[1]\",\"axisF[2]\",\"rcCommand[0]\",\"rcCommand[1]\",\"rcCommand[2]\",\"rcCommand[3]\",\"gyroADC[0]\",\"gyroADC[1]\",\"gyroADC[2]\"";

const PREAMBLE: [&str; 5] = [
    "\"Firmware revision\",\"Betaflight 4.4.2 (STM32F7X2)\"",
    "\"Craft name\",\"QUAD5\"",
    "\"rollPID\",\"45,80,0,30,0\"",
    "\"pitchPID\",\"47,84,0,46,125\"",
    "\"yawPID\",\"45,80,0,0,120\"",
];

/// 120 samples at 100 Hz. Roll ramps to 500 and rings hard around the command;
/// pitch and yaw sticks never move.
fn ringing_roll_log() -> String {
    let mut lines: Vec<String> = PREAMBLE.iter().map(|s| s.to_string()).collect();
    lines.push(HEADER.to_string());
    for i in 0..120usize {
        let rc = match i {
            0..=9 => 0.0,
            10..=29 => 25.0 * (i - 9) as f64,
            30..=89 => 500.0,
            _ => 0.0,
        };
        let gyro = match (i, i % 2) {
            (10..=50, 0) => rc + 400.0,
            (10..=50, _) => rc - 400.0,
            _ => rc,
        };
        lines.push(format!(
            "{},{},0,0,0,0,0,0,0,0,0,0,0,{},0,0,1500,{},0,0",
            i,
            i as f64 * 0.01,
            rc,
            gyro
        ));
    }
    lines.join("\n")
}

fn quiet_log() -> String {
    let mut lines: Vec<String> = PREAMBLE.iter().map(|s| s.to_string()).collect();
    lines.push(HEADER.to_string());
    for i in 0..200usize {
        lines.push(format!(
            "{},{},0,0,0,0,0,0,0,0,0,0,0,10,-10,0,1500,11,-9,1",
            i,
            i as f64 * 0.002
        ));
    }
    lines.join("\n")
}

fn report_for(text: &str, config: &AnalyzerConfig) -> TuningReport {
    let log = parse_log(text).unwrap();
    let result = analyze_flight_log(&log, config, &mut NullObserver).unwrap();
    TuningReport::new(&log, result)
}

#[test]
fn ringing_roll_produces_roll_commands_only() {
    let report = report_for(&ringing_roll_log(), &AnalyzerConfig::default());

    assert_eq!(report.data_points, 120);
    assert_eq!(report.skipped_lines, 0);
    assert_eq!(
        report.firmware_revision.as_deref(),
        Some("Betaflight 4.4.2 (STM32F7X2)")
    );

    let roll = &report.analyses[0];
    assert_eq!(roll.axis, Axis::Roll);
    assert!(roll.has_oscillations);
    assert!(roll.oscillation_frequency > 30.0);
    assert!(roll.has_overshoot);
    assert!(roll.overshoot_amount > 0.5);
    assert!(roll.has_undershoot);
    assert_eq!(roll.analyzed_segments.len(), 1);

    // Overshoot rules overwrite the oscillation adjustments for P and D.
    assert_eq!(
        report.commands,
        vec!["set p_roll = 36", "set i_roll = 92", "set d_roll = 33"]
    );
    assert!(report.recommended.pitch.is_zero());
    assert!(report.recommended.yaw.is_zero());
}

#[test]
fn steady_sticks_leave_every_axis_alone() {
    let report = report_for(&quiet_log(), &AnalyzerConfig::default());

    assert_eq!(report.analyses.len(), 3);
    for (analysis, axis) in report.analyses.iter().zip(Axis::ALL) {
        assert_eq!(analysis.axis, axis);
        assert!(analysis.analyzed_segments.is_empty());
        assert_eq!(
            analysis.recommendation,
            format!("{} axis response looks good, no changes recommended.", axis)
        );
    }
    assert!(report.commands.is_empty());
    assert!(render_text(&report).contains("No changes to apply."));
}

#[test]
fn analysis_is_repeatable() {
    let text = ringing_roll_log();
    let cfg = AnalyzerConfig::default();
    assert_eq!(report_for(&text, &cfg), report_for(&text, &cfg));
}

#[test]
fn config_file_moves_the_oscillation_boundary() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("tuner.toml");
    fs::write(&config_path, "high_frequency_oscillation_hz = 100.0\n").unwrap();
    let cfg = AnalyzerConfig::load(&config_path).unwrap();

    let report = report_for(&ringing_roll_log(), &cfg);
    let roll = &report.analyses[0];
    assert!(roll.recommendation.contains("Reduce Roll P-term by 15-20%"));
    assert!(!roll.recommendation.contains("D-term by 15-20%"));
}

#[test]
fn log_file_on_disk_round_trips_through_the_parser() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("btfl_001.csv");
    fs::write(&log_path, ringing_roll_log()).unwrap();

    let from_file = parse_log_file(&log_path).unwrap();
    let from_bytes = parse_log_bytes(ringing_roll_log().as_bytes()).unwrap();
    assert_eq!(from_file.samples, from_bytes.samples);
    assert_eq!(from_file.config, from_bytes.config);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = parse_log_file(&dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, TunerError::Io { .. }));
}

#[test]
fn log_without_header_is_rejected() {
    let text = PREAMBLE.join("\n");
    assert!(matches!(
        parse_log(&text),
        Err(TunerError::MissingHeader { .. })
    ));
}

#[test]
fn json_report_lists_all_axes() {
    let report = report_for(&ringing_roll_log(), &AnalyzerConfig::default());
    let json = serde_json::to_value(&report).unwrap();
    let axes: Vec<&str> = json["analyses"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["axis"].as_str().unwrap())
        .collect();
    assert_eq!(axes, vec!["Roll", "Pitch", "Yaw"]);
    assert_eq!(json["craft_name"], "QUAD5");
    assert_eq!(json["current"]["roll"]["d"], 30.0);
}
