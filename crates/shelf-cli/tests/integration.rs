//! Integration tests for the `shelf` binary.

use shelf_core::ChannelBuffers;
use shelf_io::{WavSpec, read_wav, read_wav_info, write_wav};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn shelf_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_shelf"))
}

fn write_tone(path: &Path, channels: usize, frames: usize, freq: f32) {
    let tone: Vec<f32> = (0..frames)
        .map(|i| 0.25 * (2.0 * std::f32::consts::PI * freq * i as f32 / 48000.0).sin())
        .collect();
    let buffers = ChannelBuffers::from_channels(vec![tone; channels]);
    write_wav(path, &buffers, WavSpec { channels: channels as u16, ..WavSpec::default() })
        .unwrap();
}

fn rms(samples: &[f32]) -> f32 {
    (samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt()
}

#[test]
fn cli_params_lists_all_parameters() {
    let output = shelf_bin().arg("params").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for id in ["corner_frequency", "gain", "q"] {
        assert!(stdout.contains(id), "params listing should contain '{id}'");
    }
}

#[test]
fn cli_params_json() {
    let output = shelf_bin().args(["params", "--json"]).output().unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["id"], "corner_frequency");
    assert_eq!(rows[0]["min"], 12.0);
    assert_eq!(rows[1]["max"], 10.0);
    assert_eq!(rows[2]["address"], 2);
}

#[test]
fn cli_response_shows_boost_below_corner() {
    let output = shelf_bin()
        .args(["response", "--freq", "500Hz", "--gain-db", "12", "--points", "4"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let first_row = stdout
        .lines()
        .find(|l| l.trim_start().starts_with("20.0 Hz"))
        .unwrap();
    assert!(first_row.contains("+11.") || first_row.contains("+12."), "{first_row}");
}

#[test]
fn cli_process_boosts_stereo_bass() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    write_tone(&input, 2, 48000, 60.0);

    let status = shelf_bin()
        .args(["process"])
        .arg(&input)
        .arg(&output)
        .args(["--freq", "400Hz", "--gain", "2.0", "--block-size", "333"])
        .status()
        .unwrap();
    assert!(status.success());

    let (result, spec) = read_wav(&output).unwrap();
    assert_eq!(spec.channels, 2);
    assert_eq!(result.frames(), 48000);
    for ch in 0..2 {
        let gain = rms(&result.channel(ch)[24000..]) / (0.25 / 2f32.sqrt());
        assert!((gain - 2.0).abs() < 0.1, "channel {ch} gain {gain}");
    }
}

#[test]
fn cli_process_bypass_is_bit_exact() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    write_tone(&input, 1, 4800, 100.0);

    let status = shelf_bin()
        .args(["process"])
        .arg(&input)
        .arg(&output)
        .args(["--gain", "8", "--bypass"])
        .status()
        .unwrap();
    assert!(status.success());

    assert_eq!(read_wav(&output).unwrap().0, read_wav(&input).unwrap().0);
}

#[test]
fn cli_process_with_preset_and_ramp() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    write_tone(&input, 1, 9600, 50.0);

    let status = shelf_bin()
        .args(["process"])
        .arg(&input)
        .arg(&output)
        .args(["--preset", "warm_bass", "--ramp", "0:gain=1.0:100ms", "--bit-depth", "16"])
        .status()
        .unwrap();
    assert!(status.success());

    let info = read_wav_info(&output).unwrap();
    assert_eq!(info.bits_per_sample, 16);

    // The ramp back to unity ends at 4800 frames.
    let (result, _) = read_wav(&output).unwrap();
    let (original, _) = read_wav(&input).unwrap();
    let tail = rms(&result.channel(0)[7200..]) / rms(&original.channel(0)[7200..]);
    assert!((tail - 1.0).abs() < 0.02, "tail gain {tail}");
}

#[test]
fn cli_process_rejects_bad_ramp() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    write_tone(&input, 1, 100, 100.0);

    let output = shelf_bin()
        .args(["process"])
        .arg(&input)
        .arg(dir.path().join("out.wav"))
        .args(["--ramp", "gain=2"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn cli_process_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let output = shelf_bin()
        .args(["process", "/nonexistent/shelf/in.wav"])
        .arg(dir.path().join("out.wav"))
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn cli_info_reports_metadata() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    write_tone(&input, 2, 24000, 440.0);

    let output = shelf_bin().arg("info").arg(&input).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Channels:    2"));
    assert!(stdout.contains("48000 Hz"));
    assert!(stdout.contains("0.500s"));
}

#[test]
fn cli_info_levels_per_channel() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    write_tone(&input, 2, 4800, 1000.0);

    let output = shelf_bin()
        .args(["info", "--levels"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ch 0: RMS"));
    assert!(stdout.contains("ch 1: RMS"));
    // 0.25 peak tone.
    assert!(stdout.contains("Peak -12.0 dB"), "{stdout}");
}
