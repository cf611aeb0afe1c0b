//! Magnitude response command.

use crate::commands::common::parse_value;
use clap::Args;
use shelf_core::{EqMode, ParamAddress, ParametricEqFilter, db_to_linear, linear_to_db};
use shelf_effects::low_shelf;

/// Print the magnitude response on a log frequency grid.
#[derive(Args)]
pub struct ResponseArgs {
    /// Corner frequency (e.g. "180", "1.2kHz")
    #[arg(long, value_parser = parse_value, default_value = "1kHz")]
    freq: f32,

    /// Shelf gain, linear or with a dB suffix
    #[arg(long, value_parser = parse_value, default_value = "1.0", conflicts_with = "gain_db")]
    gain: f32,

    /// Shelf gain in dB
    #[arg(long, allow_hyphen_values = true)]
    gain_db: Option<f32>,

    /// Q of the shelf transition
    #[arg(long, default_value = "0.707")]
    q: f32,

    /// Sample rate in Hz
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Number of grid points from 20 Hz to Nyquist
    #[arg(long, default_value = "24")]
    points: usize,
}

/// Lowest frequency on the grid.
const GRID_MIN_HZ: f32 = 20.0;

fn clamped(address: ParamAddress, value: f32) -> f32 {
    low_shelf::descriptor(address).map_or(value, |d| d.clamp(value))
}

/// `points` frequencies spaced evenly in log frequency over `min..=max`.
fn log_grid(min: f32, max: f32, points: usize) -> Vec<f32> {
    match points {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let ratio = (max / min).ln();
            (0..points)
                .map(|i| min * (ratio * i as f32 / (points - 1) as f32).exp())
                .collect()
        }
    }
}

pub fn run(args: ResponseArgs) -> anyhow::Result<()> {
    let sample_rate = args.sample_rate as f32;
    if sample_rate <= 2.0 * GRID_MIN_HZ {
        anyhow::bail!("Sample rate {} Hz is too low", args.sample_rate);
    }

    let freq = clamped(low_shelf::CORNER_FREQUENCY, args.freq);
    let gain = clamped(
        low_shelf::GAIN,
        args.gain_db.map_or(args.gain, db_to_linear),
    );
    let q = clamped(low_shelf::Q, args.q);

    let mut filter = ParametricEqFilter::new(EqMode::LowShelf, sample_rate, 1);
    filter.set(freq, gain, q);

    println!(
        "Low shelf: {:.1} Hz, gain {:.3} ({:+.1} dB), Q {:.3}, {} Hz\n",
        freq,
        gain,
        linear_to_db(gain),
        q,
        args.sample_rate
    );
    println!("  {:>10}  {:>9}", "Frequency", "Gain");
    for f in log_grid(GRID_MIN_HZ, sample_rate / 2.0, args.points) {
        let db = linear_to_db(filter.magnitude_at(f));
        println!("  {:>7.1} Hz  {:>+6.2} dB", f, db);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_grid_endpoints() {
        let grid = log_grid(20.0, 20000.0, 4);
        assert_eq!(grid.len(), 4);
        assert!((grid[0] - 20.0).abs() < 1e-3);
        assert!((grid[1] - 200.0).abs() < 0.1);
        assert!((grid[3] - 20000.0).abs() < 1.0);
    }

    #[test]
    fn test_log_grid_degenerate() {
        assert!(log_grid(20.0, 100.0, 0).is_empty());
        assert_eq!(log_grid(20.0, 100.0, 1), vec![20.0]);
    }

    #[test]
    fn test_clamped_uses_node_ranges() {
        assert_eq!(clamped(low_shelf::GAIN, 50.0), low_shelf::GAIN_MAX);
        assert_eq!(clamped(low_shelf::CORNER_FREQUENCY, 1.0), low_shelf::CORNER_FREQUENCY_MIN);
        assert_eq!(clamped(99, 5.0), 5.0);
    }
}
