//! File-based processing command.

use crate::commands::common::{format_db, load_preset, parse_ramp, parse_value};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use shelf_config::{AutomationPoint, Preset, validate_automation_length, validate_preset};
use shelf_core::AudioKernel;
use shelf_effects::LowShelfParametricEq;
use shelf_io::{ProcessingEngine, SignalStats, WavSpec, read_wav, write_wav};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Preset name or file (TOML); flags below override it
    #[arg(short, long)]
    preset: Option<String>,

    /// Corner frequency (e.g. "180", "1.2kHz")
    #[arg(long, value_parser = parse_value)]
    freq: Option<f32>,

    /// Shelf gain, linear or with a dB suffix (e.g. "2.0", "+6dB")
    #[arg(long, value_parser = parse_value, conflicts_with = "gain_db")]
    gain: Option<f32>,

    /// Shelf gain in dB
    #[arg(long, allow_hyphen_values = true)]
    gain_db: Option<f32>,

    /// Q of the shelf transition
    #[arg(long)]
    q: Option<f32>,

    /// Scheduled change "at:param=value[:duration]" (repeatable)
    #[arg(long, value_parser = parse_ramp)]
    ramp: Vec<AutomationPoint>,

    /// Dezipper length in milliseconds
    #[arg(long)]
    dezipper_ms: Option<f32>,

    /// Pass audio through unprocessed
    #[arg(long)]
    bypass: bool,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

impl ProcessArgs {
    /// The preset to render with: the named one (or defaults) plus overrides.
    fn preset(&self) -> anyhow::Result<Preset> {
        let mut preset = match &self.preset {
            Some(name) => load_preset(name)?,
            None => Preset::new("Command Line"),
        };

        if let Some(freq) = self.freq {
            preset.set_param("corner_frequency", freq.to_string());
        }
        if let Some(gain) = self.gain {
            preset.set_param("gain", gain.to_string());
        }
        if let Some(db) = self.gain_db {
            preset.set_param("gain", format!("{db}dB"));
        }
        if let Some(q) = self.q {
            preset.set_param("q", q.to_string());
        }
        if let Some(ms) = self.dezipper_ms {
            preset.dezipper_ms = Some(ms);
        }
        preset.automation.extend(self.ramp.iter().cloned());
        preset.bypassed |= self.bypass;
        Ok(preset)
    }
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    println!("Reading {}...", args.input.display());
    let (input, spec) = read_wav(&args.input)?;
    let frames = input.frames();

    println!(
        "  {} frames, {} channel(s), {} Hz, {:.2}s",
        frames,
        input.channels(),
        spec.sample_rate,
        frames as f64 / f64::from(spec.sample_rate)
    );

    let preset = args.preset()?;
    if let Err(e) = validate_preset(&preset) {
        tracing::warn!("{e}");
    }
    if let Err(e) = validate_automation_length(&preset, spec.sample_rate, frames as u64) {
        tracing::warn!("{e}");
    }

    let mut eq = LowShelfParametricEq::new();
    eq.init(input.channels(), spec.sample_rate as f32);
    preset.apply(&mut eq)?;
    let schedule = preset.schedule(spec.sample_rate)?;

    println!(
        "Processing: {:.1} Hz, gain {:.3}, Q {:.3}{}{}",
        eq.corner_frequency(),
        eq.gain(),
        eq.q(),
        if schedule.is_empty() {
            String::new()
        } else {
            format!(", {} scheduled change(s)", schedule.len())
        },
        if eq.is_started() { "" } else { " (bypassed)" }
    );
    tracing::debug!(
        block_size = args.block_size,
        dezipper_frames = eq.dezipper_frames(),
        "engine configured"
    );

    let pb = ProgressBar::new(frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let mut engine = ProcessingEngine::new(eq, args.block_size);
    let output = engine.process_file(
        &input,
        |start, n, events| schedule.block_events(start, n, events),
        |n| pb.inc(n as u64),
    );
    pb.finish_with_message("done");

    let before = SignalStats::measure(&input);
    let after = SignalStats::measure(&output);
    println!("\nStats:");
    println!(
        "  Input:  RMS {}, Peak {}",
        format_db(before.rms),
        format_db(before.peak)
    );
    println!(
        "  Output: RMS {}, Peak {}",
        format_db(after.rms),
        format_db(after.peak)
    );

    let out_spec = WavSpec {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };

    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &output, out_spec)?;
    println!("Done!");

    Ok(())
}
