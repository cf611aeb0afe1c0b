//! WAV metadata and level summary.

use crate::commands::common::format_db;
use clap::Args;
use shelf_core::ChannelBuffers;
use shelf_io::{SignalStats, WavFormat, read_wav, read_wav_info};
use std::path::PathBuf;

#[derive(Args)]
pub struct InfoArgs {
    /// WAV file to inspect
    file: PathBuf,

    /// Also measure RMS and peak level per channel (reads all samples)
    #[arg(long)]
    levels: bool,
}

pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let info = read_wav_info(&args.file)?;
    let encoding = match info.format {
        WavFormat::Pcm => "integer PCM",
        WavFormat::IeeeFloat => "float",
    };

    println!("File:        {}", args.file.display());
    println!("Encoding:    {}-bit {}", info.bits_per_sample, encoding);
    println!("Channels:    {}", info.channels);
    println!("Sample Rate: {} Hz", info.sample_rate);
    println!(
        "Duration:    {:.3}s ({} frames)",
        info.duration_secs, info.num_frames
    );

    if args.levels {
        let (buffers, _) = read_wav(&args.file)?;
        println!("\nLevels:");
        for (ch, samples) in buffers.iter().enumerate() {
            let stats = SignalStats::measure(&ChannelBuffers::from_channels(vec![samples.to_vec()]));
            println!(
                "  ch {ch}: RMS {}, Peak {}",
                format_db(stats.rms),
                format_db(stats.peak)
            );
        }
    }
    Ok(())
}
