//! Barscope - live bar-chart spectrum in the terminal
//!
//! A producer thread plays the role of the audio callback, pushing one
//! block per block duration. The main thread polls the published spectrum
//! at the refresh interval and draws it as text bars.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{error, info};

use barscope::audio::{SpectrumPipeline, ToneGenerator};
use barscope::cli::Args;
use barscope::display::DisplayBridge;
use barscope::params::AnalyzerConfig;

const BAR_GLYPHS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One glyph per band, scaled against the display ceiling
fn render_bars(frame: &[f32], limit: f32) -> String {
    let top = (BAR_GLYPHS.len() - 1) as f32;
    frame
        .iter()
        .map(|&magnitude| {
            let level = ((magnitude / limit).clamp(0.0, 1.0) * top).round() as usize;
            BAR_GLYPHS[level]
        })
        .collect()
}

fn run_tone(args: &Args, config: &AnalyzerConfig) -> barscope::Result<()> {
    let mut pipeline = SpectrumPipeline::new(config)?;
    let playback = pipeline.playback_handle();
    let mut bridge = DisplayBridge::new(pipeline.reader(), config.magnitude_limit);

    info!(
        "Tone: {} Hz @ amplitude {} (expect peak near bin {})",
        args.tone_hz,
        args.amplitude,
        config.hz_to_bin(args.tone_hz)
    );

    let running = Arc::new(AtomicBool::new(true));
    let producer = {
        let running = Arc::clone(&running);
        let block_size = config.block_size;
        let block_duration = config.block_duration();
        let mut tone = ToneGenerator::new(args.tone_hz, args.amplitude, config.sample_rate_hz);

        thread::spawn(move || {
            let mut block = vec![0.0; block_size];
            while running.load(Ordering::Relaxed) {
                tone.fill(&mut block);
                if let Err(e) = pipeline.process_block(&block) {
                    error!("Dropped block: {}", e);
                }
                thread::sleep(block_duration);
            }
        })
    };

    playback.start();

    let start = Instant::now();
    let pause_at = args
        .pause_after
        .and_then(|secs| Duration::try_from_secs_f32(secs).ok());
    let mut paused = false;

    bridge.run_for(
        Duration::try_from_secs_f32(args.seconds).unwrap_or_default(),
        config.refresh_interval(),
        |frame| {
            if !paused && pause_at.is_some_and(|at| start.elapsed() >= at) {
                info!("Pausing analysis, display frozen");
                playback.stop();
                paused = true;
            }
            println!("|{}|", render_bars(frame, config.magnitude_limit));
        },
    );

    playback.stop();
    running.store(false, Ordering::Relaxed);
    if producer.join().is_err() {
        error!("Producer thread panicked");
    }
    Ok(())
}

#[cfg(feature = "capture")]
fn run_capture(args: &Args, config: &AnalyzerConfig) -> barscope::Result<()> {
    use barscope::audio::AudioCapture;

    let capture = AudioCapture::start(config)?;
    info!("Capturing from {}", capture.device_name());
    let mut bridge = DisplayBridge::new(capture.reader(), config.magnitude_limit);

    let start = Instant::now();
    let pause_at = args
        .pause_after
        .and_then(|secs| Duration::try_from_secs_f32(secs).ok());
    let mut paused = false;

    bridge.run_for(
        Duration::try_from_secs_f32(args.seconds).unwrap_or_default(),
        config.refresh_interval(),
        |frame| {
            if !paused && pause_at.is_some_and(|at| start.elapsed() >= at) {
                info!("Pausing capture, display frozen");
                if let Err(e) = capture.pause() {
                    error!("{}", e);
                }
                paused = true;
            }
            println!("|{}|", render_bars(frame, config.magnitude_limit));
        },
    );
    Ok(())
}

fn run(args: Args) -> barscope::Result<()> {
    let config = args.analyzer_config()?;

    #[cfg(feature = "capture")]
    if args.capture {
        return run_capture(&args, &config);
    }

    run_tone(&args, &config)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("Barscope - live spectrum bars");
    println!("Initializing pipeline...\n");

    if let Err(e) = run(Args::parse()) {
        error!("{}", e);
        std::process::exit(1);
    }
}
