//! Pause detection tool - analyzes an audio file and reports silence intervals.
//!
//! Loads the file, computes a frame-level RMS energy profile, thresholds it
//! and reports every low-energy interval longer than the configured minimum,
//! with an optional terminal chart of the energy curve.

use pausescan::config::Config;
use pausescan::display::render_energy_chart;
use pausescan::energy::{compute_energy_profile, rms_to_db};
use pausescan::pause_detector::{PauseConfig, PauseDetector};
use pausescan::audio_loader::load_audio;
use std::env;
use std::path::Path;
use std::process;

const DEFAULT_THRESHOLD: f32 = 0.015;
const DEFAULT_MIN_PAUSE: f64 = 0.2;

fn print_usage() {
    println!("Pause Detector - Find silence intervals in an audio file");
    println!();
    println!("Usage: pause_detect <FILE> [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --threshold <RMS>       Energy threshold, linear RMS (default: {})", DEFAULT_THRESHOLD);
    println!("  --min-pause <SECS>      Minimum pause duration in seconds (default: {})", DEFAULT_MIN_PAUSE);
    println!("  --no-chart              Skip the terminal energy chart");
    println!("  --verbose, -v           Show sampled per-frame RMS levels");
    println!("  --save-defaults         Save the given options as defaults");
    println!("  --help                  Show this help message");
    println!();
    println!("Output:");
    println!("  - File information (sample rate, channels, duration)");
    println!("  - One line per detected pause with start, end and duration");
    println!("  - Summary statistics");
    println!();
    println!("Tuning tips:");
    println!("  - If no pauses found: increase --threshold");
    println!("  - If too many short pauses: increase --min-pause");
}

fn format_timestamp(seconds: f64) -> String {
    let mins = (seconds / 60.0) as u32;
    let secs = seconds % 60.0;
    format!("{:02}:{:05.2}", mins, secs)
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let mut audio_file: Option<String> = None;
    let mut cli = Config::new();
    let mut save_defaults = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--threshold" => {
                if i + 1 < args.len() {
                    cli.threshold = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--min-pause" => {
                if i + 1 < args.len() {
                    cli.min_pause_duration = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--no-chart" => cli.no_chart = Some(true),
            "--verbose" | "-v" => cli.verbose = Some(true),
            "--save-defaults" => save_defaults = true,
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            arg => {
                if arg.starts_with("--") {
                    eprintln!("Unknown option: {}", arg);
                    process::exit(1);
                }
                if audio_file.is_none() {
                    audio_file = Some(arg.to_string());
                }
            }
        }
        i += 1;
    }

    let audio_file = audio_file.unwrap_or_else(|| {
        eprintln!("Error: No audio file specified");
        print_usage();
        process::exit(1);
    });

    if !Path::new(&audio_file).exists() {
        eprintln!("Error: File not found: {}", audio_file);
        process::exit(1);
    }

    // Saved defaults, overridden by anything given on the command line
    let mut config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: Could not load defaults: {}", e);
        Config::new()
    });
    config.merge(&cli);

    if save_defaults {
        if let Err(e) = config.save() {
            eprintln!("Warning: Could not save defaults: {}", e);
        } else {
            println!("Defaults saved.");
        }
    }

    let threshold = config.threshold.unwrap_or(DEFAULT_THRESHOLD);
    let min_pause_duration = config.min_pause_duration.unwrap_or(DEFAULT_MIN_PAUSE);
    let verbose = config.verbose.unwrap_or(false);
    let no_chart = config.no_chart.unwrap_or(false);

    if threshold <= 0.0 || min_pause_duration <= 0.0 {
        eprintln!("Error: threshold and min-pause must be positive");
        process::exit(1);
    }

    println!("Pause Detector");
    println!("==============");
    println!("File: {}", audio_file);
    println!();

    let audio = load_audio(Path::new(&audio_file)).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    println!("Audio Info:");
    println!("  Sample rate: {} Hz", audio.sample_rate);
    println!("  Channels: {}", audio.channels);
    println!("  Duration: {} ({:.2}s)", format_timestamp(audio.duration_seconds()), audio.duration_seconds());
    println!();
    println!("Detection parameters:");
    println!("  Energy threshold: {} ({:.1} dB)", threshold, rms_to_db(threshold));
    println!("  Min pause duration: {} s", min_pause_duration);
    println!();

    let profile = compute_energy_profile(&audio.samples, audio.sample_rate);

    if verbose {
        // Sample roughly 20 frames evenly across the file
        let step = (profile.len() / 20).max(1);
        for i in (0..profile.len()).step_by(step) {
            let rms = profile.rms[i];
            println!("  [{}] RMS: {:.4} ({:6.1} dB) {}",
                     format_timestamp(profile.times[i]),
                     rms,
                     rms_to_db(rms),
                     if rms < threshold { "IN PAUSE" } else { "" });
        }
        println!();
    }

    let detector = PauseDetector::new(PauseConfig {
        threshold,
        min_pause_duration,
    });
    let segments = detector.scan(&profile);

    println!("Detected {} pauses:", segments.len());
    for (i, segment) in segments.iter().enumerate() {
        println!("Pause {}: {:.2}s - {:.2}s (duration: {:.2}s)",
                 i + 1, segment.start, segment.end, segment.duration());
    }

    if !segments.is_empty() {
        let total_pause: f64 = segments.iter().map(|s| s.duration()).sum();
        let longest = segments
            .iter()
            .map(|s| s.duration())
            .fold(0.0_f64, f64::max);
        let duration = audio.duration_seconds();

        println!();
        println!("Summary");
        println!("-------");
        println!("  Total pause time: {:.2}s ({})", total_pause, format_timestamp(total_pause));
        println!("  Longest pause: {:.2}s", longest);
        if duration > 0.0 {
            println!("  Pause ratio: {:.1}%", total_pause / duration * 100.0);
        }
    }

    if !no_chart {
        if let Err(e) = render_energy_chart(&profile, threshold, &segments) {
            eprintln!("Error rendering chart: {}", e);
            process::exit(1);
        }
    }
}
