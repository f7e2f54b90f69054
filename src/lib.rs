//! Vadcut - energy-based speech detection and clip extraction.
//!
//! Locates speech-bearing intervals in the audio track of a media file via
//! a short-time energy threshold, persists the detected intervals, and cuts
//! the audio into one WAV clip per interval.

#![warn(missing_docs)]

pub mod audio;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod output;
pub mod pipeline;
pub mod segments;
pub mod vad;

use clap::{CommandFactory, Parser};
use cli::{AnalyzeArgs, Cli, Command, ConfigAction, SplitArgs};
use config::{Config, config_file_path, load_default_config, save_default_config, validate_config};
use pipeline::{ProcessOptions, collect_input_files, output_dir_for, process_file, split_file};
use std::path::PathBuf;
use tracing::{error, info, warn};
use vad::DetectorOptions;

pub use error::{Error, Result};

/// Main entry point for the vadcut CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.analyze.verbose, cli.analyze.quiet);

    // Load configuration
    let config = load_default_config()?;
    validate_config(&config)?;

    // Handle subcommands
    if let Some(command) = cli.command {
        return handle_command(command, &cli.analyze, &config);
    }

    // Default: analyze files
    // Show help if no inputs provided
    if cli.inputs.is_empty() {
        let _ = Cli::command().print_help();
        return Ok(());
    }

    analyze_files(&cli.inputs, &cli.analyze, &config)
}

/// Analyze input files with the given options.
fn analyze_files(inputs: &[PathBuf], args: &AnalyzeArgs, config: &Config) -> Result<()> {
    use crate::output::progress;
    use std::time::Instant;

    let total_start = Instant::now();

    let files = collect_input_files(inputs)?;
    if files.is_empty() {
        return Err(Error::NoValidInputFiles);
    }

    info!("Found {} media file(s) to process", files.len());

    let options = build_process_options(args, config);
    warn_on_sparse_frames(&options);

    let progress_enabled = options.progress_enabled && files.len() > 1;
    let file_progress = progress::create_file_progress(files.len(), progress_enabled);

    let mut processed = 0;
    let mut errors = 0;
    let mut total_segments = 0;
    let mut total_clips = 0;

    for file in &files {
        let file_output_dir = output_dir_for(file, args.output_dir.as_deref());

        match process_file(file, &file_output_dir, &options) {
            Ok(result) => {
                processed += 1;
                total_segments += result.segments;
                total_clips += result.clips_exported;
            }
            Err(e) => {
                error!("Failed to process {}: {}", file.display(), e);
                errors += 1;
                if args.fail_fast {
                    progress::finish_progress(file_progress, "Failed");
                    return Err(e);
                }
            }
        }
        progress::inc_progress(file_progress.as_ref());
    }

    progress::finish_progress(file_progress, "Complete");

    // Summary
    let total_duration = total_start.elapsed().as_secs_f64();
    info!(
        "Complete: {} processed, {} errors, {} segments, {} clips in {:.2}s",
        processed, errors, total_segments, total_clips, total_duration
    );

    if errors > 0 {
        warn!("{} file(s) had errors", errors);
    }

    Ok(())
}

/// Resolve CLI overrides against the configuration.
fn build_process_options(args: &AnalyzeArgs, config: &Config) -> ProcessOptions {
    let detection = &config.detection;

    let detector = DetectorOptions {
        threshold: args.threshold.unwrap_or(detection.threshold),
        min_speech_duration: args.min_speech.unwrap_or(detection.min_speech_duration),
        min_silence_duration: args.min_silence.unwrap_or(detection.min_silence_duration),
        merge_gaps: args.merge_gaps || detection.merge_gaps,
    };

    ProcessOptions {
        detector,
        frame_length: args.frame_length.unwrap_or(detection.frame_length),
        hop_length: args.hop_length.unwrap_or(detection.hop_length),
        sample_rate: args.sample_rate.unwrap_or(config.audio.sample_rate),
        clip_prefix: config.export.clip_prefix.clone(),
        overwrite: args.overwrite || config.export.overwrite,
        detect_only: args.detect_only,
        progress_enabled: !args.quiet && !args.no_progress,
    }
}

/// Warn about frame geometry that leaves samples unprofiled.
fn warn_on_sparse_frames(options: &ProcessOptions) {
    if options.hop_length > options.frame_length {
        warn!(
            "hop_length {} exceeds frame_length {}: frames will not overlap and some samples are never profiled",
            options.hop_length, options.frame_length
        );
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt().with_env_filter(filter).init();
}

fn handle_command(command: Command, args: &AnalyzeArgs, config: &Config) -> Result<()> {
    match command {
        Command::Split(split_args) => handle_split_command(&split_args, args, config),
        Command::Config { action } => handle_config_command(action),
    }
}

/// Handle the `split` subcommand.
fn handle_split_command(
    split_args: &SplitArgs,
    args: &AnalyzeArgs,
    config: &Config,
) -> Result<()> {
    let mut options = build_process_options(args, config);
    options.overwrite = options.overwrite || split_args.overwrite;

    let output_dir = split_args.output_dir.clone().unwrap_or_else(|| {
        output_dir_for(&split_args.audio, None)
    });

    let result = split_file(&split_args.audio, &split_args.segments, &output_dir, &options)?;

    info!(
        "Split complete: {}/{} clip(s) exported in {:.2}s",
        result.clips_exported, result.clips_attempted, result.duration_secs
    );

    Ok(())
}

fn handle_config_command(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let config = Config::default();
                let saved_path = save_default_config(&config)?;
                println!("Created configuration file: {}", saved_path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_default_config()?;
            println!("{config:#?}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}
