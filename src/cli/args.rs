//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Energy-based speech detection and clip extraction.
#[derive(Debug, Parser)]
#[command(name = "vadcut")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Input media files or directories to analyze.
    pub inputs: Vec<PathBuf>,

    /// Common options for analysis.
    #[command(flatten)]
    pub analyze: AnalyzeArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Export clips from a previously saved segment list.
    Split(SplitArgs),
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for the analyze pipeline.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct AnalyzeArgs {
    /// Normalized energy threshold (0.0-1.0); frames above it are speech.
    #[arg(short = 't', long, value_parser = parse_threshold, env = "VADCUT_THRESHOLD")]
    pub threshold: Option<f32>,

    /// Analysis frame length in samples.
    #[arg(long, value_parser = parse_positive_samples, env = "VADCUT_FRAME_LENGTH")]
    pub frame_length: Option<usize>,

    /// Hop between consecutive frames in samples.
    #[arg(long, value_parser = parse_positive_samples, env = "VADCUT_HOP_LENGTH")]
    pub hop_length: Option<usize>,

    /// Minimum speech segment duration in seconds.
    #[arg(long, value_parser = parse_duration, env = "VADCUT_MIN_SPEECH")]
    pub min_speech: Option<f64>,

    /// Minimum silence duration in seconds, used with --merge-gaps.
    #[arg(long, value_parser = parse_duration, env = "VADCUT_MIN_SILENCE")]
    pub min_silence: Option<f64>,

    /// Merge speech segments separated by less than the minimum silence.
    #[arg(long)]
    pub merge_gaps: bool,

    /// Analysis sample rate in Hz; input audio is resampled to this.
    #[arg(short = 'r', long, value_parser = parse_sample_rate, env = "VADCUT_SAMPLE_RATE")]
    pub sample_rate: Option<u32>,

    /// Parent directory for per-input `<stem>_segments` output directories
    /// (default: beside each input).
    #[arg(short, long, env = "VADCUT_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Replace existing clips in the output directory.
    #[arg(long)]
    pub overwrite: bool,

    /// Stop after writing the segment list, skip clip export.
    #[arg(long)]
    pub detect_only: bool,

    /// Stop on first error.
    #[arg(long)]
    pub fail_fast: bool,

    /// Suppress progress output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable progress bars without changing log verbosity.
    #[arg(long, global = true)]
    pub no_progress: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Arguments for the split subcommand.
#[derive(Debug, Args)]
pub struct SplitArgs {
    /// Source media file to slice.
    #[arg(long)]
    pub audio: PathBuf,

    /// Segment list JSON produced by a previous run.
    #[arg(long)]
    pub segments: PathBuf,

    /// Output directory (default: `<audio stem>_segments` beside the file).
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Replace existing clips in the output directory.
    #[arg(long)]
    pub overwrite: bool,
}

/// Parse and validate a normalized threshold value.
fn parse_threshold(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !(0.0..=1.0).contains(&value) {
        return Err(format!(
            "threshold must be between 0.0 and 1.0, got {value}"
        ));
    }

    Ok(value)
}

/// Parse a positive sample count.
fn parse_positive_samples(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid sample count"))?;

    if value == 0 {
        return Err("sample count must be at least 1".to_string());
    }

    Ok(value)
}

/// Parse a non-negative duration in seconds.
fn parse_duration(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !value.is_finite() || value < 0.0 {
        return Err(format!("duration must be non-negative, got {value}"));
    }

    Ok(value)
}

/// Parse a positive sample rate in Hz.
fn parse_sample_rate(s: &str) -> Result<u32, String> {
    let value: u32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid sample rate"))?;

    if value == 0 {
        return Err("sample rate must be greater than zero".to_string());
    }

    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_threshold_valid() {
        assert_eq!(parse_threshold("0.025").ok(), Some(0.025));
        assert_eq!(parse_threshold("0.0").ok(), Some(0.0));
        assert_eq!(parse_threshold("1.0").ok(), Some(1.0));
    }

    #[test]
    fn test_parse_threshold_invalid() {
        assert!(parse_threshold("1.5").is_err());
        assert!(parse_threshold("-0.1").is_err());
        assert!(parse_threshold("abc").is_err());
    }

    #[test]
    fn test_parse_positive_samples() {
        assert_eq!(parse_positive_samples("512").ok(), Some(512));
        assert!(parse_positive_samples("0").is_err());
        assert!(parse_positive_samples("-1").is_err());
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("0.3").ok(), Some(0.3));
        assert_eq!(parse_duration("0").ok(), Some(0.0));
        assert!(parse_duration("-0.5").is_err());
        assert!(parse_duration("nan").is_err());
    }

    #[test]
    fn test_cli_parse_simple() {
        let cli = Cli::try_parse_from(["vadcut", "talk.mp4"]).unwrap();
        assert_eq!(cli.inputs.len(), 1);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_with_options() {
        let cli = Cli::try_parse_from([
            "vadcut",
            "talk.wav",
            "-t",
            "0.05",
            "--merge-gaps",
            "--detect-only",
            "-q",
        ])
        .unwrap();
        assert_eq!(cli.analyze.threshold, Some(0.05));
        assert!(cli.analyze.merge_gaps);
        assert!(cli.analyze.detect_only);
        assert!(cli.analyze.quiet);
    }

    #[test]
    fn test_cli_parse_split_subcommand() {
        let cli = Cli::try_parse_from([
            "vadcut",
            "split",
            "--audio",
            "talk.wav",
            "--segments",
            "segments.json",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Split(args)) => {
                assert_eq!(args.audio, PathBuf::from("talk.wav"));
                assert_eq!(args.segments, PathBuf::from("segments.json"));
            }
            _ => panic!("expected split subcommand"),
        }
    }

    #[test]
    fn test_cli_parse_split_requires_segments() {
        let cli = Cli::try_parse_from(["vadcut", "split", "--audio", "talk.wav"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_parse_config_subcommand() {
        let cli = Cli::try_parse_from(["vadcut", "config", "show"]);
        assert!(cli.is_ok());
    }
}
