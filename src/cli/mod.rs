//! Command-line interface.

mod args;

pub use args::{AnalyzeArgs, Cli, Command, ConfigAction, SplitArgs};
