//! Processing pipeline components.

mod coordinator;
mod processor;

pub use coordinator::{
    collect_input_files, output_dir_for, prepare_output_dir, segments_path_for,
};
pub use processor::{ProcessOptions, ProcessResult, process_file, split_file};
