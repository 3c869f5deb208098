//! Defines the command-line interface for the application.

use clap::builder::OsStringValueParser;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "csp-split",
    version,
    about = "Split a multi-case cutting stock problem file into one solver input per case."
)]
pub struct Cli {
    /// Input file with multiple test cases.
    #[arg(value_name = "INPUT_FILE")]
    pub input_file: PathBuf,

    /// Output directory, relative to the input file's directory. [default: <INPUT_FILE>_split]
    #[arg(
        short = 'o',
        long = "output_dir",
        alias = "output-dir",
        value_name = "DIR",
        value_parser = OsStringValueParser::new()
    )]
    pub output_dir: Option<OsString>,

    /// List the files that would be written without creating anything.
    #[arg(long)]
    pub dry_run: bool,
}
