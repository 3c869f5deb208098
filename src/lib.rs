//! `csp-split` breaks a cutting stock problem file holding many test cases
//! into one solver input file per case.
//!
//! Each case in the input starts with a single-quoted title, followed by the
//! restriction count and the stock width. The solver wants the width first,
//! so the two header lines are swapped; everything else is copied as is.
//!
//! # Example
//!
//! ```rust
//! use csp_split::splitter::{split, SplitOptions};
//!
//! # fn demo() -> Result<(), csp_split::error::SplitError> {
//! let dir = tempfile::tempdir()?;
//! let input = "'A'\n3\n100\n1 10\n2 20\n'B'\n2\n50\n5 5\n";
//!
//! let summary = split(input.as_bytes(), dir.path(), SplitOptions::default())?;
//!
//! assert_eq!(summary.cases, vec!["A", "B"]);
//! assert_eq!(std::fs::read_to_string(dir.path().join("B"))?, "50\n2\n5 5\n");
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

pub mod cli;
pub mod cursor;
pub mod error;
pub mod splitter;

use crate::cli::Cli;
use crate::splitter::{split, SplitOptions};
use anyhow::{anyhow, Context};
use clap::Parser;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Suffix appended to the input file name when no output directory is given.
pub const DEFAULT_DIR_SUFFIX: &str = "_split";

/// Resolves where the split cases go.
///
/// The result always sits relative to the input file's parent directory. An
/// explicit `output_dir` is joined onto that parent (an absolute path replaces
/// it); otherwise the directory is named `<input file name>_split`.
pub fn resolve_output_dir(input_file: &Path, output_dir: Option<&Path>) -> anyhow::Result<PathBuf> {
    let parent = input_file.parent().unwrap_or_else(|| Path::new(""));

    let dir_name = match output_dir {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => {
            let file_name = input_file.file_name().ok_or_else(|| {
                anyhow!(
                    "Could not determine file name of {}",
                    input_file.display()
                )
            })?;
            let mut dir_name = file_name.to_os_string();
            dir_name.push(DEFAULT_DIR_SUFFIX);
            PathBuf::from(dir_name)
        }
    };

    Ok(parent.join(dir_name))
}

/// The main entry point for the application logic.
pub fn run() -> anyhow::Result<()> {
    // Configured through RUST_LOG.
    env_logger::init();

    let Cli {
        input_file,
        output_dir,
        dry_run,
    } = Cli::parse();

    let out_dir = resolve_output_dir(&input_file, output_dir.as_deref().map(Path::new))?;

    let input = File::open(&input_file)
        .with_context(|| format!("Failed to read input file: {}", input_file.display()))?;

    if !dry_run && !out_dir.exists() {
        fs::create_dir_all(&out_dir).with_context(|| {
            format!("Failed to create output directory: {}", out_dir.display())
        })?;
        log::debug!("Created output directory {}", out_dir.display());
    }

    println!("Input file: {}", input_file.display());
    println!("Output directory: {}", out_dir.display());

    let summary = split(BufReader::new(input), &out_dir, SplitOptions { dry_run })
        .with_context(|| format!("Failed to split {}", input_file.display()))?;

    if dry_run {
        for file in &summary.files {
            println!("Would write: {}", file.display());
        }
    }

    Ok(())
}
