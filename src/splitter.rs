//! Splits a multi-case cutting stock problem stream into one file per case.
//!
//! Each case starts with a single-quoted title line, followed by the number of
//! restrictions and the stock width. The solver expects those two header lines
//! the other way round, so they are swapped on output. Every other line is
//! copied verbatim into the file of the case it belongs to.

use crate::cursor::{Line, LineCursor};
use crate::error::SplitError;
use std::collections::HashSet;
use std::fs;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Controls how [`split`] treats the output directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitOptions {
    /// Parse the input and report target files without writing anything.
    pub dry_run: bool,
}

/// What a split produced.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SplitSummary {
    /// Case titles in input order, repeats included.
    pub cases: Vec<String>,
    /// Output files, one per distinct title, in first-seen order.
    pub files: Vec<PathBuf>,
}

impl SplitSummary {
    pub fn case_count(&self) -> usize {
        self.cases.len()
    }
}

/// The two lines following a case title, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseHeader {
    pub restrictions: Line,
    pub width: Line,
}

impl CaseHeader {
    /// Consumes the restriction-count and width lines that must follow a title.
    fn read<R: BufRead>(
        cursor: &mut LineCursor<R>,
        title: &str,
        title_line: usize,
    ) -> Result<Self, SplitError> {
        let mut next = || -> Result<Line, SplitError> {
            cursor
                .next_line()?
                .ok_or_else(|| SplitError::TruncatedHeader {
                    title: title.to_string(),
                    line: title_line,
                })
        };

        let restrictions = next()?;
        let width = next()?;

        Ok(Self {
            restrictions,
            width,
        })
    }

    /// Writes the header in solver order: width first, then restrictions.
    fn write_to(&self, out: &mut impl Write) -> std::io::Result<()> {
        write_terminated(out, &self.width)?;
        write_terminated(out, &self.restrictions)
    }
}

// Header lines can only lack a newline at end of input; without one the two
// swapped lines would run together.
fn write_terminated(out: &mut impl Write, line: &Line) -> std::io::Result<()> {
    out.write_all(&line.text)?;
    if !line.has_terminator() {
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// Derives the output file name from a title line.
///
/// The line terminator is dropped, then every leading and trailing `'`.
/// Names that are not valid UTF-8, or would not land directly inside the
/// output directory, are rejected.
pub fn case_title(line: &Line) -> Result<String, SplitError> {
    let invalid = || SplitError::InvalidTitle {
        title: String::from_utf8_lossy(line.content()).into_owned(),
        line: line.number,
    };

    let title = std::str::from_utf8(line.content())
        .map_err(|_| invalid())?
        .trim_matches('\'');

    let escapes_directory = title.is_empty()
        || title == "."
        || title == ".."
        || title.chars().any(std::path::is_separator);

    if escapes_directory {
        return Err(invalid());
    }

    Ok(title.to_string())
}

/// The file currently receiving lines.
///
/// Content goes to a temporary file in the output directory, which is renamed
/// onto the case title once the case is complete. In dry-run mode there is no
/// backing file.
struct CaseWriter {
    target: PathBuf,
    file: Option<BufWriter<NamedTempFile>>,
}

impl CaseWriter {
    fn open(out_dir: &Path, title: &str, options: SplitOptions) -> Result<Self, SplitError> {
        let target = out_dir.join(title);

        let file = if options.dry_run {
            None
        } else {
            let mut builder = tempfile::Builder::new();
            builder.prefix(".csp-split-").suffix(".tmp");
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                // Same mode as File::create; the process umask still applies.
                builder.permissions(fs::Permissions::from_mode(0o666));
            }
            Some(BufWriter::new(builder.tempfile_in(out_dir)?))
        };

        log::debug!("Opened case '{}' -> {}", title, target.display());

        Ok(Self { target, file })
    }

    fn write_header(&mut self, header: &CaseHeader) -> Result<(), SplitError> {
        if let Some(file) = self.file.as_mut() {
            header.write_to(file)?;
        }
        Ok(())
    }

    fn write_line(&mut self, text: &[u8]) -> Result<(), SplitError> {
        if let Some(file) = self.file.as_mut() {
            file.write_all(text)?;
        }
        Ok(())
    }

    /// Flushes the case and moves it into place, replacing any existing file.
    ///
    /// A replaced file keeps its permissions, as it would when truncated in
    /// place.
    fn finish(self) -> Result<PathBuf, SplitError> {
        if let Some(file) = self.file {
            let temp = file.into_inner().map_err(|e| e.into_error())?;
            if let Ok(existing) = fs::metadata(&self.target) {
                temp.as_file().set_permissions(existing.permissions())?;
            }
            temp.persist(&self.target).map_err(|e| e.error)?;
        }

        log::debug!("Finished {}", self.target.display());

        Ok(self.target)
    }
}

/// Splits `reader` into one file per case inside `out_dir`.
///
/// The output directory must already exist unless `options.dry_run` is set.
/// A case whose title repeats an earlier one overwrites the earlier file.
///
/// # Errors
///
/// * [`SplitError::ContentBeforeFirstCase`] if a line precedes the first title.
/// * [`SplitError::TruncatedHeader`] if a title is not followed by two lines.
/// * [`SplitError::InvalidTitle`] if a title cannot be used as a file name.
/// * [`SplitError::Io`] on any read or write failure.
pub fn split<R: BufRead>(
    reader: R,
    out_dir: &Path,
    options: SplitOptions,
) -> Result<SplitSummary, SplitError> {
    let mut cursor = LineCursor::new(reader);
    let mut current: Option<CaseWriter> = None;
    let mut summary = SplitSummary::default();
    let mut seen = HashSet::new();

    while let Some(line) = cursor.next_line()? {
        if !line.is_title() {
            match current.as_mut() {
                Some(case) => case.write_line(&line.text)?,
                None => return Err(SplitError::ContentBeforeFirstCase { line: line.number }),
            }
            continue;
        }

        if let Some(case) = current.take() {
            case.finish()?;
        }

        let title = case_title(&line)?;
        let header = CaseHeader::read(&mut cursor, &title, line.number)?;

        if seen.insert(title.clone()) {
            summary.files.push(out_dir.join(&title));
        } else {
            log::warn!(
                "Case '{}' at line {} repeats an earlier title; its file will be overwritten.",
                title,
                line.number
            );
        }

        let mut case = CaseWriter::open(out_dir, &title, options)?;
        case.write_header(&header)?;
        summary.cases.push(title);
        current = Some(case);
    }

    if let Some(case) = current.take() {
        case.finish()?;
    }

    log::info!(
        "Split {} case(s) from {} line(s) into {} file(s)",
        summary.case_count(),
        cursor.line_number(),
        summary.files.len()
    );

    Ok(summary)
}
