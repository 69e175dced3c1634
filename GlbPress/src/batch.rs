//! Batch conversion
//!
//! Discovers named documents under an input directory, converts each one in
//! parallel, and writes containers mirroring the input layout. A failure in
//! one file is reported and never stops the others.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::config::ConvertConfig;
use crate::convert::{ConvertPhase, ConvertProgress, convert_file, output_path_for};
use crate::error::{Error, Result};
use crate::package::{GLB_EXTENSION, Packager};

/// Result of a batch conversion
#[derive(Debug, Clone, Default)]
pub struct BatchConvertResult {
    /// Number of files converted
    pub success_count: usize,
    /// Number of files that failed
    pub fail_count: usize,
    /// One message per file, in input order
    pub results: Vec<String>,
    /// Sources that failed, in input order
    pub failed: Vec<PathBuf>,
}

/// Find source files with `extension` (case-insensitive, without the dot).
///
/// Only the top level of `dir` is searched unless `recursive` is set.
///
/// # Errors
/// Returns [`Error::InvalidPath`] if `dir` is not a directory, or an error
/// if the walk cannot read it.
pub fn find_source_files<P: AsRef<Path>>(
    dir: P,
    extension: &str,
    recursive: bool,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(Error::InvalidPath(dir.display().to_string()));
    }

    let mut walker = WalkDir::new(dir).follow_links(true).min_depth(1);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        let path = entry.path();
        if path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
        {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

/// Convert `files` in parallel according to `config`.
///
/// Outputs land under `config.output_dir`, mirroring each file's position
/// relative to `config.input_dir`.
pub fn batch_convert<P, F>(
    files: &[PathBuf],
    config: &ConvertConfig,
    packager: &P,
    progress: F,
) -> BatchConvertResult
where
    P: Packager + ?Sized,
    F: Fn(&ConvertProgress) + Send + Sync,
{
    let success_counter = AtomicUsize::new(0);
    let fail_counter = AtomicUsize::new(0);
    let processed = AtomicUsize::new(0);
    let total = files.len();
    let options = config.normalize_options();

    // Sources whose outputs collide (e.g. `a.json` and `a.JSON`) after the
    // first one are failed rather than overwriting it.
    let mut claimed: HashMap<PathBuf, usize> = HashMap::new();
    let planned: Vec<(&PathBuf, PathBuf, bool)> = files
        .iter()
        .enumerate()
        .map(|(position, source)| {
            let output = output_path_for(
                source,
                &config.input_dir,
                &config.output_dir,
                packager.extension(),
            );
            let duplicate = *claimed.entry(output.clone()).or_insert(position) != position;
            (source, output, duplicate)
        })
        .collect();

    let outcomes: Vec<(String, Option<PathBuf>)> = planned
        .par_iter()
        .map(|(source, output, duplicate)| {
            let display_path = source
                .strip_prefix(&config.input_dir)
                .unwrap_or(source.as_path())
                .to_string_lossy()
                .to_string();

            let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
            progress(&ConvertProgress::with_file(
                ConvertPhase::Normalizing,
                current,
                total,
                display_path.clone(),
            ));

            let converted = if *duplicate {
                Err(Error::DuplicateOutput(output.display().to_string()))
            } else {
                let resource_dir = config.resource_dir_for(source);
                convert_file(source, output, &options, &resource_dir, packager)
            };

            match converted {
                Ok(report) => {
                    success_counter.fetch_add(1, Ordering::SeqCst);
                    if report.unresolved.is_empty() {
                        (format!("Converted: {display_path}"), None)
                    } else {
                        (
                            format!(
                                "Converted: {display_path} ({} unresolved references)",
                                report.unresolved.len()
                            ),
                            None,
                        )
                    }
                }
                Err(e) => {
                    fail_counter.fetch_add(1, Ordering::SeqCst);
                    tracing::warn!("failed to convert {display_path}: {e}");
                    (format!("Failed {display_path}: {e}"), Some((*source).clone()))
                }
            }
        })
        .collect();

    progress(&ConvertProgress::new(ConvertPhase::Complete, total, total));

    let (results, failed): (Vec<_>, Vec<_>) = outcomes.into_iter().unzip();
    BatchConvertResult {
        success_count: success_counter.load(Ordering::SeqCst),
        fail_count: fail_counter.load(Ordering::SeqCst),
        results,
        failed: failed.into_iter().flatten().collect(),
    }
}

/// Names of the packaged containers directly inside `dir`, sorted.
///
/// # Errors
/// Returns [`Error::InvalidPath`] if `dir` is not a directory.
pub fn list_packaged<P: AsRef<Path>>(dir: P) -> Result<Vec<String>> {
    let mut names: Vec<String> = find_source_files(dir, GLB_EXTENSION, false)?
        .iter()
        .filter_map(|path| path.file_name())
        .map(|name| name.to_string_lossy().to_string())
        .collect();
    names.sort();
    Ok(names)
}
