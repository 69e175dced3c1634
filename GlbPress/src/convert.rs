//! Single-file conversion: read, normalize, package, write.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::document::read_named;
use crate::error::{Error, Result};
use crate::normalize::{NormalizeOptions, UnresolvedReference, normalize};
use crate::package::Packager;

// ============================================================================
// Progress Types
// ============================================================================

/// Progress callback type for conversion operations
pub type ConvertProgressCallback<'a> = &'a (dyn Fn(&ConvertProgress) + Sync + Send);

/// Progress information during conversion operations
#[derive(Debug, Clone)]
pub struct ConvertProgress {
    /// Current operation phase
    pub phase: ConvertPhase,
    /// Current item number (1-indexed)
    pub current: usize,
    /// Total number of items
    pub total: usize,
    /// Current file being processed (if applicable)
    pub current_file: Option<String>,
}

impl ConvertProgress {
    #[must_use]
    pub fn new(phase: ConvertPhase, current: usize, total: usize) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: None,
        }
    }

    #[must_use]
    pub fn with_file(
        phase: ConvertPhase,
        current: usize,
        total: usize,
        file: impl Into<String>,
    ) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: Some(file.into()),
        }
    }

    /// Get the progress percentage (0.0 - 1.0)
    #[must_use]
    pub fn percentage(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.current as f32 / self.total as f32
        }
    }
}

/// Phase of a conversion operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertPhase {
    ReadingFile,
    Normalizing,
    Packaging,
    WritingOutput,
    Complete,
}

impl ConvertPhase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReadingFile => "Reading file",
            Self::Normalizing => "Normalizing",
            Self::Packaging => "Packaging",
            Self::WritingOutput => "Writing output",
            Self::Complete => "Complete",
        }
    }
}

// ============================================================================
// Conversion
// ============================================================================

/// Outcome of a successful file conversion.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub source: PathBuf,
    pub output: PathBuf,
    /// References emitted as `-1` under the lenient policy.
    pub unresolved: Vec<UnresolvedReference>,
}

/// Output location for `source`: its path relative to `source_base`,
/// re-rooted at `output_dir`, with the extension replaced.
#[must_use]
pub fn output_path_for(
    source: &Path,
    source_base: &Path,
    output_dir: &Path,
    extension: &str,
) -> PathBuf {
    let relative = match source.strip_prefix(source_base) {
        Ok(relative) => relative,
        Err(_) => source.file_name().map_or(source, Path::new),
    };
    output_dir.join(relative).with_extension(extension)
}

/// Convert one named document file into a packaged container.
///
/// # Errors
/// Returns an error if the source cannot be read or parsed, normalization
/// fails, packaging fails, or the output cannot be written. Nothing is
/// written unless packaging succeeded.
pub fn convert_file<P: Packager + ?Sized>(
    source: &Path,
    output: &Path,
    options: &NormalizeOptions,
    resource_dir: &Path,
    packager: &P,
) -> Result<FileReport> {
    convert_file_with_progress(source, output, options, resource_dir, packager, &|_| {})
}

/// Convert one file with a progress callback.
///
/// # Errors
/// See [`convert_file`].
pub fn convert_file_with_progress<P: Packager + ?Sized>(
    source: &Path,
    output: &Path,
    options: &NormalizeOptions,
    resource_dir: &Path,
    packager: &P,
    progress: ConvertProgressCallback,
) -> Result<FileReport> {
    progress(&ConvertProgress::with_file(
        ConvertPhase::ReadingFile,
        1,
        4,
        source.display().to_string(),
    ));
    let named = read_named(source)?;

    progress(&ConvertProgress::new(ConvertPhase::Normalizing, 2, 4));
    let normalized = normalize(&named, options)?;

    progress(&ConvertProgress::new(ConvertPhase::Packaging, 3, 4));
    let payload = packager.package(&normalized.document, resource_dir)?;

    progress(&ConvertProgress::with_file(
        ConvertPhase::WritingOutput,
        4,
        4,
        output.display().to_string(),
    ));
    write_atomic(output, &payload)?;

    progress(&ConvertProgress::new(ConvertPhase::Complete, 4, 4));
    tracing::info!(
        "converted {} -> {} ({} bytes)",
        source.display(),
        output.display(),
        payload.len()
    );

    Ok(FileReport {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        unresolved: normalized.unresolved,
    })
}

/// Normalize one file and write the indexed document as pretty `.gltf`
/// JSON, leaving buffer URIs untouched.
///
/// # Errors
/// Returns an error if the source cannot be read or parsed, normalization
/// fails, or the output cannot be written.
pub fn convert_file_to_gltf(
    source: &Path,
    output: &Path,
    options: &NormalizeOptions,
) -> Result<FileReport> {
    let named = read_named(source)?;
    let normalized = normalize(&named, options)?;
    let json = normalized.document.to_json_string_pretty()?;
    write_atomic(output, json.as_bytes())?;

    tracing::info!("normalized {} -> {}", source.display(), output.display());
    Ok(FileReport {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        unresolved: normalized.unresolved,
    })
}

/// Write `bytes` to `path` through a temporary file in the same directory,
/// creating the directory if needed. Readers never see a partial file.
///
/// # Errors
/// Returns an error if the directory cannot be created or the file cannot
/// be written or moved into place.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if path.file_name().is_none() {
        return Err(Error::InvalidPath(path.display().to_string()));
    }

    fs::create_dir_all(dir)?;
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.persist(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_mirrors_relative_parent() {
        assert_eq!(
            output_path_for(
                Path::new("json/props/crate.json"),
                Path::new("json"),
                Path::new("web"),
                "glb"
            ),
            PathBuf::from("web/props/crate.glb")
        );
        assert_eq!(
            output_path_for(Path::new("json/scene.json"), Path::new("json"), Path::new("web"), "glb"),
            PathBuf::from("web/scene.glb")
        );
    }

    #[test]
    fn test_output_path_outside_base_uses_file_name() {
        assert_eq!(
            output_path_for(
                Path::new("/elsewhere/model.json"),
                Path::new("json"),
                Path::new("web"),
                "glb"
            ),
            PathBuf::from("web/model.glb")
        );
    }

    #[test]
    fn test_write_atomic_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested/out/scene.glb");

        write_atomic(&target, b"payload").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"payload");
        assert_eq!(fs::read_dir(target.parent().unwrap()).unwrap().count(), 1);
    }
}
