use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::format::{FormatError, FormatParser, ParseOptions};
use super::model::Dataset;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a file could not be turned into a [`Dataset`].
///
/// Format problems are permanent properties of the file; I/O problems are
/// about the environment. Callers processing many files treat them differently.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unsupported file extension for {}: .{extension}", .path.display())]
    UnsupportedExtension { path: PathBuf, extension: String },

    #[error(transparent)]
    Format(#[from] FormatError),
}

impl LoadError {
    /// True when the file itself is at fault (bad content or wrong kind of file).
    pub fn is_format(&self) -> bool {
        matches!(
            self,
            LoadError::Format(_) | LoadError::UnsupportedExtension { .. }
        )
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a plot dump from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.txt` / `.dat` – plot dump written by the distribution simulation
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    load_file_with(path, ParseOptions::default())
}

/// [`load_file`] with explicit parser options.
pub fn load_file_with(path: &Path, options: ParseOptions) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "txt" | "dat" => load_plot_dump(path, options)?,
        other => {
            return Err(LoadError::UnsupportedExtension {
                path: path.to_path_buf(),
                extension: other.to_string(),
            })
        }
    };

    log::info!(
        "Loaded '{}' from {}: {} curve points, {} samples",
        dataset.title(),
        path.display(),
        dataset.theoretical_len(),
        dataset.empirical_samples().len()
    );
    Ok(dataset)
}

fn load_plot_dump(path: &Path, options: ParseOptions) -> Result<Dataset, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = FormatParser::with_options(path.display().to_string(), options)
        .parse_bytes(&bytes)?;
    Ok(dataset)
}
