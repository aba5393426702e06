use std::path::{Path, PathBuf};

use crate::composite::{self, CompositeSet};
use crate::data::format::ParseOptions;
use crate::data::loader::{load_file_with, LoadError};
use crate::data::model::Dataset;
use crate::data::naming::PlotDataName;

// ---------------------------------------------------------------------------
// Batch results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub path: PathBuf,
    /// Decoded file name, when it follows the `plot_data_*` convention.
    pub name: Option<PlotDataName>,
    pub dataset: Dataset,
}

#[derive(Debug)]
pub struct FailedFile {
    pub path: PathBuf,
    pub error: LoadError,
}

/// Outcome of [`run_batch`]: every input is in exactly one of the two lists.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub loaded: Vec<LoadedFile>,
    pub failures: Vec<FailedFile>,
}

impl BatchReport {
    /// Number of files looked at.
    pub fn processed(&self) -> usize {
        self.loaded.len() + self.failures.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Complete composite sets among the loaded files.
    pub fn composites(&self) -> Vec<CompositeSet<'_>> {
        composite::group(
            self.loaded
                .iter()
                .filter_map(|f| f.name.as_ref().map(|name| (name, &f.dataset))),
        )
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Load `paths` in lexicographic order.
///
/// A malformed file is logged, recorded in [`BatchReport::failures`] and
/// skipped. An I/O error stops the batch and is returned.
pub fn run_batch<P: AsRef<Path>>(
    paths: &[P],
    options: ParseOptions,
) -> Result<BatchReport, LoadError> {
    let mut sorted: Vec<PathBuf> = paths.iter().map(|p| p.as_ref().to_path_buf()).collect();
    sorted.sort();

    let mut report = BatchReport::default();
    for path in sorted {
        log::debug!("Processing {}", path.display());
        match load_file_with(&path, options) {
            Ok(dataset) => report.loaded.push(LoadedFile {
                name: PlotDataName::from_path(&path),
                path,
                dataset,
            }),
            Err(error) if error.is_format() => {
                log::warn!("Skipping {}: {error}", path.display());
                report.failures.push(FailedFile { path, error });
            }
            Err(error) => {
                log::error!("Aborting batch at {}: {error}", path.display());
                return Err(error);
            }
        }
    }

    log::info!(
        "Processed {} files, {} failed",
        report.processed(),
        report.failed()
    );
    Ok(report)
}
