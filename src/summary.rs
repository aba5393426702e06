use std::fmt;

use serde::Serialize;

use crate::batch::BatchReport;
use crate::composite::SampleComparison;
use crate::data::naming::DatasetRole;
use crate::data::stats::SampleSummary;

// ---------------------------------------------------------------------------
// Printable batch summary (text via Display, JSON via serde)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct FileSummary {
    pub path: String,
    pub title: String,
    pub test_case: Option<String>,
    pub role: Option<DatasetRole>,
    pub declared_points_count: i64,
    pub curve_points: usize,
    pub declared_empirical_size: i64,
    pub samples: Option<SampleSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailureSummary {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub processed: usize,
    pub failed: usize,
    pub files: Vec<FileSummary>,
    pub failures: Vec<FailureSummary>,
    pub composites: Vec<SampleComparison>,
}

impl RunSummary {
    pub fn from_report(report: &BatchReport) -> Self {
        let files = report
            .loaded
            .iter()
            .map(|f| FileSummary {
                path: f.path.display().to_string(),
                title: f.dataset.title().to_string(),
                test_case: f.name.as_ref().map(|n| n.test_case.clone()),
                role: f.name.as_ref().map(|n| n.role),
                declared_points_count: f.dataset.declared_points_count(),
                curve_points: f.dataset.theoretical_len(),
                declared_empirical_size: f.dataset.declared_empirical_size(),
                samples: SampleSummary::from_samples(f.dataset.empirical_samples()),
            })
            .collect();

        let failures = report
            .failures
            .iter()
            .map(|f| FailureSummary {
                path: f.path.display().to_string(),
                error: f.error.to_string(),
            })
            .collect();

        let composites = report
            .composites()
            .iter()
            .filter_map(|set| set.compare())
            .collect();

        RunSummary {
            processed: report.processed(),
            failed: report.failed(),
            files,
            failures,
            composites,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for file in &self.files {
            writeln!(f, "{}  ({})", file.title, file.path)?;
            writeln!(
                f,
                "  curve points: {} (declared {})",
                file.curve_points, file.declared_points_count
            )?;
            match &file.samples {
                Some(s) => writeln!(
                    f,
                    "  samples:      {} (declared {})  mean={:.4} std={:.4} min={:.4} max={:.4}",
                    s.count, file.declared_empirical_size, s.mean, s.std_dev, s.min, s.max
                )?,
                None => writeln!(
                    f,
                    "  samples:      0 (declared {})",
                    file.declared_empirical_size
                )?,
            }
        }

        for failure in &self.failures {
            writeln!(f, "failed: {}: {}", failure.path, failure.error)?;
        }

        for cmp in &self.composites {
            writeln!(f, "composite {} ({} curve points)", cmp.test_case, cmp.curve_points)?;
            writeln!(
                f,
                "  empirical_main:      mean={:.3} std={:.3}",
                cmp.empirical_main.mean, cmp.empirical_main.std_dev
            )?;
            writeln!(
                f,
                "  empirical_bootstrap: mean={:.3} std={:.3}",
                cmp.empirical_bootstrap.mean, cmp.empirical_bootstrap.std_dev
            )?;
            writeln!(f, "  mean difference:     {:.4}", cmp.mean_difference)?;
        }

        write!(f, "processed {} files, {} failed", self.processed, self.failed)
    }
}
