use std::fmt;
use std::path::Path;

use serde::Serialize;

const PREFIX: &str = "plot_data_";
const EXTENSION: &str = ".txt";

// ---------------------------------------------------------------------------
// DatasetRole – which member of a correlated group a file is
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetRole {
    /// A single test case with no companions.
    Standalone,
    /// Theoretical density of a composite test case.
    Main,
    /// Samples drawn from the theoretical distribution.
    EmpiricalMain,
    /// Samples re-drawn from the empirical distribution.
    EmpiricalBootstrap,
}

impl DatasetRole {
    // Longest first: `_empirical_main` also ends with `_main`.
    const SUFFIXES: [(&'static str, DatasetRole); 3] = [
        ("_empirical_bootstrap", DatasetRole::EmpiricalBootstrap),
        ("_empirical_main", DatasetRole::EmpiricalMain),
        ("_main", DatasetRole::Main),
    ];

    pub fn suffix(&self) -> &'static str {
        match self {
            DatasetRole::Standalone => "",
            DatasetRole::Main => "_main",
            DatasetRole::EmpiricalMain => "_empirical_main",
            DatasetRole::EmpiricalBootstrap => "_empirical_bootstrap",
        }
    }
}

impl fmt::Display for DatasetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetRole::Standalone => write!(f, "standalone"),
            DatasetRole::Main => write!(f, "main"),
            DatasetRole::EmpiricalMain => write!(f, "empirical_main"),
            DatasetRole::EmpiricalBootstrap => write!(f, "empirical_bootstrap"),
        }
    }
}

// ---------------------------------------------------------------------------
// PlotDataName – decoded `plot_data_<id>[_<role>].txt`
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PlotDataName {
    pub test_case: String,
    pub role: DatasetRole,
}

impl PlotDataName {
    /// Decode a bare file name. `None` when it does not follow the convention.
    pub fn parse(file_name: &str) -> Option<Self> {
        let stem = file_name.strip_prefix(PREFIX)?.strip_suffix(EXTENSION)?;

        let (test_case, role) = DatasetRole::SUFFIXES
            .iter()
            .find_map(|(suffix, role)| {
                stem.strip_suffix(suffix)
                    .filter(|id| !id.is_empty())
                    .map(|id| (id, *role))
            })
            .unwrap_or((stem, DatasetRole::Standalone));

        if test_case.is_empty() {
            return None;
        }
        Some(Self {
            test_case: test_case.to_string(),
            role,
        })
    }

    /// Decode the file-name component of `path`.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.file_name()
            .and_then(|n| n.to_str())
            .and_then(Self::parse)
    }

    /// The file name this id and role are stored under.
    pub fn file_name(&self) -> String {
        format!("{PREFIX}{}{}{EXTENSION}", self.test_case, self.role.suffix())
    }
}
