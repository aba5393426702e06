use std::fmt;

use thiserror::Error;

use super::model::{Dataset, DatasetBuilder};

/// Marks title, annotation and sentinel lines.
pub const COMMENT_MARKER: char = '#';

/// Comment text that switches the body from curve points to samples.
pub const EMPIRICAL_SENTINEL: &str = "empirical_data:";

const HEADER_LINES: usize = 3;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Which header count a [`FormatError::CountMismatch`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclaredCount {
    PointsCount,
    EmpiricalSize,
}

impl fmt::Display for DeclaredCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclaredCount::PointsCount => write!(f, "points_count"),
            DeclaredCount::EmpiricalSize => write!(f, "empirical_size"),
        }
    }
}

/// A malformed plot dump. `origin` names the input (usually its path) and
/// `line` is 1-based.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("{origin}: truncated header, expected 3 lines but found {found}")]
    TruncatedHeader { origin: String, found: usize },

    #[error("{origin}:{line}: text is not valid UTF-8")]
    InvalidEncoding { origin: String, line: usize },

    #[error("{origin}:{line}: invalid header field {text:?}, expected `<label>: <count>`")]
    InvalidHeaderField {
        origin: String,
        line: usize,
        text: String,
    },

    #[error("{origin}:{line}: invalid curve point {text:?}")]
    InvalidPoint {
        origin: String,
        line: usize,
        text: String,
    },

    #[error("{origin}:{line}: invalid empirical sample {text:?}")]
    InvalidSample {
        origin: String,
        line: usize,
        text: String,
    },

    #[error("{origin}: header declares {field} = {declared} but {actual} values were parsed")]
    CountMismatch {
        origin: String,
        field: DeclaredCount,
        declared: i64,
        actual: usize,
    },
}

impl FormatError {
    /// The input this error was raised for.
    pub fn origin(&self) -> &str {
        match self {
            FormatError::TruncatedHeader { origin, .. }
            | FormatError::InvalidEncoding { origin, .. }
            | FormatError::InvalidHeaderField { origin, .. }
            | FormatError::InvalidPoint { origin, .. }
            | FormatError::InvalidSample { origin, .. }
            | FormatError::CountMismatch { origin, .. } => origin,
        }
    }

    /// Offending line, when the error is tied to one.
    pub fn line(&self) -> Option<usize> {
        match self {
            FormatError::InvalidEncoding { line, .. }
            | FormatError::InvalidHeaderField { line, .. }
            | FormatError::InvalidPoint { line, .. }
            | FormatError::InvalidSample { line, .. } => Some(*line),
            FormatError::TruncatedHeader { .. } | FormatError::CountMismatch { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Knobs for [`FormatParser`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject files whose parsed lengths differ from the header counts.
    /// Off by default: the counts are advisory.
    pub enforce_declared_counts: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Theoretical,
    Empirical,
}

/// Decodes the plot dump layout:
///
/// ```text
/// # <title>
/// <label>: <points count>
/// <label>: <empirical size>
/// <x> <y>                 ← theoretical section
/// # empirical_data:       ← sentinel, one-way switch
/// <value>                 ← empirical section
/// ```
///
/// Blank lines and `#` comments are skipped anywhere in the body.
#[derive(Debug, Clone)]
pub struct FormatParser {
    origin: String,
    options: ParseOptions,
}

impl FormatParser {
    /// `origin` identifies the input in error messages.
    pub fn new(origin: impl Into<String>) -> Self {
        Self::with_options(origin, ParseOptions::default())
    }

    pub fn with_options(origin: impl Into<String>, options: ParseOptions) -> Self {
        Self {
            origin: origin.into(),
            options,
        }
    }

    /// Decode raw file content. Bytes that are not UTF-8 fail the parse with
    /// the line they sit on.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Dataset, FormatError> {
        match std::str::from_utf8(bytes) {
            Ok(text) => self.parse_str(text),
            Err(e) => {
                let valid = &bytes[..e.valid_up_to()];
                Err(FormatError::InvalidEncoding {
                    origin: self.origin.clone(),
                    line: valid.iter().filter(|&&b| b == b'\n').count() + 1,
                })
            }
        }
    }

    pub fn parse_str(&self, text: &str) -> Result<Dataset, FormatError> {
        self.parse_lines(text.lines())
    }

    /// Single forward pass over `lines`. The first error ends the parse.
    pub fn parse_lines<'a, I>(&self, lines: I) -> Result<Dataset, FormatError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut lines = lines.into_iter().enumerate().map(|(i, l)| (i + 1, l));

        let mut header = Vec::with_capacity(HEADER_LINES);
        while header.len() < HEADER_LINES {
            match lines.next() {
                Some(line) => header.push(line),
                None => {
                    return Err(FormatError::TruncatedHeader {
                        origin: self.origin.clone(),
                        found: header.len(),
                    })
                }
            }
        }

        let (_, title_line) = header[0];
        let title = title_line.trim_matches(|c: char| c == COMMENT_MARKER || c.is_whitespace());
        let declared_points = self.header_count(header[1])?;
        let declared_samples = self.header_count(header[2])?;

        let mut builder =
            DatasetBuilder::new(title).declared_counts(declared_points, declared_samples);
        let mut section = Section::Theoretical;

        for (line_no, raw) in lines {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(comment) = strip_comment(line) {
                if comment == EMPIRICAL_SENTINEL && section == Section::Theoretical {
                    log::debug!(
                        "{}:{line_no}: empirical section starts after {} curve points",
                        self.origin,
                        builder.points_len()
                    );
                    section = Section::Empirical;
                }
                continue;
            }
            match section {
                Section::Theoretical => self.push_point(&mut builder, line_no, line)?,
                Section::Empirical => {
                    let value = line.parse::<f64>().map_err(|_| FormatError::InvalidSample {
                        origin: self.origin.clone(),
                        line: line_no,
                        text: line.to_string(),
                    })?;
                    builder.push_sample(value);
                }
            }
        }

        if self.options.enforce_declared_counts {
            self.check_count(DeclaredCount::PointsCount, declared_points, builder.points_len())?;
            self.check_count(
                DeclaredCount::EmpiricalSize,
                declared_samples,
                builder.samples_len(),
            )?;
        }

        Ok(builder.build())
    }

    /// `<label>: <count>` – only the value after the first colon matters.
    fn header_count(&self, (line_no, text): (usize, &str)) -> Result<i64, FormatError> {
        text.split(':')
            .nth(1)
            .and_then(|value| value.trim().parse::<i64>().ok())
            .ok_or_else(|| FormatError::InvalidHeaderField {
                origin: self.origin.clone(),
                line: line_no,
                text: text.trim().to_string(),
            })
    }

    fn push_point(
        &self,
        builder: &mut DatasetBuilder,
        line_no: usize,
        line: &str,
    ) -> Result<(), FormatError> {
        let mut tokens = line.split_whitespace();
        let (Some(x), Some(y)) = (tokens.next(), tokens.next()) else {
            log::trace!("{}:{line_no}: skipping single-token line {line:?}", self.origin);
            return Ok(());
        };
        match (x.parse::<f64>(), y.parse::<f64>()) {
            (Ok(x), Ok(y)) => {
                builder.push_point(x, y);
                Ok(())
            }
            _ => Err(FormatError::InvalidPoint {
                origin: self.origin.clone(),
                line: line_no,
                text: line.to_string(),
            }),
        }
    }

    fn check_count(
        &self,
        field: DeclaredCount,
        declared: i64,
        actual: usize,
    ) -> Result<(), FormatError> {
        if usize::try_from(declared).ok() == Some(actual) {
            return Ok(());
        }
        Err(FormatError::CountMismatch {
            origin: self.origin.clone(),
            field,
            declared,
            actual,
        })
    }
}

/// Text after the comment marker, trimmed, or `None` for non-comment lines.
fn strip_comment(line: &str) -> Option<&str> {
    line.trim().strip_prefix(COMMENT_MARKER).map(str::trim)
}
