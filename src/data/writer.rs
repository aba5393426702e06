use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::format::{COMMENT_MARKER, EMPIRICAL_SENTINEL};
use super::model::Dataset;

// ---------------------------------------------------------------------------
// Plot dump writer
// ---------------------------------------------------------------------------

/// Write `dataset` in the layout the simulation emits: comment header,
/// six-decimal `x y` rows, the sentinel, then one sample per line.
///
/// The sentinel is written even when there are no samples.
pub fn write_dataset<W: Write>(out: &mut W, dataset: &Dataset) -> io::Result<()> {
    writeln!(out, "{COMMENT_MARKER} {}", dataset.title())?;
    writeln!(out, "{COMMENT_MARKER} points_count: {}", dataset.declared_points_count())?;
    writeln!(out, "{COMMENT_MARKER} empirical_size: {}", dataset.declared_empirical_size())?;
    writeln!(out, "{COMMENT_MARKER} columns: x_theoretical y_theoretical")?;

    for (x, y) in dataset.theoretical_points() {
        writeln!(out, "{x:.6} {y:.6}")?;
    }

    writeln!(out, "{COMMENT_MARKER} {EMPIRICAL_SENTINEL}")?;
    for value in dataset.empirical_samples() {
        writeln!(out, "{value:.6}")?;
    }
    Ok(())
}

/// Create (or truncate) `path` and write `dataset` into it.
pub fn write_file(path: &Path, dataset: &Dataset) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_dataset(&mut out, dataset)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::format::FormatParser;
    use crate::data::model::DatasetBuilder;

    fn sample_dataset() -> Dataset {
        let mut builder = DatasetBuilder::new("3.3.2_empirical_main");
        builder.push_point(-1.0, 0.2419707);
        builder.push_point(0.0, 0.3989423);
        builder.push_sample(0.1234564);
        builder.push_sample(-2.5);
        builder.build()
    }

    #[test]
    fn writes_header_rows_and_sentinel() {
        let mut buf = Vec::new();
        write_dataset(&mut buf, &sample_dataset()).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(
            text,
            "# 3.3.2_empirical_main\n\
             # points_count: 2\n\
             # empirical_size: 2\n\
             # columns: x_theoretical y_theoretical\n\
             -1.000000 0.241971\n\
             0.000000 0.398942\n\
             # empirical_data:\n\
             0.123456\n\
             -2.500000\n"
        );
    }

    #[test]
    fn sentinel_is_written_without_samples() {
        let mut builder = DatasetBuilder::new("3.1.1");
        builder.push_point(1.0, 0.5);
        let mut buf = Vec::new();
        write_dataset(&mut buf, &builder.build()).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with("1.000000 0.500000\n# empirical_data:\n"));
    }

    #[test]
    fn written_file_parses_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot_data_3.3.2_empirical_main.txt");
        write_file(&path, &sample_dataset()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed = FormatParser::new(path.display().to_string())
            .parse_str(&text)
            .unwrap();

        assert_eq!(parsed.title(), "3.3.2_empirical_main");
        assert_eq!(parsed.declared_points_count(), 2);
        assert_eq!(parsed.theoretical_y(), &[0.241971, 0.398942]);
        assert_eq!(parsed.empirical_samples(), &[0.123456, -2.5]);
    }
}
