use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use plotdata::batch::run_batch;
use plotdata::data::format::ParseOptions;
use plotdata::summary::RunSummary;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Read plot dumps and report what they contain.
#[derive(Parser, Debug)]
#[command(name = "plotdata", version)]
struct Cli {
    /// Plot dump files (processed in sorted order)
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Reject files whose header counts disagree with their contents
    #[arg(long)]
    strict: bool,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Debug logging (RUST_LOG still wins when set)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let options = ParseOptions {
        enforce_declared_counts: cli.strict,
    };
    let report = run_batch(&cli.files, options).context("batch aborted")?;
    let summary = RunSummary::from_report(&report);

    match cli.format {
        OutputFormat::Text => println!("{summary}"),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("serialising summary")?
        ),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_files_and_flags() {
        let cli = Cli::try_parse_from([
            "plotdata",
            "--strict",
            "--format",
            "json",
            "-v",
            "b.txt",
            "a.txt",
        ])
        .unwrap();

        assert_eq!(cli.files, vec![PathBuf::from("b.txt"), PathBuf::from("a.txt")]);
        assert!(cli.strict);
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn defaults_to_lenient_text_output() {
        let cli = Cli::try_parse_from(["plotdata", "plot_data_3.1.1.txt"]).unwrap();
        assert!(!cli.strict);
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn unreadable_file_reports_the_whole_error_chain() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("plot_data_1.txt");
        let cli = Cli::try_parse_from([
            PathBuf::from("plotdata"),
            missing.clone(),
        ])
        .unwrap();

        let err = run(&cli).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.starts_with("batch aborted: cannot read "));
        assert!(message.contains(&missing.display().to_string()));
    }

    #[test]
    fn requires_at_least_one_file() {
        assert!(Cli::try_parse_from(["plotdata"]).is_err());
    }
}
