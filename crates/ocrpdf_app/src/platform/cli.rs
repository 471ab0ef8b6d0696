use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use ocrpdf_core::DEFAULT_MAX_MEGAPIXELS;

use super::logging::LogDestination;

/// Run ocrmypdf over a batch of PDF files.
///
/// Each input is written to `<OUTPUT>/<name>_OCR.pdf`. Press Ctrl-C to stop
/// after the file currently being processed.
#[derive(Debug, Parser)]
#[command(name = "pdf-ocr", version)]
pub struct Cli {
    /// PDF files to process, in order.
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Folder that receives the OCR'd copies.
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Skip images larger than this many megapixels.
    #[arg(long, value_name = "MP", default_value = DEFAULT_MAX_MEGAPIXELS)]
    pub max_megapixels: String,

    /// Replace existing `_OCR.pdf` files instead of skipping them.
    #[arg(long)]
    pub overwrite: bool,

    /// Path to the ocrmypdf executable (default: search PATH).
    #[arg(long, value_name = "PATH")]
    pub ocrmypdf: Option<PathBuf>,

    /// Where diagnostic logs go.
    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    pub log: LogTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_the_form_defaults() {
        let cli = Cli::try_parse_from(["pdf-ocr"]).unwrap();
        assert!(cli.files.is_empty());
        assert_eq!(cli.output, None);
        assert_eq!(cli.max_megapixels, "10");
        assert!(!cli.overwrite);
        assert_eq!(cli.log, LogTarget::File);
    }

    #[test]
    fn threshold_is_kept_as_raw_text() {
        let cli = Cli::try_parse_from([
            "pdf-ocr",
            "--max-megapixels",
            "abc",
            "-o",
            "/out",
            "--overwrite",
            "a.pdf",
            "b.pdf",
        ])
        .unwrap();
        assert_eq!(cli.max_megapixels, "abc");
        assert_eq!(cli.output, Some(PathBuf::from("/out")));
        assert!(cli.overwrite);
        assert_eq!(cli.files, vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")]);
    }
}
