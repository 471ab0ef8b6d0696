use std::fmt;
use std::path::PathBuf;

/// One batch request. Immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub files: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub max_megapixels: f64,
    pub overwrite: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Skipped { reason: String },
    Succeeded { output: PathBuf },
    Failed { error: String, attempts: u32 },
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOutcome::Skipped { reason } => write!(f, "skipped ({reason})"),
            FileOutcome::Succeeded { output } => write!(f, "succeeded -> {}", output.display()),
            FileOutcome::Failed { error, attempts } => {
                write!(f, "failed after {attempts} attempt(s): {error}")
            }
        }
    }
}

/// Outcome of one visited file. `index` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub index: usize,
    pub input: PathBuf,
    pub outcome: FileOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub total: usize,
    /// Only files the runner reached; files after a cancellation are absent.
    pub outcomes: Vec<FileRecord>,
    pub cancelled: bool,
}

impl RunSummary {
    pub fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|r| pred(&r.outcome)).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEnd {
    Completed(RunSummary),
    /// An unexpected failure exhausted its retries and stopped the whole run.
    Aborted {
        input: PathBuf,
        message: String,
        summary: RunSummary,
    },
}

impl RunEnd {
    pub fn summary(&self) -> &RunSummary {
        match self {
            RunEnd::Completed(summary) | RunEnd::Aborted { summary, .. } => summary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// A line for the user-facing log.
    Log(String),
    Progress { current: usize, total: usize },
    FileCompleted(FileRecord),
    /// A failure the user must acknowledge.
    Notify { message: String },
    /// Always the last event of a run, sent after the run flags are cleared.
    RunFinished(RunEnd),
}
