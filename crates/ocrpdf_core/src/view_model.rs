use crate::SessionState;

/// Per-run counts of finished files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunTally {
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub session: SessionState,
    pub files_label: String,
    pub output_label: String,
    pub max_megapixels: String,
    pub overwrite: bool,
    pub current: usize,
    pub total: usize,
    /// `current / total * 100`, or 0 before the first run.
    pub progress_percent: f64,
    /// `Processing: x/y files`.
    pub progress_label: String,
    pub status: String,
    pub start_enabled: bool,
    pub cancel_enabled: bool,
    pub tally: RunTally,
    pub dirty: bool,
}
