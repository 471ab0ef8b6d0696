use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    StartRun(RunRequest),
    CancelRun,
    /// Blocking error notification.
    ShowError { title: String, message: String },
}

/// Validated parameters of a run, snapshotted when Start is clicked.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRequest {
    pub files: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub max_megapixels: f64,
    pub overwrite: bool,
}
