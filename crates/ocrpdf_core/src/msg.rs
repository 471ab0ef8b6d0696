use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// File picker result; empty when the user picked nothing.
    FilesSelected(Vec<PathBuf>),
    /// Folder picker result.
    OutputFolderSelected(Option<PathBuf>),
    /// Raw text of the max megapixels entry.
    MaxMegapixelsChanged(String),
    OverwriteToggled(bool),
    StartClicked,
    CancelClicked,
    /// The engine refused a run that passed validation.
    RunRejected(String),
    /// A line for the log view.
    RunLog(String),
    RunProgress { current: usize, total: usize },
    FileFinished { index: usize, result: FileResultKind },
    /// A failure the user has to acknowledge.
    RunNotification(String),
    RunFinished(RunEndKind),
    /// Foreground tick.
    Tick,
    NoOp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileResultKind {
    Skipped,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEndKind {
    Completed,
    Cancelled,
    Aborted,
}
