use std::path::{Path, PathBuf};

use crate::view_model::{AppViewModel, RunTally};
use crate::FileResultKind;

pub const DEFAULT_MAX_MEGAPIXELS: &str = "10";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Running,
    /// Cancel requested; the worker stops at the next file boundary.
    Cancelling,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    files: Vec<PathBuf>,
    output_dir: Option<PathBuf>,
    max_megapixels: String,
    overwrite: bool,
    session: SessionState,
    current: usize,
    total: usize,
    tally: RunTally,
    pending_log: Vec<String>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            output_dir: None,
            max_megapixels: DEFAULT_MAX_MEGAPIXELS.to_string(),
            overwrite: false,
            session: SessionState::Idle,
            current: 0,
            total: 0,
            tally: RunTally::default(),
            pending_log: Vec::new(),
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    pub fn max_megapixels(&self) -> &str {
        &self.max_megapixels
    }

    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    pub fn view(&self) -> AppViewModel {
        let files_label = if self.files.is_empty() {
            "No files selected".to_string()
        } else {
            format!("{} file(s) selected", self.files.len())
        };
        let output_label = match &self.output_dir {
            Some(dir) => dir.display().to_string(),
            None => "No output folder selected".to_string(),
        };
        let (progress_percent, progress_label) = if self.total == 0 {
            (0.0, "Ready".to_string())
        } else {
            (
                self.current as f64 / self.total as f64 * 100.0,
                format!("Processing: {}/{} files", self.current, self.total),
            )
        };
        let status = match self.session {
            SessionState::Idle => "Ready".to_string(),
            SessionState::Running if self.current == 0 => "Processing...".to_string(),
            SessionState::Running => {
                format!("Processing file {} of {}", self.current, self.total)
            }
            SessionState::Cancelling => "Cancelling...".to_string(),
        };

        AppViewModel {
            session: self.session,
            files_label,
            output_label,
            max_megapixels: self.max_megapixels.clone(),
            overwrite: self.overwrite,
            current: self.current,
            total: self.total,
            progress_percent,
            progress_label,
            status,
            start_enabled: self.session == SessionState::Idle,
            cancel_enabled: self.session == SessionState::Running,
            tally: self.tally,
            dirty: self.dirty,
        }
    }

    /// Log lines not yet handed to the log view, oldest first.
    pub fn drain_log(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending_log)
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn push_log(&mut self, line: impl Into<String>) {
        self.pending_log.push(line.into());
        self.dirty = true;
    }

    pub(crate) fn set_files(&mut self, files: Vec<PathBuf>) {
        self.files = files;
        self.mark_dirty();
    }

    pub(crate) fn set_output_dir(&mut self, dir: Option<PathBuf>) {
        self.output_dir = dir;
        self.mark_dirty();
    }

    pub(crate) fn set_max_megapixels(&mut self, text: String) {
        self.max_megapixels = text;
        self.mark_dirty();
    }

    pub(crate) fn set_overwrite(&mut self, overwrite: bool) {
        self.overwrite = overwrite;
        self.mark_dirty();
    }

    pub(crate) fn begin_run(&mut self, total: usize) {
        self.session = SessionState::Running;
        self.current = 0;
        self.total = total;
        self.tally = RunTally::default();
        self.mark_dirty();
    }

    pub(crate) fn request_cancel(&mut self) {
        self.session = SessionState::Cancelling;
        self.mark_dirty();
    }

    /// Progress only moves forward within a run.
    pub(crate) fn apply_progress(&mut self, current: usize, total: usize) {
        if current > self.current && current <= total {
            self.current = current;
            self.total = total;
            self.mark_dirty();
        }
    }

    pub(crate) fn apply_file_result(&mut self, result: FileResultKind) {
        match result {
            FileResultKind::Skipped => self.tally.skipped += 1,
            FileResultKind::Succeeded => self.tally.succeeded += 1,
            FileResultKind::Failed => self.tally.failed += 1,
        }
        self.mark_dirty();
    }

    pub(crate) fn tally(&self) -> RunTally {
        self.tally
    }

    pub(crate) fn end_run(&mut self) {
        self.session = SessionState::Idle;
        self.mark_dirty();
    }
}
