use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use batch_logging::{batch_error, batch_info};
use thiserror::Error;

use crate::output::{ensure_output_dir, OutputDirError};
use crate::runner::run_job;
use crate::sink::{ChannelProgressSink, ProgressSink};
use crate::{EngineEvent, Job, OcrCommand, RunEnd, RunSummary};

#[derive(Debug, Error)]
pub enum StartError {
    #[error("a run is already in progress")]
    AlreadyRunning,
    #[error(transparent)]
    OutputDir(#[from] OutputDirError),
    #[error("could not start worker thread: {0}")]
    Spawn(#[source] io::Error),
}

/// Owns the run flags and the worker-to-foreground event queue.
///
/// Only the foreground writes `cancel` (through [`EngineHandle::cancel`]); only the
/// worker clears `running`.
pub struct EngineHandle {
    command: Arc<dyn OcrCommand>,
    running: Arc<AtomicBool>,
    cancel: Arc<AtomicBool>,
    event_tx: mpsc::Sender<EngineEvent>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(command: Arc<dyn OcrCommand>) -> Self {
        let (event_tx, event_rx) = mpsc::channel();
        Self {
            command,
            running: Arc::new(AtomicBool::new(false)),
            cancel: Arc::new(AtomicBool::new(false)),
            event_tx,
            event_rx,
        }
    }

    /// Start processing `job` on a worker thread.
    ///
    /// Every successful start is followed, eventually, by exactly one
    /// [`EngineEvent::RunFinished`].
    pub fn start(&self, job: Job) -> Result<(), StartError> {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(StartError::AlreadyRunning);
        }
        if let Err(err) = ensure_output_dir(&job.output_dir) {
            self.running.store(false, Ordering::SeqCst);
            return Err(err.into());
        }
        self.cancel.store(false, Ordering::SeqCst);

        batch_info!(
            "Starting run: {} file(s) -> {}",
            job.files.len(),
            job.output_dir.display()
        );

        let command = self.command.clone();
        let running = self.running.clone();
        let cancel = self.cancel.clone();
        let sink = ChannelProgressSink::new(self.event_tx.clone());

        let spawned = thread::Builder::new()
            .name("ocr-worker".to_string())
            .spawn(move || {
                let mut cleanup = RunCleanup {
                    running,
                    cancel,
                    sink,
                    total: job.files.len(),
                    end: None,
                };
                let end = run_job(&job, command.as_ref(), &cleanup.cancel, &cleanup.sink);
                cleanup.end = Some(end);
            });

        match spawned {
            Ok(_) => Ok(()),
            Err(err) => {
                self.running.store(false, Ordering::SeqCst);
                Err(StartError::Spawn(err))
            }
        }
    }

    /// Request cooperative cancellation. Returns `false` when no run is active.
    pub fn cancel(&self) -> bool {
        if !self.is_running() {
            return false;
        }
        batch_info!("Cancellation requested");
        self.cancel.store(true, Ordering::SeqCst);
        true
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

/// Resets the run flags and reports the end of the run when the worker exits,
/// including by panic.
struct RunCleanup {
    running: Arc<AtomicBool>,
    cancel: Arc<AtomicBool>,
    sink: ChannelProgressSink,
    total: usize,
    end: Option<RunEnd>,
}

impl Drop for RunCleanup {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        self.cancel.store(false, Ordering::SeqCst);
        batch_logging::set_current_file(None);

        let end = match self.end.take() {
            Some(end) => end,
            None => {
                let message = "OCR worker stopped unexpectedly".to_string();
                batch_error!("{message}");
                self.sink.emit(EngineEvent::Log(message.clone()));
                self.sink.emit(EngineEvent::Notify {
                    message: message.clone(),
                });
                RunEnd::Aborted {
                    input: PathBuf::new(),
                    message,
                    summary: RunSummary {
                        total: self.total,
                        ..RunSummary::default()
                    },
                }
            }
        };
        batch_info!("Run finished: {:?}", end.summary());
        self.sink.emit(EngineEvent::RunFinished(end));
    }
}
