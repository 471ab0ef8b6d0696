use std::sync::Arc;

use batch_logging::{batch_info, batch_warn};
use ocrpdf_core::{FileResultKind, Msg, RunEndKind, RunRequest};
use ocrpdf_engine::{
    EngineEvent, EngineHandle, FileOutcome, Job, OcrCommand, RunEnd, StartError,
};

/// Executes core effects against the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(command: Arc<dyn OcrCommand>) -> Self {
        Self {
            engine: EngineHandle::new(command),
        }
    }

    pub fn start(&self, request: RunRequest) -> Result<(), StartError> {
        batch_info!(
            "StartRun files={} output={} max_mp={} overwrite={}",
            request.files.len(),
            request.output_dir.display(),
            request.max_megapixels,
            request.overwrite
        );
        self.engine.start(Job {
            files: request.files,
            output_dir: request.output_dir,
            max_megapixels: request.max_megapixels,
            overwrite: request.overwrite,
        })
    }

    pub fn cancel(&self) {
        if !self.engine.cancel() {
            batch_warn!("CancelRun with no active run");
        }
    }

    /// Everything the worker has queued so far, in order. Never blocks.
    pub fn poll(&self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            inbox.push(map_event(event));
        }
        inbox
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Log(line) => Msg::RunLog(line),
        EngineEvent::Progress { current, total } => Msg::RunProgress { current, total },
        EngineEvent::FileCompleted(record) => {
            if let FileOutcome::Failed { error, attempts } = &record.outcome {
                batch_warn!(
                    "File {} failed after {} attempt(s): {}",
                    record.input.display(),
                    attempts,
                    error
                );
            }
            Msg::FileFinished {
                index: record.index,
                result: map_outcome(&record.outcome),
            }
        }
        EngineEvent::Notify { message } => Msg::RunNotification(message),
        EngineEvent::RunFinished(end) => Msg::RunFinished(map_end(&end)),
    }
}

fn map_outcome(outcome: &FileOutcome) -> FileResultKind {
    match outcome {
        FileOutcome::Skipped { .. } => FileResultKind::Skipped,
        FileOutcome::Succeeded { .. } => FileResultKind::Succeeded,
        FileOutcome::Failed { .. } => FileResultKind::Failed,
    }
}

fn map_end(end: &RunEnd) -> RunEndKind {
    match end {
        RunEnd::Completed(summary) if summary.cancelled => RunEndKind::Cancelled,
        RunEnd::Completed(_) => RunEndKind::Completed,
        RunEnd::Aborted { input, message, .. } => {
            batch_warn!("Run aborted at {}: {}", input.display(), message);
            RunEndKind::Aborted
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};
    use std::thread;
    use std::time::{Duration, Instant};

    use ocrpdf_engine::{CommandOutput, OcrInvocation};
    use tempfile::TempDir;

    use super::*;

    /// Fails the first file and succeeds on everything else.
    struct FailFirst;

    impl OcrCommand for FailFirst {
        fn executable(&self) -> &Path {
            Path::new("ocrmypdf")
        }

        fn invoke(&self, invocation: &OcrInvocation) -> io::Result<CommandOutput> {
            if invocation.input.ends_with("bad.pdf") {
                return Ok(CommandOutput {
                    exit_code: Some(2),
                    stderr: "boom".to_string(),
                    ..CommandOutput::default()
                });
            }
            fs::write(&invocation.output, b"%PDF")?;
            Ok(CommandOutput {
                exit_code: Some(0),
                ..CommandOutput::default()
            })
        }
    }

    fn poll_until_finished(runner: &EffectRunner) -> Vec<Msg> {
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut msgs = Vec::new();
        while Instant::now() < deadline {
            msgs.extend(runner.poll());
            if matches!(msgs.last(), Some(Msg::RunFinished(_))) {
                return msgs;
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("run did not finish: {msgs:?}");
    }

    #[test]
    fn engine_events_map_to_core_messages() {
        let temp = TempDir::new().unwrap();
        let files: Vec<PathBuf> = ["bad.pdf", "good.pdf"]
            .iter()
            .map(|name| {
                let path = temp.path().join(name);
                fs::write(&path, b"%PDF").unwrap();
                path
            })
            .collect();
        let runner = EffectRunner::new(Arc::new(FailFirst));

        runner
            .start(RunRequest {
                files,
                output_dir: temp.path().join("out"),
                max_megapixels: 10.0,
                overwrite: false,
            })
            .unwrap();
        let msgs = poll_until_finished(&runner);

        let progress: Vec<_> = msgs
            .iter()
            .filter_map(|m| match m {
                Msg::RunProgress { current, total } => Some((*current, *total)),
                _ => None,
            })
            .collect();
        assert_eq!(progress, vec![(1, 2), (2, 2)]);

        let results: Vec<_> = msgs
            .iter()
            .filter_map(|m| match m {
                Msg::FileFinished { result, .. } => Some(*result),
                _ => None,
            })
            .collect();
        assert_eq!(
            results,
            vec![FileResultKind::Failed, FileResultKind::Succeeded]
        );

        let notes: Vec<_> = msgs
            .iter()
            .filter(|m| matches!(m, Msg::RunNotification(text) if text.contains("boom")))
            .collect();
        assert_eq!(notes.len(), 1);
        assert_eq!(msgs.last(), Some(&Msg::RunFinished(RunEndKind::Completed)));
    }

    #[test]
    fn cancelled_summary_maps_to_cancelled_end() {
        let summary = ocrpdf_engine::RunSummary {
            total: 2,
            outcomes: Vec::new(),
            cancelled: true,
        };
        assert_eq!(
            map_end(&RunEnd::Completed(summary)),
            RunEndKind::Cancelled
        );
    }
}
