use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use batch_logging::{batch_info, batch_warn};

use crate::command::{OcrCommand, OcrInvocation};
use crate::output::output_path_for;
use crate::sink::ProgressSink;
use crate::{EngineEvent, FileOutcome, FileRecord, Job, RunEnd, RunSummary};

/// Attempts per file, first try included.
pub const MAX_ATTEMPTS: u32 = 3;

/// An unexpected failure that used up its retries.
struct Abort {
    message: String,
}

/// Run every file of `job` in order on the calling thread.
///
/// `cancel` is checked once before each file; an invocation already running is
/// never interrupted. Non-zero exits only fail the file at hand, while a command
/// that cannot be run at all aborts the run once retries are exhausted.
pub fn run_job(
    job: &Job,
    command: &dyn OcrCommand,
    cancel: &AtomicBool,
    sink: &dyn ProgressSink,
) -> RunEnd {
    let total = job.files.len();
    let mut summary = RunSummary {
        total,
        ..RunSummary::default()
    };

    for (offset, input) in job.files.iter().enumerate() {
        if cancel.load(Ordering::SeqCst) {
            log(sink, "Processing cancelled by user.");
            summary.cancelled = true;
            break;
        }

        let index = offset + 1;
        batch_logging::set_current_file(Some((index, total)));
        sink.emit(EngineEvent::Progress {
            current: index,
            total,
        });

        let outcome = match process_file(job, input, command, sink) {
            Ok(outcome) => outcome,
            Err(abort) => {
                batch_logging::set_current_file(None);
                return RunEnd::Aborted {
                    input: input.clone(),
                    message: abort.message,
                    summary,
                };
            }
        };
        batch_info!("{}: {}", input.display(), outcome);

        let record = FileRecord {
            index,
            input: input.clone(),
            outcome,
        };
        sink.emit(EngineEvent::FileCompleted(record.clone()));
        summary.outcomes.push(record);
    }

    batch_logging::set_current_file(None);
    RunEnd::Completed(summary)
}

fn process_file(
    job: &Job,
    input: &Path,
    command: &dyn OcrCommand,
    sink: &dyn ProgressSink,
) -> Result<FileOutcome, Abort> {
    let output = output_path_for(input, &job.output_dir);
    if !job.overwrite && output.exists() {
        log(sink, format!("Skipping: {} already exists.", output.display()));
        return Ok(FileOutcome::Skipped {
            reason: format!("{} already exists", output.display()),
        });
    }

    let invocation = OcrInvocation::new(input, &output, job.max_megapixels);
    let mut attempt = 0;
    loop {
        attempt += 1;
        let last_attempt = attempt == MAX_ATTEMPTS;

        log(sink, format!("Processing: {}", input.display()));
        log(
            sink,
            format!("Running: {}", invocation.command_line(command.executable())),
        );

        match command.invoke(&invocation) {
            Ok(result) if result.success() => {
                log(
                    sink,
                    format!(
                        "Successfully processed: {} -> {}",
                        input.display(),
                        output.display()
                    ),
                );
                return Ok(FileOutcome::Succeeded { output });
            }
            Ok(result) => {
                let message = result.error_message();
                batch_warn!(
                    "attempt {attempt}/{MAX_ATTEMPTS} exited with {:?}",
                    result.exit_code
                );
                log(
                    sink,
                    format!("Error processing {}: {}", input.display(), message),
                );
                if last_attempt {
                    notify(sink, input, &message);
                    return Ok(FileOutcome::Failed {
                        error: message,
                        attempts: attempt,
                    });
                }
            }
            Err(err) => {
                batch_warn!("attempt {attempt}/{MAX_ATTEMPTS} could not run: {err}");
                if last_attempt {
                    log(
                        sink,
                        format!("Failed after {MAX_ATTEMPTS} attempts: {}", input.display()),
                    );
                    let message = err.to_string();
                    notify(sink, input, &message);
                    return Err(Abort { message });
                }
            }
        }

        log(
            sink,
            format!("Retry {attempt}/{MAX_ATTEMPTS} for {}", input.display()),
        );
    }
}

fn log(sink: &dyn ProgressSink, line: impl Into<String>) {
    sink.emit(EngineEvent::Log(line.into()));
}

fn notify(sink: &dyn ProgressSink, input: &Path, message: &str) {
    sink.emit(EngineEvent::Notify {
        message: format!("Failed to process {}:\n{}", input.display(), message),
    });
}
