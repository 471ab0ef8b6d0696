//! OCR engine: the batch runner, the external command seam and the worker handle.
mod command;
mod engine;
mod locate;
mod output;
mod runner;
mod sink;
mod types;

pub use command::{CommandOutput, OcrCommand, OcrInvocation, OcrMyPdf, OCRMYPDF_BINARY};
pub use engine::{EngineHandle, StartError};
pub use locate::{find_executable, find_ocrmypdf, LocateError};
pub use output::{ensure_output_dir, output_path_for, OutputDirError, OUTPUT_SUFFIX};
pub use runner::{run_job, MAX_ATTEMPTS};
pub use sink::{ChannelProgressSink, ProgressSink};
pub use types::{EngineEvent, FileOutcome, FileRecord, Job, RunEnd, RunSummary};
