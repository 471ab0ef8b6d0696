#![allow(dead_code)]

use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex, Once};

use ocrpdf_engine::{
    CommandOutput, EngineEvent, FileOutcome, OcrCommand, OcrInvocation, ProgressSink,
};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(batch_logging::initialize_for_tests);
}

/// What the fake tool does on one invocation.
#[derive(Debug, Clone)]
pub enum Scripted {
    /// Exit 0 and create the output file.
    Succeed,
    Exit { code: i32, stderr: String, stdout: String },
    /// The process cannot be started at all.
    SpawnError,
    Panic,
}

impl Scripted {
    pub fn fail(stderr: &str) -> Self {
        Scripted::Exit {
            code: 1,
            stderr: stderr.to_string(),
            stdout: String::new(),
        }
    }
}

/// Records invocations and replays scripted responses, then `fallback`.
pub struct SpyCommand {
    script: Mutex<VecDeque<Scripted>>,
    fallback: Scripted,
    calls: Mutex<Vec<OcrInvocation>>,
    cancel_after: Mutex<Option<(usize, Arc<AtomicBool>)>>,
    gate: Mutex<Option<mpsc::Receiver<()>>>,
    entered: Mutex<Option<mpsc::Sender<()>>>,
}

impl SpyCommand {
    pub fn new(fallback: Scripted) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback,
            calls: Mutex::new(Vec::new()),
            cancel_after: Mutex::new(None),
            gate: Mutex::new(None),
            entered: Mutex::new(None),
        }
    }

    pub fn succeeding() -> Self {
        Self::new(Scripted::Succeed)
    }

    pub fn with_script(self, script: impl IntoIterator<Item = Scripted>) -> Self {
        self.script.lock().unwrap().extend(script);
        self
    }

    /// Set `flag` once the `n`th invocation returns.
    pub fn cancel_after(self, n: usize, flag: Arc<AtomicBool>) -> Self {
        *self.cancel_after.lock().unwrap() = Some((n, flag));
        self
    }

    /// Every invocation reports on `entered`, then waits for a message on `gate`.
    pub fn gated(self, entered: mpsc::Sender<()>, gate: mpsc::Receiver<()>) -> Self {
        *self.entered.lock().unwrap() = Some(entered);
        *self.gate.lock().unwrap() = Some(gate);
        self
    }

    pub fn calls(&self) -> Vec<OcrInvocation> {
        self.calls.lock().unwrap().clone()
    }

    pub fn inputs(&self) -> Vec<PathBuf> {
        self.calls().into_iter().map(|c| c.input).collect()
    }
}

impl OcrCommand for SpyCommand {
    fn executable(&self) -> &Path {
        Path::new("ocrmypdf")
    }

    fn invoke(&self, invocation: &OcrInvocation) -> io::Result<CommandOutput> {
        if let Some(entered) = self.entered.lock().unwrap().as_ref() {
            let _ = entered.send(());
        }
        if let Some(gate) = self.gate.lock().unwrap().as_ref() {
            let _ = gate.recv();
        }

        let call_count = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(invocation.clone());
            calls.len()
        };
        let step = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        if let Some((n, flag)) = self.cancel_after.lock().unwrap().as_ref() {
            if call_count == *n {
                flag.store(true, Ordering::SeqCst);
            }
        }

        match step {
            Scripted::Succeed => {
                fs::write(&invocation.output, b"%PDF-1.7")?;
                Ok(CommandOutput {
                    exit_code: Some(0),
                    ..CommandOutput::default()
                })
            }
            Scripted::Exit {
                code,
                stderr,
                stdout,
            } => Ok(CommandOutput {
                exit_code: Some(code),
                stdout,
                stderr,
            }),
            Scripted::SpawnError => Err(io::Error::new(
                io::ErrorKind::NotFound,
                "No such file or directory",
            )),
            Scripted::Panic => panic!("scripted panic"),
        }
    }
}

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<EngineEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn logs(&self) -> Vec<String> {
        log_lines(&self.events())
    }

    pub fn progress(&self) -> Vec<(usize, usize)> {
        progress_of(&self.events())
    }

    pub fn notifications(&self) -> Vec<String> {
        notifications_of(&self.events())
    }

    pub fn outcomes(&self) -> Vec<(PathBuf, FileOutcome)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                EngineEvent::FileCompleted(record) => Some((record.input, record.outcome)),
                _ => None,
            })
            .collect()
    }
}

impl ProgressSink for RecordingSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub fn log_lines(events: &[EngineEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            EngineEvent::Log(line) => Some(line.clone()),
            _ => None,
        })
        .collect()
}

pub fn progress_of(events: &[EngineEvent]) -> Vec<(usize, usize)> {
    events
        .iter()
        .filter_map(|e| match e {
            EngineEvent::Progress { current, total } => Some((*current, *total)),
            _ => None,
        })
        .collect()
}

pub fn notifications_of(events: &[EngineEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            EngineEvent::Notify { message } => Some(message.clone()),
            _ => None,
        })
        .collect()
}

/// Create `names` as small placeholder PDFs under `dir`.
pub fn make_inputs(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = dir.join(name);
            fs::write(&path, b"%PDF-1.4").unwrap();
            path
        })
        .collect()
}
