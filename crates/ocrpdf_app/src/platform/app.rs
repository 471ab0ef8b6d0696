use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use batch_logging::{batch_error, batch_info};
use clap::Parser;
use ocrpdf_core::{update, AppState, Effect, FileResultKind, Msg, RunEndKind, SessionState};
use ocrpdf_engine::{find_ocrmypdf, OcrMyPdf};
use tokio::time::MissedTickBehavior;

use super::cli::Cli;
use super::effects::EffectRunner;
use super::logging;
use super::ui::render::TerminalUi;

/// How often the foreground drains the worker's queue.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

const EXIT_FAILURE: u8 = 1;
const EXIT_REJECTED: u8 = 2;
const EXIT_CANCELLED: u8 = 130;

/// Process exit status for how the session ended. `last_end` is `None` when
/// no run reached `RunFinished`.
fn exit_status(last_end: Option<RunEndKind>, failed_files: usize, rejected: bool) -> u8 {
    if rejected {
        return EXIT_REJECTED;
    }
    match last_end {
        Some(RunEndKind::Completed) if failed_files == 0 => 0,
        Some(RunEndKind::Cancelled) => EXIT_CANCELLED,
        _ => EXIT_FAILURE,
    }
}

/// SIGINT listener registered once for the whole run. Interrupts that arrive
/// mid-tick are delivered on the next poll.
struct Interrupts {
    #[cfg(unix)]
    inner: tokio::signal::unix::Signal,
    #[cfg(windows)]
    inner: tokio::signal::windows::CtrlC,
}

impl Interrupts {
    #[cfg(unix)]
    fn listen() -> io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            inner: signal(SignalKind::interrupt())?,
        })
    }

    #[cfg(windows)]
    fn listen() -> io::Result<Self> {
        Ok(Self {
            inner: tokio::signal::windows::ctrl_c()?,
        })
    }

    async fn recv(&mut self) -> Option<()> {
        self.inner.recv().await
    }
}

pub fn run_app() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::initialize(cli.log.into());

    let executable = match cli.ocrmypdf.clone() {
        Some(path) => path,
        None => find_ocrmypdf()?,
    };
    batch_info!("ocrmypdf resolved to {}", executable.display());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .enable_io()
        .build()
        .context("failed to build the foreground runtime")?;

    let mut app = App::new(EffectRunner::new(Arc::new(OcrMyPdf::new(executable))));
    Ok(ExitCode::from(runtime.block_on(app.run(cli))))
}

/// Resolves on the next Ctrl-C. Never resolves when there is no listener.
async fn next_interrupt(interrupts: &mut Option<Interrupts>) -> Option<()> {
    match interrupts {
        Some(interrupts) => interrupts.recv().await,
        None => std::future::pending().await,
    }
}

struct App {
    state: AppState,
    runner: EffectRunner,
    ui: TerminalUi,
    last_end: Option<RunEndKind>,
    failed_files: usize,
}

impl App {
    fn new(runner: EffectRunner) -> Self {
        Self::with_ui(runner, TerminalUi::new())
    }

    fn with_ui(runner: EffectRunner, ui: TerminalUi) -> Self {
        Self {
            state: AppState::new(),
            runner,
            ui,
            last_end: None,
            failed_files: 0,
        }
    }

    async fn run(&mut self, cli: Cli) -> u8 {
        // The arguments stand in for the pickers and form fields.
        self.dispatch(Msg::FilesSelected(cli.files));
        self.dispatch(Msg::OutputFolderSelected(cli.output));
        self.dispatch(Msg::MaxMegapixelsChanged(cli.max_megapixels));
        self.dispatch(Msg::OverwriteToggled(cli.overwrite));
        self.dispatch(Msg::StartClicked);

        if self.state.session() == SessionState::Idle {
            // Rejected by validation or by the engine.
            self.ui.finish();
            return exit_status(self.last_end, self.failed_files, true);
        }

        let mut interrupts = match Interrupts::listen() {
            Ok(interrupts) => Some(interrupts),
            Err(err) => {
                batch_error!("Failed to listen for Ctrl-C: {err}");
                None
            }
        };
        let mut ticker = tokio::time::interval(TICK_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    for msg in self.runner.poll() {
                        self.dispatch(msg);
                    }
                    if self.state.session() == SessionState::Idle {
                        break;
                    }
                }
                Some(()) = next_interrupt(&mut interrupts) => {
                    batch_info!("Ctrl-C received");
                    self.dispatch(Msg::CancelClicked);
                }
            }
        }
        self.ui.finish();

        exit_status(self.last_end, self.failed_files, false)
    }

    fn dispatch(&mut self, msg: Msg) {
        match &msg {
            Msg::RunFinished(end) => self.last_end = Some(*end),
            Msg::FileFinished {
                result: FileResultKind::Failed,
                ..
            } => self.failed_files += 1,
            _ => {}
        }

        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        for line in state.drain_log() {
            self.ui.log(&line);
        }
        if state.consume_dirty() {
            self.ui.render(&state.view());
        }
        self.state = state;

        self.execute(effects);
    }

    fn execute(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartRun(request) => {
                    if let Err(err) = self.runner.start(request) {
                        batch_error!("Run refused: {err}");
                        self.dispatch(Msg::RunRejected(err.to_string()));
                    }
                }
                Effect::CancelRun => self.runner.cancel(),
                Effect::ShowError { title, message } => self.ui.show_error(&title, &message),
            }
        }
    }
}
