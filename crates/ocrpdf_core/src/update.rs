use crate::{validate, AppState, Effect, Msg, RunEndKind, SessionState};

const ERROR_TITLE: &str = "Error";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesSelected(files) => {
            state.set_files(files);
            Vec::new()
        }
        Msg::OutputFolderSelected(dir) => {
            state.set_output_dir(dir);
            Vec::new()
        }
        Msg::MaxMegapixelsChanged(text) => {
            state.set_max_megapixels(text);
            Vec::new()
        }
        Msg::OverwriteToggled(overwrite) => {
            state.set_overwrite(overwrite);
            Vec::new()
        }
        Msg::StartClicked => {
            if state.session() != SessionState::Idle {
                return (state, Vec::new());
            }
            match validate(&state) {
                Ok(request) => {
                    state.begin_run(request.files.len());
                    state.push_log("Starting OCR processing...");
                    vec![Effect::StartRun(request)]
                }
                Err(err) => vec![error(err.to_string())],
            }
        }
        Msg::CancelClicked => {
            if state.session() == SessionState::Running {
                state.request_cancel();
                state.push_log("Cancelling processing...");
                vec![Effect::CancelRun]
            } else {
                Vec::new()
            }
        }
        Msg::RunRejected(reason) => {
            state.end_run();
            state.push_log(format!("Could not start: {reason}"));
            vec![error(reason)]
        }
        Msg::RunLog(line) => {
            state.push_log(line);
            Vec::new()
        }
        Msg::RunProgress { current, total } => {
            state.apply_progress(current, total);
            Vec::new()
        }
        Msg::FileFinished { result, .. } => {
            state.apply_file_result(result);
            Vec::new()
        }
        Msg::RunNotification(message) => vec![error(message)],
        Msg::RunFinished(end) => {
            if state.session() != SessionState::Idle {
                let tally = state.tally();
                let verb = match end {
                    RunEndKind::Completed => "Finished",
                    RunEndKind::Cancelled => "Cancelled",
                    RunEndKind::Aborted => "Aborted",
                };
                state.push_log(format!(
                    "{verb}: {} succeeded, {} skipped, {} failed.",
                    tally.succeeded, tally.skipped, tally.failed
                ));
                state.end_run();
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn error(message: String) -> Effect {
    Effect::ShowError {
        title: ERROR_TITLE.to_string(),
        message,
    }
}
