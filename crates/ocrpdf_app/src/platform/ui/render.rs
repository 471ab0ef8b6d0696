use indicatif::{ProgressBar, ProgressStyle};
use ocrpdf_core::AppViewModel;

const BAR_TEMPLATE: &str = "{prefix:.bold} [{wide_bar:.cyan/blue}] {msg}";

/// The terminal stand-in for the window: a progress bar with the status as its
/// prefix, log lines printed above it and errors on stderr.
pub struct TerminalUi {
    bar: ProgressBar,
}

impl TerminalUi {
    pub fn new() -> Self {
        Self::with_bar(ProgressBar::new(0))
    }

    #[cfg(test)]
    pub fn hidden() -> Self {
        Self::with_bar(ProgressBar::with_draw_target(
            Some(0),
            indicatif::ProgressDrawTarget::hidden(),
        ))
    }

    fn with_bar(bar: ProgressBar) -> Self {
        let style = ProgressStyle::with_template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        bar.set_style(style);
        Self { bar }
    }

    pub fn render(&self, view: &AppViewModel) {
        self.bar.set_length(view.total as u64);
        self.bar.set_position(view.current as u64);
        self.bar.set_prefix(view.status.clone());
        self.bar.set_message(progress_message(view));
    }

    /// Print one log line above the bar. Works even when the bar is hidden.
    pub fn log(&self, line: &str) {
        self.bar.suspend(|| println!("{line}"));
    }

    pub fn show_error(&self, title: &str, message: &str) {
        self.bar.suspend(|| eprintln!("{title}: {message}"));
    }

    pub fn finish(&self) {
        self.bar.finish();
    }

    #[cfg(test)]
    fn bar(&self) -> &ProgressBar {
        &self.bar
    }
}

fn progress_message(view: &AppViewModel) -> String {
    if view.total == 0 {
        view.progress_label.clone()
    } else {
        format!("{} ({:.0}%)", view.progress_label, view.progress_percent)
    }
}
