//! Terminal front end: argument parsing, the foreground tick loop and rendering.
mod app;
mod cli;
mod effects;
mod logging;
mod ui;

pub use app::run_app;
