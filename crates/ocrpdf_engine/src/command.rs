use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use batch_logging::batch_debug;

pub const OCRMYPDF_BINARY: &str = "ocrmypdf";

/// Arguments for a single OCR attempt on one file.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrInvocation {
    pub input: PathBuf,
    pub output: PathBuf,
    pub max_megapixels: f64,
}

impl OcrInvocation {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, max_megapixels: f64) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            max_megapixels,
        }
    }

    /// `--force-ocr --skip-big <mp> --continue-on-soft-render-error <input> <output>`
    pub fn args(&self) -> Vec<OsString> {
        vec![
            "--force-ocr".into(),
            "--skip-big".into(),
            self.max_megapixels.to_string().into(),
            "--continue-on-soft-render-error".into(),
            self.input.clone().into_os_string(),
            self.output.clone().into_os_string(),
        ]
    }

    /// Human-readable command line, for logs only.
    pub fn command_line(&self, executable: &Path) -> String {
        std::iter::once(executable.as_os_str().to_os_string())
            .chain(self.args())
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Captured result of a process that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Trimmed stderr, falling back to trimmed stdout.
    pub fn error_message(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        let stdout = self.stdout.trim();
        if !stdout.is_empty() {
            return stdout.to_string();
        }
        match self.exit_code {
            Some(code) => format!("exited with status {code}"),
            None => "terminated by signal".to_string(),
        }
    }
}

/// The external OCR tool.
///
/// `Ok` means the process ran and exited, successfully or not. `Err` means
/// it could not be run at all.
pub trait OcrCommand: Send + Sync {
    fn executable(&self) -> &Path;

    fn invoke(&self, invocation: &OcrInvocation) -> io::Result<CommandOutput>;
}

#[derive(Debug, Clone)]
pub struct OcrMyPdf {
    executable: PathBuf,
}

impl OcrMyPdf {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }
}

impl OcrCommand for OcrMyPdf {
    fn executable(&self) -> &Path {
        &self.executable
    }

    fn invoke(&self, invocation: &OcrInvocation) -> io::Result<CommandOutput> {
        let mut command = Command::new(&self.executable);
        command.args(invocation.args()).stdin(Stdio::null());
        detach_from_terminal_signals(&mut command);
        let output = command.output()?;
        batch_debug!(
            "{} exited with {:?} (stdout {} bytes, stderr {} bytes)",
            self.executable.display(),
            output.status.code(),
            output.stdout.len(),
            output.stderr.len()
        );
        Ok(CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Start the child in its own process group so a Ctrl-C at the terminal
/// reaches only the front end, which cancels between files.
#[cfg(unix)]
fn detach_from_terminal_signals(command: &mut Command) {
    use std::os::unix::process::CommandExt;

    command.process_group(0);
}

#[cfg(windows)]
fn detach_from_terminal_signals(command: &mut Command) {
    use std::os::windows::process::CommandExt;

    const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
    command.creation_flags(CREATE_NEW_PROCESS_GROUP);
}

#[cfg(not(any(unix, windows)))]
fn detach_from_terminal_signals(_command: &mut Command) {}
