use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use batch_logging::batch_info;
use thiserror::Error;

use crate::command::OCRMYPDF_BINARY;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocateError {
    #[error("the '{name}' command was not found; install it and ensure it is available on your PATH")]
    NotFound { name: String },
}

/// Resolve `ocrmypdf` on the process `PATH`.
pub fn find_ocrmypdf() -> Result<PathBuf, LocateError> {
    let path = env::var_os("PATH");
    let found = find_executable(OCRMYPDF_BINARY, path.as_deref())?;
    batch_info!("Using {} at {}", OCRMYPDF_BINARY, found.display());
    Ok(found)
}

/// Search each directory of `search_path` (a `PATH`-style list) for `name`.
pub fn find_executable(name: &str, search_path: Option<&OsStr>) -> Result<PathBuf, LocateError> {
    let not_found = || LocateError::NotFound {
        name: name.to_string(),
    };
    let search_path = search_path.ok_or_else(not_found)?;
    env::split_paths(search_path)
        .filter(|dir| !dir.as_os_str().is_empty())
        .flat_map(|dir| candidate_names(name).map(move |file| dir.join(file)))
        .find(|candidate| is_executable(candidate))
        .ok_or_else(not_found)
}

#[cfg(windows)]
fn candidate_names(name: &str) -> impl Iterator<Item = String> + '_ {
    ["", ".exe", ".bat", ".cmd"]
        .into_iter()
        .map(move |ext| format!("{name}{ext}"))
}

#[cfg(not(windows))]
fn candidate_names(name: &str) -> impl Iterator<Item = String> + '_ {
    std::iter::once(name.to_string())
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
