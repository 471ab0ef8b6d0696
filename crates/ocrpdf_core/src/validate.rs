use thiserror::Error;

use crate::{AppState, RunRequest};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No PDF files selected.")]
    NoFiles,
    #[error("No output folder selected.")]
    NoOutputFolder,
    #[error("Invalid max megapixels value.")]
    InvalidMaxMegapixels(String),
}

/// Check the form fields and snapshot them into a [`RunRequest`].
pub fn validate(state: &AppState) -> Result<RunRequest, ValidationError> {
    if state.files().is_empty() {
        return Err(ValidationError::NoFiles);
    }
    let output_dir = state
        .output_dir()
        .filter(|dir| !dir.as_os_str().is_empty())
        .ok_or(ValidationError::NoOutputFolder)?;
    let max_megapixels = parse_max_megapixels(state.max_megapixels())?;

    Ok(RunRequest {
        files: state.files().to_vec(),
        output_dir: output_dir.to_path_buf(),
        max_megapixels,
        overwrite: state.overwrite(),
    })
}

fn parse_max_megapixels(raw: &str) -> Result<f64, ValidationError> {
    let invalid = || ValidationError::InvalidMaxMegapixels(raw.to_string());
    let value: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(invalid())
    }
}
