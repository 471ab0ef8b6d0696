use std::fs;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

pub const OUTPUT_SUFFIX: &str = "_OCR.pdf";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OutputDirError {
    #[error("output folder is not a directory: {0}")]
    NotADirectory(String),
    #[error("output folder missing or not writable: {0}")]
    Unwritable(String),
}

/// `{output_dir}/{input_stem}_OCR.pdf`.
///
/// Inputs that share a file stem map to the same output path.
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_dir.join(format!("{stem}{OUTPUT_SUFFIX}"))
}

/// Ensure the output directory exists and accepts new files; create it if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), OutputDirError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| OutputDirError::Unwritable(e.to_string()))?;
        if !meta.is_dir() {
            return Err(OutputDirError::NotADirectory(dir.display().to_string()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| OutputDirError::Unwritable(e.to_string()))?;
    }
    // Writability probe; the temp file is removed on drop.
    NamedTempFile::new_in(dir).map_err(|e| OutputDirError::Unwritable(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_name_drops_directory_and_extension() {
        let out = output_path_for(Path::new("/scans/2024/report.final.pdf"), Path::new("/out"));
        assert_eq!(out, PathBuf::from("/out/report.final_OCR.pdf"));
    }

    #[test]
    fn same_stem_in_different_folders_collides() {
        let a = output_path_for(Path::new("a/x.pdf"), Path::new("/out"));
        let b = output_path_for(Path::new("b/x.pdf"), Path::new("/out"));
        assert_eq!(a, b);
    }
}
