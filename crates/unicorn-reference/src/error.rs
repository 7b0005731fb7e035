use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("reference directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),
}
