use std::collections::BTreeSet;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid path glob: {0}")]
    Glob(#[from] globset::Error),
    #[error("Number of Dark and Light images don't match, mismatched elements are: {only_in_one:?}")]
    ThemeMismatch { only_in_one: BTreeSet<String> },
    #[error("No images found in path '{}'", base_dir.display())]
    EmptyCatalog { base_dir: PathBuf },
    #[error("Couldn't read image resolution of {}: {reason}", path.display())]
    UnreadableImageHeader { path: PathBuf, reason: String },
    #[error("Skipping {}: {reason}", path.display())]
    InvalidSearchPath { path: PathBuf, reason: String },
    #[error("Cell of {cell}px can never fit an atlas capped at {max_side}px")]
    OversizedCell { cell: u32, max_side: u32 },
    #[error("Malformed ordering table: {0}")]
    MalformedOrdering(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, AtlasError>;
