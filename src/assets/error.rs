//! Asset loading errors.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading or parsing sprite art. All of these are fatal at
/// startup; no gameplay state exists yet when they occur.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("sprite '{name}' has no rows")]
    EmptyArt { name: String },

    #[error("sprite '{name}' row {row} is {found} columns wide, expected {expected}")]
    RaggedArt {
        name: String,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("sprite '{name}' uses unknown paint key '{key}' at row {row}, column {col}")]
    UnknownPaint {
        name: String,
        key: char,
        row: usize,
        col: usize,
    },

    #[error("bird frames differ in size: {first:?} vs {other:?}")]
    MismatchedFrames { first: (u32, u32), other: (u32, u32) },

    #[error("bird frames are {height} px tall, must be shorter than the {max} px world")]
    BirdTooTall { height: u32, max: u32 },

    #[error("background is {width}x{height}, smaller than the {min_width}x{min_height} world")]
    BackgroundTooSmall {
        width: u32,
        height: u32,
        min_width: u32,
        min_height: u32,
    },
}
