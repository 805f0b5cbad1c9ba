//! Tile construction and loading errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when constructing a [`TextureTile`](super::TextureTile).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TileError {
    #[error("Tile dimensions must be non-zero, got {width}x{height}")]
    EmptyDimensions { width: u32, height: u32 },

    #[error("Tile is {width}x{height} ({expected} pixels) but {found} pixels were supplied")]
    PixelCountMismatch {
        width: u32,
        height: u32,
        expected: usize,
        found: usize,
    },
}

/// Errors that can occur when loading a single tile file.
#[derive(Error, Debug)]
pub enum TileLoadError {
    #[error("Failed to read tile '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode tile '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Tile '{}' is unusable: {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: TileError,
    },
}

/// Errors that abort a whole registry load.
///
/// Individual files that fail to load never produce this error; they are
/// reported in [`TileLoadOutcome::failures`](super::TileLoadOutcome::failures).
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Failed to read tile directory '{}': {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
