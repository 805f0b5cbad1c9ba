//! Tile registry keyed by UDIM number.

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use bevy::log::{debug, info, warn};
use bevy::prelude::Resource;

use super::error::{RegistryError, TileLoadError};
use super::texture::TextureTile;
use crate::report::{SkipReason, SkipRecord};
use crate::udim::udim_from_filename;

/// File extensions (lowercase) recognized as tile images.
pub const TILE_EXTENSIONS: &[&str] = &["png", "jpg", "bmp"];

/// All loaded tiles, at most one per UDIM number.
#[derive(Resource, Clone, Debug, Default)]
pub struct TileRegistry {
    tiles: BTreeMap<i32, TextureTile>,
}

/// Result of scanning a tile folder.
#[derive(Debug, Default)]
pub struct TileLoadOutcome {
    pub registry: TileRegistry,
    /// One record per file that matched the naming convention but could not
    /// be loaded.
    pub failures: Vec<SkipRecord>,
}

impl TileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `tile` under `udim`, returning the tile it replaced.
    pub fn insert(&mut self, udim: i32, tile: TextureTile) -> Option<TextureTile> {
        self.tiles.insert(udim, tile)
    }

    pub fn with_tile(mut self, udim: i32, tile: TextureTile) -> Self {
        self.insert(udim, tile);
        self
    }

    pub fn get(&self, udim: i32) -> Option<&TextureTile> {
        self.tiles.get(&udim)
    }

    pub fn contains(&self, udim: i32) -> bool {
        self.tiles.contains_key(&udim)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Registered UDIM numbers in ascending order.
    pub fn udims(&self) -> impl Iterator<Item = i32> + '_ {
        self.tiles.keys().copied()
    }

    /// Build a registry from every tile image in `dir`.
    ///
    /// Files are visited in file-name order, so when two files resolve to the
    /// same UDIM the one sorting last wins. Files without a recognized
    /// extension or UDIM prefix are ignored. Files that fail to load are
    /// reported in [`TileLoadOutcome::failures`] and the scan continues.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<TileLoadOutcome, RegistryError> {
        let dir = dir.as_ref();
        let read_dir_error = |source| RegistryError::ReadDir {
            path: dir.to_path_buf(),
            source,
        };

        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).map_err(read_dir_error)? {
            let path = entry.map_err(read_dir_error)?.path();
            if path.is_file() {
                paths.push(path);
            }
        }
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        let mut outcome = TileLoadOutcome::default();

        for path in paths {
            if !has_tile_extension(&path) {
                continue;
            }

            let Some(udim) = path
                .file_name()
                .and_then(OsStr::to_str)
                .and_then(udim_from_filename)
            else {
                debug!("Ignoring '{}': no UDIM prefix", path.display());
                continue;
            };

            match load_file(&path) {
                Ok(tile) => {
                    debug!(
                        "Loaded UDIM {} from '{}' ({}x{})",
                        udim,
                        path.display(),
                        tile.width(),
                        tile.height()
                    );
                    if outcome.registry.insert(udim, tile).is_some() {
                        warn!(
                            "UDIM {} loaded more than once, keeping '{}'",
                            udim,
                            path.display()
                        );
                    }
                }
                Err(e) => {
                    let record = SkipRecord::tile(SkipReason::TileLoadFailure {
                        path: path.clone(),
                        message: e.to_string(),
                    });
                    record.log();
                    outcome.failures.push(record);
                }
            }
        }

        info!(
            "Loaded {} UDIM tiles from '{}' ({} failed)",
            outcome.registry.len(),
            dir.display(),
            outcome.failures.len()
        );

        Ok(outcome)
    }
}

/// Decode a single tile image from disk.
pub fn load_file(path: impl AsRef<Path>) -> Result<TextureTile, TileLoadError> {
    let path = path.as_ref();
    let to_path = || PathBuf::from(path);

    let bytes = fs::read(path).map_err(|source| TileLoadError::Io {
        path: to_path(),
        source,
    })?;

    let image = image::load_from_memory(&bytes).map_err(|source| TileLoadError::Decode {
        path: to_path(),
        source,
    })?;

    TextureTile::from_dynamic_image(&image).map_err(|source| TileLoadError::Invalid {
        path: to_path(),
        source,
    })
}

fn has_tile_extension(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| TILE_EXTENSIONS.iter().any(|t| ext.eq_ignore_ascii_case(t)))
}
