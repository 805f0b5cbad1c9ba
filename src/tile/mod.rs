//! UDIM texture tiles and the registry that holds them.
//!
//! A [`TextureTile`] is an immutable RGBA grid for one UDIM number. The
//! [`TileRegistry`] maps UDIM numbers to tiles and can be filled from a
//! folder of `<udim>_<anything>.<png|jpg|bmp>` files.

mod error;
mod registry;
mod texture;

pub use error::{RegistryError, TileError, TileLoadError};
pub use registry::{TILE_EXTENSIONS, TileLoadOutcome, TileRegistry, load_file};
pub use texture::TextureTile;
