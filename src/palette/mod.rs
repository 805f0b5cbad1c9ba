//! Material keys and the table that maps them to material names.
//!
//! Provides the [`MaterialKey`] buckets produced by the classifier and a
//! user-editable [`MaterialTable`] with validation.

mod key;
mod table;
mod validation;

pub use key::MaterialKey;
pub use table::{
    DEFAULT_BLUE_MATERIAL, DEFAULT_FALLBACK_MATERIAL, DEFAULT_GREEN_MATERIAL, DEFAULT_RED_MATERIAL,
    MaterialTable,
};
pub use validation::MaterialTableError;
