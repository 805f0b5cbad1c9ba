//! Key to material name configuration.

use bevy::prelude::*;

use super::key::MaterialKey;
use super::validation::{self, MaterialTableError};

/// Material used for red ID pixels by default.
pub const DEFAULT_RED_MATERIAL: &str = "id231_stn_03";
/// Material used for green ID pixels by default.
pub const DEFAULT_GREEN_MATERIAL: &str = "id100_r_land_02";
/// Material used for blue ID pixels by default.
pub const DEFAULT_BLUE_MATERIAL: &str = "id55_sand_01";
/// Material used for everything else by default.
pub const DEFAULT_FALLBACK_MATERIAL: &str = "id165_wild_grass_5";

/// Which material each [`MaterialKey`] resolves to.
///
/// # Example
///
/// ```
/// use bevy_udim_id::palette::{MaterialKey, MaterialTable};
///
/// let table = MaterialTable::default()
///     .with_red("cliff_rock")
///     .with_default("meadow");
///
/// assert_eq!(table.name(MaterialKey::Red), "cliff_rock");
/// assert_eq!(table.name(MaterialKey::Blue), "id55_sand_01");
/// assert_eq!(table.name(MaterialKey::Default), "meadow");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Reflect)]
pub struct MaterialTable {
    /// Material for predominantly red pixels.
    ///
    /// Default: `"id231_stn_03"`
    pub red: String,

    /// Material for predominantly green pixels.
    ///
    /// Default: `"id100_r_land_02"`
    pub green: String,

    /// Material for predominantly blue pixels.
    ///
    /// Default: `"id55_sand_01"`
    pub blue: String,

    /// Material for mixed, ambiguous, black, white and gray pixels.
    ///
    /// Default: `"id165_wild_grass_5"`
    pub default: String,
}

impl Default for MaterialTable {
    fn default() -> Self {
        Self {
            red: DEFAULT_RED_MATERIAL.to_string(),
            green: DEFAULT_GREEN_MATERIAL.to_string(),
            blue: DEFAULT_BLUE_MATERIAL.to_string(),
            default: DEFAULT_FALLBACK_MATERIAL.to_string(),
        }
    }
}

impl MaterialTable {
    pub fn with_red(self, name: impl Into<String>) -> Self {
        self.with_name(MaterialKey::Red, name)
    }

    pub fn with_green(self, name: impl Into<String>) -> Self {
        self.with_name(MaterialKey::Green, name)
    }

    pub fn with_blue(self, name: impl Into<String>) -> Self {
        self.with_name(MaterialKey::Blue, name)
    }

    pub fn with_default(self, name: impl Into<String>) -> Self {
        self.with_name(MaterialKey::Default, name)
    }

    /// Set the material name for any key.
    pub fn with_name(mut self, key: MaterialKey, name: impl Into<String>) -> Self {
        *self.slot_mut(key) = name.into();
        self
    }

    /// Material name for `key`.
    pub fn name(&self, key: MaterialKey) -> &str {
        match key {
            MaterialKey::Red => &self.red,
            MaterialKey::Green => &self.green,
            MaterialKey::Blue => &self.blue,
            MaterialKey::Default => &self.default,
        }
    }

    /// `(key, name)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (MaterialKey, &str)> {
        MaterialKey::ALL.into_iter().map(|key| (key, self.name(key)))
    }

    /// Check that every name is usable.
    pub fn validate(&self) -> Result<(), MaterialTableError> {
        validation::validate_table(self)
    }

    fn slot_mut(&mut self, key: MaterialKey) -> &mut String {
        match key {
            MaterialKey::Red => &mut self.red,
            MaterialKey::Green => &mut self.green,
            MaterialKey::Blue => &mut self.blue,
            MaterialKey::Default => &mut self.default,
        }
    }
}
