//! The set of materials that exist, independent of any mesh.

use bevy::prelude::*;

/// Base color given to materials created on demand.
pub const DEFAULT_BASE_COLOR: Color = Color::srgb(0.8, 0.8, 0.8);

/// A named material.
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct MaterialDef {
    /// Unique name; meshes refer to materials by this name in their slots.
    pub name: String,

    /// Display color for previews and tooling.
    ///
    /// Default: light gray
    pub base_color: Color,
}

impl MaterialDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_color: DEFAULT_BASE_COLOR,
        }
    }

    pub fn with_base_color(mut self, color: Color) -> Self {
        self.base_color = color;
        self
    }
}

/// All materials known to a batch run, in creation order.
///
/// Names are unique.
#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub struct MaterialLibrary {
    materials: Vec<MaterialDef>,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a material, ignoring it if the name is already taken.
    pub fn with_material(mut self, material: MaterialDef) -> Self {
        self.insert(material);
        self
    }

    /// Add a material. Returns `false` (and keeps the existing one) if a
    /// material with the same name exists.
    pub fn insert(&mut self, material: MaterialDef) -> bool {
        if self.contains(&material.name) {
            return false;
        }
        self.materials.push(material);
        true
    }

    /// Index of the material called `name`, creating it if absent.
    ///
    /// The flag is `true` when the material was created by this call.
    pub fn ensure(&mut self, name: &str) -> (usize, bool) {
        if let Some(index) = self.index_of(name) {
            return (index, false);
        }

        info!("Creating material '{}'", name);
        self.materials.push(MaterialDef::new(name));
        (self.materials.len() - 1, true)
    }

    pub fn get(&self, name: &str) -> Option<&MaterialDef> {
        self.materials.iter().find(|m| m.name == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.materials.iter().position(|m| m.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MaterialDef> {
        self.materials.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first() {
        let mut library = MaterialLibrary::new();
        assert!(library.insert(MaterialDef::new("sand").with_base_color(Color::WHITE)));
        assert!(!library.insert(MaterialDef::new("sand")));

        assert_eq!(library.len(), 1);
        assert_eq!(library.get("sand").unwrap().base_color, Color::WHITE);
    }

    #[test]
    fn test_ensure_creates_once() {
        let mut library = MaterialLibrary::new().with_material(MaterialDef::new("stone"));

        assert_eq!(library.ensure("stone"), (0, false));
        assert_eq!(library.ensure("grass"), (1, true));
        assert_eq!(library.ensure("grass"), (1, false));

        let created = library.get("grass").unwrap();
        assert_eq!(created.base_color, DEFAULT_BASE_COLOR);
        assert_eq!(
            library.iter().map(|m| m.name.as_str()).collect::<Vec<_>>(),
            vec!["stone", "grass"]
        );
    }
}
