//! Classification buckets.

use bevy::prelude::*;

/// The closed set of buckets a sampled color can fall into.
///
/// Each key maps to one material name through a
/// [`MaterialTable`](super::MaterialTable).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub enum MaterialKey {
    Red,
    Green,
    Blue,
    Default,
}

impl MaterialKey {
    /// Number of keys.
    pub const COUNT: usize = 4;

    /// All keys, in classification priority order.
    pub const ALL: [MaterialKey; Self::COUNT] = [Self::Red, Self::Green, Self::Blue, Self::Default];

    /// Stable position of this key in [`MaterialKey::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
            Self::Default => 3,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Default => "default",
        }
    }
}

impl std::fmt::Display for MaterialKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
