//! UDIM tile resolution.
//!
//! UDIM numbers start at 1001 for the unit square at the UV origin, grow by
//! one per column and by ten per row:
//!
//! ```text
//!   v
//!   2 | 1021 1022 ...
//!   1 | 1011 1012 ...
//!   0 | 1001 1002 ... 1010
//!     +-----------------> u
//!        0    1        9
//! ```

use std::path::Path;

use bevy::math::Vec2;

/// UDIM number of the tile at the UV origin.
pub const UDIM_BASE: i32 = 1001;

/// Tiles per UDIM row.
pub const UDIM_ROW_STRIDE: i32 = 10;

/// Returns the UDIM tile number that contains `uv`.
///
/// There is no range check: coordinates left of or below the origin, or past
/// the tenth column, produce numbers outside the usual 1001..=1100 range.
/// Callers simply won't find a tile registered under such a number.
///
/// # Example
/// ```
/// use bevy::math::vec2;
/// use bevy_udim_id::udim::udim_from_uv;
///
/// assert_eq!(udim_from_uv(vec2(0.3, 0.7)), 1001);
/// assert_eq!(udim_from_uv(vec2(1.2, 0.1)), 1002);
/// assert_eq!(udim_from_uv(vec2(0.0, 1.0)), 1011);
/// ```
#[inline]
pub fn udim_from_uv(uv: Vec2) -> i32 {
    let column = uv.x.floor() as i32;
    let row = uv.y.floor() as i32;
    UDIM_BASE
        .saturating_add(column)
        .saturating_add(row.saturating_mul(UDIM_ROW_STRIDE))
}

/// Extracts the UDIM number from a tile file name such as `1002_BC.png`.
///
/// The extension is dropped, the stem is split on `_` and the first segment
/// is used if it is made only of ASCII digits. Anything else yields `None`.
/// A path may be passed; only its final component is inspected.
///
/// # Example
/// ```
/// use bevy_udim_id::udim::udim_from_filename;
///
/// assert_eq!(udim_from_filename("1002_BC.png"), Some(1002));
/// assert_eq!(udim_from_filename("1002.png"), Some(1002));
/// assert_eq!(udim_from_filename("BC_1002.png"), None);
/// ```
pub fn udim_from_filename(name: &str) -> Option<i32> {
    let stem = Path::new(name).file_stem()?.to_str()?;
    let segment = stem.split('_').next()?;

    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    segment.parse().ok()
}
