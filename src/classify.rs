//! Color-ID classification.

use bevy::math::Vec3;

use crate::palette::MaterialKey;

/// Channel threshold separating "on" from "off".
pub const CLASSIFY_THRESHOLD: f32 = 0.5;

/// Map an RGB color to a [`MaterialKey`].
///
/// A color is red, green or blue only when that channel is strictly above
/// [`CLASSIFY_THRESHOLD`] and the other two are strictly below it. Checks run
/// in the order red, green, blue; everything else (ties at the threshold,
/// two bright channels, black, white, gray, NaN) is [`MaterialKey::Default`].
///
/// # Example
/// ```
/// use bevy::math::vec3;
/// use bevy_udim_id::classify::classify;
/// use bevy_udim_id::palette::MaterialKey;
///
/// assert_eq!(classify(vec3(0.8, 0.1, 0.1)), MaterialKey::Red);
/// assert_eq!(classify(vec3(0.5, 0.5, 0.5)), MaterialKey::Default);
/// ```
pub fn classify(rgb: Vec3) -> MaterialKey {
    let high = |c: f32| c > CLASSIFY_THRESHOLD;
    let low = |c: f32| c < CLASSIFY_THRESHOLD;
    let Vec3 { x: r, y: g, z: b } = rgb;

    if high(r) && low(g) && low(b) {
        MaterialKey::Red
    } else if low(r) && high(g) && low(b) {
        MaterialKey::Green
    } else if low(r) && low(g) && high(b) {
        MaterialKey::Blue
    } else {
        MaterialKey::Default
    }
}
