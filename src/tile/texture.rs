//! Pixel storage and sampling for a single UDIM tile.

use bevy::asset::RenderAssetUsages;
use bevy::image::Image;
use bevy::math::{Vec2, Vec3};
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use super::error::TileError;

/// An immutable RGBA pixel grid covering one UDIM tile.
///
/// Pixels are stored row-major with row 0 at the **bottom** of the image, so
/// that `v = 0` maps to the first row. Channels are in `[0, 1]`.
///
/// # Example
/// ```
/// use bevy::math::{vec2, vec3};
/// use bevy_udim_id::tile::TextureTile;
///
/// let tile = TextureTile::filled(4, 4, [0.0, 0.0, 1.0, 1.0]);
/// assert_eq!(tile.sample(vec2(0.5, 0.5)), vec3(0.0, 0.0, 1.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TextureTile {
    width: u32,
    height: u32,
    pixels: Vec<[f32; 4]>,
}

impl TextureTile {
    /// Create a tile from bottom-origin, row-major pixels.
    pub fn new(width: u32, height: u32, pixels: Vec<[f32; 4]>) -> Result<Self, TileError> {
        if width == 0 || height == 0 {
            return Err(TileError::EmptyDimensions { width, height });
        }

        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(TileError::PixelCountMismatch {
                width,
                height,
                expected,
                found: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a tile where every pixel has the same color.
    ///
    /// Zero dimensions are bumped to one.
    pub fn filled(width: u32, height: u32, rgba: [f32; 4]) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![rgba; width as usize * height as usize],
        }
    }

    /// Convert a decoded image into a tile.
    ///
    /// Integer channels are normalized (`value / max`) without any color
    /// space conversion, and rows are flipped so row 0 is the bottom row.
    pub fn from_dynamic_image(image: &image::DynamicImage) -> Result<Self, TileError> {
        let rgba = image.to_rgba32f();
        let (width, height) = rgba.dimensions();

        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for row in 0..height {
            let source_y = height - 1 - row;
            for x in 0..width {
                pixels.push(rgba.get_pixel(x, source_y).0);
            }
        }

        Self::new(width, height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw pixels, bottom row first.
    pub fn pixels(&self) -> &[[f32; 4]] {
        &self.pixels
    }

    /// The pixel at column `x`, row `y` (row 0 is the bottom).
    ///
    /// Returns `None` outside the grid.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    /// Sample the RGB color under `uv`, ignoring alpha.
    ///
    /// Only the fractional part of each coordinate is used, and the pixel
    /// index wraps, so `1.0` lands on the first column or row rather than
    /// past the end of the buffer.
    pub fn sample(&self, uv: Vec2) -> Vec3 {
        let x = wrap_to_pixel(uv.x, self.width);
        let y = wrap_to_pixel(uv.y, self.height);
        let [r, g, b, _] = self.pixels[self.index(x, y)];
        Vec3::new(r, g, b)
    }

    /// Build a Bevy [`Image`] (`Rgba32Float`, top row first) for previewing.
    pub fn to_image(&self) -> Image {
        let mut top_first = Vec::with_capacity(self.pixels.len());
        for row in self.pixels.chunks_exact(self.width as usize).rev() {
            top_first.extend_from_slice(row);
        }

        Image::new(
            Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            bytemuck::cast_slice(&top_first).to_vec(),
            TextureFormat::Rgba32Float,
            RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
        )
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Map a UV component onto a pixel index in `0..size`.
#[inline]
fn wrap_to_pixel(coord: f32, size: u32) -> u32 {
    let local = coord.rem_euclid(1.0);
    // `rem_euclid` can round up to exactly 1.0 for tiny negative inputs.
    let pixel = (local * size as f32).floor() as u32;
    pixel % size
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::{vec2, vec3};

    const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    /// Bottom row: red, green. Top row: blue, white.
    fn quad_tile() -> TextureTile {
        TextureTile::new(2, 2, vec![RED, GREEN, BLUE, WHITE]).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_dimensions() {
        assert_eq!(
            TextureTile::new(0, 2, vec![]),
            Err(TileError::EmptyDimensions {
                width: 0,
                height: 2
            })
        );
        assert!(matches!(
            TextureTile::new(2, 2, vec![RED; 3]),
            Err(TileError::PixelCountMismatch {
                expected: 4,
                found: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_sample_corners() {
        let tile = quad_tile();
        assert_eq!(tile.sample(vec2(0.0, 0.0)), vec3(1.0, 0.0, 0.0));
        assert_eq!(tile.sample(vec2(0.75, 0.25)), vec3(0.0, 1.0, 0.0));
        assert_eq!(tile.sample(vec2(0.25, 0.75)), vec3(0.0, 0.0, 1.0));
        assert_eq!(tile.sample(vec2(0.99, 0.99)), vec3(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_sample_wraps_at_one() {
        let tile = quad_tile();
        assert_eq!(tile.sample(vec2(1.0, 1.0)), vec3(1.0, 0.0, 0.0));
        assert_eq!(tile.sample(vec2(1.0, 0.75)), vec3(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_sample_ignores_tile_offset() {
        let tile = quad_tile();
        // Same local position inside UDIM 1012.
        assert_eq!(tile.sample(vec2(1.99, 1.99)), vec3(1.0, 1.0, 1.0));
        assert_eq!(tile.sample(vec2(-0.25, 0.25)), vec3(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_sample_tiny_negative_stays_in_bounds() {
        let tile = quad_tile();
        let rgb = tile.sample(vec2(-1.0e-9, -1.0e-9));
        assert!(tile.pixels().iter().any(|p| vec3(p[0], p[1], p[2]) == rgb));
    }

    #[test]
    fn test_sample_ignores_alpha() {
        let tile = TextureTile::filled(1, 1, [0.2, 0.4, 0.6, 0.0]);
        assert_eq!(tile.sample(vec2(0.5, 0.5)), vec3(0.2, 0.4, 0.6));
    }

    #[test]
    fn test_pixel_bounds() {
        let tile = quad_tile();
        assert_eq!(tile.pixel(1, 1), Some(WHITE));
        assert_eq!(tile.pixel(2, 0), None);
        assert_eq!(tile.pixel(0, 2), None);
    }

    #[test]
    fn test_from_dynamic_image_flips_rows() {
        // Image crate rows are top first: top row blue, bottom row red.
        let mut buffer = image::RgbaImage::new(1, 2);
        buffer.put_pixel(0, 0, image::Rgba([0, 0, 255, 255]));
        buffer.put_pixel(0, 1, image::Rgba([255, 0, 0, 255]));

        let tile = TextureTile::from_dynamic_image(&image::DynamicImage::ImageRgba8(buffer))
            .unwrap();

        assert_eq!(tile.pixel(0, 0), Some(RED));
        assert_eq!(tile.pixel(0, 1), Some(BLUE));
    }

    #[test]
    fn test_from_dynamic_image_keeps_raw_values() {
        let buffer = image::RgbImage::from_pixel(1, 1, image::Rgb([51, 102, 204]));
        let tile =
            TextureTile::from_dynamic_image(&image::DynamicImage::ImageRgb8(buffer)).unwrap();

        let [r, g, b, a] = tile.pixel(0, 0).unwrap();
        assert!((r - 0.2).abs() < 1e-6);
        assert!((g - 0.4).abs() < 1e-6);
        assert!((b - 0.8).abs() < 1e-6);
        assert_eq!(a, 1.0);
    }

    #[test]
    fn test_to_image_is_top_first() {
        let image = quad_tile().to_image();
        assert_eq!(image.width(), 2);
        assert_eq!(image.height(), 2);
        assert_eq!(image.texture_descriptor.format, TextureFormat::Rgba32Float);

        let data = image.data.as_ref().unwrap();
        assert_eq!(data.len(), 4 * 16);
        let first: [f32; 4] = bytemuck::pod_read_unaligned(&data[0..16]);
        assert_eq!(first, BLUE);
    }
}
