//! Stand-in for the texture-decode collaborator.
//!
//! The frame pipeline consumes one decoded image at startup to populate the
//! shader-resource view. Instead of shipping an asset file, the image is a
//! procedural checkerboard with the same descriptor shape a file decoder
//! would produce: dimensions, RGBA8 pixels, one mip level.

/// One decoded RGBA8 image.
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA rows, `width * 4` bytes each.
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Row pitch the GPU upload requires: texture copies need rows placed on
    /// 256-byte boundaries.
    pub fn aligned_row_pitch(&self) -> u32 {
        (self.width * 4 + 255) & !255
    }
}

/// Black/white checkerboard with square cells of `cell` pixels.
pub fn checkerboard(width: u32, height: u32, cell: u32) -> DecodedImage {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let on = ((x / cell) + (y / cell)) % 2 == 0;
            let v = if on { 0xff } else { 0x20 };
            pixels.extend_from_slice(&[v, v, v, 0xff]);
        }
    }
    DecodedImage {
        width,
        height,
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_buffer_matches_dimensions() {
        let image = checkerboard(64, 32, 8);
        assert_eq!(image.pixels.len(), 64 * 32 * 4);
    }

    #[test]
    fn cells_alternate() {
        let image = checkerboard(64, 64, 8);
        let pixel = |x: u32, y: u32| image.pixels[((y * 64 + x) * 4) as usize];
        assert_eq!(pixel(0, 0), 0xff);
        assert_eq!(pixel(8, 0), 0x20);
        assert_eq!(pixel(0, 8), 0x20);
        assert_eq!(pixel(8, 8), 0xff);
    }

    #[test]
    fn row_pitch_is_256_aligned() {
        let image = checkerboard(250, 250, 10);
        assert_eq!(image.aligned_row_pitch() % 256, 0);
        assert!(image.aligned_row_pitch() >= 250 * 4);
        // An exact multiple stays put.
        let image = checkerboard(64, 64, 8);
        assert_eq!(image.aligned_row_pitch(), 256);
    }
}
