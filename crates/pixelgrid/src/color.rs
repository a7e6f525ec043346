//! RGB color value type shared by the resampler, quantizer and mapper.

/// An 8-bit-per-channel RGB color.
///
/// This is the only color representation the pipeline works in. Alpha is
/// stripped at the [`PixelBuffer`](crate::PixelBuffer) boundary and never
/// reappears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Black, used as the fill color for degenerate inputs.
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Squared Euclidean distance in RGB space (`dr² + dg² + db²`).
    ///
    /// No square root is taken; the value is only ever compared against other
    /// squared distances, never used as an absolute unit. The maximum possible
    /// value is `3 * 255²`, well within `u32`.
    #[inline]
    pub fn distance_squared(self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}
