use image::Rgb;

/// An 8-bit RGB triplet (no alpha)
///
/// Channel order is always red, green, blue. Conversions to and from
/// [`image::Rgb`] are lossless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelColor {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl PixelColor {
    /// Pure black
    pub const BLACK: PixelColor = PixelColor::new(0, 0, 0);
    /// Pure white
    pub const WHITE: PixelColor = PixelColor::new(255, 255, 255);
    /// Pure blue
    pub const BLUE: PixelColor = PixelColor::new(0, 0, 255);

    /// Create a color from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Sum of squared channel differences
    pub fn distance_squared(&self, other: &PixelColor) -> u64 {
        self.weighted_distance_squared(other, [1, 1, 1])
    }

    /// Sum of squared channel differences, each scaled by its channel weight
    ///
    /// Evaluated in `u64`, which holds the result for any `u32` weights.
    pub fn weighted_distance_squared(&self, other: &PixelColor, weights: [u32; 3]) -> u64 {
        let dr = self.r.abs_diff(other.r) as u64;
        let dg = self.g.abs_diff(other.g) as u64;
        let db = self.b.abs_diff(other.b) as u64;
        weights[0] as u64 * dr * dr + weights[1] as u64 * dg * dg + weights[2] as u64 * db * db
    }
}

impl From<Rgb<u8>> for PixelColor {
    fn from(px: Rgb<u8>) -> Self {
        let [r, g, b] = px.0;
        Self { r, g, b }
    }
}

impl From<&Rgb<u8>> for PixelColor {
    fn from(px: &Rgb<u8>) -> Self {
        Self::from(*px)
    }
}

impl From<PixelColor> for Rgb<u8> {
    fn from(c: PixelColor) -> Self {
        Rgb([c.r, c.g, c.b])
    }
}
