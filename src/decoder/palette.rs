/// The 8-color palette and nearest-color quantization
use crate::models::PixelColor;

/// One palette entry: a reference color and its 3-bit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    /// Color name, for diagnostics
    pub name: &'static str,
    /// Reference RGB color
    pub color: PixelColor,
    /// 3-bit code (bit 2 = red, bit 1 = green, bit 0 = blue)
    pub code: u8,
}

const fn channel(code: u8, bit: u8) -> u8 {
    if code & bit != 0 { 255 } else { 0 }
}

const fn entry(name: &'static str, code: u8) -> PaletteEntry {
    PaletteEntry {
        name,
        color: PixelColor::new(
            channel(code, 0b100),
            channel(code, 0b010),
            channel(code, 0b001),
        ),
        code,
    }
}

/// Palette in enumeration order (ascending code); ties during matching
/// resolve to the earliest entry
pub const PALETTE: [PaletteEntry; 8] = [
    entry("black", 0b000),
    entry("blue", 0b001),
    entry("green", 0b010),
    entry("cyan", 0b011),
    entry("red", 0b100),
    entry("magenta", 0b101),
    entry("yellow", 0b110),
    entry("white", 0b111),
];

/// Reference color for a 3-bit code (only the low 3 bits are used)
pub fn color_for_code(code: u8) -> PixelColor {
    PALETTE[(code & 0b111) as usize].color
}

/// Nearest-palette-color classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantizer {
    weights: [u32; 3],
}

impl Quantizer {
    /// Quantizer with per-channel (r, g, b) distance weights
    pub fn new(weights: [u32; 3]) -> Self {
        Self { weights }
    }

    /// Closest palette entry to `sample` and its distance
    pub fn nearest(&self, sample: PixelColor) -> (PaletteEntry, u64) {
        let mut best = PALETTE[0];
        let mut best_dist = sample.weighted_distance_squared(&best.color, self.weights);
        for entry in &PALETTE[1..] {
            let dist = sample.weighted_distance_squared(&entry.color, self.weights);
            if dist < best_dist {
                best = *entry;
                best_dist = dist;
            }
        }
        (best, best_dist)
    }

    /// 3-bit code of the closest palette entry
    pub fn quantize(&self, sample: PixelColor) -> u8 {
        self.nearest(sample).0.code
    }

    /// Quantize a sequence of samples, preserving order
    pub fn quantize_all(&self, samples: &[PixelColor]) -> Vec<u8> {
        samples.iter().map(|&s| self.quantize(s)).collect()
    }
}

impl Default for Quantizer {
    fn default() -> Self {
        Self::new([1, 1, 1])
    }
}
