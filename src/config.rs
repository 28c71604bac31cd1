//! Detection tuning
//!
//! The symbol format itself (grid size, palette, code table, geometry
//! thresholds) is fixed; only the marker detector and quantizer weights
//! can be tuned, either in code or through `CHROMAGRID_*` variables.

use crate::models::PixelColor;

fn parse_env_f32(name: &str, default: f32) -> f32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<f32>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

fn parse_env_u32(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

fn parse_env_color(name: &str, default: PixelColor) -> PixelColor {
    let Ok(value) = std::env::var(name) else {
        return default;
    };
    let channels: Result<Vec<u8>, _> = value.split(',').map(|c| c.trim().parse::<u8>()).collect();
    match channels.as_deref() {
        Ok([r, g, b]) => PixelColor::new(*r, *g, *b),
        _ => default,
    }
}

/// Marker detector parameters
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDetectorConfig {
    /// Color the fiducials are printed in
    pub reference: PixelColor,
    /// Maximum RGB distance from `reference` for a pixel to count as marker
    pub color_tolerance: f32,
    /// Gaussian sigma used to denoise the marker mask (0 disables)
    pub blur_sigma: f32,
    /// Smallest accepted radius, as a fraction of the shorter image side
    pub min_radius_ratio: f32,
    /// Largest accepted radius, as a fraction of the shorter image side
    pub max_radius_ratio: f32,
    /// Minimum distance between two marker centers, as a fraction of the shorter side
    pub min_center_distance_ratio: f32,
    /// Minimum intersection-over-union between a region and its fitted disk
    pub min_disk_overlap: f32,
    /// Minimum fraction of dark samples on a ring just outside the disk (0 disables)
    pub min_ring_darkness: f32,
}

impl Default for MarkerDetectorConfig {
    fn default() -> Self {
        Self {
            reference: PixelColor::BLUE,
            color_tolerance: 120.0,
            blur_sigma: 1.0,
            min_radius_ratio: 0.01,
            max_radius_ratio: 0.2,
            min_center_distance_ratio: 0.05,
            min_disk_overlap: 0.9,
            min_ring_darkness: 0.75,
        }
    }
}

/// Everything the decoder can be tuned with
#[derive(Debug, Clone, PartialEq)]
pub struct DecoderConfig {
    /// Marker detection parameters
    pub marker: MarkerDetectorConfig,
    /// Per-channel (r, g, b) weights for palette matching
    pub channel_weights: [u32; 3],
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            marker: MarkerDetectorConfig::default(),
            channel_weights: [1, 1, 1],
        }
    }
}

impl DecoderConfig {
    /// Defaults overridden by any `CHROMAGRID_*` environment variables
    ///
    /// Recognized: `CHROMAGRID_MARKER_COLOR` (`r,g,b`),
    /// `CHROMAGRID_COLOR_TOLERANCE`, `CHROMAGRID_BLUR_SIGMA`,
    /// `CHROMAGRID_MIN_RADIUS_RATIO`, `CHROMAGRID_MAX_RADIUS_RATIO`,
    /// `CHROMAGRID_MIN_CENTER_DISTANCE_RATIO`, `CHROMAGRID_MIN_DISK_OVERLAP`,
    /// `CHROMAGRID_MIN_RING_DARKNESS`,
    /// `CHROMAGRID_WEIGHT_R`, `CHROMAGRID_WEIGHT_G`, `CHROMAGRID_WEIGHT_B`.
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            marker: MarkerDetectorConfig {
                reference: parse_env_color("CHROMAGRID_MARKER_COLOR", d.marker.reference),
                color_tolerance: parse_env_f32(
                    "CHROMAGRID_COLOR_TOLERANCE",
                    d.marker.color_tolerance,
                ),
                blur_sigma: parse_env_f32("CHROMAGRID_BLUR_SIGMA", d.marker.blur_sigma),
                min_radius_ratio: parse_env_f32(
                    "CHROMAGRID_MIN_RADIUS_RATIO",
                    d.marker.min_radius_ratio,
                ),
                max_radius_ratio: parse_env_f32(
                    "CHROMAGRID_MAX_RADIUS_RATIO",
                    d.marker.max_radius_ratio,
                ),
                min_center_distance_ratio: parse_env_f32(
                    "CHROMAGRID_MIN_CENTER_DISTANCE_RATIO",
                    d.marker.min_center_distance_ratio,
                ),
                min_disk_overlap: parse_env_f32(
                    "CHROMAGRID_MIN_DISK_OVERLAP",
                    d.marker.min_disk_overlap,
                )
                .clamp(0.0, 1.0),
                min_ring_darkness: parse_env_f32(
                    "CHROMAGRID_MIN_RING_DARKNESS",
                    d.marker.min_ring_darkness,
                )
                .clamp(0.0, 1.0),
            },
            channel_weights: [
                parse_env_u32("CHROMAGRID_WEIGHT_R", d.channel_weights[0]).clamp(1, 16),
                parse_env_u32("CHROMAGRID_WEIGHT_G", d.channel_weights[1]).clamp(1, 16),
                parse_env_u32("CHROMAGRID_WEIGHT_B", d.channel_weights[2]).clamp(1, 16),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DecoderConfig::default();
        assert_eq!(config.marker.reference, PixelColor::BLUE);
        assert_eq!(config.channel_weights, [1, 1, 1]);
        assert!(config.marker.min_radius_ratio < config.marker.max_radius_ratio);
    }

    #[test]
    fn test_unset_variables_keep_defaults() {
        assert_eq!(parse_env_f32("CHROMAGRID_TEST_UNSET_F32", 1.5), 1.5);
        assert_eq!(parse_env_u32("CHROMAGRID_TEST_UNSET_U32", 3), 3);
        assert_eq!(
            parse_env_color("CHROMAGRID_TEST_UNSET_COLOR", PixelColor::WHITE),
            PixelColor::WHITE
        );
    }

    fn set(name: &str, value: &str) {
        // SAFETY: only this test writes these variables
        unsafe { std::env::set_var(name, value) };
    }

    fn unset(name: &str) {
        // SAFETY: see `set`
        unsafe { std::env::remove_var(name) };
    }

    #[test]
    fn test_malformed_colors_keep_default() {
        let name = "CHROMAGRID_TEST_COLOR";
        for bad in ["10,20", "1,2,3,4", "300,0,0", "10, 20, x, 30", "red", ""] {
            set(name, bad);
            assert_eq!(parse_env_color(name, PixelColor::WHITE), PixelColor::WHITE, "{:?}", bad);
        }
        set(name, " 12, 34 ,56 ");
        assert_eq!(parse_env_color(name, PixelColor::WHITE), PixelColor::new(12, 34, 56));
        unset(name);
    }

    #[test]
    fn test_environment_overrides() {
        let vars = [
            ("CHROMAGRID_MARKER_COLOR", "255,0,255"),
            ("CHROMAGRID_COLOR_TOLERANCE", " 80.5 "),
            ("CHROMAGRID_BLUR_SIGMA", "nan"),
            ("CHROMAGRID_MIN_DISK_OVERLAP", "1.7"),
            ("CHROMAGRID_MIN_RING_DARKNESS", "-2"),
            ("CHROMAGRID_WEIGHT_R", "0"),
            ("CHROMAGRID_WEIGHT_G", "40"),
            ("CHROMAGRID_WEIGHT_B", "-3"),
        ];
        for (name, value) in vars {
            set(name, value);
        }
        let config = DecoderConfig::from_env();
        for (name, _) in vars {
            unset(name);
        }

        let defaults = DecoderConfig::default();
        assert_eq!(config.marker.reference, PixelColor::new(255, 0, 255));
        assert_eq!(config.marker.color_tolerance, 80.5);
        assert_eq!(config.marker.blur_sigma, defaults.marker.blur_sigma);
        assert_eq!(config.marker.min_disk_overlap, 1.0);
        assert_eq!(config.marker.min_ring_darkness, 0.0);
        assert_eq!(config.marker.min_radius_ratio, defaults.marker.min_radius_ratio);
        assert_eq!(config.channel_weights, [1, 16, 1]);
    }
}
