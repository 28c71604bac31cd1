//! File and diagnostics helpers for the command-line tool

use crate::config::MarkerDetectorConfig;
use crate::utils::mask::reference_mask;
use image::{GenericImageView, RgbImage};
use std::env;
use std::path::Path;

fn max_dim_from_env() -> Option<u32> {
    match env::var("CHROMAGRID_MAX_DIM") {
        Ok(value) => match value.trim().parse::<u32>() {
            Ok(0) => None,
            Ok(v) => Some(v),
            Err(_) => None,
        },
        Err(_) => None,
    }
}

/// Load an image as RGB, downscaling when `CHROMAGRID_MAX_DIM` is set and exceeded
pub fn load_rgb<P: AsRef<Path>>(path: P) -> Result<RgbImage, image::ImageError> {
    let img = image::open(path)?;
    let rgb = if let Some(max_dim) = max_dim_from_env() {
        let (orig_w, orig_h) = img.dimensions();
        if orig_w.max(orig_h) > max_dim {
            img.resize(max_dim, max_dim, image::imageops::FilterType::Triangle)
                .to_rgb8()
        } else {
            img.to_rgb8()
        }
    } else {
        img.to_rgb8()
    };
    Ok(rgb)
}

/// Save an RGB image; the format follows the file extension
pub fn save_rgb<P: AsRef<Path>>(image: &RgbImage, path: P) -> Result<(), image::ImageError> {
    image.save(path)
}

/// Coverage of the marker-color mask.
#[derive(Debug, Clone, Copy)]
pub struct MaskStats {
    /// Pixels classified as marker color.
    pub marker_pixels: usize,
    /// Total pixels in the image.
    pub total_pixels: usize,
    /// Ratio of marker pixels to total pixels.
    pub marker_ratio: f64,
}

/// Compute how much of the image the marker detector sees as marker color.
pub fn marker_mask_stats(image: &RgbImage, config: &MarkerDetectorConfig) -> MaskStats {
    let mask = reference_mask(
        image,
        config.reference,
        config.color_tolerance,
        config.blur_sigma,
    );
    let marker = mask.count();
    let total = mask.width() * mask.height();
    let ratio = if total == 0 {
        0.0
    } else {
        marker as f64 / total as f64
    };
    MaskStats {
        marker_pixels: marker,
        total_pixels: total,
        marker_ratio: ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::render_symbol;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEMP_FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_path(ext: &str) -> std::path::PathBuf {
        let n = TEMP_FILE_COUNTER.fetch_add(1, Ordering::Relaxed);
        env::temp_dir().join(format!("chromagrid_test_{}_{}.{}", std::process::id(), n, ext))
    }

    #[test]
    fn test_png_round_trip() {
        let symbol = render_symbol("png", 4, 8).unwrap();
        let path = temp_path("png");
        save_rgb(&symbol, &path).unwrap();
        let loaded = load_rgb(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, symbol);
    }

    #[test]
    fn test_missing_file() {
        assert!(load_rgb(temp_path("png")).is_err());
    }

    #[test]
    fn test_mask_stats() {
        let blank = RgbImage::from_pixel(10, 10, image::Rgb([255, 255, 255]));
        let stats = marker_mask_stats(&blank, &MarkerDetectorConfig::default());
        assert_eq!(stats.marker_pixels, 0);
        assert_eq!(stats.total_pixels, 100);
        assert_eq!(stats.marker_ratio, 0.0);
    }
}
