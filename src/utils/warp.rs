/// Affine image warping with bilinear sampling
use crate::models::{PixelColor, Point};
use crate::utils::geometry::AffineTransform;
use image::RgbImage;
use rayon::prelude::*;

/// Warp `image` through `transform` (source -> destination coordinates) into a
/// new `width` x `height` image
///
/// Each destination pixel is pulled back through the inverse transform and
/// bilinearly sampled. Samples outside the source read as `fill`. Returns
/// `None` when the transform is not invertible.
pub fn warp_affine(
    image: &RgbImage,
    transform: &AffineTransform,
    width: u32,
    height: u32,
    fill: PixelColor,
) -> Option<RgbImage> {
    let inverse = transform.inverse()?;
    let mut out = RgbImage::new(width, height);
    if width == 0 || height == 0 {
        return Some(out);
    }

    let row_len = width as usize * 3;
    out.par_chunks_mut(row_len).enumerate().for_each(|(y, row)| {
        for (x, px) in row.chunks_exact_mut(3).enumerate() {
            let src = inverse.transform(&Point::pixel_center(x as u32, y as u32));
            let c = sample_bilinear(image, src, fill);
            px[0] = c.r;
            px[1] = c.g;
            px[2] = c.b;
        }
    });

    Some(out)
}

/// Bilinear sample at a continuous image coordinate
pub fn sample_bilinear(image: &RgbImage, p: Point, fill: PixelColor) -> PixelColor {
    let fx = p.x - 0.5;
    let fy = p.y - 0.5;
    if !fx.is_finite() || !fy.is_finite() {
        return fill;
    }

    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = fx - x0;
    let ty = fy - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let fetch = |x: i64, y: i64| -> [f32; 3] {
        let c = if x < 0 || y < 0 || x >= image.width() as i64 || y >= image.height() as i64 {
            fill
        } else {
            PixelColor::from(image.get_pixel(x as u32, y as u32))
        };
        [c.r as f32, c.g as f32, c.b as f32]
    };

    let p00 = fetch(x0, y0);
    let p10 = fetch(x0 + 1, y0);
    let p01 = fetch(x0, y0 + 1);
    let p11 = fetch(x0 + 1, y0 + 1);

    let mut out = [0u8; 3];
    for ch in 0..3 {
        let top = p00[ch] * (1.0 - tx) + p10[ch] * tx;
        let bottom = p01[ch] * (1.0 - tx) + p11[ch] * tx;
        out[ch] = (top * (1.0 - ty) + bottom * ty).round().clamp(0.0, 255.0) as u8;
    }
    PixelColor::new(out[0], out[1], out[2])
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_identity_warp_preserves_pixels() {
        let mut img = RgbImage::from_pixel(8, 6, Rgb([255, 255, 255]));
        img.put_pixel(2, 3, Rgb([255, 0, 0]));
        img.put_pixel(7, 0, Rgb([0, 255, 0]));

        let out = warp_affine(&img, &AffineTransform::identity(), 8, 6, PixelColor::WHITE).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_translation_fills_background() {
        let img = RgbImage::from_pixel(4, 4, Rgb([0, 0, 0]));
        let shift = AffineTransform::rotate_scale_about(
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            0.0,
            1.0,
        );
        let out = warp_affine(&img, &shift, 4, 4, PixelColor::WHITE).unwrap();
        assert_eq!(out.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(out.get_pixel(3, 2).0, [0, 0, 0]);
    }

    #[test]
    fn test_bilinear_midpoint() {
        let mut img = RgbImage::from_pixel(2, 1, Rgb([0, 0, 0]));
        img.put_pixel(1, 0, Rgb([200, 100, 50]));
        let c = sample_bilinear(&img, Point::new(1.0, 0.5), PixelColor::WHITE);
        assert_eq!(c, PixelColor::new(100, 50, 25));
    }
}
