/// Binary masks built from color similarity
use crate::models::PixelColor;
use image::{GrayImage, Luma, RgbImage, imageops};
use rayon::prelude::*;

/// Row-major binary mask, one flag per pixel
#[derive(Debug, Clone, Default)]
pub struct Mask {
    width: usize,
    height: usize,
    data: Vec<bool>,
}

impl Mask {
    /// Create an empty (all false) mask
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![false; width * height],
        }
    }

    /// Mask width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Mask height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Flag at (x, y); out of bounds reads as false
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.data[y * self.width + x]
    }

    /// Set flag at (x, y); out of bounds writes are ignored
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        self.data[y * self.width + x] = value;
    }

    /// Number of set pixels
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    fn from_gray(gray: &GrayImage, threshold: u8) -> Self {
        let (width, height) = (gray.width() as usize, gray.height() as usize);
        let data = gray.as_raw().iter().map(|&v| v >= threshold).collect();
        Self {
            width,
            height,
            data,
        }
    }
}

/// Grayscale mask: 255 where the pixel is within `tolerance` of `reference`, else 0
pub fn color_mask(image: &RgbImage, reference: PixelColor, tolerance: f32) -> GrayImage {
    let (width, height) = image.dimensions();
    let mut mask = GrayImage::new(width, height);
    if width == 0 || height == 0 {
        return mask;
    }

    let limit = tolerance.max(0.0).powi(2);
    let src = image.as_raw();
    let row_len = width as usize;

    mask.par_chunks_mut(row_len).enumerate().for_each(|(y, row)| {
        let src_row = &src[y * row_len * 3..(y + 1) * row_len * 3];
        for (dst, px) in row.iter_mut().zip(src_row.chunks_exact(3)) {
            let color = PixelColor::new(px[0], px[1], px[2]);
            if (color.distance_squared(&reference) as f32) <= limit {
                *dst = 255;
            }
        }
    });

    mask
}

/// Blur a grayscale mask and re-threshold it at half intensity
///
/// Isolated specks vanish and ragged edges are smoothed. A non-positive
/// `sigma` skips the blur.
pub fn denoise(mask: &GrayImage, sigma: f32) -> Mask {
    if sigma <= 0.0 || mask.width() == 0 || mask.height() == 0 {
        return Mask::from_gray(mask, 128);
    }
    let blurred: GrayImage = imageops::blur(mask, sigma);
    Mask::from_gray(&blurred, 128)
}

/// Build the denoised binary mask of pixels close to `reference`
pub fn reference_mask(
    image: &RgbImage,
    reference: PixelColor,
    tolerance: f32,
    blur_sigma: f32,
) -> Mask {
    denoise(&color_mask(image, reference, tolerance), blur_sigma)
}

/// Convert a binary mask back into a 0/255 grayscale image (debug output)
pub fn mask_to_gray(mask: &Mask) -> GrayImage {
    GrayImage::from_fn(mask.width() as u32, mask.height() as u32, |x, y| {
        Luma([if mask.get(x as usize, y as usize) { 255 } else { 0 }])
    })
}
