//! End-to-end tests against synthetic symbols
//!
//! Symbols are rendered with the crate's own encoder, optionally moved,
//! rotated and rescaled with an affine warp, and decoded again.

use chromagrid::decoder::bitstream::codeword;
use chromagrid::decoder::tables::{CODE_TABLE, char_for_codeword};
use chromagrid::encoder::{padded, render_symbol};
use chromagrid::models::grid::{CAPACITY, data_cells};
use chromagrid::utils::geometry::AffineTransform;
use chromagrid::utils::warp::warp_affine;
use chromagrid::{DecodeError, Decoder, PixelColor, Point, decode, decode_aligned};
use image::{Rgb, RgbImage, imageops};

fn alphabet() -> String {
    CODE_TABLE.iter().collect()
}

/// Blue disk of radius `r` centered on a black square zone, as the renderer draws markers
fn draw_marker(img: &mut RgbImage, cx: f32, cy: f32, r: f32) {
    let half = 1.2 * r;
    for y in 0..img.height() {
        for x in 0..img.width() {
            let p = Point::pixel_center(x, y);
            if p.distance(&Point::new(cx, cy)) <= r {
                img.put_pixel(x, y, Rgb([0, 0, 255]));
            } else if (p.x - cx).abs() <= half && (p.y - cy).abs() <= half {
                img.put_pixel(x, y, Rgb([0, 0, 0]));
            }
        }
    }
}

/// Rotate and scale `symbol` about its center onto a white `side` x `side` canvas
fn transformed(symbol: &RgbImage, angle: f32, scale: f32, side: u32) -> RgbImage {
    let src_center = Point::new(symbol.width() as f32 / 2.0, symbol.height() as f32 / 2.0);
    let dst_center = Point::new(side as f32 / 2.0, side as f32 / 2.0);
    let t = AffineTransform::rotate_scale_about(src_center, dst_center, angle, scale);
    warp_affine(symbol, &t, side, side, PixelColor::WHITE).expect("invertible transform")
}

#[test]
fn test_canonical_round_trip() {
    for text in ["", "hello world", "The quick brown fox.", "xyzw XYZW 0123456789"] {
        let symbol = render_symbol(text, 10, 20).unwrap();
        assert_eq!(decode(&symbol).unwrap(), padded(text), "text {:?}", text);
    }
}

#[test]
fn test_full_alphabet_round_trip() {
    let text = alphabet();
    let symbol = render_symbol(&text, 10, 20).unwrap();
    assert_eq!(decode(&symbol).unwrap(), padded(&text));
}

#[test]
fn test_full_capacity_round_trip() {
    let text: String = alphabet().chars().cycle().take(CAPACITY).collect();
    let symbol = render_symbol(&text, 10, 20).unwrap();
    let decoded = decode(&symbol).unwrap();
    assert_eq!(decoded.chars().count(), CAPACITY);
    assert_eq!(decoded, text);
}

/// Full-capacity text whose cells paint blue disks of `radius` cells at `centers`
fn text_with_blue_disks(centers: &[(f32, f32)], radius: f32) -> String {
    let codes: Vec<u8> = data_cells()
        .map(|(row, col)| {
            let inside = centers.iter().any(|&(r, c)| {
                let (dy, dx) = (row as f32 - r, col as f32 - c);
                dx * dx + dy * dy <= radius * radius
            });
            if inside { 0b001 } else { 0b111 }
        })
        .collect();
    codes
        .chunks_exact(2)
        .map(|pair| char_for_codeword(codeword(pair[0], pair[1])))
        .collect()
}

#[test]
fn test_payload_shaped_like_markers_round_trips() {
    for radius in [2.5, 3.5, 4.5, 6.0, 8.0] {
        let text = text_with_blue_disks(&[(23.0, 23.0), (3.0, 43.0)], radius);
        assert_eq!(text.chars().count(), CAPACITY);
        let symbol = render_symbol(&text, 10, 20).unwrap();
        let decoded = decode(&symbol).unwrap_or_else(|e| panic!("radius {}: {}", radius, e));
        assert_eq!(decoded, text, "radius {}", radius);
    }
}

#[test]
fn test_other_cell_size_and_offset() {
    let text = "Offset symbol at seven pixels per cell";
    let symbol = render_symbol(text, 7, 0).unwrap();
    let mut canvas = RgbImage::from_pixel(500, 420, Rgb([255, 255, 255]));
    imageops::replace(&mut canvas, &symbol, 120, 50);
    assert_eq!(decode(&canvas).unwrap(), padded(text));
}

#[test]
fn test_rotation_and_scale_invariance() {
    let text = "rotated and scaled copies decode the same";
    let symbol = render_symbol(text, 10, 20).unwrap();
    let expected = decode(&symbol).unwrap();

    for (angle, scale) in [(0.35f32, 1.2f32), (-0.5, 0.9), (1.2, 1.0), (0.1, 0.75)] {
        let photo = transformed(&symbol, angle, scale, 900);
        let decoded = decode(&photo)
            .unwrap_or_else(|e| panic!("angle {} scale {}: {}", angle, scale, e));
        assert_eq!(decoded, expected, "angle {} scale {}", angle, scale);
    }
}

#[test]
fn test_four_markers_rejected() {
    let symbol = render_symbol("four", 10, 20).unwrap();
    let mut canvas = RgbImage::from_pixel(800, 800, Rgb([255, 255, 255]));
    imageops::replace(&mut canvas, &symbol, 100, 100);
    draw_marker(&mut canvas, 720.0, 150.0, 25.0);

    assert_eq!(decode(&canvas), Err(DecodeError::MarkerCount { found: 4 }));
}

#[test]
fn test_two_markers_rejected() {
    let mut symbol = render_symbol("two", 10, 20).unwrap();
    // Erase the bottom-right marker zone
    for y in 430..490 {
        for x in 430..490 {
            symbol.put_pixel(x, y, Rgb([255, 255, 255]));
        }
    }
    assert_eq!(decode(&symbol), Err(DecodeError::MarkerCount { found: 2 }));
}

#[test]
fn test_unbalanced_markers() {
    let mut img = RgbImage::from_pixel(500, 500, Rgb([255, 255, 255]));
    draw_marker(&mut img, 50.0, 50.0, 15.0);
    draw_marker(&mut img, 50.0, 100.0, 15.0);
    draw_marker(&mut img, 400.0, 100.0, 15.0);
    assert!(matches!(
        decode(&img),
        Err(DecodeError::UnbalancedGeometry { .. })
    ));
}

#[test]
fn test_no_right_angle() {
    let mut img = RgbImage::from_pixel(400, 400, Rgb([255, 255, 255]));
    draw_marker(&mut img, 100.0, 100.0, 15.0);
    draw_marker(&mut img, 300.0, 100.0, 15.0);
    draw_marker(&mut img, 200.0, 273.2, 15.0);
    assert_eq!(decode(&img), Err(DecodeError::NoRightAngle));
}

#[test]
fn test_decode_is_deterministic() {
    let symbol = transformed(&render_symbol("same every time", 10, 20).unwrap(), 0.2, 1.1, 800);
    let first = decode(&symbol);
    let second = decode(&symbol);
    assert!(first.is_ok());
    assert_eq!(first, second);
}

#[test]
fn test_aligned_decode() {
    let text = "aligned symbols skip marker detection";
    for (cell_px, padding) in [(10, 20), (6, 0), (9, 33)] {
        let symbol = render_symbol(text, cell_px, padding).unwrap();
        assert_eq!(decode_aligned(&symbol).unwrap(), padded(text));
    }
}

#[test]
fn test_aligned_blank_image() {
    let blank = RgbImage::from_pixel(300, 300, Rgb([255, 255, 255]));
    assert_eq!(decode_aligned(&blank), Err(DecodeError::EmptyRegion));
}

#[test]
fn test_batch_keeps_order() {
    let texts = ["first", "second", "third"];
    let mut images: Vec<RgbImage> = texts
        .iter()
        .map(|t| render_symbol(t, 10, 20).unwrap())
        .collect();
    images.push(RgbImage::from_pixel(50, 50, Rgb([255, 255, 255])));

    let results = Decoder::new().decode_batch(&images);
    assert_eq!(results.len(), 4);
    for (result, text) in results.iter().zip(texts) {
        assert_eq!(result.as_deref().map(str::trim_end), Ok(text));
    }
    assert_eq!(results[3], Err(DecodeError::MarkerCount { found: 0 }));
}
