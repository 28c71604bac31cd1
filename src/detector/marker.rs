/// Circular fiducial detection
///
/// Markers are solid disks in a single reference color, each centered in a
/// dark square zone. The detector masks pixels near that color, denoises the
/// mask, labels connected regions and keeps the regions that look like disks
/// of plausible size sitting on a dark surround. Data cells share the marker
/// color, so the surround check is what separates a real fiducial from a
/// disk painted by the payload.
use crate::config::MarkerDetectorConfig;
use crate::detector::connected_components::{Component, Labeling, label_components};
use crate::error::DecodeError;
use crate::models::{Marker, PixelColor, Point};
use crate::utils::mask::reference_mask;
use image::RgbImage;
use std::f32::consts::PI;
use tracing::{debug, trace};

/// Fewest pixels a marker radius may span, regardless of image size
const MIN_RADIUS_PX: f32 = 3.0;

/// Accepted bounding box aspect ratios (width / height)
const ASPECT_RANGE: std::ops::RangeInclusive<f32> = 0.75..=1.33;

/// Accepted region area / bounding box area (π/4 for an ideal disk)
const FILL_RANGE: std::ops::RangeInclusive<f32> = 0.65..=0.90;

/// Ring radius probed for the dark surround, relative to the disk radius.
/// The zone edge sits at 1.2 radii, so this stays inside the zone.
const RING_RADIUS_FACTOR: f32 = 1.1;

/// Samples taken around the ring
const RING_SAMPLES: usize = 32;

/// Brightest channel value still counted as dark
const DARK_LEVEL: u8 = 96;

/// Finds marker-colored disks
pub struct MarkerDetector;

impl MarkerDetector {
    /// Detect every marker-like disk in the image
    pub fn detect(image: &RgbImage, config: &MarkerDetectorConfig) -> Vec<Marker> {
        let short_side = image.width().min(image.height()) as f32;
        let min_radius = (config.min_radius_ratio * short_side).max(MIN_RADIUS_PX);
        let max_radius = config.max_radius_ratio * short_side;
        let min_separation = config.min_center_distance_ratio * short_side;

        let mask = reference_mask(
            image,
            config.reference,
            config.color_tolerance,
            config.blur_sigma,
        );
        let labeling = label_components(&mask);

        let candidates: Vec<Marker> = labeling
            .components
            .iter()
            .filter_map(|c| {
                fit_disk(&labeling, c, min_radius, max_radius, config.min_disk_overlap)
            })
            .filter(|m| {
                let darkness = ring_darkness(image, m);
                if darkness < config.min_ring_darkness {
                    trace!(x = m.center.x, y = m.center.y, darkness, "rejected: light surround");
                    return false;
                }
                true
            })
            .collect();

        debug!(
            regions = labeling.components.len(),
            candidates = candidates.len(),
            min_radius,
            max_radius,
            "marker candidates"
        );

        suppress_close(candidates, min_separation)
    }

    /// Detect markers and require exactly three
    pub fn detect_three(
        image: &RgbImage,
        config: &MarkerDetectorConfig,
    ) -> Result<[Marker; 3], DecodeError> {
        let markers = Self::detect(image, config);
        match markers.as_slice() {
            &[a, b, c] => Ok([a, b, c]),
            _ => Err(DecodeError::MarkerCount {
                found: markers.len(),
            }),
        }
    }
}

/// Accept `component` as a disk, returning its center and equivalent radius
fn fit_disk(
    labeling: &Labeling,
    component: &Component,
    min_radius: f32,
    max_radius: f32,
    min_overlap: f32,
) -> Option<Marker> {
    let radius = (component.area as f32 / PI).sqrt();
    if radius < min_radius || radius > max_radius {
        trace!(label = component.label, radius, "rejected: radius out of range");
        return None;
    }

    let (w, h) = (component.width() as f32, component.height() as f32);
    let aspect = w / h;
    if !ASPECT_RANGE.contains(&aspect) {
        trace!(label = component.label, aspect, "rejected: aspect");
        return None;
    }

    let fill = component.area as f32 / (w * h);
    if !FILL_RANGE.contains(&fill) {
        trace!(label = component.label, fill, "rejected: fill ratio");
        return None;
    }

    let center = component.centroid();
    let overlap = disk_overlap(labeling, component, center.x, center.y, radius);
    if overlap < min_overlap {
        trace!(label = component.label, overlap, "rejected: not circular");
        return None;
    }

    Some(Marker::new(center, radius))
}

/// Intersection-over-union between a region and the disk (cx, cy, r)
fn disk_overlap(labeling: &Labeling, component: &Component, cx: f32, cy: f32, r: f32) -> f32 {
    let (min_x, min_y, max_x, max_y) = component.bbox;
    let x_lo = ((cx - r).floor().max(0.0) as usize).min(min_x);
    let y_lo = ((cy - r).floor().max(0.0) as usize).min(min_y);
    let x_hi = ((cx + r).ceil() as usize)
        .max(max_x)
        .min(labeling.width().saturating_sub(1));
    let y_hi = ((cy + r).ceil() as usize)
        .max(max_y)
        .min(labeling.height().saturating_sub(1));

    let r2 = r * r;
    let mut disk = 0usize;
    let mut both = 0usize;
    for y in y_lo..=y_hi {
        let dy = y as f32 + 0.5 - cy;
        for x in x_lo..=x_hi {
            let dx = x as f32 + 0.5 - cx;
            if dx * dx + dy * dy <= r2 {
                disk += 1;
                if labeling.label_at(x, y) == component.label {
                    both += 1;
                }
            }
        }
    }

    let union = component.area + disk - both;
    if union == 0 {
        return 0.0;
    }
    both as f32 / union as f32
}

/// Fraction of ring samples just outside the disk that are dark
///
/// Samples falling outside the image count as light.
fn ring_darkness(image: &RgbImage, marker: &Marker) -> f32 {
    let ring = marker.radius * RING_RADIUS_FACTOR;
    let dark = (0..RING_SAMPLES)
        .filter(|&i| {
            let angle = i as f32 * std::f32::consts::TAU / RING_SAMPLES as f32;
            let p = marker.center.translate(ring * angle.cos(), ring * angle.sin());
            is_dark_at(image, p)
        })
        .count();
    dark as f32 / RING_SAMPLES as f32
}

fn is_dark_at(image: &RgbImage, p: Point) -> bool {
    if p.x < 0.0 || p.y < 0.0 {
        return false;
    }
    let (x, y) = (p.x as u32, p.y as u32);
    if x >= image.width() || y >= image.height() {
        return false;
    }
    let c = PixelColor::from(image.get_pixel(x, y));
    c.r.max(c.g).max(c.b) <= DARK_LEVEL
}

/// Drop markers closer than `min_separation` to a larger one
fn suppress_close(mut markers: Vec<Marker>, min_separation: f32) -> Vec<Marker> {
    markers.sort_by(|a, b| b.radius.total_cmp(&a.radius));

    let mut kept: Vec<Marker> = Vec::with_capacity(markers.len());
    for m in markers {
        if kept
            .iter()
            .all(|k| k.center.distance(&m.center) >= min_separation)
        {
            kept.push(m);
        } else {
            trace!(x = m.center.x, y = m.center.y, "suppressed: too close to larger marker");
        }
    }

    kept.sort_by(|a, b| {
        a.center
            .y
            .total_cmp(&b.center.y)
            .then(a.center.x.total_cmp(&b.center.x))
    });
    kept
}
