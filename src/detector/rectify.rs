/// Role assignment and rectification onto the canonical frame
use crate::error::DecodeError;
use crate::models::grid::{CANONICAL_SIZE, canonical_anchors};
use crate::models::{Marker, PixelColor, Point, RoleAssignment};
use crate::utils::geometry::AffineTransform;
use crate::utils::warp::warp_affine;
use image::RgbImage;
use tracing::debug;

/// Largest accepted ratio between the longest and shortest marker distance
pub const BALANCE_RATIO_LIMIT: f32 = 2.5;

/// Relative Pythagorean tolerance: |a² + b² − c²| ≤ tolerance · c²
pub const RIGHT_ANGLE_TOLERANCE: f32 = 0.05;

/// Background written where the warp samples outside the source image
pub const CANONICAL_FILL: PixelColor = PixelColor::WHITE;

/// Assign bottom-left (right angle), top-left and bottom-right roles to three centers
pub fn assign_roles(centers: &[Point; 3]) -> Result<RoleAssignment, DecodeError> {
    let d01 = centers[0].distance(&centers[1]);
    let d12 = centers[1].distance(&centers[2]);
    let d02 = centers[0].distance(&centers[2]);

    let distances = [d01, d12, d02];
    let min_d = distances.iter().fold(f32::INFINITY, |a, &b| a.min(b));
    let max_d = distances.iter().fold(0.0f32, |a, &b| a.max(b));
    let ratio = if min_d > 0.0 { max_d / min_d } else { f32::INFINITY };
    if ratio >= BALANCE_RATIO_LIMIT {
        return Err(DecodeError::UnbalancedGeometry { ratio });
    }

    // Find the right-angle vertex (smallest relative Pythagorean error)
    let mut best: Option<(usize, f32)> = None;
    for i in 0..3 {
        let p = &centers[i];
        let p1 = &centers[(i + 1) % 3];
        let p2 = &centers[(i + 2) % 3];

        let a2 = p.distance_squared(p1);
        let b2 = p.distance_squared(p2);
        let c2 = p1.distance_squared(p2);
        let error = (a2 + b2 - c2).abs() / c2;
        if error <= RIGHT_ANGLE_TOLERANCE && best.is_none_or(|(_, e)| error < e) {
            best = Some((i, error));
        }
    }

    let Some((idx, error)) = best else {
        return Err(DecodeError::NoRightAngle);
    };

    let right_angle = centers[idx];
    let p1 = centers[(idx + 1) % 3];
    let p2 = centers[(idx + 2) % 3];

    // Smaller y is top-left; ties go to smaller x
    let p1_first = p1.y < p2.y || (p1.y == p2.y && p1.x < p2.x);
    let (top_left, bottom_right) = if p1_first { (p1, p2) } else { (p2, p1) };

    debug!(
        ratio,
        error,
        right_angle = ?(right_angle.x, right_angle.y),
        top_left = ?(top_left.x, top_left.y),
        bottom_right = ?(bottom_right.x, bottom_right.y),
        "assigned marker roles"
    );

    Ok(RoleAssignment {
        right_angle,
        top_left,
        bottom_right,
    })
}

/// Affine transform carrying the assigned markers onto the canonical anchors
pub fn rectification_transform(roles: &RoleAssignment) -> Result<AffineTransform, DecodeError> {
    let src = [roles.top_left, roles.right_angle, roles.bottom_right];
    AffineTransform::from_points(&src, &canonical_anchors()).ok_or(DecodeError::DegenerateTransform)
}

/// Maps a photographed symbol onto the canonical frame
pub struct FrameRectifier;

impl FrameRectifier {
    /// Assign roles to the markers and warp the image into the canonical frame
    pub fn rectify(
        image: &RgbImage,
        markers: &[Marker; 3],
    ) -> Result<(RoleAssignment, RgbImage), DecodeError> {
        let centers = markers.map(|m| m.center);
        let roles = assign_roles(&centers)?;
        let transform = rectification_transform(&roles)?;
        let frame = warp_affine(
            image,
            &transform,
            CANONICAL_SIZE,
            CANONICAL_SIZE,
            CANONICAL_FILL,
        )
        .ok_or(DecodeError::DegenerateTransform)?;
        Ok((roles, frame))
    }
}
