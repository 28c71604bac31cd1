/// Geometry utilities for affine transformations
use crate::models::Point;

/// Affine transformation `x' = a*x + b*y + c`, `y' = d*x + e*y + f`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl AffineTransform {
    /// The identity map
    pub fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 0.0,
            e: 1.0,
            f: 0.0,
        }
    }

    /// Create the unique transform mapping 3 source points onto 3 destination points
    ///
    /// Returns `None` when the source points are collinear.
    pub fn from_points(src: &[Point; 3], dst: &[Point; 3]) -> Option<Self> {
        let mut a = [[0.0f32; 3]; 3];
        let mut bx = [0.0f32; 3];
        let mut by = [0.0f32; 3];

        for i in 0..3 {
            a[i] = [src[i].x, src[i].y, 1.0];
            bx[i] = dst[i].x;
            by[i] = dst[i].y;
        }

        let row_x = solve_linear_system(&a, &bx)?;
        let row_y = solve_linear_system(&a, &by)?;
        Some(Self {
            a: row_x[0],
            b: row_x[1],
            c: row_x[2],
            d: row_y[0],
            e: row_y[1],
            f: row_y[2],
        })
    }

    /// Rotation by `angle` radians and uniform `scale` that carries
    /// `src_center` onto `dst_center`
    pub fn rotate_scale_about(src_center: Point, dst_center: Point, angle: f32, scale: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        let a = scale * cos;
        let b = -scale * sin;
        let d = scale * sin;
        let e = scale * cos;
        Self {
            a,
            b,
            c: dst_center.x - (a * src_center.x + b * src_center.y),
            d,
            e,
            f: dst_center.y - (d * src_center.x + e * src_center.y),
        }
    }

    /// Inverse transform, or `None` if the linear part is singular
    pub fn inverse(&self) -> Option<Self> {
        let det = self.a * self.e - self.b * self.d;
        if det.abs() < 1e-10 {
            return None;
        }
        let a = self.e / det;
        let b = -self.b / det;
        let d = -self.d / det;
        let e = self.a / det;
        Some(Self {
            a,
            b,
            c: -(a * self.c + b * self.f),
            d,
            e,
            f: -(d * self.c + e * self.f),
        })
    }

    /// Transform a point
    pub fn transform(&self, p: &Point) -> Point {
        Point::new(
            self.a * p.x + self.b * p.y + self.c,
            self.d * p.x + self.e * p.y + self.f,
        )
    }
}

/// Solve an NxN linear system using Gaussian elimination with partial pivoting
#[allow(clippy::needless_range_loop)]
fn solve_linear_system<const N: usize>(a: &[[f32; N]; N], b: &[f32; N]) -> Option<[f32; N]> {
    let mut a = *a;
    let mut b = *b;

    // Forward elimination
    for i in 0..N {
        let mut max_val = a[i][i].abs();
        let mut max_row = i;

        for k in (i + 1)..N {
            if a[k][i].abs() > max_val {
                max_val = a[k][i].abs();
                max_row = k;
            }
        }

        if max_val < 1e-10 {
            return None;
        }

        if max_row != i {
            a.swap(i, max_row);
            b.swap(i, max_row);
        }

        for k in (i + 1)..N {
            let factor = a[k][i] / a[i][i];
            b[k] -= factor * b[i];

            for j in i..N {
                a[k][j] -= factor * a[i][j];
            }
        }
    }

    // Back substitution
    let mut x = [0.0f32; N];
    for i in (0..N).rev() {
        let mut sum = b[i];
        for j in (i + 1)..N {
            sum -= a[i][j] * x[j];
        }
        x[i] = sum / a[i][i];
    }

    Some(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(p: Point, q: Point) {
        assert!(
            p.distance(&q) < 1e-3,
            "expected ({}, {}), got ({}, {})",
            q.x,
            q.y,
            p.x,
            p.y
        );
    }

    #[test]
    fn test_affine_from_points_exact() {
        let src = [
            Point::new(10.0, 20.0),
            Point::new(40.0, 25.0),
            Point::new(15.0, 70.0),
        ];
        let dst = [
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(0.0, 100.0),
        ];

        let t = AffineTransform::from_points(&src, &dst).unwrap();
        for (s, d) in src.iter().zip(dst.iter()) {
            assert_close(t.transform(s), *d);
        }
    }

    #[test]
    fn test_collinear_points_rejected() {
        let src = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
        ];
        let dst = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ];
        assert!(AffineTransform::from_points(&src, &dst).is_none());
    }

    #[test]
    fn test_inverse_round_trip() {
        let t = AffineTransform::rotate_scale_about(
            Point::new(50.0, 50.0),
            Point::new(120.0, 80.0),
            0.4,
            1.7,
        );
        let inv = t.inverse().unwrap();
        let p = Point::new(13.0, -7.5);
        assert_close(inv.transform(&t.transform(&p)), p);
        assert_close(t.transform(&Point::new(50.0, 50.0)), Point::new(120.0, 80.0));
    }

    #[test]
    fn test_identity() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(AffineTransform::identity().transform(&p), p);
    }

    #[test]
    fn test_rotation_quarter_turn() {
        let t = AffineTransform::rotate_scale_about(
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            std::f32::consts::FRAC_PI_2,
            1.0,
        );
        assert_close(t.transform(&Point::new(1.0, 0.0)), Point::new(0.0, 1.0));
    }
}
