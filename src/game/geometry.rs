use super::math::{add, cross, normalize, scale};
use super::types::Point;

// Stable orthonormal frame for a surface normal. The reference up vector
// switches away from +Y near the poles so the cross product never collapses.
pub fn tangent_basis(normal: Point) -> (Point, Point) {
    let up = if normal.y.abs() < 0.9 {
        Point {
            x: 0.0,
            y: 1.0,
            z: 0.0,
        }
    } else {
        Point {
            x: 1.0,
            y: 0.0,
            z: 0.0,
        }
    };
    let tangent = normalize(cross(up, normal));
    let bitangent = normalize(cross(normal, tangent));
    (tangent, bitangent)
}

fn catmull_rom_point(p0: Point, p1: Point, p2: Point, p3: Point, u: f64) -> Point {
    let u2 = u * u;
    let u3 = u2 * u;
    let mut result = scale(p1, 2.0);
    result = add(result, scale(add(scale(p0, -1.0), p2), u));
    result = add(
        result,
        scale(
            add(
                add(scale(p0, 2.0), scale(p1, -5.0)),
                add(scale(p2, 4.0), scale(p3, -1.0)),
            ),
            u2,
        ),
    );
    result = add(
        result,
        scale(
            add(
                add(scale(p0, -1.0), scale(p1, 3.0)),
                add(scale(p2, -3.0), p3),
            ),
            u3,
        ),
    );
    scale(result, 0.5)
}

// Samples a Catmull-Rom spline through `points` at `samples` evenly spaced
// parameters, end points clamped.
pub fn sample_curve(points: &[Point], samples: usize) -> Vec<Point> {
    if points.len() < 2 || samples == 0 {
        return points.to_vec();
    }
    let segment_count = points.len() - 1;
    let mut result = Vec::with_capacity(samples);
    for j in 0..samples {
        let t = if samples > 1 {
            j as f64 / (samples - 1) as f64
        } else {
            0.0
        };
        let scaled = t * segment_count as f64;
        let i = (scaled.floor() as usize).min(segment_count - 1);
        let u = scaled - i as f64;
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(points.len() - 1)];
        result.push(catmull_rom_point(p0, p1, p2, p3, u));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::math::{distance, dot, length};

    #[test]
    fn basis_is_orthonormal() {
        let normal = normalize(Point::new(0.1, 0.95, 0.2));
        let (tangent, bitangent) = tangent_basis(normal);
        assert!((length(tangent) - 1.0).abs() < 1e-9);
        assert!((length(bitangent) - 1.0).abs() < 1e-9);
        assert!(dot(tangent, normal).abs() < 1e-9);
        assert!(dot(bitangent, normal).abs() < 1e-9);
        assert!(dot(tangent, bitangent).abs() < 1e-9);
    }

    #[test]
    fn basis_survives_polar_normal() {
        let (tangent, _) = tangent_basis(Point::new(0.0, 1.0, 0.0));
        assert!((length(tangent) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn curve_passes_through_end_points() {
        let points = vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 2.0, 0.0),
            Point::new(3.0, 1.0, 0.0),
            Point::new(4.0, 4.0, 0.0),
        ];
        let sampled = sample_curve(&points, 31);
        assert_eq!(sampled.len(), 31);
        assert!(distance(sampled[0], points[0]) < 1e-9);
        assert!(distance(sampled[30], points[3]) < 1e-9);
    }

    #[test]
    fn curve_interpolates_interior_control_points() {
        let points = vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 1.0, 0.0),
            Point::new(2.0, 0.0, 0.0),
        ];
        // 5 samples over 2 segments lands sample 2 exactly on the middle point.
        let sampled = sample_curve(&points, 5);
        assert!(distance(sampled[2], points[1]) < 1e-9);
    }
}
