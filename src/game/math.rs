use super::types::Point;
use rand::Rng;
use std::f64::consts::PI;

pub fn length(point: Point) -> f64 {
  (point.x * point.x + point.y * point.y + point.z * point.z).sqrt()
}

pub fn normalize(point: Point) -> Point {
  let len = length(point);
  if !len.is_finite() || len == 0.0 {
    return Point { x: 0.0, y: 0.0, z: 0.0 };
  }
  Point {
    x: point.x / len,
    y: point.y / len,
    z: point.z / len,
  }
}

pub fn dot(a: Point, b: Point) -> f64 {
  a.x * b.x + a.y * b.y + a.z * b.z
}

pub fn cross(a: Point, b: Point) -> Point {
  Point {
    x: a.y * b.z - a.z * b.y,
    y: a.z * b.x - a.x * b.z,
    z: a.x * b.y - a.y * b.x,
  }
}

pub fn add(a: Point, b: Point) -> Point {
  Point {
    x: a.x + b.x,
    y: a.y + b.y,
    z: a.z + b.z,
  }
}

pub fn sub(a: Point, b: Point) -> Point {
  Point {
    x: a.x - b.x,
    y: a.y - b.y,
    z: a.z - b.z,
  }
}

pub fn scale(point: Point, factor: f64) -> Point {
  Point {
    x: point.x * factor,
    y: point.y * factor,
    z: point.z * factor,
  }
}

pub fn distance(a: Point, b: Point) -> f64 {
  length(sub(a, b))
}

pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
  value.min(max).max(min)
}

pub fn angular_distance(a: Point, b: Point) -> f64 {
  clamp(dot(a, b), -1.0, 1.0).acos()
}

pub fn rotate_around_axis(point: &mut Point, axis: Point, angle: f64) {
  let u = normalize(axis);
  let cos_a = angle.cos();
  let sin_a = angle.sin();
  let ux = u.x;
  let uy = u.y;
  let uz = u.z;
  let x = point.x;
  let y = point.y;
  let z = point.z;
  let dot_prod = ux * x + uy * y + uz * z;

  point.x = x * cos_a + (uy * z - uz * y) * sin_a + ux * dot_prod * (1.0 - cos_a);
  point.y = y * cos_a + (uz * x - ux * z) * sin_a + uy * dot_prod * (1.0 - cos_a);
  point.z = z * cos_a + (ux * y - uy * x) * sin_a + uz * dot_prod * (1.0 - cos_a);
}

// Removes the component of `v` along `normal` and renormalizes. Returns the
// zero vector when `v` is parallel to `normal`; callers substitute a
// fallback basis in that case.
pub fn project_to_tangent(v: Point, normal: Point) -> Point {
  let inward = dot(v, normal);
  let projected = Point {
    x: v.x - normal.x * inward,
    y: v.y - normal.y * inward,
    z: v.z - normal.z * inward,
  };
  normalize(projected)
}

// Uniform over the sphere: inverse-CDF on the polar angle, uniform azimuth.
// Sampling each axis independently would cluster points at the poles.
pub fn random_unit_vector(rng: &mut impl Rng) -> Point {
  let u: f64 = rng.gen();
  let v: f64 = rng.gen();
  let theta = 2.0 * PI * u;
  let phi = (2.0 * v - 1.0).acos();
  let sin_phi = phi.sin();
  Point {
    x: sin_phi * theta.cos(),
    y: phi.cos(),
    z: sin_phi * theta.sin(),
  }
}
