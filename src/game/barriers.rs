use super::config::GameConfig;
use super::geometry::sample_curve;
use super::math::{
  add, angular_distance, cross, distance, length, normalize, random_unit_vector, scale,
};
use super::motion::reproject_tangent;
use super::motion::START_NORMAL;
use super::types::Point;
use rand::Rng;

pub const WALL_STEPS_MIN: usize = 15;
pub const WALL_STEPS_EXTRA: usize = 25;
pub const WALL_STEP_SIZE: f64 = 8.0;
pub const WALLS_PER_BARRIER: usize = 3;
pub const PLACEMENT_ATTEMPTS: usize = 20;
// Barriers keep at least this angle from the snake start so a fresh session
// never begins inside a wall.
pub const MIN_START_ANGLE: f64 = std::f64::consts::PI / 3.0;
pub const CURVE_SAMPLES: usize = 31;

#[derive(Debug, Clone)]
pub enum Barrier {
  Point {
    center: Point,
    radius: f64,
  },
  Wall {
    path: Vec<Point>,
    samples: Vec<Point>,
    tube_radius: f64,
  },
}

impl Barrier {
  // Minimum distance from a head position to the barrier surface threshold.
  // Walls take the closest of their precomputed curve samples.
  pub fn hits(&self, position: Point, margin: f64) -> bool {
    match self {
      Barrier::Point { center, radius } => distance(position, *center) < radius + margin,
      Barrier::Wall {
        samples,
        tube_radius,
        ..
      } => samples
        .iter()
        .any(|sample| distance(position, *sample) < tube_radius + margin),
    }
  }
}

// Walks a winding path over the sphere surface: each step bends the tangent
// by a smooth curvature term, moves one small arc step, and re-projects the
// tangent onto the new tangent plane. Returns world-space path points and
// the start normal used for placement constraints.
fn wind_wall_path(rng: &mut impl Rng, sphere_radius: f64) -> (Vec<Point>, Point) {
  let mut normal = random_unit_vector(rng);
  let start = normal;

  let up = Point::new(0.0, 1.0, 0.0);
  let mut tangent_raw = cross(normal, up);
  if length(tangent_raw) < 0.1 {
    tangent_raw = cross(normal, Point::new(1.0, 0.0, 0.0));
  }
  let mut tangent = normalize(tangent_raw);

  let steps = WALL_STEPS_MIN + rng.gen_range(0..WALL_STEPS_EXTRA);
  let mut path = Vec::with_capacity(steps);
  for i in 0..steps {
    path.push(scale(normal, sphere_radius));

    let curve_factor = (i as f64 * 0.3).sin() * 0.3 + (i as f64 * 0.2).cos() * 0.2;
    let side = cross(normal, tangent);
    let move_direction = normalize(add(tangent, scale(side, curve_factor)));

    normal = normalize(add(normal, scale(move_direction, WALL_STEP_SIZE / sphere_radius)));
    tangent = reproject_tangent(tangent, normal);
  }

  (path, start)
}

fn place_clear_of_start(rng: &mut impl Rng) -> Point {
  for _ in 0..PLACEMENT_ATTEMPTS {
    let candidate = random_unit_vector(rng);
    if angular_distance(candidate, START_NORMAL) >= MIN_START_ANGLE {
      return candidate;
    }
  }
  random_unit_vector(rng)
}

pub fn generate_barriers(rng: &mut impl Rng, config: &GameConfig) -> Vec<Barrier> {
  let wall_count = config.barrier_count * WALLS_PER_BARRIER;
  let tube_radius = config.barrier_height / 2.0;
  let mut barriers = Vec::with_capacity(wall_count + config.barrier_count);

  for _ in 0..wall_count {
    let mut attempts = 0;
    let path = loop {
      let (path, start) = wind_wall_path(rng, config.sphere_radius);
      attempts += 1;
      if angular_distance(start, START_NORMAL) >= MIN_START_ANGLE
        || attempts > PLACEMENT_ATTEMPTS
      {
        break path;
      }
    };
    let samples = sample_curve(&path, CURVE_SAMPLES);
    barriers.push(Barrier::Wall {
      path,
      samples,
      tube_radius,
    });
  }

  for _ in 0..config.barrier_count {
    let normal = place_clear_of_start(rng);
    barriers.push(Barrier::Point {
      center: scale(normal, config.sphere_radius + config.barrier_lift),
      radius: config.barrier_radius,
    });
  }

  barriers
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::game::config::Difficulty;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  #[test]
  fn wall_paths_stay_on_the_sphere_surface() {
    let mut rng = StdRng::seed_from_u64(5);
    let (path, _) = wind_wall_path(&mut rng, 800.0);
    assert!(path.len() >= WALL_STEPS_MIN);
    assert!(path.len() < WALL_STEPS_MIN + WALL_STEPS_EXTRA);
    for point in &path {
      assert!((length(*point) - 800.0).abs() < 1e-6);
    }
  }

  #[test]
  fn generated_walls_start_away_from_the_snake_start() {
    let mut rng = StdRng::seed_from_u64(9);
    let config = GameConfig::for_difficulty(Difficulty::Medium);
    let barriers = generate_barriers(&mut rng, &config);
    let wall_count = config.barrier_count * WALLS_PER_BARRIER;
    assert_eq!(barriers.len(), wall_count + config.barrier_count);

    for barrier in &barriers {
      match barrier {
        Barrier::Wall {
          path,
          samples,
          tube_radius,
        } => {
          assert_eq!(samples.len(), CURVE_SAMPLES);
          assert_eq!(*tube_radius, config.barrier_height / 2.0);
          let start = normalize(path[0]);
          assert!(angular_distance(start, START_NORMAL) >= MIN_START_ANGLE);
        }
        Barrier::Point { center, radius } => {
          assert_eq!(*radius, config.barrier_radius);
          let normal = normalize(*center);
          assert!(angular_distance(normal, START_NORMAL) >= MIN_START_ANGLE);
        }
      }
    }
  }

  #[test]
  fn point_barrier_hit_test_uses_combined_radius() {
    let barrier = Barrier::Point {
      center: Point::new(100.0, 0.0, 0.0),
      radius: 6.0,
    };
    assert!(barrier.hits(Point::new(108.0, 0.0, 0.0), 4.0));
    assert!(!barrier.hits(Point::new(112.0, 0.0, 0.0), 4.0));
  }

  #[test]
  fn wall_hit_test_takes_the_nearest_sample() {
    let path = vec![
      Point::new(0.0, 0.0, 0.0),
      Point::new(10.0, 0.0, 0.0),
      Point::new(20.0, 0.0, 0.0),
    ];
    let samples = sample_curve(&path, CURVE_SAMPLES);
    let barrier = Barrier::Wall {
      path,
      samples,
      tube_radius: 5.0,
    };
    assert!(barrier.hits(Point::new(10.0, 6.0, 0.0), 2.0));
    assert!(!barrier.hits(Point::new(10.0, 6.0, 0.0), 0.0));
    assert!(!barrier.hits(Point::new(10.0, 30.0, 0.0), 2.0));
  }
}
