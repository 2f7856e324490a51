use super::constants::{DOT_PLACEMENT_ATTEMPTS, DOT_SPAWN_EXCLUSION_DOT};
use super::math::{dot, random_unit_vector};
use super::types::Point;
use rand::Rng;

#[derive(Debug, Clone)]
pub struct Dot {
  pub normal: Point,
  pub visible: bool,
}

// Rejection-samples a spawn normal outside the exclusion cone around
// `avoid`. Attempts are bounded so placement always terminates; on
// exhaustion the last sample is accepted even if it lands in the cone.
pub fn place_dot(rng: &mut impl Rng, avoid: Point) -> Point {
  for _ in 0..DOT_PLACEMENT_ATTEMPTS {
    let candidate = random_unit_vector(rng);
    if dot(candidate, avoid) < DOT_SPAWN_EXCLUSION_DOT {
      return candidate;
    }
  }
  random_unit_vector(rng)
}

pub fn create_dots(rng: &mut impl Rng, count: usize, head_normal: Point) -> Vec<Dot> {
  let mut dots = Vec::with_capacity(count);
  for _ in 0..count {
    dots.push(Dot {
      normal: place_dot(rng, head_normal),
      visible: true,
    });
  }
  dots
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::game::math::length;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  #[test]
  fn placement_avoids_the_head_cone() {
    let mut rng = StdRng::seed_from_u64(11);
    let head = Point::new(0.0, 0.0, 1.0);
    for _ in 0..500 {
      let placed = place_dot(&mut rng, head);
      assert!(dot(placed, head) < DOT_SPAWN_EXCLUSION_DOT);
      assert!((length(placed) - 1.0).abs() < 1e-12);
    }
  }

  #[test]
  fn initial_dots_are_all_visible_and_clear_of_the_head() {
    let mut rng = StdRng::seed_from_u64(3);
    let head = Point::new(0.0, 1.0, 0.0);
    let dots = create_dots(&mut rng, 35, head);
    assert_eq!(dots.len(), 35);
    for placed in &dots {
      assert!(placed.visible);
      assert!(dot(placed.normal, head) < DOT_SPAWN_EXCLUSION_DOT);
    }
  }
}
