use super::barriers::Barrier;
use super::config::GameConfig;
use super::constants::{NECK_EXCLUSION, SELF_TEST_GROWTH_MARGIN};
use super::dots::Dot;
use super::math::{distance, scale};
use super::snake::Trail;
use super::types::Point;

// Forgiveness applied on top of barrier radii so grazing passes do not end
// the game.
pub const BARRIER_MARGIN: f64 = 4.0;

// Marks every visible dot within eat range as eaten and returns its index.
// Growth, scoring and respawn scheduling stay with the session.
pub fn check_pickups(head_position: Point, dots: &mut [Dot], config: &GameConfig) -> Vec<usize> {
    let mut eaten = Vec::new();
    for (index, dot) in dots.iter_mut().enumerate() {
        if !dot.visible {
            continue;
        }
        let position = scale(dot.normal, config.dot_surface_radius());
        if distance(head_position, position) < config.eat_distance {
            dot.visible = false;
            eaten.push(index);
        }
    }
    eaten
}

// First hit wins; remaining barriers are not evaluated.
pub fn check_barriers(head_position: Point, barriers: &[Barrier]) -> bool {
    barriers
        .iter()
        .any(|barrier| barrier.hits(head_position, BARRIER_MARGIN))
}

// The test is armed only once the body has outgrown its starting length,
// and the entries nearest the head are excluded outright.
pub fn check_self(
    head_position: Point,
    trail: &Trail,
    segment_count: usize,
    config: &GameConfig,
) -> bool {
    if segment_count <= config.initial_segments + SELF_TEST_GROWTH_MARGIN {
        return false;
    }
    trail.iter().skip(NECK_EXCLUSION).any(|normal| {
        let position = scale(*normal, config.snake_radius());
        distance(head_position, position) < config.self_collision_radius
    })
}
