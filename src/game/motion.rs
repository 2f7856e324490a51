use super::config::GameConfig;
use super::constants::{DEGENERATE_EPSILON, SPEED_EPSILON};
use super::geometry::tangent_basis;
use super::input::TickInput;
use super::math::{add, cross, length, normalize, project_to_tangent, rotate_around_axis, scale};
use super::snake::{grown_segment_count, trail_cap, Trail};
use super::types::{Point, SpherePose, VoidPose};

pub const START_NORMAL: Point = Point::new(0.0, 0.0, 1.0);
pub const START_TANGENT: Point = Point::new(1.0, 0.0, 0.0);

#[derive(Debug, Clone)]
pub struct SnakeMotion {
    pub pose: SpherePose,
    pub void_pose: VoidPose,
    pub trail: Trail,
    pub segment_count: usize,
    pub current_speed: f64,
    distance_accumulator: f64,
}

// Re-projects a candidate tangent into the plane orthogonal to `normal`.
// When the candidate is parallel to the normal the projection collapses;
// an arbitrary but deterministic perpendicular is substituted so NaN never
// enters the frame.
pub fn reproject_tangent(candidate: Point, normal: Point) -> Point {
    let projected = project_to_tangent(candidate, normal);
    if length(projected) < DEGENERATE_EPSILON {
        tangent_basis(normal).0
    } else {
        projected
    }
}

// Moves `current` toward `target` by at most one rate step. Gaining speed
// in the direction already travelled uses the acceleration rate; braking
// and reversing use the deceleration rate.
pub fn approach_speed(current: f64, target: f64, accel: f64, decel: f64, dt: f64) -> f64 {
    let delta = target - current;
    if delta == 0.0 {
        return current;
    }
    let braking = current != 0.0
        && (target == 0.0
            || target.signum() != current.signum()
            || target.abs() < current.abs());
    let rate = if braking { decel } else { accel };
    let step = rate * dt;
    if delta.abs() <= step {
        target
    } else {
        current + step * delta.signum()
    }
}

impl SnakeMotion {
    pub fn new(config: &GameConfig) -> Self {
        let normal = START_NORMAL;
        let tangent = reproject_tangent(START_TANGENT, normal);
        Self {
            pose: SpherePose { normal, tangent },
            void_pose: VoidPose {
                position: Point::new(0.0, 0.0, 0.0),
                velocity: START_TANGENT,
                up: START_NORMAL,
            },
            trail: Trail::seeded(normal, config.initial_segments),
            segment_count: config.initial_segments,
            current_speed: 0.0,
            distance_accumulator: 0.0,
        }
    }

    pub fn sphere_head_position(&self, config: &GameConfig) -> Point {
        scale(self.pose.normal, config.snake_radius())
    }

    pub fn grow(&mut self) {
        self.segment_count = grown_segment_count(self.segment_count);
    }

    // Puts the head back on the canonical start pose and re-seeds the trail
    // there. Body length is preserved; used when returning from the void.
    pub fn reset_sphere_pose(&mut self) {
        self.pose = SpherePose {
            normal: START_NORMAL,
            tangent: reproject_tangent(START_TANGENT, START_NORMAL),
        };
        self.trail = Trail::seeded(START_NORMAL, self.segment_count);
        self.distance_accumulator = 0.0;
    }

    pub fn advance_sphere(&mut self, input: TickInput, config: &GameConfig, dt: f64) {
        let target_speed = match input.forward {
            1 => config.move_speed,
            -1 => -config.move_speed * config.reverse_speed_multiplier,
            _ => 0.0,
        };
        self.current_speed = approach_speed(
            self.current_speed,
            target_speed,
            config.acceleration,
            config.deceleration,
            dt,
        );

        if input.steer != 0.0 {
            let mut tangent = self.pose.tangent;
            rotate_around_axis(
                &mut tangent,
                self.pose.normal,
                input.steer * config.steer_speed * dt,
            );
            self.pose.tangent = reproject_tangent(tangent, self.pose.normal);
        }

        if self.current_speed.abs() > SPEED_EPSILON {
            // The travel plane is spanned by the normal and the heading; its
            // normal is the rotation axis for great-circle motion.
            let axis_raw = cross(self.pose.normal, self.pose.tangent);
            let axis = if length(axis_raw) < DEGENERATE_EPSILON {
                tangent_basis(self.pose.normal).1
            } else {
                normalize(axis_raw)
            };
            let angle = self.current_speed / config.sphere_radius * dt;
            rotate_around_axis(&mut self.pose.normal, axis, angle);
            self.pose.normal = normalize(self.pose.normal);
            rotate_around_axis(&mut self.pose.tangent, axis, angle);
            self.pose.tangent = reproject_tangent(self.pose.tangent, self.pose.normal);

            self.distance_accumulator += self.current_speed.abs() * dt;
            let cap = trail_cap(self.segment_count);
            while self.distance_accumulator >= config.segment_spacing {
                self.distance_accumulator -= config.segment_spacing;
                self.trail.record(self.pose.normal, cap);
            }
        }
    }

    pub fn advance_void(&mut self, input: TickInput, config: &GameConfig, dt: f64) {
        // Void travel requires an explicit boost hold; the forward signal is
        // ignored here.
        let target_speed = if input.shift { config.move_speed } else { 0.0 };
        self.current_speed = approach_speed(
            self.current_speed,
            target_speed,
            config.acceleration,
            config.deceleration,
            dt,
        );

        if input.steer != 0.0 {
            let mut velocity = self.void_pose.velocity;
            rotate_around_axis(
                &mut velocity,
                self.void_pose.up,
                input.steer * config.steer_speed * dt,
            );
            self.void_pose.velocity = normalize(velocity);
            self.void_pose.up = reproject_tangent(self.void_pose.up, self.void_pose.velocity);
        }

        if input.vertical != 0 {
            let right_raw = cross(self.void_pose.velocity, self.void_pose.up);
            let right = if length(right_raw) < DEGENERATE_EPSILON {
                tangent_basis(self.void_pose.velocity).0
            } else {
                normalize(right_raw)
            };
            let angle = input.vertical as f64 * config.pitch_speed * dt;
            rotate_around_axis(&mut self.void_pose.velocity, right, angle);
            self.void_pose.velocity = normalize(self.void_pose.velocity);
            rotate_around_axis(&mut self.void_pose.up, right, angle);
            self.void_pose.up = reproject_tangent(self.void_pose.up, self.void_pose.velocity);
        }

        if self.current_speed > SPEED_EPSILON {
            let step = scale(self.void_pose.velocity, self.current_speed * dt);
            self.void_pose.position = add(self.void_pose.position, step);

            self.distance_accumulator += self.current_speed * dt;
            let cap = trail_cap(self.segment_count);
            while self.distance_accumulator >= config.segment_spacing {
                self.distance_accumulator -= config.segment_spacing;
                self.trail.record(self.void_pose.position, cap);
            }
        }
    }

    // Hands the sphere pose over to the void frame: position projected
    // forward along the heading, travel direction preserved.
    pub fn enter_void(&mut self, config: &GameConfig) {
        let head = self.sphere_head_position(config);
        let velocity = self.pose.tangent;
        let position = add(head, scale(velocity, config.segment_spacing * 2.0));
        self.void_pose = VoidPose {
            position,
            velocity,
            up: self.pose.normal,
        };
        self.trail = Trail::seeded_behind(
            position,
            velocity,
            config.segment_spacing,
            self.segment_count,
        );
        self.distance_accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::Difficulty;
    use crate::game::math::{angular_distance, dot};

    fn test_config() -> GameConfig {
        GameConfig::for_difficulty(Difficulty::Medium)
    }

    fn frame_is_orthonormal(pose: &SpherePose) -> bool {
        (length(pose.normal) - 1.0).abs() < 1e-6
            && (length(pose.tangent) - 1.0).abs() < 1e-6
            && dot(pose.normal, pose.tangent).abs() < 1e-6
    }

    #[test]
    fn straight_travel_follows_the_great_circle() {
        let config = test_config();
        let mut motion = SnakeMotion::new(&config);
        motion.current_speed = config.move_speed;
        let start = motion.pose.normal;
        for _ in 0..10 {
            motion.advance_sphere(TickInput::forward_held(), &config, 0.1);
        }
        // moveSpeed / sphereRadius * elapsed = 200 / 800 * 1.0
        let expected = config.move_speed / config.sphere_radius;
        assert!((angular_distance(start, motion.pose.normal) - expected).abs() < 1e-6);
        // Motion stays in the plane of the initial tangent: y never moves.
        assert!(motion.pose.normal.y.abs() < 1e-9);
    }

    #[test]
    fn frame_stays_orthonormal_under_arbitrary_steering() {
        let config = test_config();
        let mut motion = SnakeMotion::new(&config);
        let steers = [1.0, -0.4, 0.9, -1.0, 0.2, 0.0, -0.8, 1.0];
        for (i, steer) in steers.iter().cycle().take(400).enumerate() {
            let input = TickInput {
                steer: *steer,
                forward: if i % 7 == 0 { -1 } else { 1 },
                vertical: 0,
                shift: false,
            };
            motion.advance_sphere(input, &config, 0.016 + (i % 3) as f64 * 0.005);
            assert!(frame_is_orthonormal(&motion.pose));
        }
    }

    #[test]
    fn speed_never_exceeds_limits_and_changes_are_rate_bound() {
        let config = test_config();
        let mut motion = SnakeMotion::new(&config);
        let dt = 0.016;
        let mut previous = motion.current_speed;
        for i in 0..600 {
            let forward = match i % 3 {
                0 => 1,
                1 => -1,
                _ => 0,
            };
            let input = TickInput {
                forward,
                ..TickInput::default()
            };
            motion.advance_sphere(input, &config, dt);
            assert!(motion.current_speed.abs() <= config.max_speed() + 1e-9);
            let max_step = config.acceleration.max(config.deceleration) * dt;
            assert!((motion.current_speed - previous).abs() <= max_step + 1e-9);
            previous = motion.current_speed;
        }
    }

    #[test]
    fn deadband_keeps_the_head_at_rest() {
        let config = test_config();
        let mut motion = SnakeMotion::new(&config);
        motion.current_speed = SPEED_EPSILON / 2.0;
        let before = motion.pose.normal;
        let input = TickInput::default();
        motion.advance_sphere(input, &config, 0.016);
        assert!(angular_distance(before, motion.pose.normal) < 1e-12);
    }

    #[test]
    fn trail_is_recorded_per_segment_spacing_even_on_large_ticks() {
        let config = test_config();
        let mut motion = SnakeMotion::new(&config);
        motion.segment_count = 20;
        motion.current_speed = config.move_speed;
        let before = motion.trail.len();
        // One clamped-size tick worth of travel below the spacing threshold
        // records nothing.
        motion.advance_sphere(TickInput::forward_held(), &config, 0.016);
        assert_eq!(motion.trail.len(), before);
        // A large step crossing the threshold several times records several
        // entries at once.
        for _ in 0..40 {
            motion.advance_sphere(TickInput::forward_held(), &config, 0.033);
        }
        assert!(motion.trail.len() > before);
        assert!(motion.trail.len() <= trail_cap(motion.segment_count));
    }

    #[test]
    fn reverse_input_moves_backward_along_the_heading() {
        let config = test_config();
        let mut motion = SnakeMotion::new(&config);
        let input = TickInput {
            forward: -1,
            ..TickInput::default()
        };
        for _ in 0..60 {
            motion.advance_sphere(input, &config, 0.033);
        }
        assert!(motion.current_speed < 0.0);
        // Started at +Z heading +X; reversing swings the normal toward -X.
        assert!(motion.pose.normal.x < 0.0);
    }

    #[test]
    fn void_travel_requires_the_boost_signal() {
        let config = test_config();
        let mut motion = SnakeMotion::new(&config);
        motion.enter_void(&config);
        let start = motion.void_pose.position;
        let coasting = TickInput {
            forward: 1,
            ..TickInput::default()
        };
        for _ in 0..30 {
            motion.advance_void(coasting, &config, 0.033);
        }
        assert!(crate::game::math::distance(start, motion.void_pose.position) < 1e-9);

        let boosting = TickInput {
            shift: true,
            ..TickInput::default()
        };
        for _ in 0..30 {
            motion.advance_void(boosting, &config, 0.033);
        }
        assert!(crate::game::math::distance(start, motion.void_pose.position) > 1.0);
    }

    #[test]
    fn void_pitch_keeps_the_frame_orthonormal() {
        let config = test_config();
        let mut motion = SnakeMotion::new(&config);
        motion.enter_void(&config);
        let input = TickInput {
            steer: 0.6,
            vertical: 1,
            shift: true,
            ..TickInput::default()
        };
        for _ in 0..200 {
            motion.advance_void(input, &config, 0.02);
            assert!((length(motion.void_pose.velocity) - 1.0).abs() < 1e-6);
            assert!((length(motion.void_pose.up) - 1.0).abs() < 1e-6);
            assert!(dot(motion.void_pose.velocity, motion.void_pose.up).abs() < 1e-6);
        }
    }

    #[test]
    fn entering_the_void_preserves_the_heading() {
        let config = test_config();
        let mut motion = SnakeMotion::new(&config);
        motion.current_speed = config.move_speed;
        for _ in 0..20 {
            let input = TickInput {
                steer: 0.5,
                forward: 1,
                ..TickInput::default()
            };
            motion.advance_sphere(input, &config, 0.033);
        }
        let heading = motion.pose.tangent;
        motion.enter_void(&config);
        assert!(crate::game::math::distance(motion.void_pose.velocity, heading) < 1e-12);
        // Every seeded trail entry sits behind the entry point.
        for point in motion.trail.iter() {
            let offset = crate::game::math::sub(*point, motion.void_pose.position);
            assert!(dot(offset, heading) < 0.0);
        }
    }

    #[test]
    fn approach_speed_brakes_with_the_deceleration_rate() {
        let next = approach_speed(200.0, 0.0, 300.0, 250.0, 0.1);
        assert!((next - 175.0).abs() < 1e-12);
        let next = approach_speed(0.0, 200.0, 300.0, 250.0, 0.1);
        assert!((next - 30.0).abs() < 1e-12);
        let next = approach_speed(10.0, -100.0, 300.0, 250.0, 0.1);
        assert!((next - (-15.0)).abs() < 1e-12);
    }
}
