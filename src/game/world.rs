use super::config::GameConfig;
use super::constants::{PORTAL_COOLDOWN, TRANSITION_DURATION};
use super::math::{add, angular_distance, distance, random_unit_vector, scale};
use super::motion::{SnakeMotion, START_NORMAL};
use super::types::{EntityVisibility, Point, WorldMode};
use rand::Rng;

#[derive(Debug, Clone)]
pub struct Portal {
  pub position: Point,
  pub facing: Point,
  pub destination: WorldMode,
}

// Two-state world machine. The sphere portal is fixed for the whole
// session; the void return portal exists only while in the void.
#[derive(Debug, Clone)]
pub struct WorldState {
  pub mode: WorldMode,
  pub sphere_portal: Portal,
  pub void_portal: Option<Portal>,
  cooldown: f64,
  transition_timer: f64,
}

fn place_portal_normal(rng: &mut impl Rng) -> Point {
  for _ in 0..super::barriers::PLACEMENT_ATTEMPTS {
    let candidate = random_unit_vector(rng);
    if angular_distance(candidate, START_NORMAL) >= super::barriers::MIN_START_ANGLE {
      return candidate;
    }
  }
  random_unit_vector(rng)
}

impl WorldState {
  pub fn new(rng: &mut impl Rng, config: &GameConfig) -> Self {
    let normal = place_portal_normal(rng);
    Self {
      mode: WorldMode::Sphere,
      sphere_portal: Portal {
        position: scale(normal, config.sphere_radius + config.portal_lift),
        facing: normal,
        destination: WorldMode::Void,
      },
      void_portal: None,
      cooldown: 0.0,
      transition_timer: 0.0,
    }
  }

  pub fn tick_timers(&mut self, dt: f64) {
    if self.cooldown > 0.0 {
      self.cooldown = (self.cooldown - dt).max(0.0);
    }
    if self.transition_timer > 0.0 {
      self.transition_timer = (self.transition_timer - dt).max(0.0);
    }
  }

  pub fn transitioning(&self) -> bool {
    self.transition_timer > 0.0
  }

  pub fn portal_unlocked(&self, score: u64, config: &GameConfig) -> bool {
    score >= config.portal_unlock_threshold
  }

  // Checks the portal trigger for the current mode and performs the swap.
  // The cooldown suppresses re-triggering right after a transition, and the
  // sphere portal stays inert until the unlock score is reached.
  pub fn try_transition(
    &mut self,
    motion: &mut SnakeMotion,
    head_position: Point,
    score: u64,
    config: &GameConfig,
  ) -> Option<WorldMode> {
    if self.cooldown > 0.0 {
      return None;
    }
    match self.mode {
      WorldMode::Sphere => {
        if !self.portal_unlocked(score, config) {
          return None;
        }
        if distance(head_position, self.sphere_portal.position) >= config.portal_trigger_distance
        {
          return None;
        }
        motion.enter_void(config);
        let entry = motion.void_pose;
        self.void_portal = Some(Portal {
          position: add(entry.position, scale(entry.velocity, config.void_portal_distance)),
          facing: scale(entry.velocity, -1.0),
          destination: WorldMode::Sphere,
        });
        self.mode = WorldMode::Void;
        self.cooldown = PORTAL_COOLDOWN;
        self.transition_timer = TRANSITION_DURATION;
        Some(self.mode)
      }
      WorldMode::Void => {
        let portal = self.void_portal.as_ref()?;
        if distance(head_position, portal.position) >= config.portal_trigger_distance {
          return None;
        }
        motion.reset_sphere_pose();
        self.void_portal = None;
        self.mode = WorldMode::Sphere;
        self.cooldown = PORTAL_COOLDOWN;
        self.transition_timer = TRANSITION_DURATION;
        Some(self.mode)
      }
    }
  }

  pub fn visibility(&self) -> EntityVisibility {
    match self.mode {
      WorldMode::Sphere => EntityVisibility {
        dots: true,
        barriers: true,
        stars: true,
        portal: true,
      },
      WorldMode::Void => EntityVisibility {
        dots: false,
        barriers: false,
        stars: true,
        portal: self.void_portal.is_some(),
      },
    }
  }
}
