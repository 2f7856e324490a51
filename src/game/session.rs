use super::barriers::{generate_barriers, Barrier};
use super::collision;
use super::config::GameConfig;
use super::constants::{DOT_RESPAWN_DELAY, MAX_DT};
use super::dots::{create_dots, place_dot, Dot};
use super::input::TickInput;
use super::math::scale;
use super::motion::{SnakeMotion, START_NORMAL};
use super::types::{
  BarrierSnapshot, DotSnapshot, GameOverCause, HeadPose, HudSnapshot, Phase, Point,
  PortalSnapshot, RenderSnapshot, WorldMode,
};
use super::world::WorldState;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy)]
enum EventKind {
  RespawnDot(usize),
}

#[derive(Debug, Clone, Copy)]
struct ScheduledEvent {
  due: f64,
  kind: EventKind,
}

// One game session owns every piece of mutable state. Restart rebuilds the
// whole thing, which also cancels any scheduled event: nothing outlives the
// session that queued it.
#[derive(Debug)]
pub struct GameSession {
  config: GameConfig,
  rng: StdRng,
  phase: Phase,
  world: WorldState,
  motion: SnakeMotion,
  dots: Vec<Dot>,
  barriers: Vec<Barrier>,
  score: u64,
  elapsed: f64,
  events: Vec<ScheduledEvent>,
}

impl GameSession {
  pub fn new(config: GameConfig) -> Self {
    Self::with_seed(config, rand::thread_rng().gen())
  }

  pub fn with_seed(config: GameConfig, seed: u64) -> Self {
    let mut rng = StdRng::seed_from_u64(seed);
    let world = WorldState::new(&mut rng, &config);
    let motion = SnakeMotion::new(&config);
    let dots = create_dots(&mut rng, config.dot_count, motion.pose.normal);
    let barriers = generate_barriers(&mut rng, &config);
    Self {
      config,
      rng,
      phase: Phase::Running,
      world,
      motion,
      dots,
      barriers,
      score: 0,
      elapsed: 0.0,
      events: Vec::new(),
    }
  }

  pub fn tick(&mut self, input: TickInput, dt: f64) {
    if self.phase != Phase::Running {
      return;
    }
    if !dt.is_finite() || dt <= 0.0 {
      return;
    }
    let dt = dt.min(MAX_DT);
    let input = input.sanitized();

    self.elapsed += dt;
    self.drain_due_events();
    self.world.tick_timers(dt);

    match self.world.mode {
      WorldMode::Sphere => {
        self.motion.advance_sphere(input, &self.config, dt);
        let head = self.motion.sphere_head_position(&self.config);

        let eaten = collision::check_pickups(head, &mut self.dots, &self.config);
        for index in eaten {
          self.score += 1;
          self.motion.grow();
          self.events.push(ScheduledEvent {
            due: self.elapsed + DOT_RESPAWN_DELAY,
            kind: EventKind::RespawnDot(index),
          });
          tracing::debug!(index, score = self.score, "dot eaten");
        }

        if collision::check_barriers(head, &self.barriers) {
          self.finish(GameOverCause::Barrier);
          return;
        }
        if collision::check_self(head, &self.motion.trail, self.motion.segment_count, &self.config)
        {
          self.finish(GameOverCause::SelfHit);
          return;
        }

        if let Some(mode) =
          self
            .world
            .try_transition(&mut self.motion, head, self.score, &self.config)
        {
          tracing::debug!(?mode, "world transition");
        }
      }
      WorldMode::Void => {
        self.motion.advance_void(input, &self.config, dt);
        let head = self.motion.void_pose.position;
        if let Some(mode) =
          self
            .world
            .try_transition(&mut self.motion, head, self.score, &self.config)
        {
          tracing::debug!(?mode, "world transition");
        }
      }
    }
  }

  pub fn toggle_pause(&mut self) {
    self.phase = match self.phase {
      Phase::Running => Phase::Paused,
      Phase::Paused => Phase::Running,
      Phase::GameOver(cause) => Phase::GameOver(cause),
    };
  }

  pub fn restart(&mut self) {
    let config = self.config.clone();
    self.world = WorldState::new(&mut self.rng, &config);
    self.motion = SnakeMotion::new(&config);
    self.dots = create_dots(&mut self.rng, config.dot_count, self.motion.pose.normal);
    self.barriers = generate_barriers(&mut self.rng, &config);
    self.score = 0;
    self.elapsed = 0.0;
    self.events.clear();
    self.phase = Phase::Running;
    tracing::debug!("session restarted");
  }

  fn finish(&mut self, cause: GameOverCause) {
    self.phase = Phase::GameOver(cause);
    tracing::debug!(?cause, "game over");
  }

  fn drain_due_events(&mut self) {
    let elapsed = self.elapsed;
    let mut due = Vec::new();
    self.events.retain(|event| {
      if event.due <= elapsed {
        due.push(event.kind);
        false
      } else {
        true
      }
    });
    for kind in due {
      match kind {
        EventKind::RespawnDot(index) => self.respawn_dot(index),
      }
    }
  }

  fn respawn_dot(&mut self, index: usize) {
    let avoid = match self.world.mode {
      WorldMode::Sphere => self.motion.pose.normal,
      WorldMode::Void => START_NORMAL,
    };
    if let Some(dot) = self.dots.get_mut(index) {
      dot.normal = place_dot(&mut self.rng, avoid);
      dot.visible = true;
      tracing::debug!(index, "dot respawned");
    }
  }

  // Uniform pose view regardless of the active world, so collaborators do
  // not branch on the mode.
  pub fn head_pose(&self) -> HeadPose {
    match self.world.mode {
      WorldMode::Sphere => HeadPose {
        position: self.motion.sphere_head_position(&self.config),
        forward: self.motion.pose.tangent,
        up: self.motion.pose.normal,
      },
      WorldMode::Void => HeadPose {
        position: self.motion.void_pose.position,
        forward: self.motion.void_pose.velocity,
        up: self.motion.void_pose.up,
      },
    }
  }

  pub fn phase(&self) -> Phase {
    self.phase
  }

  pub fn score(&self) -> u64 {
    self.score
  }

  pub fn world_mode(&self) -> WorldMode {
    self.world.mode
  }

  pub fn config(&self) -> &GameConfig {
    &self.config
  }

  fn trail_positions(&self) -> Vec<Point> {
    match self.world.mode {
      WorldMode::Sphere => self
        .motion
        .trail
        .iter()
        .map(|normal| scale(*normal, self.config.snake_radius()))
        .collect(),
      WorldMode::Void => self.motion.trail.iter().copied().collect(),
    }
  }

  fn game_over_cause(&self) -> Option<GameOverCause> {
    match self.phase {
      Phase::GameOver(cause) => Some(cause),
      _ => None,
    }
  }

  pub fn render_snapshot(&self) -> RenderSnapshot {
    let unlocked = self.world.portal_unlocked(self.score, &self.config);
    let mut portals = vec![PortalSnapshot {
      position: self.world.sphere_portal.position,
      facing: self.world.sphere_portal.facing,
      destination: self.world.sphere_portal.destination,
      unlocked,
    }];
    if let Some(portal) = &self.world.void_portal {
      portals.push(PortalSnapshot {
        position: portal.position,
        facing: portal.facing,
        destination: portal.destination,
        unlocked: true,
      });
    }

    RenderSnapshot {
      world: self.world.mode,
      head: self.head_pose(),
      trail: self.trail_positions(),
      dots: self
        .dots
        .iter()
        .map(|dot| DotSnapshot {
          position: scale(dot.normal, self.config.dot_surface_radius()),
          visible: dot.visible,
        })
        .collect(),
      barriers: self
        .barriers
        .iter()
        .map(|barrier| match barrier {
          Barrier::Point { center, radius } => BarrierSnapshot::Point {
            center: *center,
            radius: *radius,
          },
          Barrier::Wall {
            path, tube_radius, ..
          } => BarrierSnapshot::Wall {
            points: path.clone(),
            tube_radius: *tube_radius,
          },
        })
        .collect(),
      portals,
      visibility: self.world.visibility(),
      paused: self.phase == Phase::Paused,
      game_over: self.game_over_cause(),
      transitioning: self.world.transitioning(),
    }
  }

  pub fn hud_snapshot(&self) -> HudSnapshot {
    HudSnapshot {
      score: self.score,
      paused: self.phase == Phase::Paused,
      game_over: self.game_over_cause(),
      portal_unlocked: self.world.portal_unlocked(self.score, &self.config),
    }
  }
}
