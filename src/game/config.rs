use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
  Easy,
  Medium,
  Hard,
}

impl Difficulty {
  pub fn from_name(name: &str) -> Option<Self> {
    match name.to_ascii_lowercase().as_str() {
      "easy" => Some(Self::Easy),
      "medium" => Some(Self::Medium),
      "hard" => Some(Self::Hard),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, Copy)]
pub struct DifficultySettings {
  pub speed_multiplier: f64,
  pub barrier_count: usize,
  pub barrier_radius: f64,
  pub barrier_height: f64,
  pub portal_unlock_threshold: u64,
}

pub fn difficulty_settings(difficulty: Difficulty) -> DifficultySettings {
  match difficulty {
    Difficulty::Easy => DifficultySettings {
      speed_multiplier: 0.75,
      barrier_count: 8,
      barrier_radius: 5.0,
      barrier_height: 12.0,
      portal_unlock_threshold: 8,
    },
    Difficulty::Medium => DifficultySettings {
      speed_multiplier: 1.0,
      barrier_count: 12,
      barrier_radius: 6.0,
      barrier_height: 15.0,
      portal_unlock_threshold: 10,
    },
    Difficulty::Hard => DifficultySettings {
      speed_multiplier: 1.25,
      barrier_count: 16,
      barrier_radius: 7.0,
      barrier_height: 18.0,
      portal_unlock_threshold: 12,
    },
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
  pub sphere_radius: f64,
  pub move_speed: f64,
  pub steer_speed: f64,
  pub segment_spacing: f64,
  pub initial_segments: usize,
  pub dot_count: usize,
  pub dot_radius: f64,
  pub eat_distance: f64,
  pub snake_lift: f64,
  pub dot_lift: f64,
  pub barrier_count: usize,
  pub barrier_radius: f64,
  pub barrier_height: f64,
  pub barrier_lift: f64,
  pub acceleration: f64,
  pub deceleration: f64,
  pub reverse_speed_multiplier: f64,
  pub self_collision_radius: f64,
  pub portal_unlock_threshold: u64,
  pub portal_trigger_distance: f64,
  pub portal_lift: f64,
  pub pitch_speed: f64,
  pub void_portal_distance: f64,
}

impl GameConfig {
  pub fn for_difficulty(difficulty: Difficulty) -> Self {
    let settings = difficulty_settings(difficulty);
    let base_speed = 200.0;
    Self {
      sphere_radius: 800.0,
      move_speed: base_speed * settings.speed_multiplier,
      steer_speed: 1.9,
      segment_spacing: 18.0,
      initial_segments: 5,
      dot_count: 35,
      dot_radius: 4.4,
      eat_distance: 13.0,
      snake_lift: 7.0,
      dot_lift: 3.6,
      barrier_count: settings.barrier_count,
      barrier_radius: settings.barrier_radius,
      barrier_height: settings.barrier_height,
      barrier_lift: 3.6,
      acceleration: 300.0,
      deceleration: 250.0,
      reverse_speed_multiplier: 0.5,
      self_collision_radius: 10.0,
      portal_unlock_threshold: settings.portal_unlock_threshold,
      portal_trigger_distance: 55.0,
      portal_lift: 40.0,
      pitch_speed: 1.2,
      void_portal_distance: 2500.0,
    }
  }

  pub fn snake_radius(&self) -> f64 {
    self.sphere_radius + self.snake_lift
  }

  pub fn dot_surface_radius(&self) -> f64 {
    self.sphere_radius + self.dot_lift
  }

  pub fn max_speed(&self) -> f64 {
    self.move_speed.max(self.move_speed * self.reverse_speed_multiplier)
  }
}
