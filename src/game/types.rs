use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
  pub x: f64,
  pub y: f64,
  pub z: f64,
}

impl Point {
  pub const fn new(x: f64, y: f64, z: f64) -> Self {
    Self { x, y, z }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorldMode {
  Sphere,
  Void,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
  #[serde(rename = "barrier")]
  Barrier,
  #[serde(rename = "self")]
  SelfHit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
  Running,
  Paused,
  GameOver(GameOverCause),
}

// Head location and travel direction on the sphere. The tangent is kept
// orthogonal to the normal and unit length after every rotation.
#[derive(Debug, Clone, Copy)]
pub struct SpherePose {
  pub normal: Point,
  pub tangent: Point,
}

// Free-flight frame used while in the void: velocity is the travel
// direction, up stays orthogonal to it.
#[derive(Debug, Clone, Copy)]
pub struct VoidPose {
  pub position: Point,
  pub velocity: Point,
  pub up: Point,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct HeadPose {
  pub position: Point,
  pub forward: Point,
  pub up: Point,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct EntityVisibility {
  pub dots: bool,
  pub barriers: bool,
  pub stars: bool,
  pub portal: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DotSnapshot {
  pub position: Point,
  pub visible: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BarrierSnapshot {
  Point { center: Point, radius: f64 },
  Wall { points: Vec<Point>, tube_radius: f64 },
}

#[derive(Debug, Clone, Serialize)]
pub struct PortalSnapshot {
  pub position: Point,
  pub facing: Point,
  pub destination: WorldMode,
  pub unlocked: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
  pub world: WorldMode,
  pub head: HeadPose,
  pub trail: Vec<Point>,
  pub dots: Vec<DotSnapshot>,
  pub barriers: Vec<BarrierSnapshot>,
  pub portals: Vec<PortalSnapshot>,
  pub visibility: EntityVisibility,
  pub paused: bool,
  pub game_over: Option<GameOverCause>,
  pub transitioning: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct HudSnapshot {
  pub score: u64,
  pub paused: bool,
  pub game_over: Option<GameOverCause>,
  pub portal_unlocked: bool,
}
