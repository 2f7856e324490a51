use anyhow::bail;
use sphere_snake_core::game::config::{Difficulty, GameConfig};
use sphere_snake_core::game::constants::TICK_MS;
use sphere_snake_core::game::input::TickInput;
use sphere_snake_core::game::math::{cross, dot, length, normalize, project_to_tangent, sub};
use sphere_snake_core::game::session::GameSession;
use sphere_snake_core::game::types::{HeadPose, Phase, Point, RenderSnapshot, WorldMode};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let difficulty = match std::env::args().nth(1) {
    Some(name) => match Difficulty::from_name(&name) {
      Some(difficulty) => difficulty,
      None => bail!("unknown difficulty: {name}"),
    },
    None => Difficulty::Medium,
  };
  let max_ticks: u64 = std::env::var("MAX_TICKS")
    .ok()
    .and_then(|value| value.parse().ok())
    .unwrap_or(3600);

  let mut session = GameSession::new(GameConfig::for_difficulty(difficulty));
  tracing::info!(?difficulty, max_ticks, "session started");

  let mut interval = tokio::time::interval(Duration::from_millis(TICK_MS));
  let mut last = Instant::now();
  for _ in 0..max_ticks {
    interval.tick().await;
    let now = Instant::now();
    let dt = now.duration_since(last).as_secs_f64();
    last = now;

    let input = autopilot(&session.render_snapshot());
    session.tick(input, dt);

    if let Phase::GameOver(cause) = session.phase() {
      tracing::info!(?cause, score = session.score(), "run ended");
      break;
    }
  }

  println!("{}", serde_json::to_string(&session.hud_snapshot())?);
  Ok(())
}

// Scripted pilot used to exercise the whole core headlessly: on the sphere
// it chases the nearest visible dot, in the void it boosts toward the
// return portal.
fn autopilot(snapshot: &RenderSnapshot) -> TickInput {
  match snapshot.world {
    WorldMode::Sphere => {
      let target = snapshot
        .dots
        .iter()
        .filter(|dot| dot.visible)
        .map(|dot| dot.position)
        .min_by(|a, b| {
          let da = length(sub(*a, snapshot.head.position));
          let db = length(sub(*b, snapshot.head.position));
          da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        });
      TickInput {
        steer: target.map_or(0.0, |target| steer_toward(target, &snapshot.head)),
        forward: 1,
        vertical: 0,
        shift: false,
      }
    }
    WorldMode::Void => {
      let target = snapshot
        .portals
        .iter()
        .find(|portal| portal.destination == WorldMode::Sphere)
        .map(|portal| portal.position);
      let (steer, vertical) = target.map_or((0.0, 0), |target| {
        let to_target = normalize(sub(target, snapshot.head.position));
        let pitch = dot(to_target, snapshot.head.up);
        let vertical = if pitch > 0.1 {
          1
        } else if pitch < -0.1 {
          -1
        } else {
          0
        };
        (steer_toward(target, &snapshot.head), vertical)
      });
      TickInput {
        steer,
        forward: 0,
        vertical,
        shift: true,
      }
    }
  }
}

fn steer_toward(target: Point, head: &HeadPose) -> f64 {
  let desired = project_to_tangent(sub(target, head.position), head.up);
  if length(desired) == 0.0 {
    return 0.0;
  }
  let side = dot(cross(head.forward, desired), head.up);
  if side > 0.05 {
    1.0
  } else if side < -0.05 {
    -1.0
  } else {
    0.0
  }
}
