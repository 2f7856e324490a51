// Frame timing: per-tick delta is clamped so a hitch cannot move the head
// far enough to tunnel through a thin barrier.
pub const MAX_DT: f64 = 1.0 / 30.0;
pub const TICK_MS: u64 = 16;

// Speeds below this are treated as rest to avoid jitter.
pub const SPEED_EPSILON: f64 = 0.1;

pub const MAX_SEGMENTS: usize = 220;
pub const TRAIL_BUFFER: usize = 8;

// Self-collision is skipped until the body has outgrown its starting length
// and always ignores the trail entries nearest the head, where trail
// density would otherwise trip the test immediately.
pub const SELF_TEST_GROWTH_MARGIN: usize = 4;
pub const NECK_EXCLUSION: usize = 16;

pub const DOT_RESPAWN_DELAY: f64 = 0.18;
pub const DOT_PLACEMENT_ATTEMPTS: usize = 40;
// Candidate spawn normals with dot(candidate, head) at or above this are
// rejected; roughly a 10 degree exclusion cone around the head.
pub const DOT_SPAWN_EXCLUSION_DOT: f64 = 0.985;

pub const PORTAL_COOLDOWN: f64 = 2.0;
pub const TRANSITION_DURATION: f64 = 1.0;

pub const DEGENERATE_EPSILON: f64 = 1e-8;
