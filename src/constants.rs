// Tick and timing
pub const PHYSICS_TICK_MS: u64 = 16;
pub const MAX_FRAME_DT_MS: u64 = 100; // clamp after a pause or lag spike
pub const FRAME_INTERVAL_MS: u64 = 16;

// Visible world, centered on the origin, y up
pub const VIEW_HALF_WIDTH: f64 = 2.5;
pub const VIEW_HALF_HEIGHT: f64 = 1.5;

// Bird physics (world units per tick)
pub const GRAVITY: f64 = -0.001;
pub const JUMP_FORCE: f64 = 0.03;
pub const HOVER_SPEED: f64 = 0.05;

// Bird body
pub const BIRD_START_X: f64 = -1.4;
pub const BIRD_START_Y: f64 = 0.0;
pub const BIRD_WIDTH: f64 = 0.24;
pub const BIRD_HEIGHT: f64 = 0.18;

// Flap animation
pub const FLAP_ANIM_TICKS: u32 = 12;
pub const WING_FLIP_TICKS: u32 = 3;

// Ticks a held direction survives without a key repeat (~200ms)
pub const INPUT_HOLD_TICKS: u32 = 12;

// Obstacles
pub const OBSTACLE_WIDTH: f64 = 0.36;
pub const GAP_MARGIN: f64 = 0.2;
pub const SPAWN_START_X: f64 = VIEW_HALF_WIDTH + 0.5;
pub const DESPAWN_X: f64 = -VIEW_HALF_WIDTH - 0.5;
// Pipe boxes reach past the view so nothing slips around their ends
pub const OBSTACLE_OVERHANG: f64 = 0.5;

// Death and reset
pub const DEATH_DELAY_TICKS: u32 = 60; // ~1 second

// Files under ~/.flapper/
pub const DATA_DIR_NAME: &str = ".flapper";
pub const SETTINGS_FILE: &str = "settings.json";
pub const SCORES_FILE: &str = "scores.json";
pub const LOG_FILE: &str = "flapper.log";
