// World dimensions (pixels, origin top-left, y grows downward)
pub const WIDTH: u32 = 500;
pub const HEIGHT: u32 = 800;

// Frame timing: one simulation tick per rendered frame
pub const FPS: u64 = 30;
pub const FRAME_INTERVAL_MS: u64 = 1000 / FPS;

// Bird start position
pub const BIRD_START_X: f64 = 200.0;
pub const BIRD_START_Y: f64 = 200.0;

// Bird physics
pub const GRAVITY: f64 = 1.0;
pub const JUMP_VELOCITY: f64 = -10.5;
pub const MAX_DISPLACEMENT: f64 = 16.0;
pub const RISE_BIAS: f64 = 2.0;
pub const TILT_HOLD_MARGIN: f64 = 50.0;

// Bird tilt (degrees, positive = nose up)
pub const MAX_ROTATION: f64 = 25.0;
pub const MIN_ROTATION: f64 = -90.0;
pub const ROTATION_STEP: f64 = 20.0;
pub const DIVE_FRAME_TILT: f64 = -80.0;

// Bird animation
pub const ANIMATION_TIME: u32 = 5;

// Pipes
pub const PIPE_GAP: f64 = 200.0;
pub const PIPE_VELOCITY: f64 = 5.0;
pub const PIPE_SPAWN_X: f64 = 700.0;
pub const GAP_CENTER_MIN: i32 = 50;
pub const GAP_CENTER_MAX: i32 = 450; // exclusive

// Ground strip drawn along the bottom edge
pub const BASE_STRIP_HEIGHT: u32 = 32;
