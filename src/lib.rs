//! Runner Core - an endless side-scrolling platformer simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, level generation, collisions, camera)
//! - `schedule`: Fixed-cadence tick scheduling and the host-facing game loop
//! - `tuning`: Data-driven game balance, validated at construction
//! - `web`: wasm-bindgen shell for browser hosts

pub mod schedule;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use schedule::{FixedCadence, FrameOutcome, GameLoop, InputSource};
pub use tuning::{Tuning, TuningError};

/// Default game balance (per-tick units at 60 Hz)
pub mod consts {
    /// Target simulation rate
    pub const TICK_RATE_HZ: f32 = 60.0;

    /// Viewport dimensions
    pub const VIEWPORT_WIDTH: f32 = 900.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;
    /// Anything whose top drops below this is out of the world
    pub const WORLD_BOTTOM: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = 340.0;

    /// Downward acceleration (pixels/tick²)
    pub const GRAVITY: f32 = 0.5;
    /// Upward velocity applied on jump (pixels/tick)
    pub const JUMP_IMPULSE: f32 = 12.0;
    /// Horizontal run speed (pixels/tick), no acceleration ramp
    pub const MAX_SPEED: f32 = 6.0;

    /// Starting platform, wide enough to stand on for a while
    pub const START_PLATFORM_X: f32 = 0.0;
    pub const START_PLATFORM_Y: f32 = 380.0;
    pub const START_PLATFORM_WIDTH: f32 = 300.0;

    /// Platform generation
    pub const BASE_SPACING: f32 = 200.0;
    pub const EXTRA_SPACING: f32 = 100.0;
    pub const MAX_HEIGHT_DELTA: f32 = 80.0;
    pub const PLATFORM_MIN_WIDTH: f32 = 100.0;
    pub const PLATFORM_MAX_WIDTH: f32 = 200.0;
    pub const PLATFORM_HEIGHT: f32 = 20.0;
    pub const PLATFORM_Y_MIN: f32 = 220.0;
    pub const PLATFORM_Y_MAX: f32 = 420.0;
    pub const PLATFORM_SPAWN_INTERVAL: u32 = 100;
    /// Generated content must extend this far past the right edge of the view
    pub const SPAWN_LOOKAHEAD: f32 = 200.0;

    /// Obstacle generation
    pub const OBSTACLE_SPAWN_INTERVAL: u32 = 120;
    pub const OBSTACLE_MIN_CAMERA_X: f32 = 300.0;
    pub const OBSTACLE_WIDTH: f32 = 30.0;
    pub const OBSTACLE_HEIGHT: f32 = 40.0;

    /// Player bottom may sink this far past a platform top and still land
    pub const LANDING_TOLERANCE: f32 = 30.0;

    /// Starvation fallback
    pub const STARVATION_Y: f32 = 450.0;
    pub const EMERGENCY_PLATFORM_WIDTH: f32 = 160.0;

    /// Camera
    pub const CAMERA_LEAD_OFFSET: f32 = 100.0;
    pub const CAMERA_SMOOTHING: f32 = 0.08;
    pub const SCROLL_BIAS: f32 = 2.0;
    /// Player may never fall behind camera.x + this
    pub const CAMERA_MARGIN: f32 = 20.0;
    /// Entities this far behind the camera are pruned
    pub const PRUNE_MARGIN: f32 = 100.0;
    /// Difficulty ramp added to speed_scale every running tick
    pub const SPEED_RAMP: f32 = 0.0005;

    /// Scoring
    pub const OBSTACLE_REWARD: u64 = 10;
    pub const DISTANCE_SCALE: f32 = 10.0;
}
