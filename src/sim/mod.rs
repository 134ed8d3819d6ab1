//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Per-tick constants only (no wall-clock time)
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod camera;
pub mod geometry;
pub mod level;
pub mod physics;
pub mod resolve;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use geometry::{Rect, lands_on};
pub use level::{LevelOutcome, emergency_platform, generate, next_platform, place_obstacle};
pub use physics::{integrate, jump_reach};
pub use resolve::{ResolveOutcome, resolve};
pub use state::{
    Bounded, GameEvent, GameOverCause, GamePhase, GameState, Obstacle, ObstacleKind, Platform,
    Player, SpawnTimers,
};
pub use tick::{Frame, TickInput, autopilot, tick};
