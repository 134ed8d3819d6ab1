//! Game state and core simulation types
//!
//! A session is one owned `GameState`: construct, reset, tick, drop.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::geometry::Rect;
use crate::tuning::{Tuning, TuningError};

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a start command, world laid out but frozen
    Idle,
    /// Active gameplay
    Running,
    /// Run ended, waiting for restart
    GameOver,
    /// Closed by the host; no further ticks
    Closed,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    Obstacle(ObstacleKind),
    FellOut,
}

/// Things that happened during a tick, for host-side audio/effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    Landed,
    ObstacleCleared { kind: ObstacleKind },
    EmergencyPlatform,
    GameOver { cause: GameOverCause },
}

/// The player-controlled runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner (world space)
    pub pos: Vec2,
    /// Per-tick velocity
    pub vel: Vec2,
    pub size: Vec2,
    /// Resting on a platform, eligible to jump
    pub grounded: bool,
}

impl Player {
    /// Player at its spawn point, standing on the starting platform
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.player_start,
            vel: Vec2::ZERO,
            size: tuning.player_size,
            grounded: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// A platform the player can stand on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    /// Synthesized by the starvation fallback rather than the regular chain
    #[serde(default)]
    pub emergency: bool,
}

impl Platform {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            emergency: false,
        }
    }
}

/// Obstacle variants. Cosmetic only: every kind is lethal on contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Spike,
    Cactus,
    Fire,
    Rock,
    Gem,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 5] = [
        ObstacleKind::Spike,
        ObstacleKind::Cactus,
        ObstacleKind::Fire,
        ObstacleKind::Rock,
        ObstacleKind::Gem,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Spike => "spike",
            ObstacleKind::Cactus => "cactus",
            ObstacleKind::Fire => "fire",
            ObstacleKind::Rock => "rock",
            ObstacleKind::Gem => "gem",
        }
    }
}

/// A lethal obstacle resting on a platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub rect: Rect,
    pub kind: ObstacleKind,
}

/// Anything with a world-space bounding box
pub trait Bounded {
    fn bounds(&self) -> Rect;
}

impl Bounded for Platform {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

impl Bounded for Obstacle {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

/// Spawn countdowns (ticks since the last spawn)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnTimers {
    pub platform: u32,
    pub obstacle: u32,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance constants, fixed for the session
    pub(crate) tuning: Tuning,
    /// Seed the RNG was built from
    pub seed: u64,
    /// Level RNG; keeps its stream across restarts so each run differs
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub player: Player,
    /// Spawn order is world order (left to right)
    pub platforms: Vec<Platform>,
    /// Spawn order
    pub obstacles: Vec<Obstacle>,
    /// Newest platform (emergency or not); survives pruning so the chain keeps its anchor
    pub chain_tail: Rect,
    pub camera: Camera,
    pub score: u64,
    /// Difficulty multiplier, grows every running tick
    pub speed_scale: f32,
    /// Running ticks this session
    pub time_ticks: u64,
    pub timers: SpawnTimers,
    pub game_over_cause: Option<GameOverCause>,
}

impl GameState {
    /// Create a session in the Idle phase. Fails fast on bad tuning.
    pub fn new(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    /// Session with default tuning
    pub fn with_defaults(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            player: Player::spawn(&tuning),
            platforms: vec![Platform::new(tuning.start_platform)],
            obstacles: Vec::new(),
            chain_tail: tuning.start_platform,
            camera: Camera::default(),
            score: 0,
            speed_scale: 1.0,
            time_ticks: 0,
            timers: SpawnTimers::default(),
            game_over_cause: None,
            tuning,
        }
    }

    /// Put player, level, camera, score and difficulty back to their initial values
    fn reset(&mut self) {
        self.player = Player::spawn(&self.tuning);
        self.platforms.clear();
        self.platforms.push(Platform::new(self.tuning.start_platform));
        self.obstacles.clear();
        self.chain_tail = self.tuning.start_platform;
        self.camera = Camera::default();
        self.score = 0;
        self.speed_scale = 1.0;
        self.time_ticks = 0;
        self.timers = SpawnTimers::default();
        self.game_over_cause = None;
    }

    /// Idle -> Running. Any other phase: no-op.
    pub fn start(&mut self) {
        if self.phase != GamePhase::Idle {
            log::debug!("start ignored in {:?}", self.phase);
            return;
        }
        self.reset();
        self.phase = GamePhase::Running;
        log::info!("Run started (seed {})", self.seed);
    }

    /// Running/GameOver/Idle -> Idle with a full reset. Closed: no-op.
    pub fn restart(&mut self) {
        if self.phase == GamePhase::Closed {
            log::debug!("restart ignored, session closed");
            return;
        }
        self.reset();
        self.phase = GamePhase::Idle;
        log::info!("Session reset");
    }

    /// Abandon the session from any phase
    pub fn close(&mut self) {
        if self.phase != GamePhase::Closed {
            log::info!("Session closed (score {})", self.score);
        }
        self.phase = GamePhase::Closed;
    }

    /// Running -> GameOver
    pub(crate) fn end_run(&mut self, cause: GameOverCause) {
        self.phase = GamePhase::GameOver;
        self.game_over_cause = Some(cause);
    }

    /// Validated balance constants this session was built with
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}
