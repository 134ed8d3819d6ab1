//! Fixed-cadence simulation tick
//!
//! One call advances the session by exactly one step:
//! physics -> level generation -> collision resolution -> camera.

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::state::{GameEvent, GameOverCause, GamePhase, GameState, Obstacle, Platform};
use super::{level, physics, resolve};

/// Input snapshot for a single tick, already normalized by the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Honored only while grounded
    pub jump: bool,
}

/// Everything the host needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub phase: GamePhase,
    pub score: u64,
    /// World-space platforms inside the viewport
    pub visible_platforms: Vec<Platform>,
    /// World-space obstacles inside the viewport
    pub visible_obstacles: Vec<Obstacle>,
    pub player: Rect,
    pub camera_x: f32,
    pub game_over_cause: Option<GameOverCause>,
    pub events: Vec<GameEvent>,
}

impl Frame {
    /// Snapshot the session through the camera's culling
    pub fn capture(state: &GameState, events: Vec<GameEvent>) -> Self {
        let viewport = state.tuning.viewport_width;
        Self {
            phase: state.phase,
            score: state.score,
            visible_platforms: state.camera.cull(&state.platforms, viewport),
            visible_obstacles: state.camera.cull(&state.obstacles, viewport),
            player: state.player.rect(),
            camera_x: state.camera.x,
            game_over_cause: state.game_over_cause,
            events,
        }
    }
}

/// Advance the session by one tick and return the frame to render.
///
/// Outside `Running` nothing moves; the current state is still captured so
/// the host can keep drawing the Idle or GameOver screen.
pub fn tick(state: &mut GameState, input: &TickInput) -> Frame {
    if state.phase != GamePhase::Running {
        return Frame::capture(state, Vec::new());
    }

    let mut events = Vec::new();
    state.time_ticks += 1;

    // Already out of the world: the run is over whatever the velocity says
    if state.player.pos.y > state.tuning.world_bottom {
        return finish_run(state, GameOverCause::FellOut, events);
    }

    let was_grounded = state.player.grounded;
    physics::integrate(&mut state.player, input, &state.tuning, state.camera.x);
    if was_grounded && !state.player.grounded {
        events.push(GameEvent::Jumped);
    }

    if level::generate(state).emergency {
        events.push(GameEvent::EmergencyPlatform);
    }

    let outcome = resolve::resolve(state);
    if outcome.landed && !was_grounded {
        events.push(GameEvent::Landed);
    }
    if let Some(cause) = outcome.game_over {
        return finish_run(state, cause, events);
    }
    events.extend(
        outcome
            .cleared
            .iter()
            .map(|&kind| GameEvent::ObstacleCleared { kind }),
    );

    state
        .camera
        .follow(state.player.pos.x, state.speed_scale, &state.tuning);
    // Unbounded on purpose: difficulty keeps climbing for as long as the run lasts
    state.speed_scale += state.tuning.speed_ramp;

    Frame::capture(state, events)
}

fn finish_run(state: &mut GameState, cause: GameOverCause, mut events: Vec<GameEvent>) -> Frame {
    state.end_run(cause);
    log::info!(
        "Game over after {} ticks: {:?}, score {}",
        state.time_ticks,
        cause,
        state.score
    );
    events.push(GameEvent::GameOver { cause });
    Frame::capture(state, events)
}

/// Attract-mode bot: run right, jump at obstacles and at the end of the
/// current platform
pub fn autopilot(state: &GameState) -> TickInput {
    let body = state.player.rect();
    let look = body.right() + state.player.vel.x.abs().max(1.0) * 8.0;
    let obstacle_ahead = state
        .obstacles
        .iter()
        .any(|o| o.rect.right() > body.left() && o.rect.left() <= look);
    let support_ahead = state
        .platforms
        .iter()
        .any(|p| p.rect.spans_x(look - 10.0, look) && p.rect.top() >= body.bottom() - 1.0);
    TickInput {
        move_right: true,
        jump: obstacle_ahead || !support_ahead,
        ..Default::default()
    }
}
