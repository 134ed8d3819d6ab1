//! Per-tick collision resolution, pruning and scoring
//!
//! Order matters: landing, then lethal checks (which end the tick), then
//! pruning and score. A tick that ends the run never changes the score.

use super::geometry::lands_on;
use super::state::{GameOverCause, GameState, Obstacle, ObstacleKind};

/// What the resolver did this tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolveOutcome {
    pub landed: bool,
    pub game_over: Option<GameOverCause>,
    pub pruned_platforms: usize,
    /// Kinds of the obstacles the player got past
    pub cleared: Vec<ObstacleKind>,
}

/// Resolve the player against the level and update score.
///
/// Sets `GameOver` on the session directly when the player hits an obstacle
/// or drops out of the world.
pub fn resolve(state: &mut GameState) -> ResolveOutcome {
    let mut outcome = ResolveOutcome::default();
    let tuning = &state.tuning;
    let player = &mut state.player;

    // Landing: first platform in spawn order wins
    player.grounded = false;
    let body = player.rect();
    if let Some(platform) = state
        .platforms
        .iter()
        .find(|p| lands_on(&body, player.vel.y, &p.rect, tuning.landing_tolerance))
    {
        player.pos.y = platform.rect.top() - player.size.y;
        player.vel.y = 0.0;
        player.grounded = true;
        outcome.landed = true;
    }

    let body = player.rect();
    let cause = if let Some(hit) = state.obstacles.iter().find(|o| o.rect.intersects(&body)) {
        Some(GameOverCause::Obstacle(hit.kind))
    } else if body.y > tuning.world_bottom {
        Some(GameOverCause::FellOut)
    } else {
        None
    };
    if let Some(cause) = cause {
        state.end_run(cause);
        outcome.game_over = Some(cause);
        return outcome;
    }

    // Two-phase prune: split survivors from expired, then replace
    let cutoff = state.camera.x - tuning.prune_margin;

    let before = state.platforms.len();
    state.platforms.retain(|p| p.rect.right() >= cutoff);
    outcome.pruned_platforms = before - state.platforms.len();

    let (survivors, expired): (Vec<Obstacle>, Vec<Obstacle>) = std::mem::take(&mut state.obstacles)
        .into_iter()
        .partition(|o| o.rect.right() >= cutoff);
    state.obstacles = survivors;

    for obstacle in &expired {
        state.score += tuning.obstacle_reward;
        outcome.cleared.push(obstacle.kind);
    }

    let distance = (state.player.pos.x / tuning.distance_scale).floor().max(0.0) as u64;
    state.score = state.score.max(distance);

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Rect;
    use crate::sim::state::{GamePhase, Platform};
    use glam::Vec2;

    fn running() -> GameState {
        let mut state = GameState::with_defaults(1);
        state.start();
        state
    }

    #[test]
    fn test_landing_snaps_and_grounds() {
        let mut state = running();
        // Bottom 12px into the starting platform, descending
        state.player.pos = Vec2::new(100.0, 352.0);
        state.player.vel = Vec2::new(0.0, 9.0);
        state.player.grounded = false;

        let outcome = resolve(&mut state);
        assert!(outcome.landed);
        assert!(state.player.grounded);
        assert_eq!(state.player.vel.y, 0.0);
        assert_eq!(state.player.pos.y, 340.0);
    }

    #[test]
    fn test_rising_player_passes_through() {
        let mut state = running();
        state.player.pos = Vec2::new(100.0, 345.0);
        state.player.vel = Vec2::new(0.0, -6.0);
        state.player.grounded = false;

        let outcome = resolve(&mut state);
        assert!(!outcome.landed);
        assert!(!state.player.grounded);
        assert_eq!(state.player.pos.y, 345.0);
    }

    #[test]
    fn test_first_platform_in_spawn_order_wins() {
        let mut state = running();
        state.platforms.push(Platform::new(Rect::new(50.0, 390.0, 200.0, 20.0)));
        state.player.pos = Vec2::new(100.0, 355.0);
        state.player.vel = Vec2::new(0.0, 5.0);

        resolve(&mut state);
        // Snapped to the starting platform (y 380), not the later one (y 390)
        assert_eq!(state.player.pos.y, 340.0);
    }

    #[test]
    fn test_obstacle_hit_ends_run_without_scoring() {
        let mut state = running();
        state.score = 25;
        state.camera.x = 5000.0;
        state.obstacles.push(Obstacle {
            rect: Rect::new(120.0, 340.0, 30.0, 40.0),
            kind: ObstacleKind::Cactus,
        });
        // This one would be pruned and scored if the tick continued
        state.obstacles.push(Obstacle {
            rect: Rect::new(0.0, 340.0, 30.0, 40.0),
            kind: ObstacleKind::Spike,
        });

        let outcome = resolve(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(
            outcome.game_over,
            Some(GameOverCause::Obstacle(ObstacleKind::Cactus))
        );
        assert_eq!(state.score, 25);
        assert_eq!(state.obstacles.len(), 2);
    }

    #[test]
    fn test_fall_out_ends_run() {
        let mut state = running();
        state.player.pos = Vec2::new(100.0, 601.0);
        state.player.vel = Vec2::new(0.0, 0.0);
        state.player.grounded = true;

        let outcome = resolve(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.game_over_cause, Some(GameOverCause::FellOut));
        assert_eq!(outcome.game_over, Some(GameOverCause::FellOut));
    }

    #[test]
    fn test_passed_obstacle_scores_ten() {
        let mut state = running();
        state.camera.x = 300.0;
        state.obstacles.push(Obstacle {
            // Right edge 150 < 300 - 100
            rect: Rect::new(120.0, -500.0, 30.0, 40.0),
            kind: ObstacleKind::Fire,
        });

        let outcome = resolve(&mut state);
        assert!(state.obstacles.is_empty());
        assert_eq!(outcome.cleared, vec![ObstacleKind::Fire]);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_prune_keeps_entities_near_camera() {
        let mut state = running();
        state.camera.x = 450.0;
        state.player.pos.x = 470.0;
        state.platforms = vec![
            Platform::new(Rect::new(0.0, 380.0, 300.0, 20.0)),  // right 300 < 350
            Platform::new(Rect::new(200.0, 380.0, 150.0, 20.0)), // right 350, kept
            Platform::new(Rect::new(460.0, 380.0, 150.0, 20.0)),
        ];

        let outcome = resolve(&mut state);
        assert_eq!(outcome.pruned_platforms, 1);
        let xs: Vec<f32> = state.platforms.iter().map(|p| p.rect.x).collect();
        assert_eq!(xs, vec![200.0, 460.0]);
    }

    #[test]
    fn test_distance_score_never_lowers_score() {
        let mut state = running();
        state.player.pos.x = 1234.0;
        resolve(&mut state);
        assert_eq!(state.score, 123);

        state.score = 500;
        resolve(&mut state);
        assert_eq!(state.score, 500);
    }
}
