//! Endless level generation
//!
//! Platforms form a chain where every link is jumpable by construction:
//! each platform differs from the one spawned before it by at most `max_gap`
//! in x and `max_height_delta` in y. Obstacles are dropped onto platforms that
//! are still off-screen to the right. If generation ever falls behind a
//! falling player, an emergency platform is slipped under them and the chain
//! carries on from there, climbing back into the band one link at a time.

use rand::Rng;
use rand::seq::IndexedRandom;

use super::geometry::Rect;
use super::state::{GameState, Obstacle, ObstacleKind, Platform, Player};
use crate::tuning::Tuning;

/// What the generator added this tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LevelOutcome {
    pub platform_spawned: bool,
    pub obstacle_spawned: Option<ObstacleKind>,
    pub emergency: bool,
}

/// Run one tick of generation against the session
pub fn generate(state: &mut GameState) -> LevelOutcome {
    let GameState {
        tuning,
        rng,
        player,
        platforms,
        obstacles,
        chain_tail,
        camera,
        timers,
        ..
    } = state;
    let mut outcome = LevelOutcome::default();

    // Platforms: on the countdown, or immediately when the chain is about to
    // come into view. At most one per tick either way.
    timers.platform += 1;
    let frontier_short =
        chain_tail.right() < camera.x + tuning.viewport_width + tuning.spawn_lookahead;
    if timers.platform > tuning.platform_spawn_interval || frontier_short {
        let next = next_platform(rng, chain_tail, tuning);
        log::debug!(
            "platform at ({:.0}, {:.0}) w={:.0}",
            next.x,
            next.y,
            next.width
        );
        platforms.push(Platform::new(next));
        *chain_tail = next;
        timers.platform = 0;
        outcome.platform_spawned = true;
    }

    // Obstacles: longer countdown, held back until the run is underway.
    // Without a free platform ahead the countdown stays expired and retries.
    timers.obstacle += 1;
    if timers.obstacle > tuning.obstacle_spawn_interval
        && camera.x >= tuning.obstacle_min_camera_x
    {
        if let Some(obstacle) = place_obstacle(rng, platforms, obstacles, camera.x, tuning) {
            log::debug!(
                "{} at ({:.0}, {:.0})",
                obstacle.kind.as_str(),
                obstacle.rect.x,
                obstacle.rect.y
            );
            outcome.obstacle_spawned = Some(obstacle.kind);
            obstacles.push(obstacle);
            timers.obstacle = 0;
        }
    }

    if let Some(rescue) = emergency_platform(player, platforms, tuning) {
        log::warn!(
            "Generation starved: emergency platform at ({:.0}, {:.0})",
            rescue.rect.x,
            rescue.rect.y
        );
        platforms.push(rescue);
        *chain_tail = rescue.rect;
        outcome.emergency = true;
    }

    outcome
}

/// Next link of the chain after `tail`.
///
/// `x = tail.x + base_spacing + U(0, extra_spacing)`, `y` is a random step of
/// at most `max_height_delta` kept inside the platform band. If `tail` itself
/// sits outside the band, the step moves toward it without exceeding the delta.
pub fn next_platform<R: Rng>(rng: &mut R, tail: &Rect, tuning: &Tuning) -> Rect {
    let delta = tuning.max_height_delta;

    let x = tail.x + tuning.base_spacing + rng.random_range(0.0..=tuning.extra_spacing);
    let step = rng.random_range(-delta..=delta);
    let width = rng.random_range(tuning.platform_min_width..=tuning.platform_max_width);

    let lo = (tail.y - delta).max(tuning.platform_y_min);
    let hi = (tail.y + delta).min(tuning.platform_y_max);
    let y = if lo <= hi {
        (tail.y + step).clamp(lo, hi)
    } else if tail.y < tuning.platform_y_min {
        tail.y + delta
    } else {
        tail.y - delta
    };

    Rect::new(x, y, width, tuning.platform_height)
}

/// Pick a free off-screen platform and rest an obstacle of random kind on it
pub fn place_obstacle<R: Rng>(
    rng: &mut R,
    platforms: &[Platform],
    obstacles: &[Obstacle],
    camera_x: f32,
    tuning: &Tuning,
) -> Option<Obstacle> {
    let size = tuning.obstacle_size;
    let view_right = camera_x + tuning.viewport_width;

    let candidates: Vec<&Platform> = platforms
        .iter()
        .filter(|p| !p.emergency && p.rect.x > view_right && p.rect.width >= size.x)
        .filter(|p| !obstacles.iter().any(|o| rests_on(&o.rect, &p.rect)))
        .collect();
    let platform = candidates.choose(rng)?;

    let offset = rng.random_range(0.0..=platform.rect.width - size.x);
    let kind = ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())];

    Some(Obstacle {
        rect: Rect::new(
            platform.rect.x + offset,
            platform.rect.top() - size.y,
            size.x,
            size.y,
        ),
        kind,
    })
}

/// Starvation fallback.
///
/// Returns a platform whose top sits exactly at the player's feet when the
/// player is falling below `starvation_y`, is still inside the world, and no
/// platform at all lies within a jump ahead of them.
pub fn emergency_platform(
    player: &Player,
    platforms: &[Platform],
    tuning: &Tuning,
) -> Option<Platform> {
    let body = player.rect();
    let falling = player.vel.y > 0.0
        && body.y > tuning.starvation_y
        && body.y <= tuning.world_bottom;
    if !falling {
        return None;
    }

    let reach_end = body.right() + tuning.max_gap();
    if platforms.iter().any(|p| p.rect.spans_x(body.x, reach_end)) {
        return None;
    }

    let width = tuning.emergency_platform_width;
    Some(Platform {
        rect: Rect::new(
            body.x + body.width / 2.0 - width / 2.0,
            body.bottom(),
            width,
            tuning.platform_height,
        ),
        emergency: true,
    })
}

fn rests_on(obstacle: &Rect, platform: &Rect) -> bool {
    obstacle.overlaps_x(platform) && (obstacle.bottom() - platform.top()).abs() < 0.5
}
