//! Scroll-following camera and render culling

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::state::Bounded;
use crate::tuning::Tuning;

/// Horizontal world-space offset of the left edge of the view
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
}

impl Camera {
    /// Ease toward `player_x - lead_offset`, then add the forward scroll bias.
    ///
    /// The follow term only ever pulls forward, so the camera keeps scrolling
    /// by at least `scroll_bias * speed_scale` per tick even with an idle player.
    pub fn follow(&mut self, player_x: f32, speed_scale: f32, tuning: &Tuning) {
        let target = player_x - tuning.lead_offset;
        let pull = ((target - self.x) * tuning.camera_smoothing).max(0.0);
        self.x += pull + tuning.scroll_bias * speed_scale;
    }

    #[inline]
    pub fn to_screen_x(&self, world_x: f32) -> f32 {
        world_x - self.x
    }

    /// Whether a world rect's screen x lies in `[-width, viewport_width]`
    pub fn is_visible(&self, rect: &Rect, viewport_width: f32) -> bool {
        let sx = self.to_screen_x(rect.x);
        sx >= -rect.width && sx <= viewport_width
    }

    /// Copy out the entities the host should draw. Never touches `items`.
    pub fn cull<T: Bounded + Clone>(&self, items: &[T], viewport_width: f32) -> Vec<T> {
        items
            .iter()
            .filter(|item| self.is_visible(&item.bounds(), viewport_width))
            .cloned()
            .collect()
    }
}
