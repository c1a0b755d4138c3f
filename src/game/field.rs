use glam::Vec2;

use super::geometry::Rect;
use crate::config::PhysicsConfig;

/// The fixed pitch and its two goal mouths. Never changes during a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    pub width: f32,
    pub height: f32,
    pub goal_left: Rect,
    pub goal_right: Rect,
}

/// Starting layout after kickoff, a goal or a restart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kickoff {
    pub player: Vec2,
    pub bot: Vec2,
    pub ball: Vec2,
}

impl Field {
    pub fn new(physics: &PhysicsConfig) -> Self {
        let width = physics.field_width;
        let height = physics.field_height;
        let goal_y = (height - physics.goal_height) / 2.0;

        Self {
            width,
            height,
            goal_left: Rect::new(0.0, goal_y, physics.goal_width, physics.goal_height),
            goal_right: Rect::new(
                width - physics.goal_width,
                goal_y,
                physics.goal_width,
                physics.goal_height,
            ),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Player on the left quarter, bot on the right quarter, ball on the spot
    pub fn kickoff(&self) -> Kickoff {
        let mid_y = self.height / 2.0;
        Kickoff {
            player: Vec2::new(self.width / 4.0, mid_y),
            bot: Vec2::new(self.width * 3.0 / 4.0, mid_y),
            ball: self.center(),
        }
    }

    /// Pull a box center back so the whole box of `size` lies on the pitch.
    /// A box wider or taller than the pitch is centered on that axis.
    pub fn clamp_center(&self, pos: Vec2, size: Vec2) -> Vec2 {
        let half = size * 0.5;
        Vec2::new(
            clamp_axis(pos.x, half.x, self.width),
            clamp_axis(pos.y, half.y, self.height),
        )
    }

    /// True when a box of `size` at `pos` stays clear of every edge
    pub fn strictly_contains(&self, pos: Vec2, size: Vec2) -> bool {
        let half = size * 0.5;
        pos.x - half.x > 0.0
            && pos.x + half.x < self.width
            && pos.y - half.y > 0.0
            && pos.y + half.y < self.height
    }
}

fn clamp_axis(value: f32, half: f32, extent: f32) -> f32 {
    let (lo, hi) = (half, extent - half);
    if lo <= hi {
        value.max(lo).min(hi)
    } else {
        extent / 2.0
    }
}
