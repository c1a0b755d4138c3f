use glam::Vec2;

use super::field::Field;
use super::state::{MatchState, Outcome, Score};

/// Read-only view of a penguin for drawing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityView {
    pub pos: Vec2,
    pub size: Vec2,
    pub color: [u8; 3],
    pub dashing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallView {
    pub pos: Vec2,
    pub radius: f32,
}

/// Everything needed to paint one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub state: MatchState,
    pub field: Field,
    pub player: EntityView,
    pub bot: EntityView,
    pub ball: BallView,
    pub score: Score,
    pub remaining_secs: f64,
    pub outcome: Option<Outcome>,
    pub player_team: &'static str,
    pub opponent_team: &'static str,
}

/// Paints frames. Must not feed anything back into the simulation.
pub trait Renderer {
    fn render(&mut self, snapshot: &FrameSnapshot) -> anyhow::Result<()>;
}
