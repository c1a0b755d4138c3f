use glam::Vec2;

use super::field::Field;
use super::geometry::Rect;
use super::input::{Action, InputSource};
use crate::ai::BotBrain;

/// One of the four arrow directions the player can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Order in which held directions are applied each frame
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
        }
    }

    pub fn action(self) -> Action {
        match self {
            Direction::Left => Action::MoveLeft,
            Direction::Right => Action::MoveRight,
            Direction::Up => Action::MoveUp,
            Direction::Down => Action::MoveDown,
        }
    }
}

/// Who drives an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Role {
    /// Keyboard-driven, no autonomous behaviour
    Player,
    /// Seeks the ball and dashes on command
    Bot(BotBrain),
}

/// Per-frame inputs every role draws from
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub dt: f32,
    pub now: f64,
    pub ball_pos: Vec2,
    pub field: &'a Field,
}

/// A penguin on the pitch. `pos` is the center of its bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct MovableEntity {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub color: [u8; 3],
    pub role: Role,
}

impl MovableEntity {
    pub fn new(pos: Vec2, size: Vec2, speed: f32, color: [u8; 3], role: Role) -> Self {
        Self {
            pos,
            size,
            speed,
            color,
            role,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    pub fn half_width(&self) -> f32 {
        self.size.x / 2.0
    }

    pub fn brain(&self) -> Option<&BotBrain> {
        match &self.role {
            Role::Bot(brain) => Some(brain),
            Role::Player => None,
        }
    }

    pub fn brain_mut(&mut self) -> Option<&mut BotBrain> {
        match &mut self.role {
            Role::Bot(brain) => Some(brain),
            Role::Player => None,
        }
    }

    /// Put the entity back on its kickoff spot with no momentum
    pub fn reset_to(&mut self, pos: Vec2) {
        self.pos = pos;
        if let Some(brain) = self.brain_mut() {
            brain.reset();
        }
    }

    pub fn clamp_to(&mut self, field: &Field) {
        self.pos = field.clamp_center(self.pos, self.size);
    }

    /// Move one step along `direction`, but only when the moved box would
    /// still sit strictly inside the field. Blocked steps leave the
    /// entity where it was.
    pub fn step_direction(&mut self, direction: Direction, dt: f32, field: &Field) -> bool {
        let next = self.pos + direction.unit() * self.speed * dt;
        if field.strictly_contains(next, self.size) {
            self.pos = next;
            true
        } else {
            false
        }
    }

    /// Apply every held arrow direction in turn
    pub fn apply_held_directions<I: InputSource + ?Sized>(&mut self, input: &I, dt: f32, field: &Field) {
        for direction in Direction::ALL {
            if input.is_held(direction.action()) {
                self.step_direction(direction, dt, field);
            }
        }
    }

    /// Advance one frame according to the entity's role
    pub fn update<I: InputSource + ?Sized>(&mut self, input: &I, ctx: &StepContext) {
        match self.role {
            Role::Player => self.apply_held_directions(input, ctx.dt, ctx.field),
            Role::Bot(ref mut brain) => {
                self.pos = brain.update(
                    self.pos,
                    self.size,
                    self.speed,
                    ctx.ball_pos,
                    ctx.dt,
                    ctx.now,
                    ctx.field,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::DashParams;
    use crate::config::PhysicsConfig;
    use crate::game::input::HeldKeys;

    fn field() -> Field {
        Field::new(&PhysicsConfig::default())
    }

    fn player_at(x: f32, y: f32) -> MovableEntity {
        MovableEntity::new(Vec2::new(x, y), Vec2::new(50.0, 50.0), 300.0, [255, 0, 0], Role::Player)
    }

    fn bot_at(x: f32, y: f32) -> MovableEntity {
        let brain = BotBrain::new(DashParams {
            speed: 600.0,
            duration: 0.5,
        });
        MovableEntity::new(Vec2::new(x, y), Vec2::new(50.0, 50.0), 200.0, [0, 0, 255], Role::Bot(brain))
    }

    #[test]
    fn test_player_moves_along_held_axis() {
        let f = field();
        let mut p = player_at(300.0, 400.0);
        p.apply_held_directions(&HeldKeys::with(&[Action::MoveRight]), 0.1, &f);
        assert_eq!(p.pos, Vec2::new(330.0, 400.0));

        p.apply_held_directions(&HeldKeys::with(&[Action::MoveUp, Action::MoveLeft]), 0.1, &f);
        assert_eq!(p.pos, Vec2::new(300.0, 370.0));
    }

    #[test]
    fn test_opposite_directions_cancel() {
        let f = field();
        let mut p = player_at(300.0, 400.0);
        p.apply_held_directions(&HeldKeys::with(&[Action::MoveLeft, Action::MoveRight]), 0.1, &f);
        assert_eq!(p.pos, Vec2::new(300.0, 400.0));
    }

    #[test]
    fn test_player_step_blocked_at_wall() {
        let f = field();
        let mut p = player_at(30.0, 400.0);
        // 30 px of movement would put the left edge past zero
        assert!(!p.step_direction(Direction::Left, 0.1, &f));
        assert_eq!(p.pos, Vec2::new(30.0, 400.0));
    }

    #[test]
    fn test_player_never_reaches_wall() {
        let f = field();
        let mut p = player_at(300.0, 400.0);
        let held = HeldKeys::with(&[Action::MoveLeft, Action::MoveDown]);
        for _ in 0..10_000 {
            p.apply_held_directions(&held, 0.016, &f);
        }
        assert!(p.pos.x - p.half_width() > 0.0);
        assert!(p.pos.y + 25.0 < f.height);
        assert!(f.bounds().contains_rect(&p.bounds()));
    }

    #[test]
    fn test_player_role_ignores_ball() {
        let f = field();
        let mut p = player_at(300.0, 400.0);
        let ctx = StepContext {
            dt: 0.1,
            now: 1.0,
            ball_pos: Vec2::new(600.0, 400.0),
            field: &f,
        };
        p.update(&HeldKeys::new(), &ctx);
        assert_eq!(p.pos, Vec2::new(300.0, 400.0));
    }

    #[test]
    fn test_bot_role_ignores_keys_and_seeks() {
        let f = field();
        let mut b = bot_at(900.0, 400.0);
        let ctx = StepContext {
            dt: 0.5,
            now: 1.0,
            ball_pos: Vec2::new(600.0, 400.0),
            field: &f,
        };
        b.update(&HeldKeys::with(&[Action::MoveRight]), &ctx);
        assert_eq!(b.pos, Vec2::new(800.0, 400.0));
    }

    #[test]
    fn test_reset_clears_dash() {
        let mut b = bot_at(900.0, 400.0);
        b.brain_mut().unwrap().start_dash(Vec2::new(1.0, 0.0), 0.0);
        b.reset_to(Vec2::new(900.0, 400.0));
        let brain = b.brain().unwrap();
        assert!(!brain.is_dashing());
        assert_eq!(brain.velocity, Vec2::ZERO);
    }
}
