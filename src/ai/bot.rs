// Bot penguin: chase the ball, lunge when told to

use glam::Vec2;

use crate::game::field::Field;
use crate::game::geometry::normalize;

/// Whether the bot is in the middle of a dash
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DashState {
    Idle,
    Dashing { started_at: f64 },
}

/// Dash tuning shared by every bot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashParams {
    pub speed: f32,
    pub duration: f64,
}

/// Autonomous state carried by a bot penguin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BotBrain {
    pub velocity: Vec2,
    pub dash: DashState,
    pub params: DashParams,
}

impl BotBrain {
    pub fn new(params: DashParams) -> Self {
        Self {
            velocity: Vec2::ZERO,
            dash: DashState::Idle,
            params,
        }
    }

    pub fn is_dashing(&self) -> bool {
        matches!(self.dash, DashState::Dashing { .. })
    }

    /// Start a dash along `direction`. Returns false when a dash is
    /// already running; that dash keeps its original start time.
    pub fn start_dash(&mut self, direction: Vec2, now: f64) -> bool {
        if self.is_dashing() {
            return false;
        }
        self.velocity = direction * self.params.speed;
        self.dash = DashState::Dashing { started_at: now };
        true
    }

    /// Back to a standing, idle bot
    pub fn reset(&mut self) {
        self.velocity = Vec2::ZERO;
        self.dash = DashState::Idle;
    }

    /// Advance one frame and return the bot's new center.
    ///
    /// While dashing the bot only follows its dash velocity. Once the dash
    /// has run for its full duration it ends and the bot seeks the ball in
    /// that same frame.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        pos: Vec2,
        size: Vec2,
        speed: f32,
        ball_pos: Vec2,
        dt: f32,
        now: f64,
        field: &Field,
    ) -> Vec2 {
        if let DashState::Dashing { started_at } = self.dash {
            if now - started_at >= self.params.duration {
                tracing::debug!(
                    "Bot dash at ({:.1}, {:.1}) px/s finished after {:.3}s",
                    self.velocity.x,
                    self.velocity.y,
                    now - started_at
                );
                self.reset();
            } else {
                return field.clamp_center(pos + self.velocity * dt, size);
            }
        }

        seek_ball(pos, size, speed, ball_pos, dt, field)
    }
}

/// Step toward the ball at `speed`, then clamp onto the pitch
pub fn seek_ball(pos: Vec2, size: Vec2, speed: f32, ball_pos: Vec2, dt: f32, field: &Field) -> Vec2 {
    let direction = normalize(ball_pos - pos);
    field.clamp_center(pos + direction * speed * dt, size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PhysicsConfig;

    const SIZE: Vec2 = Vec2::new(50.0, 50.0);
    const SPEED: f32 = 200.0;

    fn field() -> Field {
        Field::new(&PhysicsConfig::default())
    }

    fn brain() -> BotBrain {
        BotBrain::new(DashParams {
            speed: 600.0,
            duration: 0.5,
        })
    }

    #[test]
    fn test_seek_moves_toward_ball() {
        let f = field();
        let next = seek_ball(Vec2::new(900.0, 400.0), SIZE, SPEED, Vec2::new(600.0, 400.0), 0.5, &f);
        assert_eq!(next, Vec2::new(800.0, 400.0));
    }

    #[test]
    fn test_seek_on_top_of_ball_stays_put() {
        let f = field();
        let pos = Vec2::new(600.0, 400.0);
        assert_eq!(seek_ball(pos, SIZE, SPEED, pos, 0.1, &f), pos);
    }

    #[test]
    fn test_seek_is_post_clamped() {
        let f = field();
        // Ball beyond the left edge would drag the bot off the pitch
        let next = seek_ball(Vec2::new(30.0, 400.0), SIZE, SPEED, Vec2::new(-500.0, 400.0), 1.0, &f);
        assert_eq!(next, Vec2::new(25.0, 400.0));
    }

    #[test]
    fn test_start_dash_sets_velocity() {
        let mut b = brain();
        assert!(b.start_dash(Vec2::new(1.0, 0.0), 10.0));
        assert_eq!(b.velocity, Vec2::new(600.0, 0.0));
        assert!(b.is_dashing());
    }

    #[test]
    fn test_second_dash_command_is_ignored() {
        let mut b = brain();
        b.start_dash(Vec2::new(1.0, 0.0), 10.0);
        assert!(!b.start_dash(Vec2::new(0.0, 1.0), 10.2));
        assert_eq!(b.dash, DashState::Dashing { started_at: 10.0 });
        assert_eq!(b.velocity, Vec2::new(600.0, 0.0));
    }

    #[test]
    fn test_dash_overrides_seek() {
        let f = field();
        let mut b = brain();
        b.start_dash(Vec2::new(1.0, 0.0), 0.0);

        // Ball lies to the left, dash carries the bot right
        let next = b.update(Vec2::new(600.0, 400.0), SIZE, SPEED, Vec2::new(100.0, 400.0), 0.1, 0.1, &f);
        assert!((next.x - 660.0).abs() < 1e-3);
        assert_eq!(next.y, 400.0);
        assert!(b.is_dashing());
    }

    #[test]
    fn test_dash_ends_after_duration_and_seeking_resumes() {
        let f = field();
        let mut b = brain();
        b.start_dash(Vec2::new(1.0, 0.0), 0.0);

        // Just before the deadline the dash still owns movement
        let pos = Vec2::new(600.0, 400.0);
        let ball = Vec2::new(100.0, 400.0);
        let next = b.update(pos, SIZE, SPEED, ball, 0.1, 0.49, &f);
        assert!(next.x > pos.x);

        // At exactly the dash duration the bot seeks the ball again
        let after = b.update(next, SIZE, SPEED, ball, 0.1, 0.5, &f);
        assert!(after.x < next.x);
        assert_eq!(b.dash, DashState::Idle);
        assert_eq!(b.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_dash_is_clamped_to_field() {
        let f = field();
        let mut b = brain();
        b.start_dash(Vec2::new(1.0, 0.0), 0.0);
        let next = b.update(Vec2::new(1170.0, 400.0), SIZE, SPEED, Vec2::ZERO, 0.2, 0.2, &f);
        assert_eq!(next.x, 1175.0);
    }
}
