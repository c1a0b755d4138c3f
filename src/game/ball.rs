use glam::Vec2;

use super::field::Field;
use super::geometry::{normalize, Rect};
use crate::config::{FrictionModel, PhysicsConfig};

/// Ball tuning, fixed for a session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallParams {
    pub friction: f32,
    pub friction_model: FrictionModel,
    pub rest_speed: f32,
    pub wall_kick: f32,
    pub kick_speed: f32,
}

impl BallParams {
    pub fn from_config(physics: &PhysicsConfig) -> Self {
        Self {
            friction: physics.ball_friction,
            friction_model: physics.friction_model,
            rest_speed: physics.rest_speed,
            wall_kick: physics.wall_kick,
            kick_speed: physics.kick_speed,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub params: BallParams,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32, params: BallParams) -> Self {
        Self {
            pos,
            velocity: Vec2::ZERO,
            radius,
            params,
        }
    }

    /// Bounding box of the ball's circle
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(self.radius * 2.0))
    }

    /// Place the ball at rest on `pos`
    pub fn reset_to(&mut self, pos: Vec2) {
        self.pos = pos;
        self.velocity = Vec2::ZERO;
    }

    /// Move by the current velocity, apply friction, and stop the ball
    /// outright once it drops under the rest speed.
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.velocity * dt;

        let decay = match self.params.friction_model {
            // Once per tick, independent of dt
            FrictionModel::PerFrame => self.params.friction,
            FrictionModel::TimeScaled => self.params.friction.powf(dt * 60.0),
        };
        self.velocity *= decay;

        if self.velocity.length() < self.params.rest_speed {
            self.velocity = Vec2::ZERO;
        }
    }

    /// Turn the ball back toward the pitch on every edge it has crossed,
    /// with a small extra push so friction cannot pin it to the wall.
    /// Position is left alone. Returns true if any edge was hit.
    pub fn bounce_off_walls(&mut self, dt: f32, field: &Field) -> bool {
        let push = self.params.wall_kick * dt;
        let mut hit = false;

        if self.pos.x - self.radius < 0.0 {
            self.velocity.x = self.velocity.x.abs() + push;
            hit = true;
        }
        if self.pos.x + self.radius > field.width {
            self.velocity.x = -self.velocity.x.abs() - push;
            hit = true;
        }
        if self.pos.y - self.radius < 0.0 {
            self.velocity.y = self.velocity.y.abs() + push;
            hit = true;
        }
        if self.pos.y + self.radius > field.height {
            self.velocity.y = -self.velocity.y.abs() - push;
            hit = true;
        }

        hit
    }

    /// Kick from `from`: the ball leaves at exactly the kick speed, directed
    /// from the kicker's center through the ball's center. Whatever
    /// velocity the ball had is discarded. Coincident centers do nothing.
    pub fn kick(&mut self, from: Vec2) -> bool {
        let direction = normalize(self.pos - from);
        if direction == Vec2::ZERO {
            return false;
        }
        self.velocity = direction * self.params.kick_speed;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> BallParams {
        BallParams::from_config(&PhysicsConfig::default())
    }

    fn ball_at(x: f32, y: f32) -> Ball {
        Ball::new(Vec2::new(x, y), 20.0, params())
    }

    fn field() -> Field {
        Field::new(&PhysicsConfig::default())
    }

    #[test]
    fn test_integrate_moves_then_slows() {
        let mut b = ball_at(600.0, 400.0);
        b.velocity = Vec2::new(100.0, 0.0);
        b.integrate(0.1);
        assert!((b.pos.x - 610.0).abs() < 1e-4);
        assert!((b.velocity.x - 99.0).abs() < 1e-4);
    }

    #[test]
    fn test_per_frame_friction_ignores_dt() {
        let mut short = ball_at(600.0, 400.0);
        let mut long = ball_at(600.0, 400.0);
        short.velocity = Vec2::new(500.0, 0.0);
        long.velocity = Vec2::new(500.0, 0.0);

        short.integrate(0.001);
        long.integrate(0.05);

        assert_eq!(short.velocity, long.velocity);
    }

    #[test]
    fn test_time_scaled_friction_depends_on_dt() {
        let mut p = params();
        p.friction_model = FrictionModel::TimeScaled;
        let mut b = Ball::new(Vec2::new(600.0, 400.0), 20.0, p);
        b.velocity = Vec2::new(500.0, 0.0);

        // Two 60 Hz frames equal one 30 Hz frame
        b.integrate(2.0 / 60.0);
        let expected = 500.0 * 0.99f32 * 0.99;
        assert!((b.velocity.x - expected).abs() < 1e-2);
    }

    #[test]
    fn test_slow_ball_snaps_to_rest() {
        let mut b = ball_at(600.0, 400.0);
        b.velocity = Vec2::new(0.6, 0.6);
        b.integrate(0.016);
        assert_eq!(b.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_speed_never_lingers_below_rest_speed() {
        let mut b = ball_at(600.0, 400.0);
        b.velocity = Vec2::new(720.0, 0.0);
        for _ in 0..2_000 {
            b.pos = Vec2::new(600.0, 400.0);
            b.integrate(0.016);
            let s = b.velocity.length();
            assert!(s == 0.0 || s >= 1.0, "speed {} left in limbo", s);
        }
        assert_eq!(b.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_bounce_left_wall() {
        let f = field();
        let mut b = ball_at(10.0, 400.0);
        b.velocity = Vec2::new(-200.0, 30.0);
        assert!(b.bounce_off_walls(0.5, &f));
        assert_eq!(b.velocity, Vec2::new(230.0, 30.0));
        // Position is not corrected
        assert_eq!(b.pos, Vec2::new(10.0, 400.0));
    }

    #[test]
    fn test_bounce_bottom_wall_from_rest() {
        let f = field();
        let mut b = ball_at(600.0, 790.0);
        assert!(b.bounce_off_walls(0.1, &f));
        assert_eq!(b.velocity, Vec2::new(0.0, -6.0));
    }

    #[test]
    fn test_bounce_keeps_inward_velocity_pointing_inward() {
        let f = field();
        let mut b = ball_at(1190.0, 400.0);
        b.velocity = Vec2::new(-100.0, 0.0);
        b.bounce_off_walls(0.0, &f);
        assert_eq!(b.velocity.x, -100.0);
    }

    #[test]
    fn test_bounce_corner_hits_both_axes() {
        let f = field();
        let mut b = ball_at(5.0, 5.0);
        b.velocity = Vec2::new(-50.0, -50.0);
        assert!(b.bounce_off_walls(0.0, &f));
        assert_eq!(b.velocity, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_bounce_is_noop_inside_field() {
        let f = field();
        let mut b = ball_at(600.0, 400.0);
        b.velocity = Vec2::new(-321.0, 123.0);
        for _ in 0..10 {
            assert!(!b.bounce_off_walls(0.016, &f));
        }
        assert_eq!(b.velocity, Vec2::new(-321.0, 123.0));
    }

    #[test]
    fn test_touching_wall_is_not_a_bounce() {
        let f = field();
        let mut b = ball_at(20.0, 400.0);
        b.velocity = Vec2::new(-10.0, 0.0);
        assert!(!b.bounce_off_walls(0.016, &f));
    }

    #[test]
    fn test_kick_from_left_of_ball() {
        let mut b = ball_at(600.0, 400.0);
        assert!(b.kick(Vec2::new(580.0, 400.0)));
        assert!((b.velocity.x - 720.0).abs() < 1e-3);
        assert!(b.velocity.y.abs() < 1e-3);
    }

    #[test]
    fn test_kick_overrides_existing_velocity() {
        let mut b = ball_at(600.0, 400.0);
        b.velocity = Vec2::new(-900.0, 300.0);
        b.kick(Vec2::new(600.0, 450.0));
        assert!(b.velocity.x.abs() < 1e-3);
        assert!((b.velocity.y + 720.0).abs() < 1e-3);
    }

    #[test]
    fn test_kick_speed_is_always_exact() {
        let mut b = ball_at(600.0, 400.0);
        for (dx, dy) in [(1.0, 0.0), (-3.0, 7.0), (0.001, -0.002), (40.0, 40.0), (-25.0, -1.0)] {
            b.velocity = Vec2::new(12.0, -5.0);
            assert!(b.kick(b.pos - Vec2::new(dx, dy)));
            assert!((b.velocity.length() - 720.0).abs() < 1e-2, "speed {}", b.velocity.length());
        }
    }

    #[test]
    fn test_kick_from_ball_center_does_nothing() {
        let mut b = ball_at(600.0, 400.0);
        b.velocity = Vec2::new(12.0, 34.0);
        assert!(!b.kick(Vec2::new(600.0, 400.0)));
        assert_eq!(b.velocity, Vec2::new(12.0, 34.0));
    }
}
