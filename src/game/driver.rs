#[cfg(test)]
use std::cell::Cell;
use std::time::Instant;

use super::input::InputSource;
use super::snapshot::FrameSnapshot;
use super::state::{MatchSession, TickReport};

/// Monotonic time source, in seconds
pub trait Clock {
    fn now(&self) -> f64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> f64 {
        (**self).now()
    }
}

/// Wall clock measured from when it was created
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Hand-advanced clock for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, now: f64) {
        self.now.set(now);
    }

    pub fn advance(&self, secs: f64) {
        self.now.set(self.now.get() + secs);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

/// Owns the session and turns clock readings into ticks.
///
/// Each step reads the clock once, derives `dt` from the previous step,
/// and hands the session that pair. The very first step has `dt = 0`.
/// Long stalls are capped at `max_dt` so a suspended process does not
/// teleport the penguins on resume; absolute time is never capped, so
/// the match clock keeps running.
pub struct FrameDriver<C: Clock> {
    clock: C,
    session: MatchSession,
    last_time: Option<f64>,
    max_dt: f32,
    last_report: TickReport,
}

impl<C: Clock> FrameDriver<C> {
    pub fn new(clock: C, session: MatchSession, max_dt: f32) -> Self {
        Self {
            clock,
            session,
            last_time: None,
            max_dt,
            last_report: TickReport::default(),
        }
    }

    /// Run one frame and return what should be drawn for it
    pub fn step<I: InputSource + ?Sized>(&mut self, input: &I) -> FrameSnapshot {
        let now = self.clock.now();
        let dt = match self.last_time {
            Some(prev) => ((now - prev).max(0.0) as f32).min(self.max_dt),
            None => 0.0,
        };
        self.last_time = Some(now);

        self.last_report = self.session.tick(now, dt, input);
        self.session.snapshot(now)
    }

    pub fn session(&self) -> &MatchSession {
        &self.session
    }

    /// What the most recent step did
    pub fn last_report(&self) -> &TickReport {
        &self.last_report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PhysicsConfig;
    use crate::game::input::{Action, HeldKeys};
    use crate::game::state::MatchState;
    use crate::game::teams::{team_by_id, Matchup};
    use glam::Vec2;

    fn driver(clock: &ManualClock) -> FrameDriver<&ManualClock> {
        let matchup = Matchup {
            player: team_by_id(4).unwrap(),
            opponent: team_by_id(9).unwrap(),
        };
        let session = MatchSession::new(&PhysicsConfig::default(), matchup);
        FrameDriver::new(clock, session, 0.1)
    }

    #[test]
    fn test_first_step_has_zero_dt() {
        let clock = ManualClock::new(10.0);
        let mut d = driver(&clock);
        d.step(&HeldKeys::with(&[Action::Start]));
        let bot_before = d.session().bot.pos;

        // Still at t = 10: no time has passed, nothing moves
        d.step(&HeldKeys::new());
        assert_eq!(d.session().bot.pos, bot_before);
    }

    #[test]
    fn test_dt_comes_from_clock() {
        let clock = ManualClock::new(0.0);
        let mut d = driver(&clock);
        d.step(&HeldKeys::with(&[Action::Start]));

        clock.advance(0.05);
        d.step(&HeldKeys::with(&[Action::MoveRight]));

        // 300 px/s for 50 ms
        assert!((d.session().player.pos.x - 315.0).abs() < 1e-3);
    }

    #[test]
    fn test_long_stall_is_capped() {
        let clock = ManualClock::new(0.0);
        let mut d = driver(&clock);
        d.step(&HeldKeys::with(&[Action::Start]));

        clock.advance(2.0);
        d.step(&HeldKeys::with(&[Action::MoveRight]));

        // Capped to 0.1 s of movement
        assert!((d.session().player.pos.x - 330.0).abs() < 1e-3);
    }

    #[test]
    fn test_stall_still_counts_toward_match_clock() {
        let clock = ManualClock::new(0.0);
        let mut d = driver(&clock);
        d.step(&HeldKeys::with(&[Action::Start]));

        clock.set(61.0);
        let snap = d.step(&HeldKeys::new());

        assert_eq!(snap.state, MatchState::GameOver);
        assert_eq!(
            d.last_report().transition,
            Some((MatchState::Playing, MatchState::GameOver))
        );
    }

    #[test]
    fn test_snapshot_matches_session() {
        let clock = ManualClock::new(0.0);
        let mut d = driver(&clock);
        let snap = d.step(&HeldKeys::new());

        assert_eq!(snap.state, MatchState::Menu);
        assert_eq!(snap.player.pos, Vec2::new(300.0, 400.0));
        assert_eq!(snap.ball.pos, Vec2::new(600.0, 400.0));
        assert_eq!(snap.player_team, "Yellow Yaks");
        assert_eq!(snap.opponent_team, "Brown Bears");
    }

    #[test]
    fn test_backwards_clock_does_not_rewind() {
        let clock = ManualClock::new(5.0);
        let mut d = driver(&clock);
        d.step(&HeldKeys::with(&[Action::Start]));
        clock.set(4.0);
        d.step(&HeldKeys::with(&[Action::MoveRight]));
        assert_eq!(d.session().player.pos.x, 300.0);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(a >= 0.0);
        assert!(b >= a);
    }
}
