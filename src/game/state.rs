use crate::ai::{BotBrain, DashParams};
use crate::config::PhysicsConfig;

use super::ball::{Ball, BallParams};
use super::entity::{MovableEntity, Role};
use super::field::Field;
use super::input::{Action, InputSource};
use super::physics::{self, Pitch, PhysicsEvents, Side};
use super::snapshot::{BallView, EntityView, FrameSnapshot};
use super::teams::Matchup;

/// Where the session is in its menu → play → results loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    Menu,
    Playing,
    GameOver,
}

/// Result of a finished match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    PlayerWins,
    BotWins,
    Draw,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub player: u32,
    pub bot: u32,
}

impl Score {
    pub fn credit(&mut self, side: Side) {
        match side {
            Side::Player => self.player += 1,
            Side::Bot => self.bot += 1,
        }
    }

    pub fn outcome(&self) -> Outcome {
        match self.player.cmp(&self.bot) {
            std::cmp::Ordering::Greater => Outcome::PlayerWins,
            std::cmp::Ordering::Less => Outcome::BotWins,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }
}

/// What a single tick did
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    pub transition: Option<(MatchState, MatchState)>,
    pub events: PhysicsEvents,
}

/// One long-lived match session. Owns the pitch and everything on it;
/// entities are repositioned, never replaced, when a match restarts.
#[derive(Debug, Clone)]
pub struct MatchSession {
    pub state: MatchState,
    pub score: Score,
    pub match_start_time: f64,
    pub game_over_start_time: Option<f64>,
    pub field: Field,
    pub player: MovableEntity,
    pub bot: MovableEntity,
    pub ball: Ball,
    pub matchup: Matchup,
    match_duration: f64,
    game_over_dwell: f64,
    dash_trigger_distance: f32,
}

impl MatchSession {
    pub fn new(physics: &PhysicsConfig, matchup: Matchup) -> Self {
        let field = Field::new(physics);
        let kickoff = field.kickoff();
        let penguin_size = glam::Vec2::new(physics.penguin_width, physics.penguin_height);

        let brain = BotBrain::new(DashParams {
            speed: physics.dash_speed,
            duration: physics.dash_duration_secs,
        });

        Self {
            state: MatchState::Menu,
            score: Score::default(),
            match_start_time: 0.0,
            game_over_start_time: None,
            field,
            player: MovableEntity::new(
                kickoff.player,
                penguin_size,
                physics.player_speed,
                matchup.player.color,
                Role::Player,
            ),
            bot: MovableEntity::new(
                kickoff.bot,
                penguin_size,
                physics.bot_speed,
                matchup.opponent.color,
                Role::Bot(brain),
            ),
            ball: Ball::new(
                kickoff.ball,
                physics.ball_radius,
                BallParams::from_config(physics),
            ),
            matchup,
            match_duration: physics.match_duration_secs,
            game_over_dwell: physics.game_over_dwell_secs,
            dash_trigger_distance: physics.dash_trigger_distance,
        }
    }

    /// Advance the session to `now`, `dt` seconds after the previous tick.
    pub fn tick<I: InputSource + ?Sized>(&mut self, now: f64, dt: f32, input: &I) -> TickReport {
        let mut report = TickReport::default();
        let before = self.state;

        match self.state {
            MatchState::Menu => {
                if input.is_held(Action::Start) {
                    self.begin_match(now);
                }
            }
            MatchState::Playing => {
                if now - self.match_start_time >= self.match_duration {
                    self.state = MatchState::GameOver;
                    self.game_over_start_time = Some(now);
                    tracing::info!(
                        "Full time: {} {} - {} {} ({:?})",
                        self.matchup.player.name,
                        self.score.player,
                        self.score.bot,
                        self.matchup.opponent.name,
                        self.score.outcome()
                    );
                } else {
                    report.events = self.step_physics(dt, now, input);
                    debug_assert!(self.field.bounds().contains_rect(&self.player.bounds()));
                    debug_assert!(self.field.bounds().contains_rect(&self.bot.bounds()));
                }
            }
            MatchState::GameOver => {
                let dwell_over = self
                    .game_over_start_time
                    .map_or(true, |t| now - t >= self.game_over_dwell);
                if dwell_over {
                    self.begin_match(now);
                }
            }
        }

        if self.state != before {
            tracing::debug!("Session {:?} -> {:?} at {:.3}", before, self.state, now);
            report.transition = Some((before, self.state));
        }
        report
    }

    /// Fresh match: zero scores, kickoff layout, clock restarted
    fn begin_match(&mut self, now: f64) {
        self.score = Score::default();
        self.match_start_time = now;
        self.game_over_start_time = None;
        self.state = MatchState::Playing;
        physics::reset_positions(&mut self.pitch());
        tracing::info!(
            "Kickoff: {} vs {}",
            self.matchup.player.name,
            self.matchup.opponent.name
        );
    }

    fn pitch(&mut self) -> Pitch<'_> {
        Pitch {
            field: &self.field,
            player: &mut self.player,
            bot: &mut self.bot,
            ball: &mut self.ball,
        }
    }

    fn step_physics<I: InputSource + ?Sized>(&mut self, dt: f32, now: f64, input: &I) -> PhysicsEvents {
        let dash_trigger_distance = self.dash_trigger_distance;
        let mut pitch = self.pitch();

        let moved = physics::advance(&mut pitch, input, dt, now);
        let mut events = physics::resolve_collisions(&mut pitch, input, now, dash_trigger_distance);
        events.wall_bounce = moved.wall_bounce;

        if let Some(side) = events.goal {
            self.score.credit(side);
            tracing::info!(
                "Goal for {:?}: {} - {}",
                side,
                self.score.player,
                self.score.bot
            );
        }
        if events.dash_started {
            tracing::debug!("Bot dash at {:.3}", now);
        }
        events
    }

    /// Seconds since kickoff, zero outside a match
    pub fn elapsed(&self, now: f64) -> f64 {
        match self.state {
            MatchState::Menu => 0.0,
            MatchState::Playing => (now - self.match_start_time).max(0.0),
            MatchState::GameOver => self.match_duration,
        }
    }

    pub fn remaining_time(&self, now: f64) -> f64 {
        (self.match_duration - self.elapsed(now)).max(0.0)
    }

    /// Final result, once the match is over
    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            MatchState::GameOver => Some(self.score.outcome()),
            _ => None,
        }
    }

    pub fn snapshot(&self, now: f64) -> FrameSnapshot {
        let view = |e: &MovableEntity| EntityView {
            pos: e.pos,
            size: e.size,
            color: e.color,
            dashing: e.brain().is_some_and(|b| b.is_dashing()),
        };

        FrameSnapshot {
            state: self.state,
            field: self.field,
            player: view(&self.player),
            bot: view(&self.bot),
            ball: BallView {
                pos: self.ball.pos,
                radius: self.ball.radius,
            },
            score: self.score,
            remaining_secs: self.remaining_time(now),
            outcome: self.outcome(),
            player_team: self.matchup.player.name,
            opponent_team: self.matchup.opponent.name,
        }
    }
}
