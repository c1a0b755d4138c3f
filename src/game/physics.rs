use glam::Vec2;

use super::ball::Ball;
use super::entity::MovableEntity;
use super::field::Field;
use super::geometry::{distance, normalize, rects_overlap};
use super::input::{Action, InputSource};

/// The two sides of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Bot,
}

/// What happened during one collision pass
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PhysicsEvents {
    pub player_kicked: bool,
    pub bot_kicked: bool,
    pub wall_bounce: bool,
    pub goal: Option<Side>,
    pub penguins_collided: bool,
    pub dash_started: bool,
}

impl PhysicsEvents {
    pub fn any(&self) -> bool {
        self.player_kicked
            || self.bot_kicked
            || self.wall_bounce
            || self.goal.is_some()
            || self.penguins_collided
            || self.dash_started
    }
}

/// Everything on the pitch, borrowed for one pass
pub struct Pitch<'a> {
    pub field: &'a Field,
    pub player: &'a mut MovableEntity,
    pub bot: &'a mut MovableEntity,
    pub ball: &'a mut Ball,
}

/// Move every entity and the ball by one frame. Wall bounces are checked
/// right after the ball integrates.
pub fn advance<I: InputSource + ?Sized>(pitch: &mut Pitch, input: &I, dt: f32, now: f64) -> PhysicsEvents {
    let ctx = super::entity::StepContext {
        dt,
        now,
        ball_pos: pitch.ball.pos,
        field: pitch.field,
    };
    pitch.player.update(input, &ctx);
    pitch.bot.update(input, &ctx);

    pitch.ball.integrate(dt);
    PhysicsEvents {
        wall_bounce: pitch.ball.bounce_off_walls(dt, pitch.field),
        ..PhysicsEvents::default()
    }
}

/// Resolve contacts for this frame, in order: kicks (player first, so
/// the bot's kick wins a tie), goals, penguin separation, dash trigger.
pub fn resolve_collisions<I: InputSource + ?Sized>(
    pitch: &mut Pitch,
    input: &I,
    now: f64,
    dash_trigger_distance: f32,
) -> PhysicsEvents {
    let mut events = PhysicsEvents::default();

    let player_box = pitch.player.bounds();
    let bot_box = pitch.bot.bounds();
    let ball_box = pitch.ball.bounds();

    if rects_overlap(&player_box, &ball_box) {
        events.player_kicked = pitch.ball.kick(pitch.player.pos);
    }
    if rects_overlap(&bot_box, &ball_box) {
        events.bot_kicked = pitch.ball.kick(pitch.bot.pos);
    }

    if rects_overlap(&ball_box, &pitch.field.goal_right) {
        events.goal = Some(Side::Player);
    } else if rects_overlap(&ball_box, &pitch.field.goal_left) {
        events.goal = Some(Side::Bot);
    }
    if events.goal.is_some() {
        reset_positions(pitch);
    }

    // Goals move the penguins, so measure them again
    if rects_overlap(&pitch.player.bounds(), &pitch.bot.bounds()) {
        events.penguins_collided = separate(pitch.player, pitch.bot, pitch.field);
    }

    if input.is_held(Action::Kick)
        && distance(pitch.player.pos, pitch.bot.pos) < dash_trigger_distance
    {
        // Along the line from the player through the bot
        let direction = normalize(pitch.bot.pos - pitch.player.pos);
        if direction != Vec2::ZERO {
            if let Some(brain) = pitch.bot.brain_mut() {
                events.dash_started = brain.start_dash(direction, now);
            }
        }
    }

    events
}

/// Back to the kickoff layout with a dead ball
pub fn reset_positions(pitch: &mut Pitch) {
    let kickoff = pitch.field.kickoff();
    pitch.player.reset_to(kickoff.player);
    pitch.bot.reset_to(kickoff.bot);
    pitch.ball.reset_to(kickoff.ball);
}

/// Push two overlapping penguins apart along the line between their
/// centers, each moving half the overlap. Coincident centers have no
/// separation axis and are left as they are.
fn separate(a: &mut MovableEntity, b: &mut MovableEntity, field: &Field) -> bool {
    let dist = distance(a.pos, b.pos);
    if dist <= 0.0 {
        return false;
    }

    let overlap = a.half_width() + b.half_width() - dist;
    if overlap <= 0.0 {
        return false;
    }

    let axis = (b.pos - a.pos) / dist;
    let push = axis * (overlap / 2.0);
    a.pos -= push;
    b.pos += push;
    a.clamp_to(field);
    b.clamp_to(field);
    true
}
