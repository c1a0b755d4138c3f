use std::time::{Duration, Instant};

use anyhow::Context;

use crate::game::{Action, Clock, FrameDriver, HeldKeys, InputSource, KeyTracker, Renderer};

use super::common::limit_frame_rate;

/// Where the loop gets its held-key table each frame
pub trait FrameInput {
    fn sample(&mut self, now: Instant) -> anyhow::Result<HeldKeys>;
}

impl FrameInput for KeyTracker {
    fn sample(&mut self, now: Instant) -> anyhow::Result<HeldKeys> {
        self.poll().context("reading terminal input")?;
        Ok(KeyTracker::sample(self, now))
    }
}

/// Single player against the bot until the quit key is pressed.
///
/// Each frame: sample keys, step the simulation, draw, then sleep off the
/// rest of `frame_budget`.
pub fn run_match<C, R, F>(
    driver: &mut FrameDriver<C>,
    renderer: &mut R,
    input: &mut F,
    frame_budget: Duration,
) -> anyhow::Result<()>
where
    C: Clock,
    R: Renderer + ?Sized,
    F: FrameInput + ?Sized,
{
    tracing::info!("Match loop started, frame budget {:?}", frame_budget);
    let mut frames: u64 = 0;

    loop {
        let frame_start = Instant::now();

        let held = input.sample(frame_start)?;
        if held.is_held(Action::Quit) {
            let score = driver.session().score;
            tracing::info!(
                "Quit after {} frames at {} - {}",
                frames,
                score.player,
                score.bot
            );
            return Ok(());
        }

        let snapshot = driver.step(&held);
        let events = driver.last_report().events;
        if events.any() {
            tracing::trace!("Frame {}: {:?}", frames, events);
        }
        renderer.render(&snapshot)?;
        frames += 1;

        limit_frame_rate(frame_start, frame_budget);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PhysicsConfig;
    use crate::game::teams::{team_by_id, Matchup};
    use crate::game::driver::ManualClock;
    use crate::game::{FrameSnapshot, MatchSession, MatchState};
    use std::collections::VecDeque;

    /// Replays a fixed list of frames, advancing the clock between them,
    /// then presses quit.
    struct Script<'a> {
        clock: &'a ManualClock,
        frames: VecDeque<HeldKeys>,
        step: f64,
    }

    impl FrameInput for Script<'_> {
        fn sample(&mut self, _now: Instant) -> anyhow::Result<HeldKeys> {
            self.clock.advance(self.step);
            Ok(self
                .frames
                .pop_front()
                .unwrap_or_else(|| HeldKeys::with(&[Action::Quit])))
        }
    }

    #[derive(Default)]
    struct Recorder {
        frames: Vec<FrameSnapshot>,
    }

    impl Renderer for Recorder {
        fn render(&mut self, snapshot: &FrameSnapshot) -> anyhow::Result<()> {
            self.frames.push(snapshot.clone());
            Ok(())
        }
    }

    fn session() -> MatchSession {
        let matchup = Matchup {
            player: team_by_id(1).unwrap(),
            opponent: team_by_id(2).unwrap(),
        };
        MatchSession::new(&PhysicsConfig::default(), matchup)
    }

    #[test]
    fn test_quit_before_first_frame() {
        let clock = ManualClock::new(0.0);
        let mut driver = FrameDriver::new(&clock, session(), 0.1);
        let mut renderer = Recorder::default();
        let mut input = Script {
            clock: &clock,
            frames: VecDeque::new(),
            step: 0.0,
        };

        run_match(&mut driver, &mut renderer, &mut input, Duration::ZERO).unwrap();
        assert!(renderer.frames.is_empty());
    }

    #[test]
    fn test_every_frame_is_rendered() {
        let clock = ManualClock::new(0.0);
        let mut driver = FrameDriver::new(&clock, session(), 0.1);
        let mut renderer = Recorder::default();

        let mut frames = VecDeque::new();
        frames.push_back(HeldKeys::new());
        frames.push_back(HeldKeys::with(&[Action::Start]));
        for _ in 0..10 {
            frames.push_back(HeldKeys::with(&[Action::MoveUp]));
        }
        let mut input = Script {
            clock: &clock,
            frames,
            step: 1.0 / 60.0,
        };

        run_match(&mut driver, &mut renderer, &mut input, Duration::ZERO).unwrap();

        assert_eq!(renderer.frames.len(), 12);
        assert_eq!(renderer.frames[0].state, MatchState::Menu);
        assert_eq!(renderer.frames[1].state, MatchState::Playing);

        // Player walked up for ten frames at 300 px/s
        let last = renderer.frames.last().unwrap();
        assert!((last.player.pos.y - (400.0 - 50.0)).abs() < 0.5);
    }

    struct FailingRenderer;

    impl Renderer for FailingRenderer {
        fn render(&mut self, _snapshot: &FrameSnapshot) -> anyhow::Result<()> {
            anyhow::bail!("terminal went away")
        }
    }

    #[test]
    fn test_render_error_stops_loop() {
        let clock = ManualClock::new(0.0);
        let mut driver = FrameDriver::new(&clock, session(), 0.1);
        let mut input = Script {
            clock: &clock,
            frames: VecDeque::from(vec![HeldKeys::new()]),
            step: 0.0,
        };

        let err = run_match(&mut driver, &mut FailingRenderer, &mut input, Duration::ZERO).unwrap_err();
        assert!(err.to_string().contains("terminal went away"));
    }
}
