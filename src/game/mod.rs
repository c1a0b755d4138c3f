pub mod ball;
pub mod driver;
pub mod entity;
pub mod field;
pub mod geometry;
pub mod input;
pub mod physics;
pub mod snapshot;
pub mod state;
pub mod teams;

pub use driver::{Clock, FrameDriver, SystemClock};
pub use input::{Action, HeldKeys, InputSource, KeyTracker};
pub use snapshot::{FrameSnapshot, Renderer};
pub use state::{MatchSession, MatchState, Outcome};
pub use teams::Matchup;
