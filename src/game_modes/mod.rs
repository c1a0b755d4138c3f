mod common;
mod vs_bot;

pub use common::frame_duration;
pub use vs_bot::run_match;
