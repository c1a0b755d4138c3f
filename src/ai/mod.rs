// AI module for the bot opponent

pub mod bot;

pub use bot::{BotBrain, DashParams};
