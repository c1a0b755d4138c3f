// Penguinfut configuration types
// All settings default to the tuned values of the arcade prototype

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub keybindings: KeyBindings,
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub teams: TeamsConfig,
    #[serde(default)]
    pub input: InputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KeyBindings {
    pub move_left: String,
    pub move_right: String,
    pub move_up: String,
    pub move_down: String,

    // Dash trigger when close to the bot
    pub kick: String,

    // Leaves the title screen
    pub start: String,
    pub quit: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: "Left".to_string(),
            move_right: "Right".to_string(),
            move_up: "Up".to_string(),
            move_down: "Down".to_string(),
            kick: "Space".to_string(),
            start: "Enter".to_string(),
            quit: "Q".to_string(),
        }
    }
}

/// How ball friction relates to frame time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrictionModel {
    /// Multiply velocity by `ball_friction` once per tick, whatever the tick length.
    PerFrame,
    /// Scale the decay by elapsed time, as if ticks ran at 60 Hz.
    TimeScaled,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PhysicsConfig {
    // Play area in pixels
    pub field_width: f32,
    pub field_height: f32,

    // Goal mouths on the short edges
    pub goal_width: f32,
    pub goal_height: f32,

    // Penguin bounding box
    pub penguin_width: f32,
    pub penguin_height: f32,

    // Movement speeds in pixels per second
    pub player_speed: f32,
    pub bot_speed: f32,

    pub ball_radius: f32,
    pub ball_friction: f32,
    pub friction_model: FrictionModel,

    // Below this speed the ball stops dead
    pub rest_speed: f32,

    // Extra push away from a wall after a bounce, per second of frame time
    pub wall_kick: f32,

    // Ball speed right after a kick
    pub kick_speed: f32,

    pub dash_speed: f32,
    pub dash_duration_secs: f64,
    pub dash_trigger_distance: f32,

    pub match_duration_secs: f64,
    pub game_over_dwell_secs: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            field_width: 1200.0,
            field_height: 800.0,
            goal_width: 50.0,
            goal_height: 150.0,
            penguin_width: 50.0,
            penguin_height: 50.0,
            player_speed: 300.0,
            bot_speed: 200.0,
            ball_radius: 20.0,
            ball_friction: 0.99,
            friction_model: FrictionModel::PerFrame,
            rest_speed: 1.0,
            wall_kick: 60.0,
            kick_speed: 720.0,
            dash_speed: 600.0,
            dash_duration_secs: 0.5,
            dash_trigger_distance: 80.0,
            match_duration_secs: 60.0,
            game_over_dwell_secs: 5.0,
        }
    }
}

impl PhysicsConfig {
    /// Replace unusable values with their defaults, logging each one.
    ///
    /// Sizes, speeds and durations must be finite and positive, friction
    /// must lie in (0, 1], and a penguin must fit on the pitch.
    pub fn sanitize(&mut self) {
        let defaults = Self::default();

        macro_rules! positive {
            ($($field:ident),*) => {$(
                if !(self.$field.is_finite() && self.$field > 0.0) {
                    tracing::warn!(
                        "physics.{} = {} is not usable, using {}",
                        stringify!($field),
                        self.$field,
                        defaults.$field
                    );
                    self.$field = defaults.$field;
                }
            )*};
        }

        positive!(
            field_width,
            field_height,
            goal_width,
            goal_height,
            penguin_width,
            penguin_height,
            player_speed,
            bot_speed,
            ball_radius,
            kick_speed,
            dash_speed,
            dash_duration_secs,
            dash_trigger_distance,
            match_duration_secs,
            game_over_dwell_secs
        );

        if !(self.ball_friction.is_finite() && self.ball_friction > 0.0 && self.ball_friction <= 1.0) {
            tracing::warn!(
                "physics.ball_friction = {} is outside (0, 1], using {}",
                self.ball_friction,
                defaults.ball_friction
            );
            self.ball_friction = defaults.ball_friction;
        }
        if !(self.rest_speed.is_finite() && self.rest_speed >= 0.0) {
            tracing::warn!("physics.rest_speed = {} is not usable, using {}", self.rest_speed, defaults.rest_speed);
            self.rest_speed = defaults.rest_speed;
        }
        if !(self.wall_kick.is_finite() && self.wall_kick >= 0.0) {
            tracing::warn!("physics.wall_kick = {} is not usable, using {}", self.wall_kick, defaults.wall_kick);
            self.wall_kick = defaults.wall_kick;
        }

        if self.penguin_width >= self.field_width || self.penguin_height >= self.field_height {
            tracing::warn!(
                "{}x{} penguins do not fit a {}x{} pitch, using default sizes",
                self.penguin_width,
                self.penguin_height,
                self.field_width,
                self.field_height
            );
            self.field_width = defaults.field_width;
            self.field_height = defaults.field_height;
            self.penguin_width = defaults.penguin_width;
            self.penguin_height = defaults.penguin_height;
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    // Target frames per second
    pub target_fps: u64,

    // Longest frame time fed to the simulation, in seconds
    pub max_frame_dt: f32,

    // Pitch markings color (RGB values 0-255)
    pub line_color: [u8; 3],

    // Ball color
    pub ball_color: [u8; 3],

    // Scoreboard and clock color
    pub score_color: [u8; 3],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            max_frame_dt: 0.1,
            line_color: [120, 160, 120],
            ball_color: [255, 255, 255],
            score_color: [255, 255, 255],
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TeamsConfig {
    // Team the player's penguin wears
    pub player_team: u32,

    // Fixed opponent; drawn at random when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opponent_team: Option<u32>,
}

impl Default for TeamsConfig {
    fn default() -> Self {
        Self {
            player_team: 1,
            opponent_team: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    // How long a key press counts as held when the terminal never reports the release
    pub hold_timeout_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            hold_timeout_ms: 300,
        }
    }
}
