use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use std::collections::{HashMap, HashSet};
use std::io;
use std::time::{Duration, Instant};

use crate::config::KeyBindings;

/// Logical actions the simulation can query
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Kick,
    Start,
    Quit,
}

/// Anything that can answer "is this action held right now"
pub trait InputSource {
    fn is_held(&self, action: Action) -> bool;
}

/// A sampled table of held actions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeldKeys {
    held: HashSet<Action>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with(actions: &[Action]) -> Self {
        Self {
            held: actions.iter().copied().collect(),
        }
    }

    pub fn press(&mut self, action: Action) {
        self.held.insert(action);
    }
}

impl InputSource for HeldKeys {
    fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }
}

/// Parse a binding such as "Left", "Space" or "W" into a key code
pub fn parse_key(binding: &str) -> Option<KeyCode> {
    match binding.to_ascii_lowercase().as_str() {
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "enter" | "return" => Some(KeyCode::Enter),
        "space" => Some(KeyCode::Char(' ')),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(KeyCode::Char(c)),
                _ => None,
            }
        }
    }
}

/// Lower-case character keys so bindings ignore shift and caps lock
fn normalize_code(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Turns terminal key events into a held-key table.
///
/// Terminals that support keyboard enhancement report releases and the
/// table follows them exactly. Elsewhere a press counts as held until
/// `hold_timeout` passes without a repeat.
pub struct KeyTracker {
    bindings: HashMap<KeyCode, Action>,
    pressed_at: HashMap<Action, Instant>,
    hold_timeout: Duration,
}

impl KeyTracker {
    pub fn new(keys: &KeyBindings, hold_timeout: Duration) -> Self {
        let pairs = [
            (&keys.move_left, Action::MoveLeft),
            (&keys.move_right, Action::MoveRight),
            (&keys.move_up, Action::MoveUp),
            (&keys.move_down, Action::MoveDown),
            (&keys.kick, Action::Kick),
            (&keys.start, Action::Start),
            (&keys.quit, Action::Quit),
        ];

        let mut bindings = HashMap::new();
        for (binding, action) in pairs {
            match parse_key(binding) {
                Some(code) => {
                    bindings.insert(normalize_code(code), action);
                }
                None => tracing::warn!("Ignoring unknown key binding {:?} for {:?}", binding, action),
            }
        }
        // Esc always quits
        bindings.entry(KeyCode::Esc).or_insert(Action::Quit);

        Self {
            bindings,
            pressed_at: HashMap::new(),
            hold_timeout,
        }
    }

    /// Apply one key event observed at `now`
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let Some(&action) = self.bindings.get(&normalize_code(key.code)) else {
            return;
        };
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.pressed_at.insert(action, now);
            }
            KeyEventKind::Release => {
                self.pressed_at.remove(&action);
            }
        }
    }

    /// Drain every pending terminal event without blocking
    pub fn poll(&mut self) -> io::Result<()> {
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key, Instant::now());
            }
        }
        Ok(())
    }

    /// Held actions as of `now`
    pub fn sample(&self, now: Instant) -> HeldKeys {
        let mut held = HeldKeys::new();
        for (&action, &at) in &self.pressed_at {
            if now.duration_since(at) < self.hold_timeout {
                held.press(action);
            }
        }
        held
    }
}
