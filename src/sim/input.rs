//! Keyboard input routing
//!
//! Keys are mapped to actions based on the mode, the session state and
//! whether the category prompt is open. Anything that does not map is
//! ignored rather than rejected.

use serde::{Deserialize, Serialize};

use super::registry::{GameMode, RainIntensity, Theme, WasteCategory};
use super::state::SessionState;

/// A key press as delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Escape,
    Space,
    /// Printable key, lowercased
    Char(char),
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "Escape" | "Esc" => Some(Key::Escape),
            " " | "Spacebar" => Some(Key::Space),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Key::Char(c.to_ascii_lowercase())),
                    _ => None,
                }
            }
        }
    }
}

/// What a key press asks the engine to do
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Move the actor by one step in the given direction (-1 or +1)
    Move(f32),
    TogglePause,
    OpenCategoryPrompt,
    PickCategory(WasteCategory),
    SetTheme(Theme),
    SetIntensity(RainIntensity),
}

/// Map a key to an action for the current context
pub fn route(mode: GameMode, state: SessionState, category_prompt: bool, key: Key) -> Option<Action> {
    match state {
        SessionState::Playing => route_playing(mode, key),
        SessionState::Paused => route_paused(mode, category_prompt, key),
        SessionState::Menu | SessionState::Ended => None,
    }
}

fn route_playing(mode: GameMode, key: Key) -> Option<Action> {
    match key {
        Key::Left | Key::Char('a') => return Some(Action::Move(-1.0)),
        Key::Right | Key::Char('d') => return Some(Action::Move(1.0)),
        Key::Escape | Key::Char('p') => return Some(Action::TogglePause),
        _ => {}
    }

    match (mode, key) {
        (GameMode::TrashSorter, Key::Char('w') | Key::Space) => Some(Action::OpenCategoryPrompt),
        (GameMode::RainwaterHero, Key::Char(c @ '1'..='4')) => Theme::from_slot(digit(c)).map(Action::SetTheme),
        (GameMode::RainwaterHero, Key::Char('q')) => Some(Action::SetIntensity(RainIntensity::Mild)),
        (GameMode::RainwaterHero, Key::Char('w')) => Some(Action::SetIntensity(RainIntensity::Normal)),
        (GameMode::RainwaterHero, Key::Char('e')) => Some(Action::SetIntensity(RainIntensity::Heavy)),
        _ => None,
    }
}

fn route_paused(mode: GameMode, category_prompt: bool, key: Key) -> Option<Action> {
    match key {
        Key::Escape | Key::Char('p') => Some(Action::TogglePause),
        Key::Char(c @ '1'..='5') if mode == GameMode::TrashSorter && category_prompt => {
            WasteCategory::from_slot(digit(c)).map(Action::PickCategory)
        }
        _ => None,
    }
}

fn digit(c: char) -> u8 {
    c.to_digit(10).map_or(0, |d| d as u8)
}
