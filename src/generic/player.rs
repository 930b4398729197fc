use std::fmt::Display;

use serde::{Deserialize, Serialize};

pub type PlayerIndex = usize;

/// Emoji offered for player tokens, three per colour group.
pub const ICON_OPTIONS: [&str; 41] = [
    // blue
    "🔵", "🐟", "💧",
    // orange
    "🟠", "🐅", "🎃",
    // green
    "🟢", "🐢", "🍀",
    // white
    "⚪", "🐇", "❄️",
    // pink
    "💗", "🐷", "🌸",
    // turquoise
    "🩵", "🐬", "💎",
    // rose
    "💖", "🦩", "🌹",
    // yellow
    "🟡", "🐥", "🌟",
    // red
    "🔴", "🦊", "🍎",
    // black
    "⚫", "🐈‍⬛", "🖤",
    // purple
    "🟣", "🐙", "🍇",
    // misc
    "🚀", "🎈", "🔥", "🎯", "🎲", "🏀", "⚽", "🎸",
];

/// The token a player is drawn with. Never interpreted, only passed through.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Icon(String);

impl Icon {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First icon of a colour group, so neighbouring players differ.
    pub fn default_for(player: PlayerIndex) -> Self {
        Self::new(ICON_OPTIONS[(player * 3) % ICON_OPTIONS.len()])
    }
}

impl From<&str> for Icon {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl Display for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
