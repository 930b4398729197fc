use std::{fmt::Display, ops::RangeInclusive};

use serde::{Deserialize, Serialize};

use crate::{Icon, PlayerIndex};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvalidSettings {
    PlayerCountOutOfRange { num_players: usize },
    TooManyIcons { icons: usize, num_players: usize },
}

impl Display for InvalidSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidSettings::PlayerCountOutOfRange { num_players } => write!(
                f,
                "{} players requested, but between {} and {} can play",
                num_players,
                Settings::PLAYER_RANGE.start(),
                Settings::PLAYER_RANGE.end()
            ),
            InvalidSettings::TooManyIcons { icons, num_players } => write!(
                f,
                "got {} icons for only {} players",
                icons, num_players
            ),
        }
    }
}

impl std::error::Error for InvalidSettings {}

/// What the settings sidebar hands to a session.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub num_players: usize,
    /// Chosen icons by player index. Players without an entry use
    /// [`Icon::default_for`].
    #[serde(default)]
    pub icons: Vec<Icon>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            num_players: Self::DEFAULT_PLAYERS,
            icons: Vec::new(),
        }
    }
}

impl Settings {
    pub const PLAYER_RANGE: RangeInclusive<usize> = 2..=8;
    pub const DEFAULT_PLAYERS: usize = 7;

    pub fn new(num_players: usize, icons: Vec<Icon>) -> Result<Self, InvalidSettings> {
        let settings = Self { num_players, icons };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), InvalidSettings> {
        if !Self::PLAYER_RANGE.contains(&self.num_players) {
            return Err(InvalidSettings::PlayerCountOutOfRange {
                num_players: self.num_players,
            });
        }
        if self.icons.len() > self.num_players {
            return Err(InvalidSettings::TooManyIcons {
                icons: self.icons.len(),
                num_players: self.num_players,
            });
        }
        Ok(())
    }

    pub fn icon(&self, player: PlayerIndex) -> Icon {
        self.icons
            .get(player)
            .cloned()
            .unwrap_or_else(|| Icon::default_for(player))
    }
}
