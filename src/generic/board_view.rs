use itertools::Itertools;
use log::warn;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{FieldTrack, Icon, PlayerIndex, SessionData};

/// A token as the renderer should draw it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PlacedToken {
    pub player: PlayerIndex,
    pub icon: Icon,
    pub slot: usize,
    /// percent from the top of the board image
    pub top: f32,
    /// percent from the left of the board image
    pub left: f32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BoardView {
    pub session_id: Uuid,
    pub tokens: Vec<PlacedToken>,
}

impl BoardView {
    /// Tokens sharing a field are laid out in rows of this many.
    pub const TOKENS_PER_ROW: usize = 3;
    pub const ROW_SPACING: f32 = 3.0;
    pub const COLUMN_SPACING: f32 = 2.0;

    pub fn build(session: &SessionData, track: &FieldTrack) -> Self {
        let occupancy = session
            .active_positions()
            .into_iter()
            .map(|(player, slot)| (slot, player))
            .into_group_map();

        let mut tokens = Vec::new();
        for (slot, players) in occupancy.into_iter().sorted_by_key(|(slot, _)| *slot) {
            let Some((top, left)) = track.coordinates(slot) else {
                warn!(
                    "session {}: field {} is not on the track, skipping its tokens",
                    session.session_id, slot
                );
                continue;
            };
            for (offset, player) in players.into_iter().enumerate() {
                let row = offset / Self::TOKENS_PER_ROW;
                let column = offset % Self::TOKENS_PER_ROW;
                tokens.push(PlacedToken {
                    player,
                    icon: session.settings.icon(player),
                    slot,
                    top: top + row as f32 * Self::ROW_SPACING,
                    left: left + column as f32 * Self::COLUMN_SPACING,
                });
            }
        }

        Self {
            session_id: session.session_id,
            tokens,
        }
    }
}
