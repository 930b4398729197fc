use std::{collections::BTreeMap, fmt::Display};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{FieldTrack, PlayerIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvalidMove {
    UnknownPlayer { player: PlayerIndex },
    StepsOutOfRange { steps: i64 },
}

impl Display for InvalidMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidMove::UnknownPlayer { player } => {
                write!(f, "player {} is not part of this session", player)
            }
            InvalidMove::StepsOutOfRange { steps } => {
                write!(f, "cannot move {} steps at once", steps)
            }
        }
    }
}

impl std::error::Error for InvalidMove {}

/// Where every player's token currently stands.
///
/// Every stored slot is below the length of the track it was moved on.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct SessionState {
    positions: BTreeMap<PlayerIndex, usize>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_players(num_players: usize) -> Self {
        let mut state = Self::new();
        state.initialize(num_players);
        state
    }

    /// Puts players that are not tracked yet on the start field. Players that
    /// already have a position keep it.
    pub fn initialize(&mut self, num_players: usize) {
        for player in 0..num_players {
            self.positions.entry(player).or_insert(0);
        }
    }

    pub fn move_player(
        &mut self,
        track: &FieldTrack,
        player: PlayerIndex,
        steps: i64,
    ) -> Result<usize, InvalidMove> {
        let position = self
            .positions
            .get_mut(&player)
            .ok_or(InvalidMove::UnknownPlayer { player })?;
        let next = track.advance(*position, steps);
        debug!(
            "player {} moves {} steps: field {} -> {}",
            player, steps, position, next
        );
        *position = next;
        Ok(next)
    }

    pub fn reset_all(&mut self, num_players: usize) {
        for player in 0..num_players {
            self.positions.insert(player, 0);
        }
    }

    pub fn position(&self, player: PlayerIndex) -> Option<usize> {
        self.positions.get(&player).copied()
    }

    /// All tracked positions, including players left over from a larger
    /// player count.
    pub fn positions(&self) -> &BTreeMap<PlayerIndex, usize> {
        &self.positions
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn track_of(len: usize) -> FieldTrack {
        FieldTrack::new(vec![(0.0, 0.0); len]).unwrap()
    }

    #[test]
    fn new_players_start_on_first_field() {
        let state = SessionState::with_players(4);
        assert_eq!(state.positions().len(), 4);
        assert!(state.positions().values().all(|position| *position == 0));
    }

    #[test]
    fn initialize_is_idempotent() {
        let mut state = SessionState::with_players(3);
        let before = state.clone();
        state.initialize(3);
        assert_eq!(state, before);
    }

    #[test]
    fn initialize_keeps_existing_positions() {
        let track = track_of(35);
        let mut state = SessionState::with_players(2);
        state.move_player(&track, 1, 4).unwrap();
        state.initialize(5);
        assert_eq!(state.position(1), Some(4));
        assert_eq!(state.position(4), Some(0));
    }

    #[test]
    fn moving_forward_and_back() {
        let track = track_of(35);
        let mut state = SessionState::with_players(2);
        assert_eq!(state.move_player(&track, 0, 3), Ok(3));
        assert_eq!(state.move_player(&track, 0, -5), Ok(33));
        assert_eq!(state.position(0), Some(33));
        assert_eq!(state.position(1), Some(0));
    }

    #[test]
    fn moving_past_the_last_field() {
        let track = track_of(35);
        let mut state = SessionState::with_players(2);
        state.move_player(&track, 1, -1).unwrap();
        assert_eq!(state.position(1), Some(34));
        assert_eq!(state.move_player(&track, 1, 2), Ok(1));
    }

    #[test]
    fn moving_an_unknown_player() {
        let track = track_of(35);
        let mut state = SessionState::with_players(2);
        assert_eq!(
            state.move_player(&track, 2, 1),
            Err(InvalidMove::UnknownPlayer { player: 2 })
        );
        assert_eq!(state, SessionState::with_players(2));
    }

    #[test]
    fn reset_after_moves() {
        let track = track_of(35);
        let mut state = SessionState::with_players(4);
        for (player, steps) in [(0, 7), (1, -3), (2, 10), (3, 1), (0, 9)] {
            state.move_player(&track, player, steps).unwrap();
        }
        state.reset_all(4);
        assert_eq!(state, SessionState::with_players(4));
    }

    #[test]
    fn reset_only_touches_current_players() {
        let track = track_of(35);
        let mut state = SessionState::with_players(4);
        state.move_player(&track, 3, 6).unwrap();
        state.move_player(&track, 0, 2).unwrap();
        state.reset_all(2);
        assert_eq!(state.position(0), Some(0));
        assert_eq!(state.position(3), Some(6));
    }
}
