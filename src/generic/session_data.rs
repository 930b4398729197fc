use crate::{FieldTrack, InvalidMove, InvalidSettings, Move, PlayerIndex, SessionState, Settings};
use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One interactive session: its settings and where the tokens stand.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SessionData {
    pub session_id: Uuid,
    pub settings: Settings,
    pub state: SessionState,
}

impl SessionData {
    pub fn new_with_id(session_id: Uuid) -> Self {
        let settings = Settings::default();
        let state = SessionState::with_players(settings.num_players);
        Self {
            session_id,
            settings,
            state,
        }
    }

    pub fn configure(&mut self, settings: Settings) -> Result<(), InvalidSettings> {
        settings.validate()?;
        debug!(
            "session {} now has {} players",
            self.session_id, settings.num_players
        );
        self.state.initialize(settings.num_players);
        self.settings = settings;
        Ok(())
    }

    pub fn apply_move(&mut self, track: &FieldTrack, new_move: Move) -> Result<usize, InvalidMove> {
        if new_move.player >= self.settings.num_players {
            return Err(InvalidMove::UnknownPlayer {
                player: new_move.player,
            });
        }
        if !Move::STEP_RANGE.contains(&new_move.steps) {
            return Err(InvalidMove::StepsOutOfRange {
                steps: new_move.steps,
            });
        }
        self.state
            .move_player(track, new_move.player, new_move.steps)
    }

    pub fn reset_positions(&mut self) {
        debug!("resetting positions in session {}", self.session_id);
        self.state.reset_all(self.settings.num_players);
    }

    /// Positions of the players currently in the game, by player index.
    pub fn active_positions(&self) -> Vec<(PlayerIndex, usize)> {
        (0..self.settings.num_players)
            .filter_map(|player| self.state.position(player).map(|slot| (player, slot)))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Icon;

    fn track_of(len: usize) -> FieldTrack {
        FieldTrack::new(vec![(0.0, 0.0); len]).unwrap()
    }

    #[test]
    fn new_session_uses_default_settings() {
        let session = SessionData::new_with_id(Uuid::new_v4());
        assert_eq!(session.settings, Settings::default());
        assert_eq!(
            session.active_positions(),
            (0..Settings::DEFAULT_PLAYERS).map(|p| (p, 0)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn two_player_scenario() {
        let track = track_of(35);
        let mut session = SessionData::new_with_id(Uuid::new_v4());
        session.configure(Settings::new(2, vec![]).unwrap()).unwrap();
        assert_eq!(session.apply_move(&track, Move::new(0, 3)), Ok(3));
        assert_eq!(session.apply_move(&track, Move::new(0, -5)), Ok(33));
        assert_eq!(session.active_positions(), vec![(0, 33), (1, 0)]);
    }

    #[test]
    fn steps_are_limited() {
        let track = track_of(35);
        let mut session = SessionData::new_with_id(Uuid::new_v4());
        assert_eq!(session.apply_move(&track, Move::new(0, 10)), Ok(10));
        assert_eq!(session.apply_move(&track, Move::new(0, -10)), Ok(0));
        assert_eq!(
            session.apply_move(&track, Move::new(0, 11)),
            Err(InvalidMove::StepsOutOfRange { steps: 11 })
        );
        assert_eq!(
            session.apply_move(&track, Move::new(0, -11)),
            Err(InvalidMove::StepsOutOfRange { steps: -11 })
        );
    }

    #[test]
    fn players_beyond_the_player_count_cannot_move() {
        let track = track_of(35);
        let mut session = SessionData::new_with_id(Uuid::new_v4());
        session.apply_move(&track, Move::new(5, 4)).unwrap();
        session.configure(Settings::new(3, vec![]).unwrap()).unwrap();
        assert_eq!(
            session.apply_move(&track, Move::new(5, 1)),
            Err(InvalidMove::UnknownPlayer { player: 5 })
        );
        assert_eq!(session.active_positions(), vec![(0, 0), (1, 0), (2, 0)]);

        // growing the game again brings the old token back where it was
        session.configure(Settings::new(6, vec![]).unwrap()).unwrap();
        assert_eq!(session.state.position(5), Some(4));
    }

    #[test]
    fn invalid_settings_leave_session_untouched() {
        let mut session = SessionData::new_with_id(Uuid::new_v4());
        let before = session.clone();
        assert_eq!(
            session.configure(Settings {
                num_players: 12,
                icons: vec![Icon::from("🎲")]
            }),
            Err(InvalidSettings::PlayerCountOutOfRange { num_players: 12 })
        );
        assert_eq!(session, before);
    }

    #[test]
    fn reset_positions() {
        let track = track_of(35);
        let mut session = SessionData::new_with_id(Uuid::new_v4());
        session.apply_move(&track, Move::new(1, 9)).unwrap();
        session.apply_move(&track, Move::new(6, -2)).unwrap();
        session.reset_positions();
        assert!(session
            .active_positions()
            .iter()
            .all(|(_, position)| *position == 0));
    }
}
