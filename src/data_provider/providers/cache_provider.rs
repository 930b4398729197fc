use std::{
    collections::{hash_map::Entry, HashMap},
    fmt::Display,
    sync::{Arc, Mutex, MutexGuard},
};

use log::{debug, info};
use uuid::Uuid;

use crate::{
    ClassifyError, DataProvider, ErrorClass, FieldTrack, InvalidMove, InvalidSettings, Move,
    SessionData, Settings, TrackLoadError,
};

#[derive(Clone, Default)]
pub struct CacheProviderArgs {
    pub track: FieldTrack,
}

impl CacheProviderArgs {
    pub fn new(track: FieldTrack) -> Self {
        Self { track }
    }

    /// Uses the track from `FIELD_TRACK_PATH` if set, the printed board
    /// otherwise.
    pub fn from_env() -> Result<Self, TrackLoadError> {
        let track = match std::env::var("FIELD_TRACK_PATH") {
            Ok(path) => FieldTrack::from_file(path)?,
            Err(_) => FieldTrack::reference(),
        };
        info!("Playing on a track of {} fields", track.len());
        Ok(Self { track })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheProviderErrorKind {
    LockError,
    KeyNotFound,
    SessionExists,
    InvalidMove(InvalidMove),
    InvalidSettings(InvalidSettings),
}

impl Display for CacheProviderErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheProviderErrorKind::SessionExists => write!(f, "the session already exists"),
            CacheProviderErrorKind::KeyNotFound => write!(f, "the session does not exist"),
            CacheProviderErrorKind::LockError => write!(f, "could not acquire lock on hashmap"),
            CacheProviderErrorKind::InvalidMove(err) => write!(f, "invalid move: {}", err),
            CacheProviderErrorKind::InvalidSettings(err) => write!(f, "invalid settings: {}", err),
        }
    }
}

impl std::error::Error for CacheProviderErrorKind {}

impl ClassifyError for CacheProviderErrorKind {
    fn class(&self) -> ErrorClass {
        match self {
            CacheProviderErrorKind::LockError => ErrorClass::Internal,
            CacheProviderErrorKind::KeyNotFound => ErrorClass::NotFound,
            CacheProviderErrorKind::SessionExists => ErrorClass::Conflict,
            CacheProviderErrorKind::InvalidMove(_) | CacheProviderErrorKind::InvalidSettings(_) => {
                ErrorClass::InvalidInput
            }
        }
    }
}

impl From<InvalidMove> for CacheProviderErrorKind {
    fn from(err: InvalidMove) -> Self {
        CacheProviderErrorKind::InvalidMove(err)
    }
}

impl From<InvalidSettings> for CacheProviderErrorKind {
    fn from(err: InvalidSettings) -> Self {
        CacheProviderErrorKind::InvalidSettings(err)
    }
}

/// Keeps sessions in memory. Clones share the same sessions.
#[derive(Clone)]
pub struct CacheProvider {
    pub hash_map: Arc<Mutex<HashMap<Uuid, SessionData>>>,
    track: Arc<FieldTrack>,
}

impl Default for CacheProvider {
    fn default() -> Self {
        Self {
            hash_map: Arc::new(Mutex::new(HashMap::new())),
            track: Arc::new(FieldTrack::reference()),
        }
    }
}

impl CacheProvider {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, SessionData>>, CacheProviderErrorKind> {
        self.hash_map
            .lock()
            .map_err(|_| CacheProviderErrorKind::LockError)
    }

    fn with_session<R>(
        &self,
        session_id: Uuid,
        update: impl FnOnce(&mut SessionData) -> Result<R, CacheProviderErrorKind>,
    ) -> Result<R, CacheProviderErrorKind> {
        let mut hash_map = self.lock()?;
        match hash_map.get_mut(&session_id) {
            Some(session) => update(session),
            None => Err(CacheProviderErrorKind::KeyNotFound),
        }
    }
}

impl DataProvider for CacheProvider {
    type Args = CacheProviderArgs;
    type ErrorKind = CacheProviderErrorKind;

    fn new(args: Self::Args) -> Result<Self, Self::ErrorKind>
    where
        Self: Sized,
    {
        Ok(Self {
            hash_map: Arc::new(Mutex::new(HashMap::new())),
            track: Arc::new(args.track),
        })
    }

    fn get_sessions(&self) -> Result<Vec<Uuid>, Self::ErrorKind> {
        Ok(self.lock()?.keys().copied().collect())
    }

    fn get_session_data(&self, session_id: Uuid) -> Result<SessionData, Self::ErrorKind> {
        self.lock()?
            .get(&session_id)
            .cloned()
            .ok_or(Self::ErrorKind::KeyNotFound)
    }

    fn create_session(&mut self, session_id: Option<Uuid>) -> Result<Uuid, Self::ErrorKind> {
        let session_id = session_id.unwrap_or_else(Uuid::new_v4);
        let mut hash_map = self.lock()?;

        match hash_map.entry(session_id) {
            Entry::Occupied(_) => Err(Self::ErrorKind::SessionExists),
            Entry::Vacant(entry) => {
                entry.insert(SessionData::new_with_id(session_id));
                debug!("Created session {}", session_id);
                Ok(session_id)
            }
        }
    }

    fn session_exists(&mut self, session_id: Uuid) -> Result<bool, Self::ErrorKind> {
        Ok(self.lock()?.contains_key(&session_id))
    }

    fn configure_session(
        &mut self,
        session_id: Uuid,
        settings: Settings,
    ) -> Result<SessionData, Self::ErrorKind> {
        self.with_session(session_id, |session| {
            session.configure(settings)?;
            Ok(session.clone())
        })
    }

    fn move_player(&mut self, session_id: Uuid, new_move: Move) -> Result<usize, Self::ErrorKind> {
        let track = self.track.clone();
        self.with_session(session_id, |session| {
            Ok(session.apply_move(&track, new_move)?)
        })
    }

    fn reset_positions(&mut self, session_id: Uuid) -> Result<(), Self::ErrorKind> {
        self.with_session(session_id, |session| {
            session.reset_positions();
            Ok(())
        })
    }

    fn end_session(&mut self, session_id: Uuid) -> Result<(), Self::ErrorKind> {
        match self.lock()?.remove(&session_id) {
            Some(_) => {
                debug!("Ended session {}", session_id);
                Ok(())
            }
            None => Err(Self::ErrorKind::KeyNotFound),
        }
    }

    fn field_track(&self) -> &FieldTrack {
        &self.track
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Icon;
    use serial_test::serial;
    use std::fs::write;

    fn provider_with_session() -> (CacheProvider, Uuid) {
        let mut provider = CacheProvider::new(CacheProviderArgs::default()).unwrap();
        let session_id = provider.create_session(None).unwrap();
        (provider, session_id)
    }

    #[test]
    fn create_and_get_session() {
        let (provider, session_id) = provider_with_session();
        let session = provider.get_session_data(session_id).unwrap();
        assert_eq!(session, SessionData::new_with_id(session_id));
        assert_eq!(provider.get_sessions().unwrap(), vec![session_id]);
    }

    #[test]
    fn create_session_twice() {
        let (mut provider, session_id) = provider_with_session();
        assert_eq!(
            provider.create_session(Some(session_id)),
            Err(CacheProviderErrorKind::SessionExists)
        );
    }

    #[test]
    fn unknown_session() {
        let (mut provider, _) = provider_with_session();
        let other = Uuid::new_v4();
        assert_eq!(provider.session_exists(other), Ok(false));
        assert_eq!(
            provider.get_session_data(other),
            Err(CacheProviderErrorKind::KeyNotFound)
        );
        assert_eq!(
            provider.move_player(other, Move::new(0, 1)),
            Err(CacheProviderErrorKind::KeyNotFound)
        );
        assert_eq!(
            provider.reset_positions(other),
            Err(CacheProviderErrorKind::KeyNotFound)
        );
        assert_eq!(
            provider.end_session(other),
            Err(CacheProviderErrorKind::KeyNotFound)
        );
    }

    #[test]
    fn clones_share_sessions() {
        let (provider, session_id) = provider_with_session();
        let mut other = provider.clone();
        assert_eq!(other.move_player(session_id, Move::new(2, 6)), Ok(6));
        assert_eq!(
            provider
                .get_session_data(session_id)
                .unwrap()
                .state
                .position(2),
            Some(6)
        );
    }

    #[test]
    fn moves_wrap_on_the_configured_track() {
        let track = FieldTrack::new(vec![(0.0, 0.0); 35]).unwrap();
        let mut provider = CacheProvider::new(CacheProviderArgs::new(track)).unwrap();
        let session_id = provider.create_session(None).unwrap();
        assert_eq!(provider.field_track().len(), 35);
        assert_eq!(provider.move_player(session_id, Move::new(0, 3)), Ok(3));
        assert_eq!(provider.move_player(session_id, Move::new(0, -5)), Ok(33));
    }

    #[test]
    fn invalid_moves_are_reported() {
        let (mut provider, session_id) = provider_with_session();
        let err = provider
            .move_player(session_id, Move::new(0, 20))
            .unwrap_err();
        assert_eq!(
            err,
            CacheProviderErrorKind::InvalidMove(InvalidMove::StepsOutOfRange { steps: 20 })
        );
        assert_eq!(err.class(), ErrorClass::InvalidInput);
    }

    #[test]
    fn configure_and_reset() {
        let (mut provider, session_id) = provider_with_session();
        let settings = Settings::new(3, vec![Icon::from("🐙")]).unwrap();
        let session = provider
            .configure_session(session_id, settings.clone())
            .unwrap();
        assert_eq!(session.settings, settings);

        provider.move_player(session_id, Move::new(1, 8)).unwrap();
        provider.reset_positions(session_id).unwrap();
        let session = provider.get_session_data(session_id).unwrap();
        assert_eq!(session.active_positions(), vec![(0, 0), (1, 0), (2, 0)]);
    }

    #[test]
    fn board_view_of_session() {
        let (mut provider, session_id) = provider_with_session();
        provider.move_player(session_id, Move::new(0, 1)).unwrap();
        let view = provider.get_board_view(session_id).unwrap();
        assert_eq!(view.session_id, session_id);
        assert_eq!(view.tokens.len(), Settings::DEFAULT_PLAYERS);
        assert_eq!(view.tokens[0].slot, 0);
        assert_eq!(view.tokens.last().unwrap().player, 0);
        assert_eq!(view.tokens.last().unwrap().slot, 1);
    }

    #[test]
    fn end_session() {
        let (mut provider, session_id) = provider_with_session();
        provider.end_session(session_id).unwrap();
        assert_eq!(provider.session_exists(session_id), Ok(false));
        assert!(provider.get_sessions().unwrap().is_empty());
    }

    #[test]
    #[serial]
    fn track_from_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("track.json");
        write(&path, "[[1, 2], [3, 4], [5, 6.5]]").unwrap();

        std::env::set_var("FIELD_TRACK_PATH", &path);
        let args = CacheProviderArgs::from_env().unwrap();
        assert_eq!(args.track.len(), 3);
        assert_eq!(args.track.coordinates(2), Some((5.0, 6.5)));
        assert_eq!(args.track.advance(0, -1), 2);

        let mut provider = CacheProvider::new(args).unwrap();
        let session_id = provider.create_session(None).unwrap();
        assert_eq!(provider.move_player(session_id, Move::new(0, 4)), Ok(1));

        write(&path, "[[1, 2, 3]]").unwrap();
        assert!(matches!(
            CacheProviderArgs::from_env(),
            Err(TrackLoadError::Parse { .. })
        ));

        write(&path, "[]").unwrap();
        assert!(matches!(
            CacheProviderArgs::from_env(),
            Err(TrackLoadError::Parse { .. })
        ));

        std::env::remove_var("FIELD_TRACK_PATH");
        let args = CacheProviderArgs::from_env().unwrap();
        assert_eq!(args.track, FieldTrack::reference());
    }
}
