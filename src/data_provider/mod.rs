mod factory;
mod providers;

pub use factory::DataProviderFactory;
pub use providers::*;

use crate::{BoardView, FieldTrack, Move, SessionData, Settings};
use core::fmt::{Debug, Display};
use uuid::Uuid;

/// Coarse kind of a provider error, used to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    NotFound,
    Conflict,
    InvalidInput,
    Internal,
}

pub trait ClassifyError {
    fn class(&self) -> ErrorClass;
}

/// DataProvider is a trait that defines the interface for a session store.
/// The operator of this trait doesn't care where the sessions are kept; they
/// only live as long as the provider does.
pub trait DataProvider: Send + Clone {
    type Args: Clone;
    type ErrorKind: Debug + Clone + PartialEq + Eq + Display + ClassifyError;

    fn new(args: Self::Args) -> Result<Self, Self::ErrorKind>
    where
        Self: Sized;

    /// returns the ids of all running sessions.
    fn get_sessions(&self) -> Result<Vec<Uuid>, Self::ErrorKind>;

    /// returns the session data for a given session id.
    fn get_session_data(&self, session_id: Uuid) -> Result<SessionData, Self::ErrorKind>;

    /// starts a new session with default settings and returns its id.
    fn create_session(&mut self, session_id: Option<Uuid>) -> Result<Uuid, Self::ErrorKind>;

    /// checks if a session exists for a given session id.
    fn session_exists(&mut self, session_id: Uuid) -> Result<bool, Self::ErrorKind>;

    /// applies new settings. Players that join start on the first field.
    fn configure_session(
        &mut self,
        session_id: Uuid,
        settings: Settings,
    ) -> Result<SessionData, Self::ErrorKind>;

    /// moves one token and returns the field it landed on.
    fn move_player(&mut self, session_id: Uuid, new_move: Move) -> Result<usize, Self::ErrorKind>;

    /// puts every current player back on the first field.
    fn reset_positions(&mut self, session_id: Uuid) -> Result<(), Self::ErrorKind>;

    /// drops a session and everything in it.
    fn end_session(&mut self, session_id: Uuid) -> Result<(), Self::ErrorKind>;

    /// the track all sessions of this provider are played on.
    fn field_track(&self) -> &FieldTrack;

    fn get_board_view(&self, session_id: Uuid) -> Result<BoardView, Self::ErrorKind> {
        let session = self.get_session_data(session_id)?;
        Ok(BoardView::build(&session, self.field_track()))
    }
}
