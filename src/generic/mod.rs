mod board_view;
mod field_track;
mod r#move;
mod player;
mod session_data;
mod session_state;
mod settings;

pub use board_view::{BoardView, PlacedToken};
pub use field_track::{FieldCoordinates, FieldTrack, InvalidTrack, TrackLoadError, REFERENCE_FIELDS};
pub use player::{Icon, PlayerIndex, ICON_OPTIONS};
pub use r#move::{Move, MoveOutcome};
pub use session_data::SessionData;
pub use session_state::{InvalidMove, SessionState};
pub use settings::{InvalidSettings, Settings};
