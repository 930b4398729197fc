use log::debug;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, path::Path};

/// Position of a field on the board image as `(top, left)` in percent.
pub type FieldCoordinates = (f32, f32);

/// Coordinates of the printed board, walked clockwise from the start field.
pub const REFERENCE_FIELDS: [FieldCoordinates; 36] = [
    // top row
    (19.0, 8.0),
    (12.0, 17.0),
    (11.0, 24.5),
    (8.0, 32.0),
    (9.0, 39.0),
    (7.0, 46.0),
    (9.0, 53.0),
    (8.0, 60.5),
    (8.0, 67.5),
    (9.0, 74.0),
    (9.5, 81.5),
    (12.0, 89.0),
    // right column
    (23.0, 91.0),
    (33.5, 89.5),
    (44.0, 90.5),
    (54.0, 90.0),
    (64.0, 91.5),
    (76.0, 94.0),
    // bottom row
    (86.0, 91.5),
    (89.0, 84.5),
    (87.5, 77.5),
    (89.5, 70.0),
    (88.0, 63.0),
    (91.0, 55.5),
    (89.0, 48.5),
    (90.0, 41.5),
    (88.0, 34.0),
    (87.5, 27.0),
    (88.0, 20.5),
    (87.0, 12.5),
    (86.0, 5.0),
    // left column
    (75.0, 4.0),
    (65.0, 5.0),
    (55.0, 6.0),
    (44.0, 4.5),
    (34.0, 5.5),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidTrack {
    Empty,
}

impl Display for InvalidTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidTrack::Empty => write!(f, "a field track needs at least one field"),
        }
    }
}

impl std::error::Error for InvalidTrack {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackLoadError {
    Io { message: String },
    Parse { message: String },
}

impl Display for TrackLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackLoadError::Io { message } => write!(f, "could not read field track: {}", message),
            TrackLoadError::Parse { message } => {
                write!(f, "could not parse field track: {}", message)
            }
        }
    }
}

impl std::error::Error for TrackLoadError {}

/// The circular sequence of fields the tokens walk along.
///
/// The successor of the last field is the first one. A track always holds at
/// least one field, so the wraparound arithmetic never divides by zero.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(try_from = "Vec<FieldCoordinates>", into = "Vec<FieldCoordinates>")]
pub struct FieldTrack {
    fields: Vec<FieldCoordinates>,
}

impl Default for FieldTrack {
    fn default() -> Self {
        Self::reference()
    }
}

impl TryFrom<Vec<FieldCoordinates>> for FieldTrack {
    type Error = InvalidTrack;

    fn try_from(fields: Vec<FieldCoordinates>) -> Result<Self, Self::Error> {
        Self::new(fields)
    }
}

impl From<FieldTrack> for Vec<FieldCoordinates> {
    fn from(track: FieldTrack) -> Self {
        track.fields
    }
}

impl FieldTrack {
    pub fn new(fields: Vec<FieldCoordinates>) -> Result<Self, InvalidTrack> {
        if fields.is_empty() {
            return Err(InvalidTrack::Empty);
        }
        Ok(Self { fields })
    }

    pub fn reference() -> Self {
        Self {
            fields: REFERENCE_FIELDS.to_vec(),
        }
    }

    /// Reads a JSON array of `[top, left]` pairs.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TrackLoadError> {
        let path = path.as_ref();
        debug!("Loading field track from {}", path.display());
        let contents = std::fs::read_to_string(path).map_err(|e| TrackLoadError::Io {
            message: format!("{}: {}", path.display(), e),
        })?;
        serde_json::from_str(&contents).map_err(|e| TrackLoadError::Parse {
            message: format!("{}", e),
        })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[FieldCoordinates] {
        &self.fields
    }

    pub fn coordinates(&self, slot: usize) -> Option<FieldCoordinates> {
        self.fields.get(slot).copied()
    }

    /// Returns the slot reached from `position` after `steps` fields.
    ///
    /// Negative steps walk backwards. The result is the Euclidean remainder,
    /// so it is always in `0..len()` whatever the sign or size of `steps`.
    pub fn advance(&self, position: usize, steps: i64) -> usize {
        let len = self.fields.len() as i64;
        let position = (position % self.fields.len()) as i64;
        (position + steps % len).rem_euclid(len) as usize
    }
}
