use std::ops::RangeInclusive;

use crate::PlayerIndex;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub player: PlayerIndex,
    pub steps: i64,
}

impl Move {
    /// What the step input of a move panel allows.
    pub const STEP_RANGE: RangeInclusive<i64> = -10..=10;

    pub fn new(player: PlayerIndex, steps: i64) -> Self {
        Self { player, steps }
    }
}

/// Where a move left the player.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MoveOutcome {
    pub player: PlayerIndex,
    pub position: usize,
}
