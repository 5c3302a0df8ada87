use std::cmp::Ordering;

/// Requested output order for sorts.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            Self::Ascending
        } else {
            Self::Descending
        }
    }

    pub fn is_ascending(self) -> bool {
        self == Self::Ascending
    }

    /// Reorient a natural ordering so that `Less` always means "comes first".
    pub fn orient(self, natural: Ordering) -> Ordering {
        match self {
            Self::Ascending => natural,
            Self::Descending => natural.reverse(),
        }
    }
}

/// A `[row, col]` position in a 2D table or board.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Playback speed on the `0..=100` scale; higher is faster.
pub const MAX_SPEED: u8 = 100;

pub fn clamp_speed(speed: u8) -> u8 {
    speed.min(MAX_SPEED)
}
