use std::fmt;

pub const BOARD_SIZE: i8 = 8;

/// A board cell addressed by file (column, left to right) and rank (row, top
/// to bottom). Rank 0 is Black's back rank.
///
/// Coordinates are signed and may lie off the board, so a pointer dropped
/// outside the grid still maps to a `Square` the rules can reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub file: i8,
    pub rank: i8,
}

impl Square {
    pub const fn new(file: i8, rank: i8) -> Self {
        Self { file, rank }
    }

    pub fn is_inside_board(self) -> bool {
        (0..BOARD_SIZE).contains(&self.file) && (0..BOARD_SIZE).contains(&self.rank)
    }

    pub fn offset(self, file_delta: i8, rank_delta: i8) -> Self {
        Self {
            file: self.file.saturating_add(file_delta),
            rank: self.rank.saturating_add(rank_delta),
        }
    }

    /// `(Δfile, Δrank)` from `self` to `target`.
    pub fn delta(self, target: Square) -> (i8, i8) {
        (
            target.file.saturating_sub(self.file),
            target.rank.saturating_sub(self.rank),
        )
    }

    // (rank, file) indices into an 8x8 grid, `None` off the board
    pub(crate) fn grid_index(self) -> Option<(usize, usize)> {
        if self.is_inside_board() {
            Some((self.rank as usize, self.file as usize))
        } else {
            None
        }
    }

    /// Every on-board square, rank by rank.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|rank| (0..BOARD_SIZE).map(move |file| Square { file, rank }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.file, self.rank)
    }
}
