use crate::{piece::PieceId, rules, Board, Square};

/// A candidate or committed relocation of one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub piece: PieceId,
    pub from: Square,
    pub to: Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveType {
    Normal,
    Capture,
}

impl Move {
    pub fn new(piece: PieceId, from: Square, to: Square) -> Self {
        Self { piece, from, to }
    }

    /// True if the piece is live, stands on `from`, and its rules allow `to`.
    /// Whose turn it is does not matter here.
    pub fn is_valid(&self, board: &Board) -> bool {
        match board.piece(self.piece) {
            Some(piece) if piece.square() == self.from => rules::is_valid_move(piece, self.to, board),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_valid_checks_origin() {
        let board = Board::new();
        let knight = PieceId::from_code("wn1").unwrap();

        assert!(Move::new(knight, Square::new(1, 7), Square::new(2, 5)).is_valid(&board));
        // Right piece, wrong origin
        assert!(!Move::new(knight, Square::new(6, 7), Square::new(5, 5)).is_valid(&board));
    }

    #[test]
    fn is_valid_rejects_dead_piece() {
        let board = Board::new();
        let ghost = PieceId::from_code("wn3").unwrap();
        assert!(!Move::new(ghost, Square::new(1, 7), Square::new(2, 5)).is_valid(&board));
    }
}
