use thiserror::Error;

use crate::{Color, PieceId, Square};

/// Why a move attempt was refused. The board is never mutated when one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("game is over, {winner} won")]
    GameOver { winner: Color },

    #[error("no live piece `{0}`")]
    NoSuchPiece(PieceId),

    #[error("`{piece}` cannot move, it is {turn}'s turn")]
    NotYourTurn { piece: PieceId, turn: Color },

    #[error("piece dropped back on its own square {0}")]
    NullMove(Square),

    #[error("`{piece}` stands on {actual}, not {expected}")]
    StaleOrigin {
        piece: PieceId,
        expected: Square,
        actual: Square,
    },

    #[error("`{piece}` cannot move from {from} to {to}")]
    Illegal {
        piece: PieceId,
        from: Square,
        to: Square,
    },
}

/// Problems building a board from a layout or from individual pieces.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("invalid piece code `{code}` at {square}")]
    InvalidCode { code: String, square: Square },

    #[error("piece `{0}` appears more than once")]
    DuplicatePiece(PieceId),

    #[error("square {0} is outside the board")]
    OutsideBoard(Square),

    #[error("square {0} is already occupied")]
    SquareOccupied(Square),
}
