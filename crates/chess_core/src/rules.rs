//! Per-kind movement rules.
//!
//! Every check reads the board through `&Board` and has no side effects.
//! Whose turn it is is not considered here; see [`crate::Game`].

use crate::{
    piece::{Color, PieceType},
    Board, Piece, Square,
};

/// Whether `piece` may move from its current square to `target` on `board`.
///
/// Off-board targets and targets holding a piece of the mover's color are
/// rejected for every kind before the geometry is looked at.
pub fn is_valid_move(piece: &Piece, target: Square, board: &Board) -> bool {
    if !target.is_inside_board() {
        return false;
    }

    if let Some(occupant) = board.occupant_at(target) {
        if occupant.color == piece.color {
            return false;
        }
    }

    let from = piece.square();
    match piece.piece_type {
        PieceType::Pawn => is_valid_pawn_move(piece.color, from, target, board),
        PieceType::Knight => is_valid_knight_move(from, target),
        PieceType::Bishop => is_valid_diagonal_move(from, target, board),
        PieceType::Rook => is_valid_straight_move(from, target, board),
        PieceType::Queen => {
            is_valid_straight_move(from, target, board) || is_valid_diagonal_move(from, target, board)
        }
        PieceType::King => is_valid_king_move(from, target),
    }
}

/// Every on-board square `piece` could move to right now.
pub fn valid_targets(piece: &Piece, board: &Board) -> Vec<Square> {
    Square::all()
        .filter(|&target| is_valid_move(piece, target, board))
        .collect()
}

fn is_valid_pawn_move(color: Color, from: Square, to: Square, board: &Board) -> bool {
    let direction = color.forward();
    let (file_diff, rank_diff) = from.delta(to);
    let target_empty = board.occupant_at(to).is_none();

    if file_diff == 0 {
        if rank_diff == direction {
            return target_empty;
        }
        // Double step, home rank only
        if rank_diff == 2 * direction && from.rank == color.pawn_home_rank() {
            let intermediate = from.offset(0, direction);
            return target_empty && board.occupant_at(intermediate).is_none();
        }
        return false;
    }

    if file_diff.abs() == 1 && rank_diff == direction {
        return board
            .occupant_at(to)
            .is_some_and(|occupant| occupant.color != color);
    }

    false
}

fn is_valid_knight_move(from: Square, to: Square) -> bool {
    let (file_diff, rank_diff) = from.delta(to);
    let (file_diff, rank_diff) = (file_diff.abs(), rank_diff.abs());

    (rank_diff == 2 && file_diff == 1) || (rank_diff == 1 && file_diff == 2)
}

fn is_valid_diagonal_move(from: Square, to: Square, board: &Board) -> bool {
    let (file_diff, rank_diff) = from.delta(to);

    if file_diff == 0 || file_diff.abs() != rank_diff.abs() {
        return false;
    }

    is_path_clear(from, to, board)
}

fn is_valid_straight_move(from: Square, to: Square, board: &Board) -> bool {
    let (file_diff, rank_diff) = from.delta(to);

    if (file_diff == 0) == (rank_diff == 0) {
        return false;
    }

    is_path_clear(from, to, board)
}

fn is_valid_king_move(from: Square, to: Square) -> bool {
    let (file_diff, rank_diff) = from.delta(to);

    file_diff.abs() <= 1 && rank_diff.abs() <= 1
}

// Walks the squares strictly between `from` and `to` along a straight or
// diagonal line. Callers have already checked the geometry.
fn is_path_clear(from: Square, to: Square, board: &Board) -> bool {
    let (file_diff, rank_diff) = from.delta(to);
    let (file_step, rank_step) = (file_diff.signum(), rank_diff.signum());

    let mut current = from.offset(file_step, rank_step);
    while current != to && current.is_inside_board() {
        if board.occupant_at(current).is_some() {
            return false;
        }
        current = current.offset(file_step, rank_step);
    }

    true
}
