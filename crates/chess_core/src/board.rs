use std::collections::HashMap;

use log::debug;

use crate::{
    piece::{Color, PieceDescriptor, PieceId, PieceType},
    LayoutError, Move, Piece, Square,
};

/// The starting position, rank 0 (Black's back rank) first. Empty strings
/// are empty squares.
pub const STANDARD_LAYOUT: [[&str; 8]; 8] = [
    ["br1", "bn1", "bb1", "bq", "bk", "bb2", "bn2", "br2"],
    ["bp1", "bp2", "bp3", "bp4", "bp5", "bp6", "bp7", "bp8"],
    ["", "", "", "", "", "", "", ""],
    ["", "", "", "", "", "", "", ""],
    ["", "", "", "", "", "", "", ""],
    ["", "", "", "", "", "", "", ""],
    ["wp1", "wp2", "wp3", "wp4", "wp5", "wp6", "wp7", "wp8"],
    ["wr1", "wn1", "wb1", "wq", "wk", "wb2", "wn2", "wr2"],
];

/// Occupancy grid, live pieces keyed by identity, and the side to move.
///
/// Every id in the grid has an entry in `pieces` whose logical square is
/// that cell, and every live piece appears in the grid exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    grid: [[Option<PieceId>; 8]; 8],
    pieces: HashMap<PieceId, Piece>,
    current_turn: Color,
}

impl Board {
    pub fn new() -> Self {
        let mut board = Self::empty(Color::White);
        board.setup_initial_position();
        board
    }

    pub fn empty(current_turn: Color) -> Self {
        Self {
            grid: [[None; 8]; 8],
            pieces: HashMap::new(),
            current_turn,
        }
    }

    fn setup_initial_position(&mut self) {
        let piece_order = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        for color in [Color::White, Color::Black] {
            let pawn_rank = color.pawn_home_rank();
            let back_rank = pawn_rank - color.forward();

            for file in 0..8i8 {
                let id = PieceId::new(color, PieceType::Pawn, file as u8 + 1);
                self.insert(Piece::new(id, Square::new(file, pawn_rank)));
            }

            for (file, &piece_type) in (0..8i8).zip(piece_order.iter()) {
                // Queen and king are unnumbered; the paired pieces count from the a-file side
                let ordinal = match piece_type {
                    PieceType::Queen | PieceType::King => 0,
                    _ if file < 4 => 1,
                    _ => 2,
                };
                let id = PieceId::new(color, piece_type, ordinal);
                self.insert(Piece::new(id, Square::new(file, back_rank)));
            }
        }
    }

    /// Builds a board from a grid of layout codes such as [`STANDARD_LAYOUT`].
    pub fn from_layout(layout: &[[&str; 8]; 8], current_turn: Color) -> Result<Self, LayoutError> {
        let mut board = Self::empty(current_turn);

        for (rank, row) in layout.iter().enumerate() {
            for (file, code) in row.iter().enumerate() {
                if code.is_empty() {
                    continue;
                }
                let square = Square::new(file as i8, rank as i8);
                let id = PieceId::from_code(code).ok_or_else(|| LayoutError::InvalidCode {
                    code: code.to_string(),
                    square,
                })?;
                if board.pieces.contains_key(&id) {
                    return Err(LayoutError::DuplicatePiece(id));
                }
                board.insert(Piece::new(id, square));
            }
        }

        Ok(board)
    }

    /// Adds a fresh piece on an empty square, numbering it after any live
    /// piece of the same color and kind.
    pub fn spawn(
        &mut self,
        piece_type: PieceType,
        color: Color,
        square: Square,
    ) -> Result<PieceId, LayoutError> {
        if !square.is_inside_board() {
            return Err(LayoutError::OutsideBoard(square));
        }
        if self.piece_at(square).is_some() {
            return Err(LayoutError::SquareOccupied(square));
        }

        let id = (1..=u8::MAX)
            .map(|ordinal| PieceId::new(color, piece_type, ordinal))
            .find(|id| !self.pieces.contains_key(id))
            .ok_or(LayoutError::DuplicatePiece(PieceId::new(color, piece_type, u8::MAX)))?;
        self.insert(Piece::new(id, square));
        Ok(id)
    }

    fn insert(&mut self, piece: Piece) {
        if let Some((rank, file)) = piece.square().grid_index() {
            self.grid[rank][file] = Some(piece.id);
            self.pieces.insert(piece.id, piece);
        }
    }

    pub fn is_inside_board(square: Square) -> bool {
        square.is_inside_board()
    }

    pub fn occupant_at(&self, square: Square) -> Option<PieceDescriptor> {
        self.piece_at(square).map(Piece::descriptor)
    }

    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        let (rank, file) = square.grid_index()?;
        self.grid[rank][file].and_then(|id| self.pieces.get(&id))
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(&id)
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.values()
    }

    pub fn current_turn(&self) -> Color {
        self.current_turn
    }

    pub(crate) fn place(&mut self, square: Square, id: PieceId) {
        let (Some((rank, file)), Some(piece)) = (square.grid_index(), self.pieces.get_mut(&id)) else {
            return;
        };
        piece.relocate(square);
        self.grid[rank][file] = Some(id);
    }

    pub(crate) fn clear(&mut self, square: Square) -> Option<PieceId> {
        let (rank, file) = square.grid_index()?;
        self.grid[rank][file].take()
    }

    pub(crate) fn remove(&mut self, square: Square) -> Option<Piece> {
        let id = self.clear(square)?;
        self.pieces.remove(&id)
    }

    /// Applies a move that has already been judged legal: captures an
    /// opposite-color occupant of the target, relocates the mover and hands
    /// the turn over. Returns the captured piece.
    ///
    /// The geometry is not re-validated. A move naming a dead piece, an
    /// off-board target or a target held by the mover's own color is
    /// ignored.
    pub(crate) fn commit(&mut self, chess_move: Move) -> Option<Piece> {
        let (from, color) = match self.pieces.get(&chess_move.piece) {
            Some(piece) if chess_move.to.is_inside_board() => (piece.square(), piece.color),
            _ => return None,
        };

        let captured = match self.occupant_at(chess_move.to) {
            Some(occupant) if occupant.color == color => return None,
            Some(_) => self.remove(chess_move.to),
            None => None,
        };

        self.clear(from);
        self.place(chess_move.to, chess_move.piece);
        self.current_turn = self.current_turn.opposite();

        debug!("{} {} -> {}", chess_move.piece, from, chess_move.to);
        captured
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
