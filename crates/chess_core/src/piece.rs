use std::fmt;

use crate::Square;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank step of a forward pawn move. White plays up the screen.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    pub fn pawn_home_rank(self) -> i8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    pub fn code(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("white"),
            Color::Black => f.write_str("black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];

    pub fn code(self) -> char {
        match self {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        PieceType::ALL.into_iter().find(|piece_type| piece_type.code() == code)
    }
}

/// Identity tag of one piece, written the way the starting layout names it:
/// `wp3`, `br2`, `bq`. An ordinal of 0 leaves the number off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceId {
    pub color: Color,
    pub piece_type: PieceType,
    pub ordinal: u8,
}

impl PieceId {
    pub fn new(color: Color, piece_type: PieceType, ordinal: u8) -> Self {
        Self { color, piece_type, ordinal }
    }

    /// Parses a layout code such as `wn1` or `bk`.
    pub fn from_code(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        let color = Color::from_code(chars.next()?)?;
        let piece_type = PieceType::from_code(chars.next()?)?;
        let rest = chars.as_str();
        let ordinal = if rest.is_empty() {
            0
        } else if rest.bytes().all(|b| b.is_ascii_digit()) {
            rest.parse::<u8>().ok().filter(|&n| n != 0)?
        } else {
            return None;
        };
        Some(Self { color, piece_type, ordinal })
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color.code(), self.piece_type.code())?;
        if self.ordinal != 0 {
            write!(f, "{}", self.ordinal)?;
        }
        Ok(())
    }
}

/// What an occupied square reports: the kind and color of its piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceDescriptor {
    pub piece_type: PieceType,
    pub color: Color,
}

/// A live piece. Kind and color are fixed at creation; the logical square
/// only changes when a move commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub id: PieceId,
    pub piece_type: PieceType,
    pub color: Color,
    square: Square,
    has_moved: bool,
}

impl Piece {
    pub fn new(id: PieceId, square: Square) -> Self {
        Self {
            id,
            piece_type: id.piece_type,
            color: id.color,
            square,
            has_moved: false,
        }
    }

    pub fn square(&self) -> Square {
        self.square
    }

    /// False until the piece's first committed move. The pawn double step
    /// is decided by the home rank, not by this flag.
    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    pub fn descriptor(&self) -> PieceDescriptor {
        PieceDescriptor {
            piece_type: self.piece_type,
            color: self.color,
        }
    }

    pub(crate) fn relocate(&mut self, square: Square) {
        self.square = square;
        self.has_moved = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_helpers() {
        assert_eq!(Color::White.opposite(), Color::Black);
        assert_eq!(Color::Black.opposite(), Color::White);
        assert_eq!(Color::White.forward(), -1);
        assert_eq!(Color::Black.forward(), 1);
        assert_eq!(Color::White.pawn_home_rank(), 6);
        assert_eq!(Color::Black.pawn_home_rank(), 1);
    }

    #[test]
    fn piece_id_codes() {
        let id = PieceId::from_code("wp3").unwrap();
        assert_eq!(id, PieceId::new(Color::White, PieceType::Pawn, 3));
        assert_eq!(id.to_string(), "wp3");

        let queen = PieceId::from_code("bq").unwrap();
        assert_eq!(queen.ordinal, 0);
        assert_eq!(queen.to_string(), "bq");

        assert_eq!(PieceId::from_code(""), None);
        assert_eq!(PieceId::from_code("x"), None);
        assert_eq!(PieceId::from_code("wz1"), None);
        assert_eq!(PieceId::from_code("wp-1"), None);
        assert_eq!(PieceId::from_code("wp999"), None);
        assert_eq!(PieceId::from_code("wp0"), None);
    }

    #[test]
    fn relocate_sets_has_moved() {
        let id = PieceId::new(Color::Black, PieceType::Knight, 1);
        let mut knight = Piece::new(id, Square::new(1, 0));
        assert!(!knight.has_moved());
        knight.relocate(Square::new(2, 2));
        assert_eq!(knight.square(), Square::new(2, 2));
        assert!(knight.has_moved());
        assert_eq!(
            knight.descriptor(),
            PieceDescriptor {
                piece_type: PieceType::Knight,
                color: Color::Black
            }
        );
    }
}
