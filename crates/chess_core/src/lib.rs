// Core chess game logic modules
pub mod board;
pub mod error;
pub mod game;
pub mod moves;
pub mod piece;
pub mod rules;
pub mod square;

// Re-export main types for convenience
pub use board::{Board, STANDARD_LAYOUT};
pub use error::{LayoutError, MoveError};
pub use game::{detect_game_end, Game, GameState, MoveOutcome};
pub use moves::{Move, MoveType};
pub use piece::{Color, Piece, PieceDescriptor, PieceId, PieceType};
pub use square::Square;
