use log::{debug, info};

use crate::{
    piece::{Color, PieceDescriptor, PieceId, PieceType},
    rules, Board, Move, MoveError, MoveType, Piece, Square,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    InProgress,
    /// A king was captured. Carries the winner.
    Terminated(Color),
}

/// What a committed move did.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveOutcome {
    pub mv: Move,
    pub move_type: MoveType,
    pub captured: Option<Piece>,
    pub state: GameState,
}

/// Capturing a king ends the game in favour of the side that took it.
pub fn detect_game_end(captured: Option<&Piece>, mover: Color) -> GameState {
    match captured {
        Some(piece) if piece.piece_type == PieceType::King => GameState::Terminated(mover),
        _ => GameState::InProgress,
    }
}

/// One game: the board plus its terminal state. Moves go through here.
#[derive(Debug, Clone, Default)]
pub struct Game {
    board: Board,
    state: GameState,
}

impl Game {
    pub fn new() -> Self {
        Self::from_board(Board::new())
    }

    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            state: GameState::InProgress,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, GameState::Terminated(_))
    }

    pub fn winner(&self) -> Option<Color> {
        match self.state {
            GameState::Terminated(winner) => Some(winner),
            GameState::InProgress => None,
        }
    }

    pub fn current_turn(&self) -> Color {
        self.board.current_turn()
    }

    pub fn occupant_at(&self, square: Square) -> Option<PieceDescriptor> {
        self.board.occupant_at(square)
    }

    pub fn is_valid_move(&self, piece: PieceId, target: Square) -> bool {
        self.board
            .piece(piece)
            .is_some_and(|piece| rules::is_valid_move(piece, target, &self.board))
    }

    /// Validates and commits a drop of `piece` on `target`.
    pub fn try_move(&mut self, piece: PieceId, target: Square) -> Result<MoveOutcome, MoveError> {
        if let GameState::Terminated(winner) = self.state {
            return Err(MoveError::GameOver { winner });
        }

        let from = self
            .board
            .piece(piece)
            .map(Piece::square)
            .ok_or(MoveError::NoSuchPiece(piece))?;

        if from == target {
            return Err(MoveError::NullMove(target));
        }

        let mv = Move::new(piece, from, target);
        if !mv.is_valid(&self.board) {
            debug!("rejected {piece} {from} -> {target}");
            return Err(MoveError::Illegal {
                piece,
                from,
                to: target,
            });
        }

        self.commit(mv)
    }

    /// Commits a move whose geometry has already been checked.
    ///
    /// Still refuses, without touching the board, once the game is over,
    /// when the piece is gone, stands elsewhere or is not the side to move,
    /// and when the target is off the board or held by the mover's color.
    pub fn commit(&mut self, mv: Move) -> Result<MoveOutcome, MoveError> {
        if let GameState::Terminated(winner) = self.state {
            return Err(MoveError::GameOver { winner });
        }

        let piece = *self.board.piece(mv.piece).ok_or(MoveError::NoSuchPiece(mv.piece))?;
        if piece.square() != mv.from {
            return Err(MoveError::StaleOrigin {
                piece: mv.piece,
                expected: mv.from,
                actual: piece.square(),
            });
        }
        if piece.color != self.board.current_turn() {
            return Err(MoveError::NotYourTurn {
                piece: mv.piece,
                turn: self.board.current_turn(),
            });
        }

        let friendly_target = self
            .board
            .occupant_at(mv.to)
            .is_some_and(|occupant| occupant.color == piece.color);
        if !mv.to.is_inside_board() || friendly_target {
            debug!("refused {} {} -> {}", mv.piece, mv.from, mv.to);
            return Err(MoveError::Illegal {
                piece: mv.piece,
                from: mv.from,
                to: mv.to,
            });
        }

        let captured = self.board.commit(mv);
        let move_type = match captured {
            Some(captured) => {
                info!("{} takes {} on {}", mv.piece, captured.id, mv.to);
                MoveType::Capture
            }
            None => {
                info!("{} {} -> {}", mv.piece, mv.from, mv.to);
                MoveType::Normal
            }
        };

        self.state = detect_game_end(captured.as_ref(), piece.color);
        if let GameState::Terminated(winner) = self.state {
            info!("king captured, {winner} wins");
        }

        Ok(MoveOutcome {
            mv,
            move_type,
            captured,
            state: self.state,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(code: &str) -> PieceId {
        PieceId::from_code(code).unwrap()
    }

    #[test]
    fn detector_only_fires_on_kings() {
        let king = Piece::new(id("bk"), Square::new(4, 0));
        let queen = Piece::new(id("bq"), Square::new(3, 0));

        assert_eq!(detect_game_end(None, Color::White), GameState::InProgress);
        assert_eq!(detect_game_end(Some(&queen), Color::White), GameState::InProgress);
        assert_eq!(
            detect_game_end(Some(&king), Color::White),
            GameState::Terminated(Color::White)
        );
    }

    #[test]
    fn new_game_is_in_progress_with_white_to_move() {
        let game = Game::new();
        assert_eq!(game.state(), GameState::InProgress);
        assert_eq!(game.current_turn(), Color::White);
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn rejected_moves_leave_everything_alone() {
        let mut game = Game::new();
        let before = game.board().clone();

        assert_eq!(
            game.try_move(id("wn1"), Square::new(1, 5)),
            Err(MoveError::Illegal {
                piece: id("wn1"),
                from: Square::new(1, 7),
                to: Square::new(1, 5),
            })
        );
        assert_eq!(
            game.try_move(id("wp1"), Square::new(0, 6)),
            Err(MoveError::NullMove(Square::new(0, 6)))
        );
        assert_eq!(
            game.try_move(id("wp9"), Square::new(0, 5)),
            Err(MoveError::NoSuchPiece(id("wp9")))
        );
        assert_eq!(
            game.try_move(id("wp1"), Square::new(0, 9)),
            Err(MoveError::Illegal {
                piece: id("wp1"),
                from: Square::new(0, 6),
                to: Square::new(0, 9),
            })
        );

        assert_eq!(game.board(), &before);
        assert_eq!(game.current_turn(), Color::White);
    }

    #[test]
    fn wrong_side_cannot_move() {
        let mut game = Game::new();
        let result = game.try_move(id("bp5"), Square::new(4, 3));
        assert_eq!(
            result,
            Err(MoveError::NotYourTurn {
                piece: id("bp5"),
                turn: Color::White,
            })
        );
        assert_eq!(game.occupant_at(Square::new(4, 3)), None);
    }

    #[test]
    fn commit_checks_origin() {
        let mut game = Game::new();
        let stale = Move::new(id("wp5"), Square::new(4, 5), Square::new(4, 4));
        assert_eq!(
            game.commit(stale),
            Err(MoveError::StaleOrigin {
                piece: id("wp5"),
                expected: Square::new(4, 5),
                actual: Square::new(4, 6),
            })
        );
    }

    #[test]
    fn commit_refuses_friendly_and_off_board_targets() {
        let mut game = Game::new();
        let before = game.board().clone();

        let onto_own_king = Move::new(id("wq"), Square::new(3, 7), Square::new(4, 7));
        assert_eq!(
            game.commit(onto_own_king),
            Err(MoveError::Illegal {
                piece: id("wq"),
                from: Square::new(3, 7),
                to: Square::new(4, 7),
            })
        );

        let off_board = Move::new(id("wp1"), Square::new(0, 6), Square::new(0, 8));
        assert!(matches!(game.commit(off_board), Err(MoveError::Illegal { .. })));

        assert_eq!(game.board(), &before);
        assert_eq!(game.board().pieces().count(), 32);
        assert_eq!(game.state(), GameState::InProgress);
        assert_eq!(game.current_turn(), Color::White);
    }

    #[test]
    fn turn_alternates() {
        let mut game = Game::new();
        let outcome = game.try_move(id("wp5"), Square::new(4, 4)).unwrap();
        assert_eq!(outcome.move_type, MoveType::Normal);
        assert_eq!(outcome.state, GameState::InProgress);
        assert_eq!(game.current_turn(), Color::Black);

        game.try_move(id("bp5"), Square::new(4, 3)).unwrap();
        assert_eq!(game.current_turn(), Color::White);
    }

    #[test]
    fn capturing_the_king_ends_the_game() {
        let mut board = Board::empty(Color::Black);
        let rook = board.spawn(PieceType::Rook, Color::Black, Square::new(4, 0)).unwrap();
        let king = board.spawn(PieceType::King, Color::White, Square::new(4, 7)).unwrap();
        let pawn = board.spawn(PieceType::Pawn, Color::White, Square::new(0, 6)).unwrap();
        let mut game = Game::from_board(board);

        let outcome = game.try_move(rook, Square::new(4, 7)).unwrap();
        assert_eq!(outcome.move_type, MoveType::Capture);
        assert_eq!(outcome.captured.map(|p| p.id), Some(king));
        assert_eq!(outcome.state, GameState::Terminated(Color::Black));
        assert!(game.is_over());
        assert_eq!(game.winner(), Some(Color::Black));

        let after = game.board().clone();
        assert_eq!(
            game.try_move(pawn, Square::new(0, 5)),
            Err(MoveError::GameOver {
                winner: Color::Black
            })
        );
        assert_eq!(
            game.commit(Move::new(pawn, Square::new(0, 6), Square::new(0, 5))),
            Err(MoveError::GameOver {
                winner: Color::Black
            })
        );
        assert_eq!(game.board(), &after);
        assert_eq!(game.state(), GameState::Terminated(Color::Black));
    }

    #[test]
    fn is_valid_move_ignores_turn() {
        let game = Game::new();
        assert!(game.is_valid_move(id("bn2"), Square::new(7, 2)));
        assert!(!game.is_valid_move(id("bn3"), Square::new(7, 2)));
    }
}
