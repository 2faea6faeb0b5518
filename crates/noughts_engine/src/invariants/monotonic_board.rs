//! Monotonic board invariant: squares never change once set.

use super::Invariant;
use crate::{Board, Game, Mark, Square};

/// Invariant: replaying the move history reproduces the board.
///
/// Each replayed move must land on an empty square, so a square that was
/// overwritten or cleared shows up as a mismatch.
pub struct MonotonicBoardInvariant;

impl Invariant<Game> for MonotonicBoardInvariant {
    fn holds(game: &Game) -> bool {
        let mut reconstructed = Board::new();
        let mut mark = Mark::X;

        for &pos in game.history() {
            if !reconstructed.is_empty(pos) {
                return false;
            }
            reconstructed.set(pos, Square::Occupied(mark));
            mark = mark.opponent();
        }

        reconstructed == *game.board()
    }

    fn description() -> &'static str {
        "Board squares are monotonic (never overwritten)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    #[test]
    fn test_moves_hold() {
        let mut game = Game::new();
        for pos in [Position::TopLeft, Position::Center, Position::TopRight] {
            game.place(pos);
        }
        assert!(MonotonicBoardInvariant::holds(&game));
    }

    #[test]
    fn test_overwritten_square_violates() {
        let mut game = Game::new();
        game.place(Position::Center);
        game.board.set(Position::Center, Square::Occupied(Mark::O));
        assert!(!MonotonicBoardInvariant::holds(&game));
    }

    #[test]
    fn test_duplicate_history_violates() {
        let mut game = Game::new();
        game.place(Position::Center);
        game.history.push(Position::Center);
        assert!(!MonotonicBoardInvariant::holds(&game));
    }
}
