//! Draw detection logic for tic-tac-toe.

use crate::{Board, Square};
use tracing::instrument;

/// Checks if the board is full (all squares occupied).
///
/// A full board with no winner is a draw.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

#[cfg(test)]
mod tests {
    use super::super::win::check_winner;
    use super::*;
    use crate::{Mark, Position};

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&Board::new()));
    }

    #[test]
    fn test_partial_board_not_full() {
        let mut board = Board::new();
        board.set(Position::Center, Square::Occupied(Mark::X));
        assert!(!is_full(&board));
    }

    #[test]
    fn test_drawn_board_is_full_without_winner() {
        // X O X / O X X / O X O
        #[rustfmt::skip]
        let layout = [
            Mark::X, Mark::O, Mark::X,
            Mark::O, Mark::X, Mark::X,
            Mark::O, Mark::X, Mark::O,
        ];
        let mut board = Board::new();
        for (pos, mark) in Position::ALL.into_iter().zip(layout) {
            board.set(pos, Square::Occupied(mark));
        }
        assert!(is_full(&board));
        assert_eq!(check_winner(&board), None);
    }
}
