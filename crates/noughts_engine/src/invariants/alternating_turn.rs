//! Alternating turn invariant: X and O take turns, X first.

use super::Invariant;
use crate::{Game, Mark};

/// Invariant: mark counts never drift apart and the turn follows them.
///
/// X moves first, so X holds as many marks as O or exactly one more. While
/// the game is in progress X is to move exactly when the counts are equal.
/// After a win or draw the turn stays with whoever moved last.
pub struct AlternatingTurnInvariant;

impl Invariant<Game> for AlternatingTurnInvariant {
    fn holds(game: &Game) -> bool {
        let x = game.board().count(Mark::X);
        let o = game.board().count(Mark::O);
        if x != o && x != o + 1 {
            return false;
        }

        let last_to_move = if x == o { Mark::O } else { Mark::X };
        let expected = match (game.is_over(), x + o) {
            (false, _) => last_to_move.opponent(),
            (true, 0) => return false,
            (true, _) => last_to_move,
        };
        game.current_player() == expected
    }

    fn description() -> &'static str {
        "Players alternate turns starting with X"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    #[test]
    fn test_new_game_holds() {
        assert!(AlternatingTurnInvariant::holds(&Game::new()));
    }

    #[test]
    fn test_after_won_game_holds() {
        let mut game = Game::new();
        for pos in [
            Position::TopLeft,
            Position::Center,
            Position::TopCenter,
            Position::BottomLeft,
            Position::TopRight,
        ] {
            game.place(pos);
        }
        assert!(game.is_over());
        assert!(AlternatingTurnInvariant::holds(&game));
    }

    #[test]
    fn test_wrong_turn_violates() {
        let mut game = Game::new();
        game.place(Position::Center);
        game.current_player = Mark::X;
        assert!(!AlternatingTurnInvariant::holds(&game));
    }
}
