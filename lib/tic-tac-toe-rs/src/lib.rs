//! # Tic-Tac-Toe
//!
//! A 3x3 Tic-Tac-Toe board model and an exhaustive minimax search with alpha-beta pruning.
//!
//! Tiles are indexed like this:
//!
//! ```text
//! *===*===*===*
//! | 0 | 1 | 2 |
//! *===*===*===*
//! | 3 | 4 | 5 |
//! *===*===*===*
//! | 6 | 7 | 8 |
//! *===*===*===*
//! ```
//!
//! An [`Action`] addresses the same tiles by row and column.
//! Scores are always from X's point of view: X maximizes and O minimizes.

mod action;
mod board;
mod error;
mod search;
mod team;

pub use self::{
    action::Action,
    board::{
        Board,
        ChildrenIter,
        WinType,
        WinnerInfo,
    },
    error::Error,
    search::{
        alpha_beta_search,
        evaluate_actions,
        minimax,
        minimax_value,
        minimax_with_stats,
        SearchStats,
        NEG_INFINITY,
        POS_INFINITY,
    },
    team::{
        InvalidCharError,
        InvalidStrError,
        Team,
    },
};

/// The # of tic-tac-toe tiles
pub const NUM_TILES: u8 = 9;

/// The # of rows, and the # of columns
pub const BOARD_SIZE: u8 = 3;

/// Get the empty starting board.
pub fn initial_state() -> Board {
    Board::new()
}

/// Get the team whos turn it is.
pub fn player(board: Board) -> Team {
    board.get_turn()
}

/// Get every legal action, in row-major order.
pub fn actions(board: Board) -> Vec<Action> {
    board.actions()
}

/// Get the board that results from playing `action`.
///
/// # Errors
/// Returns [`Error::IllegalMove`] if the tile is taken.
pub fn result(board: Board, action: Action) -> Result<Board, Error> {
    board.result(action)
}

/// Get the winner, if there is one.
pub fn winner(board: Board) -> Option<Team> {
    board.get_winner()
}

/// Returns true if the game is over.
pub fn terminal(board: Board) -> bool {
    board.is_terminal()
}

/// Score a finished game: 1 if X won, -1 if O won, 0 for a draw.
///
/// # Errors
/// Returns [`Error::NotTerminal`] if the game is not over.
pub fn utility(board: Board) -> Result<i8, Error> {
    board.utility()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn play_out_a_game() {
        let mut board = initial_state();
        assert_eq!(player(board), Team::X);

        while !terminal(board) {
            let mover = player(board);
            let action = minimax(board).expect("failed to pick a move");
            board = result(board, action).expect("minimax picked an illegal move");
            assert_ne!(player(board), mover);
        }

        assert_eq!(winner(board), None);
        assert_eq!(utility(board), Ok(0));
        assert!(actions(board).is_empty());
    }

    #[test]
    fn minimax_win_1() {
        let board = Board::new()
            .set(0, Some(Team::X))
            .set(4, Some(Team::O))
            .set(8, Some(Team::X))
            .set(2, Some(Team::O));
        let stats = minimax_with_stats(board).unwrap();
        assert_eq!(stats.value, 1, "expected X win");
        assert_eq!(stats.action, Action::new(2, 0).unwrap());
    }
}
