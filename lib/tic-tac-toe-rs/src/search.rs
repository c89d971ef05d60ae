use crate::{
    Action,
    Board,
    Error,
};
use tracing::{
    debug,
    trace,
};

/// A value below every utility, used as the starting alpha.
pub const NEG_INFINITY: i8 = i8::MIN;

/// A value above every utility, used as the starting beta.
pub const POS_INFINITY: i8 = i8::MAX;

/// The outcome of a root search
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SearchStats {
    /// The chosen action
    pub action: Action,

    /// The value of the chosen action, from X's point of view.
    pub value: i8,

    /// The number of boards visited, including the root.
    pub nodes: u64,
}

/// Pick the best move for the team whos turn it is.
///
/// X maximizes and O minimizes.
/// Ties go to the first action in row-major order.
///
/// # Errors
/// Returns [`Error::GameOver`] if the board is terminal.
pub fn minimax(board: Board) -> Result<Action, Error> {
    minimax_with_stats(board).map(|stats| stats.action)
}

/// Like [`minimax`], but also report the move's value and how much work was done.
pub fn minimax_with_stats(board: Board) -> Result<SearchStats, Error> {
    if board.is_terminal() {
        trace!("refusing to search terminal board\n{board}");
        return Err(Error::GameOver);
    }

    let maximizing = board.get_turn().is_maximizer();
    let mut best: Option<(Action, i8)> = None;
    let mut nodes = 1;

    for (action, child) in board.iter_children() {
        let (value, child_nodes) = search(child, NEG_INFINITY, POS_INFINITY, !maximizing);
        nodes += child_nodes;

        let is_better = match best {
            None => true,
            Some((_, best_value)) if maximizing => value > best_value,
            Some((_, best_value)) => value < best_value,
        };

        if is_better {
            best = Some((action, value));
        }
    }

    // A board that is not terminal always has an empty tile.
    let (action, value) = best.ok_or(Error::GameOver)?;
    debug!(%action, value, nodes, "chose move");

    Ok(SearchStats {
        action,
        value,
        nodes,
    })
}

/// Get the value of a board with alpha-beta pruning.
///
/// `alpha` is the best value the maximizer is already guaranteed on the current path,
/// and `beta` is the same for the minimizer.
/// Pass [`NEG_INFINITY`] and [`POS_INFINITY`] to search a board from scratch.
///
/// # Returns
/// Returns the board's value from X's point of view.
/// Pruning only skips work, it never changes the value of a board searched from scratch.
pub fn alpha_beta_search(board: Board, alpha: i8, beta: i8, maximizing: bool) -> i8 {
    search(board, alpha, beta, maximizing).0
}

/// Returns the value and the number of boards visited.
fn search(board: Board, mut alpha: i8, mut beta: i8, maximizing: bool) -> (i8, u64) {
    if let Ok(utility) = board.utility() {
        return (utility, 1);
    }

    let mut nodes = 1;
    if maximizing {
        let mut best = NEG_INFINITY;
        for (_action, child) in board.iter_children() {
            let (value, child_nodes) = search(child, alpha, beta, false);
            nodes += child_nodes;

            best = best.max(value);
            alpha = alpha.max(best);
            if beta <= alpha {
                break;
            }
        }
        (best, nodes)
    } else {
        let mut best = POS_INFINITY;
        for (_action, child) in board.iter_children() {
            let (value, child_nodes) = search(child, alpha, beta, true);
            nodes += child_nodes;

            best = best.min(value);
            beta = beta.min(best);
            if beta <= alpha {
                break;
            }
        }
        (best, nodes)
    }
}

/// Get the value of a board with plain minimax, visiting every board.
///
/// This is slower than [`alpha_beta_search`] and always agrees with it.
pub fn minimax_value(board: Board) -> i8 {
    if let Ok(utility) = board.utility() {
        return utility;
    }

    let values = board.iter_children().map(|(_, child)| minimax_value(child));
    let value = if board.get_turn().is_maximizer() {
        values.max()
    } else {
        values.min()
    };

    // Non-terminal boards always have children.
    value.unwrap_or(0)
}

/// Get the exact value of every legal action, in row-major order.
///
/// # Errors
/// Returns [`Error::GameOver`] if the board is terminal.
pub fn evaluate_actions(board: Board) -> Result<Vec<(Action, i8)>, Error> {
    if board.is_terminal() {
        return Err(Error::GameOver);
    }

    let maximizing = board.get_turn().is_maximizer();
    Ok(board
        .iter_children()
        .map(|(action, child)| {
            let value = alpha_beta_search(child, NEG_INFINITY, POS_INFINITY, !maximizing);
            (action, value)
        })
        .collect())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Team;

    fn board(s: &str) -> Board {
        s.parse().expect("invalid board")
    }

    #[test]
    fn minimax_all() {
        let stats = minimax_with_stats(Board::new()).unwrap();
        assert_eq!(stats.value, 0, "perfect play is a draw");
        assert!(stats.action.is_corner() || stats.action.is_center());
        assert_eq!(stats.action, Action::new(0, 0).unwrap());
    }

    #[test]
    fn completes_the_row() {
        let board = board("XX./OO./...");
        assert_eq!(board.get_turn(), Team::X);

        let action = minimax(board).unwrap();
        assert_eq!(action, Action::new(0, 2).unwrap());

        let next = board.result(action).unwrap();
        assert!(next.is_terminal());
        assert_eq!(next.utility(), Ok(1));
    }

    #[test]
    fn o_completes_the_row() {
        let board = board("XX./OO./X..");
        assert_eq!(board.get_turn(), Team::O);
        assert_eq!(minimax(board).unwrap(), Action::new(1, 2).unwrap());
    }

    #[test]
    fn o_blocks() {
        let board = board("XX./.O./...");
        assert_eq!(board.get_turn(), Team::O);
        assert_eq!(minimax(board).unwrap(), Action::new(0, 2).unwrap());
    }

    #[test]
    fn forced_win() {
        // (1, 0) forks the middle row and the left column.
        let board = board("XO./.X./..O");
        assert_eq!(board.get_turn(), Team::X);

        let stats = minimax_with_stats(board).unwrap();
        assert_eq!(stats.value, 1, "expected X win");
        assert_eq!(stats.action, Action::new(1, 0).unwrap());
    }

    #[test]
    fn forced_loss() {
        // X threatens both (0, 1) and (1, 2), O can only block one.
        let board = board("X.X/.O./O.X");
        assert_eq!(board.get_turn(), Team::O);

        let value = alpha_beta_search(board, NEG_INFINITY, POS_INFINITY, false);
        assert_eq!(value, 1);
        assert_eq!(value, minimax_value(board));

        let values = evaluate_actions(board).unwrap();
        assert!(values.iter().all(|(_, value)| *value == 1));
    }

    #[test]
    fn terminal_board() {
        let board = board("XXX/OO./...");
        assert_eq!(minimax(board), Err(Error::GameOver));
        assert_eq!(evaluate_actions(board), Err(Error::GameOver));
        assert_eq!(alpha_beta_search(board, NEG_INFINITY, POS_INFINITY, false), 1);
        assert_eq!(minimax_value(board), 1);
    }

    #[test]
    fn pruning_saves_work() {
        let pruned = minimax_with_stats(Board::new()).unwrap().nodes;

        fn count(board: Board) -> u64 {
            if board.is_terminal() {
                return 1;
            }
            1 + board
                .iter_children()
                .map(|(_, child)| count(child))
                .sum::<u64>()
        }

        let full = count(Board::new());
        assert_eq!(full, 549_946);
        assert!(pruned < full, "{pruned} >= {full}");
    }

    #[test]
    fn evaluate_actions_agrees() {
        let board = board("X../.O./...");
        let values = evaluate_actions(board).unwrap();
        assert_eq!(values.len(), 7);

        let stats = minimax_with_stats(board).unwrap();
        let chosen = values
            .iter()
            .find(|(action, _)| *action == stats.action)
            .unwrap();
        assert_eq!(chosen.1, stats.value);
        assert!(values.iter().all(|(_, value)| *value <= stats.value));
    }
}
