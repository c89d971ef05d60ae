use crate::render::{
    format_value,
    BoardView,
};
use anyhow::{
    ensure,
    Context,
};
use std::io::{
    BufRead,
    Write,
};
use tic_tac_toe::{
    evaluate_actions,
    minimax_with_stats,
    Action,
    Board,
    Team,
};
use tracing::{
    debug,
    info,
    warn,
};

/// A game between a human and the computer, or the computer and itself.
#[derive(Debug, Copy, Clone)]
pub struct Game {
    board: Board,
    human: Option<Team>,
    show_hints: bool,
}

impl Game {
    /// Make a new [`Game`].
    ///
    /// If `human` is `None`, the computer plays both teams.
    pub fn new(board: Board, human: Option<Team>, show_hints: bool) -> Self {
        Self {
            board,
            human,
            show_hints,
        }
    }

    /// Play until the game is over.
    ///
    /// Human moves are read line by line from `input`.
    ///
    /// # Returns
    /// Returns the final board.
    pub fn run<R, W>(&mut self, mut input: R, mut output: W) -> anyhow::Result<Board>
    where
        R: BufRead,
        W: Write,
    {
        info!(human = ?self.human, "starting game");
        writeln!(output, "{}", BoardView::new(self.board))?;

        while !self.board.is_terminal() {
            let turn = self.board.get_turn();
            let action = if Some(turn) == self.human {
                self.read_human_move(&mut input, &mut output)?
            } else {
                let stats = minimax_with_stats(self.board).context("failed to pick a move")?;
                writeln!(output, "{turn} plays {}", stats.action)?;
                stats.action
            };

            self.board = self
                .board
                .result(action)
                .context("failed to play move")?;
            debug!(%turn, %action, "played move");
            writeln!(output, "{}", BoardView::new(self.board))?;
        }

        let outcome = outcome_message(self.board)?;
        info!("{outcome}");
        writeln!(output, "{outcome}")?;

        Ok(self.board)
    }

    /// Prompt until the human enters a legal move.
    fn read_human_move<R, W>(&self, input: &mut R, output: &mut W) -> anyhow::Result<Action>
    where
        R: BufRead,
        W: Write,
    {
        let turn = self.board.get_turn();

        if self.show_hints {
            let hints = evaluate_actions(self.board).context("failed to evaluate moves")?;
            writeln!(output, "move values:")?;
            writeln!(output, "{}", BoardView::new(self.board).with_hints(&hints))?;
        }

        loop {
            write!(output, "{turn}'s move (row,column or 1-9): ")?;
            output.flush().context("failed to flush prompt")?;

            let mut line = String::new();
            let n = input.read_line(&mut line).context("failed to read move")?;
            ensure!(n != 0, "input closed before the game finished");

            match parse_move(&line).and_then(|action| self.board.result(action).map(|_| action)) {
                Ok(action) => return Ok(action),
                Err(error) => {
                    warn!("rejected move \"{}\": {error}", line.trim());
                    writeln!(output, "{error}")?;
                }
            }
        }
    }
}

/// Parse a move typed by a human.
///
/// A single number is a 1-based tile number, anything else must be `row,column`.
pub fn parse_move(s: &str) -> Result<Action, tic_tac_toe::Error> {
    let s = s.trim();
    if let Ok(tile) = s.parse::<u8>() {
        return match tile.checked_sub(1) {
            Some(index) => Action::from_index(index),
            None => Err(tic_tac_toe::Error::InvalidAction(s.to_string())),
        };
    }

    s.parse()
}

/// Describe the result of a finished game.
pub fn outcome_message(board: Board) -> anyhow::Result<&'static str> {
    let utility = board.utility().context("the game is not over")?;
    Ok(match utility {
        1 => "X wins",
        -1 => "O wins",
        _ => "Draw",
    })
}

/// Print the value of every legal move and the move the computer would pick.
pub fn analyze<W>(board: Board, mut output: W) -> anyhow::Result<()>
where
    W: Write,
{
    if board.is_terminal() {
        writeln!(output, "{}", BoardView::new(board))?;
        writeln!(output, "{}", outcome_message(board)?)?;
        return Ok(());
    }

    let hints = evaluate_actions(board).context("failed to evaluate moves")?;
    let stats = minimax_with_stats(board).context("failed to pick a move")?;

    writeln!(output, "{}", BoardView::new(board).with_hints(&hints))?;
    writeln!(output, "{} to move", board.get_turn())?;
    for (action, value) in hints.iter() {
        writeln!(output, "{action}: {}", format_value(*value))?;
    }
    writeln!(
        output,
        "best move: {} (value {}, {} boards searched)",
        stats.action,
        format_value(stats.value),
        stats.nodes
    )?;

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn run(board: &str, human: Option<Team>, input: &str) -> (anyhow::Result<Board>, String) {
        let board: Board = board.parse().unwrap();
        let mut output = Vec::new();
        let result = Game::new(board, human, false).run(input.as_bytes(), &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn parse_moves() {
        assert_eq!(parse_move("1\n").unwrap(), Action::new(0, 0).unwrap());
        assert_eq!(parse_move(" 9 ").unwrap(), Action::new(2, 2).unwrap());
        assert_eq!(parse_move("1,2").unwrap(), Action::new(1, 2).unwrap());
        assert!(parse_move("0").is_err());
        assert!(parse_move("10").is_err());
        assert!(parse_move("middle").is_err());
    }

    #[test]
    fn computer_only_draws() {
        let (result, output) = run(".........", None, "");
        let board = result.unwrap();
        assert!(board.is_full());
        assert_eq!(board.get_winner(), None);
        assert!(output.ends_with("Draw\n"), "{output}");
    }

    #[test]
    fn human_wins() {
        let (result, output) = run("XX./OO./...", Some(Team::X), "3\n");
        assert_eq!(result.unwrap().utility().unwrap(), 1);
        assert!(output.ends_with("X wins\n"), "{output}");
    }

    #[test]
    fn human_retries_bad_moves() {
        let (result, output) = run("XX./OO./...", Some(Team::X), "1\n4,4\nabc\n0,2\n");
        assert_eq!(result.unwrap().get_winner(), Some(Team::X));
        assert!(output.contains("illegal move: (0, 0) is already occupied"));
        assert!(output.contains("(4, 4) is out of bounds"));
        assert!(output.contains("invalid action \"abc\""));
    }

    #[test]
    fn computer_punishes_mistakes() {
        // O ignores X's threat and X completes the row.
        let (result, output) = run("XX./.O./...", Some(Team::O), "9\n");
        assert_eq!(result.unwrap().get_winner(), Some(Team::X));
        assert!(output.contains("X plays (0, 2)"), "{output}");
    }

    #[test]
    fn input_closed() {
        let (result, _output) = run(".........", Some(Team::X), "");
        assert!(result.is_err());
    }

    #[test]
    fn analyze_position() {
        let board: Board = "XX./OO./...".parse().unwrap();
        let mut output = Vec::new();
        analyze(board, &mut output).unwrap();
        let output = String::from_utf8(output).unwrap();

        assert!(output.contains("X to move"));
        assert!(output.contains("(0, 2): +1"));
        assert!(output.contains("best move: (0, 2) (value +1"));
    }

    #[test]
    fn analyze_finished() {
        let board: Board = "XOX/XOO/OXX".parse().unwrap();
        let mut output = Vec::new();
        analyze(board, &mut output).unwrap();
        assert!(String::from_utf8(output).unwrap().ends_with("Draw\n"));
    }
}
