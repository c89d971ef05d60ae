use tic_tac_toe::{
    Action,
    Board,
    BOARD_SIZE,
};

const CELL_WIDTH: usize = 3;

/// Format a move value with its sign, so wins stand out.
pub fn format_value(value: i8) -> String {
    if value > 0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}

/// An ascii view of a board.
///
/// Empty tiles show their 1-based tile number, or the value of playing there if hints were added.
/// Tiles in a winning line are wrapped in brackets.
#[derive(Debug, Copy, Clone)]
pub struct BoardView<'a> {
    board: Board,
    hints: Option<&'a [(Action, i8)]>,
}

impl<'a> BoardView<'a> {
    /// Make a new view
    pub fn new(board: Board) -> Self {
        Self { board, hints: None }
    }

    /// Show move values in empty tiles
    pub fn with_hints(mut self, hints: &'a [(Action, i8)]) -> Self {
        self.hints = Some(hints);
        self
    }

    fn cell(&self, action: Action) -> String {
        let index = action.index();
        match self.board.get(index) {
            Some(team) => {
                let is_winning_tile = self
                    .board
                    .get_winner_info()
                    .is_some_and(|info| info.contains(index));
                if is_winning_tile {
                    format!("[{team}]")
                } else {
                    team.to_string()
                }
            }
            None => match self.hints {
                Some(hints) => hints
                    .iter()
                    .find(|(hint_action, _)| *hint_action == action)
                    .map(|(_, value)| format_value(*value))
                    .unwrap_or_default(),
                None => (index + 1).to_string(),
            },
        }
    }

    fn fmt_row_border(f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "  +")?;
        for _ in 0..BOARD_SIZE {
            for _ in 0..CELL_WIDTH {
                write!(f, "-")?;
            }
            write!(f, "+")?;
        }
        writeln!(f)?;

        Ok(())
    }
}

impl std::fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut header = String::from("  ");
        for column in 0..BOARD_SIZE {
            header.push_str(&format!(" {column:^CELL_WIDTH$}"));
        }
        writeln!(f, "{}", header.trim_end())?;

        for row in 0..BOARD_SIZE {
            Self::fmt_row_border(f)?;

            write!(f, "{row} ")?;
            for column in 0..BOARD_SIZE {
                let action = Action::new(row, column).map_err(|_| std::fmt::Error)?;
                write!(f, "|{:^CELL_WIDTH$}", self.cell(action))?;
            }
            writeln!(f, "|")?;
        }
        Self::fmt_row_border(f)?;

        Ok(())
    }
}
