use crate::Action;

/// Error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The target tile already holds a mark
    #[error("illegal move: {action} is already occupied")]
    IllegalMove { action: Action },

    /// The coordinates are not on a 3x3 board
    #[error("({row}, {column}) is out of bounds")]
    OutOfBounds { row: u8, column: u8 },

    /// A utility was requested for a game that is still running
    #[error("the board is not terminal")]
    NotTerminal,

    /// A move was requested for a game that is already over
    #[error("the game is already over")]
    GameOver,

    /// The mark counts cannot occur in a legal game
    #[error("invalid mark counts: X={x}, O={o} (X must equal O or lead by 1)")]
    InvalidMarkCounts { x: u32, o: u32 },

    /// A board string had the wrong number of tiles
    #[error("a board needs 9 tiles, got {0}")]
    InvalidBoardLength(usize),

    /// A board string had an unknown tile character
    #[error("invalid tile '{character}' at index {index}")]
    InvalidTile { character: char, index: usize },

    /// An action string could not be parsed
    #[error("invalid action \"{0}\", expected \"row,column\"")]
    InvalidAction(String),
}
