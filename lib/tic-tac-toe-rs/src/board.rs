use crate::{
    Action,
    Error,
    Team,
    NUM_TILES,
};
use tracing::trace;

/// Mask of all 9 tiles
#[allow(clippy::unusual_byte_groupings)]
const FULL_BOARD: u16 = 0b111_111_111;

const fn line(tiles: [u8; 3], win_type: WinType) -> Line {
    Line {
        mask: (1 << tiles[0]) | (1 << tiles[1]) | (1 << tiles[2]),
        tiles,
        win_type,
    }
}

/// Every winning line, in the order they are checked.
///
/// Rows come first, then columns, then the diagonal and the anti-diagonal.
const LINES: [Line; 8] = [
    // Horizontal Wins
    line([0, 1, 2], WinType::Horizontal),
    line([3, 4, 5], WinType::Horizontal),
    line([6, 7, 8], WinType::Horizontal),
    // Vertical Wins
    line([0, 3, 6], WinType::Vertical),
    line([1, 4, 7], WinType::Vertical),
    line([2, 5, 8], WinType::Vertical),
    // Diagonal win
    line([0, 4, 8], WinType::Diagonal),
    // Anti-Diagonal win
    line([2, 4, 6], WinType::AntiDiagonal),
];

#[derive(Debug, Copy, Clone)]
struct Line {
    mask: u16,
    tiles: [u8; 3],
    win_type: WinType,
}

/// The win type
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum WinType {
    Horizontal,
    Vertical,
    Diagonal,
    AntiDiagonal,
}

/// Winner Info
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct WinnerInfo {
    /// The winning team
    pub team: Team,

    /// The tile_indexes that are part of the win.
    ///
    /// Sorted from least to greatest.
    pub tile_indexes: [u8; 3],

    /// The win type
    pub win_type: WinType,
}

impl WinnerInfo {
    /// Get the least tile index
    pub fn start_tile_index(&self) -> u8 {
        self.tile_indexes[0]
    }

    /// Get the highest tile index
    pub fn end_tile_index(&self) -> u8 {
        self.tile_indexes[2]
    }

    /// Check if a tile is part of the winning line
    pub fn contains(&self, index: u8) -> bool {
        self.tile_indexes.contains(&index)
    }
}

/// A Tic Tac Toe board
///
/// Boards are small [`Copy`] values.
/// Making a move never changes a board, it returns a new one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    // the bitboard
    // 9 tiles, so it cannot fit in a u8 but can fit in a u16
    x_state: u16,
    o_state: u16,
}

impl Board {
    /// Make a new, empty [`Board`].
    pub fn new() -> Self {
        Board {
            x_state: 0,
            o_state: 0,
        }
    }

    /// Get the number of marks the given team has placed.
    pub fn count(self, team: Team) -> u32 {
        match team {
            Team::X => self.x_state.count_ones(),
            Team::O => self.o_state.count_ones(),
        }
    }

    /// Get the team whos turn it is.
    ///
    /// X moves whenever it has not placed more marks than O.
    pub fn get_turn(self) -> Team {
        if self.count(Team::X) <= self.count(Team::O) {
            Team::X
        } else {
            Team::O
        }
    }

    /// Returns true if every tile holds a mark.
    ///
    /// This does not check for wins.
    pub fn is_full(self) -> bool {
        (self.x_state | self.o_state) & FULL_BOARD == FULL_BOARD
    }

    /// Get the number of empty tiles.
    pub fn num_empty(self) -> u32 {
        u32::from(NUM_TILES) - (self.x_state | self.o_state).count_ones()
    }

    /// Check if the given team won.
    ///
    /// This is designed to be fast.
    pub fn has_won(self, team: Team) -> bool {
        let state = match team {
            Team::X => self.x_state,
            Team::O => self.o_state,
        };

        LINES.iter().any(|line| (state & line.mask) == line.mask)
    }

    /// Get the winner if they exist.
    ///
    /// If both teams somehow own a line, the first line in row, column, diagonal order decides.
    pub fn get_winner(self) -> Option<Team> {
        self.get_winner_info().map(|info| info.team)
    }

    /// Get the winner info, if there is a winner
    pub fn get_winner_info(self) -> Option<WinnerInfo> {
        LINES.iter().find_map(|line| {
            let team = if (self.x_state & line.mask) == line.mask {
                Team::X
            } else if (self.o_state & line.mask) == line.mask {
                Team::O
            } else {
                return None;
            };

            Some(WinnerInfo {
                team,
                tile_indexes: line.tiles,
                win_type: line.win_type,
            })
        })
    }

    /// Returns true if the game is over, either by a win or a full board.
    pub fn is_terminal(self) -> bool {
        self.is_full() || self.has_won(Team::X) || self.has_won(Team::O)
    }

    /// Score a finished game from X's point of view.
    ///
    /// # Returns
    /// Returns 1 if X won, -1 if O won, and 0 for a draw.
    ///
    /// # Errors
    /// Returns [`Error::NotTerminal`] if the game is not over.
    pub fn utility(self) -> Result<i8, Error> {
        match self.get_winner() {
            Some(Team::X) => Ok(1),
            Some(Team::O) => Ok(-1),
            None if self.is_full() => Ok(0),
            None => Err(Error::NotTerminal),
        }
    }

    /// Get every legal action, in row-major order.
    ///
    /// This is empty iff the board is full.
    /// It is not empty for won boards that still have empty tiles.
    pub fn actions(self) -> Vec<Action> {
        self.iter()
            .filter(|(_, tile)| tile.is_none())
            .map(|(index, _)| Action::from_index_unchecked(index))
            .collect()
    }

    /// Make a move for the team whos turn it is.
    ///
    /// This does not change `self`.
    ///
    /// # Errors
    /// Returns [`Error::IllegalMove`] if the tile is taken.
    pub fn result(self, action: Action) -> Result<Self, Error> {
        let index = action.index();
        if self.get(index).is_some() {
            return Err(Error::IllegalMove { action });
        }

        Ok(self.set(index, Some(self.get_turn())))
    }

    /// Set the tile at the index.
    ///
    /// This ignores turn order. Use [`Board::result`] to play a move.
    ///
    /// # Panics
    /// Panics if the index >= 9.
    #[must_use]
    pub fn set(mut self, index: u8, team: Option<Team>) -> Self {
        assert!(index < NUM_TILES);
        match team {
            Some(Team::X) => {
                self.x_state |= 1 << index;
                self.o_state &= !(1 << index);
            }
            Some(Team::O) => {
                self.x_state &= !(1 << index);
                self.o_state |= 1 << index;
            }
            None => {
                self.x_state &= !(1 << index);
                self.o_state &= !(1 << index);
            }
        }
        self
    }

    /// Get the tile at the index.
    ///
    /// # Panics
    /// Panics if the index >= 9.
    pub fn get(self, index: u8) -> Option<Team> {
        assert!(index < NUM_TILES);
        if self.x_state & (1 << index) != 0 {
            Some(Team::X)
        } else if self.o_state & (1 << index) != 0 {
            Some(Team::O)
        } else {
            None
        }
    }

    /// Get the tile an action points at.
    pub fn get_cell(self, action: Action) -> Option<Team> {
        self.get(action.index())
    }

    /// Check that the mark counts could occur in a real game.
    ///
    /// # Errors
    /// Returns [`Error::InvalidMarkCounts`] unless X has as many marks as O, or one more.
    pub fn validate(self) -> Result<(), Error> {
        let x = self.count(Team::X);
        let o = self.count(Team::O);
        if x == o || x == o + 1 {
            Ok(())
        } else {
            Err(Error::InvalidMarkCounts { x, o })
        }
    }

    /// Get an iterator over child board states.
    ///
    /// # Returns
    /// Returns an Iterator where Items are tuples.
    /// The first item is the action that was played.
    /// The second is the resulting board state.
    pub fn iter_children(self) -> ChildrenIter {
        ChildrenIter::new(self)
    }

    /// Get an iterator over the tiles.
    ///
    /// The iterator starts at 0 at the top left and ends at 8 at the bottom right.
    ///
    /// # Returns
    /// Returns a tuple pair, where the first element is the index and the second is the tile value.
    pub fn iter(self) -> impl Iterator<Item = (u8, Option<Team>)> {
        (0..NUM_TILES).map(move |index| (index, self.get(index)))
    }

    /// Encode this board as a [`u16`].
    ///
    /// Each tile is a base 3 digit, with tile 0 as the least significant.
    pub fn encode_u16(self) -> u16 {
        let mut ret = 0;
        for i in (0..NUM_TILES).rev() {
            let tile = self.get(i);

            ret *= 3;
            ret += match tile {
                None => 0,
                Some(Team::X) => 1,
                Some(Team::O) => 2,
            };
        }
        ret
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    /// Write the board as 3 lines of `X`, `O` and `.`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, tile) in self.iter() {
            if index != 0 && index % 3 == 0 {
                writeln!(f)?;
            }
            let c = tile.map_or('.', Team::as_char);
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Board {
    type Err = Error;

    /// Parse a board from 9 tiles in row-major order.
    ///
    /// `X` and `O` are marks, `.`, `-` and `_` are empty tiles.
    /// Whitespace, `/` and `|` may be used to separate rows and are skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tiles: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/' && *c != '|')
            .collect();

        if tiles.len() != usize::from(NUM_TILES) {
            return Err(Error::InvalidBoardLength(tiles.len()));
        }

        let mut board = Board::new();
        for (index, c) in (0..NUM_TILES).zip(tiles.iter().copied()) {
            let tile = match c {
                '.' | '-' | '_' => None,
                c => Some(Team::from_char(c).map_err(|_| Error::InvalidTile {
                    character: c,
                    index: usize::from(index),
                })?),
            };
            board = board.set(index, tile);
        }

        board.validate()?;
        trace!(encoded = board.encode_u16(), "parsed board");

        Ok(board)
    }
}

/// An iterator over the legal moves of a board and the boards they lead to.
///
/// Moves are yielded in row-major order.
#[derive(Debug)]
pub struct ChildrenIter {
    board: Board,
    turn: Team,
    index: u8,
}

impl ChildrenIter {
    fn new(board: Board) -> Self {
        let turn = board.get_turn();
        Self {
            board,
            turn,
            index: 0,
        }
    }
}

impl Iterator for ChildrenIter {
    type Item = (Action, Board);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.index >= NUM_TILES {
                return None;
            }

            let index_mask = 1 << self.index;
            let tile_is_empty = ((self.board.x_state | self.board.o_state) & index_mask) == 0;

            if tile_is_empty {
                let action = Action::from_index_unchecked(self.index);
                let board = self.board.set(self.index, Some(self.turn));
                self.index += 1;
                return Some((action, board));
            }
            self.index += 1;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(usize::from(NUM_TILES - self.index.min(NUM_TILES))))
    }
}

impl std::iter::FusedIterator for ChildrenIter {}
