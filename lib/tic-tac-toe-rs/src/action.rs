use crate::{
    Error,
    BOARD_SIZE,
    NUM_TILES,
};

/// A move: the row and column of an empty tile.
///
/// Rows and columns start at 0 in the top left corner.
/// An [`Action`] is always on the board, but it is only legal for boards where its tile is empty.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Action {
    row: u8,
    column: u8,
}

impl Action {
    /// Make a new [`Action`].
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if either coordinate is not less than 3.
    pub fn new(row: u8, column: u8) -> Result<Self, Error> {
        if row >= BOARD_SIZE || column >= BOARD_SIZE {
            return Err(Error::OutOfBounds { row, column });
        }

        Ok(Self { row, column })
    }

    /// Make an [`Action`] from a tile index.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if the index >= 9.
    pub fn from_index(index: u8) -> Result<Self, Error> {
        if index >= NUM_TILES {
            return Err(Error::OutOfBounds {
                row: index / BOARD_SIZE,
                column: index % BOARD_SIZE,
            });
        }

        Ok(Self::from_index_unchecked(index))
    }

    /// The caller must ensure index < 9.
    pub(crate) const fn from_index_unchecked(index: u8) -> Self {
        Self {
            row: index / BOARD_SIZE,
            column: index % BOARD_SIZE,
        }
    }

    /// Get the row
    pub fn row(self) -> u8 {
        self.row
    }

    /// Get the column
    pub fn column(self) -> u8 {
        self.column
    }

    /// Get the tile index.
    ///
    /// The index starts at 0 at the top left and ends at 8 at the bottom right.
    pub fn index(self) -> u8 {
        self.row * BOARD_SIZE + self.column
    }

    /// Whether this is one of the four corner tiles.
    pub fn is_corner(self) -> bool {
        matches!((self.row, self.column), (0 | 2, 0 | 2))
    }

    /// Whether this is the center tile.
    pub fn is_center(self) -> bool {
        self.row == 1 && self.column == 1
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

impl std::str::FromStr for Action {
    type Err = Error;

    /// Parse `"row,column"` or `"row column"`, optionally wrapped in parentheses.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidAction(s.to_string());

        let trimmed = s
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')')
            .trim();
        let mut parts = trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty());

        let row = parts.next().ok_or_else(invalid)?;
        let column = parts.next().ok_or_else(invalid)?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        let row: u8 = row.parse().map_err(|_| invalid())?;
        let column: u8 = column.parse().map_err(|_| invalid())?;

        Self::new(row, column)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bounds() {
        assert!(Action::new(2, 2).is_ok());
        assert_eq!(
            Action::new(3, 0).unwrap_err(),
            Error::OutOfBounds { row: 3, column: 0 }
        );
        assert_eq!(
            Action::new(0, 7).unwrap_err(),
            Error::OutOfBounds { row: 0, column: 7 }
        );
        assert!(Action::from_index(9).is_err());
    }

    #[test]
    fn index_round_trip() {
        for index in 0..NUM_TILES {
            let action = Action::from_index(index).unwrap();
            assert_eq!(action.index(), index);
        }
        assert_eq!(Action::new(1, 2).unwrap().index(), 5);
    }

    #[test]
    fn parse() {
        assert_eq!("0,2".parse::<Action>().unwrap(), Action::new(0, 2).unwrap());
        assert_eq!(
            " (1, 1) ".parse::<Action>().unwrap(),
            Action::new(1, 1).unwrap()
        );
        assert_eq!("2 0".parse::<Action>().unwrap(), Action::new(2, 0).unwrap());
        assert_eq!(
            "1".parse::<Action>().unwrap_err(),
            Error::InvalidAction("1".into())
        );
        assert_eq!(
            "1,2,3".parse::<Action>().unwrap_err(),
            Error::InvalidAction("1,2,3".into())
        );
        assert_eq!(
            "3,3".parse::<Action>().unwrap_err(),
            Error::OutOfBounds { row: 3, column: 3 }
        );
    }

    #[test]
    fn corners_and_center() {
        let corners: Vec<_> = (0..NUM_TILES)
            .map(Action::from_index_unchecked)
            .filter(|action| action.is_corner())
            .map(Action::index)
            .collect();
        assert_eq!(corners, [0, 2, 6, 8]);
        assert!(Action::new(1, 1).unwrap().is_center());
    }
}
