use std::fmt;

/// Every line that wins the game, in the order they are checked.
pub const WIN_SEQUENCES: [[usize; 3]; 8] = [
    // Horizontal
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Vertical
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonal
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => f.write_str("X"),
            Mark::O => f.write_str("O"),
        }
    }
}

/// Result of scanning a board for three in a row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    NoWinner,
    Winner { mark: Mark, line: [usize; 3] },
}

impl Outcome {
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::NoWinner => None,
            Outcome::Winner { mark, .. } => Some(*mark),
        }
    }

    pub fn line(&self) -> Option<[usize; 3]> {
        match self {
            Outcome::NoWinner => None,
            Outcome::Winner { line, .. } => Some(*line),
        }
    }

    /// Whether `index` is part of the winning line.
    pub fn contains(&self, index: usize) -> bool {
        self.line().is_some_and(|line| line.contains(&index))
    }
}

/// One immutable snapshot of the board.
///
/// Squares are stored row-major, `index = row * 3 + column`, with row 0 at
/// the top. `last_played` is the square whose marking produced this
/// snapshot and is `None` only for the empty starting board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Mark>; 9],
    last_played: Option<usize>,
}

impl Board {
    pub fn new() -> Self {
        let squares = [None; 9];
        Self {
            squares,
            last_played: None,
        }
    }

    /// Returns a new snapshot with `mark` placed on `index`.
    ///
    /// Callers are expected to have checked [`Board::is_valid_move`] first.
    pub fn mark(&self, index: usize, mark: Mark) -> Board {
        let mut new_board = *self;
        new_board.squares[index] = Some(mark);
        new_board.last_played = Some(index);
        new_board
    }

    pub fn squares(&self) -> &[Option<Mark>; 9] {
        &self.squares
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.squares.get(index).copied().flatten()
    }

    pub fn last_played(&self) -> Option<usize> {
        self.last_played
    }

    pub fn is_valid_move(&self, index: usize) -> bool {
        matches!(self.squares.get(index), Some(None))
    }

    /// Finds the first completed line, checking rows top to bottom, then
    /// columns left to right, then the two diagonals.
    pub fn outcome(&self) -> Outcome {
        for seq in WIN_SEQUENCES {
            let first = self.squares[seq[0]];
            if let Some(mark) = first {
                if seq.iter().map(|i| self.squares[*i]).all(|x| x == first) {
                    return Outcome::Winner { mark, line: seq };
                }
            }
        }
        Outcome::NoWinner
    }

    pub fn get_winner(&self) -> Option<Mark> {
        self.outcome().winner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(marks: &[(usize, Mark)]) -> Board {
        marks
            .iter()
            .fold(Board::new(), |board, (index, mark)| board.mark(*index, *mark))
    }

    #[test]
    fn empty_board_has_no_winner() {
        assert_eq!(Board::new().outcome(), Outcome::NoWinner);
        assert_eq!(Board::new().last_played(), None);
    }

    #[test]
    fn every_line_is_detected() {
        for seq in WIN_SEQUENCES {
            let board = board_from(&[(seq[0], Mark::O), (seq[1], Mark::O), (seq[2], Mark::O)]);
            assert_eq!(
                board.outcome(),
                Outcome::Winner {
                    mark: Mark::O,
                    line: seq
                }
            );
        }
    }

    #[test]
    fn mixed_line_is_not_a_win() {
        let board = board_from(&[(0, Mark::X), (1, Mark::O), (2, Mark::X)]);
        assert_eq!(board.outcome(), Outcome::NoWinner);
    }

    #[test]
    fn rows_take_priority_over_columns_and_diagonals() {
        // Top row and left column are both complete.
        let board = board_from(&[
            (0, Mark::X),
            (1, Mark::X),
            (2, Mark::X),
            (3, Mark::X),
            (6, Mark::X),
        ]);
        assert_eq!(board.outcome().line(), Some([0, 1, 2]));

        // Left column and main diagonal are both complete.
        let board = board_from(&[
            (0, Mark::O),
            (3, Mark::O),
            (6, Mark::O),
            (4, Mark::O),
            (8, Mark::O),
        ]);
        assert_eq!(board.outcome().line(), Some([0, 3, 6]));
    }

    #[test]
    fn marking_records_last_played() {
        let board = Board::new().mark(4, Mark::X);
        assert_eq!(board.get(4), Some(Mark::X));
        assert_eq!(board.last_played(), Some(4));
        assert!(!board.is_valid_move(4));
        assert!(board.is_valid_move(0));
        assert!(!board.is_valid_move(9));
    }
}
