use std::fmt;

/// Display position of a square: `(column, row)`, both zero based.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Coordinates {
    pub column: usize,
    pub row: usize,
}

impl Coordinates {
    pub fn from_index(index: usize) -> Coordinates {
        Coordinates {
            column: index % 3,
            row: index / 3,
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_and_center() {
        assert_eq!(Coordinates::from_index(0), Coordinates { column: 0, row: 0 });
        assert_eq!(Coordinates::from_index(2), Coordinates { column: 2, row: 0 });
        assert_eq!(Coordinates::from_index(4), Coordinates { column: 1, row: 1 });
        assert_eq!(Coordinates::from_index(6), Coordinates { column: 0, row: 2 });
        assert_eq!(Coordinates::from_index(8), Coordinates { column: 2, row: 2 });
    }

    #[test]
    fn column_comes_first_when_displayed() {
        assert_eq!(Coordinates::from_index(5).to_string(), "(2, 1)");
    }
}
