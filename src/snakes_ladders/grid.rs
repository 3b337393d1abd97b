use crate::error::GameError;

pub const BOARD_SIZE: u8 = 10;
pub const FIRST_CELL: u8 = 1;
pub const LAST_CELL: u8 = BOARD_SIZE * BOARD_SIZE;

/// Returns an error unless `cell` lies on the board.
pub fn check_cell(cell: u8) -> Result<u8, GameError> {
    if (FIRST_CELL..=LAST_CELL).contains(&cell) {
        Ok(cell)
    } else {
        Err(GameError::InvalidCell(cell))
    }
}

/// A square on the 10x10 grid. Row 0 is the bottom row, column 0 the left edge.
///
/// Cells are laid out boustrophedon style: even rows count left to right,
/// odd rows right to left, so cell 10 sits above cell 11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPosition {
    pub row: u8,
    pub col: u8,
}

impl GridPosition {
    pub fn new(row: u8, col: u8) -> Self {
        GridPosition { row, col }
    }

    pub fn from_cell(cell: u8) -> Result<Self, GameError> {
        let index = check_cell(cell)? - 1;
        let row = index / BOARD_SIZE;
        let offset = index % BOARD_SIZE;
        let col = if row % 2 == 0 { offset } else { BOARD_SIZE - 1 - offset };
        Ok(GridPosition { row, col })
    }

    /// Inverse of [`GridPosition::from_cell`]. Fails with `InvalidPosition`
    /// when the position is off the grid.
    pub fn to_cell(&self) -> Result<u8, GameError> {
        if self.row >= BOARD_SIZE || self.col >= BOARD_SIZE {
            return Err(GameError::InvalidPosition { row: self.row, col: self.col });
        }
        let offset = if self.row % 2 == 0 { self.col } else { BOARD_SIZE - 1 - self.col };
        Ok(self.row * BOARD_SIZE + offset + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashSet;

    #[test]
    fn test_corners() {
        assert_eq!(GridPosition::from_cell(1), Ok(GridPosition::new(0, 0)));
        assert_eq!(GridPosition::from_cell(10), Ok(GridPosition::new(0, 9)));
        assert_eq!(GridPosition::from_cell(11), Ok(GridPosition::new(1, 9)));
        assert_eq!(GridPosition::from_cell(20), Ok(GridPosition::new(1, 0)));
        assert_eq!(GridPosition::from_cell(21), Ok(GridPosition::new(2, 0)));
        assert_eq!(GridPosition::from_cell(91), Ok(GridPosition::new(9, 9)));
        assert_eq!(GridPosition::from_cell(100), Ok(GridPosition::new(9, 0)));
    }

    #[test]
    fn test_rows_alternate_direction() {
        for row in 0..BOARD_SIZE {
            let first = row * BOARD_SIZE + 1;
            let cols: Vec<u8> = (first..first + BOARD_SIZE)
                .map(|cell| GridPosition::from_cell(cell).unwrap().col)
                .collect();
            let expected: Vec<u8> = if row % 2 == 0 {
                (0..BOARD_SIZE).collect()
            } else {
                (0..BOARD_SIZE).rev().collect()
            };
            assert_eq!(cols, expected, "row {}", row);
        }
    }

    #[test]
    fn test_bijection() {
        let mut seen = HashSet::new();
        for cell in FIRST_CELL..=LAST_CELL {
            let pos = GridPosition::from_cell(cell).unwrap();
            assert!(pos.row < BOARD_SIZE && pos.col < BOARD_SIZE);
            assert!(seen.insert(pos), "{:?} visited twice", pos);
            assert_eq!(pos.to_cell(), Ok(cell));
        }
        assert_eq!(seen.len(), 100);
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(GridPosition::from_cell(0), Err(GameError::InvalidCell(0)));
        assert_eq!(GridPosition::from_cell(101), Err(GameError::InvalidCell(101)));
        assert_eq!(
            GridPosition::new(10, 0).to_cell(),
            Err(GameError::InvalidPosition { row: 10, col: 0 })
        );
        assert_eq!(
            GridPosition::new(0, 10).to_cell(),
            Err(GameError::InvalidPosition { row: 0, col: 10 })
        );
    }
}
