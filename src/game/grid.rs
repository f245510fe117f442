use std::fmt;

use serde::{Deserialize, Serialize};

use super::player::{Cell, Player};
use crate::error::{GridError, InvalidMove};

/// Directions scanned through the last-move cell, as `(row, column)` steps.
/// Row 0 is the bottom, so a positive row step moves up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Horizontal,
    Vertical,
    /// Bottom-left to top-right, `/`
    DiagonalUp,
    /// Top-left to bottom-right, `\`
    DiagonalDown,
}

impl Direction {
    const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalUp,
        Direction::DiagonalDown,
    ];

    fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalUp => (1, 1),
            Direction::DiagonalDown => (-1, 1),
        }
    }
}

/// An immutable Connect Four grid of any size.
///
/// Cells are stored row-major with row 0 at the bottom. Every column's tokens
/// form a contiguous run starting at row 0; all constructors uphold this.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GridSnapshot", into = "GridSnapshot")]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid. Zero-sized dimensions are allowed.
    pub fn empty(width: usize, height: usize) -> Self {
        Grid {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    /// Build a grid from rows listed bottom row first, taking the width from
    /// the first row.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        let width = rows.first().map_or(0, Vec::len);
        Self::with_rows(width, rows.len(), rows)
    }

    /// Build a `width` x `height` grid from rows listed bottom row first.
    ///
    /// Unlike [`Grid::from_rows`] this keeps the width of grids with no rows.
    pub fn with_rows(width: usize, height: usize, rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        if rows.len() != height {
            return Err(GridError::RowCount {
                expected: height,
                found: rows.len(),
            });
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row, cells_in_row) in rows.into_iter().enumerate() {
            if cells_in_row.len() != width {
                return Err(GridError::RaggedRows {
                    row,
                    expected: width,
                    found: cells_in_row.len(),
                });
            }
            cells.extend(cells_in_row);
        }

        let grid = Grid {
            width,
            height,
            cells,
        };
        grid.check_occupancy()?;
        Ok(grid)
    }

    fn check_occupancy(&self) -> Result<(), GridError> {
        for column in 0..self.width {
            let filled = self.column_height(column);
            if let Some(row) = (filled..self.height).find(|&row| !self.cell(row, column).is_empty())
            {
                return Err(GridError::FloatingToken { row, column });
            }
        }
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, row: usize, column: usize) -> usize {
        row * self.width + column
    }

    fn cell(&self, row: usize, column: usize) -> Cell {
        self.cells[self.index(row, column)]
    }

    /// Get the cell at a specific position, row 0 being the bottom
    pub fn get(&self, row: usize, column: usize) -> Option<Cell> {
        (row < self.height && column < self.width).then(|| self.cell(row, column))
    }

    /// Iterate over rows, bottom row first
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        (0..self.height).map(move |row| &self.cells[self.index(row, 0)..self.index(row + 1, 0)])
    }

    /// Number of tokens stacked in a column (0 for out-of-range columns)
    pub fn column_height(&self, column: usize) -> usize {
        if column >= self.width {
            return 0;
        }
        (0..self.height)
            .take_while(|&row| !self.cell(row, column).is_empty())
            .count()
    }

    /// Check if a column can take no more tokens. Out-of-range columns count as full.
    pub fn is_column_full(&self, column: usize) -> bool {
        column >= self.width || self.column_height(column) == self.height
    }

    /// Columns that can still take a token, in ascending order
    pub fn playable_columns(&self) -> Vec<usize> {
        (0..self.width)
            .filter(|&column| !self.is_column_full(column))
            .collect()
    }

    /// Check if the grid is completely full
    pub fn is_full(&self) -> bool {
        (0..self.width).all(|column| self.is_column_full(column))
    }

    /// Row of the topmost token in a column, i.e. where the last move there landed
    pub fn last_move_row(&self, column: usize) -> Option<usize> {
        self.column_height(column).checked_sub(1)
    }

    /// Drop a token in a column and return the resulting grid.
    ///
    /// The token settles on top of the column's existing tokens. `self` is left
    /// untouched; on error no grid is produced.
    pub fn play_token(&self, column: usize, player: Player) -> Result<Grid, InvalidMove> {
        if column >= self.width {
            return Err(InvalidMove::ColumnOutOfRange {
                column,
                width: self.width,
            });
        }

        let row = self.column_height(column);
        if row >= self.height {
            return Err(InvalidMove::ColumnFull { column });
        }

        let mut next = self.clone();
        let idx = next.index(row, column);
        next.cells[idx] = player.to_cell();
        Ok(next)
    }

    /// Check whether the last token played in `column` completed a run of at
    /// least `win_length` cells.
    ///
    /// Empty or out-of-range columns never win.
    pub fn check_last_move_on(&self, column: usize, win_length: usize) -> bool {
        let Some(row) = self.last_move_row(column) else {
            return false;
        };
        let mover = self.cell(row, column);

        Direction::ALL
            .iter()
            .any(|&direction| self.run_length(row, column, direction, mover) >= win_length)
    }

    /// Length of the run of `cell` through `(row, column)` along `direction`,
    /// counting both sides.
    fn run_length(&self, row: usize, column: usize, direction: Direction, cell: Cell) -> usize {
        let (dr, dc) = direction.step();
        1 + self.count_towards(row, column, (dr, dc), cell)
            + self.count_towards(row, column, (-dr, -dc), cell)
    }

    fn count_towards(&self, row: usize, column: usize, step: (isize, isize), cell: Cell) -> usize {
        let mut count = 0;
        let (mut r, mut c) = (row, column);
        loop {
            match (r.checked_add_signed(step.0), c.checked_add_signed(step.1)) {
                (Some(nr), Some(nc))
                    if nr < self.height && nc < self.width && self.cell(nr, nc) == cell =>
                {
                    count += 1;
                    r = nr;
                    c = nc;
                }
                _ => return count,
            }
        }
    }
}

/// Serialized form of a [`Grid`]. Dimensions are stored explicitly so grids
/// with no rows or no columns keep their shape.
#[derive(Serialize, Deserialize)]
struct GridSnapshot {
    width: usize,
    height: usize,
    rows: Vec<Vec<Cell>>,
}

impl TryFrom<GridSnapshot> for Grid {
    type Error = GridError;

    fn try_from(snapshot: GridSnapshot) -> Result<Self, Self::Error> {
        Grid::with_rows(snapshot.width, snapshot.height, snapshot.rows)
    }
}

impl From<Grid> for GridSnapshot {
    fn from(grid: Grid) -> Self {
        GridSnapshot {
            width: grid.width,
            height: grid.height,
            rows: grid.rows().map(<[Cell]>::to_vec).collect(),
        }
    }
}

/// Renders the top row first, with column numbers underneath.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.height).rev() {
            let line: Vec<String> = (0..self.width)
                .map(|column| self.cell(row, column).symbol().to_string())
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        let footer: Vec<String> = (0..self.width).map(|column| (column % 10).to_string()).collect();
        write!(f, "{}", footer.join(" "))
    }
}

/// Create an empty `width` x `height` grid.
pub fn empty_grid(width: usize, height: usize) -> Grid {
    Grid::empty(width, height)
}

/// Drop `player`'s token into `column`, returning the new grid.
pub fn play_token(grid: &Grid, column: usize, player: Player) -> Result<Grid, InvalidMove> {
    grid.play_token(column, player)
}

/// Whether the last move in `column` completed `win_length` in a row.
pub fn check_last_move_on(grid: &Grid, column: usize, win_length: usize) -> bool {
    grid.check_last_move_on(column, win_length)
}
