use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, Table};

/// A cell of the grid
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    #[inline(always)]
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Cell one step away in `direction`, if the coordinates do not underflow
    ///
    /// ```
    /// use ballmaze::{Cell, Direction};
    ///
    /// assert_eq!(Cell::new(2, 0).step(Direction::Up), Some(Cell::new(1, 0)));
    /// assert_eq!(Cell::new(2, 0).step(Direction::Left), None);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn step(&self, direction: Direction) -> Option<Cell> {
        let Cell { row, col } = *self;
        Some(match direction {
            Direction::Up => Cell::new(row.checked_sub(1)?, col),
            Direction::Right => Cell::new(row, col.checked_add(1)?),
            Direction::Down => Cell::new(row.checked_add(1)?, col),
            Direction::Left => Cell::new(row, col.checked_sub(1)?),
        })
    }
}

/// A move between adjacent cells
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All directions, in the order the carver lists them before shuffling
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    #[inline(always)]
    #[must_use]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }
}

/// An edge between two adjacent cells
///
/// Indices are normalized to the smaller of the two cells: `Vertical { row, col }`
/// separates `(row, col)` from `(row, col + 1)`, `Horizontal { row, col }` separates
/// `(row, col)` from `(row + 1, col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Edge {
    Vertical { row: usize, col: usize },
    Horizontal { row: usize, col: usize },
}

impl Edge {
    /// Edge crossed when moving from `cell` in `direction`
    ///
    /// ```
    /// use ballmaze::{Cell, Direction, Edge};
    ///
    /// assert_eq!(
    ///     Edge::crossing(Cell::new(1, 3), Direction::Left),
    ///     Some(Edge::Vertical { row: 1, col: 2 })
    /// );
    /// assert_eq!(
    ///     Edge::crossing(Cell::new(1, 3), Direction::Down),
    ///     Some(Edge::Horizontal { row: 1, col: 3 })
    /// );
    /// ```
    #[must_use]
    pub fn crossing(cell: Cell, direction: Direction) -> Option<Edge> {
        let next = cell.step(direction)?;
        Some(match direction {
            Direction::Left | Direction::Right => Edge::Vertical {
                row: cell.row,
                col: cell.col.min(next.col),
            },
            Direction::Up | Direction::Down => Edge::Horizontal {
                row: cell.row.min(next.row),
                col: cell.col,
            },
        })
    }

    /// The two cells this edge separates
    #[inline(always)]
    #[must_use]
    pub const fn cells(&self) -> [Cell; 2] {
        match *self {
            Edge::Vertical { row, col } => [Cell::new(row, col), Cell::new(row, col + 1)],
            Edge::Horizontal { row, col } => [Cell::new(row, col), Cell::new(row + 1, col)],
        }
    }
}

/// Visited flags and edge states of a rectangular grid
///
/// Every edge starts closed. Tables are stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    visited: Box<[bool]>,
    /// `rows * (cols - 1)` edges between horizontally adjacent cells
    verticals: Box<[bool]>,
    /// `(rows - 1) * cols` edges between vertically adjacent cells
    horizontals: Box<[bool]>,
}

impl Grid {
    /// Create a grid with no visited cell and every edge closed
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let len = Self::checked_len(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            visited: vec![false; len].into_boxed_slice(),
            verticals: vec![false; rows * (cols - 1)].into_boxed_slice(),
            horizontals: vec![false; (rows - 1) * cols].into_boxed_slice(),
        })
    }

    /// Rebuild a fully visited grid from stored edge tables
    pub fn from_tables(
        rows: usize,
        cols: usize,
        verticals: Box<[bool]>,
        horizontals: Box<[bool]>,
    ) -> Result<Self> {
        let len = Self::checked_len(rows, cols)?;
        for (table, expected, found) in [
            (Table::Verticals, rows * (cols - 1), verticals.len()),
            (Table::Horizontals, (rows - 1) * cols, horizontals.len()),
        ] {
            if expected != found {
                return Err(Error::TableSize {
                    table,
                    expected,
                    found,
                });
            }
        }
        Ok(Self {
            rows,
            cols,
            visited: vec![true; len].into_boxed_slice(),
            verticals,
            horizontals,
        })
    }

    fn checked_len(rows: usize, cols: usize) -> Result<usize> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimensions { rows, cols });
        }
        rows.checked_mul(cols)
            .ok_or(Error::InvalidDimensions { rows, cols })
    }

    #[inline(always)]
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[inline(always)]
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells
    #[inline(always)]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// A grid always holds at least one cell
    #[inline(always)]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    #[inline(always)]
    #[must_use]
    pub const fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// In-bounds neighbour of `cell` in `direction`
    #[must_use]
    pub fn neighbour(&self, cell: Cell, direction: Direction) -> Option<Cell> {
        cell.step(direction).filter(|next| self.contains(*next))
    }

    fn cell_index(&self, cell: Cell) -> Result<usize> {
        if self.contains(cell) {
            Ok(cell.row * self.cols + cell.col)
        } else {
            Err(Error::OutOfBounds {
                table: Table::Cells,
                row: cell.row,
                col: cell.col,
            })
        }
    }

    fn vertical_index(&self, row: usize, col: usize) -> Result<usize> {
        if row < self.rows && col < self.cols - 1 {
            Ok(row * (self.cols - 1) + col)
        } else {
            Err(Error::OutOfBounds {
                table: Table::Verticals,
                row,
                col,
            })
        }
    }

    fn horizontal_index(&self, row: usize, col: usize) -> Result<usize> {
        if row < self.rows - 1 && col < self.cols {
            Ok(row * self.cols + col)
        } else {
            Err(Error::OutOfBounds {
                table: Table::Horizontals,
                row,
                col,
            })
        }
    }

    pub fn is_visited(&self, cell: Cell) -> Result<bool> {
        Ok(self.visited[self.cell_index(cell)?])
    }

    pub fn mark_visited(&mut self, cell: Cell) -> Result<()> {
        let idx = self.cell_index(cell)?;
        self.visited[idx] = true;
        Ok(())
    }

    /// Open the edge between `(row, col)` and `(row, col + 1)`
    pub fn open_vertical(&mut self, row: usize, col: usize) -> Result<()> {
        let idx = self.vertical_index(row, col)?;
        self.verticals[idx] = true;
        Ok(())
    }

    /// Open the edge between `(row, col)` and `(row + 1, col)`
    pub fn open_horizontal(&mut self, row: usize, col: usize) -> Result<()> {
        let idx = self.horizontal_index(row, col)?;
        self.horizontals[idx] = true;
        Ok(())
    }

    pub fn is_vertical_open(&self, row: usize, col: usize) -> Result<bool> {
        Ok(self.verticals[self.vertical_index(row, col)?])
    }

    pub fn is_horizontal_open(&self, row: usize, col: usize) -> Result<bool> {
        Ok(self.horizontals[self.horizontal_index(row, col)?])
    }

    pub fn open(&mut self, edge: Edge) -> Result<()> {
        match edge {
            Edge::Vertical { row, col } => self.open_vertical(row, col),
            Edge::Horizontal { row, col } => self.open_horizontal(row, col),
        }
    }

    pub fn is_open(&self, edge: Edge) -> Result<bool> {
        match edge {
            Edge::Vertical { row, col } => self.is_vertical_open(row, col),
            Edge::Horizontal { row, col } => self.is_horizontal_open(row, col),
        }
    }

    /// All cells, row-major
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Cell::new(row, col)))
    }

    /// All inner edges: horizontals first, then verticals, each row-major
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        let horizontals = (0..self.rows - 1)
            .flat_map(move |row| (0..self.cols).map(move |col| Edge::Horizontal { row, col }));
        let verticals = (0..self.rows)
            .flat_map(move |row| (0..self.cols - 1).map(move |col| Edge::Vertical { row, col }));
        horizontals.chain(verticals)
    }

    /// Every inner edge with its state, in the same order as [`Grid::edges`]
    pub fn edge_states(&self) -> impl Iterator<Item = (Edge, bool)> + '_ {
        let states = self.horizontals.iter().chain(self.verticals.iter()).copied();
        self.edges().zip(states)
    }

    /// Open edges, in the same order as [`Grid::edges`]
    pub fn open_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edge_states()
            .filter_map(|(edge, open)| open.then_some(edge))
    }

    /// Closed edges, in the same order as [`Grid::edges`]
    pub fn closed_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edge_states()
            .filter_map(|(edge, open)| (!open).then_some(edge))
    }

    /// Open neighbours of `cell`: cells reachable through a single open edge
    pub fn passages(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        Direction::ALL.into_iter().filter_map(move |direction| {
            let next = self.neighbour(cell, direction)?;
            let edge = Edge::crossing(cell, direction)?;
            self.is_open(edge).ok()?.then_some(next)
        })
    }

    #[must_use]
    pub fn all_visited(&self) -> bool {
        self.visited.iter().all(|v| *v)
    }

    #[must_use]
    pub fn verticals(&self) -> &[bool] {
        &self.verticals
    }

    #[must_use]
    pub fn horizontals(&self) -> &[bool] {
        &self.horizontals
    }
}
