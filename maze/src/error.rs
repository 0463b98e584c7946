use std::fmt::{self, Display};

/// State table an out of bounds access was aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    /// Visited flags, one per cell
    Cells,
    /// Edges between horizontally adjacent cells
    Verticals,
    /// Edges between vertically adjacent cells
    Horizontals,
}

impl Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Table::Cells => "cells",
            Table::Verticals => "vertical edges",
            Table::Horizontals => "horizontal edges",
        })
    }
}

/// Errors raised while generating or laying out a maze
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// The grid needs at least one row and one column
    InvalidDimensions { rows: usize, cols: usize },
    /// Access outside the index range of one of the grid tables
    OutOfBounds { table: Table, row: usize, col: usize },
    /// The play area must be finite and strictly positive
    InvalidArea { width: f64, height: f64 },
    /// A wall thickness that is not finite and strictly positive
    InvalidThickness { name: &'static str, value: f64 },
    /// A size fraction outside `(0, 1]`
    InvalidFraction { name: &'static str, value: f64 },
    /// A state table whose length does not match the grid dimensions
    TableSize {
        table: Table,
        expected: usize,
        found: usize,
    },
    /// Edge tables that do not describe a spanning tree of the grid
    NotSpanningTree { open_edges: usize, reachable: usize },
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDimensions { rows, cols } => {
                write!(f, "invalid grid dimensions {rows}x{cols}, both must be at least 1")
            }
            Error::OutOfBounds { table, row, col } => {
                write!(f, "index [{row}, {col}] is out of bounds for the {table}")
            }
            Error::TableSize {
                table,
                expected,
                found,
            } => write!(f, "expected {expected} {table}, found {found}"),
            Error::InvalidArea { width, height } => {
                write!(f, "invalid play area {width}x{height}")
            }
            Error::InvalidThickness { name, value } => {
                write!(f, "{name} must be finite and positive, got {value}")
            }
            Error::InvalidFraction { name, value } => {
                write!(f, "{name} must be in (0, 1], got {value}")
            }
            Error::NotSpanningTree {
                open_edges,
                reachable,
            } => write!(
                f,
                "edges do not form a spanning tree ({open_edges} open edges, {reachable} reachable cells)"
            ),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T, E = Error> = std::result::Result<T, E>;
