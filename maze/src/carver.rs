//! Randomized depth-first carving
//!
//! Starting from one cell, the carver visits its neighbours in a shuffled order,
//! opening the edge towards every neighbour that was not visited yet and descending
//! into it. Edges are only opened towards unvisited cells, so the open edges always
//! form a tree, and as the grid lattice is connected the tree spans every cell.
//!
//! The traversal keeps its own stack of frames instead of recursing, so a grid
//! degenerating in a single corridor does not exhaust the native stack. Random draws
//! happen in the same order as the recursive formulation: the start cell (if random),
//! then one shuffle each time a cell is entered.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, Table};
use crate::grid::{Cell, Direction, Edge, Grid};

/// Cell the carving starts from
///
/// This is independent from the start and goal shown to the player, that always sit
/// in the top-left and bottom-right corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarveStart {
    /// Uniformly random cell, drawn as row then column
    #[default]
    Random,
    /// A given cell
    At(Cell),
}

/// Fisher-Yates shuffle, walking from the last position down to the first
///
/// At each step a position is drawn uniformly from the prefix that is still
/// unshuffled, the current position included.
pub fn shuffle<T, R>(rng: &mut R, items: &mut [T])
where
    R: Rng + ?Sized,
{
    let mut counter = items.len();
    while counter > 0 {
        let index = rng.gen_range(0..counter);
        counter -= 1;
        items.swap(counter, index);
    }
}

/// A cell being explored, with the moves still to try
struct Frame {
    cell: Cell,
    moves: [Direction; 4],
    next: usize,
}

impl Frame {
    fn enter<R>(grid: &mut Grid, rng: &mut R, cell: Cell) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        grid.mark_visited(cell)?;
        let mut moves = Direction::ALL;
        shuffle(rng, &mut moves);
        log::trace!("Entering {cell:?}, moves {moves:?}");
        Ok(Self {
            cell,
            moves,
            next: 0,
        })
    }
}

/// Carve a spanning tree into `grid`, returning the cell the carving started from
///
/// Cells already visited are never entered again, so carving a fully visited grid
/// leaves it untouched.
pub fn carve<R>(grid: &mut Grid, rng: &mut R, start: CarveStart) -> Result<Cell>
where
    R: Rng + ?Sized,
{
    let start = match start {
        CarveStart::Random => {
            let row = rng.gen_range(0..grid.rows());
            let col = rng.gen_range(0..grid.cols());
            Cell::new(row, col)
        }
        CarveStart::At(cell) if grid.contains(cell) => cell,
        CarveStart::At(Cell { row, col }) => {
            return Err(Error::OutOfBounds {
                table: Table::Cells,
                row,
                col,
            })
        }
    };
    log::debug!(
        "Carving a {}x{} grid from {start:?}",
        grid.rows(),
        grid.cols()
    );
    if grid.is_visited(start)? {
        return Ok(start);
    }

    let mut stack = vec![Frame::enter(grid, rng, start)?];
    while let Some(frame) = stack.last_mut() {
        let Some(&direction) = frame.moves.get(frame.next) else {
            // every move tried, backtrack
            stack.pop();
            continue;
        };
        frame.next += 1;
        let cell = frame.cell;

        let Some(next) = grid.neighbour(cell, direction) else {
            continue;
        };
        if grid.is_visited(next)? {
            continue;
        }
        let edge = Edge::crossing(cell, direction).ok_or(Error::OutOfBounds {
            table: Table::Cells,
            row: next.row,
            col: next.col,
        })?;
        grid.open(edge)?;
        stack.push(Frame::enter(grid, rng, next)?);
    }

    debug_assert!(grid.all_visited());
    log::debug!("Carved {} passages", grid.open_edges().count());
    Ok(start)
}
