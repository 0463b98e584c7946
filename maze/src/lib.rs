//! Random perfect mazes on a rectangular grid
//!
//! A maze is carved by a randomized depth-first traversal ([`carver`]), leaving a
//! spanning tree of open edges: between any two cells there is exactly one simple
//! path. The carved grid is then laid out ([`layout`]) as a list of wall rectangles
//! plus the ball start (top-left cell) and the goal (bottom-right cell), ready to be
//! handed to a rendering or physics engine.
//!
//! ```
//! use ballmaze::{generate_maze, LayoutConfig};
//!
//! let layout = generate_maze(3, 6, &LayoutConfig::new(600., 300.), &mut rand::thread_rng()).unwrap();
//! // a 3x6 grid has 27 inner edges, 17 of them are opened
//! assert_eq!(layout.walls.len(), 10);
//! ```

use std::{
    collections::VecDeque,
    fmt::{self, Display},
};

use rand::Rng;

pub mod carver;
pub use carver::CarveStart;

pub mod config;
pub use config::{Config, PartialConfig};

mod error;
pub use error::{Error, Result, Table};

mod grid;
pub use grid::{Cell, Direction, Edge, Grid};

pub mod layout;
pub use layout::{Boundaries, LayoutConfig, MazeLayout, Point, Rect, Wall};

#[cfg(feature = "tiles")]
pub mod tiles;

/// Generate a maze with a random carving start and lay it out
///
/// Fails with [`Error::InvalidDimensions`] before drawing any random number if the
/// grid is empty.
pub fn generate_maze<R>(
    rows: usize,
    cols: usize,
    layout: &LayoutConfig,
    rng: &mut R,
) -> Result<MazeLayout>
where
    R: Rng + ?Sized,
{
    let grid = Grid::new(rows, cols)?;
    layout.validate()?;
    Maze::carve_grid(grid, CarveStart::Random, rng)?.layout(layout)
}

/// A carved maze
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Maze {
    grid: Grid,
    /// Where the carving started, if known
    carve_start: Option<Cell>,
}

impl Maze {
    /// Carve a maze from a uniformly random cell
    pub fn carve<R>(rows: usize, cols: usize, rng: &mut R) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        Self::carve_from(rows, cols, CarveStart::Random, rng)
    }

    /// Carve a maze from a given start
    pub fn carve_from<R>(rows: usize, cols: usize, start: CarveStart, rng: &mut R) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        Self::carve_grid(Grid::new(rows, cols)?, start, rng)
    }

    fn carve_grid<R>(mut grid: Grid, start: CarveStart, rng: &mut R) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        let carve_start = carver::carve(&mut grid, rng, start)?;
        Ok(Self {
            grid,
            carve_start: Some(carve_start),
        })
    }

    /// Rebuild a maze from stored edge tables, checking they form a spanning tree
    pub fn from_edges(
        rows: usize,
        cols: usize,
        verticals: Box<[bool]>,
        horizontals: Box<[bool]>,
    ) -> Result<Self> {
        let maze = Self {
            grid: Grid::from_tables(rows, cols, verticals, horizontals)?,
            carve_start: None,
        };
        maze.check_spanning_tree()?;
        Ok(maze)
    }

    #[inline(always)]
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline(always)]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    #[inline(always)]
    #[must_use]
    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// Cell the carving started from, `None` for rebuilt mazes
    #[inline(always)]
    #[must_use]
    pub fn carve_start(&self) -> Option<Cell> {
        self.carve_start
    }

    /// Cell the ball starts in
    #[inline(always)]
    #[must_use]
    pub fn start(&self) -> Cell {
        Cell::new(0, 0)
    }

    /// Cell the goal sits in
    #[inline(always)]
    #[must_use]
    pub fn goal(&self) -> Cell {
        Cell::new(self.rows() - 1, self.cols() - 1)
    }

    fn index(&self, cell: Cell) -> Result<usize> {
        if self.grid.contains(cell) {
            Ok(cell.row * self.cols() + cell.col)
        } else {
            Err(Error::OutOfBounds {
                table: Table::Cells,
                row: cell.row,
                col: cell.col,
            })
        }
    }

    /// Breadth first search over open edges, mapping each reached cell to its parent
    fn parents(&self, from: Cell) -> Result<Box<[Option<Cell>]>> {
        let mut parents = vec![None; self.grid.len()].into_boxed_slice();
        parents[self.index(from)?] = Some(from);
        let mut queue = VecDeque::from([from]);
        while let Some(cell) = queue.pop_front() {
            for next in self.grid.passages(cell) {
                let idx = self.index(next)?;
                if parents[idx].is_none() {
                    parents[idx] = Some(cell);
                    queue.push_back(next);
                }
            }
        }
        Ok(parents)
    }

    /// Check that the open edges form a spanning tree
    ///
    /// With `rows * cols - 1` open edges, reaching every cell from one of them is
    /// enough to rule out cycles.
    pub fn check_spanning_tree(&self) -> Result<()> {
        let open_edges = self.grid.open_edges().count();
        let reachable = self
            .parents(self.start())?
            .iter()
            .filter(|p| p.is_some())
            .count();
        if open_edges + 1 == self.grid.len() && reachable == self.grid.len() {
            Ok(())
        } else {
            Err(Error::NotSpanningTree {
                open_edges,
                reachable,
            })
        }
    }

    /// The unique path between two cells, both ends included
    pub fn path(&self, from: Cell, to: Cell) -> Result<Vec<Cell>> {
        let parents = self.parents(from)?;
        let mut path = vec![to];
        let mut cell = to;
        while cell != from {
            cell = parents[self.index(cell)?].ok_or_else(|| Error::NotSpanningTree {
                open_edges: self.grid.open_edges().count(),
                reachable: parents.iter().filter(|p| p.is_some()).count(),
            })?;
            path.push(cell);
        }
        path.reverse();
        Ok(path)
    }

    /// Path from the ball start to the goal
    pub fn solution(&self) -> Result<Vec<Cell>> {
        self.path(self.start(), self.goal())
    }

    /// Lay the maze out on a play area
    pub fn layout(&self, config: &LayoutConfig) -> Result<MazeLayout> {
        layout::emit(&self.grid, config)
    }
}

impl Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [rows, cols] = [self.rows(), self.cols()];
        for y in 0..2 * rows + 1 {
            for x in 0..2 * cols + 1 {
                let open = match (y % 2, x % 2) {
                    // floor
                    (1, 1) => true,
                    // corner
                    (0, 0) => false,
                    (1, _) => {
                        x > 0
                            && x < 2 * cols
                            && self.grid.is_vertical_open(y / 2, x / 2 - 1).unwrap_or(false)
                    }
                    _ => {
                        y > 0
                            && y < 2 * rows
                            && self.grid.is_horizontal_open(y / 2 - 1, x / 2).unwrap_or(false)
                    }
                };
                write!(f, "{}", if open { '.' } else { '#' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    mod maze {
        use rand::{rngs::mock::StepRng, SeedableRng};
        use rand_wyrand::WyRand;

        use crate::{CarveStart, Cell, Error, Maze};

        #[test]
        fn zero_source_display() {
            let maze = Maze::carve(2, 2, &mut StepRng::new(0, 0)).unwrap();
            assert_eq!(maze.carve_start(), Some(Cell::new(0, 0)));
            assert_eq!(maze.to_string(), "#####\n#...#\n###.#\n#...#\n#####\n");
        }

        #[test]
        fn zero_source_solution() {
            let maze = Maze::carve(2, 2, &mut StepRng::new(0, 0)).unwrap();
            assert_eq!(
                maze.solution().unwrap(),
                [
                    Cell::new(0, 0),
                    Cell::new(0, 1),
                    Cell::new(1, 1)
                ]
            );
            assert_eq!(
                maze.path(Cell::new(1, 0), Cell::new(0, 0)).unwrap(),
                [
                    Cell::new(1, 0),
                    Cell::new(1, 1),
                    Cell::new(0, 1),
                    Cell::new(0, 0)
                ]
            );
        }

        #[test]
        fn single_cell_path() {
            let maze = Maze::carve(1, 1, &mut WyRand::seed_from_u64(0)).unwrap();
            assert_eq!(maze.solution().unwrap(), [Cell::new(0, 0)]);
            assert_eq!(maze.to_string(), "###\n#.#\n###\n");
        }

        #[test]
        fn path_out_of_bounds() {
            let maze = Maze::carve(2, 2, &mut WyRand::seed_from_u64(0)).unwrap();
            assert!(matches!(
                maze.path(Cell::new(0, 0), Cell::new(5, 5)),
                Err(Error::OutOfBounds { .. })
            ));
        }

        #[test]
        fn fixed_start() {
            let maze = Maze::carve_from(
                4,
                4,
                CarveStart::At(Cell::new(3, 2)),
                &mut WyRand::seed_from_u64(5),
            )
            .unwrap();
            assert_eq!(maze.carve_start(), Some(Cell::new(3, 2)));
            assert_eq!(maze.start(), Cell::new(0, 0));
            assert_eq!(maze.goal(), Cell::new(3, 3));
            maze.check_spanning_tree().unwrap();
        }
    }

    mod rebuild {
        use rand::SeedableRng;
        use rand_wyrand::WyRand;

        use crate::{error::Table, Error, Maze};

        #[test]
        fn round_trip() {
            let maze = Maze::carve(5, 7, &mut WyRand::seed_from_u64(1)).unwrap();
            let rebuilt = Maze::from_edges(
                5,
                7,
                maze.grid().verticals().into(),
                maze.grid().horizontals().into(),
            )
            .unwrap();
            assert_eq!(rebuilt.carve_start(), None);
            assert_eq!(rebuilt.grid(), maze.grid());
        }

        #[test]
        fn rejects_closed() {
            assert_eq!(
                Maze::from_edges(2, 2, vec![false; 2].into(), vec![false; 2].into()),
                Err(Error::NotSpanningTree {
                    open_edges: 0,
                    reachable: 1
                })
            );
        }

        #[test]
        fn rejects_cycle() {
            // all four edges of a 2x2 grid open: connected, but one edge too many
            assert_eq!(
                Maze::from_edges(2, 2, vec![true; 2].into(), vec![true; 2].into()),
                Err(Error::NotSpanningTree {
                    open_edges: 4,
                    reachable: 4
                })
            );
        }

        #[test]
        fn rejects_wrong_sizes() {
            assert_eq!(
                Maze::from_edges(2, 3, vec![true; 3].into(), vec![true; 3].into()),
                Err(Error::TableSize {
                    table: Table::Verticals,
                    expected: 4,
                    found: 3
                })
            );
        }
    }

    mod generate {
        use rand::{rngs::mock::StepRng, thread_rng};

        use crate::{generate_maze, Error, LayoutConfig};

        #[test]
        fn zero_dimensions() {
            let config = LayoutConfig::default();
            assert_eq!(
                generate_maze(0, 3, &config, &mut thread_rng()),
                Err(Error::InvalidDimensions { rows: 0, cols: 3 })
            );
            assert_eq!(
                generate_maze(3, 0, &config, &mut thread_rng()),
                Err(Error::InvalidDimensions { rows: 3, cols: 0 })
            );
        }

        #[test]
        fn zero_source_is_reproducible() {
            let config = LayoutConfig::new(400., 400.);
            let a = generate_maze(4, 4, &config, &mut StepRng::new(0, 0)).unwrap();
            let b = generate_maze(4, 4, &config, &mut StepRng::new(0, 0)).unwrap();
            assert_eq!(a, b);
            // 24 inner edges, 15 opened
            assert_eq!(a.walls.len(), 9);
        }
    }
}
