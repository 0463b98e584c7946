//! Per-cell view of a maze, for consumers working on the grid instead of the geometry

use bitflags::bitflags;

use crate::{Cell, Direction, Edge, Maze};

bitflags! {
    /// Walls around a tile
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Walls: u8 {
        const Top    = 0b0001;
        const Right  = 0b0010;
        const Bottom = 0b0100;
        const Left   = 0b1000;
    }
}

impl Walls {
    #[must_use]
    pub const fn towards(direction: Direction) -> Walls {
        match direction {
            Direction::Up => Walls::Top,
            Direction::Right => Walls::Right,
            Direction::Down => Walls::Bottom,
            Direction::Left => Walls::Left,
        }
    }
}

impl Maze {
    /// Walls of a single cell, the outer border included
    #[must_use]
    pub fn walls(&self, cell: Cell) -> Walls {
        let mut walls = Walls::empty();
        for direction in Direction::ALL {
            let open = self.grid().neighbour(cell, direction).is_some()
                && Edge::crossing(cell, direction)
                    .is_some_and(|edge| self.grid().is_open(edge).unwrap_or(false));
            if !open {
                walls |= Walls::towards(direction);
            }
        }
        walls
    }

    /// Walls of every cell, row-major
    #[must_use]
    pub fn tiles(&self) -> Box<[Walls]> {
        self.grid().cells().map(|cell| self.walls(cell)).collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;

    use crate::{tiles::Walls, Cell, Maze};

    #[test]
    fn zero_source() {
        let maze = Maze::carve(2, 2, &mut StepRng::new(0, 0)).unwrap();
        assert_eq!(
            &*maze.tiles(),
            [
                Walls::Top | Walls::Left | Walls::Bottom,
                Walls::Top | Walls::Right,
                Walls::Top | Walls::Left | Walls::Bottom,
                Walls::Right | Walls::Bottom,
            ]
        );
        assert_eq!(maze.walls(Cell::new(0, 0)), maze.tiles()[0]);
    }
}
