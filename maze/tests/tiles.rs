use rand::thread_rng;

use ballmaze::{tiles::Walls, Cell, Direction, Maze};

#[test]
fn walls_agree_between_neighbours() {
    let maze = Maze::carve(7, 9, &mut thread_rng()).unwrap();
    let tiles = maze.tiles();
    let at = |cell: Cell| tiles[cell.row * maze.cols() + cell.col];
    for cell in maze.grid().cells() {
        for direction in Direction::ALL {
            let here = at(cell).contains(Walls::towards(direction));
            match maze.grid().neighbour(cell, direction) {
                Some(next) => {
                    assert_eq!(here, at(next).contains(Walls::towards(direction.opposite())))
                }
                None => assert!(here),
            }
        }
    }
}

#[test]
fn open_sides_count_edges() {
    let maze = Maze::carve(6, 6, &mut thread_rng()).unwrap();
    // every open edge removes one wall from each of its two cells
    let open_sides: usize = maze
        .tiles()
        .iter()
        .map(|w| 4 - w.bits().count_ones() as usize)
        .sum();
    assert_eq!(open_sides, 2 * 35);
}
