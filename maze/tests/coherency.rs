use std::collections::BTreeSet;

use rand::{rngs::mock::StepRng, thread_rng, Rng};

use ballmaze::{generate_maze, Cell, Edge, Error, LayoutConfig, Maze};

/// Union-find check that the open edges never close a cycle
fn acyclic(maze: &Maze) -> bool {
    let cols = maze.cols();
    let mut parent: Vec<usize> = (0..maze.grid().len()).collect();
    fn root(parent: &mut [usize], mut i: usize) -> usize {
        while parent[i] != i {
            parent[i] = parent[parent[i]];
            i = parent[i];
        }
        i
    }
    maze.grid().open_edges().all(|edge| {
        let [a, b] = edge.cells().map(|Cell { row, col }| row * cols + col);
        let (ra, rb) = (root(&mut parent, a), root(&mut parent, b));
        parent[ra] = rb;
        ra != rb
    })
}

#[test]
fn six_by_six() {
    let mut rng = thread_rng();
    for _ in 0..1000 {
        let maze = Maze::carve(6, 6, &mut rng).unwrap();
        assert_eq!(maze.grid().open_edges().count(), 35);
        assert!(acyclic(&maze));
        assert!(maze.grid().all_visited());
        maze.check_spanning_tree().unwrap();
    }
}

#[test]
fn random_shapes() {
    let mut rng = thread_rng();
    for _ in 0..200 {
        let rows = rng.gen_range(1..20);
        let cols = rng.gen_range(1..20);
        let maze = Maze::carve(rows, cols, &mut rng).unwrap();
        assert_eq!(maze.grid().open_edges().count(), rows * cols - 1);
        assert!(acyclic(&maze));
        let start = maze.carve_start().unwrap();
        assert!(start.row < rows && start.col < cols);
        for cell in maze.grid().cells() {
            assert!(maze.grid().is_visited(cell).unwrap());
        }
    }
}

#[test]
fn removing_any_edge_disconnects() {
    let maze = Maze::carve(4, 5, &mut thread_rng()).unwrap();
    let open: Vec<Edge> = maze.grid().open_edges().collect();
    for removed in &open {
        let mut verticals = maze.grid().verticals().to_vec();
        let mut horizontals = maze.grid().horizontals().to_vec();
        match *removed {
            Edge::Vertical { row, col } => verticals[row * 4 + col] = false,
            Edge::Horizontal { row, col } => horizontals[row * 5 + col] = false,
        }
        let err = Maze::from_edges(4, 5, verticals.into(), horizontals.into()).unwrap_err();
        assert!(matches!(err, Error::NotSpanningTree { reachable, .. } if reachable < 20));
    }
}

#[test]
fn unique_paths() {
    let maze = Maze::carve(5, 5, &mut thread_rng()).unwrap();
    for from in maze.grid().cells() {
        for to in maze.grid().cells() {
            let path = maze.path(from, to).unwrap();
            assert_eq!(path.first(), Some(&from));
            assert_eq!(path.last(), Some(&to));
            // simple: no cell repeated
            assert_eq!(path.iter().collect::<BTreeSet<_>>().len(), path.len());
            // consecutive cells are joined by an open edge
            for pair in path.windows(2) {
                assert!(maze.grid().passages(pair[0]).any(|c| c == pair[1]));
            }
        }
    }
}

#[test]
fn two_by_two_trace() {
    let maze = Maze::carve(2, 2, &mut StepRng::new(0, 0)).unwrap();
    let open: BTreeSet<Edge> = maze.grid().open_edges().collect();
    assert_eq!(
        open,
        BTreeSet::from([
            Edge::Vertical { row: 0, col: 0 },
            Edge::Horizontal { row: 0, col: 1 },
            Edge::Vertical { row: 1, col: 0 },
        ])
    );
    assert!(!maze.grid().is_horizontal_open(0, 0).unwrap());
}

#[test]
fn single_cell_layout() {
    let layout = generate_maze(1, 1, &LayoutConfig::new(120., 80.), &mut thread_rng()).unwrap();
    assert!(layout.walls.is_empty());
    assert_eq!(layout.boundaries.iter().count(), 4);
    assert_eq!(layout.goal.center(), layout.start);
    assert_eq!(layout.start, layout.cell_center(Cell::new(0, 0)));
}

#[test]
fn wall_count_matches_closed_edges() {
    let mut rng = thread_rng();
    let config = LayoutConfig::new(1000., 700.);
    for (rows, cols) in [(3, 6), (10, 10), (1, 12), (12, 1)] {
        let layout = generate_maze(rows, cols, &config, &mut rng).unwrap();
        let inner = rows * (cols - 1) + (rows - 1) * cols;
        assert_eq!(layout.walls.len(), inner - (rows * cols - 1));
        for wall in &layout.walls {
            let r = wall.rect;
            assert!(r.min_x() >= -config.wall_thickness && r.max_x() <= config.width + config.wall_thickness);
            assert!(r.min_y() >= -config.wall_thickness && r.max_y() <= config.height + config.wall_thickness);
        }
    }
}

#[test]
fn empty_grid() {
    for (rows, cols) in [(0, 0), (0, 5), (5, 0)] {
        assert_eq!(
            generate_maze(rows, cols, &LayoutConfig::default(), &mut thread_rng()),
            Err(Error::InvalidDimensions { rows, cols })
        );
        assert!(Maze::carve(rows, cols, &mut thread_rng()).is_err());
    }
}
