use std::{fs::read_to_string, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use simple_logger::SimpleLogger;

use ballmaze::tiles::Walls;
use ballmaze::{Cell, PartialConfig};

#[derive(Debug, Parser)]
struct Args {
    /// Configuration file for the maze
    #[clap(short)]
    config: Option<PathBuf>,
    /// Overrides of the configuration file
    #[clap(flatten)]
    overrides: PartialConfig,
    /// Output file
    #[clap(short, long)]
    output: PathBuf,
}

const TILE_SIZE: u32 = 20;
const WALL_SIZE: u32 = 2;
const FLOOR_COLOR: [u8; 3] = [255, 255, 255];
const WALL_COLOR: [u8; 3] = [200, 0, 0];
const BALL_COLOR: [u8; 3] = [0, 0, 255];
const GOAL_COLOR: [u8; 3] = [0, 160, 0];

fn fill(image: &mut image::RgbImage, xs: std::ops::Range<u32>, ys: std::ops::Range<u32>, color: [u8; 3]) {
    for x in xs {
        for y in ys.clone() {
            image[(x, y)].0 = color;
        }
    }
}

/// Pixels covered by a marker of `fraction` of a cell, kept inside the tile walls
fn marker(cell: Cell, fraction: f64) -> (std::ops::Range<u32>, std::ops::Range<u32>) {
    let inner = TILE_SIZE - 2 * WALL_SIZE;
    let side = (inner as f64 * fraction).clamp(1., inner as f64) as u32;
    let margin = (TILE_SIZE - side) / 2;
    let [top, left] = [cell.row as u32, cell.col as u32].map(|x| x * TILE_SIZE + margin);
    (left..left + side, top..top + side)
}

fn main() -> anyhow::Result<()> {
    SimpleLogger::new()
        .without_timestamps()
        .with_level(if cfg!(debug_assertions) {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .env()
        .init()
        .context("While initializing logging")?;

    let Args {
        config,
        overrides,
        output,
    } = Args::parse();
    let config: PartialConfig = config
        .map(|path| {
            read_to_string(path)
                .context("Cannot read config file")
                .and_then(|s| toml::from_str(&s).context("Cannot parse config file"))
        })
        .transpose()
        .context("While loading configs")?
        .unwrap_or_default();
    let config = config.merge(overrides).or_defaults();

    let (maze, layout) = config.generate().context("While generating the maze")?;
    log::info!(
        "Generated a {}x{} maze with {} walls",
        maze.rows(),
        maze.cols(),
        layout.walls.len()
    );
    print!("{maze}");

    let mut image = image::RgbImage::new(
        TILE_SIZE * maze.cols() as u32,
        TILE_SIZE * maze.rows() as u32,
    );
    for (pos, walls) in maze.tiles().iter().enumerate() {
        let [top, left] = [pos / maze.cols(), pos % maze.cols()].map(|x| x as u32 * TILE_SIZE);
        let [bottom, right] = [top + TILE_SIZE, left + TILE_SIZE];
        fill(&mut image, left..right, top..bottom, FLOOR_COLOR);
        if walls.contains(Walls::Top) {
            fill(&mut image, left..right, top..top + WALL_SIZE, WALL_COLOR);
        }
        if walls.contains(Walls::Bottom) {
            fill(&mut image, left..right, bottom - WALL_SIZE..bottom, WALL_COLOR);
        }
        if walls.contains(Walls::Left) {
            fill(&mut image, left..left + WALL_SIZE, top..bottom, WALL_COLOR);
        }
        if walls.contains(Walls::Right) {
            fill(&mut image, right - WALL_SIZE..right, top..bottom, WALL_COLOR);
        }
    }

    // markers, scaled from the layout units to tiles
    let (xs, ys) = marker(maze.goal(), config.layout.goal_fraction);
    fill(&mut image, xs, ys, GOAL_COLOR);
    let (xs, ys) = marker(maze.start(), 2. * config.layout.ball_fraction);
    fill(&mut image, xs, ys, BALL_COLOR);

    image.save(output).context("While saving the image")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use ballmaze::Cell;

    use crate::{marker, TILE_SIZE, WALL_SIZE};

    fn assert_inside(cell: Cell, fraction: f64) {
        let (xs, ys) = marker(cell, fraction);
        let [top, left] = [cell.row as u32, cell.col as u32].map(|x| x * TILE_SIZE);
        assert!(!xs.is_empty() && !ys.is_empty());
        assert!(xs.start >= left + WALL_SIZE && xs.end <= left + TILE_SIZE - WALL_SIZE);
        assert!(ys.start >= top + WALL_SIZE && ys.end <= top + TILE_SIZE - WALL_SIZE);
    }

    #[test]
    fn full_ball_stays_in_tile() {
        // ball diameter is twice the largest accepted radius fraction
        assert_inside(Cell::new(0, 0), 2. * 1.0);
        assert_inside(Cell::new(3, 5), 2. * 1.0);
    }

    #[test]
    fn fractions_in_range() {
        for fraction in [f64::MIN_POSITIVE, 0.25, 0.7, 1.0] {
            assert_inside(Cell::new(2, 1), fraction);
        }
        let (xs, _) = marker(Cell::new(0, 0), 1.0);
        assert_eq!(xs.len() as u32, TILE_SIZE - 2 * WALL_SIZE);
    }
}
