use clap::Parser;
use rand::{thread_rng, Rng, SeedableRng};
use rand_wyrand::WyRand;
use serde::{Deserialize, Serialize};

use crate::{CarveStart, Cell, LayoutConfig, Maze, MazeLayout, Result};

/// Config for a maze
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of rows of the grid
    pub rows: usize,
    /// Number of columns of the grid
    pub cols: usize,
    /// Seed of the maze, `None` draws a fresh one each time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Cell the carving starts from
    pub carve_start: CarveStart,
    /// Sizes of the layout
    pub layout: LayoutConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: 3,
            cols: 6,
            seed: None,
            carve_start: CarveStart::Random,
            layout: LayoutConfig::default(),
        }
    }
}

impl Config {
    /// Random number generator for this config
    pub fn rng(&self) -> WyRand {
        let seed = self.seed.unwrap_or_else(|| thread_rng().gen());
        log::debug!("Seeding maze with {seed}");
        WyRand::seed_from_u64(seed)
    }

    /// Carve a maze using `rng`
    pub fn carve<R>(&self, rng: &mut R) -> Result<Maze>
    where
        R: Rng + ?Sized,
    {
        Maze::carve_from(self.rows, self.cols, self.carve_start, rng)
    }

    /// Carve a maze and lay it out
    pub fn generate(&self) -> Result<(Maze, MazeLayout)> {
        self.layout.validate()?;
        let maze = self.carve(&mut self.rng())?;
        let layout = maze.layout(&self.layout)?;
        Ok((maze, layout))
    }
}

/// Partial config for a maze
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Parser, Default)]
pub struct PartialConfig {
    /// Number of rows of the grid
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
    /// Number of columns of the grid
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cols: Option<usize>,
    /// Seed of the maze
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Row the carving starts from (random if neither row nor column is given, `0` if only the column is)
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carve_row: Option<usize>,
    /// Column the carving starts from (random if neither row nor column is given, `0` if only the row is)
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carve_col: Option<usize>,
    /// Width of the play area
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Height of the play area
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Thickness of the walls between cells
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_thickness: Option<f64>,
    /// Thickness of the walls around the play area
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary_thickness: Option<f64>,
    /// Size of the goal, as a fraction of a cell
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_fraction: Option<f64>,
    /// Radius of the ball, as a fraction of the smaller side of a cell
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ball_fraction: Option<f64>,
}

impl PartialConfig {
    /// Merge two partial configs, values in `other` win
    pub fn merge(self, other: PartialConfig) -> Self {
        Self {
            rows: other.rows.or(self.rows),
            cols: other.cols.or(self.cols),
            seed: other.seed.or(self.seed),
            carve_row: other.carve_row.or(self.carve_row),
            carve_col: other.carve_col.or(self.carve_col),
            width: other.width.or(self.width),
            height: other.height.or(self.height),
            wall_thickness: other.wall_thickness.or(self.wall_thickness),
            boundary_thickness: other.boundary_thickness.or(self.boundary_thickness),
            goal_fraction: other.goal_fraction.or(self.goal_fraction),
            ball_fraction: other.ball_fraction.or(self.ball_fraction),
        }
    }

    /// Fill the missing values with the defaults
    ///
    /// A carving start with only one coordinate given takes `0` for the other.
    pub fn or_defaults(self) -> Config {
        let default = Config::default();
        let carve_start = match (self.carve_row, self.carve_col) {
            (None, None) => default.carve_start,
            (row, col) => CarveStart::At(Cell::new(row.unwrap_or(0), col.unwrap_or(0))),
        };
        Config {
            rows: self.rows.unwrap_or(default.rows),
            cols: self.cols.unwrap_or(default.cols),
            seed: self.seed.or(default.seed),
            carve_start,
            layout: LayoutConfig {
                width: self.width.unwrap_or(default.layout.width),
                height: self.height.unwrap_or(default.layout.height),
                wall_thickness: self
                    .wall_thickness
                    .unwrap_or(default.layout.wall_thickness),
                boundary_thickness: self
                    .boundary_thickness
                    .unwrap_or(default.layout.boundary_thickness),
                goal_fraction: self.goal_fraction.unwrap_or(default.layout.goal_fraction),
                ball_fraction: self.ball_fraction.unwrap_or(default.layout.ball_fraction),
            },
        }
    }
}
