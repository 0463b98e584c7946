//! Geometry of a carved maze
//!
//! Every closed edge becomes a thin wall centred on the boundary between its two
//! cells. Coordinates grow rightwards and downwards from the top-left corner of
//! the play area, and every rectangle is described by its centre and size.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid::{Cell, Edge, Grid};

/// A point of the play area
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline(always)]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis aligned rectangle, described by its centre and size
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline(always)]
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline(always)]
    #[must_use]
    pub const fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline(always)]
    #[must_use]
    pub fn min_x(&self) -> f64 {
        self.x - self.width / 2.
    }

    #[inline(always)]
    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.x + self.width / 2.
    }

    #[inline(always)]
    #[must_use]
    pub fn min_y(&self) -> f64 {
        self.y - self.height / 2.
    }

    #[inline(always)]
    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.y + self.height / 2.
    }

    /// Check if a point is inside this rect, borders included
    /// ```
    /// use ballmaze::{Point, Rect};
    ///
    /// let rect = Rect::new(10., 10., 4., 2.);
    /// assert!(rect.contains(Point::new(12., 9.)));
    /// assert!(!rect.contains(Point::new(12.5, 10.)));
    /// ```
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.min_x() <= point.x
            && point.x <= self.max_x()
            && self.min_y() <= point.y
            && point.y <= self.max_y()
    }

    /// Check if a circle touches this rect
    /// ```
    /// use ballmaze::{Point, Rect};
    ///
    /// let rect = Rect::new(0., 0., 2., 2.);
    /// assert!(rect.overlaps_circle(Point::new(2., 0.), 1.));
    /// assert!(!rect.overlaps_circle(Point::new(2., 2.), 1.));
    /// ```
    #[must_use]
    pub fn overlaps_circle(&self, center: Point, radius: f64) -> bool {
        let dx = center.x - center.x.clamp(self.min_x(), self.max_x());
        let dy = center.y - center.y.clamp(self.min_y(), self.max_y());
        dx * dx + dy * dy <= radius * radius
    }
}

/// A wall standing on a closed edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub edge: Edge,
    pub rect: Rect,
}

/// Walls enclosing the play area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boundaries {
    pub top: Rect,
    pub bottom: Rect,
    pub left: Rect,
    pub right: Rect,
}

impl Boundaries {
    pub fn iter(&self) -> impl Iterator<Item = &Rect> {
        [&self.top, &self.bottom, &self.left, &self.right].into_iter()
    }
}

/// Sizes used to lay a maze out
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Width of the play area
    pub width: f64,
    /// Height of the play area
    pub height: f64,
    /// Thickness of the walls between cells
    pub wall_thickness: f64,
    /// Thickness of the four walls around the play area
    pub boundary_thickness: f64,
    /// Size of the goal, as a fraction of a cell
    pub goal_fraction: f64,
    /// Radius of the ball, as a fraction of the smaller side of a cell
    pub ball_fraction: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 800.,
            height: 600.,
            wall_thickness: 5.,
            boundary_thickness: 2.,
            goal_fraction: 0.7,
            ball_fraction: 0.25,
        }
    }
}

impl LayoutConfig {
    /// Default sizes on a given play area
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        let positive = |v: f64| v.is_finite() && v > 0.;
        if !positive(self.width) || !positive(self.height) {
            return Err(Error::InvalidArea {
                width: self.width,
                height: self.height,
            });
        }
        for (name, value) in [
            ("wall_thickness", self.wall_thickness),
            ("boundary_thickness", self.boundary_thickness),
        ] {
            if !positive(value) {
                return Err(Error::InvalidThickness { name, value });
            }
        }
        for (name, value) in [
            ("goal_fraction", self.goal_fraction),
            ("ball_fraction", self.ball_fraction),
        ] {
            if !(value > 0. && value <= 1.) {
                return Err(Error::InvalidFraction { name, value });
            }
        }
        Ok(())
    }
}

/// Geometry handed to the renderer and the physics layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MazeLayout {
    pub rows: usize,
    pub cols: usize,
    /// Width of a single cell
    pub unit_width: f64,
    /// Height of a single cell
    pub unit_height: f64,
    /// Walls on closed edges: horizontals first, then verticals, each row-major
    pub walls: Vec<Wall>,
    pub boundaries: Boundaries,
    /// Goal area, centred on the bottom-right cell
    pub goal: Rect,
    /// Ball start, at the centre of the top-left cell
    pub start: Point,
    pub ball_radius: f64,
}

impl MazeLayout {
    /// Centre of a cell
    #[must_use]
    pub fn cell_center(&self, cell: Cell) -> Point {
        Point::new(
            (cell.col as f64 + 0.5) * self.unit_width,
            (cell.row as f64 + 0.5) * self.unit_height,
        )
    }

    /// Every wall rect, carved walls first and boundaries last
    pub fn rects(&self) -> impl Iterator<Item = &Rect> {
        self.walls.iter().map(|w| &w.rect).chain(self.boundaries.iter())
    }

    /// Check if a ball centred in `ball` touches the goal
    #[must_use]
    pub fn reached_goal(&self, ball: Point) -> bool {
        self.goal.overlaps_circle(ball, self.ball_radius)
    }
}

/// Lay out the walls of `grid` on the play area described by `config`
pub fn emit(grid: &Grid, config: &LayoutConfig) -> Result<MazeLayout> {
    config.validate()?;
    let LayoutConfig {
        width,
        height,
        wall_thickness,
        boundary_thickness,
        goal_fraction,
        ball_fraction,
    } = *config;
    let unit_width = width / grid.cols() as f64;
    let unit_height = height / grid.rows() as f64;

    let walls: Vec<_> = grid
        .closed_edges()
        .map(|edge| {
            let rect = match edge {
                Edge::Horizontal { row, col } => Rect::new(
                    col as f64 * unit_width + unit_width / 2.,
                    row as f64 * unit_height + unit_height,
                    unit_width,
                    wall_thickness,
                ),
                Edge::Vertical { row, col } => Rect::new(
                    col as f64 * unit_width + unit_width,
                    row as f64 * unit_height + unit_height / 2.,
                    wall_thickness,
                    unit_height,
                ),
            };
            Wall { edge, rect }
        })
        .collect();
    log::debug!(
        "Laid out {} walls on a {width}x{height} area",
        walls.len()
    );

    let boundaries = Boundaries {
        top: Rect::new(width / 2., 0., width, boundary_thickness),
        bottom: Rect::new(width / 2., height, width, boundary_thickness),
        left: Rect::new(0., height / 2., boundary_thickness, height),
        right: Rect::new(width, height / 2., boundary_thickness, height),
    };

    Ok(MazeLayout {
        rows: grid.rows(),
        cols: grid.cols(),
        unit_width,
        unit_height,
        walls,
        boundaries,
        goal: Rect::new(
            width - unit_width / 2.,
            height - unit_height / 2.,
            unit_width * goal_fraction,
            unit_height * goal_fraction,
        ),
        start: Point::new(unit_width / 2., unit_height / 2.),
        ball_radius: unit_width.min(unit_height) * ball_fraction,
    })
}
