//! Run decoder and geometry resolver.
//!
//! Turns a motif's stored runs into render-ready geometry: the validated
//! rectangle list, a dense occupancy grid clipped to caller bounds, or a
//! row-ordered scanline view. Every function here is a pure function of its
//! inputs.

use crate::catalog::{Motif, RectangleRun};
use crate::error::{MotifError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Side length of the authored cap canvas.
pub const CANVAS_SIZE: i64 = 24;

/// Largest number of cells a single occupancy grid may hold.
pub const MAX_GRID_CELLS: usize = 1 << 26;

/// Inclusive bounding box in grid coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: i64,
    pub min_y: i64,
    pub max_x: i64,
    pub max_y: i64,
}

impl Bounds {
    pub fn new(min_x: i64, min_y: i64, max_x: i64, max_y: i64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// The full authored canvas, `(0, 0)` to `(23, 23)`.
    pub fn canvas() -> Self {
        Self::new(0, 0, CANVAS_SIZE - 1, CANVAS_SIZE - 1)
    }

    /// Fails with [`MotifError::InvalidBounds`] when `min > max` on either axis.
    pub fn validate(&self) -> Result<()> {
        if self.min_x > self.max_x || self.min_y > self.max_y {
            return Err(MotifError::InvalidBounds {
                min_x: self.min_x,
                min_y: self.min_y,
                max_x: self.max_x,
                max_y: self.max_y,
            });
        }
        Ok(())
    }

    /// Columns spanned, saturating at `usize::MAX` for spans wider than that.
    pub fn width(&self) -> usize {
        span(self.min_x, self.max_x)
    }

    /// Rows spanned, saturating at `usize::MAX`.
    pub fn height(&self) -> usize {
        span(self.min_y, self.max_y)
    }

    /// Number of cells in the box, or `None` if it overflows `usize`.
    pub fn cell_count(&self) -> Option<usize> {
        let width = usize::try_from(self.max_x.abs_diff(self.min_x))
            .ok()?
            .checked_add(1)?;
        let height = usize::try_from(self.max_y.abs_diff(self.min_y))
            .ok()?
            .checked_add(1)?;
        width.checked_mul(height)
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        self.min_x <= x && x <= self.max_x && self.min_y <= y && y <= self.max_y
    }
}

fn span(min: i64, max: i64) -> usize {
    usize::try_from(max.abs_diff(min))
        .unwrap_or(usize::MAX)
        .saturating_add(1)
}

impl FromStr for Bounds {
    type Err = String;

    /// Parses `minX,minY,maxX,maxY`.
    fn from_str(raw: &str) -> std::result::Result<Self, Self::Err> {
        let parts = raw
            .split(',')
            .map(|part| part.trim().parse::<i64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|err| format!("invalid bounds '{raw}': {err}"))?;
        match parts.as_slice() {
            [min_x, min_y, max_x, max_y] => Ok(Self::new(*min_x, *min_y, *max_x, *max_y)),
            _ => Err(format!(
                "invalid bounds '{raw}': expected minX,minY,maxX,maxY"
            )),
        }
    }
}

/// Dense per-cell coverage of a motif over a bounding box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    bounds: Bounds,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    // Callers must have checked `bounds` against MAX_GRID_CELLS.
    fn empty(bounds: Bounds, cells: usize) -> Self {
        Self {
            bounds,
            cells: vec![false; cells],
        }
    }

    fn offset(&self, x: i64, y: i64) -> usize {
        let col = x.abs_diff(self.bounds.min_x) as usize;
        let row = y.abs_diff(self.bounds.min_y) as usize;
        row * self.bounds.width() + col
    }

    fn mark(&mut self, x: i64, y: i64) {
        let idx = self.offset(x, y);
        self.cells[idx] = true;
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn width(&self) -> usize {
        self.bounds.width()
    }

    pub fn height(&self) -> usize {
        self.bounds.height()
    }

    /// Coverage of cell `(x, y)` in native coordinates; `false` outside bounds.
    pub fn get(&self, x: i64, y: i64) -> bool {
        self.bounds.contains(x, y) && self.cells[self.offset(x, y)]
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell).count()
    }

    /// Covered cells in row-major order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        let width = self.width();
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell)
            .map(move |(idx, _)| {
                (
                    self.bounds.min_x + (idx % width) as i64,
                    self.bounds.min_y + (idx / width) as i64,
                )
            })
    }

    /// Rows from `min_y` to `max_y`.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.width())
    }
}

impl fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.rows().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            for cell in row {
                f.write_str(if *cell { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}

/// A single-row span `[x, x + width)` on row `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Scanline {
    pub y: i64,
    pub x: i64,
    pub width: i64,
}

/// Re-validate a motif's runs and return them in authored order.
pub fn to_rects(motif: &Motif) -> Result<Vec<RectangleRun>> {
    for (index, run) in motif.runs().iter().enumerate() {
        run.check_extent()
            .map_err(|reason| MotifError::MalformedRun {
                key: motif.key(),
                index,
                reason,
            })?;
    }
    Ok(motif.runs().to_vec())
}

/// Expand every run into covered cells inside `bounds`.
///
/// Overlapping runs mark the same cells once. Runs outside `bounds` are
/// ignored and runs crossing the edge are clipped. Bounds holding more than
/// [`MAX_GRID_CELLS`] cells fail with [`MotifError::GridTooLarge`].
pub fn to_occupancy_grid(motif: &Motif, bounds: Bounds) -> Result<OccupancyGrid> {
    bounds.validate()?;
    let cells = bounds
        .cell_count()
        .filter(|count| *count <= MAX_GRID_CELLS)
        .ok_or(MotifError::GridTooLarge {
            min_x: bounds.min_x,
            min_y: bounds.min_y,
            max_x: bounds.max_x,
            max_y: bounds.max_y,
            limit: MAX_GRID_CELLS,
        })?;
    let runs = to_rects(motif)?;
    let mut grid = OccupancyGrid::empty(bounds, cells);
    let mut clipped = 0usize;

    for run in &runs {
        let x0 = run.x.max(bounds.min_x);
        let x1 = (run.end_x() - 1).min(bounds.max_x);
        let y0 = run.y.max(bounds.min_y);
        let y1 = (run.end_y() - 1).min(bounds.max_y);
        if x0 > x1 || y0 > y1 {
            clipped += 1;
            continue;
        }
        if x0 != run.x || y0 != run.y || x1 != run.end_x() - 1 || y1 != run.end_y() - 1 {
            clipped += 1;
        }
        for y in y0..=y1 {
            for x in x0..=x1 {
                grid.mark(x, y);
            }
        }
    }

    debug!(
        key = %motif.key(),
        runs = runs.len(),
        clipped,
        occupied = grid.occupied_count(),
        "Resolved occupancy grid"
    );
    Ok(grid)
}

/// Tight inclusive bounds of all runs; `None` when the motif has no runs.
pub fn extent(motif: &Motif) -> Option<Bounds> {
    motif.runs().iter().fold(None, |acc, run| {
        let run_bounds = Bounds::new(run.x, run.y, run.end_x() - 1, run.end_y() - 1);
        Some(match acc {
            None => run_bounds,
            Some(b) => Bounds::new(
                b.min_x.min(run_bounds.min_x),
                b.min_y.min(run_bounds.min_y),
                b.max_x.max(run_bounds.max_x),
                b.max_y.max(run_bounds.max_y),
            ),
        })
    })
}

/// Runs split into one span per row and sorted by `(y, x, width)`.
///
/// Authored run order is not guaranteed to follow rows, so rasterizers that
/// walk scanlines should use this instead of [`Motif::runs`].
pub fn scanlines(motif: &Motif) -> Result<Vec<Scanline>> {
    let mut lines: Vec<Scanline> = to_rects(motif)?
        .into_iter()
        .flat_map(|run| {
            (run.y..run.end_y()).map(move |y| Scanline {
                y,
                x: run.x,
                width: run.width,
            })
        })
        .collect();
    lines.sort();
    Ok(lines)
}
