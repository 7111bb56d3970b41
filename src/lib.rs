//! Catalog of rectangle-run "cap" motifs.
//!
//! Motifs are keyed by `(category, variant)` and stored as runs on an integer
//! grid. [`Catalog`] owns the validated table; [`decode`] turns a motif into a
//! rectangle list, scanlines or an [`OccupancyGrid`] for a rendering backend.

pub mod catalog;
pub mod decode;
pub mod error;
pub mod schema_loader;

pub use catalog::{
    BUNDLED_TABLE, Catalog, Motif, MotifKey, RawRecord, RectangleRun, parse_record_stream,
};
pub use decode::{
    Bounds, CANVAS_SIZE, MAX_GRID_CELLS, OccupancyGrid, Scanline, extent, scanlines,
    to_occupancy_grid, to_rects,
};
pub use error::{MotifError, Result};
pub use schema_loader::{TABLE_SCHEMA_VERSION, TableSchema};

use std::env;
use std::path::PathBuf;

/// Environment variable naming a table file to load instead of the bundled one.
pub const ENV_TABLE_PATH: &str = "MOTIF_CATALOG_PATH";

/// Where a catalog's records come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableSource {
    Bundled,
    File(PathBuf),
}

impl TableSource {
    pub fn load(&self) -> Result<Catalog> {
        match self {
            TableSource::Bundled => Catalog::bundled(),
            TableSource::File(path) => Catalog::from_path(path),
        }
    }
}

/// Pick the table to load: an explicit path, then `MOTIF_CATALOG_PATH`, then
/// the build-time `MOTIF_CATALOG_HINT`, then the bundled table.
pub fn resolve_table_source(explicit: Option<PathBuf>) -> TableSource {
    if let Some(path) = explicit {
        return TableSource::File(path);
    }

    if let Some(path) = env_path(ENV_TABLE_PATH) {
        return TableSource::File(path);
    }

    if let Some(hint) = option_env!("MOTIF_CATALOG_HINT") {
        if !hint.is_empty() {
            return TableSource::File(PathBuf::from(hint));
        }
    }

    TableSource::Bundled
}

fn env_path(name: &str) -> Option<PathBuf> {
    env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
