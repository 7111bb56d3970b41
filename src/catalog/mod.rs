//! Motif catalog store.
//!
//! `model` holds the key/run/motif types and the raw authored record form;
//! `index` builds the immutable [`Catalog`] from those records. The authored
//! cap table (`data/caps.json`) is embedded and available through
//! [`Catalog::bundled`].

pub mod index;
pub mod model;

pub use index::{BUNDLED_TABLE, Catalog, parse_record_stream};
pub use model::{Motif, MotifKey, RawRecord, RectangleRun};
