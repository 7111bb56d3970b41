//! Motif data model: keys, rectangle runs, and raw authored records.

use crate::error::{MotifError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Two-part identifier of a motif.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MotifKey {
    pub category: u32,
    pub variant: u32,
}

impl MotifKey {
    pub fn new(category: u32, variant: u32) -> Self {
        Self { category, variant }
    }
}

impl fmt::Display for MotifKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.category, self.variant)
    }
}

impl From<(u32, u32)> for MotifKey {
    fn from((category, variant): (u32, u32)) -> Self {
        Self::new(category, variant)
    }
}

/// Filled axis-aligned rectangle covering `[x, x + width) × [y, y + height)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RectangleRun {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl RectangleRun {
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge. Saturates for runs that failed validation.
    pub fn end_x(&self) -> i64 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    pub fn end_y(&self) -> i64 {
        self.y.saturating_add(self.height)
    }

    pub fn contains(&self, px: i64, py: i64) -> bool {
        self.x <= px && px < self.end_x() && self.y <= py && py < self.end_y()
    }

    /// Checks `width >= 1`, `height >= 1`, and that both far edges fit in
    /// `i64`, returning the violated rule.
    pub(crate) fn check_extent(&self) -> std::result::Result<(), String> {
        if self.width < 1 {
            return Err(format!("width must be >= 1, got {}", self.width));
        }
        if self.height < 1 {
            return Err(format!("height must be >= 1, got {}", self.height));
        }
        if self.x.checked_add(self.width).is_none() {
            return Err(format!("x + width overflows: {} + {}", self.x, self.width));
        }
        if self.y.checked_add(self.height).is_none() {
            return Err(format!("y + height overflows: {} + {}", self.y, self.height));
        }
        Ok(())
    }
}

impl From<[i64; 4]> for RectangleRun {
    fn from([x, y, width, height]: [i64; 4]) -> Self {
        Self::new(x, y, width, height)
    }
}

/// A named shape: its key plus runs in authored order.
///
/// Runs are not sorted; see [`crate::decode::scanlines`] for an ordered view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Motif {
    key: MotifKey,
    runs: Vec<RectangleRun>,
}

impl Motif {
    /// Wrap runs without validating them. Motifs built this way are checked
    /// again by [`crate::decode::to_rects`].
    pub fn new(key: MotifKey, runs: Vec<RectangleRun>) -> Self {
        Self { key, runs }
    }

    pub fn key(&self) -> MotifKey {
        self.key
    }

    pub fn category(&self) -> u32 {
        self.key.category
    }

    pub fn variant(&self) -> u32 {
        self.key.variant
    }

    pub fn runs(&self) -> &[RectangleRun] {
        &self.runs
    }
}

/// One authored table entry, `[category, variant, [[x, y, width, height], ...]]`.
///
/// Run tuples stay as raw JSON until [`RawRecord::parse_runs`] so field-count
/// and type errors surface as [`MotifError::MalformedRun`] rather than as
/// generic parse failures.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RawRecord(pub u32, pub u32, pub Vec<Value>);

impl RawRecord {
    /// Build a record from integer tuples, e.g. for fixtures or generated data.
    pub fn from_runs(category: u32, variant: u32, runs: &[[i64; 4]]) -> Self {
        let runs = runs
            .iter()
            .map(|run| Value::Array(run.iter().map(|v| Value::from(*v)).collect()))
            .collect();
        Self(category, variant, runs)
    }

    pub fn key(&self) -> MotifKey {
        MotifKey::new(self.0, self.1)
    }

    /// Decode and validate every run in authored order.
    pub fn parse_runs(&self) -> Result<Vec<RectangleRun>> {
        let key = self.key();
        self.2
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                let run = decode_run(raw).map_err(|reason| MotifError::MalformedRun {
                    key,
                    index,
                    reason,
                })?;
                run.check_extent()
                    .map_err(|reason| MotifError::MalformedRun { key, index, reason })?;
                Ok(run)
            })
            .collect()
    }
}

fn decode_run(raw: &Value) -> std::result::Result<RectangleRun, String> {
    let fields = raw
        .as_array()
        .ok_or_else(|| format!("expected [x, y, width, height], got {raw}"))?;
    if fields.len() != 4 {
        return Err(format!("expected 4 fields, got {}", fields.len()));
    }
    let mut values = [0i64; 4];
    for (slot, field) in values.iter_mut().zip(fields) {
        *slot = field
            .as_i64()
            .ok_or_else(|| format!("field {field} is not an integer"))?;
    }
    Ok(RectangleRun::from(values))
}
