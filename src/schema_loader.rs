//! JSON Schema gate for motif tables.
//!
//! The bundled schema (`schema/motif_table.schema.json`) checks the record
//! shape: three-element arrays with non-negative integer keys and a runs
//! array. Run contents are left to the catalog loader so bad runs are
//! reported as `MalformedRun` with their motif key.

use crate::error::{MotifError, Result};
use jsonschema::JSONSchema;
use serde_json::Value;

/// Version marker carried by the schema under `x-table-version`.
pub const TABLE_SCHEMA_VERSION: &str = "motif_table_v1";

const BUNDLED_SCHEMA: &str = include_str!("../schema/motif_table.schema.json");
const VERSION_POINTER: &str = "/x-table-version";

/// Compiled table schema plus its declared version.
pub struct TableSchema {
    version: String,
    compiled: JSONSchema,
}

impl TableSchema {
    /// Compile the schema shipped with the crate.
    pub fn bundled() -> Result<Self> {
        let raw: Value = serde_json::from_str(BUNDLED_SCHEMA)?;
        Self::compile(raw)
    }

    fn compile(raw: Value) -> Result<Self> {
        let version = extract_schema_version(&raw, VERSION_POINTER)
            .ok_or_else(|| MotifError::Schema("schema missing x-table-version".to_string()))?;
        if version != TABLE_SCHEMA_VERSION {
            return Err(MotifError::Schema(format!(
                "schema version '{}', expected {}",
                version, TABLE_SCHEMA_VERSION
            )));
        }

        let compiled = JSONSchema::compile(&raw)
            .map_err(|err| MotifError::Schema(format!("compiling table schema: {err}")))?;
        Ok(Self { version, compiled })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Validate a parsed table, joining every violation into one error.
    pub fn validate(&self, table: &Value) -> Result<()> {
        if let Err(errors) = self.compiled.validate(table) {
            let details = errors
                .map(|err| format!("{} at {}", err, err.instance_path))
                .collect::<Vec<_>>()
                .join("\n");
            return Err(MotifError::Schema(details));
        }
        Ok(())
    }
}

fn extract_schema_version(schema: &Value, pointer: &str) -> Option<String> {
    let version = schema.pointer(pointer).and_then(Value::as_str)?;
    if version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        Some(version.to_string())
    } else {
        None
    }
}
