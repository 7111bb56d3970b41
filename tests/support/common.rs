#![allow(dead_code)]

use anyhow::{Context, Result};
use motif_catalog::Catalog;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

pub fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

pub fn bundled_table_path() -> PathBuf {
    repo_root().join("data/caps.json")
}

pub fn bundled_catalog() -> Catalog {
    Catalog::bundled().expect("bundled table should load")
}

// Writes `contents` to a temp file that lives as long as the returned handle.
pub fn table_file(contents: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new().context("allocating temp table")?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}

pub fn motif_catalog_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_motif-catalog"));
    cmd.env_remove("MOTIF_CATALOG_PATH").arg("--no-color");
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to spawn {:?}", cmd.get_program()))?;
    if !output.status.success() {
        anyhow::bail!(
            "command {:?} failed: {}\nstderr: {}",
            cmd.get_program(),
            output.status,
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(output)
}
