use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-env-changed=MOTIF_CATALOG_HINT");
    println!("cargo:rerun-if-changed=data/caps.json");
    println!("cargo:rerun-if-changed=schema/motif_table.schema.json");

    let hint = env::var("MOTIF_CATALOG_HINT").ok();

    if let Some(raw_hint) = hint {
        let candidate = PathBuf::from(raw_hint);
        let canonical = candidate.canonicalize().unwrap_or(candidate);

        println!("cargo:rustc-env=MOTIF_CATALOG_HINT={}", canonical.display());
    }
}
