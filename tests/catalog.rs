// Catalog construction and lookup guard rails against the authored table.
#[path = "support/common.rs"]
mod common;

use anyhow::Result;
use motif_catalog::{Catalog, MotifError, MotifKey, RawRecord, RectangleRun, parse_record_stream};
use serde_json::json;
use common::{bundled_catalog, bundled_table_path, table_file};

#[test]
fn get_returns_requested_key_for_every_record() -> Result<()> {
    let records = parse_record_stream(motif_catalog::BUNDLED_TABLE)?;
    let catalog = Catalog::load(records.clone())?;
    assert_eq!(catalog.len(), records.len());
    for record in &records {
        let motif = catalog.get(record.0, record.1)?;
        assert_eq!(motif.key(), record.key());
        assert_eq!(motif.runs(), record.parse_runs()?.as_slice());
    }
    Ok(())
}

#[test]
fn loading_same_records_twice_is_stable() -> Result<()> {
    let records = parse_record_stream(motif_catalog::BUNDLED_TABLE)?;
    let first = Catalog::load(records.clone())?;
    let second = Catalog::load(records)?;
    assert_eq!(first.list_categories(), second.list_categories());
    for category in first.list_categories() {
        assert_eq!(first.list_variants(category), second.list_variants(category));
    }
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn single_record_scenario() -> Result<()> {
    let catalog = Catalog::from_json_str("[[0,0,[[11,14,3,1]]]]")?;
    let motif = catalog.get(0, 0)?;
    assert_eq!(motif.runs(), &[RectangleRun::new(11, 14, 3, 1)]);
    Ok(())
}

#[test]
fn unknown_key_is_not_found() {
    let catalog = bundled_catalog();
    let err = catalog.get(9, 9).unwrap_err();
    assert!(matches!(
        err,
        MotifError::NotFound { key } if key == MotifKey::new(9, 9)
    ));
    assert!(!catalog.contains(9, 9));
}

#[test]
fn bundled_categories_and_variants() {
    let catalog = bundled_catalog();
    assert_eq!(
        catalog.list_categories().into_iter().collect::<Vec<_>>(),
        vec![0, 1, 2, 3, 4]
    );
    assert_eq!(catalog.list_variants(0), vec![0, 1, 2, 3, 4]);
    assert_eq!(catalog.list_variants(1), vec![0, 1, 2, 3, 4, 5, 6]);
    assert_eq!(catalog.list_variants(4), (0..10).collect::<Vec<_>>());
    assert!(catalog.list_variants(5).is_empty());
}

#[test]
fn bundled_runs_keep_authored_order() -> Result<()> {
    let catalog = bundled_catalog();
    let motif = catalog.get(0, 2)?;
    assert_eq!(
        motif.runs(),
        &[RectangleRun::new(12, 12, 1, 2), RectangleRun::new(11, 14, 3, 1)]
    );
    Ok(())
}

#[test]
fn duplicate_key_fails_whole_load() {
    let input = json!([
        [0, 0, [[11, 14, 3, 1]]],
        [0, 1, [[12, 13, 1, 1]]],
        [0, 0, [[10, 14, 5, 1]]]
    ])
    .to_string();
    let result = Catalog::from_json_str(&input);
    assert!(matches!(
        result,
        Err(MotifError::DuplicateKey { key }) if key == MotifKey::new(0, 0)
    ));
}

#[test]
fn malformed_runs_fail_load() {
    for bad_run in [json!([1, 2, 0, 1]), json!([1, 2, 3, -1]), json!([1, 2, 3, 1, 5]), json!([1, 2.5, 3, 1])] {
        let input = json!([[3, 4, [[0, 0, 1, 1], bad_run]]]).to_string();
        let err = Catalog::from_json_str(&input).unwrap_err();
        assert!(
            matches!(err, MotifError::MalformedRun { index: 1, .. }),
            "expected malformed run for {input}, got {err:?}"
        );
    }
}

#[test]
fn non_array_run_is_malformed_not_schema_error() {
    let err = Catalog::from_json_str("[[0,0,[5]]]").unwrap_err();
    assert!(
        matches!(err, MotifError::MalformedRun { index: 0, .. }),
        "expected malformed run, got {err:?}"
    );
    let err = Catalog::from_json_str("[2,3,[[0,0,1,1],{\"x\":1}]]").unwrap_err();
    assert!(matches!(err, MotifError::MalformedRun { index: 1, .. }));
}

#[test]
fn load_accepts_programmatic_records() -> Result<()> {
    let catalog = Catalog::load(vec![
        RawRecord::from_runs(2, 7, &[[-3, -3, 2, 1]]),
        RawRecord::from_runs(2, 1, &[[0, 0, 1, 1]]),
    ])?;
    assert_eq!(catalog.list_variants(2), vec![1, 7]);
    assert_eq!(catalog.get(2, 7)?.runs()[0].x, -3);
    Ok(())
}

#[test]
fn from_path_reads_bundled_file() -> Result<()> {
    let catalog = Catalog::from_path(&bundled_table_path())?;
    assert_eq!(catalog, bundled_catalog());
    Ok(())
}

#[test]
fn from_path_reads_newline_delimited_file() -> Result<()> {
    let file = table_file("[1,0,[[11,11,1,1],[12,11,1,1]]]\n[1,1,[[10,11,5,1]]]\n")?;
    let catalog = Catalog::from_path(file.path())?;
    assert_eq!(catalog.list_variants(1), vec![0, 1]);
    Ok(())
}

#[test]
fn missing_file_is_io_error() {
    let err = Catalog::from_path(std::path::Path::new("/nonexistent/caps.json")).unwrap_err();
    assert!(matches!(err, MotifError::Io(_)));
}

#[test]
fn catalog_is_shareable_across_threads() -> Result<()> {
    let catalog = std::sync::Arc::new(bundled_catalog());
    let handles: Vec<_> = (0..4u32)
        .map(|category| {
            let catalog = std::sync::Arc::clone(&catalog);
            std::thread::spawn(move || catalog.list_variants(category).len())
        })
        .collect();
    let counts: Vec<usize> = handles
        .into_iter()
        .map(|handle| handle.join().expect("reader thread panicked"))
        .collect();
    assert_eq!(counts, vec![5, 7, 10, 10]);
    Ok(())
}
