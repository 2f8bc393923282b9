//! Word, neighbor and range operation tests.
//!
//! Tests run against a real RocksDB in a temp directory.

use multimantle_core::{SimilarityRange, VECTOR_DIM};
use tempfile::TempDir;

use super::core::RocksDbVectorStore;
use super::error::StorageError;
use crate::column_families::cf_names;
use crate::serialization::NeighborEntry;

fn create_temp_db() -> (TempDir, RocksDbVectorStore) {
    let tmp = TempDir::new().expect("create temp dir");
    let db = RocksDbVectorStore::open(tmp.path()).expect("open db");
    (tmp, db)
}

fn ramp_vector(offset: f32) -> Vec<f32> {
    (0..VECTOR_DIM)
        .map(|i| (i as f32 / VECTOR_DIM as f32) * std::f32::consts::PI + offset)
        .collect()
}

fn entry(percentile: u32, similarity: f64) -> NeighborEntry {
    NeighborEntry {
        percentile,
        similarity,
    }
}

#[test]
fn test_full_vector_round_trip() {
    let (_tmp, db) = create_temp_db();
    let vector = ramp_vector(0.0);

    db.put_word_vector("ocean", &vector).unwrap();

    assert_eq!(db.get_word_vector("ocean").unwrap(), vector);
    let raw = db
        .db
        .get_cf(db.get_cf(cf_names::WORD_VECTORS).unwrap(), b"ocean")
        .unwrap()
        .unwrap();
    assert_eq!(raw.len(), VECTOR_DIM * 4);
}

#[test]
fn test_packed_vector_is_truncated() {
    let (_tmp, db) = create_temp_db();
    let vector = ramp_vector(0.1);

    db.put_packed_word_vector("wave", &vector).unwrap();

    let restored = db.get_word_vector("wave").unwrap();
    assert_eq!(restored.len(), VECTOR_DIM);
    for (original, restored) in vector.iter().zip(&restored) {
        assert_eq!(restored.to_bits(), original.to_bits() & 0xFFFF_0000);
    }
}

#[test]
fn test_missing_word_is_word_not_found() {
    let (_tmp, db) = create_temp_db();
    let err = db.get_word_vector("zzyzx").unwrap_err();
    assert!(matches!(err, StorageError::WordNotFound { ref word } if word == "zzyzx"));
    assert!(!db.contains_word("zzyzx").unwrap());
}

#[test]
fn test_corrupt_vector_payload() {
    let (_tmp, db) = create_temp_db();
    let cf = db.get_cf(cf_names::WORD_VECTORS).unwrap();
    db.db.put_cf(cf, b"broken", [0u8; 13]).unwrap();

    let err = db.get_word_vector("broken").unwrap_err();
    assert!(matches!(err, StorageError::Serialization(_)));
}

#[test]
fn test_wrong_dimension_is_not_written() {
    let (_tmp, db) = create_temp_db();
    assert!(db.put_word_vector("short", &[1.0; 3]).is_err());
    assert!(!db.contains_word("short").unwrap());
}

#[test]
fn test_neighbor_rows_scoped_to_secret() {
    let (_tmp, db) = create_temp_db();
    db.put_neighbor("sea", "ocean", &entry(999, 70.0)).unwrap();
    db.put_neighbor("sea", "wave", &entry(990, 60.0)).unwrap();
    db.put_neighbor("seal", "fur", &entry(999, 50.0)).unwrap();
    db.put_neighbor("se", "x", &entry(1, 1.0)).unwrap();

    let rows = db.neighbors_of("sea").unwrap();
    let words: Vec<&str> = rows.iter().map(|(w, _)| w.as_str()).collect();
    assert_eq!(words, vec!["ocean", "wave"]);

    assert_eq!(db.get_neighbor("sea", "wave").unwrap(), Some(entry(990, 60.0)));
    assert_eq!(db.get_neighbor("sea", "fur").unwrap(), None);
    assert!(db.neighbors_of("lake").unwrap().is_empty());
}

#[test]
fn test_similarity_range_present_and_absent() {
    let (_tmp, db) = create_temp_db();
    let range = SimilarityRange {
        top: 68.4,
        top10: 50.0,
        rest: 21.25,
    };
    db.put_similarity_range("ocean", &range).unwrap();

    assert_eq!(db.get_similarity_range("ocean").unwrap(), Some(range));
    assert_eq!(db.get_similarity_range("forest").unwrap(), None);
}

#[test]
fn test_import_batches() {
    let (_tmp, db) = create_temp_db();

    let written = db
        .import_word_vectors(
            vec![("ocean", ramp_vector(0.0)), ("wave", ramp_vector(1.0))],
            false,
        )
        .unwrap();
    assert_eq!(written, 2);
    assert_eq!(db.word_count().unwrap(), 2);

    let written = db
        .import_neighbors(vec![
            ("ocean", "wave", entry(999, 81.0)),
            ("ocean", "sea", entry(998, 80.0)),
        ])
        .unwrap();
    assert_eq!(written, 2);
    assert_eq!(db.neighbors_of("ocean").unwrap().len(), 2);

    let range = SimilarityRange {
        top: 81.0,
        top10: 60.0,
        rest: 20.0,
    };
    assert_eq!(db.import_similarity_ranges(vec![("ocean", range)]).unwrap(), 1);
}

#[test]
fn test_import_with_bad_row_writes_nothing() {
    let (_tmp, db) = create_temp_db();
    let result = db.import_word_vectors(
        vec![("ocean", ramp_vector(0.0)), ("bad", vec![1.0; 7])],
        true,
    );
    assert!(result.is_err());
    assert_eq!(db.word_count().unwrap(), 0);
}

#[test]
fn test_persists_across_reopen() {
    let tmp = TempDir::new().unwrap();
    let vector = ramp_vector(0.5);
    {
        let db = RocksDbVectorStore::open(tmp.path()).unwrap();
        db.put_word_vector("ocean", &vector).unwrap();
        db.flush_all().unwrap();
    }
    let db = RocksDbVectorStore::open(tmp.path()).unwrap();
    assert_eq!(db.get_word_vector("ocean").unwrap(), vector);
}
