//! `VectorStore` trait tests over a real RocksDB.

use multimantle_core::{CoreError, SimilarityRange, VectorStore, VECTOR_DIM};
use tempfile::TempDir;

use super::core::RocksDbVectorStore;
use crate::serialization::NeighborEntry;

fn seeded_store() -> (TempDir, RocksDbVectorStore) {
    let tmp = TempDir::new().expect("create temp dir");
    let db = RocksDbVectorStore::open(tmp.path()).expect("open db");

    let mut ocean = vec![0.0_f32; VECTOR_DIM];
    ocean[0] = 1.0;
    let mut wave = vec![0.0_f32; VECTOR_DIM];
    wave[0] = 0.5;
    wave[1] = 0.5;
    db.put_word_vector("ocean", &ocean).unwrap();
    db.put_packed_word_vector("wave", &wave).unwrap();

    let rows = [
        ("ocean", 1000, 100.0),
        ("sea", 999, 68.4),
        ("wave", 42, 30.0),
        ("tide", 999, 60.0),
        ("beach", 500, 45.0),
    ];
    for (neighbor, percentile, similarity) in rows {
        db.put_neighbor(
            "ocean",
            neighbor,
            &NeighborEntry {
                percentile,
                similarity,
            },
        )
        .unwrap();
    }
    (tmp, db)
}

#[tokio::test]
async fn test_fetch_vector_and_missing_word() {
    let (_tmp, db) = seeded_store();

    let vector = db.fetch_vector("ocean").await.unwrap();
    assert_eq!(vector.len(), VECTOR_DIM);
    assert_eq!(vector[0], 1.0);

    let err = db.fetch_vector("zzyzx").await.unwrap_err();
    assert!(matches!(err, CoreError::WordNotFound { ref word } if word == "zzyzx"));
}

#[tokio::test]
async fn test_fetch_guess_percentile() {
    let (_tmp, db) = seeded_store();

    let lookup = db.fetch_guess("ocean", "wave").await.unwrap();
    assert_eq!(lookup.percentile, Some(42));
    assert_eq!(lookup.vector[1], 0.5);

    // A word with a vector but no neighbor row is cold.
    let lookup = db.fetch_guess("wave", "ocean").await.unwrap();
    assert_eq!(lookup.percentile, None);

    assert!(matches!(
        db.fetch_guess("ocean", "zzyzx").await,
        Err(CoreError::WordNotFound { .. })
    ));
}

#[tokio::test]
async fn test_fetch_nearby_drops_self_and_sorts() {
    let (_tmp, db) = seeded_store();

    let nearby = db.fetch_nearby("ocean", 3).await.unwrap();
    let words: Vec<&str> = nearby.iter().map(|n| n.word.as_str()).collect();
    assert_eq!(words, vec!["sea", "tide", "beach"]);
    assert_eq!(nearby[0].percentile, 999);
    assert_eq!(nearby[0].similarity, 68.4);

    let all = db.fetch_nearby("ocean", 100).await.unwrap();
    assert_eq!(all.len(), 4);
    assert!(all.iter().all(|n| n.word != "ocean"));

    assert!(db.fetch_nearby("ocean", 0).await.unwrap().is_empty());
    assert!(db.fetch_nearby("forest", 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_fetch_similarity_range() {
    let (_tmp, db) = seeded_store();
    assert_eq!(db.fetch_similarity_range("ocean").await.unwrap(), None);

    let range = SimilarityRange {
        top: 68.4,
        top10: 50.0,
        rest: 21.25,
    };
    db.put_similarity_range("ocean", &range).unwrap();
    assert_eq!(db.fetch_similarity_range("ocean").await.unwrap(), Some(range));
}
