//! Core trait definitions.
//!
//! - [`VectorStore`]: read access to word vectors and neighbor tables

mod vector_store;

pub use vector_store::VectorStore;
