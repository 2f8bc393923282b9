//! Word embedding vector type.

use crate::error::{CoreError, CoreResult};

/// Number of components in every word vector.
pub const VECTOR_DIM: usize = 300;

/// A word's embedding: exactly [`VECTOR_DIM`] components once reconstructed.
pub type WordVector = Vec<f32>;

/// Check that a vector has exactly [`VECTOR_DIM`] components.
///
/// Stores call this before handing a vector to the engine, so the
/// similarity math never sees mismatched lengths.
pub fn validate_dimension(vector: &[f32]) -> CoreResult<()> {
    if vector.len() != VECTOR_DIM {
        return Err(CoreError::InvalidVector {
            expected: VECTOR_DIM,
            actual: vector.len(),
        });
    }
    Ok(())
}
