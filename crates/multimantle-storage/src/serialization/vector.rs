//! Word vector encoding.
//!
//! Two payload layouts share the `word_vectors` column family:
//!
//! | Layout | Size | Encoding |
//! |--------|------|----------|
//! | full | 1200 bytes | 300 little-endian `f32` |
//! | packed | 600 bytes | 300 little-endian bfloat16 (upper half of each `f32`) |
//!
//! Packing truncates the low 16 mantissa bits; expansion puts zeros back.

use half::bf16;
use multimantle_core::{WordVector, VECTOR_DIM};

use super::error::SerializationError;

/// Size of a packed (bfloat16) vector payload.
pub const PACKED_VECTOR_LEN: usize = VECTOR_DIM * 2;

/// Size of a full `f32` vector payload.
pub const FULL_VECTOR_LEN: usize = VECTOR_DIM * 4;

fn check_dimension(vector: &[f32]) -> Result<(), SerializationError> {
    if vector.len() != VECTOR_DIM {
        return Err(SerializationError::InvalidDimension {
            expected: VECTOR_DIM,
            actual: vector.len(),
        });
    }
    Ok(())
}

/// Encode a vector as 1200 bytes of little-endian `f32`.
pub fn serialize_word_vector(vector: &[f32]) -> Result<Vec<u8>, SerializationError> {
    check_dimension(vector)?;
    let mut bytes = Vec::with_capacity(FULL_VECTOR_LEN);
    for &value in vector {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    Ok(bytes)
}

/// Encode a vector as 600 bytes of truncated bfloat16.
///
/// ```rust
/// use multimantle_storage::{deserialize_word_vector, pack_word_vector};
///
/// let vector = vec![1.5_f32; 300];
/// let packed = pack_word_vector(&vector).unwrap();
/// assert_eq!(packed.len(), 600);
/// // 1.5 has no low mantissa bits, so it survives packing exactly.
/// assert_eq!(deserialize_word_vector(&packed).unwrap(), vector);
/// ```
pub fn pack_word_vector(vector: &[f32]) -> Result<Vec<u8>, SerializationError> {
    check_dimension(vector)?;
    let mut bytes = Vec::with_capacity(PACKED_VECTOR_LEN);
    for &value in vector {
        let upper = bf16::from_bits((value.to_bits() >> 16) as u16);
        bytes.extend_from_slice(&upper.to_le_bytes());
    }
    Ok(bytes)
}

/// Decode a stored payload, expanding packed vectors to `f32`.
///
/// # Errors
/// `InvalidVectorSize` for any length other than 600 or 1200 bytes.
pub fn deserialize_word_vector(bytes: &[u8]) -> Result<WordVector, SerializationError> {
    match bytes.len() {
        PACKED_VECTOR_LEN => Ok(bytes
            .chunks_exact(2)
            .map(|pair| bf16::from_le_bytes([pair[0], pair[1]]).to_f32())
            .collect()),
        FULL_VECTOR_LEN => Ok(bytes
            .chunks_exact(4)
            .map(|quad| f32::from_le_bytes([quad[0], quad[1], quad[2], quad[3]]))
            .collect()),
        actual => Err(SerializationError::InvalidVectorSize { actual }),
    }
}
