//! Byte encodings for the stored records.
//!
//! | Record | Format |
//! |--------|--------|
//! | Word vector | Raw LE `f32` (1200 B) or packed bfloat16 (600 B) |
//! | Neighbor key | `secret 0x00 neighbor` |
//! | Neighbor entry | JSON |
//! | Similarity range | JSON |

mod error;
mod neighbor;
mod vector;

pub use error::SerializationError;
pub use neighbor::{
    deserialize_neighbor_entry, deserialize_similarity_range, neighbor_key, neighbor_prefix,
    parse_neighbor_key, serialize_neighbor_entry, serialize_similarity_range, NeighborEntry,
};
pub use vector::{
    deserialize_word_vector, pack_word_vector, serialize_word_vector, FULL_VECTOR_LEN,
    PACKED_VECTOR_LEN,
};
