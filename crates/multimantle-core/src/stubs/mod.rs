//! Stub implementations for testing.
//!
//! Compiled only under `cfg(test)` or with the `test-utils` feature, so
//! production builds cannot reach them.
//!
//! - [`InMemoryVectorStore`]: HashMap-backed [`VectorStore`](crate::traits::VectorStore)
//!   with call counting and outage simulation
//!
//! ```ignore
//! // [dev-dependencies]
//! // multimantle-core = { workspace = true, features = ["test-utils"] }
//! use multimantle_core::stubs::InMemoryVectorStore;
//! ```

#[cfg(any(test, feature = "test-utils"))]
mod in_memory_store;

#[cfg(any(test, feature = "test-utils"))]
pub use in_memory_store::{axis_vector, blend_vector, InMemoryVectorStore};
