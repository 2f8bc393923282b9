//! CLI command handlers
//!
//! - `play`: Interactive stdin game session
//! - `import`: TSV bulk loaders

pub mod import;
pub mod play;
