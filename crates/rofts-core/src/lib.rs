//! rofts core: shared errors and identifier utilities.
//!
//! This crate has no internal rofts dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error taxonomy and Result alias
//! - [`ids`]: Document identifier computation

pub mod error;
pub mod ids;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use ids::document_id;
