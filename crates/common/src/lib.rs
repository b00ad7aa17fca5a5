//! erpweb Common Library
//!
//! Shared building blocks for the E2E harness: masterdata record types,
//! the JSON fixture store, and per-run name stamping.

pub mod error;
pub mod fixture;
pub mod naming;
pub mod types;

// Re-export commonly used types
pub use error::{Error, Result};
pub use fixture::FixtureStore;
pub use naming::RunStamp;
pub use types::{BillOfMaterial, CategoryRef, Product, ProductCategory};

/// erpweb-common version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
