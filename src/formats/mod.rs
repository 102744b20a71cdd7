//! Translation file formats understood by po-catalog.

pub mod po;

// Reexporting the formats for easier access
pub use po::{Format as PoFormat, Record as PoRecord};
