// src/extractors/mod.rs
pub mod form4;

// Re-export key extraction types for convenience
pub use form4::{ParsedFiling, TransactionRecord};
