//! Prelude module for age_range crate.
//!
//! Re-exports the derive macros shared by the value types.

#[allow(unused_imports)]
pub use derive_more::Display;
