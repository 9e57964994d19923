//! Prelude module for calendar_date crate.
//!
//! Re-exports the derive macros used across the crate from derive_more.

#[allow(unused_imports)]
pub use derive_more::Display;
