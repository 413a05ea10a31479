//! `harvest-core` -- shared error type, identifiers, and input validation.
//!
//! Kept free of internal dependencies so the job crate and any front end
//! can share one error vocabulary.

pub mod error;
pub mod types;
pub mod validation;

pub use error::CoreError;
