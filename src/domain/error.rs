//! Domain validation errors for core domain types.
//!
//! Returned by the `parse` constructors when request input violates a
//! domain invariant, before any external service is contacted.
//!
//! # Examples
//!
//! ```
//! use studybot::domain::error::DomainError;
//! use studybot::domain::Prompt;
//!
//! let result = Prompt::parse("   ");
//! assert!(matches!(result, Err(DomainError::EmptyPrompt)));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The prompt was absent or contained only whitespace.
    #[error("`prompt` required")]
    EmptyPrompt,
}
