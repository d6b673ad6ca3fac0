//! Incremental units of generated text.

use std::fmt;
use std::pin::Pin;

use futures_util::Stream;

use crate::error::Result;

/// A non-empty piece of generated text.
///
/// Empty content cannot be represented, so it can never reach the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment(String);

impl Fragment {
    /// Wrap generated text, returning `None` for empty content.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.is_empty() {
            None
        } else {
            Some(Self(text))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lazy, finite, forward-only sequence of fragments.
///
/// Items arrive in the order the generation service emits them. An `Err`
/// item ends the sequence. Dropping the stream abandons the upstream call.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<Fragment>> + Send>>;
