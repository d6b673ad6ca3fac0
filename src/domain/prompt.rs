//! User prompt and bearer credential extracted from an inbound request.

use std::fmt;

use super::error::DomainError;

/// A validated, trimmed, non-empty prompt.
///
/// The inner String is private so every prompt goes through [`Prompt::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    /// Trim surrounding whitespace and reject empty input.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyPrompt`] if nothing is left after trimming.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyPrompt);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw bearer credential taken from an `Authorization` header value.
///
/// The `Bearer ` prefix is stripped only when it matches exactly; any other
/// scheme is left in place and will fail verification.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    const PREFIX: &'static str = "Bearer ";

    /// Extract the token from an optional header value.
    ///
    /// A missing header yields an empty token.
    #[must_use]
    pub fn from_header(value: Option<&str>) -> Self {
        let raw = value.unwrap_or_default();
        let token = raw.strip_prefix(Self::PREFIX).unwrap_or(raw).trim();
        Self(token.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Credentials stay out of logs and panic messages.
impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BearerToken")
            .field(&if self.0.is_empty() { "<empty>" } else { "<redacted>" })
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_is_trimmed() {
        let prompt = Prompt::parse("  Explain photosynthesis \n").unwrap();
        assert_eq!(prompt.as_str(), "Explain photosynthesis");
    }

    #[test]
    fn empty_prompt_is_rejected() {
        assert_eq!(Prompt::parse(""), Err(DomainError::EmptyPrompt));
    }

    #[test]
    fn whitespace_prompt_is_rejected() {
        assert_eq!(Prompt::parse(" \t\n "), Err(DomainError::EmptyPrompt));
    }

    #[test]
    fn bearer_prefix_is_stripped() {
        let token = BearerToken::from_header(Some("Bearer abc.def.ghi"));
        assert_eq!(token.as_str(), "abc.def.ghi");
    }

    #[test]
    fn surrounding_whitespace_is_stripped() {
        let token = BearerToken::from_header(Some("Bearer   abc  "));
        assert_eq!(token.as_str(), "abc");
    }

    #[test]
    fn missing_header_gives_empty_token() {
        assert!(BearerToken::from_header(None).is_empty());
    }

    #[test]
    fn bare_prefix_gives_empty_token() {
        assert!(BearerToken::from_header(Some("Bearer ")).is_empty());
    }

    #[test]
    fn other_schemes_are_kept_verbatim() {
        let token = BearerToken::from_header(Some("Basic dXNlcjpwYXNz"));
        assert_eq!(token.as_str(), "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn prefix_match_is_case_sensitive() {
        let token = BearerToken::from_header(Some("bearer abc"));
        assert_eq!(token.as_str(), "bearer abc");
    }

    #[test]
    fn debug_output_redacts_token() {
        let token = BearerToken::from_header(Some("Bearer secret-value"));
        let rendered = format!("{token:?}");
        assert!(!rendered.contains("secret-value"));
    }
}
