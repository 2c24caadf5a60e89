//! Email address type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input string is empty.
    #[error("email cannot be empty")]
    Empty,
    /// The input contains whitespace.
    #[error("email cannot contain whitespace")]
    Whitespace,
    /// The input does not contain exactly one @ symbol.
    #[error("email must contain exactly one @ symbol")]
    AtSymbol,
    /// The local part (before @) is empty.
    #[error("email local part cannot be empty")]
    EmptyLocalPart,
    /// The domain has no dot separating a name from a top-level label.
    #[error("email domain must contain a dot")]
    MissingDot,
    /// The top-level label is shorter than required.
    #[error("email top-level domain must be at least {min} characters")]
    ShortTopLevel {
        /// Minimum label length.
        min: usize,
    },
}

/// How strictly to check the top-level label of the domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailRule {
    /// `name@domain.x`: any non-empty top-level label.
    Standard,
    /// `name@domain.xx`: top-level label of at least two characters.
    Registration,
}

impl EmailRule {
    const fn min_top_level(self) -> usize {
        match self {
            Self::Standard => 1,
            Self::Registration => 2,
        }
    }
}

/// An email address.
///
/// ## Constraints
///
/// - No whitespace, exactly one @ symbol
/// - Local part (before @) must not be empty
/// - Domain must contain a dot with a non-empty name before it and a
///   top-level label after it (1+ chars, or 2+ under [`EmailRule::Registration`])
///
/// ## Examples
///
/// ```
/// use complaintdesk_core::{Email, EmailRule};
///
/// assert!(Email::parse("user@example.com").is_ok());
/// assert!(Email::parse("a@b.c").is_ok());
/// assert!(Email::parse_with("a@b.c", EmailRule::Registration).is_err());
/// assert!(Email::parse("bad-email").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Parse an `Email` using [`EmailRule::Standard`].
    ///
    /// # Errors
    ///
    /// Returns an error if the input does not look like `name@domain.tld`.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        Self::parse_with(s, EmailRule::Standard)
    }

    /// Parse an `Email` under the given rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty or contains whitespace
    /// - Does not contain exactly one @ symbol
    /// - Has an empty local part
    /// - Has no dot in the domain, or a top-level label that is too short
    pub fn parse_with(s: &str, rule: EmailRule) -> Result<Self, EmailError> {
        if s.is_empty() {
            return Err(EmailError::Empty);
        }

        if s.chars().any(char::is_whitespace) {
            return Err(EmailError::Whitespace);
        }

        let (local, domain) = s.split_once('@').ok_or(EmailError::AtSymbol)?;
        if domain.contains('@') {
            return Err(EmailError::AtSymbol);
        }

        if local.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }

        // The name before the dot must be non-empty, so search after the
        // first character.
        let first = domain.chars().next().map_or(0, char::len_utf8);
        let dot = domain
            .get(first..)
            .and_then(|rest| rest.find('.'))
            .map(|i| first + i)
            .ok_or(EmailError::MissingDot)?;
        let top_level = domain.get(dot + 1..).unwrap_or("");

        let min = rule.min_top_level();
        if top_level.chars().count() < min {
            return Err(EmailError::ShortTopLevel { min });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
