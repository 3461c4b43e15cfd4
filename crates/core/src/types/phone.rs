//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input contains characters other than digits and separators.
    #[error("phone number contains invalid characters")]
    InvalidCharacters,
    /// The digit count is outside the accepted range.
    #[error("phone number must have between {min} and {max} digits")]
    BadLength {
        /// Minimum number of digits.
        min: usize,
        /// Maximum number of digits.
        max: usize,
    },
}

/// A phone number.
///
/// Accepts the loose formats people type into lead forms
/// (`+90 212 555 00 00`, `(0212) 555-0000`, `02125550000`) and normalizes
/// to the raw digit string, keeping a leading `+` when present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Minimum number of digits in a phone number.
    pub const MIN_DIGITS: usize = 7;
    /// Maximum number of digits (ITU-T E.164).
    pub const MAX_DIGITS: usize = 15;

    /// Parse a `Phone` from a string.
    ///
    /// Spaces, parentheses, dots and dashes are stripped; a single leading
    /// `+` is preserved.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, contains characters other
    /// than digits and the accepted separators, or the digit count is not
    /// between 7 and 15.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let s = s.trim();

        if s.is_empty() {
            return Err(PhoneError::Empty);
        }

        let (plus, rest) = match s.strip_prefix('+') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let mut digits = String::with_capacity(rest.len());
        for c in rest.chars() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '(' | ')' | '-' | '.' => {}
                _ => return Err(PhoneError::InvalidCharacters),
            }
        }

        if digits.len() < Self::MIN_DIGITS || digits.len() > Self::MAX_DIGITS {
            return Err(PhoneError::BadLength {
                min: Self::MIN_DIGITS,
                max: Self::MAX_DIGITS,
            });
        }

        let normalized = if plus {
            format!("+{digits}")
        } else {
            digits
        };

        Ok(Self(normalized))
    }

    /// Returns the normalized phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Phone` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
