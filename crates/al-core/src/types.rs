//! Validated identifier types shared by journal entries.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// The value is not a `YYYY-MM-DD` calendar date.
    #[error("invalid date: {value}")]
    InvalidDate { value: String },

    /// The value is not a `YYYY-MM-DDTHH:MM:SS` timestamp.
    #[error("invalid timestamp: {value}")]
    InvalidTimestamp { value: String },

    /// The value is not a known action tag.
    #[error("unknown action: {value}")]
    UnknownAction { value: String },
}

/// Generates a validated, non-empty string newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new value after validation.
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(value))
            }

            /// Returns the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A venue label, e.g. "DHBW Mosbach".
    ///
    /// Locations carry no substructure; two locations are the same venue iff
    /// their labels are equal.
    Location, "location"
);

define_string_id!(
    /// An opaque token minted by the check-in frontend for a single visit.
    ///
    /// The Login and the matching Logout of one visit carry the same token.
    SessionToken, "session token"
);
