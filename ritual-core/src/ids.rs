//! Typed identifiers for backend documents.
//!
//! The backend mints ids server-side and the client treats them as opaque
//! strings. Distinct newtypes keep a habit id from being handed to an API
//! that wants a user id.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id! {
    /// Identifier of an account on the identity provider.
    UserId
}

string_id! {
    /// Identifier of a habit document.
    HabitId
}

string_id! {
    /// Identifier of a completion document.
    CompletionId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_serde_as_bare_strings() {
        let id = HabitId::new("habit-123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"habit-123\"");
        let back: HabitId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn display_matches_inner_string() {
        assert_eq!(UserId::new("u1").to_string(), "u1");
        assert_eq!(CompletionId::from("c9").as_str(), "c9");
    }
}
