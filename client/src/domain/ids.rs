//! Server-issued resource identifiers.
//!
//! The API owns identifier formats, so these newtypes only reject blank or
//! padded values and keep the different resources from being mixed up.

use std::fmt;

/// Error returned when an identifier is blank or padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidIdError {
    kind: &'static str,
}

impl fmt::Display for InvalidIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} id must be a non-empty, unpadded string", self.kind)
    }
}

impl std::error::Error for InvalidIdError {}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and construct the identifier from borrowed input.
            pub fn new(id: impl AsRef<str>) -> Result<Self, InvalidIdError> {
                Self::try_from(id.as_ref().to_owned())
            }
        }

        impl TryFrom<String> for $name {
            type Error = InvalidIdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                if value.is_empty() || value.trim() != value {
                    return Err(InvalidIdError { kind: $kind });
                }
                Ok(Self(value))
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

define_id!(
    /// Identifier of a bar (venue).
    BarId,
    "bar"
);
define_id!(
    /// Identifier of a menu item within a bar.
    MenuItemId,
    "menu item"
);
define_id!(
    /// Identifier of a review.
    ReviewId,
    "review"
);
define_id!(
    /// Identifier of a bar event.
    EventId,
    "event"
);
