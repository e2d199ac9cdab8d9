//! Row-id newtypes for meta-model and event-log entities.
//!
//! Each ID wraps the SQLite `INTEGER PRIMARY KEY` of its table so that an
//! `AttributeId` cannot be passed where a `RelationshipTypeId` is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Create a new ID from a raw row id.
            pub fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Get the raw row id.
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// `class.id`: an object type.
    ClassId
);

define_id!(
    /// `attribute_name.id`: a declared attribute of a class.
    AttributeId
);

define_id!(
    /// `relationship.id`: a typed, directed relation between two classes.
    RelationshipTypeId
);

define_id!(
    /// `object_version.id`: one versioned snapshot of a business object.
    ObjectVersionId
);

define_id!(
    /// `activity.id`.
    ActivityId
);

define_id!(
    /// `activity_instance.id`.
    ActivityInstanceId
);

define_id!(
    /// `event.id`.
    EventId
);
