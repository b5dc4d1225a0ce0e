use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Defines a newtype wrapper around a `String` identifier supplied by the
/// Backend. Keeping these distinct prevents accidentally comparing, say, a
/// `WorkspaceId` to a `WorktreeId` even though both are backed by strings.
macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(WorkspaceId);
string_id!(WorkspaceGroupId);
string_id!(WorktreeId);
string_id!(SessionId);
string_id!(RequestId);
string_id!(NoteId);

/// The reserved workspace id for the virtual bucket of groupless items.
pub const UNASSIGNED_WORKSPACE: &str = "unassigned";

/// The reserved pseudo-group id meaning "items with no explicit group".
pub const UNGROUPED_GROUP: &str = "ungrouped";

impl WorkspaceId {
    pub fn is_unassigned(&self) -> bool {
        self.0 == UNASSIGNED_WORKSPACE
    }

    pub fn unassigned() -> Self {
        Self(UNASSIGNED_WORKSPACE.to_string())
    }
}
