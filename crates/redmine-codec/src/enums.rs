//! Enumerations carried on the wire as an ordinal or a lowercase name.
//!
//! Decoding accepts either form (`"7"`, `7` and `"follows"` are the same
//! member); encoding always emits the name.

use redmine_wire::Scalar;

use crate::scalar::{FromWire, ToWire};

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident : $expected:literal {
            $($variant:ident = $code:literal => $wire:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub fn code(self) -> i64 {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            pub fn from_code(code: i64) -> Option<Self> {
                match code {
                    $($code => Some($name::$variant),)+
                    _ => None,
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                $(
                    if name.eq_ignore_ascii_case($wire) {
                        return Some($name::$variant);
                    }
                )+
                None
            }
        }

        impl FromWire for $name {
            const EXPECTED: &'static str = $expected;

            fn from_text(text: &str) -> Option<Self> {
                match text.parse::<i64>() {
                    Ok(code) => Self::from_code(code),
                    Err(_) => Self::from_name(text),
                }
            }
        }

        impl ToWire for $name {
            fn to_wire(&self) -> Scalar {
                Scalar::Text(self.name().to_owned())
            }
        }
    };
}

wire_enum! {
    /// Kind of link between two issues.
    pub enum IssueRelationType: "relation type" {
        Undefined = 0 => "undefined",
        Relates = 1 => "relates",
        Duplicates = 2 => "duplicates",
        Duplicated = 3 => "duplicated",
        Blocks = 4 => "blocks",
        Blocked = 5 => "blocked",
        Precedes = 6 => "precedes",
        Follows = 7 => "follows",
        CopiedTo = 8 => "copied_to",
        CopiedFrom = 9 => "copied_from",
    }
}

impl IssueRelationType {
    /// Only scheduling relations carry a delay.
    pub fn has_delay(self) -> bool {
        matches!(self, IssueRelationType::Precedes | IssueRelationType::Follows)
    }
}

impl Default for IssueRelationType {
    fn default() -> Self {
        IssueRelationType::Undefined
    }
}

wire_enum! {
    pub enum ProjectStatus: "project status" {
        Active = 1 => "active",
        Closed = 5 => "closed",
        Archived = 9 => "archived",
    }
}

wire_enum! {
    pub enum UserStatus: "user status" {
        Anonymous = 0 => "anonymous",
        Active = 1 => "active",
        Registered = 2 => "registered",
        Locked = 3 => "locked",
    }
}

wire_enum! {
    pub enum VersionStatus: "version status" {
        Open = 0 => "open",
        Locked = 1 => "locked",
        Closed = 2 => "closed",
    }
}

wire_enum! {
    /// Which projects may assign issues to a version.
    pub enum VersionSharing: "version sharing" {
        None = 0 => "none",
        Descendants = 1 => "descendants",
        Hierarchy = 2 => "hierarchy",
        Tree = 3 => "tree",
        System = 4 => "system",
    }
}
