//! The item type enum and its rank ordering.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The three fixed hierarchy ranks of an item, top to bottom.
///
/// The discriminant doubles as the rank: a parent must sit exactly one rank
/// above its child (epics have no parent, stories hang off epics, tasks off
/// stories). This is a closed enum on purpose -- an unrecognized type string
/// is a structural failure for the node carrying it, never a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ItemType {
    Epic = 0,
    Story = 1,
    Task = 2,
}

/// Error returned when parsing an unrecognized item type string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown item type: {0:?}")]
pub struct UnknownItemType(pub String);

impl ItemType {
    /// All variants in rank order.
    pub const ALL: [Self; 3] = [Self::Epic, Self::Story, Self::Task];

    /// Returns the canonical lowercase string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Epic => "epic",
            Self::Story => "story",
            Self::Task => "task",
        }
    }

    /// Display label for human-facing output.
    pub fn label(self) -> &'static str {
        match self {
            Self::Epic => "Epic",
            Self::Story => "Story",
            Self::Task => "Task",
        }
    }

    /// Hierarchy rank: epic 0, story 1, task 2.
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// The type a parent of this item must have, or `None` for epics.
    pub fn parent_type(self) -> Option<Self> {
        match self {
            Self::Epic => None,
            Self::Story => Some(Self::Epic),
            Self::Task => Some(Self::Story),
        }
    }

    /// Case-insensitive parse; `None` for anything outside the closed set.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "epic" => Some(Self::Epic),
            "story" => Some(Self::Story),
            "task" => Some(Self::Task),
            _ => None,
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = UnknownItemType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownItemType(s.to_owned()))
    }
}

impl Serialize for ItemType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ItemType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
