//! Outage queue identifiers.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Highest queue group number.
pub const MAX_GROUP: u8 = 6;
/// Highest subgroup number within a group.
pub const MAX_SUBGROUP: u8 = 2;
/// Number of distinct queues served by the utility.
pub const QUEUE_COUNT: usize = (MAX_GROUP * MAX_SUBGROUP) as usize;

/// Dotted `group.subgroup` queue identifier, `1.1` through `6.2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueueId {
    group: u8,
    subgroup: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid queue '{0}', expected 1.1 - 6.2")]
pub struct QueueIdError(pub String);

impl QueueId {
    pub fn new(group: u8, subgroup: u8) -> Result<Self, QueueIdError> {
        if (1..=MAX_GROUP).contains(&group) && (1..=MAX_SUBGROUP).contains(&subgroup) {
            Ok(Self { group, subgroup })
        } else {
            Err(QueueIdError(format!("{}.{}", group, subgroup)))
        }
    }

    pub fn group(&self) -> u8 {
        self.group
    }

    pub fn subgroup(&self) -> u8 {
        self.subgroup
    }

    /// All queues in ascending order: 1.1, 1.2, 2.1, ... 6.2.
    pub fn all() -> impl Iterator<Item = QueueId> {
        (1..=MAX_GROUP)
            .flat_map(|group| (1..=MAX_SUBGROUP).map(move |subgroup| QueueId { group, subgroup }))
    }
}

impl FromStr for QueueId {
    type Err = QueueIdError;

    /// Accepts exactly one digit, a dot, and one digit (`[1-6]\.[1-2]`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            [g, b'.', sg] if g.is_ascii_digit() && sg.is_ascii_digit() => {
                QueueId::new(g - b'0', sg - b'0').map_err(|_| QueueIdError(s.to_string()))
            }
            _ => Err(QueueIdError(s.to_string())),
        }
    }
}

impl fmt::Display for QueueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.group, self.subgroup)
    }
}

impl Serialize for QueueId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for QueueId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
