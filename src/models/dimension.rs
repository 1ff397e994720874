// src/models/dimension.rs
use std::fmt;
use std::str::FromStr;
use crate::utils::ClassificationError;

const NAMESPACE: &str = "minecraft:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Overworld,
    TheNether,
    TheEnd,
}

impl Dimension {
    /// Export order. Every tick writes one marker file per entry.
    pub const ALL: [Dimension; 3] = [Dimension::Overworld, Dimension::TheNether, Dimension::TheEnd];

    /// Canonical name, used for matching and as the output folder name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Overworld => "overworld",
            Self::TheNether => "the_nether",
            Self::TheEnd => "the_end",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = ClassificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dimension::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| ClassificationError::Unrecognized(s.to_string()))
    }
}

/// Strips the `minecraft:` namespace from a reported world id.
///
/// Only applies when the id contains a `:` at all. The id is split on the
/// literal `minecraft:` and the second segment is kept; an id with some other
/// namespace has no second segment and is passed through untouched.
pub fn strip_namespace(raw: &str) -> &str {
    if !raw.contains(':') {
        return raw;
    }
    raw.split(NAMESPACE).nth(1).unwrap_or(raw)
}

pub fn classify(raw: &str) -> Result<Dimension, ClassificationError> {
    strip_namespace(raw).parse()
}
