//! Word group classification.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One of the three fixed categories a word belongs to.
///
/// Serialized with its wire code (`"1"`, `"2"`, `"3"`). Variant order is the
/// ascending sort order used for persisted heatmap data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "GroupRepr", into = "String")]
pub enum Group {
    /// Code `"1"`: word appears in both job listings and investments.
    JobsAndInvestments,
    /// Code `"2"`: word appears in job listings only.
    JobListings,
    /// Code `"3"`: word appears in investments only.
    Investments,
}

impl Group {
    pub const ALL: [Group; 3] = [
        Group::JobsAndInvestments,
        Group::JobListings,
        Group::Investments,
    ];

    /// Stable wire code.
    pub fn code(self) -> &'static str {
        match self {
            Self::JobsAndInvestments => "1",
            Self::JobListings => "2",
            Self::Investments => "3",
        }
    }

    /// Legend text shown by the visualization.
    pub fn legend(self) -> &'static str {
        match self {
            Self::JobsAndInvestments => "job listings and investments",
            Self::JobListings => "job listings",
            Self::Investments => "investments",
        }
    }

    /// Parses a wire code, tolerating surrounding whitespace.
    pub fn from_code(code: &str) -> Result<Self, GroupError> {
        match code.trim() {
            "1" => Ok(Self::JobsAndInvestments),
            "2" => Ok(Self::JobListings),
            "3" => Ok(Self::Investments),
            other => Err(GroupError::UnknownCode(other.to_string())),
        }
    }
}

impl Display for Group {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl From<Group> for String {
    fn from(value: Group) -> Self {
        value.code().to_string()
    }
}

/// Raw group value; some exports write the code as a bare number.
#[derive(Deserialize)]
#[serde(untagged)]
enum GroupRepr {
    Text(String),
    Number(u64),
}

impl TryFrom<GroupRepr> for Group {
    type Error = GroupError;

    fn try_from(value: GroupRepr) -> Result<Self, Self::Error> {
        match value {
            GroupRepr::Text(code) => Group::from_code(&code),
            GroupRepr::Number(code) => Group::from_code(&code.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupError {
    UnknownCode(String),
}

impl Display for GroupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCode(code) => {
                write!(f, "unknown group code `{code}`; expected 1|2|3")
            }
        }
    }
}

impl Error for GroupError {}
