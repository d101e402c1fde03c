use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a party row. Small positive integers (1..=3 in the sample data).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartyId(pub i64);

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered voter as stored in the `voters` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    pub id: String,
    pub name: String,
    /// Photograph location, fetched over HTTP when the voter is selected.
    pub image_url: String,
    pub has_voted: bool,
}

impl Voter {
    pub fn new(id: impl Into<String>, name: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_url: image_url.into(),
            has_voted: false,
        }
    }

    /// "Yes"/"No" label used by the voter list and the print report
    pub fn voted_label(&self) -> &'static str {
        if self.has_voted { "Yes" } else { "No" }
    }
}

/// A party and its accumulated tally since the last reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub id: PartyId,
    pub name: String,
    pub votes: u64,
}

impl Party {
    pub fn new(id: i64, name: impl Into<String>, votes: u64) -> Self {
        Self {
            id: PartyId(id),
            name: name.into(),
            votes,
        }
    }
}
