//! Device line protocol
//!
//! The vote-input device sends one short ASCII code per line. Which codes
//! mean what is configuration; the reference firmware uses `1`..`3` for the
//! party buttons and `4` for "mark the selected voter as voted".

use crate::PartyId;
use std::collections::BTreeMap;
use thiserror::Error;

pub const DEFAULT_MARK_VOTED_CODE: &str = "4";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// Add one vote to the party's tally
    Vote(PartyId),
    /// Mark the currently selected voter as having voted
    MarkVoted,
    /// A line that is not a configured code
    Unrecognized(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignalMapError {
    #[error("Device code must not be empty")]
    EmptyCode,

    #[error("Device code '{0}' is assigned to both a party and the mark-voted action")]
    Ambiguous(String),
}

/// Mapping from device codes to signals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalMap {
    party_codes: BTreeMap<String, PartyId>,
    mark_voted_code: String,
}

impl Default for SignalMap {
    fn default() -> Self {
        let party_codes = (1..=3).map(|n| (n.to_string(), PartyId(n))).collect();
        Self {
            party_codes,
            mark_voted_code: DEFAULT_MARK_VOTED_CODE.to_string(),
        }
    }
}

impl SignalMap {
    pub fn new(
        party_codes: BTreeMap<String, PartyId>,
        mark_voted_code: impl Into<String>,
    ) -> Result<Self, SignalMapError> {
        let mark_voted_code = mark_voted_code.into().trim().to_string();
        if mark_voted_code.is_empty() {
            return Err(SignalMapError::EmptyCode);
        }

        let mut normalized = BTreeMap::new();
        for (code, party) in party_codes {
            let code = code.trim().to_string();
            if code.is_empty() {
                return Err(SignalMapError::EmptyCode);
            }
            if code == mark_voted_code {
                return Err(SignalMapError::Ambiguous(code));
            }
            normalized.insert(code, party);
        }

        Ok(Self {
            party_codes: normalized,
            mark_voted_code,
        })
    }

    pub fn decode(&self, line: &str) -> Signal {
        let code = line.trim();
        if code == self.mark_voted_code {
            return Signal::MarkVoted;
        }
        match self.party_codes.get(code) {
            Some(party) => Signal::Vote(*party),
            None => Signal::Unrecognized(code.to_string()),
        }
    }

    pub fn mark_voted_code(&self) -> &str {
        &self.mark_voted_code
    }

    pub fn party_codes(&self) -> impl Iterator<Item = (&str, PartyId)> {
        self.party_codes.iter().map(|(code, id)| (code.as_str(), *id))
    }
}
