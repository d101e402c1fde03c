//! End-of-voting result computation

use crate::Party;
use serde::Serialize;

/// One row of the results table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    pub party: Party,
    /// Share of all votes cast, 0.0..=100.0. Zero when no votes were cast.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// No parties are registered
    NoParties,
    /// The top two tallies are equal; lists every party sharing the top tally
    Tie { parties: Vec<String> },
    Winner { party: String, majority: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElectionResult {
    /// Sorted by tally, highest first; equal tallies keep party id order
    pub standings: Vec<Standing>,
    pub total_votes: u64,
    pub outcome: Outcome,
}

impl ElectionResult {
    pub fn from_parties(mut parties: Vec<Party>) -> Self {
        parties.sort_by(|a, b| b.votes.cmp(&a.votes).then(a.id.cmp(&b.id)));

        let total_votes: u64 = parties.iter().map(|p| p.votes).sum();

        let outcome = match parties.as_slice() {
            [] => Outcome::NoParties,
            [first, second, ..] if first.votes == second.votes => Outcome::Tie {
                parties: parties
                    .iter()
                    .filter(|p| p.votes == first.votes)
                    .map(|p| p.name.clone())
                    .collect(),
            },
            [first, ..] => Outcome::Winner {
                party: first.name.clone(),
                majority: total_votes > 0 && first.votes * 2 > total_votes,
            },
        };

        let standings = parties
            .into_iter()
            .map(|party| {
                let percentage = if total_votes > 0 {
                    party.votes as f64 / total_votes as f64 * 100.0
                } else {
                    0.0
                };
                Standing { party, percentage }
            })
            .collect();

        Self {
            standings,
            total_votes,
            outcome,
        }
    }

    /// Plain-text report lines, shared by the console dialog and `evm results`
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .standings
            .iter()
            .map(|s| {
                format!(
                    "{}: {} votes ({:.2}%)",
                    s.party.name, s.party.votes, s.percentage
                )
            })
            .collect();

        lines.push(String::new());
        match &self.outcome {
            Outcome::NoParties => lines.push("No parties registered".to_string()),
            Outcome::Tie { parties } => {
                lines.push("There is a tie between:".to_string());
                lines.push(parties.join(" and "));
            }
            Outcome::Winner { party, majority } => {
                lines.push(format!("Winner: {party}"));
                lines.push(if *majority {
                    "Majority achieved".to_string()
                } else {
                    "No majority achieved".to_string()
                });
            }
        }
        lines
    }
}
