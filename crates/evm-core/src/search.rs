//! Voter search matching

use crate::Voter;

/// Case-insensitive substring match against the voter's id or name.
///
/// A blank query matches every voter.
pub fn matches(voter: &Voter, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    voter.name.to_lowercase().contains(&needle) || voter.id.to_lowercase().contains(&needle)
}

/// Keep only the voters matching `query`, preserving order
pub fn filter<I>(voters: I, query: &str) -> Vec<Voter>
where
    I: IntoIterator<Item = Voter>,
{
    voters.into_iter().filter(|v| matches(v, query)).collect()
}
