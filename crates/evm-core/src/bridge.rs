//! Polling bridge: device signals in, store writes out

use crate::{Party, PartyId, Selection, Signal, SignalMap, Voter};
use log::{debug, info, warn};

/// Persistence operations the console and the bridge need.
///
/// Every write is committed on its own; there is no transaction spanning a
/// user action.
pub trait VoteStore {
    type Error: std::error::Error + Send + Sync + 'static;

    fn voter(&self, id: &str) -> Result<Option<Voter>, Self::Error>;

    /// Case-insensitive substring search on id or name; blank lists everyone
    fn search_voters(&self, query: &str) -> Result<Vec<Voter>, Self::Error>;

    /// Set has-voted on a voter that has not voted yet.
    /// Returns false if no row changed (already voted or unknown id).
    fn mark_voted(&mut self, id: &str) -> Result<bool, Self::Error>;

    fn parties(&self) -> Result<Vec<Party>, Self::Error>;

    /// Add one vote. Returns false if there is no such party.
    fn increment_party(&mut self, id: PartyId) -> Result<bool, Self::Error>;
}

/// Non-blocking source of device lines
pub trait SignalSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Next complete line if one is buffered, `None` otherwise. Must not block.
    fn poll(&mut self) -> Result<Option<String>, Self::Error>;
}

/// A missing device never produces signals
impl<T: SignalSource> SignalSource for Option<T> {
    type Error = T::Error;

    fn poll(&mut self) -> Result<Option<String>, Self::Error> {
        match self {
            Some(source) => source.poll(),
            None => Ok(None),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkOutcome {
    Marked(Voter),
    /// Nothing was written
    AlreadyVoted(Voter),
    /// The selected voter's row is gone; the selection is cleared
    Missing(Voter),
    NoSelection,
}

/// The mark-voted transition, shared by the operator action and the device code.
///
/// A voter that is already marked is left alone and no write is issued.
pub fn mark_voted<S: VoteStore>(
    store: &mut S,
    selection: &mut Selection,
) -> Result<MarkOutcome, S::Error> {
    let Some(voter) = selection.current_mut() else {
        return Ok(MarkOutcome::NoSelection);
    };
    if voter.has_voted {
        return Ok(MarkOutcome::AlreadyVoted(voter.clone()));
    }

    if store.mark_voted(&voter.id)? {
        voter.has_voted = true;
        info!("Marked voter {} ({}) as voted", voter.id, voter.name);
        return Ok(MarkOutcome::Marked(voter.clone()));
    }

    // Nothing changed: the row was marked elsewhere or is gone
    let stale = voter.clone();
    match store.voter(&stale.id)? {
        Some(current) => {
            selection.select(current.clone());
            Ok(MarkOutcome::AlreadyVoted(current))
        }
        None => {
            warn!("Selected voter {} no longer exists", stale.id);
            selection.clear();
            Ok(MarkOutcome::Missing(stale))
        }
    }
}

/// What a single bridge tick did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    Voted(PartyId),
    UnknownParty(PartyId),
    MarkedVoted(Voter),
    AlreadyVoted(Voter),
    /// Mark-voted code hit a voter that is no longer stored
    VoterMissing(Voter),
    /// Mark-voted code received with nobody selected; the signal is dropped
    NoSelection,
    Unrecognized(String),
    /// The device or the store failed; already logged
    Failed(String),
}

impl TickOutcome {
    /// Whether the tally view needs a refresh
    pub fn changes_tallies(&self) -> bool {
        matches!(self, TickOutcome::Voted(_))
    }

    /// Whether the voter list needs a refresh
    pub fn changes_voters(&self) -> bool {
        matches!(self, TickOutcome::MarkedVoted(_) | TickOutcome::VoterMissing(_))
    }
}

pub struct PollingBridge<D> {
    device: D,
    signals: SignalMap,
}

impl<D: SignalSource> PollingBridge<D> {
    pub fn new(device: D, signals: SignalMap) -> Self {
        Self { device, signals }
    }

    /// Drain at most one line from the device and apply it.
    ///
    /// Never fails: errors are logged and reported as [`TickOutcome::Failed`]
    /// so the caller keeps ticking.
    pub fn step<S: VoteStore>(&mut self, store: &mut S, selection: &mut Selection) -> TickOutcome {
        let line = match self.device.poll() {
            Ok(Some(line)) => line,
            Ok(None) => return TickOutcome::Idle,
            Err(e) => {
                warn!("Failed to read from vote device: {e}");
                return TickOutcome::Failed(format!("Device read failed: {e}"));
            }
        };

        debug!("Device sent {line:?}");
        match self.signals.decode(&line) {
            Signal::Vote(party) => match store.increment_party(party) {
                Ok(true) => {
                    info!("Incremented vote for party {party}");
                    TickOutcome::Voted(party)
                }
                Ok(false) => {
                    warn!("Device voted for party {party}, which does not exist");
                    TickOutcome::UnknownParty(party)
                }
                Err(e) => {
                    warn!("Error incrementing party vote: {e}");
                    TickOutcome::Failed(format!("Could not record vote for party {party}: {e}"))
                }
            },
            Signal::MarkVoted => match mark_voted(store, selection) {
                Ok(MarkOutcome::Marked(voter)) => TickOutcome::MarkedVoted(voter),
                Ok(MarkOutcome::AlreadyVoted(voter)) => TickOutcome::AlreadyVoted(voter),
                Ok(MarkOutcome::Missing(voter)) => TickOutcome::VoterMissing(voter),
                Ok(MarkOutcome::NoSelection) => {
                    debug!("Mark-voted signal with no voter selected; dropped");
                    TickOutcome::NoSelection
                }
                Err(e) => {
                    warn!("Error marking voter as voted: {e}");
                    TickOutcome::Failed(format!("Could not mark voter: {e}"))
                }
            },
            Signal::Unrecognized(code) => {
                warn!("Ignoring unrecognized device code {code:?}");
                TickOutcome::Unrecognized(code)
            }
        }
    }
}
