//! # evm-core
//!
//! Storage- and UI-independent pieces of the EVM console:
//!
//! - [`Voter`], [`Party`] and the operator's [`Selection`]
//! - voter search matching and end-of-voting [`ElectionResult`]s
//! - decoding of device lines into [`Signal`]s
//! - the [`PollingBridge`] that turns signals into store writes, driven by a [`Ticker`]
//!
//! The persistence and device gateways live in `evm-db` and `evm-device`; they
//! plug in through the [`VoteStore`] and [`SignalSource`] traits.

mod bridge;
mod model;
mod results;
pub mod search;
mod selection;
mod signal;
mod ticker;

pub use bridge::{MarkOutcome, PollingBridge, SignalSource, TickOutcome, VoteStore, mark_voted};
pub use model::{Party, PartyId, Voter};
pub use results::{ElectionResult, Outcome, Standing};
pub use selection::Selection;
pub use signal::{Signal, SignalMap, SignalMapError};
pub use ticker::Ticker;
