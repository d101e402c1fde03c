//! Interactive operator console
//!
//! Layout:
//! ```text
//! ┌ Search ──────────────────────┐┌ Voter ──────────────────────┐
//! │ ▌ gandhi                     │││ ┌──────────┐                │
//! └──────────────────────────────┘│ │  photo   │                │
//! ┌ Voters [1] ──────────────────┐│ └──────────┘                │
//! │ >    2  Rahul Gandhi         ││ ID        2                  │
//! │                              ││ Name      Rahul Gandhi       │
//! │                              ││ Has voted No                 │
//! │                              │└─────────────────────────────┘
//! │                              │┌ Tallies ────────────────────┐
//! │                              ││ Party 1   12                 │
//! └──────────────────────────────┘└─────────────────────────────┘
//!  toast line
//!  7 voters │ device /dev/ttyACM0 │ Enter: select │ Esc: quit
//! ```

mod app;
mod input;
mod ui;

pub use app::{App, ConsoleOptions, Popup, run};
