//! Terminal console for the EVM operator
//!
//! The console is one single-threaded loop: terminal input, the search
//! debounce and the device polling tick all run on it in turn, so a device
//! signal is never applied while an operator action is half done.

mod photo;
mod tui;

pub use photo::{HttpPhotoLoader, PhotoError, PhotoLoader, decode_photo};
pub use tui::{App, ConsoleOptions, Popup, run};
