pub mod cli;
pub mod config;
pub mod diff;
pub mod events;
pub mod export;
pub mod input;
pub mod performance;
pub mod session;
pub mod tui;
pub mod watcher;

pub use diff::*;
pub use events::{AppEvent, AppState, InputSlot};
pub use input::{load_text, InputError, LoadedText};
pub use session::DiffSession;
