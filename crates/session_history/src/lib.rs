//! Session History - clips generated during this run
//!
//! Keeps generated containers in memory, newest first, and saves them as
//! `voice-gen-{id}.wav` on request.

mod export;
mod history;
mod item;

pub use export::{export_item, export_latest, HistoryError};
pub use history::SessionHistory;
pub use item::{snippet, ClipSettings, HistoryItem, HistorySummary, SNIPPET_CHARS};
