//! Match-and-decorate engine
//!
//! Turns the current selection into highlight regions:
//! - Pattern building (literal, special-character-safe)
//! - Occurrence scanning over the full document text
//! - Offset to line/column mapping
//! - Style caching keyed by the selected text
//! - Debounced trigger scheduling and the controller tying it together

mod pattern;
mod scanner;
mod region;
mod cache;
mod debounce;
mod controller;

pub use pattern::{MatchMode, SearchPattern};
pub use scanner::{Occurrence, Occurrences, Scan};
pub use region::{map_occurrences, MappedRegions, Position, Region};
pub use cache::{StyleCache, StyleKey};
pub use debounce::{DebounceGate, TriggerCause, TriggerRequest};
pub use controller::{Controller, EventSender, HighlightEvent, TriggerOutcome};
