//! highlight-selections - live highlighting of every occurrence of the
//! current selection
//!
//! The engine lives in [`highlight`]; the host editor is reached through
//! the traits in [`host`].

pub mod config;
pub mod document;
pub mod error;
pub mod highlight;
pub mod host;
pub mod render;
pub mod style;

pub use config::Config;
pub use document::{Document, DocumentId};
pub use error::{HighlightError, Result};
pub use highlight::{Controller, EventSender, HighlightEvent, TriggerOutcome};
pub use host::{EditorHost, HeadlessHost, TextDocument};
pub use style::{RulerLane, StyleConfig, StyleHandle};
