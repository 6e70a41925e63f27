//! Highlight controller
//!
//! Owns the style cache and the debounce gate. Events arrive over a
//! channel; `pump` feeds them through the gate and runs at most one
//! trigger per call. A trigger clears every cached style's regions,
//! then scans the active document for the current selection and applies
//! the matches under that selection's style.

use std::sync::mpsc::{self, Receiver, SendError, Sender};
use std::time::Instant;

use crate::config::Config;
use crate::document::DocumentId;
use crate::error::{HighlightError, Result};
use crate::host::{EditorHost, TextDocument};
use crate::style::{StyleConfig, StyleHandle};

use super::cache::{StyleCache, StyleKey};
use super::debounce::{DebounceGate, TriggerCause, TriggerRequest};
use super::pattern::SearchPattern;
use super::region::map_occurrences;
use super::scanner::Scan;

/// Host notifications the controller reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightEvent {
    SelectionChanged,
    DocumentChanged { document: DocumentId },
}

#[derive(Debug)]
struct Envelope {
    event: HighlightEvent,
    at: Instant,
}

/// Handle given to the host for delivering events
///
/// Sending fails once the controller has been deactivated.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: Sender<Envelope>,
}

impl EventSender {
    /// Deliver an event stamped with the current time
    pub fn send(&self, event: HighlightEvent) -> std::result::Result<(), HighlightEvent> {
        self.send_at(event, Instant::now())
    }

    /// Deliver an event that happened at `at`
    pub fn send_at(
        &self,
        event: HighlightEvent,
        at: Instant,
    ) -> std::result::Result<(), HighlightEvent> {
        self.tx
            .send(Envelope { event, at })
            .map_err(|SendError(envelope)| envelope.event)
    }
}

/// Result of one trigger
#[derive(Debug)]
pub enum TriggerOutcome {
    /// Regions were applied under `style`
    Applied {
        style: StyleHandle,
        regions: usize,
        /// Occurrences dropped because their offsets no longer mapped
        dropped: usize,
    },
    /// Selection was empty; all regions are cleared
    Cleared,
    /// Nothing could be done (no active editor, unusable pattern)
    Skipped(HighlightError),
}

/// Drives highlighting for one host
pub struct Controller {
    config: Config,
    cache: StyleCache,
    gate: DebounceGate,
    sender: Sender<Envelope>,
    /// None once deactivated
    events: Option<Receiver<Envelope>>,
}

impl Controller {
    /// Create a controller; events are accepted immediately
    pub fn new(config: Config) -> Self {
        let (sender, events) = mpsc::channel();
        Self {
            cache: StyleCache::new(config.max_cached_styles),
            gate: DebounceGate::new(config.debounce()),
            config,
            sender,
            events: Some(events),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replace the configuration.
    ///
    /// Styles already cached keep their look; new styles use the new
    /// settings.
    pub fn set_config<H: EditorHost>(&mut self, host: &mut H, config: Config) {
        self.gate.set_delay(config.debounce());
        for (key, handle) in self.cache.set_capacity(config.max_cached_styles) {
            tracing::debug!("Evicting style for {:?}", key.as_str());
            host.clear_regions(handle);
            host.dispose_visual_style(handle);
        }
        self.config = config;
    }

    /// Handle for the host's event callbacks
    pub fn sender(&self) -> EventSender {
        EventSender {
            tx: self.sender.clone(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.events.is_some()
    }

    /// Number of cached styles
    pub fn cached_styles(&self) -> usize {
        self.cache.len()
    }

    /// When the pending trigger, if any, will fire
    pub fn next_deadline(&self) -> Option<Instant> {
        self.gate.deadline()
    }

    /// Start accepting events and highlight the current selection
    pub fn activate<H: EditorHost>(&mut self, host: &mut H) -> TriggerOutcome {
        if self.events.is_none() {
            let (sender, events) = mpsc::channel();
            self.sender = sender;
            self.events = Some(events);
        }
        tracing::debug!("Selection highlighting activated");
        self.trigger(host, TriggerCause::Activation)
    }

    /// Stop accepting events, clear all highlights and release every style
    pub fn deactivate<H: EditorHost>(&mut self, host: &mut H) {
        self.events = None;
        self.gate.cancel();

        let handles = self.cache.drain();
        tracing::debug!("Releasing {} cached styles", handles.len());
        for handle in handles {
            host.clear_regions(handle);
            host.dispose_visual_style(handle);
        }
    }

    /// Drain pending events and fire the debounced trigger if it is due
    pub fn pump<H: EditorHost>(&mut self, host: &mut H, now: Instant) -> Option<TriggerOutcome> {
        let events = self.events.as_ref()?;
        let active = host.active_document().map(|doc| doc.id());

        while let Ok(Envelope { event, at }) = events.try_recv() {
            let cause = match event {
                HighlightEvent::SelectionChanged => TriggerCause::SelectionChanged,
                HighlightEvent::DocumentChanged { document } if Some(document) == active => {
                    TriggerCause::DocumentChanged
                }
                HighlightEvent::DocumentChanged { document } => {
                    tracing::trace!("Ignoring change to inactive document {:?}", document);
                    continue;
                }
            };
            self.gate.schedule(TriggerRequest::new(cause, at));
        }

        let request = self.gate.poll(now)?;
        Some(self.trigger(host, request.cause))
    }

    /// Run one trigger now, bypassing the debounce gate.
    ///
    /// Errors never escape: they become `Cleared` or `Skipped`.
    pub fn trigger<H: EditorHost>(&mut self, host: &mut H, cause: TriggerCause) -> TriggerOutcome {
        tracing::trace!("Trigger ({:?})", cause);
        match self.recompute(host) {
            Ok(outcome) => outcome,
            Err(HighlightError::EmptySelection) => {
                tracing::trace!("Empty selection, highlights cleared");
                TriggerOutcome::Cleared
            }
            Err(e) => {
                tracing::debug!("Skipping trigger: {}", e);
                TriggerOutcome::Skipped(e)
            }
        }
    }

    fn recompute<H: EditorHost>(&mut self, host: &mut H) -> Result<TriggerOutcome> {
        if host.active_document().is_none() {
            return Err(HighlightError::NoActiveEditor);
        }

        // The previous highlight may have used another style
        for handle in self.cache.handles() {
            host.clear_regions(handle);
        }

        let selected = host.selection_text().ok_or(HighlightError::NoActiveEditor)?;
        let pattern =
            SearchPattern::literal_with_limit(&selected, self.config.pattern_size_limit)?;

        // Text and offset mapping come from the same borrow of the
        // document, so they always describe the same snapshot.
        let mapped = {
            let document = host.active_document().ok_or(HighlightError::NoActiveEditor)?;
            let text = document.text();
            let scan = Scan::new(&pattern, &text);
            map_occurrences(&scan, |offset| document.offset_to_position(offset))
        };
        tracing::debug!(
            "{} occurrences of {:?} ({} dropped)",
            mapped.regions.len(),
            pattern.text(),
            mapped.dropped
        );

        let style = self.resolve_style(host, &selected);
        host.apply_regions(style, &mapped.regions);

        Ok(TriggerOutcome::Applied {
            style,
            regions: mapped.regions.len(),
            dropped: mapped.dropped,
        })
    }

    /// Cached style for the selected text, created on first sight
    fn resolve_style<H: EditorHost>(&mut self, host: &mut H, selected: &str) -> StyleHandle {
        let key = StyleKey::new(selected);
        if let Some(handle) = self.cache.get(&key) {
            return handle;
        }

        let handle = host.create_visual_style(&StyleConfig::from_config(&self.config));
        tracing::debug!("Created style {:?} for {:?}", handle, selected);

        if let Some((old_key, old)) = self.cache.insert(key, handle) {
            tracing::debug!("Evicting style for {:?}", old_key.as_str());
            host.clear_regions(old);
            host.dispose_visual_style(old);
        }
        handle
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
