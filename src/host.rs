//! Host editor capabilities
//!
//! The engine only needs to read the active document and selection and
//! to set highlight regions per style. `HeadlessHost` implements this in
//! memory for the `hlsel` driver and for tests.

use std::collections::BTreeMap;
use std::ops::Range;

use crate::document::{Document, DocumentId};
use crate::error::Result;
use crate::highlight::{Position, Region};
use crate::style::{StyleConfig, StyleHandle};

/// Read access to a document
pub trait TextDocument {
    fn id(&self) -> DocumentId;

    /// Full text of the document
    fn text(&self) -> String;

    /// Map a character offset to a position, failing if out of range
    fn offset_to_position(&self, offset: usize) -> Result<Position>;
}

impl TextDocument for Document {
    fn id(&self) -> DocumentId {
        Document::id(self)
    }

    fn text(&self) -> String {
        Document::text(self)
    }

    fn offset_to_position(&self, offset: usize) -> Result<Position> {
        Document::offset_to_position(self, offset)
    }
}

/// What the engine consumes from the host editor
pub trait EditorHost {
    type Document: TextDocument;

    /// Document of the active editor, if any
    fn active_document(&self) -> Option<&Self::Document>;

    /// Text of the active editor's selection, if there is an active editor
    fn selection_text(&self) -> Option<String>;

    /// Allocate a visual style
    fn create_visual_style(&mut self, config: &StyleConfig) -> StyleHandle;

    /// Set the regions shown with `style`, replacing its previous ones
    fn apply_regions(&mut self, style: StyleHandle, regions: &[Region]);

    /// Remove every region shown with `style`
    fn clear_regions(&mut self, style: StyleHandle);

    /// Release a visual style; the handle is not used again
    fn dispose_visual_style(&mut self, style: StyleHandle);
}

/// In-memory host with one editor
#[derive(Debug, Default)]
pub struct HeadlessHost {
    document: Option<Document>,
    /// Selection as a character range into the document
    selection: Range<usize>,
    next_document_id: u64,
    next_style_id: u64,
    styles: BTreeMap<StyleHandle, StyleConfig>,
    decorations: BTreeMap<StyleHandle, Vec<Region>>,
    /// Whether the host renders with a dark theme
    pub dark_theme: bool,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a document in the editor, replacing any previous one
    pub fn open(&mut self, text: &str) -> DocumentId {
        self.next_document_id += 1;
        let id = DocumentId::new(self.next_document_id);
        self.document = Some(Document::new(id, text));
        self.selection = 0..0;
        id
    }

    /// Close the editor
    pub fn close(&mut self) {
        self.document = None;
        self.selection = 0..0;
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn document_mut(&mut self) -> Option<&mut Document> {
        self.document.as_mut()
    }

    /// Select a character range
    pub fn select(&mut self, range: Range<usize>) {
        self.selection = range;
    }

    /// Select the first occurrence of `text`, returns false if absent
    pub fn select_text(&mut self, text: &str) -> bool {
        let Some(doc) = &self.document else {
            return false;
        };
        let content = doc.text();
        match content.find(text) {
            Some(byte) => {
                let start = content[..byte].chars().count();
                self.selection = start..start + text.chars().count();
                true
            }
            None => false,
        }
    }

    /// Regions currently shown with a style
    pub fn regions(&self, style: StyleHandle) -> &[Region] {
        self.decorations.get(&style).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every style that currently shows at least one region
    pub fn decorated_styles(&self) -> Vec<StyleHandle> {
        self.decorations
            .iter()
            .filter(|(_, regions)| !regions.is_empty())
            .map(|(style, _)| *style)
            .collect()
    }

    /// Total number of regions shown across all styles
    pub fn region_count(&self) -> usize {
        self.decorations.values().map(Vec::len).sum()
    }

    /// Options a live style was created with
    pub fn style_config(&self, style: StyleHandle) -> Option<&StyleConfig> {
        self.styles.get(&style)
    }

    /// Border colour a live style shows under the host's theme
    pub fn border_color(&self, style: StyleHandle) -> Option<&str> {
        self.styles
            .get(&style)
            .map(|config| config.border_color(self.dark_theme))
    }

    /// Number of allocated, not yet disposed styles
    pub fn live_styles(&self) -> usize {
        self.styles.len()
    }
}

impl EditorHost for HeadlessHost {
    type Document = Document;

    fn active_document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    fn selection_text(&self) -> Option<String> {
        let doc = self.document.as_ref()?;
        Some(doc.slice(self.selection.start, self.selection.end))
    }

    fn create_visual_style(&mut self, config: &StyleConfig) -> StyleHandle {
        self.next_style_id += 1;
        let handle = StyleHandle::new(self.next_style_id);
        self.styles.insert(handle, config.clone());
        handle
    }

    fn apply_regions(&mut self, style: StyleHandle, regions: &[Region]) {
        if !self.styles.contains_key(&style) {
            tracing::warn!("Applying regions with unknown style {:?}", style);
            return;
        }
        self.decorations.insert(style, regions.to_vec());
    }

    fn clear_regions(&mut self, style: StyleHandle) {
        self.decorations.remove(&style);
    }

    fn dispose_visual_style(&mut self, style: StyleHandle) {
        self.decorations.remove(&style);
        self.styles.remove(&style);
    }
}
