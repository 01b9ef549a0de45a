//! Incremental book model builder.
//!
//! [`BookReader`] reacts to structural events from a format parser and writes
//! them into a [`BookModel`]. It owns a small amount of state between events:
//!
//! - a lazy text buffer, flushed only when ordering requires it
//! - a stack of open markup kinds, replayed at every new paragraph
//! - the active hyperlink, also replayed at every new paragraph
//! - a cursor into the contents tree, with its own title buffer
//!
//! Invalid event sequences (ending a paragraph that is not open, popping an
//! empty stack, closing a contents entry at the root) are no-ops. A partial
//! model is preferred over aborting a long parse.
//!
//! This module is split into submodules:
//! - `buffer`: the lazy character-data buffer
//! - `kind_stack`: open markup scopes
//! - `contents`: contents tree construction

mod buffer;
mod contents;
mod kind_stack;

#[cfg(test)]
mod tests;

use log::debug;

use crate::model::{
    BookModel, ContentsId, ForcedControl, Image, ModelId, ParagraphKind, TextKind, TextModel,
};

use buffer::TextBuffer;
use kind_stack::KindStack;

pub use contents::PLACEHOLDER_TITLE;

/// Hyperlink scope that stays open across paragraph boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveHyperlink {
    kind: TextKind,
    target: String,
}

/// Event-driven builder for a [`BookModel`].
///
/// All operations are synchronous and infallible. The reader owns the model
/// while building; take it back with [`BookReader::into_model`].
#[derive(Debug)]
pub struct BookReader {
    book: BookModel,
    current: Option<ModelId>,
    paragraph_open: bool,
    buffer: TextBuffer,
    contents_buffer: TextBuffer,
    kinds: KindStack,
    hyperlink: Option<ActiveHyperlink>,
    inside_title: bool,
    section_has_regular_content: bool,
    contents_cursor: ContentsId,
}

impl BookReader {
    /// Create a reader over `book`. No text model is selected yet.
    pub fn new(book: BookModel) -> Self {
        let contents_cursor = book.contents().root();
        Self {
            book,
            current: None,
            paragraph_open: false,
            buffer: TextBuffer::new(),
            contents_buffer: TextBuffer::new(),
            kinds: KindStack::new(),
            hyperlink: None,
            inside_title: false,
            section_has_regular_content: false,
            contents_cursor,
        }
    }

    pub fn book(&self) -> &BookModel {
        &self.book
    }

    /// Finish building and return the model.
    ///
    /// Pending text of a still-open paragraph is committed first.
    pub fn into_model(mut self) -> BookModel {
        self.end_paragraph();
        self.book
    }

    /// The text model events are currently written to.
    pub fn current_model(&self) -> Option<ModelId> {
        self.current
    }

    fn current_text_model(&mut self) -> Option<&mut TextModel> {
        let id = self.current?;
        self.book.model_mut(id)
    }

    // ------------------------------------------------------------------
    // Model selection
    // ------------------------------------------------------------------

    /// Write to the book's first main model.
    pub fn set_main_model(&mut self) {
        self.select(Some(self.book.main_model()));
    }

    /// Write to the footnote model `id`, creating it on first use.
    pub fn set_footnote_model(&mut self, id: &str) {
        let model = self.book.footnote_model(id);
        self.select(Some(model));
    }

    /// Create a new main model and write to it.
    pub fn set_new_main_model(&mut self) {
        let model = self.book.add_main_model();
        self.select(Some(model));
    }

    /// Stop writing; subsequent text events are dropped.
    pub fn unset_current_model(&mut self) {
        self.select(None);
    }

    // Switching never flushes or closes an open paragraph: pending text and
    // the open flag carry over to the newly selected model.
    fn select(&mut self, model: Option<ModelId>) {
        if self.paragraph_open && model != self.current {
            debug!(
                "switching text model from {:?} to {:?} with a paragraph open",
                self.current, model
            );
        }
        self.current = model;
    }

    // ------------------------------------------------------------------
    // Buffering
    // ------------------------------------------------------------------

    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        if let Some(model) = self.current.and_then(|id| self.book.model_mut(id)) {
            model.add_text(self.buffer.as_str());
        }
        self.buffer.clear();
    }

    fn route_data(&mut self, data: &str) {
        if self.inside_title {
            self.add_contents_data(data);
        } else {
            self.section_has_regular_content = true;
        }
    }

    /// Buffer character data for the open paragraph.
    ///
    /// Inside a title the same data also feeds the contents entry title.
    /// Dropped when no paragraph is open.
    pub fn add_data(&mut self, data: &str) {
        if !self.paragraph_open {
            return;
        }
        self.buffer.append(data);
        self.route_data(data);
    }

    /// Like [`add_data`](Self::add_data), but skips the buffer when it is empty.
    pub fn add_data_final(&mut self, data: &str) {
        if !self.buffer.is_empty() {
            self.add_data(data);
            return;
        }
        if !self.paragraph_open {
            return;
        }
        if let Some(model) = self.current_text_model() {
            model.add_text(data);
        }
        self.route_data(data);
    }

    // ------------------------------------------------------------------
    // Paragraphs
    // ------------------------------------------------------------------

    /// Begin a regular text paragraph.
    pub fn begin_text_paragraph(&mut self) {
        self.begin_paragraph(ParagraphKind::Text);
    }

    /// Begin a paragraph of `kind`, reopening every open markup scope and
    /// the active hyperlink at its start.
    pub fn begin_paragraph(&mut self, kind: ParagraphKind) {
        if self.current.is_none() {
            return;
        }
        // Text still pending belongs to the paragraph being replaced.
        self.flush();
        let Some(model) = self.current.and_then(|id| self.book.model_mut(id)) else {
            return;
        };
        model.create_paragraph(kind);
        for &open in self.kinds.as_slice() {
            model.add_control(open, true);
        }
        if let Some(link) = &self.hyperlink {
            model.add_hyperlink_control(link.kind, &link.target);
        }
        self.paragraph_open = true;
    }

    pub fn end_paragraph(&mut self) {
        if self.paragraph_open {
            self.flush();
            self.paragraph_open = false;
        }
    }

    pub fn is_paragraph_open(&self) -> bool {
        self.paragraph_open
    }

    pub fn insert_end_of_section_paragraph(&mut self) {
        self.insert_end_paragraph(ParagraphKind::EndOfSection);
    }

    pub fn insert_end_of_text_paragraph(&mut self) {
        self.insert_end_paragraph(ParagraphKind::EndOfText);
    }

    // Inserted only after regular content, and never twice in a row.
    fn insert_end_paragraph(&mut self, kind: ParagraphKind) {
        if !self.section_has_regular_content {
            return;
        }
        let Some(model) = self.current_text_model() else {
            return;
        };
        match model.last_paragraph_kind() {
            Some(last) if last != kind => {
                model.create_paragraph(kind);
                self.section_has_regular_content = false;
            }
            _ => {}
        }
    }

    // ------------------------------------------------------------------
    // Markup scopes
    // ------------------------------------------------------------------

    /// Open a markup scope that later paragraphs will reopen.
    pub fn push_kind(&mut self, kind: TextKind) {
        self.kinds.push(kind);
    }

    /// Close the innermost markup scope. Returns `false` if none was open.
    pub fn pop_kind(&mut self) -> bool {
        let popped = self.kinds.pop();
        if !popped {
            debug!("pop_kind on empty kind stack");
        }
        popped
    }

    /// Insert a start or end control marker into the open paragraph.
    ///
    /// A closing marker of the active hyperlink's kind ends the hyperlink,
    /// whether or not a paragraph is open.
    pub fn add_control(&mut self, kind: TextKind, start: bool) {
        if self.paragraph_open {
            self.flush();
            if let Some(model) = self.current_text_model() {
                model.add_control(kind, start);
            }
        }
        if !start && self.hyperlink.as_ref().is_some_and(|link| link.kind == kind) {
            self.hyperlink = None;
        }
    }

    /// Insert an explicit style override into the open paragraph.
    pub fn add_forced_control(&mut self, entry: ForcedControl) {
        if self.paragraph_open {
            self.flush();
            if let Some(model) = self.current_text_model() {
                model.add_forced_control(entry);
            }
        }
    }

    // ------------------------------------------------------------------
    // Hyperlinks
    // ------------------------------------------------------------------

    /// Open a hyperlink scope.
    ///
    /// The marker is written only if a paragraph is open, but the hyperlink
    /// becomes active either way and is reopened by later paragraphs until a
    /// closing control of the same kind arrives. An empty target leaves no
    /// hyperlink active.
    pub fn add_hyperlink_control(&mut self, kind: TextKind, target: &str) {
        if self.paragraph_open {
            self.flush();
            if let Some(model) = self.current_text_model() {
                model.add_hyperlink_control(kind, target);
            }
        }
        self.hyperlink = (!target.is_empty()).then(|| ActiveHyperlink {
            kind,
            target: target.to_string(),
        });
    }

    /// Label the paragraph currently being written (or the next one, when no
    /// paragraph is open) in the current model.
    pub fn add_hyperlink_label(&mut self, name: &str) {
        let Some(id) = self.current else {
            return;
        };
        let Some(model) = self.book.model(id) else {
            return;
        };
        let mut paragraph = model.paragraph_count();
        if self.paragraph_open {
            paragraph = paragraph.saturating_sub(1);
        }
        self.book.add_label(name, id, paragraph);
    }

    /// Label an explicit paragraph of the current model.
    pub fn add_hyperlink_label_at(&mut self, name: &str, paragraph: usize) {
        if let Some(id) = self.current {
            self.book.add_label(name, id, paragraph);
        }
    }

    /// Label an explicit paragraph of the `model_index`-th main model.
    pub fn add_hyperlink_label_in(&mut self, name: &str, model_index: usize, paragraph: usize) {
        match self.book.main_models().get(model_index).copied() {
            Some(id) => self.book.add_label(name, id, paragraph),
            None => debug!("label {name:?} targets unknown main model {model_index}"),
        }
    }

    // ------------------------------------------------------------------
    // Images, spacing and titles
    // ------------------------------------------------------------------

    /// Reference an image from the text.
    ///
    /// Outside a paragraph the image becomes its own paragraph, wrapped in an
    /// [`TextKind::IMAGE`] control.
    pub fn add_image_reference(&mut self, id: &str, offset: i16) {
        if self.current.is_none() {
            return;
        }
        self.section_has_regular_content = true;
        if self.paragraph_open {
            self.flush();
            if let Some(model) = self.current_text_model() {
                model.add_image(id, offset);
            }
        } else {
            self.begin_text_paragraph();
            if let Some(model) = self.current_text_model() {
                model.add_control(TextKind::IMAGE, true);
                model.add_image(id, offset);
                model.add_control(TextKind::IMAGE, false);
            }
            self.end_paragraph();
        }
    }

    /// Register image data with the book.
    pub fn add_image(&mut self, id: &str, image: Image) {
        self.book.add_image(id, image);
    }

    /// Append fixed-width spacing to the open paragraph.
    pub fn add_fixed_space(&mut self, width: u16) {
        if !self.paragraph_open {
            return;
        }
        self.flush();
        if let Some(model) = self.current_text_model() {
            model.add_fixed_space(width);
        }
    }

    pub fn enter_title(&mut self) {
        self.inside_title = true;
    }

    pub fn exit_title(&mut self) {
        self.inside_title = false;
    }
}

impl Default for BookReader {
    fn default() -> Self {
        Self::new(BookModel::new())
    }
}
