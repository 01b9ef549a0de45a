//! Contents tree construction.
//!
//! The reader keeps a cursor into the book's [`ContentsTree`]. Entries open
//! and close in step with the event stream; each entry's title is collected
//! in a buffer of its own and assigned when the entry closes or its first
//! child opens.
//!
//! [`ContentsTree`]: crate::model::ContentsTree

use log::{debug, trace};

use crate::model::{ContentsId, ModelId};

use super::BookReader;

/// Title given to entries that close without any title text.
pub const PLACEHOLDER_TITLE: &str = "...";

impl BookReader {
    /// Buffer title text for the current contents entry.
    pub fn add_contents_data(&mut self, data: &str) {
        if !data.is_empty() {
            self.contents_buffer.append(data);
        }
    }

    /// Open a contents entry pointing into the first main model.
    ///
    /// `reference` is a paragraph index; `None` means the paragraph that
    /// will be appended next.
    pub fn begin_contents_entry(&mut self, reference: Option<usize>) {
        let main = self.book.main_model();
        self.begin_contents_entry_in(main, reference);
    }

    /// Open a contents entry pointing into `model`.
    ///
    /// Ignored unless `model` is the model currently being written, so that
    /// markers inside footnotes never leak into the book's contents.
    pub fn begin_contents_entry_in(&mut self, model: ModelId, reference: Option<usize>) {
        if self.current != Some(model) {
            debug!("contents entry for {model:?} ignored, current model is {:?}", self.current);
            return;
        }
        let paragraph = match reference {
            Some(paragraph) => paragraph,
            None => self.book.model(model).map_or(0, |m| m.paragraph_count()),
        };

        let parent = self.contents_cursor;
        if parent.is_root() {
            self.contents_buffer.clear();
        } else {
            self.finalize_title(parent);
        }

        let contents = self.book.contents_mut();
        let entry = contents.create_subtree(parent);
        contents.set_reference(entry, model, paragraph);
        trace!("contents entry {entry:?} -> {model:?}:{paragraph}");
        self.contents_cursor = entry;
    }

    /// Close the current contents entry and move back to its parent.
    pub fn end_contents_entry(&mut self) {
        let entry = self.contents_cursor;
        if entry.is_root() {
            self.contents_buffer.clear();
            return;
        }
        self.finalize_title(entry);
        self.contents_cursor = self.book.contents().parent(entry).unwrap_or(ContentsId::ROOT);
        trace!("contents entry {entry:?} closed");
    }

    /// Whether a contents entry is open (the cursor is below the root).
    pub fn is_contents_entry_open(&self) -> bool {
        self.book.contents().level(self.contents_cursor) > 0
    }

    /// Point the `entry_index`-th contents entry at `reference` in the
    /// current model. Ignored without a current model.
    pub fn set_reference(&mut self, entry_index: usize, reference: usize) {
        if let Some(model) = self.current {
            self.set_reference_in(entry_index, model, reference);
        }
    }

    /// Point the `entry_index`-th contents entry at `reference` in `model`.
    /// Ignored if the entry does not exist.
    pub fn set_reference_in(&mut self, entry_index: usize, model: ModelId, reference: usize) {
        let contents = self.book.contents_mut();
        if let Some(entry) = contents.entry(entry_index) {
            contents.set_reference(entry, model, reference);
        }
    }

    // Buffered text wins; otherwise an untitled entry gets the placeholder
    // and an already titled one is left alone.
    fn finalize_title(&mut self, entry: ContentsId) {
        let contents = self.book.contents_mut();
        if !self.contents_buffer.is_empty() {
            contents.set_text(entry, self.contents_buffer.take());
        } else if contents.text(entry).is_none() {
            contents.set_text(entry, PLACEHOLDER_TITLE);
        }
    }
}
