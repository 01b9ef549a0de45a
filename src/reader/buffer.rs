//! Lazy character-data buffer.

/// Accumulates character data until an ordering event forces a commit.
///
/// Adjacent fragments coalesce into a single run; nothing else is merged.
#[derive(Debug, Default)]
pub(crate) struct TextBuffer {
    text: String,
}

impl TextBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, data: &str) {
        self.text.push_str(data);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.text
    }

    /// Clear the contents, keeping the allocation for the next run.
    pub(crate) fn clear(&mut self) {
        self.text.clear();
    }

    /// Take the contents as an owned string and leave the buffer empty.
    pub(crate) fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }
}
