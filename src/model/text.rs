//! Append-only text models.
//!
//! A [`TextModel`] is one linear stream of paragraphs (the main body, an
//! additional body, or a footnote). Models only grow: paragraphs are created
//! at the end and elements are appended to the last paragraph.

use super::kind::{ParagraphKind, TextKind};

/// Identifier of a text model within a [`BookModel`](super::BookModel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "cli", serde(transparent))]
pub struct ModelId(pub u32);

/// What a text model holds.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(feature = "cli", serde(tag = "type", content = "id", rename_all = "snake_case"))]
pub enum ModelRole {
    /// A main body model; the number is its position among the book's main models.
    Main(usize),
    /// A footnote model with its footnote id.
    Footnote(String),
}

/// Horizontal alignment carried by a forced control entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "cli", serde(rename_all = "snake_case"))]
pub enum Alignment {
    Left,
    Right,
    Center,
    Justify,
}

/// Explicit style override inserted into a paragraph.
///
/// Unset fields leave the corresponding property untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "cli", serde(default))]
pub struct ForcedControl {
    pub alignment: Option<Alignment>,
    pub left_indent: Option<i16>,
    pub right_indent: Option<i16>,
}

/// A single element of paragraph content.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(feature = "cli", serde(tag = "type", rename_all = "snake_case"))]
pub enum Element {
    /// A run of character data.
    Text { text: String },
    /// Start or end of a markup scope.
    Control { kind: TextKind, start: bool },
    /// Explicit style override.
    ForcedControl(ForcedControl),
    /// Start of a hyperlink scope.
    Hyperlink { kind: TextKind, target: String },
    /// Reference into the book's image map.
    Image { id: String, offset: i16 },
    /// Fixed-width horizontal space.
    FixedSpace { width: u16 },
}

/// A paragraph: a kind plus ordered content.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Paragraph {
    pub kind: ParagraphKind,
    pub elements: Vec<Element>,
}

impl Paragraph {
    fn new(kind: ParagraphKind) -> Self {
        Self {
            kind,
            elements: Vec::new(),
        }
    }

    /// Concatenated text of all runs, ignoring markers.
    pub fn text(&self) -> String {
        self.elements
            .iter()
            .filter_map(|e| match e {
                Element::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of text runs in this paragraph.
    pub fn run_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| matches!(e, Element::Text { .. }))
            .count()
    }
}

/// An append-only sequence of paragraphs.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct TextModel {
    role: ModelRole,
    paragraphs: Vec<Paragraph>,
}

impl TextModel {
    /// Create an empty model.
    pub fn new(role: ModelRole) -> Self {
        Self {
            role,
            paragraphs: Vec::new(),
        }
    }

    pub fn role(&self) -> &ModelRole {
        &self.role
    }

    /// Number of paragraphs created so far.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn paragraph(&self, index: usize) -> Option<&Paragraph> {
        self.paragraphs.get(index)
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Kind of the last paragraph, if any.
    pub fn last_paragraph_kind(&self) -> Option<ParagraphKind> {
        self.paragraphs.last().map(|p| p.kind)
    }

    /// Start a new paragraph at the end of the model.
    pub fn create_paragraph(&mut self, kind: ParagraphKind) {
        self.paragraphs.push(Paragraph::new(kind));
    }

    /// Append a text run to the last paragraph.
    pub fn add_text(&mut self, text: &str) {
        self.push(Element::Text {
            text: text.to_string(),
        });
    }

    pub fn add_control(&mut self, kind: TextKind, start: bool) {
        self.push(Element::Control { kind, start });
    }

    pub fn add_forced_control(&mut self, entry: ForcedControl) {
        self.push(Element::ForcedControl(entry));
    }

    pub fn add_hyperlink_control(&mut self, kind: TextKind, target: &str) {
        self.push(Element::Hyperlink {
            kind,
            target: target.to_string(),
        });
    }

    pub fn add_image(&mut self, id: &str, offset: i16) {
        self.push(Element::Image {
            id: id.to_string(),
            offset,
        });
    }

    pub fn add_fixed_space(&mut self, width: u16) {
        self.push(Element::FixedSpace { width });
    }

    // Elements always land in the last paragraph; a model without one
    // gets an implicit text paragraph so nothing is lost.
    fn push(&mut self, element: Element) {
        if self.paragraphs.is_empty() {
            self.paragraphs.push(Paragraph::new(ParagraphKind::Text));
        }
        if let Some(last) = self.paragraphs.last_mut() {
            last.elements.push(element);
        }
    }
}
