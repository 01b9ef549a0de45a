//! Paragraph and text kinds.

/// Structural role of a paragraph in a text model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "cli", serde(rename_all = "snake_case"))]
pub enum ParagraphKind {
    /// Regular text paragraph.
    #[default]
    Text,
    /// Paragraph belonging to a tree-shaped (contents-like) listing.
    Tree,
    /// Blank line.
    EmptyLine,
    BeforeSkip,
    AfterSkip,
    /// Marks the end of a section.
    EndOfSection,
    /// Marks the end of the whole text.
    EndOfText,
}

/// Markup category tag carried by control and hyperlink elements.
///
/// Kinds are opaque to the builder: it only compares them for equality when
/// closing the active hyperlink. The associated constants cover the
/// categories common ebook formats produce; parsers may define their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "cli", serde(transparent))]
pub struct TextKind(pub u8);

impl TextKind {
    pub const REGULAR: TextKind = TextKind(0);
    pub const TITLE: TextKind = TextKind(1);
    pub const SECTION_TITLE: TextKind = TextKind(2);
    pub const POEM_TITLE: TextKind = TextKind(3);
    pub const SUBTITLE: TextKind = TextKind(4);
    pub const ANNOTATION: TextKind = TextKind(5);
    pub const EPIGRAPH: TextKind = TextKind(6);
    pub const STANZA: TextKind = TextKind(7);
    pub const VERSE: TextKind = TextKind(8);
    pub const PREFORMATTED: TextKind = TextKind(9);
    /// Wraps standalone images.
    pub const IMAGE: TextKind = TextKind(10);
    pub const CITE: TextKind = TextKind(12);
    pub const AUTHOR: TextKind = TextKind(13);
    pub const DATE: TextKind = TextKind(14);
    pub const INTERNAL_HYPERLINK: TextKind = TextKind(15);
    pub const FOOTNOTE: TextKind = TextKind(16);
    pub const EMPHASIS: TextKind = TextKind(17);
    pub const STRONG: TextKind = TextKind(18);
    pub const SUB: TextKind = TextKind(19);
    pub const SUP: TextKind = TextKind(20);
    pub const CODE: TextKind = TextKind(21);
    pub const STRIKETHROUGH: TextKind = TextKind(22);
    pub const CONTENTS_TABLE_ENTRY: TextKind = TextKind(23);
    pub const ITALIC: TextKind = TextKind(27);
    pub const BOLD: TextKind = TextKind(28);
    pub const DEFINITION: TextKind = TextKind(29);
    pub const DEFINITION_DESCRIPTION: TextKind = TextKind(30);
    pub const H1: TextKind = TextKind(31);
    pub const H2: TextKind = TextKind(32);
    pub const H3: TextKind = TextKind(33);
    pub const H4: TextKind = TextKind(34);
    pub const H5: TextKind = TextKind(35);
    pub const H6: TextKind = TextKind(36);
    pub const EXTERNAL_HYPERLINK: TextKind = TextKind(37);
    pub const BOOK_HYPERLINK: TextKind = TextKind(38);
}
