//! Book model storage.
//!
//! This module contains:
//! - Paragraph and text kinds
//! - Append-only text models (paragraphs and their elements)
//! - The arena-based contents tree
//! - The book-level aggregate owning models, labels and images

mod book;
pub mod contents;
mod kind;
mod text;

// Re-export book types
pub use book::{BookModel, Image, Label};

// Re-export contents tree
pub use contents::{ContentsId, ContentsNode, ContentsTree, OutlineEntry, Reference};

// Re-export kinds
pub use kind::{ParagraphKind, TextKind};

// Re-export text model types
pub use text::{Alignment, Element, ForcedControl, ModelId, ModelRole, Paragraph, TextModel};
