//! # bookmodel
//!
//! An incremental builder for book models. A format parser (FB2, EPUB, plain
//! text, ...) reports structural events; [`BookReader`] turns them into a
//! [`BookModel`] made of append-only text models and a contents tree.
//!
//! ## Features
//!
//! - Lazy text buffering: adjacent character data becomes a single run
//! - Markup scopes and hyperlinks reopen automatically at every paragraph
//! - Contents tree built alongside the text, with back-references
//! - Main, additional and footnote text models in one book
//! - Event scripts (JSON, `cli` feature) for replaying a parse offline
//!
//! ## Quick Start
//!
//! ```
//! use bookmodel::{BookModel, BookReader, TextKind};
//!
//! let mut reader = BookReader::new(BookModel::new());
//! reader.set_main_model();
//!
//! reader.begin_contents_entry(None);
//! reader.enter_title();
//! reader.begin_text_paragraph();
//! reader.add_data("Chapter 1");
//! reader.end_paragraph();
//! reader.exit_title();
//!
//! reader.push_kind(TextKind::EPIGRAPH);
//! reader.begin_text_paragraph();
//! reader.add_data("All happy families are alike.");
//! reader.end_paragraph();
//! reader.pop_kind();
//! reader.end_contents_entry();
//!
//! let book = reader.into_model();
//! let main = book.model(book.main_model()).unwrap();
//! assert_eq!(main.paragraph_count(), 2);
//! assert_eq!(book.contents().outline()[0].title, "Chapter 1");
//! ```

pub mod dump;
pub mod error;
pub mod events;
pub mod model;
pub mod reader;

pub use error::{Error, Result};
pub use events::{Event, replay};
pub use model::{
    BookModel, ContentsTree, Element, Image, ModelId, Paragraph, ParagraphKind, TextKind,
    TextModel,
};
pub use reader::BookReader;

#[cfg(feature = "cli")]
pub use events::{load_events, replay_file};
