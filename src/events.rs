//! Recorded builder events.
//!
//! An [`Event`] is one call on [`BookReader`], captured as data. A sequence
//! of events replays deterministically into a [`BookModel`], which makes it
//! possible to drive the builder from a script instead of a live parser.
//!
//! With the `cli` feature, events load from a JSON array of objects tagged by
//! `op`:
//!
//! ```json
//! [
//!   {"op": "set_main_model"},
//!   {"op": "begin_contents_entry"},
//!   {"op": "enter_title"},
//!   {"op": "begin_paragraph"},
//!   {"op": "data", "text": "Chapter One"},
//!   {"op": "end_paragraph"},
//!   {"op": "exit_title"},
//!   {"op": "end_contents_entry"}
//! ]
//! ```
//!
//! Image payloads in `register_image` are base64 encoded.

use log::debug;

use crate::model::{BookModel, ForcedControl, Image, ParagraphKind, TextKind};
use crate::reader::BookReader;

/// A single builder call.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "cli", serde(tag = "op", rename_all = "snake_case"))]
pub enum Event {
    SetMainModel,
    SetFootnoteModel {
        id: String,
    },
    SetNewMainModel,
    UnsetCurrentModel,
    BeginParagraph {
        #[cfg_attr(feature = "cli", serde(default))]
        kind: ParagraphKind,
    },
    EndParagraph,
    EndOfSection,
    EndOfText,
    PushKind {
        kind: TextKind,
    },
    PopKind,
    Control {
        kind: TextKind,
        start: bool,
    },
    ForcedControl {
        entry: ForcedControl,
    },
    Data {
        text: String,
    },
    DataFinal {
        text: String,
    },
    ContentsData {
        text: String,
    },
    Hyperlink {
        kind: TextKind,
        target: String,
    },
    Label {
        name: String,
    },
    LabelAt {
        name: String,
        paragraph: usize,
    },
    LabelIn {
        name: String,
        model_index: usize,
        paragraph: usize,
    },
    BeginContentsEntry {
        #[cfg_attr(feature = "cli", serde(default))]
        reference: Option<usize>,
    },
    EndContentsEntry,
    SetReference {
        entry: usize,
        reference: usize,
    },
    ImageReference {
        id: String,
        #[cfg_attr(feature = "cli", serde(default))]
        offset: i16,
    },
    RegisterImage {
        id: String,
        media_type: String,
        #[cfg_attr(feature = "cli", serde(with = "base64_payload"))]
        data: Vec<u8>,
    },
    FixedSpace {
        width: u16,
    },
    EnterTitle,
    ExitTitle,
}

impl Event {
    /// Perform this event on `reader`.
    pub fn apply(&self, reader: &mut BookReader) {
        match self {
            Event::SetMainModel => reader.set_main_model(),
            Event::SetFootnoteModel { id } => reader.set_footnote_model(id),
            Event::SetNewMainModel => reader.set_new_main_model(),
            Event::UnsetCurrentModel => reader.unset_current_model(),
            Event::BeginParagraph { kind } => reader.begin_paragraph(*kind),
            Event::EndParagraph => reader.end_paragraph(),
            Event::EndOfSection => reader.insert_end_of_section_paragraph(),
            Event::EndOfText => reader.insert_end_of_text_paragraph(),
            Event::PushKind { kind } => reader.push_kind(*kind),
            Event::PopKind => {
                reader.pop_kind();
            }
            Event::Control { kind, start } => reader.add_control(*kind, *start),
            Event::ForcedControl { entry } => reader.add_forced_control(*entry),
            Event::Data { text } => reader.add_data(text),
            Event::DataFinal { text } => reader.add_data_final(text),
            Event::ContentsData { text } => reader.add_contents_data(text),
            Event::Hyperlink { kind, target } => reader.add_hyperlink_control(*kind, target),
            Event::Label { name } => reader.add_hyperlink_label(name),
            Event::LabelAt { name, paragraph } => reader.add_hyperlink_label_at(name, *paragraph),
            Event::LabelIn {
                name,
                model_index,
                paragraph,
            } => reader.add_hyperlink_label_in(name, *model_index, *paragraph),
            Event::BeginContentsEntry { reference } => reader.begin_contents_entry(*reference),
            Event::EndContentsEntry => reader.end_contents_entry(),
            Event::SetReference { entry, reference } => reader.set_reference(*entry, *reference),
            Event::ImageReference { id, offset } => reader.add_image_reference(id, *offset),
            Event::RegisterImage {
                id,
                media_type,
                data,
            } => reader.add_image(id, Image::new(data.clone(), media_type.as_str())),
            Event::FixedSpace { width } => reader.add_fixed_space(*width),
            Event::EnterTitle => reader.enter_title(),
            Event::ExitTitle => reader.exit_title(),
        }
    }
}

/// Apply every event to `reader` in order.
pub fn replay_into<'a>(reader: &mut BookReader, events: impl IntoIterator<Item = &'a Event>) {
    for event in events {
        event.apply(reader);
    }
}

/// Replay `events` into a fresh book model.
pub fn replay(events: &[Event]) -> BookModel {
    debug!("replaying {} events", events.len());
    let mut reader = BookReader::default();
    replay_into(&mut reader, events);
    reader.into_model()
}

/// Parse a JSON event script.
#[cfg(feature = "cli")]
pub fn parse_events(json: &str) -> crate::Result<Vec<Event>> {
    Ok(serde_json::from_str(json)?)
}

/// Load a JSON event script from disk.
#[cfg(feature = "cli")]
pub fn load_events(path: impl AsRef<std::path::Path>) -> crate::Result<Vec<Event>> {
    let json = std::fs::read_to_string(path)?;
    parse_events(&json)
}

/// Load a JSON event script and replay it.
#[cfg(feature = "cli")]
pub fn replay_file(path: impl AsRef<std::path::Path>) -> crate::Result<BookModel> {
    let events = load_events(path)?;
    Ok(replay(&events))
}

#[cfg(feature = "cli")]
mod base64_payload {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
