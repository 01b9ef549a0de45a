//! Tests for the book reader.

use proptest::prelude::*;

use crate::model::{
    Alignment, BookModel, Element, ForcedControl, Image, Label, ModelId, Paragraph, ParagraphKind,
    Reference, TextKind,
};

use super::BookReader;
use super::contents::PLACEHOLDER_TITLE;

fn main_reader() -> BookReader {
    let mut reader = BookReader::new(BookModel::new());
    reader.set_main_model();
    reader
}

fn paragraphs(reader: &BookReader, model: ModelId) -> Vec<Paragraph> {
    reader.book().model(model).unwrap().paragraphs().to_vec()
}

fn main_paragraphs(reader: &BookReader) -> Vec<Paragraph> {
    paragraphs(reader, reader.book().main_model())
}

fn text(s: &str) -> Element {
    Element::Text {
        text: s.to_string(),
    }
}

fn control(kind: TextKind, start: bool) -> Element {
    Element::Control { kind, start }
}

fn hyperlink(kind: TextKind, target: &str) -> Element {
    Element::Hyperlink {
        kind,
        target: target.to_string(),
    }
}

// ============================================================================
// Buffering
// ============================================================================

#[test]
fn test_adjacent_data_coalesces_into_one_run() {
    let mut reader = main_reader();
    reader.begin_text_paragraph();
    reader.add_data("It was ");
    reader.add_data("the best ");
    reader.add_data("of times");
    reader.end_paragraph();

    let paras = main_paragraphs(&reader);
    assert_eq!(paras.len(), 1);
    assert_eq!(paras[0].elements, vec![text("It was the best of times")]);
}

#[test]
fn test_data_is_not_written_before_flush() {
    let mut reader = main_reader();
    reader.begin_text_paragraph();
    reader.add_data("pending");
    assert!(main_paragraphs(&reader)[0].elements.is_empty());

    reader.add_control(TextKind::EMPHASIS, true);
    assert_eq!(
        main_paragraphs(&reader)[0].elements,
        vec![text("pending"), control(TextKind::EMPHASIS, true)]
    );
}

#[test]
fn test_data_outside_paragraph_is_dropped() {
    let mut reader = main_reader();
    reader.add_data("lost");
    reader.add_data_final("also lost");
    reader.begin_text_paragraph();
    reader.end_paragraph();

    assert!(main_paragraphs(&reader)[0].elements.is_empty());
}

#[test]
fn test_data_final_writes_directly_when_buffer_empty() {
    let mut reader = main_reader();
    reader.begin_text_paragraph();
    reader.add_data_final("direct");
    assert_eq!(main_paragraphs(&reader)[0].elements, vec![text("direct")]);
}

#[test]
fn test_data_final_joins_pending_buffer() {
    let mut reader = main_reader();
    reader.begin_text_paragraph();
    reader.add_data("first ");
    reader.add_data_final("second");
    assert!(main_paragraphs(&reader)[0].elements.is_empty());

    reader.end_paragraph();
    assert_eq!(main_paragraphs(&reader)[0].elements, vec![text("first second")]);
}

#[test]
fn test_markers_interleave_in_call_order() {
    let mut reader = main_reader();
    reader.begin_text_paragraph();
    reader.add_data("a");
    reader.add_control(TextKind::STRONG, true);
    reader.add_data("b");
    reader.add_fixed_space(3);
    reader.add_data("c");
    reader.add_control(TextKind::STRONG, false);
    reader.add_data("d");
    reader.end_paragraph();

    assert_eq!(
        main_paragraphs(&reader)[0].elements,
        vec![
            text("a"),
            control(TextKind::STRONG, true),
            text("b"),
            Element::FixedSpace { width: 3 },
            text("c"),
            control(TextKind::STRONG, false),
            text("d"),
        ]
    );
}

proptest! {
    #[test]
    fn prop_buffered_fragments_concatenate(parts in prop::collection::vec("[a-z ]{1,8}", 1..24)) {
        let mut reader = main_reader();
        reader.begin_text_paragraph();
        for part in &parts {
            reader.add_data(part);
        }
        reader.end_paragraph();

        let paras = main_paragraphs(&reader);
        prop_assert_eq!(paras.len(), 1);
        prop_assert_eq!(paras[0].run_count(), 1);
        prop_assert_eq!(paras[0].text(), parts.concat());
    }
}

// ============================================================================
// Paragraph lifecycle and markup scopes
// ============================================================================

#[test]
fn test_begin_paragraph_without_model_is_noop() {
    let mut reader = BookReader::new(BookModel::new());
    reader.begin_text_paragraph();
    assert!(!reader.is_paragraph_open());
    assert!(main_paragraphs(&reader).is_empty());
}

#[test]
fn test_open_kinds_replay_bottom_to_top() {
    let mut reader = main_reader();
    reader.push_kind(TextKind::EPIGRAPH);
    reader.push_kind(TextKind::EMPHASIS);
    reader.begin_text_paragraph();
    reader.add_data("quoted");
    reader.end_paragraph();

    assert_eq!(
        main_paragraphs(&reader)[0].elements,
        vec![
            control(TextKind::EPIGRAPH, true),
            control(TextKind::EMPHASIS, true),
            text("quoted"),
        ]
    );

    assert!(reader.pop_kind());
    assert!(reader.pop_kind());
    assert!(!reader.pop_kind());
}

#[test]
fn test_popped_kind_is_not_replayed() {
    let mut reader = main_reader();
    reader.push_kind(TextKind::CITE);
    reader.push_kind(TextKind::STRONG);
    reader.pop_kind();
    reader.begin_text_paragraph();
    reader.end_paragraph();

    assert_eq!(
        main_paragraphs(&reader)[0].elements,
        vec![control(TextKind::CITE, true)]
    );
}

#[test]
fn test_paragraph_kind_is_recorded() {
    let mut reader = main_reader();
    reader.begin_paragraph(ParagraphKind::EmptyLine);
    reader.end_paragraph();
    assert_eq!(main_paragraphs(&reader)[0].kind, ParagraphKind::EmptyLine);
}

#[test]
fn test_controls_outside_paragraph_are_dropped() {
    let mut reader = main_reader();
    reader.add_control(TextKind::EMPHASIS, true);
    reader.add_forced_control(ForcedControl::default());
    reader.add_fixed_space(5);
    assert!(main_paragraphs(&reader).is_empty());
}

#[test]
fn test_forced_control_is_written_in_order() {
    let mut reader = main_reader();
    let entry = ForcedControl {
        alignment: Some(Alignment::Center),
        left_indent: Some(10),
        right_indent: None,
    };
    reader.begin_text_paragraph();
    reader.add_data("x");
    reader.add_forced_control(entry);
    reader.end_paragraph();

    assert_eq!(
        main_paragraphs(&reader)[0].elements,
        vec![text("x"), Element::ForcedControl(entry)]
    );
}

#[test]
fn test_begin_paragraph_while_open_commits_pending_text_first() {
    let mut reader = main_reader();
    reader.begin_text_paragraph();
    reader.add_data("first");
    reader.begin_text_paragraph();
    reader.add_data("second");
    reader.end_paragraph();

    let paras = main_paragraphs(&reader);
    assert_eq!(paras[0].text(), "first");
    assert_eq!(paras[1].text(), "second");
}

#[test]
fn test_invalid_sequences_do_not_mutate_state() {
    let mut reader = main_reader();
    reader.end_paragraph();
    assert!(!reader.pop_kind());
    reader.end_contents_entry();

    assert!(!reader.is_paragraph_open());
    assert!(!reader.is_contents_entry_open());
    assert!(main_paragraphs(&reader).is_empty());
    assert!(reader.book().contents().is_empty());
}

// ============================================================================
// End-of-section paragraphs
// ============================================================================

#[test]
fn test_end_of_section_inserted_once() {
    let mut reader = main_reader();
    reader.begin_text_paragraph();
    reader.add_data("body");
    reader.end_paragraph();
    reader.insert_end_of_section_paragraph();
    reader.insert_end_of_section_paragraph();

    let kinds: Vec<_> = main_paragraphs(&reader).iter().map(|p| p.kind).collect();
    assert_eq!(kinds, vec![ParagraphKind::Text, ParagraphKind::EndOfSection]);
}

#[test]
fn test_end_of_section_requires_regular_content() {
    let mut reader = main_reader();
    reader.enter_title();
    reader.begin_text_paragraph();
    reader.add_data("Only a title");
    reader.end_paragraph();
    reader.exit_title();
    reader.insert_end_of_section_paragraph();

    assert_eq!(main_paragraphs(&reader).len(), 1);
}

#[test]
fn test_end_of_section_after_new_content() {
    let mut reader = main_reader();
    for body in ["one", "two"] {
        reader.begin_text_paragraph();
        reader.add_data(body);
        reader.end_paragraph();
        reader.insert_end_of_section_paragraph();
    }

    let kinds: Vec<_> = main_paragraphs(&reader).iter().map(|p| p.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ParagraphKind::Text,
            ParagraphKind::EndOfSection,
            ParagraphKind::Text,
            ParagraphKind::EndOfSection,
        ]
    );
}

#[test]
fn test_end_of_text_uses_same_policy() {
    let mut reader = main_reader();
    reader.begin_text_paragraph();
    reader.add_data_final("last words");
    reader.end_paragraph();
    reader.insert_end_of_text_paragraph();
    reader.insert_end_of_text_paragraph();

    let paras = main_paragraphs(&reader);
    assert_eq!(paras.len(), 2);
    assert_eq!(paras[1].kind, ParagraphKind::EndOfText);
}

// ============================================================================
// Hyperlinks and labels
// ============================================================================

#[test]
fn test_active_hyperlink_reopens_in_next_paragraph() {
    let mut reader = main_reader();
    reader.begin_text_paragraph();
    reader.add_hyperlink_control(TextKind::INTERNAL_HYPERLINK, "note1");
    reader.add_data("first");
    reader.end_paragraph();
    reader.begin_text_paragraph();
    reader.add_data("second");
    reader.add_control(TextKind::INTERNAL_HYPERLINK, false);
    reader.end_paragraph();
    reader.begin_text_paragraph();
    reader.end_paragraph();

    let paras = main_paragraphs(&reader);
    assert_eq!(
        paras[0].elements,
        vec![hyperlink(TextKind::INTERNAL_HYPERLINK, "note1"), text("first")]
    );
    assert_eq!(
        paras[1].elements,
        vec![
            hyperlink(TextKind::INTERNAL_HYPERLINK, "note1"),
            text("second"),
            control(TextKind::INTERNAL_HYPERLINK, false),
        ]
    );
    assert!(paras[2].elements.is_empty());
}

#[test]
fn test_hyperlink_closes_without_open_paragraph() {
    let mut reader = main_reader();
    reader.add_hyperlink_control(TextKind::EXTERNAL_HYPERLINK, "https://example.com");
    reader.add_control(TextKind::EXTERNAL_HYPERLINK, false);
    reader.begin_text_paragraph();
    reader.end_paragraph();

    assert!(main_paragraphs(&reader)[0].elements.is_empty());
}

#[test]
fn test_hyperlink_opened_outside_paragraph_applies_to_next() {
    let mut reader = main_reader();
    reader.add_hyperlink_control(TextKind::FOOTNOTE, "n1");
    reader.begin_text_paragraph();
    reader.end_paragraph();

    assert_eq!(
        main_paragraphs(&reader)[0].elements,
        vec![hyperlink(TextKind::FOOTNOTE, "n1")]
    );
}

#[test]
fn test_close_of_other_kind_keeps_hyperlink() {
    let mut reader = main_reader();
    reader.add_hyperlink_control(TextKind::FOOTNOTE, "n1");
    reader.add_control(TextKind::EMPHASIS, false);
    reader.begin_text_paragraph();
    reader.end_paragraph();

    assert_eq!(
        main_paragraphs(&reader)[0].elements,
        vec![hyperlink(TextKind::FOOTNOTE, "n1")]
    );
}

#[test]
fn test_empty_target_leaves_no_active_hyperlink() {
    let mut reader = main_reader();
    reader.add_hyperlink_control(TextKind::FOOTNOTE, "n1");
    reader.add_hyperlink_control(TextKind::INTERNAL_HYPERLINK, "");
    reader.begin_text_paragraph();
    reader.end_paragraph();

    assert!(main_paragraphs(&reader)[0].elements.is_empty());
}

#[test]
fn test_label_points_at_open_or_next_paragraph() {
    let mut reader = main_reader();
    reader.add_hyperlink_label("start");
    reader.begin_text_paragraph();
    reader.add_hyperlink_label("inside");
    reader.end_paragraph();
    reader.add_hyperlink_label("after");

    let main = reader.book().main_model();
    let label = |p| {
        Some(Label {
            model: main,
            paragraph: p,
        })
    };
    assert_eq!(reader.book().label("start"), label(0));
    assert_eq!(reader.book().label("inside"), label(0));
    assert_eq!(reader.book().label("after"), label(1));
}

#[test]
fn test_explicit_labels() {
    let mut reader = main_reader();
    reader.add_hyperlink_label_at("here", 7);
    reader.set_new_main_model();
    reader.add_hyperlink_label_in("there", 1, 3);
    reader.add_hyperlink_label_in("nowhere", 5, 0);

    let book = reader.book();
    assert_eq!(
        book.label("here"),
        Some(Label {
            model: ModelId(0),
            paragraph: 7
        })
    );
    assert_eq!(
        book.label("there"),
        Some(Label {
            model: book.main_models()[1],
            paragraph: 3
        })
    );
    assert_eq!(book.label("nowhere"), None);
}

#[test]
fn test_labels_without_model_are_dropped() {
    let mut reader = BookReader::new(BookModel::new());
    reader.add_hyperlink_label("a");
    reader.add_hyperlink_label_at("b", 0);
    assert!(reader.book().labels().is_empty());
}

// ============================================================================
// Images and spacing
// ============================================================================

#[test]
fn test_standalone_image_gets_own_paragraph() {
    let mut reader = main_reader();
    reader.add_image("cover", Image::new(vec![1, 2, 3], "image/jpeg"));
    reader.add_image_reference("cover", 0);

    assert!(!reader.is_paragraph_open());
    let paras = main_paragraphs(&reader);
    assert_eq!(paras.len(), 1);
    assert_eq!(
        paras[0].elements,
        vec![
            control(TextKind::IMAGE, true),
            Element::Image {
                id: "cover".to_string(),
                offset: 0
            },
            control(TextKind::IMAGE, false),
        ]
    );
    assert_eq!(reader.book().image("cover").unwrap().data, vec![1, 2, 3]);
}

#[test]
fn test_standalone_image_replays_open_scopes() {
    let mut reader = main_reader();
    reader.push_kind(TextKind::ANNOTATION);
    reader.add_image_reference("fig", 2);

    let paras = main_paragraphs(&reader);
    assert_eq!(
        paras[0].elements[..2],
        [
            control(TextKind::ANNOTATION, true),
            control(TextKind::IMAGE, true)
        ]
    );
}

#[test]
fn test_inline_image_flushes_text() {
    let mut reader = main_reader();
    reader.begin_text_paragraph();
    reader.add_data("before");
    reader.add_image_reference("icon", -4);
    reader.add_data("after");
    reader.end_paragraph();

    assert_eq!(
        main_paragraphs(&reader)[0].elements,
        vec![
            text("before"),
            Element::Image {
                id: "icon".to_string(),
                offset: -4
            },
            text("after"),
        ]
    );
}

#[test]
fn test_image_marks_regular_content_even_in_title() {
    let mut reader = main_reader();
    reader.enter_title();
    reader.add_image_reference("banner", 0);
    reader.exit_title();
    reader.insert_end_of_section_paragraph();

    let kinds: Vec<_> = main_paragraphs(&reader).iter().map(|p| p.kind).collect();
    assert_eq!(kinds, vec![ParagraphKind::Text, ParagraphKind::EndOfSection]);
}

#[test]
fn test_image_reference_without_model_is_dropped() {
    let mut reader = BookReader::new(BookModel::new());
    reader.add_image_reference("cover", 0);
    assert!(main_paragraphs(&reader).is_empty());
}

// ============================================================================
// Model switching
// ============================================================================

#[test]
fn test_footnote_text_goes_to_footnote_model() {
    let mut reader = main_reader();
    reader.set_footnote_model("n1");
    reader.begin_text_paragraph();
    reader.add_data("A note.");
    reader.end_paragraph();
    reader.set_main_model();

    let footnote = reader.book().find_footnote_model("n1").unwrap();
    assert_eq!(paragraphs(&reader, footnote)[0].text(), "A note.");
    assert!(main_paragraphs(&reader).is_empty());
}

#[test]
fn test_unset_model_drops_paragraphs() {
    let mut reader = main_reader();
    reader.unset_current_model();
    reader.begin_text_paragraph();
    reader.add_data("ignored");
    reader.end_paragraph();

    assert_eq!(reader.current_model(), None);
    assert!(main_paragraphs(&reader).is_empty());
}

#[test]
fn test_switch_mid_paragraph_keeps_paragraph_open() {
    let mut reader = main_reader();
    reader.begin_text_paragraph();
    reader.add_data("started in main");
    reader.set_footnote_model("n1");

    // Switching neither flushes nor closes: the pending text is committed
    // to whichever model is current when the paragraph ends.
    assert!(reader.is_paragraph_open());
    reader.end_paragraph();

    let footnote = reader.book().find_footnote_model("n1").unwrap();
    let notes = paragraphs(&reader, footnote);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].elements, vec![text("started in main")]);
    let main = main_paragraphs(&reader);
    assert_eq!(main.len(), 1);
    assert!(main[0].elements.is_empty());
}

#[test]
fn test_switch_mid_paragraph_keeps_scopes() {
    let mut reader = main_reader();
    reader.push_kind(TextKind::VERSE);
    reader.add_hyperlink_control(TextKind::INTERNAL_HYPERLINK, "x");
    reader.set_new_main_model();
    reader.begin_text_paragraph();
    reader.end_paragraph();

    let second = reader.book().main_models()[1];
    assert_eq!(
        paragraphs(&reader, second)[0].elements,
        vec![
            control(TextKind::VERSE, true),
            hyperlink(TextKind::INTERNAL_HYPERLINK, "x"),
        ]
    );
}

#[test]
fn test_into_model_commits_open_paragraph() {
    let mut reader = main_reader();
    reader.begin_text_paragraph();
    reader.add_data("unterminated");
    let book = reader.into_model();
    assert_eq!(
        book.model(book.main_model()).unwrap().paragraphs()[0].text(),
        "unterminated"
    );
}

// ============================================================================
// Contents tree
// ============================================================================

#[test]
fn test_nested_entries_get_placeholder_titles() {
    let mut reader = main_reader();
    reader.begin_contents_entry(None);
    reader.begin_contents_entry(None);
    assert!(reader.is_contents_entry_open());
    reader.end_contents_entry();
    reader.end_contents_entry();
    assert!(!reader.is_contents_entry_open());

    let contents = reader.book().contents();
    let root_children = contents.children(contents.root());
    assert_eq!(root_children.len(), 1);
    let outer = root_children[0];
    assert_eq!(contents.children(outer).len(), 1);
    let inner = contents.children(outer)[0];
    assert_eq!(contents.text(outer), Some(PLACEHOLDER_TITLE));
    assert_eq!(contents.text(inner), Some(PLACEHOLDER_TITLE));
    assert_eq!(contents.text(contents.root()), None);
}

#[test]
fn test_titles_come_from_title_data() {
    let mut reader = main_reader();
    reader.begin_contents_entry(None);
    reader.enter_title();
    reader.begin_paragraph(ParagraphKind::Text);
    reader.add_data("Chapter ");
    reader.add_data_final("One");
    reader.end_paragraph();
    reader.exit_title();
    reader.begin_text_paragraph();
    reader.add_data("Body text.");
    reader.end_paragraph();
    reader.end_contents_entry();

    let contents = reader.book().contents();
    let entry = contents.entry(0).unwrap();
    assert_eq!(contents.text(entry), Some("Chapter One"));
    assert_eq!(main_paragraphs(&reader)[0].text(), "Chapter One");
    assert_eq!(main_paragraphs(&reader)[1].text(), "Body text.");
}

#[test]
fn test_parent_title_finalized_when_child_opens() {
    let mut reader = main_reader();
    reader.begin_contents_entry(None);
    reader.add_contents_data("Part I");
    reader.begin_contents_entry(None);
    reader.add_contents_data("Chapter 1");
    reader.end_contents_entry();
    reader.end_contents_entry();

    let outline = reader.book().contents().outline();
    assert_eq!(outline[0].title, "Part I");
    assert_eq!(outline[0].children[0].title, "Chapter 1");
}

#[test]
fn test_existing_title_is_not_replaced_by_placeholder() {
    let mut reader = main_reader();
    reader.begin_contents_entry(None);
    reader.add_contents_data("Part I");
    reader.begin_contents_entry(None);
    reader.end_contents_entry();
    reader.end_contents_entry();

    let contents = reader.book().contents();
    assert_eq!(contents.text(contents.entry(0).unwrap()), Some("Part I"));
    assert_eq!(contents.text(contents.entry(1).unwrap()), Some(PLACEHOLDER_TITLE));
}

#[test]
fn test_title_data_before_first_entry_is_discarded() {
    let mut reader = main_reader();
    reader.add_contents_data("stray");
    reader.begin_contents_entry(None);
    reader.end_contents_entry();

    let contents = reader.book().contents();
    assert_eq!(contents.text(contents.entry(0).unwrap()), Some(PLACEHOLDER_TITLE));
}

#[test]
fn test_unspecified_reference_is_next_paragraph() {
    let mut reader = main_reader();
    for _ in 0..3 {
        reader.begin_text_paragraph();
        reader.add_data("filler");
        reader.end_paragraph();
    }
    reader.begin_contents_entry(None);
    reader.end_contents_entry();
    reader.begin_contents_entry(Some(1));
    reader.end_contents_entry();

    let main = reader.book().main_model();
    let contents = reader.book().contents();
    assert_eq!(
        contents.reference(contents.entry(0).unwrap()),
        Some(Reference { model: main, paragraph: 3 })
    );
    assert_eq!(
        contents.reference(contents.entry(1).unwrap()),
        Some(Reference { model: main, paragraph: 1 })
    );
}

#[test]
fn test_entries_in_footnote_model_are_ignored() {
    let mut reader = main_reader();
    reader.set_footnote_model("n1");
    reader.begin_contents_entry(None);
    assert!(!reader.is_contents_entry_open());
    assert!(reader.book().contents().is_empty());

    let footnote = reader.book().find_footnote_model("n1").unwrap();
    reader.begin_contents_entry_in(footnote, None);
    assert!(reader.is_contents_entry_open());
}

#[test]
fn test_set_reference_on_existing_entry() {
    let mut reader = main_reader();
    reader.begin_contents_entry(Some(0));
    reader.end_contents_entry();
    reader.set_reference(0, 12);
    reader.set_reference(9, 1);

    let contents = reader.book().contents();
    assert_eq!(contents.len(), 1);
    assert_eq!(
        contents.reference(contents.entry(0).unwrap()),
        Some(Reference {
            model: ModelId(0),
            paragraph: 12
        })
    );
}

#[test]
fn test_sibling_entries_under_root() {
    let mut reader = main_reader();
    for title in ["One", "Two", "Three"] {
        reader.begin_contents_entry(None);
        reader.add_contents_data(title);
        reader.end_contents_entry();
    }

    let titles: Vec<_> = reader
        .book()
        .contents()
        .outline()
        .into_iter()
        .map(|e| e.title)
        .collect();
    assert_eq!(titles, vec!["One", "Two", "Three"]);
}
