//! Plain-text rendering of a book model.
//!
//! The output is deterministic (models in creation order, labels and images
//! sorted by name) so it can be diffed between runs:
//!
//! ```text
//! == main 0 (2 paragraphs)
//! [0] text: <1>"Chapter One"</1>
//! [1] end_of_section:
//! == contents
//! - Chapter One -> 0:0
//! ```

use std::fmt::Write;

use crate::model::{
    BookModel, Element, ForcedControl, ModelRole, OutlineEntry, ParagraphKind, Reference,
};

/// Render `book` as a human-readable outline.
pub fn render(book: &BookModel) -> String {
    let mut out = String::new();

    for (_, model) in book.models() {
        let heading = match model.role() {
            ModelRole::Main(index) => format!("main {index}"),
            ModelRole::Footnote(id) => format!("footnote {id}"),
        };
        let _ = writeln!(out, "== {heading} ({} paragraphs)", model.paragraph_count());
        for (index, paragraph) in model.paragraphs().iter().enumerate() {
            let _ = write!(out, "[{index}] {}:", paragraph_kind_name(paragraph.kind));
            if !paragraph.elements.is_empty() {
                out.push(' ');
            }
            for element in &paragraph.elements {
                render_element(&mut out, element);
            }
            out.push('\n');
        }
    }

    let outline = book.contents().outline();
    if !outline.is_empty() {
        out.push_str("== contents\n");
        render_outline(&mut out, &outline, 0);
    }

    if !book.labels().is_empty() {
        out.push_str("== labels\n");
        let mut labels: Vec<_> = book.labels().iter().collect();
        labels.sort_by(|a, b| a.0.cmp(b.0));
        for (name, label) in labels {
            let _ = writeln!(out, "{name} -> {}:{}", label.model.0, label.paragraph);
        }
    }

    if !book.images().is_empty() {
        out.push_str("== images\n");
        let mut images: Vec<_> = book.images().iter().collect();
        images.sort_by(|a, b| a.0.cmp(b.0));
        for (id, image) in images {
            let _ = writeln!(out, "{id}: {} ({} bytes)", image.media_type, image.data.len());
        }
    }

    out
}

fn paragraph_kind_name(kind: ParagraphKind) -> &'static str {
    match kind {
        ParagraphKind::Text => "text",
        ParagraphKind::Tree => "tree",
        ParagraphKind::EmptyLine => "empty_line",
        ParagraphKind::BeforeSkip => "before_skip",
        ParagraphKind::AfterSkip => "after_skip",
        ParagraphKind::EndOfSection => "end_of_section",
        ParagraphKind::EndOfText => "end_of_text",
    }
}

fn render_element(out: &mut String, element: &Element) {
    let _ = match element {
        Element::Text { text } => write!(out, "{text:?}"),
        Element::Control { kind, start: true } => write!(out, "<{}>", kind.0),
        Element::Control { kind, start: false } => write!(out, "</{}>", kind.0),
        Element::ForcedControl(entry) => write!(out, "[{}]", forced_control_summary(entry)),
        Element::Hyperlink { kind, target } => write!(out, "<a{} {target:?}>", kind.0),
        Element::Image { id, offset } => write!(out, "[image {id}@{offset}]"),
        Element::FixedSpace { width } => write!(out, "[space {width}]"),
    };
}

fn forced_control_summary(entry: &ForcedControl) -> String {
    let mut parts = Vec::new();
    if let Some(alignment) = entry.alignment {
        parts.push(format!("align={alignment:?}").to_lowercase());
    }
    if let Some(indent) = entry.left_indent {
        parts.push(format!("left={indent}"));
    }
    if let Some(indent) = entry.right_indent {
        parts.push(format!("right={indent}"));
    }
    if parts.is_empty() {
        "forced".to_string()
    } else {
        format!("forced {}", parts.join(" "))
    }
}

fn render_outline(out: &mut String, entries: &[OutlineEntry], depth: usize) {
    for entry in entries {
        let _ = write!(out, "{}- {}", "  ".repeat(depth), entry.title);
        if let Some(Reference { model, paragraph }) = entry.reference {
            let _ = write!(out, " -> {}:{paragraph}", model.0);
        }
        out.push('\n');
        render_outline(out, &entry.children, depth + 1);
    }
}
