//! Display primitives produced by the render pipeline

use teller_chat::Role;

/// Inline styling for a run of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanStyle {
    Plain,
    Emphasis,
    Strong,
}

/// A styled run of inert text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

impl Span {
    /// Create an unstyled span
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: SpanStyle::Plain,
        }
    }

    /// Create a styled span
    pub fn styled(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// A block-level display element.
///
/// This is the whole vocabulary the pipeline can emit. There is
/// deliberately no primitive for links, raw markup, or embedded structure,
/// so disallowed constructs cannot be expressed in the output type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayBlock {
    /// A run of styled text
    Paragraph(Vec<Span>),
    /// An unordered list; each item is a run of styled text
    BulletList(Vec<Vec<Span>>),
}

impl DisplayBlock {
    /// All text in this block, concatenated. Handy for assertions and
    /// plain-text surfaces.
    pub fn text(&self) -> String {
        match self {
            DisplayBlock::Paragraph(spans) => spans.iter().map(|s| s.text.as_str()).collect(),
            DisplayBlock::BulletList(items) => items
                .iter()
                .flat_map(|item| item.iter().map(|s| s.text.as_str()))
                .collect(),
        }
    }
}

/// One transcript entry mapped to display form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub role: Role,
    pub blocks: Vec<DisplayBlock>,
}

/// A whole snapshot mapped to display form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTranscript {
    pub messages: Vec<RenderedMessage>,
    /// Mirrors the snapshot flag so hosts can show a typing indicator
    pub awaiting_reply: bool,
}
