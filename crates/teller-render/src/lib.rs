//! teller-render: safe display mapping for chat transcripts
//!
//! Maps conversation snapshots to display primitives. Assistant text is
//! parsed with an allow-list (paragraphs, unordered lists, emphasis);
//! everything else is flattened to inert text. User text is never parsed.

pub mod blocks;
pub mod markup;

pub use blocks::{DisplayBlock, RenderedMessage, RenderedTranscript, Span, SpanStyle};
pub use markup::render;
