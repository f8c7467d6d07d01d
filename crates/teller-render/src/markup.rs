//! Allow-listed markup transform for assistant text
//!
//! Assistant replies come from a remote service and are untrusted. Only
//! paragraphs, unordered lists, and emphasis/strong spans survive as
//! structure; every other construct (headings, code, links, raw HTML,
//! ordered lists, block quotes) is flattened to inert text.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use teller_chat::{Role, Snapshot};

use crate::blocks::{DisplayBlock, RenderedMessage, RenderedTranscript, Span, SpanStyle};

/// Map a conversation snapshot to display form.
///
/// Pure function of the snapshot: no I/O, no memory of previous renders.
pub fn render(snapshot: &Snapshot) -> RenderedTranscript {
    let messages = snapshot
        .messages
        .iter()
        .map(|message| RenderedMessage {
            role: message.role,
            blocks: match message.role {
                Role::User => render_plain(&message.text),
                Role::Assistant => render_markup(&message.text),
            },
        })
        .collect();

    RenderedTranscript {
        messages,
        awaiting_reply: snapshot.awaiting_reply,
    }
}

/// User text is displayed verbatim, never interpreted as markup
fn render_plain(text: &str) -> Vec<DisplayBlock> {
    vec![DisplayBlock::Paragraph(vec![Span::plain(text)])]
}

/// Append text to the current span run, merging adjacent runs of one style
fn push_span(spans: &mut Vec<Span>, text: &str, style: SpanStyle) {
    if text.is_empty() {
        return;
    }
    if let Some(last) = spans.last_mut() {
        if last.style == style {
            last.text.push_str(text);
            return;
        }
    }
    spans.push(Span::styled(text, style));
}

/// Flush the current span run as a paragraph block
fn flush_paragraph(blocks: &mut Vec<DisplayBlock>, spans: &mut Vec<Span>) {
    if !spans.is_empty() {
        blocks.push(DisplayBlock::Paragraph(std::mem::take(spans)));
    }
}

/// Drop trailing whitespace from the current span run
fn trim_trailing(spans: &mut Vec<Span>) {
    while let Some(last) = spans.last_mut() {
        let trimmed_len = last.text.trim_end().len();
        if trimmed_len == last.text.len() {
            break;
        }
        if trimmed_len == 0 {
            spans.pop();
        } else {
            last.text.truncate(trimmed_len);
            break;
        }
    }
}

/// Finish a list item. Items under an unordered list become bullets;
/// ordered-list items are neutralized to plain paragraphs.
fn finish_item(
    blocks: &mut Vec<DisplayBlock>,
    items: &mut Vec<Vec<Span>>,
    spans: &mut Vec<Span>,
    list_stack: &[bool],
) {
    trim_trailing(spans);
    if spans.is_empty() {
        return;
    }
    let in_unordered = list_stack.iter().any(|&ordered| !ordered);
    if in_unordered {
        items.push(std::mem::take(spans));
    } else {
        blocks.push(DisplayBlock::Paragraph(std::mem::take(spans)));
    }
}

/// Walk the markup events, keeping the allow-listed subset as structure and
/// flattening everything else to plain spans.
pub fn render_markup(text: &str) -> Vec<DisplayBlock> {
    let mut blocks: Vec<DisplayBlock> = Vec::new();
    let mut spans: Vec<Span> = Vec::new();
    let mut items: Vec<Vec<Span>> = Vec::new();
    // `true` entries are ordered lists (disallowed as structure)
    let mut list_stack: Vec<bool> = Vec::new();
    let mut emphasis = 0usize;
    let mut strong = 0usize;
    // Inside a heading, inline styles are dropped along with the heading
    let mut heading = 0usize;
    let mut in_code_block = false;
    let mut code_buf = String::new();

    let current_style = |emphasis: usize, strong: usize, heading: usize| {
        if heading > 0 {
            SpanStyle::Plain
        } else if strong > 0 {
            SpanStyle::Strong
        } else if emphasis > 0 {
            SpanStyle::Emphasis
        } else {
            SpanStyle::Plain
        }
    };

    // Default parser: no extensions, so tables, strikethrough and footnotes
    // already arrive as literal text.
    for event in Parser::new(text) {
        match event {
            Event::Start(tag) => match tag {
                Tag::Paragraph => {
                    if list_stack.is_empty() {
                        flush_paragraph(&mut blocks, &mut spans);
                    }
                }
                Tag::Heading { .. } => {
                    if list_stack.is_empty() {
                        flush_paragraph(&mut blocks, &mut spans);
                    } else {
                        finish_item(&mut blocks, &mut items, &mut spans, &list_stack);
                    }
                    heading += 1;
                }
                Tag::CodeBlock(_) => {
                    in_code_block = true;
                    code_buf.clear();
                }
                Tag::List(start) => {
                    // A nested list closes the text collected for the
                    // enclosing item so far.
                    if !list_stack.is_empty() {
                        finish_item(&mut blocks, &mut items, &mut spans, &list_stack);
                    } else {
                        flush_paragraph(&mut blocks, &mut spans);
                    }
                    list_stack.push(start.is_some());
                }
                Tag::Item => {}
                Tag::Emphasis => emphasis += 1,
                Tag::Strong => strong += 1,
                // Links and images keep their text, lose their destination
                _ => {}
            },
            Event::End(tag_end) => match tag_end {
                TagEnd::Paragraph => {
                    if list_stack.is_empty() {
                        flush_paragraph(&mut blocks, &mut spans);
                    } else {
                        // Separate loose-item paragraphs with a space
                        push_span(&mut spans, " ", SpanStyle::Plain);
                    }
                }
                TagEnd::Heading(_) => {
                    if list_stack.is_empty() {
                        flush_paragraph(&mut blocks, &mut spans);
                    } else {
                        // Keep heading text inside the surrounding list so
                        // item order is preserved
                        finish_item(&mut blocks, &mut items, &mut spans, &list_stack);
                    }
                    heading = heading.saturating_sub(1);
                }
                TagEnd::CodeBlock => {
                    in_code_block = false;
                    let code = code_buf.trim_end_matches('\n');
                    if !code.is_empty() {
                        if list_stack.is_empty() {
                            flush_paragraph(&mut blocks, &mut spans);
                            blocks.push(DisplayBlock::Paragraph(vec![Span::plain(code)]));
                        } else {
                            push_span(&mut spans, code, SpanStyle::Plain);
                        }
                    }
                }
                TagEnd::List(_) => {
                    list_stack.pop();
                    if list_stack.is_empty() && !items.is_empty() {
                        blocks.push(DisplayBlock::BulletList(std::mem::take(&mut items)));
                    }
                }
                TagEnd::Item => {
                    finish_item(&mut blocks, &mut items, &mut spans, &list_stack);
                }
                TagEnd::Emphasis => emphasis = emphasis.saturating_sub(1),
                TagEnd::Strong => strong = strong.saturating_sub(1),
                TagEnd::HtmlBlock => {
                    if list_stack.is_empty() {
                        flush_paragraph(&mut blocks, &mut spans);
                    }
                }
                _ => {}
            },
            Event::Text(t) => {
                if in_code_block {
                    code_buf.push_str(&t);
                } else {
                    push_span(&mut spans, &t, current_style(emphasis, strong, heading));
                }
            }
            // Inline code is inert text, no code primitive exists
            Event::Code(code) => push_span(&mut spans, &code, SpanStyle::Plain),
            // Raw HTML is emitted as a literal span, never as structure
            Event::Html(html) | Event::InlineHtml(html) => {
                push_span(&mut spans, html.trim_end_matches('\n'), SpanStyle::Plain);
            }
            Event::SoftBreak | Event::HardBreak => {
                push_span(&mut spans, " ", current_style(emphasis, strong, heading));
            }
            Event::Rule => flush_paragraph(&mut blocks, &mut spans),
            _ => {}
        }
    }

    flush_paragraph(&mut blocks, &mut spans);
    if !items.is_empty() {
        blocks.push(DisplayBlock::BulletList(items));
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use teller_chat::Message;

    fn snapshot_of(messages: Vec<Message>, awaiting_reply: bool) -> Snapshot {
        Snapshot {
            messages,
            awaiting_reply,
        }
    }

    fn all_text(blocks: &[DisplayBlock]) -> String {
        blocks.iter().map(|b| b.text()).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn test_plain_sentence() {
        let blocks = render_markup("Hello there.");
        assert_eq!(
            blocks,
            vec![DisplayBlock::Paragraph(vec![Span::plain("Hello there.")])]
        );
    }

    #[test]
    fn test_strong_span() {
        let blocks = render_markup("Your balance is **$500**");
        assert_eq!(
            blocks,
            vec![DisplayBlock::Paragraph(vec![
                Span::plain("Your balance is "),
                Span::styled("$500", SpanStyle::Strong),
            ])]
        );
    }

    #[test]
    fn test_emphasis_span() {
        let blocks = render_markup("a *quiet* word");
        assert_eq!(
            blocks,
            vec![DisplayBlock::Paragraph(vec![
                Span::plain("a "),
                Span::styled("quiet", SpanStyle::Emphasis),
                Span::plain(" word"),
            ])]
        );
    }

    #[test]
    fn test_two_paragraphs() {
        let blocks = render_markup("first\n\nsecond");
        assert_eq!(
            blocks,
            vec![
                DisplayBlock::Paragraph(vec![Span::plain("first")]),
                DisplayBlock::Paragraph(vec![Span::plain("second")]),
            ]
        );
    }

    #[test]
    fn test_soft_break_is_a_space() {
        let blocks = render_markup("line one\nline two");
        assert_eq!(
            blocks,
            vec![DisplayBlock::Paragraph(vec![Span::plain(
                "line one line two"
            )])]
        );
    }

    #[test]
    fn test_unordered_list() {
        let blocks = render_markup("- savings\n- checking");
        assert_eq!(
            blocks,
            vec![DisplayBlock::BulletList(vec![
                vec![Span::plain("savings")],
                vec![Span::plain("checking")],
            ])]
        );
    }

    #[test]
    fn test_list_item_with_strong() {
        let blocks = render_markup("- rate: **3.5%**");
        assert_eq!(
            blocks,
            vec![DisplayBlock::BulletList(vec![vec![
                Span::plain("rate: "),
                Span::styled("3.5%", SpanStyle::Strong),
            ]])]
        );
    }

    #[test]
    fn test_paragraph_then_list() {
        let blocks = render_markup("We offer:\n\n- loans\n- savings");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(blocks[0], DisplayBlock::Paragraph(_)));
        assert!(matches!(blocks[1], DisplayBlock::BulletList(_)));
    }

    #[test]
    fn test_heading_neutralized_to_paragraph() {
        let blocks = render_markup("# Account summary");
        assert_eq!(
            blocks,
            vec![DisplayBlock::Paragraph(vec![Span::plain("Account summary")])]
        );
    }

    #[test]
    fn test_heading_inside_list_item_keeps_list_order() {
        let blocks = render_markup("- first\n  # second\n- third");
        assert_eq!(
            blocks,
            vec![DisplayBlock::BulletList(vec![
                vec![Span::plain("first")],
                vec![Span::plain("second")],
                vec![Span::plain("third")],
            ])]
        );
    }

    #[test]
    fn test_ordered_list_neutralized() {
        let blocks = render_markup("1. first\n2. second");
        assert!(
            blocks.iter().all(|b| matches!(b, DisplayBlock::Paragraph(_))),
            "ordered lists must not become list structure: {:?}",
            blocks
        );
        let text = all_text(&blocks);
        assert!(text.contains("first"));
        assert!(text.contains("second"));
    }

    #[test]
    fn test_link_destination_dropped() {
        let blocks = render_markup("see [your account](http://evil.example/steal) now");
        let text = all_text(&blocks);
        assert!(text.contains("your account"));
        assert!(!text.contains("evil.example"));
    }

    #[test]
    fn test_inline_html_is_literal_text() {
        let blocks = render_markup("hello <b>world</b>");
        assert_eq!(
            blocks,
            vec![DisplayBlock::Paragraph(vec![Span::plain(
                "hello <b>world</b>"
            )])]
        );
    }

    #[test]
    fn test_script_block_is_inert() {
        let blocks = render_markup("<script>alert('x')</script>");
        // Only text primitives come out; the tag text survives as inert text
        assert!(blocks.iter().all(|b| matches!(b, DisplayBlock::Paragraph(_))));
        let text = all_text(&blocks);
        assert!(text.contains("<script>alert('x')</script>"));
    }

    #[test]
    fn test_code_is_plain_text() {
        let blocks = render_markup("run `transfer()` or:\n\n```\nwire $100\n```");
        let text = all_text(&blocks);
        assert!(text.contains("transfer()"));
        assert!(text.contains("wire $100"));
        let spans_styled = blocks.iter().any(|b| match b {
            DisplayBlock::Paragraph(spans) => spans.iter().any(|s| s.style != SpanStyle::Plain),
            DisplayBlock::BulletList(items) => items
                .iter()
                .any(|item| item.iter().any(|s| s.style != SpanStyle::Plain)),
        });
        assert!(!spans_styled);
    }

    #[test]
    fn test_image_destination_dropped() {
        let blocks = render_markup("![statement](http://evil.example/p.png)");
        let text = all_text(&blocks);
        assert!(!text.contains("evil.example"));
        assert!(text.contains("statement"));
    }

    #[test]
    fn test_render_user_text_verbatim() {
        let snapshot = snapshot_of(vec![Message::user("not **bold**, just *text*")], false);
        let transcript = render(&snapshot);
        assert_eq!(
            transcript.messages[0].blocks,
            vec![DisplayBlock::Paragraph(vec![Span::plain(
                "not **bold**, just *text*"
            )])]
        );
    }

    #[test]
    fn test_render_assistant_text_formatted() {
        let snapshot = snapshot_of(vec![Message::assistant("a **b**")], false);
        let transcript = render(&snapshot);
        assert_eq!(
            transcript.messages[0].blocks,
            vec![DisplayBlock::Paragraph(vec![
                Span::plain("a "),
                Span::styled("b", SpanStyle::Strong),
            ])]
        );
    }

    #[test]
    fn test_render_is_idempotent() {
        let snapshot = snapshot_of(
            vec![
                Message::assistant("Hello! How can I help?"),
                Message::user("balance"),
                Message::assistant("- checking: **$500**\n- savings: **$1,200**"),
            ],
            true,
        );
        let first = render(&snapshot);
        let second = render(&snapshot);
        assert_eq!(first, second);
    }

    #[test]
    fn test_awaiting_reply_mirrored() {
        let snapshot = snapshot_of(vec![Message::user("hi")], true);
        assert!(render(&snapshot).awaiting_reply);
    }

    #[test]
    fn test_preserves_message_order_and_roles() {
        let snapshot = snapshot_of(
            vec![
                Message::assistant("greeting"),
                Message::user("question"),
                Message::assistant("answer"),
            ],
            false,
        );
        let transcript = render(&snapshot);
        let roles: Vec<Role> = transcript.messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::Assistant, Role::User, Role::Assistant]);
    }

    #[test]
    fn test_empty_assistant_text() {
        assert!(render_markup("").is_empty());
    }
}
