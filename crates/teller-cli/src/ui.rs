//! Terminal presentation of rendered transcripts

use teller_chat::Role;
use teller_render::{DisplayBlock, RenderedMessage, Span, SpanStyle};

const BOLD: &str = "\x1b[1m";
const ITALIC: &str = "\x1b[3m";
const RESET: &str = "\x1b[0m";

/// Print one rendered message with a role prefix
pub fn print_message(message: &RenderedMessage) {
    let prefix = match message.role {
        Role::User => "you",
        Role::Assistant => "assistant",
    };
    println!("{}{}{}", BOLD, prefix, RESET);
    for block in &message.blocks {
        print_block(block);
    }
    println!();
}

fn print_block(block: &DisplayBlock) {
    match block {
        DisplayBlock::Paragraph(spans) => println!("  {}", format_spans(spans)),
        DisplayBlock::BulletList(items) => {
            for item in items {
                println!("  • {}", format_spans(item));
            }
        }
    }
}

/// Render spans with ANSI styling
fn format_spans(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| match span.style {
            SpanStyle::Plain => span.text.clone(),
            SpanStyle::Strong => format!("{}{}{}", BOLD, span.text, RESET),
            SpanStyle::Emphasis => format!("{}{}{}", ITALIC, span.text, RESET),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_plain_spans() {
        let spans = vec![Span::plain("hello "), Span::plain("world")];
        assert_eq!(format_spans(&spans), "hello world");
    }

    #[test]
    fn test_format_strong_span() {
        let spans = vec![
            Span::plain("balance: "),
            Span::styled("$500", SpanStyle::Strong),
        ];
        assert_eq!(format_spans(&spans), "balance: \x1b[1m$500\x1b[0m");
    }
}
