//! Intermediate layout model for the report body.
//!
//! The markdown summary is walked once into a flat list of [`Block`]s, and
//! both renderers (the terminal report view and the PDF export) consume that
//! same list. This keeps the two rendering targets from drifting apart.

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

/// Block-level node kinds the report body can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Heading with depth 1..=3. Deeper headings clamp to 3.
    Heading(u8),
    Paragraph,
    ListItem,
}

/// One block-level node with its flattened text content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub text: String,
}

/// Walk the block-level nodes of a markdown string.
///
/// Inline markup (emphasis, code spans) is flattened to plain text; soft and
/// hard breaks become spaces. Empty blocks are dropped.
pub fn parse_blocks(markdown: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current: Option<BlockKind> = None;
    let mut text = String::new();

    let mut flush = |kind: Option<BlockKind>, text: &mut String| {
        if let Some(kind) = kind {
            let content = match kind {
                BlockKind::Heading(_) => strip_attr_suffix(text.trim()),
                _ => text.trim(),
            };
            if !content.is_empty() {
                blocks.push(Block {
                    kind,
                    text: content.to_string(),
                });
            }
        }
        text.clear();
    };

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                flush(current.take(), &mut text);
                current = Some(BlockKind::Heading(heading_depth(level)));
            }
            Event::Start(Tag::Item) => {
                flush(current.take(), &mut text);
                current = Some(BlockKind::ListItem);
            }
            // Paragraphs inside list items (loose lists) stay part of the item.
            Event::Start(Tag::Paragraph) if current.is_none() => {
                current = Some(BlockKind::Paragraph);
            }
            Event::End(TagEnd::Heading(_)) | Event::End(TagEnd::Item) => {
                flush(current.take(), &mut text);
            }
            Event::End(TagEnd::Paragraph) => {
                if current == Some(BlockKind::Paragraph) {
                    flush(current.take(), &mut text);
                }
            }
            Event::Text(t) | Event::Code(t) => {
                if current.is_some() {
                    text.push_str(&t);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if current.is_some() {
                    text.push(' ');
                }
            }
            _ => {}
        }
    }
    flush(current.take(), &mut text);

    blocks
}

fn heading_depth(level: HeadingLevel) -> u8 {
    (level as u8).min(3)
}

/// Strip a trailing pandoc-style attribute marker such as `{.h1}`.
///
/// The webhook emits these on headings for its own web styling; they carry no
/// meaning here.
fn strip_attr_suffix(text: &str) -> &str {
    if let Some(idx) = text.rfind('{') {
        if text.ends_with('}') {
            return text[..idx].trim_end();
        }
    }
    text
}

/// Greedy word wrap to `max_chars` columns.
///
/// Words longer than the column are split hard so no line ever exceeds the
/// column width.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if word_len > max_chars {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(max_chars) {
                lines.push(chunk.iter().collect());
            }
            continue;
        }
        let needed = if line.is_empty() { word_len } else { word_len + 1 };
        if line_len + needed > max_chars {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if !line.is_empty() {
            line.push(' ');
            line_len += 1;
        }
        line.push_str(word);
        line_len += word_len;
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Render blocks as plain terminal text — the report view's body.
pub fn render_plain(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        if !out.is_empty() {
            out.push('\n');
        }
        match block.kind {
            BlockKind::Heading(1) => {
                out.push_str(&block.text);
                out.push('\n');
                out.push_str(&"=".repeat(block.text.chars().count()));
                out.push('\n');
            }
            BlockKind::Heading(2) => {
                out.push_str(&block.text);
                out.push('\n');
                out.push_str(&"-".repeat(block.text.chars().count()));
                out.push('\n');
            }
            BlockKind::Heading(_) => {
                out.push_str(&block.text);
                out.push('\n');
            }
            BlockKind::Paragraph => {
                for line in wrap_text(&block.text, 80) {
                    out.push_str(&line);
                    out.push('\n');
                }
            }
            BlockKind::ListItem => {
                let lines = wrap_text(&block.text, 78);
                for (i, line) in lines.iter().enumerate() {
                    if i == 0 {
                        out.push_str("• ");
                    } else {
                        out.push_str("  ");
                    }
                    out.push_str(line);
                    out.push('\n');
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_depths_map_to_tiers() {
        let blocks = parse_blocks("# One\n\n## Two\n\n### Three\n\nBody text.");
        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[0].kind, BlockKind::Heading(1));
        assert_eq!(blocks[0].text, "One");
        assert_eq!(blocks[1].kind, BlockKind::Heading(2));
        assert_eq!(blocks[2].kind, BlockKind::Heading(3));
        assert_eq!(blocks[3].kind, BlockKind::Paragraph);
    }

    #[test]
    fn deep_headings_clamp_to_three() {
        let blocks = parse_blocks("##### Deep");
        assert_eq!(blocks[0].kind, BlockKind::Heading(3));
    }

    #[test]
    fn list_items_flatten() {
        let blocks = parse_blocks("- first\n- second item\n");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].kind, BlockKind::ListItem);
        assert_eq!(blocks[0].text, "first");
        assert_eq!(blocks[1].text, "second item");
    }

    #[test]
    fn attr_suffix_is_stripped() {
        let blocks =
            parse_blocks("## AI Solutions Report {.h1}\n\n### 1st. Task Agent {.h2}");
        assert_eq!(blocks[0].text, "AI Solutions Report");
        assert_eq!(blocks[1].text, "1st. Task Agent");
    }

    #[test]
    fn inline_markup_flattens_to_text() {
        let blocks = parse_blocks("Some **bold** and *italic* and `code`.");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "Some bold and italic and code.");
    }

    #[test]
    fn soft_breaks_become_spaces() {
        let blocks = parse_blocks("line one\nline two");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "line one line two");
    }

    #[test]
    fn wrap_text_respects_column() {
        let lines = wrap_text("the quick brown fox jumps over the lazy dog", 10);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
        assert_eq!(lines.join(" "), "the quick brown fox jumps over the lazy dog");
    }

    #[test]
    fn wrap_text_splits_overlong_words() {
        let lines = wrap_text("abcdefghijklmnop", 5);
        assert_eq!(lines, vec!["abcde", "fghij", "klmno", "p"]);
    }

    #[test]
    fn wrap_text_empty_input() {
        assert!(wrap_text("   ", 10).is_empty());
    }

    #[test]
    fn render_plain_underlines_top_headings() {
        let blocks = parse_blocks("# Title\n\nBody.\n\n- item");
        let text = render_plain(&blocks);
        assert!(text.contains("Title\n====="));
        assert!(text.contains("Body."));
        assert!(text.contains("• item"));
    }
}
