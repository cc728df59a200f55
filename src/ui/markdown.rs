use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Renders a question prompt. Prompts are mostly plain text with the odd
/// inline code span, emphasis or fenced snippet; anything fancier is shown
/// as its text.
pub fn prompt_to_lines(text: &str) -> Vec<Line<'static>> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);

    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut styles: Vec<Style> = vec![Style::default()];
    let mut in_code_block = false;

    let flush = |spans: &mut Vec<Span<'static>>, lines: &mut Vec<Line<'static>>| {
        if !spans.is_empty() {
            lines.push(Line::from(std::mem::take(spans)));
        }
    };

    for event in Parser::new_ext(text, opts) {
        match event {
            Event::End(TagEnd::Paragraph) | Event::End(TagEnd::Heading(_)) => {
                flush(&mut spans, &mut lines);
                lines.push(Line::from(""));
            }
            Event::Start(Tag::Strong) => {
                let top = styles.last().copied().unwrap_or_default();
                styles.push(top.add_modifier(Modifier::BOLD));
            }
            Event::Start(Tag::Emphasis) => {
                let top = styles.last().copied().unwrap_or_default();
                styles.push(top.add_modifier(Modifier::ITALIC));
            }
            Event::Start(Tag::Strikethrough) => {
                let top = styles.last().copied().unwrap_or_default();
                styles.push(top.add_modifier(Modifier::CROSSED_OUT));
            }
            Event::End(TagEnd::Strong)
            | Event::End(TagEnd::Emphasis)
            | Event::End(TagEnd::Strikethrough) => {
                if styles.len() > 1 {
                    styles.pop();
                }
            }
            Event::Start(Tag::Item) => {
                flush(&mut spans, &mut lines);
                spans.push(Span::raw("• "));
            }
            Event::End(TagEnd::Item) => flush(&mut spans, &mut lines),
            Event::End(TagEnd::List(_)) => lines.push(Line::from("")),
            Event::Start(Tag::CodeBlock(_)) => {
                flush(&mut spans, &mut lines);
                in_code_block = true;
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                lines.push(Line::from(""));
            }
            Event::Text(t) if in_code_block => {
                for code_line in t.lines() {
                    lines.push(Line::from(Span::styled(
                        format!("  {}", code_line),
                        Style::default().fg(Color::Green),
                    )));
                }
            }
            Event::Text(t) => {
                let style = styles.last().copied().unwrap_or_default();
                spans.push(Span::styled(t.into_string(), style));
            }
            Event::Code(code) => {
                spans.push(Span::styled(
                    code.into_string(),
                    Style::default().fg(Color::Yellow),
                ));
            }
            Event::SoftBreak | Event::HardBreak => flush(&mut spans, &mut lines),
            Event::Rule => {
                lines.push(Line::from(Span::styled(
                    "─".repeat(40),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            _ => {}
        }
    }
    flush(&mut spans, &mut lines);

    while lines.last().is_some_and(|l| l.spans.is_empty()) {
        lines.pop();
    }
    if lines.is_empty() {
        lines.push(Line::from(text.to_string()));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(lines: &[Line<'static>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn inline_code_keeps_its_text() {
        let lines = prompt_to_lines("What does `typeof null` return?");
        assert_eq!(plain(&lines), vec!["What does typeof null return?"]);
    }

    #[test]
    fn fenced_block_becomes_indented_lines() {
        let lines = prompt_to_lines("Output?\n\n```\nint x = 1;\ncout << x;\n```");
        assert_eq!(
            plain(&lines),
            vec!["Output?", "", "  int x = 1;", "  cout << x;"]
        );
    }
}
