use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};
use ratatui::Frame;

use crate::model::{option_letter, Question};
use crate::state::AppState;
use crate::ui::markdown::prompt_to_lines;

/// Width of the `  (●) A. ` prefix in front of each option.
const OPTION_PREFIX: usize = 9;

/// Maps content lines to options for mouse handling.
pub struct QuestionHitMap {
    /// (first_content_line, option_index) for each option, in order.
    pub option_lines: Vec<(usize, usize)>,
    /// First line after the last option.
    pub options_end: usize,
}

impl QuestionHitMap {
    pub fn option_at(&self, content_line: usize) -> Option<usize> {
        self.option_lines
            .iter()
            .enumerate()
            .find_map(|(i, &(start, option))| {
                let end = self
                    .option_lines
                    .get(i + 1)
                    .map_or(self.options_end, |next| next.0);
                (content_line >= start && content_line < end).then_some(option)
            })
    }
}

/// Mirrors `build_lines` without styling.
pub fn compute_hit_map(state: &AppState, area: Rect) -> Option<QuestionHitMap> {
    let question = state.current_question()?;
    let mut line_count = header_and_prompt(question, area.width).len();

    line_count += 1; // blank before options
    let text_width = (area.width as usize).saturating_sub(OPTION_PREFIX);
    let mut option_lines = Vec::with_capacity(question.options.len());
    for (i, option) in question.options.iter().enumerate() {
        option_lines.push((line_count, i));
        line_count += wrap_text(option, text_width).len();
    }

    Some(QuestionHitMap {
        option_lines,
        options_end: line_count,
    })
}

fn header_and_prompt(question: &Question, width: u16) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(""), Line::from("")];
    let wrap_width = (width as usize).saturating_sub(4); // 2 indent left + 2 margin right
    for line in prompt_to_lines(&question.prompt) {
        for wline in wrap_styled_line(line, wrap_width) {
            lines.push(Line::from(
                std::iter::once(Span::raw("  "))
                    .chain(wline.spans)
                    .collect::<Vec<_>>(),
            ));
        }
    }
    lines
}

/// Wrap a styled Line at `width`, preserving span styles across breaks.
fn wrap_styled_line(line: Line<'static>, width: usize) -> Vec<Line<'static>> {
    let chars: Vec<(char, Style)> = line
        .spans
        .iter()
        .flat_map(|span| span.content.chars().map(move |c| (c, span.style)))
        .collect();
    if width == 0 || chars.len() <= width {
        return vec![line];
    }

    let mut result: Vec<Line<'static>> = Vec::new();
    let mut pos = 0;
    while pos < chars.len() {
        if chars.len() - pos <= width {
            result.push(styled_chars_to_line(&chars[pos..]));
            break;
        }
        let chunk_end = pos + width;
        let break_at = if chars[chunk_end].0 == ' ' {
            chunk_end
        } else {
            match chars[pos..chunk_end].iter().rposition(|(c, _)| *c == ' ') {
                Some(sp) if sp > 0 => pos + sp,
                _ => chunk_end,
            }
        };
        result.push(styled_chars_to_line(&chars[pos..break_at]));
        pos = break_at;
        if pos < chars.len() && chars[pos].0 == ' ' {
            pos += 1;
        }
    }
    result
}

/// Rebuild a Line from (char, style) pairs, one span per style run.
fn styled_chars_to_line(chars: &[(char, Style)]) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style = chars.first().map(|c| c.1).unwrap_or_default();

    for &(c, style) in chars {
        if style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;
        run.push(c);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }
    Line::from(spans)
}

/// Word-wrap plain text to `width` columns.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    let mut result = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            result.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() || result.is_empty() {
        result.push(current);
    }
    result
}

fn build_lines(state: &AppState, question: &Question, area: Rect) -> Vec<Line<'static>> {
    let mut lines = header_and_prompt(question, area.width);

    let idx = state.current_index();
    let bookmarked = state.session.is_bookmarked(&question.id);
    let mut header = vec![Span::styled(
        format!("  Question {} of {}", idx + 1, state.session.len()),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    if bookmarked {
        header.push(Span::styled("  ⚑ bookmarked", Style::default().fg(Color::Yellow)));
    }
    lines[0] = Line::from(header);

    lines.push(Line::from(""));
    if question.options.is_empty() {
        lines.push(Line::from(Span::styled(
            "  (this question has no options)",
            Style::default().fg(Color::DarkGray),
        )));
        return lines;
    }

    let selected = state.session.answer_for(&question.id);
    let text_width = (area.width as usize).saturating_sub(OPTION_PREFIX);
    for (i, option) in question.options.iter().enumerate() {
        let is_selected = selected == Some(i);
        let radio = if is_selected { "(●)" } else { "( )" };
        let letter = option_letter(i).unwrap_or('?');
        let style = if is_selected {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };

        let prefix = format!("  {} {}. ", radio, letter);
        for (li, wline) in wrap_text(option, text_width).into_iter().enumerate() {
            let lead = if li == 0 {
                prefix.clone()
            } else {
                " ".repeat(OPTION_PREFIX)
            };
            lines.push(Line::from(vec![
                Span::styled(lead, style),
                Span::styled(wline, style),
            ]));
        }
    }
    lines
}

pub fn draw_question(f: &mut Frame, area: Rect, state: &AppState) {
    let Some(question) = state.current_question() else {
        let p = Paragraph::new("No questions").block(Block::default().borders(Borders::ALL));
        f.render_widget(p, area);
        return;
    };

    let lines = build_lines(state, question, area);

    // Apply scroll with clamping
    let total_content_lines = lines.len();
    let visible_height = area.height as usize;
    let scroll = state
        .question_scroll
        .min(total_content_lines.saturating_sub(visible_height));
    let display_lines: Vec<Line> = lines.into_iter().skip(scroll).collect();

    f.render_widget(Paragraph::new(display_lines), area);

    if total_content_lines > visible_height {
        let mut scrollbar_state = ScrollbarState::new(total_content_lines)
            .position(scroll)
            .viewport_content_length(visible_height);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight);
        f.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_text_breaks_on_words() {
        assert_eq!(
            wrap_text("alpha beta gamma", 10),
            vec!["alpha beta".to_string(), "gamma".to_string()]
        );
    }

    #[test]
    fn hit_map_spans_wrapped_options() {
        let map = QuestionHitMap {
            option_lines: vec![(4, 0), (6, 1)],
            options_end: 7,
        };
        assert_eq!(map.option_at(3), None);
        assert_eq!(map.option_at(5), Some(0));
        assert_eq!(map.option_at(6), Some(1));
        assert_eq!(map.option_at(7), None);
    }
}
