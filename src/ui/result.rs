use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};
use ratatui::Frame;

use crate::model::option_letter;
use crate::report::format_hms;
use crate::session::SubmitReason;
use crate::state::AppState;

fn letter(idx: Option<usize>) -> String {
    match idx {
        Some(i) => option_letter(i).map_or_else(|| (i + 1).to_string(), |c| c.to_string()),
        None => "-".to_string(),
    }
}

fn summary_lines(state: &AppState) -> Vec<Line<'static>> {
    let headline = match state.session.submit_reason() {
        Some(SubmitReason::Expired) => ("⏰ Time's up! Quiz submitted", Color::Yellow),
        _ => ("✓ Quiz submitted", Color::Green),
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            headline.0,
            Style::default().fg(headline.1).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if let Some(score) = state.score() {
        lines.push(Line::from(Span::styled(
            format!(
                "Score: {} / {}  ({:.0}%)",
                score.correct_count,
                score.total,
                score.percent()
            ),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
    }

    let counts = state.status_counts();
    lines.push(Line::from(format!(
        "Answered {} of {}  ·  {} bookmarked  ·  time used {}",
        counts.answered,
        state.session.len(),
        counts.bookmarked,
        format_hms(state.session.elapsed_secs())
    )));

    if let Some(status) = &state.export_status {
        lines.push(Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));
    lines
}

fn review_lines(state: &AppState) -> Vec<Line<'static>> {
    let scored = state.score().is_some();
    let mut lines = Vec::with_capacity(state.session.len());

    for (i, q) in state.session.questions().iter().enumerate() {
        let answer = state.session.answer_for(&q.id);
        let mut spans = vec![Span::raw(format!("{:>3}. ", i + 1))];

        if scored {
            let (mark, color) = if answer.is_some() && answer == q.correct_option {
                ("✓", Color::Green)
            } else {
                ("✗", Color::Red)
            };
            spans.push(Span::styled(format!("{} ", mark), Style::default().fg(color)));
        }

        spans.push(Span::raw(format!("answer {}", letter(answer))));
        if scored {
            spans.push(Span::styled(
                format!("  correct {}", letter(q.correct_option)),
                Style::default().fg(Color::DarkGray),
            ));
        }
        if state.session.is_bookmarked(&q.id) {
            spans.push(Span::styled("  ⚑", Style::default().fg(Color::Yellow)));
        }

        let prompt = q.prompt.lines().next().unwrap_or("").trim().to_string();
        spans.push(Span::styled(
            format!("  {}", prompt),
            Style::default().fg(Color::Gray),
        ));
        lines.push(Line::from(spans));
    }
    lines
}

pub fn draw_result(f: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        format!(" {} ", state.title),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let summary = summary_lines(state);
    let summary_height = (summary.len() as u16).min(inner.height);
    let summary_area = Rect {
        height: summary_height,
        ..inner
    };
    f.render_widget(
        Paragraph::new(summary).alignment(Alignment::Center),
        summary_area,
    );

    // Footer takes the last row of the inner area.
    let review_height = inner.height.saturating_sub(summary_height + 1);
    let review_area = Rect {
        y: inner.y + summary_height,
        height: review_height,
        ..inner
    };
    let footer_area = Rect {
        y: inner.y + summary_height + review_height,
        height: inner.height.saturating_sub(summary_height + review_height),
        ..inner
    };

    let review = review_lines(state);
    let total = review.len();
    let visible = review_height as usize;
    let scroll = state.result_scroll.min(total.saturating_sub(visible));
    let shown: Vec<Line> = review.into_iter().skip(scroll).collect();
    f.render_widget(Paragraph::new(shown), review_area);

    if total > visible {
        let mut scrollbar_state = ScrollbarState::new(total)
            .position(scroll)
            .viewport_content_length(visible);
        f.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            review_area,
            &mut scrollbar_state,
        );
    }

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "[↑/↓] Scroll    [Enter] Exit",
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center),
        footer_area,
    );
}

pub fn draw_no_questions(f: &mut Frame, area: Rect, state: &AppState) {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "No questions available",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Nothing to ask from {}.", state.source_label)),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] Exit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default().borders(Borders::ALL);
    let widget = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}
