use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::scoring::ScoringPolicy;
use crate::state::AppState;
use crate::timer::format_clock;

fn title_line(state: &AppState) -> Line<'static> {
    Line::from(Span::styled(
        state.title.clone(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

pub fn draw_loading(f: &mut Frame, area: Rect, state: &AppState) {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        title_line(state),
        Line::from(""),
        Line::from(Span::styled(
            "Fetching questions...",
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[Esc] Cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default().borders(Borders::ALL);
    let widget = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}

pub fn draw_instructions(f: &mut Frame, area: Rect, state: &AppState) {
    let total = state.session.len();
    let duration = state.session.duration_secs();

    let mut lines = vec![
        Line::from(""),
        title_line(state),
        Line::from(""),
        Line::from(format!(
            "{} questions  ·  {} time limit",
            total,
            format_clock(duration)
        )),
        Line::from(""),
        Line::from("Each question has one correct option. Press its letter to answer;"),
        Line::from("you can change or clear an answer until you submit."),
        Line::from("Bookmark questions you want to revisit with Ctrl+B."),
        Line::from("The quiz submits itself when the timer reaches 00:00."),
    ];
    if state.config.scoring == ScoringPolicy::GroundTruth {
        lines.push(Line::from("Your score is shown after submission."));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Enter] Start    [Esc] Exit",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default().borders(Borders::ALL);
    let widget = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}
