use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};
use ratatui::Frame;

use crate::state::{ActivePanel, AppState, QuestionStatus};

const STATUS_ROWS: usize = 4; // 1 separator + 3 count lines

fn question_rows(area: Rect) -> usize {
    (area.height.saturating_sub(2) as usize).saturating_sub(STATUS_ROWS)
}

/// First visible question, keeping the current one in view.
fn scroll_offset(state: &AppState, question_height: usize) -> usize {
    let current = state.current_index();
    if question_height == 0 {
        return current;
    }
    if current >= state.sidebar_scroll + question_height {
        current + 1 - question_height
    } else if current < state.sidebar_scroll {
        current
    } else {
        state.sidebar_scroll
    }
}

/// Index of the question drawn on `relative_y` (0 = first row below the
/// title), if that row holds one.
pub fn question_at_row(state: &AppState, area: Rect, relative_y: usize) -> Option<usize> {
    let question_height = question_rows(area);
    if relative_y >= question_height {
        return None;
    }
    let idx = scroll_offset(state, question_height) + relative_y;
    (idx < state.session.len()).then_some(idx)
}

fn first_line(prompt: &str) -> &str {
    prompt.lines().find(|l| !l.trim().is_empty()).unwrap_or("").trim()
}

pub fn draw_sidebar(f: &mut Frame, area: Rect, state: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    let inner_width = area.width.saturating_sub(1) as usize; // -1 for right border
    let question_height = question_rows(area);
    let current = state.current_index();
    let total = state.session.len();
    let offset = scroll_offset(state, question_height);

    let title_max_len = area.width.saturating_sub(11) as usize; // cursor + icon + number

    for (qi, q) in state
        .session
        .questions()
        .iter()
        .enumerate()
        .skip(offset)
        .take(question_height)
    {
        let status = state.question_status(qi);
        let (icon, color) = match status {
            QuestionStatus::Unanswered => ("○", Color::White),
            QuestionStatus::Answered => ("✓", Color::Green),
            QuestionStatus::Bookmarked => ("⚑", Color::Yellow),
        };

        let is_current = qi == current;
        let bg = if is_current { Color::DarkGray } else { Color::Reset };
        let style = if is_current {
            Style::default()
                .fg(Color::White)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(bg)
        };

        let prompt = first_line(&q.prompt);
        let title = if prompt.chars().count() > title_max_len {
            let cut: String = prompt.chars().take(title_max_len.saturating_sub(1)).collect();
            format!("{}…", cut)
        } else {
            prompt.to_string()
        };

        lines.push(Line::from(vec![
            Span::styled(if is_current { " ▸ " } else { "   " }, style),
            Span::styled(format!("{} ", icon), Style::default().fg(color).bg(bg)),
            Span::styled(format!("{:>2}. ", qi + 1), style),
            Span::styled(title, style),
        ]));
    }

    while lines.len() < question_height {
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "─".repeat(inner_width),
        Style::default().fg(Color::DarkGray),
    )));

    let counts = state.status_counts();
    let items = [
        ("✓", counts.answered, "answered", Color::Green),
        ("○", counts.unanswered, "unanswered", Color::White),
        ("⚑", counts.bookmarked, "bookmarked", Color::Yellow),
    ];
    let width = total.to_string().len();
    for (icon, count, label, color) in items {
        lines.push(Line::from(Span::styled(
            format!("  {} {:>w$} {}", icon, count, label, w = width),
            Style::default().fg(color),
        )));
    }

    let border_style = if state.active_panel == ActivePanel::Sidebar {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::RIGHT)
        .title(format!(" {} Questions ", total))
        .title_style(Style::default().add_modifier(Modifier::BOLD))
        .border_style(border_style);

    f.render_widget(Paragraph::new(lines).block(block), area);

    if total > question_height {
        let scrollbar_area = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: question_height as u16,
        };
        let mut scrollbar_state = ScrollbarState::new(total.saturating_sub(1))
            .position(current)
            .viewport_content_length(3);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight);
        f.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }
}
