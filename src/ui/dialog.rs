use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::state::{AppState, Dialog, LOW_TIME_SECS};

pub fn draw_dialog(f: &mut Frame, area: Rect, state: &AppState) {
    let Some(dialog) = state.top_dialog() else {
        return;
    };

    match dialog {
        Dialog::ConfirmSubmit => draw_confirm_submit(f, area, state),
        Dialog::ConfirmQuit => draw_confirm_quit(f, area),
        Dialog::LowTimeWarning => draw_low_time_warning(f, area),
        Dialog::Help => draw_help(f, area),
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn render_box(f: &mut Frame, area: Rect, width: u16, lines: Vec<Line>, color: Color, title: &str) {
    let rect = centered_rect(width, lines.len() as u16 + 2, area);
    f.render_widget(Clear, rect);
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    if !title.is_empty() {
        block = block.title(title);
    }
    f.render_widget(Paragraph::new(lines).block(block), rect);
}

fn confirm_line() -> Line<'static> {
    Line::from(vec![
        Span::styled("   [Enter] Confirm", Style::default().fg(Color::Green)),
        Span::raw("    "),
        Span::styled("[Esc] Cancel", Style::default().fg(Color::DarkGray)),
    ])
}

fn heading(text: &str, color: Color) -> Line<'static> {
    Line::from(Span::styled(
        format!("   {}", text),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

fn draw_confirm_submit(f: &mut Frame, area: Rect, state: &AppState) {
    let counts = state.status_counts();
    let mut lines = vec![heading("Submit your quiz?", Color::Yellow), Line::from("")];

    if counts.unanswered > 0 {
        lines.push(Line::from(format!(
            "   {} questions are not answered.",
            counts.unanswered
        )));
    }
    if counts.bookmarked > 0 {
        lines.push(Line::from(format!(
            "   {} questions are bookmarked.",
            counts.bookmarked
        )));
    }
    lines.push(Line::from(""));
    lines.push(confirm_line());

    render_box(f, area, 42, lines, Color::Yellow, "");
}

fn draw_confirm_quit(f: &mut Frame, area: Rect) {
    let lines = vec![
        heading("Quit?", Color::Yellow),
        Line::from(""),
        Line::from("   Your answers will be discarded."),
        Line::from(""),
        confirm_line(),
    ];
    render_box(f, area, 40, lines, Color::Yellow, "");
}

fn draw_low_time_warning(f: &mut Frame, area: Rect) {
    let lines = vec![
        heading(&format!("⚠  {} SECONDS REMAINING", LOW_TIME_SECS), Color::Red),
        Line::from(""),
        Line::from("   The quiz submits itself when"),
        Line::from("   time runs out."),
        Line::from(""),
        Line::from(Span::styled(
            "          [Enter] Continue",
            Style::default().fg(Color::Green),
        )),
    ];
    render_box(f, area, 42, lines, Color::Red, "");
}

fn draw_help(f: &mut Frame, area: Rect) {
    let lines = vec![
        heading("Key Bindings", Color::Cyan),
        Line::from(""),
        Line::from("   a-z        Select option"),
        Line::from("   Bksp/Del   Clear answer"),
        Line::from("   ←/→        Previous/Next question"),
        Line::from("   ↑/↓        Scroll (sidebar: prev/next)"),
        Line::from("   PgUp/PgDn  Jump 5 questions"),
        Line::from("   Home/End   First/Last question"),
        Line::from("   Tab        Switch panel"),
        Line::from("   Ctrl+B     Toggle bookmark"),
        Line::from("   Ctrl+S     Submit quiz"),
        Line::from("   Ctrl+Q     Quit"),
        Line::from("   ?          This help"),
        Line::from(""),
        Line::from(Span::styled(
            "        [Esc] Close",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    render_box(f, area, 46, lines, Color::Cyan, " Help ");
}
