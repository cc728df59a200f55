use std::io;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use ratatui::crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::{Position, Rect};
use ratatui::prelude::CrosstermBackend;
use ratatui::Terminal;

use crate::error::QuizError;
use crate::model::letter_index;
use crate::remote::PendingFetch;
use crate::report::export_report;
use crate::state::*;
use crate::timer::{Ticker, TimerEvent};

/// The per-second ticker, held only while the session is active.
struct RunningTicker {
    ticker: Ticker,
    rx: mpsc::Receiver<TimerEvent>,
}

pub fn run_tui(
    mut state: AppState,
    pending: Option<PendingFetch>,
    export: Option<PathBuf>,
) -> Result<(), QuizError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        disable_raw_mode().ok();
        return Err(e.into());
    }

    let backend = CrosstermBackend::new(stdout);
    let result = match Terminal::new(backend) {
        Ok(mut terminal) => {
            let result = main_loop(&mut terminal, &mut state, pending, export.as_ref());
            execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture).ok();
            result
        }
        Err(e) => {
            execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture).ok();
            Err(e.into())
        }
    };

    // Restore terminal
    disable_raw_mode().ok();

    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    mut pending: Option<PendingFetch>,
    export: Option<&PathBuf>,
) -> Result<(), QuizError> {
    let mut ticker: Option<RunningTicker> = None;
    let mut exported = false;

    loop {
        terminal.draw(|f| crate::ui::draw(f, state))?;

        if state.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(key, state),
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    handle_mouse(mouse, state, Rect::new(0, 0, size.width, size.height));
                }
                _ => {}
            }
        }

        if let Some(fetch) = &pending {
            if let Some(records) = fetch.poll() {
                tracing::info!(records = records.len(), "questions received");
                state.load_records(&records, &mut rand::rng());
                pending = None;
            }
        }

        // The ticker runs exactly while the session is active.
        if state.is_active() {
            if ticker.is_none() {
                let (t, rx) = Ticker::spawn();
                ticker = Some(RunningTicker { ticker: t, rx });
            }
        } else if let Some(running) = ticker.take() {
            running.ticker.stop();
        }

        if let Some(running) = &ticker {
            while let Ok(TimerEvent::Tick) = running.rx.try_recv() {
                if !state.is_active() {
                    break;
                }
                state.on_tick();
            }
        }

        if state.screen == Screen::Result && !exported {
            exported = true;
            if let Some(path) = export {
                state.export_status = Some(match export_report(path, &state.report()) {
                    Ok(()) => format!("Result saved to {}", path.display()),
                    Err(e) => {
                        tracing::error!("{}", e);
                        format!("Export failed: {}", e)
                    }
                });
            }
        }
    }

    if let Some(running) = ticker.take() {
        running.ticker.stop();
    }
    Ok(())
}

fn handle_key(key: KeyEvent, state: &mut AppState) {
    // Handle dialog keys first
    if state.has_dialog() {
        handle_dialog_key(key, state);
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match state.screen {
        Screen::Loading => {
            if key.code == KeyCode::Esc || (ctrl && key.code == KeyCode::Char('q')) {
                tracing::info!("loading cancelled");
                state.should_quit = true;
            }
        }
        Screen::Instructions => match key.code {
            KeyCode::Enter => state.begin(),
            KeyCode::Char('q') if ctrl => state.should_quit = true,
            KeyCode::Esc => state.should_quit = true,
            _ => {}
        },
        Screen::Working => handle_working_key(key, state),
        Screen::NoQuestions => match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => state.should_quit = true,
            _ => {}
        },
        Screen::Result => handle_result_key(key, state),
    }
}

fn handle_working_key(key: KeyEvent, state: &mut AppState) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Global bindings
    if ctrl {
        match key.code {
            KeyCode::Char('q') => state.push_dialog(Dialog::ConfirmQuit),
            KeyCode::Char('s') => state.push_dialog(Dialog::ConfirmSubmit),
            KeyCode::Char('b') => {
                state.toggle_current_bookmark();
            }
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Tab | KeyCode::BackTab => state.toggle_panel(),
        KeyCode::Left => state.navigate_prev(),
        KeyCode::Right => state.navigate_next(),
        // Up/Down scroll a long question while the main panel has focus
        KeyCode::Up => match state.active_panel {
            ActivePanel::Sidebar => state.navigate_prev(),
            ActivePanel::Main => state.question_scroll = state.question_scroll.saturating_sub(1),
        },
        KeyCode::Down => match state.active_panel {
            ActivePanel::Sidebar => state.navigate_next(),
            ActivePanel::Main => state.question_scroll += 1,
        },
        KeyCode::PageUp => state.page_up(),
        KeyCode::PageDown => state.page_down(),
        KeyCode::Home => state.navigate_to(0),
        KeyCode::End => state.navigate_last(),
        KeyCode::Backspace | KeyCode::Delete => {
            state.clear_current_answer();
        }
        KeyCode::Char('?') => state.push_dialog(Dialog::Help),
        KeyCode::Char(c) => {
            if let Some(idx) = letter_index(c) {
                state.select_option(idx);
            }
        }
        _ => {}
    }
}

fn handle_result_key(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => state.should_quit = true,
        KeyCode::Up => state.result_scroll = state.result_scroll.saturating_sub(1),
        KeyCode::Down => state.result_scroll += 1,
        KeyCode::PageUp => state.result_scroll = state.result_scroll.saturating_sub(10),
        KeyCode::PageDown => state.result_scroll += 10,
        KeyCode::Home => state.result_scroll = 0,
        _ => {}
    }
}

fn handle_dialog_key(key: KeyEvent, state: &mut AppState) {
    let dialog = state.top_dialog().cloned();
    match dialog {
        Some(Dialog::ConfirmSubmit) => match key.code {
            KeyCode::Enter => {
                state.pop_dialog();
                state.submit();
            }
            KeyCode::Esc => {
                state.pop_dialog();
            }
            _ => {}
        },
        Some(Dialog::ConfirmQuit) => match key.code {
            KeyCode::Enter => {
                state.pop_dialog();
                tracing::info!("quit without submitting");
                state.should_quit = true;
            }
            KeyCode::Esc => {
                state.pop_dialog();
            }
            _ => {}
        },
        Some(Dialog::LowTimeWarning) => match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                state.pop_dialog();
            }
            _ => {}
        },
        Some(Dialog::Help) => match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter => {
                state.pop_dialog();
            }
            _ => {}
        },
        None => {}
    }
}

fn handle_mouse(mouse: MouseEvent, state: &mut AppState, size: Rect) {
    if state.has_dialog() {
        return;
    }
    if state.screen == Screen::Result {
        match mouse.kind {
            MouseEventKind::ScrollUp => state.result_scroll = state.result_scroll.saturating_sub(1),
            MouseEventKind::ScrollDown => state.result_scroll += 1,
            _ => {}
        }
        return;
    }
    if state.screen != Screen::Working {
        return;
    }

    let layout = crate::ui::layout::compute_layout(size);
    let pos = Position::new(mouse.column, mouse.row);
    let in_sidebar = layout.sidebar.contains(pos);
    let in_main = layout.main.contains(pos);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if in_sidebar {
                state.active_panel = ActivePanel::Sidebar;
                let relative_y = mouse.row.saturating_sub(layout.sidebar.y + 1) as usize;
                if let Some(idx) = crate::ui::sidebar::question_at_row(state, layout.sidebar, relative_y)
                {
                    state.navigate_to(idx);
                }
            } else if in_main {
                state.active_panel = ActivePanel::Main;
                if let Some(hit_map) = crate::ui::question::compute_hit_map(state, layout.main) {
                    // Same clamping as the renderer; options are the last content lines.
                    let scroll = state
                        .question_scroll
                        .min(hit_map.options_end.saturating_sub(layout.main.height as usize));
                    let content_line = mouse.row.saturating_sub(layout.main.y) as usize + scroll;
                    if let Some(option) = hit_map.option_at(content_line) {
                        state.select_option(option);
                    }
                }
            }
        }
        MouseEventKind::ScrollUp => {
            if in_sidebar {
                state.navigate_prev();
            } else if in_main && state.question_scroll > 0 {
                state.question_scroll -= 1;
            }
        }
        MouseEventKind::ScrollDown => {
            if in_sidebar {
                state.navigate_next();
            } else if in_main {
                state.question_scroll += 1;
            }
        }
        _ => {}
    }
}
