pub mod dialog;
pub mod instructions;
pub mod keybar;
pub mod layout;
pub mod markdown;
pub mod question;
pub mod result;
pub mod sidebar;
pub mod titlebar;

use ratatui::Frame;

use crate::state::{AppState, Screen};

pub fn draw(f: &mut Frame, state: &AppState) {
    let area = f.area();

    match state.screen {
        Screen::Loading => {
            instructions::draw_loading(f, area, state);
        }
        Screen::Instructions => {
            instructions::draw_instructions(f, area, state);
        }
        Screen::Working => {
            draw_working(f, area, state);
        }
        Screen::NoQuestions => {
            result::draw_no_questions(f, area, state);
        }
        Screen::Result => {
            result::draw_result(f, area, state);
        }
    }
}

fn draw_working(f: &mut Frame, area: ratatui::layout::Rect, state: &AppState) {
    let layout = layout::compute_layout(area);

    titlebar::draw_titlebar(f, layout.titlebar, state);
    sidebar::draw_sidebar(f, layout.sidebar, state);
    question::draw_question(f, layout.main, state);
    keybar::draw_keybar(f, layout.keybar, state);

    // Draw dialog overlay if any
    if state.has_dialog() {
        dialog::draw_dialog(f, area, state);
    }
}
