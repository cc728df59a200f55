use rand::Rng;

use crate::model::{Question, RawQuestionRecord};
use crate::normalize;
use crate::report::{build_report, ResultReport};
use crate::scoring::Score;
use crate::session::{self, Phase, QuizSession, SessionConfig, TickOutcome};

/// Remaining seconds at which the one-time warning dialog appears.
pub const LOW_TIME_SECS: u64 = 60;

/// Questions skipped by PgUp/PgDn.
pub const PAGE_JUMP: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Loading,
    Instructions,
    Working,
    NoQuestions,
    Result,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    ConfirmSubmit,
    ConfirmQuit,
    LowTimeWarning,
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActivePanel {
    Sidebar,
    Main,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub title: String,
    pub source_label: String,
    pub session: QuizSession,
    pub config: SessionConfig,
    pub dialog_stack: Vec<Dialog>,
    pub should_quit: bool,
    pub sidebar_scroll: usize,
    pub question_scroll: usize,
    pub result_scroll: usize,
    pub active_panel: ActivePanel,
    pub warned_low_time: bool,
    /// Outcome of the result export, shown on the result screen.
    pub export_status: Option<String>,
}

impl AppState {
    /// Starts on the loading screen with an empty session; questions arrive
    /// through `load_questions` or `load_records`.
    pub fn new(title: &str, source_label: &str, config: SessionConfig) -> Self {
        Self {
            screen: Screen::Loading,
            title: title.to_string(),
            source_label: source_label.to_string(),
            session: QuizSession::new(Vec::new(), config.duration_secs),
            config,
            dialog_stack: Vec::new(),
            should_quit: false,
            sidebar_scroll: 0,
            question_scroll: 0,
            result_scroll: 0,
            active_panel: ActivePanel::Main,
            warned_low_time: false,
            export_status: None,
        }
    }

    pub fn load_records<R: Rng + ?Sized>(&mut self, raw: &[RawQuestionRecord], rng: &mut R) {
        let normalized = normalize::normalize_report(raw);
        if !normalized.issues.is_empty() {
            tracing::info!(
                records = raw.len(),
                issues = normalized.issues.len(),
                "question records normalized with issues"
            );
        }
        self.load_questions(normalized.questions, rng);
    }

    pub fn load_questions<R: Rng + ?Sized>(&mut self, questions: Vec<Question>, rng: &mut R) {
        self.session = session::build(questions, &self.config, rng);
        self.screen = if self.session.is_empty() {
            Screen::NoQuestions
        } else {
            Screen::Instructions
        };
        self.sidebar_scroll = 0;
        self.question_scroll = 0;
        self.warned_low_time = false;
    }

    pub fn begin(&mut self) {
        if self.session.begin() {
            self.screen = Screen::Working;
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.phase() == Phase::Active
    }

    /// Delivers one timer tick to the session.
    pub fn on_tick(&mut self) -> TickOutcome {
        let outcome = self.session.tick();
        match outcome {
            TickOutcome::Running(remaining) => {
                if remaining <= LOW_TIME_SECS && !self.warned_low_time {
                    self.warned_low_time = true;
                    if self.screen == Screen::Working {
                        self.push_dialog(Dialog::LowTimeWarning);
                    }
                }
            }
            TickOutcome::Expired => {
                tracing::info!("time expired, submitting");
                self.show_result();
            }
            TickOutcome::Idle => {}
        }
        outcome
    }

    pub fn submit(&mut self) {
        self.session.submit();
        self.show_result();
    }

    fn show_result(&mut self) {
        self.dialog_stack.clear();
        self.screen = Screen::Result;
        self.result_scroll = 0;
    }

    pub fn current_index(&self) -> usize {
        self.session.current_index().unwrap_or(0)
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.session.current_question()
    }

    pub fn navigate_to(&mut self, idx: usize) {
        if self.session.go_to(idx) {
            self.question_scroll = 0;
        }
    }

    pub fn navigate_prev(&mut self) {
        if self.session.prev() {
            self.question_scroll = 0;
        }
    }

    pub fn navigate_next(&mut self) {
        if self.session.next() {
            self.question_scroll = 0;
        }
    }

    pub fn page_up(&mut self) {
        self.navigate_to(self.current_index().saturating_sub(PAGE_JUMP));
    }

    pub fn page_down(&mut self) {
        let last = self.session.len().saturating_sub(1);
        self.navigate_to((self.current_index() + PAGE_JUMP).min(last));
    }

    pub fn navigate_last(&mut self) {
        if !self.session.is_empty() {
            self.navigate_to(self.session.len() - 1);
        }
    }

    pub fn select_option(&mut self, option: usize) -> bool {
        match self.current_question().map(|q| q.id.clone()) {
            Some(id) => self.session.select_answer(&id, option),
            None => false,
        }
    }

    pub fn clear_current_answer(&mut self) -> bool {
        match self.current_question().map(|q| q.id.clone()) {
            Some(id) => self.session.clear_answer(&id),
            None => false,
        }
    }

    pub fn toggle_current_bookmark(&mut self) -> bool {
        match self.current_question().map(|q| q.id.clone()) {
            Some(id) => self.session.toggle_bookmark(&id),
            None => false,
        }
    }

    pub fn toggle_panel(&mut self) {
        self.active_panel = match self.active_panel {
            ActivePanel::Sidebar => ActivePanel::Main,
            ActivePanel::Main => ActivePanel::Sidebar,
        };
    }

    pub fn question_status(&self, idx: usize) -> QuestionStatus {
        let Some(q) = self.session.questions().get(idx) else {
            return QuestionStatus::Unanswered;
        };
        if self.session.is_bookmarked(&q.id) {
            QuestionStatus::Bookmarked
        } else if self.session.answer_for(&q.id).is_some() {
            QuestionStatus::Answered
        } else {
            QuestionStatus::Unanswered
        }
    }

    pub fn status_counts(&self) -> StatusCounts {
        let answered = self.session.answered_count();
        StatusCounts {
            answered,
            unanswered: self.session.len() - answered,
            bookmarked: self.session.bookmarks().len(),
        }
    }

    pub fn score(&self) -> Option<Score> {
        self.config.scoring.evaluate(&self.session)
    }

    pub fn report(&self) -> ResultReport {
        build_report(
            &self.session,
            self.config.scoring,
            &self.title,
            &self.source_label,
        )
    }

    pub fn has_dialog(&self) -> bool {
        !self.dialog_stack.is_empty()
    }

    pub fn top_dialog(&self) -> Option<&Dialog> {
        self.dialog_stack.last()
    }

    pub fn push_dialog(&mut self, dialog: Dialog) {
        self.dialog_stack.push(dialog);
    }

    pub fn pop_dialog(&mut self) -> Option<Dialog> {
        self.dialog_stack.pop()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuestionStatus {
    Unanswered,
    Answered,
    Bookmarked,
}

#[derive(Debug, Default, PartialEq)]
pub struct StatusCounts {
    pub answered: usize,
    pub unanswered: usize,
    pub bookmarked: usize,
}
