use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use skillquiz::model::{Question, RawQuestionRecord};
use skillquiz::scoring::ScoringPolicy;
use skillquiz::session::{Phase, SessionConfig, SubmitReason};
use skillquiz::state::{AppState, Dialog, QuestionStatus, Screen, StatusCounts, LOW_TIME_SECS};

fn config(duration_secs: u64) -> SessionConfig {
    SessionConfig {
        duration_secs,
        sample_size: None,
        scoring: ScoringPolicy::GroundTruth,
    }
}

fn questions(n: u64) -> Vec<Question> {
    (1..=n)
        .map(|i| Question::new(i, &format!("Question {}", i), &["yes", "no"]).with_correct(0))
        .collect()
}

fn working_state(n: u64, duration_secs: u64) -> AppState {
    let mut state = AppState::new("Practice", "bundled:test", config(duration_secs));
    state.load_questions(questions(n), &mut StdRng::seed_from_u64(0));
    state.begin();
    state
}

#[test]
fn test_loading_to_instructions() {
    let mut state = AppState::new("Topic 9", "topic:9", SessionConfig::remote());
    assert_eq!(state.screen, Screen::Loading);

    let raw: Vec<RawQuestionRecord> = vec![
        json!({"id": 1, "question": "a?", "options": ["x", "y"]}).into(),
        json!({"id": 2, "question": "b?", "options": "['x', 'y']"}).into(),
    ];
    state.load_records(&raw, &mut StdRng::seed_from_u64(0));
    assert_eq!(state.screen, Screen::Instructions);
    assert_eq!(state.session.len(), 2);
    assert_eq!(state.session.phase(), Phase::Instructions);

    state.begin();
    assert_eq!(state.screen, Screen::Working);
    assert!(state.is_active());
}

#[test]
fn test_empty_set_shows_no_questions() {
    let mut state = AppState::new("Topic 9", "topic:9", SessionConfig::remote());
    state.load_records(&[], &mut StdRng::seed_from_u64(0));
    assert_eq!(state.screen, Screen::NoQuestions);

    // Nothing to begin
    state.begin();
    assert_eq!(state.screen, Screen::NoQuestions);
}

#[test]
fn test_practice_preset_samples() {
    let mut state = AppState::new("Practice", "bundled:test", SessionConfig::practice());
    state.load_questions(questions(45), &mut StdRng::seed_from_u64(9));
    assert_eq!(state.session.len(), 30);
    assert_eq!(state.session.duration_secs(), 300);
}

#[test]
fn test_answer_bookmark_and_counts() {
    let mut state = working_state(4, 600);

    assert!(state.select_option(0));
    assert!(!state.select_option(5));
    state.navigate_next();
    state.toggle_current_bookmark();
    state.select_option(1);

    assert_eq!(state.question_status(0), QuestionStatus::Answered);
    assert_eq!(state.question_status(1), QuestionStatus::Bookmarked);
    assert_eq!(state.question_status(2), QuestionStatus::Unanswered);
    assert_eq!(
        state.status_counts(),
        StatusCounts {
            answered: 2,
            unanswered: 2,
            bookmarked: 1
        }
    );

    assert!(state.clear_current_answer());
    assert_eq!(state.status_counts().answered, 1);
}

#[test]
fn test_navigation_resets_scroll() {
    let mut state = working_state(12, 600);
    state.question_scroll = 4;
    state.navigate_next();
    assert_eq!(state.current_index(), 1);
    assert_eq!(state.question_scroll, 0);

    state.page_down();
    assert_eq!(state.current_index(), 6);
    state.page_down();
    state.page_down();
    assert_eq!(state.current_index(), 11);
    state.page_up();
    assert_eq!(state.current_index(), 6);
    state.navigate_to(0);
    state.navigate_prev();
    assert_eq!(state.current_index(), 0);
    state.navigate_last();
    assert_eq!(state.current_index(), 11);
}

#[test]
fn test_low_time_warning_once() {
    let mut state = working_state(2, LOW_TIME_SECS + 2);

    state.on_tick();
    assert!(!state.has_dialog());
    state.on_tick();
    assert_eq!(state.top_dialog(), Some(&Dialog::LowTimeWarning));

    state.pop_dialog();
    state.on_tick();
    assert!(!state.has_dialog());
}

#[test]
fn test_expiry_shows_result() {
    let mut state = working_state(2, 2);
    state.select_option(0);
    state.push_dialog(Dialog::Help);

    state.on_tick();
    state.on_tick();
    assert_eq!(state.screen, Screen::Result);
    assert!(!state.has_dialog());
    assert_eq!(state.session.submit_reason(), Some(SubmitReason::Expired));
    assert!(!state.is_active());

    let score = state.score().unwrap();
    assert_eq!(score.correct_count, 1);
    assert_eq!(score.total, 2);
}

#[test]
fn test_manual_submit_and_report() {
    let mut state = working_state(3, 600);
    state.select_option(0);
    state.submit();

    assert_eq!(state.screen, Screen::Result);
    assert_eq!(state.session.phase(), Phase::Submitted);
    let report = state.report();
    assert_eq!(report.quiz.title, "Practice");
    assert_eq!(report.quiz.source, "bundled:test");
    assert_eq!(report.score.map(|s| s.correct_count), Some(1));
    assert_eq!(report.questions.len(), 3);
}
