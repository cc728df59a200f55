use rand::rngs::StdRng;
use rand::SeedableRng;
use skillquiz::model::{Question, QuestionId};
use skillquiz::scoring::ScoringPolicy;
use skillquiz::session::{
    build, sample_questions, Phase, QuizSession, SessionConfig, SubmitReason, TickOutcome,
};

fn three_questions() -> Vec<Question> {
    vec![
        Question::new(1u64, "First", &["a", "b"]).with_correct(0),
        Question::new(2u64, "Second", &["c", "d", "e"]).with_correct(2),
        Question::new(3u64, "Third", &["f", "g"]).with_correct(1),
    ]
}

fn active_session() -> QuizSession {
    let mut session = QuizSession::new(three_questions(), 600);
    assert!(session.begin());
    session
}

#[test]
fn test_starts_in_instructions() {
    let mut session = QuizSession::new(three_questions(), 600);
    assert_eq!(session.phase(), Phase::Instructions);
    assert_eq!(session.current_index(), Some(0));

    // Mutations are ignored before begin
    assert!(!session.select_answer(&QuestionId::from(1u64), 0));
    assert!(!session.toggle_bookmark(&QuestionId::from(1u64)));
    assert!(!session.next());
    assert_eq!(session.tick(), TickOutcome::Idle);
    assert_eq!(session.remaining_seconds(), 600);
    assert!(session.answers().is_empty());

    assert!(session.begin());
    assert_eq!(session.phase(), Phase::Active);
    assert!(session.started_at().is_some());
    assert!(!session.begin());
}

#[test]
fn test_answers_overwrite_and_clear() {
    let mut session = active_session();
    let id = QuestionId::from(2u64);

    assert!(session.select_answer(&id, 0));
    assert_eq!(session.answer_for(&id), Some(0));
    assert!(session.select_answer(&id, 2));
    assert_eq!(session.answer_for(&id), Some(2));
    // Same answer again changes nothing
    assert!(!session.select_answer(&id, 2));

    assert!(session.clear_answer(&id));
    assert_eq!(session.answer_for(&id), None);
    assert!(!session.clear_answer(&id));
}

#[test]
fn test_stale_references_are_ignored() {
    let mut session = active_session();

    assert!(!session.select_answer(&QuestionId::from(99u64), 0));
    assert!(!session.select_answer(&QuestionId::from(1u64), 5));
    assert!(!session.toggle_bookmark(&QuestionId::from("nope")));
    assert!(session.answers().is_empty());
    assert!(session.bookmarks().is_empty());
}

#[test]
fn test_bookmarks_are_independent_of_answers() {
    let mut session = active_session();
    let id = QuestionId::from(1u64);

    assert!(session.toggle_bookmark(&id));
    assert!(session.is_bookmarked(&id));
    assert_eq!(session.answer_for(&id), None);

    session.select_answer(&id, 1);
    assert!(session.toggle_bookmark(&id));
    assert!(!session.is_bookmarked(&id));
    assert_eq!(session.answer_for(&id), Some(1));
}

#[test]
fn test_navigation_is_clamped() {
    let mut session = active_session();

    assert!(!session.prev());
    assert_eq!(session.current_index(), Some(0));

    assert!(session.next());
    assert!(session.next());
    assert!(!session.next());
    assert_eq!(session.current_index(), Some(2));

    assert!(!session.go_to(3));
    assert!(!session.go_to(usize::MAX));
    assert_eq!(session.current_index(), Some(2));

    assert!(session.go_to(0));
    assert_eq!(session.current_question().map(|q| q.prompt.as_str()), Some("First"));
}

#[test]
fn test_submit_freezes_state() {
    let mut session = active_session();
    let id = QuestionId::from(1u64);
    session.select_answer(&id, 0);
    session.go_to(1);

    assert!(session.submit());
    assert_eq!(session.phase(), Phase::Submitted);
    assert_eq!(session.submit_reason(), Some(SubmitReason::Manual));
    let frozen = format!("{:?}", session);

    assert!(!session.submit());
    assert!(!session.select_answer(&id, 1));
    assert!(!session.clear_answer(&id));
    assert!(!session.toggle_bookmark(&id));
    assert!(!session.go_to(0));
    assert_eq!(session.tick(), TickOutcome::Idle);

    assert_eq!(format!("{:?}", session), frozen);
}

#[test]
fn test_expiry_submits_once() {
    let mut session = QuizSession::new(three_questions(), 3);
    session.begin();
    session.select_answer(&QuestionId::from(3u64), 1);

    assert_eq!(session.tick(), TickOutcome::Running(2));
    assert_eq!(session.tick(), TickOutcome::Running(1));
    assert_eq!(session.tick(), TickOutcome::Expired);
    assert_eq!(session.phase(), Phase::Submitted);
    assert_eq!(session.submit_reason(), Some(SubmitReason::Expired));

    for _ in 0..5 {
        assert_eq!(session.tick(), TickOutcome::Idle);
    }
    assert_eq!(session.remaining_seconds(), 0);
    assert_eq!(session.elapsed_secs(), 3);
    assert!(!session.submit());
    assert_eq!(session.submit_reason(), Some(SubmitReason::Expired));
}

#[test]
fn test_empty_session() {
    let mut session = QuizSession::new(Vec::new(), 300);
    assert_eq!(session.phase(), Phase::Instructions);
    assert!(session.is_empty());
    assert_eq!(session.current_index(), None);
    assert!(session.current_question().is_none());

    assert!(session.submit());
    let result = session.result(ScoringPolicy::GroundTruth).unwrap();
    assert_eq!(result.correct_count, Some(0));
    assert_eq!(result.total, 0);
    assert!(result.answers.is_empty());
}

#[test]
fn test_result_carries_answers_and_bookmarks() {
    let mut session = active_session();
    assert!(session.result(ScoringPolicy::GroundTruth).is_none());

    session.select_answer(&QuestionId::from(1u64), 0);
    session.select_answer(&QuestionId::from(2u64), 1);
    session.toggle_bookmark(&QuestionId::from(3u64));
    session.submit();

    let scored = session.result(ScoringPolicy::GroundTruth).unwrap();
    assert_eq!(scored.correct_count, Some(1));
    assert_eq!(scored.total, 3);
    assert_eq!(scored.answers.len(), 2);
    assert!(scored.bookmarks.contains(&QuestionId::from(3u64)));
    assert_eq!(scored.reason, SubmitReason::Manual);

    let unscored = session.result(ScoringPolicy::Unscored).unwrap();
    assert_eq!(unscored.correct_count, None);
    assert_eq!(unscored.answers, scored.answers);
}

#[test]
fn test_sampling() {
    let questions: Vec<Question> = (0..50u64)
        .map(|i| Question::new(i, &format!("Q{}", i), &["x", "y"]))
        .collect();

    let mut rng = StdRng::seed_from_u64(7);
    let sample = sample_questions(questions.clone(), 30, &mut rng);
    assert_eq!(sample.len(), 30);
    let mut ids: Vec<_> = sample.iter().map(|q| q.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 30);

    // Asking for more than exist returns all of them
    let all = sample_questions(questions.clone(), 80, &mut rng);
    assert_eq!(all.len(), 50);

    // Same seed, same sample
    let a = sample_questions(questions.clone(), 10, &mut StdRng::seed_from_u64(1));
    let b = sample_questions(questions, 10, &mut StdRng::seed_from_u64(1));
    assert_eq!(a, b);
}

#[test]
fn test_build_uses_config() {
    let mut rng = StdRng::seed_from_u64(3);
    let config = SessionConfig {
        duration_secs: 42,
        sample_size: Some(2),
        scoring: ScoringPolicy::GroundTruth,
    };
    let session = build(three_questions(), &config, &mut rng);
    assert_eq!(session.len(), 2);
    assert_eq!(session.duration_secs(), 42);
    assert_eq!(session.phase(), Phase::Instructions);

    let session = build(three_questions(), &SessionConfig::remote(), &mut rng);
    assert_eq!(session.len(), 3);
    assert_eq!(session.questions()[0].prompt, "First");
    assert_eq!(session.duration_secs(), 600);
}
