use std::fs;

use skillquiz::model::{Question, QuestionId};
use skillquiz::report::{build_report, export_report, format_hms, question_set_hash, ResultReport};
use skillquiz::scoring::ScoringPolicy;
use skillquiz::session::{QuizSession, SubmitReason};

fn submitted_session() -> QuizSession {
    let questions = vec![
        Question::new(1u64, "What is 2+2?", &["3", "4"]).with_correct(1),
        Question::new("b", "Pick red", &["red", "blue", "green"]).with_correct(0),
        Question::new(3u64, "Unanswered", &["x", "y"]).with_correct(0),
    ];
    let mut session = QuizSession::new(questions, 300);
    session.begin();
    session.select_answer(&QuestionId::from(1u64), 1);
    session.select_answer(&QuestionId::from("b"), 2);
    session.toggle_bookmark(&QuestionId::from(3u64));
    session.tick();
    session.tick();
    session.submit();
    session
}

#[test]
fn test_build_report() {
    let session = submitted_session();
    let report = build_report(&session, ScoringPolicy::GroundTruth, "Practice", "bundled:cpp");

    assert_eq!(report.quiz.title, "Practice");
    assert_eq!(report.quiz.source, "bundled:cpp");
    assert_eq!(report.quiz.duration, "00:00:02");
    assert_eq!(report.quiz.submitted_by, Some(SubmitReason::Manual));
    assert!(report.quiz.started_at.is_some());
    assert!(report.quiz.question_set_hash.starts_with("sha256:"));

    let score = report.score.unwrap();
    assert_eq!(score.correct_count, 1);
    assert_eq!(score.total, 3);

    assert_eq!(report.questions.len(), 3);
    let first = &report.questions[0];
    assert_eq!(first.number, 1);
    assert_eq!(first.id, "1");
    assert_eq!(first.options.get("B").map(String::as_str), Some("4"));
    assert_eq!(first.answer.as_deref(), Some("B"));
    assert_eq!(first.correct.as_deref(), Some("B"));
    assert!(!first.bookmarked);

    let third = &report.questions[2];
    assert_eq!(third.answer, None);
    assert!(third.bookmarked);
}

#[test]
fn test_unscored_report_omits_score() {
    let session = submitted_session();
    let report = build_report(&session, ScoringPolicy::Unscored, "Topic 7", "topic:7");
    assert!(report.score.is_none());
}

#[test]
fn test_export_round_trip() {
    let tmp_dir = std::env::temp_dir().join("skillquiz_test_export");
    let _ = fs::remove_dir_all(&tmp_dir);
    let path = tmp_dir.join("nested").join("result.yaml");

    let session = submitted_session();
    let report = build_report(&session, ScoringPolicy::GroundTruth, "Practice", "file:q.json");
    export_report(&path, &report).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("submitted_by: manual"));
    assert!(content.contains("question_set_hash: sha256:"));
    assert!(!path.with_extension("tmp").exists());

    let parsed: ResultReport = serde_yaml::from_str(&content).unwrap();
    assert_eq!(parsed, report);

    let _ = fs::remove_dir_all(&tmp_dir);
}

#[test]
fn test_hash_depends_on_content_and_order() {
    let a = vec![
        Question::new(1u64, "one", &["x"]),
        Question::new(2u64, "two", &["y"]),
    ];
    let b = vec![a[1].clone(), a[0].clone()];
    assert_eq!(question_set_hash(&a), question_set_hash(&a.clone()));
    assert_ne!(question_set_hash(&a), question_set_hash(&b));
}

#[test]
fn test_format_hms() {
    assert_eq!(format_hms(0), "00:00:00");
    assert_eq!(format_hms(600), "00:10:00");
    assert_eq!(format_hms(3661), "01:01:01");
}
