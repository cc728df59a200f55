use std::collections::HashMap;

use skillquiz::model::{Question, QuestionId};
use skillquiz::scoring::{score, Score, ScoringPolicy};
use skillquiz::session::QuizSession;

fn two_questions() -> Vec<Question> {
    vec![
        Question::new(1u64, "first", &["A", "B"]).with_correct(0),
        Question::new(2u64, "second", &["C", "D"]).with_correct(1),
    ]
}

#[test]
fn test_unanswered_counts_as_incorrect() {
    let mut answers = HashMap::new();
    answers.insert(QuestionId::from(1u64), 0);

    assert_eq!(
        score(&answers, &two_questions()),
        Score {
            correct_count: 1,
            total: 2
        }
    );
}

#[test]
fn test_index_equality_only() {
    let mut answers = HashMap::new();
    answers.insert(QuestionId::from(1u64), 1);
    answers.insert(QuestionId::from(2u64), 1);
    let s = score(&answers, &two_questions());
    assert_eq!(s.correct_count, 1);
    assert_eq!(s.total, 2);
    assert_eq!(s.percent(), 50.0);
}

#[test]
fn test_empty_score() {
    let s = score(&HashMap::new(), &[]);
    assert_eq!(s, Score { correct_count: 0, total: 0 });
    assert_eq!(s.percent(), 0.0);
}

#[test]
fn test_policy_on_session() {
    let mut session = QuizSession::new(two_questions(), 60);
    session.begin();
    session.select_answer(&QuestionId::from(1u64), 0);
    session.select_answer(&QuestionId::from(2u64), 1);
    session.submit();

    assert_eq!(ScoringPolicy::Unscored.evaluate(&session), None);
    assert_eq!(
        ScoringPolicy::GroundTruth.evaluate(&session),
        Some(Score {
            correct_count: 2,
            total: 2
        })
    );
}

#[test]
fn test_ground_truth_needs_every_answer_key() {
    let questions = vec![
        Question::new(1u64, "known", &["A", "B"]).with_correct(0),
        Question::new(2u64, "unknown", &["C", "D"]),
    ];
    let mut session = QuizSession::new(questions, 60);
    session.begin();
    session.select_answer(&QuestionId::from(1u64), 0);
    session.submit();

    assert_eq!(ScoringPolicy::GroundTruth.evaluate(&session), None);
}

#[test]
fn test_policy_default_is_unscored() {
    assert_eq!(ScoringPolicy::default(), ScoringPolicy::Unscored);
}
