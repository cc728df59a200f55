use std::fs;

use serde_json::json;
use skillquiz::model::{QuestionId, RawQuestionRecord};
use skillquiz::normalize::{normalize, normalize_report, parse_payload, RecordIssue};

fn records(values: Vec<serde_json::Value>) -> Vec<RawQuestionRecord> {
    values.into_iter().map(RawQuestionRecord::from).collect()
}

#[test]
fn test_discrete_fields_with_text_answer() {
    let raw = records(vec![json!({
        "question": "2+2?",
        "option1": "3",
        "option2": "4",
        "answer": "4"
    })]);
    let questions = normalize(&raw);

    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].prompt, "2+2?");
    assert_eq!(questions[0].options, vec!["3", "4"]);
    assert_eq!(questions[0].correct_option, Some(1));
    assert_eq!(questions[0].id, QuestionId::Position(0));
}

#[test]
fn test_empty_input() {
    assert!(normalize(&[]).is_empty());
}

#[test]
fn test_mixed_shapes_fixture() {
    let content = fs::read_to_string("fixtures/mixed_shapes.json").expect("Cannot read fixture");
    let raw = parse_payload(&content);
    assert_eq!(raw.len(), 7);

    let report = normalize_report(&raw);
    let q = &report.questions;
    assert_eq!(q.len(), 7);

    // Array options
    assert_eq!(q[0].id, QuestionId::from(10u64));
    assert_eq!(q[0].options, vec!["int", "char", "float", "double"]);
    assert_eq!(q[0].correct_option, Some(0));

    // Stringified array
    assert_eq!(q[1].prompt, "Pick the loop keyword");
    assert_eq!(q[1].options, vec!["for", "if", "goto"]);
    assert_eq!(q[1].correct_option, Some(0));

    // option_1..4, prompt under `ques`
    assert_eq!(q[2].prompt, "Size of char?");
    assert_eq!(q[2].options, vec!["1", "2", "4", "8"]);
    assert_eq!(q[2].correct_option, Some(0));

    // a..d, prompt under `text`
    assert_eq!(q[3].prompt, "Which is a container?");
    assert_eq!(q[3].options, vec!["vector", "int", "main", "return"]);
    assert_eq!(q[3].correct_option, Some(0));

    // No prompt, no options
    assert_eq!(q[4].prompt, "Q5");
    assert!(q[4].options.is_empty());

    // Not an object
    assert_eq!(q[5].prompt, "Q6");
    assert_eq!(q[5].id, QuestionId::Position(5));

    // Repeated id
    assert_eq!(q[6].id, QuestionId::Position(6));

    assert!(report.issues.contains(&RecordIssue::MissingPrompt { position: 4 }));
    assert!(report.issues.contains(&RecordIssue::NoOptions { position: 4 }));
    assert!(report.issues.contains(&RecordIssue::NotAnObject { position: 5 }));
    assert!(report.issues.contains(&RecordIssue::DuplicateId {
        position: 6,
        id: "10".to_string()
    }));
}

#[test]
fn test_prompt_priority() {
    let raw = records(vec![json!({
        "text": "from text",
        "ques": "from ques",
        "question_text": "from question_text",
        "options": ["x"]
    })]);
    assert_eq!(normalize(&raw)[0].prompt, "from question_text");

    let raw = records(vec![json!({"question": "   ", "ques": "from ques", "options": ["x"]})]);
    assert_eq!(normalize(&raw)[0].prompt, "from ques");
}

#[test]
fn test_malformed_literal_falls_back_to_split() {
    let raw = records(vec![json!({
        "question": "Contraction?",
        "options": "['don't', 'do not', 'dont']",
        "answer": "do not"
    })]);
    let q = &normalize(&raw)[0];
    assert_eq!(q.options, vec!["don't", "do not", "dont"]);
    assert_eq!(q.correct_option, Some(1));
}

#[test]
fn test_array_options_skip_blank_entries() {
    let raw = records(vec![json!({"question": "q", "options": ["a", "", null, "b"]})]);
    assert_eq!(normalize(&raw)[0].options, vec!["a", "b"]);
}

#[test]
fn test_answer_as_index_and_number() {
    let raw = records(vec![
        json!({"id": "n1", "question": "Pick second", "options": ["x", "y", "z"], "answer": 1}),
        json!({"id": "n2", "question": "2*2?", "options": ["2", "4", "8"], "answer": 4}),
        json!({"id": "n3", "question": "Out of range", "options": ["x"], "answer": 7}),
    ]);
    let report = normalize_report(&raw);
    assert_eq!(report.questions[0].correct_option, Some(1));
    // Text match wins over index
    assert_eq!(report.questions[1].correct_option, Some(1));
    assert_eq!(report.questions[2].correct_option, None);
    assert!(report
        .issues
        .contains(&RecordIssue::UnresolvedAnswer { position: 2 }));
}

#[test]
fn test_answer_case_insensitive_and_letter() {
    let raw = records(vec![
        json!({"question": "q1", "options": ["True", "False"], "answer": " false "}),
        json!({"question": "q2", "options": ["alpha", "beta", "gamma"], "answer": "c"}),
    ]);
    let q = normalize(&raw);
    assert_eq!(q[0].correct_option, Some(1));
    assert_eq!(q[1].correct_option, Some(2));
}

#[test]
fn test_missing_answer_leaves_no_ground_truth() {
    let raw = records(vec![json!({"question": "q", "options": ["a", "b"]})]);
    let q = &normalize(&raw)[0];
    assert!(!q.has_ground_truth());
}

#[test]
fn test_payload_shapes() {
    assert_eq!(parse_payload(r#"[{"question":"a"}]"#).len(), 1);
    assert_eq!(parse_payload(r#"{"questions":[{"question":"a"},{"question":"b"}]}"#).len(), 2);
    assert_eq!(parse_payload(r#"{"data":[{"question":"a"}]}"#).len(), 1);
    assert!(parse_payload("not json").is_empty());
    assert!(parse_payload(r#"{"something":"else"}"#).is_empty());
}

#[test]
fn test_numeric_and_string_ids() {
    let raw = records(vec![
        json!({"id": 7, "question": "a", "options": ["x"]}),
        json!({"id": "abc", "question": "b", "options": ["x"]}),
        json!({"id": "", "question": "c", "options": ["x"]}),
    ]);
    let q = normalize(&raw);
    assert_eq!(q[0].id, QuestionId::from(7u64));
    assert_eq!(q[1].id, QuestionId::from("abc"));
    assert_eq!(q[2].id, QuestionId::Position(2));
}

#[test]
fn test_empty_literal_falls_through_to_discrete_fields() {
    let raw = records(vec![
        json!({"question": "2+2?", "options": "[]", "option1": "3", "option2": "4", "answer": "4"}),
        json!({"question": "Blank?", "options": "['']", "a": "yes", "b": "no", "answer": "no"}),
        json!({"question": "Commas?", "options": "[ , ]", "option_1": "x", "option_2": "y"}),
    ]);
    let report = normalize_report(&raw);
    let q = &report.questions;

    assert_eq!(q[0].options, vec!["3", "4"]);
    assert_eq!(q[0].correct_option, Some(1));
    assert_eq!(q[1].options, vec!["yes", "no"]);
    assert_eq!(q[1].correct_option, Some(1));
    assert_eq!(q[2].options, vec!["x", "y"]);
    assert!(report.issues.is_empty());
}

#[test]
fn test_empty_literal_without_fallback_has_no_options() {
    let raw = records(vec![json!({"question": "Nothing", "options": "[[]]"})]);
    let report = normalize_report(&raw);
    assert!(report.questions[0].options.is_empty());
    assert!(report.issues.contains(&RecordIssue::NoOptions { position: 0 }));
}

#[test]
fn test_booleans_are_not_text() {
    let raw = records(vec![json!({
        "id": true,
        "question": true,
        "options": [true, "real"],
        "option1": false
    })]);
    let q = &normalize(&raw)[0];
    assert_eq!(q.prompt, "Q1");
    assert_eq!(q.options, vec!["real"]);
    assert_eq!(q.id, QuestionId::Position(0));
}
