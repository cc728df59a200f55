//! Turns raw question records into canonical `Question`s.
//!
//! Sources disagree on field names and on how options are encoded, so every
//! shape is recognised here and nowhere else. Normalization never fails: a
//! record that matches no known shape still becomes a question, with a
//! placeholder prompt and/or no options, and the problem is reported as a
//! `RecordIssue`.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::model::{letter_index, Question, QuestionId, QuestionPayload, RawQuestionRecord};

const PROMPT_FIELDS: [&str; 4] = ["question", "question_text", "ques", "text"];

const DISCRETE_OPTION_FIELDS: [&str; 12] = [
    "option1", "option2", "option3", "option4", "option_1", "option_2", "option_3", "option_4",
    "a", "b", "c", "d",
];

const ANSWER_FIELDS: [&str; 3] = ["answer", "correct_answer", "correct_option"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordIssue {
    /// The record was not a JSON object at all.
    NotAnObject { position: usize },
    MissingPrompt { position: usize },
    NoOptions { position: usize },
    /// A ground-truth field was present but matched no option.
    UnresolvedAnswer { position: usize },
    /// The record's id repeated an earlier one; its position was used instead.
    DuplicateId { position: usize, id: String },
}

#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub questions: Vec<Question>,
    pub issues: Vec<RecordIssue>,
}

/// Where a record's options came from.
enum OptionsShape<'a> {
    List(&'a [Value]),
    Literal(Vec<String>),
    Discrete(Vec<String>),
    Missing,
}

pub fn normalize(raw: &[RawQuestionRecord]) -> Vec<Question> {
    normalize_report(raw).questions
}

pub fn normalize_report(raw: &[RawQuestionRecord]) -> Normalized {
    let mut out = Normalized {
        questions: Vec::with_capacity(raw.len()),
        issues: Vec::new(),
    };
    let mut seen_ids: HashSet<String> = HashSet::new();

    for (position, record) in raw.iter().enumerate() {
        let question = match record.0.as_object() {
            Some(fields) => normalize_fields(fields, position, &mut seen_ids, &mut out.issues),
            None => {
                out.issues.push(RecordIssue::NotAnObject { position });
                Question {
                    id: QuestionId::Position(position),
                    prompt: placeholder_prompt(position),
                    options: Vec::new(),
                    correct_option: None,
                }
            }
        };
        out.questions.push(question);
    }

    for issue in &out.issues {
        match issue {
            RecordIssue::NotAnObject { position } => {
                tracing::warn!(position, "question record is not an object")
            }
            RecordIssue::UnresolvedAnswer { position } => {
                tracing::debug!(position, "answer matches no option")
            }
            other => tracing::debug!(?other, "question record degraded"),
        }
    }

    out
}

fn normalize_fields(
    fields: &Map<String, Value>,
    position: usize,
    seen_ids: &mut HashSet<String>,
    issues: &mut Vec<RecordIssue>,
) -> Question {
    let prompt = match first_text(fields, &PROMPT_FIELDS) {
        Some(p) => p,
        None => {
            issues.push(RecordIssue::MissingPrompt { position });
            placeholder_prompt(position)
        }
    };

    let options = match options_shape(fields) {
        OptionsShape::List(items) => items.iter().filter_map(scalar_text).collect(),
        OptionsShape::Literal(items) | OptionsShape::Discrete(items) => items,
        OptionsShape::Missing => Vec::new(),
    };
    if options.is_empty() {
        issues.push(RecordIssue::NoOptions { position });
    }

    let correct_option = match ANSWER_FIELDS.iter().find_map(|k| fields.get(*k)) {
        Some(Value::Null) | None => None,
        Some(answer) => {
            let resolved = resolve_answer(answer, &options);
            if resolved.is_none() {
                issues.push(RecordIssue::UnresolvedAnswer { position });
            }
            resolved
        }
    };

    let id = match fields.get("id").and_then(scalar_text) {
        Some(id) if seen_ids.contains(&id) => {
            issues.push(RecordIssue::DuplicateId { position, id });
            QuestionId::Position(position)
        }
        Some(id) => {
            seen_ids.insert(id.clone());
            QuestionId::Source(id)
        }
        None => QuestionId::Position(position),
    };

    Question {
        id,
        prompt,
        options,
        correct_option,
    }
}

fn placeholder_prompt(position: usize) -> String {
    format!("Q{}", position + 1)
}

/// Non-blank string or number rendered as text. Anything else is not text.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn first_text(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| fields.get(*k))
        .find_map(scalar_text)
}

fn options_shape(fields: &Map<String, Value>) -> OptionsShape<'_> {
    match fields.get("options") {
        Some(Value::Array(items)) if items.iter().any(|v| scalar_text(v).is_some()) => {
            return OptionsShape::List(items);
        }
        Some(Value::String(s)) if !s.trim().is_empty() => {
            let parsed = parse_option_literal(s);
            if !parsed.is_empty() {
                return OptionsShape::Literal(parsed);
            }
        }
        _ => {}
    }

    let discrete: Vec<String> = DISCRETE_OPTION_FIELDS
        .iter()
        .filter_map(|k| fields.get(*k))
        .filter_map(scalar_text)
        .collect();
    if discrete.is_empty() {
        OptionsShape::Missing
    } else {
        OptionsShape::Discrete(discrete)
    }
}

/// Parses an options list serialized as text, e.g. `['A', 'B', 'C']`.
///
/// Single quotes are swapped for double quotes and the result is read as a
/// JSON array. Only when that does not parse (an apostrophe inside an option
/// breaks the swap, for one) is the text split on commas by hand. An array
/// holding nothing usable gives an empty list.
pub fn parse_option_literal(text: &str) -> Vec<String> {
    let swapped = text.replace('\'', "\"");
    if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(&swapped) {
        return items.iter().filter_map(scalar_text).collect();
    }

    let trimmed = text.trim();
    let inner = trimmed.strip_prefix('[').unwrap_or(trimmed);
    let inner = inner.strip_suffix(']').unwrap_or(inner);
    inner
        .split(',')
        .map(|part| strip_quotes(part.trim()).to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

fn strip_quotes(s: &str) -> &str {
    let s = s
        .strip_prefix('\'')
        .or_else(|| s.strip_prefix('"'))
        .unwrap_or(s);
    s.strip_suffix('\'')
        .or_else(|| s.strip_suffix('"'))
        .unwrap_or(s)
}

/// Resolves a ground-truth field to an option index.
fn resolve_answer(answer: &Value, options: &[String]) -> Option<usize> {
    match answer {
        Value::Number(n) => {
            let text = n.to_string();
            options.iter().position(|o| o.trim() == text).or_else(|| {
                n.as_u64()
                    .map(|i| i as usize)
                    .filter(|&i| i < options.len())
            })
        }
        Value::String(s) => {
            let wanted = s.trim();
            if let Some(i) = options.iter().position(|o| o == s) {
                return Some(i);
            }
            if let Some(i) = options
                .iter()
                .position(|o| o.trim().eq_ignore_ascii_case(wanted))
            {
                return Some(i);
            }
            let mut chars = wanted.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => letter_index(c).filter(|&i| i < options.len()),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Reads a question list document in any accepted shape. Unreadable
/// documents yield an empty list.
pub fn parse_payload(content: &str) -> Vec<RawQuestionRecord> {
    match serde_json::from_str::<QuestionPayload>(content) {
        Ok(payload) => payload.into_items(),
        Err(e) => {
            tracing::warn!("Cannot parse question list: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_with_apostrophe_falls_back_to_split() {
        let opts = parse_option_literal("['it's', 'is', 'its']");
        assert_eq!(opts, vec!["it's", "is", "its"]);
    }

    #[test]
    fn literal_without_brackets() {
        assert_eq!(parse_option_literal("red, green ,blue"), vec!["red", "green", "blue"]);
    }

    #[test]
    fn literal_array_without_options_is_empty() {
        assert!(parse_option_literal("[]").is_empty());
        assert!(parse_option_literal("[[]]").is_empty());
        assert!(parse_option_literal("['', ' ']").is_empty());
    }

    #[test]
    fn letter_answer_resolves_by_position() {
        let options = vec!["x".to_string(), "y".to_string()];
        assert_eq!(resolve_answer(&Value::String("B".into()), &options), Some(1));
        assert_eq!(resolve_answer(&Value::String("C".into()), &options), None);
    }
}
