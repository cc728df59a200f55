use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// Identifier of a question within one normalized set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QuestionId {
    /// Taken from the record's own `id` field.
    Source(String),
    /// Position of the record in its input list, used when it has no usable id.
    Position(usize),
}

impl From<u64> for QuestionId {
    fn from(n: u64) -> Self {
        QuestionId::Source(n.to_string())
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        QuestionId::Source(s.to_string())
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionId::Source(s) => f.write_str(s),
            QuestionId::Position(p) => write!(f, "#{}", p),
        }
    }
}

impl Serialize for QuestionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Canonical question. Built by `normalize`, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: String,
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_option: Option<usize>,
}

impl Question {
    pub fn new(id: impl Into<QuestionId>, prompt: &str, options: &[&str]) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_option: None,
        }
    }

    pub fn with_correct(mut self, idx: usize) -> Self {
        self.correct_option = Some(idx);
        self
    }

    pub fn has_ground_truth(&self) -> bool {
        self.correct_option.is_some()
    }
}

/// Display letter for an option index (`A`, `B`, ...).
pub fn option_letter(idx: usize) -> Option<char> {
    if idx < 26 {
        Some((b'A' + idx as u8) as char)
    } else {
        None
    }
}

/// Inverse of `option_letter`, case-insensitive.
pub fn letter_index(c: char) -> Option<usize> {
    let c = c.to_ascii_lowercase();
    if c.is_ascii_lowercase() {
        Some((c as u8 - b'a') as usize)
    } else {
        None
    }
}

/// One question exactly as the source delivered it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawQuestionRecord(pub serde_json::Value);

impl From<serde_json::Value> for RawQuestionRecord {
    fn from(v: serde_json::Value) -> Self {
        RawQuestionRecord(v)
    }
}

/// A list document as served by the API or stored in a bank file: either the
/// bare array or an object wrapping it under a well-known key.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Bare(Vec<T>),
    Questions { questions: Vec<T> },
    Topics { topics: Vec<T> },
    Courses { courses: Vec<T> },
    Data { data: Vec<T> },
}

impl<T> Listing<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Listing::Bare(items)
            | Listing::Questions { questions: items }
            | Listing::Topics { topics: items }
            | Listing::Courses { courses: items }
            | Listing::Data { data: items } => items,
        }
    }
}

pub type QuestionPayload = Listing<RawQuestionRecord>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Course {
    #[serde(default, alias = "course_code", alias = "courseCode", deserialize_with = "lenient_string")]
    pub code: String,
    #[serde(
        default,
        alias = "course_name",
        alias = "label",
        deserialize_with = "lenient_string"
    )]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Topic {
    #[serde(default, alias = "topic_code", alias = "topicCode", deserialize_with = "lenient_string")]
    pub code: String,
    #[serde(default, alias = "topic", deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub icon: String,
}

/// Accepts strings, numbers and nulls, so one odd field never rejects a row.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}
