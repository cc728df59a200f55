use std::path::{Path, PathBuf};

use crate::bank;
use crate::error::QuizError;
use crate::model::RawQuestionRecord;
use crate::normalize::parse_payload;

/// Where the raw question records of a run come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionSource {
    /// A bank compiled into the binary, picked by subject label.
    Bundled(String),
    /// A JSON document on disk.
    File(PathBuf),
    /// A topic served by the remote API.
    Remote(String),
}

impl QuestionSource {
    pub fn label(&self) -> String {
        match self {
            QuestionSource::Bundled(subject) => format!("bundled:{}", subject),
            QuestionSource::File(path) => format!("file:{}", path.display()),
            QuestionSource::Remote(topic) => format!("topic:{}", topic),
        }
    }

    /// Human title for the title bar.
    pub fn title(&self) -> String {
        match self {
            QuestionSource::Bundled(subject) => match bank::bank_for_subject(subject) {
                Some(b) => format!("{} practice", b.name()),
                None => format!("{} practice", subject),
            },
            QuestionSource::File(path) => path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Quiz".to_string()),
            QuestionSource::Remote(topic) => format!("Topic {}", topic),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, QuestionSource::Remote(_))
    }

    /// Loads records for the sources that need no network. Remote sources
    /// are fetched in the background by the front-end instead.
    pub fn load_local(&self) -> Result<Vec<RawQuestionRecord>, QuizError> {
        match self {
            QuestionSource::Bundled(subject) => Ok(bank::bundled_questions(subject)),
            QuestionSource::File(path) => load_file(path),
            QuestionSource::Remote(_) => Ok(Vec::new()),
        }
    }
}

pub fn resolve_path(path: &Path) -> PathBuf {
    if path.is_relative() {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    } else {
        path.to_path_buf()
    }
}

pub fn load_file(path: &Path) -> Result<Vec<RawQuestionRecord>, QuizError> {
    let content = std::fs::read_to_string(path).map_err(|source| QuizError::QuestionFile {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_payload(&content);
    tracing::info!(path = %path.display(), records = records.len(), "loaded question file");
    Ok(records)
}
