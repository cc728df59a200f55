use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::QuizError;
use crate::model::{option_letter, Question};
use crate::scoring::{Score, ScoringPolicy};
use crate::session::{QuizSession, SubmitReason};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultReport {
    pub quiz: QuizMeta,
    pub score: Option<Score>,
    pub questions: Vec<QuestionEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizMeta {
    pub title: String,
    pub source: String,
    pub question_set_hash: String,
    pub started_at: Option<String>,
    pub submitted_at: Option<String>,
    pub duration: String,
    pub submitted_by: Option<SubmitReason>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionEntry {
    pub number: usize,
    pub id: String,
    pub prompt: String,
    pub options: BTreeMap<String, String>,
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bookmarked: bool,
}

fn option_key(idx: usize) -> String {
    match option_letter(idx) {
        Some(c) => c.to_string(),
        None => (idx + 1).to_string(),
    }
}

pub fn build_report(
    session: &QuizSession,
    policy: ScoringPolicy,
    title: &str,
    source: &str,
) -> ResultReport {
    let questions = session
        .questions()
        .iter()
        .enumerate()
        .map(|(i, q)| QuestionEntry {
            number: i + 1,
            id: q.id.to_string(),
            prompt: q.prompt.clone(),
            options: q
                .options
                .iter()
                .enumerate()
                .map(|(j, text)| (option_key(j), text.clone()))
                .collect(),
            answer: session.answer_for(&q.id).map(option_key),
            correct: q.correct_option.map(option_key),
            bookmarked: session.is_bookmarked(&q.id),
        })
        .collect();

    ResultReport {
        quiz: QuizMeta {
            title: title.to_string(),
            source: source.to_string(),
            question_set_hash: question_set_hash(session.questions()),
            started_at: session.started_at().map(|t| t.to_rfc3339()),
            submitted_at: session.submitted_at().map(|t| t.to_rfc3339()),
            duration: format_hms(session.elapsed_secs()),
            submitted_by: session.submit_reason(),
        },
        score: policy.evaluate(session),
        questions,
    }
}

pub fn render_yaml(report: &ResultReport) -> Result<String, QuizError> {
    Ok(serde_yaml::to_string(report)?)
}

/// Writes the report next to its final path first, then renames it into
/// place so a reader never sees a half-written file.
pub fn export_report(path: &Path, report: &ResultReport) -> Result<(), QuizError> {
    let yaml = render_yaml(report)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| QuizError::ReportWrite {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    atomic_write(path, &yaml)?;
    tracing::info!(path = %path.display(), "result exported");
    Ok(())
}

fn atomic_write(path: &Path, content: &str) -> Result<(), QuizError> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, content).map_err(|source| QuizError::ReportWrite {
        path: tmp.clone(),
        source,
    })?;
    fs::rename(&tmp, path).map_err(|source| QuizError::ReportWrite {
        path: path.to_path_buf(),
        source,
    })
}

pub fn question_set_hash(questions: &[Question]) -> String {
    let mut hasher = Sha256::new();
    for q in questions {
        // Serializing a plain struct of strings and integers cannot fail.
        if let Ok(bytes) = serde_json::to_vec(q) {
            hasher.update(&bytes);
        }
        hasher.update(b"\n");
    }
    format!("sha256:{}", hex_encode(&hasher.finalize()))
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

pub fn format_hms(secs: u64) -> String {
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}
