use std::path::PathBuf;

use thiserror::Error;

/// Fatal application errors. Anything that can go wrong inside a quiz
/// session itself is absorbed into an empty or placeholder state instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("Cannot read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("No API token. Pass --token or set SKILLQUIZ_TOKEN")]
    MissingToken,
    #[error("Nothing to run. Pass --subject, --file or --topic (see --help)")]
    MissingSource,
    #[error("Cannot read question file {path}: {source}")]
    QuestionFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
    #[error("Cannot write {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot serialize result: {0}")]
    ReportSerialize(#[from] serde_yaml::Error),
    #[error("Cannot build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("Cannot initialise logging in {path}: {source}")]
    Logging {
        path: PathBuf,
        source: std::io::Error,
    },
}
