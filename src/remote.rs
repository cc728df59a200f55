//! Client for the course/topic/question API.
//!
//! Every listing call degrades to an empty list on failure; the reason is
//! logged and never reaches the caller.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::error::QuizError;
use crate::model::{Course, Listing, RawQuestionRecord, Topic};

pub const DEFAULT_BASE_URL: &str = "https://www.skillupitacademy.com/backend/public/api/auth";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server answered {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(base_url: &str, token: &str, timeout_secs: u64) -> Result<Self, QuizError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Listing<T>, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "GET");
        let response = self.client.get(&url).bearer_auth(&self.token).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        Ok(response.json()?)
    }

    fn list<T: DeserializeOwned>(&self, what: &str, path: &str) -> Vec<T> {
        match self.get::<T>(path) {
            Ok(listing) => {
                let items = listing.into_items();
                tracing::info!(count = items.len(), "fetched {}", what);
                items
            }
            Err(e) => {
                tracing::warn!("Cannot fetch {}: {}", what, e);
                Vec::new()
            }
        }
    }

    pub fn courses(&self) -> Vec<Course> {
        self.list("courses", "/getQuizCourseData")
    }

    pub fn topics(&self, course_code: &str) -> Vec<Topic> {
        self.list("topics", &format!("/getQuizTopicData/{}", course_code))
    }

    pub fn questions(&self, topic_code: &str) -> Vec<RawQuestionRecord> {
        self.list("questions", &format!("/getQuizQuestData/{}", topic_code))
    }
}

/// A question fetch running on its own thread.
///
/// Cancelling, or dropping the handle, sets a flag the worker checks before
/// delivering: a cancelled fetch throws its result away.
pub struct PendingFetch {
    rx: mpsc::Receiver<Vec<RawQuestionRecord>>,
    cancelled: Arc<AtomicBool>,
}

impl PendingFetch {
    /// `Some` once the fetch has finished, `None` while still in flight.
    pub fn poll(&self) -> Option<Vec<RawQuestionRecord>> {
        match self.rx.try_recv() {
            Ok(records) => Some(records),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => {
                tracing::warn!("question fetch ended without a result");
                Some(Vec::new())
            }
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

impl Drop for PendingFetch {
    fn drop(&mut self) {
        self.cancel();
    }
}

pub fn spawn_question_fetch(client: ApiClient, topic_code: String) -> PendingFetch {
    let (tx, rx) = mpsc::channel();
    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancelled);

    thread::spawn(move || {
        let records = client.questions(&topic_code);
        if flag.load(Ordering::Relaxed) {
            tracing::debug!(topic = %topic_code, "fetch cancelled, result discarded");
            return;
        }
        let _ = tx.send(records);
    });

    PendingFetch { rx, cancelled }
}
