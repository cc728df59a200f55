//! The quiz session state machine.
//!
//! A `QuizSession` owns one question set and moves forward through
//! `Instructions -> Active -> Submitted`. Every mutation goes through a method
//! that reports whether anything changed; calls that reference a question the
//! session does not own, an option that does not exist, or that arrive in the
//! wrong phase are ignored rather than treated as errors. The session does no
//! I/O and reads no clock: time only advances through `tick`.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::{Question, QuestionId};
use crate::scoring::ScoringPolicy;
use crate::timer::{ClockEvent, SessionClock};

/// Seconds allowed for a quiz fetched from the remote API.
pub const REMOTE_DURATION_SECS: u64 = 600;
/// Seconds allowed for a practice run over a bundled bank.
pub const PRACTICE_DURATION_SECS: u64 = 300;
pub const PRACTICE_SAMPLE_SIZE: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Instructions,
    Active,
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitReason {
    Manual,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not active; the tick was ignored.
    Idle,
    Running(u64),
    /// Time ran out and the session was submitted by this tick.
    Expired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub duration_secs: u64,
    pub sample_size: Option<usize>,
    pub scoring: ScoringPolicy,
}

impl SessionConfig {
    pub fn remote() -> Self {
        Self {
            duration_secs: REMOTE_DURATION_SECS,
            sample_size: None,
            scoring: ScoringPolicy::Unscored,
        }
    }

    pub fn practice() -> Self {
        Self {
            duration_secs: PRACTICE_DURATION_SECS,
            sample_size: Some(PRACTICE_SAMPLE_SIZE),
            scoring: ScoringPolicy::GroundTruth,
        }
    }
}

/// What a submitted session hands back.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionResult {
    pub answers: HashMap<QuestionId, usize>,
    pub bookmarks: HashSet<QuestionId>,
    /// `None` when the set is not scored.
    pub correct_count: Option<usize>,
    pub total: usize,
    pub reason: SubmitReason,
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    phase: Phase,
    questions: Vec<Question>,
    index_of: HashMap<QuestionId, usize>,
    current: usize,
    answers: HashMap<QuestionId, usize>,
    bookmarks: HashSet<QuestionId>,
    clock: SessionClock,
    started_at: Option<DateTime<Utc>>,
    submitted_at: Option<DateTime<Utc>>,
    submit_reason: Option<SubmitReason>,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>, duration_secs: u64) -> Self {
        let index_of = questions
            .iter()
            .enumerate()
            .map(|(i, q)| (q.id.clone(), i))
            .collect();
        Self {
            phase: Phase::Instructions,
            questions,
            index_of,
            current: 0,
            answers: HashMap::new(),
            bookmarks: HashSet::new(),
            clock: SessionClock::new(duration_secs),
            started_at: None,
            submitted_at: None,
            submit_reason: None,
        }
    }

    pub fn begin(&mut self) -> bool {
        if self.phase != Phase::Instructions {
            return false;
        }
        self.phase = Phase::Active;
        self.started_at = Some(Utc::now());
        tracing::info!(
            questions = self.questions.len(),
            duration = self.clock.total(),
            "session started"
        );
        true
    }

    pub fn select_answer(&mut self, id: &QuestionId, option: usize) -> bool {
        if self.phase != Phase::Active {
            return false;
        }
        let Some(&idx) = self.index_of.get(id) else {
            tracing::debug!(%id, "answer for unknown question ignored");
            return false;
        };
        if option >= self.questions[idx].options.len() {
            tracing::debug!(%id, option, "answer for missing option ignored");
            return false;
        }
        self.answers.insert(id.clone(), option) != Some(option)
    }

    pub fn clear_answer(&mut self, id: &QuestionId) -> bool {
        if self.phase != Phase::Active {
            return false;
        }
        self.answers.remove(id).is_some()
    }

    pub fn toggle_bookmark(&mut self, id: &QuestionId) -> bool {
        if self.phase != Phase::Active || !self.index_of.contains_key(id) {
            return false;
        }
        if !self.bookmarks.remove(id) {
            self.bookmarks.insert(id.clone());
        }
        true
    }

    pub fn go_to(&mut self, index: usize) -> bool {
        if self.phase != Phase::Active || index >= self.questions.len() {
            return false;
        }
        let moved = self.current != index;
        self.current = index;
        moved
    }

    pub fn next(&mut self) -> bool {
        self.go_to(self.current + 1)
    }

    pub fn prev(&mut self) -> bool {
        match self.current.checked_sub(1) {
            Some(index) => self.go_to(index),
            None => false,
        }
    }

    pub fn submit(&mut self) -> bool {
        match self.phase {
            Phase::Submitted => false,
            Phase::Instructions | Phase::Active => {
                self.finish(SubmitReason::Manual);
                true
            }
        }
    }

    /// Accounts for one elapsed second. Ticks outside `Active` are ignored,
    /// and the tick that runs the clock out submits the session.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Active {
            return TickOutcome::Idle;
        }
        match self.clock.tick() {
            ClockEvent::Tick(remaining) => TickOutcome::Running(remaining),
            ClockEvent::Expired => {
                self.finish(SubmitReason::Expired);
                TickOutcome::Expired
            }
            ClockEvent::Stopped => TickOutcome::Idle,
        }
    }

    fn finish(&mut self, reason: SubmitReason) {
        self.phase = Phase::Submitted;
        self.submitted_at = Some(Utc::now());
        self.submit_reason = Some(reason);
        tracing::info!(
            ?reason,
            answered = self.answers.len(),
            total = self.questions.len(),
            "session submitted"
        );
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        if self.questions.is_empty() {
            None
        } else {
            Some(self.current)
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    pub fn answer_for(&self, id: &QuestionId) -> Option<usize> {
        self.answers.get(id).copied()
    }

    pub fn is_bookmarked(&self, id: &QuestionId) -> bool {
        self.bookmarks.contains(id)
    }

    pub fn answers(&self) -> &HashMap<QuestionId, usize> {
        &self.answers
    }

    pub fn bookmarks(&self) -> &HashSet<QuestionId> {
        &self.bookmarks
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.clock.remaining()
    }

    pub fn duration_secs(&self) -> u64 {
        self.clock.total()
    }

    /// Seconds the clock ran before submission (or so far).
    pub fn elapsed_secs(&self) -> u64 {
        self.clock.total() - self.clock.remaining()
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    pub fn submit_reason(&self) -> Option<SubmitReason> {
        self.submit_reason
    }

    pub fn result(&self, policy: ScoringPolicy) -> Option<SessionResult> {
        let reason = self.submit_reason?;
        Some(SessionResult {
            answers: self.answers.clone(),
            bookmarks: self.bookmarks.clone(),
            correct_count: policy.evaluate(self).map(|s| s.correct_count),
            total: self.questions.len(),
            reason,
        })
    }
}

/// Uniformly shuffles `questions` and keeps the first `n`.
pub fn sample_questions<R: Rng + ?Sized>(
    mut questions: Vec<Question>,
    n: usize,
    rng: &mut R,
) -> Vec<Question> {
    questions.shuffle(rng);
    questions.truncate(n);
    questions
}

/// Creates a session from a normalized set, sampling it first when the
/// config asks for a sample.
pub fn build<R: Rng + ?Sized>(
    questions: Vec<Question>,
    config: &SessionConfig,
    rng: &mut R,
) -> QuizSession {
    let questions = match config.sample_size {
        Some(n) => sample_questions(questions, n, rng),
        None => questions,
    };
    QuizSession::new(questions, config.duration_secs)
}
