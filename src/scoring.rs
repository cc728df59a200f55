use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{Question, QuestionId};
use crate::session::QuizSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct_count: usize,
    pub total: usize,
}

impl Score {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct_count as f64 * 100.0 / self.total as f64
        }
    }
}

/// Counts questions whose recorded answer index equals their correct
/// option. Unanswered questions count towards `total` but never score.
pub fn score(answers: &HashMap<QuestionId, usize>, questions: &[Question]) -> Score {
    let correct_count = questions
        .iter()
        .filter(|q| {
            q.correct_option.is_some() && answers.get(&q.id).copied() == q.correct_option
        })
        .count();
    Score {
        correct_count,
        total: questions.len(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPolicy {
    /// Answers are collected but not graded.
    #[default]
    Unscored,
    /// Grade against each question's known correct option.
    GroundTruth,
}

impl ScoringPolicy {
    pub fn evaluate(self, session: &QuizSession) -> Option<Score> {
        match self {
            ScoringPolicy::Unscored => None,
            ScoringPolicy::GroundTruth => {
                let missing = session
                    .questions()
                    .iter()
                    .filter(|q| !q.has_ground_truth())
                    .count();
                if missing > 0 {
                    tracing::warn!(missing, "questions without a correct option, not scoring");
                    return None;
                }
                Some(score(session.answers(), session.questions()))
            }
        }
    }
}
