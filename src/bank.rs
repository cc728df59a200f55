//! Question banks compiled into the binary for offline practice.

use crate::model::RawQuestionRecord;
use crate::normalize::parse_payload;

const JAVASCRIPT_BANK: &str = include_str!("../banks/javascript.json");
const CPP_BANK: &str = include_str!("../banks/cpp.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bank {
    JavaScript,
    Cpp,
}

impl Bank {
    pub fn name(self) -> &'static str {
        match self {
            Bank::JavaScript => "JavaScript",
            Bank::Cpp => "C++",
        }
    }

    fn document(self) -> &'static str {
        match self {
            Bank::JavaScript => JAVASCRIPT_BANK,
            Bank::Cpp => CPP_BANK,
        }
    }
}

/// Picks the bank for a subject label by substring, ignoring case.
pub fn bank_for_subject(label: &str) -> Option<Bank> {
    let label = label.to_lowercase();
    if label.contains("javascript") {
        Some(Bank::JavaScript)
    } else if label.contains("c++") || label.contains("cpp") {
        Some(Bank::Cpp)
    } else {
        None
    }
}

pub fn load_bank(bank: Bank) -> Vec<RawQuestionRecord> {
    parse_payload(bank.document())
}

/// Raw records for a subject; empty when no bank covers it.
pub fn bundled_questions(label: &str) -> Vec<RawQuestionRecord> {
    match bank_for_subject(label) {
        Some(bank) => load_bank(bank),
        None => {
            tracing::info!(subject = label, "no bundled bank for subject");
            Vec::new()
        }
    }
}
