/// A subject offered for practice, with the topic headings it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subject {
    pub label: &'static str,
    pub topics: &'static [&'static str],
}

pub const SUBJECTS: &[Subject] = &[
    Subject {
        label: "C++",
        topics: &[
            "LOGICAL",
            "LOOPING",
            "ARRAYS AND STRINGS",
            "POINTERS AND REFERENCES",
            "STRUCTURES AND UNIONS",
            "ADVANCED LOGIC BUILDING",
            "OBJECT ORIENTED PROGRAM",
            "EXCEPTION HANDLING",
            "FILES AND STREAMS",
        ],
    },
    Subject {
        label: "PYTHON",
        topics: &[
            "OPERATORS",
            "DATATYPES",
            "CONDITIONAL STATEMENTS",
            "LOOPS",
            "FUNCTIONS",
            "OOP",
            "EXCEPTION HANDLING",
            "FILE HANDLING",
            "PYTHON SQL CONNECTIVITY",
            "TKINTER",
        ],
    },
    Subject {
        label: "JAVASCRIPT",
        topics: &[
            "VARIABLES AND DATATYPES",
            "OPERATORS",
            "COMPARISON OPERATORS",
            "LOGICAL",
            "EVENT",
            "ARRAY",
            "FUNCTIONS",
            "OBJECT",
            "DATE OBJECT",
            "LOOP",
            "NOTE MANAGER",
            "DOM",
        ],
    },
    Subject {
        label: "JAVA",
        topics: &[
            "OPERATORS",
            "DATATYPES",
            "CONDITIONAL STATEMENTS",
            "SWITCH",
            "LOOPS",
            "FUNCTIONS",
            "OOP",
            "EXCEPTION HANDLING",
            "FILE HANDLING",
            "COLLECTION",
            "MULTITHREADING",
            "SYNCHRONIZATION",
            "NETWORKING",
        ],
    },
    Subject {
        label: "SQL",
        topics: &[
            "CREATE DATABASE",
            "TABLES",
            "QUERIES",
            "CLAUSES",
            "OPERATORS",
            "AGGREGATE FUNCTIONS",
            "WILDCARD CHARACTERS",
            "SUBQUERIES",
            "DATA CONSTRAINTS",
            "JOINS",
            "FUNCTIONS",
            "VIEWS",
            "INDEXES",
            "STORED PROCEDURES",
            "AUTO INCREMENT",
            "SEQUENCES",
            "TRANSACTIONS",
        ],
    },
    Subject {
        label: "REACTJS",
        topics: &[
            "PROPS AND STATES",
            "CREATE REACT APP",
            "REACT STATE AND PATTERNS",
            "REACT EVENTS",
            "FORMS IN REACT",
            "LIFECYCLE METHODS",
            "REACT ROUTER AND PATTERNS",
            "REACT HOOKS",
            "REACT CONTEXT",
            "REACT REDUCER",
        ],
    },
];

/// Case-insensitive lookup by label.
pub fn find_subject(label: &str) -> Option<&'static Subject> {
    SUBJECTS
        .iter()
        .find(|s| s.label.eq_ignore_ascii_case(label.trim()))
}
