use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "skillquiz", version, about = "Terminal-based timed multiple-choice quiz")]
pub struct Cli {
    /// Practice a bundled bank by subject (e.g. JAVASCRIPT, C++)
    #[arg(long, value_name = "label", conflicts_with_all = ["file", "topic"])]
    pub subject: Option<String>,

    /// Run the questions in a local JSON file
    #[arg(long, value_name = "path", conflicts_with = "topic")]
    pub file: Option<PathBuf>,

    /// Fetch the questions of a remote topic
    #[arg(long, value_name = "code")]
    pub topic: Option<String>,

    /// API token [env: SKILLQUIZ_TOKEN]
    #[arg(long, value_name = "token")]
    pub token: Option<String>,

    /// Time limit in seconds [default: 600 remote, 300 practice]
    #[arg(long, value_name = "secs", value_parser = clap::value_parser!(u64).range(1..))]
    pub duration: Option<u64>,

    /// Ask a random sample of this many questions
    #[arg(long, value_name = "n", value_parser = clap::value_parser!(u64).range(1..))]
    pub sample: Option<u64>,

    /// Ask every question, without sampling
    #[arg(long, conflicts_with = "sample")]
    pub all: bool,

    /// Write the result as YAML to this file after submission
    #[arg(long, value_name = "path")]
    pub export: Option<PathBuf>,

    /// Config file [default: <config dir>/skillquiz/config.yaml]
    #[arg(long, value_name = "path")]
    pub config: Option<PathBuf>,

    /// List practice subjects and their topics, then exit
    #[arg(long)]
    pub list_subjects: bool,

    /// List remote courses, then exit
    #[arg(long)]
    pub list_courses: bool,

    /// List the topics of a remote course, then exit
    #[arg(long, value_name = "course")]
    pub list_topics: Option<String>,
}
