mod cli;

use clap::Parser;

use skillquiz::catalog::{find_subject, SUBJECTS};
use skillquiz::config::Config;
use skillquiz::error::QuizError;
use skillquiz::remote::{spawn_question_fetch, ApiClient};
use skillquiz::session::SessionConfig;
use skillquiz::source::{resolve_path, QuestionSource};
use skillquiz::state::AppState;
use skillquiz::{logging, tui};

use crate::cli::Cli;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), QuizError> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(token) = cli.token.clone() {
        config.api.token = Some(token);
    }

    let _log_guard = match logging::init(&config.log.level, &config.log_dir()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: {}", e);
            None
        }
    };

    if cli.list_subjects {
        for subject in SUBJECTS {
            println!("{}", subject.label);
            for topic in subject.topics {
                println!("  {}", topic);
            }
        }
        return Ok(());
    }

    if cli.list_courses {
        for course in api_client(&config)?.courses() {
            println!("{}\t{}", course.code, course.name);
        }
        return Ok(());
    }

    if let Some(course) = &cli.list_topics {
        for topic in api_client(&config)?.topics(course) {
            println!("{}\t{}", topic.code, topic.name);
        }
        return Ok(());
    }

    let source = if let Some(subject) = &cli.subject {
        let label = find_subject(subject).map_or(subject.as_str(), |s| s.label);
        QuestionSource::Bundled(label.to_string())
    } else if let Some(path) = &cli.file {
        QuestionSource::File(resolve_path(path))
    } else if let Some(topic) = &cli.topic {
        QuestionSource::Remote(topic.clone())
    } else {
        return Err(QuizError::MissingSource);
    };

    let session_config = session_config(&cli, &config, &source);
    tracing::info!(
        source = %source.label(),
        duration = session_config.duration_secs,
        sample = ?session_config.sample_size,
        "starting quiz"
    );

    let mut state = AppState::new(&source.title(), &source.label(), session_config);
    let pending = match &source {
        QuestionSource::Remote(topic) => {
            Some(spawn_question_fetch(api_client(&config)?, topic.clone()))
        }
        local => {
            let records = local.load_local()?;
            state.load_records(&records, &mut rand::rng());
            None
        }
    };

    let export = cli.export.as_deref().map(resolve_path);
    tui::run_tui(state, pending, export)
}

fn api_client(config: &Config) -> Result<ApiClient, QuizError> {
    let token = config
        .api
        .token
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .ok_or(QuizError::MissingToken)?;
    ApiClient::new(&config.api.base_url, token, config.api.timeout_secs)
}

/// Flow preset from the config, with command-line overrides on top.
fn session_config(cli: &Cli, config: &Config, source: &QuestionSource) -> SessionConfig {
    let mut session = if source.is_remote() {
        config.remote_session()
    } else {
        config.practice_session()
    };
    if let Some(secs) = cli.duration {
        session.duration_secs = secs;
    }
    if cli.all {
        session.sample_size = None;
    } else if let Some(n) = cli.sample {
        session.sample_size = Some(n as usize);
    }
    session
}
