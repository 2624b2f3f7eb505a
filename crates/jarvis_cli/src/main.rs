//! JARVIS interactive shell.
//!
//! # Responsibility
//! - Resolve configuration, start logging and load the stored books.
//! - Run a read-parse-execute loop over stdin and print command outcomes.
//! - Persist every book after each successful mutating command.

use anyhow::{Context, Result};
use clap::Parser;
use jarvis_core::config::CONFIG_FILE;
use jarvis_core::{
    init_logging, load_model, parse_command, save_model, usage_summary, AppConfig,
    CommandOutcome, JsonBookRepository, ListKind, Model,
};
use log::{error, info};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jarvis")]
#[command(about = "Student, lesson and task manager for teaching assistants")]
#[command(version)]
struct Cli {
    /// Path to config.json
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Directory holding the JSON books (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error (overrides the config file)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = std::path::absolute(&data_dir)
            .with_context(|| format!("invalid data directory {}", data_dir.display()))?;
    }
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level;
    }

    init_logging(&config.log_level, &config.log_dir)
        .map_err(anyhow::Error::msg)
        .context("failed to start logging")?;

    let repo = JsonBookRepository::new(&config.data_dir);
    let mut model = load_model(&repo)
        .with_context(|| format!("failed to load data from {}", config.data_dir.display()))?;
    info!(
        "event=app_ready module=cli status=ok data_dir={} students={} lessons={} tasks={}",
        config.data_dir.display(),
        model.students().len(),
        model.lessons().len(),
        model.tasks().len()
    );

    run_shell(&repo, &mut model)
}

fn run_shell(repo: &JsonBookRepository, model: &mut dyn Model) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    println!("Welcome to JARVIS. Type `help` to see available commands.");

    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        stdout.flush()?;
        let Some(line) = lines.next().transpose()? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        let is_mutating = command.is_mutating();
        match command.execute(model) {
            Ok(outcome) => {
                print_outcome(&outcome, model);
                if is_mutating {
                    if let Err(err) = save_model(repo, model) {
                        error!("event=repo_save module=cli status=error error={err}");
                        println!("Could not save data: {err}");
                    }
                }
                if outcome.exit {
                    break;
                }
            }
            Err(err) => println!("{err}"),
        }
    }
    Ok(())
}

fn print_outcome(outcome: &CommandOutcome, model: &dyn Model) {
    println!("{}", outcome.feedback);
    if outcome.show_help {
        println!("{}", usage_summary());
    }
    match outcome.list {
        Some(ListKind::Students) => {
            for (idx, student) in model.filtered_students().iter().enumerate() {
                println!("{}. {} ({})", idx + 1, student, student.matric_num());
            }
        }
        Some(ListKind::Tasks) => {
            for (idx, task) in model.filtered_tasks().iter().enumerate() {
                println!("{}. {task}", idx + 1);
            }
        }
        Some(ListKind::Lessons) => {
            for (idx, lesson) in model.filtered_lessons().iter().enumerate() {
                print!("{}. {}", idx + 1, lesson.render_details());
            }
        }
        None => {}
    }
}
