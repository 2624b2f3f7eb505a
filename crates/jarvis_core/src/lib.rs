//! Core domain logic for JARVIS, a teaching assistant's student, lesson and
//! task manager. This crate owns every business rule; shells only parse
//! input, run commands and display outcomes.

pub mod command;
pub mod config;
pub mod index;
pub mod logging;
pub mod messages;
pub mod model;
pub mod repo;

pub use command::parser::{parse_command, usage_summary, ParseError};
pub use command::{Command, CommandError, CommandOutcome, CommandResult};
pub use config::{AppConfig, ConfigError};
pub use index::Index;
pub use logging::{default_log_level, init_logging, logging_status};
pub use messages::{IndexKind, ListKind, Message};
pub use model::lesson::{Lesson, LessonType, MasteryCheckStatus};
pub use model::manager::{Model, ModelError, ModelManager};
pub use model::student::{MatricNum, Student, StudentName};
pub use model::task::Task;
pub use repo::json_repo::{
    load_model, save_model, BookRepository, JsonBookRepository, RepoError, RepoResult,
};
