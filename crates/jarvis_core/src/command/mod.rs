//! Command layer: one single-use value per user operation.
//!
//! # Responsibility
//! - Resolve displayed indices against the model's current filtered views.
//! - Run domain validation to completion before any model mutation.
//! - Push whole new entity values through `Model` hooks and report a message.
//!
//! # Invariants
//! - `execute` consumes the command; a command runs at most once.
//! - A failed command leaves the model exactly as it was.

pub mod general;
pub mod lesson;
pub mod note;
pub mod parser;
pub mod student;
pub mod task;

use crate::index::Index;
use crate::messages::{IndexKind, ListKind, Message};
use crate::model::book::FilteredView;
use crate::model::lesson::{Lesson, LessonError};
use crate::model::manager::{Model, ModelError};
use crate::model::student::Student;
use crate::model::validation::ValidationError;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use general::{ClearCommand, ExitCommand, HelpCommand};
pub use lesson::{
    AddLessonCommand, DeleteLessonCommand, ListLessonCommand, MarkLessonCommand,
    MarkStudentCommand, SetMasteryCheckResultCommand, UnmarkLessonCommand, UnmarkStudentCommand,
};
pub use note::{AddNoteCommand, DeleteNoteCommand};
pub use student::{
    AddStudentCommand, DeleteStudentCommand, EditStudentCommand, FindStudentCommand, GradeCommand,
    ListStudentCommand,
};
pub use task::{
    AddTaskCommand, DeleteTaskCommand, FindTaskCommand, ListTaskCommand, MarkTaskCommand,
    UnmarkTaskCommand,
};

pub type CommandResult = Result<CommandOutcome, CommandError>;

/// Recoverable failure of one command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    /// Displayed index is outside the current filtered view.
    InvalidDisplayedIndex(IndexKind),
    Validation(ValidationError),
    Lesson(LessonError),
    Model(ModelError),
    /// New lesson overlaps an existing one.
    LessonClash { existing: String },
    /// Student resolved from `si/` is not enrolled in the lesson.
    StudentNotInLesson { student: String, lesson: String },
    /// Studio creation with an empty student list.
    NoStudentsToEnroll,
    /// `grade` without any assessment mark.
    NothingToGrade,
    /// `editstudent` without any field to change.
    NoFieldsProvided,
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDisplayedIndex(kind) => {
                write!(f, "{}", Message::InvalidDisplayedIndex(*kind))
            }
            Self::Validation(err) => write!(f, "{err}"),
            Self::Lesson(err) => write!(f, "{err}"),
            Self::Model(err) => write!(f, "{err}"),
            Self::LessonClash { existing } => {
                write!(f, "This lesson clashes with an existing lesson: {existing}")
            }
            Self::StudentNotInLesson { student, lesson } => {
                write!(f, "{student} is not enrolled in lesson {lesson}")
            }
            Self::NoStudentsToEnroll => {
                f.write_str("There are no students in the student list to enroll")
            }
            Self::NothingToGrade => f.write_str("At least one assessment mark must be provided"),
            Self::NoFieldsProvided => f.write_str("At least one field to edit must be provided"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Lesson(err) => Some(err),
            Self::Model(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for CommandError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<LessonError> for CommandError {
    fn from(value: LessonError) -> Self {
        Self::Lesson(value)
    }
}

impl From<ModelError> for CommandError {
    fn from(value: ModelError) -> Self {
        Self::Model(value)
    }
}

/// Result of a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Message shown to the user.
    pub feedback: String,
    /// Display layer should show help.
    pub show_help: bool,
    /// Application should exit.
    pub exit: bool,
    /// Filtered list the display layer should print after the feedback.
    pub list: Option<ListKind>,
}

impl CommandOutcome {
    pub fn new(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            show_help: false,
            exit: false,
            list: None,
        }
    }

    pub fn showing(mut self, list: ListKind) -> Self {
        self.list = Some(list);
        self
    }
}

/// Every user operation, as parsed from one input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddStudent(AddStudentCommand),
    EditStudent(EditStudentCommand),
    DeleteStudent(DeleteStudentCommand),
    FindStudent(FindStudentCommand),
    ListStudent(ListStudentCommand),
    Grade(GradeCommand),
    AddTask(AddTaskCommand),
    DeleteTask(DeleteTaskCommand),
    MarkTask(MarkTaskCommand),
    UnmarkTask(UnmarkTaskCommand),
    FindTask(FindTaskCommand),
    ListTask(ListTaskCommand),
    AddLesson(AddLessonCommand),
    DeleteLesson(DeleteLessonCommand),
    MarkLesson(MarkLessonCommand),
    UnmarkLesson(UnmarkLessonCommand),
    MarkStudent(MarkStudentCommand),
    UnmarkStudent(UnmarkStudentCommand),
    SetMasteryCheckResult(SetMasteryCheckResultCommand),
    ListLesson(ListLessonCommand),
    AddNote(AddNoteCommand),
    DeleteNote(DeleteNoteCommand),
    Clear(ClearCommand),
    Help(HelpCommand),
    Exit(ExitCommand),
}

impl Command {
    /// Runs the command against `model`, consuming it.
    pub fn execute(self, model: &mut dyn Model) -> CommandResult {
        let word = self.word();
        let result = match self {
            Self::AddStudent(command) => command.execute(model),
            Self::EditStudent(command) => command.execute(model),
            Self::DeleteStudent(command) => command.execute(model),
            Self::FindStudent(command) => command.execute(model),
            Self::ListStudent(command) => command.execute(model),
            Self::Grade(command) => command.execute(model),
            Self::AddTask(command) => command.execute(model),
            Self::DeleteTask(command) => command.execute(model),
            Self::MarkTask(command) => command.execute(model),
            Self::UnmarkTask(command) => command.execute(model),
            Self::FindTask(command) => command.execute(model),
            Self::ListTask(command) => command.execute(model),
            Self::AddLesson(command) => command.execute(model),
            Self::DeleteLesson(command) => command.execute(model),
            Self::MarkLesson(command) => command.execute(model),
            Self::UnmarkLesson(command) => command.execute(model),
            Self::MarkStudent(command) => command.execute(model),
            Self::UnmarkStudent(command) => command.execute(model),
            Self::SetMasteryCheckResult(command) => command.execute(model),
            Self::ListLesson(command) => command.execute(model),
            Self::AddNote(command) => command.execute(model),
            Self::DeleteNote(command) => command.execute(model),
            Self::Clear(command) => command.execute(model),
            Self::Help(command) => command.execute(model),
            Self::Exit(command) => command.execute(model),
        };

        match &result {
            Ok(_) => info!("event=command_execute module=command status=ok command={word}"),
            Err(err) => warn!(
                "event=command_execute module=command status=error command={word} error={err}"
            ),
        }
        result
    }

    /// Command word as typed by the user.
    pub fn word(&self) -> &'static str {
        match self {
            Self::AddStudent(_) => AddStudentCommand::WORD,
            Self::EditStudent(_) => EditStudentCommand::WORD,
            Self::DeleteStudent(_) => DeleteStudentCommand::WORD,
            Self::FindStudent(_) => FindStudentCommand::WORD,
            Self::ListStudent(_) => ListStudentCommand::WORD,
            Self::Grade(_) => GradeCommand::WORD,
            Self::AddTask(_) => AddTaskCommand::WORD,
            Self::DeleteTask(_) => DeleteTaskCommand::WORD,
            Self::MarkTask(_) => MarkTaskCommand::WORD,
            Self::UnmarkTask(_) => UnmarkTaskCommand::WORD,
            Self::FindTask(_) => FindTaskCommand::WORD,
            Self::ListTask(_) => ListTaskCommand::WORD,
            Self::AddLesson(command) => command.word(),
            Self::DeleteLesson(_) => DeleteLessonCommand::WORD,
            Self::MarkLesson(_) => MarkLessonCommand::WORD,
            Self::UnmarkLesson(_) => UnmarkLessonCommand::WORD,
            Self::MarkStudent(_) => MarkStudentCommand::WORD,
            Self::UnmarkStudent(_) => UnmarkStudentCommand::WORD,
            Self::SetMasteryCheckResult(_) => SetMasteryCheckResultCommand::WORD,
            Self::ListLesson(_) => ListLessonCommand::WORD,
            Self::AddNote(_) => AddNoteCommand::WORD,
            Self::DeleteNote(_) => DeleteNoteCommand::WORD,
            Self::Clear(_) => ClearCommand::WORD,
            Self::Help(_) => HelpCommand::WORD,
            Self::Exit(_) => ExitCommand::WORD,
        }
    }

    /// Whether a successful run changes persisted data.
    pub fn is_mutating(&self) -> bool {
        !matches!(
            self,
            Self::FindStudent(_)
                | Self::ListStudent(_)
                | Self::FindTask(_)
                | Self::ListTask(_)
                | Self::ListLesson(_)
                | Self::Help(_)
                | Self::Exit(_)
        )
    }
}

/// Resolves a displayed index against a filtered view.
pub(crate) fn resolve<'a, T>(
    view: FilteredView<'a, T>,
    index: Index,
    kind: IndexKind,
) -> Result<&'a T, CommandError> {
    view.get(index)
        .ok_or(CommandError::InvalidDisplayedIndex(kind))
}

/// Resolves `student_index` against the student view and checks that the
/// student is enrolled in `lesson`.
pub(crate) fn resolve_enrolled(
    model: &dyn Model,
    lesson: &Lesson,
    student_index: Index,
) -> Result<Student, CommandError> {
    let student = resolve(model.filtered_students(), student_index, IndexKind::Student)?;
    if !lesson.enrolls(student.matric_num()) {
        return Err(CommandError::StudentNotInLesson {
            student: student.to_string(),
            lesson: lesson.to_string(),
        });
    }
    Ok(student.clone())
}
