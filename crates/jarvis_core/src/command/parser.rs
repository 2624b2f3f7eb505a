//! User input parsing.
//!
//! # Responsibility
//! - Split one input line into a command word and prefixed arguments.
//! - Build validated value objects and a ready-to-run `Command`.
//!
//! # Invariants
//! - A prefix is recognised only after whitespace, so `st/` never matches
//!   inside `t/` arguments and vice versa.
//! - When a prefix repeats, the last value wins unless the command accepts
//!   several values (`si/` for consults and mastery checks).

use crate::command::{
    AddLessonCommand, AddNoteCommand, AddStudentCommand, AddTaskCommand, ClearCommand, Command,
    DeleteLessonCommand, DeleteNoteCommand, DeleteStudentCommand, DeleteTaskCommand,
    EditStudentCommand, ExitCommand, FindStudentCommand, FindTaskCommand, GradeCommand,
    HelpCommand, ListLessonCommand, ListStudentCommand, ListTaskCommand, MarkLessonCommand,
    MarkStudentCommand, MarkTaskCommand, SetMasteryCheckResultCommand, UnmarkLessonCommand,
    UnmarkStudentCommand, UnmarkTaskCommand,
};
use crate::index::Index;
use crate::messages::Message;
use crate::model::grade::Assessment;
use crate::model::lesson::{LessonDesc, LessonType, MasteryCheckStatus};
use crate::model::student::{MatricNum, StudentName};
use crate::model::task::{TaskDeadline, TaskDesc};
use crate::model::validation::ValidationError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const PREFIX_NAME: &str = "s/";
pub const PREFIX_MATRIC_NUM: &str = "m/";
pub const PREFIX_TASK_DESC: &str = "t/";
pub const PREFIX_DEADLINE: &str = "d/";
pub const PREFIX_LESSON_DESC: &str = "l/";
pub const PREFIX_START_DATE: &str = "sd/";
pub const PREFIX_START_TIME: &str = "st/";
pub const PREFIX_END_DATE: &str = "ed/";
pub const PREFIX_END_TIME: &str = "et/";
pub const PREFIX_STUDENT_INDEX: &str = "si/";
pub const PREFIX_LESSON_INDEX: &str = "li/";
pub const PREFIX_NOTE_INDEX: &str = "ni/";
pub const PREFIX_NOTE: &str = "n/";
pub const PREFIX_MC_RESULT: &str = "r/";
pub const PREFIX_RA1: &str = "ra1/";
pub const PREFIX_RA2: &str = "ra2/";
pub const PREFIX_MID_TERM: &str = "mt/";
pub const PREFIX_PRACTICAL: &str = "pa/";
pub const PREFIX_FINAL: &str = "fa/";

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

static INDEX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid index regex"));

/// Input that could not be turned into a command.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    UnknownCommand,
    /// Arguments do not match the command's shape.
    InvalidFormat { usage: &'static str },
    /// Prefixed index is not a positive integer.
    InvalidIndex,
    InvalidDate(String),
    InvalidTime(String),
    InvalidMarks(Assessment),
    InvalidMasteryCheckResult(String),
    BlankNote,
    /// Value-object constraint violation.
    Value(ValidationError),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCommand => write!(f, "{}", Message::UnknownCommand),
            Self::InvalidFormat { usage } => {
                write!(f, "{}", Message::InvalidCommandFormat { usage })
            }
            Self::InvalidIndex => f.write_str("Index is not a non-zero unsigned integer."),
            Self::InvalidDate(_) => f.write_str("Dates should be in yyyy-MM-dd format"),
            Self::InvalidTime(_) => f.write_str("Times should be in HH:mm format"),
            Self::InvalidMarks(assessment) => write!(
                f,
                "Marks for {} should be a number between 0 and {}",
                assessment.label(),
                assessment.max_marks()
            ),
            Self::InvalidMasteryCheckResult(_) => {
                f.write_str("Mastery check result should be one of: pass, fail, na")
            }
            Self::BlankNote => f.write_str("Notes should not be blank"),
            Self::Value(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Value(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ParseError {
    fn from(value: ValidationError) -> Self {
        Self::Value(value)
    }
}

type ParseResult<T> = Result<T, ParseError>;

/// Prefixed arguments of one input line.
#[derive(Debug, Default)]
struct ArgumentMultimap {
    preamble: String,
    values: HashMap<&'static str, Vec<String>>,
}

impl ArgumentMultimap {
    fn value(&self, prefix: &str) -> Option<&str> {
        self.values
            .get(prefix)
            .and_then(|values| values.last())
            .map(String::as_str)
    }

    fn all_values(&self, prefix: &str) -> &[String] {
        self.values
            .get(prefix)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn has_all(&self, prefixes: &[&str]) -> bool {
        prefixes.iter().all(|prefix| self.value(prefix).is_some())
    }
}

fn tokenize(args: &str, prefixes: &[&'static str]) -> ArgumentMultimap {
    let padded = format!(" {args}");
    let mut positions = prefixes
        .iter()
        .flat_map(|prefix| {
            let needle = format!(" {prefix}");
            padded
                .match_indices(&needle)
                .map(|(position, _)| (position, *prefix))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    positions.sort_by_key(|(position, _)| *position);

    let preamble_end = positions
        .first()
        .map_or(padded.len(), |(position, _)| *position);
    let mut multimap = ArgumentMultimap {
        preamble: padded[..preamble_end].trim().to_string(),
        values: HashMap::new(),
    };
    for (idx, (position, prefix)) in positions.iter().enumerate() {
        let value_start = position + 1 + prefix.len();
        let value_end = positions
            .get(idx + 1)
            .map_or(padded.len(), |(next, _)| *next);
        multimap
            .values
            .entry(*prefix)
            .or_default()
            .push(padded[value_start..value_end].trim().to_string());
    }
    multimap
}

fn parse_index(value: &str) -> ParseResult<Index> {
    let trimmed = value.trim();
    if !INDEX_RE.is_match(trimmed) {
        return Err(ParseError::InvalidIndex);
    }
    trimmed
        .parse::<usize>()
        .ok()
        .and_then(Index::from_one_based)
        .ok_or(ParseError::InvalidIndex)
}

/// Parses a bare index argument, reporting the command usage on failure.
fn parse_preamble_index(args: &str, usage: &'static str) -> ParseResult<Index> {
    parse_index(args).map_err(|_| ParseError::InvalidFormat { usage })
}

fn parse_date(value: &str) -> ParseResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| ParseError::InvalidDate(value.to_string()))
}

fn parse_time(value: &str) -> ParseResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT)
        .map_err(|_| ParseError::InvalidTime(value.to_string()))
}

fn parse_keywords(args: &str, usage: &'static str) -> ParseResult<Vec<String>> {
    let keywords = args
        .split_whitespace()
        .map(str::to_string)
        .collect::<Vec<_>>();
    if keywords.is_empty() {
        return Err(ParseError::InvalidFormat { usage });
    }
    Ok(keywords)
}

/// Parses one line of user input into a command.
///
/// # Errors
/// - `ParseError::UnknownCommand` for an unrecognised command word.
/// - `ParseError::InvalidFormat` when arguments do not fit the command.
/// - Value-level variants when an argument fails its constraint.
pub fn parse_command(line: &str) -> ParseResult<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(ParseError::InvalidFormat {
            usage: HelpCommand::USAGE,
        });
    }
    let (word, args) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));

    let command = match word {
        AddStudentCommand::WORD => Command::AddStudent(parse_add_student(args)?),
        EditStudentCommand::WORD => Command::EditStudent(parse_edit_student(args)?),
        DeleteStudentCommand::WORD => Command::DeleteStudent(DeleteStudentCommand {
            index: parse_preamble_index(args, DeleteStudentCommand::USAGE)?,
        }),
        FindStudentCommand::WORD => Command::FindStudent(FindStudentCommand {
            keywords: parse_keywords(args, FindStudentCommand::USAGE)?,
        }),
        ListStudentCommand::WORD => Command::ListStudent(ListStudentCommand),
        GradeCommand::WORD => Command::Grade(parse_grade(args)?),
        AddTaskCommand::WORD => Command::AddTask(parse_add_task(args)?),
        DeleteTaskCommand::WORD => Command::DeleteTask(DeleteTaskCommand {
            index: parse_preamble_index(args, DeleteTaskCommand::USAGE)?,
        }),
        MarkTaskCommand::WORD => Command::MarkTask(MarkTaskCommand {
            index: parse_preamble_index(args, MarkTaskCommand::USAGE)?,
        }),
        UnmarkTaskCommand::WORD => Command::UnmarkTask(UnmarkTaskCommand {
            index: parse_preamble_index(args, UnmarkTaskCommand::USAGE)?,
        }),
        FindTaskCommand::WORD => Command::FindTask(FindTaskCommand {
            keywords: parse_keywords(args, FindTaskCommand::USAGE)?,
        }),
        ListTaskCommand::WORD => Command::ListTask(ListTaskCommand),
        AddLessonCommand::STUDIO_WORD => {
            Command::AddLesson(parse_add_lesson(args, LessonType::Studio)?)
        }
        AddLessonCommand::CONSULT_WORD => {
            Command::AddLesson(parse_add_lesson(args, LessonType::Consult)?)
        }
        AddLessonCommand::MASTERY_CHECK_WORD => {
            Command::AddLesson(parse_add_lesson(args, LessonType::MasteryCheck)?)
        }
        DeleteLessonCommand::WORD => Command::DeleteLesson(DeleteLessonCommand {
            index: parse_preamble_index(args, DeleteLessonCommand::USAGE)?,
        }),
        MarkLessonCommand::WORD => Command::MarkLesson(MarkLessonCommand {
            index: parse_preamble_index(args, MarkLessonCommand::USAGE)?,
        }),
        UnmarkLessonCommand::WORD => Command::UnmarkLesson(UnmarkLessonCommand {
            index: parse_preamble_index(args, UnmarkLessonCommand::USAGE)?,
        }),
        MarkStudentCommand::WORD => {
            let (lesson_index, student_index) =
                parse_lesson_student(args, MarkStudentCommand::USAGE)?;
            Command::MarkStudent(MarkStudentCommand {
                lesson_index,
                student_index,
            })
        }
        UnmarkStudentCommand::WORD => {
            let (lesson_index, student_index) =
                parse_lesson_student(args, UnmarkStudentCommand::USAGE)?;
            Command::UnmarkStudent(UnmarkStudentCommand {
                lesson_index,
                student_index,
            })
        }
        SetMasteryCheckResultCommand::WORD => {
            Command::SetMasteryCheckResult(parse_mastery_check_result(args)?)
        }
        ListLessonCommand::WORD => Command::ListLesson(ListLessonCommand),
        AddNoteCommand::WORD => Command::AddNote(parse_add_note(args)?),
        DeleteNoteCommand::WORD => Command::DeleteNote(parse_delete_note(args)?),
        ClearCommand::WORD => Command::Clear(ClearCommand),
        HelpCommand::WORD => Command::Help(HelpCommand),
        ExitCommand::WORD => Command::Exit(ExitCommand),
        _ => return Err(ParseError::UnknownCommand),
    };
    Ok(command)
}

fn parse_add_student(args: &str) -> ParseResult<AddStudentCommand> {
    let usage = AddStudentCommand::USAGE;
    let argmap = tokenize(args, &[PREFIX_NAME, PREFIX_MATRIC_NUM]);
    let (Some(name), Some(matric_num)) = (argmap.value(PREFIX_NAME), argmap.value(PREFIX_MATRIC_NUM))
    else {
        return Err(ParseError::InvalidFormat { usage });
    };
    if !argmap.preamble.is_empty() {
        return Err(ParseError::InvalidFormat { usage });
    }
    Ok(AddStudentCommand {
        name: StudentName::parse(name)?,
        matric_num: MatricNum::parse(matric_num)?,
    })
}

fn parse_edit_student(args: &str) -> ParseResult<EditStudentCommand> {
    let argmap = tokenize(args, &[PREFIX_NAME, PREFIX_MATRIC_NUM]);
    let index = parse_preamble_index(&argmap.preamble, EditStudentCommand::USAGE)?;
    Ok(EditStudentCommand {
        index,
        name: argmap.value(PREFIX_NAME).map(StudentName::parse).transpose()?,
        matric_num: argmap
            .value(PREFIX_MATRIC_NUM)
            .map(MatricNum::parse)
            .transpose()?,
    })
}

fn parse_grade(args: &str) -> ParseResult<GradeCommand> {
    let assessments = [
        (PREFIX_RA1, Assessment::Ra1),
        (PREFIX_RA2, Assessment::Ra2),
        (PREFIX_MID_TERM, Assessment::MidTerm),
        (PREFIX_PRACTICAL, Assessment::PracticalAssessment),
        (PREFIX_FINAL, Assessment::FinalAssessment),
    ];
    let prefixes = assessments.map(|(prefix, _)| prefix);
    let argmap = tokenize(args, &prefixes);
    let index = parse_preamble_index(&argmap.preamble, GradeCommand::USAGE)?;

    let mut marks = Vec::new();
    for (prefix, assessment) in assessments {
        if let Some(value) = argmap.value(prefix) {
            let parsed = value
                .parse::<f64>()
                .map_err(|_| ParseError::InvalidMarks(assessment))?;
            marks.push((assessment, parsed));
        }
    }
    Ok(GradeCommand { index, marks })
}

fn parse_add_task(args: &str) -> ParseResult<AddTaskCommand> {
    let usage = AddTaskCommand::USAGE;
    let argmap = tokenize(args, &[PREFIX_TASK_DESC, PREFIX_DEADLINE]);
    let Some(desc) = argmap.value(PREFIX_TASK_DESC) else {
        return Err(ParseError::InvalidFormat { usage });
    };
    if !argmap.preamble.is_empty() {
        return Err(ParseError::InvalidFormat { usage });
    }
    let deadline = match argmap.value(PREFIX_DEADLINE) {
        Some(value) => TaskDeadline::parse(value)?,
        None => TaskDeadline::default(),
    };
    Ok(AddTaskCommand {
        desc: TaskDesc::parse(desc)?,
        deadline,
    })
}

fn parse_add_lesson(args: &str, lesson_type: LessonType) -> ParseResult<AddLessonCommand> {
    let usage = AddLessonCommand::usage(lesson_type);
    let argmap = tokenize(
        args,
        &[
            PREFIX_LESSON_DESC,
            PREFIX_START_DATE,
            PREFIX_START_TIME,
            PREFIX_END_DATE,
            PREFIX_END_TIME,
            PREFIX_STUDENT_INDEX,
        ],
    );
    let needs_students = lesson_type != LessonType::Studio;
    if !argmap.has_all(&[
        PREFIX_LESSON_DESC,
        PREFIX_START_DATE,
        PREFIX_START_TIME,
        PREFIX_END_TIME,
    ]) || (needs_students && argmap.all_values(PREFIX_STUDENT_INDEX).is_empty())
        || !argmap.preamble.is_empty()
    {
        return Err(ParseError::InvalidFormat { usage });
    }

    let desc = LessonDesc::parse(argmap.value(PREFIX_LESSON_DESC).unwrap_or_default())?;
    let start_date = parse_date(argmap.value(PREFIX_START_DATE).unwrap_or_default())?;
    let start_time = parse_time(argmap.value(PREFIX_START_TIME).unwrap_or_default())?;
    let end_date = match argmap.value(PREFIX_END_DATE) {
        Some(value) => parse_date(value)?,
        None => start_date,
    };
    let end_time = parse_time(argmap.value(PREFIX_END_TIME).unwrap_or_default())?;
    let student_indices = argmap
        .all_values(PREFIX_STUDENT_INDEX)
        .iter()
        .map(|value| parse_index(value))
        .collect::<ParseResult<Vec<_>>>()?;

    Ok(AddLessonCommand {
        lesson_type,
        desc,
        start: NaiveDateTime::new(start_date, start_time),
        end: NaiveDateTime::new(end_date, end_time),
        student_indices,
    })
}

fn parse_lesson_student(args: &str, usage: &'static str) -> ParseResult<(Index, Index)> {
    let argmap = tokenize(args, &[PREFIX_LESSON_INDEX, PREFIX_STUDENT_INDEX]);
    let (Some(lesson_index), Some(student_index)) = (
        argmap.value(PREFIX_LESSON_INDEX),
        argmap.value(PREFIX_STUDENT_INDEX),
    ) else {
        return Err(ParseError::InvalidFormat { usage });
    };
    if !argmap.preamble.is_empty() {
        return Err(ParseError::InvalidFormat { usage });
    }
    Ok((parse_index(lesson_index)?, parse_index(student_index)?))
}

fn parse_mastery_check_result(args: &str) -> ParseResult<SetMasteryCheckResultCommand> {
    let usage = SetMasteryCheckResultCommand::USAGE;
    let argmap = tokenize(
        args,
        &[PREFIX_LESSON_INDEX, PREFIX_STUDENT_INDEX, PREFIX_MC_RESULT],
    );
    let (Some(lesson_index), Some(student_index), Some(result)) = (
        argmap.value(PREFIX_LESSON_INDEX),
        argmap.value(PREFIX_STUDENT_INDEX),
        argmap.value(PREFIX_MC_RESULT),
    ) else {
        return Err(ParseError::InvalidFormat { usage });
    };
    if !argmap.preamble.is_empty() {
        return Err(ParseError::InvalidFormat { usage });
    }
    let status = MasteryCheckStatus::parse(result)
        .ok_or_else(|| ParseError::InvalidMasteryCheckResult(result.to_string()))?;
    Ok(SetMasteryCheckResultCommand {
        lesson_index: parse_index(lesson_index)?,
        student_index: parse_index(student_index)?,
        status,
    })
}

fn parse_add_note(args: &str) -> ParseResult<AddNoteCommand> {
    let usage = AddNoteCommand::USAGE;
    let argmap = tokenize(
        args,
        &[PREFIX_NOTE, PREFIX_LESSON_INDEX, PREFIX_STUDENT_INDEX],
    );
    let (Some(note), Some(lesson_index)) =
        (argmap.value(PREFIX_NOTE), argmap.value(PREFIX_LESSON_INDEX))
    else {
        return Err(ParseError::InvalidFormat { usage });
    };
    if !argmap.preamble.is_empty() {
        return Err(ParseError::InvalidFormat { usage });
    }
    if note.is_empty() {
        return Err(ParseError::BlankNote);
    }
    Ok(AddNoteCommand {
        note: note.to_string(),
        lesson_index: parse_index(lesson_index)?,
        student_index: argmap
            .value(PREFIX_STUDENT_INDEX)
            .map(parse_index)
            .transpose()?,
    })
}

fn parse_delete_note(args: &str) -> ParseResult<DeleteNoteCommand> {
    let usage = DeleteNoteCommand::USAGE;
    let argmap = tokenize(
        args,
        &[PREFIX_LESSON_INDEX, PREFIX_NOTE_INDEX, PREFIX_STUDENT_INDEX],
    );
    let (Some(lesson_index), Some(note_index)) = (
        argmap.value(PREFIX_LESSON_INDEX),
        argmap.value(PREFIX_NOTE_INDEX),
    ) else {
        return Err(ParseError::InvalidFormat { usage });
    };
    if !argmap.preamble.is_empty() {
        return Err(ParseError::InvalidFormat { usage });
    }
    Ok(DeleteNoteCommand {
        note_index: parse_index(note_index)?,
        lesson_index: parse_index(lesson_index)?,
        student_index: argmap
            .value(PREFIX_STUDENT_INDEX)
            .map(parse_index)
            .transpose()?,
    })
}

/// Usage text of every command, shown by `help`.
pub fn usage_summary() -> String {
    let usages = [
        AddStudentCommand::USAGE,
        EditStudentCommand::USAGE,
        DeleteStudentCommand::USAGE,
        FindStudentCommand::USAGE,
        GradeCommand::USAGE,
        AddTaskCommand::USAGE,
        DeleteTaskCommand::USAGE,
        MarkTaskCommand::USAGE,
        UnmarkTaskCommand::USAGE,
        FindTaskCommand::USAGE,
        AddLessonCommand::STUDIO_USAGE,
        AddLessonCommand::CONSULT_USAGE,
        AddLessonCommand::MASTERY_CHECK_USAGE,
        DeleteLessonCommand::USAGE,
        MarkLessonCommand::USAGE,
        UnmarkLessonCommand::USAGE,
        MarkStudentCommand::USAGE,
        UnmarkStudentCommand::USAGE,
        SetMasteryCheckResultCommand::USAGE,
        AddNoteCommand::USAGE,
        DeleteNoteCommand::USAGE,
        HelpCommand::USAGE,
    ];
    let mut summary = usages.join("\n\n");
    summary.push_str(&format!(
        "\n\nOther commands: {}, {}, {}, {}, {}",
        ListStudentCommand::WORD,
        ListTaskCommand::WORD,
        ListLessonCommand::WORD,
        ClearCommand::WORD,
        ExitCommand::WORD
    ));
    summary
}

#[cfg(test)]
mod tests {
    use super::{parse_index, tokenize, ParseError, PREFIX_END_DATE, PREFIX_START_TIME};

    #[test]
    fn tokenizer_separates_preamble_and_prefixed_values() {
        let argmap = tokenize("  3 st/10:00 ed/2022-10-12", &[PREFIX_START_TIME, PREFIX_END_DATE]);
        assert_eq!(argmap.preamble, "3");
        assert_eq!(argmap.value(PREFIX_START_TIME), Some("10:00"));
        assert_eq!(argmap.value(PREFIX_END_DATE), Some("2022-10-12"));
    }

    #[test]
    fn tokenizer_requires_whitespace_before_prefix() {
        let argmap = tokenize("best/value", &[PREFIX_START_TIME]);
        assert_eq!(argmap.preamble, "best/value");
        assert_eq!(argmap.value(PREFIX_START_TIME), None);
    }

    #[test]
    fn index_must_be_positive_unsigned() {
        assert_eq!(parse_index("2").unwrap().zero_based(), 1);
        assert_eq!(parse_index("0"), Err(ParseError::InvalidIndex));
        assert_eq!(parse_index("+1"), Err(ParseError::InvalidIndex));
        assert_eq!(parse_index("-1"), Err(ParseError::InvalidIndex));
    }
}
