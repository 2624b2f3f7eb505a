//! Task domain model.
//!
//! Tasks are standalone to-do items for the teaching assistant; they have no
//! relationship to students or lessons.

use crate::model::validation::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const DEADLINE_INPUT_FORMAT: &str = "%Y-%m-%d";
const DEADLINE_DISPLAY_FORMAT: &str = "%b-%d-%Y";

/// Stable identifier used by the model to replace a task value.
pub type TaskId = Uuid;

/// Non-blank task description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskDesc(String);

impl TaskDesc {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::TaskDesc);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskDesc {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TaskDesc> for String {
    fn from(value: TaskDesc) -> Self {
        value.0
    }
}

impl Display for TaskDesc {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Optional due date of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskDeadline(Option<NaiveDate>);

impl TaskDeadline {
    pub fn new(date: Option<NaiveDate>) -> Self {
        Self(date)
    }

    /// Parses a `yyyy-MM-dd` date.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        NaiveDate::parse_from_str(value.trim(), DEADLINE_INPUT_FORMAT)
            .map(|date| Self(Some(date)))
            .map_err(|_| ValidationError::TaskDeadline(value.to_string()))
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.0
    }
}

impl Display for TaskDeadline {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(date) => write!(f, "{}", date.format(DEADLINE_DISPLAY_FORMAT)),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    desc: TaskDesc,
    deadline: TaskDeadline,
    is_done: bool,
}

impl Task {
    /// Creates a pending task with a generated stable ID.
    pub fn new(desc: TaskDesc, deadline: TaskDeadline) -> Self {
        Self::with_id(Uuid::new_v4(), desc, deadline, false)
    }

    /// Rebuilds a task whose identity already exists (storage paths).
    pub fn with_id(id: TaskId, desc: TaskDesc, deadline: TaskDeadline, is_done: bool) -> Self {
        Self {
            id,
            desc,
            deadline,
            is_done,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn desc(&self) -> &TaskDesc {
        &self.desc
    }

    pub fn deadline(&self) -> TaskDeadline {
        self.deadline
    }

    pub fn is_done(&self) -> bool {
        self.is_done
    }

    /// Returns a copy with the done flag set to `is_done`.
    pub fn with_done(&self, is_done: bool) -> Self {
        Self {
            is_done,
            ..self.clone()
        }
    }

    /// Duplicate check: same description and deadline.
    pub fn is_same_task(&self, other: &Task) -> bool {
        self.desc == other.desc && self.deadline == other.deadline
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mark = if self.is_done { "X" } else { " " };
        write!(f, "[{mark}] {}", self.desc)?;
        if self.deadline.date().is_some() {
            write!(f, " (by {})", self.deadline)?;
        }
        Ok(())
    }
}
