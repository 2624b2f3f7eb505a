//! Value-object validation errors.
//!
//! # Responsibility
//! - Carry the fixed, user-facing constraint message for every value kind.
//!
//! # Invariants
//! - Each variant renders exactly one constraint message; the offending input
//!   is kept for diagnostics but never changes the message text.

use crate::model::grade::Assessment;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const STUDENT_NAME_CONSTRAINTS: &str =
    "Names should only contain alphanumeric characters and spaces, and it should not be blank";
pub const MATRIC_NUM_CONSTRAINTS: &str =
    "Matriculation number should start with 'A', followed by 7 digits and end with a capital letter";
pub const TASK_DESC_CONSTRAINTS: &str = "Task description should not be blank";
pub const TASK_DEADLINE_CONSTRAINTS: &str = "Task deadline should be a valid date in yyyy-MM-dd format";
pub const LESSON_DESC_CONSTRAINTS: &str = "Lesson description should not be blank";
pub const TIME_PERIOD_CONSTRAINTS: &str =
    "Start date time of the lesson should be before its end date time";

/// Failure to construct a value object from raw input.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    StudentName(String),
    MatricNum(String),
    TaskDesc,
    TaskDeadline(String),
    LessonDesc,
    TimePeriod,
    Marks { assessment: Assessment, value: f64 },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StudentName(_) => f.write_str(STUDENT_NAME_CONSTRAINTS),
            Self::MatricNum(_) => f.write_str(MATRIC_NUM_CONSTRAINTS),
            Self::TaskDesc => f.write_str(TASK_DESC_CONSTRAINTS),
            Self::TaskDeadline(_) => f.write_str(TASK_DEADLINE_CONSTRAINTS),
            Self::LessonDesc => f.write_str(LESSON_DESC_CONSTRAINTS),
            Self::TimePeriod => f.write_str(TIME_PERIOD_CONSTRAINTS),
            Self::Marks { assessment, .. } => write!(
                f,
                "Marks for {} should be a number between 0 and {}",
                assessment.label(),
                assessment.max_marks()
            ),
        }
    }
}

impl Error for ValidationError {}
