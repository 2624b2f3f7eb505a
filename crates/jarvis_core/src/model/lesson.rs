//! Lesson domain model.
//!
//! # Responsibility
//! - Model studios, consultations and mastery checks as one `Lesson` shape
//!   with a closed `LessonKind` for variant-specific data.
//! - Own the attendance and notes sub-records of a lesson.
//!
//! # Invariants
//! - Enrollment is fixed at creation, has no duplicate matric numbers and
//!   satisfies the lesson type's minimum size.
//! - Attendance, notes and mastery check results are keyed by exactly the
//!   enrolled students.
//! - `students` is kept sorted by name for display.

use crate::messages::{IndexKind, Message};
use crate::model::attendance::LessonAttendance;
use crate::model::lesson_notes::LessonNotes;
use crate::model::student::{MatricNum, Student};
use crate::model::time_period::TimePeriod;
use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier used by the model to replace a lesson value.
pub type LessonId = Uuid;

/// Non-blank lesson title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LessonDesc(String);

impl LessonDesc {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::LessonDesc);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LessonDesc {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LessonDesc> for String {
    fn from(value: LessonDesc) -> Self {
        value.0
    }
}

impl Display for LessonDesc {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lesson category without variant payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonType {
    Studio,
    Consult,
    MasteryCheck,
}

impl LessonType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Studio => "Studio",
            Self::Consult => "Consult",
            Self::MasteryCheck => "Mastery Check",
        }
    }

    /// Smallest enrollment accepted for this lesson type.
    pub fn min_students(self) -> usize {
        match self {
            Self::Studio | Self::Consult | Self::MasteryCheck => 1,
        }
    }
}

/// Outcome of a mastery check for one student.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MasteryCheckStatus {
    #[default]
    NotTaken,
    Passed,
    Failed,
}

impl MasteryCheckStatus {
    /// Parses `pass`, `fail` or `na` (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pass" | "passed" => Some(Self::Passed),
            "fail" | "failed" => Some(Self::Failed),
            "na" | "not taken" => Some(Self::NotTaken),
            _ => None,
        }
    }
}

impl Display for MasteryCheckStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotTaken => f.write_str("Not taken"),
            Self::Passed => f.write_str("Passed"),
            Self::Failed => f.write_str("Failed"),
        }
    }
}

/// Variant-specific lesson data.
#[derive(Debug, Clone, PartialEq)]
pub enum LessonKind {
    Studio,
    Consult,
    MasteryCheck {
        results: BTreeMap<MatricNum, MasteryCheckStatus>,
    },
}

impl LessonKind {
    pub fn lesson_type(&self) -> LessonType {
        match self {
            Self::Studio => LessonType::Studio,
            Self::Consult => LessonType::Consult,
            Self::MasteryCheck { .. } => LessonType::MasteryCheck,
        }
    }
}

/// Errors from lesson enrollment and sub-record lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonError {
    /// Student is not enrolled in the lesson.
    StudentNotFound(MatricNum),
    /// No note at the given 0-based position.
    NoteNotFound(usize),
    /// Enrollment smaller than the lesson type allows.
    NotEnoughStudents { lesson_type: LessonType, min: usize },
    /// The same matric number was enrolled twice.
    DuplicateEnrollment(MatricNum),
    /// Mastery check operation on another lesson type.
    NotMasteryCheck(LessonType),
}

impl Display for LessonError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StudentNotFound(matric) => {
                write!(f, "Student {matric} is not enrolled in this lesson")
            }
            Self::NoteNotFound(_) => {
                write!(f, "{}", Message::InvalidDisplayedIndex(IndexKind::Note))
            }
            Self::NotEnoughStudents { lesson_type, min } => write!(
                f,
                "A {} needs at least {min} student(s)",
                lesson_type.label().to_lowercase()
            ),
            Self::DuplicateEnrollment(matric) => {
                write!(f, "Student {matric} is enrolled more than once")
            }
            Self::NotMasteryCheck(lesson_type) => write!(
                f,
                "Mastery check results can only be set on a mastery check, not a {}",
                lesson_type.label().to_lowercase()
            ),
        }
    }
}

impl Error for LessonError {}

#[derive(Debug, Clone, PartialEq)]
pub struct Lesson {
    id: LessonId,
    kind: LessonKind,
    desc: LessonDesc,
    period: TimePeriod,
    students: Vec<Student>,
    attendance: LessonAttendance,
    notes: LessonNotes,
    is_completed: bool,
}

impl Lesson {
    /// Creates a lesson with a generated stable ID.
    ///
    /// # Errors
    /// - `LessonError::DuplicateEnrollment` for repeated matric numbers.
    /// - `LessonError::NotEnoughStudents` below the type's minimum size.
    pub fn new(
        lesson_type: LessonType,
        desc: LessonDesc,
        period: TimePeriod,
        students: Vec<Student>,
    ) -> Result<Self, LessonError> {
        Self::with_id(Uuid::new_v4(), lesson_type, desc, period, students)
    }

    /// Creates a lesson whose identity already exists (storage paths).
    pub fn with_id(
        id: LessonId,
        lesson_type: LessonType,
        desc: LessonDesc,
        period: TimePeriod,
        mut students: Vec<Student>,
    ) -> Result<Self, LessonError> {
        let mut seen = HashSet::new();
        for student in &students {
            if !seen.insert(student.matric_num()) {
                return Err(LessonError::DuplicateEnrollment(
                    student.matric_num().clone(),
                ));
            }
        }
        let min = lesson_type.min_students();
        if students.len() < min {
            return Err(LessonError::NotEnoughStudents { lesson_type, min });
        }
        students.sort_by(Student::cmp_by_name);

        let kind = match lesson_type {
            LessonType::Studio => LessonKind::Studio,
            LessonType::Consult => LessonKind::Consult,
            LessonType::MasteryCheck => LessonKind::MasteryCheck {
                results: students
                    .iter()
                    .map(|student| (student.matric_num().clone(), MasteryCheckStatus::NotTaken))
                    .collect(),
            },
        };

        Ok(Self {
            id,
            kind,
            desc,
            attendance: LessonAttendance::new(&students),
            notes: LessonNotes::new(&students),
            period,
            students,
            is_completed: false,
        })
    }

    pub fn id(&self) -> LessonId {
        self.id
    }

    pub fn kind(&self) -> &LessonKind {
        &self.kind
    }

    pub fn lesson_type(&self) -> LessonType {
        self.kind.lesson_type()
    }

    pub fn desc(&self) -> &LessonDesc {
        &self.desc
    }

    pub fn period(&self) -> &TimePeriod {
        &self.period
    }

    /// Enrolled students, sorted by name.
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn attendance(&self) -> &LessonAttendance {
        &self.attendance
    }

    pub fn notes(&self) -> &LessonNotes {
        &self.notes
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    pub fn set_completed(&mut self, is_completed: bool) {
        self.is_completed = is_completed;
    }

    pub fn enrolls(&self, matric_num: &MatricNum) -> bool {
        self.students
            .iter()
            .any(|student| student.matric_num() == matric_num)
    }

    pub fn set_attendance(&mut self, student: &Student, present: bool) -> Result<(), LessonError> {
        self.attendance.set_presence(student, present)
    }

    pub fn add_general_note(&mut self, note: impl Into<String>) {
        self.notes.add_general_note(note);
    }

    pub fn add_student_note(
        &mut self,
        student: &Student,
        note: impl Into<String>,
    ) -> Result<(), LessonError> {
        self.notes.add_student_note(student, note)
    }

    pub fn delete_general_note(&mut self, index: usize) -> Result<String, LessonError> {
        self.notes.delete_general_note(index)
    }

    pub fn delete_student_note(
        &mut self,
        student: &Student,
        index: usize,
    ) -> Result<String, LessonError> {
        self.notes.delete_student_note(student, index)
    }

    pub fn mastery_check_status(&self, student: &Student) -> Result<MasteryCheckStatus, LessonError> {
        match &self.kind {
            LessonKind::MasteryCheck { results } => results
                .get(student.matric_num())
                .copied()
                .ok_or_else(|| LessonError::StudentNotFound(student.matric_num().clone())),
            other => Err(LessonError::NotMasteryCheck(other.lesson_type())),
        }
    }

    /// # Errors
    /// - `LessonError::NotMasteryCheck` for studios and consultations.
    /// - `LessonError::StudentNotFound` when `student` is not enrolled.
    pub fn set_mastery_check_status(
        &mut self,
        student: &Student,
        status: MasteryCheckStatus,
    ) -> Result<(), LessonError> {
        match &mut self.kind {
            LessonKind::MasteryCheck { results } => {
                let slot = results
                    .get_mut(student.matric_num())
                    .ok_or_else(|| LessonError::StudentNotFound(student.matric_num().clone()))?;
                *slot = status;
                Ok(())
            }
            other => Err(LessonError::NotMasteryCheck(other.lesson_type())),
        }
    }

    /// Relocates every record of `old` to `new`'s identity.
    ///
    /// Returns `false` and leaves the lesson untouched when `old` is not
    /// enrolled. The caller must ensure `new`'s matric number is not already
    /// enrolled under another student.
    pub fn replace_student(&mut self, old: &MatricNum, new: &Student) -> bool {
        let Some(position) = self
            .students
            .iter()
            .position(|student| student.matric_num() == old)
        else {
            return false;
        };

        self.students[position] = new.clone();
        self.students.sort_by(Student::cmp_by_name);
        self.attendance.replace_student_key(old, new);
        self.notes.replace_student_key(old, new);
        if let LessonKind::MasteryCheck { results } = &mut self.kind {
            let status = results.remove(old).unwrap_or_default();
            results.insert(new.matric_num().clone(), status);
        }
        true
    }

    /// Duplicate check: same type, description and time period.
    pub fn is_same_lesson(&self, other: &Lesson) -> bool {
        self.lesson_type() == other.lesson_type()
            && self.desc == other.desc
            && self.period == other.period
    }

    /// One-line form used in list views and result messages.
    pub fn summary(&self) -> String {
        let status = if self.is_completed { " (completed)" } else { "" };
        format!(
            "[{}] {} {}{status}",
            self.lesson_type().label(),
            self.desc,
            self.period
        )
    }

    /// Multi-line detail view: roster, attendance, results and notes.
    pub fn render_details(&self) -> String {
        let mut rendered = format!("{}\n", self.summary());
        rendered.push_str("Students:\n");
        for (idx, student) in self.students.iter().enumerate() {
            rendered.push_str(&format!(
                "{}. {} ({})\n",
                idx + 1,
                student,
                student.matric_num()
            ));
        }
        rendered.push_str(&self.attendance.render());
        if let LessonKind::MasteryCheck { .. } = self.kind {
            rendered.push_str("Mastery check results:\n");
            for student in &self.students {
                let status = self.mastery_check_status(student).unwrap_or_default();
                rendered.push_str(&format!("{student}: {status}\n"));
            }
        }
        rendered.push_str(&self.notes.render_all());
        rendered
    }
}

impl Display for Lesson {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.desc)
    }
}
