//! Student domain model.
//!
//! # Responsibility
//! - Define validated identity/value fields of a student.
//! - Keep grade updates value-returning so the model owns every replacement.
//!
//! # Invariants
//! - `MatricNum` is the only identity key: equality and hashing of `Student`
//!   ignore the name and the grade profile.
//! - `StudentName` is stored normalized (trimmed, single inner spaces).

use crate::model::grade::{Assessment, GradeProfile};
use crate::model::validation::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

static STUDENT_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 ]*$").expect("valid student name regex"));
static MATRIC_NUM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^A[0-9]{7}[A-Z]$").expect("valid matric num regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Validated, normalized student name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StudentName(String);

impl StudentName {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let normalized = WHITESPACE_RE.replace_all(value.trim(), " ").into_owned();
        if !STUDENT_NAME_RE.is_match(&normalized) {
            return Err(ValidationError::StudentName(value.to_string()));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive whole-word match used by `findstudent`.
    pub fn contains_word(&self, keyword: &str) -> bool {
        self.0
            .split(' ')
            .any(|word| word.eq_ignore_ascii_case(keyword.trim()))
    }
}

impl TryFrom<String> for StudentName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StudentName> for String {
    fn from(value: StudentName) -> Self {
        value.0
    }
}

impl Display for StudentName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Matriculation number, e.g. `A0123456X`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MatricNum(String);

impl MatricNum {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if !MATRIC_NUM_RE.is_match(trimmed) {
            return Err(ValidationError::MatricNum(value.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MatricNum {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MatricNum> for String {
    fn from(value: MatricNum) -> Self {
        value.0
    }
}

impl Display for MatricNum {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A student tracked by the teaching assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    name: StudentName,
    matric_num: MatricNum,
    #[serde(default)]
    grades: GradeProfile,
}

impl Student {
    /// Creates a student with an empty grade profile.
    pub fn new(name: StudentName, matric_num: MatricNum) -> Self {
        Self::with_grades(name, matric_num, GradeProfile::new())
    }

    pub fn with_grades(name: StudentName, matric_num: MatricNum, grades: GradeProfile) -> Self {
        Self {
            name,
            matric_num,
            grades,
        }
    }

    pub fn name(&self) -> &StudentName {
        &self.name
    }

    pub fn matric_num(&self) -> &MatricNum {
        &self.matric_num
    }

    pub fn grade_profile(&self) -> &GradeProfile {
        &self.grades
    }

    /// Returns a copy of this student with `marks` recorded for `assessment`.
    pub fn with_mark(&self, assessment: Assessment, marks: f64) -> Result<Self, ValidationError> {
        let mut grades = self.grades.clone();
        grades.grade(assessment, marks)?;
        Ok(Self {
            grades,
            ..self.clone()
        })
    }

    /// Returns a student with new identity fields and the same grade profile.
    pub fn renamed(&self, name: StudentName, matric_num: MatricNum) -> Self {
        Self::with_grades(name, matric_num, self.grades.clone())
    }

    /// Display ordering: by name, then matric number for determinism.
    pub fn cmp_by_name(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.matric_num.cmp(&other.matric_num))
    }
}

impl PartialEq for Student {
    fn eq(&self, other: &Self) -> bool {
        self.matric_num == other.matric_num
    }
}

impl Eq for Student {}

impl Hash for Student {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.matric_num.hash(state);
    }
}

impl Display for Student {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
