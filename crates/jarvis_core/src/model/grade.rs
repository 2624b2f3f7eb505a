//! Per-student assessment marks.
//!
//! # Invariants
//! - Recorded marks are finite and within `0..=assessment.max_marks()`.
//! - An assessment without a recorded mark is "not graded", never zero.

use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Graded assessment of the course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assessment {
    Ra1,
    Ra2,
    MidTerm,
    PracticalAssessment,
    FinalAssessment,
}

impl Assessment {
    /// All assessments in display order.
    pub const ALL: [Assessment; 5] = [
        Self::Ra1,
        Self::Ra2,
        Self::MidTerm,
        Self::PracticalAssessment,
        Self::FinalAssessment,
    ];

    pub fn max_marks(self) -> f64 {
        match self {
            Self::Ra1 | Self::Ra2 => 10.0,
            Self::MidTerm => 60.0,
            Self::PracticalAssessment => 40.0,
            Self::FinalAssessment => 100.0,
        }
    }

    /// User-facing short label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Ra1 => "RA1",
            Self::Ra2 => "RA2",
            Self::MidTerm => "Mid-Term",
            Self::PracticalAssessment => "Practical Assessment",
            Self::FinalAssessment => "Final Assessment",
        }
    }

    pub fn is_valid_marks(self, marks: f64) -> bool {
        marks.is_finite() && (0.0..=self.max_marks()).contains(&marks)
    }
}

/// Marks recorded for one student, keyed by assessment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<Assessment, f64>", into = "BTreeMap<Assessment, f64>")]
pub struct GradeProfile {
    marks: BTreeMap<Assessment, f64>,
}

impl GradeProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records marks for one assessment, replacing any previous value.
    ///
    /// # Errors
    /// - `ValidationError::Marks` when `marks` is outside the assessment range.
    pub fn grade(&mut self, assessment: Assessment, marks: f64) -> Result<(), ValidationError> {
        if !assessment.is_valid_marks(marks) {
            return Err(ValidationError::Marks {
                assessment,
                value: marks,
            });
        }
        self.marks.insert(assessment, marks);
        Ok(())
    }

    pub fn marks(&self, assessment: Assessment) -> Option<f64> {
        self.marks.get(&assessment).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}

impl TryFrom<BTreeMap<Assessment, f64>> for GradeProfile {
    type Error = ValidationError;

    fn try_from(value: BTreeMap<Assessment, f64>) -> Result<Self, Self::Error> {
        let mut profile = Self::new();
        for (assessment, marks) in value {
            profile.grade(assessment, marks)?;
        }
        Ok(profile)
    }
}

impl From<GradeProfile> for BTreeMap<Assessment, f64> {
    fn from(value: GradeProfile) -> Self {
        value.marks
    }
}

impl Display for GradeProfile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let lines = Assessment::ALL
            .iter()
            .map(|assessment| match self.marks(*assessment) {
                Some(marks) => format!(
                    "{}: {}/{}",
                    assessment.label(),
                    marks,
                    assessment.max_marks()
                ),
                None => format!("{}: -/{}", assessment.label(), assessment.max_marks()),
            })
            .collect::<Vec<_>>();
        f.write_str(&lines.join("\n"))
    }
}
