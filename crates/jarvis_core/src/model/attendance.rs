//! Present/absent record of one lesson.
//!
//! # Invariants
//! - Records exist exactly for the students enrolled at creation.
//! - New records start as absent.

use crate::model::lesson::LessonError;
use crate::model::student::{MatricNum, Student};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
struct AttendanceRecord {
    student: Student,
    present: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LessonAttendance {
    records: BTreeMap<MatricNum, AttendanceRecord>,
}

impl LessonAttendance {
    pub fn new<'a>(students: impl IntoIterator<Item = &'a Student>) -> Self {
        let records = students
            .into_iter()
            .map(|student| {
                (
                    student.matric_num().clone(),
                    AttendanceRecord {
                        student: student.clone(),
                        present: false,
                    },
                )
            })
            .collect();
        Self { records }
    }

    /// # Errors
    /// - `LessonError::StudentNotFound` when `student` is not enrolled.
    pub fn set_presence(&mut self, student: &Student, present: bool) -> Result<(), LessonError> {
        let record = self
            .records
            .get_mut(student.matric_num())
            .ok_or_else(|| LessonError::StudentNotFound(student.matric_num().clone()))?;
        record.present = present;
        Ok(())
    }

    pub fn is_present(&self, student: &Student) -> Result<bool, LessonError> {
        self.records
            .get(student.matric_num())
            .map(|record| record.present)
            .ok_or_else(|| LessonError::StudentNotFound(student.matric_num().clone()))
    }

    /// Moves `old`'s record under `new`'s identity.
    ///
    /// # Panics
    /// - When `old` has no record.
    pub fn replace_student_key(&mut self, old: &MatricNum, new: &Student) {
        let record = match self.records.remove(old) {
            Some(record) => record,
            None => panic!("no attendance record for student {old}"),
        };
        self.records.insert(
            new.matric_num().clone(),
            AttendanceRecord {
                student: new.clone(),
                present: record.present,
            },
        );
    }

    pub fn render(&self) -> String {
        let mut records = self.records.values().collect::<Vec<_>>();
        records.sort_by(|left, right| left.student.cmp_by_name(&right.student));
        let mut rendered = String::from("Attendance:\n");
        for record in records {
            let mark = if record.present { "Present" } else { "Absent" };
            rendered.push_str(&format!("{}: {mark}\n", record.student));
        }
        rendered
    }
}
