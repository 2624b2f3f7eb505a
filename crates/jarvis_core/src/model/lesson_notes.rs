//! Free-text notes attached to one lesson.
//!
//! # Responsibility
//! - Keep general lesson notes and per-student notes in insertion order.
//! - Render deterministic, 1-indexed note listings for display.
//!
//! # Invariants
//! - Per-student buckets exist exactly for the students enrolled at creation.
//! - Buckets are keyed by `MatricNum`; the stored `Student` is only used for
//!   display ordering and labels.

use crate::model::lesson::LessonError;
use crate::model::student::{MatricNum, Student};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
struct StudentNotes {
    student: Student,
    notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LessonNotes {
    general: Vec<String>,
    students: BTreeMap<MatricNum, StudentNotes>,
}

impl LessonNotes {
    /// Creates empty notes with one bucket per enrolled student.
    pub fn new<'a>(students: impl IntoIterator<Item = &'a Student>) -> Self {
        let students = students
            .into_iter()
            .map(|student| {
                (
                    student.matric_num().clone(),
                    StudentNotes {
                        student: student.clone(),
                        notes: Vec::new(),
                    },
                )
            })
            .collect();
        Self {
            general: Vec::new(),
            students,
        }
    }

    pub fn add_general_note(&mut self, note: impl Into<String>) {
        self.general.push(note.into());
    }

    /// # Errors
    /// - `LessonError::StudentNotFound` when `student` is not enrolled.
    pub fn add_student_note(
        &mut self,
        student: &Student,
        note: impl Into<String>,
    ) -> Result<(), LessonError> {
        self.bucket_mut(student)?.notes.push(note.into());
        Ok(())
    }

    /// Removes the general note at 0-based `index` and returns it.
    pub fn delete_general_note(&mut self, index: usize) -> Result<String, LessonError> {
        if index >= self.general.len() {
            return Err(LessonError::NoteNotFound(index));
        }
        Ok(self.general.remove(index))
    }

    /// Removes the note at 0-based `index` from `student`'s notes and returns it.
    pub fn delete_student_note(
        &mut self,
        student: &Student,
        index: usize,
    ) -> Result<String, LessonError> {
        let bucket = self.bucket_mut(student)?;
        if index >= bucket.notes.len() {
            return Err(LessonError::NoteNotFound(index));
        }
        Ok(bucket.notes.remove(index))
    }

    pub fn general_notes(&self) -> &[String] {
        &self.general
    }

    pub fn student_notes(&self, student: &Student) -> Result<&[String], LessonError> {
        self.students
            .get(student.matric_num())
            .map(|bucket| bucket.notes.as_slice())
            .ok_or_else(|| LessonError::StudentNotFound(student.matric_num().clone()))
    }

    pub fn render_general(&self) -> String {
        let mut rendered = String::from("Lesson Notes:\n");
        rendered.push_str(&numbered(&self.general));
        rendered
    }

    pub fn render_for_student(&self, student: &Student) -> Result<String, LessonError> {
        self.student_notes(student).map(numbered)
    }

    pub fn render_all(&self) -> String {
        let mut rendered = self.render_general();
        rendered.push_str("\nNotes for individual students:\n");
        let mut buckets = self.students.values().collect::<Vec<_>>();
        buckets.sort_by(|left, right| left.student.cmp_by_name(&right.student));
        for bucket in buckets {
            rendered.push_str(&format!("{}:\n", bucket.student));
            rendered.push_str(&numbered(&bucket.notes));
            rendered.push('\n');
        }
        rendered
    }

    /// Moves `old`'s notes under `new`'s identity, preserving content.
    ///
    /// # Panics
    /// - When `old` has no bucket. Callers only relocate enrolled students.
    pub fn replace_student_key(&mut self, old: &MatricNum, new: &Student) {
        let bucket = match self.students.remove(old) {
            Some(bucket) => bucket,
            None => panic!("no note bucket for student {old}"),
        };
        self.students.insert(
            new.matric_num().clone(),
            StudentNotes {
                student: new.clone(),
                notes: bucket.notes,
            },
        );
    }

    fn bucket_mut(&mut self, student: &Student) -> Result<&mut StudentNotes, LessonError> {
        self.students
            .get_mut(student.matric_num())
            .ok_or_else(|| LessonError::StudentNotFound(student.matric_num().clone()))
    }
}

fn numbered(notes: &[String]) -> String {
    notes
        .iter()
        .enumerate()
        .map(|(idx, note)| format!("{}. {note}\n", idx + 1))
        .collect()
}
