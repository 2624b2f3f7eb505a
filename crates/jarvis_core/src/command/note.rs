//! Lesson note commands.
//!
//! A note belongs to the lesson as a whole, or to one enrolled student when
//! a student index is given. Both commands reset the lesson view afterwards.

use crate::command::{resolve, resolve_enrolled, CommandError, CommandOutcome, CommandResult};
use crate::index::Index;
use crate::messages::IndexKind;
use crate::model::book::show_all;
use crate::model::lesson::LessonError;
use crate::model::manager::Model;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddNoteCommand {
    pub note: String,
    pub lesson_index: Index,
    pub student_index: Option<Index>,
}

impl AddNoteCommand {
    pub const WORD: &'static str = "addnote";
    pub const USAGE: &'static str = "addnote: Adds a note to a lesson or for a specific student \
        in a lesson if the optional student index is specified. The student and lesson are \
        identified by their index numbers in the displayed student list and the displayed \
        lesson list.\n\
        Parameters: n/NOTE li/LESSON_INDEX [si/STUDENT_INDEX]\n\
        Example: addnote n/Get back to jeff on streams li/1 si/2";

    pub fn execute(self, model: &mut dyn Model) -> CommandResult {
        let mut lesson =
            resolve(model.filtered_lessons(), self.lesson_index, IndexKind::Lesson)?.clone();
        let feedback = match self.student_index {
            Some(student_index) => {
                let student = resolve_enrolled(model, &lesson, student_index)?;
                lesson.add_student_note(&student, self.note.clone())?;
                format!("Noted for {student} in lesson {lesson}: {}", self.note)
            }
            None => {
                lesson.add_general_note(self.note.clone());
                format!("Noted for lesson {lesson}: {}", self.note)
            }
        };

        model.set_lesson(lesson.id(), lesson)?;
        model.update_filtered_lesson_list(show_all());
        Ok(CommandOutcome::new(feedback))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteNoteCommand {
    pub note_index: Index,
    pub lesson_index: Index,
    pub student_index: Option<Index>,
}

impl DeleteNoteCommand {
    pub const WORD: &'static str = "deletenote";
    pub const USAGE: &'static str = "deletenote: Deletes a note from a lesson or from a specific \
        student in a lesson if the optional student index is specified. The note is identified \
        by its index number in the displayed notes.\n\
        Parameters: li/LESSON_INDEX ni/NOTE_INDEX [si/STUDENT_INDEX]\n\
        Example: deletenote li/1 ni/2 si/3";

    pub fn execute(self, model: &mut dyn Model) -> CommandResult {
        let mut lesson =
            resolve(model.filtered_lessons(), self.lesson_index, IndexKind::Lesson)?.clone();
        let note_position = self.note_index.zero_based();
        let feedback = match self.student_index {
            Some(student_index) => {
                let student = resolve_enrolled(model, &lesson, student_index)?;
                let removed = lesson
                    .delete_student_note(&student, note_position)
                    .map_err(note_index_error)?;
                format!("Deleted note for {student} in lesson {lesson}: {removed}")
            }
            None => {
                let removed = lesson
                    .delete_general_note(note_position)
                    .map_err(note_index_error)?;
                format!("Deleted note from lesson {lesson}: {removed}")
            }
        };

        model.set_lesson(lesson.id(), lesson)?;
        model.update_filtered_lesson_list(show_all());
        Ok(CommandOutcome::new(feedback))
    }
}

fn note_index_error(err: LessonError) -> CommandError {
    match err {
        LessonError::NoteNotFound(_) => CommandError::InvalidDisplayedIndex(IndexKind::Note),
        other => CommandError::Lesson(other),
    }
}
