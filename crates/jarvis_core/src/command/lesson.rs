//! Lesson commands: scheduling, completion, attendance and mastery check results.

use crate::command::{resolve, resolve_enrolled, CommandError, CommandOutcome, CommandResult};
use crate::index::Index;
use crate::messages::{IndexKind, ListKind};
use crate::model::book::show_all;
use crate::model::lesson::{Lesson, LessonDesc, LessonType, MasteryCheckStatus};
use crate::model::manager::Model;
use crate::model::time_period::TimePeriod;
use chrono::NaiveDateTime;

/// Schedules a studio, consultation or mastery check.
///
/// Studios enroll every student in the current student view; the other
/// types enroll the students named by `student_indices`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddLessonCommand {
    pub lesson_type: LessonType,
    pub desc: LessonDesc,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub student_indices: Vec<Index>,
}

impl AddLessonCommand {
    pub const STUDIO_WORD: &'static str = "addstudio";
    pub const CONSULT_WORD: &'static str = "addconsult";
    pub const MASTERY_CHECK_WORD: &'static str = "addmc";

    pub const STUDIO_USAGE: &'static str = "addstudio: Adds a studio lesson with every student \
        in the displayed student list.\n\
        Parameters: l/LESSON_DESCRIPTION sd/START_DATE st/START_TIME [ed/END_DATE] et/END_TIME\n\
        Example: addstudio l/Studio 3 sd/2022-10-12 st/14:00 et/16:00";
    pub const CONSULT_USAGE: &'static str = "addconsult: Adds a consultation lesson.\n\
        Parameters: l/LESSON_DESCRIPTION sd/START_DATE st/START_TIME [ed/END_DATE] et/END_TIME \
        si/STUDENT_INDEX [si/MORE_STUDENT_INDEX]...\n\
        Example: addconsult l/Recursion sd/2022-10-12 st/14:00 et/15:00 si/1 si/2";
    pub const MASTERY_CHECK_USAGE: &'static str = "addmc: Adds a mastery check lesson.\n\
        Parameters: l/LESSON_DESCRIPTION sd/START_DATE st/START_TIME [ed/END_DATE] et/END_TIME \
        si/STUDENT_INDEX [si/MORE_STUDENT_INDEX]...\n\
        Example: addmc l/Mastery check 1 sd/2022-10-12 st/14:00 et/15:00 si/1 si/2";

    pub fn word(&self) -> &'static str {
        match self.lesson_type {
            LessonType::Studio => Self::STUDIO_WORD,
            LessonType::Consult => Self::CONSULT_WORD,
            LessonType::MasteryCheck => Self::MASTERY_CHECK_WORD,
        }
    }

    pub fn usage(lesson_type: LessonType) -> &'static str {
        match lesson_type {
            LessonType::Studio => Self::STUDIO_USAGE,
            LessonType::Consult => Self::CONSULT_USAGE,
            LessonType::MasteryCheck => Self::MASTERY_CHECK_USAGE,
        }
    }

    pub fn execute(self, model: &mut dyn Model) -> CommandResult {
        let students = match self.lesson_type {
            LessonType::Studio => {
                let everyone = model
                    .filtered_students()
                    .iter()
                    .cloned()
                    .collect::<Vec<_>>();
                if everyone.is_empty() {
                    return Err(CommandError::NoStudentsToEnroll);
                }
                everyone
            }
            LessonType::Consult | LessonType::MasteryCheck => self
                .student_indices
                .iter()
                .map(|index| {
                    resolve(model.filtered_students(), *index, IndexKind::Student).cloned()
                })
                .collect::<Result<Vec<_>, _>>()?,
        };

        let period = TimePeriod::new(self.start, self.end)?;
        let lesson = Lesson::new(self.lesson_type, self.desc, period, students)?;
        if let Some(existing) = model
            .lessons()
            .iter()
            .find(|existing| existing.period().has_overlap(lesson.period()))
        {
            return Err(CommandError::LessonClash {
                existing: existing.summary(),
            });
        }

        let feedback = format!(
            "New {} added: {lesson}",
            self.lesson_type.label().to_lowercase()
        );
        model.add_lesson(lesson)?;
        Ok(CommandOutcome::new(feedback))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteLessonCommand {
    pub index: Index,
}

impl DeleteLessonCommand {
    pub const WORD: &'static str = "deletelesson";
    pub const USAGE: &'static str = "deletelesson: Deletes the lesson identified by the index \
        number used in the displayed lesson list.\n\
        Parameters: INDEX (must be a positive integer)\n\
        Example: deletelesson 1";

    pub fn execute(self, model: &mut dyn Model) -> CommandResult {
        let target = resolve(model.filtered_lessons(), self.index, IndexKind::Lesson)?.id();
        let deleted = model.delete_lesson(target)?;
        Ok(CommandOutcome::new(format!("Deleted Lesson: {deleted}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkLessonCommand {
    pub index: Index,
}

impl MarkLessonCommand {
    pub const WORD: &'static str = "marklesson";
    pub const USAGE: &'static str = "marklesson: Marks the lesson identified by the index number \
        used in the displayed lesson list as completed.\n\
        Parameters: INDEX (must be a positive integer)\n\
        Example: marklesson 1";

    pub fn execute(self, model: &mut dyn Model) -> CommandResult {
        let lesson = set_completed(model, self.index, true)?;
        Ok(CommandOutcome::new(format!(
            "Marked lesson as completed: {lesson}"
        )))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmarkLessonCommand {
    pub index: Index,
}

impl UnmarkLessonCommand {
    pub const WORD: &'static str = "unmarklesson";
    pub const USAGE: &'static str = "unmarklesson: Marks the lesson identified by the index \
        number used in the displayed lesson list as not completed.\n\
        Parameters: INDEX (must be a positive integer)\n\
        Example: unmarklesson 1";

    pub fn execute(self, model: &mut dyn Model) -> CommandResult {
        let lesson = set_completed(model, self.index, false)?;
        Ok(CommandOutcome::new(format!(
            "Marked lesson as not completed: {lesson}"
        )))
    }
}

fn set_completed(
    model: &mut dyn Model,
    index: Index,
    is_completed: bool,
) -> Result<Lesson, CommandError> {
    let mut lesson = resolve(model.filtered_lessons(), index, IndexKind::Lesson)?.clone();
    lesson.set_completed(is_completed);
    model.set_lesson(lesson.id(), lesson.clone())?;
    Ok(lesson)
}

/// Marks a student present for a lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkStudentCommand {
    pub lesson_index: Index,
    pub student_index: Index,
}

impl MarkStudentCommand {
    pub const WORD: &'static str = "markstudent";
    pub const USAGE: &'static str = "markstudent: Marks a student as present for a lesson. The \
        student and lesson are identified by their index numbers in the displayed student list \
        and the displayed lesson list.\n\
        Parameters: li/LESSON_INDEX si/STUDENT_INDEX\n\
        Example: markstudent li/1 si/2";

    pub fn execute(self, model: &mut dyn Model) -> CommandResult {
        let (student, lesson) = set_attendance(model, self.lesson_index, self.student_index, true)?;
        Ok(CommandOutcome::new(format!(
            "Marked {student} as present for {lesson}"
        )))
    }
}

/// Marks a student absent for a lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmarkStudentCommand {
    pub lesson_index: Index,
    pub student_index: Index,
}

impl UnmarkStudentCommand {
    pub const WORD: &'static str = "unmarkstudent";
    pub const USAGE: &'static str = "unmarkstudent: Marks a student as absent for a lesson. The \
        student and lesson are identified by their index numbers in the displayed student list \
        and the displayed lesson list.\n\
        Parameters: li/LESSON_INDEX si/STUDENT_INDEX\n\
        Example: unmarkstudent li/1 si/2";

    pub fn execute(self, model: &mut dyn Model) -> CommandResult {
        let (student, lesson) =
            set_attendance(model, self.lesson_index, self.student_index, false)?;
        Ok(CommandOutcome::new(format!(
            "Marked {student} as absent for {lesson}"
        )))
    }
}

fn set_attendance(
    model: &mut dyn Model,
    lesson_index: Index,
    student_index: Index,
    present: bool,
) -> Result<(String, String), CommandError> {
    let mut lesson = resolve(model.filtered_lessons(), lesson_index, IndexKind::Lesson)?.clone();
    let student = resolve_enrolled(model, &lesson, student_index)?;
    lesson.set_attendance(&student, present)?;

    let rendered = (student.to_string(), lesson.to_string());
    model.set_lesson(lesson.id(), lesson)?;
    model.update_filtered_lesson_list(show_all());
    Ok(rendered)
}

/// Records a mastery check outcome for one enrolled student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetMasteryCheckResultCommand {
    pub lesson_index: Index,
    pub student_index: Index,
    pub status: MasteryCheckStatus,
}

impl SetMasteryCheckResultCommand {
    pub const WORD: &'static str = "mcresult";
    pub const USAGE: &'static str = "mcresult: Sets the mastery check result of a student. The \
        student and lesson are identified by their index numbers in the displayed student list \
        and the displayed lesson list.\n\
        Parameters: li/LESSON_INDEX si/STUDENT_INDEX r/pass|fail|na\n\
        Example: mcresult li/1 si/2 r/pass";

    pub fn execute(self, model: &mut dyn Model) -> CommandResult {
        let mut lesson =
            resolve(model.filtered_lessons(), self.lesson_index, IndexKind::Lesson)?.clone();
        let student = resolve_enrolled(model, &lesson, self.student_index)?;
        lesson.set_mastery_check_status(&student, self.status)?;

        let feedback = format!(
            "Set mastery check result of {student} in {lesson} to {}",
            self.status
        );
        model.set_lesson(lesson.id(), lesson)?;
        model.update_filtered_lesson_list(show_all());
        Ok(CommandOutcome::new(feedback))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListLessonCommand;

impl ListLessonCommand {
    pub const WORD: &'static str = "listlesson";

    pub fn execute(self, model: &mut dyn Model) -> CommandResult {
        model.update_filtered_lesson_list(show_all());
        Ok(CommandOutcome::new("Listed all lessons").showing(ListKind::Lessons))
    }
}
