//! Model contract and in-memory implementation.
//!
//! # Responsibility
//! - Own the student book, lesson book and task list exclusively.
//! - Expose filtered views plus add/replace/delete hooks; these hooks are the
//!   only mutation path into the collections.
//! - Propagate student identity changes to every lesson that enrolls them.
//!
//! # Invariants
//! - Students are unique by matric number; lessons by type, description and
//!   time period; tasks by description and deadline.
//! - A student enrolled in any lesson cannot be deleted.
//! - `set_student` either updates the student book and every referencing
//!   lesson, or changes nothing.

use crate::model::book::{FilteredView, LessonBook, Predicate, StudentBook, TaskList};
use crate::model::lesson::{Lesson, LessonId};
use crate::model::student::{MatricNum, Student};
use crate::model::task::{Task, TaskId};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ModelResult<T> = Result<T, ModelError>;

/// Rule violations reported by model hooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    StudentNotFound(MatricNum),
    DuplicateStudent(MatricNum),
    /// Student is still enrolled in `lessons` lesson(s).
    StudentEnrolled { matric_num: MatricNum, lessons: usize },
    /// Renaming would collide with a different student already enrolled.
    EnrollmentConflict { lesson: String, matric_num: MatricNum },
    LessonNotFound(LessonId),
    DuplicateLesson,
    TaskNotFound(TaskId),
    DuplicateTask,
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StudentNotFound(matric) => write!(f, "student not found: {matric}"),
            Self::DuplicateStudent(_) => f.write_str("This student already exists in JARVIS"),
            Self::StudentEnrolled {
                matric_num,
                lessons,
            } => write!(
                f,
                "Student {matric_num} is enrolled in {lessons} lesson(s); delete those lessons first"
            ),
            Self::EnrollmentConflict { lesson, matric_num } => write!(
                f,
                "Lesson {lesson} already enrolls a different student with matric number {matric_num}"
            ),
            Self::LessonNotFound(id) => write!(f, "lesson not found: {id}"),
            Self::DuplicateLesson => f.write_str("This lesson already exists in JARVIS"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::DuplicateTask => f.write_str("This task already exists in JARVIS"),
        }
    }
}

impl Error for ModelError {}

/// Model API used by commands.
///
/// Filtered views are the sole addressing space for displayed indices; the
/// unfiltered slices exist for whole-collection checks and persistence.
pub trait Model {
    fn students(&self) -> &[Student];
    fn filtered_students(&self) -> FilteredView<'_, Student>;
    fn update_filtered_student_list(&mut self, predicate: Predicate<Student>);
    fn has_student(&self, student: &Student) -> bool;
    fn add_student(&mut self, student: Student) -> ModelResult<()>;
    fn delete_student(&mut self, target: &MatricNum) -> ModelResult<Student>;
    /// Replaces the student identified by `target` everywhere it is referenced.
    fn set_student(&mut self, target: &MatricNum, edited: Student) -> ModelResult<()>;

    fn lessons(&self) -> &[Lesson];
    fn filtered_lessons(&self) -> FilteredView<'_, Lesson>;
    fn update_filtered_lesson_list(&mut self, predicate: Predicate<Lesson>);
    fn has_lesson(&self, lesson: &Lesson) -> bool;
    fn add_lesson(&mut self, lesson: Lesson) -> ModelResult<()>;
    fn delete_lesson(&mut self, target: LessonId) -> ModelResult<Lesson>;
    fn set_lesson(&mut self, target: LessonId, edited: Lesson) -> ModelResult<()>;

    fn tasks(&self) -> &[Task];
    fn filtered_tasks(&self) -> FilteredView<'_, Task>;
    fn update_filtered_task_list(&mut self, predicate: Predicate<Task>);
    fn has_task(&self, task: &Task) -> bool;
    fn add_task(&mut self, task: Task) -> ModelResult<()>;
    fn delete_task(&mut self, target: TaskId) -> ModelResult<Task>;
    fn set_task(&mut self, target: TaskId, edited: Task) -> ModelResult<()>;

    /// Empties every collection.
    fn clear(&mut self);
}

/// In-memory `Model` implementation.
#[derive(Debug, Default)]
pub struct ModelManager {
    students: StudentBook,
    lessons: LessonBook,
    tasks: TaskList,
}

impl ModelManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a model from loaded collections, rejecting duplicates.
    pub fn with_data(
        students: Vec<Student>,
        lessons: Vec<Lesson>,
        tasks: Vec<Task>,
    ) -> ModelResult<Self> {
        let mut model = Self::new();
        for student in students {
            model.add_student(student)?;
        }
        for lesson in lessons {
            model.add_lesson(lesson)?;
        }
        for task in tasks {
            model.add_task(task)?;
        }
        Ok(model)
    }

    fn student_position(&self, target: &MatricNum) -> ModelResult<usize> {
        self.students
            .position(|student| student.matric_num() == target)
            .ok_or_else(|| ModelError::StudentNotFound(target.clone()))
    }

    fn lesson_position(&self, target: LessonId) -> ModelResult<usize> {
        self.lessons
            .position(|lesson| lesson.id() == target)
            .ok_or(ModelError::LessonNotFound(target))
    }

    fn task_position(&self, target: TaskId) -> ModelResult<usize> {
        self.tasks
            .position(|task| task.id() == target)
            .ok_or(ModelError::TaskNotFound(target))
    }

    /// Builds the post-rename copy of every lesson without touching the model.
    ///
    /// Returns `(position, updated)` pairs for lessons that enroll `target`.
    fn stage_lesson_renames(
        &self,
        target: &MatricNum,
        edited: &Student,
    ) -> ModelResult<Vec<(usize, Lesson)>> {
        let mut staged = Vec::new();
        for (position, lesson) in self.lessons.items().iter().enumerate() {
            if !lesson.enrolls(target) {
                continue;
            }
            if edited.matric_num() != target && lesson.enrolls(edited.matric_num()) {
                return Err(ModelError::EnrollmentConflict {
                    lesson: lesson.to_string(),
                    matric_num: edited.matric_num().clone(),
                });
            }
            let mut updated = lesson.clone();
            updated.replace_student(target, edited);
            staged.push((position, updated));
        }
        Ok(staged)
    }
}

impl Model for ModelManager {
    fn students(&self) -> &[Student] {
        self.students.items()
    }

    fn filtered_students(&self) -> FilteredView<'_, Student> {
        self.students.view()
    }

    fn update_filtered_student_list(&mut self, predicate: Predicate<Student>) {
        self.students.set_predicate(predicate);
    }

    fn has_student(&self, student: &Student) -> bool {
        self.students.items().contains(student)
    }

    fn add_student(&mut self, student: Student) -> ModelResult<()> {
        if self.has_student(&student) {
            return Err(ModelError::DuplicateStudent(student.matric_num().clone()));
        }
        self.students.push(student);
        Ok(())
    }

    fn delete_student(&mut self, target: &MatricNum) -> ModelResult<Student> {
        let position = self.student_position(target)?;
        let enrolled_in = self
            .lessons
            .items()
            .iter()
            .filter(|lesson| lesson.enrolls(target))
            .count();
        if enrolled_in > 0 {
            return Err(ModelError::StudentEnrolled {
                matric_num: target.clone(),
                lessons: enrolled_in,
            });
        }
        Ok(self.students.remove_at(position))
    }

    fn set_student(&mut self, target: &MatricNum, edited: Student) -> ModelResult<()> {
        // Validate and stage everything first; the commit below cannot fail.
        let position = self.student_position(target)?;
        if edited.matric_num() != target
            && self
                .students
                .items()
                .iter()
                .any(|student| student.matric_num() == edited.matric_num())
        {
            return Err(ModelError::DuplicateStudent(edited.matric_num().clone()));
        }
        let staged_lessons = self.stage_lesson_renames(target, &edited)?;

        let lessons_updated = staged_lessons.len();
        info!(
            "event=student_rename module=model status=ok identity_changed={} lessons_updated={}",
            edited.matric_num() != target,
            lessons_updated
        );
        self.students.replace_at(position, edited);
        for (lesson_position, lesson) in staged_lessons {
            self.lessons.replace_at(lesson_position, lesson);
        }
        Ok(())
    }

    fn lessons(&self) -> &[Lesson] {
        self.lessons.items()
    }

    fn filtered_lessons(&self) -> FilteredView<'_, Lesson> {
        self.lessons.view()
    }

    fn update_filtered_lesson_list(&mut self, predicate: Predicate<Lesson>) {
        self.lessons.set_predicate(predicate);
    }

    fn has_lesson(&self, lesson: &Lesson) -> bool {
        self.lessons
            .items()
            .iter()
            .any(|existing| existing.is_same_lesson(lesson))
    }

    fn add_lesson(&mut self, lesson: Lesson) -> ModelResult<()> {
        if self.has_lesson(&lesson) {
            return Err(ModelError::DuplicateLesson);
        }
        self.lessons.push(lesson);
        Ok(())
    }

    fn delete_lesson(&mut self, target: LessonId) -> ModelResult<Lesson> {
        let position = self.lesson_position(target)?;
        Ok(self.lessons.remove_at(position))
    }

    fn set_lesson(&mut self, target: LessonId, edited: Lesson) -> ModelResult<()> {
        let position = self.lesson_position(target)?;
        let clashes_with_other = self
            .lessons
            .items()
            .iter()
            .any(|existing| existing.id() != target && existing.is_same_lesson(&edited));
        if clashes_with_other {
            return Err(ModelError::DuplicateLesson);
        }
        self.lessons.replace_at(position, edited);
        Ok(())
    }

    fn tasks(&self) -> &[Task] {
        self.tasks.items()
    }

    fn filtered_tasks(&self) -> FilteredView<'_, Task> {
        self.tasks.view()
    }

    fn update_filtered_task_list(&mut self, predicate: Predicate<Task>) {
        self.tasks.set_predicate(predicate);
    }

    fn has_task(&self, task: &Task) -> bool {
        self.tasks
            .items()
            .iter()
            .any(|existing| existing.is_same_task(task))
    }

    fn add_task(&mut self, task: Task) -> ModelResult<()> {
        if self.has_task(&task) {
            return Err(ModelError::DuplicateTask);
        }
        self.tasks.push(task);
        Ok(())
    }

    fn delete_task(&mut self, target: TaskId) -> ModelResult<Task> {
        let position = self.task_position(target)?;
        Ok(self.tasks.remove_at(position))
    }

    fn set_task(&mut self, target: TaskId, edited: Task) -> ModelResult<()> {
        let position = self.task_position(target)?;
        let clashes_with_other = self
            .tasks
            .items()
            .iter()
            .any(|existing| existing.id() != target && existing.is_same_task(&edited));
        if clashes_with_other {
            return Err(ModelError::DuplicateTask);
        }
        self.tasks.replace_at(position, edited);
        Ok(())
    }

    fn clear(&mut self) {
        self.students.replace_all(Vec::new());
        self.lessons.replace_all(Vec::new());
        self.tasks.replace_all(Vec::new());
    }
}
