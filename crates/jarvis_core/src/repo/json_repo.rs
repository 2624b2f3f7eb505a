//! JSON file repository.
//!
//! # Responsibility
//! - Persist each book as one pretty-printed JSON file in the data directory.
//! - Adapt lessons to a flat, position-keyed shape and rebuild them through
//!   the domain constructors on load.
//!
//! # Invariants
//! - Saves overwrite the whole file.
//! - Lessons store only the matric numbers of their roster; rosters are
//!   rebuilt from the student book on load, so a lesson can never disagree
//!   with it on a student's name or grades.
//! - Lesson sub-records (attendance, per-student notes, mastery check
//!   results) are keyed by the student's position in the stored roster.
//! - Loading rejects lessons that enroll a student missing from the student
//!   book.

use crate::model::lesson::{
    Lesson, LessonDesc, LessonError, LessonId, LessonKind, LessonType, MasteryCheckStatus,
};
use crate::model::manager::{Model, ModelManager};
use crate::model::student::{MatricNum, Student};
use crate::model::task::Task;
use crate::model::time_period::TimePeriod;
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const STUDENTS_FILE: &str = "students.json";
pub const LESSONS_FILE: &str = "lessons.json";
pub const TASKS_FILE: &str = "tasks.json";

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage failure, distinct from command errors.
#[derive(Debug)]
pub enum RepoError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to access `{}`: {source}", path.display())
            }
            Self::InvalidData(message) => write!(f, "invalid stored data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::InvalidData(_) => None,
        }
    }
}

/// Storage contract for the three books.
pub trait BookRepository {
    fn load_students(&self) -> RepoResult<Vec<Student>>;
    fn save_students(&self, students: &[Student]) -> RepoResult<()>;
    /// Loads lessons, resolving each stored roster against `students`.
    fn load_lessons(&self, students: &[Student]) -> RepoResult<Vec<Lesson>>;
    fn save_lessons(&self, lessons: &[Lesson]) -> RepoResult<()>;
    fn load_tasks(&self) -> RepoResult<Vec<Task>>;
    fn save_tasks(&self, tasks: &[Task]) -> RepoResult<()>;
}

/// Loads every book and builds a model from them.
///
/// # Errors
/// - Any load error from `repo`.
/// - `RepoError::InvalidData` for duplicate entries or lessons enrolling
///   unknown students.
pub fn load_model(repo: &dyn BookRepository) -> RepoResult<ModelManager> {
    let students = repo.load_students()?;
    let lessons = repo.load_lessons(&students)?;
    let tasks = repo.load_tasks()?;

    ModelManager::with_data(students, lessons, tasks)
        .map_err(|err| RepoError::InvalidData(err.to_string()))
}

/// Saves every book of `model`.
pub fn save_model(repo: &dyn BookRepository, model: &dyn Model) -> RepoResult<()> {
    repo.save_students(model.students())?;
    repo.save_lessons(model.lessons())?;
    repo.save_tasks(model.tasks())
}

#[derive(Serialize, Deserialize)]
struct JsonStudentBook {
    students: Vec<Student>,
}

#[derive(Serialize, Deserialize)]
struct JsonTaskList {
    tasks: Vec<Task>,
}

#[derive(Serialize, Deserialize)]
struct JsonLessonBook {
    lessons: Vec<JsonAdaptedLesson>,
}

/// Storage shape of a lesson.
#[derive(Serialize, Deserialize)]
struct JsonAdaptedLesson {
    id: LessonId,
    lesson_type: LessonType,
    desc: LessonDesc,
    period: TimePeriod,
    students: Vec<MatricNum>,
    attendance: Vec<bool>,
    general_notes: Vec<String>,
    student_notes: Vec<Vec<String>>,
    #[serde(default)]
    mastery_check_results: Vec<MasteryCheckStatus>,
    is_completed: bool,
}

impl JsonAdaptedLesson {
    fn from_model(lesson: &Lesson) -> RepoResult<Self> {
        let students = lesson.students().to_vec();
        let attendance = students
            .iter()
            .map(|student| lesson.attendance().is_present(student))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| RepoError::InvalidData(err.to_string()))?;
        let student_notes = students
            .iter()
            .map(|student| {
                lesson
                    .notes()
                    .student_notes(student)
                    .map(<[String]>::to_vec)
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| RepoError::InvalidData(err.to_string()))?;
        let mastery_check_results = match lesson.kind() {
            LessonKind::MasteryCheck { results } => students
                .iter()
                .map(|student| {
                    results
                        .get(student.matric_num())
                        .copied()
                        .unwrap_or_default()
                })
                .collect(),
            LessonKind::Studio | LessonKind::Consult => Vec::new(),
        };

        Ok(Self {
            id: lesson.id(),
            lesson_type: lesson.lesson_type(),
            desc: lesson.desc().clone(),
            period: *lesson.period(),
            attendance,
            general_notes: lesson.notes().general_notes().to_vec(),
            student_notes,
            mastery_check_results,
            is_completed: lesson.is_completed(),
            students: students
                .iter()
                .map(|student| student.matric_num().clone())
                .collect(),
        })
    }

    fn into_model(self, book: &HashMap<&MatricNum, &Student>) -> RepoResult<Lesson> {
        let roster_len = self.students.len();
        if self.attendance.len() != roster_len || self.student_notes.len() != roster_len {
            return Err(RepoError::InvalidData(format!(
                "lesson `{}` has sub-records that do not match its {roster_len} student(s)",
                self.desc
            )));
        }
        let expected_results = match self.lesson_type {
            LessonType::MasteryCheck => roster_len,
            LessonType::Studio | LessonType::Consult => 0,
        };
        if self.mastery_check_results.len() != expected_results {
            return Err(RepoError::InvalidData(format!(
                "lesson `{}` has {} mastery check result(s), expected {expected_results}",
                self.desc,
                self.mastery_check_results.len()
            )));
        }

        let roster = self
            .students
            .iter()
            .map(|matric_num| {
                book.get(matric_num).map(|student| (*student).clone()).ok_or_else(|| {
                    RepoError::InvalidData(format!(
                        "lesson `{}` enrolls unknown student {matric_num}",
                        self.desc
                    ))
                })
            })
            .collect::<RepoResult<Vec<_>>>()?;

        let invalid = |err: LessonError| RepoError::InvalidData(err.to_string());
        let mut lesson = Lesson::with_id(
            self.id,
            self.lesson_type,
            self.desc,
            self.period,
            roster.clone(),
        )
        .map_err(invalid)?;

        for (position, student) in roster.iter().enumerate() {
            lesson
                .set_attendance(student, self.attendance[position])
                .map_err(invalid)?;
            for note in &self.student_notes[position] {
                lesson
                    .add_student_note(student, note.clone())
                    .map_err(invalid)?;
            }
            if let Some(status) = self.mastery_check_results.get(position) {
                lesson
                    .set_mastery_check_status(student, *status)
                    .map_err(invalid)?;
            }
        }
        for note in self.general_notes {
            lesson.add_general_note(note);
        }
        lesson.set_completed(self.is_completed);
        Ok(lesson)
    }
}

/// File-backed `BookRepository` rooted at a data directory.
#[derive(Debug, Clone)]
pub struct JsonBookRepository {
    data_dir: PathBuf,
}

impl JsonBookRepository {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn read_json<T: DeserializeOwned>(&self, file: &str) -> RepoResult<Option<T>> {
        let path = self.data_dir.join(file);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!("event=repo_load module=repo status=missing file={file}");
                return Ok(None);
            }
            Err(source) => return Err(RepoError::Io { path, source }),
        };
        serde_json::from_str(&raw).map(Some).map_err(|err| {
            warn!("event=repo_load module=repo status=error file={file} error={err}");
            RepoError::InvalidData(format!("{file}: {err}"))
        })
    }

    fn write_json<T: Serialize>(&self, file: &str, value: &T) -> RepoResult<()> {
        std::fs::create_dir_all(&self.data_dir).map_err(|source| RepoError::Io {
            path: self.data_dir.clone(),
            source,
        })?;
        let path = self.data_dir.join(file);
        let serialized = serde_json::to_string_pretty(value)
            .map_err(|err| RepoError::InvalidData(format!("{file}: {err}")))?;
        std::fs::write(&path, serialized).map_err(|source| RepoError::Io { path, source })
    }
}

impl BookRepository for JsonBookRepository {
    fn load_students(&self) -> RepoResult<Vec<Student>> {
        let students = self
            .read_json::<JsonStudentBook>(STUDENTS_FILE)?
            .map(|book| book.students)
            .unwrap_or_default();
        info!(
            "event=repo_load module=repo status=ok file={STUDENTS_FILE} count={}",
            students.len()
        );
        Ok(students)
    }

    fn save_students(&self, students: &[Student]) -> RepoResult<()> {
        self.write_json(
            STUDENTS_FILE,
            &JsonStudentBook {
                students: students.to_vec(),
            },
        )?;
        info!(
            "event=repo_save module=repo status=ok file={STUDENTS_FILE} count={}",
            students.len()
        );
        Ok(())
    }

    fn load_lessons(&self, students: &[Student]) -> RepoResult<Vec<Lesson>> {
        let book = students
            .iter()
            .map(|student| (student.matric_num(), student))
            .collect::<HashMap<_, _>>();
        let lessons = self
            .read_json::<JsonLessonBook>(LESSONS_FILE)?
            .map(|book| book.lessons)
            .unwrap_or_default()
            .into_iter()
            .map(|adapted| adapted.into_model(&book))
            .collect::<RepoResult<Vec<_>>>()?;
        info!(
            "event=repo_load module=repo status=ok file={LESSONS_FILE} count={}",
            lessons.len()
        );
        Ok(lessons)
    }

    fn save_lessons(&self, lessons: &[Lesson]) -> RepoResult<()> {
        let adapted = lessons
            .iter()
            .map(JsonAdaptedLesson::from_model)
            .collect::<RepoResult<Vec<_>>>()?;
        self.write_json(LESSONS_FILE, &JsonLessonBook { lessons: adapted })?;
        info!(
            "event=repo_save module=repo status=ok file={LESSONS_FILE} count={}",
            lessons.len()
        );
        Ok(())
    }

    fn load_tasks(&self) -> RepoResult<Vec<Task>> {
        let tasks = self
            .read_json::<JsonTaskList>(TASKS_FILE)?
            .map(|list| list.tasks)
            .unwrap_or_default();
        info!(
            "event=repo_load module=repo status=ok file={TASKS_FILE} count={}",
            tasks.len()
        );
        Ok(tasks)
    }

    fn save_tasks(&self, tasks: &[Task]) -> RepoResult<()> {
        self.write_json(
            TASKS_FILE,
            &JsonTaskList {
                tasks: tasks.to_vec(),
            },
        )?;
        info!(
            "event=repo_save module=repo status=ok file={TASKS_FILE} count={}",
            tasks.len()
        );
        Ok(())
    }
}
