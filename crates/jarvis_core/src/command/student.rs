//! Student commands.

use crate::command::{resolve, CommandError, CommandOutcome, CommandResult};
use crate::index::Index;
use crate::messages::{IndexKind, ListKind, Message};
use crate::model::book::{predicate, show_all};
use crate::model::grade::Assessment;
use crate::model::manager::Model;
use crate::model::student::{MatricNum, Student, StudentName};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddStudentCommand {
    pub name: StudentName,
    pub matric_num: MatricNum,
}

impl AddStudentCommand {
    pub const WORD: &'static str = "addstudent";
    pub const USAGE: &'static str = "addstudent: Adds a student to JARVIS.\n\
        Parameters: s/NAME m/MATRIC_NUM\n\
        Example: addstudent s/John Doe m/A0123459G";

    pub fn execute(self, model: &mut dyn Model) -> CommandResult {
        let student = Student::new(self.name, self.matric_num);
        let feedback = format!("New student added: {student}");
        model.add_student(student)?;
        Ok(CommandOutcome::new(feedback))
    }
}

/// Changes the name and/or matric number of a student everywhere it appears.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditStudentCommand {
    pub index: Index,
    pub name: Option<StudentName>,
    pub matric_num: Option<MatricNum>,
}

impl EditStudentCommand {
    pub const WORD: &'static str = "editstudent";
    pub const USAGE: &'static str = "editstudent: Edits the student identified by the index \
        number used in the displayed student list.\n\
        Parameters: INDEX (must be a positive integer) [s/NAME] [m/MATRIC_NUM]\n\
        Example: editstudent 1 s/John Dough";

    pub fn execute(self, model: &mut dyn Model) -> CommandResult {
        let target = resolve(model.filtered_students(), self.index, IndexKind::Student)?;
        if self.name.is_none() && self.matric_num.is_none() {
            return Err(CommandError::NoFieldsProvided);
        }
        let edited = target.renamed(
            self.name.unwrap_or_else(|| target.name().clone()),
            self.matric_num
                .unwrap_or_else(|| target.matric_num().clone()),
        );
        let target_matric = target.matric_num().clone();

        let feedback = format!("Edited Student: {edited}");
        model.set_student(&target_matric, edited)?;
        model.update_filtered_student_list(show_all());
        Ok(CommandOutcome::new(feedback))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteStudentCommand {
    pub index: Index,
}

impl DeleteStudentCommand {
    pub const WORD: &'static str = "deletestudent";
    pub const USAGE: &'static str = "deletestudent: Deletes the student identified by the index \
        number used in the displayed student list.\n\
        Parameters: INDEX (must be a positive integer)\n\
        Example: deletestudent 1";

    pub fn execute(self, model: &mut dyn Model) -> CommandResult {
        let target = resolve(model.filtered_students(), self.index, IndexKind::Student)?
            .matric_num()
            .clone();
        let deleted = model.delete_student(&target)?;
        Ok(CommandOutcome::new(format!("Deleted Student: {deleted}")))
    }
}

/// Filters the student list to names containing any keyword as a whole word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindStudentCommand {
    pub keywords: Vec<String>,
}

impl FindStudentCommand {
    pub const WORD: &'static str = "findstudent";
    pub const USAGE: &'static str = "findstudent: Finds all students whose names contain any of \
        the specified keywords (case-insensitive) and displays them as a list with index numbers.\n\
        Parameters: KEYWORD [MORE_KEYWORDS]...\n\
        Example: findstudent alice bob charlie";

    pub fn execute(self, model: &mut dyn Model) -> CommandResult {
        let keywords = self.keywords;
        model.update_filtered_student_list(predicate(move |student: &Student| {
            keywords
                .iter()
                .any(|keyword| student.name().contains_word(keyword))
        }));
        let count = model.filtered_students().len();
        Ok(CommandOutcome::new(
            Message::Listed {
                kind: ListKind::Students,
                count,
            }
            .to_string(),
        )
        .showing(ListKind::Students))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListStudentCommand;

impl ListStudentCommand {
    pub const WORD: &'static str = "liststudent";

    pub fn execute(self, model: &mut dyn Model) -> CommandResult {
        model.update_filtered_student_list(show_all());
        Ok(CommandOutcome::new("Listed all students").showing(ListKind::Students))
    }
}

/// Records assessment marks for one student.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeCommand {
    pub index: Index,
    pub marks: Vec<(Assessment, f64)>,
}

impl GradeCommand {
    pub const WORD: &'static str = "grade";
    pub const USAGE: &'static str = "grade: Updates the assessment marks of the student \
        identified by the index number used in the displayed student list.\n\
        Parameters: INDEX (must be a positive integer) [ra1/MARKS] [ra2/MARKS] [mt/MARKS] \
        [pa/MARKS] [fa/MARKS]\n\
        Example: grade 1 ra1/8 mt/55.5";

    pub fn execute(self, model: &mut dyn Model) -> CommandResult {
        let target = resolve(model.filtered_students(), self.index, IndexKind::Student)?;
        if self.marks.is_empty() {
            return Err(CommandError::NothingToGrade);
        }
        let mut graded = target.clone();
        for (assessment, marks) in self.marks {
            graded = graded.with_mark(assessment, marks)?;
        }
        let target_matric = target.matric_num().clone();

        let feedback = format!(
            "Updated grades for {graded}:\n{}",
            graded.grade_profile()
        );
        model.set_student(&target_matric, graded)?;
        Ok(CommandOutcome::new(feedback))
    }
}

#[cfg(test)]
mod tests {
    use super::{AddStudentCommand, FindStudentCommand, GradeCommand};
    use crate::command::CommandError;
    use crate::index::Index;
    use crate::model::manager::{Model, ModelManager};
    use crate::model::student::{MatricNum, StudentName};

    fn add(model: &mut ModelManager, name: &str, matric: &str) {
        AddStudentCommand {
            name: StudentName::parse(name).unwrap(),
            matric_num: MatricNum::parse(matric).unwrap(),
        }
        .execute(model)
        .unwrap();
    }

    #[test]
    fn find_student_reports_matching_count() {
        let mut model = ModelManager::new();
        add(&mut model, "Alice Pauline", "A0000001A");
        add(&mut model, "Benson Meier", "A0000002B");

        let outcome = FindStudentCommand {
            keywords: vec!["benson".to_string()],
        }
        .execute(&mut model)
        .unwrap();

        assert_eq!(outcome.feedback, "1 students listed!");
        assert_eq!(model.filtered_students().len(), 1);
    }

    #[test]
    fn grade_rejects_empty_mark_list() {
        let mut model = ModelManager::new();
        add(&mut model, "Alice Pauline", "A0000001A");

        let err = GradeCommand {
            index: Index::from_zero_based(0),
            marks: Vec::new(),
        }
        .execute(&mut model)
        .unwrap_err();
        assert_eq!(err, CommandError::NothingToGrade);
    }
}
