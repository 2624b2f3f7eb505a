use jarvis_core::model::book::predicate;
use jarvis_core::model::grade::Assessment;
use jarvis_core::model::lesson::LessonError;
use jarvis_core::{
    parse_command, CommandError, CommandOutcome, IndexKind, Lesson, ListKind, MasteryCheckStatus,
    Model, ModelError, ModelManager,
};

/// Parses and runs one input line, panicking on any failure.
fn run(model: &mut ModelManager, line: &str) -> CommandOutcome {
    parse_command(line).unwrap().execute(model).unwrap()
}

fn run_err(model: &mut ModelManager, line: &str) -> CommandError {
    parse_command(line).unwrap().execute(model).unwrap_err()
}

fn model_with_students() -> ModelManager {
    let mut model = ModelManager::new();
    run(&mut model, "addstudent s/Alice Pauline m/A0000001A");
    run(&mut model, "addstudent s/Benson Meier m/A0000002B");
    model
}

#[test]
fn out_of_range_student_index_leaves_model_unchanged() {
    let mut model = model_with_students();
    let before = model.students().to_vec();

    let err = run_err(&mut model, "deletestudent 3");

    assert_eq!(err, CommandError::InvalidDisplayedIndex(IndexKind::Student));
    assert_eq!(err.to_string(), "The student index provided is invalid");
    assert_eq!(model.students(), before.as_slice());
}

#[test]
fn indices_resolve_against_filtered_view() {
    let mut model = model_with_students();
    let outcome = run(&mut model, "findstudent benson");
    assert_eq!(outcome.feedback, "1 students listed!");
    assert_eq!(outcome.list, Some(ListKind::Students));

    let outcome = run(&mut model, "deletestudent 1");
    assert_eq!(outcome.feedback, "Deleted Student: Benson Meier");
    assert_eq!(model.students().len(), 1);
    assert_eq!(model.students()[0].name().as_str(), "Alice Pauline");
}

#[test]
fn duplicate_student_is_rejected() {
    let mut model = model_with_students();
    let err = run_err(&mut model, "addstudent s/Someone Else m/A0000001A");
    assert_eq!(
        err.to_string(),
        "This student already exists in JARVIS"
    );
}

#[test]
fn grade_updates_profile_and_reports_it() {
    let mut model = model_with_students();

    let outcome = run(&mut model, "grade 1 ra1/8 mt/45.5");

    assert!(outcome
        .feedback
        .starts_with("Updated grades for Alice Pauline:\nRA1: 8/10"));
    let profile = model.students()[0].grade_profile();
    assert_eq!(profile.marks(Assessment::Ra1), Some(8.0));
    assert_eq!(profile.marks(Assessment::MidTerm), Some(45.5));
    assert_eq!(profile.marks(Assessment::Ra2), None);
}

#[test]
fn grade_out_of_range_is_rejected_without_change() {
    let mut model = model_with_students();
    let err = run_err(&mut model, "grade 1 ra1/8 ra2/11");
    assert!(matches!(err, CommandError::Validation(_)));
    assert!(model.students()[0].grade_profile().is_empty());
}

#[test]
fn studio_enrolls_every_listed_student() {
    let mut model = model_with_students();

    let outcome = run(
        &mut model,
        "addstudio l/Studio 1 sd/2022-10-12 st/14:00 et/16:00",
    );

    assert_eq!(outcome.feedback, "New studio added: Studio 1");
    assert_eq!(model.lessons()[0].students().len(), 2);
}

#[test]
fn studio_without_students_is_rejected() {
    let mut model = ModelManager::new();
    let err = run_err(
        &mut model,
        "addstudio l/Studio 1 sd/2022-10-12 st/14:00 et/16:00",
    );
    assert_eq!(err, CommandError::NoStudentsToEnroll);
}

#[test]
fn overlapping_lesson_is_rejected() {
    let mut model = model_with_students();
    run(
        &mut model,
        "addconsult l/Recursion sd/2022-10-12 st/14:00 et/15:00 si/1",
    );

    let err = run_err(
        &mut model,
        "addmc l/Mastery check 1 sd/2022-10-12 st/14:30 et/15:30 si/2",
    );

    assert!(matches!(err, CommandError::LessonClash { .. }));
    assert_eq!(model.lessons().len(), 1);

    run(
        &mut model,
        "addmc l/Mastery check 1 sd/2022-10-12 st/15:00 et/16:00 si/2",
    );
    assert_eq!(model.lessons().len(), 2);
}

#[test]
fn inverted_time_period_is_rejected() {
    let mut model = model_with_students();
    let err = run_err(
        &mut model,
        "addconsult l/Recursion sd/2022-10-12 st/15:00 et/14:00 si/1",
    );
    assert!(matches!(err, CommandError::Validation(_)));
    assert!(model.lessons().is_empty());
}

#[test]
fn attendance_requires_enrolled_student() {
    let mut model = model_with_students();
    run(
        &mut model,
        "addconsult l/Recursion sd/2022-10-12 st/14:00 et/15:00 si/1",
    );

    let outcome = run(&mut model, "markstudent li/1 si/1");
    assert_eq!(outcome.feedback, "Marked Alice Pauline as present for Recursion");
    let alice = model.students()[0].clone();
    assert!(model.lessons()[0].attendance().is_present(&alice).unwrap());

    let err = run_err(&mut model, "markstudent li/1 si/2");
    assert!(matches!(err, CommandError::StudentNotInLesson { .. }));

    run(&mut model, "unmarkstudent li/1 si/1");
    assert!(!model.lessons()[0].attendance().is_present(&alice).unwrap());
}

#[test]
fn notes_are_added_and_deleted_by_display_index() {
    let mut model = model_with_students();
    run(
        &mut model,
        "addstudio l/Studio 1 sd/2022-10-12 st/14:00 et/16:00",
    );

    let outcome = run(&mut model, "addnote n/Bring laptops li/1");
    assert_eq!(outcome.feedback, "Noted for lesson Studio 1: Bring laptops");
    let outcome = run(&mut model, "addnote n/Needs review li/1 si/2");
    assert_eq!(
        outcome.feedback,
        "Noted for Benson Meier in lesson Studio 1: Needs review"
    );

    let err = run_err(&mut model, "deletenote li/1 ni/2");
    assert_eq!(err, CommandError::InvalidDisplayedIndex(IndexKind::Note));
    assert_eq!(
        err.to_string(),
        "The note at the note index provided does not exist"
    );

    let outcome = run(&mut model, "deletenote li/1 ni/1 si/2");
    assert_eq!(
        outcome.feedback,
        "Deleted note for Benson Meier in lesson Studio 1: Needs review"
    );
    let outcome = run(&mut model, "deletenote li/1 ni/1");
    assert_eq!(
        outcome.feedback,
        "Deleted note from lesson Studio 1: Bring laptops"
    );
    assert!(model.lessons()[0].notes().general_notes().is_empty());
}

#[test]
fn mastery_check_result_only_applies_to_mastery_checks() {
    let mut model = model_with_students();
    run(
        &mut model,
        "addstudio l/Studio 1 sd/2022-10-12 st/09:00 et/10:00",
    );
    run(
        &mut model,
        "addmc l/MC 1 sd/2022-10-12 st/14:00 et/15:00 si/1",
    );

    let err = run_err(&mut model, "mcresult li/1 si/1 r/pass");
    assert!(matches!(
        err,
        CommandError::Lesson(LessonError::NotMasteryCheck(_))
    ));

    let outcome = run(&mut model, "mcresult li/2 si/1 r/pass");
    assert_eq!(
        outcome.feedback,
        "Set mastery check result of Alice Pauline in MC 1 to Passed"
    );
    let alice = model.students()[0].clone();
    assert_eq!(
        model.lessons()[1].mastery_check_status(&alice).unwrap(),
        MasteryCheckStatus::Passed
    );
}

#[test]
fn edit_student_propagates_to_lessons() {
    let mut model = model_with_students();
    run(
        &mut model,
        "addconsult l/Recursion sd/2022-10-12 st/14:00 et/15:00 si/1",
    );

    let outcome = run(&mut model, "editstudent 1 s/Alice Tan m/A0000009Z");

    assert_eq!(outcome.feedback, "Edited Student: Alice Tan");
    let roster = model.lessons()[0].students();
    assert_eq!(roster[0].name().as_str(), "Alice Tan");
    assert_eq!(roster[0].matric_num().as_str(), "A0000009Z");
}

#[test]
fn enrolled_student_delete_is_rejected() {
    let mut model = model_with_students();
    run(
        &mut model,
        "addconsult l/Recursion sd/2022-10-12 st/14:00 et/15:00 si/1",
    );

    let err = run_err(&mut model, "deletestudent 1");

    assert!(matches!(
        err,
        CommandError::Model(ModelError::StudentEnrolled { .. })
    ));
    assert_eq!(model.students().len(), 2);
}

#[test]
fn task_lifecycle() {
    let mut model = ModelManager::new();
    let outcome = run(&mut model, "addtask t/Mark missions d/2022-10-28");
    assert_eq!(
        outcome.feedback,
        "New task added: [ ] Mark missions (by Oct-28-2022)"
    );
    run(&mut model, "addtask t/Prepare slides");

    let outcome = run(&mut model, "marktask 1");
    assert_eq!(
        outcome.feedback,
        "Marked task as done: [X] Mark missions (by Oct-28-2022)"
    );
    let outcome = run(&mut model, "findtask slides");
    assert_eq!(outcome.feedback, "1 tasks listed!");

    let outcome = run(&mut model, "deletetask 1");
    assert_eq!(outcome.feedback, "Deleted Task: [ ] Prepare slides");
    run(&mut model, "listtask");
    assert_eq!(model.filtered_tasks().len(), 1);
    assert!(model.tasks()[0].is_done());
}

#[test]
fn clear_empties_every_book() {
    let mut model = model_with_students();
    run(&mut model, "addtask t/Mark missions");
    run(
        &mut model,
        "addstudio l/Studio 1 sd/2022-10-12 st/14:00 et/16:00",
    );

    let outcome = run(&mut model, "clear");

    assert_eq!(outcome.feedback, "JARVIS has been cleared!");
    assert!(model.students().is_empty());
    assert!(model.lessons().is_empty());
    assert!(model.tasks().is_empty());
}

#[test]
fn out_of_range_index_is_reported_before_argument_checks() {
    let mut model = ModelManager::new();
    run(&mut model, "addstudent s/Alice Pauline m/A0000001A");
    let expected = CommandError::InvalidDisplayedIndex(IndexKind::Student);

    let err = run_err(
        &mut model,
        "addconsult l/Recursion sd/2022-10-12 st/15:00 et/14:00 si/9",
    );
    assert_eq!(err, expected);
    assert_eq!(run_err(&mut model, "editstudent 9"), expected);
    assert_eq!(run_err(&mut model, "grade 9"), expected);

    assert_eq!(run_err(&mut model, "editstudent 1"), CommandError::NoFieldsProvided);
    assert_eq!(run_err(&mut model, "grade 1"), CommandError::NothingToGrade);
}

#[test]
fn edit_student_shows_all_students_afterwards() {
    let mut model = model_with_students();
    run(&mut model, "findstudent benson");
    assert_eq!(model.filtered_students().len(), 1);

    run(&mut model, "editstudent 1 s/Benson Tan");

    assert_eq!(model.filtered_students().len(), 2);
    assert_eq!(model.students()[1].name().as_str(), "Benson Tan");
}

/// Studio 1 enrolls everyone; MC 1 enrolls Alice. Only MC 1 stays visible.
fn model_with_narrowed_lessons() -> ModelManager {
    let mut model = model_with_students();
    run(
        &mut model,
        "addstudio l/Studio 1 sd/2022-10-12 st/09:00 et/10:00",
    );
    run(
        &mut model,
        "addmc l/MC 1 sd/2022-10-12 st/14:00 et/15:00 si/1",
    );
    model.update_filtered_lesson_list(predicate(|lesson: &Lesson| {
        lesson.desc().as_str() == "MC 1"
    }));
    assert_eq!(model.filtered_lessons().len(), 1);
    model
}

#[test]
fn lesson_commands_show_all_lessons_afterwards() {
    for line in [
        "addnote n/Bring laptops li/1",
        "addnote n/Needs review li/1 si/1",
        "markstudent li/1 si/1",
        "unmarkstudent li/1 si/1",
        "mcresult li/1 si/1 r/pass",
    ] {
        let mut model = model_with_narrowed_lessons();
        run(&mut model, line);
        assert_eq!(model.filtered_lessons().len(), 2, "{line}");
    }
}

#[test]
fn note_commands_address_the_narrowed_lesson_view() {
    let mut model = model_with_narrowed_lessons();

    run(&mut model, "addnote n/Bring laptops li/1");
    assert!(model.lessons()[0].notes().general_notes().is_empty());
    assert_eq!(model.lessons()[1].notes().general_notes(), ["Bring laptops"]);

    model.update_filtered_lesson_list(predicate(|lesson: &Lesson| {
        lesson.desc().as_str() == "MC 1"
    }));
    let outcome = run(&mut model, "deletenote li/1 ni/1");
    assert_eq!(outcome.feedback, "Deleted note from lesson MC 1: Bring laptops");
    assert_eq!(model.filtered_lessons().len(), 2);
}
