use jarvis_core::model::lesson::LessonError;
use jarvis_core::model::lesson_notes::LessonNotes;
use jarvis_core::{MatricNum, Student, StudentName};

fn student(name: &str, matric: &str) -> Student {
    Student::new(
        StudentName::parse(name).unwrap(),
        MatricNum::parse(matric).unwrap(),
    )
}

#[test]
fn student_notes_are_isolated_per_student() {
    let alice = student("Alice Pauline", "A0000001A");
    let benson = student("Benson Meier", "A0000002B");
    let carl = student("Carl Kurz", "A0000003C");
    let mut notes = LessonNotes::new([&alice, &benson]);

    notes.add_student_note(&alice, "x").unwrap();

    assert_eq!(notes.student_notes(&alice).unwrap(), ["x".to_string()]);
    assert!(notes.student_notes(&benson).unwrap().is_empty());
    assert_eq!(
        notes.add_student_note(&carl, "y"),
        Err(LessonError::StudentNotFound(carl.matric_num().clone()))
    );
}

#[test]
fn deleting_general_note_shifts_later_indices() {
    let alice = student("Alice Pauline", "A0000001A");
    let mut notes = LessonNotes::new([&alice]);
    notes.add_general_note("first");
    notes.add_general_note("second");
    notes.add_general_note("third");

    assert_eq!(notes.delete_general_note(1).unwrap(), "second");
    assert_eq!(notes.general_notes(), ["first", "third"]);
    assert_eq!(notes.render_general(), "Lesson Notes:\n1. first\n2. third\n");
}

#[test]
fn deleting_out_of_range_note_leaves_list_unchanged() {
    let alice = student("Alice Pauline", "A0000001A");
    let mut notes = LessonNotes::new([&alice]);
    notes.add_general_note("only");

    assert_eq!(notes.delete_general_note(1), Err(LessonError::NoteNotFound(1)));
    assert_eq!(notes.general_notes(), ["only"]);
    assert_eq!(
        notes.delete_student_note(&alice, 0),
        Err(LessonError::NoteNotFound(0))
    );
}

#[test]
fn render_all_groups_general_and_student_sections() {
    let alice = student("Alice Pauline", "A0000001A");
    let benson = student("Benson Meier", "A0000002B");
    // Inserted out of name order.
    let mut notes = LessonNotes::new([&benson, &alice]);

    notes.add_general_note("General remark");
    notes.add_student_note(&alice, "needs review").unwrap();

    assert_eq!(
        notes.render_all(),
        "Lesson Notes:\n\
         1. General remark\n\
         \n\
         Notes for individual students:\n\
         Alice Pauline:\n\
         1. needs review\n\
         \n\
         Benson Meier:\n\
         \n"
    );
    assert_eq!(notes.render_for_student(&benson).unwrap(), "");
}

#[test]
fn replace_student_key_moves_notes_to_new_identity() {
    let alice = student("Alice Pauline", "A0000001A");
    let renamed = student("Alice Tan", "A0000009Z");
    let mut notes = LessonNotes::new([&alice]);
    notes.add_student_note(&alice, "needs review").unwrap();

    notes.replace_student_key(alice.matric_num(), &renamed);

    assert!(notes.student_notes(&alice).is_err());
    assert_eq!(notes.student_notes(&renamed).unwrap(), ["needs review"]);
}

#[test]
#[should_panic]
fn replace_student_key_panics_for_unknown_student() {
    let alice = student("Alice Pauline", "A0000001A");
    let stranger = student("Stranger", "A0000004D");
    let mut notes = LessonNotes::new([&alice]);
    notes.replace_student_key(stranger.matric_num(), &alice);
}
