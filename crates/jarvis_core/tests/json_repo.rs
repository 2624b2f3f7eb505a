use jarvis_core::model::grade::Assessment;
use jarvis_core::repo::json_repo::{LESSONS_FILE, STUDENTS_FILE, TASKS_FILE};
use jarvis_core::{
    load_model, parse_command, save_model, BookRepository, JsonBookRepository, MasteryCheckStatus,
    Model, ModelManager, RepoError,
};
use tempfile::TempDir;

fn run(model: &mut ModelManager, line: &str) {
    parse_command(line).unwrap().execute(model).unwrap();
}

fn populated_model() -> ModelManager {
    let mut model = ModelManager::new();
    run(&mut model, "addstudent s/Alice Pauline m/A0000001A");
    run(&mut model, "addstudent s/Benson Meier m/A0000002B");
    run(&mut model, "grade 2 ra1/7 fa/88.5");
    run(&mut model, "addstudio l/Studio 1 sd/2022-10-12 st/09:00 et/11:00");
    run(&mut model, "addmc l/MC 1 sd/2022-10-12 st/14:00 et/15:00 si/1 si/2");
    run(&mut model, "markstudent li/1 si/2");
    run(&mut model, "addnote n/Bring laptops li/1");
    run(&mut model, "addnote n/Recap recursion li/1 si/1");
    run(&mut model, "mcresult li/2 si/1 r/fail");
    run(&mut model, "marklesson 2");
    run(&mut model, "addtask t/Mark missions d/2022-10-28");
    run(&mut model, "addtask t/Prepare slides");
    run(&mut model, "marktask 2");
    model
}

#[test]
fn saved_model_loads_back_identically() {
    let dir = TempDir::new().unwrap();
    let repo = JsonBookRepository::new(dir.path());
    let model = populated_model();

    save_model(&repo, &model).unwrap();
    let loaded = load_model(&repo).unwrap();

    assert_eq!(loaded.students(), model.students());
    assert_eq!(loaded.lessons(), model.lessons());
    assert_eq!(loaded.tasks(), model.tasks());

    let benson = &loaded.students()[1];
    assert_eq!(benson.grade_profile().marks(Assessment::FinalAssessment), Some(88.5));
    let alice = loaded.students()[0].clone();
    let mastery_check = &loaded.lessons()[1];
    assert!(mastery_check.is_completed());
    assert_eq!(
        mastery_check.mastery_check_status(&alice).unwrap(),
        MasteryCheckStatus::Failed
    );
    assert_eq!(
        loaded.lessons()[0].notes().student_notes(&alice).unwrap(),
        ["Recap recursion"]
    );
}

#[test]
fn missing_files_load_as_empty_books() {
    let dir = TempDir::new().unwrap();
    let repo = JsonBookRepository::new(dir.path().join("not-created-yet"));

    let model = load_model(&repo).unwrap();

    assert!(model.students().is_empty());
    assert!(model.lessons().is_empty());
    assert!(model.tasks().is_empty());
}

#[test]
fn saving_creates_data_directory_and_wrapper_objects() {
    let dir = TempDir::new().unwrap();
    let data_dir = dir.path().join("nested").join("data");
    let repo = JsonBookRepository::new(&data_dir);

    save_model(&repo, &populated_model()).unwrap();

    for (file, key) in [
        (STUDENTS_FILE, "students"),
        (LESSONS_FILE, "lessons"),
        (TASKS_FILE, "tasks"),
    ] {
        let raw = std::fs::read_to_string(data_dir.join(file)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value[key].is_array(), "{file} lacks `{key}` array");
    }
}

#[test]
fn malformed_json_is_invalid_data() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(STUDENTS_FILE), "{ not json").unwrap();
    let repo = JsonBookRepository::new(dir.path());

    let err = repo.load_students().unwrap_err();

    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn invalid_field_value_is_invalid_data() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(STUDENTS_FILE),
        r#"{"students":[{"name":"Alice","matric_num":"not-a-matric"}]}"#,
    )
    .unwrap();
    let repo = JsonBookRepository::new(dir.path());

    assert!(matches!(
        load_model(&repo),
        Err(RepoError::InvalidData(_))
    ));
}

#[test]
fn duplicate_students_are_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(STUDENTS_FILE),
        r#"{"students":[
            {"name":"Alice","matric_num":"A0000001A"},
            {"name":"Alicia","matric_num":"A0000001A"}
        ]}"#,
    )
    .unwrap();
    let repo = JsonBookRepository::new(dir.path());

    assert!(matches!(
        load_model(&repo),
        Err(RepoError::InvalidData(_))
    ));
}

#[test]
fn lesson_enrolling_unknown_student_is_rejected() {
    let dir = TempDir::new().unwrap();
    let repo = JsonBookRepository::new(dir.path());
    save_model(&repo, &populated_model()).unwrap();

    // Drop Benson from the student book while lessons still enroll him.
    let students = repo.load_students().unwrap();
    repo.save_students(&students[..1]).unwrap();

    let err = load_model(&repo).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
    assert!(err.to_string().contains("A0000002B"));
}

#[test]
fn mismatched_attendance_length_is_rejected() {
    let dir = TempDir::new().unwrap();
    let repo = JsonBookRepository::new(dir.path());
    save_model(&repo, &populated_model()).unwrap();

    let path = dir.path().join(LESSONS_FILE);
    let mut value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    value["lessons"][0]["attendance"] = serde_json::json!([true]);
    std::fs::write(&path, value.to_string()).unwrap();

    let students = repo.load_students().unwrap();
    assert!(matches!(
        repo.load_lessons(&students),
        Err(RepoError::InvalidData(_))
    ));
}

#[test]
fn lessons_store_roster_as_matric_numbers() {
    let dir = TempDir::new().unwrap();
    let repo = JsonBookRepository::new(dir.path());
    save_model(&repo, &populated_model()).unwrap();

    let raw = std::fs::read_to_string(dir.path().join(LESSONS_FILE)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(
        value["lessons"][0]["students"],
        serde_json::json!(["A0000001A", "A0000002B"])
    );
}

#[test]
fn rosters_take_names_and_grades_from_student_book() {
    let dir = TempDir::new().unwrap();
    let repo = JsonBookRepository::new(dir.path());
    let mut model = populated_model();
    save_model(&repo, &model).unwrap();

    // Only the student book reaches disk, as when the lesson write fails.
    run(&mut model, "editstudent 1 s/Alice Tan");
    run(&mut model, "grade 1 ra2/6");
    repo.save_students(model.students()).unwrap();

    let loaded = load_model(&repo).unwrap();

    for lesson in loaded.lessons() {
        let alice = &lesson.students()[0];
        assert_eq!(alice.name().as_str(), "Alice Tan");
        assert_eq!(alice.grade_profile().marks(Assessment::Ra2), Some(6.0));
    }
}

#[test]
fn hand_edited_roster_entry_is_rejected() {
    let dir = TempDir::new().unwrap();
    let repo = JsonBookRepository::new(dir.path());
    save_model(&repo, &populated_model()).unwrap();

    let path = dir.path().join(LESSONS_FILE);
    let mut value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    value["lessons"][0]["students"][0] =
        serde_json::json!({"name": "Mallory", "matric_num": "A0000001A"});
    std::fs::write(&path, value.to_string()).unwrap();

    assert!(matches!(
        load_model(&repo),
        Err(RepoError::InvalidData(_))
    ));
}
