mod common;

use axum::http::StatusCode;
use courseware::{
    model::{
        CrudRepository,
        entity::{Question, Quiz},
    },
    web::AuthenticatedUser,
};
use uuid::Uuid;

use crate::common::{
    Action, Flow, login_admin_action, login_student_action, seed_admin, seed_course, seed_module,
    seed_quiz, seed_student, setup_server, setup_test_db,
};

#[tokio::test]
async fn create_quiz_stores_five_ordered_questions() {
    let db = setup_test_db().await;
    let uploads = tempfile::tempdir().unwrap();
    let mut server = setup_server(&db, uploads.path()).await;
    seed_admin(&db).await;
    let course = seed_course(&db, "Geography").await;
    let module = seed_module(&db, &course, "Europe").await;

    let module_id = module.id().to_string();

    Flow::new()
        .step(login_admin_action())
        .step(Action::get("create_page", "/quizzes/create").assert_body_contains("Europe"))
        .step(
            Action::post("create", "/quizzes/create")
                .with_form(&[
                    ("title", "Capitals"),
                    ("module_id", module_id.as_str()),
                    ("question_1_text", "Capital of France?"),
                    ("question_1_answer", "Paris"),
                    ("question_2_text", "Capital of Spain?"),
                    ("question_2_answer", "Madrid"),
                    ("question_4_text", ""),
                ])
                .with_redirect("/quizzes"),
        )
        .step(Action::get("list", "/quizzes").assert_body(|body| {
            assert!(body.contains("Capitals"));
            assert!(body.contains("<td>5</td>"));
        }))
        .run(&mut server)
        .await;

    let mm = db.mm();
    let system = AuthenticatedUser::system();
    let quizzes = Quiz::list(&mm, &system).await.unwrap();
    assert_eq!(quizzes.len(), 1);
    assert_eq!(quizzes[0].module_id(), module.id());

    let questions = Question::all_by_quiz(&mm, &system, quizzes[0].id())
        .await
        .unwrap();
    assert_eq!(questions.len(), 5);
    assert_eq!(
        questions.iter().map(Question::position).collect::<Vec<_>>(),
        vec![1, 2, 3, 4, 5]
    );
    assert_eq!(questions[0].text(), Some("Capital of France?"));
    assert_eq!(questions[0].answer(), Some("Paris"));
    assert_eq!(questions[1].answer(), Some("Madrid"));
    assert_eq!(questions[2].text(), None);
    assert_eq!(questions[2].answer(), None);
    assert_eq!(questions[3].text(), Some(""));
    assert_eq!(questions[4].text(), None);
}

#[tokio::test]
async fn invalid_quiz_creates_nothing() {
    let db = setup_test_db().await;
    let uploads = tempfile::tempdir().unwrap();
    let mut server = setup_server(&db, uploads.path()).await;
    seed_admin(&db).await;

    let unknown_module = Uuid::new_v4().to_string();

    Flow::new()
        .step(login_admin_action())
        .step(
            Action::post("no_module", "/quizzes/create")
                .with_form(&[("title", "Orphan"), ("question_1_text", "kept?")])
                .assert_body(|body| {
                    assert!(body.contains("This field is required."));
                    assert!(body.contains("value=\"kept?\""));
                }),
        )
        .step(
            Action::post("unknown_module", "/quizzes/create")
                .with_form(&[("title", "Orphan"), ("module_id", unknown_module.as_str())])
                .assert_body_contains("That module does not exist."),
        )
        .run(&mut server)
        .await;

    let mm = db.mm();
    let system = AuthenticatedUser::system();
    assert_eq!(Quiz::count(&mm, &system).await.unwrap(), 0);
    assert_eq!(Question::count(&mm, &system).await.unwrap(), 0);
}

#[tokio::test]
async fn grading_is_exact_and_case_sensitive() {
    let db = setup_test_db().await;
    let uploads = tempfile::tempdir().unwrap();
    let mut server = setup_server(&db, uploads.path()).await;
    seed_student(&db, "alice").await;
    let course = seed_course(&db, "Trivia").await;
    let module = seed_module(&db, &course, "Mixed").await;
    let (quiz, questions) = seed_quiz(
        &db,
        &module,
        "Warm-up",
        &[("2+2?", Some("4")), ("Capital of France?", Some("Paris"))],
    )
    .await;

    let path = format!("/quizzes/{}", quiz.id());
    let first = questions[0].field_name();
    let second = questions[1].field_name();

    Flow::new()
        .step(login_student_action("alice"))
        .step(Action::get("take", &path).assert_body(move |body| {
            assert!(body.contains("2+2?"));
            assert!(body.contains("Capital of France?"));
            assert!(body.find("2+2?") < body.find("Capital of France?"));
        }))
        .step(
            Action::post("submit", &path)
                .with_form(&[(first.as_str(), "4"), (second.as_str(), "paris")])
                .assert_body(|body| {
                    assert!(body.contains("<span id=\"score\">1</span>"));
                    assert!(body.contains("<span id=\"total\">2</span>"));
                }),
        )
        // resubmitting the same answers scores the same
        .step(
            Action::post("resubmit", &path)
                .with_form(&[(first.as_str(), "4"), (second.as_str(), "paris")])
                .assert_body_contains("<span id=\"score\">1</span>"),
        )
        .step(
            Action::post("empty_submission", &path)
                .with_form(&[])
                .assert_body(|body| {
                    assert!(body.contains("<span id=\"score\">0</span>"));
                    assert!(body.contains("<span id=\"total\">2</span>"));
                }),
        )
        .run(&mut server)
        .await;
}

#[tokio::test]
async fn questions_without_answers_never_score() {
    let db = setup_test_db().await;
    let uploads = tempfile::tempdir().unwrap();
    let mut server = setup_server(&db, uploads.path()).await;
    seed_student(&db, "alice").await;
    let course = seed_course(&db, "Trivia").await;
    let module = seed_module(&db, &course, "Mixed").await;
    let (quiz, questions) = seed_quiz(
        &db,
        &module,
        "Open ended",
        &[("Anything?", None), ("1+1?", Some("2"))],
    )
    .await;

    let path = format!("/quizzes/{}", quiz.id());
    let first = questions[0].field_name();
    let second = questions[1].field_name();

    Flow::new()
        .step(login_student_action("alice"))
        .step(
            Action::post("submit", &path)
                .with_form(&[(first.as_str(), ""), (second.as_str(), "2")])
                .assert_body(|body| {
                    assert!(body.contains("<span id=\"score\">1</span>"));
                    assert!(body.contains("<span id=\"total\">2</span>"));
                }),
        )
        .run(&mut server)
        .await;
}

#[tokio::test]
async fn unknown_quizzes_are_not_found() {
    let db = setup_test_db().await;
    let uploads = tempfile::tempdir().unwrap();
    let mut server = setup_server(&db, uploads.path()).await;
    seed_student(&db, "alice").await;

    let unknown = format!("/quizzes/{}", Uuid::new_v4());

    Flow::new()
        .step(login_student_action("alice"))
        .step(
            Action::get("unknown", &unknown)
                .with_expect(StatusCode::NOT_FOUND)
                .assert_body_contains("The requested quiz does not exist."),
        )
        .step(Action::post("submit_unknown", &unknown).with_expect(StatusCode::NOT_FOUND))
        .step(Action::get("malformed", "/quizzes/abc").with_expect(StatusCode::NOT_FOUND))
        .step(Action::get("no_route", "/nowhere").with_expect(StatusCode::NOT_FOUND))
        .run(&mut server)
        .await;
}

#[tokio::test]
async fn course_detail_lists_module_quizzes() {
    let db = setup_test_db().await;
    let uploads = tempfile::tempdir().unwrap();
    let mut server = setup_server(&db, uploads.path()).await;
    seed_student(&db, "alice").await;
    let course = seed_course(&db, "Algorithms").await;
    let other = seed_course(&db, "Databases").await;
    let sorting = seed_module(&db, &course, "Sorting").await;
    let graphs = seed_module(&db, &course, "Graphs").await;
    let sql = seed_module(&db, &other, "SQL").await;
    seed_quiz(&db, &sorting, "Quicksort quiz", &[]).await;
    seed_quiz(&db, &graphs, "BFS quiz", &[]).await;
    seed_quiz(&db, &sql, "Joins quiz", &[]).await;

    let path = format!("/courses/{}", course.id());
    let empty_path = format!("/courses/{}", seed_course(&db, "Empty").await.id());
    let unknown_path = format!("/courses/{}", Uuid::new_v4());

    Flow::new()
        .step(login_student_action("alice"))
        .step(Action::get("detail", &path).assert_body(|body| {
            assert!(body.contains("Algorithms"));
            assert!(body.contains("Quicksort quiz"));
            assert!(body.contains("BFS quiz"));
            assert!(!body.contains("Joins quiz"));
        }))
        .step(
            Action::get("no_modules", &empty_path)
                .assert_body_contains("This course has no quizzes yet."),
        )
        .step(Action::get("unknown", &unknown_path).with_expect(StatusCode::NOT_FOUND))
        .run(&mut server)
        .await;
}
