mod common;

use axum::http::StatusCode;
use courseware::{
    model::{
        CrudRepository,
        entity::{StudentProgress, StudentProgressCreate},
    },
    web::{AuthenticatedUser, session::AUTH_TOKEN},
};
use tower_cookies::cookie::SameSite;

use crate::common::{
    Action, Flow, login_action, login_admin_action, login_student_action, seed_admin,
    seed_course, seed_lesson, seed_student, seed_user, setup_server, setup_test_db,
};

#[tokio::test]
async fn login_redirects_by_role() {
    let db = setup_test_db().await;
    let uploads = tempfile::tempdir().unwrap();
    let mut server = setup_server(&db, uploads.path()).await;
    seed_admin(&db).await;
    seed_student(&db, "alice").await;
    seed_course(&db, "Rust for beginners").await;

    Flow::new()
        .step(login_admin_action().assert_cookie(AUTH_TOKEN, |cookie| {
            assert_eq!(cookie.same_site(), Some(SameSite::Lax));
            assert_eq!(cookie.path(), Some("/"));
            assert_eq!(cookie.http_only(), Some(true));
        }))
        .step(Action::get("admin_dashboard", "/admin").assert_body_contains("Administration"))
        .step(login_student_action("alice").with_clear_cookies(true))
        .step(
            Action::get("student_dashboard", "/student")
                .assert_body_contains("Rust for beginners"),
        )
        .run(&mut server)
        .await;
}

#[tokio::test]
async fn admin_and_student_flags_land_on_admin() {
    let db = setup_test_db().await;
    let uploads = tempfile::tempdir().unwrap();
    let mut server = setup_server(&db, uploads.path()).await;
    seed_user(&db, "both", "both-password", true, true).await;

    Flow::new()
        .step(login_action("both", "both-password").with_redirect("/admin"))
        .step(Action::get("student_dashboard", "/student"))
        .run(&mut server)
        .await;
}

#[tokio::test]
async fn invalid_credentials_rerender_login() {
    let db = setup_test_db().await;
    let uploads = tempfile::tempdir().unwrap();
    let mut server = setup_server(&db, uploads.path()).await;
    seed_student(&db, "alice").await;

    Flow::new()
        .step(
            login_action("alice", "wrong-password")
                .assert_no_cookie(AUTH_TOKEN)
                .assert_body_contains("Invalid credentials"),
        )
        .step(
            login_action("nobody", "whatever")
                .assert_no_cookie(AUTH_TOKEN)
                .assert_body_contains("Invalid credentials")
                .assert_body_contains("value=\"nobody\""),
        )
        .step(Action::get("still_anonymous", "/profile").with_redirect("/login"))
        .run(&mut server)
        .await;
}

#[tokio::test]
async fn login_without_role_flags_stays_on_login_page() {
    let db = setup_test_db().await;
    let uploads = tempfile::tempdir().unwrap();
    let mut server = setup_server(&db, uploads.path()).await;
    seed_user(&db, "plain", "plain-password", false, false).await;

    Flow::new()
        .step(
            login_action("plain", "plain-password")
                .assert_cookie(AUTH_TOKEN, |cookie| assert!(!cookie.value().is_empty()))
                .assert_body(|body| {
                    assert!(body.contains("Log in"));
                    assert!(!body.contains("Invalid credentials"));
                }),
        )
        // the session is bound, but neither dashboard opens
        .step(Action::get("profile", "/profile"))
        .step(Action::get("student_gate", "/student").with_redirect("/login"))
        .step(Action::get("admin_gate", "/admin").with_redirect("/login"))
        .run(&mut server)
        .await;
}

#[tokio::test]
async fn logout_ends_session() {
    let db = setup_test_db().await;
    let uploads = tempfile::tempdir().unwrap();
    let mut server = setup_server(&db, uploads.path()).await;
    seed_student(&db, "alice").await;

    Flow::new()
        .step(login_student_action("alice"))
        .step(Action::get("profile", "/profile"))
        .step(Action::get("logout", "/logout").with_redirect("/login"))
        .step(Action::get("profile_after_logout", "/profile").with_redirect("/login"))
        .run(&mut server)
        .await;
}

#[tokio::test]
async fn role_gates_redirect_to_login() {
    let db = setup_test_db().await;
    let uploads = tempfile::tempdir().unwrap();
    let mut server = setup_server(&db, uploads.path()).await;
    seed_admin(&db).await;
    seed_student(&db, "alice").await;

    Flow::new()
        .step(Action::get("index", "/").with_redirect("/login"))
        .step(Action::get("anon_admin", "/admin").with_redirect("/login"))
        .step(Action::get("anon_student", "/student").with_redirect("/login"))
        .step(Action::get("anon_quizzes", "/quizzes").with_redirect("/login"))
        .step(login_student_action("alice"))
        .step(Action::get("student_admin", "/admin").with_redirect("/login"))
        .step(Action::get("student_quiz_create", "/quizzes/create").with_redirect("/login"))
        .step(Action::get("student_quizzes", "/quizzes"))
        .step(login_admin_action().with_clear_cookies(true))
        .step(Action::get("admin_student", "/student").with_redirect("/login"))
        .run(&mut server)
        .await;
}

#[tokio::test]
async fn forged_session_cookie_is_anonymous() {
    let db = setup_test_db().await;
    let uploads = tempfile::tempdir().unwrap();
    let mut server = setup_server(&db, uploads.path()).await;

    server.add_cookie(tower_cookies::Cookie::new(AUTH_TOKEN, "not-a-jwt"));

    Flow::new()
        .step(Action::get("profile", "/profile").with_redirect("/login"))
        .step(Action::get("login_page", "/login").assert_body_contains("Log in"))
        .run(&mut server)
        .await;
}

#[tokio::test]
async fn profile_lists_own_progress() {
    let db = setup_test_db().await;
    let uploads = tempfile::tempdir().unwrap();
    let mut server = setup_server(&db, uploads.path()).await;
    let alice = seed_student(&db, "alice").await;
    let bob = seed_student(&db, "bob").await;
    let ownership = seed_lesson(&db, "Ownership").await;
    let lifetimes = seed_lesson(&db, "Lifetimes").await;

    let mm = db.mm();
    let system = AuthenticatedUser::system();
    StudentProgress::create(
        &mm,
        &system,
        StudentProgressCreate {
            student_id: alice.id(),
            lesson_id: ownership.id(),
            completed: true,
        },
    )
    .await
    .unwrap();
    StudentProgress::create(
        &mm,
        &system,
        StudentProgressCreate {
            student_id: bob.id(),
            lesson_id: lifetimes.id(),
            completed: false,
        },
    )
    .await
    .unwrap();

    Flow::new()
        .step(login_student_action("alice"))
        .step(Action::get("profile", "/profile").assert_body(|body| {
            assert!(body.contains("Ownership"));
            assert!(body.contains("Completed"));
            assert!(!body.contains("Lifetimes"));
        }))
        .run(&mut server)
        .await;
}

#[tokio::test]
async fn admin_profile_is_empty() {
    let db = setup_test_db().await;
    let uploads = tempfile::tempdir().unwrap();
    let mut server = setup_server(&db, uploads.path()).await;
    seed_admin(&db).await;

    Flow::new()
        .step(login_admin_action())
        .step(
            Action::get("profile", "/profile")
                .with_expect(StatusCode::OK)
                .assert_body_contains("No progress recorded."),
        )
        .run(&mut server)
        .await;
}
