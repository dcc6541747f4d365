mod common;

use std::sync::Arc;

use common::{Backend, ScriptedApi, spawn_backend};
use dashboard::catalog;
use dashboard::client::{ApiConfig, NoopResourceApi};
use dashboard::error::AppError;
use dashboard::form::{FormMode, ResourceForm};
use dashboard::state::AppState;
use serde_json::{Value, json};

fn http_state(base_url: &str) -> AppState {
    AppState::from_config(ApiConfig::new(base_url)).expect("state")
}

#[tokio::test]
async fn missing_required_fields_block_submit() {
    let api = Arc::new(ScriptedApi::new());
    let mut form = ResourceForm::create(&catalog::FAQ, api);
    form.set("question", "   ").unwrap();

    let err = form.submit().await.unwrap_err();
    match err {
        AppError::Validation(msg) => assert_eq!(msg, "Required: Question, Answer"),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn set_parses_by_field_kind() {
    let mut form = ResourceForm::create(&catalog::COURSE, Arc::new(NoopResourceApi));

    form.set("title", "Rust 101").unwrap();
    form.set("isPublished", "yes").unwrap();
    assert_eq!(form.values().get("isPublished"), Some(&Value::Bool(true)));
    assert_eq!(form.values().get("title"), Some(&json!("Rust 101")));

    assert!(matches!(form.set("isPublished", "sometimes"), Err(AppError::Validation(_))));
    assert!(matches!(form.set("price", "10"), Err(AppError::Validation(_))));
}

#[tokio::test]
async fn reference_fields_are_submitted_verbatim() {
    let mut form = ResourceForm::create(&catalog::LEAD, Arc::new(NoopResourceApi));
    form.set("name", "Ann").unwrap();
    form.set("email", "ann@example.com").unwrap();
    form.set("courseId", "does-not-exist").unwrap();

    let saved = form.submit().await.unwrap();
    assert_eq!(saved.display_value("courseId"), "does-not-exist");
}

#[tokio::test]
async fn create_form_posts_whole_mapping() {
    let server = spawn_backend(Backend::default()).await;
    let state = http_state(&server.base_url);

    let mut form = state.create_form("template").unwrap();
    assert_eq!(form.mode(), &FormMode::Create);
    form.set("name", "Welcome").unwrap();
    form.set("subject", "Hi there").unwrap();
    form.set("body", "Thanks for joining").unwrap();

    let saved = form.submit().await.unwrap();

    assert!(saved.id("_id").is_some());
    let stored = server.stored("template");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["body"], "Thanks for joining");
    assert_eq!(server.requests(), ["POST /api/template/create"]);
}

#[tokio::test]
async fn edit_form_loads_then_puts() {
    let server = spawn_backend(Backend::default().with(
        "section",
        vec![json!({ "_id": "s1", "title": "Hero", "slug": "hero", "isActive": false })],
    ))
    .await;
    let state = http_state(&server.base_url);

    let mut form = state.edit_form("section", "s1").await.unwrap();
    assert_eq!(form.mode(), &FormMode::Edit { id: "s1".to_string() });
    assert_eq!(form.values().display_value("title"), "Hero");

    form.set("isActive", "true").unwrap();
    form.submit().await.unwrap();

    assert_eq!(server.stored("section")[0]["isActive"], true);
    assert_eq!(server.requests(), ["GET /api/section/s1", "PUT /api/section/update/s1"]);
}

#[tokio::test]
async fn edit_form_for_missing_record_fails() {
    let server = spawn_backend(Backend::default()).await;
    let state = http_state(&server.base_url);

    let err = state.edit_form("faq", "missing").await.err().expect("should fail");
    assert!(matches!(err, AppError::Http { status: 404, .. }));
}

#[tokio::test]
async fn read_only_resources_have_no_create_form() {
    let state = AppState::new(Arc::new(NoopResourceApi));
    assert!(matches!(
        state.create_form("contact").err(),
        Some(AppError::Unsupported { operation: "create", .. })
    ));
    assert!(matches!(
        state.create_form("invoice").err(),
        Some(AppError::UnknownResource(_))
    ));
}
