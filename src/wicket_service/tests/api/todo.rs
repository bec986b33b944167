use tempfile::TempDir;
use wicket_core::TodoItem;

use crate::helpers::{TestApp, assert_redirect};

#[tokio::test]
async fn empty_list_renders() {
    let app = TestApp::todo().await;

    let response = app.get("/").await;

    assert_eq!(response.status().as_u16(), 200);
    assert!(response.text().await.unwrap().contains("Nothing to do."));
}

#[tokio::test]
async fn new_items_are_listed_and_persisted() {
    let app = TestApp::todo().await;
    assert_eq!(app.get("/new").await.status().as_u16(), 200);

    for title in ["milk", "bread"] {
        let response = app
            .post_form(
                "/new",
                &[("title", title), ("time", "today"), ("content", "shop")],
            )
            .await;
        assert_redirect(&response, "/");
    }

    let html = app.get("/").await.text().await.unwrap();
    assert!(html.contains("milk"));
    assert!(html.contains("bread"));

    let raw = tokio::fs::read_to_string(app.data_dir.path().join("todos.json"))
        .await
        .unwrap();
    let saved: Vec<TodoItem> = serde_json::from_str(&raw).unwrap();
    assert_eq!(saved.iter().map(|t| t.id).collect::<Vec<_>>(), [1, 2]);
    assert_eq!(saved[0].title, "milk");
    assert!(!saved[1].completed);
}

#[tokio::test]
async fn malformed_list_file_is_a_server_error_not_a_crash() {
    let data_dir = TempDir::new().unwrap();
    let path = data_dir.path().join("todos.json");
    tokio::fs::write(&path, r#"[{"id": 1,"#).await.unwrap();
    let app = TestApp::todo_in(data_dir).await;

    assert_eq!(app.get("/").await.status().as_u16(), 500);
    let response = app
        .post_form("/new", &[("title", "t"), ("time", "now"), ("content", "c")])
        .await;
    assert_eq!(response.status().as_u16(), 500);

    assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), r#"[{"id": 1,"#);
    assert_eq!(app.get("/new").await.status().as_u16(), 200);
}
