use crate::helpers::{TestApp, assert_redirect, get_random_username};

#[tokio::test]
async fn anonymous_requests_to_gated_routes_redirect_to_login() {
    let app = TestApp::minesweeper().await;

    for path in ["/", "/profile", "/logout"] {
        let response = app.get(path).await;
        assert_redirect(&response, "/login");
    }
}

#[tokio::test]
async fn register_then_login_opens_the_game() {
    let app = TestApp::minesweeper().await;
    let username = get_random_username();

    let response = app.register(&username, "pw1").await;
    assert_redirect(&response, "/login");

    // Registration alone does not authenticate.
    assert_redirect(&app.get("/").await, "/login");

    let response = app.login(&username, "pw1").await;
    assert_redirect(&response, "/");

    let response = app.get("/").await;
    assert_eq!(response.status().as_u16(), 200);
    let html = response.text().await.unwrap();
    assert!(html.contains("game-board"));
    assert!(html.contains(r#"data-mines="10""#));

    let html = app.get("/profile").await.text().await.unwrap();
    assert!(html.contains(&username));
}

#[tokio::test]
async fn duplicate_registration_is_reported_inline() {
    let app = TestApp::minesweeper().await;
    let username = get_random_username();
    app.register(&username, "pw1").await;

    let response = app.register(&username, "pw2").await;

    assert_eq!(response.status().as_u16(), 200);
    assert!(response.text().await.unwrap().contains("Username already exists"));

    // The original password still works.
    assert_redirect(&app.login(&username, "pw1").await, "/");
}

#[tokio::test]
async fn wrong_password_rerenders_form_without_authenticating() {
    let app = TestApp::minesweeper().await;
    let username = get_random_username();
    app.register(&username, "pw1").await;

    let response = app.login(&username, "wrong").await;

    assert_eq!(response.status().as_u16(), 200);
    assert!(
        response
            .text()
            .await
            .unwrap()
            .contains("Invalid username or password")
    );
    assert_redirect(&app.get("/").await, "/login");
}

#[tokio::test]
async fn logout_clears_authentication() {
    let app = TestApp::minesweeper().await;
    let username = get_random_username();
    app.register(&username, "pw1").await;
    app.login(&username, "pw1").await;
    assert_eq!(app.get("/").await.status().as_u16(), 200);

    assert_redirect(&app.get("/logout").await, "/login");

    assert_redirect(&app.get("/").await, "/login");
}

#[tokio::test]
async fn empty_password_is_rejected_at_registration() {
    let app = TestApp::minesweeper().await;

    let response = app.register(&get_random_username(), "").await;

    assert_eq!(response.status().as_u16(), 200);
    assert!(
        response
            .text()
            .await
            .unwrap()
            .contains("Password must not be empty")
    );
}
