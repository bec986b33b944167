use reqwest::{header::COOKIE, redirect::Policy};

use crate::helpers::{TestApp, assert_redirect, get_random_username, session_cookie};

#[tokio::test]
async fn login_lands_on_success_page_with_one_shot_flash() {
    let app = TestApp::user_system().await;
    let username = get_random_username();

    assert_redirect(&app.register(&username, "pw1").await, "/login");
    let html = app.get("/login").await.text().await.unwrap();
    assert!(html.contains("Registration successful! Please log in."));

    assert_redirect(&app.login(&username, "pw1").await, "/success");

    let html = app.get("/success").await.text().await.unwrap();
    assert!(html.contains("Login successful!"));

    let html = app.get("/success").await.text().await.unwrap();
    assert!(!html.contains("Login successful!"));
}

#[tokio::test]
async fn success_page_requires_login() {
    let app = TestApp::user_system().await;

    assert_redirect(&app.get("/success").await, "/login");
}

#[tokio::test]
async fn failed_login_is_flashed_on_the_form() {
    let app = TestApp::user_system().await;

    let response = app.login(&get_random_username(), "pw").await;

    assert_eq!(response.status().as_u16(), 200);
    let html = response.text().await.unwrap();
    assert!(html.contains("flash-error"));
    assert!(html.contains("Invalid username or password"));
}

#[tokio::test]
async fn logout_is_open_and_idempotent() {
    let app = TestApp::user_system().await;

    assert_redirect(&app.get("/logout").await, "/");
    assert_redirect(&app.get("/logout").await, "/");

    let html = app.get("/").await.text().await.unwrap();
    assert!(html.contains("You have been logged out."));
}

#[tokio::test]
async fn logout_after_login_closes_the_gate() {
    let app = TestApp::user_system().await;
    let username = get_random_username();
    app.register(&username, "pw1").await;
    app.login(&username, "pw1").await;
    assert_eq!(app.get("/success").await.status().as_u16(), 200);

    assert_redirect(&app.get("/logout").await, "/");

    assert_redirect(&app.get("/success").await, "/login");
}

#[tokio::test]
async fn duplicate_registration_is_flashed() {
    let app = TestApp::user_system().await;
    let username = get_random_username();
    app.register(&username, "pw1").await;

    let response = app.register(&username, "pw2").await;

    assert_eq!(response.status().as_u16(), 200);
    assert!(response.text().await.unwrap().contains("Username already exists"));
}

#[tokio::test]
async fn login_issues_a_new_session_token() {
    let app = TestApp::user_system().await;
    let username = get_random_username();
    let pre_login = session_cookie(&app.register(&username, "pw1").await)
        .expect("registration starts a session");

    let response = app.login(&username, "pw1").await;
    assert_redirect(&response, "/success");
    let post_login = session_cookie(&response).expect("login issues a session cookie");
    assert_ne!(post_login, pre_login);

    let other_client = reqwest::Client::builder()
        .redirect(Policy::none())
        .build()
        .unwrap();
    let replayed = other_client
        .get(format!("{}/success", app.address))
        .header(COOKIE, pre_login)
        .send()
        .await
        .unwrap();
    assert_redirect(&replayed, "/login");

    assert_eq!(app.get("/success").await.status().as_u16(), 200);
}
