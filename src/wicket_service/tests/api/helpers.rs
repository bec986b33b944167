use fake::{Fake, faker::internet::en::Username};
use reqwest::{Response, redirect::Policy};
use tempfile::TempDir;
use tokio::net::TcpListener;
use wicket_adapters::{
    HashMapCredentialStore, HashMapSessionStore, JsonFileTodoStore, PasswordPolicy,
    config::{BoardSettings, DEFAULT_SESSION_COOKIE_NAME, test},
    http::{AskamaRenderer, SessionCookie, SessionLayer},
};
use wicket_service::WicketApp;

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub data_dir: TempDir,
}

fn session_layer() -> SessionLayer<HashMapSessionStore> {
    SessionLayer::new(
        HashMapSessionStore::new(3600),
        SessionCookie::new(DEFAULT_SESSION_COOKIE_NAME, false),
    )
}

impl TestApp {
    pub async fn minesweeper() -> Self {
        let app = WicketApp::minesweeper(
            HashMapCredentialStore::new(PasswordPolicy::Argon2),
            session_layer(),
            AskamaRenderer,
            BoardSettings {
                rows: 9,
                cols: 9,
                mines: 10,
            },
            "assets",
        );
        Self::spawn(app, TempDir::new().unwrap()).await
    }

    pub async fn user_system() -> Self {
        let app = WicketApp::user_system(
            HashMapCredentialStore::new(PasswordPolicy::Plaintext),
            session_layer(),
            AskamaRenderer,
            "assets",
        );
        Self::spawn(app, TempDir::new().unwrap()).await
    }

    pub async fn todo() -> Self {
        Self::todo_in(TempDir::new().unwrap()).await
    }

    /// To-do app over whatever `todos.json` already sits in `data_dir`.
    pub async fn todo_in(data_dir: TempDir) -> Self {
        let todos = JsonFileTodoStore::open(data_dir.path().join("todos.json")).await;
        let app = WicketApp::todo(todos, AskamaRenderer, "assets");
        Self::spawn(app, data_dir).await
    }

    async fn spawn(app: WicketApp, data_dir: TempDir) -> Self {
        let listener = TcpListener::bind(test::APP_ADDRESS).await.unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(app.run_standalone(listener));

        let http_client = reqwest::Client::builder()
            .redirect(Policy::none())
            .cookie_store(true)
            .build()
            .unwrap();

        Self {
            address,
            http_client,
            data_dir,
        }
    }

    pub async fn get(&self, path: &str) -> Response {
        self.http_client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Response {
        self.http_client
            .post(format!("{}{}", self.address, path))
            .form(form)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn register(&self, username: &str, password: &str) -> Response {
        self.post_form("/register", &[("username", username), ("password", password)])
            .await
    }

    pub async fn login(&self, username: &str, password: &str) -> Response {
        self.post_form("/login", &[("username", username), ("password", password)])
            .await
    }
}

pub fn get_random_username() -> String {
    let name: String = Username().fake();
    let cleaned: String = name.chars().filter(char::is_ascii_alphanumeric).collect();
    format!("user{cleaned}")
}

/// The `name=value` pair of the session cookie a response sets, if any.
pub fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| pair.starts_with(&format!("{DEFAULT_SESSION_COOKIE_NAME}=")))
        .map(str::to_owned)
}

pub fn assert_redirect(response: &Response, location: &str) {
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(
        response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some(location)
    );
}
