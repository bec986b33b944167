use askama::Template;
use axum::response::{Html, IntoResponse, Redirect, Response};
use wicket_core::{Flash, Page, RenderError, TodoItem, Username, View, ViewRenderer};

use super::error::AppError;

#[derive(Template)]
#[template(path = "game.html")]
struct GameTemplate {
    rows: u32,
    cols: u32,
    mines: u32,
    score: i64,
}

#[derive(Template)]
#[template(path = "profile.html")]
struct ProfileTemplate<'a> {
    username: &'a Username,
    score: i64,
}

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate<'a> {
    error: Option<&'a str>,
    flashes: &'a [Flash],
}

#[derive(Template)]
#[template(path = "register.html")]
struct RegisterTemplate<'a> {
    error: Option<&'a str>,
    flashes: &'a [Flash],
}

#[derive(Template)]
#[template(path = "welcome.html")]
struct WelcomeTemplate<'a> {
    flashes: &'a [Flash],
}

#[derive(Template)]
#[template(path = "success.html")]
struct SuccessTemplate<'a> {
    flashes: &'a [Flash],
}

#[derive(Template)]
#[template(path = "todo_list.html")]
struct TodoListTemplate<'a> {
    todos: &'a [TodoItem],
}

#[derive(Template)]
#[template(path = "new_todo.html")]
struct NewTodoTemplate;

/// Renders views with compiled-in askama templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct AskamaRenderer;

impl ViewRenderer for AskamaRenderer {
    fn render(&self, view: &View) -> Result<String, RenderError> {
        let rendered = match view {
            View::Game {
                rows,
                cols,
                mines,
                score,
            } => GameTemplate {
                rows: *rows,
                cols: *cols,
                mines: *mines,
                score: *score,
            }
            .render(),
            View::Profile { username, score } => ProfileTemplate {
                username,
                score: *score,
            }
            .render(),
            View::Login { error, flashes } => LoginTemplate {
                error: error.as_deref(),
                flashes,
            }
            .render(),
            View::Register { error, flashes } => RegisterTemplate {
                error: error.as_deref(),
                flashes,
            }
            .render(),
            View::Welcome { flashes } => WelcomeTemplate { flashes }.render(),
            View::Success { flashes } => SuccessTemplate { flashes }.render(),
            View::TodoList { todos } => TodoListTemplate { todos }.render(),
            View::NewTodo => NewTodoTemplate.render(),
        };

        rendered.map_err(|e| RenderError {
            view: view.name(),
            message: e.to_string(),
        })
    }
}

/// Turns a handler's `Page` into an HTTP response.
pub fn respond<R: ViewRenderer>(renderer: &R, page: Page) -> Result<Response, AppError> {
    match page {
        Page::Render(view) => Ok(Html(renderer.render(&view)?).into_response()),
        Page::Redirect(route) => Ok(Redirect::to(route.path()).into_response()),
    }
}
