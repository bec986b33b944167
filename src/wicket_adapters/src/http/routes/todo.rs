use axum::{Form, extract::State, response::Response};
use wicket_application::{AddTodoError, AddTodoUseCase, ListTodosUseCase};
use wicket_core::{NewTodo, Page, Route, TodoStore, View, ViewRenderer};

use crate::http::{error::AppError, views::respond};

#[derive(Clone)]
pub struct TodoState<T, R> {
    pub todos: T,
    pub renderer: R,
}

impl<T, R> TodoState<T, R> {
    pub fn new(todos: T, renderer: R) -> Self {
        Self { todos, renderer }
    }
}

impl From<AddTodoError> for AppError {
    fn from(error: AddTodoError) -> Self {
        match error {
            AddTodoError::TodoStoreError(e) => AppError::TodoStore(e),
        }
    }
}

pub async fn list_todos<T, R>(State(state): State<TodoState<T, R>>) -> Result<Response, AppError>
where
    T: TodoStore + Clone + 'static,
    R: ViewRenderer + Clone + 'static,
{
    let todos = ListTodosUseCase::new(state.todos.clone()).execute().await?;
    respond(&state.renderer, View::TodoList { todos }.into())
}

pub async fn new_todo_form<T, R>(State(state): State<TodoState<T, R>>) -> Result<Response, AppError>
where
    T: TodoStore + Clone + 'static,
    R: ViewRenderer + Clone + 'static,
{
    respond(&state.renderer, View::NewTodo.into())
}

#[tracing::instrument(name = "Create to-do", skip_all)]
pub async fn create_todo<T, R>(
    State(state): State<TodoState<T, R>>,
    Form(todo): Form<NewTodo>,
) -> Result<Response, AppError>
where
    T: TodoStore + Clone + 'static,
    R: ViewRenderer + Clone + 'static,
{
    AddTodoUseCase::new(state.todos.clone()).execute(todo).await?;
    respond(&state.renderer, Page::Redirect(Route::Home))
}
