mod auth;
mod minesweeper;
mod todo;
mod user_system;

pub use auth::{
    AuthFlow, AuthRouteState, CredentialsForm, Feedback, LOGGED_OUT, LOGIN_SUCCESS,
    REGISTER_SUCCESS, login, login_form, logout, register, register_form,
};
pub use minesweeper::{GameState, game, profile};
pub use todo::{TodoState, create_todo, list_todos, new_todo_form};
pub use user_system::{success, welcome};
