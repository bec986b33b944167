//! Named views, named routes, and the page a handler produces.

use super::{flash::Flash, todo::TodoItem, username::Username};

/// Routes a handler may redirect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Logout,
    Profile,
    Success,
    NewTodo,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Logout => "/logout",
            Route::Profile => "/profile",
            Route::Success => "/success",
            Route::NewTodo => "/new",
        }
    }
}

/// A view name together with the data it is rendered from.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Game {
        rows: u32,
        cols: u32,
        mines: u32,
        score: i64,
    },
    Profile {
        username: Username,
        score: i64,
    },
    Login {
        error: Option<String>,
        flashes: Vec<Flash>,
    },
    Register {
        error: Option<String>,
        flashes: Vec<Flash>,
    },
    Welcome {
        flashes: Vec<Flash>,
    },
    Success {
        flashes: Vec<Flash>,
    },
    TodoList {
        todos: Vec<TodoItem>,
    },
    NewTodo,
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::Game { .. } => "game",
            View::Profile { .. } => "profile",
            View::Login { .. } => "login",
            View::Register { .. } => "register",
            View::Welcome { .. } => "welcome",
            View::Success { .. } => "success",
            View::TodoList { .. } => "todo_list",
            View::NewTodo => "new_todo",
        }
    }
}

/// What a route handler produces.
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Render(View),
    Redirect(Route),
}

impl From<View> for Page {
    fn from(view: View) -> Self {
        Page::Render(view)
    }
}

impl From<Route> for Page {
    fn from(route: Route) -> Self {
        Page::Redirect(route)
    }
}
