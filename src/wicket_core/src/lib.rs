pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    auth_error::AuthError,
    flash::{Flash, FlashLevel},
    password::Password,
    session::{AuthState, InvalidSessionToken, Session, SessionToken},
    todo::{NewTodo, TodoItem},
    user::{User, UserError, UserId},
    username::{MAX_USERNAME_LENGTH, Username},
    view::{Page, Route, View},
};

pub use ports::{
    repositories::{
        CredentialStore, CredentialStoreError, SessionStore, SessionStoreError, TodoStore,
        TodoStoreError,
    },
    services::{RenderError, ViewRenderer},
};
