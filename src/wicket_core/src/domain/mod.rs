pub mod auth_error;
pub mod flash;
pub mod password;
pub mod session;
pub mod todo;
pub mod user;
pub mod username;
pub mod view;
