pub mod add_todo;
pub mod list_todos;
pub mod load_profile;
pub mod login;
pub mod logout;
pub mod register;
