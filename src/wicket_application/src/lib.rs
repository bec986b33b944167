pub mod session_gate;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod mocks;

pub use session_gate::{Principal, SessionGate};
pub use use_cases::{
    add_todo::{AddTodoError, AddTodoUseCase},
    list_todos::ListTodosUseCase,
    load_profile::{LoadProfileUseCase, ProfileError},
    login::{LoginError, LoginUseCase},
    logout::LogoutUseCase,
    register::{RegisterError, RegisterUseCase},
};
