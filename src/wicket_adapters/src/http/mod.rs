pub mod error;
pub mod gate;
pub mod routes;
pub mod session;
pub mod views;

pub use error::AppError;
pub use gate::require_session;
pub use session::{SessionCookie, SessionHandle, SessionLayer, load_session};
pub use views::{AskamaRenderer, respond};
