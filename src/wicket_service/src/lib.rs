pub mod app;
pub mod bootstrap;
pub mod helpers;
pub mod stores;
pub mod tracing;

pub use app::WicketApp;
pub use bootstrap::{StartupError, build_app};
pub use stores::{AnyCredentialStore, AnySessionStore};
