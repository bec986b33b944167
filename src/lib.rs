//! # Wicket
//!
//! Three small session-backed web applications behind one facade: a
//! minesweeper game with accounts, a flash-message user system, and a
//! to-do list.
//!
//! ## Structure
//!
//! - **Core domain types**: `Username`, `Password`, `Session`, `View`, etc.
//! - **Store traits**: `CredentialStore`, `SessionStore`, `TodoStore`
//! - **Use cases**: `LoginUseCase`, `RegisterUseCase`, the `SessionGate`, etc.
//! - **Adapters**: file, PostgreSQL, Redis and in-memory stores, axum handlers
//! - **Service**: `WicketApp`, one router per application

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use wicket_core::*;
}

pub use wicket_core::{
    AuthError, AuthState, Flash, FlashLevel, NewTodo, Page, Password, Route, Session,
    SessionToken, TodoItem, User, UserError, UserId, Username, View,
};

// ============================================================================
// Store Traits (Ports)
// ============================================================================

pub use wicket_core::{
    CredentialStore, CredentialStoreError, SessionStore, SessionStoreError, TodoStore,
    TodoStoreError, ViewRenderer,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use wicket_application::*;
}

pub use wicket_application::{
    AddTodoUseCase, ListTodosUseCase, LoadProfileUseCase, LoginUseCase, LogoutUseCase,
    Principal, RegisterUseCase, SessionGate,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP layer: session middleware, gate, handlers and views
    pub mod http {
        pub use wicket_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use wicket_adapters::persistence::*;
    }

    /// Configuration
    pub mod config {
        pub use wicket_adapters::config::*;
    }
}

pub use wicket_adapters::{
    HashMapCredentialStore, HashMapSessionStore, JsonFileCredentialStore, JsonFileTodoStore,
    PasswordPolicy, PostgresCredentialStore, RedisSessionStore, config::WicketSettings,
};

// ============================================================================
// Service (Main Entry Point)
// ============================================================================

pub use wicket_service::{
    AnyCredentialStore, AnySessionStore, StartupError, WicketApp, build_app,
    helpers::{configure_postgresql, configure_redis, get_redis_client},
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing store traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use axum;
