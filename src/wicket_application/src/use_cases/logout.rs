use wicket_core::{AuthState, Session};

/// Logout use case - clears every fact held by the session
#[derive(Debug, Default, Clone, Copy)]
pub struct LogoutUseCase;

impl LogoutUseCase {
    pub fn new() -> Self {
        Self
    }

    /// Returns the state the session was in before it was cleared. Clearing an
    /// already anonymous session is a no-op.
    #[tracing::instrument(name = "LogoutUseCase::execute", skip(self, session))]
    pub fn execute(&self, session: &mut Session) -> AuthState {
        let previous = session.state();
        session.clear();
        previous
    }
}
