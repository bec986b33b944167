use axum::{Router, middleware, routing::get};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};
use wicket_adapters::{
    config::BoardSettings,
    http::{
        SessionLayer, load_session, require_session,
        routes::{
            AuthFlow, AuthRouteState, GameState, TodoState, create_todo, game, list_todos, login,
            login_form, logout, new_todo_form, profile, register, register_form, success,
            welcome,
        },
    },
};
use wicket_application::SessionGate;
use wicket_core::{CredentialStore, SessionStore, TodoStore, ViewRenderer};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// One of the three web applications, ready to be served.
pub struct WicketApp {
    router: Router,
}

impl WicketApp {
    /// Minesweeper: the game and profile pages sit behind the session gate.
    pub fn minesweeper<C, S, R>(
        credentials: C,
        sessions: SessionLayer<S>,
        renderer: R,
        board: BoardSettings,
        assets_dir: &str,
    ) -> Self
    where
        C: CredentialStore + Clone + 'static,
        S: SessionStore + Clone + 'static,
        R: ViewRenderer + Clone + 'static,
    {
        let state = GameState {
            auth: AuthRouteState::new(credentials, renderer, AuthFlow::minesweeper()),
            board,
        };

        let protected: Router<GameState<C, R>> = Router::new()
            .route("/", get(game::<C, R>))
            .route("/profile", get(profile::<C, R>))
            .route("/logout", get(logout::<C, R>))
            .route_layer(middleware::from_fn_with_state(
                SessionGate::default(),
                require_session,
            ));

        let router = Router::new()
            .route("/login", get(login_form::<C, R>).post(login::<C, R>))
            .route("/register", get(register_form::<C, R>).post(register::<C, R>))
            .merge(protected)
            .with_state(state)
            .layer(middleware::from_fn_with_state(sessions, load_session::<S>));

        Self::with_assets(router, assets_dir)
    }

    /// User system: only the post-login landing page is gated. Logout is
    /// open and idempotent.
    pub fn user_system<C, S, R>(
        credentials: C,
        sessions: SessionLayer<S>,
        renderer: R,
        assets_dir: &str,
    ) -> Self
    where
        C: CredentialStore + Clone + 'static,
        S: SessionStore + Clone + 'static,
        R: ViewRenderer + Clone + 'static,
    {
        let state = AuthRouteState::new(credentials, renderer, AuthFlow::user_system());

        let protected: Router<AuthRouteState<C, R>> = Router::new()
            .route("/success", get(success::<C, R>))
            .route_layer(middleware::from_fn_with_state(
                SessionGate::default(),
                require_session,
            ));

        let router = Router::new()
            .route("/", get(welcome::<C, R>))
            .route("/login", get(login_form::<C, R>).post(login::<C, R>))
            .route("/register", get(register_form::<C, R>).post(register::<C, R>))
            .route("/logout", get(logout::<C, R>))
            .merge(protected)
            .with_state(state)
            .layer(middleware::from_fn_with_state(sessions, load_session::<S>));

        Self::with_assets(router, assets_dir)
    }

    /// To-do list: no authentication and no sessions.
    pub fn todo<T, R>(todos: T, renderer: R, assets_dir: &str) -> Self
    where
        T: TodoStore + Clone + 'static,
        R: ViewRenderer + Clone + 'static,
    {
        let router = Router::new()
            .route("/", get(list_todos::<T, R>))
            .route("/new", get(new_todo_form::<T, R>).post(create_todo::<T, R>))
            .with_state(TodoState::new(todos, renderer));

        Self::with_assets(router, assets_dir)
    }

    fn with_assets(router: Router, assets_dir: &str) -> Self {
        Self {
            router: router.nest_service("/static", ServeDir::new(assets_dir)),
        }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// The application as a router that can be nested into another one.
    pub fn into_router(self) -> Router {
        self.with_trace_layer().router
    }

    pub async fn run_standalone(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let router = self.into_router();

        tracing::info!("Listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
