mod blog_endpoints;
pub mod error;
pub mod middleware_auth;
mod note_endpoints;
mod user_endpoints;

use std::{any::Any, sync::Arc};

use axum::{
    Router, middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tokio::signal;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::{
    infra::http_api::{
        blog_endpoints::{
            create_blog_end, delete_blog_end, get_blog_end, list_blogs_end, update_blog_end,
        },
        error::ApiError,
        note_endpoints::{
            create_note_end, delete_note_end, get_note_end, list_notes_end, update_note_end,
        },
        user_endpoints::{list_users_end, login_end, register_end},
    },
    use_cases::{
        auth_service::AuthConfig, blog_database::BlogDatabase, note_database::NoteDatabase,
        ownership::OwnershipPolicy, user_database::UserDatabase,
    },
};

/// Handles to the store and the auth settings, built once in `main`.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserDatabase>,
    pub blogs: Arc<dyn BlogDatabase>,
    pub notes: Arc<dyn NoteDatabase>,
    pub auth: Arc<AuthConfig>,
    pub ownership: OwnershipPolicy,
}

impl AppState {
    pub fn new<D>(db: Arc<D>, auth: AuthConfig, ownership: OwnershipPolicy) -> Self
    where
        D: UserDatabase + BlogDatabase + NoteDatabase + 'static,
    {
        AppState {
            users: db.clone(),
            blogs: db.clone(),
            notes: db,
            auth: Arc::new(auth),
            ownership,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/login", post(login_end))
        .route("/api/users", get(list_users_end).post(register_end))
        .route("/api/blogs", get(list_blogs_end).post(create_blog_end))
        .route(
            "/api/blogs/{id}",
            get(get_blog_end).put(update_blog_end).delete(delete_blog_end),
        )
        .route("/api/notes", get(list_notes_end).post(create_note_end))
        .route(
            "/api/notes/{id}",
            get(get_note_end).put(update_note_end).delete(delete_note_end),
        )
        .fallback(unknown_endpoint)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middleware_auth::middleware_fn,
        ))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_http_api(addr: String, state: AppState) -> std::io::Result<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

pub async fn health_check() -> &'static str {
    "ok"
}

async fn unknown_endpoint() -> ApiError {
    ApiError::UnknownEndpoint
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = err.downcast_ref::<String>() {
        message.as_str()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        *message
    } else {
        "unknown panic payload"
    };
    error!("handler panicked: {detail}");

    ApiError::Internal.into_response()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("failed to listen for ctrl-c: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!("failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
