use axum::{Router, http::Uri, routing::get};

use std::sync::Arc;

use crate::{ServerError, expenses, statistics};
use engine::{Engine, EngineError};

const BASE: &str = "/api/expenses";

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Builds the HTTP router over `engine`.
pub fn router(engine: Engine) -> Router {
    let state = ServerState {
        engine: Arc::new(engine),
    };

    Router::new()
        .route(BASE, get(expenses::list).post(expenses::create))
        .route(&format!("{BASE}/"), get(expenses::list).post(expenses::create))
        .route(
            &format!("{BASE}/{{id}}"),
            get(expenses::get)
                .put(expenses::update)
                .delete(expenses::delete),
        )
        .route(&format!("{BASE}/{{id}}/detail"), get(expenses::detail))
        .route(&format!("{BASE}/type/{{category}}"), get(statistics::by_category))
        .route(
            &format!("{BASE}/totalcategory/{{category}}"),
            get(statistics::by_category),
        )
        .route(&format!("{BASE}/total/date"), get(statistics::by_date))
        .route(&format!("{BASE}/totaldate/date"), get(statistics::by_date))
        .fallback(unknown_route)
        .with_state(state)
}

async fn unknown_route(uri: Uri) -> ServerError {
    ServerError::Engine(EngineError::NotFound(format!("route {}", uri.path())))
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(engine)).await
}
