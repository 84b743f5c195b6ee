mod error;

use crate::agent::{Agent, AgentReply};
use crate::entity::Transaction;
use crate::store::TransactionStore;
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};
pub use error::{ApiError, ApiResult};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

const ORDER_COLUMN: &str = "date";

#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<dyn Agent>,
    pub store: Arc<dyn TransactionStore>,
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub message: String,
}

pub fn router(state: AppState) -> Router {
    let handler = Router::new()
        .route("/message", post(message))
        .route("/transactions", get(transactions));

    Router::new()
        .nest("/handler", handler)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn message(
    State(state): State<AppState>,
    payload: Result<Json<MessageRequest>, JsonRejection>,
) -> ApiResult<Json<AgentReply>> {
    let Json(request) = payload?;
    if request.message.is_empty() {
        return Err(ApiError::Validation(
            "Field `message` must not be empty".to_string(),
        ));
    }

    let reply = state
        .agent
        .respond(&request.message)
        .await
        .map_err(ApiError::Agent)?;
    Ok(Json(reply))
}

async fn transactions(State(state): State<AppState>) -> ApiResult<Json<Vec<Transaction>>> {
    let rows = state.store.list(ORDER_COLUMN, true).await?;
    Ok(Json(rows))
}
