use super::types::{ErrorResponse, HealthResponse, QueryRequest, QueryResponse};
use crate::{Error, agent::Agent};
use axum::{extract::State, http::StatusCode, response::Json};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<Agent>,
}

impl AppState {
    pub fn new(agent: Agent) -> Self {
        Self {
            agent: Arc::new(agent),
        }
    }
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

pub async fn query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, HandlerError> {
    let request_id = Uuid::new_v4();
    info!("[{}] Received query: {}", request_id, request.query);

    if let Err(e) = request.validate() {
        warn!("[{}] Rejected query: {}", request_id, e);
        return Err(error_response(&e));
    }

    match state.agent.answer(&request.query).await {
        Ok(answer) => {
            info!("[{}] Answered query", request_id);
            Ok(Json(QueryResponse {
                query: request.query,
                answer,
            }))
        }
        Err(e) => {
            error!("[{}] Failed to answer query: {}", request_id, e);
            Err(error_response(&e))
        }
    }
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

fn error_response(e: &Error) -> HandlerError {
    let status = if e.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}
