//! Environment-aware error bodies.
//!
//! Error responses leave the handlers with the client message only. Outside
//! production this layer replaces the message with the internal details the
//! error carried in its [`ErrorDetail`] extension.

use crate::error::{ErrorDetail, ErrorResponse};
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

pub async fn error_detail_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let Some(ErrorDetail(detail)) = response.extensions_mut().remove::<ErrorDetail>() else {
        return response;
    };
    if state.config.is_production() {
        return response;
    }

    let status = response.status();
    (status, Json(ErrorResponse::new(status, detail))).into_response()
}
