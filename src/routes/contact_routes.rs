use axum::{extract::State, http::StatusCode, routing::post, Json, Router};

use crate::controllers::contact_controller::ContactController;
use crate::dto::auth_dto::ApiResponse;
use crate::dto::contact_dto::ContactRequest;
use crate::models::contact::ContactMessage;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_contact_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(submit_contact))
        .with_state(state)
}

async fn submit_contact(
    State(state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ContactMessage>>), AppError> {
    let controller = ContactController::new(state.pool.clone());
    let response = controller.submit(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
