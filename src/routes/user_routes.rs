use axum::{
    extract::{Path, State},
    middleware,
    routing::post,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::kyc_controller::KycController;
use crate::dto::auth_dto::{ApiResponse, KycStatusResponse};
use crate::dto::kyc_dto::{ReviewKycRequest, SubmitKycRequest};
use crate::middleware::auth::{admin_only_middleware, auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_user_router(state: AppState) -> Router {
    Router::new()
        .route("/:id/kyc/review", post(review_kyc))
        .route_layer(middleware::from_fn(admin_only_middleware))
        .route("/kyc", post(submit_kyc))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}

async fn submit_kyc(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<SubmitKycRequest>,
) -> Result<Json<ApiResponse<KycStatusResponse>>, AppError> {
    let controller = KycController::new(state.pool.clone());
    let response = controller.submit(&user, request).await?;
    Ok(Json(response))
}

async fn review_kyc(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ReviewKycRequest>,
) -> Result<Json<ApiResponse<KycStatusResponse>>, AppError> {
    let controller = KycController::new(state.pool.clone());
    let response = controller.review(id, request).await?;
    Ok(Json(response))
}
