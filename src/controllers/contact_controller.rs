use sqlx::PgPool;
use validator::Validate;

use crate::dto::auth_dto::ApiResponse;
use crate::dto::contact_dto::ContactRequest;
use crate::models::contact::ContactMessage;
use crate::repositories::contact_repository::ContactRepository;
use crate::utils::errors::AppError;

pub struct ContactController {
    repository: ContactRepository,
}

impl ContactController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ContactRepository::new(pool),
        }
    }

    pub async fn submit(
        &self,
        request: ContactRequest,
    ) -> Result<ApiResponse<ContactMessage>, AppError> {
        request.validate()?;

        let message = self
            .repository
            .create(request.name, request.email, request.message)
            .await?;

        Ok(ApiResponse::success_with_message(
            message,
            "Mensaje recibido".to_string(),
        ))
    }
}
