use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::auth_dto::{ApiResponse, KycStatusResponse};
use crate::dto::kyc_dto::{ReviewKycRequest, SubmitKycRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::KycStatus;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct KycController {
    repository: UserRepository,
}

impl KycController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool),
        }
    }

    /// El usuario envía sus documentos de identidad.
    /// Solo desde pending o rejected; el estado pasa a submitted.
    pub async fn submit(
        &self,
        user: &AuthenticatedUser,
        request: SubmitKycRequest,
    ) -> Result<ApiResponse<KycStatusResponse>, AppError> {
        request.validate()?;

        if !user.kyc_status.can_submit() {
            return Err(AppError::Conflict(
                "KYC documents already submitted or verified".to_string(),
            ));
        }

        let updated = self
            .repository
            .submit_kyc(user.user_id, request.document_type, request.document_number)
            .await?;

        let status = KycStatus::parse(&updated.kyc_status).unwrap_or(KycStatus::Submitted);

        Ok(ApiResponse::success_with_message(
            KycStatusResponse::new(updated.id, status),
            "Documentos KYC enviados para revisión".to_string(),
        ))
    }

    /// Un admin aprueba o rechaza una solicitud enviada
    pub async fn review(
        &self,
        target_user_id: Uuid,
        request: ReviewKycRequest,
    ) -> Result<ApiResponse<KycStatusResponse>, AppError> {
        let target = self
            .repository
            .find_by_id(target_user_id)
            .await?
            .ok_or_else(|| not_found_error("User", &target_user_id.to_string()))?;

        let current = KycStatus::parse(&target.kyc_status).ok_or_else(|| {
            AppError::Internal(format!("Unknown KYC status '{}'", target.kyc_status))
        })?;

        if !current.can_review() {
            return Err(AppError::Conflict(
                "KYC review requires a submitted application".to_string(),
            ));
        }

        let next = if request.approve {
            KycStatus::Verified
        } else {
            KycStatus::Rejected
        };

        let updated = self.repository.set_kyc_status(target.id, next).await?;
        let status = KycStatus::parse(&updated.kyc_status).unwrap_or(next);

        Ok(ApiResponse::success_with_message(
            KycStatusResponse::new(updated.id, status),
            "Revisión KYC registrada".to_string(),
        ))
    }
}
