use serde::Deserialize;
use validator::Validate;

/// Request para enviar documentos KYC
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitKycRequest {
    #[validate(length(min = 2, max = 50))]
    pub document_type: String,

    #[validate(length(min = 4, max = 50))]
    pub document_number: String,
}

/// Request de revisión KYC por un admin
#[derive(Debug, Deserialize)]
pub struct ReviewKycRequest {
    pub approve: bool,
}
