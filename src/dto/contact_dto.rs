use serde::Deserialize;
use validator::Validate;

/// Request del formulario público de contacto
#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 5, max = 2000))]
    pub message: String,
}
