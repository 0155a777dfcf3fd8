//! Middleware de autenticación JWT
//!
//! Este módulo maneja la autenticación JWT, extracción de tokens
//! y verificación de usuarios autenticados.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
    Extension,
};
use uuid::Uuid;

use crate::models::user::{KycStatus, UserRole};
use crate::repositories::user_repository::UserRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{extract_token_from_header, verify_token, JwtConfig};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub role: UserRole,
    pub kyc_status: KycStatus,
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let token = extract_token_from_header(auth_header)
        .map_err(|_| AppError::Unauthorized("Token de autorización inválido".to_string()))?;

    let claims = verify_token(token, &JwtConfig::from(&state.config))
        .map_err(|_| AppError::Unauthorized("Token inválido o expirado".to_string()))?;

    let authenticated_user = resolve_user(&state, &claims.sub).await?;

    request.extensions_mut().insert(authenticated_user);

    Ok(next.run(request).await)
}

/// Middleware opcional de autenticación (para rutas que pueden ser
/// públicas o privadas). Si hay token válido inyecta el usuario; si no,
/// la request sigue sin identidad.
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(auth_header) = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
    {
        if let Ok(token) = extract_token_from_header(auth_header) {
            if let Ok(claims) = verify_token(token, &JwtConfig::from(&state.config)) {
                if let Ok(user) = resolve_user(&state, &claims.sub).await {
                    request.extensions_mut().insert(user);
                }
            }
        }
    }

    Ok(next.run(request).await)
}

/// Middleware para verificar permisos de admin
pub async fn admin_only_middleware(
    Extension(user): Extension<AuthenticatedUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if user.role != UserRole::Admin {
        return Err(AppError::Forbidden(
            "Se requieren permisos de administrador".to_string(),
        ));
    }

    Ok(next.run(request).await)
}

/// Verificar que el usuario del token sigue existiendo en la base de datos
async fn resolve_user(state: &AppState, sub: &str) -> Result<AuthenticatedUser, AppError> {
    let user_id = Uuid::parse_str(sub)
        .map_err(|_| AppError::Unauthorized("ID de usuario inválido".to_string()))?;

    let user = UserRepository::new(state.pool.clone())
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;

    let role = UserRole::parse(&user.role)
        .ok_or_else(|| AppError::Internal(format!("Unknown role '{}'", user.role)))?;
    let kyc_status = KycStatus::parse(&user.kyc_status)
        .ok_or_else(|| AppError::Internal(format!("Unknown KYC status '{}'", user.kyc_status)))?;

    Ok(AuthenticatedUser {
        user_id: user.id,
        role,
        kyc_status,
    })
}
