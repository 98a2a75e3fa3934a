// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{common::error::AppError, config::AppState, models::auth::CurrentUser};

// O middleware em si: valida o Bearer token e injeta o usuário atual
// (com o perfil de negócio já carregado) nos "extensions" da requisição.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let headers = request.headers();
    let auth_header = headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok());

    if let Some(auth_header) = auth_header {
        if let Some(token) = auth_header.strip_prefix("Bearer ") {
            let current_user = app_state.auth_service.validate_token(token).await?;

            request.extensions_mut().insert(current_user);
            return Ok(next.run(request).await);
        }
    }

    Err(AppError::InvalidToken)
}

// Extrator para obter o usuário autenticado diretamente nos handlers
pub struct AuthenticatedUser(pub CurrentUser);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::InvalidToken)
    }
}

// ---
// BusinessContext: o escopo de tenant resolvido num lugar só
// ---
// Toda rota de negócio (produtos, fornecedores, relatórios) recebe o
// business_id por este extrator; os repositórios filtram por ele.
#[derive(Debug, Clone, Copy)]
pub struct BusinessContext(pub Uuid);

impl<S> FromRequestParts<S> for BusinessContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let current_user = parts
            .extensions
            .get::<CurrentUser>()
            .ok_or(AppError::InvalidToken)?;

        // Usuário autenticado mas sem setup completo: 400, não 401
        current_user
            .business_profile
            .as_ref()
            .map(|profile| BusinessContext(profile.id))
            .ok_or(AppError::BusinessProfileRequired)
    }
}
