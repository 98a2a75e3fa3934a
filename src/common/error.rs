use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Cada variante de domínio conhece o status e a mensagem que o cliente vê.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já registrado")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário do token não existe mais")]
    UserNoLongerExists,

    #[error("Senha atual incorreta")]
    CurrentPasswordIncorrect,

    // 404: o GET/PUT /business não encontrou o perfil do usuário
    #[error("Perfil de negócio não encontrado")]
    BusinessProfileNotFound,

    // 400: rota com escopo de negócio chamada antes de completar o setup
    // (mesma mensagem do original, status diferente do 404 acima)
    #[error("Perfil de negócio ainda não configurado")]
    BusinessProfileRequired,

    #[error("Perfil de negócio já existe para este usuário")]
    BusinessProfileAlreadyExists,

    #[error("Produto não encontrado")]
    ProductNotFound,

    #[error("Fornecedor não encontrado")]
    SupplierNotFound,

    // Fornecedor inexistente OU de outro tenant: resposta idêntica nos dois
    // casos para não vazar dados entre negócios.
    #[error("Fornecedor não pertence ao negócio")]
    SupplierNotOwned,

    #[error("Fornecedor ainda possui produtos")]
    SupplierHasProducts,

    #[error("Violação de unicidade: {0}")]
    UniqueConstraintViolation(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

// Fallback genérico: violação de unicidade que nenhum repositório remapeou
// para um erro de domínio específico vira 400, não 500.
impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                return AppError::UniqueConstraintViolation(constraint);
            }
        }
        AppError::DatabaseError(e)
    }
}

impl AppError {
    // Status + mensagem pública de cada variante "simples".
    // As mensagens fazem parte do contrato da API (o cliente as exibe).
    pub fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::EmailAlreadyExists => (StatusCode::BAD_REQUEST, "Email already registered."),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials."),
            AppError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "Not authorized to access this route")
            }
            AppError::UserNoLongerExists => (StatusCode::UNAUTHORIZED, "User no longer exists"),
            AppError::CurrentPasswordIncorrect => {
                (StatusCode::UNAUTHORIZED, "Current password is incorrect.")
            }
            AppError::BusinessProfileNotFound => {
                (StatusCode::NOT_FOUND, "Business profile not found")
            }
            AppError::BusinessProfileRequired => {
                (StatusCode::BAD_REQUEST, "Business profile not found")
            }
            AppError::BusinessProfileAlreadyExists => (
                StatusCode::BAD_REQUEST,
                "Business profile already exists for this user",
            ),
            AppError::ProductNotFound => (StatusCode::NOT_FOUND, "Product not found"),
            AppError::SupplierNotFound => (StatusCode::NOT_FOUND, "Supplier not found"),
            AppError::SupplierNotOwned => (
                StatusCode::NOT_FOUND,
                "Supplier not found or doesn't belong to your business",
            ),
            AppError::SupplierHasProducts => (
                StatusCode::BAD_REQUEST,
                "Cannot delete supplier with associated products",
            ),
            AppError::UniqueConstraintViolation(_) => (
                StatusCode::BAD_REQUEST,
                "A record with this value already exists",
            ),
            // Linha sumiu debaixo de nós (ex: delete concorrente)
            AppError::DatabaseError(sqlx::Error::RowNotFound) => {
                (StatusCode::NOT_FOUND, "Record not found")
            }
            // Todo o resto vira 500 genérico; o detalhe fica só no log.
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Validação devolve TODOS os detalhes, não só o primeiro.
        if let AppError::ValidationError(errors) = &self {
            let mut details = std::collections::HashMap::new();
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                details.insert(field.to_string(), messages);
            }
            let body = Json(json!({
                "error": "One or more fields are invalid.",
                "details": details,
            }));
            return (StatusCode::BAD_REQUEST, body).into_response();
        }

        let (status, error_message) = self.status_and_message();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            // O `tracing` loga a mensagem detalhada que o `thiserror` nos deu;
            // o cliente só vê a genérica.
            tracing::error!("Erro interno do servidor: {}", self);
        }

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};

    // Erro de banco sintético, o suficiente para exercitar o From
    #[derive(Debug)]
    struct FakeDbError {
        kind: &'static str,
    }

    impl std::fmt::Display for FakeDbError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "fake database error ({})", self.kind)
        }
    }

    impl std::error::Error for FakeDbError {}

    impl DatabaseError for FakeDbError {
        fn message(&self) -> &str {
            "fake database error"
        }

        fn kind(&self) -> ErrorKind {
            match self.kind {
                "unique" => ErrorKind::UniqueViolation,
                "fk" => ErrorKind::ForeignKeyViolation,
                _ => ErrorKind::CheckViolation,
            }
        }

        fn constraint(&self) -> Option<&str> {
            Some("products_sku_key")
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }
    }

    fn db_error(kind: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(FakeDbError { kind }))
    }

    #[test]
    fn credential_failures_share_the_same_message() {
        // Mesmo 401 para e-mail desconhecido e senha errada (anti-enumeração)
        let (status, message) = AppError::InvalidCredentials.status_and_message();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(message, "Invalid credentials.");
    }

    #[test]
    fn supplier_delete_conflict_maps_to_bad_request() {
        let (status, message) = AppError::SupplierHasProducts.status_and_message();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "Cannot delete supplier with associated products");
    }

    #[test]
    fn cross_tenant_supplier_is_a_not_found_not_a_leak() {
        let (status, message) = AppError::SupplierNotOwned.status_and_message();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            message,
            "Supplier not found or doesn't belong to your business"
        );
    }

    #[test]
    fn storage_errors_collapse_to_generic_500() {
        let err = AppError::DatabaseError(sqlx::Error::PoolTimedOut);
        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Internal server error");
    }

    #[test]
    fn row_not_found_is_remapped_to_404() {
        let err = AppError::DatabaseError(sqlx::Error::RowNotFound);
        let (status, _) = err.status_and_message();
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn unmapped_unique_violation_falls_back_to_400() {
        let err: AppError = db_error("unique").into();

        assert!(matches!(
            &err,
            AppError::UniqueConstraintViolation(c) if c == "products_sku_key"
        ));
        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "A record with this value already exists");
    }

    #[test]
    fn other_database_errors_stay_generic() {
        let err: AppError = db_error("check").into();
        assert!(matches!(&err, AppError::DatabaseError(_)));
        let (status, _) = err.status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_response_lists_every_field() {
        let mut errors = validator::ValidationErrors::new();
        let mut e1 = validator::ValidationError::new("length");
        e1.message = Some("Business name must be between 2 and 100 characters".into());
        errors.add("name", e1);
        let mut e2 = validator::ValidationError::new("email");
        e2.message = Some("Invalid email format".into());
        errors.add("email", e2);

        let response = AppError::ValidationError(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
