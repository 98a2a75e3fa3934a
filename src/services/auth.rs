// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BusinessRepository, UserRepository},
    models::auth::{Claims, CurrentUser},
};

// Tokens valem 24h a partir da emissão; não há renovação deslizante.
const TOKEN_VALIDITY_HOURS: i64 = 24;

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    business_repo: BusinessRepository,
    jwt_secret: String,
    pool: PgPool,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        business_repo: BusinessRepository,
        jwt_secret: String,
        pool: PgPool,
    ) -> Self {
        Self {
            user_repo,
            business_repo,
            jwt_secret,
            pool,
        }
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(CurrentUser, String), AppError> {
        // Pré-checagem para a mensagem amigável; a constraint única no banco
        // cobre a corrida entre dois registros simultâneos.
        if self.user_repo.find_by_email(email).await?.is_some() {
            return Err(AppError::EmailAlreadyExists);
        }

        // Hashing em thread separada para não bloquear o runtime
        let password_clone = password.to_owned();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let new_user = self
            .user_repo
            .create(&self.pool, email, &hashed_password)
            .await?;

        let token = self.create_token(new_user.id)?;
        let current = CurrentUser {
            user: new_user,
            business_profile: None, // recém-registrado: setup ainda pendente
        };
        Ok((current, token))
    }

    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(CurrentUser, String), AppError> {
        // E-mail desconhecido e senha errada produzem o MESMO erro,
        // para não permitir enumeração de usuários.
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em uma thread separada
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let business_profile = self.business_repo.find_by_user_id(user.id).await?;
        let token = self.create_token(user.id)?;
        Ok((
            CurrentUser {
                user,
                business_profile,
            },
            token,
        ))
    }

    // Resolve o token para o usuário atual, com o perfil de negócio já
    // carregado (pode ser None se o setup não foi feito).
    pub async fn validate_token(&self, token: &str) -> Result<CurrentUser, AppError> {
        let claims = self.decode_token(token)?;

        let user = self
            .user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::UserNoLongerExists)?;

        let business_profile = self.business_repo.find_by_user_id(user.id).await?;
        Ok(CurrentUser {
            user,
            business_profile,
        })
    }

    pub async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::UserNoLongerExists)?;

        let current_clone = current_password.to_owned();
        let hash_clone = user.password_hash.clone();
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&current_clone, &hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::CurrentPasswordIncorrect);
        }

        let new_clone = new_password.to_owned();
        let new_hash =
            tokio::task::spawn_blocking(move || hash(&new_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        self.user_repo
            .update_password(&self.pool, user_id, &new_hash)
            .await
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::hours(TOKEN_VALIDITY_HOURS);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }

    // Qualquer falha (assinatura, expiração, formato) vira o mesmo 401.
    fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    // Pool "preguiçosa": dá a estrutura dos repositórios sem conectar de
    // fato. Precisa de um runtime Tokio ativo (a pool agenda tarefas de
    // manutenção ao ser criada), por isso os testes abaixo são #[tokio::test].
    fn test_service(secret: &str) -> AuthService {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://postgres@localhost/unused")
            .expect("pool lazy");
        AuthService::new(
            UserRepository::new(pool.clone()),
            BusinessRepository::new(pool.clone()),
            secret.to_string(),
            pool,
        )
    }

    #[tokio::test]
    async fn token_round_trip_preserves_the_user_id() {
        let service = test_service("segredo-de-teste");
        let user_id = Uuid::new_v4();

        let token = service.create_token(user_id).unwrap();
        let claims = service.decode_token(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert!(claims.exp > claims.iat);
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let service = test_service("segredo-de-teste");
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4(),
            // Expirado há uma hora, bem além da margem de leniência do decoder
            exp: (now - chrono::Duration::hours(1)).timestamp() as usize,
            iat: (now - chrono::Duration::hours(25)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("segredo-de-teste".as_ref()),
        )
        .unwrap();

        assert!(matches!(
            service.decode_token(&token),
            Err(AppError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn token_signed_with_another_secret_is_rejected() {
        let service = test_service("segredo-de-teste");
        let other = test_service("outro-segredo");

        let token = other.create_token(Uuid::new_v4()).unwrap();
        assert!(matches!(
            service.decode_token(&token),
            Err(AppError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn malformed_token_is_rejected() {
        let service = test_service("segredo-de-teste");
        assert!(matches!(
            service.decode_token("isto-nao-e-um-jwt"),
            Err(AppError::InvalidToken)
        ));
    }
}
