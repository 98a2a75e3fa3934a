// src/services/business_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BusinessRepository, ProductRepository, SupplierRepository},
    models::business::{
        BusinessProfile, BusinessProfileDetail, BusinessStats, CreateBusinessPayload,
        ProfileStatusResponse, UpdateBusinessPayload,
    },
    services::{product_service, supplier_service},
};

#[derive(Clone)]
pub struct BusinessService {
    business_repo: BusinessRepository,
    product_repo: ProductRepository,
    supplier_repo: SupplierRepository,
    pool: PgPool,
}

impl BusinessService {
    pub fn new(
        business_repo: BusinessRepository,
        product_repo: ProductRepository,
        supplier_repo: SupplierRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            business_repo,
            product_repo,
            supplier_repo,
            pool,
        }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        payload: &CreateBusinessPayload,
    ) -> Result<BusinessProfile, AppError> {
        // Invariante: no máximo um perfil por usuário. A pré-checagem dá a
        // mensagem amigável; o índice único em user_id decide a corrida.
        if self.business_repo.find_by_user_id(user_id).await?.is_some() {
            return Err(AppError::BusinessProfileAlreadyExists);
        }

        self.business_repo
            .create(
                &self.pool,
                user_id,
                &payload.name,
                &payload.address,
                payload.phone.as_deref(),
                &payload.email,
            )
            .await
    }

    // Perfil com produtos (cada um com fornecedor) e fornecedores (cada um
    // com produtos) aninhados, como o GET /business devolve.
    pub async fn get_detail(&self, user_id: Uuid) -> Result<BusinessProfileDetail, AppError> {
        let profile = self
            .business_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or(AppError::BusinessProfileNotFound)?;

        let products = self.product_repo.get_all(profile.id).await?;
        let suppliers = self.supplier_repo.get_all(profile.id).await?;

        Ok(BusinessProfileDetail {
            products: product_service::attach_suppliers(products.clone(), &suppliers),
            suppliers: supplier_service::attach_products(suppliers, products),
            profile,
        })
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        payload: &UpdateBusinessPayload,
    ) -> Result<BusinessProfile, AppError> {
        if self.business_repo.find_by_user_id(user_id).await?.is_none() {
            return Err(AppError::BusinessProfileNotFound);
        }

        self.business_repo.update(&self.pool, user_id, payload).await
    }

    // O gate de setup do cliente: nunca falha, sempre responde 200.
    pub async fn status(&self, user_id: Uuid) -> Result<ProfileStatusResponse, AppError> {
        let maybe_profile = self.business_repo.find_by_user_id(user_id).await?;

        match maybe_profile {
            Some(profile) => {
                let total_products = self.product_repo.count(profile.id).await?;
                let total_suppliers = self.supplier_repo.count(profile.id).await?;
                Ok(ProfileStatusResponse {
                    is_setup: true,
                    profile: Some(profile),
                    stats: Some(BusinessStats {
                        total_products,
                        total_suppliers,
                    }),
                })
            }
            None => Ok(ProfileStatusResponse {
                is_setup: false,
                profile: None,
                stats: None,
            }),
        }
    }
}
