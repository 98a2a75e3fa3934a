// src/services/activity_logger.rs

use uuid::Uuid;

use crate::{
    db::ActivityRepository,
    models::activity::{ActivityAction, ActivityEntity},
};

// Escrita "best-effort" da trilha de auditoria: uma falha aqui é logada e
// engolida, nunca derruba nem desfaz a operação de CRUD que a disparou.
// Por isso o insert roda fora de qualquer transação do chamador.
#[derive(Clone)]
pub struct ActivityLogger {
    activity_repo: ActivityRepository,
}

impl ActivityLogger {
    pub fn new(activity_repo: ActivityRepository) -> Self {
        Self { activity_repo }
    }

    pub async fn log(
        &self,
        business_id: Uuid,
        action: ActivityAction,
        entity_type: ActivityEntity,
        entity_id: Uuid,
        details: &str,
    ) {
        if let Err(e) = self
            .activity_repo
            .insert(business_id, action, entity_type, entity_id, details)
            .await
        {
            tracing::error!("Falha ao registrar atividade ('{}'): {}", details, e);
        }
    }
}
