// src/models/crm.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,

    #[schema(example = "Maria Souza")]
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,

    // Zero ou uma lista de preço por cliente. Sem FK: a lista pode ter sido
    // apagada e a referência pendurada resolve para o preço base.
    #[schema(example = "vip")]
    pub price_list_id: Option<String>,

    // Credencial opaca da vitrine: o link com ?token=... identifica o
    // cliente ativo (simulação de sessão via URL).
    pub token: String,

    pub created_at: DateTime<Utc>,
}
