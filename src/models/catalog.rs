// src/models/catalog.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    #[schema(example = "Bebidas")]
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[schema(example = 42)]
    pub id: i32,
    #[schema(example = "Café torrado 500g")]
    pub title: String,
    pub description: Option<String>,
    #[schema(example = "19.90")]
    pub base_price: Decimal,
    // Preço "de" promocional do próprio produto (exibição riscada).
    pub original_price: Option<Decimal>,
    pub discount_percent: Option<i32>,
    #[schema(example = "Mercearia")]
    pub category: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Listas de preço ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceList {
    #[schema(example = "vip")]
    pub id: String,
    #[schema(example = "Clientes VIP")]
    pub name: String,
    pub created_at: DateTime<Utc>,
}

// Uma linha do mapa esparso: produto sem linha usa o preço base.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceListItem {
    pub price_list_id: String,
    pub product_id: i32,
    #[schema(example = "17.90")]
    pub price: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceListDetail {
    #[serde(flatten)]
    pub list: PriceList,
    pub items: Vec<PriceListItem>,
}

// --- Projeções de leitura (nunca persistidas) ---

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EffectivePrice {
    pub price: Decimal,
    pub original_price: Option<Decimal>,
    pub is_special_price: bool,
}

/// Produto como a vitrine enxerga: já com o preço efetivo do cliente ativo.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreProduct {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub original_price: Option<Decimal>,
    pub discount_percent: Option<i32>,
    pub category: String,
    pub image_url: Option<String>,
    pub is_special_price: bool,
}
