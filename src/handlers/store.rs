// src/handlers/store.rs
//
// Superfície pública da vitrine: listagem com preço efetivo do cliente
// ativo e checkout.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::storefront::ActiveCustomer,
    models::{
        catalog::{Category, StoreProduct},
        orders::OrderDetail,
    },
    services::order_service::CheckoutLine,
};

// GET /api/store/products
#[utoipa::path(
    get,
    path = "/api/store/products",
    tag = "Store",
    params(
        ("token" = Option<String>, Query, description = "Token do cliente ativo")
    ),
    responses(
        (status = 200, description = "Produtos com preço efetivo do cliente ativo", body = [StoreProduct])
    )
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    ActiveCustomer(customer): ActiveCustomer,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state
        .catalog_service
        .list_products(&app_state.db_pool)
        .await?;

    let view = app_state
        .pricing_service
        .storefront_view(&app_state.db_pool, products, customer.as_ref())
        .await?;

    Ok(Json(view))
}

// GET /api/store/categories
#[utoipa::path(
    get,
    path = "/api/store/categories",
    tag = "Store",
    responses(
        (status = 200, description = "Categorias da vitrine", body = [Category])
    )
)]
pub async fn list_categories(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let categories = app_state
        .catalog_service
        .list_categories(&app_state.db_pool)
        .await?;

    Ok(Json(categories))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Maria Souza")]
    pub customer_name: String,

    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,

    #[validate(range(min = 0, max = 100, message = "invalid_discount"))]
    #[serde(default)]
    pub discount_percent: i32,

    #[validate(nested)]
    pub items: Vec<CheckoutLine>,
}

// POST /api/store/checkout
#[utoipa::path(
    post,
    path = "/api/store/checkout",
    tag = "Store",
    request_body = CheckoutPayload,
    params(
        ("token" = Option<String>, Query, description = "Token do cliente ativo")
    ),
    responses(
        (status = 201, description = "Pedido criado com snapshot de preços", body = OrderDetail),
        (status = 400, description = "Pedido sem itens ou dados inválidos")
    )
)]
pub async fn checkout(
    State(app_state): State<AppState>,
    ActiveCustomer(customer): ActiveCustomer,
    Json(payload): Json<CheckoutPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let order = app_state
        .order_service
        .create_order(
            &app_state.db_pool,
            customer.as_ref(),
            &payload.customer_name,
            payload.customer_phone.as_deref(),
            payload.customer_address.as_deref(),
            payload.discount_percent,
            &payload.items,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

// GET /api/store/orders/{order_id}
#[utoipa::path(
    get,
    path = "/api/store/orders/{order_id}",
    tag = "Store",
    params(
        ("order_id" = String, Path, description = "ID do Pedido (ORD-....)")
    ),
    responses(
        (status = 200, description = "Pedido com itens", body = OrderDetail),
        (status = 404, description = "Pedido não encontrado")
    )
)]
pub async fn get_order(
    State(app_state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state
        .order_service
        .get_order(&app_state.db_pool, &order_id)
        .await?;

    Ok(Json(order))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tampered_checkout_discount_fails_validation() {
        // Um cliente adulterado pode mandar qualquer JSON; a validação do
        // payload é quem segura desconto fora de 0..=100.
        let payload: CheckoutPayload = serde_json::from_str(
            r#"{
                "customerName": "Maria Souza",
                "items": [{"productId": 1, "quantity": 1, "discountPercent": 250}]
            }"#,
        )
        .unwrap();
        assert!(payload.validate().is_err());

        let payload: CheckoutPayload = serde_json::from_str(
            r#"{
                "customerName": "Maria Souza",
                "discountPercent": 150,
                "items": [{"productId": 1, "quantity": 1}]
            }"#,
        )
        .unwrap();
        assert!(payload.validate().is_err());

        let payload: CheckoutPayload = serde_json::from_str(
            r#"{
                "customerName": "Maria Souza",
                "discountPercent": 10,
                "items": [{"productId": 1, "quantity": 1, "discountPercent": 5}]
            }"#,
        )
        .unwrap();
        assert!(payload.validate().is_ok());
    }
}
