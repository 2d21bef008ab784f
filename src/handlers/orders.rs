// src/handlers/orders.rs
//
// Back-office de pedidos: leitura, edição (com substituição integral de
// itens), máquina de status e (re)emissão do link de separação.

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::orders::{Order, OrderDetail, OrderStatus},
    services::order_service::{OrderLineInput, PickingLink},
};

// GET /api/admin/orders
#[utoipa::path(
    get,
    path = "/api/admin/orders",
    tag = "Orders",
    responses(
        (status = 200, description = "Pedidos, mais recentes primeiro", body = [Order])
    )
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let orders = app_state
        .order_service
        .list_orders(&app_state.db_pool)
        .await?;

    Ok(Json(orders))
}

// GET /api/admin/orders/{order_id}
#[utoipa::path(
    get,
    path = "/api/admin/orders/{order_id}",
    tag = "Orders",
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

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderPayload {
    // Campo ausente = mantém o valor atual; para limpar telefone ou
    // endereço, envie string vazia.
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub discount_percent: Option<i32>,

    #[schema(example = "processing")]
    pub status: Option<OrderStatus>,

    // Presente = substituição integral dos itens (delete-all + insert).
    #[validate(nested)]
    pub items: Option<Vec<OrderLineInput>>,
}

// PATCH /api/admin/orders/{order_id}
#[utoipa::path(
    patch,
    path = "/api/admin/orders/{order_id}",
    tag = "Orders",
    request_body = UpdateOrderPayload,
    params(
        ("order_id" = String, Path, description = "ID do Pedido")
    ),
    responses(
        (status = 200, description = "Pedido atualizado, com itens", body = OrderDetail),
        (status = 400, description = "Transição de status inválida"),
        (status = 404, description = "Pedido não encontrado")
    )
)]
pub async fn update_order(
    State(app_state): State<AppState>,
    Path(order_id): Path<String>,
    Json(payload): Json<UpdateOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let order = app_state
        .order_service
        .update_order(
            &app_state.db_pool,
            &order_id,
            payload.customer_name.as_deref(),
            payload.customer_phone.as_deref(),
            payload.customer_address.as_deref(),
            payload.discount_percent,
            payload.status,
            payload.items.as_deref(),
        )
        .await?;

    Ok(Json(order))
}

// POST /api/admin/orders/{order_id}/picking-link
#[utoipa::path(
    post,
    path = "/api/admin/orders/{order_id}/picking-link",
    tag = "Orders",
    params(
        ("order_id" = String, Path, description = "ID do Pedido")
    ),
    responses(
        (status = 200, description = "Link de separação (token idempotente) e notificação redisparada", body = PickingLink),
        (status = 404, description = "Pedido não encontrado")
    )
)]
pub async fn issue_picking_link(
    State(app_state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let link = app_state
        .order_service
        .issue_picking_link(&app_state.db_pool, &order_id)
        .await?;

    Ok(Json(link))
}
