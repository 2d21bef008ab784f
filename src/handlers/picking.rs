// src/handlers/picking.rs
//
// Superfície pública do separador. O token é a autorização inteira:
// uma capability, não uma identidade de usuário.

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::orders::{OrderDetail, OrderItem, PickingStatus},
    services::order_service::PickedLineInput,
};

// GET /api/picker/{token}
#[utoipa::path(
    get,
    path = "/api/picker/{token}",
    tag = "Picking",
    params(
        ("token" = String, Path, description = "Token de picking do pedido")
    ),
    responses(
        (status = 200, description = "Pedido com itens; quantidades separadas já defaultadas para o pedido", body = OrderDetail),
        (status = 404, description = "Token desconhecido")
    )
)]
pub async fn get_order(
    State(app_state): State<AppState>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state
        .order_service
        .get_order_by_picking_token(&app_state.db_pool, &token)
        .await?;

    Ok(Json(order))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PickingItemPayload {
    pub status: Option<PickingStatus>,
    #[schema(example = 2)]
    pub picked_quantity: Option<i32>,
}

// PATCH /api/picker/{token}/items/{item_id}
#[utoipa::path(
    patch,
    path = "/api/picker/{token}/items/{item_id}",
    tag = "Picking",
    request_body = PickingItemPayload,
    params(
        ("token" = String, Path, description = "Token de picking do pedido"),
        ("item_id" = Uuid, Path, description = "ID do Item")
    ),
    responses(
        (status = 200, description = "Item com as auto-transições aplicadas", body = OrderItem),
        (status = 404, description = "Token ou item desconhecido")
    )
)]
pub async fn update_item(
    State(app_state): State<AppState>,
    Path((token, item_id)): Path<(String, Uuid)>,
    Json(payload): Json<PickingItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    let item = app_state
        .order_service
        .update_item_picking(
            &app_state.db_pool,
            &token,
            item_id,
            payload.status,
            payload.picked_quantity,
        )
        .await?;

    Ok(Json(item))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompletePickingPayload {
    pub items: Vec<PickedLineInput>,
}

// POST /api/picker/{token}/complete
#[utoipa::path(
    post,
    path = "/api/picker/{token}/complete",
    tag = "Picking",
    request_body = CompletePickingPayload,
    params(
        ("token" = String, Path, description = "Token de picking do pedido")
    ),
    responses(
        (status = 200, description = "Pedido fechado: totais recomputados, status ready_for_shipping", body = OrderDetail),
        (status = 404, description = "Token desconhecido; nada foi gravado")
    )
)]
pub async fn complete(
    State(app_state): State<AppState>,
    Path(token): Path<String>,
    Json(payload): Json<CompletePickingPayload>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state
        .order_service
        .complete_picking(&app_state.db_pool, &token, &payload.items)
        .await?;

    Ok(Json(order))
}
