// src/handlers/price_lists.rs
//
// Listas de preço: a tabela esparsa de overrides por cliente.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::catalog::{PriceList, PriceListDetail, PriceListItem},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePriceListPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "vip")]
    pub id: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Clientes VIP")]
    pub name: String,
}

// POST /api/admin/price-lists
#[utoipa::path(
    post,
    path = "/api/admin/price-lists",
    tag = "PriceLists",
    request_body = CreatePriceListPayload,
    responses(
        (status = 201, description = "Lista criada", body = PriceList)
    )
)]
pub async fn create_price_list(
    State(app_state): State<AppState>,
    Json(payload): Json<CreatePriceListPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let list = app_state
        .pricing_service
        .create_price_list(&app_state.db_pool, &payload.id, &payload.name)
        .await?;

    Ok((StatusCode::CREATED, Json(list)))
}

// GET /api/admin/price-lists
#[utoipa::path(
    get,
    path = "/api/admin/price-lists",
    tag = "PriceLists",
    responses(
        (status = 200, description = "Todas as listas", body = [PriceList])
    )
)]
pub async fn list_price_lists(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let lists = app_state
        .pricing_service
        .list_price_lists(&app_state.db_pool)
        .await?;

    Ok(Json(lists))
}

// GET /api/admin/price-lists/{list_id}
#[utoipa::path(
    get,
    path = "/api/admin/price-lists/{list_id}",
    tag = "PriceLists",
    params(
        ("list_id" = String, Path, description = "ID da Lista")
    ),
    responses(
        (status = 200, description = "Lista com seus overrides", body = PriceListDetail),
        (status = 404, description = "Lista não encontrada")
    )
)]
pub async fn get_price_list(
    State(app_state): State<AppState>,
    Path(list_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let detail = app_state
        .pricing_service
        .get_price_list_detail(&app_state.db_pool, &list_id)
        .await?;

    Ok(Json(detail))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenamePriceListPayload {
    #[validate(length(min = 1, message = "required"))]
    pub name: String,
}

// PUT /api/admin/price-lists/{list_id}
#[utoipa::path(
    put,
    path = "/api/admin/price-lists/{list_id}",
    tag = "PriceLists",
    request_body = RenamePriceListPayload,
    params(
        ("list_id" = String, Path, description = "ID da Lista")
    ),
    responses(
        (status = 200, description = "Lista renomeada", body = PriceList),
        (status = 404, description = "Lista não encontrada")
    )
)]
pub async fn rename_price_list(
    State(app_state): State<AppState>,
    Path(list_id): Path<String>,
    Json(payload): Json<RenamePriceListPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let list = app_state
        .pricing_service
        .rename_price_list(&app_state.db_pool, &list_id, &payload.name)
        .await?;

    Ok(Json(list))
}

// DELETE /api/admin/price-lists/{list_id}
#[utoipa::path(
    delete,
    path = "/api/admin/price-lists/{list_id}",
    tag = "PriceLists",
    params(
        ("list_id" = String, Path, description = "ID da Lista")
    ),
    responses(
        (status = 204, description = "Lista removida; clientes que a referenciavam voltam ao preço base"),
        (status = 404, description = "Lista não encontrada")
    )
)]
pub async fn delete_price_list(
    State(app_state): State<AppState>,
    Path(list_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .pricing_service
        .delete_price_list(&app_state.db_pool, &list_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetOverridePayload {
    pub product_id: i32,

    // Sem validação contra o preço base: pode ser maior ou menor,
    // o admin é a fronteira de confiança.
    #[schema(example = "17.90")]
    pub price: Decimal,
}

// PUT /api/admin/price-lists/{list_id}/items
#[utoipa::path(
    put,
    path = "/api/admin/price-lists/{list_id}/items",
    tag = "PriceLists",
    request_body = SetOverridePayload,
    params(
        ("list_id" = String, Path, description = "ID da Lista")
    ),
    responses(
        (status = 200, description = "Override gravado (pedidos antigos não mudam)", body = PriceListItem)
    )
)]
pub async fn set_override(
    State(app_state): State<AppState>,
    Path(list_id): Path<String>,
    Json(payload): Json<SetOverridePayload>,
) -> Result<impl IntoResponse, AppError> {
    let item = app_state
        .pricing_service
        .set_override(
            &app_state.db_pool,
            &list_id,
            payload.product_id,
            payload.price,
        )
        .await?;

    Ok(Json(item))
}

// DELETE /api/admin/price-lists/{list_id}/items/{product_id}
#[utoipa::path(
    delete,
    path = "/api/admin/price-lists/{list_id}/items/{product_id}",
    tag = "PriceLists",
    params(
        ("list_id" = String, Path, description = "ID da Lista"),
        ("product_id" = i32, Path, description = "ID do Produto")
    ),
    responses(
        (status = 204, description = "Override removido; produto volta ao preço base"),
        (status = 404, description = "Override não encontrado")
    )
)]
pub async fn delete_override(
    State(app_state): State<AppState>,
    Path((list_id, product_id)): Path<(String, i32)>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .pricing_service
        .remove_override(&app_state.db_pool, &list_id, product_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
