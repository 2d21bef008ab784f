// src/handlers/catalog.rs
//
// Back-office do catálogo: produtos e categorias.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::catalog::{Category, Product},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Café torrado 500g")]
    pub title: String,

    pub description: Option<String>,

    #[schema(example = "19.90")]
    pub base_price: Decimal,

    pub original_price: Option<Decimal>,
    pub discount_percent: Option<i32>,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Mercearia")]
    pub category: String,

    pub image_url: Option<String>,
}

// POST /api/admin/products
#[utoipa::path(
    post,
    path = "/api/admin/products",
    tag = "Catalog",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Produto criado", body = Product)
    )
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .catalog_service
        .create_product(
            &app_state.db_pool,
            &payload.title,
            payload.description.as_deref(),
            payload.base_price,
            payload.original_price,
            payload.discount_percent,
            &payload.category,
            payload.image_url.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

// GET /api/admin/products
#[utoipa::path(
    get,
    path = "/api/admin/products",
    tag = "Catalog",
    responses(
        (status = 200, description = "Todos os produtos, com preço base", body = [Product])
    )
)]
pub async fn list_products(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state
        .catalog_service
        .list_products(&app_state.db_pool)
        .await?;

    Ok(Json(products))
}

// GET /api/admin/products/{product_id}
#[utoipa::path(
    get,
    path = "/api/admin/products/{product_id}",
    tag = "Catalog",
    params(
        ("product_id" = i32, Path, description = "ID do Produto")
    ),
    responses(
        (status = 200, description = "Produto", body = Product),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    Path(product_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let product = app_state
        .catalog_service
        .get_product(&app_state.db_pool, product_id)
        .await?;

    Ok(Json(product))
}

// PUT /api/admin/products/{product_id}
#[utoipa::path(
    put,
    path = "/api/admin/products/{product_id}",
    tag = "Catalog",
    request_body = ProductPayload,
    params(
        ("product_id" = i32, Path, description = "ID do Produto")
    ),
    responses(
        (status = 200, description = "Produto atualizado", body = Product),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    Path(product_id): Path<i32>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .catalog_service
        .update_product(
            &app_state.db_pool,
            product_id,
            &payload.title,
            payload.description.as_deref(),
            payload.base_price,
            payload.original_price,
            payload.discount_percent,
            &payload.category,
            payload.image_url.as_deref(),
        )
        .await?;

    Ok(Json(product))
}

// DELETE /api/admin/products/{product_id}
#[utoipa::path(
    delete,
    path = "/api/admin/products/{product_id}",
    tag = "Catalog",
    params(
        ("product_id" = i32, Path, description = "ID do Produto")
    ),
    responses(
        (status = 204, description = "Produto removido (histórico de pedidos preservado)"),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    Path(product_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .catalog_service
        .delete_product(&app_state.db_pool, product_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Bebidas")]
    pub name: String,
}

// POST /api/admin/categories
#[utoipa::path(
    post,
    path = "/api/admin/categories",
    tag = "Catalog",
    request_body = CreateCategoryPayload,
    responses(
        (status = 201, description = "Categoria criada", body = Category)
    )
)]
pub async fn create_category(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateCategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let category = app_state
        .catalog_service
        .create_category(&app_state.db_pool, &payload.name)
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

// GET /api/admin/categories
#[utoipa::path(
    get,
    path = "/api/admin/categories",
    tag = "Catalog",
    responses(
        (status = 200, description = "Todas as categorias", body = [Category])
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

// DELETE /api/admin/categories/{category_id}
#[utoipa::path(
    delete,
    path = "/api/admin/categories/{category_id}",
    tag = "Catalog",
    params(
        ("category_id" = Uuid, Path, description = "ID da Categoria")
    ),
    responses(
        (status = 204, description = "Categoria removida"),
        (status = 404, description = "Categoria não encontrada")
    )
)]
pub async fn delete_category(
    State(app_state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .catalog_service
        .delete_category(&app_state.db_pool, category_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
