// src/handlers/crm.rs
//
// Gestão de clientes: cada cliente nasce com seu token de vitrine e pode
// apontar para zero ou uma lista de preço.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{common::error::AppError, config::AppState, models::crm::Customer};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Maria Souza")]
    pub full_name: String,

    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,

    pub phone: Option<String>,

    #[schema(example = "vip")]
    pub price_list_id: Option<String>,
}

// POST /api/admin/customers
#[utoipa::path(
    post,
    path = "/api/admin/customers",
    tag = "CRM",
    request_body = CustomerPayload,
    responses(
        (status = 201, description = "Cliente criado com token de vitrine", body = Customer)
    )
)]
pub async fn create_customer(
    State(app_state): State<AppState>,
    Json(payload): Json<CustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let customer = app_state
        .crm_service
        .create_customer(
            &app_state.db_pool,
            &payload.full_name,
            payload.email.as_deref(),
            payload.phone.as_deref(),
            payload.price_list_id.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(customer)))
}

// GET /api/admin/customers
#[utoipa::path(
    get,
    path = "/api/admin/customers",
    tag = "CRM",
    responses(
        (status = 200, description = "Todos os clientes", body = [Customer])
    )
)]
pub async fn list_customers(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let customers = app_state
        .crm_service
        .list_customers(&app_state.db_pool)
        .await?;

    Ok(Json(customers))
}

// GET /api/admin/customers/{customer_id}
#[utoipa::path(
    get,
    path = "/api/admin/customers/{customer_id}",
    tag = "CRM",
    params(
        ("customer_id" = Uuid, Path, description = "ID do Cliente")
    ),
    responses(
        (status = 200, description = "Cliente", body = Customer),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn get_customer(
    State(app_state): State<AppState>,
    Path(customer_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let customer = app_state
        .crm_service
        .get_customer(&app_state.db_pool, customer_id)
        .await?;

    Ok(Json(customer))
}

// PUT /api/admin/customers/{customer_id}
#[utoipa::path(
    put,
    path = "/api/admin/customers/{customer_id}",
    tag = "CRM",
    request_body = CustomerPayload,
    params(
        ("customer_id" = Uuid, Path, description = "ID do Cliente")
    ),
    responses(
        (status = 200, description = "Cliente atualizado (token preservado)", body = Customer),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn update_customer(
    State(app_state): State<AppState>,
    Path(customer_id): Path<Uuid>,
    Json(payload): Json<CustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let customer = app_state
        .crm_service
        .update_customer(
            &app_state.db_pool,
            customer_id,
            &payload.full_name,
            payload.email.as_deref(),
            payload.phone.as_deref(),
            payload.price_list_id.as_deref(),
        )
        .await?;

    Ok(Json(customer))
}

// DELETE /api/admin/customers/{customer_id}
#[utoipa::path(
    delete,
    path = "/api/admin/customers/{customer_id}",
    tag = "CRM",
    params(
        ("customer_id" = Uuid, Path, description = "ID do Cliente")
    ),
    responses(
        (status = 204, description = "Cliente removido"),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn delete_customer(
    State(app_state): State<AppState>,
    Path(customer_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .crm_service
        .delete_customer(&app_state.db_pool, customer_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
