// src/middleware/storefront.rs

use axum::extract::{FromRef, FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;

use crate::{common::error::AppError, config::AppState, models::crm::Customer};

/// Cliente ativo da vitrine, resolvido a partir do `?token=` da URL
/// (simulação de sessão via link). `None` = visitante anônimo, que paga
/// preço base. Contexto explícito por request, nunca estado global.
pub struct ActiveCustomer(pub Option<Customer>);

#[derive(Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

impl<S> FromRequestParts<S> for ActiveCustomer
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let token = Query::<TokenQuery>::try_from_uri(&parts.uri)
            .map(|q| q.0.token)
            .unwrap_or(None);

        // Token desconhecido não é erro: o visitante só navega anônimo.
        let customer = match token {
            Some(token) => {
                app_state
                    .crm_service
                    .find_customer_by_token(&app_state.db_pool, &token)
                    .await?
            }
            None => None,
        };

        Ok(ActiveCustomer(customer))
    }
}
