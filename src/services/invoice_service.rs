// src/services/invoice_service.rs

use std::time::Duration;

use serde_json::json;

use crate::models::orders::{Order, OrderItem};

// Colaborador externo de faturamento/ERP: recebe o pedido, devolve a URL do
// documento gerado. Indisponibilidade é tolerada: o pedido fica sem
// `document_link` e a vida segue.
#[derive(Clone)]
pub struct InvoiceService {
    client: reqwest::Client,
    api_url: Option<String>,
}

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

impl InvoiceService {
    pub fn new(api_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
        }
    }

    /// Pede a geração do documento. `None` em qualquer falha.
    pub async fn request_document(&self, order: &Order, items: &[OrderItem]) -> Option<String> {
        let api_url = self.api_url.as_ref()?;

        let body = json!({
            "customerName": order.customer_name,
            "items": items.iter().map(|item| json!({
                "title": item.title,
                "quantity": item.quantity,
                "price": item.price,
                "discountPercent": item.discount_percent,
            })).collect::<Vec<_>>(),
            "totalAmount": order.total_amount,
            "discountPercent": order.discount_percent,
        });

        let send = self.client.post(api_url).json(&body).send();

        let response = match tokio::time::timeout(REQUEST_TIMEOUT, send).await {
            Ok(Ok(response)) if response.status().is_success() => response,
            Ok(Ok(response)) => {
                tracing::warn!(
                    "Faturamento recusou o pedido {}: {}",
                    order.id,
                    response.status()
                );
                return None;
            }
            Ok(Err(e)) => {
                tracing::warn!("Falha ao chamar o faturamento para {}: {}", order.id, e);
                return None;
            }
            Err(_) => {
                tracing::warn!("Timeout no faturamento para {}", order.id);
                return None;
            }
        };

        match response.json::<serde_json::Value>().await {
            Ok(payload) => payload
                .get("documentUrl")
                .and_then(|v| v.as_str())
                .map(str::to_string),
            Err(e) => {
                tracing::warn!("Resposta inválida do faturamento para {}: {}", order.id, e);
                None
            }
        }
    }
}
