// src/services/notification_service.rs

use std::time::Duration;

use serde_json::json;

// Canal de aviso para o gestor (Telegram). Falha aqui nunca sobe: a operação
// de pedido que disparou o aviso já foi commitada.
#[derive(Clone)]
pub struct NotificationService {
    client: reqwest::Client,
    bot_token: Option<String>,
    chat_id: Option<String>,
}

const SEND_TIMEOUT: Duration = Duration::from_secs(5);

impl NotificationService {
    pub fn new(bot_token: Option<String>, chat_id: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            bot_token,
            chat_id,
        }
    }

    /// Best-effort: loga e segue em qualquer falha (canal não configurado,
    /// timeout, erro HTTP).
    pub async fn send_manager_message(&self, text: &str) {
        let (Some(bot_token), Some(chat_id)) = (&self.bot_token, &self.chat_id) else {
            tracing::debug!("Canal de notificação não configurado, mensagem descartada");
            return;
        };

        let url = format!("https://api.telegram.org/bot{}/sendMessage", bot_token);
        let body = json!({ "chat_id": chat_id, "text": text });

        let send = self.client.post(&url).json(&body).send();

        match tokio::time::timeout(SEND_TIMEOUT, send).await {
            Ok(Ok(response)) if response.status().is_success() => {
                tracing::info!("Notificação enviada ao gestor");
            }
            Ok(Ok(response)) => {
                tracing::warn!("Notificação recusada pelo Telegram: {}", response.status());
            }
            Ok(Err(e)) => {
                tracing::warn!("Falha ao enviar notificação: {}", e);
            }
            Err(_) => {
                tracing::warn!("Timeout ao enviar notificação");
            }
        }
    }
}
