// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{CatalogRepository, CrmRepository, OrdersRepository, PricingRepository},
    services::{
        CatalogService, CrmService, InvoiceService, NotificationService, OrderService,
        PricingService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub catalog_service: CatalogService,
    pub pricing_service: PricingService,
    pub crm_service: CrmService,
    pub order_service: OrderService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        // Base dos links de separação enviados ao gestor.
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());

        // Colaboradores externos são opcionais: sem config, viram no-op.
        let telegram_bot_token = env::var("TELEGRAM_BOT_TOKEN").ok();
        let telegram_chat_id = env::var("TELEGRAM_CHAT_ID").ok();
        let invoice_api_url = env::var("INVOICE_API_URL").ok();

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let pricing_repo = PricingRepository::new(db_pool.clone());
        let crm_repo = CrmRepository::new(db_pool.clone());
        let orders_repo = OrdersRepository::new(db_pool.clone());

        let catalog_service = CatalogService::new(catalog_repo.clone());
        let pricing_service = PricingService::new(pricing_repo);
        let crm_service = CrmService::new(crm_repo);
        let invoice_service = InvoiceService::new(invoice_api_url);
        let notification_service =
            NotificationService::new(telegram_bot_token, telegram_chat_id);
        let order_service = OrderService::new(
            orders_repo,
            catalog_repo,
            pricing_service.clone(),
            invoice_service,
            notification_service,
            frontend_url,
        );

        Ok(Self {
            db_pool,
            catalog_service,
            pricing_service,
            crm_service,
            order_service,
        })
    }
}
