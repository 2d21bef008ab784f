// src/main.rs

use axum::{
    Router,
    routing::{get, patch, post, put},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Vitrine pública: o cliente ativo vem do ?token= da URL.
    let store_routes = Router::new()
        .route("/products", get(handlers::store::list_products))
        .route("/categories", get(handlers::store::list_categories))
        .route("/checkout", post(handlers::store::checkout))
        .route("/orders/{order_id}", get(handlers::store::get_order));

    let catalog_routes = Router::new()
        .route(
            "/products",
            post(handlers::catalog::create_product).get(handlers::catalog::list_products),
        )
        .route(
            "/products/{product_id}",
            get(handlers::catalog::get_product)
                .put(handlers::catalog::update_product)
                .delete(handlers::catalog::delete_product),
        )
        .route(
            "/categories",
            post(handlers::catalog::create_category).get(handlers::catalog::list_categories),
        )
        .route(
            "/categories/{category_id}",
            axum::routing::delete(handlers::catalog::delete_category),
        );

    let price_list_routes = Router::new()
        .route(
            "/price-lists",
            post(handlers::price_lists::create_price_list)
                .get(handlers::price_lists::list_price_lists),
        )
        .route(
            "/price-lists/{list_id}",
            get(handlers::price_lists::get_price_list)
                .put(handlers::price_lists::rename_price_list)
                .delete(handlers::price_lists::delete_price_list),
        )
        .route(
            "/price-lists/{list_id}/items",
            put(handlers::price_lists::set_override),
        )
        .route(
            "/price-lists/{list_id}/items/{product_id}",
            axum::routing::delete(handlers::price_lists::delete_override),
        );

    let crm_routes = Router::new()
        .route(
            "/customers",
            post(handlers::crm::create_customer).get(handlers::crm::list_customers),
        )
        .route(
            "/customers/{customer_id}",
            get(handlers::crm::get_customer)
                .put(handlers::crm::update_customer)
                .delete(handlers::crm::delete_customer),
        );

    let order_routes = Router::new()
        .route("/orders", get(handlers::orders::list_orders))
        .route(
            "/orders/{order_id}",
            get(handlers::orders::get_order).patch(handlers::orders::update_order),
        )
        .route(
            "/orders/{order_id}/picking-link",
            post(handlers::orders::issue_picking_link),
        );

    // Superfície do separador: o token no path é a autorização inteira.
    let picker_routes = Router::new()
        .route("/{token}", get(handlers::picking::get_order))
        .route(
            "/{token}/items/{item_id}",
            patch(handlers::picking::update_item),
        )
        .route("/{token}/complete", post(handlers::picking::complete));

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/store", store_routes)
        .nest("/api/admin", catalog_routes)
        .nest("/api/admin", price_list_routes)
        .nest("/api/admin", crm_routes)
        .nest("/api/admin", order_routes)
        .nest("/api/picker", picker_routes)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .with_state(app_state);

    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
