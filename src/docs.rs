// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Store ---
        handlers::store::list_products,
        handlers::store::list_categories,
        handlers::store::checkout,
        handlers::store::get_order,

        // --- Catalog ---
        handlers::catalog::create_product,
        handlers::catalog::list_products,
        handlers::catalog::get_product,
        handlers::catalog::update_product,
        handlers::catalog::delete_product,
        handlers::catalog::create_category,
        handlers::catalog::list_categories,
        handlers::catalog::delete_category,

        // --- Price Lists ---
        handlers::price_lists::create_price_list,
        handlers::price_lists::list_price_lists,
        handlers::price_lists::get_price_list,
        handlers::price_lists::rename_price_list,
        handlers::price_lists::delete_price_list,
        handlers::price_lists::set_override,
        handlers::price_lists::delete_override,

        // --- CRM ---
        handlers::crm::create_customer,
        handlers::crm::list_customers,
        handlers::crm::get_customer,
        handlers::crm::update_customer,
        handlers::crm::delete_customer,

        // --- Orders ---
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::orders::update_order,
        handlers::orders::issue_picking_link,

        // --- Picking ---
        handlers::picking::get_order,
        handlers::picking::update_item,
        handlers::picking::complete,
    ),
    components(
        schemas(
            // --- Catalog ---
            models::catalog::Category,
            models::catalog::Product,
            models::catalog::PriceList,
            models::catalog::PriceListItem,
            models::catalog::PriceListDetail,
            models::catalog::EffectivePrice,
            models::catalog::StoreProduct,

            // --- CRM ---
            models::crm::Customer,

            // --- Orders ---
            models::orders::OrderStatus,
            models::orders::PickingStatus,
            models::orders::Order,
            models::orders::OrderItem,
            models::orders::OrderDetail,

            // --- Payloads ---
            handlers::store::CheckoutPayload,
            handlers::catalog::ProductPayload,
            handlers::catalog::CreateCategoryPayload,
            handlers::price_lists::CreatePriceListPayload,
            handlers::price_lists::RenamePriceListPayload,
            handlers::price_lists::SetOverridePayload,
            handlers::crm::CustomerPayload,
            handlers::orders::UpdateOrderPayload,
            handlers::picking::PickingItemPayload,
            handlers::picking::CompletePickingPayload,
            services::order_service::CheckoutLine,
            services::order_service::OrderLineInput,
            services::order_service::PickedLineInput,
            services::order_service::PickingLink,
        )
    ),
    tags(
        (name = "Store", description = "Vitrine pública (preço efetivo por cliente)"),
        (name = "Catalog", description = "Back-office de Produtos e Categorias"),
        (name = "PriceLists", description = "Listas de Preço e Overrides"),
        (name = "CRM", description = "Gestão de Clientes"),
        (name = "Orders", description = "Gestão de Pedidos e Status"),
        (name = "Picking", description = "Separação de Pedidos (acesso por token)")
    )
)]
pub struct ApiDoc;
