pub mod catalog_service;
pub use catalog_service::CatalogService;
pub mod pricing_service;
pub use pricing_service::PricingService;
pub mod crm_service;
pub use crm_service::CrmService;
pub mod order_service;
pub use order_service::OrderService;
pub mod invoice_service;
pub use invoice_service::InvoiceService;
pub mod notification_service;
pub use notification_service::NotificationService;
