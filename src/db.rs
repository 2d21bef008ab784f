pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod pricing_repo;
pub use pricing_repo::PricingRepository;
pub mod crm_repo;
pub use crm_repo::CrmRepository;
pub mod orders_repo;
pub use orders_repo::OrdersRepository;
