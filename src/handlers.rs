pub mod catalog;
pub mod crm;
pub mod orders;
pub mod picking;
pub mod price_lists;
pub mod store;
