pub mod catalog;
pub mod crm;
pub mod orders;
