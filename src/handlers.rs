pub mod activities;
pub mod auth;
pub mod customers;
pub mod finance;
pub mod inventory;
pub mod notifications;
pub mod orders;
pub mod products;
pub mod purchases;
pub mod reports;
pub mod suppliers;
pub mod users;
pub mod warehouses;
