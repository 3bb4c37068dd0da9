pub mod http;
pub mod api_client;
pub mod auth_service;
pub mod booking_service;
pub mod finance_service;

#[cfg(test)]
pub mod testing;

pub use api_client::{ApiClient, GatewayError, TokenProvider};
pub use auth_service::*;
pub use booking_service::*;
pub use finance_service::*;
