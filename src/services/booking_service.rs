use crate::models::Booking;
use crate::services::api_client::{ApiClient, GatewayError};

pub const BOOKINGS_PATH: &str = "/bookings/";

/// GET /bookings/ - bookings de la organización del usuario
pub async fn fetch_bookings(api: &ApiClient) -> Result<Vec<Booking>, GatewayError> {
    let bookings: Vec<Booking> = api.get_json(BOOKINGS_PATH).await?;
    log::info!("📦 [BOOKINGS] {} bookings recibidos", bookings.len());
    Ok(bookings)
}
