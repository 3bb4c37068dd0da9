use crate::models::{FinancingRequest, FinancingRequestPublic};
use crate::services::api_client::{ApiClient, GatewayError};

pub const FINANCING_REQUESTS_PATH: &str = "/finance/financing-requests/";

/// POST /finance/financing-requests/
pub async fn request_financing(
    api: &ApiClient,
    request: &FinancingRequest,
) -> Result<FinancingRequestPublic, GatewayError> {
    log::info!("💰 [FINANCE] Solicitud de financiación para booking {}", request.booking_id);
    api.post_json(FINANCING_REQUESTS_PATH, request).await
}
