use serde::{Deserialize, Serialize};

/// Importe solicitado por defecto desde la lista (no hay formulario todavía)
pub const DEFAULT_REQUESTED_AMOUNT: f64 = 0.0;
pub const DEFAULT_ADVANCE_PERCENTAGE: f64 = 80.0;

/// Cuerpo de POST /finance/financing-requests/ (no se guarda tras enviarse)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct FinancingRequest {
    pub booking_id: i64,
    pub requested_amount: f64,
    pub advance_percentage: f64,
}

impl FinancingRequest {
    pub fn for_booking(booking_id: i64) -> Self {
        Self {
            booking_id,
            requested_amount: DEFAULT_REQUESTED_AMOUNT,
            advance_percentage: DEFAULT_ADVANCE_PERCENTAGE,
        }
    }
}

/// Solicitud creada. El backend puede omitir campos, así que todo es opcional.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(default)]
pub struct FinancingRequestPublic {
    pub id: Option<i64>,
    pub status: Option<String>,
    pub amount_requested: Option<f64>,
    pub fee_amount: Option<f64>,
    pub total_repayment: Option<f64>,
    pub payable_id: Option<i64>,
}
