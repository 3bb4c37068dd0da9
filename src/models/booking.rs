use serde::{Deserialize, Serialize};

/// Estado de un booking. Se (de)serializa como el string crudo del backend;
/// un valor no reconocido se conserva tal cual en `Unknown`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
#[serde(from = "String", into = "String")]
pub enum BookingStatus {
    Booked,
    InTransit,
    Delivered,
    Cancelled,
    /// Estado que el backend añada en el futuro
    Unknown(String),
}

impl From<String> for BookingStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "booked" => BookingStatus::Booked,
            "in_transit" => BookingStatus::InTransit,
            "delivered" => BookingStatus::Delivered,
            "cancelled" => BookingStatus::Cancelled,
            _ => BookingStatus::Unknown(raw),
        }
    }
}

impl From<BookingStatus> for String {
    fn from(status: BookingStatus) -> Self {
        match status {
            BookingStatus::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl BookingStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BookingStatus::Booked => "booked",
            BookingStatus::InTransit => "in_transit",
            BookingStatus::Delivered => "delivered",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Unknown(raw) => raw,
        }
    }

    /// Texto del badge: "in_transit" -> "IN TRANSIT"
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ").to_uppercase()
    }

    /// Color del badge
    pub fn badge_color(&self) -> &'static str {
        match self {
            BookingStatus::Booked => "blue",
            BookingStatus::InTransit => "purple",
            BookingStatus::Delivered => "green",
            BookingStatus::Cancelled => "red",
            BookingStatus::Unknown(_) => "gray",
        }
    }
}

/// Booking tal como lo devuelve GET /bookings/ (solo lectura)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Booking {
    pub id: i64,
    pub status: BookingStatus,
    pub client_id: i64,
    pub reference_number: String,
    pub carrier_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_booking_list_payload() {
        let json = r#"[
            {"id": 1, "status": "in_transit", "client_id": 7, "reference_number": "REF-001", "carrier_name": "Maersk"},
            {"id": 2, "status": "on_hold", "client_id": 7, "reference_number": "REF-002", "carrier_name": "MSC"}
        ]"#;
        let bookings: Vec<Booking> = serde_json::from_str(json).unwrap();
        assert_eq!(bookings.len(), 2);
        assert_eq!(bookings[0].status, BookingStatus::InTransit);
        assert_eq!(bookings[1].status, BookingStatus::Unknown("on_hold".to_string()));
    }

    #[test]
    fn unknown_status_keeps_raw_value_for_label_and_wire() {
        let status: BookingStatus = serde_json::from_str(r#""on_hold""#).unwrap();
        assert_eq!(status.label(), "ON HOLD");
        assert_eq!(status.badge_color(), "gray");
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""on_hold""#);
        assert_eq!(serde_json::to_string(&BookingStatus::InTransit).unwrap(), r#""in_transit""#);
    }

    #[test]
    fn badge_label_and_color() {
        assert_eq!(BookingStatus::InTransit.label(), "IN TRANSIT");
        assert_eq!(BookingStatus::InTransit.badge_color(), "purple");
        assert_eq!(BookingStatus::Cancelled.badge_color(), "red");
        assert_eq!(BookingStatus::Unknown("x".into()).badge_color(), "gray");
    }
}
