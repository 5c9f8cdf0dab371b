use std::fmt;

use serde::{Deserialize, Serialize};

/// Shipping tier. Any string outside the three known tiers is carried verbatim
/// in `Other` so that unexpected values still render (with the standard color).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServiceType {
    Express,
    Standard,
    Economy,
    Other(String),
}

impl ServiceType {
    /// Raw service text as supplied by the caller.
    pub fn as_str(&self) -> &str {
        match self {
            ServiceType::Express => "express",
            ServiceType::Standard => "standard",
            ServiceType::Economy => "economy",
            ServiceType::Other(raw) => raw,
        }
    }

    /// Badge text: the raw service text, uppercased.
    pub fn badge_text(&self) -> String {
        self.as_str().to_uppercase()
    }

    /// Details-cell text: first character uppercased, the rest left as-is.
    pub fn display_name(&self) -> String {
        let raw = self.as_str();
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl From<String> for ServiceType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "express" => ServiceType::Express,
            "standard" => ServiceType::Standard,
            "economy" => ServiceType::Economy,
            _ => ServiceType::Other(raw),
        }
    }
}

impl From<ServiceType> for String {
    fn from(service: ServiceType) -> Self {
        match service {
            ServiceType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything printed on a shipping label. Dates arrive pre-formatted; the
/// layout engine never parses them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentLabel {
    pub tracking_number: String,
    pub sender_name: String,
    pub sender_address: String,
    pub sender_city: String,
    pub sender_country: String,
    pub sender_phone: String,
    pub receiver_name: String,
    pub receiver_address: String,
    pub receiver_city: String,
    pub receiver_country: String,
    pub receiver_phone: String,
    pub weight: f64,
    pub service_type: ServiceType,
    pub created_date: String,
    pub estimated_delivery: String,
    /// Accepted for compatibility; no barcode is drawn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
}

impl ShipmentLabel {
    /// The demo shipment behind the dashboard's "generate label" button.
    pub fn sample() -> Self {
        ShipmentLabel {
            tracking_number: "RPHX123456789".to_string(),
            sender_name: "Raphex Fulfillment Center".to_string(),
            sender_address: "1200 Harbor Logistics Park".to_string(),
            sender_city: "Rotterdam".to_string(),
            sender_country: "Netherlands".to_string(),
            sender_phone: "+31 10 555 0142".to_string(),
            receiver_name: "Jordan Ellis".to_string(),
            receiver_address: "48 Maple Avenue, Apt 3B".to_string(),
            receiver_city: "Toronto".to_string(),
            receiver_country: "Canada".to_string(),
            receiver_phone: "+1 416 555 0199".to_string(),
            weight: 100.0,
            service_type: ServiceType::Express,
            created_date: "2024-01-15".to_string(),
            estimated_delivery: "2024-01-18".to_string(),
            barcode: None,
        }
    }

    pub fn sender_locality(&self) -> String {
        format!("{}, {}", self.sender_city, self.sender_country)
    }

    pub fn receiver_locality(&self) -> String {
        format!("{}, {}", self.receiver_city, self.receiver_country)
    }

    /// Weight with its unit suffix, e.g. `100 kg` or `2.5 kg`.
    pub fn weight_text(&self) -> String {
        format!("{} kg", self.weight)
    }

    /// Download name for the rendered document.
    pub fn filename(&self, extension: &str) -> String {
        format!("shipping-label-{}.{extension}", self.tracking_number)
    }
}
