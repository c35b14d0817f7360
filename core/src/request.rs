//! Work item types: the synthetic orders sent to the target

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique work item identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkItemId(pub Uuid);

impl WorkItemId {
    /// Build an id from 128 random bits
    ///
    /// The bits are stamped as a version 4 uuid, so ids drawn from any
    /// random source look like ordinary `Uuid::new_v4()` values.
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }

    /// First 8 characters, for compact progress lines
    pub fn short(&self) -> String {
        let mut s = self.0.to_string();
        s.truncate(8);
        s
    }
}

impl std::fmt::Display for WorkItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for WorkItemId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// One synthetic order
///
/// Serializes to the JSON body the order intake endpoint expects:
/// `{"orderId": "...", "barCode": "...", "quantity": 3, "price": 12.5}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Order identifier
    #[serde(rename = "orderId")]
    pub id: WorkItemId,

    /// 13-digit EAN-13 barcode
    #[serde(rename = "barCode")]
    pub barcode: String,

    /// Units ordered (at least 1)
    pub quantity: u32,

    /// Unit price, two decimal places
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl WorkItem {
    /// Create a new work item
    pub fn new(id: WorkItemId, barcode: impl Into<String>, quantity: u32, price: Decimal) -> Self {
        Self {
            id,
            barcode: barcode.into(),
            quantity,
            price,
        }
    }

    /// Serialize to the JSON request body
    pub fn to_json_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Check the constraints the order service enforces on incoming orders
    pub fn validate(&self) -> Result<(), WorkItemError> {
        if self.barcode.trim().is_empty() {
            return Err(WorkItemError::BlankBarcode);
        }
        if self.quantity < 1 {
            return Err(WorkItemError::InvalidQuantity(self.quantity));
        }
        if self.price < Decimal::new(1, 2) {
            return Err(WorkItemError::InvalidPrice(self.price));
        }
        Ok(())
    }
}

/// Order constraint violations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorkItemError {
    /// Barcode is empty or whitespace
    #[error("the barCode must be provided")]
    BlankBarcode,

    /// Quantity below 1
    #[error("the quantity must be at least 1, got {0}")]
    InvalidQuantity(u32),

    /// Price below 0.01
    #[error("the price must be greater than zero, got {0}")]
    InvalidPrice(Decimal),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> WorkItem {
        WorkItem::new(
            WorkItemId(Uuid::nil()),
            "4006381333931",
            3,
            Decimal::new(1234, 2),
        )
    }

    #[test]
    fn test_json_field_names() {
        let json: serde_json::Value = serde_json::to_value(item()).unwrap();

        assert_eq!(json["orderId"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["barCode"], "4006381333931");
        assert_eq!(json["quantity"], 3);
        assert!(json["price"].is_number());
        assert!((json["price"].as_f64().unwrap() - 12.34).abs() < 1e-9);
    }

    #[test]
    fn test_short_id() {
        let id = WorkItemId(Uuid::parse_str("a1b2c3d4-0000-4000-8000-000000000000").unwrap());
        assert_eq!(id.short(), "a1b2c3d4");
    }

    #[test]
    fn test_from_random_bytes_sets_v4() {
        let id = WorkItemId::from_random_bytes([0xff; 16]);
        assert_eq!(id.0.get_version_num(), 4);
    }

    #[test]
    fn test_validate() {
        assert!(item().validate().is_ok());

        let mut blank = item();
        blank.barcode = "  ".into();
        assert_eq!(blank.validate(), Err(WorkItemError::BlankBarcode));

        let mut zero_qty = item();
        zero_qty.quantity = 0;
        assert_eq!(zero_qty.validate(), Err(WorkItemError::InvalidQuantity(0)));

        let mut free = item();
        free.price = Decimal::ZERO;
        assert!(matches!(free.validate(), Err(WorkItemError::InvalidPrice(_))));
    }
}
