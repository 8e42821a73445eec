use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::Date;

/// One row of the inventory listing: the item joined with its adder,
/// category, and last updater. Attribution columns come from LEFT JOINs and
/// may be absent.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ItemRow {
    pub item_id: i64,
    pub added_by: Option<String>,
    pub item_name: String,
    pub category: Option<String>,
    pub price: f64,
    pub quantity: i32,
    pub expiration_date: Date,
    pub last_updated_by: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub filter: Option<String>,
}

/// Create request with optional fields so missing input maps to 400 rather
/// than a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub item_name: Option<String>,
    pub item_cat: Option<String>,
    pub quantity: Option<i32>,
    pub price: Option<f64>,
    pub expiration_date: Option<Date>,
}

/// Validated item ready for insertion.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub item_name: String,
    pub item_cat: String,
    pub quantity: i32,
    pub price: f64,
    pub expiration_date: Date,
}

impl CreateItemRequest {
    /// All fields are required; the item name is stored lower-cased.
    pub fn validate(self) -> Result<NewItem, String> {
        let item_name = match self.item_name {
            Some(n) if !n.trim().is_empty() => n.trim().to_lowercase(),
            _ => return Err("Item name is required".into()),
        };
        let item_cat = match self.item_cat {
            Some(c) if !c.trim().is_empty() => c.trim().to_string(),
            _ => return Err("Category is required".into()),
        };
        let quantity = match self.quantity {
            Some(q) if q >= 0 => q,
            Some(_) => return Err("Quantity must not be negative".into()),
            None => return Err("Quantity is required".into()),
        };
        let price = match self.price {
            Some(p) if p >= 0.0 => p,
            Some(_) => return Err("Price must not be negative".into()),
            None => return Err("Price is required".into()),
        };
        let expiration_date = match self.expiration_date {
            Some(d) => d,
            None => return Err("Expiration date is required".into()),
        };
        Ok(NewItem {
            item_name,
            item_cat,
            quantity,
            price,
            expiration_date,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn full_request() -> CreateItemRequest {
        CreateItemRequest {
            item_name: Some("Milk".into()),
            item_cat: Some("Dairy".into()),
            quantity: Some(2),
            price: Some(3.49),
            expiration_date: Some(date!(2026 - 09 - 01)),
        }
    }

    #[test]
    fn validate_lowercases_item_name() {
        let item = full_request().validate().expect("valid request");
        assert_eq!(item.item_name, "milk");
        assert_eq!(item.item_cat, "Dairy");
    }

    #[test]
    fn validate_rejects_missing_fields() {
        let mut req = full_request();
        req.item_cat = None;
        assert_eq!(req.validate().unwrap_err(), "Category is required");

        let mut req = full_request();
        req.item_name = Some("   ".into());
        assert_eq!(req.validate().unwrap_err(), "Item name is required");

        let mut req = full_request();
        req.expiration_date = None;
        assert!(req.validate().is_err());
    }

    #[test]
    fn validate_rejects_negative_quantity() {
        let mut req = full_request();
        req.quantity = Some(-1);
        assert!(req.validate().is_err());
    }

    #[test]
    fn item_row_serializes_expiration_as_iso_date() {
        let row = ItemRow {
            item_id: 1,
            added_by: Some("alice".into()),
            item_name: "milk".into(),
            category: Some("Dairy".into()),
            price: 3.49,
            quantity: 2,
            expiration_date: date!(2026 - 09 - 01),
            last_updated_by: None,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["expiration_date"], "2026-09-01");
        assert_eq!(json["last_updated_by"], serde_json::Value::Null);
    }
}
