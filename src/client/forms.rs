use time::{format_description::FormatItem, macros::format_description, Date};

use crate::categories::dto::Category;
use crate::client::api::{ListedItem, NewItemPayload};

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Add-item modal form. Field values are raw input text; `validate` turns
/// them into a request payload or an inline error message.
#[derive(Debug, Default)]
pub struct AddItemForm {
    pub item_name: String,
    pub item_cat: String,
    pub quantity: String,
    pub price: String,
    pub expiration_date: String,
    pub categories: Vec<Category>,
    pub error: Option<String>,
}

impl AddItemForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// The category dropdown is populated when the modal opens.
    pub fn set_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    /// Every field is required. The item name is lower-cased before it goes
    /// to the server.
    pub fn validate(&self) -> Result<NewItemPayload, String> {
        if self.item_name.trim().is_empty()
            || self.item_cat.trim().is_empty()
            || self.quantity.trim().is_empty()
            || self.price.trim().is_empty()
            || self.expiration_date.trim().is_empty()
        {
            return Err("All fields are required.".into());
        }

        let quantity: i32 = self
            .quantity
            .trim()
            .parse()
            .map_err(|_| "Quantity must be a whole number.".to_string())?;
        let price: f64 = self
            .price
            .trim()
            .parse()
            .map_err(|_| "Price must be a number.".to_string())?;
        let expiration_date = Date::parse(self.expiration_date.trim(), DATE_FORMAT)
            .map_err(|_| "Expiration date must be YYYY-MM-DD.".to_string())?;

        Ok(NewItemPayload {
            item_name: self.item_name.trim().to_lowercase(),
            item_cat: self.item_cat.trim().to_string(),
            quantity,
            price,
            expiration_date,
        })
    }

    /// Keep server error text for inline display.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }
}

/// Edit-quantity modal form, seeded from the selected item.
#[derive(Debug)]
pub struct EditQuantityForm {
    pub item_id: i64,
    pub value: String,
    pub error: Option<String>,
}

impl EditQuantityForm {
    pub fn for_item(item: &ListedItem) -> Self {
        Self {
            item_id: item.item_id,
            value: item.quantity.map(|q| q.to_string()).unwrap_or_default(),
            error: None,
        }
    }

    /// A non-empty whole number. Zero is valid input; the server decides
    /// that zero means removal.
    pub fn validate(&self) -> Result<i32, String> {
        if self.value.trim().is_empty() {
            return Err("Quantity cannot be empty.".into());
        }
        self.value
            .trim()
            .parse()
            .map_err(|_| "Quantity must be a whole number.".to_string())
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn filled_form() -> AddItemForm {
        AddItemForm {
            item_name: "Oat Milk".into(),
            item_cat: "Dairy".into(),
            quantity: "2".into(),
            price: "3.49".into(),
            expiration_date: "2026-09-01".into(),
            categories: Vec::new(),
            error: None,
        }
    }

    #[test]
    fn add_form_produces_lowercased_payload() {
        let payload = filled_form().validate().expect("valid form");
        assert_eq!(payload.item_name, "oat milk");
        assert_eq!(payload.quantity, 2);
        assert_eq!(payload.expiration_date, date!(2026 - 09 - 01));
    }

    #[test]
    fn add_form_requires_every_field() {
        let mut form = filled_form();
        form.price = "  ".into();
        assert_eq!(form.validate().unwrap_err(), "All fields are required.");
    }

    #[test]
    fn add_form_rejects_unparseable_values() {
        let mut form = filled_form();
        form.quantity = "two".into();
        assert!(form.validate().is_err());

        let mut form = filled_form();
        form.expiration_date = "09/01/2026".into();
        assert!(form.validate().is_err());
    }

    #[test]
    fn edit_form_seeds_from_item_and_accepts_zero() {
        let item = ListedItem {
            item_id: 9,
            added_by: None,
            item_name: "milk".into(),
            category: None,
            price: None,
            quantity: Some(4),
            expiration_date: None,
            last_updated_by: None,
        };
        let mut form = EditQuantityForm::for_item(&item);
        assert_eq!(form.value, "4");

        form.value = "0".into();
        assert_eq!(form.validate().unwrap(), 0);
    }

    #[test]
    fn edit_form_rejects_empty_and_non_numeric() {
        let item = ListedItem {
            item_id: 9,
            added_by: None,
            item_name: "milk".into(),
            category: None,
            price: None,
            quantity: None,
            expiration_date: None,
            last_updated_by: None,
        };
        let mut form = EditQuantityForm::for_item(&item);
        assert_eq!(form.value, "");
        assert!(form.validate().is_err());

        form.value = "many".into();
        assert!(form.validate().is_err());
    }
}
