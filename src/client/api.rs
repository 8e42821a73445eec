use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::Date;

use crate::auth::dto::LoginResponse;
use crate::categories::dto::{Category, CategoryName};

/// Errors surfaced to the view layer. Server messages are kept verbatim so
/// forms can render them inline.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{message}")]
    Server { status: StatusCode, message: String },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// A listing row as the client sees it. Attribution and numeric fields are
/// optional so a sparse response still renders and sorts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListedItem {
    pub item_id: i64,
    #[serde(default)]
    pub added_by: Option<String>,
    pub item_name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub quantity: Option<i32>,
    #[serde(default)]
    pub expiration_date: Option<Date>,
    #[serde(default)]
    pub last_updated_by: Option<String>,
}

/// Body of POST /items.
#[derive(Debug, Clone, Serialize)]
pub struct NewItemPayload {
    pub item_name: String,
    pub item_cat: String,
    pub quantity: i32,
    pub price: f64,
    pub expiration_date: Date,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Attach the access token used for authenticated calls.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(t) => req.bearer_auth(t),
            None => req,
        }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(ApiError::Server { status, message })
        }
    }

    pub async fn login(&self, user_name: &str, passcode: &str) -> Result<LoginResponse, ApiError> {
        let response = self
            .http
            .post(self.url("/login"))
            .json(&json!({ "user_name": user_name, "passcode": passcode }))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn register(&self, user_name: &str, passcode: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/users"))
            .json(&json!({ "user_name": user_name, "passcode": passcode }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    pub async fn items(&self, filter: Option<&str>) -> Result<Vec<ListedItem>, ApiError> {
        let mut req = self.http.get(self.url("/items"));
        if let Some(f) = filter {
            req = req.query(&[("filter", f)]);
        }
        Ok(Self::check(req.send().await?).await?.json().await?)
    }

    pub async fn create_item(&self, item: &NewItemPayload) -> Result<(), ApiError> {
        let req = self.authorized(self.http.post(self.url("/items"))).json(item);
        Self::check(req.send().await?).await?;
        Ok(())
    }

    /// Submit a new quantity. The server removes the item when the quantity
    /// is zero, so this is the only call the edit flow needs.
    pub async fn set_quantity(&self, item_id: i64, quantity: i32) -> Result<(), ApiError> {
        let req = self
            .authorized(self.http.put(self.url(&format!("/items/{item_id}"))))
            .json(&json!({ "quantity": quantity }));
        Self::check(req.send().await?).await?;
        Ok(())
    }

    pub async fn delete_item(&self, item_id: i64) -> Result<(), ApiError> {
        let req = self.http.delete(self.url(&format!("/items/{item_id}")));
        Self::check(req.send().await?).await?;
        Ok(())
    }

    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        let response = self.http.get(self.url("/categories")).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn create_category(&self, cat_name: &str) -> Result<Category, ApiError> {
        let response = self
            .http
            .post(self.url("/categories"))
            .json(&json!({ "cat_name": cat_name }))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn item_categories(&self, item_id: i64) -> Result<Vec<CategoryName>, ApiError> {
        let response = self
            .http
            .get(self.url(&format!("/items/{item_id}/categories")))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn link_user_item(&self, user_id: i64, item_id: i64) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url(&format!("/users/{user_id}/items/{item_id}")))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    pub async fn assign_category(&self, item_id: i64, category_id: i64) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url(&format!("/items/{item_id}/categories/{category_id}")))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listed_item_tolerates_missing_fields() {
        let item: ListedItem =
            serde_json::from_value(json!({ "item_id": 5, "item_name": "milk" })).unwrap();
        assert_eq!(item.item_id, 5);
        assert_eq!(item.quantity, None);
        assert_eq!(item.expiration_date, None);
    }

    #[test]
    fn url_joins_without_double_slash() {
        let client = ApiClient::new("http://localhost:3001/");
        assert_eq!(client.url("/items"), "http://localhost:3001/items");
    }
}
