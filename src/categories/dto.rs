use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub category_id: i64,
    pub cat_name: String,
}

/// Category name only, as returned by the per-item lookup.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CategoryName {
    pub cat_name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub cat_name: Option<String>,
}
