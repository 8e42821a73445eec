use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::state::AppState;

use super::dto::{Category, CategoryName, CreateCategoryRequest};
use super::repo;

pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories", post(create_category))
        .route("/items/:item_id/categories", get(item_categories))
        .route(
            "/items/:item_id/categories/:category_id",
            post(assign_category),
        )
}

#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, (StatusCode, String)> {
    let rows = repo::list(&state.db).await.map_err(|e| {
        error!(error = %e, "list categories failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Error fetching categories".into(),
        )
    })?;
    Ok(Json(rows))
}

#[instrument(skip(state, payload))]
pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>), (StatusCode, String)> {
    let cat_name = match payload.cat_name {
        Some(n) if !n.trim().is_empty() => n.trim().to_string(),
        _ => return Err((StatusCode::BAD_REQUEST, "Category name is required".into())),
    };

    match repo::find_by_name_ci(&state.db, &cat_name).await {
        Ok(Some(_)) => {
            warn!(cat_name = %cat_name, "category already exists");
            return Err((StatusCode::BAD_REQUEST, "Category already exists".into()));
        }
        Ok(None) => {}
        Err(e) => {
            error!(error = %e, "category lookup failed");
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error checking category".into(),
            ));
        }
    }

    let category = repo::create(&state.db, &cat_name).await.map_err(|e| {
        error!(error = %e, "create category failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Error creating category".into(),
        )
    })?;

    info!(category_id = category.category_id, cat_name = %category.cat_name, "category created");
    Ok((StatusCode::CREATED, Json(category)))
}

#[instrument(skip(state))]
pub async fn item_categories(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
) -> Result<Json<Vec<CategoryName>>, (StatusCode, String)> {
    let rows = repo::for_item(&state.db, item_id).await.map_err(|e| {
        error!(error = %e, item_id, "fetch item categories failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to fetch categories".into(),
        )
    })?;
    Ok(Json(rows))
}

#[instrument(skip(state))]
pub async fn assign_category(
    State(state): State<AppState>,
    Path((item_id, category_id)): Path<(i64, i64)>,
) -> Result<String, (StatusCode, String)> {
    repo::assign_to_item(&state.db, item_id, category_id)
        .await
        .map_err(|e| {
            error!(error = %e, item_id, category_id, "assign category failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to assign category".into(),
            )
        })?;
    Ok("Category assigned successfully!".into())
}
