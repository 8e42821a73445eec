use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{auth::jwt::AuthUser, state::AppState};

use super::dto::{CreateItemRequest, ItemRow, ListQuery, UpdateQuantityRequest};
use super::repo::{self, CreateOutcome};

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/items", get(list_items))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/items", post(create_item))
        .route("/items/:item_id", put(update_quantity))
        .route("/items/:item_id", delete(delete_item))
        .route("/users/:user_id/items/:item_id", post(link_user_item))
}

#[instrument(skip(state))]
pub async fn list_items(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<ItemRow>>, (StatusCode, String)> {
    let rows = repo::list(&state.db, q.filter.as_deref())
        .await
        .map_err(|e| {
            error!(error = %e, "list items failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Database query failed".into())
        })?;
    Ok(Json(rows))
}

#[instrument(skip(state, payload))]
pub async fn create_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateItemRequest>,
) -> Result<String, (StatusCode, String)> {
    let item = payload
        .validate()
        .map_err(|msg| (StatusCode::BAD_REQUEST, msg))?;

    match repo::create_with_attribution(&state.db, user_id, &item).await {
        Ok(CreateOutcome::Created(item_id)) => {
            info!(item_id, user_id, item_name = %item.item_name, "item added");
            Ok("Item added successfully!".into())
        }
        Ok(CreateOutcome::DuplicateName) => {
            warn!(item_name = %item.item_name, "duplicate item name");
            Err((
                StatusCode::BAD_REQUEST,
                "Item already exists in the inventory.".into(),
            ))
        }
        Ok(CreateOutcome::UnknownCategory) => Err((
            StatusCode::BAD_REQUEST,
            format!("Category \"{}\" does not exist", item.item_cat),
        )),
        Err(e) => {
            error!(error = %e, "create item failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Failed to add item".into()))
        }
    }
}

/// Quantity strictly greater than zero updates the row; zero or below removes
/// the item. The transition lives here so clients only ever issue the PUT.
#[instrument(skip(state, payload))]
pub async fn update_quantity(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> Result<String, (StatusCode, String)> {
    let Some(quantity) = payload.quantity else {
        return Err((StatusCode::BAD_REQUEST, "Quantity required".into()));
    };

    if quantity <= 0 {
        let removed = repo::delete(&state.db, id).await.map_err(|e| {
            error!(error = %e, id, "delete on zero quantity failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to update item".into())
        })?;
        if !removed {
            return Err((StatusCode::NOT_FOUND, "Item not found".into()));
        }
        info!(id, user_id, "item removed on zero quantity");
        return Ok("Item deleted successfully!".into());
    }

    let updated = repo::set_quantity(&state.db, id, quantity, user_id)
        .await
        .map_err(|e| {
            error!(error = %e, id, "update item failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to update item".into())
        })?;
    if !updated {
        return Err((StatusCode::NOT_FOUND, "Item not found".into()));
    }
    info!(id, user_id, quantity, "item quantity updated");
    Ok("Item updated successfully!".into())
}

#[instrument(skip(state))]
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<String, (StatusCode, String)> {
    let removed = repo::delete(&state.db, id).await.map_err(|e| {
        error!(error = %e, id, "delete item failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete item".into())
    })?;
    if !removed {
        return Err((StatusCode::NOT_FOUND, "Item not found".into()));
    }
    info!(id, "item deleted");
    Ok("Item deleted successfully!".into())
}

#[instrument(skip(state))]
pub async fn link_user_item(
    State(state): State<AppState>,
    Path((user_id, item_id)): Path<(i64, i64)>,
) -> Result<String, (StatusCode, String)> {
    repo::link_user(&state.db, user_id, item_id)
        .await
        .map_err(|e| {
            error!(error = %e, user_id, item_id, "link user to item failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to link user to item".into(),
            )
        })?;
    Ok("User linked to item successfully!".into())
}
