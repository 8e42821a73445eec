use sqlx::PgPool;

use super::dto::{ItemRow, NewItem};

const LIST_SQL: &str = r#"
    SELECT
        i.item_id,
        adder.user_name AS added_by,
        i.item_name,
        c.cat_name AS category,
        i.price,
        i.quantity,
        i.expiration_date,
        updater.user_name AS last_updated_by
    FROM fridge_items i
    LEFT JOIN user_fridge uf ON uf.item_id = i.item_id
    LEFT JOIN users adder ON adder.user_id = uf.user_id
    LEFT JOIN categories c ON c.category_id = i.item_cat
    LEFT JOIN users updater ON updater.user_id = i.last_updated_by
"#;

/// List all items with attribution, optionally narrowed to rows whose adder
/// username or category name contains `filter` (case-insensitive).
pub async fn list(db: &PgPool, filter: Option<&str>) -> anyhow::Result<Vec<ItemRow>> {
    let rows = match filter {
        Some(f) if !f.is_empty() => {
            let pattern = format!("%{}%", f);
            sqlx::query_as::<_, ItemRow>(&format!(
                "{LIST_SQL} WHERE adder.user_name ILIKE $1 OR c.cat_name ILIKE $1 ORDER BY i.item_id"
            ))
            .bind(pattern)
            .fetch_all(db)
            .await?
        }
        _ => {
            sqlx::query_as::<_, ItemRow>(&format!("{LIST_SQL} ORDER BY i.item_id"))
                .fetch_all(db)
                .await?
        }
    };
    Ok(rows)
}

pub enum CreateOutcome {
    Created(i64),
    DuplicateName,
    UnknownCategory,
}

/// Insert an item and its attribution link as one unit. The duplicate-name
/// check, category resolution, item insert, and user_fridge insert all run in
/// a single transaction, so a failed link can never leave an unattributed
/// item behind.
pub async fn create_with_attribution(
    db: &PgPool,
    user_id: i64,
    item: &NewItem,
) -> anyhow::Result<CreateOutcome> {
    let mut tx = db.begin().await?;

    let duplicate: Option<(i64,)> = sqlx::query_as(
        r#"
        SELECT item_id FROM fridge_items
        WHERE LOWER(item_name) = LOWER($1)
        "#,
    )
    .bind(&item.item_name)
    .fetch_optional(&mut *tx)
    .await?;
    if duplicate.is_some() {
        return Ok(CreateOutcome::DuplicateName);
    }

    let category: Option<(i64,)> =
        sqlx::query_as(r#"SELECT category_id FROM categories WHERE cat_name = $1"#)
            .bind(&item.item_cat)
            .fetch_optional(&mut *tx)
            .await?;
    let Some((category_id,)) = category else {
        return Ok(CreateOutcome::UnknownCategory);
    };

    let (item_id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO fridge_items (item_name, quantity, price, expiration_date, item_cat)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING item_id
        "#,
    )
    .bind(&item.item_name)
    .bind(item.quantity)
    .bind(item.price)
    .bind(item.expiration_date)
    .bind(category_id)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(r#"INSERT INTO user_fridge (user_id, item_id) VALUES ($1, $2)"#)
        .bind(user_id)
        .bind(item_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(CreateOutcome::Created(item_id))
}

/// Update an item's quantity and stamp the updating user. Returns false when
/// no row matched.
pub async fn set_quantity(
    db: &PgPool,
    item_id: i64,
    quantity: i32,
    user_id: i64,
) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE fridge_items
        SET quantity = $1, last_updated_by = $2
        WHERE item_id = $3
        "#,
    )
    .bind(quantity)
    .bind(user_id)
    .bind(item_id)
    .execute(db)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Delete an item unconditionally. Link rows cascade. Returns false when no
/// row matched.
pub async fn delete(db: &PgPool, item_id: i64) -> anyhow::Result<bool> {
    let result = sqlx::query(r#"DELETE FROM fridge_items WHERE item_id = $1"#)
        .bind(item_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Record that a user added an item.
pub async fn link_user(db: &PgPool, user_id: i64, item_id: i64) -> anyhow::Result<()> {
    sqlx::query(r#"INSERT INTO user_fridge (user_id, item_id) VALUES ($1, $2)"#)
        .bind(user_id)
        .bind(item_id)
        .execute(db)
        .await?;
    Ok(())
}
