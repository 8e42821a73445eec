use sqlx::PgPool;

use super::dto::{Category, CategoryName};

pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Category>> {
    let rows = sqlx::query_as::<_, Category>(
        r#"SELECT category_id, cat_name FROM categories ORDER BY category_id"#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find_by_name_ci(db: &PgPool, cat_name: &str) -> anyhow::Result<Option<Category>> {
    let row = sqlx::query_as::<_, Category>(
        r#"
        SELECT category_id, cat_name FROM categories
        WHERE LOWER(cat_name) = LOWER($1)
        "#,
    )
    .bind(cat_name)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn create(db: &PgPool, cat_name: &str) -> anyhow::Result<Category> {
    let row = sqlx::query_as::<_, Category>(
        r#"
        INSERT INTO categories (cat_name)
        VALUES ($1)
        RETURNING category_id, cat_name
        "#,
    )
    .bind(cat_name)
    .fetch_one(db)
    .await?;
    Ok(row)
}

/// The category assigned to an item, if any.
pub async fn for_item(db: &PgPool, item_id: i64) -> anyhow::Result<Vec<CategoryName>> {
    let rows = sqlx::query_as::<_, CategoryName>(
        r#"
        SELECT c.cat_name
        FROM categories c
        JOIN fridge_items i ON i.item_cat = c.category_id
        WHERE i.item_id = $1
        "#,
    )
    .bind(item_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Point an item at a category.
pub async fn assign_to_item(db: &PgPool, item_id: i64, category_id: i64) -> anyhow::Result<()> {
    sqlx::query(r#"UPDATE fridge_items SET item_cat = $1 WHERE item_id = $2"#)
        .bind(category_id)
        .bind(item_id)
        .execute(db)
        .await?;
    Ok(())
}
