//! Menu Item Repository

use super::{RepoError, RepoResult};
use shared::models::{MenuItem, MenuItemCreate, MenuItemDetail, MenuItemRow};
use shared::util::snowflake_id;
use sqlx::SqlitePool;

const ITEM_SELECT: &str = "SELECT id, restaurant_id, name, description, price, kind, \
     course_type, elements, drink_type FROM menu_item";

fn into_item(row: MenuItemRow) -> RepoResult<MenuItem> {
    MenuItem::try_from(row).map_err(RepoError::Database)
}

pub async fn find_by_restaurant(
    pool: &SqlitePool,
    restaurant_id: i64,
) -> RepoResult<Vec<MenuItem>> {
    let rows = sqlx::query_as::<_, MenuItemRow>(&format!(
        "{ITEM_SELECT} WHERE restaurant_id = ? ORDER BY name"
    ))
    .bind(restaurant_id)
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(into_item).collect()
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MenuItem>> {
    let row = sqlx::query_as::<_, MenuItemRow>(&format!("{ITEM_SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(into_item).transpose()
}

pub async fn create(
    pool: &SqlitePool,
    restaurant_id: i64,
    data: MenuItemCreate,
) -> RepoResult<MenuItem> {
    let id = snowflake_id();

    let (course_type, elements, drink_type) = match &data.detail {
        MenuItemDetail::Dish {
            course_type,
            elements,
        } => {
            let elements_json = serde_json::to_string(elements)
                .map_err(|e| RepoError::Validation(format!("Invalid dish elements: {e}")))?;
            (Some(course_type.clone()), Some(elements_json), None)
        }
        MenuItemDetail::Drink { drink_type } => (None, None, Some(drink_type.clone())),
    };

    sqlx::query(
        "INSERT INTO menu_item
            (id, restaurant_id, name, description, price, kind, course_type, elements, drink_type)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(restaurant_id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(data.detail.kind_str())
    .bind(course_type)
    .bind(elements)
    .bind(drink_type)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu item".into()))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM menu_item WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
