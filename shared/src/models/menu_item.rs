//! Menu Item Model
//!
//! Dishes and drinks live in one table with a `kind` discriminator; the
//! Rust side exposes them as the [`MenuItemDetail`] tagged union.

use serde::{Deserialize, Serialize};

/// Flat row as stored in SQLite
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItemRow {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    /// "DISH" | "DRINK"
    pub kind: String,
    pub course_type: Option<String>,
    /// JSON array of ingredient/component names (dishes only)
    pub elements: Option<String>,
    pub drink_type: Option<String>,
}

/// Type-specific fields of a menu item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MenuItemDetail {
    Dish {
        course_type: String,
        #[serde(default)]
        elements: Vec<String>,
    },
    Drink {
        drink_type: String,
    },
}

impl MenuItemDetail {
    pub fn kind_str(&self) -> &'static str {
        match self {
            MenuItemDetail::Dish { .. } => "DISH",
            MenuItemDetail::Drink { .. } => "DRINK",
        }
    }
}

/// Menu item as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    #[serde(flatten)]
    pub detail: MenuItemDetail,
}

impl TryFrom<MenuItemRow> for MenuItem {
    type Error = String;

    fn try_from(row: MenuItemRow) -> Result<Self, Self::Error> {
        let detail = match row.kind.as_str() {
            "DISH" => MenuItemDetail::Dish {
                course_type: row
                    .course_type
                    .ok_or_else(|| format!("dish {} has no course_type", row.id))?,
                elements: match row.elements.as_deref() {
                    Some(raw) => serde_json::from_str(raw)
                        .map_err(|e| format!("dish {} has malformed elements: {e}", row.id))?,
                    None => Vec::new(),
                },
            },
            "DRINK" => MenuItemDetail::Drink {
                drink_type: row
                    .drink_type
                    .ok_or_else(|| format!("drink {} has no drink_type", row.id))?,
            },
            other => return Err(format!("menu item {} has unknown kind {other}", row.id)),
        };

        Ok(MenuItem {
            id: row.id,
            restaurant_id: row.restaurant_id,
            name: row.name,
            description: row.description,
            price: row.price,
            detail,
        })
    }
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    #[serde(flatten)]
    pub detail: MenuItemDetail,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dish_round_trips_through_tagged_json() {
        let item = MenuItem {
            id: 1,
            restaurant_id: 2,
            name: "Carbonara".into(),
            description: None,
            price: 12.5,
            detail: MenuItemDetail::Dish {
                course_type: "MAIN".into(),
                elements: vec!["egg".into(), "guanciale".into()],
            },
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["kind"], "DISH");
        assert_eq!(json["course_type"], "MAIN");
        let back: MenuItem = serde_json::from_value(json).unwrap();
        assert_eq!(back.detail, item.detail);
    }

    #[test]
    fn drink_row_converts_without_dish_fields() {
        let row = MenuItemRow {
            id: 7,
            restaurant_id: 2,
            name: "House Red".into(),
            description: Some("Glass".into()),
            price: 4.0,
            kind: "DRINK".into(),
            course_type: None,
            elements: None,
            drink_type: Some("WINE".into()),
        };
        let item = MenuItem::try_from(row).unwrap();
        assert_eq!(
            item.detail,
            MenuItemDetail::Drink {
                drink_type: "WINE".into()
            }
        );
    }
}
