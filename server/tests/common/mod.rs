//! Shared fixtures for integration tests
//!
//! Everything runs against an in-memory SQLite database with the real
//! migrations applied.
#![allow(dead_code)]

use plateful_server::auth::CurrentUser;
use plateful_server::db::DbService;
use plateful_server::db::repository::{dining_table, restaurant, time_slot, user};
use shared::models::{DiningTable, DiningTableCreate, Restaurant, RestaurantCreate, TimeSlot, TimeSlotCreate};
use shared::types::{DayOfWeek, UserRole};
use sqlx::SqlitePool;
use std::sync::atomic::{AtomicI64, Ordering};

static PHONE_SEQ: AtomicI64 = AtomicI64::new(0);

pub async fn test_pool() -> SqlitePool {
    DbService::new_in_memory()
        .await
        .expect("in-memory database")
        .pool
}

/// Insert a user and return it as the authenticated principal
pub async fn create_user(pool: &SqlitePool, name: &str, role: UserRole) -> CurrentUser {
    let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
    let phone = format!("+3519{:08}", 10_000_000 + PHONE_SEQ.fetch_add(1, Ordering::Relaxed));
    let created = user::create(pool, name, &email, &phone, "unused-hash", role)
        .await
        .expect("create user");
    CurrentUser {
        id: created.id,
        name: created.name,
        email: created.email,
        role: created.role,
    }
}

pub async fn create_customer(pool: &SqlitePool, name: &str) -> CurrentUser {
    create_user(pool, name, UserRole::Customer).await
}

pub async fn create_business(pool: &SqlitePool, name: &str) -> CurrentUser {
    create_user(pool, name, UserRole::Business).await
}

pub async fn create_restaurant(pool: &SqlitePool, owner: &CurrentUser, name: &str) -> Restaurant {
    restaurant::create(
        pool,
        owner.id,
        RestaurantCreate {
            name: name.to_string(),
            address: "1 Main Street".to_string(),
            description: None,
        },
    )
    .await
    .expect("create restaurant")
}

pub async fn create_slot(pool: &SqlitePool, restaurant_id: i64, day: DayOfWeek) -> TimeSlot {
    time_slot::create(
        pool,
        restaurant_id,
        TimeSlotCreate {
            day_of_week: day,
            start_hour: 12.0,
            end_hour: 14.0,
        },
    )
    .await
    .expect("create time slot")
}

pub async fn create_table(
    pool: &SqlitePool,
    restaurant_id: i64,
    number: i64,
    capacity: i64,
) -> DiningTable {
    dining_table::create(
        pool,
        restaurant_id,
        DiningTableCreate {
            number,
            capacity,
            outside: false,
        },
    )
    .await
    .expect("create dining table")
}
