//! Reservation creation and table allocation tests

mod common;

use chrono::NaiveDate;
use common::{create_business, create_customer, create_restaurant, create_slot, create_table, test_pool};
use plateful_server::AppError;
use plateful_server::services::reservation;
use shared::models::ReservationCreate;
use shared::types::DayOfWeek;

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
}

fn request(restaurant_id: i64, time_slot_id: i64, num_guests: i64) -> ReservationCreate {
    ReservationCreate {
        restaurant_id,
        time_slot_id,
        num_guests,
        date: monday(),
    }
}

#[tokio::test]
async fn assigns_the_first_fitting_table_and_rejects_when_full() {
    let pool = test_pool().await;
    let owner = create_business(&pool, "Bistro Owner").await;
    let restaurant = create_restaurant(&pool, &owner, "Bistro").await;
    let slot = create_slot(&pool, restaurant.id, DayOfWeek::Monday).await;
    let table = create_table(&pool, restaurant.id, 1, 4).await;

    let customer = create_customer(&pool, "Ana").await;
    let created = reservation::create_reservation(
        &pool,
        &customer,
        request(restaurant.id, slot.id, 2),
    )
    .await
    .unwrap();
    assert_eq!(created.table_id, table.id);
    assert_eq!(created.num_guests, 2);

    // The only table is taken: same slot, any party size, must be refused
    let other = create_customer(&pool, "Bruno").await;
    let err = reservation::create_reservation(&pool, &other, request(restaurant.id, slot.id, 2))
        .await
        .unwrap_err();
    match err {
        AppError::BusinessRule(msg) => {
            assert_eq!(msg, "No tables available for the selected time slot")
        }
        other => panic!("expected business rule rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn never_assigns_a_table_smaller_than_the_party() {
    let pool = test_pool().await;
    let owner = create_business(&pool, "Bistro Owner").await;
    let restaurant = create_restaurant(&pool, &owner, "Bistro").await;
    let slot = create_slot(&pool, restaurant.id, DayOfWeek::Monday).await;
    create_table(&pool, restaurant.id, 1, 2).await;
    let big = create_table(&pool, restaurant.id, 2, 4).await;

    let customer = create_customer(&pool, "Ana").await;
    let created = reservation::create_reservation(
        &pool,
        &customer,
        request(restaurant.id, slot.id, 3),
    )
    .await
    .unwrap();
    // Table 1 seats only 2, so the 4-seater must be chosen
    assert_eq!(created.table_id, big.id);
}

#[tokio::test]
async fn scan_order_is_ascending_table_number() {
    let pool = test_pool().await;
    let owner = create_business(&pool, "Bistro Owner").await;
    let restaurant = create_restaurant(&pool, &owner, "Bistro").await;
    let slot = create_slot(&pool, restaurant.id, DayOfWeek::Monday).await;
    // Insert out of order; allocation must still prefer the lowest number
    create_table(&pool, restaurant.id, 7, 4).await;
    let first = create_table(&pool, restaurant.id, 2, 4).await;

    let customer = create_customer(&pool, "Ana").await;
    let created = reservation::create_reservation(
        &pool,
        &customer,
        request(restaurant.id, slot.id, 2),
    )
    .await
    .unwrap();
    assert_eq!(created.table_id, first.id);
}

#[tokio::test]
async fn no_two_reservations_share_a_table_and_slot() {
    let pool = test_pool().await;
    let owner = create_business(&pool, "Bistro Owner").await;
    let restaurant = create_restaurant(&pool, &owner, "Bistro").await;
    let slot = create_slot(&pool, restaurant.id, DayOfWeek::Monday).await;
    create_table(&pool, restaurant.id, 1, 4).await;
    create_table(&pool, restaurant.id, 2, 4).await;

    let ana = create_customer(&pool, "Ana").await;
    let bruno = create_customer(&pool, "Bruno").await;

    let first = reservation::create_reservation(&pool, &ana, request(restaurant.id, slot.id, 2))
        .await
        .unwrap();
    let second = reservation::create_reservation(&pool, &bruno, request(restaurant.id, slot.id, 2))
        .await
        .unwrap();

    assert_eq!(first.time_slot_id, second.time_slot_id);
    assert_ne!(first.table_id, second.table_id);
}

#[tokio::test]
async fn validation_order_matches_the_contract() {
    let pool = test_pool().await;
    let owner = create_business(&pool, "Bistro Owner").await;
    let restaurant = create_restaurant(&pool, &owner, "Bistro").await;
    let slot = create_slot(&pool, restaurant.id, DayOfWeek::Monday).await;
    create_table(&pool, restaurant.id, 1, 4).await;

    let other_restaurant = create_restaurant(&pool, &owner, "Trattoria").await;
    let foreign_slot = create_slot(&pool, other_restaurant.id, DayOfWeek::Monday).await;

    let customer = create_customer(&pool, "Ana").await;

    // num_guests first
    let err = reservation::create_reservation(&pool, &customer, request(restaurant.id, slot.id, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // then restaurant existence
    let err = reservation::create_reservation(&pool, &customer, request(404_404, slot.id, 2))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // then slot existence
    let err = reservation::create_reservation(&pool, &customer, request(restaurant.id, 404_404, 2))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // and finally slot/restaurant agreement
    let err = reservation::create_reservation(
        &pool,
        &customer,
        request(restaurant.id, foreign_slot.id, 2),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn cancelling_frees_the_table() {
    let pool = test_pool().await;
    let owner = create_business(&pool, "Bistro Owner").await;
    let restaurant = create_restaurant(&pool, &owner, "Bistro").await;
    let slot = create_slot(&pool, restaurant.id, DayOfWeek::Monday).await;
    create_table(&pool, restaurant.id, 1, 4).await;

    let ana = create_customer(&pool, "Ana").await;
    let bruno = create_customer(&pool, "Bruno").await;

    let first = reservation::create_reservation(&pool, &ana, request(restaurant.id, slot.id, 2))
        .await
        .unwrap();

    // Bruno cannot cancel Ana's reservation
    let err = reservation::cancel_reservation(&pool, &bruno, first.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    reservation::cancel_reservation(&pool, &ana, first.id)
        .await
        .unwrap();

    // Cancelling twice is an invalid state transition
    let err = reservation::cancel_reservation(&pool, &ana, first.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));

    // The slot is free again
    reservation::create_reservation(&pool, &bruno, request(restaurant.id, slot.id, 2))
        .await
        .unwrap();
}

#[tokio::test]
async fn participants_are_unique_and_invited_by_the_creator() {
    let pool = test_pool().await;
    let owner = create_business(&pool, "Bistro Owner").await;
    let restaurant = create_restaurant(&pool, &owner, "Bistro").await;
    let slot = create_slot(&pool, restaurant.id, DayOfWeek::Monday).await;
    create_table(&pool, restaurant.id, 1, 4).await;

    let ana = create_customer(&pool, "Ana").await;
    let bruno = create_customer(&pool, "Bruno").await;
    let carla = create_customer(&pool, "Carla").await;

    let created = reservation::create_reservation(&pool, &ana, request(restaurant.id, slot.id, 3))
        .await
        .unwrap();

    // Only the creator can invite
    let err = reservation::add_participant(&pool, &bruno, created.id, carla.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // The creator is implicitly part of the reservation
    let err = reservation::add_participant(&pool, &ana, created.id, ana.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    reservation::add_participant(&pool, &ana, created.id, bruno.id)
        .await
        .unwrap();

    let err = reservation::add_participant(&pool, &ana, created.id, bruno.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let views = reservation::list_my_reservations(&pool, ana.id).await.unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].participants.len(), 1);
    assert_eq!(views[0].participants[0].customer_id, bruno.id);
    assert_eq!(views[0].reservation.table_number, 1);
    assert_eq!(views[0].reservation.restaurant_name, "Bistro");
}
