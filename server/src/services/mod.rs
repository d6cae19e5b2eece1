//! Domain services
//!
//! The logic-bearing slice of the application. CRUD resources go straight
//! from handler to repository; these three domains carry real rules:
//!
//! - [`reservation`] - first-fit table allocation
//! - [`friendship`] - friend-request state machine
//! - [`community`] - membership and post authorization

pub mod community;
pub mod friendship;
pub mod reservation;
