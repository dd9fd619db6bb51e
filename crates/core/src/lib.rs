//! Domain layer for the doctors portal: records, errors, slot availability,
//! the booking guard, authorization rules and the persistence interface the
//! outer crates implement.

pub mod auth;
pub mod availability;
pub mod booking;
pub mod errors;
pub mod models;
pub mod store;
