pub mod appointment;
pub mod booking;
pub mod doctor;
pub mod health;
pub mod payment;
pub mod user;
