pub mod appointment;
pub mod booking;
pub mod doctor;
pub mod payment;
pub mod user;
