pub mod appointment_option;
pub mod booking;
pub mod doctor;
pub mod payment;
pub mod user;
