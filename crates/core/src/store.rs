//! Persistence interface consumed by the domain and the HTTP layer.
//!
//! Implementations live in `portal-db`; handlers only ever see an
//! `Arc<dyn PortalStore>`.

use async_trait::async_trait;
use eyre::Result;
use uuid::Uuid;

use crate::models::{
    appointment::AppointmentOption,
    booking::{Booking, CreateBookingRequest},
    doctor::{CreateDoctorRequest, Doctor},
    payment::Payment,
    user::{CreateUserRequest, Role, User},
};

/// Result of attempting to persist a booking.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingInsert {
    Inserted(Booking),
    /// The store already holds a booking for the same slot, or for the same
    /// patient, treatment and date.
    Conflict,
}

#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn fetch_all_options(&self) -> Result<Vec<AppointmentOption>>;

    async fn fetch_option_names(&self) -> Result<Vec<String>>;

    async fn find_option(&self, name: &str) -> Result<Option<AppointmentOption>>;

    async fn fetch_bookings_on(&self, appointment_date: &str) -> Result<Vec<Booking>>;

    async fn find_bookings(
        &self,
        appointment_date: &str,
        email: &str,
        treatment: &str,
    ) -> Result<Vec<Booking>>;

    /// Stores `booking` at the catalog `price` of its treatment.
    async fn insert_booking(
        &self,
        booking: &CreateBookingRequest,
        price: f64,
    ) -> Result<BookingInsert>;

    async fn bookings_by_email(&self, email: &str) -> Result<Vec<Booking>>;

    async fn booking_by_id(&self, id: Uuid) -> Result<Option<Booking>>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn list_users(&self) -> Result<Vec<User>>;

    /// Returns `None` when a user with the same email already exists.
    async fn insert_user(&self, user: &CreateUserRequest) -> Result<Option<User>>;

    /// Returns `false` when no user has the given id.
    async fn set_role(&self, id: Uuid, role: Role) -> Result<bool>;
}

#[async_trait]
pub trait DoctorStore: Send + Sync {
    async fn list_doctors(&self) -> Result<Vec<Doctor>>;

    async fn insert_doctor(&self, doctor: &CreateDoctorRequest) -> Result<Doctor>;

    async fn delete_doctor(&self, id: Uuid) -> Result<bool>;
}

#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Flags `booking` as paid and stores a payment for its email and price
    /// in one unit of work. Returns `None` without writing anything if the
    /// booking does not exist or is already paid.
    async fn record_payment(&self, booking: &Booking, transaction_id: &str) -> Result<Option<Payment>>;
}

pub trait PortalStore: AppointmentStore + UserStore + DoctorStore + PaymentStore {}

impl<T> PortalStore for T where T: AppointmentStore + UserStore + DoctorStore + PaymentStore {}
