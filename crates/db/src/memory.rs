//! In-memory store with the same uniqueness rules as the PostgreSQL schema.

use async_trait::async_trait;
use eyre::Result;
use portal_core::{
    models::{
        appointment::AppointmentOption,
        booking::{Booking, CreateBookingRequest},
        doctor::{CreateDoctorRequest, Doctor},
        payment::Payment,
        user::{CreateUserRequest, Role, User},
    },
    store::{AppointmentStore, BookingInsert, DoctorStore, PaymentStore, UserStore},
};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
struct Collections {
    options: Vec<AppointmentOption>,
    bookings: Vec<Booking>,
    users: Vec<User>,
    doctors: Vec<Doctor>,
    payments: Vec<Payment>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: Vec<AppointmentOption>) -> Self {
        Self {
            inner: RwLock::new(Collections {
                options,
                ..Collections::default()
            }),
        }
    }

    pub async fn add_user(&self, name: &str, email: &str, role: Role) -> User {
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            role,
        };
        self.inner.write().await.users.push(user.clone());
        user
    }

    pub async fn payments(&self) -> Vec<Payment> {
        self.inner.read().await.payments.clone()
    }
}

#[async_trait]
impl AppointmentStore for MemoryStore {
    async fn fetch_all_options(&self) -> Result<Vec<AppointmentOption>> {
        Ok(self.inner.read().await.options.clone())
    }

    async fn fetch_option_names(&self) -> Result<Vec<String>> {
        let inner = self.inner.read().await;
        Ok(inner.options.iter().map(|o| o.name.clone()).collect())
    }

    async fn find_option(&self, name: &str) -> Result<Option<AppointmentOption>> {
        let inner = self.inner.read().await;
        Ok(inner.options.iter().find(|o| o.name == name).cloned())
    }

    async fn fetch_bookings_on(&self, appointment_date: &str) -> Result<Vec<Booking>> {
        let inner = self.inner.read().await;
        Ok(inner
            .bookings
            .iter()
            .filter(|b| b.appointment_date == appointment_date)
            .cloned()
            .collect())
    }

    async fn find_bookings(
        &self,
        appointment_date: &str,
        email: &str,
        treatment: &str,
    ) -> Result<Vec<Booking>> {
        let inner = self.inner.read().await;
        Ok(inner
            .bookings
            .iter()
            .filter(|b| {
                b.appointment_date == appointment_date && b.email == email && b.treatment == treatment
            })
            .cloned()
            .collect())
    }

    async fn insert_booking(
        &self,
        booking: &CreateBookingRequest,
        price: f64,
    ) -> Result<BookingInsert> {
        let mut inner = self.inner.write().await;

        let conflict = inner.bookings.iter().any(|b| {
            b.appointment_date == booking.appointment_date
                && b.treatment == booking.treatment
                && (b.slot == booking.slot || b.email == booking.email)
        });
        if conflict {
            return Ok(BookingInsert::Conflict);
        }

        let stored = Booking {
            id: Uuid::new_v4(),
            treatment: booking.treatment.clone(),
            appointment_date: booking.appointment_date.clone(),
            slot: booking.slot.clone(),
            email: booking.email.clone(),
            patient: booking.patient.clone(),
            phone: booking.phone.clone(),
            price,
            paid: false,
            transaction_id: None,
        };
        inner.bookings.push(stored.clone());

        Ok(BookingInsert::Inserted(stored))
    }

    async fn bookings_by_email(&self, email: &str) -> Result<Vec<Booking>> {
        let inner = self.inner.read().await;
        Ok(inner
            .bookings
            .iter()
            .filter(|b| b.email == email)
            .cloned()
            .collect())
    }

    async fn booking_by_id(&self, id: Uuid) -> Result<Option<Booking>> {
        let inner = self.inner.read().await;
        Ok(inner.bookings.iter().find(|b| b.id == id).cloned())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.inner.read().await.users.clone())
    }

    async fn insert_user(&self, user: &CreateUserRequest) -> Result<Option<User>> {
        let mut inner = self.inner.write().await;
        if inner.users.iter().any(|u| u.email == user.email) {
            return Ok(None);
        }

        let stored = User {
            id: Uuid::new_v4(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: Role::User,
        };
        inner.users.push(stored.clone());
        Ok(Some(stored))
    }

    async fn set_role(&self, id: Uuid, role: Role) -> Result<bool> {
        let mut inner = self.inner.write().await;
        match inner.users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.role = role;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl DoctorStore for MemoryStore {
    async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        Ok(self.inner.read().await.doctors.clone())
    }

    async fn insert_doctor(&self, doctor: &CreateDoctorRequest) -> Result<Doctor> {
        let stored = Doctor {
            id: Uuid::new_v4(),
            name: doctor.name.clone(),
            email: doctor.email.clone(),
            specialty: doctor.specialty.clone(),
            image: doctor.image.clone(),
        };
        self.inner.write().await.doctors.push(stored.clone());
        Ok(stored)
    }

    async fn delete_doctor(&self, id: Uuid) -> Result<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.doctors.len();
        inner.doctors.retain(|d| d.id != id);
        Ok(inner.doctors.len() < before)
    }
}

#[async_trait]
impl PaymentStore for MemoryStore {
    async fn record_payment(&self, booking: &Booking, transaction_id: &str) -> Result<Option<Payment>> {
        let mut inner = self.inner.write().await;

        let Some(stored_booking) = inner
            .bookings
            .iter_mut()
            .find(|b| b.id == booking.id && !b.paid)
        else {
            return Ok(None);
        };
        stored_booking.paid = true;
        stored_booking.transaction_id = Some(transaction_id.to_string());

        let stored = Payment {
            id: Uuid::new_v4(),
            booking_id: stored_booking.id,
            email: stored_booking.email.clone(),
            price: stored_booking.price,
            transaction_id: transaction_id.to_string(),
        };
        inner.payments.push(stored.clone());
        Ok(Some(stored))
    }
}
