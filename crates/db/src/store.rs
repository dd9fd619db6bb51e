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
use uuid::Uuid;

use crate::{repositories, DbPool};

/// PostgreSQL backed store delegating to the repository functions.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentStore for PgStore {
    async fn fetch_all_options(&self) -> Result<Vec<AppointmentOption>> {
        let rows = repositories::appointment_option::get_all_options(&self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn fetch_option_names(&self) -> Result<Vec<String>> {
        repositories::appointment_option::get_option_names(&self.pool).await
    }

    async fn find_option(&self, name: &str) -> Result<Option<AppointmentOption>> {
        let row = repositories::appointment_option::get_option_by_name(&self.pool, name).await?;
        Ok(row.map(Into::into))
    }

    async fn fetch_bookings_on(&self, appointment_date: &str) -> Result<Vec<Booking>> {
        let rows = repositories::booking::get_bookings_by_date(&self.pool, appointment_date).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_bookings(
        &self,
        appointment_date: &str,
        email: &str,
        treatment: &str,
    ) -> Result<Vec<Booking>> {
        let rows = repositories::booking::find_patient_bookings(
            &self.pool,
            appointment_date,
            email,
            treatment,
        )
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert_booking(
        &self,
        booking: &CreateBookingRequest,
        price: f64,
    ) -> Result<BookingInsert> {
        let inserted = repositories::booking::create_booking(&self.pool, booking, price).await?;
        Ok(match inserted {
            Some(row) => BookingInsert::Inserted(row.into()),
            None => BookingInsert::Conflict,
        })
    }

    async fn bookings_by_email(&self, email: &str) -> Result<Vec<Booking>> {
        let rows = repositories::booking::get_bookings_by_email(&self.pool, email).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn booking_by_id(&self, id: Uuid) -> Result<Option<Booking>> {
        let row = repositories::booking::get_booking_by_id(&self.pool, id).await?;
        Ok(row.map(Into::into))
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        repositories::user::get_user_by_email(&self.pool, email)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        repositories::user::get_all_users(&self.pool)
            .await?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    async fn insert_user(&self, user: &CreateUserRequest) -> Result<Option<User>> {
        repositories::user::create_user(&self.pool, &user.name, &user.email)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn set_role(&self, id: Uuid, role: Role) -> Result<bool> {
        repositories::user::update_user_role(&self.pool, id, role).await
    }
}

#[async_trait]
impl DoctorStore for PgStore {
    async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        let rows = repositories::doctor::get_all_doctors(&self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert_doctor(&self, doctor: &CreateDoctorRequest) -> Result<Doctor> {
        let row = repositories::doctor::create_doctor(&self.pool, doctor).await?;
        Ok(row.into())
    }

    async fn delete_doctor(&self, id: Uuid) -> Result<bool> {
        repositories::doctor::delete_doctor(&self.pool, id).await
    }
}

#[async_trait]
impl PaymentStore for PgStore {
    async fn record_payment(&self, booking: &Booking, transaction_id: &str) -> Result<Option<Payment>> {
        let row = repositories::payment::record_payment(&self.pool, booking, transaction_id).await?;
        Ok(row.map(Into::into))
    }
}
