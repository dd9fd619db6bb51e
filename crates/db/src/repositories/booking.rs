use crate::models::DbBooking;
use chrono::Utc;
use eyre::Result;
use portal_core::models::booking::CreateBookingRequest;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_bookings_by_date(
    pool: &Pool<Postgres>,
    appointment_date: &str,
) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, treatment, appointment_date, slot, email, patient, phone,
               price, paid, transaction_id, created_at
        FROM bookings
        WHERE appointment_date = $1
        "#,
    )
    .bind(appointment_date)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

pub async fn find_patient_bookings(
    pool: &Pool<Postgres>,
    appointment_date: &str,
    email: &str,
    treatment: &str,
) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, treatment, appointment_date, slot, email, patient, phone,
               price, paid, transaction_id, created_at
        FROM bookings
        WHERE appointment_date = $1 AND email = $2 AND treatment = $3
        "#,
    )
    .bind(appointment_date)
    .bind(email)
    .bind(treatment)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

/// Inserts a booking at `price` unless it collides with one of the
/// uniqueness constraints on `bookings`, in which case `None` is returned.
pub async fn create_booking(
    pool: &Pool<Postgres>,
    booking: &CreateBookingRequest,
    price: f64,
) -> Result<Option<DbBooking>> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating booking: id={}, treatment={}, date={}, slot={}",
        id, booking.treatment, booking.appointment_date, booking.slot
    );

    let created = sqlx::query_as::<_, DbBooking>(
        r#"
        INSERT INTO bookings (id, treatment, appointment_date, slot, email, patient, phone, price, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        ON CONFLICT DO NOTHING
        RETURNING id, treatment, appointment_date, slot, email, patient, phone,
                  price, paid, transaction_id, created_at
        "#,
    )
    .bind(id)
    .bind(&booking.treatment)
    .bind(&booking.appointment_date)
    .bind(&booking.slot)
    .bind(&booking.email)
    .bind(&booking.patient)
    .bind(&booking.phone)
    .bind(price)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    if created.is_none() {
        tracing::debug!("Booking insert skipped by uniqueness constraint: id={}", id);
    }

    Ok(created)
}

pub async fn get_bookings_by_email(pool: &Pool<Postgres>, email: &str) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, treatment, appointment_date, slot, email, patient, phone,
               price, paid, transaction_id, created_at
        FROM bookings
        WHERE email = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(email)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

pub async fn get_booking_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbBooking>> {
    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, treatment, appointment_date, slot, email, patient, phone,
               price, paid, transaction_id, created_at
        FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(booking)
}
